//! Combat use cases.
//!
//! [`Engage`] is the combat trigger; it drives the pure combat engine and
//! hands each resolved round to [`ApplyOutcome`] for persistence.

mod apply_outcome;
mod engage;
mod error;

use std::sync::Arc;

pub use apply_outcome::{AppliedOutcome, ApplyOutcome};
pub use engage::{CombatReport, CombatStatus, Engage, ALREADY_ENGAGED, NO_TARGET, START_ACTION};
pub use error::CombatError;

/// Container for combat use cases.
pub struct CombatUseCases {
    pub engage: Arc<Engage>,
}

impl CombatUseCases {
    pub fn new(engage: Arc<Engage>) -> Self {
        Self { engage }
    }
}
