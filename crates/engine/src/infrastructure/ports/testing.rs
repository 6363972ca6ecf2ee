//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use shadowfire_domain::Dice;
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform integer in `[min, max]`.
    fn gen_range(&self, min: u32, max: u32) -> u32;
    /// True with probability `p`.
    fn gen_chance(&self, p: f64) -> bool;
    fn gen_uuid(&self) -> Uuid;
}

/// Combat dice backed by whatever random port the app was built with.
impl Dice for dyn RandomPort {
    fn roll_range(&self, min: u32, max: u32) -> u32 {
        self.gen_range(min, max.max(min))
    }

    fn roll_chance(&self, p: f64) -> bool {
        self.gen_chance(p.clamp(0.0, 1.0))
    }
}
