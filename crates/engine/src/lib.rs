//! Shadowfire Engine library.
//!
//! Server-side code for the Shadowfire narrative adventure.
//!
//! ## Structure
//!
//! - `use_cases/` - Character, combat and exploration flows, plus narration
//! - `infrastructure/` - Ports and their adapters (SQLite, chat completions, clock)
//! - `stores/` - In-memory player store
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
