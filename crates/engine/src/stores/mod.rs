//! In-memory state storage modules.
//!
//! - `InMemoryPlayerRepo` - player records kept for the life of the process

pub mod players;

pub use players::InMemoryPlayerRepo;
