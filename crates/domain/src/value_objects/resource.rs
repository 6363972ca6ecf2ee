//! Bounded resource pools (health, mana).

use serde::{Deserialize, Serialize};

/// A current/max pair that keeps `current <= max` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPool")]
pub struct ResourcePool {
    current: u32,
    max: u32,
}

#[derive(Deserialize)]
struct RawPool {
    current: u32,
    max: u32,
}

impl From<RawPool> for ResourcePool {
    fn from(raw: RawPool) -> Self {
        Self::new(raw.current, raw.max)
    }
}

impl ResourcePool {
    /// Create a pool, clamping `current` into `[0, max]`.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Remove `amount`, stopping at zero. Returns the new current value.
    pub fn drain(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Add `amount`, stopping at max. Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}
