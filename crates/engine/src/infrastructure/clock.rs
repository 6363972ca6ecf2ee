//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max.max(min))
    }

    fn gen_chance(&self, p: f64) -> bool {
        use rand::Rng;
        rand::thread_rng().gen_bool(p.clamp(0.0, 1.0))
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing: every range roll returns the lower bound plus
/// `offset` (clamped into range) and every chance roll returns `chance`.
#[cfg(test)]
pub struct FixedRandom {
    pub offset: u32,
    pub chance: bool,
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        min.saturating_add(self.offset).min(max.max(min))
    }

    fn gen_chance(&self, _p: f64) -> bool {
        self.chance
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::nil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowfire_domain::Dice;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..200 {
            let roll = random.gen_range(5, 10);
            assert!((5..=10).contains(&roll));
        }
        assert!(random.gen_chance(1.0));
        assert!(!random.gen_chance(0.0));
    }

    #[test]
    fn random_port_acts_as_combat_dice() {
        let random: Box<dyn RandomPort> = Box::new(FixedRandom {
            offset: 100,
            chance: true,
        });
        assert_eq!(random.roll_range(5, 10), 10);
        assert!(random.roll_chance(0.3));
    }
}
