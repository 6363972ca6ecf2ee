//! Static enemy catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::items;

/// Item every enemy may drop on death.
pub const LOOT_ITEM: &str = items::HEALING_POTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Goblin,
    Skeleton,
    RedWitch,
}

/// Stats shared by every instance of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub name: &'static str,
    pub description: &'static str,
    pub max_hp: u32,
    pub damage: u32,
    pub gold_min: u32,
    pub gold_max: u32,
    /// Probability in `[0, 1]` of dropping [`LOOT_ITEM`] on death.
    pub loot_chance: f64,
    /// Relative weight for weighted encounter tables. Zero keeps the kind
    /// out of random draws (bosses).
    pub weight: u32,
}

const TEMPLATES: [EnemyTemplate; 3] = [
    EnemyTemplate {
        kind: EnemyKind::Goblin,
        name: "Goblin",
        description: "A wiry, yellow-eyed raider with a notched blade and no manners.",
        max_hp: 25,
        damage: 8,
        gold_min: 5,
        gold_max: 10,
        loot_chance: 0.3,
        weight: 3,
    },
    EnemyTemplate {
        kind: EnemyKind::Skeleton,
        name: "Skeleton",
        description: "Yellowed bones held together by spite and an old curse.",
        max_hp: 30,
        damage: 7,
        gold_min: 6,
        gold_max: 12,
        loot_chance: 0.35,
        weight: 1,
    },
    EnemyTemplate {
        kind: EnemyKind::RedWitch,
        name: "Red Witch",
        description: "A tall woman in rags with fire-red hair and empty eye sockets. \
                      Black ooze drips from her bone staff.",
        max_hp: 250,
        damage: 12,
        gold_min: 40,
        gold_max: 60,
        loot_chance: 1.0,
        weight: 0,
    },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [Self::Goblin, Self::Skeleton, Self::RedWitch];

    pub fn template(&self) -> &'static EnemyTemplate {
        match self {
            Self::Goblin => &TEMPLATES[0],
            Self::Skeleton => &TEMPLATES[1],
            Self::RedWitch => &TEMPLATES[2],
        }
    }

    pub fn name(&self) -> &'static str {
        self.template().name
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All templates that take part in weighted draws.
pub fn weighted_templates() -> impl Iterator<Item = &'static EnemyTemplate> {
    TEMPLATES.iter().filter(|t| t.weight > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_lookup_matches_kind() {
        for kind in EnemyKind::ALL {
            assert_eq!(kind.template().kind, kind);
        }
    }

    #[test]
    fn templates_are_well_formed() {
        for t in &TEMPLATES {
            assert!(t.max_hp > 0, "{} must start alive", t.name);
            assert!(t.gold_min <= t.gold_max);
            assert!((0.0..=1.0).contains(&t.loot_chance));
        }
    }

    #[test]
    fn bosses_are_excluded_from_weighted_draws() {
        assert!(weighted_templates().all(|t| t.kind != EnemyKind::RedWitch));
    }
}
