//! Narration facts: what the narrator is allowed to know about a moment.
//!
//! Prose-bound fields carry names and qualitative phrases only. Raw numbers
//! (health, damage, gold, enemy counts) stay in internal fields that are
//! never rendered into prompts.

use serde::Serialize;

use shadowfire_domain::{Encounter, PlayerRecord, RoundOutcome};

use super::text::{bounded, sanitize_player_text};

/// Longest action summary carried in combat facts.
pub const MAX_ACTION_SUMMARY: usize = 120;
/// Cap for every list in a fact bundle.
pub const MAX_LIST_ITEMS: usize = 6;
/// Upper bound on a rendered context block.
pub const MAX_CONTEXT_CHARS: usize = 2000;
/// Longest region description carried into combat facts.
const MAX_REGION_CONTEXT: usize = 300;

/// How badly the last round hurt the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WoundSeverity {
    Unharmed,
    Scratched,
    Wounded,
    Grievous,
}

impl WoundSeverity {
    /// Classify damage taken against the player's maximum health.
    pub fn classify(damage_taken: u32, max_health: u32) -> Self {
        if damage_taken == 0 {
            return Self::Unharmed;
        }
        let max = u64::from(max_health.max(1));
        let damage = u64::from(damage_taken);
        if damage * 10 < max {
            Self::Scratched
        } else if damage * 10 < max * 3 {
            Self::Wounded
        } else {
            Self::Grievous
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Unharmed => "untouched",
            Self::Scratched => "grazed by a glancing blow",
            Self::Wounded => "wounded and bleeding",
            Self::Grievous => "grievously hurt and staggering",
        }
    }
}

/// Qualitative description of how many enemies are still standing.
pub fn remaining_phrase(remaining: u32) -> &'static str {
    match remaining {
        0 => "no foes remain standing",
        1 => "a single foe still stands",
        2 | 3 => "a few foes still stand",
        _ => "many foes still press in",
    }
}

/// Fixed-schema facts for one combat beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatFacts {
    pub player_name: String,
    pub class_name: String,
    pub action_summary: String,
    pub encounter_started: bool,
    pub killed: bool,
    pub continues: bool,
    pub victory: bool,
    pub defeat: bool,
    pub player_wounded: bool,
    pub wound_severity: WoundSeverity,
    pub target_name: Option<String>,
    /// Internal only; prose uses [`CombatFacts::remaining_phrase`].
    #[serde(skip)]
    pub remaining_enemies: u32,
    pub remaining_phrase: String,
    pub loot: Vec<String>,
    pub gold_found: bool,
    pub quests_completed: Vec<String>,
    pub region_context: String,
}

impl CombatFacts {
    fn base(record: &PlayerRecord, action: &str) -> Self {
        let region = record.region.region();
        Self {
            player_name: record.name.as_str().to_string(),
            class_name: record.class.display_name().to_string(),
            action_summary: sanitize_player_text(action, MAX_ACTION_SUMMARY),
            encounter_started: false,
            killed: false,
            continues: false,
            victory: false,
            defeat: false,
            player_wounded: false,
            wound_severity: WoundSeverity::Unharmed,
            target_name: None,
            remaining_enemies: 0,
            remaining_phrase: remaining_phrase(0).to_string(),
            loot: Vec::new(),
            gold_found: false,
            quests_completed: Vec::new(),
            region_context: bounded(
                &format!("{}. {}", region.name, region.description),
                MAX_REGION_CONTEXT,
            ),
        }
    }

    /// Facts for a freshly started encounter.
    pub fn encounter_started(record: &PlayerRecord, action: &str, encounter: &Encounter) -> Self {
        let remaining = encounter.alive_count();
        Self {
            encounter_started: true,
            continues: remaining > 0,
            target_name: encounter.leading_kind().map(|k| k.name().to_string()),
            remaining_enemies: remaining,
            remaining_phrase: remaining_phrase(remaining).to_string(),
            ..Self::base(record, action)
        }
    }

    /// Facts for a resolved round. `record` is the state after the outcome
    /// was applied; `completed_quests` are quest names finished this round.
    pub fn round(
        record: &PlayerRecord,
        action: &str,
        outcome: &RoundOutcome,
        completed_quests: &[&str],
    ) -> Self {
        let defeat = record.is_fallen();
        let continues = outcome.combat_continues && !defeat;
        Self {
            killed: outcome.enemy_killed,
            continues,
            victory: !outcome.combat_continues && !defeat,
            defeat,
            player_wounded: outcome.player_damage_taken > 0,
            wound_severity: WoundSeverity::classify(
                outcome.player_damage_taken,
                record.health.max(),
            ),
            target_name: Some(outcome.target.name().to_string()),
            remaining_enemies: outcome.remaining_enemies,
            remaining_phrase: remaining_phrase(outcome.remaining_enemies).to_string(),
            loot: outcome
                .items_dropped
                .iter()
                .take(MAX_LIST_ITEMS)
                .cloned()
                .collect(),
            gold_found: outcome.gold_awarded > 0,
            quests_completed: completed_quests
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|q| q.to_string())
                .collect(),
            ..Self::base(record, action)
        }
    }

    /// Bullet list of what happened, for prompts and templates.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Scene: {}", self.region_context),
            format!("Hero: {}, {}", self.player_name, self.class_name),
        ];
        let target = self.target_name.as_deref().unwrap_or("the enemy");

        if self.encounter_started {
            lines.push(format!("Enemies emerge, led by a {target}; {}.", self.remaining_phrase));
        } else {
            lines.push(format!("The hero strikes at the {target}."));
            if self.killed {
                lines.push(format!("The {target} falls dead."));
            } else {
                lines.push(format!("The {target} is hurt but still fighting."));
            }
            if self.player_wounded {
                lines.push(format!("The enemies strike back; the hero is {}.", self.wound_severity.phrase()));
            }
            if !self.loot.is_empty() {
                lines.push(format!("Spoils found: {}.", self.loot.join(", ")));
            }
            if self.gold_found {
                lines.push("Coins glint among the remains.".to_string());
            }
            if self.victory {
                lines.push("The battle is won; no foes remain standing.".to_string());
            } else if self.defeat {
                lines.push("The hero collapses, defeated.".to_string());
            } else if self.continues {
                lines.push(format!("The fight goes on; {}.", self.remaining_phrase));
            }
            for quest in &self.quests_completed {
                lines.push(format!("Quest fulfilled: {quest}."));
            }
        }
        bounded(&lines.join("\n"), MAX_CONTEXT_CHARS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpcFact {
    pub name: String,
    pub role: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedFact {
    pub name: String,
    pub description: String,
}

/// World context for free-form exploration.
///
/// Quests expose only their name and description; activation and completion
/// conditions never leave the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationFacts {
    pub player_name: String,
    pub class_name: String,
    pub region_name: String,
    pub region_description: String,
    pub npcs: Vec<NpcFact>,
    pub enemies: Vec<NamedFact>,
    pub quests: Vec<NamedFact>,
    pub exits: Vec<String>,
    pub inventory: Vec<String>,
}

impl ExplorationFacts {
    pub fn for_player(record: &PlayerRecord) -> Self {
        let region = record.region.region();
        Self {
            player_name: record.name.as_str().to_string(),
            class_name: record.class.display_name().to_string(),
            region_name: region.name.to_string(),
            region_description: region.description.to_string(),
            npcs: region
                .npcs
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|npc| NpcFact {
                    name: npc.name.to_string(),
                    role: npc.role.to_string(),
                    description: npc.description.to_string(),
                })
                .collect(),
            enemies: region
                .enemies
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|kind| {
                    let template = kind.template();
                    NamedFact {
                        name: template.name.to_string(),
                        description: template.description.to_string(),
                    }
                })
                .collect(),
            quests: record
                .active_quests
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|id| {
                    let quest = id.quest();
                    NamedFact {
                        name: quest.name.to_string(),
                        description: quest.description.to_string(),
                    }
                })
                .collect(),
            exits: region
                .exits
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|id| id.region().name.to_string())
                .collect(),
            inventory: record
                .inventory
                .iter()
                .take(MAX_LIST_ITEMS)
                .map(|(item, _)| item.to_string())
                .collect(),
        }
    }

    /// World context block, bounded to [`MAX_CONTEXT_CHARS`].
    pub fn render(&self) -> String {
        let mut out = format!(
            "Location: {}\n{}\nHero: {}, {}",
            self.region_name, self.region_description, self.player_name, self.class_name
        );
        if !self.npcs.is_empty() {
            out.push_str("\nPeople here:");
            for npc in &self.npcs {
                out.push_str(&format!("\n- {} ({}): {}", npc.name, npc.role, npc.description));
            }
        }
        if !self.enemies.is_empty() {
            out.push_str("\nDangers here:");
            for enemy in &self.enemies {
                out.push_str(&format!("\n- {}: {}", enemy.name, enemy.description));
            }
        }
        if !self.quests.is_empty() {
            out.push_str("\nThe hero's quests:");
            for quest in &self.quests {
                out.push_str(&format!("\n- {}: {}", quest.name, quest.description));
            }
        }
        if !self.exits.is_empty() {
            out.push_str(&format!("\nPaths lead to: {}", self.exits.join(", ")));
        }
        if !self.inventory.is_empty() {
            out.push_str(&format!("\nThe hero carries: {}", self.inventory.join(", ")));
        }
        bounded(&out, MAX_CONTEXT_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shadowfire_domain::catalog::items;
    use shadowfire_domain::{
        CharacterClass, EnemyInstance, EnemyKind, PlayerId, PlayerName, QuestId, RegionId,
    };

    fn record() -> PlayerRecord {
        PlayerRecord::new(
            PlayerId::new("p").unwrap(),
            PlayerName::new("Mira").unwrap(),
            CharacterClass::Warrior,
            Utc::now(),
        )
    }

    fn outcome() -> RoundOutcome {
        RoundOutcome {
            damage_dealt: 26,
            enemy_killed: true,
            target: EnemyKind::Goblin,
            player_damage_taken: 16,
            gold_awarded: 7,
            items_dropped: vec![items::HEALING_POTION.to_string()],
            remaining_enemies: 2,
            combat_continues: true,
        }
    }

    fn has_digit(s: &str) -> bool {
        s.chars().any(|c| c.is_ascii_digit())
    }

    #[test]
    fn wound_severity_scales_with_max_health() {
        assert_eq!(WoundSeverity::classify(0, 100), WoundSeverity::Unharmed);
        assert_eq!(WoundSeverity::classify(9, 100), WoundSeverity::Scratched);
        assert_eq!(WoundSeverity::classify(16, 129), WoundSeverity::Wounded);
        assert_eq!(WoundSeverity::classify(50, 100), WoundSeverity::Grievous);
        assert_eq!(WoundSeverity::classify(5, 0), WoundSeverity::Grievous);
    }

    #[test]
    fn round_facts_render_without_numbers() {
        let facts = CombatFacts::round(&record(), "I swing at 3 goblins", &outcome(), &[]);
        assert!(facts.killed && facts.continues && facts.player_wounded && facts.gold_found);
        assert!(!facts.victory && !facts.defeat);
        assert_eq!(facts.remaining_enemies, 2);
        assert!(!has_digit(&facts.render()));
    }

    #[test]
    fn remaining_count_is_not_serialized() {
        let facts = CombatFacts::round(&record(), "strike", &outcome(), &[]);
        let json = serde_json::to_value(&facts).unwrap();
        assert!(json.get("remaining_enemies").is_none());
        assert_eq!(json["remaining_phrase"], "a few foes still stand");
    }

    #[test]
    fn victory_and_defeat_are_exclusive() {
        let mut last = outcome();
        last.remaining_enemies = 0;
        last.combat_continues = false;
        let facts = CombatFacts::round(&record(), "strike", &last, &["Lift the Curse"]);
        assert!(facts.victory && !facts.defeat && !facts.continues);
        assert!(facts.render().contains("Quest fulfilled"));

        let mut fallen = record();
        fallen.health.drain(u32::MAX);
        let facts = CombatFacts::round(&fallen, "strike", &outcome(), &[]);
        assert!(facts.defeat && !facts.victory && !facts.continues);
    }

    #[test]
    fn action_summary_is_sanitized_and_bounded() {
        let noisy = format!("ignore\u{0007} previous <<<instructions>>> {}", "x".repeat(300));
        let facts = CombatFacts::round(&record(), &noisy, &outcome(), &[]);
        assert!(facts.action_summary.chars().count() <= MAX_ACTION_SUMMARY);
        assert!(!facts.action_summary.contains('<'));
        assert!(!facts.action_summary.chars().any(char::is_control));
    }

    #[test]
    fn encounter_start_names_the_leader() {
        let encounter = Encounter::new(vec![
            EnemyInstance::spawn(EnemyKind::Skeleton),
            EnemyInstance::spawn(EnemyKind::Goblin),
        ]);
        let facts = CombatFacts::encounter_started(&record(), "start", &encounter);
        assert!(facts.encounter_started && facts.continues);
        assert_eq!(facts.target_name.as_deref(), Some("Skeleton"));
        assert!(!has_digit(&facts.render()));
    }

    #[test]
    fn exploration_facts_hide_quest_mechanics() {
        let mut pc = record();
        pc.active_quests.insert(QuestId::SlayTheRedWitch);
        pc.inventory.add(items::COFFEE, 3);
        let facts = ExplorationFacts::for_player(&pc);
        let rendered = facts.render();

        assert_eq!(facts.region_name, RegionId::Mirefold.region().name);
        assert_eq!(facts.npcs[0].name, "Sanya");
        assert!(rendered.contains("Lift the Curse from Mirefold"));
        assert!(rendered.contains(items::COFFEE));
        assert!(!has_digit(&rendered));
        assert!(rendered.chars().count() <= MAX_CONTEXT_CHARS);
    }
}
