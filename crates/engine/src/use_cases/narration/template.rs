//! Local narrator: deterministic prose straight from the facts.

use async_trait::async_trait;

use super::facts::{CombatFacts, ExplorationFacts};
use super::{NarrationRequest, Narrator};

/// Deterministic narrator with no external calls. Used when configured, and
/// in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, request: &NarrationRequest) -> String {
        match request {
            NarrationRequest::Combat(facts) => combat(facts),
            NarrationRequest::Exploration { facts, .. } => exploration(facts),
        }
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, request: NarrationRequest) -> String {
        self.render(&request)
    }
}

fn combat(facts: &CombatFacts) -> String {
    let hero = &facts.player_name;
    let target = facts.target_name.as_deref().unwrap_or("enemy");

    if facts.encounter_started {
        return format!(
            "{hero} the {} stands ready as a {target} steps out of the gloom; {}.",
            facts.class_name, facts.remaining_phrase
        );
    }

    let mut parts = vec![format!("{hero} strikes at the {target}.")];
    if facts.killed {
        parts.push(format!("The {target} crumples and does not rise."));
    } else {
        parts.push(format!("The {target} reels but keeps its feet."));
    }
    if facts.player_wounded {
        parts.push(format!(
            "The enemy answers in kind; {hero} is {}.",
            facts.wound_severity.phrase()
        ));
    }
    if !facts.loot.is_empty() {
        parts.push(format!("Among the remains lies {}.", facts.loot.join(", ")));
    }
    if facts.gold_found {
        parts.push("Coins glint in the mud.".to_string());
    }
    if facts.victory {
        parts.push("Silence falls. The battle is won.".to_string());
    } else if facts.defeat {
        parts.push(format!("{hero} falls, and darkness closes in."));
    } else if facts.continues {
        parts.push(format!("The fight goes on; {}.", facts.remaining_phrase));
    }
    for quest in &facts.quests_completed {
        parts.push(format!("The task \"{quest}\" is fulfilled."));
    }
    parts.join(" ")
}

fn exploration(facts: &ExplorationFacts) -> String {
    let mut parts = vec![format!("{}. {}", facts.region_name, facts.region_description)];
    if !facts.npcs.is_empty() {
        let people: Vec<String> = facts
            .npcs
            .iter()
            .map(|npc| format!("{} the {}", npc.name, npc.role))
            .collect();
        parts.push(format!("Nearby you notice {}.", people.join(" and ")));
    }
    if !facts.enemies.is_empty() {
        let names: Vec<&str> = facts.enemies.iter().map(|e| e.name.as_str()).collect();
        parts.push(format!("Something stirs here: {}.", names.join(", ")));
    }
    if !facts.exits.is_empty() {
        parts.push(format!("Paths lead to {}.", facts.exits.join(" and ")));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shadowfire_domain::{
        CharacterClass, EnemyKind, PlayerId, PlayerName, PlayerRecord, RoundOutcome,
    };

    fn record() -> PlayerRecord {
        PlayerRecord::new(
            PlayerId::new("p").unwrap(),
            PlayerName::new("Bran").unwrap(),
            CharacterClass::Warrior,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn combat_prose_is_deterministic_and_numberless() {
        let outcome = RoundOutcome {
            damage_dealt: 26,
            enemy_killed: true,
            target: EnemyKind::Goblin,
            player_damage_taken: 16,
            gold_awarded: 8,
            items_dropped: vec!["Healing Potion".into()],
            remaining_enemies: 2,
            combat_continues: true,
        };
        let request = NarrationRequest::Combat(CombatFacts::round(&record(), "hit", &outcome, &[]));

        let first = TemplateNarrator.narrate(request.clone()).await;
        let second = TemplateNarrator.narrate(request).await;

        assert_eq!(first, second);
        assert!(first.contains("Goblin crumples"));
        assert!(first.contains("Healing Potion"));
        assert!(first.contains("a few foes still stand"));
        assert!(!first.chars().any(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn exploration_prose_describes_the_region() {
        let request = NarrationRequest::Exploration {
            facts: ExplorationFacts::for_player(&record()),
            history: vec![],
            action: "look".into(),
        };
        let text = TemplateNarrator.narrate(request).await;
        assert!(text.starts_with("Mirefold."));
        assert!(text.contains("Sanya the Barkeep"));
        assert!(text.contains("Red Witch's Lair"));
    }
}
