//! Enemy templates and live encounters
//!
//! Templates are immutable catalog entries. An encounter is a value snapshot
//! of a template at a character level, thrown away once the fight resolves.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::items::{Item, LootTable};
use crate::progression::LevelScaling;

/// Status effect kinds an ability can inflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectType {
    Poison,
    Burn,
    Stun,
    Bleed,
    Shield,
    Strengthen,
    Weaken,
    Regenerate,
}

impl StatusEffectType {
    pub fn is_debuff(&self) -> bool {
        matches!(
            self,
            StatusEffectType::Poison
                | StatusEffectType::Burn
                | StatusEffectType::Stun
                | StatusEffectType::Bleed
                | StatusEffectType::Weaken
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect_type: StatusEffectType,
    /// Turns remaining
    pub duration: u32,
    /// Damage or heal per tick, or stat modifier
    pub value: i32,
}

impl StatusEffect {
    pub fn new(effect_type: StatusEffectType, duration: u32, value: i32) -> Self {
        Self { effect_type, duration, value }
    }
}

/// Elemental affinity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Ice,
    Shadow,
    Lightning,
    Nature,
    Holy,
    #[default]
    Physical,
}

/// A special attack an enemy may use on its turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub base_damage: i32,
    /// Per-turn trigger probability in `[0, 1]`
    pub trigger_chance: f64,
    #[serde(default)]
    pub status_effect: Option<StatusEffect>,
}

impl Ability {
    pub fn new(name: &str, base_damage: i32, trigger_chance: f64) -> Self {
        Self {
            name: name.to_string(),
            base_damage,
            trigger_chance,
            status_effect: None,
        }
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.status_effect = Some(effect);
        self
    }
}

/// A template for creating encounters from catalog data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Unique template ID for reference
    pub id: String,
    /// Display name
    pub name: String,
    /// Difficulty tier, 1-5
    pub tier: u8,
    /// Levels the template was authored for
    pub level_range: RangeInclusive<u32>,
    pub base_hp: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub loot_table: LootTable,
}

/// Rewards granted for winning a fight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRewards {
    pub xp: u32,
    pub gold: u32,
    #[serde(default)]
    pub item_drops: Vec<(Item, u32)>,
}

impl BattleRewards {
    pub fn new(xp: u32, gold: u32) -> Self {
        Self { xp, gold, item_drops: Vec::new() }
    }
}

/// A concrete, level-scaled fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEncounter {
    pub enemy_name: String,
    pub enemy_level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub element: Element,
    pub is_boss: bool,
    pub abilities: Vec<Ability>,
    pub rewards: BattleRewards,
    /// Rolled after victory; `None` for arena opponents
    pub loot_table: Option<LootTable>,
}

impl BattleEncounter {
    /// Roll the carried loot table and fold it into the rewards
    pub fn roll_loot(&mut self, rng: &mut impl Rng) {
        if let Some(table) = &self.loot_table {
            let roll = table.roll(rng);
            self.rewards.gold = self.rewards.gold.saturating_add(roll.gold);
            self.rewards.item_drops.extend(roll.items);
        }
    }
}

impl EnemyTemplate {
    /// Produce an encounter scaled to a character level
    pub fn encounter(&self, at_level: u32) -> BattleEncounter {
        let scaling = LevelScaling::new(at_level, *self.level_range.start());
        let hp = scaling.scale_stat(self.base_hp);

        BattleEncounter {
            enemy_name: self.name.clone(),
            enemy_level: scaling.level,
            hp,
            max_hp: hp,
            attack: scaling.scale_stat(self.base_attack),
            defense: scaling.scale_stat(self.base_defense),
            element: self.element,
            is_boss: self.is_boss,
            abilities: self.abilities.clone(),
            rewards: BattleRewards::new(
                scaling.scale_xp(self.loot_table.guaranteed_xp),
                scaling.scale_gold(self.loot_table.guaranteed_gold),
            ),
            loot_table: Some(self.loot_table.clone()),
        }
    }

    /// Encounter for a dungeon floor; boss floors always produce a boss
    pub fn floor_encounter(&self, at_level: u32, boss_floor: bool) -> BattleEncounter {
        let mut encounter = self.encounter(at_level);
        if boss_floor {
            encounter.is_boss = true;
        }
        encounter
    }
}
