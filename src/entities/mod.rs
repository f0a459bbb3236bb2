//! Characters, enemies, and encounters

pub mod character;
pub mod enemies;
pub mod encounters;

pub use character::{StatType, CharacterClass, CharacterSheet, CharacterDelta, CharacterRecord};
pub use enemies::{
    EnemyTemplate, Ability, StatusEffect, StatusEffectType, Element,
    BattleEncounter, BattleRewards,
};
pub use encounters::{generate_boss_encounter, generate_encounter, tier_for_level};
