//! Character classes, stats, and the host character interface
//!
//! The engine never owns the player's character record. It reads a
//! [`CharacterSheet`] snapshot and writes back through [`CharacterRecord`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Core character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl StatType {
    pub const ALL: [StatType; 6] = [
        StatType::Strength,
        StatType::Dexterity,
        StatType::Constitution,
        StatType::Intelligence,
        StatType::Wisdom,
        StatType::Charisma,
    ];
}

/// Playable classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Ranger,
    Warrior,
    WarriorKing,
    Pirate,
    IceMage,
    Necromancer,
    Dragon,
    Angel,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 8] = [
        CharacterClass::Ranger,
        CharacterClass::Warrior,
        CharacterClass::WarriorKing,
        CharacterClass::Pirate,
        CharacterClass::IceMage,
        CharacterClass::Necromancer,
        CharacterClass::Dragon,
        CharacterClass::Angel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Warrior => "Warrior",
            CharacterClass::WarriorKing => "Warrior King",
            CharacterClass::Pirate => "Pirate",
            CharacterClass::IceMage => "Ice Mage",
            CharacterClass::Necromancer => "Necromancer",
            CharacterClass::Dragon => "Dragon",
            CharacterClass::Angel => "Angel",
        }
    }

    /// Primary/secondary/tertiary stat bonuses (+3/+2/+1)
    pub fn stat_bonuses(&self) -> [(StatType, i32); 3] {
        use StatType::*;
        match self {
            CharacterClass::Ranger => [(Dexterity, 3), (Wisdom, 2), (Strength, 1)],
            CharacterClass::Warrior => [(Strength, 3), (Constitution, 2), (Dexterity, 1)],
            CharacterClass::WarriorKing => [(Strength, 3), (Charisma, 2), (Constitution, 1)],
            CharacterClass::Pirate => [(Charisma, 3), (Dexterity, 2), (Strength, 1)],
            CharacterClass::IceMage => [(Intelligence, 3), (Wisdom, 2), (Constitution, 1)],
            CharacterClass::Necromancer => [(Intelligence, 3), (Constitution, 2), (Wisdom, 1)],
            CharacterClass::Dragon => [(Constitution, 3), (Strength, 2), (Wisdom, 1)],
            CharacterClass::Angel => [(Wisdom, 3), (Charisma, 2), (Dexterity, 1)],
        }
    }

    /// Bonus for a single stat, zero if the class has none
    pub fn stat_bonus(&self, stat: StatType) -> i32 {
        self.stat_bonuses()
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}

/// Read-only view of the host's character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub level: u32,
    pub class: Option<CharacterClass>,
    pub gold: u32,
    #[serde(default)]
    pub xp: u64,
    pub health: i32,
    pub max_health: i32,
    #[serde(default)]
    pub stats: BTreeMap<StatType, i32>,
}

impl CharacterSheet {
    pub fn new(level: u32, class: Option<CharacterClass>) -> Self {
        Self {
            level,
            class,
            gold: 0,
            xp: 0,
            health: 100,
            max_health: 100,
            stats: BTreeMap::new(),
        }
    }
}

/// Changes the engine asks the host to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterDelta {
    pub gold: i64,
    pub xp: i64,
    pub health: i32,
}

impl CharacterDelta {
    pub fn gold(amount: i64) -> Self {
        Self { gold: amount, ..Self::default() }
    }

    pub fn rewards(xp: u32, gold: u32) -> Self {
        Self { gold: gold as i64, xp: xp as i64, health: 0 }
    }
}

/// Host-owned character record
pub trait CharacterRecord {
    fn sheet(&self) -> CharacterSheet;
    fn apply(&mut self, delta: CharacterDelta);
}

impl CharacterRecord for CharacterSheet {
    fn sheet(&self) -> CharacterSheet {
        self.clone()
    }

    fn apply(&mut self, delta: CharacterDelta) {
        self.gold = (self.gold as i64 + delta.gold).max(0) as u32;
        self.xp = (self.xp as i64 + delta.xp).max(0) as u64;
        self.health = (self.health + delta.health).clamp(0, self.max_health);
    }
}
