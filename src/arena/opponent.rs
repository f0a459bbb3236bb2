//! Synthetic arena opponents
//!
//! Opponents are generated locally per match and never persisted. They fight
//! through the regular encounter path via [`ArenaOpponent::to_encounter`].

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    Ability, BattleEncounter, BattleRewards, CharacterClass, Element, StatType, StatusEffect,
    StatusEffectType,
};
use crate::items::EquipmentLoadout;
use super::rank::ArenaRank;

const NAME_PREFIXES: [&str; 20] = [
    "Shadow", "Storm", "Iron", "Frost", "Flame",
    "Dark", "Crystal", "Thunder", "Silent", "Crimson",
    "Night", "Star", "Wind", "Stone", "Blood",
    "Moon", "Sun", "Void", "Ember", "Steel",
];

const NAME_SUFFIXES: [&str; 20] = [
    "blade", "hunter", "walker", "striker", "weaver",
    "bane", "fang", "heart", "shield", "sworn",
    "fire", "storm", "claw", "forge", "spirit",
    "wing", "eye", "hand", "soul", "keeper",
];

/// Random prefix+suffix handle, e.g. "Frostfang"
pub fn random_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES.choose(rng).copied().unwrap_or("Nameless");
    let suffix = NAME_SUFFIXES.choose(rng).copied().unwrap_or("");
    format!("{}{}", prefix, suffix)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaOpponent {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub rating: u32,
    pub rank: ArenaRank,
    pub stats: BTreeMap<StatType, i32>,
    pub equipment: EquipmentLoadout,
}

impl ArenaOpponent {
    fn stat(&self, stat: StatType) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(10)
    }

    fn equipment_bonus(&self, stat: StatType) -> i32 {
        self.equipment.total_stat_modifiers().get(&stat).copied().unwrap_or(0)
    }

    pub fn attack_power(&self) -> i32 {
        let str = self.stat(StatType::Strength);
        let dex = self.stat(StatType::Dexterity);
        (str - 10)
            .saturating_add((dex - 10) / 2)
            .saturating_add(10)
            .saturating_add(self.equipment_bonus(StatType::Strength))
    }

    pub fn defense_power(&self) -> i32 {
        let con = self.stat(StatType::Constitution);
        ((con - 10) / 2 + 5).saturating_add(self.equipment_bonus(StatType::Constitution))
    }

    pub fn max_hp(&self) -> i32 {
        (level_i32(self.level) - 1).saturating_mul(10).saturating_add(100)
    }

    /// Base stats plus equipment modifiers
    pub fn effective_stats(&self) -> BTreeMap<StatType, i32> {
        let mut result = self.stats.clone();
        for (stat, value) in self.equipment.total_stat_modifiers() {
            let entry = result.entry(stat).or_insert(10);
            *entry = entry.saturating_add(value);
        }
        result
    }

    /// Fightable encounter for this opponent; arena fights carry no loot table
    pub fn to_encounter(&self) -> BattleEncounter {
        let max_hp = self.max_hp();
        BattleEncounter {
            enemy_name: self.name.clone(),
            enemy_level: self.level,
            hp: max_hp,
            max_hp,
            attack: self.attack_power(),
            defense: self.defense_power(),
            element: class_element(self.class),
            is_boss: false,
            abilities: class_abilities(self.class, self.level),
            rewards: BattleRewards::new(
                self.level.saturating_mul(5).max(10),
                self.level.saturating_mul(3).max(5),
            ),
            loot_table: None,
        }
    }
}

/// Level as a combat integer, capped rather than wrapped
pub(crate) fn level_i32(level: u32) -> i32 {
    level.min(i32::MAX as u32) as i32
}

fn class_element(class: CharacterClass) -> Element {
    match class {
        CharacterClass::IceMage => Element::Ice,
        CharacterClass::Necromancer => Element::Shadow,
        CharacterClass::Dragon => Element::Fire,
        CharacterClass::Angel => Element::Holy,
        _ => Element::Physical,
    }
}

/// Signature moves per class, scaled by opponent level
pub fn class_abilities(class: CharacterClass, level: u32) -> Vec<Ability> {
    use StatusEffectType::*;
    let dmg = level_i32(level).saturating_mul(2).saturating_add(8);

    match class {
        CharacterClass::Warrior => vec![
            Ability::new("Power Strike", dmg + 5, 0.4),
            Ability::new("Shield Wall", 0, 0.2).with_effect(StatusEffect::new(Shield, 2, dmg / 2)),
        ],
        CharacterClass::Ranger => vec![
            Ability::new("Aimed Shot", dmg + 8, 0.35),
            Ability::new("Quick Shot", dmg, 0.3),
        ],
        CharacterClass::Pirate => vec![
            Ability::new("Cutlass Fury", dmg + 4, 0.35),
            Ability::new("Bleeding Strike", dmg, 0.25).with_effect(StatusEffect::new(Bleed, 3, dmg / 3)),
        ],
        CharacterClass::IceMage => vec![
            Ability::new("Frost Bolt", dmg + 6, 0.35),
            Ability::new("Frozen Touch", dmg / 2, 0.2).with_effect(StatusEffect::new(Stun, 1, 0)),
        ],
        CharacterClass::Necromancer => vec![
            Ability::new("Shadow Drain", dmg + 3, 0.35),
            Ability::new("Curse", dmg / 2, 0.25).with_effect(StatusEffect::new(Weaken, 2, dmg / 3)),
        ],
        CharacterClass::WarriorKing => vec![
            Ability::new("Royal Command", dmg + 6, 0.35),
            Ability::new("Inspire", 0, 0.2).with_effect(StatusEffect::new(Strengthen, 2, dmg / 3)),
        ],
        CharacterClass::Dragon => vec![
            Ability::new("Fire Breath", dmg + 7, 0.35).with_effect(StatusEffect::new(Burn, 2, dmg / 4)),
            Ability::new("Tail Swipe", dmg + 3, 0.3),
        ],
        CharacterClass::Angel => vec![
            Ability::new("Divine Smite", dmg + 6, 0.35),
            Ability::new("Healing Light", 0, 0.2).with_effect(StatusEffect::new(Regenerate, 3, dmg / 3)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EquipSlot, Item, ItemType, Rarity};
    use crate::rng::SeededRng;

    fn warrior(level: u32) -> ArenaOpponent {
        let mut stats = BTreeMap::new();
        for stat in StatType::ALL {
            stats.insert(stat, 10 + CharacterClass::Warrior.stat_bonus(stat) + level_i32(level / 3));
        }
        ArenaOpponent {
            name: "Ironfang".to_string(),
            class: CharacterClass::Warrior,
            level,
            rating: 450,
            rank: ArenaRank::Bronze,
            stats,
            equipment: EquipmentLoadout::default(),
        }
    }

    #[test]
    fn test_derived_combat_numbers() {
        // Level 6 warrior: STR 15, DEX 13, CON 14
        let opp = warrior(6);
        assert_eq!(opp.attack_power(), 10 + 5 + 1);
        assert_eq!(opp.defense_power(), 5 + 2);
        assert_eq!(opp.max_hp(), 150);
    }

    #[test]
    fn test_extreme_level_caps_numbers() {
        let opp = warrior(u32::MAX);
        assert_eq!(opp.max_hp(), i32::MAX);
        let enc = opp.to_encounter();
        assert_eq!(enc.rewards.xp, u32::MAX);
        assert_eq!(enc.rewards.gold, u32::MAX);
        assert!(enc.attack > 0);
        assert!(class_abilities(CharacterClass::Warrior, u32::MAX)[0].base_damage > 0);
    }

    #[test]
    fn test_equipment_feeds_attack() {
        let mut opp = warrior(6);
        let sword = Item::new("steel_sword", "Steel Sword", ItemType::Weapon, Rarity::Uncommon)
            .with_slot(EquipSlot::Weapon)
            .with_stat(StatType::Strength, 4);
        opp.equipment.set(EquipSlot::Weapon, Some(sword));
        assert_eq!(opp.attack_power(), 20);
        assert_eq!(opp.effective_stats()[&StatType::Strength], 19);
    }

    #[test]
    fn test_to_encounter() {
        let enc = warrior(1).to_encounter();
        assert_eq!(enc.max_hp, 100);
        assert_eq!(enc.hp, enc.max_hp);
        assert_eq!(enc.rewards.xp, 10);
        assert_eq!(enc.rewards.gold, 5);
        assert!(enc.loot_table.is_none());
        assert_eq!(enc.abilities[0].name, "Power Strike");
        assert_eq!(enc.abilities[0].base_damage, 15);
    }

    #[test]
    fn test_names_come_from_the_bank() {
        let mut rng = SeededRng::seed(3);
        for _ in 0..20 {
            let name = random_name(&mut rng);
            assert!(NAME_PREFIXES.iter().any(|p| name.starts_with(p)));
            assert!(NAME_SUFFIXES.iter().any(|s| name.ends_with(s)));
        }
    }
}
