//! Item definitions
//!
//! Catalog item types, rarities, and equipment slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::StatType;

/// Item rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Get numeric value for sorting (higher = rarer)
    pub fn sort_value(&self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Accessory,
    Consumable,
    Material,
    QuestItem,
}

impl ItemType {
    /// Whether an item of this type can be worn in a loadout
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemType::Weapon | ItemType::Armor | ItemType::Accessory)
    }
}

/// Equipment slot for wearable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory];
}

/// A catalog item. Instances handed to the host are plain clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog key, stable across saves
    pub template_id: String,
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    /// Minimum character level to use the item
    pub level_requirement: u32,
    pub buy_price: u32,
    pub sell_price: u32,
    pub description: String,
    #[serde(default)]
    pub stat_modifiers: BTreeMap<StatType, i32>,
    #[serde(default)]
    pub slot: Option<EquipSlot>,
}

impl Item {
    /// Create an item with no stats or slot
    pub fn new(template_id: &str, name: &str, item_type: ItemType, rarity: Rarity) -> Self {
        Self {
            template_id: template_id.to_string(),
            name: name.to_string(),
            item_type,
            rarity,
            level_requirement: 1,
            buy_price: 0,
            sell_price: 0,
            description: String::new(),
            stat_modifiers: BTreeMap::new(),
            slot: None,
        }
    }

    /// Builder: set level requirement
    pub fn with_level(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    /// Builder: set prices
    pub fn with_price(mut self, buy: u32, sell: u32) -> Self {
        self.buy_price = buy;
        self.sell_price = sell;
        self
    }

    /// Builder: set the equipment slot
    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Builder: add a stat modifier
    pub fn with_stat(mut self, stat: StatType, value: i32) -> Self {
        self.stat_modifiers.insert(stat, value);
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Equippable and wearable in a slot
    pub fn is_equipment(&self) -> bool {
        self.item_type.is_equippable() && self.slot.is_some()
    }
}

/// Weapon, armor, and accessory worn by a synthesized opponent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLoadout {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl EquipmentLoadout {
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipSlot, item: Option<Item>) {
        match slot {
            EquipSlot::Weapon => self.weapon = item,
            EquipSlot::Armor => self.armor = item,
            EquipSlot::Accessory => self.accessory = item,
        }
    }

    /// Sum of stat modifiers across all worn items
    pub fn total_stat_modifiers(&self) -> BTreeMap<StatType, i32> {
        let mut total = BTreeMap::new();
        for item in EquipSlot::ALL.iter().filter_map(|s| self.get(*s)) {
            for (stat, value) in &item.stat_modifiers {
                *total.entry(*stat).or_insert(0) += value;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equippable_types() {
        assert!(ItemType::Weapon.is_equippable());
        assert!(ItemType::Accessory.is_equippable());
        assert!(!ItemType::Consumable.is_equippable());
        assert!(!ItemType::Material.is_equippable());
        assert!(!ItemType::QuestItem.is_equippable());
    }

    #[test]
    fn test_loadout_modifiers() {
        let mut loadout = EquipmentLoadout::default();
        loadout.set(
            EquipSlot::Weapon,
            Some(Item::new("sword", "Sword", ItemType::Weapon, Rarity::Common)
                .with_slot(EquipSlot::Weapon)
                .with_stat(StatType::Strength, 3)),
        );
        loadout.set(
            EquipSlot::Accessory,
            Some(Item::new("ring", "Ring", ItemType::Accessory, Rarity::Rare)
                .with_slot(EquipSlot::Accessory)
                .with_stat(StatType::Strength, 1)
                .with_stat(StatType::Wisdom, 2)),
        );

        let mods = loadout.total_stat_modifiers();
        assert_eq!(mods.get(&StatType::Strength), Some(&4));
        assert_eq!(mods.get(&StatType::Wisdom), Some(&2));
        assert_eq!(mods.get(&StatType::Charisma), None);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Epic > Rarity::Rare);
        assert_eq!(Rarity::Legendary.sort_value(), 4);
    }
}
