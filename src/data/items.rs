//! Item catalog for data-driven shop and loot content
//!
//! These templates are loaded from RON files, with the set below as fallback.

use serde::{Deserialize, Serialize};

use crate::entities::StatType::*;
use crate::items::{EquipSlot, Item, ItemType, Rarity};

/// Collection of catalog items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub templates: Vec<Item>,
}

impl ItemTemplates {
    /// Find a template by ID
    pub fn find(&self, template_id: &str) -> Option<&Item> {
        self.templates.iter().find(|t| t.template_id == template_id)
    }

    /// All items of one type
    pub fn of_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.templates.iter().filter(|t| t.item_type == item_type).collect()
    }
}

fn weapon(id: &str, name: &str, rarity: Rarity, level: u32, buy: u32) -> Item {
    Item::new(id, name, ItemType::Weapon, rarity)
        .with_level(level)
        .with_price(buy, buy / 2)
        .with_slot(EquipSlot::Weapon)
}

fn armor(id: &str, name: &str, rarity: Rarity, level: u32, buy: u32) -> Item {
    Item::new(id, name, ItemType::Armor, rarity)
        .with_level(level)
        .with_price(buy, buy / 2)
        .with_slot(EquipSlot::Armor)
}

fn accessory(id: &str, name: &str, rarity: Rarity, level: u32, buy: u32) -> Item {
    Item::new(id, name, ItemType::Accessory, rarity)
        .with_level(level)
        .with_price(buy, buy / 2)
        .with_slot(EquipSlot::Accessory)
}

fn consumable(id: &str, name: &str, rarity: Rarity, level: u32, buy: u32, sell: u32) -> Item {
    Item::new(id, name, ItemType::Consumable, rarity)
        .with_level(level)
        .with_price(buy, sell)
}

fn material(id: &str, name: &str, rarity: Rarity, buy: u32, sell: u32) -> Item {
    Item::new(id, name, ItemType::Material, rarity).with_price(buy, sell)
}

/// Look up a default item by ID. Used when building default loot tables.
pub fn default_item(template_id: &str) -> Option<Item> {
    default_item_templates().find(template_id).cloned()
}

/// Create default item templates (hardcoded fallback)
pub fn default_item_templates() -> ItemTemplates {
    ItemTemplates {
        templates: vec![
            // === WEAPONS ===
            weapon("steel_sword", "Steel Longsword", Rarity::Uncommon, 5, 100)
                .with_stat(Strength, 4)
                .with_stat(Dexterity, 1)
                .with_description("A well-forged blade of tempered steel."),
            weapon("enchanted_bow", "Enchanted Longbow", Rarity::Uncommon, 5, 100)
                .with_stat(Dexterity, 4)
                .with_stat(Wisdom, 1),
            weapon("frost_staff", "Frostbite Staff", Rarity::Rare, 10, 250)
                .with_stat(Intelligence, 6)
                .with_stat(Wisdom, 2),
            weapon("shadow_blade", "Shadow Blade", Rarity::Rare, 10, 250)
                .with_stat(Strength, 5)
                .with_stat(Dexterity, 3),
            weapon("dragon_slayer", "Dragonslayer Greatsword", Rarity::Epic, 15, 500)
                .with_stat(Strength, 8)
                .with_stat(Constitution, 3)
                .with_stat(Dexterity, 2),

            // === ARMOR ===
            armor("basic_leather_armor", "Leather Armor", Rarity::Common, 1, 25)
                .with_stat(Constitution, 2),
            armor("chainmail_armor", "Chainmail Armor", Rarity::Uncommon, 5, 120)
                .with_stat(Constitution, 3)
                .with_stat(Strength, 1),
            armor("plate_armor", "Plate Armor", Rarity::Rare, 10, 300)
                .with_stat(Constitution, 5)
                .with_stat(Strength, 2)
                .with_description("Heavy plate armor for maximum defense."),
            armor("mage_robes", "Arcane Robes", Rarity::Rare, 10, 280)
                .with_stat(Intelligence, 4)
                .with_stat(Wisdom, 3),

            // === ACCESSORIES ===
            accessory("clarity_amulet", "Clarity Amulet", Rarity::Common, 1, 50)
                .with_stat(Intelligence, 1)
                .with_stat(Wisdom, 1),
            accessory("strength_ring", "Ring of Might", Rarity::Uncommon, 5, 80)
                .with_stat(Strength, 3),
            accessory("wisdom_pendant", "Pendant of Insight", Rarity::Uncommon, 5, 80)
                .with_stat(Wisdom, 3),
            accessory("dexterity_boots", "Swiftfoot Boots", Rarity::Rare, 8, 150)
                .with_stat(Dexterity, 4)
                .with_stat(Strength, 1),

            // === CONSUMABLES ===
            consumable("health_potion", "Health Potion", Rarity::Common, 1, 20, 10)
                .with_description("Restores 30 HP."),
            consumable("greater_health_potion", "Greater Health Potion", Rarity::Uncommon, 5, 50, 25)
                .with_description("Restores 75 HP."),
            consumable("antidote", "Antidote", Rarity::Common, 1, 15, 7),
            consumable("battle_scroll", "Scroll of Flames", Rarity::Uncommon, 1, 40, 20),
            consumable("stat_potion", "Elixir of Power", Rarity::Uncommon, 3, 35, 17),

            // === MATERIALS ===
            material("iron_ore", "Iron Ore", Rarity::Common, 10, 5),
            material("shadow_essence", "Shadow Essence", Rarity::Uncommon, 25, 12),
            material("crystal_shard", "Crystal Shard", Rarity::Uncommon, 20, 10),
            material("dragon_scale", "Dragon Scale", Rarity::Rare, 50, 25),
            material("enchanted_thread", "Enchanted Thread", Rarity::Uncommon, 15, 7),
        ],
    }
}
