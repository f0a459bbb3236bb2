//! Item system

pub mod item;
pub mod loot;

pub use item::{Item, ItemType, Rarity, EquipSlot, EquipmentLoadout};
pub use loot::{LootTable, LootEntry, LootRoll, roll};
