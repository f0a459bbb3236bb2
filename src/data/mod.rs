//! Data loading and external game content
//!
//! This module handles loading content from external RON files,
//! allowing for data-driven balance and easy modding.

pub mod catalog;
pub mod loader;
pub mod items;
pub mod enemies;
pub mod dungeons;

pub use catalog::ContentCatalog;
pub use loader::{DataManager, export_default_data};
pub use items::ItemTemplates;
pub use enemies::EnemyTemplates;
pub use dungeons::{Dungeon, DungeonFloor, Dungeons};
