//! Questforge - progression engine for a gamified quest tracker
//!
//! Loot rolling, level-scaled and random encounters, an Elo arena ladder,
//! multi-floor dungeon runs, and calendar-seeded shop, challenge and merchant
//! rotations.
//! The host owns the character record and the storage backend.

pub mod rng;
pub mod config;
pub mod entities;
pub mod items;
pub mod progression;
pub mod arena;
pub mod dungeon;
pub mod rotation;
pub mod save;
pub mod data;

// Re-export commonly used types
pub use rng::SeededRng;
pub use config::EngineConfig;
pub use data::{ContentCatalog, DataManager};
pub use entities::{BattleEncounter, BattleRewards, CharacterRecord, CharacterSheet, EnemyTemplate};
pub use items::{LootRoll, LootTable};
pub use arena::{ArenaStats, RatingEngine};
pub use dungeon::DungeonRunEngine;
pub use rotation::{Clock, DailyChallenges, Shop, TravelingMerchant};
pub use save::{BlobStore, FileStore, MemoryStore};
