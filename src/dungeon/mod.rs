//! Dungeon runs

pub mod run;

pub use run::{DungeonProgress, DungeonRunEngine, DungeonRunState, RunStatus};
