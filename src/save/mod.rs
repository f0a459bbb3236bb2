//! Save/load system
//!
//! Blob persistence behind a small trait, plus the keys each subsystem uses.

pub mod store;

pub use store::{
    BlobStore, MemoryStore, FileStore, StoreError,
    load_state, load_or_default, save_state, save_directory,
};

/// Storage keys, one per persistent struct
pub mod keys {
    pub const ARENA_STATS: &str = "arena_stats";
    pub const DUNGEON_PROGRESS: &str = "dungeon_progress";
    pub const DUNGEON_RUN: &str = "dungeon_run";
    pub const SHOP_ROTATION: &str = "shop_rotation";
    pub const CHALLENGE_ROTATION: &str = "challenge_rotation";
    pub const MERCHANT_ROTATION: &str = "merchant_rotation";
}
