//! Progression systems

pub mod scaling;
pub mod unlocks;

pub use scaling::LevelScaling;
pub use unlocks::{UnlockRequirement, UnlockContext, Unlockable, Unlocks};
