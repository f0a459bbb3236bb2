//! Arena: rating ladder against locally synthesized opponents

pub mod rank;
pub mod rating;
pub mod opponent;
pub mod stats;

pub use rank::ArenaRank;
pub use rating::RatingEngine;
pub use opponent::{ArenaOpponent, class_abilities, random_name};
pub use stats::{ArenaMatchResult, ArenaStats};
