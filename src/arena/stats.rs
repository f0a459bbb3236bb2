//! Persistent arena record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::CharacterClass;
use super::rank::ArenaRank;

/// Rating a new arena player starts from
pub const STARTING_RATING: u32 = 200;
/// Matches kept in history
pub const HISTORY_LIMIT: usize = 50;

/// One finished match, as shown in the history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMatchResult {
    pub opponent_name: String,
    pub opponent_class: CharacterClass,
    pub opponent_level: u32,
    pub opponent_rank: ArenaRank,
    pub victory: bool,
    pub rating_change: i32,
    pub tokens_earned: u32,
    pub date: DateTime<Utc>,
}

/// Per-player arena state, created on first arena visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaStats {
    pub rating: u32,
    pub highest_rating: u32,
    pub arena_tokens: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub current_win_streak: u32,
    pub highest_win_streak: u32,
    /// Newest first
    pub match_history: Vec<ArenaMatchResult>,
}

impl Default for ArenaStats {
    fn default() -> Self {
        Self::with_rating(STARTING_RATING)
    }
}

impl ArenaStats {
    pub fn with_rating(rating: u32) -> Self {
        Self {
            rating,
            highest_rating: rating,
            arena_tokens: 0,
            total_wins: 0,
            total_losses: 0,
            current_win_streak: 0,
            highest_win_streak: 0,
            match_history: Vec::new(),
        }
    }

    pub fn rank(&self) -> ArenaRank {
        ArenaRank::for_rating(self.rating)
    }

    pub fn total_matches(&self) -> u32 {
        self.total_wins + self.total_losses
    }

    /// Win rate in `[0, 1]`, zero before the first match
    pub fn win_rate(&self) -> f64 {
        match self.total_matches() {
            0 => 0.0,
            n => self.total_wins as f64 / n as f64,
        }
    }

    /// Record a match at the front of the history, dropping the oldest past `limit`
    pub fn add_match_result(&mut self, result: ArenaMatchResult, limit: usize) {
        self.match_history.insert(0, result);
        self.match_history.truncate(limit);
    }

    /// Spend tokens; fails without change if the balance is short
    pub fn spend_tokens(&mut self, amount: u32) -> bool {
        if self.arena_tokens < amount {
            return false;
        }
        self.arena_tokens -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: u32) -> ArenaMatchResult {
        ArenaMatchResult {
            opponent_name: format!("Rival{}", n),
            opponent_class: CharacterClass::Pirate,
            opponent_level: n,
            opponent_rank: ArenaRank::Bronze,
            victory: true,
            rating_change: 16,
            tokens_earned: 15,
            date: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let stats = ArenaStats::default();
        assert_eq!(stats.rating, 200);
        assert_eq!(stats.highest_rating, 200);
        assert_eq!(stats.rank(), ArenaRank::Bronze);
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let mut stats = ArenaStats::default();
        for n in 1..=60 {
            stats.add_match_result(result(n), HISTORY_LIMIT);
        }
        assert_eq!(stats.match_history.len(), HISTORY_LIMIT);
        assert_eq!(stats.match_history[0].opponent_level, 60);
        assert_eq!(stats.match_history[49].opponent_level, 11);
    }

    #[test]
    fn test_spend_tokens() {
        let mut stats = ArenaStats { arena_tokens: 30, ..ArenaStats::default() };
        assert!(!stats.spend_tokens(31));
        assert_eq!(stats.arena_tokens, 30);
        assert!(stats.spend_tokens(30));
        assert_eq!(stats.arena_tokens, 0);
    }
}
