//! Arena ranks derived from rating

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Discrete tier over the continuous rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArenaRank {
    Bronze,
    Silver,
    Gold,
    Diamond,
    Champion,
}

impl ArenaRank {
    pub const ALL: [ArenaRank; 5] = [
        ArenaRank::Bronze,
        ArenaRank::Silver,
        ArenaRank::Gold,
        ArenaRank::Diamond,
        ArenaRank::Champion,
    ];

    /// Rank for a rating
    pub fn for_rating(rating: u32) -> Self {
        match rating {
            0..=499 => ArenaRank::Bronze,
            500..=999 => ArenaRank::Silver,
            1000..=1499 => ArenaRank::Gold,
            1500..=1999 => ArenaRank::Diamond,
            _ => ArenaRank::Champion,
        }
    }

    /// Ratings covered by the rank (champion is open-ended)
    pub fn rating_range(&self) -> RangeInclusive<u32> {
        match self {
            ArenaRank::Bronze => 0..=499,
            ArenaRank::Silver => 500..=999,
            ArenaRank::Gold => 1000..=1499,
            ArenaRank::Diamond => 1500..=1999,
            ArenaRank::Champion => 2000..=u32::MAX,
        }
    }

    /// Position in the ladder, 0 for bronze
    pub fn index(&self) -> usize {
        match self {
            ArenaRank::Bronze => 0,
            ArenaRank::Silver => 1,
            ArenaRank::Gold => 2,
            ArenaRank::Diamond => 3,
            ArenaRank::Champion => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArenaRank::Bronze => "Bronze",
            ArenaRank::Silver => "Silver",
            ArenaRank::Gold => "Gold",
            ArenaRank::Diamond => "Diamond",
            ArenaRank::Champion => "Champion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(ArenaRank::for_rating(0), ArenaRank::Bronze);
        assert_eq!(ArenaRank::for_rating(499), ArenaRank::Bronze);
        assert_eq!(ArenaRank::for_rating(500), ArenaRank::Silver);
        assert_eq!(ArenaRank::for_rating(1000), ArenaRank::Gold);
        assert_eq!(ArenaRank::for_rating(1999), ArenaRank::Diamond);
        assert_eq!(ArenaRank::for_rating(2000), ArenaRank::Champion);
        assert_eq!(ArenaRank::for_rating(9000), ArenaRank::Champion);
    }

    #[test]
    fn test_ranges_agree_with_thresholds() {
        for rank in ArenaRank::ALL {
            let range = rank.rating_range();
            assert_eq!(ArenaRank::for_rating(*range.start()), rank);
            assert_eq!(ArenaRank::for_rating(*range.end()), rank);
        }
    }
}
