//! Calendar-seeded content rotations
//!
//! Shop stock, daily challenges and the traveling merchant all follow the
//! same pattern: once per bucket, seed a fresh generator from the bucket and
//! a per-subsystem offset, build a selection, and keep it until the bucket
//! changes. Repeat refreshes inside a bucket do nothing.

pub mod bucket;
pub mod shop;
pub mod challenges;
pub mod merchant;

use serde::{Deserialize, Serialize};

use crate::rng::SeededRng;

pub use bucket::{Bucket, Cadence, Clock, FixedClock, SystemClock, iso_week_of, start_of_day};
pub use shop::{Shop, ShopItem};
pub use challenges::{ChallengeKind, ChallengeRewards, ChallengeTemplate, DailyChallenge, DailyChallenges, CHALLENGE_TEMPLATES};
pub use merchant::{BarterTrade, MerchantItem, MerchantStock, TravelingMerchant};

/// A materialized selection and the bucket it was built for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationState<T> {
    pub last_refresh_bucket: Option<Bucket>,
    pub selection: T,
}

impl<T> RotationState<T> {
    pub fn is_current(&self, bucket: &Bucket) -> bool {
        self.last_refresh_bucket.as_ref() == Some(bucket)
    }

    /// Rebuild the selection if `bucket` differs from the last one.
    /// Returns whether a refresh happened.
    pub fn refresh_if_needed<F>(&mut self, bucket: Bucket, seed_offset: u64, generate: F) -> bool
    where
        F: FnOnce(&mut SeededRng) -> T,
    {
        if self.is_current(&bucket) {
            return false;
        }

        let seed = bucket.seed(seed_offset);
        let mut rng = SeededRng::seed(seed);
        self.selection = generate(&mut rng);
        self.last_refresh_bucket = Some(bucket);
        log::info!("Rotation refreshed for {} (seed {})", bucket, seed);
        true
    }
}
