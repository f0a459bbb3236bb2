//! Elo rating, token rewards and opponent generation

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ArenaConfig;
use crate::data::ContentCatalog;
use crate::entities::{CharacterClass, StatType};
use crate::items::{EquipSlot, EquipmentLoadout, Item};
use crate::save::{keys, load_state, BlobStore};
use super::opponent::{level_i32, random_name, ArenaOpponent};
use super::rank::ArenaRank;
use super::stats::{ArenaMatchResult, ArenaStats};

/// Arena rules, parameterized by [`ArenaConfig`]
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    pub config: ArenaConfig,
}

impl RatingEngine {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }

    /// Fresh record for a first-time arena player
    pub fn new_stats(&self) -> ArenaStats {
        ArenaStats::with_rating(self.config.starting_rating)
    }

    /// Saved record, or a fresh one if none exists or it can't be read
    pub fn load_stats(&self, store: &impl BlobStore) -> ArenaStats {
        match load_state(store, keys::ARENA_STATS) {
            Ok(Some(stats)) => stats,
            Ok(None) => self.new_stats(),
            Err(e) => {
                log::warn!("Discarding saved arena stats: {}", e);
                self.new_stats()
            }
        }
    }

    /// Elo rating change for the player, floored so every match moves the rating
    pub fn rating_delta(&self, player_rating: u32, opponent_rating: u32, victory: bool) -> i32 {
        let diff = opponent_rating as f64 - player_rating as f64;
        let expected = 1.0 / (1.0 + 10f64.powf(diff / 400.0));
        let score = if victory { 1.0 } else { 0.0 };
        let raw = (self.config.k_factor * (score - expected)).round() as i32;

        let floor = self.config.min_rating_change;
        if victory {
            raw.max(floor)
        } else {
            raw.min(-floor)
        }
    }

    /// Tokens for a win at `rank` that extended the streak to `win_streak`
    pub fn tokens(&self, rank: ArenaRank, win_streak: u32) -> u32 {
        let base = self.config.rank_base_tokens[rank.index()];
        let streak_bonus = win_streak
            .saturating_mul(self.config.streak_token_step)
            .min(self.config.streak_token_cap);
        base + streak_bonus
    }

    /// Synthesize an opponent near the player's level and rating
    pub fn generate_opponent(
        &self,
        player_level: u32,
        player_rating: u32,
        player_class: Option<CharacterClass>,
        catalog: &impl ContentCatalog,
        rng: &mut impl Rng,
    ) -> ArenaOpponent {
        let level_spread = self.config.level_spread.abs();
        let level = (player_level as i64 + rng.gen_range(-level_spread..=level_spread) as i64)
            .clamp(1, u32::MAX as i64) as u32;

        let rating_spread = self.config.rating_spread.abs();
        let rating = (player_rating as i64 + rng.gen_range(-rating_spread..=rating_spread) as i64)
            .clamp(0, u32::MAX as i64) as u32;

        let class = pick_class(player_class, self.config.off_class_chance, rng);

        let mut stats = BTreeMap::new();
        for stat in StatType::ALL {
            stats.insert(stat, 10 + class.stat_bonus(stat) + level_i32(level / 3));
        }

        let eligible = catalog.eligible_items(&|item: &Item| {
            item.item_type.is_equippable() && item.level_requirement <= level
        });
        let mut equipment = EquipmentLoadout::default();
        for slot in EquipSlot::ALL {
            let candidates: Vec<&Item> =
                eligible.iter().copied().filter(|item| item.slot == Some(slot)).collect();
            if let Some(item) = candidates.choose(rng) {
                equipment.set(slot, Some((*item).clone()));
            }
        }

        let opponent = ArenaOpponent {
            name: random_name(rng),
            class,
            level,
            rating,
            rank: ArenaRank::for_rating(rating),
            stats,
            equipment,
        };
        log::debug!(
            "Generated opponent {} ({} lv {}, rating {})",
            opponent.name,
            class.name(),
            level,
            rating
        );
        opponent
    }

    /// Apply a finished match to the player's record in one step
    pub fn complete_match(
        &self,
        stats: &mut ArenaStats,
        victory: bool,
        opponent: &ArenaOpponent,
        now: DateTime<Utc>,
    ) -> ArenaMatchResult {
        let delta = self.rating_delta(stats.rating, opponent.rating, victory);
        stats.rating = (stats.rating as i64 + delta as i64).max(0) as u32;
        stats.highest_rating = stats.highest_rating.max(stats.rating);

        let mut tokens_earned = 0;
        if victory {
            stats.total_wins += 1;
            stats.current_win_streak += 1;
            stats.highest_win_streak = stats.highest_win_streak.max(stats.current_win_streak);
            tokens_earned = self.tokens(stats.rank(), stats.current_win_streak);
            stats.arena_tokens += tokens_earned;
        } else {
            stats.total_losses += 1;
            stats.current_win_streak = 0;
        }

        let result = ArenaMatchResult {
            opponent_name: opponent.name.clone(),
            opponent_class: opponent.class,
            opponent_level: opponent.level,
            opponent_rank: opponent.rank,
            victory,
            rating_change: delta,
            tokens_earned,
            date: now,
        };
        stats.add_match_result(result.clone(), self.config.history_limit);

        log::info!(
            "Arena match vs {}: {} ({:+}), rating {}, tokens +{}",
            opponent.name,
            if victory { "victory" } else { "defeat" },
            delta,
            stats.rating,
            tokens_earned
        );
        result
    }
}

fn pick_class(
    player_class: Option<CharacterClass>,
    off_class_chance: f64,
    rng: &mut impl Rng,
) -> CharacterClass {
    let all = &CharacterClass::ALL;
    if let Some(pc) = player_class {
        if rng.gen_bool(off_class_chance.clamp(0.0, 1.0)) {
            let others: Vec<CharacterClass> = all.iter().copied().filter(|c| *c != pc).collect();
            if let Some(class) = others.choose(rng) {
                return *class;
            }
        }
    }
    all[rng.gen_range(0..all.len())]
}
