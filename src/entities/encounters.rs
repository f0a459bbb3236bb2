//! Random world encounters
//!
//! Picks a template near the character's tier and scales it to their level.
//! Bosses only show up once the character is strong enough to face them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::ContentCatalog;
use super::enemies::BattleEncounter;

pub const MIN_TIER: u8 = 1;
pub const MAX_TIER: u8 = 5;
/// Lowest level that can meet a wandering boss
pub const BOSS_MIN_LEVEL: u32 = 15;

/// Chance of fighting at the character's own tier
const SAME_TIER_CHANCE: f64 = 0.7;
/// Cumulative chance up to and including one tier lower
const LOWER_TIER_CHANCE: f64 = 0.9;

/// Enemy tier matching a character level, four levels per tier
pub fn tier_for_level(level: u32) -> u8 {
    match level {
        0..=4 => 1,
        5..=8 => 2,
        9..=12 => 3,
        13..=16 => 4,
        _ => MAX_TIER,
    }
}

/// Same tier 70% of the time, one lower 20%, one higher 10%
pub fn roll_tier(base_tier: u8, rng: &mut impl Rng) -> u8 {
    let roll: f64 = rng.gen();
    let tier = if roll < SAME_TIER_CHANCE {
        base_tier
    } else if roll < LOWER_TIER_CHANCE {
        base_tier.saturating_sub(1)
    } else {
        base_tier.saturating_add(1)
    };
    tier.clamp(MIN_TIER, MAX_TIER)
}

/// A regular enemy near the character's tier, or `None` if that tier is empty
pub fn generate_encounter(
    player_level: u32,
    catalog: &impl ContentCatalog,
    rng: &mut impl Rng,
) -> Option<BattleEncounter> {
    let tier = roll_tier(tier_for_level(player_level), rng);
    let candidates = catalog.regular_enemies_of_tier(tier);
    let Some(template) = candidates.choose(rng) else {
        log::warn!("No regular enemies in tier {}", tier);
        return None;
    };

    log::debug!("Random encounter: {} (tier {}) at level {}", template.id, tier, player_level);
    Some(template.encounter(player_level))
}

/// A random boss scaled to the character; `None` below [`BOSS_MIN_LEVEL`]
pub fn generate_boss_encounter(
    player_level: u32,
    catalog: &impl ContentCatalog,
    rng: &mut impl Rng,
) -> Option<BattleEncounter> {
    if player_level < BOSS_MIN_LEVEL {
        return None;
    }

    let template = *catalog.bosses().choose(rng)?;
    log::info!("Boss encounter: {} at level {}", template.id, player_level);
    Some(template.encounter(player_level))
}
