//! Engine tunables
//!
//! Every constant the progression systems use, loadable from a RON file so
//! balance can be tweaked without a rebuild. Missing fields take defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub arena: ArenaConfig,
    pub shop: ShopConfig,
    pub challenges: ChallengeConfig,
    pub merchant: MerchantConfig,
}

/// Arena rating and token economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Elo K-factor
    pub k_factor: f64,
    /// Smallest rating movement for any match
    pub min_rating_change: i32,
    pub starting_rating: u32,
    /// Most recent matches kept in history
    pub history_limit: usize,
    /// Base tokens per rank, bronze through champion
    pub rank_base_tokens: [u32; 5],
    pub streak_token_step: u32,
    pub streak_token_cap: u32,
    /// Opponent level offset is drawn from `-level_spread..=level_spread`
    pub level_spread: i32,
    pub rating_spread: i32,
    /// Probability the opponent plays a different class than the player
    pub off_class_chance: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            min_rating_change: 5,
            starting_rating: 200,
            history_limit: 50,
            rank_base_tokens: [10, 15, 20, 30, 40],
            streak_token_step: 5,
            streak_token_cap: 25,
            level_spread: 2,
            rating_spread: 200,
            off_class_chance: 0.7,
        }
    }
}

/// Daily shop rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub min_items: usize,
    pub max_items: usize,
    /// Items up to `player_level + level_window` are stocked
    pub level_window: u32,
    /// One item in `discount_one_in` is discounted
    pub discount_one_in: u64,
    pub discount_min_pct: u32,
    pub discount_max_pct: u32,
    pub seed_offset: u64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            min_items: 8,
            max_items: 12,
            level_window: 2,
            discount_one_in: 5,
            discount_min_pct: 10,
            discount_max_pct: 25,
            seed_offset: 0,
        }
    }
}

/// Daily challenge rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    pub count: usize,
    pub seed_offset: u64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self { count: 3, seed_offset: 7919 }
    }
}

/// Weekly traveling merchant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantConfig {
    pub min_items: usize,
    pub max_items: usize,
    pub level_window: u32,
    pub markup_min_pct: u32,
    pub markup_max_pct: u32,
    /// Template id of the consumable always in stock
    pub consumable_id: String,
    pub consumable_markup_pct: u32,
    pub consumable_stock: u32,
    pub min_trades: usize,
    pub max_trades: usize,
    pub seed_offset: u64,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            min_items: 3,
            max_items: 5,
            level_window: 2,
            markup_min_pct: 120,
            markup_max_pct: 150,
            consumable_id: "greater_health_potion".to_string(),
            consumable_markup_pct: 130,
            consumable_stock: 3,
            min_trades: 2,
            max_trades: 3,
            seed_offset: 31337,
        }
    }
}

impl EngineConfig {
    /// Load from a RON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(config) => {
                        log::info!("Loaded engine config from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("Failed to parse {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Write the current values out as pretty RON
    pub fn export(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, text).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}
