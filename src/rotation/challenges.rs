//! Daily challenges
//!
//! Three challenges a day, drawn from a fixed template list and scaled to
//! the player's level when the day's rotation is built.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;
use crate::save::{keys, load_or_default, save_state, BlobStore, StoreError};
use super::{Bucket, Cadence, RotationState};

/// What a challenge counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    KillEnemies,
    DealDamage,
    WinBattles,
    UseItems,
    EarnGold,
    CompleteQuests,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChallengeRewards {
    pub xp: u32,
    pub gold: u32,
}

/// Static challenge definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeTemplate {
    pub id: &'static str,
    pub title: &'static str,
    /// `{}` is replaced with the target
    pub description: &'static str,
    pub kind: ChallengeKind,
    pub base_target: u32,
    /// Extra target per player level
    pub level_scaling: f64,
    pub base_xp: u32,
    pub base_gold: u32,
}

pub const CHALLENGE_TEMPLATES: [ChallengeTemplate; 6] = [
    ChallengeTemplate {
        id: "kill_enemies",
        title: "Monster Hunter",
        description: "Defeat {} enemies in battle",
        kind: ChallengeKind::KillEnemies,
        base_target: 2,
        level_scaling: 0.5,
        base_xp: 30,
        base_gold: 15,
    },
    ChallengeTemplate {
        id: "deal_damage",
        title: "Damage Dealer",
        description: "Deal {} total damage",
        kind: ChallengeKind::DealDamage,
        base_target: 50,
        level_scaling: 10.0,
        base_xp: 25,
        base_gold: 12,
    },
    ChallengeTemplate {
        id: "win_battles",
        title: "Battle Champion",
        description: "Win {} battles",
        kind: ChallengeKind::WinBattles,
        base_target: 1,
        level_scaling: 0.3,
        base_xp: 40,
        base_gold: 20,
    },
    ChallengeTemplate {
        id: "use_items",
        title: "Item Master",
        description: "Use {} items in battle",
        kind: ChallengeKind::UseItems,
        base_target: 1,
        level_scaling: 0.2,
        base_xp: 20,
        base_gold: 10,
    },
    ChallengeTemplate {
        id: "earn_gold",
        title: "Gold Rush",
        description: "Earn {} gold",
        kind: ChallengeKind::EarnGold,
        base_target: 30,
        level_scaling: 8.0,
        base_xp: 25,
        base_gold: 15,
    },
    ChallengeTemplate {
        id: "complete_quests",
        title: "Quest Master",
        description: "Complete {} quests",
        kind: ChallengeKind::CompleteQuests,
        base_target: 1,
        level_scaling: 0.2,
        base_xp: 35,
        base_gold: 18,
    },
];

impl ChallengeTemplate {
    pub fn target_for(&self, level: u32) -> u32 {
        self.base_target.saturating_add((level as f64 * self.level_scaling).floor() as u32)
    }

    pub fn rewards_for(&self, level: u32) -> ChallengeRewards {
        ChallengeRewards {
            xp: self.base_xp.saturating_add(level.saturating_mul(5)),
            gold: self.base_gold.saturating_add(level.saturating_mul(3)),
        }
    }

    /// Concrete challenge for one day at one level
    pub fn challenge(&self, level: u32, date: NaiveDate) -> DailyChallenge {
        let target = self.target_for(level);
        DailyChallenge {
            id: format!("{}_{}", self.id, date),
            title: self.title.to_string(),
            description: self.description.replace("{}", &target.to_string()),
            kind: self.kind,
            target,
            progress: 0,
            is_claimed: false,
            rewards: self.rewards_for(level),
            date_assigned: date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub target: u32,
    pub progress: u32,
    pub is_claimed: bool,
    pub rewards: ChallengeRewards,
    pub date_assigned: NaiveDate,
}

impl DailyChallenge {
    pub fn is_completed(&self) -> bool {
        self.progress >= self.target
    }
}

/// Today's challenges and their progress
pub struct DailyChallenges {
    pub config: ChallengeConfig,
    pub state: RotationState<Vec<DailyChallenge>>,
}

impl DailyChallenges {
    pub fn new(config: ChallengeConfig) -> Self {
        Self { config, state: RotationState::default() }
    }

    pub fn load(config: ChallengeConfig, store: &impl BlobStore) -> Self {
        Self { config, state: load_or_default(store, keys::CHALLENGE_ROTATION) }
    }

    pub fn save(&self, store: &mut impl BlobStore) -> Result<(), StoreError> {
        save_state(store, keys::CHALLENGE_ROTATION, &self.state)
    }

    pub fn active(&self) -> &[DailyChallenge] {
        &self.state.selection
    }

    /// Draw a new set once per UTC day; progress from the old day is dropped
    pub fn refresh_if_needed(&mut self, now: DateTime<Utc>, player_level: u32) -> bool {
        let date = now.date_naive();
        let count = self.config.count;
        self.state.refresh_if_needed(Bucket::Day(date), self.config.seed_offset, |rng| {
            let mut templates = CHALLENGE_TEMPLATES.to_vec();
            rng.shuffle(&mut templates);
            templates
                .iter()
                .take(count)
                .map(|t| t.challenge(player_level, date))
                .collect()
        })
    }

    /// Add progress to every unclaimed challenge of `kind`, capped at its target
    pub fn record(&mut self, kind: ChallengeKind, amount: u32) {
        for challenge in self.state.selection.iter_mut() {
            if challenge.kind == kind && !challenge.is_claimed {
                challenge.progress = challenge.progress.saturating_add(amount).min(challenge.target);
            }
        }
    }

    pub fn record_kill(&mut self) {
        self.record(ChallengeKind::KillEnemies, 1);
    }

    pub fn record_damage(&mut self, amount: u32) {
        self.record(ChallengeKind::DealDamage, amount);
    }

    pub fn record_battle_win(&mut self) {
        self.record(ChallengeKind::WinBattles, 1);
    }

    pub fn record_item_used(&mut self) {
        self.record(ChallengeKind::UseItems, 1);
    }

    pub fn record_gold_earned(&mut self, amount: u32) {
        self.record(ChallengeKind::EarnGold, amount);
    }

    pub fn record_quest_complete(&mut self) {
        self.record(ChallengeKind::CompleteQuests, 1);
    }

    /// Mark a completed challenge claimed and hand back its rewards
    pub fn claim(&mut self, challenge_id: &str) -> Option<ChallengeRewards> {
        let challenge = self.state.selection.iter_mut().find(|c| c.id == challenge_id)?;
        if !challenge.is_completed() || challenge.is_claimed {
            return None;
        }
        challenge.is_claimed = true;
        log::info!("Claimed challenge {}", challenge.id);
        Some(challenge.rewards)
    }

    pub fn all_claimed(&self) -> bool {
        self.active().iter().all(|c| c.is_claimed)
    }

    pub fn completed_count(&self) -> usize {
        self.active().iter().filter(|c| c.is_completed()).count()
    }

    pub fn time_until_refresh(&self, now: DateTime<Utc>) -> chrono::Duration {
        Cadence::Daily.time_until_refresh(now)
    }
}
