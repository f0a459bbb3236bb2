//! Multi-floor dungeon runs
//!
//! At most one run exists at a time. Winning a floor carries HP forward and
//! banks the floor's rewards; losing ends the run. Cross-run records live in
//! [`DungeonProgress`] and survive every run outcome.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::data::{ContentCatalog, Dungeon, DungeonFloor};
use crate::entities::{BattleEncounter, BattleRewards, CharacterSheet};
use crate::save::{keys, load_or_default, load_state, save_state, BlobStore, StoreError};

/// The single in-flight run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRunState {
    pub dungeon_id: String,
    /// Index of the next floor to fight
    pub current_floor: u32,
    pub floors_completed: u32,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub total_floors: u32,
    pub is_active: bool,
    pub total_gold_earned: u32,
    pub total_xp_earned: u32,
    #[serde(default)]
    pub items_collected: u32,
}

impl DungeonRunState {
    pub fn new(dungeon: &Dungeon, character: &CharacterSheet) -> Self {
        Self {
            dungeon_id: dungeon.id.clone(),
            current_floor: 0,
            floors_completed: 0,
            player_hp: character.health,
            player_max_hp: character.max_health,
            total_floors: dungeon.total_floors(),
            is_active: true,
            total_gold_earned: 0,
            total_xp_earned: 0,
            items_collected: 0,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.floors_completed >= self.total_floors
    }
}

/// Records kept across all runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonProgress {
    pub completed_dungeon_ids: BTreeSet<String>,
    pub total_dungeon_runs: u32,
    pub total_floors_cleared: u32,
    /// Dungeon id to most floors completed in one run
    pub best_floor_reached: BTreeMap<String, u32>,
}

impl DungeonProgress {
    pub fn best_floor(&self, dungeon_id: &str) -> u32 {
        self.best_floor_reached.get(dungeon_id).copied().unwrap_or(0)
    }

    pub fn has_completed(&self, dungeon_id: &str) -> bool {
        self.completed_dungeon_ids.contains(dungeon_id)
    }
}

/// Where the run machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NoRun,
    Active { floor: u32, hp: i32 },
    Complete,
    Failed,
}

/// Owns the current run and cross-run progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DungeonRunEngine {
    pub current_run: Option<DungeonRunState>,
    pub progress: DungeonProgress,
}

impl DungeonRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run; fails without change while any run exists
    pub fn start_run(&mut self, dungeon: &Dungeon, character: &CharacterSheet) -> bool {
        if let Some(run) = &self.current_run {
            log::debug!("Refusing to start {}: run in {} exists", dungeon.id, run.dungeon_id);
            return false;
        }

        self.current_run = Some(DungeonRunState::new(dungeon, character));
        self.progress.total_dungeon_runs += 1;
        log::info!(
            "Dungeon run started: {} ({} floors, {} HP)",
            dungeon.id,
            dungeon.total_floors(),
            character.health
        );
        true
    }

    pub fn status(&self) -> RunStatus {
        match &self.current_run {
            None => RunStatus::NoRun,
            Some(run) if run.is_active => RunStatus::Active { floor: run.current_floor, hp: run.player_hp },
            Some(run) if run.is_cleared() => RunStatus::Complete,
            Some(_) => RunStatus::Failed,
        }
    }

    pub fn is_run_active(&self) -> bool {
        self.current_run.as_ref().map(|r| r.is_active).unwrap_or(false)
    }

    pub fn is_run_complete(&self) -> bool {
        matches!(self.status(), RunStatus::Complete)
    }

    /// Floor the active run is on, if it belongs to `dungeon`
    pub fn current_floor<'a>(&self, dungeon: &'a Dungeon) -> Option<&'a DungeonFloor> {
        let run = self.current_run.as_ref().filter(|r| r.is_active)?;
        if run.dungeon_id != dungeon.id {
            return None;
        }
        dungeon.floors.get(run.current_floor as usize)
    }

    /// Scaled fight for the active floor; boss floors always yield a boss
    pub fn current_floor_encounter(
        &self,
        dungeon: &Dungeon,
        catalog: &impl ContentCatalog,
        player_level: u32,
    ) -> Option<BattleEncounter> {
        let floor = self.current_floor(dungeon)?;
        let template = catalog.find_enemy_template(&floor.enemy_template_id);
        if template.is_none() {
            log::warn!("Floor references unknown enemy {}", floor.enemy_template_id);
        }
        template.map(|t| t.floor_encounter(player_level, floor.is_boss_floor))
    }

    /// Resolve the active floor's fight; no-op without an active run
    pub fn complete_floor(&mut self, victory: bool, remaining_hp: i32, rewards: Option<&BattleRewards>) {
        let Some(run) = self.current_run.as_mut().filter(|r| r.is_active) else {
            return;
        };

        if !victory {
            run.is_active = false;
            log::info!(
                "Dungeon run failed: {} on floor {}",
                run.dungeon_id,
                run.current_floor + 1
            );
            return;
        }

        run.player_hp = remaining_hp.clamp(0, run.player_max_hp);
        run.floors_completed += 1;
        run.current_floor += 1;
        if let Some(rewards) = rewards {
            run.total_gold_earned = run.total_gold_earned.saturating_add(rewards.gold);
            run.total_xp_earned = run.total_xp_earned.saturating_add(rewards.xp);
            let items = rewards.item_drops.iter().fold(0u32, |n, (_, qty)| n.saturating_add(*qty));
            run.items_collected = run.items_collected.saturating_add(items);
        }

        let best = self.progress.best_floor_reached.entry(run.dungeon_id.clone()).or_insert(0);
        *best = (*best).max(run.floors_completed);
        self.progress.total_floors_cleared += 1;

        if run.current_floor >= run.total_floors {
            run.is_active = false;
            self.progress.completed_dungeon_ids.insert(run.dungeon_id.clone());
            log::info!(
                "Dungeon cleared: {} (+{} gold, +{} xp)",
                run.dungeon_id,
                run.total_gold_earned,
                run.total_xp_earned
            );
        } else {
            log::info!(
                "Floor {}/{} cleared in {}, {} HP left",
                run.floors_completed,
                run.total_floors,
                run.dungeon_id,
                run.player_hp
            );
        }
    }

    /// Drop the current run in any state
    pub fn abandon_run(&mut self) {
        if let Some(run) = self.current_run.take() {
            log::info!("Dungeon run closed: {}", run.dungeon_id);
        }
    }

    /// Restore from storage; an inactive saved run is discarded
    pub fn load(store: &impl BlobStore) -> Self {
        let progress: DungeonProgress = load_or_default(store, keys::DUNGEON_PROGRESS);
        let current_run = match load_state::<DungeonRunState>(store, keys::DUNGEON_RUN) {
            Ok(run) => run.filter(|r| r.is_active),
            Err(e) => {
                log::warn!("Discarding saved dungeon run: {}", e);
                None
            }
        };
        Self { current_run, progress }
    }

    pub fn save(&self, store: &mut impl BlobStore) -> Result<(), StoreError> {
        save_state(store, keys::DUNGEON_PROGRESS, &self.progress)?;
        match &self.current_run {
            Some(run) => save_state(store, keys::DUNGEON_RUN, run),
            None => store.delete(keys::DUNGEON_RUN),
        }
    }
}
