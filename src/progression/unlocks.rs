//! Unlock requirements
//!
//! Cosmetics, titles and skills are gated behind simple threshold checks.
//! Every kind of requirement is a variant here and is evaluated in one place.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::arena::ArenaRank;
use crate::entities::CharacterClass;

/// A single condition that must hold before something unlocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnlockRequirement {
    /// Always available
    None,
    Level(u32),
    ArenaRank(ArenaRank),
    DungeonClears(u32),
    BattleWins(u32),
    Gold(u32),
    Class(CharacterClass),
    ClassAndLevel(CharacterClass, u32),
    QuestsCompleted(u32),
}

/// Snapshot of everything a requirement can look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockContext {
    pub level: u32,
    pub class: Option<CharacterClass>,
    pub gold: u32,
    pub arena_rank: ArenaRank,
    /// Distinct dungeons cleared at least once
    pub dungeons_cleared: u32,
    pub battles_won: u32,
    pub quests_completed: u32,
}

impl Default for UnlockContext {
    fn default() -> Self {
        Self {
            level: 1,
            class: None,
            gold: 0,
            arena_rank: ArenaRank::Bronze,
            dungeons_cleared: 0,
            battles_won: 0,
            quests_completed: 0,
        }
    }
}

impl UnlockRequirement {
    pub fn is_met(&self, ctx: &UnlockContext) -> bool {
        match self {
            UnlockRequirement::None => true,
            UnlockRequirement::Level(level) => ctx.level >= *level,
            UnlockRequirement::ArenaRank(rank) => ctx.arena_rank >= *rank,
            UnlockRequirement::DungeonClears(count) => ctx.dungeons_cleared >= *count,
            UnlockRequirement::BattleWins(count) => ctx.battles_won >= *count,
            UnlockRequirement::Gold(amount) => ctx.gold >= *amount,
            UnlockRequirement::Class(class) => ctx.class == Some(*class),
            UnlockRequirement::ClassAndLevel(class, level) => {
                ctx.class == Some(*class) && ctx.level >= *level
            }
            UnlockRequirement::QuestsCompleted(count) => ctx.quests_completed >= *count,
        }
    }

    /// Short player-facing description
    pub fn describe(&self) -> String {
        match self {
            UnlockRequirement::None => "Always available".to_string(),
            UnlockRequirement::Level(level) => format!("Reach level {}", level),
            UnlockRequirement::ArenaRank(rank) => format!("Reach {} rank in the arena", rank.name()),
            UnlockRequirement::DungeonClears(count) => format!("Clear {} dungeons", count),
            UnlockRequirement::BattleWins(count) => format!("Win {} battles", count),
            UnlockRequirement::Gold(amount) => format!("Hold {} gold", amount),
            UnlockRequirement::Class(class) => format!("Play as {}", class.name()),
            UnlockRequirement::ClassAndLevel(class, level) => {
                format!("Reach level {} as {}", level, class.name())
            }
            UnlockRequirement::QuestsCompleted(count) => format!("Complete {} quests", count),
        }
    }
}

/// Something that can be unlocked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlockable {
    pub id: String,
    pub requirement: UnlockRequirement,
}

impl Unlockable {
    pub fn new(id: &str, requirement: UnlockRequirement) -> Self {
        Self { id: id.to_string(), requirement }
    }
}

/// Persistent set of unlocked ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unlocks {
    pub unlocked: BTreeSet<String>,
}

impl Unlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Unlock every candidate whose requirement now holds; returns the new ids
    pub fn check(&mut self, candidates: &[Unlockable], ctx: &UnlockContext) -> Vec<String> {
        let mut newly = Vec::new();
        for candidate in candidates {
            if !self.is_unlocked(&candidate.id) && candidate.requirement.is_met(ctx) {
                self.unlocked.insert(candidate.id.clone());
                log::info!("Unlocked {}", candidate.id);
                newly.push(candidate.id.clone());
            }
        }
        newly
    }
}
