//! Dungeon definitions
//!
//! A dungeon is an ordered list of floors, each naming the enemy template
//! fought there. Loaded from RON with a hardcoded fallback.

use serde::{Deserialize, Serialize};

/// One floor of a dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonFloor {
    /// References an enemy template ID
    pub enemy_template_id: String,
    #[serde(default)]
    pub is_boss_floor: bool,
    #[serde(default)]
    pub flavor_text: Option<String>,
}

impl DungeonFloor {
    pub fn new(enemy_template_id: &str, flavor_text: &str) -> Self {
        Self {
            enemy_template_id: enemy_template_id.to_string(),
            is_boss_floor: false,
            flavor_text: Some(flavor_text.to_string()),
        }
    }

    pub fn boss(enemy_template_id: &str, flavor_text: &str) -> Self {
        Self { is_boss_floor: true, ..Self::new(enemy_template_id, flavor_text) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub floors: Vec<DungeonFloor>,
    /// Energy the host charges on entry
    pub energy_cost: u32,
    pub level_requirement: u32,
}

impl Dungeon {
    pub fn total_floors(&self) -> u32 {
        self.floors.len() as u32
    }

    /// Entry gate checked by the host before starting a run
    pub fn can_enter(&self, player_level: u32) -> bool {
        player_level >= self.level_requirement
    }
}

/// Collection of dungeons
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dungeons {
    pub dungeons: Vec<Dungeon>,
}

impl Dungeons {
    pub fn find(&self, id: &str) -> Option<&Dungeon> {
        self.dungeons.iter().find(|d| d.id == id)
    }

    /// Dungeons a character of this level may enter
    pub fn available(&self, player_level: u32) -> Vec<&Dungeon> {
        self.dungeons.iter().filter(|d| d.can_enter(player_level)).collect()
    }
}

/// Create default dungeons (hardcoded fallback)
pub fn default_dungeons() -> Dungeons {
    Dungeons {
        dungeons: vec![
            Dungeon {
                id: "dungeon_forest_crypt".to_string(),
                name: "Forest Crypt".to_string(),
                description: "An ancient crypt beneath the forest floor.".to_string(),
                floors: vec![
                    DungeonFloor::new("enemy_moss_goblin", "Damp stone corridors stretch before you..."),
                    DungeonFloor::new("enemy_cave_spider", "Webs cover every surface..."),
                    DungeonFloor::boss("enemy_bark_sentinel", "A massive wooden guardian blocks the exit!"),
                ],
                energy_cost: 3,
                level_requirement: 3,
            },
            Dungeon {
                id: "dungeon_shadow_mine".to_string(),
                name: "Shadow Mine".to_string(),
                description: "An abandoned mine infested with dark creatures.".to_string(),
                floors: vec![
                    DungeonFloor::new("enemy_shadow_stalker", "The mine shaft descends into darkness..."),
                    DungeonFloor::new("enemy_frost_imp", "Frozen crystals line the walls..."),
                    DungeonFloor::new("enemy_corrupted_knight", "An armored figure guards a narrow passage..."),
                    DungeonFloor::new("enemy_crystal_golem", "The cavern glows with crystalline light..."),
                    DungeonFloor::boss("enemy_shadow_stalker", "The Shadow Stalker alpha emerges!"),
                ],
                energy_cost: 4,
                level_requirement: 6,
            },
            Dungeon {
                id: "dungeon_frozen_cavern".to_string(),
                name: "Frozen Cavern".to_string(),
                description: "A glacier hollowed out by something that still lives inside.".to_string(),
                floors: vec![
                    DungeonFloor::new("enemy_ice_revenant", "Your breath freezes in the air..."),
                    DungeonFloor::new("enemy_storm_harpy", "Lightning crackles across the ice..."),
                    DungeonFloor::new("enemy_bone_construct", "Bones jut from the frozen walls..."),
                    DungeonFloor::new("enemy_plague_bearer", "A sickly mist rolls in..."),
                    DungeonFloor::boss("boss_glaciara", "The Frozen Queen rises from her throne!"),
                ],
                energy_cost: 5,
                level_requirement: 10,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enemies::default_enemy_templates;

    #[test]
    fn test_every_floor_resolves() {
        let enemies = default_enemy_templates();
        for dungeon in default_dungeons().dungeons {
            for floor in &dungeon.floors {
                assert!(
                    enemies.find(&floor.enemy_template_id).is_some(),
                    "{} references missing enemy {}",
                    dungeon.id,
                    floor.enemy_template_id
                );
            }
            assert!(dungeon.floors.last().map(|f| f.is_boss_floor).unwrap_or(false));
        }
    }

    #[test]
    fn test_level_gate() {
        let dungeons = default_dungeons();
        assert!(dungeons.available(2).is_empty());
        assert_eq!(dungeons.available(6).len(), 2);
        let crypt = dungeons.find("dungeon_forest_crypt").unwrap();
        assert!(crypt.can_enter(3));
        assert!(!crypt.can_enter(2));
    }
}
