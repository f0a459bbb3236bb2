//! RON data loader
//!
//! Loads game content from external RON files, with fallback to hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entities::EnemyTemplate;
use crate::items::Item;
use super::catalog::ContentCatalog;
use super::dungeons::{default_dungeons, Dungeon, Dungeons};
use super::enemies::{default_enemy_templates, EnemyTemplates};
use super::items::{default_item_templates, ItemTemplates};

/// Manages all external game content
#[derive(Debug, Clone)]
pub struct DataManager {
    /// Item templates
    pub items: ItemTemplates,
    /// Enemy templates
    pub enemies: EnemyTemplates,
    /// Dungeon definitions
    pub dungeons: Dungeons,
}

/// Read and parse one RON file; `None` (with a warning) on any failure
fn load_ron<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) => match ron::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("Failed to serialize {}: {}", path.display(), e))?;
    fs::write(path, text).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

impl DataManager {
    /// Load content from `assets/data`, using defaults for anything missing
    pub fn new() -> Self {
        Self::load_from(Path::new("assets/data"))
    }

    /// Load content from a directory; each file falls back independently
    pub fn load_from(base_path: &Path) -> Self {
        let items = load_ron(&base_path.join("items.ron")).unwrap_or_else(default_item_templates);
        let enemies =
            load_ron(&base_path.join("enemies.ron")).unwrap_or_else(default_enemy_templates);
        let dungeons = load_ron(&base_path.join("dungeons.ron")).unwrap_or_else(default_dungeons);

        log::info!(
            "Content loaded: {} items, {} enemies, {} dungeons",
            items.templates.len(),
            enemies.templates.len(),
            dungeons.dungeons.len()
        );

        Self { items, enemies, dungeons }
    }

    /// Get item templates
    pub fn item_templates(&self) -> &ItemTemplates {
        &self.items
    }

    /// Get enemy templates
    pub fn enemy_templates(&self) -> &EnemyTemplates {
        &self.enemies
    }

    /// Get dungeon definitions
    pub fn dungeon_list(&self) -> &Dungeons {
        &self.dungeons
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            items: default_item_templates(),
            enemies: default_enemy_templates(),
            dungeons: default_dungeons(),
        }
    }
}

impl ContentCatalog for DataManager {
    fn find_enemy_template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.find(id)
    }

    fn find_item(&self, template_id: &str) -> Option<&Item> {
        self.items.find(template_id)
    }

    fn find_dungeon(&self, id: &str) -> Option<&Dungeon> {
        self.dungeons.find(id)
    }

    fn items(&self) -> &[Item] {
        &self.items.templates
    }

    fn enemies(&self) -> &[EnemyTemplate] {
        &self.enemies.templates
    }
}

/// Export all default content to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<(), String> {
    if !base_path.exists() {
        fs::create_dir_all(base_path)
            .map_err(|e| format!("Failed to create {}: {}", base_path.display(), e))?;
    }

    write_ron(&base_path.join("items.ron"), &default_item_templates())?;
    write_ron(&base_path.join("enemies.ron"), &default_enemy_templates())?;
    write_ron(&base_path.join("dungeons.ron"), &default_dungeons())?;

    Ok(())
}
