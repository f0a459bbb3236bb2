//! Read-only content lookup
//!
//! The progression systems depend on this trait rather than on a concrete
//! data source, so hosts can serve content from wherever they keep it.

use crate::entities::EnemyTemplate;
use crate::items::Item;
use super::dungeons::Dungeon;

pub trait ContentCatalog {
    fn find_enemy_template(&self, id: &str) -> Option<&EnemyTemplate>;
    fn find_item(&self, template_id: &str) -> Option<&Item>;
    fn find_dungeon(&self, id: &str) -> Option<&Dungeon>;

    /// Every catalog item, in catalog order
    fn items(&self) -> &[Item];

    /// Every enemy template, in catalog order
    fn enemies(&self) -> &[EnemyTemplate];

    /// Items matching a predicate, in catalog order
    fn eligible_items(&self, predicate: &dyn Fn(&Item) -> bool) -> Vec<&Item> {
        self.items().iter().filter(|item| predicate(item)).collect()
    }

    /// Regular (non-boss) templates of one tier
    fn regular_enemies_of_tier(&self, tier: u8) -> Vec<&EnemyTemplate> {
        self.enemies().iter().filter(|t| t.tier == tier && !t.is_boss).collect()
    }

    fn bosses(&self) -> Vec<&EnemyTemplate> {
        self.enemies().iter().filter(|t| t.is_boss).collect()
    }
}
