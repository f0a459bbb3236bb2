//! Enemy templates for data-driven encounter creation
//!
//! These templates are loaded from RON files and scaled into encounters.

use serde::{Deserialize, Serialize};

use crate::entities::{Ability, Element, EnemyTemplate, StatusEffect, StatusEffectType};
use crate::items::{LootEntry, LootTable};
use super::items::{default_item_templates, ItemTemplates};

/// Collection of enemy templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyTemplates {
    pub templates: Vec<EnemyTemplate>,
}

impl EnemyTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

}

/// Shorthand for a loot entry from the item catalog
fn drop(items: &ItemTemplates, id: &str, chance: f64) -> Option<LootEntry> {
    items.find(id).cloned().map(|item| LootEntry::new(item, chance))
}

fn table(entries: Vec<Option<LootEntry>>, gold: u32, xp: u32, bonus: (u32, u32)) -> LootTable {
    LootTable {
        entries: entries.into_iter().flatten().collect(),
        guaranteed_gold: gold,
        guaranteed_xp: xp,
        bonus_gold_range: bonus.0..=bonus.1,
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    tier: u8,
    levels: (u32, u32),
    stats: (i32, i32, i32),
    element: Element,
    abilities: Vec<Ability>,
    loot_table: LootTable,
) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        tier,
        level_range: levels.0..=levels.1,
        base_hp: stats.0,
        base_attack: stats.1,
        base_defense: stats.2,
        element,
        is_boss: false,
        abilities,
        loot_table,
    }
}

/// Create default enemy templates (hardcoded fallback)
pub fn default_enemy_templates() -> EnemyTemplates {
    let items = default_item_templates();
    let i = &items;

    let mut glaciara = template(
        "boss_glaciara",
        "Glaciara, the Frozen Queen",
        4,
        (10, 14),
        (180, 24, 14),
        Element::Ice,
        vec![
            Ability::new("Blizzard", 30, 0.35)
                .with_effect(StatusEffect::new(StatusEffectType::Stun, 1, 0)),
            Ability::new("Glacial Armor", 0, 0.2)
                .with_effect(StatusEffect::new(StatusEffectType::Shield, 2, 20)),
        ],
        table(
            vec![
                drop(i, "dragon_scale", 1.0).map(|e| e.with_quantity(1, 2)),
                drop(i, "frost_staff", 0.15),
            ],
            120,
            150,
            (30, 60),
        ),
    );
    glaciara.is_boss = true;

    EnemyTemplates {
        templates: vec![
            // === TIER 1: FOREST FRINGE (Lv 1-4) ===
            template(
                "enemy_whiskered_rat", "Whiskered Rat", 1, (1, 4), (30, 8, 2), Element::Physical,
                vec![Ability::new("Gnaw", 10, 0.3)],
                table(vec![drop(i, "iron_ore", 0.3)], 5, 10, (2, 8)),
            ),
            template(
                "enemy_shadow_wisp", "Shadow Wisp", 1, (1, 4), (25, 10, 1), Element::Shadow,
                vec![Ability::new("Shadow Bolt", 12, 0.3)],
                table(vec![drop(i, "shadow_essence", 0.2)], 6, 12, (3, 10)),
            ),
            template(
                "enemy_moss_goblin", "Moss Goblin", 1, (1, 4), (35, 9, 3), Element::Nature,
                vec![Ability::new("Club Smash", 11, 0.25)],
                table(
                    vec![drop(i, "iron_ore", 0.25), drop(i, "health_potion", 0.15)],
                    8, 12, (3, 10),
                ),
            ),
            template(
                "enemy_cave_spider", "Cave Spider", 1, (1, 4), (28, 9, 2), Element::Nature,
                vec![Ability::new("Venom Bite", 9, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Poison, 3, 3))],
                table(vec![drop(i, "enchanted_thread", 0.3)], 6, 11, (2, 9)),
            ),
            template(
                "enemy_bark_sentinel", "Bark Sentinel", 1, (1, 4), (45, 8, 5), Element::Nature,
                vec![Ability::new("Root Slam", 13, 0.3)],
                table(
                    vec![drop(i, "crystal_shard", 0.4), drop(i, "clarity_amulet", 0.05)],
                    12, 18, (5, 12),
                ),
            ),

            // === TIER 2: SHADOWED DEPTHS (Lv 5-8) ===
            template(
                "enemy_shadow_stalker", "Shadow Stalker", 2, (5, 8), (60, 14, 5), Element::Shadow,
                vec![Ability::new("Ambush", 18, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Bleed, 2, 4))],
                table(vec![drop(i, "shadow_essence", 0.4)], 15, 25, (5, 15)),
            ),
            template(
                "enemy_frost_imp", "Frost Imp", 2, (5, 8), (50, 16, 4), Element::Ice,
                vec![Ability::new("Ice Shard", 17, 0.3)],
                table(vec![drop(i, "crystal_shard", 0.35)], 14, 24, (5, 14)),
            ),
            template(
                "enemy_corrupted_knight", "Corrupted Knight", 2, (5, 8), (70, 13, 8), Element::Physical,
                vec![Ability::new("Cleave", 16, 0.3)],
                table(
                    vec![drop(i, "iron_ore", 0.5), drop(i, "chainmail_armor", 0.05)],
                    18, 28, (6, 16),
                ),
            ),
            template(
                "enemy_crystal_golem", "Crystal Golem", 2, (5, 8), (80, 12, 10), Element::Physical,
                vec![Ability::new("Shard Burst", 15, 0.25)],
                table(vec![drop(i, "crystal_shard", 0.6).map(|e| e.with_quantity(1, 3))], 20, 30, (8, 18)),
            ),

            // === TIER 3: ELEMENTAL WASTES (Lv 9-12) ===
            template(
                "enemy_ice_revenant", "Ice Revenant", 3, (9, 12), (100, 18, 10), Element::Ice,
                vec![Ability::new("Frozen Grasp", 22, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Weaken, 2, 4))],
                table(vec![drop(i, "crystal_shard", 0.5)], 25, 40, (10, 20)),
            ),
            template(
                "enemy_storm_harpy", "Storm Harpy", 3, (9, 12), (80, 19, 7), Element::Lightning,
                vec![Ability::new("Thunder Dive", 24, 0.3)],
                table(vec![drop(i, "enchanted_thread", 0.4)], 22, 38, (10, 20)),
            ),
            template(
                "enemy_bone_construct", "Bone Construct", 3, (9, 12), (110, 16, 12), Element::Shadow,
                vec![Ability::new("Bone Spear", 20, 0.3)],
                table(vec![drop(i, "shadow_essence", 0.5)], 26, 42, (10, 22)),
            ),
            template(
                "enemy_plague_bearer", "Plague Bearer", 3, (9, 12), (85, 17, 7), Element::Nature,
                vec![Ability::new("Miasma", 14, 0.35)
                    .with_effect(StatusEffect::new(StatusEffectType::Poison, 3, 5))],
                table(vec![drop(i, "antidote", 0.3)], 24, 40, (10, 20)),
            ),

            // === TIER 4: MOLTEN CALDERA (Lv 13-16) ===
            template(
                "enemy_ash_wyrmling", "Ash Wyrmling", 4, (13, 16), (140, 24, 12), Element::Fire,
                vec![Ability::new("Cinder Breath", 28, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Burn, 2, 6))],
                table(vec![drop(i, "dragon_scale", 0.3)], 35, 55, (12, 26)),
            ),
            template(
                "enemy_void_sentinel", "Void Sentinel", 4, (13, 16), (160, 21, 16), Element::Shadow,
                vec![Ability::new("Null Pulse", 25, 0.3)],
                table(
                    vec![drop(i, "shadow_essence", 0.6), drop(i, "shadow_blade", 0.04)],
                    38, 58, (12, 28),
                ),
            ),

            // === TIER 5: SKYBREAK SPIRE (Lv 17-20) ===
            template(
                "enemy_storm_titan", "Storm Titan", 5, (17, 20), (220, 30, 18), Element::Lightning,
                vec![Ability::new("Thunderclap", 34, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Stun, 1, 0))],
                table(
                    vec![drop(i, "crystal_shard", 0.7).map(|e| e.with_quantity(2, 4))],
                    50, 80, (15, 35),
                ),
            ),
            template(
                "enemy_elder_lich", "Elder Lich", 5, (17, 20), (190, 33, 14), Element::Shadow,
                vec![Ability::new("Soul Rend", 36, 0.3)
                    .with_effect(StatusEffect::new(StatusEffectType::Weaken, 2, 6))],
                table(
                    vec![drop(i, "enchanted_thread", 0.5), drop(i, "dragon_slayer", 0.02)],
                    55, 85, (15, 35),
                ),
            ),
            glaciara,
        ],
    }
}
