//! Traveling merchant
//!
//! Shows up for one ISO week with a handful of rare gear at a markup, a
//! stack of potions, and a couple of material-for-gear trades.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MerchantConfig;
use crate::data::ContentCatalog;
use crate::entities::{CharacterDelta, CharacterRecord};
use crate::items::{Item, ItemType, Rarity};
use crate::rng::SeededRng;
use crate::save::{keys, load_or_default, save_state, BlobStore, StoreError};
use super::shop::percent_of;
use super::{Bucket, Cadence, RotationState};

const MERCHANT_NAMES: [&str; 5] = [
    "Zara the Wanderer",
    "Old Hemlock",
    "Sylphi the Trader",
    "Grizzled Gideon",
    "Mira Moonveil",
];

const GREETINGS: [&str; 5] = [
    "Ah, a fellow adventurer! Come see my wares...",
    "Rare goods, fair prices! Well, mostly fair...",
    "I've traveled far to bring you these treasures!",
    "You look like someone with discerning taste!",
    "Everything must go before I move on!",
];

/// (offered, requested, requested quantity, gold cost, min level)
const BARTER_TEMPLATES: [(&str, &str, u32, u32, u32); 5] = [
    ("frost_staff", "crystal_shard", 5, 50, 8),
    ("steel_sword", "iron_ore", 5, 30, 5),
    ("shadow_blade", "shadow_essence", 4, 60, 8),
    ("plate_armor", "dragon_scale", 3, 80, 10),
    ("mage_robes", "enchanted_thread", 6, 70, 10),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantItem {
    pub item: Item,
    pub gold_price: u32,
    pub stock: u32,
}

/// Materials plus gold in exchange for a piece of gear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarterTrade {
    pub offered_item: Item,
    pub offered_quantity: u32,
    pub requested_item: Item,
    pub requested_quantity: u32,
    pub gold_cost: u32,
}

/// This week's visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantStock {
    pub merchant_name: String,
    pub greeting: String,
    pub inventory: Vec<MerchantItem>,
    pub barter_trades: Vec<BarterTrade>,
}

impl Default for MerchantStock {
    fn default() -> Self {
        Self {
            merchant_name: MERCHANT_NAMES[0].to_string(),
            greeting: "Welcome, traveler!".to_string(),
            inventory: Vec::new(),
            barter_trades: Vec::new(),
        }
    }
}

pub struct TravelingMerchant {
    pub config: MerchantConfig,
    pub state: RotationState<MerchantStock>,
}

impl TravelingMerchant {
    pub fn new(config: MerchantConfig) -> Self {
        Self { config, state: RotationState::default() }
    }

    pub fn load(config: MerchantConfig, store: &impl BlobStore) -> Self {
        Self { config, state: load_or_default(store, keys::MERCHANT_ROTATION) }
    }

    pub fn save(&self, store: &mut impl BlobStore) -> Result<(), StoreError> {
        save_state(store, keys::MERCHANT_ROTATION, &self.state)
    }

    pub fn stock(&self) -> &MerchantStock {
        &self.state.selection
    }

    /// Rebuild the visit once per ISO week
    pub fn refresh_if_needed(
        &mut self,
        now: DateTime<Utc>,
        player_level: u32,
        catalog: &impl ContentCatalog,
    ) -> bool {
        let config = &self.config;
        let refreshed = self.state.refresh_if_needed(Bucket::week_of(now), config.seed_offset, |rng| {
            generate_visit(config, player_level, catalog, rng)
        });
        if refreshed {
            let stock = &self.state.selection;
            log::info!(
                "{} arrives with {} items and {} trades",
                stock.merchant_name,
                stock.inventory.len(),
                stock.barter_trades.len()
            );
        }
        refreshed
    }

    /// The merchant stays for the ISO week of the last refresh
    pub fn is_present(&self, now: DateTime<Utc>) -> bool {
        self.state.is_current(&Bucket::week_of(now))
    }

    /// Whole days left until the merchant leaves
    pub fn days_until_departure(&self, now: DateTime<Utc>) -> i64 {
        Cadence::Weekly.time_until_refresh(now).num_days()
    }

    /// Buy one unit by template id; sold-out entries leave the inventory
    pub fn buy(&mut self, template_id: &str, character: &mut impl CharacterRecord) -> Option<Item> {
        let inventory = &mut self.state.selection.inventory;
        let index = inventory.iter().position(|m| m.item.template_id == template_id)?;
        let entry = &mut inventory[index];
        if entry.stock == 0 || character.sheet().gold < entry.gold_price {
            return None;
        }

        character.apply(CharacterDelta::gold(-(entry.gold_price as i64)));
        entry.stock -= 1;
        let item = entry.item.clone();
        if entry.stock == 0 {
            inventory.remove(index);
        }
        log::debug!("Bought {} from the merchant", template_id);
        Some(item)
    }
}

fn generate_visit(
    config: &MerchantConfig,
    player_level: u32,
    catalog: &impl ContentCatalog,
    rng: &mut SeededRng,
) -> MerchantStock {
    let merchant_name = MERCHANT_NAMES[rng.index(MERCHANT_NAMES.len())].to_string();
    let greeting = GREETINGS[rng.index(GREETINGS.len())].to_string();

    let item_count = rng.range_inclusive(config.min_items as i64, config.max_items as i64) as usize;
    let max_level = player_level.saturating_add(config.level_window);
    let mut pool: Vec<Item> = catalog
        .eligible_items(&|item: &Item| {
            item.level_requirement <= max_level
                && matches!(item.rarity, Rarity::Rare | Rarity::Epic)
                && item.item_type != ItemType::Consumable
                && item.item_type != ItemType::Material
        })
        .into_iter()
        .cloned()
        .collect();
    rng.shuffle(&mut pool);

    let mut inventory: Vec<MerchantItem> = pool
        .into_iter()
        .take(item_count)
        .map(|item| {
            let markup =
                rng.range_inclusive(config.markup_min_pct as i64, config.markup_max_pct as i64) as u32;
            let gold_price = percent_of(item.buy_price, markup).max(item.buy_price);
            MerchantItem { item, gold_price, stock: 1 }
        })
        .collect();

    match catalog.find_item(&config.consumable_id) {
        Some(potion) => inventory.push(MerchantItem {
            item: potion.clone(),
            gold_price: percent_of(potion.buy_price, config.consumable_markup_pct),
            stock: config.consumable_stock,
        }),
        None => log::warn!("Merchant consumable {} not in catalog", config.consumable_id),
    }

    let trade_count = rng.range_inclusive(config.min_trades as i64, config.max_trades as i64) as usize;
    let mut trades = barter_trades(player_level, catalog);
    rng.shuffle(&mut trades);
    trades.truncate(trade_count);

    MerchantStock { merchant_name, greeting, inventory, barter_trades: trades }
}

/// Trades unlocked at this level, in table order
fn barter_trades(player_level: u32, catalog: &impl ContentCatalog) -> Vec<BarterTrade> {
    BARTER_TEMPLATES
        .iter()
        .filter(|(_, _, _, _, min_level)| player_level >= *min_level)
        .filter_map(|(offered, requested, quantity, gold, _)| {
            Some(BarterTrade {
                offered_item: catalog.find_item(offered)?.clone(),
                offered_quantity: 1,
                requested_item: catalog.find_item(requested)?.clone(),
                requested_quantity: *quantity,
                gold_cost: *gold,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataManager;
    use crate::entities::{CharacterClass, CharacterSheet};
    use crate::save::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn monday(week_offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::weeks(week_offset)
    }

    #[test]
    fn test_weekly_visit_shape() {
        let catalog = DataManager::default();
        for week in 0..10 {
            let mut merchant = TravelingMerchant::new(MerchantConfig::default());
            assert!(merchant.refresh_if_needed(monday(week), 15, &catalog));
            let stock = merchant.stock();
            assert!(MERCHANT_NAMES.contains(&stock.merchant_name.as_str()));
            assert!(GREETINGS.contains(&stock.greeting.as_str()));

            let (gear, potions): (Vec<_>, Vec<_>) = stock
                .inventory
                .iter()
                .partition(|m| m.item.template_id != "greater_health_potion");
            assert!((3..=5).contains(&gear.len()), "week {} had {} items", week, gear.len());
            for m in gear {
                assert!(matches!(m.item.rarity, Rarity::Rare | Rarity::Epic));
                assert!(m.gold_price >= m.item.buy_price * 120 / 100);
                assert!(m.gold_price <= m.item.buy_price * 150 / 100);
            }
            assert_eq!(potions.len(), 1);
            assert_eq!(potions[0].stock, 3);
            assert_eq!(potions[0].gold_price, 65);
            assert!((2..=3).contains(&stock.barter_trades.len()));
        }
    }

    #[test]
    fn test_same_week_is_stable() {
        let catalog = DataManager::default();
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        merchant.refresh_if_needed(monday(0), 12, &catalog);
        let first = merchant.stock().clone();
        assert!(!merchant.refresh_if_needed(monday(0) + Duration::days(6), 12, &catalog));
        assert_eq!(merchant.stock(), &first);
        assert!(merchant.is_present(monday(0) + Duration::days(3)));
        assert!(!merchant.is_present(monday(1)));
    }

    #[test]
    fn test_iso_week_53_visit_differs_from_next_week() {
        let catalog = DataManager::default();
        let mut last_week = TravelingMerchant::new(MerchantConfig::default());
        let mut next_week = TravelingMerchant::new(MerchantConfig::default());
        last_week.refresh_if_needed(Utc.with_ymd_and_hms(2026, 12, 30, 9, 0, 0).unwrap(), 15, &catalog);
        next_week.refresh_if_needed(Utc.with_ymd_and_hms(2027, 1, 6, 9, 0, 0).unwrap(), 15, &catalog);
        assert_ne!(last_week.state.last_refresh_bucket, next_week.state.last_refresh_bucket);
        assert_ne!(last_week.stock(), next_week.stock());
    }

    #[test]
    fn test_huge_prices_cap_instead_of_overflowing() {
        let mut catalog = DataManager::default();
        for item in catalog.items.templates.iter_mut() {
            item.buy_price = u32::MAX;
        }
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        merchant.refresh_if_needed(monday(5), 15, &catalog);
        assert!(merchant.stock().inventory.iter().all(|m| m.gold_price == u32::MAX));
    }

    #[test]
    fn test_extreme_level_refresh() {
        let catalog = DataManager::default();
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        assert!(merchant.refresh_if_needed(monday(6), u32::MAX, &catalog));
        assert!(!merchant.stock().inventory.is_empty());
    }

    #[test]
    fn test_low_level_trades() {
        let catalog = DataManager::default();
        assert!(barter_trades(4, &catalog).is_empty());
        assert_eq!(barter_trades(5, &catalog).len(), 1);
        assert_eq!(barter_trades(10, &catalog).len(), 5);
    }

    #[test]
    fn test_buy_decrements_and_removes() {
        let catalog = DataManager::default();
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        merchant.refresh_if_needed(monday(2), 15, &catalog);

        let mut hero = CharacterSheet::new(15, Some(CharacterClass::Dragon));
        hero.gold = 200;
        for _ in 0..3 {
            assert!(merchant.buy("greater_health_potion", &mut hero).is_some());
        }
        assert_eq!(hero.gold, 200 - 3 * 65);
        assert!(merchant
            .stock()
            .inventory
            .iter()
            .all(|m| m.item.template_id != "greater_health_potion"));
        assert!(merchant.buy("greater_health_potion", &mut hero).is_none());
    }

    #[test]
    fn test_buy_needs_gold() {
        let catalog = DataManager::default();
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        merchant.refresh_if_needed(monday(3), 15, &catalog);
        let mut hero = CharacterSheet::new(15, None);
        hero.gold = 10;
        assert!(merchant.buy("greater_health_potion", &mut hero).is_none());
        assert_eq!(hero.gold, 10);
        assert_eq!(merchant.stock().inventory.last().map(|m| m.stock), Some(3));
    }

    #[test]
    fn test_persisted_visit() {
        let catalog = DataManager::default();
        let mut store = MemoryStore::new();
        let mut merchant = TravelingMerchant::new(MerchantConfig::default());
        merchant.refresh_if_needed(monday(4), 15, &catalog);
        merchant.save(&mut store).unwrap();

        let restored = TravelingMerchant::load(MerchantConfig::default(), &store);
        assert_eq!(restored.stock(), merchant.stock());
        assert!(restored.is_present(monday(4)));
    }
}
