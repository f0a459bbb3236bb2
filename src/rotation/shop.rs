//! Daily shop
//!
//! Consumables are always on sale. Gear rotates daily: a seeded shuffle of
//! level-appropriate items, a few of them discounted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ShopConfig;
use crate::data::ContentCatalog;
use crate::entities::{CharacterDelta, CharacterRecord};
use crate::items::{Item, ItemType};
use crate::rng::SeededRng;
use crate::save::{keys, load_or_default, save_state, BlobStore, StoreError};
use super::{Bucket, Cadence, RotationState};

/// An item on the shelf with its price adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item: Item,
    pub is_discounted: bool,
    pub discount_percent: u32,
}

impl ShopItem {
    pub fn full_price(item: Item) -> Self {
        Self { item, is_discounted: false, discount_percent: 0 }
    }

    /// Price after discount, never below 1
    pub fn display_price(&self) -> u32 {
        if self.is_discounted {
            let price = self.item.buy_price;
            price.saturating_sub(percent_of(price, self.discount_percent)).max(1)
        } else {
            self.item.buy_price
        }
    }

    pub fn original_price(&self) -> u32 {
        self.item.buy_price
    }
}

/// `pct` percent of `price`, rounded down, without intermediate overflow
pub(crate) fn percent_of(price: u32, pct: u32) -> u32 {
    (price as u64 * pct as u64 / 100).min(u32::MAX as u64) as u32
}

pub struct Shop {
    pub config: ShopConfig,
    pub state: RotationState<Vec<ShopItem>>,
}

impl Shop {
    pub fn new(config: ShopConfig) -> Self {
        Self { config, state: RotationState::default() }
    }

    pub fn load(config: ShopConfig, store: &impl BlobStore) -> Self {
        Self { config, state: load_or_default(store, keys::SHOP_ROTATION) }
    }

    pub fn save(&self, store: &mut impl BlobStore) -> Result<(), StoreError> {
        save_state(store, keys::SHOP_ROTATION, &self.state)
    }

    /// Today's rotating stock
    pub fn daily_stock(&self) -> &[ShopItem] {
        &self.state.selection
    }

    /// Every consumable in the catalog, always at full price
    pub fn permanent_stock(&self, catalog: &impl ContentCatalog) -> Vec<ShopItem> {
        catalog
            .eligible_items(&|item: &Item| item.item_type == ItemType::Consumable)
            .into_iter()
            .cloned()
            .map(ShopItem::full_price)
            .collect()
    }

    /// Rebuild the daily stock once per UTC day
    pub fn refresh_if_needed(
        &mut self,
        now: DateTime<Utc>,
        player_level: u32,
        catalog: &impl ContentCatalog,
    ) -> bool {
        let bucket = Bucket::day_of(now);
        let config = &self.config;
        let refreshed = self.state.refresh_if_needed(bucket, config.seed_offset, |rng| {
            generate_stock(config, player_level, catalog, rng)
        });
        if refreshed {
            log::info!("Shop stocked {} items for level {}", self.state.selection.len(), player_level);
        }
        refreshed
    }

    pub fn time_until_refresh(&self, now: DateTime<Utc>) -> chrono::Duration {
        Cadence::Daily.time_until_refresh(now)
    }

    /// Charge the display price; `None` if the character can't afford it
    pub fn buy(&self, shop_item: &ShopItem, character: &mut impl CharacterRecord) -> Option<Item> {
        let price = shop_item.display_price();
        if character.sheet().gold < price {
            return None;
        }
        character.apply(CharacterDelta::gold(-(price as i64)));
        log::debug!("Bought {} for {} gold", shop_item.item.template_id, price);
        Some(shop_item.item.clone())
    }

    /// Pay out the item's sell price; the caller removes it from inventory
    pub fn sell(&self, item: &Item, character: &mut impl CharacterRecord) -> u32 {
        character.apply(CharacterDelta::gold(item.sell_price as i64));
        item.sell_price
    }
}

fn generate_stock(
    config: &ShopConfig,
    player_level: u32,
    catalog: &impl ContentCatalog,
    rng: &mut SeededRng,
) -> Vec<ShopItem> {
    let max_level = player_level.saturating_add(config.level_window);
    let mut pool: Vec<Item> = catalog
        .eligible_items(&|item: &Item| {
            item.item_type != ItemType::Consumable && item.level_requirement <= max_level
        })
        .into_iter()
        .cloned()
        .collect();
    rng.shuffle(&mut pool);

    // Small pools stock everything rather than fail
    let upper = config.max_items.min(pool.len());
    let lower = config.min_items.min(upper);
    let span = (upper - lower + 1) as u64;
    let count = lower + (rng.next() % span) as usize;
    pool.truncate(count);

    pool.into_iter()
        .map(|item| {
            let is_discounted = rng.chance_in(1, config.discount_one_in);
            let discount_percent = if is_discounted {
                rng.range_inclusive(config.discount_min_pct as i64, config.discount_max_pct as i64) as u32
            } else {
                0
            };
            ShopItem { item, is_discounted, discount_percent }
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

    fn noon(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()
    }

    fn ids(stock: &[ShopItem]) -> Vec<String> {
        stock.iter().map(|s| s.item.template_id.clone()).collect()
    }

    #[test]
    fn test_display_price() {
        let item = Item::new("x", "X", ItemType::Weapon, crate::items::Rarity::Common).with_price(100, 50);
        let mut shop_item = ShopItem::full_price(item);
        assert_eq!(shop_item.display_price(), 100);
        shop_item.is_discounted = true;
        shop_item.discount_percent = 25;
        assert_eq!(shop_item.display_price(), 75);
        shop_item.item.buy_price = 1;
        assert_eq!(shop_item.display_price(), 1);
    }

    #[test]
    fn test_display_price_with_huge_price() {
        let item = Item::new("crown", "Crown", ItemType::Accessory, crate::items::Rarity::Legendary)
            .with_price(u32::MAX, 0);
        let mut shop_item = ShopItem::full_price(item);
        shop_item.is_discounted = true;
        shop_item.discount_percent = 25;
        assert_eq!(shop_item.display_price(), u32::MAX - u32::MAX / 4);
        assert_eq!(percent_of(u32::MAX, 150), u32::MAX);
        assert_eq!(percent_of(200, 130), 260);
    }

    #[test]
    fn test_extreme_level_refresh() {
        let catalog = DataManager::default();
        let mut shop = Shop::new(ShopConfig::default());
        assert!(shop.refresh_if_needed(noon(6), u32::MAX, &catalog));
        assert!((8..=12).contains(&shop.daily_stock().len()));
    }

    #[test]
    fn test_stock_is_stable_within_a_day() {
        let catalog = DataManager::default();
        let mut shop = Shop::new(ShopConfig::default());
        assert!(shop.refresh_if_needed(noon(1), 12, &catalog));
        let first = shop.daily_stock().to_vec();
        assert!(!shop.refresh_if_needed(noon(1) + Duration::hours(11), 12, &catalog));
        assert_eq!(shop.daily_stock(), &first[..]);
    }

    #[test]
    fn test_stock_rules() {
        let catalog = DataManager::default();
        let config = ShopConfig::default();
        for d in 1..=20 {
            let mut shop = Shop::new(config.clone());
            shop.refresh_if_needed(noon(d), 12, &catalog);
            let stock = shop.daily_stock();
            assert!((8..=12).contains(&stock.len()), "day {} stocked {}", d, stock.len());
            for s in stock {
                assert_ne!(s.item.item_type, ItemType::Consumable);
                assert!(s.item.level_requirement <= 14);
                if s.is_discounted {
                    assert!((10..=25).contains(&s.discount_percent));
                } else {
                    assert_eq!(s.discount_percent, 0);
                }
            }
        }
    }

    #[test]
    fn test_small_pool_does_not_panic() {
        let catalog = DataManager::default();
        let mut shop = Shop::new(ShopConfig::default());
        shop.refresh_if_needed(noon(2), 1, &catalog);
        let eligible = catalog
            .eligible_items(&|i: &Item| i.item_type != ItemType::Consumable && i.level_requirement <= 3)
            .len();
        assert!(eligible < 8);
        assert_eq!(shop.daily_stock().len(), eligible);
    }

    #[test]
    fn test_days_differ() {
        let catalog = DataManager::default();
        let mut a = Shop::new(ShopConfig::default());
        let mut b = Shop::new(ShopConfig::default());
        a.refresh_if_needed(noon(3), 15, &catalog);
        b.refresh_if_needed(noon(4), 15, &catalog);
        assert_ne!(a.daily_stock(), b.daily_stock());
    }

    #[test]
    fn test_buy_and_sell() {
        let catalog = DataManager::default();
        let shop = Shop::new(ShopConfig::default());
        let potion = shop
            .permanent_stock(&catalog)
            .into_iter()
            .find(|s| s.item.template_id == "health_potion")
            .unwrap();

        let mut hero = CharacterSheet::new(3, Some(CharacterClass::Angel));
        hero.gold = 15;
        assert!(shop.buy(&potion, &mut hero).is_none());
        assert_eq!(hero.gold, 15);

        hero.gold = 45;
        let bought = shop.buy(&potion, &mut hero).unwrap();
        assert_eq!(bought.template_id, "health_potion");
        assert_eq!(hero.gold, 25);

        assert_eq!(shop.sell(&bought, &mut hero), 10);
        assert_eq!(hero.gold, 35);
    }

    #[test]
    fn test_persisted_stock_survives_restart() {
        let catalog = DataManager::default();
        let mut store = MemoryStore::new();
        let mut shop = Shop::new(ShopConfig::default());
        shop.refresh_if_needed(noon(5), 10, &catalog);
        shop.save(&mut store).unwrap();

        let mut restored = Shop::load(ShopConfig::default(), &store);
        assert!(!restored.refresh_if_needed(noon(5), 10, &catalog));
        assert_eq!(ids(restored.daily_stock()), ids(shop.daily_stock()));
    }
}
