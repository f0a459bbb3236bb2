//! End-to-end flows across the engine: a host session that saves, restarts
//! and picks up where it left off.

use chrono::{Duration, TimeZone, Utc};

use questforge::arena::RatingEngine;
use questforge::data::DataManager;
use questforge::dungeon::{DungeonRunEngine, RunStatus};
use questforge::entities::{CharacterClass, CharacterDelta, CharacterRecord, CharacterSheet};
use questforge::items::{Item, ItemType, LootEntry, LootTable, Rarity};
use questforge::rotation::{Clock, DailyChallenges, FixedClock, Shop, TravelingMerchant};
use questforge::save::{keys, save_state, BlobStore, MemoryStore};
use questforge::{EngineConfig, SeededRng};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 11, 10, 30, 0).unwrap())
}

#[test]
fn rotations_survive_restart_and_roll_over() {
    let config = EngineConfig::default();
    let catalog = DataManager::default();
    let mut store = MemoryStore::new();
    let mut clock = clock();

    let mut shop = Shop::new(config.shop.clone());
    let mut challenges = DailyChallenges::new(config.challenges.clone());
    let mut merchant = TravelingMerchant::new(config.merchant.clone());
    assert!(shop.refresh_if_needed(clock.now(), 12, &catalog));
    assert!(challenges.refresh_if_needed(clock.now(), 12));
    assert!(merchant.refresh_if_needed(clock.now(), 12, &catalog));
    shop.save(&mut store).unwrap();
    challenges.save(&mut store).unwrap();
    merchant.save(&mut store).unwrap();

    // Same day, new process
    clock.advance(Duration::hours(6));
    let mut shop2 = Shop::load(config.shop.clone(), &store);
    let mut challenges2 = DailyChallenges::load(config.challenges.clone(), &store);
    let mut merchant2 = TravelingMerchant::load(config.merchant.clone(), &store);
    assert!(!shop2.refresh_if_needed(clock.now(), 12, &catalog));
    assert!(!challenges2.refresh_if_needed(clock.now(), 12));
    assert!(!merchant2.refresh_if_needed(clock.now(), 12, &catalog));
    assert_eq!(shop2.daily_stock(), shop.daily_stock());
    assert_eq!(challenges2.active(), challenges.active());
    assert_eq!(merchant2.stock(), merchant.stock());

    // Next day: shop and challenges turn over, merchant stays for the week
    clock.advance(Duration::days(1));
    assert!(shop2.refresh_if_needed(clock.now(), 12, &catalog));
    assert!(challenges2.refresh_if_needed(clock.now(), 12));
    assert!(!merchant2.refresh_if_needed(clock.now(), 12, &catalog));
    assert!(merchant2.is_present(clock.now()));

    clock.advance(Duration::days(7));
    assert!(!merchant2.is_present(clock.now()));
    assert!(merchant2.refresh_if_needed(clock.now(), 12, &catalog));
}

#[test]
fn two_hosts_see_the_same_day() {
    let config = EngineConfig::default();
    let catalog = DataManager::default();
    let now = clock().now();

    let mut a = Shop::new(config.shop.clone());
    let mut b = Shop::new(config.shop.clone());
    a.refresh_if_needed(now, 9, &catalog);
    b.refresh_if_needed(now + Duration::hours(3), 9, &catalog);
    assert_eq!(a.daily_stock(), b.daily_stock());
}

#[test]
fn arena_session_updates_ladder() {
    let config = EngineConfig::default();
    let catalog = DataManager::default();
    let engine = RatingEngine::new(config.arena.clone());
    let mut store = MemoryStore::new();
    let mut rng = SeededRng::seed(2024);
    let now = clock().now();

    let mut stats = engine.load_stats(&store);
    assert_eq!(stats.rating, config.arena.starting_rating);

    for i in 0..5 {
        let opponent = engine.generate_opponent(10, stats.rating, Some(CharacterClass::Angel), &catalog, &mut rng);
        assert!((8..=12).contains(&opponent.level));
        engine.complete_match(&mut stats, i % 2 == 0, &opponent, now);
    }
    assert_eq!(stats.total_wins, 3);
    assert_eq!(stats.total_losses, 2);
    assert_eq!(stats.match_history.len(), 5);
    assert!(stats.arena_tokens > 0);

    save_state(&mut store, keys::ARENA_STATS, &stats).unwrap();
    assert_eq!(engine.load_stats(&store), stats);
}

#[test]
fn dungeon_clear_then_restart() {
    let catalog = DataManager::default();
    let mut store = MemoryStore::new();
    let mut rng = SeededRng::seed(5);
    let mut hero = CharacterSheet::new(20, Some(CharacterClass::Dragon));

    let dungeon = catalog.dungeon_list().available(hero.level)[0].clone();
    let mut engine = DungeonRunEngine::new();
    assert!(engine.start_run(&dungeon, &hero));

    // Leave mid-run and come back
    let first = engine.current_floor_encounter(&dungeon, &catalog, hero.level).unwrap();
    engine.complete_floor(true, 90, Some(&first.rewards));
    engine.save(&mut store).unwrap();
    let mut engine = DungeonRunEngine::load(&store);
    assert_eq!(engine.status(), RunStatus::Active { floor: 1, hp: 90 });

    while let Some(mut encounter) = engine.current_floor_encounter(&dungeon, &catalog, hero.level) {
        encounter.roll_loot(&mut rng);
        hero.apply(CharacterDelta::rewards(encounter.rewards.xp, encounter.rewards.gold));
        engine.complete_floor(true, 80, Some(&encounter.rewards));
    }
    assert!(engine.is_run_complete());
    assert!(engine.progress.has_completed(&dungeon.id));
    assert_eq!(engine.progress.best_floor(&dungeon.id), dungeon.total_floors());
    assert!(hero.gold > 0);

    // A finished run is not resumed
    engine.save(&mut store).unwrap();
    let engine = DungeonRunEngine::load(&store);
    assert_eq!(engine.status(), RunStatus::NoRun);
    assert!(engine.progress.has_completed(&dungeon.id));
}

#[test]
fn corrupt_saves_fall_back_to_fresh_state() {
    let config = EngineConfig::default();
    let catalog = DataManager::default();
    let mut store = MemoryStore::new();
    for key in [keys::SHOP_ROTATION, keys::DUNGEON_RUN, keys::DUNGEON_PROGRESS, keys::ARENA_STATS] {
        store.save(key, b"{not json").unwrap();
    }

    let mut shop = Shop::load(config.shop.clone(), &store);
    assert!(shop.daily_stock().is_empty());
    assert!(shop.refresh_if_needed(clock().now(), 10, &catalog));

    let dungeons = DungeonRunEngine::load(&store);
    assert_eq!(dungeons.status(), RunStatus::NoRun);

    let stats = RatingEngine::new(config.arena).load_stats(&store);
    assert_eq!(stats.total_matches(), 0);
}

#[test]
fn loot_roll_grants_guaranteed_and_bonus_gold() {
    let table = LootTable {
        entries: vec![
            LootEntry::new(Item::new("slime_gel", "Slime Gel", ItemType::Material, Rarity::Common), 1.0)
                .with_quantity(2, 2),
            LootEntry::new(Item::new("never", "Never", ItemType::Material, Rarity::Legendary), 0.0),
        ],
        guaranteed_gold: 5,
        guaranteed_xp: 10,
        bonus_gold_range: 2..=8,
    };

    let mut rng = SeededRng::seed(11);
    for _ in 0..200 {
        let roll = table.roll(&mut rng);
        assert!((7..=13).contains(&roll.gold));
        assert_eq!(roll.xp, 10);
        assert_eq!(roll.items.len(), 1);
        assert_eq!(roll.items[0].0.template_id, "slime_gel");
        assert_eq!(roll.items[0].1, 2);
    }
}

#[test]
fn purchases_charge_the_character() {
    let config = EngineConfig::default();
    let catalog = DataManager::default();
    let mut hero = CharacterSheet::new(15, Some(CharacterClass::Ranger));
    hero.gold = 1_000;

    let mut shop = Shop::new(config.shop.clone());
    shop.refresh_if_needed(clock().now(), hero.level, &catalog);
    let offer = shop.daily_stock()[0].clone();
    let bought = shop.buy(&offer, &mut hero).unwrap();
    assert_eq!(bought.template_id, offer.item.template_id);
    assert_eq!(hero.sheet().gold, 1_000 - offer.display_price());

    let mut merchant = TravelingMerchant::new(config.merchant);
    merchant.refresh_if_needed(clock().now(), hero.level, &catalog);
    let before = hero.gold;
    assert!(merchant.buy("greater_health_potion", &mut hero).is_some());
    assert_eq!(hero.gold, before - 65);
}
