//! Questforge - Demo driver
//!
//! Loads content and saved state, refreshes today's rotations, fights one
//! arena match and pushes through a dungeon, then saves everything back.

use std::path::Path;

use anyhow::Result;
use rand::Rng;

use questforge::arena::RatingEngine;
use questforge::data::DataManager;
use questforge::dungeon::DungeonRunEngine;
use questforge::entities::{
    generate_boss_encounter, generate_encounter, CharacterClass, CharacterDelta, CharacterRecord,
    CharacterSheet,
};
use questforge::rotation::{Clock, DailyChallenges, Shop, SystemClock, TravelingMerchant};
use questforge::save::{keys, save_state, FileStore};
use questforge::{EngineConfig, SeededRng};

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .init();

    log::info!("Starting Questforge v{}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load(Path::new("assets/config.ron"));
    let catalog = DataManager::new();
    let mut store = FileStore::in_default_dir();
    let clock = SystemClock;
    let now = clock.now();
    log::info!("Saving to {}", store.dir().display());

    let mut hero = CharacterSheet::new(8, Some(CharacterClass::Ranger));
    hero.gold = 400;

    // Rotations
    let mut shop = Shop::load(config.shop.clone(), &store);
    shop.refresh_if_needed(now, hero.level, &catalog);
    for entry in shop.daily_stock() {
        log::info!(
            "Shop: {} for {} gold{}",
            entry.item.name,
            entry.display_price(),
            if entry.is_discounted { format!(" ({}% off)", entry.discount_percent) } else { String::new() }
        );
    }

    let mut challenges = DailyChallenges::load(config.challenges.clone(), &store);
    challenges.refresh_if_needed(now, hero.level);
    for challenge in challenges.active() {
        log::info!("Challenge: {} - {} ({}/{})", challenge.title, challenge.description, challenge.progress, challenge.target);
    }

    let mut merchant = TravelingMerchant::load(config.merchant.clone(), &store);
    merchant.refresh_if_needed(now, hero.level, &catalog);
    let visit = merchant.stock();
    log::info!("{}: \"{}\" ({} days left)", visit.merchant_name, visit.greeting, merchant.days_until_departure(now));

    // Arena
    let mut rng = SeededRng::seed(now.timestamp() as u64);
    let engine = RatingEngine::new(config.arena.clone());
    let mut arena = engine.load_stats(&store);
    let opponent = engine.generate_opponent(hero.level, arena.rating, hero.class, &catalog, &mut rng);
    let fight = opponent.to_encounter();
    let victory = rng.gen_bool(0.5);
    let result = engine.complete_match(&mut arena, victory, &opponent, now);
    if victory {
        hero.apply(CharacterDelta::rewards(fight.rewards.xp, fight.rewards.gold));
        challenges.record_battle_win();
    }
    log::info!(
        "Arena: {} vs {} ({}), rating {} [{}], tokens {}",
        if result.victory { "won" } else { "lost" },
        opponent.name,
        opponent.class.name(),
        arena.rating,
        arena.rank().name(),
        arena.arena_tokens
    );

    // Wandering monsters
    let wanderer = generate_encounter(hero.level, &catalog, &mut rng)
        .into_iter()
        .chain(generate_boss_encounter(hero.level, &catalog, &mut rng));
    for mut encounter in wanderer {
        encounter.roll_loot(&mut rng);
        hero.apply(CharacterDelta::rewards(encounter.rewards.xp, encounter.rewards.gold));
        challenges.record_kill();
        challenges.record_damage(encounter.max_hp.max(0) as u32);
        log::info!(
            "Defeated {}{} for {} xp and {} gold",
            encounter.enemy_name,
            if encounter.is_boss { " (boss)" } else { "" },
            encounter.rewards.xp,
            encounter.rewards.gold
        );
    }

    // Dungeon
    let mut dungeons = DungeonRunEngine::load(&store);
    if let Some(dungeon) = catalog.dungeon_list().available(hero.level).first().copied() {
        if !dungeons.is_run_active() {
            dungeons.abandon_run();
            dungeons.start_run(dungeon, &hero);
        }
        while let Some(mut encounter) = dungeons.current_floor_encounter(dungeon, &catalog, hero.level) {
            let hp = dungeons.current_run.as_ref().map(|r| r.player_hp).unwrap_or(0);
            let remaining = hp - rng.gen_range(0..=encounter.attack.max(0) * 2);
            let victory = remaining > 0;
            if victory {
                encounter.roll_loot(&mut rng);
                hero.apply(CharacterDelta::rewards(encounter.rewards.xp, encounter.rewards.gold));
                challenges.record_kill();
                challenges.record_gold_earned(encounter.rewards.gold);
            }
            dungeons.complete_floor(victory, remaining, Some(&encounter.rewards));
        }
        log::info!("Dungeon status: {:?}", dungeons.status());
    }

    log::info!("Hero: level {}, {} gold, {} xp", hero.level, hero.gold, hero.xp);

    shop.save(&mut store)?;
    challenges.save(&mut store)?;
    merchant.save(&mut store)?;
    save_state(&mut store, keys::ARENA_STATS, &arena)?;
    dungeons.save(&mut store)?;

    log::info!("Questforge shut down cleanly");
    Ok(())
}
