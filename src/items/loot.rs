//! Loot tables and drop rolling
//!
//! Every entry in a table is an independent trial: the order of entries has
//! no effect on what drops, and several entries can drop from one roll.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::item::Item;

/// A single entry in a loot table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: Item,
    /// Probability in `[0, 1]`. Anything at or above 1.0 always drops.
    pub drop_chance: f64,
    #[serde(default = "one")]
    pub min_quantity: u32,
    #[serde(default = "one")]
    pub max_quantity: u32,
}

fn one() -> u32 {
    1
}

fn no_bonus() -> RangeInclusive<u32> {
    0..=0
}

impl LootEntry {
    pub fn new(item: Item, drop_chance: f64) -> Self {
        Self { item, drop_chance, min_quantity: 1, max_quantity: 1 }
    }

    /// Builder: quantity range for a successful drop
    pub fn with_quantity(mut self, min: u32, max: u32) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }
}

/// Drop table owned by an enemy template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    #[serde(default)]
    pub entries: Vec<LootEntry>,
    #[serde(default)]
    pub guaranteed_gold: u32,
    #[serde(default)]
    pub guaranteed_xp: u32,
    #[serde(default = "no_bonus")]
    pub bonus_gold_range: RangeInclusive<u32>,
}

impl Default for LootTable {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            guaranteed_gold: 0,
            guaranteed_xp: 0,
            bonus_gold_range: no_bonus(),
        }
    }
}

/// Outcome of a single roll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LootRoll {
    pub gold: u32,
    pub xp: u32,
    pub items: Vec<(Item, u32)>,
}

impl LootRoll {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.xp == 0 && self.items.is_empty()
    }
}

/// Uniform pick from an inclusive range; inverted ranges collapse to the start
fn pick(range: &RangeInclusive<u32>, rng: &mut impl Rng) -> u32 {
    let (low, high) = (*range.start(), *range.end());
    if high <= low {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

impl LootTable {
    /// Roll the table once
    pub fn roll(&self, rng: &mut impl Rng) -> LootRoll {
        let gold = self.guaranteed_gold.saturating_add(pick(&self.bonus_gold_range, rng));
        let xp = self.guaranteed_xp;

        let mut items = Vec::new();
        for entry in &self.entries {
            let draw: f64 = rng.gen();
            if draw < entry.drop_chance {
                let quantity = pick(&(entry.min_quantity..=entry.max_quantity), rng);
                items.push((entry.item.clone(), quantity));
            }
        }

        log::debug!("Loot roll: {} gold, {} xp, {} item stacks", gold, xp, items.len());
        LootRoll { gold, xp, items }
    }
}

/// Roll a table; free-function form for call sites that hold only a reference
pub fn roll(table: &LootTable, rng: &mut impl Rng) -> LootRoll {
    table.roll(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemType, Rarity};
    use crate::rng::SeededRng;

    fn material(id: &str) -> Item {
        Item::new(id, id, ItemType::Material, Rarity::Common)
    }

    #[test]
    fn test_guaranteed_and_bonus_gold() {
        let table = LootTable {
            entries: Vec::new(),
            guaranteed_gold: 5,
            guaranteed_xp: 10,
            bonus_gold_range: 2..=8,
        };
        let mut rng = SeededRng::seed(12345);
        for _ in 0..500 {
            let roll = table.roll(&mut rng);
            assert_eq!(roll.xp, 10);
            assert!((7..=13).contains(&roll.gold), "gold out of range: {}", roll.gold);
            assert!(roll.items.is_empty());
        }
    }

    #[test]
    fn test_certain_and_impossible_entries() {
        let table = LootTable {
            entries: vec![
                LootEntry::new(material("always"), 1.0),
                LootEntry::new(material("never"), 0.0),
            ],
            ..LootTable::default()
        };
        let mut rng = SeededRng::seed(1);
        for _ in 0..500 {
            let roll = table.roll(&mut rng);
            assert_eq!(roll.items.len(), 1);
            assert_eq!(roll.items[0].0.template_id, "always");
        }
    }

    #[test]
    fn test_over_one_always_drops() {
        let table = LootTable {
            entries: vec![LootEntry::new(material("legendary_core"), 1.5)],
            ..LootTable::default()
        };
        let mut rng = SeededRng::seed(77);
        for _ in 0..100 {
            assert_eq!(table.roll(&mut rng).items.len(), 1);
        }
    }

    #[test]
    fn test_quantity_within_bounds() {
        let table = LootTable {
            entries: vec![LootEntry::new(material("ore"), 1.0).with_quantity(2, 4)],
            ..LootTable::default()
        };
        let mut rng = SeededRng::seed(8);
        for _ in 0..200 {
            let roll = table.roll(&mut rng);
            let qty = roll.items[0].1;
            assert!((2..=4).contains(&qty));
        }
    }

    #[test]
    fn test_entries_are_independent() {
        // Two 50% entries: both dropping together must happen sometimes
        let table = LootTable {
            entries: vec![
                LootEntry::new(material("a"), 0.5),
                LootEntry::new(material("b"), 0.5),
            ],
            ..LootTable::default()
        };
        let mut rng = SeededRng::seed(2024);
        let both = (0..1000).filter(|_| table.roll(&mut rng).items.len() == 2).count();
        assert!(both > 100, "expected joint drops, got {}", both);
    }
}
