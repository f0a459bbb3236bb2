//! Level-based encounter scaling
//!
//! Maps a character level onto a static enemy template. The curve is linear
//! in the distance from the template's minimum level and clamped, so stats
//! stay within a fixed multiple of the template's base values and never
//! decrease as the level rises.

/// Stat growth per level above the template's minimum level
const STAT_GROWTH_PER_LEVEL: f32 = 0.10;
/// Lowest stat multiplier (character under-leveled for the template)
const MIN_STAT_MULT: f32 = 0.5;
/// Highest stat multiplier (character far above the template)
const MAX_STAT_MULT: f32 = 3.0;
/// Extra XP per character level on top of the table's guaranteed XP
const XP_PER_LEVEL: u32 = 10;
/// Extra gold per character level on top of the table's guaranteed gold
const GOLD_PER_LEVEL: u32 = 2;

/// Scaling for one template at one character level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelScaling {
    /// Effective character level (at least 1)
    pub level: u32,
    /// Lowest level the template was authored for
    pub base_level: u32,
}

impl LevelScaling {
    pub fn new(level: u32, base_level: u32) -> Self {
        Self { level: level.max(1), base_level }
    }

    /// Multiplier applied to HP, attack, and defense
    pub fn stat_multiplier(&self) -> f32 {
        let offset = self.level as f32 - self.base_level as f32;
        (1.0 + offset * STAT_GROWTH_PER_LEVEL).clamp(MIN_STAT_MULT, MAX_STAT_MULT)
    }

    /// Scale a base combat stat; any positive base stays at least 1
    pub fn scale_stat(&self, base: i32) -> i32 {
        let scaled = (base as f32 * self.stat_multiplier()).floor() as i32;
        if base > 0 {
            scaled.max(1)
        } else {
            scaled
        }
    }

    pub fn scale_xp(&self, guaranteed_xp: u32) -> u32 {
        guaranteed_xp.saturating_add(self.level.saturating_mul(XP_PER_LEVEL))
    }

    pub fn scale_gold(&self, guaranteed_gold: u32) -> u32 {
        guaranteed_gold.saturating_add(self.level.saturating_mul(GOLD_PER_LEVEL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_at_base_level() {
        let s = LevelScaling::new(5, 5);
        assert_eq!(s.stat_multiplier(), 1.0);
        assert_eq!(s.scale_stat(40), 40);
    }

    #[test]
    fn test_multiplier_is_clamped() {
        assert_eq!(LevelScaling::new(1, 20).stat_multiplier(), MIN_STAT_MULT);
        assert_eq!(LevelScaling::new(200, 1).stat_multiplier(), MAX_STAT_MULT);
    }

    #[test]
    fn test_monotonic_over_levels() {
        let mut last = (0, 0, 0);
        for level in 1..=100 {
            let s = LevelScaling::new(level, 3);
            let now = (s.scale_stat(37), s.scale_xp(15), s.scale_gold(8));
            assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            last = now;
        }
    }

    #[test]
    fn test_extreme_level_saturates() {
        let s = LevelScaling::new(u32::MAX, 1);
        assert_eq!(s.stat_multiplier(), MAX_STAT_MULT);
        assert_eq!(s.scale_stat(40), 120);
        assert_eq!(s.scale_xp(15), u32::MAX);
        assert_eq!(s.scale_gold(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_zero_level_treated_as_one() {
        assert_eq!(LevelScaling::new(0, 1).level, 1);
    }
}
