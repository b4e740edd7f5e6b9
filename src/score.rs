//! Scoring, level progression and the gravity curve

use std::time::Duration;

/// Points per lock by number of lines cleared, multiplied by the level
pub const SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity tuning. Interval at level `n` is
/// `max(min_interval, base_interval * decay_factor^(n-1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Seconds per row at level 1
    pub base_interval_secs: f64,
    /// Per-level multiplier on the interval
    pub decay_factor: f64,
    /// Floor for the interval, in seconds
    pub min_interval_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: 0.6,
            decay_factor: 0.85,
            min_interval_secs: 0.05,
        }
    }
}

impl EngineConfig {
    /// Time between gravity steps at `level`
    pub fn gravity_interval(&self, level: u32) -> Duration {
        let exponent = level.saturating_sub(1) as i32;
        let secs = self.base_interval_secs * self.decay_factor.powi(exponent);
        Duration::from_secs_f64(secs.max(self.min_interval_secs))
    }

    /// Whether every value is one the gravity curve can work with
    pub fn is_valid(&self) -> bool {
        self.base_interval_secs.is_finite()
            && self.base_interval_secs > 0.0
            && self.decay_factor.is_finite()
            && self.decay_factor > 0.0
            && self.decay_factor <= 1.0
            && self.min_interval_secs.is_finite()
            && self.min_interval_secs > 0.0
    }
}

/// Score, level and line counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Credit a lock that cleared `cleared` lines and return the points awarded.
    ///
    /// Points use the level in effect before the clear; the level is then
    /// recomputed from the new line total.
    pub fn add_clear(&mut self, cleared: usize) -> u64 {
        let base = SCORE_TABLE[cleared.min(SCORE_TABLE.len() - 1)];
        let awarded = base * self.level as u64;
        self.points += awarded;
        self.lines += cleared as u32;
        self.level = 1 + self.lines / LINES_PER_LEVEL;
        awarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_four_lines() {
        let mut score = Score::new();
        score.add_clear(4);
        assert_eq!(score.points, 800);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_no_clear_awards_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), 0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_level_multiplier_uses_level_before_clear() {
        let mut score = Score::new();
        for _ in 0..9 {
            score.add_clear(1);
        }
        assert_eq!(score.level, 1);
        // 10th line: still scored at level 1, then level becomes 2
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.level, 2);
        assert_eq!(score.add_clear(2), 600);
    }

    #[test]
    fn test_level_tracks_lines() {
        let mut score = Score::new();
        let mut last_level = score.level;
        for cleared in [1, 4, 3, 2, 4, 4, 1, 2, 3, 4, 4, 4] {
            score.add_clear(cleared);
            assert_eq!(score.level, 1 + score.lines / LINES_PER_LEVEL);
            assert!(score.level >= last_level);
            last_level = score.level;
        }
    }

    #[test]
    fn test_gravity_interval_curve() {
        let config = EngineConfig::default();
        assert_eq!(config.gravity_interval(1), Duration::from_secs_f64(0.6));
        assert_eq!(config.gravity_interval(2), Duration::from_secs_f64(0.6 * 0.85));

        let mut previous = config.gravity_interval(1);
        for level in 2..60 {
            let interval = config.gravity_interval(level);
            assert!(interval <= previous);
            assert!(interval >= Duration::from_secs_f64(config.min_interval_secs));
            previous = interval;
        }
        assert_eq!(config.gravity_interval(59), Duration::from_secs_f64(0.05));
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().is_valid());
        let bad = EngineConfig {
            decay_factor: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(!bad.is_valid());
        let negative = EngineConfig {
            min_interval_secs: -1.0,
            ..EngineConfig::default()
        };
        assert!(!negative.is_valid());
    }
}
