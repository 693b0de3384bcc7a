//! Scoring module - line clear, hard drop, level and gravity rules
//!
//! - A clear of `n` lines is worth `n * line_clear_points * level`, using the
//!   level in effect before the clear is counted.
//! - Level is `lines / lines_per_level + 1`.
//! - Drop interval is `max(min, base - (level - 1) * step)`.
//! - Each hard-drop row is worth `hard_drop_points_per_row`.

use crate::types::GameConfig;

/// Score for clearing `lines` at `level`
pub fn line_clear_score(lines: u32, level: u32, points_per_line: u32) -> u32 {
    lines.saturating_mul(points_per_line).saturating_mul(level)
}

/// Score for a hard drop of `rows` rows
pub fn hard_drop_score(rows: u32, points_per_row: u32) -> u32 {
    rows.saturating_mul(points_per_row)
}

/// Level reached after `lines` total cleared lines (1-based)
pub fn level_for_lines(lines: u32, lines_per_level: u32) -> u32 {
    lines / lines_per_level.max(1) + 1
}

/// Drop interval in milliseconds for `level`
pub fn drop_interval_ms(level: u32, config: &GameConfig) -> u32 {
    let reduction = level
        .saturating_sub(1)
        .saturating_mul(config.drop_interval_step_ms);
    config
        .base_drop_interval_ms
        .saturating_sub(reduction)
        .max(config.min_drop_interval_ms)
}

/// Outcome of committing a line clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub score_delta: u32,
    pub level_before: u32,
    pub level_after: u32,
}

impl ScoreResult {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Running score, level, lines and gravity of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl Stats {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: drop_interval_ms(1, config),
        }
    }

    /// Award hard-drop points; returns the points added
    pub fn add_hard_drop(&mut self, rows: u32, config: &GameConfig) -> u32 {
        let points = hard_drop_score(rows, config.hard_drop_points_per_row);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Count `cleared` lines, score them, and recompute level and gravity
    pub fn apply_line_clear(&mut self, cleared: u32, config: &GameConfig) -> ScoreResult {
        let level_before = self.level;
        let score_delta = line_clear_score(cleared, level_before, config.line_clear_points);

        self.lines = self.lines.saturating_add(cleared);
        self.score = self.score.saturating_add(score_delta);
        self.level = level_for_lines(self.lines, config.lines_per_level);
        self.drop_interval_ms = drop_interval_ms(self.level, config);

        ScoreResult {
            score_delta,
            level_before,
            level_after: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_scales_with_level() {
        assert_eq!(line_clear_score(1, 1, 100), 100);
        assert_eq!(line_clear_score(2, 1, 100), 200);
        assert_eq!(line_clear_score(4, 3, 100), 1200);
        assert_eq!(line_clear_score(0, 5, 100), 0);
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0, 2), 0);
        assert_eq!(hard_drop_score(17, 2), 34);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0, 10), 1);
        assert_eq!(level_for_lines(9, 10), 1);
        assert_eq!(level_for_lines(10, 10), 2);
        assert_eq!(level_for_lines(95, 10), 10);
    }

    #[test]
    fn test_drop_interval_floor() {
        let cfg = GameConfig::default();
        assert_eq!(drop_interval_ms(1, &cfg), 500);
        assert_eq!(drop_interval_ms(2, &cfg), 450);
        assert_eq!(drop_interval_ms(9, &cfg), 100);
        assert_eq!(drop_interval_ms(10, &cfg), 50);
        assert_eq!(drop_interval_ms(11, &cfg), 50);
        assert_eq!(drop_interval_ms(500, &cfg), 50);
    }

    #[test]
    fn test_apply_line_clear_uses_level_before_update() {
        let cfg = GameConfig::default();
        let mut stats = Stats::new(&cfg);
        stats.lines = 8;

        let result = stats.apply_line_clear(3, &cfg);

        assert_eq!(result.score_delta, 300);
        assert_eq!(stats.lines, 11);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.drop_interval_ms, 450);
        assert!(result.leveled_up());
    }

    #[test]
    fn test_new_stats() {
        let stats = Stats::new(&GameConfig::default());
        assert_eq!(stats.score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.drop_interval_ms, 500);
    }
}
