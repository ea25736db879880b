use serde::Serialize;

use super::config::GameConfig;

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// # Scoring
///
/// Each lock that clears `n` rows adds `score_table[n] * level`, using the
/// level in effect before the clear. The level is then recomputed from the
/// new line total.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameStats};
///
/// let config = GameConfig::default();
/// let mut stats = GameStats::new();
/// stats.record_lock(4, &config);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.line_clear_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    level: u32,
    cleared_lines: u32,
    locked_pieces: u64,
    line_clear_counter: [u64; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates statistics for a fresh session: level 1, everything else zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            cleared_lines: 0,
            locked_pieces: 0,
            line_clear_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this session.
    #[must_use]
    pub const fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    /// Pieces locked into the board this session.
    #[must_use]
    pub const fn locked_pieces(&self) -> u64 {
        self.locked_pieces
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of locks with 0 lines cleared
    /// - `[1]`: Number of singles (1 line)
    /// - `[2]`: Number of doubles (2 lines)
    /// - `[3]`: Number of triples (3 lines)
    /// - `[4]`: Number of quads (4 lines)
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[u64; 5] {
        &self.line_clear_counter
    }

    /// Updates statistics after a piece locks and `cleared` rows are removed.
    ///
    /// Returns `true` when the level went up.
    pub fn record_lock(&mut self, cleared: usize, config: &GameConfig) -> bool {
        self.locked_pieces += 1;
        self.line_clear_counter[cleared.min(4)] += 1;
        if cleared == 0 {
            return false;
        }

        self.score = self
            .score
            .saturating_add(config.score_table.points(cleared, self.level));
        self.cleared_lines = self
            .cleared_lines
            .saturating_add(u32::try_from(cleared).unwrap_or(u32::MAX));
        let previous = self.level;
        self.level = config.level_for_lines(self.cleared_lines);
        self.level > previous
    }
}
