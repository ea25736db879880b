use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, MAX_BOARD_SIDE};

/// Smallest board side that still fits every standard piece.
const MIN_BOARD_SIDE: usize = 4;

/// Points awarded per simultaneous line clear, before the level multiplier.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreTable([u64; 5]);

impl Default for ScoreTable {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl ScoreTable {
    pub const CLASSIC: Self = Self([0, 40, 100, 300, 1200]);

    #[must_use]
    pub const fn new(points: [u64; 5]) -> Self {
        Self(points)
    }

    /// Points for clearing `lines` rows at `level`.
    ///
    /// Clears larger than four rows score as four. Saturates at `u64::MAX`.
    #[must_use]
    pub fn points(&self, lines: usize, level: u32) -> u64 {
        self.0[lines.min(4)].saturating_mul(u64::from(level))
    }
}

/// Tunable constants of a game.
///
/// Every field has a default matching the classic rules, so a partial JSON
/// document only needs the values it changes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.level_for_lines(9), 1);
/// assert_eq!(config.level_for_lines(10), 2);
/// assert_eq!(config.drop_interval(1), Duration::from_millis(500));
/// assert_eq!(config.drop_interval(10), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Gravity interval at level 1.
    pub base_drop_interval_ms: u64,
    /// Interval reduction per level above 1.
    pub drop_interval_step_ms: u64,
    /// Lower bound on the gravity interval.
    pub min_drop_interval_ms: u64,
    pub max_level: u32,
    pub lines_per_level: u32,
    pub score_table: ScoreTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 10,
            board_height: 20,
            base_drop_interval_ms: 500,
            drop_interval_step_ms: 50,
            min_drop_interval_ms: 50,
            max_level: 10,
            lines_per_level: 10,
            score_table: ScoreTable::CLASSIC,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board_width, self.board_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width < MIN_BOARD_SIDE || height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall { width, height });
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width,
                height,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.min_drop_interval_ms > self.base_drop_interval_ms {
            return Err(ConfigError::DropIntervalFloorAboveBase {
                min_ms: self.min_drop_interval_ms,
                base_ms: self.base_drop_interval_ms,
            });
        }
        Ok(())
    }

    /// Level reached after clearing `total_lines` rows in total.
    #[must_use]
    pub fn level_for_lines(&self, total_lines: u32) -> u32 {
        (1 + total_lines / self.lines_per_level).min(self.max_level)
    }

    /// Gravity interval at `level`.
    #[must_use]
    pub fn drop_interval(&self, level: u32) -> Duration {
        let reduction = self
            .drop_interval_step_ms
            .saturating_mul(u64::from(level.saturating_sub(1)));
        let millis = self
            .base_drop_interval_ms
            .saturating_sub(reduction)
            .max(self.min_drop_interval_ms);
        Duration::from_millis(millis)
    }
}
