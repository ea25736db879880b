use std::{mem, sync::Arc, time::Duration};

use crate::{
    ConfigError,
    core::{
        active_piece::{ActivePiece, PieceCells},
        board::Board,
        catalog::PieceCatalog,
        piece::PieceDefinition,
        piece_source::PieceSource,
    },
};

use super::{config::GameConfig, game_stats::GameStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// The active piece is falling and accepts commands.
    Falling,
    /// Terminal state; only [`GameSession::reset`] leaves it.
    GameOver,
}

/// One game: board, active and next piece, statistics and gravity timer.
///
/// The session is driven entirely through its command API:
///
/// - [`reset`](Self::reset) starts over with an empty board
/// - [`try_move`](Self::try_move) / [`try_rotate`](Self::try_rotate) apply
///   player input when the result is a valid placement
/// - [`tick`](Self::tick) applies gravity from elapsed time
/// - [`hard_drop`](Self::hard_drop) drops and locks immediately
///
/// Commands never fail. A rejected move leaves the session unchanged and
/// returns `false`; every command is a no-op once the game is over.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, PieceKind, ScriptedPieceSource};
///
/// let mut session = GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::O]));
///
/// session.tick(Duration::from_millis(300));
/// assert_eq!(session.active_piece().y(), 0);
/// session.tick(Duration::from_millis(300));
/// assert_eq!(session.active_piece().y(), 1);
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    catalog: PieceCatalog,
    source: Box<dyn PieceSource>,
    board: Board,
    active: ActivePiece,
    next: Arc<PieceDefinition>,
    stats: GameStats,
    drop_interval: Duration,
    drop_elapsed: Duration,
    state: SessionState,
}

impl GameSession {
    /// Creates a session ready to play.
    ///
    /// Fails if `config` is invalid or a piece in `catalog` is wider than the
    /// board.
    pub fn new(
        config: GameConfig,
        catalog: PieceCatalog,
        source: impl PieceSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_width, config.board_height)?;
        for definition in catalog.definitions() {
            let width = definition.max_width();
            if width > board.width() {
                return Err(ConfigError::PieceTooWide {
                    kind: definition.kind(),
                    width,
                    board_width: board.width(),
                });
            }
        }

        let mut source: Box<dyn PieceSource> = Box::new(source);
        let active = ActivePiece::spawn(catalog.spawn_definition(source.as_mut()), board.width());
        let next = catalog.spawn_definition(source.as_mut());
        let drop_interval = config.drop_interval(1);
        tracing::debug!(
            width = board.width(),
            height = board.height(),
            "session created"
        );

        Ok(Self {
            config,
            catalog,
            source,
            board,
            active,
            next,
            stats: GameStats::new(),
            drop_interval,
            drop_elapsed: Duration::ZERO,
            state: SessionState::Falling,
        })
    }

    /// Creates a session with the default configuration and standard pieces.
    #[must_use]
    pub fn with_defaults(source: impl PieceSource + 'static) -> Self {
        Self::new(GameConfig::default(), PieceCatalog::standard(), source)
            .expect("default configuration should be valid")
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active
    }

    /// Definition queued to become the active piece after the next lock.
    #[must_use]
    pub fn next_piece(&self) -> &Arc<PieceDefinition> {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.stats.level()
    }

    #[must_use]
    pub fn cleared_lines(&self) -> u32 {
        self.stats.cleared_lines()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Current gravity interval.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Where the active piece would lock if hard dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> ActivePiece {
        let mut ghost = self.active.clone();
        loop {
            let below = ghost.translated(0, 1);
            if !self.fits(&below.occupied_cells()) {
                return ghost;
            }
            ghost = below;
        }
    }

    /// Board cells the active piece would cover after a hard drop.
    #[must_use]
    pub fn ghost_cells(&self) -> PieceCells {
        self.ghost_piece().occupied_cells()
    }

    /// Starts a new game: empty board, fresh pieces, zeroed statistics.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = ActivePiece::spawn(
            self.catalog.spawn_definition(self.source.as_mut()),
            self.board.width(),
        );
        self.next = self.catalog.spawn_definition(self.source.as_mut());
        self.stats = GameStats::new();
        self.drop_interval = self.config.drop_interval(1);
        self.drop_elapsed = Duration::ZERO;
        self.state = SessionState::Falling;
        tracing::info!("session reset");
    }

    /// Moves the active piece by `(dx, dy)` if the result is valid.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        let candidate = self.active.translated(dx, dy);
        if !self.fits(&candidate.occupied_cells()) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Moves the active piece one row down if possible.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Advances the rotation index by one in place.
    ///
    /// A rotation that collides is rejected outright; no alternative
    /// positions are tried.
    pub fn try_rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let rotation = self.active.rotate_index(1);
        if !self.fits(&self.active.occupied_cells_at(rotation)) {
            return false;
        }
        self.active = self.active.with_rotation(rotation);
        true
    }

    /// Accumulates `elapsed` and applies one gravity step once the total
    /// exceeds the drop interval.
    ///
    /// A step that cannot move the piece down locks it. The accumulator
    /// restarts from zero after every step.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.is_game_over() {
            return;
        }
        self.drop_elapsed = self.drop_elapsed.saturating_add(elapsed);
        if self.drop_elapsed <= self.drop_interval {
            return;
        }
        self.drop_elapsed = Duration::ZERO;
        if !self.soft_drop() {
            self.lock_and_advance();
        }
    }

    /// Drops the active piece as far as it goes and locks it.
    pub fn hard_drop(&mut self) {
        if self.is_game_over() {
            return;
        }
        while self.soft_drop() {}
        self.lock_and_advance();
        self.drop_elapsed = Duration::ZERO;
    }

    fn fits(&self, cells: &PieceCells) -> bool {
        let width = self.board.width();
        let height = self.board.height();
        // Rows above the board are open; columns never are.
        cells.iter().all(|&(x, y)| {
            x >= 0
                && to_index(x) < width
                && (y < 0 || to_index(y) < height)
                && !self.board.is_occupied(x, y)
        })
    }

    fn lock_and_advance(&mut self) {
        let cells = self.active.occupied_cells();
        if cells.iter().any(|&(_, y)| y < 0) {
            tracing::info!(
                kind = ?self.active.kind(),
                score = self.stats.score(),
                "game over: piece locked above the board"
            );
            self.state = SessionState::GameOver;
            return;
        }

        let color = self.active.color();
        for (x, y) in cells {
            self.board.place(to_index(x), to_index(y), color);
        }
        tracing::debug!(
            kind = ?self.active.kind(),
            position = ?self.active.position(),
            "piece locked"
        );

        let cleared = self.board.clear_full_rows();
        let level_up = self.stats.record_lock(cleared, &self.config);
        if cleared > 0 {
            self.drop_interval = self.config.drop_interval(self.stats.level());
            tracing::debug!(
                cleared,
                score = self.stats.score(),
                total = self.stats.cleared_lines(),
                "rows cleared"
            );
        }
        if level_up {
            tracing::info!(
                level = self.stats.level(),
                drop_interval = ?self.drop_interval,
                "level up"
            );
        }

        let next = self.catalog.spawn_definition(self.source.as_mut());
        let promoted = mem::replace(&mut self.next, next);
        self.active = ActivePiece::spawn(promoted, self.board.width());
        tracing::debug!(kind = ?self.active.kind(), next = ?self.next.kind(), "piece spawned");

        if !self.fits(&self.active.occupied_cells()) {
            tracing::info!(
                score = self.stats.score(),
                lines = self.stats.cleared_lines(),
                "game over: no room to spawn"
            );
            self.state = SessionState::GameOver;
        }
    }
}

#[expect(clippy::cast_sign_loss)]
fn to_index(coord: i32) -> usize {
    coord as usize
}

#[cfg(test)]
mod tests {
    use crate::{Cell, Color, PieceKind, RotationLayout, ScriptedPieceSource};

    use super::*;

    fn session(kinds: &[PieceKind]) -> GameSession {
        GameSession::with_defaults(ScriptedPieceSource::new(kinds.iter().copied()))
    }

    /// Fills row `y` except the columns listed in `gaps`.
    fn fill_row_except(session: &mut GameSession, y: usize, gaps: &[usize]) {
        for x in 0..session.board.width() {
            if !gaps.contains(&x) {
                session.board.place(x, y, Color::Red);
            }
        }
    }

    #[test]
    fn test_new_session_state() {
        let session = session(&[PieceKind::T, PieceKind::S]);
        assert!(session.state().is_falling());
        assert_eq!(session.active_piece().kind(), PieceKind::T);
        assert_eq!(session.active_piece().position(), (4, 0));
        assert_eq!(session.next_piece().kind(), PieceKind::S);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.cleared_lines(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(500));
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        let result = GameSession::new(
            config,
            PieceCatalog::standard(),
            ScriptedPieceSource::new([PieceKind::I]),
        );
        assert_eq!(result.unwrap_err(), ConfigError::ZeroLinesPerLevel);
    }

    #[test]
    fn test_new_rejects_oversized_board() {
        let config = GameConfig {
            board_width: usize::MAX / 2,
            ..GameConfig::default()
        };
        let result = GameSession::new(
            config,
            PieceCatalog::standard(),
            ScriptedPieceSource::new([PieceKind::I]),
        );
        assert!(matches!(result, Err(ConfigError::BoardTooLarge { .. })));
    }

    #[test]
    fn test_new_rejects_piece_wider_than_board() {
        let layout = RotationLayout::parse(&["0000", "1111"]).unwrap();
        let def = PieceDefinition::new(PieceKind::I, Color::Cyan, vec![layout]).unwrap();
        let catalog = PieceCatalog::new(vec![def]).unwrap();
        let config = GameConfig {
            board_width: 4,
            ..GameConfig::default()
        };
        assert!(
            GameSession::new(
                config.clone(),
                catalog.clone(),
                ScriptedPieceSource::new([PieceKind::I])
            )
            .is_ok()
        );

        let layout = RotationLayout::parse(&["00000", "11110"]).unwrap();
        let def = PieceDefinition::new(PieceKind::I, Color::Cyan, vec![layout]).unwrap();
        let catalog = PieceCatalog::new(vec![def]).unwrap();
        assert_eq!(
            GameSession::new(config, catalog, ScriptedPieceSource::new([PieceKind::I]))
                .unwrap_err(),
            ConfigError::PieceTooWide {
                kind: PieceKind::I,
                width: 5,
                board_width: 4
            }
        );
    }

    #[test]
    fn test_try_move_respects_walls() {
        let mut session = session(&[PieceKind::O]);
        // O occupies columns 5..=6 at spawn.
        let mut moves_left = 0;
        while session.try_move(-1, 0) {
            moves_left += 1;
        }
        assert_eq!(moves_left, 5);
        assert_eq!(session.active_piece().x(), -1);
        assert!(session.active_piece().occupied_cells().iter().all(|&(x, _)| x >= 0));

        let mut moves_right = 0;
        while session.try_move(1, 0) {
            moves_right += 1;
        }
        assert_eq!(moves_right, 8);
        assert!(session.active_piece().occupied_cells().iter().all(|&(x, _)| x < 10));
    }

    #[test]
    fn test_try_move_respects_floor_and_blocks() {
        let mut session = session(&[PieceKind::O]);
        session.board.place(5, 10, Color::Red);

        while session.try_move(0, 1) {}
        // O bottom row sits on top of the block at row 10.
        assert_eq!(session.active_piece().y(), 8);
        let before = session.active_piece().clone();
        assert!(!session.try_move(0, 1));
        assert_eq!(session.active_piece(), &before);

        // Sliding left clears the obstacle and the piece falls to the floor.
        assert!(session.try_move(-2, 0));
        while session.try_move(0, 1) {}
        let max_y = session.active_piece().occupied_cells().iter().map(|&(_, y)| y).max();
        assert_eq!(max_y, Some(19));
    }

    #[test]
    fn test_try_rotate_cycles() {
        let mut session = session(&[PieceKind::T]);
        for expected in [1, 2, 3, 0] {
            assert!(session.try_rotate());
            assert_eq!(session.active_piece().rotation(), expected);
        }
    }

    #[test]
    fn test_try_rotate_rejected_without_kick() {
        let mut session = session(&[PieceKind::I]);
        // Vertical I lives in column x + 2; push it against the right wall.
        assert!(session.try_rotate());
        while session.try_move(1, 0) {}
        assert_eq!(session.active_piece().x(), 7);

        // Horizontal layout would need columns 7..=10, one past the wall.
        assert!(!session.try_rotate());
        assert_eq!(session.active_piece().rotation(), 1);
        assert_eq!(session.active_piece().x(), 7);
    }

    #[test]
    fn test_try_rotate_rejected_by_block() {
        let mut session = session(&[PieceKind::T]);
        // T rotation 1 needs (5, 2) relative to spawn x=4.
        session.board.place(5, 2, Color::Blue);
        assert!(!session.try_rotate());
        assert_eq!(session.active_piece().rotation(), 0);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut session = session(&[PieceKind::T]);
        session.tick(Duration::from_millis(500));
        assert_eq!(session.active_piece().y(), 0, "interval must be exceeded");
        session.tick(Duration::from_millis(1));
        assert_eq!(session.active_piece().y(), 1);

        // Accumulator restarted.
        session.tick(Duration::from_millis(499));
        assert_eq!(session.active_piece().y(), 1);
        session.tick(Duration::from_millis(2));
        assert_eq!(session.active_piece().y(), 2);
    }

    #[test]
    fn test_tick_applies_one_step_per_call() {
        let mut session = session(&[PieceKind::T]);
        session.tick(Duration::from_secs(10));
        assert_eq!(session.active_piece().y(), 1);
    }

    #[test]
    fn test_tick_saturates_huge_elapsed() {
        let mut session = session(&[PieceKind::T]);
        session.tick(Duration::from_millis(100));
        session.tick(Duration::MAX);
        assert_eq!(session.active_piece().y(), 1);

        // The accumulator restarted at zero after the step.
        session.tick(Duration::MAX);
        assert_eq!(session.active_piece().y(), 2);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut session = session(&[PieceKind::O, PieceKind::T]);
        while session.soft_drop() {}
        session.tick(Duration::from_millis(501));

        assert_eq!(session.active_piece().kind(), PieceKind::T);
        assert_eq!(session.stats().locked_pieces(), 1);
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(session.board().cell(5, 19), Some(Cell::Filled(Color::Yellow)));
    }

    #[test]
    fn test_hard_drop_locks_at_bottom() {
        let mut session = session(&[PieceKind::T, PieceKind::O]);
        session.hard_drop();

        let board = session.board();
        // T at x=4: nub at (5, 18), base at 4..=6 on row 19.
        for (x, y) in [(5, 18), (4, 19), (5, 19), (6, 19)] {
            assert_eq!(board.cell(x, y), Some(Cell::Filled(Color::Magenta)));
        }
        assert_eq!(board.filled_count(), 4);
        assert_eq!(session.active_piece().kind(), PieceKind::O);
        assert_eq!(session.active_piece().position(), (4, 0));
        assert_eq!(session.next_piece().kind(), PieceKind::T);
    }

    #[test]
    fn test_hard_drop_resets_gravity_timer() {
        let mut session = session(&[PieceKind::O]);
        session.tick(Duration::from_millis(400));
        session.hard_drop();
        session.tick(Duration::from_millis(400));
        assert_eq!(session.active_piece().y(), 0);
    }

    #[test]
    fn test_single_line_clear_scores_by_level() {
        let mut session = session(&[PieceKind::I, PieceKind::O]);
        fill_row_except(&mut session, 19, &[3, 4, 5, 6]);
        session.board.place(0, 18, Color::Blue);

        // Horizontal I spawns in columns 3..=6 with cells on layout row 1.
        session.hard_drop();

        assert_eq!(session.cleared_lines(), 1);
        assert_eq!(session.score(), 40);
        assert_eq!(session.board().filled_count(), 1);
        assert_eq!(session.board().cell(0, 19), Some(Cell::Filled(Color::Blue)));
    }

    #[test]
    fn test_four_line_clear_at_higher_level() {
        let mut session = session(&[PieceKind::I]);
        session.stats = {
            let mut stats = GameStats::new();
            for _ in 0..10 {
                stats.record_lock(1, &session.config);
            }
            stats
        };
        assert_eq!(session.level(), 2);
        let base_score = session.score();

        for y in 16..20 {
            fill_row_except(&mut session, y, &[9]);
        }
        assert!(session.try_rotate());
        while session.try_move(1, 0) {}
        // Vertical I occupies column x + 2 = 9.
        assert_eq!(session.active_piece().x(), 7);
        session.hard_drop();

        assert_eq!(session.score() - base_score, 1200 * 2);
        assert_eq!(session.cleared_lines(), 14);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_level_up_shortens_drop_interval() {
        let mut session = session(&[PieceKind::I]);
        for _ in 0..9 {
            session.stats.record_lock(1, &session.config);
        }
        assert_eq!(session.level(), 1);

        fill_row_except(&mut session, 19, &[3, 4, 5, 6]);
        session.hard_drop();

        assert_eq!(session.cleared_lines(), 10);
        assert_eq!(session.level(), 2);
        assert_eq!(session.drop_interval(), Duration::from_millis(450));
    }

    #[test]
    fn test_lock_above_board_sets_game_over_without_writing() {
        let mut session = session(&[PieceKind::T]);
        session.active = session.active.translated(0, -1);
        let board_before = session.board().clone();

        session.lock_and_advance();

        assert!(session.is_game_over());
        assert_eq!(session.board(), &board_before);
        assert_eq!(session.stats().locked_pieces(), 0);
    }

    #[test]
    fn test_spawn_collision_tops_out() {
        let mut session = session(&[PieceKind::O]);
        // Leave the O landing spot open but block the spawn cells.
        session.board.place(5, 1, Color::Red);
        session.active = session.active.translated(-4, 0);
        session.hard_drop();

        assert!(session.is_game_over());
        assert_eq!(session.stats().locked_pieces(), 1);
    }

    #[test]
    fn test_game_over_commands_are_no_ops() {
        let mut session = session(&[PieceKind::O]);
        session.state = SessionState::GameOver;
        let active = session.active_piece().clone();

        assert!(!session.try_move(1, 0));
        assert!(!session.try_move(0, 1));
        assert!(!session.try_rotate());
        session.tick(Duration::from_secs(5));
        session.hard_drop();

        assert_eq!(session.active_piece(), &active);
        assert!(session.board().is_empty());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = session(&[PieceKind::I, PieceKind::O, PieceKind::T]);
        fill_row_except(&mut session, 19, &[3, 4, 5, 6]);
        session.hard_drop();
        session.hard_drop();
        session.state = SessionState::GameOver;

        session.reset();

        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.cleared_lines(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.stats().locked_pieces(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(500));
        assert!(session.board().is_empty());
        assert_eq!(session.active_piece().y(), 0);
        assert_eq!(session.active_piece().rotation(), 0);
    }

    #[test]
    fn test_ghost_piece_matches_hard_drop() {
        let mut session = session(&[PieceKind::S, PieceKind::Z]);
        session.board.place(4, 12, Color::Red);
        let ghost = session.ghost_piece();
        let expected: Vec<_> = ghost.occupied_cells().into_iter().collect();

        session.hard_drop();
        for (x, y) in expected {
            assert_eq!(
                session.board().cell(x, y),
                Some(Cell::Filled(Color::Green))
            );
        }
    }
}
