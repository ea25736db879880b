//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - Static piece definitions, the board grid, the active piece and
//!   the injectable piece sources.
//! - [`engine`] - Configuration, statistics and the [`GameSession`] state
//!   machine that drives a game through its command API.
//!
//! Nothing here touches the terminal or the clock. The driver feeds elapsed
//! durations into [`GameSession::tick`] and reads the session back for
//! rendering.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, PieceKind, ScriptedPieceSource};
//!
//! let mut session =
//!     GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::I, PieceKind::O]));
//!
//! assert!(session.try_move(-1, 0));
//! assert!(session.try_rotate());
//! session.hard_drop();
//!
//! assert!(!session.board().is_empty());
//! assert_eq!(session.active_piece().kind(), PieceKind::O);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Malformed piece or catalog definition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DefinitionError {
    #[display("rotation layout has no cells")]
    EmptyLayout,
    #[display("rotation layout row {row} is {found} cells wide, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("rotation layout contains {cell:?}, expected '0' or '1'")]
    InvalidCell { cell: char },
    #[display("rotation layout has {found} occupied cells, expected 4")]
    CellCount { found: usize },
    #[display("piece {kind:?} has no rotation layouts")]
    NoLayouts { kind: PieceKind },
    #[display("piece catalog is empty")]
    EmptyCatalog,
    #[display("piece {kind:?} is defined more than once")]
    DuplicateKind { kind: PieceKind },
}

/// Invalid board or game configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board dimensions {width}x{height} must be non-zero")]
    EmptyBoard { width: usize, height: usize },
    #[display("board dimensions {width}x{height} are too small, at least 4x4 is required")]
    BoardTooSmall { width: usize, height: usize },
    #[display("board dimensions {width}x{height} exceed the {max}x{max} limit")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[display("lines_per_level must be positive")]
    ZeroLinesPerLevel,
    #[display("max_level must be at least 1")]
    ZeroMaxLevel,
    #[display("min drop interval ({min_ms}ms) exceeds base drop interval ({base_ms}ms)")]
    DropIntervalFloorAboveBase { min_ms: u64, base_ms: u64 },
    #[display("piece {kind:?} is {width} cells wide but the board has {board_width} columns")]
    PieceTooWide {
        kind: PieceKind,
        width: usize,
        board_width: usize,
    },
}
