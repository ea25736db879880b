use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// One step of the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Logic update, carrying the time elapsed since the previous tick.
    #[from(ignore)]
    Tick(Duration),
    /// A draw is due.
    Render,
    /// Raw terminal input.
    Crossterm(CrosstermEvent),
}
