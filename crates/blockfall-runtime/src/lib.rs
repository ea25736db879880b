//! Minimal terminal event loop for ratatui applications.
//!
//! [`Runtime::run`] owns the terminal and dispatches three kinds of events to
//! an [`App`]: ticks carrying the real elapsed time since the previous tick,
//! render requests, and raw crossterm input.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
