use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// A program driven by [`Runtime::run`].
///
/// The runtime never advances state on its own. Time reaches the app only
/// through [`update`](Self::update), so an app that feeds `elapsed` into a
/// simulation stays correct when ticks arrive late or irregularly.
pub trait App {
    /// Called once before the first event; set the tick interval and render
    /// mode here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Checked before every event; returning `true` ends `run`.
    fn should_exit(&self) -> bool;

    /// Receives raw terminal input: keys, mouse, resize.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the app by `elapsed`, the measured time since the previous
    /// tick. It is at least the configured tick interval and may exceed it.
    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration);
}
