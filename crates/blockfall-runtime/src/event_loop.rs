use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the runtime asks the app to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every interval, whether or not anything changed.
    Interval(Duration),
    /// Whenever a tick or input arrived since the last draw.
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval.
    ///
    /// Changes arriving within one interval share a single draw.
    Throttled(Duration),
}

impl RenderMode {
    /// Throttles drawing to at most `rate` frames per second.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Schedules ticks and draws between terminal input.
///
/// Without a tick interval no ticks are produced.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// No ticks, `OnDirty` drawing, and a draw pending for the first frame.
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            dirty: true,
        }
    }

    /// Pass `None` to disable tick events. The elapsed-time clock restarts so
    /// the first tick reports time measured from this call.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or draw is due or terminal input arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event that is due at `now`, if any.
    ///
    /// Ticks take priority over renders.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        let since_tick = now.saturating_duration_since(self.last_tick);
        if let Some(tick_interval) = self.tick_interval
            && since_tick >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick(since_tick));
        }

        let since_render = now.saturating_duration_since(self.last_render);
        let do_render = match self.render_mode {
            RenderMode::Interval(interval) => since_render >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => self.dirty && since_render >= interval,
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
