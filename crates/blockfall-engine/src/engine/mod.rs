//! Game rules on top of the core data model.
//!
//! - [`GameConfig`] - Board size, gravity curve and scoring constants
//! - [`GameStats`] - Score, level and line counters
//! - [`GameSession`] - The state machine players and drivers talk to

pub use self::{config::*, game_session::*, game_stats::*};

mod config;
mod game_session;
mod game_stats;
