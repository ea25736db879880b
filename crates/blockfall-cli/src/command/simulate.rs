use std::io::{self, Write as _};

use anyhow::Context;
use blockfall_engine::{GameSession, GameStats};

use crate::config::ConfigArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Stop after this many pieces even if the game is still running
    #[clap(long, default_value_t = 1000)]
    pieces: u64,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut session = arg.config.build_session()?;
    let stats = simulate(&mut session, arg.pieces);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &stats).context("Failed to write statistics")?;
    writeln!(stdout)?;
    Ok(())
}

/// Hard drops every piece where it spawns until the game ends or `limit`
/// pieces have locked.
fn simulate(session: &mut GameSession, limit: u64) -> GameStats {
    while !session.is_game_over() && session.stats().locked_pieces() < limit {
        session.hard_drop();
    }
    tracing::info!(
        score = session.score(),
        pieces = session.stats().locked_pieces(),
        game_over = session.is_game_over(),
        "simulation finished"
    );
    session.stats().clone()
}
