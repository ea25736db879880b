use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockfall_engine::{GameConfig, GameSession, PieceCatalog, RandomPieceSource};

/// Game configuration options shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// JSON file with game configuration (missing fields use defaults)
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Board width in cells, overriding the configuration file
    #[clap(long)]
    width: Option<usize>,
    /// Board height in cells, overriding the configuration file
    #[clap(long)]
    height: Option<usize>,
    /// Seed for the piece generator (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

impl ConfigArg {
    /// Loads the configuration file, if any, and applies flag overrides.
    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        Ok(config)
    }

    pub(crate) fn piece_source(&self) -> RandomPieceSource {
        self.seed
            .map_or_else(RandomPieceSource::new, RandomPieceSource::with_seed)
    }

    pub(crate) fn build_session(&self) -> anyhow::Result<GameSession> {
        let config = self.game_config()?;
        tracing::info!(?config, seed = ?self.seed, "starting session");
        GameSession::new(config, PieceCatalog::standard(), self.piece_source())
            .context("Invalid game configuration")
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse config JSON file: {}", path.display()))
}
