use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing::Level;

/// Diagnostic logging options.
///
/// The terminal belongs to the play screen, so logs only go to a file.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write diagnostic logs to this file
    #[clap(long, value_name = "PATH", global = true)]
    pub(crate) log_file: Option<PathBuf>,
    /// Minimum level written to the log file
    #[clap(long, default_value_t = Level::INFO, global = true)]
    pub(crate) log_level: Level,
}

impl LogArg {
    /// Installs the global subscriber when a log file was requested.
    pub(crate) fn init(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(())
    }
}
