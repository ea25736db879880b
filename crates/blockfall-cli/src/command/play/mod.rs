use blockfall_runtime::Runtime;

use crate::config::ConfigArg;

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Hide the landing position preview
    #[clap(long)]
    no_ghost: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, no_ghost } = arg;

    let session = config.build_session()?;
    let mut app = PlayApp::new(session, !*no_ghost);
    Runtime::new().run(&mut app)?;

    let stats = app.session().stats();
    tracing::info!(
        score = stats.score(),
        level = stats.level(),
        lines = stats.cleared_lines(),
        "play finished"
    );
    Ok(())
}
