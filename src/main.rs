use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use mood_journal::config::{Args, Config};
use mood_journal::logging;
use mood_journal::seed::SeedClient;
use mood_journal::ui::{App, UI};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = Config::resolve(&args).map_err(|e| eyre!("Failed to load config: {}", e))?;
    logging::init_logging(&config.logging)?;
    tracing::info!("Mood Journal v{}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let seed = if config.seed.enabled {
        match SeedClient::new(&config.seed) {
            Ok(client) => Some(client.spawn()),
            Err(e) => {
                tracing::error!("seeding disabled: {e}");
                None
            }
        }
    } else {
        tracing::info!("seeding disabled by configuration");
        None
    };

    let mut app = App::new(seed);
    let mut ui = UI::new()?;
    ui.run(&mut app)?;

    tracing::info!(entries = app.state().len(), "journal closed");
    Ok(())
}
