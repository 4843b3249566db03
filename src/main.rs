//! Salud del Corazón: cardiovascular-risk terminal client
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use saludcorazon::adapters::sanitize::SanitizingMakeWriter;
use saludcorazon::config::ClientConfig;
use saludcorazon::tui::App;

fn main() -> Result<()> {
    let config = ClientConfig::from_env()?;

    // Writing logs to the terminal would corrupt the TUI (alternate screen),
    // so an interactive run logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        tracing_appender::non_blocking(config.open_log_file()?)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Salud del Corazón...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Shutdown complete.");
    Ok(())
}
