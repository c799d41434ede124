use std::sync::Arc;
use tickboard::tui::{run_tui, LogBuffer, LogMakeWriter};
use tickboard::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    // Logs go to an in-memory buffer so they don't corrupt the alternate screen
    let logs = Arc::new(LogBuffer::new(500));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(LogMakeWriter::new(logs.clone())),
        )
        .init();

    info!(
        "Starting tickboard (tick {}ms, options {}ms, seed {:?})",
        config.tick_ms, config.options_tick_ms, config.seed
    );

    // Single-threaded: every tick handler runs to completion before the next fires
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_tui(config, logs))?;

    Ok(())
}
