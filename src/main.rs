//! Entry point and runtime setup.

use anyhow::Result;
use std::{path::PathBuf, str::FromStr};
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod config;
mod input;
mod layout;
mod machine;
mod notes;
mod pages;
mod selectable;
mod session;
mod shortcuts;
mod store;
mod surface;
mod ui;

use config::{Config, LogCfg};

/// Initialise file logging and keep the writer guard alive.
fn init_logging(log: &LogCfg) -> Result<WorkerGuard> {
    // Write to a file so the TUI owns stdout.
    let file_appender = tracing_appender::rolling::never(".", &log.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let level = tracing::Level::from_str(&log.level)
        .map_err(|e| anyhow::anyhow!("invalid log level {:?}: {e}", log.level))?;
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log.file);
    Ok(guard)
}

#[tokio::main]
/// Load config, start logging, run the pages, restore the terminal.
async fn main() -> Result<()> {
    let cfg = Config::load_or_default(&PathBuf::from("config.toml"))?;
    let _log_guard = init_logging(&cfg.log)?;
    tracing::info!("app starting");

    let terminal = ui::init_terminal()?;
    let res = app::run_app(terminal, &cfg).await;
    // Always restore the terminal, even on error.
    let restored = ui::restore_terminal();
    let res = finish(res, restored);
    tracing::info!("app exiting");
    res
}

/// Log both outcomes; the run error takes precedence over a restore error.
fn finish(res: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    if let Err(ref e) = restored {
        tracing::error!("terminal restore failed: {e}");
    }
    res.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_keeps_run_error_when_restore_fails() {
        let err = finish(
            Err(anyhow::anyhow!("store unreadable")),
            Err(anyhow::anyhow!("tty gone")),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "store unreadable");
    }

    #[test]
    fn test_finish_reports_restore_error_after_clean_run() {
        let err = finish(Ok(()), Err(anyhow::anyhow!("tty gone"))).unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
