//! Structured logging setup.

use crate::error::{BotError, BotResult};
use armory_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// File name prefix of rolling log files.
pub const LOG_FILE_PREFIX: &str = "armory-bot.log";

/// Filter from `RUST_LOG`, else the configured level, else `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// With a log directory, output goes to daily-rolling files through a
/// non-blocking writer; the returned guard must be kept alive until exit so
/// buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> BotResult<Option<WorkerGuard>> {
    let (writer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let registry = tracing_subscriber::registry().with(env_filter(&config.level));
    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(guard.is_none())
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init()
    };
    installed.map_err(|e| BotError::Logging(e.to_string()))?;

    Ok(guard)
}
