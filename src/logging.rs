//! stderr log subscriber for the `showroom` binary.

use anyhow::Result;
use tracing::Level;

use crate::cli::LogLevel;

const LOG_ENV: &str = "SHOWROOM_LOG";

/// `--log-level` wins over `SHOWROOM_LOG`; without either only warnings and
/// errors are shown.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level
        .map(Level::from)
        .or_else(|| std::env::var(LOG_ENV).ok().and_then(|raw| parse_level(&raw)))
        .unwrap_or(Level::WARN);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

fn parse_level(raw: &str) -> Option<Level> {
    raw.trim().parse().ok()
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
