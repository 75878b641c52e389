use pagecraft_config::PagecraftConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Level from the command line, then `--verbose`, then the config file.
pub fn level_filter(
    log_level: Option<LogLevel>,
    verbose: bool,
    config: &PagecraftConfig,
) -> LevelFilter {
    if let Some(level) = log_level {
        return level.into();
    }
    if verbose {
        return LevelFilter::DEBUG;
    }
    config
        .logging
        .level
        .parse()
        .unwrap_or(LevelFilter::WARN)
}

/// Install the stderr subscriber. `RUST_LOG` directives still apply on top of
/// the chosen level.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
