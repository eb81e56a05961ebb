//! Logging initialization
//!
//! Logs always go to stderr so command output on stdout stays pipeable.
//! `RUST_LOG` takes precedence over `--verbose`.

use tracing::debug;
use tracing_subscriber::{
    Registry, filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{CliError, CliResult};

/// Default filter directive
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter directive with `--verbose`
pub const VERBOSE_LEVEL: &str = "debug";

/// Filter directive for the given verbosity
pub fn level(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns [`CliError::Logging`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init(verbose: bool, json: bool) -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level(verbose)))
        .map_err(|e| CliError::Logging(format!("Invalid log level: {e}")))?;

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))?;
    }

    debug!(verbose, json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_selection() {
        assert_eq!(level(false), "warn");
        assert_eq!(level(true), "debug");
    }
}
