//! Tracing initialization shared by every agent binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for an agent process
///
/// Filter precedence: `RUST_LOG`, then `A2A_LOG_LEVEL` (a bare level such as
/// `debug`), then the level implied by `verbosity`:
///
/// - 0: info (default)
/// - 1: debug (-v)
/// - 2+: trace (-vv)
///
/// Set `LOG_FORMAT=json` for structured JSON output.
pub fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match std::env::var("A2A_LOG_LEVEL") {
            Ok(level_name) if verbosity == 0 => EnvFilter::try_new(level_name.to_lowercase())?,
            _ => EnvFilter::new(level.to_string()),
        },
    };

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
