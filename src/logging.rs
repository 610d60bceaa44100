//! Tracing setup for the gateway binary.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// Structured JSON, one object per line.
    Json,
}

/// Builds the env filter, honouring `RUST_LOG` when it is set.
fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sheets_gateway={}", default_level))
    })
}

/// Installs the global tracing subscriber.
///
/// Call once at startup. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(
    format: LogFormat,
    default_level: Level,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = env_filter(default_level);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().pretty().with_target(true)),
        ),
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().compact().with_target(true)),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .json()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true),
            ),
        ),
    }
}
