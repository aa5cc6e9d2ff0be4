//! Logging setup for the runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// the rendered grid and summary.
///
/// `RUST_LOG` controls filtering; `PREDPREY_LOG_FORMAT=json` switches to
/// structured JSON lines.
pub fn init_telemetry() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,predprey_world=info".into());

    let json = matches!(std::env::var("PREDPREY_LOG_FORMAT").as_deref(), Ok("json"));
    let (json_layer, text_layer) = if json {
        (
            Some(fmt::layer().json().with_target(true).with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    info!(json = json, "Telemetry initialized");
    Ok(())
}
