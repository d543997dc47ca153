//! Telemetry bootstrap: tracing subscriber with env-filtered console output.
//!
//! Call once from the owning process; library code logs through `log`/`tracing`
//! and stays silent if the host never installs a subscriber.

use anyhow::Result;

pub struct TelemetryGuard;

pub fn init(log_level: &str, json_logs: bool) -> Result<TelemetryGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if json_logs {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    tracing::info!(target: "telemetry", log_level, json_logs, "telemetry initialized");
    Ok(TelemetryGuard)
}
