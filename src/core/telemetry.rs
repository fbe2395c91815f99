//! Tracing subscriber setup for binaries and tests
//!
//! The library itself only emits `tracing` events; hosts that already
//! install a subscriber never need to call this.

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::types::TelemetryError;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Install a fmt subscriber writing to stderr, filtered by `RUST_LOG`
/// or `default_filter`. Only the first call has any effect.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryError> {
    INITIALISED
        .set(())
        .map_err(|_| TelemetryError::AlreadyInitialised)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| TelemetryError::Filter {
            filter: default_filter.to_string(),
            message: e.to_string(),
        })?,
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Install(e.to_string()))
}
