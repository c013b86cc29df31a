//! Opt-in `tracing` setup for dashboards embedding `cricket-charts`.
//!
//! Decoding, aggregation and binding only emit events (`debug!` for loads and
//! bind summaries, `warn!` for skipped balls, `trace!` for cache activity).
//! Hosts usually install their own subscriber; the helpers here exist for
//! binaries and tests.

/// Filter used when `RUST_LOG` is unset: this crate at `info`, skipped-ball
/// warnings included.
pub const DEFAULT_FILTER: &str = "cricket_charts=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_owned());
    init_tracing_with_filter(&directives)
}

/// Installs a compact subscriber with explicit filter directives such as
/// `cricket_charts::charts=debug`.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let Ok(filter) = tracing_subscriber::EnvFilter::try_new(directives) else {
            return false;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
