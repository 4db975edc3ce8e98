use tracing::warn;
use tracing_subscriber::EnvFilter;

use super::SystemConfig;

/// Installs the process-wide subscriber. Call once, before starting the system.
///
/// `RUST_LOG` wins when set; otherwise the configured default filter applies.
/// Overrides the config rejected while it was being read are logged here,
/// since nothing could record them earlier.
pub fn setup_tracing(config: &SystemConfig) {
    let mut bad_filter = None;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.default_log_filter).unwrap_or_else(|e| {
            bad_filter = Some(e);
            EnvFilter::new("info")
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    if let Some(e) = bad_filter {
        warn!(filter = %config.default_log_filter, error = %e, "Unusable log filter, falling back to info");
    }
    config.report_ignored();
}
