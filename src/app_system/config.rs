use tracing::warn;

pub const CHANNEL_CAPACITY_VAR: &str = "RECIPE_CATALOG_CHANNEL_CAPACITY";
pub const LOG_FILTER_VAR: &str = "RECIPE_CATALOG_LOG";

/// An environment override that could not be used and was replaced by the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub var: &'static str,
    pub value: String,
}

/// Startup knobs for [`CatalogSystem`](super::CatalogSystem).
///
/// Configuration is read before any subscriber exists, so rejected values are
/// collected in `ignored` and logged by [`SystemConfig::report_ignored`] once
/// tracing is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Mailbox size of the catalog actor.
    pub channel_capacity: usize,
    /// Filter used when `RUST_LOG` is not set.
    pub default_log_filter: String,
    pub ignored: Vec<IgnoredOverride>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            default_log_filter: "info".to_string(),
            ignored: Vec::new(),
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`. Unusable values keep the default and
    /// are recorded in `ignored`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CHANNEL_CAPACITY_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.channel_capacity = capacity,
                _ => config.ignore(CHANNEL_CAPACITY_VAR, raw),
            }
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            if filter.trim().is_empty() {
                config.ignore(LOG_FILTER_VAR, filter);
            } else {
                config.default_log_filter = filter;
            }
        }

        config
    }

    fn ignore(&mut self, var: &'static str, value: String) {
        self.ignored.push(IgnoredOverride { var, value });
    }

    /// Logs every rejected override. Call after [`setup_tracing`](super::setup_tracing).
    pub fn report_ignored(&self) -> usize {
        for IgnoredOverride { var, value } in &self.ignored {
            warn!(var = %var, value = %value, "Ignoring invalid configuration override");
        }
        self.ignored.len()
    }
}
