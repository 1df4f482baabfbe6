//! Layered configuration.
//!
//! Defaults, then an optional `cartcheck` config file in the working
//! directory, then `CARTCHECK_*` environment variables
//! (e.g. `CARTCHECK_STORE__BASE_URL`, `CARTCHECK_STORE__MAX_QUANTITY`).

use serde::{Deserialize, Serialize};

use page_flow::StorePolicy;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckConfig {
    pub store: StorePolicy,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            store: StorePolicy::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl CheckConfig {
    /// Load the layered configuration.
    pub fn load() -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&CheckConfig::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("cartcheck").required(false))
            .add_source(config::Environment::with_prefix("CARTCHECK").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CheckConfig::default();
        assert_eq!(cfg.store.base_url, "http://localhost:1111");
        assert_eq!(cfg.store.max_quantity, 10);
        assert_eq!(cfg.store.timeouts.wait_ms, 10_000);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn test_load_without_file_or_env() {
        let cfg = CheckConfig::load().expect("defaults should load");
        assert_eq!(cfg.store.max_quantity, 10);
    }
}
