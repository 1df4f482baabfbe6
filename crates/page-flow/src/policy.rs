use serde::{Deserialize, Serialize};

use action_exec::ActionTimeouts;

/// Storefront-level policy for the workflow views.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorePolicy {
    /// Base URL of the store under verification.
    pub base_url: String,
    /// Per-line quantity maximum enforced by the store; requests beyond it
    /// are clamped, never rejected.
    pub max_quantity: u32,
    pub timeouts: ActionTimeouts,
}

impl StorePolicy {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn clamp_quantity(&self, requested: u32) -> u32 {
        requested.clamp(1, self.max_quantity)
    }
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1111".to_string(),
            max_quantity: 10,
            timeouts: ActionTimeouts::default(),
        }
    }
}
