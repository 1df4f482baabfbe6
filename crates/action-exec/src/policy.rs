use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout policy shared by every bounded wait in the workspace.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionTimeouts {
    /// Hard deadline for one bounded wait, in milliseconds.
    pub wait_ms: u64,
    /// Interval between polls, in milliseconds.
    pub poll_ms: u64,
}

impl ActionTimeouts {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    /// Short policy for tests exercising timeout paths.
    pub fn brief() -> Self {
        Self {
            wait_ms: 50,
            poll_ms: 5,
        }
    }
}

impl Default for ActionTimeouts {
    fn default() -> Self {
        Self {
            wait_ms: 10_000,
            poll_ms: 250,
        }
    }
}
