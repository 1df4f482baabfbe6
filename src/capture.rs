//! Failure-capture boundary.
//!
//! Capturing diagnostic state on scenario failure belongs to the
//! orchestration layer, not to this core; the core only fixes the shape of
//! the collaborator. Implementations hold their own session handle and
//! receive just a label for the failed scenario.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failure capture failed: {0}")]
    Io(String),
}

/// Saves a diagnostic artifact for a failed scenario.
#[async_trait]
pub trait FailureCapture: Send + Sync {
    /// Capture the current session state under `label`; returns the saved
    /// artifact path.
    async fn capture(&self, label: &str) -> Result<PathBuf, CaptureError>;
}

/// Timestamped artifact name for a scenario label.
pub fn artifact_name(label: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{label}_{timestamp}.png")
}
