//! Confirmation heuristic for asynchronous UI mutations.
//!
//! The rendered completion signal is sometimes suppressed or racily removed
//! before it can be observed. This crate polls the primary signal up to a
//! deadline and, when it stays absent, consults one corroborating secondary
//! signal instead of reporting a false negative. It never upgrades
//! `Inconclusive` to success on its own; that decision belongs to the
//! caller.

use std::time::Instant;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use action_exec::ActionTimeouts;
use cartcheck_core_types::Outcome;
use driver_port::DriverError;

/// One observable completion signal.
#[async_trait]
pub trait Signal: Send + Sync {
    /// Label for logs.
    fn describe(&self) -> String;

    /// Observe the signal once against the current render.
    async fn observe(&self) -> Result<bool, DriverError>;
}

/// Wait for `primary` up to the deadline, then corroborate with
/// `secondary`.
///
/// Observation errors count as signal-absent: the view may be mid-render,
/// and a transiently unreadable signal must not fail the mutation outright.
pub async fn confirm_mutation(
    primary: &dyn Signal,
    secondary: &dyn Signal,
    timeouts: &ActionTimeouts,
) -> Outcome {
    let deadline = Instant::now() + timeouts.wait();
    loop {
        match primary.observe().await {
            Ok(true) => {
                debug!(signal = %primary.describe(), "primary signal observed");
                return Outcome::Succeeded;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(
                    signal = %primary.describe(),
                    error = %err,
                    "primary signal observation failed"
                );
            }
        }
        if Instant::now() >= deadline {
            break;
        }
        sleep(timeouts.poll()).await;
    }

    match secondary.observe().await {
        Ok(true) => {
            warn!(
                primary = %primary.describe(),
                secondary = %secondary.describe(),
                "primary signal absent; mutation corroborated by secondary signal"
            );
            Outcome::SucceededViaFallback
        }
        Ok(false) => Outcome::Inconclusive,
        Err(err) => {
            warn!(
                signal = %secondary.describe(),
                error = %err,
                "secondary signal observation failed"
            );
            Outcome::Inconclusive
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use super::*;

    struct FixedSignal {
        name: &'static str,
        value: AtomicBool,
    }

    impl FixedSignal {
        fn new(name: &'static str, value: bool) -> Self {
            Self {
                name,
                value: AtomicBool::new(value),
            }
        }
    }

    #[async_trait]
    impl Signal for FixedSignal {
        fn describe(&self) -> String {
            self.name.to_string()
        }

        async fn observe(&self) -> Result<bool, DriverError> {
            Ok(self.value.load(Ordering::SeqCst))
        }
    }

    struct LateSignal {
        after_polls: u32,
        polls: AtomicU32,
    }

    #[async_trait]
    impl Signal for LateSignal {
        fn describe(&self) -> String {
            "late".to_string()
        }

        async fn observe(&self) -> Result<bool, DriverError> {
            Ok(self.polls.fetch_add(1, Ordering::SeqCst) >= self.after_polls)
        }
    }

    struct BrokenSignal;

    #[async_trait]
    impl Signal for BrokenSignal {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        async fn observe(&self) -> Result<bool, DriverError> {
            Err(DriverError::Backend("signal region unreadable".into()))
        }
    }

    #[tokio::test]
    async fn test_primary_observed_is_succeeded() {
        let primary = FixedSignal::new("primary", true);
        let secondary = FixedSignal::new("secondary", false);
        let outcome =
            confirm_mutation(&primary, &secondary, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::Succeeded);
    }

    #[tokio::test]
    async fn test_late_primary_still_succeeds() {
        let primary = LateSignal {
            after_polls: 2,
            polls: AtomicU32::new(0),
        };
        let secondary = FixedSignal::new("secondary", false);
        let outcome =
            confirm_mutation(&primary, &secondary, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::Succeeded);
    }

    #[tokio::test]
    async fn test_secondary_corroboration_is_fallback_success() {
        let primary = FixedSignal::new("primary", false);
        let secondary = FixedSignal::new("secondary", true);
        let outcome =
            confirm_mutation(&primary, &secondary, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::SucceededViaFallback);
    }

    #[tokio::test]
    async fn test_no_signal_is_inconclusive() {
        let primary = FixedSignal::new("primary", false);
        let secondary = FixedSignal::new("secondary", false);
        let outcome =
            confirm_mutation(&primary, &secondary, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::Inconclusive);
    }

    #[tokio::test]
    async fn test_observation_errors_never_upgrade_to_success() {
        let outcome =
            confirm_mutation(&BrokenSignal, &BrokenSignal, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::Inconclusive);
    }

    #[tokio::test]
    async fn test_primary_error_still_allows_corroboration() {
        let secondary = FixedSignal::new("secondary", true);
        let outcome =
            confirm_mutation(&BrokenSignal, &secondary, &ActionTimeouts::brief()).await;
        assert_eq!(outcome, Outcome::SucceededViaFallback);
    }
}
