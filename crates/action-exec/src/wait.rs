//! Bounded poll-until-predicate primitive.
//!
//! Every suspension point in the workspace goes through this loop: a hard
//! deadline, a fixed poll interval, no indefinite blocks.

use std::future::Future;
use std::time::Instant;

use tokio::time::sleep;

use driver_port::DriverError;

use crate::errors::ActionError;
use crate::policy::ActionTimeouts;

/// Poll `probe` until it reports true or the deadline passes.
///
/// Probe errors propagate immediately so callers can route them into their
/// own fallback ladders; only the elapsed deadline becomes a timeout.
pub async fn poll_until<F, Fut>(
    timeouts: &ActionTimeouts,
    what: &str,
    mut probe: F,
) -> Result<(), ActionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DriverError>>,
{
    let deadline = Instant::now() + timeouts.wait();
    loop {
        if probe().await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ActionError::timeout(what, timeouts.wait_ms));
        }
        sleep(timeouts.poll()).await;
    }
}
