//! Bounded polling: evaluate a condition until it holds or time runs out.
//!
//! The engine distinguishes three outcomes per evaluation:
//!
//! - the condition produced a value: return it;
//! - the condition is not yet satisfied, or its target went stale mid-poll
//!   ([`Error::StaleReference`]): sleep and retry within the budget;
//! - any other error: fatal, propagated immediately without further polling.
//!
//! A zero timeout performs exactly one evaluation. When no evaluation
//! succeeds, the wait fails at elapsed >= timeout and, assuming prompt
//! evaluation, before timeout + poll_interval.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::trace;

use crate::error::Error;
use crate::session::Session;

/// A predicate over current session state.
///
/// `poll` returns `Ok(Some(value))` once the condition holds, `Ok(None)`
/// while it does not yet, and an error for anything that is not a clean
/// "not yet". Raising [`Error::StaleReference`] tells the wait engine the
/// target vanished between resolution and evaluation, which is retryable;
/// every other error aborts the wait.
#[async_trait]
pub trait Condition: Send + Sync {
    /// What a successful evaluation yields.
    type Output: Send;

    /// Evaluates the condition against the session's current state.
    async fn poll(&self, session: &Session) -> Result<Option<Self::Output>, Error>;

    /// Human-readable description, used in timeout errors.
    fn describe(&self) -> String;
}

/// Polls `condition` until it yields a value or `timeout` elapses.
///
/// The first evaluation happens immediately. `poll_interval` must be
/// positive; a zero `timeout` means a single evaluation.
pub async fn wait_until<C>(
    session: &Session,
    condition: &C,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<C::Output, Error>
where
    C: Condition + ?Sized,
{
    if poll_interval.is_zero() {
        return Err(Error::InvalidPolicy(
            "poll interval must be positive".to_string(),
        ));
    }

    let start = Instant::now();
    loop {
        match condition.poll(session).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(err) if err.is_retryable() => {
                trace!(condition = %condition.describe(), error = %err, "stale during poll, retrying");
            }
            Err(err) => return Err(err),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(Error::Timeout {
                condition: condition.describe(),
                timeout_ms: timeout.as_millis() as u64,
                elapsed_ms: elapsed.as_millis() as u64,
            });
        }
        sleep(poll_interval).await;
    }
}
