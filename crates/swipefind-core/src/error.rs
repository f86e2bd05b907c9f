//! Error taxonomy for synchronization and scroll-search operations.
//!
//! Every failure in this crate is one of a small set of typed conditions so
//! that callers (and the wait engine) can tell recoverable situations apart
//! from fatal ones. Only [`Error::StaleReference`] is ever retried, and only
//! by the wait engine; everything else propagates unmodified to the caller.

use thiserror::Error;

use crate::gesture::ScrollDirection;

/// Errors raised by sessions, conditions, waits and scroll-searches.
#[derive(Error, Debug)]
pub enum Error {
    /// A handle was invalidated by a screen mutation between resolution and
    /// use. Recoverable: the wait engine treats this as "not yet satisfied".
    #[error("stale element reference: {0}")]
    StaleReference(String),

    /// A condition was never satisfied within its time budget.
    #[error("condition '{condition}' not satisfied within {timeout_ms}ms (gave up after {elapsed_ms}ms)")]
    Timeout {
        /// Description of the condition that never held.
        condition: String,
        /// The configured budget in milliseconds.
        timeout_ms: u64,
        /// Elapsed time when the wait gave up.
        elapsed_ms: u64,
    },

    /// A scroll-search exhausted its attempt bound under a hard fail mode.
    #[error("did not find {target} after {attempts} scroll-{direction} attempts")]
    NotFound {
        /// The locator or handle that was being searched for.
        target: String,
        /// The direction the search was scrolling in.
        direction: ScrollDirection,
        /// How many gestures were performed before giving up.
        attempts: u32,
    },

    /// A gesture failed to execute. Fatal to the current search: a failed
    /// touch sequence implies a driver malfunction, not a retryable state.
    #[error("gesture failed: {0}")]
    Gesture(String),

    /// The automation session disconnected or crashed. Propagates through
    /// every layer, bypassing all retry loops.
    #[error("driver session failure: {0}")]
    DriverFatal(String),

    /// A locator was rejected at construction time.
    #[error("invalid locator: {0}")]
    InvalidLocator(String),

    /// A retry policy or wait parameter was rejected at construction time.
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),
}

impl Error {
    /// Returns true if the wait engine may absorb this error and keep polling.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::StaleReference(_))
    }
}
