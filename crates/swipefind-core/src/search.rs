//! Scroll-search: bounded gesture-and-check loops for off-screen elements.
//!
//! All variants (locate by locator, bring a known handle into view, detect a
//! growing list) share one loop: probe the current screen through the wait
//! engine, and if the probe's per-attempt budget expires, compose one scroll
//! from a fresh viewport snapshot, execute it, and try again, up to the
//! policy's attempt bound. What differs between variants is only the
//! termination predicate (a [`Condition`]) and the failure policy.

use std::time::Duration;

use tracing::{debug, info_span, Instrument};

use crate::conditions;
use crate::element::ElementHandle;
use crate::error::Error;
use crate::gesture::{self, ScrollDirection};
use crate::locator::Locator;
use crate::session::Session;
use crate::wait::{self, Condition};

/// Poll interval used by the policy builders.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What exhausting the attempt bound means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    /// Exhaustion is an answer: report "not found" without raising.
    Soft,
    /// Exhaustion is a failure: raise [`Error::NotFound`].
    Hard,
}

/// Bounds and timing governing a scroll-search loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    per_attempt_timeout: Duration,
    poll_interval: Duration,
    fail_mode: FailMode,
}

impl RetryPolicy {
    /// Creates a policy, rejecting a zero attempt bound or poll interval.
    ///
    /// A zero `per_attempt_timeout` is valid and means each attempt performs
    /// a single immediate check before scrolling on.
    pub fn new(
        max_attempts: u32,
        per_attempt_timeout: Duration,
        poll_interval: Duration,
        fail_mode: FailMode,
    ) -> Result<Self, Error> {
        if max_attempts == 0 {
            return Err(Error::InvalidPolicy(
                "max_attempts must be positive".to_string(),
            ));
        }
        if poll_interval.is_zero() {
            return Err(Error::InvalidPolicy(
                "poll interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            per_attempt_timeout,
            poll_interval,
            fail_mode,
        })
    }

    /// A hard-failing policy with single immediate checks per attempt.
    pub fn hard(max_attempts: u32) -> Result<Self, Error> {
        Self::new(
            max_attempts,
            Duration::ZERO,
            DEFAULT_POLL_INTERVAL,
            FailMode::Hard,
        )
    }

    /// A soft-failing policy with single immediate checks per attempt.
    pub fn soft(max_attempts: u32) -> Result<Self, Error> {
        Self::new(
            max_attempts,
            Duration::ZERO,
            DEFAULT_POLL_INTERVAL,
            FailMode::Soft,
        )
    }

    /// Gives each attempt a settle budget: the probe keeps polling for this
    /// long before the loop scrolls on.
    pub fn with_per_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.per_attempt_timeout = timeout;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn per_attempt_timeout(&self) -> Duration {
        self.per_attempt_timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn fail_mode(&self) -> FailMode {
        self.fail_mode
    }
}

/// The shared loop skeleton.
///
/// Dismisses the keyboard so gestures land on true content coordinates, then
/// alternates probe and scroll until the probe hits or the bound is reached.
/// Gesture and session failures abort immediately; per-attempt timeouts from
/// the wait engine are the loop's "keep scrolling" signal.
async fn scroll_search<C>(
    session: &Session,
    condition: &C,
    direction: ScrollDirection,
    policy: &RetryPolicy,
) -> Result<Option<C::Output>, Error>
where
    C: Condition,
{
    session.hide_keyboard().await?;

    let mut attempts = 0u32;
    while attempts < policy.max_attempts {
        match wait::wait_until(
            session,
            condition,
            policy.per_attempt_timeout,
            policy.poll_interval,
        )
        .await
        {
            Ok(hit) => {
                debug!(attempts, "scroll-search hit");
                return Ok(Some(hit));
            }
            Err(Error::Timeout { .. }) => {}
            Err(err) => return Err(err),
        }

        // Fresh snapshot per gesture: the viewport may have changed.
        let geometry = session.window_size().await?;
        let spec = gesture::vertical_scroll(geometry, direction);
        session.perform_gesture(&spec).await?;
        attempts += 1;
    }

    debug!(attempts, "scroll-search exhausted");
    Ok(None)
}

impl Session {
    /// Scrolls in `direction` until an element matches `locator`.
    ///
    /// Performs at most `policy.max_attempts()` gestures. On exhaustion a
    /// soft policy yields `Ok(None)` and a hard policy raises
    /// [`Error::NotFound`] naming the locator, direction and attempt count.
    pub async fn locate_by_scrolling(
        &self,
        locator: &Locator,
        direction: ScrollDirection,
        policy: &RetryPolicy,
    ) -> Result<Option<ElementHandle>, Error> {
        let span = info_span!("locate_by_scrolling", target = %locator, direction = %direction);
        async {
            let condition = conditions::present(locator.clone());
            match scroll_search(self, &condition, direction, policy).await? {
                Some(handle) => Ok(Some(handle)),
                None => match policy.fail_mode() {
                    FailMode::Soft => Ok(None),
                    FailMode::Hard => Err(Error::NotFound {
                        target: locator.to_string(),
                        direction,
                        attempts: policy.max_attempts(),
                    }),
                },
            }
        }
        .instrument(span)
        .await
    }

    /// Scrolls until an already-resolved element reports itself displayed.
    ///
    /// Useful when the handle is known but off-screen. Stale polls count as
    /// "not yet visible" and the search keeps scrolling. Returns whether the
    /// element became visible; a hard policy raises [`Error::NotFound`]
    /// instead of returning `false`.
    pub async fn scroll_into_view(
        &self,
        handle: &ElementHandle,
        direction: ScrollDirection,
        policy: &RetryPolicy,
    ) -> Result<bool, Error> {
        let span = info_span!("scroll_into_view", target = %handle, direction = %direction);
        async {
            let condition = conditions::visible(handle.clone());
            match scroll_search(self, &condition, direction, policy).await? {
                Some(()) => Ok(true),
                None => match policy.fail_mode() {
                    FailMode::Soft => Ok(false),
                    FailMode::Hard => Err(Error::NotFound {
                        target: handle.to_string(),
                        direction,
                        attempts: policy.max_attempts(),
                    }),
                },
            }
        }
        .instrument(span)
        .await
    }

    /// Scrolls down until the locator's match count grows past its current
    /// value, detecting infinite-scroll content.
    ///
    /// Never raises on exhaustion: returns whether the list grew within
    /// `max_attempts` gestures, and the caller decides what that means.
    pub async fn scroll_while_list_grows(
        &self,
        locator: &Locator,
        max_attempts: u32,
    ) -> Result<bool, Error> {
        let span = info_span!("scroll_while_list_grows", target = %locator);
        async {
            let baseline = self.resolve_all(locator).await?.len();
            let policy = RetryPolicy::soft(max_attempts)?;
            let condition = conditions::list_grown(locator.clone(), baseline);
            let grown = scroll_search(self, &condition, ScrollDirection::Down, &policy)
                .await?
                .is_some();
            debug!(baseline, grown, "growing-list search finished");
            Ok(grown)
        }
        .instrument(span)
        .await
    }

    /// Scrolls down until the locator matches, failing hard after the
    /// configured bound.
    pub async fn scroll_to(&self, locator: &Locator) -> Result<ElementHandle, Error> {
        let policy = RetryPolicy::hard(self.config().scroll_max_attempts)?;
        match self
            .locate_by_scrolling(locator, ScrollDirection::Down, &policy)
            .await?
        {
            Some(handle) => Ok(handle),
            None => Err(Error::NotFound {
                target: locator.to_string(),
                direction: ScrollDirection::Down,
                attempts: policy.max_attempts(),
            }),
        }
    }

    /// Scrolls down looking for an optional element: exhaustion yields
    /// `Ok(None)` under the configured soft bound.
    pub async fn scroll_to_optional(
        &self,
        locator: &Locator,
    ) -> Result<Option<ElementHandle>, Error> {
        let policy = RetryPolicy::soft(self.config().scroll_soft_max_attempts)?;
        self.locate_by_scrolling(locator, ScrollDirection::Down, &policy)
            .await
    }

    /// Scrolls up until the locator matches, failing hard after the
    /// configured bound.
    pub async fn scroll_up_to(&self, locator: &Locator) -> Result<ElementHandle, Error> {
        let policy = RetryPolicy::hard(self.config().scroll_up_max_attempts)?;
        match self
            .locate_by_scrolling(locator, ScrollDirection::Up, &policy)
            .await?
        {
            Some(handle) => Ok(handle),
            None => Err(Error::NotFound {
                target: locator.to_string(),
                direction: ScrollDirection::Up,
                attempts: policy.max_attempts(),
            }),
        }
    }
}
