//! Backend trait for UI automation sessions.
//!
//! [`UiDriver`] is the injected capability set the rest of the crate is
//! written against: element resolution, element state queries, viewport
//! geometry, gesture execution and keyboard dismissal. Anything that can
//! drive a live automation session (a WebDriver/Appium endpoint, an
//! on-device agent, a scripted fake in tests) can implement it, and the
//! wait engine and scroll-search controller never see past this boundary.
//!
//! # Error contract
//!
//! - `Ok`/empty results mean "not found right now" and are retryable.
//! - [`Error::StaleReference`] means a previously valid node id has been
//!   invalidated by a screen mutation.
//! - [`Error::Gesture`] means a touch sequence failed to execute.
//! - [`Error::DriverFatal`] means the session itself is gone; it must be
//!   raised instead of any softer kind once the backend is unreachable.

use async_trait::async_trait;

use crate::element::ElementState;
use crate::error::Error;
use crate::gesture::{GeometrySnapshot, GestureSpec};
use crate::locator::Locator;

/// Capability set consumed from the automation backend.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Resolves every element matching the locator, in document order.
    ///
    /// Returns backend node ids. An empty vec means no match against the
    /// current screen; session-level failures raise [`Error::DriverFatal`].
    async fn resolve_all(&self, locator: &Locator) -> Result<Vec<String>, Error>;

    /// Queries the current state of a previously resolved node.
    ///
    /// Raises [`Error::StaleReference`] when the node id no longer refers to
    /// a live element.
    async fn element_state(&self, node_id: &str) -> Result<ElementState, Error>;

    /// Returns the current viewport dimensions.
    async fn window_size(&self) -> Result<GeometrySnapshot, Error>;

    /// Executes a touch sequence.
    async fn perform_gesture(&self, spec: &GestureSpec) -> Result<(), Error>;

    /// Dismisses the virtual keyboard if it is showing.
    ///
    /// Implementations should report failure honestly; the session decides
    /// that dismissal is best-effort and swallows non-fatal errors.
    async fn hide_keyboard(&self) -> Result<(), Error>;

    /// Resets the application under automation to its launch state.
    ///
    /// Not all backends support this; the default implementation reports
    /// the operation as unsupported.
    async fn reset_app(&self) -> Result<(), Error> {
        Err(Error::DriverFatal(
            "reset_app not supported by this backend".to_string(),
        ))
    }
}
