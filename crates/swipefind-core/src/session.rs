//! Session context for one live automation backend.
//!
//! A [`Session`] wraps the backend behind an explicit context value that is
//! passed through every operation: no shared statics, one session per
//! automated script. It owns the two pieces of state the synchronization
//! layer needs:
//!
//! - an **epoch counter**, bumped by every executed gesture and app reset,
//!   which is how [`ElementHandle`] freshness is tracked (handles resolved
//!   before a screen mutation should be re-resolved);
//! - a **gesture lock** serializing touch execution, so no two gestures can
//!   ever run concurrently against one backend and no poll can observe a
//!   handle mid-gesture.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info_span, warn, Instrument};

use crate::conditions;
use crate::config::SyncConfig;
use crate::driver::UiDriver;
use crate::element::{ElementHandle, ElementState};
use crate::error::Error;
use crate::gesture::{self, GeometrySnapshot, GestureKind, GestureSpec};
use crate::locator::Locator;
use crate::wait;

/// One automation session: the backend plus synchronization state.
pub struct Session {
    driver: Arc<dyn UiDriver>,
    config: SyncConfig,
    epoch: AtomicU64,
    gesture_lock: Mutex<()>,
}

impl Session {
    /// Creates a session over the given backend with default config.
    pub fn new(driver: Arc<dyn UiDriver>) -> Self {
        Self::with_config(driver, SyncConfig::default())
    }

    /// Creates a session with explicit synchronization defaults.
    pub fn with_config(driver: Arc<dyn UiDriver>, config: SyncConfig) -> Self {
        Self {
            driver,
            config,
            epoch: AtomicU64::new(0),
            gesture_lock: Mutex::new(()),
        }
    }

    /// The backend this session drives.
    pub fn driver(&self) -> &Arc<dyn UiDriver> {
        &self.driver
    }

    /// The synchronization defaults for this session.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The current screen epoch. Bumped by every gesture and app reset.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Whether the handle was resolved against the current screen epoch.
    ///
    /// A stale handle may still answer state queries (the backend decides),
    /// but its geometry and ordering can no longer be trusted.
    pub fn is_fresh(&self, handle: &ElementHandle) -> bool {
        handle.epoch() == self.epoch()
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Resolves the first element matching the locator, in document order.
    ///
    /// `Ok(None)` means no match against the current screen; session-level
    /// failures raise [`Error::DriverFatal`].
    pub async fn resolve(&self, locator: &Locator) -> Result<Option<ElementHandle>, Error> {
        Ok(self.resolve_all(locator).await?.into_iter().next())
    }

    /// Resolves every element matching the locator, in document order.
    pub async fn resolve_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, Error> {
        let node_ids = self.driver.resolve_all(locator).await?;
        let epoch = self.epoch();
        Ok(node_ids
            .into_iter()
            .map(|id| ElementHandle::new(id, epoch))
            .collect())
    }

    /// Queries the backend for the element's current state.
    pub async fn element_state(&self, handle: &ElementHandle) -> Result<ElementState, Error> {
        self.driver.element_state(handle.node_id()).await
    }

    /// Captures the current viewport dimensions.
    pub async fn window_size(&self) -> Result<GeometrySnapshot, Error> {
        self.driver.window_size().await
    }

    /// Executes a touch sequence, serialized against other gestures.
    ///
    /// On success the screen epoch is bumped: every handle resolved before
    /// this call is now stale and must be re-resolved.
    pub async fn perform_gesture(&self, spec: &GestureSpec) -> Result<(), Error> {
        let _guard = self.gesture_lock.lock().await;
        self.driver.perform_gesture(spec).await?;
        self.bump_epoch();
        debug!(epoch = self.epoch(), steps = spec.steps().len(), "gesture performed");
        Ok(())
    }

    /// Composes a named gesture from a fresh viewport snapshot and executes
    /// it. The snapshot is captured immediately before planning and never
    /// reused.
    pub async fn run_gesture(&self, kind: GestureKind) -> Result<(), Error> {
        let span = info_span!("run_gesture", gesture = kind.name());
        async {
            let geometry = self.window_size().await?;
            let spec = gesture::compose(&kind, geometry);
            self.perform_gesture(&spec).await
        }
        .instrument(span)
        .await
    }

    /// Dismisses the virtual keyboard, best-effort.
    ///
    /// An open keyboard shifts gesture coordinates, so dismissal precedes
    /// every scroll-search; it is a precondition for accuracy, not a
    /// correctness requirement, and ordinary backend errors are swallowed.
    /// A dead session ([`Error::DriverFatal`]) still propagates.
    pub async fn hide_keyboard(&self) -> Result<(), Error> {
        match self.driver.hide_keyboard().await {
            Ok(()) => Ok(()),
            Err(err @ Error::DriverFatal(_)) => Err(err),
            Err(err) => {
                warn!(error = %err, "keyboard dismissal failed, continuing");
                Ok(())
            }
        }
    }

    /// Resets the application under automation.
    ///
    /// On success the screen epoch is bumped: every previously resolved
    /// handle is invalidated.
    pub async fn reset_app(&self) -> Result<(), Error> {
        self.driver.reset_app().await?;
        self.bump_epoch();
        Ok(())
    }

    fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.config.default_wait_timeout_ms)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    /// Waits until the element is displayed.
    pub async fn wait_for_visible(&self, handle: &ElementHandle) -> Result<(), Error> {
        self.wait_with_defaults(conditions::visible(handle.clone())).await
    }

    /// Waits until a matching element is displayed, returning its handle.
    pub async fn wait_for_visible_at(&self, locator: &Locator) -> Result<ElementHandle, Error> {
        self.wait_with_defaults(conditions::visible_at(locator.clone())).await
    }

    /// Waits until the element is displayed and enabled.
    pub async fn wait_for_clickable(&self, handle: &ElementHandle) -> Result<(), Error> {
        self.wait_with_defaults(conditions::clickable(handle.clone())).await
    }

    /// Waits until the element reports itself selected.
    pub async fn wait_for_selected(&self, handle: &ElementHandle) -> Result<(), Error> {
        self.wait_with_defaults(conditions::selected(handle.clone())).await
    }

    /// Waits until the element is displayed and checked.
    pub async fn wait_for_checked(&self, handle: &ElementHandle) -> Result<(), Error> {
        self.wait_with_defaults(conditions::checked(handle.clone())).await
    }

    /// Waits until the element's text contains the needle.
    pub async fn wait_for_text(&self, handle: &ElementHandle, text: &str) -> Result<(), Error> {
        self.wait_with_defaults(conditions::text_present(handle.clone(), text)).await
    }

    /// Waits until the element is hidden or gone.
    pub async fn wait_for_invisible(&self, handle: &ElementHandle) -> Result<(), Error> {
        self.wait_with_defaults(conditions::invisible(handle.clone())).await
    }

    /// Waits until no element matches the locator.
    pub async fn wait_for_gone(&self, locator: &Locator) -> Result<(), Error> {
        self.wait_with_defaults(conditions::gone(locator.clone())).await
    }

    async fn wait_with_defaults<C>(&self, condition: C) -> Result<C::Output, Error>
    where
        C: wait::Condition,
    {
        wait::wait_until(self, &condition, self.default_timeout(), self.poll_interval()).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("epoch", &self.epoch())
            .finish()
    }
}
