//! # swipefind-core
//!
//! Element synchronization and scroll-search for mobile UI automation.
//!
//! In a live automation session, the element you want may not exist yet, may
//! sit below the fold, or may go stale between lookups. This crate provides
//! the synchronization layer that deals with all three: bounded-retry
//! polling with timing guarantees, gesture composition from live viewport
//! geometry, and failure policies that keep transient conditions apart from
//! fatal ones.
//!
//! ## Modules
//!
//! - [`locator`] - Declarative element locators, validated at construction
//! - [`element`] - Element handles and point-in-time element state
//! - [`driver`] - The [`UiDriver`](driver::UiDriver) backend trait
//! - [`session`] - Session context: epoch tracking and gesture serialization
//! - [`gesture`] - Pure gesture composition from viewport geometry
//! - [`conditions`] - The condition library the wait engine polls
//! - [`wait`] - Bounded polling with a per-condition time budget
//! - [`search`] - Scroll-search loops over gestures and conditions
//! - [`config`] - Persisted timing and attempt-bound defaults
//! - [`error`] - The typed failure taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use swipefind_core::{Locator, RetryPolicy, ScrollDirection, Session};
//! # use swipefind_core::driver::UiDriver;
//! # async fn demo(backend: Arc<dyn UiDriver>) -> Result<(), swipefind_core::Error> {
//! let session = Session::new(backend);
//!
//! // Scroll down until the checkout button is on screen, then wait for it
//! // to become clickable.
//! let locator = Locator::text_or_name("Checkout")?;
//! let policy = RetryPolicy::hard(12)?;
//! if let Some(button) = session
//!     .locate_by_scrolling(&locator, ScrollDirection::Down, &policy)
//!     .await?
//! {
//!     session.wait_for_clickable(&button).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod conditions;
pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod gesture;
pub mod locator;
pub mod search;
pub mod session;
pub mod wait;

pub use config::SyncConfig;
pub use element::{ElementFrame, ElementHandle, ElementState};
pub use error::Error;
pub use gesture::{GeometrySnapshot, GestureKind, GestureSpec, GestureStep, Point, ScrollDirection};
pub use locator::{Locator, LocatorKind};
pub use search::{FailMode, RetryPolicy};
pub use session::Session;
pub use wait::{wait_until, Condition};
