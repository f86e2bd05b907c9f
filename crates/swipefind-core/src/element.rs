//! Element handles and point-in-time element state.
//!
//! An [`ElementHandle`] is what a [`Locator`](crate::locator::Locator)
//! resolves to: an opaque backend node id plus the session epoch at
//! resolution time. Handles stay meaningful only until the underlying screen
//! mutates; every executed gesture (and every app reset) bumps the session
//! epoch, after which the handle should be re-resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A live reference to a resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    node_id: String,
    epoch: u64,
}

impl ElementHandle {
    pub(crate) fn new(node_id: String, epoch: u64) -> Self {
        Self { node_id, epoch }
    }

    /// The backend's opaque node identifier.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The session epoch this handle was resolved at.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element[{}]", self.node_id)
    }
}

/// Attributes of an element as reported by the backend at query time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    /// Whether the element is rendered within the current viewport.
    pub displayed: bool,
    /// Whether the element accepts interaction.
    pub enabled: bool,
    /// Selection state (options, tabs, list rows).
    pub selected: bool,
    /// Checked state (checkboxes, switches).
    pub checked: bool,
    /// The element's visible text, if any.
    pub text: Option<String>,
    /// The element's frame in screen coordinates, if known.
    pub frame: Option<ElementFrame>,
}

/// The frame (position and dimensions) of a UI element in screen points,
/// origin at the top-left corner of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
