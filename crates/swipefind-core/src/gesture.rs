//! Gesture composition from viewport geometry.
//!
//! Everything in this module is pure: builders turn a [`GeometrySnapshot`]
//! and parameters into a [`GestureSpec`] (an ordered press/wait/move/release
//! sequence), and execution is delegated entirely to the session facade.
//!
//! A snapshot must be captured immediately before planning a gesture and
//! never reused for the next one; orientation changes and keyboard animation
//! shift the usable viewport between gestures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Settle duration between press and move, in milliseconds. Matches the
/// touch timing the scroll gestures were tuned against.
pub const SCROLL_SETTLE_MS: u64 = 1000;

/// X coordinate vertical scrolls anchor to: 5px from the left edge, clear of
/// swipe-to-delete zones and centered controls.
pub const SCROLL_ANCHOR_X: i32 = 5;

/// A point in screen coordinates, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions captured immediately before planning a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub width: i32,
    pub height: i32,
}

/// Which way a vertical scroll-search moves through the content.
///
/// `Down` reveals content below the viewport (the finger drags upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollDirection::Up => write!(f, "up"),
            ScrollDirection::Down => write!(f, "down"),
        }
    }
}

/// One step of a touch sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum GestureStep {
    Press(Point),
    Wait { ms: u64 },
    MoveTo(Point),
    Release,
}

/// An ordered touch/drag action sequence derived from viewport geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureSpec {
    steps: Vec<GestureStep>,
}

impl GestureSpec {
    pub fn steps(&self) -> &[GestureStep] {
        &self.steps
    }
}

/// The generic primitive every other builder is composed from: press at the
/// start point, settle, drag to the end point, release.
pub fn coordinate_gesture(x1: i32, y1: i32, x2: i32, y2: i32, wait_ms: u64) -> GestureSpec {
    GestureSpec {
        steps: vec![
            GestureStep::Press(Point::new(x1, y1)),
            GestureStep::Wait { ms: wait_ms },
            GestureStep::MoveTo(Point::new(x2, y2)),
            GestureStep::Release,
        ],
    }
}

/// Builds one vertical scroll step for the given viewport.
///
/// Scrolling down presses at two thirds of the height and drags to one third
/// (content moves upward); scrolling up reverses start and end.
pub fn vertical_scroll(geometry: GeometrySnapshot, direction: ScrollDirection) -> GestureSpec {
    let lower = ((geometry.height as f64) * 2.0 / 3.0).round() as i32;
    let upper = ((geometry.height as f64) / 3.0).round() as i32;
    let (start_y, end_y) = match direction {
        ScrollDirection::Down => (lower, upper),
        ScrollDirection::Up => (upper, lower),
    };
    coordinate_gesture(SCROLL_ANCHOR_X, start_y, SCROLL_ANCHOR_X, end_y, SCROLL_SETTLE_MS)
}

/// Builds a horizontal swipe anchored at `anchor_y`, dragging from `start_x`
/// to `end_x`.
pub fn horizontal_swipe(anchor_y: i32, start_x: i32, end_x: i32) -> GestureSpec {
    coordinate_gesture(start_x, anchor_y, end_x, anchor_y, SCROLL_SETTLE_MS)
}

/// Named gestures a session can execute against live geometry.
///
/// The coordinate variants of the named swipes are derived from the viewport
/// at execution time; see [`compose`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GestureKind {
    ScrollDown,
    ScrollUp,
    SwipeLeftToRight,
    SwipeRightToLeft,
    Coordinate {
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        wait_ms: u64,
    },
}

impl GestureKind {
    /// Short static name for tracing span metadata.
    pub fn name(&self) -> &'static str {
        match self {
            GestureKind::ScrollDown => "scroll_down",
            GestureKind::ScrollUp => "scroll_up",
            GestureKind::SwipeLeftToRight => "swipe_left_to_right",
            GestureKind::SwipeRightToLeft => "swipe_right_to_left",
            GestureKind::Coordinate { .. } => "coordinate",
        }
    }
}

/// Turns a named gesture into a concrete spec for the given viewport.
pub fn compose(kind: &GestureKind, geometry: GeometrySnapshot) -> GestureSpec {
    match kind {
        GestureKind::ScrollDown => vertical_scroll(geometry, ScrollDirection::Down),
        GestureKind::ScrollUp => vertical_scroll(geometry, ScrollDirection::Up),
        GestureKind::SwipeLeftToRight => horizontal_swipe(
            geometry.height / 2,
            geometry.width / 3,
            geometry.width * 2 / 3,
        ),
        GestureKind::SwipeRightToLeft => horizontal_swipe(
            geometry.height / 2,
            geometry.width * 9 / 10,
            geometry.width / 10,
        ),
        GestureKind::Coordinate {
            start_x,
            start_y,
            end_x,
            end_y,
            wait_ms,
        } => coordinate_gesture(*start_x, *start_y, *end_x, *end_y, *wait_ms),
    }
}
