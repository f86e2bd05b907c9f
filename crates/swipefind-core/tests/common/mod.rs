//! Shared test helpers for swipefind-core integration tests.
//!
//! [`MockDriver`] is a scripted backend: the document is a sequence of
//! "screens" (viewport-fulls of elements) and each vertical scroll gesture
//! moves the viewport one screen down or up. Resolution only sees the
//! current screen, which is how real mobile hierarchies behave; state
//! queries can still find off-screen nodes and report them as not
//! displayed. Counters expose how many resolutions, gestures and keyboard
//! dismissals the code under test performed.

// Each integration test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use swipefind_core::driver::UiDriver;
use swipefind_core::{
    ElementState, Error, GeometrySnapshot, GestureSpec, GestureStep, Locator,
};

/// One scripted element: a node id, the locators that match it, and the
/// state it reports while its screen is the current one.
pub struct MockElement {
    pub node_id: String,
    pub locators: Vec<Locator>,
    pub state: ElementState,
}

/// Creates a displayed, enabled element matched by a single locator.
pub fn element(node_id: &str, locator: Locator) -> MockElement {
    MockElement {
        node_id: node_id.to_string(),
        locators: vec![locator],
        state: ElementState {
            displayed: true,
            enabled: true,
            ..ElementState::default()
        },
    }
}

impl MockElement {
    pub fn displayed(mut self, displayed: bool) -> Self {
        self.state.displayed = displayed;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.state.checked = checked;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.state.text = Some(text.to_string());
        self
    }
}

/// Scripted automation backend for a 400x1000 viewport.
pub struct MockDriver {
    screens: Vec<Vec<MockElement>>,
    current: AtomicUsize,
    resolve_calls: AtomicUsize,
    gesture_calls: AtomicUsize,
    keyboard_calls: AtomicUsize,
    fail_gestures: AtomicBool,
    fail_keyboard: AtomicBool,
    fatal: AtomicBool,
    last_gesture: Mutex<Option<GestureSpec>>,
}

impl MockDriver {
    pub fn with_screens(screens: Vec<Vec<MockElement>>) -> Self {
        assert!(!screens.is_empty(), "mock needs at least one screen");
        Self {
            screens,
            current: AtomicUsize::new(0),
            resolve_calls: AtomicUsize::new(0),
            gesture_calls: AtomicUsize::new(0),
            keyboard_calls: AtomicUsize::new(0),
            fail_gestures: AtomicBool::new(false),
            fail_keyboard: AtomicBool::new(false),
            fatal: AtomicBool::new(false),
            last_gesture: Mutex::new(None),
        }
    }

    pub fn single_screen(elements: Vec<MockElement>) -> Self {
        Self::with_screens(vec![elements])
    }

    /// An empty document: one screen with nothing on it.
    pub fn empty() -> Self {
        Self::single_screen(Vec::new())
    }

    pub fn set_current_screen(&self, index: usize) {
        self.current.store(index, Ordering::SeqCst);
    }

    /// Every gesture fails with [`Error::Gesture`] from now on.
    pub fn fail_gestures(&self) {
        self.fail_gestures.store(true, Ordering::SeqCst);
    }

    /// Keyboard dismissal fails (non-fatally) from now on.
    pub fn fail_keyboard(&self) {
        self.fail_keyboard.store(true, Ordering::SeqCst);
    }

    /// The session is gone: every call fails with [`Error::DriverFatal`].
    pub fn go_fatal(&self) {
        self.fatal.store(true, Ordering::SeqCst);
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn gesture_calls(&self) -> usize {
        self.gesture_calls.load(Ordering::SeqCst)
    }

    pub fn keyboard_calls(&self) -> usize {
        self.keyboard_calls.load(Ordering::SeqCst)
    }

    pub fn last_gesture(&self) -> Option<GestureSpec> {
        self.last_gesture.lock().unwrap().clone()
    }

    fn check_fatal(&self) -> Result<(), Error> {
        if self.fatal.load(Ordering::SeqCst) {
            Err(Error::DriverFatal("session disconnected".to_string()))
        } else {
            Ok(())
        }
    }

    fn current_screen(&self) -> &[MockElement] {
        &self.screens[self.current.load(Ordering::SeqCst)]
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn resolve_all(&self, locator: &Locator) -> Result<Vec<String>, Error> {
        self.check_fatal()?;
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .current_screen()
            .iter()
            .filter(|e| e.locators.contains(locator))
            .map(|e| e.node_id.clone())
            .collect())
    }

    async fn element_state(&self, node_id: &str) -> Result<ElementState, Error> {
        self.check_fatal()?;
        // On the current screen: report the scripted state as-is.
        if let Some(e) = self.current_screen().iter().find(|e| e.node_id == node_id) {
            return Ok(e.state.clone());
        }
        // On some other screen: the node exists but is off-viewport.
        for screen in &self.screens {
            if let Some(e) = screen.iter().find(|e| e.node_id == node_id) {
                return Ok(ElementState {
                    displayed: false,
                    ..e.state.clone()
                });
            }
        }
        Err(Error::StaleReference(node_id.to_string()))
    }

    async fn window_size(&self) -> Result<GeometrySnapshot, Error> {
        self.check_fatal()?;
        Ok(GeometrySnapshot {
            width: 400,
            height: 1000,
        })
    }

    async fn perform_gesture(&self, spec: &GestureSpec) -> Result<(), Error> {
        self.check_fatal()?;
        self.gesture_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_gestures.load(Ordering::SeqCst) {
            return Err(Error::Gesture("touch sequence rejected".to_string()));
        }
        *self.last_gesture.lock().unwrap() = Some(spec.clone());

        // A vertical drag moves the viewport one screen in the drag's
        // direction; horizontal drags leave it alone.
        let press = spec.steps().iter().find_map(|s| match s {
            GestureStep::Press(p) => Some(*p),
            _ => None,
        });
        let target = spec.steps().iter().find_map(|s| match s {
            GestureStep::MoveTo(p) => Some(*p),
            _ => None,
        });
        if let (Some(press), Some(target)) = (press, target) {
            let current = self.current.load(Ordering::SeqCst);
            if target.y < press.y {
                let next = (current + 1).min(self.screens.len() - 1);
                self.current.store(next, Ordering::SeqCst);
            } else if target.y > press.y {
                self.current.store(current.saturating_sub(1), Ordering::SeqCst);
            }
        }
        Ok(())
    }

    async fn hide_keyboard(&self) -> Result<(), Error> {
        self.check_fatal()?;
        self.keyboard_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_keyboard.load(Ordering::SeqCst) {
            return Err(Error::Gesture("no keyboard present".to_string()));
        }
        Ok(())
    }
}
