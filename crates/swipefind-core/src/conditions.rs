//! The condition library: predicates the wait engine polls.
//!
//! Factory functions build small condition values over a handle or locator,
//! in the style of WebDriver's ExpectedConditions. Handle-based conditions
//! surface the backend's [`Error::StaleReference`] unchanged so the wait
//! engine can tell "not yet true" from "target vanished" — except
//! [`invisible`], where a vanished element *is* the condition.

use async_trait::async_trait;

use crate::element::{ElementHandle, ElementState};
use crate::error::Error;
use crate::locator::Locator;
use crate::session::Session;
use crate::wait::Condition;

/// At least one element matches the locator; yields the first match.
pub fn present(locator: Locator) -> Present {
    Present { locator }
}

/// The element is displayed.
pub fn visible(handle: ElementHandle) -> Visible {
    Visible { handle }
}

/// A matching element exists and is displayed; yields its handle.
pub fn visible_at(locator: Locator) -> VisibleAt {
    VisibleAt { locator }
}

/// The element is displayed and enabled.
pub fn clickable(handle: ElementHandle) -> Clickable {
    Clickable { handle }
}

/// The element reports itself selected.
pub fn selected(handle: ElementHandle) -> Selected {
    Selected { handle }
}

/// The element is displayed and checked.
pub fn checked(handle: ElementHandle) -> Checked {
    Checked { handle }
}

/// The element's text contains the needle.
pub fn text_present(handle: ElementHandle, text: impl Into<String>) -> TextPresent {
    TextPresent {
        handle,
        text: text.into(),
    }
}

/// The element is not displayed, or no longer exists at all.
pub fn invisible(handle: ElementHandle) -> Invisible {
    Invisible { handle }
}

/// No element matches the locator.
pub fn gone(locator: Locator) -> Gone {
    Gone { locator }
}

/// The locator's match count exceeds a previously captured baseline.
pub fn list_grown(locator: Locator, baseline: usize) -> ListGrown {
    ListGrown { locator, baseline }
}

pub struct Present {
    locator: Locator,
}

#[async_trait]
impl Condition for Present {
    type Output = ElementHandle;

    async fn poll(&self, session: &Session) -> Result<Option<ElementHandle>, Error> {
        session.resolve(&self.locator).await
    }

    fn describe(&self) -> String {
        format!("presence of {}", self.locator)
    }
}

pub struct Visible {
    handle: ElementHandle,
}

#[async_trait]
impl Condition for Visible {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let state = session.element_state(&self.handle).await?;
        Ok(state.displayed.then_some(()))
    }

    fn describe(&self) -> String {
        format!("visibility of {}", self.handle)
    }
}

pub struct VisibleAt {
    locator: Locator,
}

#[async_trait]
impl Condition for VisibleAt {
    type Output = ElementHandle;

    async fn poll(&self, session: &Session) -> Result<Option<ElementHandle>, Error> {
        let Some(handle) = session.resolve(&self.locator).await? else {
            return Ok(None);
        };
        let state = session.element_state(&handle).await?;
        Ok(state.displayed.then_some(handle))
    }

    fn describe(&self) -> String {
        format!("visibility of element located by {}", self.locator)
    }
}

pub struct Clickable {
    handle: ElementHandle,
}

#[async_trait]
impl Condition for Clickable {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let state = session.element_state(&self.handle).await?;
        Ok((state.displayed && state.enabled).then_some(()))
    }

    fn describe(&self) -> String {
        format!("clickability of {}", self.handle)
    }
}

pub struct Selected {
    handle: ElementHandle,
}

#[async_trait]
impl Condition for Selected {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let state = session.element_state(&self.handle).await?;
        Ok(state.selected.then_some(()))
    }

    fn describe(&self) -> String {
        format!("selection of {}", self.handle)
    }
}

pub struct Checked {
    handle: ElementHandle,
}

#[async_trait]
impl Condition for Checked {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let state = session.element_state(&self.handle).await?;
        Ok((state.displayed && state.checked).then_some(()))
    }

    fn describe(&self) -> String {
        format!("element to be checked: {}", self.handle)
    }
}

pub struct TextPresent {
    handle: ElementHandle,
    text: String,
}

#[async_trait]
impl Condition for TextPresent {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let state = session.element_state(&self.handle).await?;
        let holds = state
            .text
            .as_deref()
            .is_some_and(|t| t.contains(&self.text));
        Ok(holds.then_some(()))
    }

    fn describe(&self) -> String {
        format!("text '{}' present in {}", self.text, self.handle)
    }
}

pub struct Invisible {
    handle: ElementHandle,
}

#[async_trait]
impl Condition for Invisible {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        match session.element_state(&self.handle).await {
            Ok(state) => Ok((!state.displayed).then_some(())),
            // A vanished element is as invisible as it gets.
            Err(Error::StaleReference(_)) => Ok(Some(())),
            Err(err) => Err(err),
        }
    }

    fn describe(&self) -> String {
        format!("invisibility of {}", self.handle)
    }
}

pub struct Gone {
    locator: Locator,
}

#[async_trait]
impl Condition for Gone {
    type Output = ();

    async fn poll(&self, session: &Session) -> Result<Option<()>, Error> {
        let matches = session.resolve_all(&self.locator).await?;
        Ok(matches.is_empty().then_some(()))
    }

    fn describe(&self) -> String {
        format!("absence of {}", self.locator)
    }
}

pub struct ListGrown {
    locator: Locator,
    baseline: usize,
}

#[async_trait]
impl Condition for ListGrown {
    type Output = usize;

    async fn poll(&self, session: &Session) -> Result<Option<usize>, Error> {
        let count = session.resolve_all(&self.locator).await?.len();
        Ok((count > self.baseline).then_some(count))
    }

    fn describe(&self) -> String {
        format!(
            "more than {} elements matching {}",
            self.baseline, self.locator
        )
    }
}
