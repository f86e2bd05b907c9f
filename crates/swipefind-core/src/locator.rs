//! Declarative element locators.
//!
//! A [`Locator`] describes *how* to find an element (strategy + value) and
//! never carries a live handle, so it can be re-resolved against the current
//! screen at any time. Locators are validated when constructed rather than
//! when first used for a lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The lookup strategy of a [`Locator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocatorKind {
    XPath,
    Id,
    Name,
    ClassName,
    LinkText,
    PartialLinkText,
    TagName,
    CssSelector,
}

impl LocatorKind {
    /// Short strategy name as used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorKind::XPath => "xpath",
            LocatorKind::Id => "id",
            LocatorKind::Name => "name",
            LocatorKind::ClassName => "className",
            LocatorKind::LinkText => "linkText",
            LocatorKind::PartialLinkText => "partialLinkText",
            LocatorKind::TagName => "tagName",
            LocatorKind::CssSelector => "cssSelector",
        }
    }
}

/// An immutable description of how to find a UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    kind: LocatorKind,
    value: String,
}

impl Locator {
    /// Creates a locator, rejecting empty values.
    pub fn new(kind: LocatorKind, value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::InvalidLocator(format!(
                "{} locator requires a non-empty value",
                kind.as_str()
            )));
        }
        Ok(Self { kind, value })
    }

    pub fn xpath(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::XPath, value)
    }

    pub fn id(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::Id, value)
    }

    pub fn name(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::Name, value)
    }

    pub fn class_name(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::ClassName, value)
    }

    pub fn link_text(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::LinkText, value)
    }

    pub fn partial_link_text(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::PartialLinkText, value)
    }

    pub fn tag_name(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::TagName, value)
    }

    pub fn css_selector(value: impl Into<String>) -> Result<Self, Error> {
        Self::new(LocatorKind::CssSelector, value)
    }

    /// XPath matching any element whose `text` or `name` attribute equals
    /// the given string. The usual way to target a visible label on both
    /// Android and iOS hierarchies.
    pub fn text_or_name(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidLocator(
                "text_or_name locator requires a non-empty value".to_string(),
            ));
        }
        Self::xpath(format!("//*[@text='{text}' or @name='{text}']"))
    }

    /// XPath matching any element whose `text` or `name` attribute contains
    /// the given string.
    pub fn containing_text(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidLocator(
                "containing_text locator requires a non-empty value".to_string(),
            ));
        }
        Self::xpath(format!(
            "//*[contains(@text,'{text}') or contains(@name,'{text}')]"
        ))
    }

    /// XPath matching an element by its Android `content-desc` attribute.
    pub fn content_desc(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidLocator(
                "content_desc locator requires a non-empty value".to_string(),
            ));
        }
        Self::xpath(format!("//*[@content-desc='{text}']"))
    }

    pub fn kind(&self) -> LocatorKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind.as_str(), self.value)
    }
}
