// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The embedded-page contract: what the tour reads from a loaded page.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::MarkupNames;

/// Callback fired once the embedded page has finished loading.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// An element of the embedded page marked as an annotation target.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkedElement {
    /// Element bounds in the embedded page's own coordinate space.
    pub bounds: Rect,
    /// Value of the headline attribute.
    pub headline: String,
    /// Value of the body attribute, if present.
    pub body: Option<String>,
    /// Raw value of the priority attribute, if present.
    pub priority: Option<String>,
}

/// Narrow adapter over an independently scripted, same-origin page.
///
/// Implementations return "nothing" rather than failing when the page is not
/// loaded yet or its document cannot be reached (for example cross-origin).
pub trait EmbeddedPage {
    /// Content of the last `meta` entry called `name`, if any.
    fn metadata(&self, name: &str) -> Option<String>;

    /// Every element carrying the headline attribute, in document order.
    fn marked_elements(&self, names: &MarkupNames) -> Vec<MarkedElement>;

    /// Runs `callback` once the current page has loaded.
    ///
    /// Pages that are already loaded may run it immediately.
    fn on_ready(&self, callback: ReadyCallback);
}

/// Introduction text shown next to the screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Introduction {
    /// Headline, from the title metadata.
    pub headline: String,
    /// Body, from the description metadata.
    pub body: String,
}

impl Introduction {
    /// Reads the introduction from `page`; missing entries become empty text.
    pub fn from_page<P: EmbeddedPage + ?Sized>(page: &P, names: &MarkupNames) -> Self {
        Self {
            headline: page.metadata(names.title()).unwrap_or_default(),
            body: page.metadata(names.description()).unwrap_or_default(),
        }
    }
}

/// Where the tour goes after (or before) the current page.
///
/// Empty URLs are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageFlow {
    next_url: Option<String>,
    previous_url: Option<String>,
}

impl PageFlow {
    /// Creates a flow, dropping empty URLs.
    #[must_use]
    pub fn new(next_url: Option<String>, previous_url: Option<String>) -> Self {
        Self {
            next_url: next_url.filter(|url| !url.is_empty()),
            previous_url: previous_url.filter(|url| !url.is_empty()),
        }
    }

    /// Reads the flow from `page` metadata.
    pub fn from_page<P: EmbeddedPage + ?Sized>(page: &P, names: &MarkupNames) -> Self {
        Self::new(
            page.metadata(names.next_url()),
            page.metadata(names.previous_url()),
        )
    }

    /// URL of the next page, if known.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// URL of the previous page, if known.
    #[must_use]
    pub fn previous_url(&self) -> Option<&str> {
        self.previous_url.as_deref()
    }

    /// Returns `true` if a next page is known.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }

    /// Returns `true` if a previous page is known.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous_url.is_some()
    }
}
