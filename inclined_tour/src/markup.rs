// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

/// Names of the metadata entries and marker attributes a tour page uses.
///
/// Every name is the configured prefix followed by a fixed suffix, so the
/// default prefix `inclined_` yields `inclined_title`, `inclined_headline`, and
/// so on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNames {
    prefix: String,
    title: String,
    description: String,
    next_url: String,
    previous_url: String,
    headline: String,
    body: String,
    priority: String,
}

impl Default for MarkupNames {
    fn default() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }
}

impl MarkupNames {
    /// Prefix used unless a tour configures its own.
    pub const DEFAULT_PREFIX: &'static str = "inclined_";

    /// Builds the names for `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            title: format!("{prefix}title"),
            description: format!("{prefix}description"),
            next_url: format!("{prefix}next_url"),
            previous_url: format!("{prefix}previous_url"),
            headline: format!("{prefix}headline"),
            body: format!("{prefix}body"),
            priority: format!("{prefix}priority"),
        }
    }

    /// The shared prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Metadata holding the introduction headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Metadata holding the introduction body.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Metadata naming the next tour page.
    #[must_use]
    pub fn next_url(&self) -> &str {
        &self.next_url
    }

    /// Metadata naming the previous tour page.
    #[must_use]
    pub fn previous_url(&self) -> &str {
        &self.previous_url
    }

    /// Attribute marking an element as an annotation target; holds the pin headline.
    #[must_use]
    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Attribute holding the pin body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Attribute holding the pin's priority group.
    #[must_use]
    pub fn priority(&self) -> &str {
        &self.priority
    }
}
