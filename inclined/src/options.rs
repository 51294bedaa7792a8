// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inclined_screen::ScreenConfig;
use inclined_tour::MarkupNames;

bitflags::bitflags! {
    /// Optional behaviors of the controller.
    ///
    /// [`Features::FULL`] is the complete tour; [`Features::SIMPLE`] drops every
    /// optional behavior and leaves a plain pin walker.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Features: u8 {
        /// Group pins by their priority attribute. Without it every pin is in group 1.
        const PRIORITY_GROUPS = 0b0000_0001;
        /// Step through pins with Space/Enter/Right and Left.
        const KEYBOARD        = 0b0000_0010;
        /// Show the tour at startup when the location carries the activation fragment.
        const AUTO_ACTIVATE   = 0b0000_0100;
        /// Toggle the host page's tour links.
        const TOUR_LINKS      = 0b0000_1000;

        /// Every behavior.
        const FULL = Self::PRIORITY_GROUPS.bits()
            | Self::KEYBOARD.bits()
            | Self::AUTO_ACTIVATE.bits()
            | Self::TOUR_LINKS.bits();
        /// No optional behavior.
        const SIMPLE = 0;
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::FULL
    }
}

/// Construction parameters of a tour.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourOptions {
    /// Page shown when no target is given and the host page is not itself a tour page.
    pub default_page: String,
    /// Screen geometry.
    pub screen: ScreenConfig,
    /// Optional behaviors.
    pub features: Features,
    /// Prefix of the metadata and marker attribute names.
    pub markup_prefix: String,
    /// Location fragment (without `#`) that shows the tour at startup.
    pub activation_fragment: String,
    /// Query parameter used to defeat caching of tour pages.
    pub cache_bust_param: String,
    /// Viewports this narrow or narrower do not get a tour.
    pub min_viewport_width: f64,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            default_page: String::new(),
            screen: ScreenConfig::default(),
            features: Features::FULL,
            markup_prefix: MarkupNames::DEFAULT_PREFIX.into(),
            activation_fragment: "inclined".into(),
            cache_bust_param: "inclinedframe".into(),
            min_viewport_width: 800.0,
        }
    }
}

impl TourOptions {
    /// Options for the reduced variant: no priorities, keys, auto-activation or tour links.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            features: Features::SIMPLE,
            ..Self::default()
        }
    }

    /// Returns the options with a default tour page.
    #[must_use]
    pub fn with_default_page(mut self, url: impl Into<String>) -> Self {
        self.default_page = url.into();
        self
    }

    /// Returns the options with a different screen geometry.
    #[must_use]
    pub fn with_screen(mut self, screen: ScreenConfig) -> Self {
        self.screen = screen;
        self
    }

    /// Returns the options with a different feature set.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Returns the options with a different markup prefix.
    #[must_use]
    pub fn with_markup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.markup_prefix = prefix.into();
        self
    }

    /// Names derived from [`TourOptions::markup_prefix`].
    #[must_use]
    pub fn markup_names(&self) -> MarkupNames {
        MarkupNames::with_prefix(&self.markup_prefix)
    }
}
