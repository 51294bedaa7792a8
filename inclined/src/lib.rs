// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclined: a guided-tour overlay.
//!
//! A tour page is loaded into a tilted, scaled "screen" drawn over the host
//! page. Elements of the tour page that carry a headline attribute get a pin
//! drawn on top of the screen, and the visitor steps from pin to pin (and from
//! page to page) with the mouse, the keyboard or the overlay's controls.
//!
//! This crate holds the [`Controller`], which owns all tour state and drives an
//! [`OverlayHost`]. Rendering lives behind that trait: the `inclined_web`
//! crate implements it over the DOM, and [`headless::MemoryHost`] implements it
//! in memory for tests and tooling.
//!
//! Geometry comes from [`inclined_screen`]; pin bookkeeping and navigation
//! from [`inclined_tour`].
//!
//! ## Example
//!
//! ```rust
//! use inclined::headless::{MemoryDocument, MemoryHost};
//! use inclined::{Control, Controller, TourOptions};
//! use kurbo::Rect;
//!
//! let page = MemoryDocument::new()
//!     .with_meta("inclined_title", "Welcome")
//!     .with_marked(Rect::new(100.0, 100.0, 300.0, 160.0), "Search", None);
//! let host = MemoryHost::new("https://example.com/").with_page("tour.html", page);
//!
//! let mut tour = Controller::new(host, TourOptions::default().with_default_page("tour.html"));
//! tour.navigate(None);
//! tour.show();
//!
//! // The host finishes loading the page.
//! tour.host_mut().complete_load();
//! tour.page_ready();
//!
//! assert_eq!(tour.host().introduction().headline, "Welcome");
//! assert_eq!(tour.host().active_headline(), Some("Search"));
//! assert!(!tour.host().control_visible(Control::NextPage));
//! ```

mod controller;
pub mod headless;
mod host;
pub mod href;
mod options;

pub use controller::Controller;
pub use host::{Control, Layer, OverlayHost, OverlayPlan};
pub use options::{Features, TourOptions};

pub use inclined_screen::{self, ScreenConfig, ScreenLayout, ScreenProbe};
pub use inclined_tour::{
    self, EmbeddedPage, Introduction, Key, KeyInput, MarkedElement, Modifiers, PinId, PinTarget,
    Transition,
};
