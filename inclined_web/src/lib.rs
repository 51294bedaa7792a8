// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser binding for Inclined.
//!
//! On `wasm32` this crate provides:
//! - `DomHost`: an [`inclined::OverlayHost`] that builds the overlay as DOM
//!   nodes, loads tour pages into an `iframe`, and probes pin positions with
//!   a real 1px element inside the transformed screen.
//! - `FramePage`: the [`inclined::EmbeddedPage`] adapter over the frame's
//!   same-origin document.
//! - `InclinedTour`: the `wasm-bindgen` handle scripts use. It shares the
//!   controller between DOM listeners and drops events that arrive while the
//!   controller is busy.
//!
//! The overlay needs no stylesheet: its positioning is set inline, so the
//! pins land where the probe measured them on any page. Pages style the
//! `inclined-*` classes for looks only.
//!
//! Configuration is a JSON `TourOptions` object, read with [`parse_options`].
//! DOM failures surface as [`DomError`] and are logged with `tracing` and
//! skipped; they never reach the page.

mod config;
mod error;

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(any(target_arch = "wasm32", test))]
mod style;

pub use config::parse_options;
pub use error::DomError;

#[cfg(target_arch = "wasm32")]
pub use binding::InclinedTour;
#[cfg(target_arch = "wasm32")]
pub use dom::{Dispatch, DomEvent, DomHost, FramePage};
