// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclined Tour: the bookkeeping side of a guided tour.
//!
//! This crate knows nothing about rendering. It tracks:
//! - [`PinSet`]: the pins placed for the current page, grouped by priority into
//!   one navigable sequence, with generational [`PinId`]s.
//! - [`PageFlow`] and [`Introduction`]: what a tour page says about itself
//!   through its metadata.
//! - [`TourNavigator`]: which pin is active and what happens when navigation
//!   runs off either end of the sequence.
//! - [`KeyInput`] / [`step_for_key`]: the keyboard bindings for stepping.
//!
//! Pages are read through the narrow [`EmbeddedPage`] adapter; names of the
//! metadata and marker attributes come from [`MarkupNames`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use inclined_tour::{PageFlow, Pin, PinTarget, TourNavigator, Transition};
//!
//! let mut nav = TourNavigator::new();
//! nav.replace_pins([
//!     Pin::new(Point::ZERO, "Later", "", 2),
//!     Pin::new(Point::ZERO, "First", "", 1),
//! ]);
//! nav.set_flow(PageFlow::new(Some("step-2.html".into()), None));
//!
//! // Priority 1 comes first in the sequence.
//! let Transition::Activated { id, index } = nav.set_active(PinTarget::Index(1)) else {
//!     unreachable!()
//! };
//! assert_eq!(index, 1);
//! assert_eq!(nav.pins().get(id).unwrap().headline, "First");
//!
//! // Stepping past the last pin moves on to the next page.
//! assert!(matches!(nav.next(), Transition::Activated { index: 2, .. }));
//! assert_eq!(nav.next(), Transition::ShowNextPage);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod keys;
mod markup;
mod navigator;
mod page;
mod pin;

pub use keys::{Key, KeyInput, Modifiers, PinStep, step_for_key};
pub use markup::MarkupNames;
pub use navigator::{PinTarget, TourNavigator, Transition};
pub use page::{EmbeddedPage, Introduction, MarkedElement, PageFlow, ReadyCallback};
pub use pin::{DEFAULT_PRIORITY, Pin, PinId, PinSet, parse_priority};
