// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclined Screen: headless geometry for the tilted tour "screen".
//!
//! A tour renders the target page inside a panel that is skewed, rotated and
//! then scaled down to fit its overlay. This crate owns the math for that panel
//! and nothing else:
//! - [`ScreenConfig`]: panel size, skew/rotation angles and border thickness.
//! - [`ScreenLayout`]: everything recomputed on resize: the fit scale, the
//!   recentering offset, the transforms (as [`kurbo::Affine`] and as CSS text)
//!   and the diagonal border-layer offsets.
//! - [`ScreenProbe`]: reads back where a point of the panel lands in overlay
//!   space after all transforms are applied.
//!
//! ## Fit scale
//!
//! The panel is scaled uniformly by
//! `floor(min(h / H * 0.7, w / W * 0.5) * 100) / 100`, where `w`/`h` is the
//! container size and `W`/`H` the configured panel size. See [`fit_scale`].
//!
//! ```rust
//! use kurbo::Size;
//! use inclined_screen::{ScreenConfig, ScreenLayout};
//!
//! let config = ScreenConfig::default();
//! let layout = ScreenLayout::compute(&config, Size::new(1280.0, 800.0));
//! assert_eq!(layout.scale(), 0.4);
//! assert_eq!(layout.screen_css(), "skew(20deg) rotate(-10deg)");
//! ```
//!
//! ## Probing instead of inverting
//!
//! Pins are drawn unskewed on top of the screen, so each pin needs the overlay
//! position of a point inside the transformed panel. A rendering engine applies
//! the composed skew/rotate/scale with its own transform origins and rounding;
//! rather than re-deriving that, hosts place a 1px probe at the point, read the
//! rendered offset back and remove the probe. [`ScreenLayout`] implements
//! [`ScreenProbe`] analytically and serves as the reference rendering for
//! headless hosts.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use inclined_screen::{ScreenConfig, ScreenLayout, pin_origin};
//!
//! let config = ScreenConfig::default().with_skew(0.0).with_rotation(0.0);
//! let mut layout = ScreenLayout::compute(&config, Size::new(1600.0, 1330.0));
//! let origin = pin_origin(&mut layout, Rect::new(700.0, 600.0, 900.0, 730.0)).unwrap();
//! assert!(origin.x.is_finite() && origin.y.is_finite());
//! ```

mod config;
mod layout;
mod probe;

pub use config::ScreenConfig;
pub use layout::{ScreenLayout, fit_scale};
pub use probe::{PIN_HALF_EXTENT, ScreenProbe, element_center, pin_origin};
