// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

use crate::ScreenLayout;

/// Half the pin icon's extent; a pin's origin sits this far up and left of its anchor.
pub const PIN_HALF_EXTENT: f64 = 25.0;

/// Reads back where a panel-space point is rendered in overlay space.
///
/// Hosts backed by a real rendering engine implement this by inserting a 1px
/// probe element at `panel_point` inside the transformed screen, reading its
/// rendered offset and removing it again. This sidesteps inverting the composed
/// skew/rotate/scale by hand and keeps pins aligned with whatever the engine
/// actually drew.
///
/// Returns `None` when the point cannot be sampled (for example because the
/// screen has not been built yet).
pub trait ScreenProbe {
    /// Samples the overlay-space position of `panel_point`.
    fn probe(&mut self, panel_point: Point) -> Option<Point>;
}

impl ScreenProbe for ScreenLayout {
    fn probe(&mut self, panel_point: Point) -> Option<Point> {
        let projected = self.project(panel_point);
        (projected.x.is_finite() && projected.y.is_finite()).then_some(projected)
    }
}

/// Center of an element's bounds in panel space.
#[must_use]
pub fn element_center(bounds: Rect) -> Point {
    bounds.center()
}

/// Overlay-space origin for a pin annotating an element with `bounds`.
///
/// Probes the element's center and backs off by [`PIN_HALF_EXTENT`] on both
/// axes so the pin icon is centered on the element.
pub fn pin_origin<P: ScreenProbe + ?Sized>(probe: &mut P, bounds: Rect) -> Option<Point> {
    probe
        .probe(element_center(bounds))
        .map(|anchor| anchor - Vec2::new(PIN_HALF_EXTENT, PIN_HALF_EXTENT))
}
