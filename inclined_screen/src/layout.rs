// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

use crate::ScreenConfig;

/// Share of the container height the panel may take before skewing.
const HEIGHT_FILL: f64 = 0.7;
/// Share of the container width the panel may take before skewing.
const WIDTH_FILL: f64 = 0.5;
/// Recentering offset as a fraction of the container width (leftwards).
const LEFT_SHIFT: f64 = -0.08;
/// Recentering offset as a fraction of the container height (upwards).
const TOP_SHIFT: f64 = -0.1;

/// Uniform scale that fits a `panel` into a `container`.
///
/// Computes `floor(min(h / H * 0.7, w / W * 0.5) * 100) / 100`. The result is
/// floored to two decimals, so it never exceeds the unfloored bound. Degenerate
/// inputs (non-finite, or a non-positive panel or container) yield `0.0`.
#[must_use]
pub fn fit_scale(container: Size, panel: Size) -> f64 {
    let finite = container.width.is_finite()
        && container.height.is_finite()
        && panel.width.is_finite()
        && panel.height.is_finite();
    if !finite || panel.width <= 0.0 || panel.height <= 0.0 {
        return 0.0;
    }
    if container.width <= 0.0 || container.height <= 0.0 {
        return 0.0;
    }
    let bound = (container.height / panel.height * HEIGHT_FILL)
        .min(container.width / panel.width * WIDTH_FILL);
    (bound * 100.0).floor() / 100.0
}

/// Screen geometry derived from a [`ScreenConfig`] and the current container size.
///
/// Coordinates:
/// - *Panel space*: the embedded page's own pixels, origin at its top-left.
/// - *Container space*: the screen container, which fills the overlay root.
/// - *Overlay space*: the overlay root, where pins are positioned.
///
/// The panel sits at the container origin and is skewed/rotated about its own
/// center. The container is scaled about its center and shifted by
/// [`ScreenLayout::offset`], matching how a browser applies
/// `transform-origin: 50% 50%`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenLayout {
    panel: Size,
    container: Size,
    scale: f64,
    offset: Vec2,
    skew_degrees: f64,
    rotate_degrees: f64,
    screen_transform: Affine,
    container_transform: Affine,
    border_offsets: Vec<Vec2>,
}

impl ScreenLayout {
    /// Recomputes the layout for `container`.
    #[must_use]
    pub fn compute(config: &ScreenConfig, container: Size) -> Self {
        let panel = config.panel_size();
        let scale = fit_scale(container, panel);
        let offset = Vec2::new(container.width * LEFT_SHIFT, container.height * TOP_SHIFT);

        let panel_center = panel.to_vec2() * 0.5;
        let screen_transform = Affine::translate(panel_center)
            * config.skew_rotate()
            * Affine::translate(-panel_center);

        let container_center = container.to_vec2() * 0.5;
        let container_transform = Affine::translate(offset + container_center)
            * Affine::scale(scale)
            * Affine::translate(-container_center);

        Self {
            panel,
            container,
            scale,
            offset,
            skew_degrees: config.skew_degrees,
            rotate_degrees: config.rotate_degrees,
            screen_transform,
            container_transform,
            border_offsets: config.border_offsets().collect(),
        }
    }

    /// Pixel size applied to the embedded page and every border layer.
    #[must_use]
    pub fn panel_size(&self) -> Size {
        self.panel
    }

    /// Container size this layout was computed for.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Uniform fit scale; see [`fit_scale`].
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Container shift: `-8%` of the width and `-10%` of the height.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns `true` when the screen collapses to nothing (scale of zero).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.scale <= 0.0
    }

    /// Skew and rotation of the panel about its center, in container space.
    #[must_use]
    pub fn screen_transform(&self) -> Affine {
        self.screen_transform
    }

    /// Scale and shift of the container, in overlay space.
    #[must_use]
    pub fn container_transform(&self) -> Affine {
        self.container_transform
    }

    /// Composite transform from panel space into overlay space.
    #[must_use]
    pub fn panel_to_overlay(&self) -> Affine {
        self.container_transform * self.screen_transform
    }

    /// Maps a panel-space point into overlay space.
    #[must_use]
    pub fn project(&self, panel_point: Point) -> Point {
        self.panel_to_overlay() * panel_point
    }

    /// Diagonal offsets of the stacked border layers, innermost first.
    #[must_use]
    pub fn border_offsets(&self) -> &[Vec2] {
        &self.border_offsets
    }

    /// CSS `transform` value for the panel.
    #[must_use]
    pub fn screen_css(&self) -> String {
        format!(
            "skew({}deg) rotate({}deg)",
            format_number(self.skew_degrees),
            format_number(self.rotate_degrees)
        )
    }

    /// CSS `transform` value for the container.
    #[must_use]
    pub fn scale_css(&self) -> String {
        format!("scale({})", format_number(self.scale))
    }

    /// CSS `transform` value for a border layer offset.
    #[must_use]
    pub fn border_css(offset: Vec2) -> String {
        format!(
            "translate({}px,{}px)",
            format_number(offset.x),
            format_number(offset.y)
        )
    }
}

/// Formats a float the way a stylesheet expects: no trailing `.0`, no `-0`.
fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".into();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{ScreenLayout, fit_scale};
    use crate::ScreenConfig;

    #[test]
    fn fit_scale_takes_the_tighter_axis() {
        let panel = Size::new(1600.0, 1330.0);
        // Width-bound: 1280 / 1600 * 0.5 = 0.4 < 800 / 1330 * 0.7.
        assert_eq!(fit_scale(Size::new(1280.0, 800.0), panel), 0.4);
        // Height-bound: 1080 / 1330 * 0.7 = 0.568.. < 1920 / 1600 * 0.5.
        assert_eq!(fit_scale(Size::new(1920.0, 1080.0), panel), 0.56);
        assert_eq!(fit_scale(Size::new(1024.0, 768.0), panel), 0.32);
    }

    #[test]
    fn fit_scale_degenerate_inputs_are_zero() {
        let panel = Size::new(1600.0, 1330.0);
        assert_eq!(fit_scale(Size::ZERO, panel), 0.0);
        assert_eq!(fit_scale(Size::new(800.0, 600.0), Size::ZERO), 0.0);
        assert_eq!(fit_scale(Size::new(f64::NAN, 600.0), panel), 0.0);
        assert_eq!(fit_scale(Size::new(-10.0, 600.0), panel), 0.0);
    }

    #[test]
    fn offset_recenters_by_fixed_fractions() {
        let layout = ScreenLayout::compute(&ScreenConfig::default(), Size::new(1000.0, 500.0));
        assert_eq!(layout.offset(), Vec2::new(-80.0, -50.0));
    }

    #[test]
    fn css_strings_are_stylesheet_friendly() {
        let layout = ScreenLayout::compute(&ScreenConfig::default(), Size::new(1280.0, 800.0));
        assert_eq!(layout.screen_css(), "skew(20deg) rotate(-10deg)");
        assert_eq!(layout.scale_css(), "scale(0.4)");
        assert_eq!(
            ScreenLayout::border_css(Vec2::new(-3.0, 3.0)),
            "translate(-3px,3px)"
        );
        let flat = ScreenConfig::default().with_skew(0.0).with_rotation(0.0);
        let layout = ScreenLayout::compute(&flat, Size::new(1280.0, 800.0));
        assert_eq!(layout.screen_css(), "skew(0deg) rotate(0deg)");
    }

    #[test]
    fn untransformed_panel_scales_about_container_center() {
        let config = ScreenConfig::default().with_skew(0.0).with_rotation(0.0);
        let container = Size::new(1600.0, 1330.0);
        let layout = ScreenLayout::compute(&config, container);
        assert_eq!(layout.scale(), 0.5);

        // The container center is a fixed point of the scale, then shifted.
        let center = Point::new(800.0, 665.0);
        let projected = layout.project(center);
        assert!((projected.x - (800.0 - 128.0)).abs() < 1e-9);
        assert!((projected.y - (665.0 - 133.0)).abs() < 1e-9);
    }

    #[test]
    fn panel_center_is_fixed_by_the_screen_transform() {
        let layout = ScreenLayout::compute(&ScreenConfig::default(), Size::new(1280.0, 800.0));
        let center = Point::new(800.0, 665.0);
        let moved = layout.screen_transform() * center;
        assert!((moved - center).hypot() < 1e-9);
    }

    #[test]
    fn border_offsets_follow_config() {
        let config = ScreenConfig::default().with_border_width(2);
        let layout = ScreenLayout::compute(&config, Size::new(1280.0, 800.0));
        assert_eq!(
            layout.border_offsets(),
            &[Vec2::new(-1.0, 1.0), Vec2::new(-2.0, 2.0)]
        );
    }

    #[test]
    fn zero_container_is_degenerate() {
        let layout = ScreenLayout::compute(&ScreenConfig::default(), Size::ZERO);
        assert!(layout.is_degenerate());
    }
}
