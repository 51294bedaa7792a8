// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the screen fit scale and the probe projection.

use inclined_screen::{ScreenConfig, ScreenLayout, fit_scale, pin_origin};
use kurbo::{Point, Rect, Size};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scale_never_exceeds_the_container_bound(
        width in 1.0_f64..4000.0,
        height in 1.0_f64..4000.0,
        panel_w in 100.0_f64..3000.0,
        panel_h in 100.0_f64..3000.0,
    ) {
        let scale = fit_scale(Size::new(width, height), Size::new(panel_w, panel_h));
        let bound = (height / panel_h * 0.7).min(width / panel_w * 0.5);
        prop_assert!(scale <= bound + 1e-9, "scale {scale} exceeds bound {bound}");
        prop_assert!(bound - scale < 0.01 + 1e-9, "scale {scale} floors too far below {bound}");
    }

    #[test]
    fn scale_is_floored_to_two_decimals(
        width in 1.0_f64..4000.0,
        height in 1.0_f64..4000.0,
    ) {
        let scale = fit_scale(Size::new(width, height), Size::new(1600.0, 1330.0));
        let hundredths = scale * 100.0;
        prop_assert!((hundredths - hundredths.round()).abs() < 1e-6);
    }

    #[test]
    fn layout_scale_matches_fit_scale(width in 1.0_f64..4000.0, height in 1.0_f64..4000.0) {
        let config = ScreenConfig::default();
        let container = Size::new(width, height);
        let layout = ScreenLayout::compute(&config, container);
        prop_assert_eq!(layout.scale(), fit_scale(container, config.panel_size()));
    }
}

#[test]
fn skewed_screen_moves_pins_off_the_axis_aligned_position() {
    let container = Size::new(1280.0, 800.0);
    let flat = ScreenConfig::default().with_skew(0.0).with_rotation(0.0);
    let tilted = ScreenConfig::default();

    let bounds = Rect::new(100.0, 100.0, 300.0, 200.0);
    let mut flat_layout = ScreenLayout::compute(&flat, container);
    let mut tilted_layout = ScreenLayout::compute(&tilted, container);

    let a = pin_origin(&mut flat_layout, bounds).unwrap();
    let b = pin_origin(&mut tilted_layout, bounds).unwrap();
    assert!((a - b).hypot() > 1.0, "tilt should move the pin: {a:?} vs {b:?}");
}

#[test]
fn panel_center_lands_on_the_shifted_container_center_when_sizes_match() {
    // With panel == container, the panel center is the container center, which
    // both the screen rotation and the container scale keep fixed.
    let config = ScreenConfig::default().with_size(1000.0, 800.0);
    let layout = ScreenLayout::compute(&config, Size::new(1000.0, 800.0));
    let projected = layout.project(Point::new(500.0, 400.0));
    assert!((projected.x - (500.0 - 80.0)).abs() < 1e-9);
    assert!((projected.y - (400.0 - 80.0)).abs() < 1e-9);
}
