// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen geometry for a few viewport sizes.
//!
//! Prints the fit scale, recentering offset, CSS transforms and where the
//! panel's corners land in overlay space.
//!
//! Run:
//! - `cargo run -p inclined_demos --example screen_geometry`

use inclined_screen::{ScreenConfig, ScreenLayout, ScreenProbe, pin_origin};
use kurbo::{Point, Rect, Size};

fn main() {
    let config = ScreenConfig::default();
    let panel = config.panel_size();
    let corners = [
        Point::ZERO,
        Point::new(panel.width, 0.0),
        Point::new(panel.width, panel.height),
        Point::new(0.0, panel.height),
    ];

    for viewport in [
        Size::new(1024.0, 768.0),
        Size::new(1440.0, 900.0),
        Size::new(1920.0, 1080.0),
    ] {
        let mut layout = ScreenLayout::compute(&config, viewport);
        println!("== viewport {}x{}", viewport.width, viewport.height);
        println!(
            "   {} {}  offset ({}, {})",
            layout.scale_css(),
            layout.screen_css(),
            layout.offset().x,
            layout.offset().y
        );
        for corner in corners {
            if let Some(at) = layout.probe(corner) {
                println!(
                    "   corner ({:>6.0}, {:>6.0}) -> ({:>7.1}, {:>7.1})",
                    corner.x, corner.y, at.x, at.y
                );
            }
        }
        let header = Rect::new(0.0, 0.0, panel.width, 120.0);
        if let Some(origin) = pin_origin(&mut layout, header) {
            println!("   header pin at ({:.1}, {:.1})", origin.x, origin.y);
        }
    }
}
