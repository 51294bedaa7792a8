// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size, Vec2};

/// Static configuration of the tour screen.
///
/// Defaults match a 1600×1330 panel skewed by 20° and rotated by −10°, with a
/// 10px stacked border.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScreenConfig {
    /// Width of the embedded page, in CSS pixels.
    pub width: f64,
    /// Height of the embedded page, in CSS pixels.
    pub height: f64,
    /// Horizontal skew of the screen, in degrees.
    pub skew_degrees: f64,
    /// Rotation of the screen, in degrees (positive is clockwise on screen).
    pub rotate_degrees: f64,
    /// Number of stacked border layers; each is offset one pixel further.
    pub border_width: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1330.0,
            skew_degrees: 20.0,
            rotate_degrees: -10.0,
            border_width: 10,
        }
    }
}

impl ScreenConfig {
    /// Returns the configuration with a different panel size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns the configuration with a different skew angle.
    #[must_use]
    pub fn with_skew(mut self, degrees: f64) -> Self {
        self.skew_degrees = degrees;
        self
    }

    /// Returns the configuration with a different rotation angle.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotate_degrees = degrees;
        self
    }

    /// Returns the configuration with a different border thickness.
    #[must_use]
    pub fn with_border_width(mut self, layers: u32) -> Self {
        self.border_width = layers;
        self
    }

    /// Size of the embedded page and of every border layer.
    #[must_use]
    pub fn panel_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The `skew(..) rotate(..)` matrix without any transform origin.
    ///
    /// Matches CSS composition: the rotation applies first, then the skew.
    #[must_use]
    pub fn skew_rotate(&self) -> Affine {
        let skew = self.skew_degrees.to_radians().tan();
        Affine::skew(skew, 0.0) * Affine::rotate(self.rotate_degrees.to_radians())
    }

    /// Offsets of the stacked border layers, innermost first.
    ///
    /// Layer `i` (1-based) is translated by `(-i, i)` so the stack reads as a
    /// solid edge falling to the lower left.
    pub fn border_offsets(&self) -> impl Iterator<Item = Vec2> + '_ {
        (1..=self.border_width).map(|i| {
            let i = f64::from(i);
            Vec2::new(-i, i)
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::ScreenConfig;

    #[test]
    fn defaults_match_construction_parameters() {
        let config = ScreenConfig::default();
        assert_eq!(config.width, 1600.0);
        assert_eq!(config.height, 1330.0);
        assert_eq!(config.skew_degrees, 20.0);
        assert_eq!(config.rotate_degrees, -10.0);
        assert_eq!(config.border_width, 10);
    }

    #[test]
    fn border_offsets_step_diagonally() {
        let config = ScreenConfig::default().with_border_width(3);
        let offsets: Vec<Vec2> = config.border_offsets().collect();
        assert_eq!(
            offsets,
            vec![
                Vec2::new(-1.0, 1.0),
                Vec2::new(-2.0, 2.0),
                Vec2::new(-3.0, 3.0)
            ]
        );
        assert_eq!(config.with_border_width(0).border_offsets().count(), 0);
    }

    #[test]
    fn zero_angles_are_identity() {
        let config = ScreenConfig::default().with_skew(0.0).with_rotation(0.0);
        let p = config.skew_rotate() * Point::new(12.0, -7.0);
        assert!((p.x - 12.0).abs() < 1e-12);
        assert!((p.y + 7.0).abs() < 1e-12);
    }

    #[test]
    fn skew_shifts_x_by_tangent_of_y() {
        let config = ScreenConfig::default().with_skew(45.0).with_rotation(0.0);
        let p = config.skew_rotate() * Point::new(0.0, 10.0);
        assert!((p.x - 10.0).abs() < 1e-9, "skewX(45deg) maps y=10 to x=10");
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_is_clockwise_in_y_down_space() {
        let config = ScreenConfig::default().with_skew(0.0).with_rotation(90.0);
        let p = config.skew_rotate() * Point::new(1.0, 0.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }
}
