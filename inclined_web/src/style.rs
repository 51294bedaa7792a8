// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline positioning of the overlay nodes.
//!
//! The overlay ships no stylesheet. Pages may still style the `inclined-*`
//! classes for looks, but everything that decides where a node lands is set
//! inline from these tables.

type Styles = &'static [(&'static str, &'static str)];

/// `#inclined`: fixed over the viewport. Pins and probes are measured
/// against it.
pub(crate) const ROOT: Styles = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("right", "0"),
    ("bottom", "0"),
    ("overflow", "hidden"),
    ("z-index", "2147483000"),
];

pub(crate) const BACKGROUND: Styles = &[
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
];

/// The scaled container. Fills the root so its size is the layout container.
pub(crate) const SCREEN: Styles = &[
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
];

/// The skewed panel and every layer sized to it.
pub(crate) const PANEL: Styles = &[("position", "absolute"), ("top", "0"), ("left", "0")];

/// Introduction and controls stack above the screen in document order.
pub(crate) const CHROME: Styles = &[("position", "relative")];

pub(crate) const PIN: Styles = &[("position", "absolute")];

/// The 1px element placed in the panel to measure where a point renders.
pub(crate) const PROBE: Styles = &[("position", "absolute"), ("width", "1px"), ("height", "1px")];

#[cfg(test)]
mod tests {
    use super::{BACKGROUND, CHROME, PANEL, PIN, PROBE, ROOT, SCREEN, Styles};

    fn value(styles: Styles, property: &str) -> Option<&'static str> {
        styles
            .iter()
            .rev()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| *value)
    }

    #[test]
    fn root_covers_the_viewport() {
        assert_eq!(value(ROOT, "position"), Some("fixed"));
        for edge in ["top", "left", "right", "bottom"] {
            assert_eq!(value(ROOT, edge), Some("0"), "{edge}");
        }
    }

    #[test]
    fn screen_fills_the_root() {
        assert_eq!(value(SCREEN, "position"), Some("absolute"));
        assert_eq!(value(SCREEN, "width"), Some("100%"));
        assert_eq!(value(SCREEN, "height"), Some("100%"));
    }

    #[test]
    fn offset_nodes_are_taken_out_of_flow() {
        for styles in [BACKGROUND, SCREEN, PANEL, PIN, PROBE] {
            assert_eq!(value(styles, "position"), Some("absolute"));
        }
        assert_eq!(value(CHROME, "position"), Some("relative"));
    }
}
