// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the controller and whatever actually draws the overlay.

use inclined_screen::{ScreenLayout, ScreenProbe};
use inclined_tour::{EmbeddedPage, Introduction, Pin, PinId};
use kurbo::{Size, Vec2};

/// Clickable controls of the overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Goes to the previous tour page.
    PreviousPage,
    /// Goes to the next tour page.
    NextPage,
    /// Ends the tour (hides the overlay).
    Close,
}

impl Control {
    /// Every control, in the order they are built.
    pub const ALL: [Self; 3] = [Self::PreviousPage, Self::NextPage, Self::Close];

    /// Class name used by DOM hosts.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::PreviousPage => "inclined-previous-link",
            Self::NextPage => "inclined-next-link",
            Self::Close => "inclined-close",
        }
    }

    /// Visible label, if the control has one.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Close => "End tour",
            Self::PreviousPage | Self::NextPage => "",
        }
    }

    /// Page navigation controls stay hidden until a page names a target.
    #[must_use]
    pub fn initially_visible(self) -> bool {
        matches!(self, Self::Close)
    }
}

/// One layer of the screen, listed back to front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Layer {
    /// Backdrop covering the whole overlay.
    Background,
    /// Drop shadow behind the panel.
    Shadow,
    /// One slice of the stacked border, shifted by `offset`.
    Border {
        /// Diagonal shift of this slice.
        offset: Vec2,
    },
    /// Container of the embedded page.
    PageFrame,
    /// Dimming layer above the embedded page.
    Blind,
    /// Introduction headline and body.
    Introduction,
}

/// What a host builds when the overlay is mounted.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlan {
    /// Layers, back to front.
    pub layers: Vec<Layer>,
    /// Size of the embedded page and border slices.
    pub panel: Size,
    /// Controls, in build order.
    pub controls: Vec<Control>,
}

impl OverlayPlan {
    /// Number of border slices in the plan.
    #[must_use]
    pub fn border_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|layer| matches!(layer, Layer::Border { .. }))
            .count()
    }
}

/// An owned overlay view the controller drives.
///
/// A host owns a dedicated overlay root and keeps every mutation inside it. It
/// also exposes the embedded page through [`OverlayHost::page`] and samples
/// screen positions through [`ScreenProbe`].
///
/// Hosts never report errors: anything that cannot be done is skipped, and
/// queries answer "nothing".
pub trait OverlayHost: ScreenProbe {
    /// Adapter over the embedded page.
    type Page: EmbeddedPage;

    /// Whether the host can render the screen's 3D transforms.
    fn supports_transforms(&self) -> bool;

    /// Width of the host viewport, in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Full location of the host page, including any fragment.
    fn location(&self) -> String;

    /// Content of a `meta` entry of the host page itself.
    fn host_metadata(&self, name: &str) -> Option<String>;

    /// Shows or hides the host page's links that start the tour.
    fn set_tour_links_visible(&mut self, visible: bool);

    /// Builds the overlay under its root. The overlay starts hidden.
    fn mount(&mut self, plan: &OverlayPlan);

    /// Removes everything [`OverlayHost::mount`] built.
    fn unmount(&mut self);

    /// Shows or hides the overlay root.
    fn set_visible(&mut self, visible: bool);

    /// Locks or restores scrolling of the element the overlay is mounted in.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Current size of the screen container.
    fn container_size(&self) -> Size;

    /// Applies sizes and transforms to the screen.
    fn apply_layout(&mut self, layout: &ScreenLayout);

    /// Replaces the introduction text.
    fn set_introduction(&mut self, introduction: &Introduction);

    /// Shows or hides a control.
    fn set_control_visible(&mut self, control: Control, visible: bool);

    /// Removes every pin.
    fn clear_pins(&mut self);

    /// Adds a pin. Hovering it should report [`crate::Controller::hover_pin`].
    fn add_pin(&mut self, id: PinId, pin: &Pin);

    /// Highlights one pin, or none.
    fn set_active_pin(&mut self, id: Option<PinId>);

    /// Hides the embedded page and starts loading `url` into it.
    fn load_page(&mut self, url: &str);

    /// Shows the embedded page once it is ready.
    fn reveal_page(&mut self);

    /// The embedded page, if its document can be read.
    fn page(&self) -> Option<&Self::Page>;

    /// Routes key presses inside the freshly loaded page to the controller.
    fn attach_page_keys(&mut self);

    /// A fresh value for the cache-busting query parameter.
    fn cache_token(&mut self) -> u64;
}
