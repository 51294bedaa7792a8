// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`OverlayHost`] that records what a rendering host would show.
//!
//! Pages are registered as routes; a load stays pending until
//! [`MemoryHost::complete_load`]. Pin positions come from the last applied
//! [`ScreenLayout`], which is the geometry a browser renders for the same
//! transforms.

use std::collections::HashMap;

use inclined_screen::{ScreenLayout, ScreenProbe};
use inclined_tour::{
    EmbeddedPage, Introduction, MarkedElement, MarkupNames, Pin, PinId, ReadyCallback,
};
use kurbo::{Point, Rect, Size};

use crate::host::{Control, OverlayHost, OverlayPlan};
use crate::href::strip_fragment;

#[derive(Clone, Debug, PartialEq)]
struct MemoryElement {
    bounds: Rect,
    attributes: Vec<(String, String)>,
}

impl MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

/// Metadata and attributed elements of one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryDocument {
    metadata: Vec<(String, String)>,
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `meta` entry.
    #[must_use]
    pub fn with_meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.metadata.push((name.into(), content.into()));
        self
    }

    /// Adds an element with `bounds` and raw attributes, in document order.
    #[must_use]
    pub fn with_element(mut self, bounds: Rect, attributes: &[(&str, &str)]) -> Self {
        self.elements.push(MemoryElement {
            bounds,
            attributes: attributes
                .iter()
                .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
        });
        self
    }

    /// Adds an element marked with the default attribute names.
    #[must_use]
    pub fn with_marked(self, bounds: Rect, headline: &str, priority: Option<&str>) -> Self {
        let names = MarkupNames::default();
        let mut attributes = vec![(names.headline(), headline)];
        if let Some(priority) = priority {
            attributes.push((names.priority(), priority));
        }
        self.with_element(bounds, &attributes)
    }
}

/// A loaded in-memory page.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryPage {
    url: String,
    document: MemoryDocument,
}

impl MemoryPage {
    /// URL the page was loaded from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EmbeddedPage for MemoryPage {
    fn metadata(&self, name: &str) -> Option<String> {
        self.document
            .metadata
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, content)| content.clone())
    }

    fn marked_elements(&self, names: &MarkupNames) -> Vec<MarkedElement> {
        self.document
            .elements
            .iter()
            .filter_map(|element| {
                Some(MarkedElement {
                    bounds: element.bounds,
                    headline: element.attribute(names.headline())?,
                    body: element.attribute(names.body()),
                    priority: element.attribute(names.priority()),
                })
            })
            .collect()
    }

    fn on_ready(&self, callback: ReadyCallback) {
        // In-memory pages are complete as soon as they exist.
        callback();
    }
}

#[derive(Clone, Debug)]
enum Route {
    Document(MemoryDocument),
    Blocked,
}

/// Headless [`OverlayHost`].
#[derive(Debug)]
pub struct MemoryHost {
    location: String,
    host_metadata: Vec<(String, String)>,
    viewport: Size,
    supports_transforms: bool,
    routes: HashMap<String, Route>,

    plan: Option<OverlayPlan>,
    visible: bool,
    scroll_locked: bool,
    tour_links_visible: Option<bool>,
    layout: Option<ScreenLayout>,
    introduction: Introduction,
    controls: HashMap<Control, bool>,
    pins: Vec<(PinId, Pin)>,
    active_pin: Option<PinId>,
    pending: Option<String>,
    page: Option<MemoryPage>,
    page_revealed: bool,
    requests: Vec<String>,
    key_attachments: usize,
    next_token: u64,
}

impl MemoryHost {
    /// A capable host at `location` with a 1000×800 viewport.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            host_metadata: Vec::new(),
            viewport: Size::new(1000.0, 800.0),
            supports_transforms: true,
            routes: HashMap::new(),
            plan: None,
            visible: false,
            scroll_locked: false,
            tour_links_visible: None,
            layout: None,
            introduction: Introduction::default(),
            controls: HashMap::new(),
            pins: Vec::new(),
            active_pin: None,
            pending: None,
            page: None,
            page_revealed: false,
            requests: Vec::new(),
            key_attachments: 0,
            next_token: 1,
        }
    }

    /// Returns the host with a different viewport size.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Returns the host with transform support switched on or off.
    #[must_use]
    pub fn with_transforms(mut self, supported: bool) -> Self {
        self.supports_transforms = supported;
        self
    }

    /// Returns the host with a `meta` entry on the host page itself.
    #[must_use]
    pub fn with_host_meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.host_metadata.push((name.into(), content.into()));
        self
    }

    /// Returns the host serving `document` at `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, document: MemoryDocument) -> Self {
        self.routes.insert(url.into(), Route::Document(document));
        self
    }

    /// Returns the host with `url` loading a page whose document cannot be read.
    #[must_use]
    pub fn with_blocked_page(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Blocked);
        self
    }

    /// Resizes the viewport. The controller picks this up on its next update.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Finishes the pending load.
    ///
    /// Returns `false` when no load was pending. Unknown and blocked routes
    /// complete with an unreadable document.
    pub fn complete_load(&mut self) -> bool {
        let Some(url) = self.pending.take() else {
            return false;
        };
        let route = self.routes.get(route_key(&url)).cloned();
        self.page = match route {
            Some(Route::Document(document)) => Some(MemoryPage { url, document }),
            Some(Route::Blocked) | None => None,
        };
        true
    }

    /// The plan of the mounted overlay.
    pub fn plan(&self) -> Option<&OverlayPlan> {
        self.plan.as_ref()
    }

    /// Whether the overlay root is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether scrolling of the mount parent is locked.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Visibility last set for the host page's tour links.
    pub fn tour_links_visible(&self) -> Option<bool> {
        self.tour_links_visible
    }

    /// The last applied layout.
    pub fn layout(&self) -> Option<&ScreenLayout> {
        self.layout.as_ref()
    }

    /// Current introduction text.
    pub fn introduction(&self) -> &Introduction {
        &self.introduction
    }

    /// Whether `control` is shown. Controls are hidden when not mounted.
    pub fn control_visible(&self, control: Control) -> bool {
        self.controls.get(&control).copied().unwrap_or(false)
    }

    /// Pins currently drawn, in placement order.
    pub fn pins(&self) -> &[(PinId, Pin)] {
        &self.pins
    }

    /// The highlighted pin.
    pub fn active_pin(&self) -> Option<&Pin> {
        let id = self.active_pin?;
        self.pins.iter().find(|(pin, _)| *pin == id).map(|(_, pin)| pin)
    }

    /// Headline of the highlighted pin.
    pub fn active_headline(&self) -> Option<&str> {
        self.active_pin().map(|pin| pin.headline.as_str())
    }

    /// Finds a drawn pin by headline.
    pub fn pin_id(&self, headline: &str) -> Option<PinId> {
        self.pins
            .iter()
            .find(|(_, pin)| pin.headline == headline)
            .map(|(id, _)| *id)
    }

    /// URL of the load in flight.
    pub fn pending_url(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Every URL requested so far.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// Whether the embedded page is shown.
    pub fn is_page_revealed(&self) -> bool {
        self.page_revealed
    }

    /// How many times key handling was attached inside a loaded page.
    pub fn key_attachments(&self) -> usize {
        self.key_attachments
    }
}

fn route_key(url: &str) -> &str {
    let base = strip_fragment(url);
    base.split_once('?').map_or(base, |(path, _)| path)
}

impl ScreenProbe for MemoryHost {
    fn probe(&mut self, panel_point: Point) -> Option<Point> {
        self.plan.as_ref()?;
        self.layout.as_mut()?.probe(panel_point)
    }
}

impl OverlayHost for MemoryHost {
    type Page = MemoryPage;

    fn supports_transforms(&self) -> bool {
        self.supports_transforms
    }

    fn viewport_width(&self) -> f64 {
        self.viewport.width
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    fn host_metadata(&self, name: &str) -> Option<String> {
        self.host_metadata
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, content)| content.clone())
    }

    fn set_tour_links_visible(&mut self, visible: bool) {
        self.tour_links_visible = Some(visible);
    }

    fn mount(&mut self, plan: &OverlayPlan) {
        self.plan = Some(plan.clone());
        self.visible = false;
        self.page_revealed = false;
    }

    fn unmount(&mut self) {
        self.plan = None;
        self.visible = false;
        self.layout = None;
        self.introduction = Introduction::default();
        self.controls.clear();
        self.pins.clear();
        self.active_pin = None;
        self.pending = None;
        self.page = None;
        self.page_revealed = false;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn container_size(&self) -> Size {
        self.viewport
    }

    fn apply_layout(&mut self, layout: &ScreenLayout) {
        self.layout = Some(layout.clone());
    }

    fn set_introduction(&mut self, introduction: &Introduction) {
        self.introduction = introduction.clone();
    }

    fn set_control_visible(&mut self, control: Control, visible: bool) {
        self.controls.insert(control, visible);
    }

    fn clear_pins(&mut self) {
        self.pins.clear();
        self.active_pin = None;
    }

    fn add_pin(&mut self, id: PinId, pin: &Pin) {
        self.pins.push((id, pin.clone()));
    }

    fn set_active_pin(&mut self, id: Option<PinId>) {
        self.active_pin = id;
    }

    fn load_page(&mut self, url: &str) {
        self.page_revealed = false;
        self.page = None;
        self.pending = Some(url.to_owned());
        self.requests.push(url.to_owned());
    }

    fn reveal_page(&mut self) {
        self.page_revealed = true;
    }

    fn page(&self) -> Option<&MemoryPage> {
        self.page.as_ref()
    }

    fn attach_page_keys(&mut self) {
        self.key_attachments += 1;
    }

    fn cache_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }
}
