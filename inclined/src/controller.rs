// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inclined_screen::{ScreenLayout, pin_origin};
use inclined_tour::{
    DEFAULT_PRIORITY, EmbeddedPage, Introduction, KeyInput, MarkupNames, PageFlow, Pin, PinId,
    PinStep, PinTarget, TourNavigator, Transition, parse_priority, step_for_key,
};
use tracing::{debug, trace};

use crate::host::{Control, Layer, OverlayHost, OverlayPlan};
use crate::href::{fragment_of, strip_fragment, with_cache_buster};
use crate::options::{Features, TourOptions};

/// Drives a guided tour through an [`OverlayHost`].
///
/// The controller owns the host and all tour state. Every operation is a no-op
/// when the host failed the support gate at construction.
///
/// Page loads are asynchronous: [`Controller::navigate`] only starts one, and
/// the host reports completion through [`Controller::page_ready`].
#[derive(Debug)]
pub struct Controller<H: OverlayHost> {
    host: H,
    options: TourOptions,
    names: MarkupNames,
    supported: bool,
    built: bool,
    visible: bool,
    awaiting_page: bool,
    current_url: Option<String>,
    layout: Option<ScreenLayout>,
    navigator: TourNavigator,
}

impl<H: OverlayHost> Controller<H> {
    /// Creates a controller over `host`.
    ///
    /// Runs the support gate, refreshes the host page's tour links and, with
    /// [`Features::AUTO_ACTIVATE`], shows the tour right away when the host
    /// location carries the activation fragment.
    pub fn new(host: H, options: TourOptions) -> Self {
        let supported =
            host.supports_transforms() && host.viewport_width() > options.min_viewport_width;
        let names = options.markup_names();
        let mut controller = Self {
            host,
            options,
            names,
            supported,
            built: false,
            visible: false,
            awaiting_page: false,
            current_url: None,
            layout: None,
            navigator: TourNavigator::new(),
        };
        debug!(prefix = controller.names.prefix(), supported, "tour controller created");
        if !supported {
            debug!("overlay transforms unsupported or viewport too narrow; tour disabled");
        }
        controller.refresh_tour_links();

        if supported && controller.options.features.contains(Features::AUTO_ACTIVATE) {
            let location = controller.host.location();
            if fragment_of(&location) == Some(controller.options.activation_fragment.as_str()) {
                debug!("activation fragment present; showing tour");
                controller.navigate(None);
                controller.show();
            }
        }
        controller
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably. Hosts use this to report their own state changes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller and returns its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Construction options.
    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    /// Whether the host passed the support gate.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether the overlay has been built.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last layout applied to the screen.
    pub fn layout(&self) -> Option<&ScreenLayout> {
        self.layout.as_ref()
    }

    /// Pins, flow and active pin of the current page.
    pub fn navigator(&self) -> &TourNavigator {
        &self.navigator
    }

    /// URL of the last page load started, cache buster included.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// The structure [`Controller::build`] asks the host to create.
    pub fn overlay_plan(&self) -> OverlayPlan {
        let screen = &self.options.screen;
        let mut layers = vec![Layer::Background, Layer::Shadow];
        layers.extend(screen.border_offsets().map(|offset| Layer::Border { offset }));
        layers.extend([Layer::PageFrame, Layer::Blind, Layer::Introduction]);
        OverlayPlan {
            layers,
            panel: screen.panel_size(),
            controls: Control::ALL.to_vec(),
        }
    }

    /// Builds the overlay once, then lays it out.
    pub fn build(&mut self) {
        if !self.supported || self.built {
            return;
        }
        let plan = self.overlay_plan();
        debug!(borders = plan.border_count(), "building overlay");
        self.host.mount(&plan);
        for control in plan.controls {
            self.host.set_control_visible(control, control.initially_visible());
        }
        self.built = true;
        self.update();
    }

    /// Same as [`Controller::build`].
    pub fn mount(&mut self) {
        self.build();
    }

    /// Removes the overlay and forgets every page it showed.
    pub fn unmount(&mut self) {
        if !self.built {
            return;
        }
        debug!("unmounting overlay");
        if self.visible {
            self.host.set_scroll_locked(false);
        }
        self.host.unmount();
        self.navigator.reset();
        self.built = false;
        self.visible = false;
        self.awaiting_page = false;
        self.current_url = None;
        self.layout = None;
    }

    /// Shows the overlay, building it first if needed.
    pub fn show(&mut self) {
        if !self.supported {
            return;
        }
        self.build();
        self.host.set_visible(true);
        self.visible = true;
        self.update();
        self.host.set_scroll_locked(true);
    }

    /// Hides the overlay and gives scrolling back to the mount parent.
    pub fn hide(&mut self) {
        if !self.supported || !self.built {
            return;
        }
        self.host.set_visible(false);
        self.visible = false;
        self.host.set_scroll_locked(false);
    }

    /// Recomputes the layout and re-places the pins of the current page.
    ///
    /// Hosts call this on every resize.
    pub fn update(&mut self) {
        self.refresh_tour_links();
        if !self.supported || !self.built {
            return;
        }
        let layout = ScreenLayout::compute(&self.options.screen, self.host.container_size());
        trace!(
            scale = layout.scale(),
            offset_x = layout.offset().x,
            offset_y = layout.offset().y,
            "applying layout"
        );
        self.host.apply_layout(&layout);
        self.layout = Some(layout);
        self.place_pins();
    }

    /// Starts loading a tour page.
    ///
    /// Without `href` (or with an empty one) the host page itself is loaded
    /// when it is a tour page or no default page is configured; otherwise the
    /// default page is.
    pub fn navigate(&mut self, href: Option<&str>) {
        if !self.supported {
            return;
        }
        self.build();

        self.navigator.reset();
        self.host.set_active_pin(None);
        self.host.clear_pins();
        self.host.set_control_visible(Control::NextPage, false);
        self.host.set_control_visible(Control::PreviousPage, false);

        let target = match href.filter(|href| !href.is_empty()) {
            Some(href) => href.to_owned(),
            None => self.default_target(),
        };
        let token = self.host.cache_token();
        let url = with_cache_buster(&target, &self.options.cache_bust_param, token);
        debug!(%url, "loading tour page");
        self.awaiting_page = true;
        self.host.load_page(&url);
        self.current_url = Some(url);
    }

    /// Picks up the freshly loaded page.
    ///
    /// Reads the introduction and flow, places pins, routes the page's key
    /// presses back here and reveals the page. A page whose document cannot be
    /// read is revealed as is.
    pub fn page_ready(&mut self) {
        if !self.supported || !self.built {
            return;
        }
        self.awaiting_page = false;
        let names = &self.names;
        let content = self
            .host
            .page()
            .map(|page| (Introduction::from_page(page, names), PageFlow::from_page(page, names)));

        let flow = match content {
            Some((introduction, flow)) => {
                debug!(headline = %introduction.headline, "tour page ready");
                self.host.set_introduction(&introduction);
                flow
            }
            None => {
                debug!("tour page document unavailable; revealing without pins");
                PageFlow::default()
            }
        };
        self.host.set_control_visible(Control::NextPage, flow.has_next());
        self.host.set_control_visible(Control::PreviousPage, flow.has_previous());
        self.navigator.set_flow(flow);

        self.place_pins();
        if self.options.features.contains(Features::KEYBOARD) && self.host.page().is_some() {
            self.host.attach_page_keys();
        }
        self.host.reveal_page();
    }

    /// Loads the next page, if the current one names it.
    pub fn show_next_page(&mut self) {
        if !self.supported {
            return;
        }
        if let Some(url) = self.navigator.flow().next_url().map(str::to_owned) {
            self.navigate(Some(&url));
        }
    }

    /// Loads the previous page, if the current one names it.
    pub fn show_previous_page(&mut self) {
        if !self.supported {
            return;
        }
        if let Some(url) = self.navigator.flow().previous_url().map(str::to_owned) {
            self.navigate(Some(&url));
        }
    }

    /// Selects the active pin by 1-based index or by id.
    ///
    /// Running off either end of the sequence may load another page. Reports
    /// [`Transition::Cleared`] without touching anything when unsupported.
    pub fn set_active_pin(&mut self, target: impl Into<PinTarget>) -> Transition {
        if !self.supported {
            return Transition::Cleared;
        }
        let transition = self.navigator.set_active(target);
        self.apply(transition)
    }

    /// Steps to the following pin.
    pub fn next_pin(&mut self) -> Transition {
        if !self.supported {
            return Transition::Cleared;
        }
        let transition = self.navigator.next();
        self.apply(transition)
    }

    /// Steps to the preceding pin.
    pub fn previous_pin(&mut self) -> Transition {
        if !self.supported {
            return Transition::Cleared;
        }
        let transition = self.navigator.previous();
        self.apply(transition)
    }

    /// The pointer entered a pin.
    pub fn hover_pin(&mut self, id: PinId) -> Transition {
        self.set_active_pin(id)
    }

    /// Handles a key press. Returns `true` when the key moved the tour to a
    /// pin or another page, in which case the host should suppress its
    /// default action.
    pub fn handle_key(&mut self, input: &KeyInput) -> bool {
        if !self.supported
            || !self.visible
            || !self.options.features.contains(Features::KEYBOARD)
        {
            return false;
        }
        let transition = match step_for_key(input) {
            Some(PinStep::Next) => self.next_pin(),
            Some(PinStep::Previous) => self.previous_pin(),
            None => return false,
        };
        !matches!(transition, Transition::Cleared)
    }

    /// A control of the overlay was clicked.
    pub fn control_activated(&mut self, control: Control) {
        match control {
            Control::PreviousPage => self.show_previous_page(),
            Control::NextPage => self.show_next_page(),
            Control::Close => self.hide(),
        }
    }

    fn default_target(&self) -> String {
        let host_is_tour_page = self.host.host_metadata(self.names.title()).is_some();
        if host_is_tour_page || self.options.default_page.is_empty() {
            strip_fragment(&self.host.location()).to_owned()
        } else {
            self.options.default_page.clone()
        }
    }

    fn refresh_tour_links(&mut self) {
        if !self.options.features.contains(Features::TOUR_LINKS) {
            return;
        }
        let visible = self.supported
            && (!self.options.default_page.is_empty()
                || self.host.host_metadata(self.names.title()).is_some());
        self.host.set_tour_links_visible(visible);
    }

    fn place_pins(&mut self) {
        self.host.clear_pins();
        if self.awaiting_page || self.layout.as_ref().is_some_and(ScreenLayout::is_degenerate) {
            self.navigator.clear_pins();
            return;
        }
        let elements = match self.host.page() {
            Some(page) => page.marked_elements(&self.names),
            None => Vec::new(),
        };
        let grouped = self.options.features.contains(Features::PRIORITY_GROUPS);

        let mut pins = Vec::with_capacity(elements.len());
        for element in elements {
            let Some(origin) = pin_origin(&mut self.host, element.bounds) else {
                trace!(headline = %element.headline, "probe unavailable; skipping pin");
                continue;
            };
            let priority = if grouped {
                parse_priority(element.priority.as_deref())
            } else {
                DEFAULT_PRIORITY
            };
            pins.push(Pin::new(
                origin,
                element.headline,
                element.body.unwrap_or_default(),
                priority,
            ));
        }

        self.navigator.replace_pins(pins);
        for (id, pin) in self.navigator.pins().iter() {
            self.host.add_pin(id, pin);
        }
        trace!(
            count = self.navigator.pins().len(),
            groups = self.navigator.pins().groups().len(),
            "placed pins"
        );
        let _ = self.set_active_pin(PinTarget::Index(1));
    }

    fn apply(&mut self, transition: Transition) -> Transition {
        match transition {
            Transition::Activated { id, index } => {
                trace!(index, "activating pin");
                self.host.set_active_pin(Some(id));
            }
            Transition::Cleared => self.host.set_active_pin(None),
            Transition::ShowNextPage => {
                self.host.set_active_pin(None);
                self.show_next_page();
            }
            Transition::ShowPreviousPage => {
                self.host.set_active_pin(None);
                self.show_previous_page();
            }
        }
        transition
    }
}
