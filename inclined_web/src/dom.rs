// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`OverlayHost`] over the browser DOM.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use inclined::inclined_tour::{MarkupNames, Pin, PinId, ReadyCallback};
use inclined::{
    Control, EmbeddedPage, Introduction, Key, KeyInput, Layer, MarkedElement, Modifiers,
    OverlayHost, OverlayPlan, ScreenLayout, ScreenProbe,
};
use kurbo::{Point, Rect, Size};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlIFrameElement, KeyboardEvent, Window};

use crate::DomError;
use crate::style;

const ROOT_ID: &str = "inclined";
const TOUR_LINK_SELECTOR: &str = ".inclined-link";
const ACTIVE_CLASS: &str = "inclined-active";

/// Something happened in the overlay that the controller should hear about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomEvent {
    /// The embedded frame fired `load`.
    FrameLoaded,
    /// The loaded page reported itself ready.
    PageReady,
    /// The pointer entered a pin.
    PinHovered(PinId),
    /// A control was clicked.
    Control(Control),
    /// A key went down, in the host page or the embedded one.
    Key(KeyInput),
}

/// Routes [`DomEvent`]s to whoever owns the controller. Returns `true` when the
/// event was consumed and its default action should be suppressed.
pub type Dispatch = Rc<dyn Fn(DomEvent) -> bool>;

/// Logs a failed DOM operation and drops its error.
fn absorb<T>(operation: &'static str, result: Result<T, DomError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(operation, %error, "DOM operation failed");
            None
        }
    }
}

fn create(document: &Document, tag: &str, class: Option<&str>) -> Result<HtmlElement, DomError> {
    let element = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::WrongType("HtmlElement"))?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    Ok(element)
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), DomError> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Content of the last `meta[name=...]` of `document`.
fn last_meta(document: &Document, name: &str) -> Option<String> {
    let nodes = document
        .query_selector_all(&format!("meta[name=\"{name}\"]"))
        .ok()?;
    let last = nodes.length().checked_sub(1)?;
    nodes
        .item(last)?
        .dyn_into::<Element>()
        .ok()?
        .get_attribute("content")
}

fn key_input(event: &KeyboardEvent) -> KeyInput {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::CTRL, event.ctrl_key());
    modifiers.set(Modifiers::ALT, event.alt_key());
    modifiers.set(Modifiers::META, event.meta_key());
    modifiers.set(Modifiers::SHIFT, event.shift_key());
    KeyInput::new(Key::from_dom_key(&event.key())).with_modifiers(modifiers)
}

/// Listens for `keydown` on `target` and forwards it through `dispatch`.
pub(crate) fn key_listener(target: &web_sys::EventTarget, dispatch: &Dispatch) -> EventListener {
    let dispatch = Rc::clone(dispatch);
    EventListener::new_with_options(
        target,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if dispatch(DomEvent::Key(key_input(event))) {
                event.prevent_default();
            }
        },
    )
}

/// A same-origin page loaded into the overlay's frame.
#[derive(Clone, Debug)]
pub struct FramePage {
    document: Document,
    window: Option<Window>,
    pending: Rc<RefCell<Option<EventListener>>>,
}

impl FramePage {
    fn new(document: Document, window: Option<Window>) -> Self {
        Self {
            document,
            window,
            pending: Rc::default(),
        }
    }

    /// Runs `callback` now when the document is complete, otherwise on the
    /// frame window's `load`. The listener lives as long as the page.
    fn wait_for_load(&self, ready_state: &str, callback: ReadyCallback) {
        match &self.window {
            Some(window) if ready_state != "complete" => {
                let listener = EventListener::once(window, "load", move |_| callback());
                *self.pending.borrow_mut() = Some(listener);
            }
            _ => callback(),
        }
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.window.as_ref().map_or((0.0, 0.0), |window| {
            (
                window.scroll_x().unwrap_or(0.0),
                window.scroll_y().unwrap_or(0.0),
            )
        })
    }
}

impl EmbeddedPage for FramePage {
    fn metadata(&self, name: &str) -> Option<String> {
        last_meta(&self.document, name)
    }

    fn marked_elements(&self, names: &MarkupNames) -> Vec<MarkedElement> {
        let Ok(nodes) = self
            .document
            .query_selector_all(&format!("[{}]", names.headline()))
        else {
            return Vec::new();
        };
        let (scroll_x, scroll_y) = self.scroll_offset();
        (0..nodes.length())
            .filter_map(|i| nodes.item(i)?.dyn_into::<Element>().ok())
            .filter_map(|element| {
                let rect = element.get_bounding_client_rect();
                Some(MarkedElement {
                    bounds: Rect::from_origin_size(
                        (rect.left() + scroll_x, rect.top() + scroll_y),
                        (rect.width(), rect.height()),
                    ),
                    headline: element.get_attribute(names.headline())?,
                    body: element.get_attribute(names.body()),
                    priority: element.get_attribute(names.priority()),
                })
            })
            .collect()
    }

    fn on_ready(&self, callback: ReadyCallback) {
        let ready_state = self.document.ready_state();
        self.wait_for_load(&ready_state, callback);
    }
}

#[derive(Debug)]
struct Overlay {
    root: HtmlElement,
    screen: HtmlElement,
    panel: HtmlElement,
    sized: Vec<HtmlElement>,
    frame: HtmlIFrameElement,
    headline: HtmlElement,
    body: HtmlElement,
    controls: Vec<(Control, HtmlElement)>,
    pins: Vec<(PinId, HtmlElement)>,
    listeners: Vec<EventListener>,
    pin_listeners: Vec<EventListener>,
}

/// [`OverlayHost`] that builds the overlay as DOM nodes under a mount element.
///
/// Everything the overlay creates lives under one `#inclined` root appended to
/// the mount element; the only outside changes are the mount element's
/// `overflow` and the display of the host page's tour links.
pub struct DomHost {
    window: Window,
    document: Document,
    parent: HtmlElement,
    dispatch: Dispatch,
    supports_transforms: bool,
    overlay: Option<Overlay>,
    page: Option<FramePage>,
    page_listener: Option<EventListener>,
    tokens: u64,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("parent", &self.parent)
            .field("supports_transforms", &self.supports_transforms)
            .field("overlay", &self.overlay)
            .field("page", &self.page)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// Creates a host mounting under the element matching `selector`, or under
    /// `body` when no selector is given.
    pub fn new(selector: Option<&str>, dispatch: Dispatch) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(DomError::MissingGlobal("document"))?;
        let parent = match selector {
            Some(selector) => document
                .query_selector(selector)?
                .ok_or_else(|| DomError::MissingElement(selector.to_owned()))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DomError::WrongType("HtmlElement"))?,
            None => document.body().ok_or(DomError::MissingElement("body".into()))?,
        };
        let supports_transforms =
            absorb("probe 3D transforms", probe_3d_transforms(&window, &document)).unwrap_or(false);
        Ok(Self {
            window,
            document,
            parent,
            dispatch,
            supports_transforms,
            overlay: None,
            page: None,
            page_listener: None,
            tokens: 0,
        })
    }

    /// The host window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Re-reads the frame's document after a load.
    ///
    /// Leaves no page when the document is cross-origin or not there yet.
    pub fn refresh_page(&mut self) {
        self.page = self.overlay.as_ref().and_then(|overlay| {
            Some(FramePage::new(
                overlay.frame.content_document()?,
                overlay.frame.content_window(),
            ))
        });
    }

    fn build(&self, plan: &OverlayPlan) -> Result<Overlay, DomError> {
        let document = &self.document;
        let root = create(document, "div", None)?;
        root.set_id(ROOT_ID);
        set_styles(&root, style::ROOT)?;
        set_styles(&root, &[("display", "none")])?;

        let screen = create(document, "div", Some("inclined-screen"))?;
        set_styles(&screen, style::SCREEN)?;
        let panel = create(document, "div", None)?;
        set_styles(&panel, style::PANEL)?;
        screen.append_child(&panel)?;

        let frame = document
            .create_element("iframe")?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| DomError::WrongType("HtmlIFrameElement"))?;
        frame.set_attribute("scrolling", "no")?;
        set_styles(&frame, &[("visibility", "hidden"), ("opacity", "0")])?;

        let headline = create(document, "h1", None)?;
        let body = create(document, "p", None)?;
        let mut sized = Vec::new();

        for layer in &plan.layers {
            match *layer {
                Layer::Background => {
                    let background = create(document, "div", Some("inclined-background"))?;
                    set_styles(&background, style::BACKGROUND)?;
                    root.append_child(&background)?;
                    root.append_child(&screen)?;
                }
                Layer::Shadow => {
                    let shadow = create(document, "div", Some("inclined-shadow"))?;
                    set_styles(&shadow, style::PANEL)?;
                    shadow.append_child(&create(document, "span", None)?)?;
                    panel.append_child(&shadow)?;
                    sized.push(shadow);
                }
                Layer::Border { offset } => {
                    let border = create(document, "div", None)?;
                    let shift = ScreenLayout::border_css(offset);
                    set_styles(&border, style::PANEL)?;
                    set_styles(&border, &[("transform", shift.as_str())])?;
                    panel.append_child(&border)?;
                    sized.push(border);
                }
                Layer::PageFrame => {
                    let frame_background =
                        create(document, "div", Some("inclined-iframe-background"))?;
                    set_styles(&frame_background, style::PANEL)?;
                    frame_background.append_child(&frame)?;
                    panel.append_child(&frame_background)?;
                    sized.push(frame_background);
                    sized.push(frame.clone().unchecked_into());
                }
                Layer::Blind => {
                    panel.append_child(&create(document, "div", Some("inclined-blind"))?)?;
                }
                Layer::Introduction => {
                    let introduction = create(document, "div", Some("inclined-introduction"))?;
                    set_styles(&introduction, style::CHROME)?;
                    introduction.append_child(&headline)?;
                    introduction.append_child(&body)?;
                    root.append_child(&introduction)?;
                }
            }
        }
        if screen.parent_node().is_none() {
            root.append_child(&screen)?;
        }

        let mut listeners = Vec::new();
        let dispatch = Rc::clone(&self.dispatch);
        listeners.push(EventListener::new(&frame, "load", move |_| {
            dispatch(DomEvent::FrameLoaded);
        }));

        let mut controls = Vec::with_capacity(plan.controls.len());
        for &control in &plan.controls {
            let link = create(document, "a", Some(control.class_name()))?;
            link.set_attribute("href", "#")?;
            link.set_text_content(Some(control.label()));
            set_styles(&link, style::CHROME)?;
            root.append_child(&link)?;
            let dispatch = Rc::clone(&self.dispatch);
            listeners.push(EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    dispatch(DomEvent::Control(control));
                },
            ));
            controls.push((control, link));
        }

        self.parent.append_child(&root)?;
        Ok(Overlay {
            root,
            screen,
            panel,
            sized,
            frame,
            headline,
            body,
            controls,
            pins: Vec::new(),
            listeners,
            pin_listeners: Vec::new(),
        })
    }

    fn try_probe(&self, panel_point: Point) -> Result<Option<Point>, DomError> {
        let Some(overlay) = &self.overlay else {
            return Ok(None);
        };
        let probe = create(&self.document, "span", None)?;
        set_styles(&probe, style::PROBE)?;
        set_styles(
            &probe,
            &[
                ("left", px(panel_point.x).as_str()),
                ("top", px(panel_point.y).as_str()),
            ],
        )?;
        overlay.panel.append_child(&probe)?;
        let at = probe.get_bounding_client_rect();
        let origin = overlay.root.get_bounding_client_rect();
        probe.remove();
        Ok(Some(Point::new(
            at.left() - origin.left(),
            at.top() - origin.top(),
        )))
    }

    fn try_apply_layout(&self, layout: &ScreenLayout) -> Result<(), DomError> {
        let Some(overlay) = &self.overlay else {
            return Ok(());
        };
        let panel = layout.panel_size();
        let (width, height) = (px(panel.width), px(panel.height));
        for element in &overlay.sized {
            set_styles(element, &[("width", width.as_str()), ("height", height.as_str())])?;
        }
        set_styles(&overlay.panel, &[("transform", layout.screen_css().as_str())])?;
        let offset = layout.offset();
        set_styles(
            &overlay.screen,
            &[
                ("transform", layout.scale_css().as_str()),
                ("top", px(offset.y).as_str()),
                ("left", px(offset.x).as_str()),
            ],
        )
    }

    fn try_add_pin(&mut self, id: PinId, pin: &Pin) -> Result<(), DomError> {
        let Some(overlay) = &mut self.overlay else {
            return Ok(());
        };
        let document = &self.document;
        let element = create(document, "div", Some("inclined-pin"))?;
        let card = create(document, "div", None)?;
        let headline = create(document, "h2", None)?;
        headline.set_text_content(Some(&pin.headline));
        let body = create(document, "p", None)?;
        body.set_text_content(Some(&pin.body));
        card.append_child(&headline)?;
        card.append_child(&body)?;
        element.append_child(&card)?;
        set_styles(&element, style::PIN)?;
        set_styles(
            &element,
            &[
                ("top", px(pin.origin.y).as_str()),
                ("left", px(pin.origin.x).as_str()),
            ],
        )?;
        element.set_attribute("inclined_priority", &pin.priority.to_string())?;

        let dispatch = Rc::clone(&self.dispatch);
        overlay
            .pin_listeners
            .push(EventListener::new(&element, "mouseover", move |_| {
                dispatch(DomEvent::PinHovered(id));
            }));
        overlay.root.append_child(&element)?;
        overlay.pins.push((id, element));
        Ok(())
    }

    fn try_set_tour_links_visible(&self, visible: bool) -> Result<(), DomError> {
        let links = self.document.query_selector_all(TOUR_LINK_SELECTOR)?;
        let display = if visible { "" } else { "none" };
        for i in 0..links.length() {
            if let Some(link) = links.item(i).and_then(|node| node.dyn_into::<HtmlElement>().ok())
            {
                set_styles(&link, &[("display", display)])?;
            }
        }
        Ok(())
    }
}

fn probe_3d_transforms(window: &Window, document: &Document) -> Result<bool, DomError> {
    let body = document
        .body()
        .ok_or(DomError::MissingElement("body".into()))?;
    let probe = create(document, "p", None)?;
    body.append_child(&probe)?;
    set_styles(&probe, &[("transform", "translate3d(1px,1px,1px)")])?;
    let computed = window
        .get_computed_style(&probe)?
        .map(|style| style.get_property_value("transform"))
        .transpose()?;
    probe.remove();
    Ok(computed.is_some_and(|value| !value.is_empty() && value != "none"))
}

fn toggle(element: &HtmlElement, visible: bool) -> Result<(), DomError> {
    set_styles(element, &[("display", if visible { "" } else { "none" })])
}

impl ScreenProbe for DomHost {
    fn probe(&mut self, panel_point: Point) -> Option<Point> {
        absorb("probe screen", self.try_probe(panel_point)).flatten()
    }
}

impl OverlayHost for DomHost {
    type Page = FramePage;

    fn supports_transforms(&self) -> bool {
        self.supports_transforms
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn host_metadata(&self, name: &str) -> Option<String> {
        last_meta(&self.document, name)
    }

    fn set_tour_links_visible(&mut self, visible: bool) {
        absorb(
            "toggle tour links",
            self.try_set_tour_links_visible(visible),
        );
    }

    fn mount(&mut self, plan: &OverlayPlan) {
        self.overlay = absorb("build overlay", self.build(plan));
    }

    fn unmount(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.root.remove();
            drop(overlay.listeners);
        }
        self.page = None;
        drop(self.page_listener.take());
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(overlay) = &self.overlay {
            let display = if visible { "block" } else { "none" };
            absorb("toggle overlay", set_styles(&overlay.root, &[("display", display)]));
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let style = self.parent.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(drop)
        };
        absorb("lock scrolling", result.map_err(DomError::from));
    }

    fn container_size(&self) -> Size {
        self.overlay.as_ref().map_or(Size::ZERO, |overlay| {
            Size::new(
                f64::from(overlay.screen.offset_width()),
                f64::from(overlay.screen.offset_height()),
            )
        })
    }

    fn apply_layout(&mut self, layout: &ScreenLayout) {
        absorb("apply layout", self.try_apply_layout(layout));
    }

    fn set_introduction(&mut self, introduction: &Introduction) {
        if let Some(overlay) = &self.overlay {
            overlay
                .headline
                .set_text_content(Some(&introduction.headline));
            overlay.body.set_text_content(Some(&introduction.body));
        }
    }

    fn set_control_visible(&mut self, control: Control, visible: bool) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        for (_, link) in overlay.controls.iter().filter(|(c, _)| *c == control) {
            absorb("toggle control", toggle(link, visible));
        }
    }

    fn clear_pins(&mut self) {
        if let Some(overlay) = &mut self.overlay {
            overlay.pin_listeners.clear();
            for (_, pin) in overlay.pins.drain(..) {
                pin.remove();
            }
        }
    }

    fn add_pin(&mut self, id: PinId, pin: &Pin) {
        absorb("add pin", self.try_add_pin(id, pin));
    }

    fn set_active_pin(&mut self, id: Option<PinId>) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        for (pin_id, element) in &overlay.pins {
            let result = element
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, Some(*pin_id) == id);
            absorb("highlight pin", result.map(drop).map_err(DomError::from));
        }
    }

    fn load_page(&mut self, url: &str) {
        self.page = None;
        drop(self.page_listener.take());
        if let Some(overlay) = &self.overlay {
            trace!(url, "loading frame");
            absorb(
                "hide frame",
                set_styles(&overlay.frame, &[("visibility", "hidden"), ("opacity", "0")]),
            );
            overlay.frame.set_src(url);
        }
    }

    fn reveal_page(&mut self) {
        if let Some(overlay) = &self.overlay {
            absorb(
                "reveal frame",
                set_styles(&overlay.frame, &[("visibility", "visible"), ("opacity", "1")]),
            );
        }
    }

    fn page(&self) -> Option<&FramePage> {
        self.page.as_ref()
    }

    fn attach_page_keys(&mut self) {
        self.page_listener = self
            .page
            .as_ref()
            .and_then(|page| page.window.as_ref())
            .map(|window| key_listener(window, &self.dispatch));
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "millisecond timestamps fit in u64"
    )]
    fn cache_token(&mut self) -> u64 {
        self.tokens = self.tokens.wrapping_add(1);
        (js_sys::Date::now() as u64).wrapping_mul(1000).wrapping_add(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::{Event, Window};

    use super::FramePage;

    wasm_bindgen_test_configure!(run_in_browser);

    fn current_page() -> (FramePage, Window) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        (FramePage::new(document, Some(window.clone())), window)
    }

    fn fire_load(window: &Window) {
        let event = Event::new("load").unwrap();
        window.dispatch_event(&event).unwrap();
    }

    fn flag() -> (Rc<Cell<bool>>, Box<dyn FnOnce()>) {
        let called = Rc::new(Cell::new(false));
        let set = Rc::clone(&called);
        (called, Box::new(move || set.set(true)))
    }

    #[wasm_bindgen_test]
    fn complete_document_is_ready_at_once() {
        let (page, _) = current_page();
        let (called, callback) = flag();
        page.wait_for_load("complete", callback);
        assert!(called.get());
        assert!(page.pending.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn loading_document_waits_for_its_window() {
        let (page, window) = current_page();
        let (called, callback) = flag();
        page.wait_for_load("loading", callback);
        assert!(!called.get());
        fire_load(&window);
        assert!(called.get());
    }

    #[wasm_bindgen_test]
    fn pending_listener_goes_away_with_the_page() {
        let (page, window) = current_page();
        let copy = page.clone();
        let (called, callback) = flag();
        copy.wait_for_load("interactive", callback);
        drop(copy);
        assert!(page.pending.borrow().is_some(), "clones share the listener");

        drop(page);
        fire_load(&window);
        assert!(!called.get());
    }
}
