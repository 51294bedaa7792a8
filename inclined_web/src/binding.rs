// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use inclined::{Controller, EmbeddedPage, OverlayHost, PinTarget};
use tracing::{debug, trace};
use wasm_bindgen::prelude::*;

use crate::config::parse_options;
use crate::dom::{Dispatch, DomEvent, DomHost, key_listener};

#[derive(Debug, Default)]
struct Shared {
    controller: RefCell<Option<Controller<DomHost>>>,
    listeners: RefCell<Vec<EventListener>>,
}

/// Feeds one DOM event to the controller.
///
/// Events that arrive while the controller is already busy (a DOM call
/// dispatching synchronously back into the tour) are dropped.
fn dispatch(shared: &Weak<Shared>, event: DomEvent) -> bool {
    let Some(shared) = shared.upgrade() else {
        return false;
    };
    let Ok(mut slot) = shared.controller.try_borrow_mut() else {
        trace!(?event, "controller busy; dropping event");
        return false;
    };
    let Some(tour) = slot.as_mut() else {
        return false;
    };
    match event {
        DomEvent::FrameLoaded => {
            tour.host_mut().refresh_page();
            let page = tour.host().page().cloned();
            drop(slot);
            let weak = Rc::downgrade(&shared);
            let ready = move || {
                dispatch(&weak, DomEvent::PageReady);
            };
            match page {
                Some(page) => page.on_ready(Box::new(ready)),
                None => ready(),
            }
            false
        }
        DomEvent::PageReady => {
            tour.page_ready();
            false
        }
        DomEvent::PinHovered(id) => {
            let _ = tour.hover_pin(id);
            false
        }
        DomEvent::Control(control) => {
            tour.control_activated(control);
            true
        }
        DomEvent::Key(input) => tour.handle_key(&input),
    }
}

/// A guided tour in the current page.
///
/// ```js
/// const tour = new InclinedTour('{"default_page": "/tour/start.html"}');
/// document.querySelector('.inclined-link').onclick = () => tour.navigate().show();
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct InclinedTour {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl InclinedTour {
    /// Creates a tour from a JSON `TourOptions` object, mounted under the
    /// element matching `mount` (default `body`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>, mount: Option<String>) -> Result<Self, JsValue> {
        let options = parse_options(config.as_deref())?;
        let shared = Rc::new(Shared::default());

        let weak = Rc::downgrade(&shared);
        let sink: Dispatch = Rc::new(move |event| dispatch(&weak, event));
        let host = DomHost::new(mount.as_deref(), Rc::clone(&sink))?;

        let window = host.window().clone();
        let mut listeners = Vec::new();
        for event in ["resize", "load"] {
            let weak = Rc::downgrade(&shared);
            listeners.push(EventListener::new(&window, event, move |_| {
                with_tour(&weak, Controller::update);
            }));
        }
        if let Some(document) = window.document() {
            listeners.push(key_listener(&document, &sink));
        }
        *shared.listeners.borrow_mut() = listeners;

        let controller = Controller::new(host, options);
        debug!(supported = controller.is_supported(), "tour created");
        *shared.controller.borrow_mut() = Some(controller);
        Ok(Self { shared })
    }

    /// Shows the overlay.
    pub fn show(&self) -> Self {
        self.run(Controller::show)
    }

    /// Hides the overlay.
    pub fn hide(&self) -> Self {
        self.run(Controller::hide)
    }

    /// Whether the overlay is shown.
    pub fn visible(&self) -> bool {
        self.read(Controller::is_visible)
    }

    /// Whether this browser and viewport can show the tour.
    pub fn supported(&self) -> bool {
        self.read(Controller::is_supported)
    }

    /// Builds the overlay without showing it.
    pub fn build(&self) -> Self {
        self.run(Controller::build)
    }

    /// Recomputes the layout and pins.
    pub fn update(&self) -> Self {
        self.run(Controller::update)
    }

    /// Loads a tour page; without `href`, the default target.
    pub fn navigate(&self, href: Option<String>) -> Self {
        self.run(|tour| tour.navigate(href.as_deref()))
    }

    /// Loads the next page of the tour, if any.
    #[wasm_bindgen(js_name = showNextPage)]
    pub fn show_next_page(&self) -> Self {
        self.run(Controller::show_next_page)
    }

    /// Loads the previous page of the tour, if any.
    #[wasm_bindgen(js_name = showPreviousPage)]
    pub fn show_previous_page(&self) -> Self {
        self.run(Controller::show_previous_page)
    }

    /// Activates the following pin.
    #[wasm_bindgen(js_name = nextPin)]
    pub fn next_pin(&self) -> Self {
        self.run(|tour| {
            let _ = tour.next_pin();
        })
    }

    /// Activates the preceding pin.
    #[wasm_bindgen(js_name = previousPin)]
    pub fn previous_pin(&self) -> Self {
        self.run(|tour| {
            let _ = tour.previous_pin();
        })
    }

    /// Activates the pin at a 1-based position.
    #[wasm_bindgen(js_name = setActivePin)]
    pub fn set_active_pin(&self, index: i32) -> Self {
        self.run(|tour| {
            let _ = tour.set_active_pin(PinTarget::Index(i64::from(index)));
        })
    }

    /// 1-based position of the active pin, if any.
    #[wasm_bindgen(js_name = activePin)]
    pub fn active_pin(&self) -> Option<u32> {
        self.read(|tour| tour.navigator().active_index())
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Removes the overlay from the page.
    pub fn unmount(&self) {
        with_tour(&Rc::downgrade(&self.shared), Controller::unmount);
    }

    /// Removes the overlay and stops listening to the page.
    pub fn destroy(&self) {
        self.unmount();
        self.shared.listeners.borrow_mut().clear();
    }

    fn run(&self, f: impl FnOnce(&mut Controller<DomHost>)) -> Self {
        with_tour(&Rc::downgrade(&self.shared), f);
        Self {
            shared: Rc::clone(&self.shared),
        }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&Controller<DomHost>) -> T) -> T {
        match self.shared.controller.try_borrow() {
            Ok(slot) => slot.as_ref().map(f).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }
}

fn with_tour(shared: &Weak<Shared>, f: impl FnOnce(&mut Controller<DomHost>)) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    match shared.controller.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(tour) = slot.as_mut() {
                f(tour);
            }
        }
        Err(_) => trace!("controller busy; dropping call"),
    }
}
