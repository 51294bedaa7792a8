// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for walking a tour page with the `TourNavigator`.
//!
//! These drive the navigator the way a controller does: pins arrive in
//! document order with mixed priorities, and stepping runs off either end.

use inclined_tour::{
    Key, KeyInput, PageFlow, Pin, PinStep, PinTarget, TourNavigator, Transition, step_for_key,
};
use kurbo::Point;
use pretty_assertions::assert_eq;

fn page(pins: &[(&str, u32)], flow: PageFlow) -> TourNavigator {
    let mut nav = TourNavigator::new();
    nav.replace_pins(
        pins.iter()
            .map(|&(headline, priority)| Pin::new(Point::ZERO, headline, "", priority)),
    );
    nav.set_flow(flow);
    nav
}

fn active_headline(nav: &TourNavigator) -> Option<String> {
    let id = nav.active_pin()?;
    Some(nav.pins().get(id)?.headline.clone())
}

#[test]
fn walking_forward_visits_groups_in_priority_order() {
    let mut nav = page(
        &[("intro", 1), ("detail", 3), ("menu", 2), ("footer", 1)],
        PageFlow::default(),
    );

    let mut visited = Vec::new();
    for _ in 0..5 {
        let _ = nav.next();
        visited.push(active_headline(&nav).unwrap());
    }
    // Without a next page, the walk wraps back to the first pin.
    assert_eq!(visited, ["intro", "footer", "menu", "detail", "intro"]);
}

#[test]
fn keyboard_steps_drive_the_navigator() {
    let mut nav = page(
        &[("a", 1), ("b", 1)],
        PageFlow::new(Some("next.html".into()), Some("prev.html".into())),
    );

    let mut outcomes = Vec::new();
    for key in [Key::Space, Key::ArrowRight, Key::Enter] {
        let step = step_for_key(&KeyInput::new(key)).unwrap();
        assert_eq!(step, PinStep::Next);
        outcomes.push(nav.next());
    }
    assert_eq!(outcomes[2], Transition::ShowNextPage);
    assert!(matches!(outcomes[1], Transition::Activated { index: 2, .. }));
}

#[test]
fn selecting_by_reference_then_stepping_back() {
    let mut nav = page(&[("a", 2), ("b", 1)], PageFlow::default());
    // "a" sorts second because of its priority.
    let a = nav.pins().iter().find(|(_, p)| p.headline == "a").unwrap().0;
    assert_eq!(nav.set_active(a), Transition::Activated { id: a, index: 2 });
    let _ = nav.previous();
    assert_eq!(active_headline(&nav).as_deref(), Some("b"));
    // Before the first pin, with no previous page, wraps to the first pin.
    let _ = nav.previous();
    assert_eq!(active_headline(&nav).as_deref(), Some("b"));
    assert_eq!(nav.set_active(PinTarget::Index(0)), nav.set_active(PinTarget::Index(1)));
}
