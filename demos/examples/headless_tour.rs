// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless tour walkthrough.
//!
//! Drive a two-page tour over the in-memory host and print what a browser
//! would show after each step. Set `RUST_LOG=inclined=trace` to watch the
//! controller's lifecycle and layout logging.
//!
//! Run:
//! - `cargo run -p inclined_demos --example headless_tour`

use inclined::headless::{MemoryDocument, MemoryHost};
use inclined::{Control, Controller, Key, KeyInput, TourOptions};
use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;

fn report(step: &str, tour: &Controller<MemoryHost>) {
    let host = tour.host();
    println!("== {step}");
    println!(
        "   introduction: {:?} / {:?}",
        host.introduction().headline,
        host.introduction().body
    );
    for (id, pin) in host.pins() {
        let marker = if tour.navigator().active_pin() == Some(*id) {
            '*'
        } else {
            ' '
        };
        println!(
            "   {marker} pin {} ({:>6.1}, {:>6.1}) priority {}: {}",
            id.slot(),
            pin.origin.x,
            pin.origin.y,
            pin.priority,
            pin.headline
        );
    }
    println!(
        "   next: {}  previous: {}",
        host.control_visible(Control::NextPage),
        host.control_visible(Control::PreviousPage)
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inclined=debug")),
        )
        .init();

    let welcome = MemoryDocument::new()
        .with_meta("inclined_title", "Welcome")
        .with_meta("inclined_description", "A short tour of the dashboard.")
        .with_meta("inclined_next_url", "/tour/reports.html")
        .with_marked(Rect::new(40.0, 20.0, 400.0, 80.0), "Search", Some("2"))
        .with_marked(Rect::new(1200.0, 20.0, 1560.0, 80.0), "Account", Some("3"))
        .with_marked(Rect::new(40.0, 200.0, 800.0, 900.0), "Dashboard", Some("1"));
    let reports = MemoryDocument::new()
        .with_meta("inclined_title", "Reports")
        .with_meta("inclined_previous_url", "/tour/welcome.html")
        .with_marked(Rect::new(100.0, 100.0, 1500.0, 1200.0), "Charts", None);

    let host = MemoryHost::new("https://dashboard.example/#inclined")
        .with_viewport(Size::new(1440.0, 900.0))
        .with_page("/tour/welcome.html", welcome)
        .with_page("/tour/reports.html", reports);

    let options: TourOptions =
        serde_json::from_str(r#"{ "default_page": "/tour/welcome.html" }"#)
            .unwrap_or_default();

    // The activation fragment opens the tour right away.
    let mut tour = Controller::new(host, options);
    tour.host_mut().complete_load();
    tour.page_ready();
    report("welcome page loaded", &tour);

    let space = KeyInput::new(Key::Space);
    tour.handle_key(&space);
    report("space", &tour);
    tour.handle_key(&space);
    report("space", &tour);

    // Past the last pin: the tour moves on to the next page.
    tour.handle_key(&space);
    tour.host_mut().complete_load();
    tour.page_ready();
    report("reports page loaded", &tour);

    tour.host_mut().resize(Size::new(1024.0, 768.0));
    tour.update();
    if let Some(layout) = tour.layout() {
        println!("== resized: scale {} ({})", layout.scale(), layout.screen_css());
    }
    report("after resize", &tour);

    tour.control_activated(Control::Close);
    println!("== closed: visible = {}", tour.is_visible());

    let host = tour.into_host();
    println!("== pages requested:");
    for url in host.requests() {
        println!("   {url}");
    }
}
