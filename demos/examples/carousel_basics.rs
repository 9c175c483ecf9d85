// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Programmatic navigation over the in-memory host.
//!
//! Shows layout normalization, distance-scaled transition durations, height
//! fitting on completion, and the silent bounds check.
//!
//! Run:
//! - `cargo run -p understory_carousel_demos --example carousel_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Insets;
use understory_carousel::Carousel;
use understory_carousel::adapters::headless::{
    BoxModel, HeadlessElement, HeadlessViewport, run_animations,
};
use understory_carousel::config::CarouselConfig;
use understory_carousel::events::{CarouselEvent, EventKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "understory_carousel=debug".into()),
        )
        .init();

    let gutter = Insets::new(8.0, 0.0, 8.0, 0.0);
    let host = HeadlessViewport::new(
        BoxModel::sized(300.0, 180.0),
        vec![
            BoxModel::sized(300.0, 180.0).with_padding(gutter),
            BoxModel::sized(300.0, 240.0).with_padding(gutter),
            BoxModel::sized(300.0, 160.0).with_padding(gutter),
        ],
    );
    let (viewport, container, slides) = host.elements();
    let mut carousel = Carousel::new(host, viewport, container, slides, CarouselConfig::default());

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    carousel.subscribe(EventKind::Change, move |e| {
        if let CarouselEvent::Change(i) = e {
            sink.borrow_mut().push(*i);
        }
    });

    carousel.init(0);
    println!("== Snap points ==\n  {:?}", carousel.snap_points());

    carousel.go_to(2, false);
    let queued = carousel.adapter().queued_animations().to_vec();
    println!("== Animations after go_to(2) ==");
    for a in &queued {
        println!("  {:?} -> {:?} over {}ms", a.element, a.target, a.duration_ms);
    }
    run_animations(&mut carousel);

    let left = carousel.adapter().measure_left(HeadlessElement::Container);
    let height = carousel
        .adapter()
        .inline_style(HeadlessElement::Viewport)
        .height;
    println!("== Settled ==\n  left={left} height={height:?}");

    // Ignored: no notification, no host calls.
    carousel.go_to(7, false);

    carousel.teardown();
    println!("== Changes ==\n  {:?}", changes.borrow());

    assert_eq!(queued[0].duration_ms, 300.0);
    assert_eq!(left, -2.0 * 332.0);
    assert_eq!(height, Some(160.0));
    assert_eq!(*changes.borrow(), vec![0, 2]);
}
