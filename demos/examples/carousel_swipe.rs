// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying recorded pointer traces through the gesture tracker.
//!
//! Three gestures on a four-slide carousel:
//! - a slow drag that ends nearer the next slide,
//! - a short fast flick that would otherwise snap back,
//! - a mostly vertical pan that is handed back to the platform.
//!
//! Run:
//! - `cargo run -p understory_carousel_demos --example carousel_swipe`
//! - `RUST_LOG=understory_carousel=trace cargo run -p understory_carousel_demos --example carousel_swipe`

use understory_carousel::Carousel;
use understory_carousel::adapters::headless::{
    BoxModel, HeadlessElement, HeadlessViewport, run_animations,
};
use understory_carousel::config::{CarouselConfig, ManualClock};
use understory_carousel::events::{CarouselEvent, EventKind};
use understory_carousel::types::{GestureKind, GestureResponse, PointerSample};

/// One recorded sample: milliseconds since the previous one, then position.
type Step = (f64, f64, f64);

fn replay(
    carousel: &mut Carousel<HeadlessViewport>,
    clock: &ManualClock,
    trace: &[Step],
) -> Vec<GestureResponse> {
    let mut out = Vec::new();
    let Some((&(_, x0, y0), rest)) = trace.split_first() else {
        return out;
    };
    out.push(carousel.handle_gesture(GestureKind::Start, PointerSample::at(x0, y0)));
    let (mut x, mut y) = (x0, y0);
    for &(dt, sx, sy) in rest {
        clock.advance(dt);
        x = sx;
        y = sy;
        out.push(carousel.handle_gesture(GestureKind::Move, PointerSample::at(x, y)));
    }
    out.push(carousel.handle_gesture(GestureKind::End, PointerSample::at(x, y)));
    run_animations(carousel);
    out
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "understory_carousel=debug".into()),
        )
        .init();

    let host = HeadlessViewport::new(
        BoxModel::sized(360.0, 640.0),
        vec![BoxModel::sized(360.0, 640.0); 4],
    );
    let (viewport, container, slides) = host.elements();
    let clock = ManualClock::new();
    let config = CarouselConfig::default().with_clock(clock.clone());
    let mut carousel = Carousel::new(host, viewport, container, slides, config);
    carousel.subscribe(EventKind::SwipeStart, |_| println!("  swipe started"));
    carousel.subscribe(EventKind::Change, |e| {
        if let CarouselEvent::Change(i) = e {
            println!("  change -> {i}");
        }
    });
    carousel.init(0);

    println!("== Slow drag ==");
    let slow: Vec<Step> = (0..=24)
        .map(|i| (50.0, 300.0 - 10.0 * f64::from(i), 100.0))
        .collect();
    replay(&mut carousel, &clock, &slow);
    let after_slow = carousel.current();

    println!("== Quick flick ==");
    let flick = [
        (0.0, 200.0, 100.0),
        (16.0, 180.0, 101.0),
        (16.0, 150.0, 102.0),
    ];
    replay(&mut carousel, &clock, &flick);
    let after_flick = carousel.current();

    println!("== Vertical pan ==");
    let pan = [
        (0.0, 200.0, 400.0),
        (16.0, 198.0, 360.0),
        (16.0, 120.0, 300.0),
    ];
    let responses = replay(&mut carousel, &clock, &pan);
    println!("  responses: {responses:?}");

    let left = carousel.adapter().measure_left(HeadlessElement::Container);
    println!("== Final ==\n  slide={:?} left={left}", carousel.current());

    assert_eq!(after_slow, Some(1));
    assert_eq!(after_flick, Some(2));
    assert_eq!(carousel.current(), Some(2));
    assert_eq!(responses[1], GestureResponse::PassThrough);
    assert_eq!(left, -720.0);
}
