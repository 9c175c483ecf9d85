// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless core for paged, swipeable carousels.
//!
//! ## Overview
//!
//! This crate decides where a horizontal carousel should be.
//! It lays slides out side by side, moves between them, and turns a stream of pointer samples into a swipe with elastic edges and a velocity-aware landing slide.
//! It does not draw, measure, or animate anything itself: a host toolkit implements [`ViewportAdapter`](crate::types::ViewportAdapter) and the carousel calls into it.
//!
//! ## Pieces
//!
//! - [`SlideController`](crate::controller::SlideController) owns the current index, normalizes layout on `init`, navigates with `go_to`, and restores the page on `teardown`.
//! - [`GestureTracker`](crate::gesture::GestureTracker) classifies gestures as swipes or scrolls, drags the container with a rubber-band response past either end, and resolves the release to a slide.
//! - [`Carousel`] pairs the two behind one API.
//! - [`Emitter`](crate::events::Emitter) delivers `Change` and `SwipeStart` notifications synchronously, in subscription order.
//!
//! ## Release resolution
//!
//! When a swipe ends inside the valid range, the nearest snap point wins, lower index on ties.
//! If that would leave the carousel on the slide it started on, yet the pointer was moving fast
//! (`1 / |velocity| < sensitivity`, velocity in pixels per millisecond over the last ~200 ms),
//! the carousel moves one slide in the direction of the flick instead.
//! Releases beyond either end always land on the first or last slide.
//!
//! ## Workflow
//!
//! 1) Implement [`ViewportAdapter`](crate::types::ViewportAdapter) for your toolkit (or use
//!    [`HeadlessViewport`](crate::adapters::headless::HeadlessViewport) in tests).
//! 2) Build a [`Carousel`] and call [`Carousel::init`].
//! 3) Forward subscribed gesture kinds to [`Carousel::handle_gesture`]; suppress native
//!    scrolling when it answers [`Consumed`](crate::types::GestureResponse::Consumed).
//! 4) Hand animation completion tokens back through [`Carousel::finish_animation`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_carousel::Carousel;
//! use understory_carousel::adapters::headless::{BoxModel, HeadlessViewport, run_animations};
//! use understory_carousel::config::{CarouselConfig, ManualClock};
//! use understory_carousel::events::{CarouselEvent, EventKind};
//! use understory_carousel::types::{GestureKind, PointerSample};
//!
//! let host = HeadlessViewport::new(
//!     BoxModel::sized(320.0, 200.0),
//!     vec![BoxModel::sized(320.0, 200.0); 4],
//! );
//! let (viewport, container, slides) = host.elements();
//! let clock = ManualClock::new();
//! let config = CarouselConfig::default().with_clock(clock.clone());
//! let mut carousel = Carousel::new(host, viewport, container, slides, config);
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = changes.clone();
//! carousel.subscribe(EventKind::Change, move |e| sink.borrow_mut().push(*e));
//! carousel.init(0);
//!
//! // A short, quick flick to the left still advances one slide.
//! carousel.handle_gesture(GestureKind::Start, PointerSample::at(200.0, 50.0));
//! clock.advance(30.0);
//! carousel.handle_gesture(GestureKind::Move, PointerSample::at(160.0, 52.0));
//! carousel.handle_gesture(GestureKind::End, PointerSample::at(160.0, 52.0));
//! run_animations(&mut carousel);
//!
//! assert_eq!(carousel.current(), Some(1));
//! assert_eq!(*changes.borrow(), vec![CarouselEvent::Change(0), CarouselEvent::Change(1)]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Kurbo in std mode and [`SystemClock`](crate::config::SystemClock).
//! - `libm`: math through `libm` for `no_std` builds. Without `std`, hosts supply time
//!   through [`CarouselConfig::with_clock`](crate::config::CarouselConfig::with_clock).
//! - `headless` (default): the in-memory host in [`adapters::headless`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod adapters;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod sampling;
pub mod types;

pub use carousel::Carousel;
