// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Carousel`] facade: a [`SlideController`] paired with its [`GestureTracker`].

use alloc::vec::Vec;

use crate::config::CarouselConfig;
use crate::controller::SlideController;
use crate::events::{CarouselEvent, EventKind, Subscription};
use crate::gesture::{GesturePhase, GestureTracker};
use crate::types::{AnimationToken, GestureKind, GestureResponse, PointerSample, ViewportAdapter};

/// A paged horizontal carousel driven by a host [`ViewportAdapter`].
///
/// ## Usage
///
/// - Construct with [`Carousel::new`], then call [`Carousel::init`].
/// - Forward gesture events for the kinds the adapter was asked to
///   [`subscribe`](ViewportAdapter::subscribe) to [`Carousel::handle_gesture`],
///   and suppress the platform default when it answers
///   [`GestureResponse::Consumed`].
/// - Return every completion token handed to
///   [`ViewportAdapter::animate`] through [`Carousel::finish_animation`].
/// - Call [`Carousel::teardown`] to restore the page.
#[derive(Debug)]
pub struct Carousel<A: ViewportAdapter> {
    controller: SlideController<A>,
    tracker: GestureTracker,
}

impl<A: ViewportAdapter> Carousel<A> {
    /// Create a carousel over `slides`, laid out inside `container`, shown through `viewport`.
    pub fn new(
        adapter: A,
        viewport: A::Element,
        container: A::Element,
        slides: Vec<A::Element>,
        config: CarouselConfig,
    ) -> Self {
        Self {
            controller: SlideController::new(adapter, viewport, container, slides, config),
            tracker: GestureTracker::new(),
        }
    }

    /// See [`SlideController::init`].
    pub fn init(&mut self, start: usize) {
        self.tracker.reset();
        self.controller.init(start);
    }

    /// See [`SlideController::go_to`].
    pub fn go_to(&mut self, index: usize, skip_animation: bool) -> bool {
        self.controller.go_to(index, skip_animation)
    }

    /// See [`SlideController::teardown`]. Any gesture in flight is dropped.
    pub fn teardown(&mut self) {
        self.tracker.reset();
        self.controller.teardown();
    }

    /// Feed a pointer sample; see [`GestureTracker::handle`].
    pub fn handle_gesture(&mut self, kind: GestureKind, sample: PointerSample) -> GestureResponse {
        self.tracker.handle(&mut self.controller, kind, sample)
    }

    /// See [`SlideController::finish_animation`].
    pub fn finish_animation(&mut self, token: AnimationToken) -> bool {
        self.controller.finish_animation(token)
    }

    /// See [`SlideController::reset_widths`].
    pub fn reset_widths(&mut self) {
        self.controller.reset_widths();
    }

    /// See [`SlideController::fit_current`].
    pub fn fit_current(&mut self, animate: bool) {
        self.controller.fit_current(animate);
    }

    /// Subscribe to notifications of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.controller.subscribe(kind, handler)
    }

    /// Subscribe to the next notification of `kind` only.
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.controller.subscribe_once(kind, handler)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.controller.unsubscribe(subscription)
    }

    /// The current slide index.
    pub fn current(&self) -> Option<usize> {
        self.controller.current()
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.controller.len()
    }

    /// True if there are no slides.
    pub fn is_empty(&self) -> bool {
        self.controller.is_empty()
    }

    /// Current snap points.
    pub fn snap_points(&self) -> Vec<f64> {
        self.controller.snap_points()
    }

    /// Gesture phase.
    pub fn gesture_phase(&self) -> GesturePhase {
        self.tracker.phase()
    }

    /// True while a horizontal swipe is dragging the container.
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// The slide controller.
    pub fn controller(&self) -> &SlideController<A> {
        &self.controller
    }

    /// The gesture tracker.
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// The host adapter.
    pub fn adapter(&self) -> &A {
        self.controller.adapter()
    }

    /// The host adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        self.controller.adapter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headless::{BoxModel, HeadlessElement, HeadlessViewport, run_animations};
    use crate::config::ManualClock;
    use crate::types::GestureKinds;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn carousel(config: CarouselConfig) -> Carousel<HeadlessViewport> {
        let host = HeadlessViewport::new(
            BoxModel::sized(200.0, 100.0),
            vec![
                BoxModel::sized(200.0, 100.0),
                BoxModel::sized(200.0, 120.0),
                BoxModel::sized(200.0, 100.0),
            ],
        );
        let (viewport, container, slides) = host.elements();
        Carousel::new(host, viewport, container, slides, config)
    }

    #[test]
    fn full_swipe_cycle() {
        let clock = ManualClock::new();
        let mut c = carousel(CarouselConfig::default().with_clock(clock.clone()));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        c.subscribe(EventKind::Change, move |e| sink.borrow_mut().push(*e));
        c.init(0);

        assert_eq!(
            c.handle_gesture(GestureKind::Start, PointerSample::at(150.0, 40.0)),
            GestureResponse::PassThrough
        );
        clock.advance(16.0);
        assert_eq!(
            c.handle_gesture(GestureKind::Move, PointerSample::at(120.0, 42.0)),
            GestureResponse::Consumed
        );
        assert!(c.is_dragging());
        clock.advance(16.0);
        c.handle_gesture(GestureKind::Move, PointerSample::at(40.0, 45.0));
        clock.advance(16.0);
        c.handle_gesture(GestureKind::End, PointerSample::at(40.0, 45.0));
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        assert_eq!(c.current(), Some(1));

        run_animations(&mut c);
        assert_eq!(c.adapter().measure_left(HeadlessElement::Container), -200.0);
        // Height fitted to the second slide once the snap finished.
        assert_eq!(
            c.adapter().measure(HeadlessElement::Viewport).size.height,
            120.0
        );
        assert_eq!(
            *changes.borrow(),
            vec![CarouselEvent::Change(0), CarouselEvent::Change(1)]
        );
    }

    #[test]
    fn teardown_mid_drag_drops_the_gesture() {
        let mut c = carousel(CarouselConfig::default());
        c.init(0);
        c.handle_gesture(GestureKind::Start, PointerSample::at(150.0, 40.0));
        c.handle_gesture(GestureKind::Move, PointerSample::at(100.0, 40.0));
        assert!(c.is_dragging());
        c.teardown();
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        assert!(c.adapter().subscribed().is_empty());
        assert_eq!(
            c.handle_gesture(GestureKind::End, PointerSample::at(100.0, 40.0)),
            GestureResponse::PassThrough
        );
        assert_eq!(c.current(), None);
    }

    #[test]
    fn no_touch_host_gets_no_handlers() {
        let host = HeadlessViewport::new(
            BoxModel::sized(200.0, 100.0),
            vec![BoxModel::sized(200.0, 100.0); 2],
        )
        .with_touch(false);
        let (viewport, container, slides) = host.elements();
        let mut c = Carousel::new(host, viewport, container, slides, CarouselConfig::default());
        c.init(0);
        assert_eq!(c.adapter().subscribed(), GestureKinds::empty());
        assert_eq!(
            c.handle_gesture(GestureKind::Start, PointerSample::at(1.0, 1.0)),
            GestureResponse::PassThrough
        );
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
    }

    #[test]
    fn reinit_after_teardown() {
        let mut c = carousel(CarouselConfig::instant());
        c.init(2);
        assert_eq!(c.current(), Some(2));
        c.teardown();
        c.init(1);
        assert_eq!(c.current(), Some(1));
        assert_eq!(c.adapter().measure_left(HeadlessElement::Container), -200.0);
        assert_eq!(c.adapter().subscribed(), GestureKinds::START);
    }
}
