// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide controller: layout normalization, navigation, and teardown.
//!
//! ## Overview
//!
//! [`SlideController`] owns the host adapter, the element handles, the
//! current slide index, and the observers. It lays slides out side by side on
//! [`init`](SlideController::init), moves the container on
//! [`go_to`](SlideController::go_to), and reverts every style it wrote on
//! [`teardown`](SlideController::teardown).
//!
//! ## Transitions
//!
//! A transition from slide `a` to slide `b` animates the container's `left`
//! to `-snap_points[b]` over `transition_speed * |a - b|` milliseconds. When
//! the host reports completion through
//! [`finish_animation`](SlideController::finish_animation), the viewport
//! height is fitted to the new slide. Skipped or zero-speed transitions
//! position the container and fit the height immediately.
//!
//! `current` is updated as soon as a transition is requested, and the
//! `Change` notification goes out before the host is asked to animate.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::config::CarouselConfig;
use crate::events::{CarouselEvent, Emitter, EventKind, Subscription};
use crate::geometry::{self, DragBounds};
use crate::types::{
    AnimationToken, GestureKind, GestureKinds, Position, Style, StyleProps, ViewportAdapter,
};

/// Owner of slide navigation state.
pub struct SlideController<A: ViewportAdapter> {
    adapter: A,
    viewport: A::Element,
    container: A::Element,
    slides: Vec<A::Element>,
    config: CarouselConfig,
    emitter: Emitter,
    current: Option<usize>,
    subscribed: GestureKinds,
    next_token: u64,
    pending: Option<AnimationToken>,
}

impl<A: ViewportAdapter> core::fmt::Debug for SlideController<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlideController")
            .field("viewport", &self.viewport)
            .field("container", &self.container)
            .field("slides", &self.slides.len())
            .field("current", &self.current)
            .field("subscribed", &self.subscribed)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<A: ViewportAdapter> SlideController<A> {
    /// Create a controller over `slides`, laid out inside `container`, shown through `viewport`.
    ///
    /// Nothing is measured or styled until [`init`](Self::init).
    pub fn new(
        adapter: A,
        viewport: A::Element,
        container: A::Element,
        slides: Vec<A::Element>,
        config: CarouselConfig,
    ) -> Self {
        Self {
            adapter,
            viewport,
            container,
            slides,
            config,
            emitter: Emitter::new(),
            current: None,
            subscribed: GestureKinds::empty(),
            next_token: 0,
            pending: None,
        }
    }

    /// Lay the slides out and show slide `start` without animating.
    ///
    /// Gesture start handlers are installed unless swiping is disabled or the
    /// host has no touch input. An out-of-range `start` leaves the layout in
    /// place but navigates nowhere.
    pub fn init(&mut self, start: usize) {
        let height = self.adapter.measure(self.viewport).size.height;
        self.adapter.set_style(
            self.viewport,
            &Style::new()
                .with_height(height)
                .with_position(Position::Relative)
                .with_overflow_hidden(true),
        );
        self.reset_widths();
        let slide_style = Style::new().with_float_left(true).with_display_block(true);
        for &s in &self.slides {
            self.adapter.set_style(s, &slide_style);
        }
        self.adapter.set_style(
            self.container,
            &Style::new().with_position(Position::Absolute),
        );

        if !self.config.swiping_disabled() && self.adapter.is_touch_capable() {
            self.subscribe_gestures(GestureKinds::START);
        }
        debug!(slides = self.slides.len(), start, "carousel initialized");
        self.go_to(start, true);
    }

    /// Size every slide to the viewport and the container to fit all slides.
    ///
    /// Each slide's width becomes the viewport width plus the slide's own
    /// horizontal padding; the container's width becomes the sum of the
    /// slides' outer widths (margins included) after resizing.
    pub fn reset_widths(&mut self) {
        let viewport_width = self.adapter.measure(self.viewport).size.width;
        for &s in &self.slides {
            let padding = self.adapter.measure(s).horizontal_padding();
            self.adapter
                .set_style(s, &Style::new().with_width(viewport_width + padding));
        }
        let total: f64 = self
            .slides
            .iter()
            .map(|&s| self.adapter.measure(s).outer.width)
            .sum();
        self.adapter
            .set_style(self.container, &Style::new().with_width(total));
    }

    /// Navigate to slide `index`.
    ///
    /// Out-of-range indices are ignored without notifying anyone; returns
    /// whether navigation happened.
    pub fn go_to(&mut self, index: usize, skip_animation: bool) -> bool {
        if index >= self.slides.len() {
            debug!(index, len = self.slides.len(), "ignoring out-of-range slide");
            return false;
        }
        self.emitter.notify(CarouselEvent::Change(index));

        let left = -self.adapter.measure(self.slides[index]).left;
        let speed = self.config.transition_speed_ms();
        let distance = self.current.unwrap_or(0).abs_diff(index);
        self.stop_container();
        self.current = Some(index);

        if speed > 0.0 && !skip_animation {
            let duration = speed * distance as f64;
            debug!(index, left, duration, "animating to slide");
            self.animate_container(left, duration);
        } else {
            debug!(index, left, "jumping to slide");
            self.adapter
                .set_style(self.container, &Style::new().with_left(left));
            self.fit_current(false);
        }
        true
    }

    /// Fit the viewport height to the current slide's outer height.
    ///
    /// With `animate`, the change runs over the configured transition speed.
    pub fn fit_current(&mut self, animate: bool) {
        let Some(current) = self.current else {
            return;
        };
        let height = self.adapter.measure(self.slides[current]).outer.height;
        let style = Style::new().with_height(height);
        self.adapter.stop_animation(self.viewport);
        let speed = self.config.transition_speed_ms();
        if animate && speed > 0.0 {
            self.adapter.animate(self.viewport, &style, speed, None);
        } else {
            self.adapter.set_style(self.viewport, &style);
        }
    }

    /// Deliver a completion token previously handed to [`ViewportAdapter::animate`].
    ///
    /// Returns `false` for tokens of animations that were stopped, superseded,
    /// or started before a teardown.
    pub fn finish_animation(&mut self, token: AnimationToken) -> bool {
        if self.pending != Some(token) {
            trace!(?token, "ignoring stale animation token");
            return false;
        }
        self.pending = None;
        self.fit_current(true);
        true
    }

    /// Revert every style written by the carousel and remove gesture handlers.
    ///
    /// Host animations already in flight are left to the host; their
    /// completion tokens become stale.
    pub fn teardown(&mut self) {
        self.adapter.clear_style(
            self.viewport,
            StyleProps::HEIGHT | StyleProps::POSITION | StyleProps::OVERFLOW,
        );
        for &s in &self.slides {
            self.adapter.clear_style(
                s,
                StyleProps::FLOAT | StyleProps::DISPLAY | StyleProps::WIDTH,
            );
        }
        self.adapter.clear_style(
            self.container,
            StyleProps::POSITION | StyleProps::WIDTH | StyleProps::LEFT,
        );
        self.unsubscribe_gestures(GestureKinds::all());
        self.pending = None;
        self.current = None;
        debug!("carousel torn down");
    }

    /// The current slide, or `None` before [`init`](Self::init) and after [`teardown`](Self::teardown).
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// True if there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Current snap points, one per slide.
    pub fn snap_points(&self) -> Vec<f64> {
        geometry::snap_points(&self.adapter, &self.slides)
    }

    /// Valid range for the container's `left` given the current layout.
    pub fn drag_bounds(&self) -> DragBounds {
        DragBounds::new(
            self.adapter.measure(self.container).size.width,
            self.adapter.measure(self.viewport).size.width,
        )
    }

    /// The container's current horizontal offset.
    pub fn container_left(&self) -> f64 {
        self.adapter.measure(self.container).left
    }

    /// Options this controller was built with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The host adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The host adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Gesture kinds currently subscribed on the container.
    pub fn subscribed_gestures(&self) -> GestureKinds {
        self.subscribed
    }

    /// See [`Emitter::subscribe`].
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.emitter.subscribe(kind, handler)
    }

    /// See [`Emitter::subscribe_once`].
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.emitter.subscribe_once(kind, handler)
    }

    /// See [`Emitter::unsubscribe`].
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.emitter.unsubscribe(subscription)
    }

    pub(crate) fn accepts(&self, kind: GestureKind) -> bool {
        self.subscribed.contains(kind.flag())
    }

    pub(crate) fn subscribe_gestures(&mut self, kinds: GestureKinds) {
        let new = kinds - self.subscribed;
        if !new.is_empty() {
            self.adapter.subscribe(self.container, new);
            self.subscribed |= new;
        }
    }

    pub(crate) fn unsubscribe_gestures(&mut self, kinds: GestureKinds) {
        let gone = kinds & self.subscribed;
        if !gone.is_empty() {
            self.adapter.unsubscribe(self.container, gone);
            self.subscribed -= gone;
        }
    }

    pub(crate) fn notify(&mut self, event: CarouselEvent) {
        self.emitter.notify(event);
    }

    pub(crate) fn set_container_left(&mut self, left: f64) {
        self.adapter
            .set_style(self.container, &Style::new().with_left(left));
    }

    /// Emit `Change(index)` and animate the container to `left` over `duration_ms`.
    pub(crate) fn settle(&mut self, index: usize, left: f64, duration_ms: f64) {
        self.emitter.notify(CarouselEvent::Change(index));
        self.stop_container();
        self.current = Some(index);
        self.animate_container(left, duration_ms);
    }

    fn animate_container(&mut self, left: f64, duration_ms: f64) {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        self.adapter.animate(
            self.container,
            &Style::new().with_left(left),
            duration_ms,
            Some(token),
        );
    }

    fn stop_container(&mut self) {
        self.adapter.stop_animation(self.container);
        self.pending = None;
    }

    /// Stop a container transition still waiting for its completion token.
    ///
    /// Returns whether one was running. Its token becomes stale and the
    /// container stays wherever the host left it.
    pub(crate) fn stop_transition(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        trace!(token = ?self.pending, "stopping container transition");
        self.stop_container();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headless::{
        BoxModel, HeadlessElement, HeadlessViewport, HostCall, QueuedAnimation,
    };
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Insets;

    type Ctl = SlideController<HeadlessViewport>;

    fn controller(slides: Vec<BoxModel>, config: CarouselConfig) -> Ctl {
        let host = HeadlessViewport::new(BoxModel::sized(200.0, 100.0), slides);
        let (viewport, container, slides) = host.elements();
        SlideController::new(host, viewport, container, slides, config)
    }

    fn three(config: CarouselConfig) -> Ctl {
        controller(
            vec![
                BoxModel::sized(200.0, 100.0),
                BoxModel::sized(200.0, 120.0),
                BoxModel::sized(200.0, 100.0),
            ],
            config,
        )
    }

    fn record_changes(ctl: &mut Ctl) -> Rc<RefCell<Vec<usize>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ctl.subscribe(EventKind::Change, move |e| {
            if let CarouselEvent::Change(i) = e {
                sink.borrow_mut().push(*i);
            }
        });
        seen
    }

    fn container_left(ctl: &Ctl) -> f64 {
        ctl.adapter().measure_left(HeadlessElement::Container)
    }

    #[test]
    fn init_emits_single_change_to_first_slide() {
        let mut ctl = three(CarouselConfig::default());
        let seen = record_changes(&mut ctl);
        ctl.init(0);
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(ctl.current(), Some(0));
    }

    #[test]
    fn init_out_of_range_navigates_nowhere() {
        let mut ctl = three(CarouselConfig::default());
        let seen = record_changes(&mut ctl);
        ctl.init(3);
        assert!(seen.borrow().is_empty());
        assert_eq!(ctl.current(), None);
        // Layout was still normalized.
        assert_eq!(ctl.adapter().measure(HeadlessElement::Container).size.width, 600.0);
    }

    #[test]
    fn container_width_is_sum_of_outer_widths() {
        let margin = Insets::new(10.0, 0.0, 10.0, 0.0);
        let mut ctl = controller(
            vec![
                BoxModel::sized(50.0, 10.0).with_margin(margin),
                BoxModel::sized(50.0, 10.0),
                BoxModel::sized(50.0, 10.0).with_margin(margin),
            ],
            CarouselConfig::instant(),
        );
        ctl.init(0);
        // Every slide is resized to the viewport; margins add on top.
        assert_eq!(
            ctl.adapter().measure(HeadlessElement::Container).size.width,
            220.0 + 200.0 + 220.0
        );
        assert_eq!(ctl.snap_points(), vec![0.0, 220.0, 420.0]);
    }

    #[test]
    fn slide_width_accounts_for_padding() {
        let mut ctl = controller(
            vec![
                BoxModel::sized(10.0, 10.0).with_padding(Insets::new(4.0, 0.0, 6.0, 0.0)),
                BoxModel::sized(10.0, 10.0),
            ],
            CarouselConfig::instant(),
        );
        ctl.init(0);
        assert_eq!(
            ctl.adapter().inline_style(HeadlessElement::Slide(0)).width,
            Some(210.0)
        );
        assert_eq!(
            ctl.adapter().inline_style(HeadlessElement::Slide(1)).width,
            Some(200.0)
        );
    }

    #[test]
    fn init_applies_layout_styles() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        let host = ctl.adapter();
        let vp = host.inline_style(HeadlessElement::Viewport);
        assert_eq!(vp.position, Some(Position::Relative));
        assert_eq!(vp.overflow_hidden, Some(true));
        assert_eq!(vp.height, Some(100.0));
        let slide = host.inline_style(HeadlessElement::Slide(1));
        assert_eq!(slide.float_left, Some(true));
        assert_eq!(slide.display_block, Some(true));
        assert_eq!(
            host.inline_style(HeadlessElement::Container).position,
            Some(Position::Absolute)
        );
    }

    #[test]
    fn go_to_valid_index_emits_once_and_updates_current() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        let seen = record_changes(&mut ctl);
        for i in [2, 0, 1, 1] {
            seen.borrow_mut().clear();
            assert!(ctl.go_to(i, false));
            assert_eq!(ctl.current(), Some(i));
            assert_eq!(*seen.borrow(), vec![i]);
        }
    }

    #[test]
    fn go_to_out_of_range_is_silent() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(1);
        let seen = record_changes(&mut ctl);
        let journal = ctl.adapter().journal();
        journal.clear();
        assert!(!ctl.go_to(3, true));
        assert!(!ctl.go_to(10, false));
        assert!(!ctl.go_to(usize::MAX, true));
        assert!(seen.borrow().is_empty());
        assert_eq!(ctl.current(), Some(1));
        assert!(journal.is_empty());
    }

    #[test]
    fn go_to_skip_animation_positions_immediately() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        ctl.go_to(2, true);
        assert_eq!(container_left(&ctl), -400.0);
        assert!(ctl.adapter().queued_animations().is_empty());
    }

    #[test]
    fn zero_speed_positions_immediately_and_fits_height() {
        let mut ctl = three(CarouselConfig::instant());
        ctl.init(0);
        ctl.go_to(1, false);
        assert_eq!(container_left(&ctl), -200.0);
        assert_eq!(ctl.adapter().measure(HeadlessElement::Viewport).size.height, 120.0);
        assert!(ctl.adapter().queued_animations().is_empty());
    }

    #[test]
    fn animation_duration_scales_with_distance() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        ctl.go_to(2, false);
        let anim = ctl.adapter().queued_animations()[0];
        assert_eq!(anim.element, HeadlessElement::Container);
        assert_eq!(anim.target.left, Some(-400.0));
        assert_eq!(anim.duration_ms, 300.0);
        // Current is updated before the animation completes.
        assert_eq!(ctl.current(), Some(2));

        ctl.go_to(1, false);
        let queued = ctl.adapter().queued_animations();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].duration_ms, 150.0);
    }

    #[test]
    fn change_precedes_animation_request() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        let journal = ctl.adapter().journal();
        let at_change = Rc::new(RefCell::new(None));
        let probe = (journal.clone(), at_change.clone());
        ctl.subscribe(EventKind::Change, move |_| {
            *probe.1.borrow_mut() = Some(probe.0.len());
        });
        journal.clear();
        ctl.go_to(1, false);
        assert_eq!(*at_change.borrow(), Some(0));
        assert!(
            journal
                .calls()
                .iter()
                .any(|c| matches!(c, HostCall::Animate(QueuedAnimation { element: HeadlessElement::Container, .. })))
        );
    }

    #[test]
    fn completion_fits_height_and_stale_tokens_are_ignored() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        ctl.go_to(2, false);
        let first = ctl.adapter().queued_animations()[0].token.unwrap();
        ctl.go_to(1, false);
        let second = ctl.adapter().queued_animations()[0].token.unwrap();
        assert_ne!(first, second);

        assert!(!ctl.finish_animation(first));
        let tokens = ctl.adapter_mut().finish_animations();
        assert_eq!(tokens, vec![second]);
        assert!(ctl.finish_animation(second));
        // Delivered twice: the second delivery is stale.
        assert!(!ctl.finish_animation(second));

        let height = ctl.adapter().queued_animations()[0];
        assert_eq!(height.element, HeadlessElement::Viewport);
        assert_eq!(height.target.height, Some(120.0));
        assert_eq!(height.duration_ms, 150.0);
        assert_eq!(height.token, None);
    }

    #[test]
    fn teardown_reverts_layout_and_handlers() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        ctl.go_to(2, true);
        assert_eq!(ctl.subscribed_gestures(), GestureKinds::START);
        ctl.teardown();
        let host = ctl.adapter();
        assert_eq!(host.inline_style(HeadlessElement::Viewport), Style::default());
        assert_eq!(host.inline_style(HeadlessElement::Container), Style::default());
        for i in 0..3 {
            assert_eq!(host.inline_style(HeadlessElement::Slide(i)), Style::default());
        }
        assert!(host.subscribed().is_empty());
        assert!(ctl.subscribed_gestures().is_empty());
        assert_eq!(ctl.current(), None);
    }

    #[test]
    fn teardown_makes_pending_tokens_stale() {
        let mut ctl = three(CarouselConfig::default());
        ctl.init(0);
        ctl.go_to(1, false);
        let token = ctl.adapter().queued_animations()[0].token.unwrap();
        ctl.teardown();
        // The host may still finish the animation; the carousel ignores it.
        assert!(!ctl.finish_animation(token));
    }

    #[test]
    fn swiping_disabled_installs_no_handlers() {
        let mut ctl = three(CarouselConfig::default().with_swiping_disabled(true));
        ctl.init(0);
        assert!(ctl.adapter().subscribed().is_empty());
    }

    #[test]
    fn drag_bounds_follow_layout() {
        let mut ctl = three(CarouselConfig::instant());
        ctl.init(0);
        let b = ctl.drag_bounds();
        assert_eq!(b.min, -400.0);
        assert_eq!(b.max, 0.0);
    }
}
