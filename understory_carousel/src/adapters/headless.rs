// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`ViewportAdapter`] for tests, demos, and server-side replay.
//!
//! ## Model
//!
//! - One viewport, one container, and `N` slides, addressed by [`HeadlessElement`].
//! - Each element has a stylesheet [`BoxModel`] and an inline [`Style`] written by the carousel.
//!   Inline `width`/`height` replace the stylesheet content size; clearing them restores it.
//! - Slides sit left to right inside the container, so slide `i`'s `left` is the sum of the
//!   outer widths of slides `0..i`. The container's `left` is its inline `left` (or `0`).
//! - Animations are queued, not interpolated. Zero-duration animations apply at once; all
//!   others apply when [`HeadlessViewport::finish_animations`] runs. Stopping an animation
//!   discards it, leaving the element where it was.
//! - Every call is appended to a shared [`Journal`].
//!
//! ```
//! use understory_carousel::adapters::headless::{BoxModel, HeadlessViewport, run_animations};
//! use understory_carousel::config::CarouselConfig;
//! use understory_carousel::Carousel;
//!
//! let host = HeadlessViewport::new(
//!     BoxModel::sized(200.0, 100.0),
//!     vec![BoxModel::sized(200.0, 100.0); 3],
//! );
//! let (viewport, container, slides) = host.elements();
//! let mut carousel = Carousel::new(host, viewport, container, slides, CarouselConfig::default());
//! carousel.init(0);
//! carousel.go_to(2, false);
//! run_animations(&mut carousel);
//! assert_eq!(carousel.adapter().measure_left(container), -400.0);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Insets, Size};

use crate::Carousel;
use crate::types::{
    AnimationToken, GestureKinds, Metrics, Style, StyleProps, ViewportAdapter,
};

/// Element handles understood by [`HeadlessViewport`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeadlessElement {
    /// The clipping viewport.
    Viewport,
    /// The element holding every slide.
    Container,
    /// The slide at the given index.
    Slide(usize),
}

/// Stylesheet geometry of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxModel {
    /// Content size.
    pub size: Size,
    /// Padding.
    pub padding: Insets,
    /// Margins.
    pub margin: Insets,
}

impl BoxModel {
    /// A box with the given content size and no padding or margins.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the margins.
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }
}

/// A host call recorded by [`HeadlessViewport`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HostCall {
    /// [`ViewportAdapter::set_style`].
    SetStyle(HeadlessElement, Style),
    /// [`ViewportAdapter::clear_style`].
    ClearStyle(HeadlessElement, StyleProps),
    /// [`ViewportAdapter::animate`].
    Animate(QueuedAnimation),
    /// [`ViewportAdapter::stop_animation`].
    Stop(HeadlessElement),
    /// [`ViewportAdapter::subscribe`].
    Subscribe(GestureKinds),
    /// [`ViewportAdapter::unsubscribe`].
    Unsubscribe(GestureKinds),
}

/// An animation waiting for [`HeadlessViewport::finish_animations`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueuedAnimation {
    /// Animated element.
    pub element: HeadlessElement,
    /// Final style.
    pub target: Style,
    /// Requested duration.
    pub duration_ms: f64,
    /// Completion token to hand back to the carousel.
    pub token: Option<AnimationToken>,
}

/// Shared, append-only record of host calls.
#[derive(Clone, Debug, Default)]
pub struct Journal(Rc<RefCell<Vec<HostCall>>>);

impl Journal {
    /// Number of calls recorded so far.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<HostCall> {
        self.0.borrow().clone()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, call: HostCall) {
        self.0.borrow_mut().push(call);
    }
}

#[derive(Clone, Debug)]
struct HeadlessNode {
    base: BoxModel,
    inline: Style,
}

impl HeadlessNode {
    fn new(base: BoxModel) -> Self {
        Self {
            base,
            inline: Style::default(),
        }
    }

    fn content(&self) -> Size {
        Size::new(
            self.inline.width.unwrap_or(self.base.size.width),
            self.inline.height.unwrap_or(self.base.size.height),
        )
    }

    fn outer(&self) -> Size {
        let c = self.content();
        let p = self.base.padding;
        let m = self.base.margin;
        Size::new(
            c.width + p.x0 + p.x1 + m.x0 + m.x1,
            c.height + p.y0 + p.y1 + m.y0 + m.y1,
        )
    }

    fn apply(&mut self, style: &Style) {
        let s = &mut self.inline;
        s.left = style.left.or(s.left);
        s.width = style.width.or(s.width);
        s.height = style.height.or(s.height);
        s.position = style.position.or(s.position);
        s.overflow_hidden = style.overflow_hidden.or(s.overflow_hidden);
        s.float_left = style.float_left.or(s.float_left);
        s.display_block = style.display_block.or(s.display_block);
    }

    fn clear(&mut self, props: StyleProps) {
        let s = &mut self.inline;
        if props.contains(StyleProps::LEFT) {
            s.left = None;
        }
        if props.contains(StyleProps::WIDTH) {
            s.width = None;
        }
        if props.contains(StyleProps::HEIGHT) {
            s.height = None;
        }
        if props.contains(StyleProps::POSITION) {
            s.position = None;
        }
        if props.contains(StyleProps::OVERFLOW) {
            s.overflow_hidden = None;
        }
        if props.contains(StyleProps::FLOAT) {
            s.float_left = None;
        }
        if props.contains(StyleProps::DISPLAY) {
            s.display_block = None;
        }
    }
}

/// In-memory carousel host.
#[derive(Debug)]
pub struct HeadlessViewport {
    viewport: HeadlessNode,
    container: HeadlessNode,
    slides: Vec<HeadlessNode>,
    touch: bool,
    subscribed: GestureKinds,
    queued: Vec<QueuedAnimation>,
    journal: Journal,
}

impl HeadlessViewport {
    /// A touch-capable host with the given viewport and slide boxes.
    pub fn new(viewport: BoxModel, slides: Vec<BoxModel>) -> Self {
        Self {
            viewport: HeadlessNode::new(viewport),
            container: HeadlessNode::new(BoxModel::default()),
            slides: slides.into_iter().map(HeadlessNode::new).collect(),
            touch: true,
            subscribed: GestureKinds::empty(),
            queued: Vec::new(),
            journal: Journal::default(),
        }
    }

    /// Report (or deny) touch capability.
    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    /// Viewport, container, and slide handles, ready for [`Carousel::new`].
    pub fn elements(&self) -> (HeadlessElement, HeadlessElement, Vec<HeadlessElement>) {
        (
            HeadlessElement::Viewport,
            HeadlessElement::Container,
            (0..self.slides.len()).map(HeadlessElement::Slide).collect(),
        )
    }

    /// Inline style currently set on `element`.
    pub fn inline_style(&self, element: HeadlessElement) -> Style {
        self.node(element).inline
    }

    /// Shorthand for `measure(element).left`.
    pub fn measure_left(&self, element: HeadlessElement) -> f64 {
        self.measure(element).left
    }

    /// Gesture kinds the carousel currently listens to.
    pub fn subscribed(&self) -> GestureKinds {
        self.subscribed
    }

    /// Animations not yet finished, oldest first.
    pub fn queued_animations(&self) -> &[QueuedAnimation] {
        &self.queued
    }

    /// Handle to the call journal.
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Apply every queued animation and return the completion tokens to deliver.
    pub fn finish_animations(&mut self) -> Vec<AnimationToken> {
        let queued = core::mem::take(&mut self.queued);
        let mut tokens = Vec::new();
        for a in queued {
            self.node_mut(a.element).apply(&a.target);
            tokens.extend(a.token);
        }
        tokens
    }

    fn node(&self, element: HeadlessElement) -> &HeadlessNode {
        match element {
            HeadlessElement::Viewport => &self.viewport,
            HeadlessElement::Container => &self.container,
            HeadlessElement::Slide(i) => &self.slides[i],
        }
    }

    fn node_mut(&mut self, element: HeadlessElement) -> &mut HeadlessNode {
        match element {
            HeadlessElement::Viewport => &mut self.viewport,
            HeadlessElement::Container => &mut self.container,
            HeadlessElement::Slide(i) => &mut self.slides[i],
        }
    }
}

impl ViewportAdapter for HeadlessViewport {
    type Element = HeadlessElement;

    fn measure(&self, element: HeadlessElement) -> Metrics {
        let node = self.node(element);
        let left = match element {
            HeadlessElement::Viewport => 0.0,
            HeadlessElement::Container => node.inline.left.unwrap_or(0.0),
            HeadlessElement::Slide(i) => self.slides[..i].iter().map(|s| s.outer().width).sum(),
        };
        Metrics {
            size: node.content(),
            outer: node.outer(),
            left,
            padding: node.base.padding,
        }
    }

    fn set_style(&mut self, element: HeadlessElement, style: &Style) {
        self.journal.push(HostCall::SetStyle(element, *style));
        self.node_mut(element).apply(style);
    }

    fn clear_style(&mut self, element: HeadlessElement, props: StyleProps) {
        self.journal.push(HostCall::ClearStyle(element, props));
        self.node_mut(element).clear(props);
    }

    fn animate(
        &mut self,
        element: HeadlessElement,
        target: &Style,
        duration_ms: f64,
        on_complete: Option<AnimationToken>,
    ) {
        let animation = QueuedAnimation {
            element,
            target: *target,
            duration_ms,
            token: on_complete,
        };
        self.journal.push(HostCall::Animate(animation));
        if duration_ms <= 0.0 {
            self.node_mut(element).apply(target);
        }
        self.queued.push(animation);
    }

    fn stop_animation(&mut self, element: HeadlessElement) {
        self.journal.push(HostCall::Stop(element));
        self.queued.retain(|a| a.element != element);
    }

    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    fn subscribe(&mut self, _element: HeadlessElement, kinds: GestureKinds) {
        self.journal.push(HostCall::Subscribe(kinds));
        self.subscribed |= kinds;
    }

    fn unsubscribe(&mut self, _element: HeadlessElement, kinds: GestureKinds) {
        self.journal.push(HostCall::Unsubscribe(kinds));
        self.subscribed -= kinds;
    }
}

/// Finish every queued animation, delivering completion tokens, until the host is idle.
pub fn run_animations(carousel: &mut Carousel<HeadlessViewport>) {
    loop {
        let tokens = carousel.adapter_mut().finish_animations();
        if tokens.is_empty() && carousel.adapter().queued_animations().is_empty() {
            break;
        }
        for token in tokens {
            carousel.finish_animation(token);
        }
    }
}
