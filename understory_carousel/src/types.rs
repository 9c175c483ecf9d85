// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the carousel: measurements, styles, gesture input, and the host adapter.
//!
//! ## Overview
//!
//! The carousel never touches a document tree. Everything it needs from the
//! page goes through [`ViewportAdapter`], implemented by the host toolkit:
//! measuring elements, writing positional styles, running animations, and
//! (un)subscribing gesture handlers. Gesture input flows back in as
//! [`PointerSample`] values.

use core::fmt;

use kurbo::{Insets, Point, Size};

/// Geometry of one element as reported by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Content box size.
    pub size: Size,
    /// Margin box size: content, padding, border, and margins.
    pub outer: Size,
    /// Left edge of the margin box relative to the offset parent.
    ///
    /// For slides this is the offset within the container; for the container
    /// it is its current horizontal position within the viewport.
    pub left: f64,
    /// Padding on each side.
    pub padding: Insets,
}

impl Metrics {
    /// Sum of left and right padding.
    pub fn horizontal_padding(&self) -> f64 {
        self.padding.x0 + self.padding.x1
    }
}

/// CSS-like positioning scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// Establishes an offset parent without moving the element.
    Relative,
    /// Positioned by `left` within the offset parent.
    Absolute,
}

bitflags::bitflags! {
    /// Style properties the carousel writes; used to revert them on teardown.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StyleProps: u8 {
        /// Horizontal offset.
        const LEFT     = 0b0000_0001;
        /// Content width.
        const WIDTH    = 0b0000_0010;
        /// Content height.
        const HEIGHT   = 0b0000_0100;
        /// Positioning scheme.
        const POSITION = 0b0000_1000;
        /// Overflow clipping.
        const OVERFLOW = 0b0001_0000;
        /// Left floating.
        const FLOAT    = 0b0010_0000;
        /// Block display.
        const DISPLAY  = 0b0100_0000;
    }
}

/// A partial set of style properties; `None` fields are left untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Horizontal offset in pixels.
    pub left: Option<f64>,
    /// Content width in pixels.
    pub width: Option<f64>,
    /// Content height in pixels.
    pub height: Option<f64>,
    /// Positioning scheme.
    pub position: Option<Position>,
    /// Clip overflowing content.
    pub overflow_hidden: Option<bool>,
    /// Float to the left.
    pub float_left: Option<bool>,
    /// Display as a block.
    pub display_block: Option<bool>,
}

impl Style {
    /// An empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal offset.
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    /// Set the content width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the content height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the positioning scheme.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Clip (or stop clipping) overflowing content.
    pub fn with_overflow_hidden(mut self, hidden: bool) -> Self {
        self.overflow_hidden = Some(hidden);
        self
    }

    /// Float left (or not).
    pub fn with_float_left(mut self, float: bool) -> Self {
        self.float_left = Some(float);
        self
    }

    /// Display as a block (or not).
    pub fn with_display_block(mut self, block: bool) -> Self {
        self.display_block = Some(block);
        self
    }

    /// The properties this style sets.
    pub fn props(&self) -> StyleProps {
        let mut p = StyleProps::empty();
        p.set(StyleProps::LEFT, self.left.is_some());
        p.set(StyleProps::WIDTH, self.width.is_some());
        p.set(StyleProps::HEIGHT, self.height.is_some());
        p.set(StyleProps::POSITION, self.position.is_some());
        p.set(StyleProps::OVERFLOW, self.overflow_hidden.is_some());
        p.set(StyleProps::FLOAT, self.float_left.is_some());
        p.set(StyleProps::DISPLAY, self.display_block.is_some());
        p
    }
}

/// Phases of a pointer gesture as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Contact began.
    Start,
    /// Contact moved.
    Move,
    /// Contact lifted.
    End,
    /// The platform aborted the gesture.
    Cancel,
}

impl GestureKind {
    /// The subscription flag for this kind.
    pub fn flag(self) -> GestureKinds {
        match self {
            Self::Start => GestureKinds::START,
            Self::Move => GestureKinds::MOVE,
            Self::End => GestureKinds::END,
            Self::Cancel => GestureKinds::CANCEL,
        }
    }
}

bitflags::bitflags! {
    /// A set of gesture kinds, used for handler (un)subscription.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureKinds: u8 {
        /// [`GestureKind::Start`].
        const START  = 0b0001;
        /// [`GestureKind::Move`].
        const MOVE   = 0b0010;
        /// [`GestureKind::End`].
        const END    = 0b0100;
        /// [`GestureKind::Cancel`].
        const CANCEL = 0b1000;
        /// Handlers that only live while a gesture is in flight.
        const TRACKING = Self::MOVE.bits() | Self::END.bits() | Self::CANCEL.bits();
    }
}

/// A normalized pointer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer position in client coordinates.
    pub position: Point,
    /// More than one contact is down.
    pub multi_touch: bool,
}

impl PointerSample {
    /// A single-contact sample at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            multi_touch: false,
        }
    }

    /// A sample taken while several contacts are down.
    pub fn multi_touch(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            multi_touch: true,
        }
    }
}

/// What the host should do with the native event after the carousel saw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureResponse {
    /// The carousel handled it; suppress the platform default (scrolling).
    Consumed,
    /// Not handled; let the platform scroll natively.
    PassThrough,
}

/// Completion handle for a positional animation.
///
/// Handed to [`ViewportAdapter::animate`]; the host returns it once through
/// [`Carousel::finish_animation`](crate::Carousel::finish_animation) when the
/// animation completes. Tokens from stopped or superseded animations are
/// ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken(pub(crate) u64);

/// Host services the carousel requires.
///
/// All methods are synchronous and infallible; the host guarantees the
/// element handles it was constructed with stay valid.
pub trait ViewportAdapter {
    /// Host element handle.
    type Element: Copy + Eq + fmt::Debug;

    /// Measure an element in its current state.
    fn measure(&self, element: Self::Element) -> Metrics;

    /// Apply the set fields of `style` immediately.
    fn set_style(&mut self, element: Self::Element, style: &Style);

    /// Remove inline values for `props`, restoring stylesheet defaults.
    fn clear_style(&mut self, element: Self::Element, props: StyleProps);

    /// Animate towards `target` over `duration_ms`.
    ///
    /// A zero duration applies `target` immediately. When `on_complete` is
    /// present it must be delivered exactly once after the animation finishes
    /// (after this call returns, even for zero durations), unless the
    /// animation is stopped first.
    fn animate(
        &mut self,
        element: Self::Element,
        target: &Style,
        duration_ms: f64,
        on_complete: Option<AnimationToken>,
    );

    /// Stop any in-flight animation on `element` where it is, without completing it.
    fn stop_animation(&mut self, element: Self::Element);

    /// Whether the device produces touch input.
    fn is_touch_capable(&self) -> bool;

    /// Start forwarding `kinds` gestures on `element` to the carousel.
    fn subscribe(&mut self, element: Self::Element, kinds: GestureKinds);

    /// Stop forwarding `kinds` gestures on `element`.
    fn unsubscribe(&mut self, element: Self::Element, kinds: GestureKinds);
}
