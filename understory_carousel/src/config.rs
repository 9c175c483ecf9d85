// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration and sample clocks.
//!
//! ## Overview
//!
//! [`CarouselConfig`] is built once and handed to the
//! [`SlideController`](crate::controller::SlideController); it cannot be
//! changed afterwards. Every option has a default:
//!
//! | Option | Default |
//! | --- | --- |
//! | transition speed | [`DEFAULT_TRANSITION_SPEED_MS`] per slide (0 disables animation) |
//! | swiping disabled | `false` |
//! | sensitivity | [`DEFAULT_SENSITIVITY`] |
//! | clock | [`SystemClock`] with `std`, otherwise a [`ManualClock`] stuck at zero |
//!
//! Without `std` there is no wall clock: a host that wants velocity-aware
//! releases must pass one to [`CarouselConfig::with_clock`].
//!
//! ```
//! use understory_carousel::config::{CarouselConfig, ManualClock};
//!
//! let clock = ManualClock::new();
//! let config = CarouselConfig::default()
//!     .with_transition_speed(250.0)
//!     .with_sensitivity(4.0)
//!     .with_clock(clock.clone());
//! clock.advance(16.0);
//! assert_eq!(config.now_ms(), 16.0);
//! ```

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
#[cfg(feature = "std")]
use std::time::Instant;

/// Default duration of a transition to an adjacent slide, in milliseconds.
pub const DEFAULT_TRANSITION_SPEED_MS: f64 = 150.0;

/// Default release sensitivity; see [`CarouselConfig::with_sensitivity`].
pub const DEFAULT_SENSITIVITY: f64 = 2.0;

/// Source of pointer sample timestamps, in milliseconds.
///
/// Only differences between readings matter. Any `Fn() -> f64` closure is a clock.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> f64;
}

impl<F: Fn() -> f64> Clock for F {
    fn now_ms(&self) -> f64 {
        self()
    }
}

/// Wall clock measuring milliseconds since the clock was created.
///
/// Note: `std::time::Instant` is unavailable on `wasm32-unknown-unknown`;
/// browser hosts should supply a closure over `performance.now()` instead.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Create a clock whose zero is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a host (or a test) can keep one handle
/// and give another to [`CarouselConfig::with_clock`].
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current reading.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Move the reading forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Immutable carousel options.
#[derive(Clone)]
pub struct CarouselConfig {
    transition_speed_ms: f64,
    disable_swiping: bool,
    sensitivity: f64,
    clock: Rc<dyn Clock>,
}

impl fmt::Debug for CarouselConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselConfig")
            .field("transition_speed_ms", &self.transition_speed_ms)
            .field("disable_swiping", &self.disable_swiping)
            .field("sensitivity", &self.sensitivity)
            .finish_non_exhaustive()
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_speed_ms: DEFAULT_TRANSITION_SPEED_MS,
            disable_swiping: false,
            sensitivity: DEFAULT_SENSITIVITY,
            clock: default_clock(),
        }
    }
}

#[cfg(feature = "std")]
fn default_clock() -> Rc<dyn Clock> {
    Rc::new(SystemClock::new())
}

#[cfg(not(feature = "std"))]
fn default_clock() -> Rc<dyn Clock> {
    Rc::new(ManualClock::new())
}

impl CarouselConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with animation disabled.
    ///
    /// Equivalent to `CarouselConfig::default().with_transition_speed(0.0)`.
    pub fn instant() -> Self {
        Self::default().with_transition_speed(0.0)
    }

    /// Duration of a transition between adjacent slides; farther jumps scale linearly.
    ///
    /// Zero applies every programmatic transition immediately.
    pub fn with_transition_speed(mut self, ms: f64) -> Self {
        self.transition_speed_ms = ms;
        self
    }

    /// Never install gesture handlers.
    pub fn with_swiping_disabled(mut self, disabled: bool) -> Self {
        self.disable_swiping = disabled;
        self
    }

    /// Release threshold: a release that would otherwise stay on the same
    /// slide moves to its neighbor when `1 / |velocity| < sensitivity`,
    /// velocity being measured in pixels per millisecond.
    ///
    /// Must be positive; other values are not validated.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Replace the timestamp source used for velocity estimation.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// Transition duration between adjacent slides, in milliseconds.
    pub fn transition_speed_ms(&self) -> f64 {
        self.transition_speed_ms
    }

    /// Whether gesture handling is disabled.
    pub fn swiping_disabled(&self) -> bool {
        self.disable_swiping
    }

    /// Release sensitivity.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Read the configured clock.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}
