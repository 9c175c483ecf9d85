// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recent pointer samples and release velocity.
//!
//! ## Window
//!
//! The window keeps the most recent samples of a gesture. Once it holds at
//! least [`MIN_WINDOW_SAMPLES`] entries, samples older than
//! [`VELOCITY_WINDOW_MS`] relative to the newest are dropped from the front.
//! Below that count nothing is evicted, so slow sample rates still leave
//! enough history to estimate a velocity.
//!
//! ## Velocity
//!
//! Velocity is the horizontal speed between the oldest and newest surviving
//! samples, in pixels per millisecond, negated: a pointer moving left
//! (towards later slides) yields a positive velocity.

use alloc::collections::VecDeque;

use kurbo::Point;

/// Age beyond which samples are evicted once the window is full enough.
pub const VELOCITY_WINDOW_MS: f64 = 200.0;

/// Minimum number of samples before age-based eviction kicks in.
pub const MIN_WINDOW_SAMPLES: usize = 5;

/// A timestamped pointer position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Pointer position.
    pub position: Point,
    /// Timestamp in milliseconds.
    pub time: f64,
}

/// Bounded, time-ordered sample history for one gesture.
#[derive(Clone, Debug, Default)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
}

impl SampleWindow {
    /// An empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record a sample, then evict stale ones.
    pub fn push(&mut self, position: Point, time: f64) {
        self.samples.push_back(Sample { position, time });
        while self.samples.len() >= MIN_WINDOW_SAMPLES
            && self
                .samples
                .front()
                .is_some_and(|s| time - s.time > VELOCITY_WINDOW_MS)
        {
            self.samples.pop_front();
        }
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Signed horizontal velocity in pixels per millisecond.
    ///
    /// Zero with fewer than two samples or when no time elapsed between the
    /// oldest and newest sample.
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = last.time - first.time;
        if self.samples.len() < 2 || dt <= 0.0 {
            return 0.0;
        }
        -(last.position.x - first.position.x) / dt
    }
}
