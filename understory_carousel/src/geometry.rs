// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap points and elastic drag bounds.
//!
//! Offsets in this module follow the container's `left` convention: `0` shows
//! the first slide and moving towards later slides makes `left` negative.
//! Snap points are the (non-negative) slide offsets within the container, so
//! slide `i` is aligned with the viewport when `left == -snap_points[i]`.

use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::types::ViewportAdapter;

/// Scale of the square-root response outside the drag bounds.
pub const ELASTIC_FACTOR: f64 = 4.0;

/// Valid range for the container's `left` during a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragBounds {
    /// Leftmost position: the last slide's right edge meets the viewport's.
    pub min: f64,
    /// Rightmost position: the first slide's left edge meets the viewport's.
    pub max: f64,
}

impl DragBounds {
    /// Bounds for content of `content_width` inside a viewport of `viewport_width`.
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            min: -(content_width - viewport_width),
            max: 0.0,
        }
    }

    /// Apply the rubber-band response to a raw drag position.
    ///
    /// Inside the bounds the position is unchanged; past either bound the
    /// overshoot `d` is replaced by `ELASTIC_FACTOR * sqrt(d)`.
    pub fn elastic(&self, raw: f64) -> f64 {
        if raw > self.max {
            self.max + ELASTIC_FACTOR * (raw - self.max).sqrt()
        } else if raw < self.min {
            self.min - ELASTIC_FACTOR * (self.min - raw).sqrt()
        } else {
            raw
        }
    }
}

/// Index of the snap point nearest to container offset `left`.
///
/// Exact ties keep the lower index. Returns `None` when `points` is empty.
pub fn nearest_snap(points: &[f64], left: f64) -> Option<usize> {
    let target = -left;
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in points.iter().enumerate() {
        let d = (target - p).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Current snap points of `slides`, in slide order.
pub fn snap_points<A: ViewportAdapter>(adapter: &A, slides: &[A::Element]) -> Vec<f64> {
    slides.iter().map(|&s| adapter.measure(s).left).collect()
}
