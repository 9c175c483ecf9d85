// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracking: direction classification, elastic dragging, and release resolution.
//!
//! ## States
//!
//! ```text
//! Idle --start--> Undecided --|dx| > |dy|--> Horizontal --end/cancel--> Idle (resolved)
//!                     |
//!                     +--------|dy| >= |dx|, nonzero--> Idle (pass-through)
//! ```
//!
//! - A start with several contacts down is ignored.
//! - While undecided and the pointer has not moved, nothing happens.
//! - The first sample whose horizontal displacement strictly exceeds the
//!   vertical one makes the gesture a swipe: `SwipeStart` fires, any
//!   transition still running on the container is stopped where it stands,
//!   and the container follows the pointer from then on.
//! - Otherwise the tracking handlers are detached and the host is told to
//!   let the platform scroll.
//!
//! ## Dragging
//!
//! The container follows `start_left + (x - origin_x)`, passed through
//! [`DragBounds::elastic`] so overshooting either end meets diminishing
//! resistance.
//!
//! ## Release
//!
//! - Released past the leading edge: slide 0, container back to `max`.
//! - Released past the trailing edge: the last slide, container to `min`.
//! - Otherwise the nearest snap point wins (lower index on ties). If that is
//!   still the slide the gesture started on and the release was fast, `1 / |velocity| <
//!   sensitivity`, the target moves one slide in the direction of the
//!   velocity, staying within the collection.
//!
//! Edge snaps take [`EDGE_SNAP_MS`], interior snaps [`INTERIOR_SNAP_MS`],
//! regardless of the configured transition speed.

use kurbo::Point;
use tracing::{debug, trace};

use crate::controller::SlideController;
use crate::events::CarouselEvent;
use crate::geometry::{DragBounds, nearest_snap};
use crate::sampling::SampleWindow;
use crate::types::{GestureKind, GestureKinds, GestureResponse, PointerSample, ViewportAdapter};

/// Duration of the snap back after a release beyond either end.
pub const EDGE_SNAP_MS: f64 = 300.0;

/// Duration of the snap to an interior slide after a release.
pub const INTERIOR_SNAP_MS: f64 = 200.0;

/// Where a gesture stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture in flight.
    Idle,
    /// Contact is down but its direction is not known yet.
    Undecided,
    /// A horizontal swipe is dragging the container.
    Horizontal,
}

/// State of one gesture, from start until resolution or pass-through.
#[derive(Clone, Debug)]
pub struct GestureSession {
    origin: Point,
    start_left: f64,
    start_index: Option<usize>,
    bounds: DragBounds,
    horizontal: bool,
    window: SampleWindow,
}

impl GestureSession {
    /// Pointer position at gesture start.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Container offset the drag is measured from.
    ///
    /// Captured at gesture start, and again when the gesture becomes a swipe
    /// in case a transition was still moving the container.
    pub fn start_left(&self) -> f64 {
        self.start_left
    }

    /// The current slide when the gesture started.
    pub fn start_index(&self) -> Option<usize> {
        self.start_index
    }

    /// Drag bounds captured at gesture start.
    pub fn bounds(&self) -> DragBounds {
        self.bounds
    }

    /// Recent samples used for velocity estimation.
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Container offset for a pointer at `x`, elastic past the bounds.
    pub fn drag_left(&self, x: f64) -> f64 {
        self.bounds.elastic(self.start_left + (x - self.origin.x))
    }
}

/// Interprets pointer samples on behalf of a [`SlideController`].
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
}

impl GestureTracker {
    /// An idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        match &self.session {
            None => GesturePhase::Idle,
            Some(s) if s.horizontal => GesturePhase::Horizontal,
            Some(_) => GesturePhase::Undecided,
        }
    }

    /// True while a horizontal swipe is dragging the container.
    pub fn is_dragging(&self) -> bool {
        self.phase() == GesturePhase::Horizontal
    }

    /// The gesture in flight, if any.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Drop any gesture in flight without resolving it.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Feed one sample of the given kind.
    ///
    /// Samples of kinds the controller has not subscribed to are ignored, as
    /// a host would never have delivered them.
    pub fn handle<A: ViewportAdapter>(
        &mut self,
        ctl: &mut SlideController<A>,
        kind: GestureKind,
        sample: PointerSample,
    ) -> GestureResponse {
        if !ctl.accepts(kind) {
            trace!(?kind, "gesture kind not subscribed");
            return GestureResponse::PassThrough;
        }
        match kind {
            GestureKind::Start => self.start(ctl, sample),
            GestureKind::Move => self.track(ctl, sample),
            GestureKind::End | GestureKind::Cancel => self.release(ctl),
        }
    }

    fn start<A: ViewportAdapter>(
        &mut self,
        ctl: &mut SlideController<A>,
        sample: PointerSample,
    ) -> GestureResponse {
        if sample.multi_touch {
            trace!("ignoring multi-touch start");
            return GestureResponse::PassThrough;
        }
        let mut window = SampleWindow::new();
        window.push(sample.position, ctl.config().now_ms());
        self.session = Some(GestureSession {
            origin: sample.position,
            start_left: ctl.container_left(),
            start_index: ctl.current(),
            bounds: ctl.drag_bounds(),
            horizontal: false,
            window,
        });
        ctl.subscribe_gestures(GestureKinds::TRACKING);
        trace!(origin = ?sample.position, "gesture started");
        GestureResponse::PassThrough
    }

    fn track<A: ViewportAdapter>(
        &mut self,
        ctl: &mut SlideController<A>,
        sample: PointerSample,
    ) -> GestureResponse {
        let Some(session) = self.session.as_mut() else {
            return GestureResponse::PassThrough;
        };
        let now = ctl.config().now_ms();
        session.window.push(sample.position, now);

        let delta = sample.position - session.origin;
        let (dx, dy) = (delta.x.abs(), delta.y.abs());
        if session.horizontal {
            ctl.set_container_left(session.drag_left(sample.position.x));
        } else if dx + dy == 0.0 {
            // Not moved yet.
        } else if dx > dy {
            debug!(dx, dy, "gesture classified as swipe");
            session.horizontal = true;
            if ctl.stop_transition() {
                session.start_left = ctl.container_left();
                debug!(left = session.start_left, "swipe interrupted a transition");
            }
            ctl.notify(CarouselEvent::SwipeStart);
            ctl.set_container_left(session.drag_left(sample.position.x));
        } else {
            debug!(dx, dy, "gesture classified as scroll; passing through");
            self.session = None;
            ctl.unsubscribe_gestures(GestureKinds::TRACKING);
            return GestureResponse::PassThrough;
        }
        GestureResponse::Consumed
    }

    fn release<A: ViewportAdapter>(&mut self, ctl: &mut SlideController<A>) -> GestureResponse {
        ctl.unsubscribe_gestures(GestureKinds::TRACKING);
        let Some(session) = self.session.take() else {
            return GestureResponse::PassThrough;
        };
        if !session.horizontal {
            trace!("gesture ended before a direction was chosen");
            return GestureResponse::PassThrough;
        }
        if ctl.is_empty() {
            return GestureResponse::Consumed;
        }

        let end = ctl.container_left();
        let bounds = session.bounds;
        let last = ctl.len() - 1;
        if end > bounds.max {
            debug!(end, "released past leading edge");
            ctl.settle(0, bounds.max, EDGE_SNAP_MS);
        } else if end < bounds.min {
            debug!(end, "released past trailing edge");
            ctl.settle(last, bounds.min, EDGE_SNAP_MS);
        } else {
            let points = ctl.snap_points();
            let Some(closest) = nearest_snap(&points, end) else {
                return GestureResponse::Consumed;
            };
            let velocity = session.window.velocity();
            let target = bump_target(
                closest,
                session.start_index,
                velocity,
                ctl.config().sensitivity(),
                last,
            );
            debug!(end, closest, target, velocity, "swipe resolved");
            ctl.settle(target, -points[target], INTERIOR_SNAP_MS);
        }
        GestureResponse::Consumed
    }
}

/// Move `closest` one slide along `velocity` when the release was fast but
/// would otherwise stay on the slide the gesture started on.
fn bump_target(
    closest: usize,
    start_index: Option<usize>,
    velocity: f64,
    sensitivity: f64,
    last: usize,
) -> usize {
    if start_index != Some(closest) || 1.0 / velocity.abs() >= sensitivity {
        return closest;
    }
    if velocity > 0.0 && closest < last {
        closest + 1
    } else if velocity < 0.0 && closest > 0 {
        closest - 1
    } else {
        closest
    }
}
