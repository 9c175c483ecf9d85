// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel notifications and a synchronous observer list.
//!
//! ## Ordering
//!
//! [`Emitter::notify`] calls every handler subscribed to the event's kind, in
//! subscription order, before it returns. A `Change` is always delivered
//! before the animation that enacts it is requested from the host.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_carousel::events::{CarouselEvent, Emitter, EventKind};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut emitter = Emitter::new();
//! let sink = seen.clone();
//! let sub = emitter.subscribe(EventKind::Change, move |e| sink.borrow_mut().push(*e));
//! emitter.notify(CarouselEvent::Change(2));
//! emitter.notify(CarouselEvent::SwipeStart);
//! assert!(emitter.unsubscribe(sub));
//! emitter.notify(CarouselEvent::Change(3));
//! assert_eq!(*seen.borrow(), vec![CarouselEvent::Change(2)]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A notification emitted by the carousel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The target slide changed to the given index.
    ///
    /// Fired for programmatic navigation and for gesture resolution alike.
    Change(usize),
    /// A gesture was classified as a horizontal swipe. Fired once per gesture.
    SwipeStart,
}

impl CarouselEvent {
    /// The kind used to route this event to subscribers.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Change(_) => EventKind::Change,
            Self::SwipeStart => EventKind::SwipeStart,
        }
    }
}

/// Event kinds that can be subscribed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`CarouselEvent::Change`].
    Change,
    /// See [`CarouselEvent::SwipeStart`].
    SwipeStart,
}

/// Handle returned by [`Emitter::subscribe`]; pass it to [`Emitter::unsubscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Listener {
    id: Subscription,
    kind: EventKind,
    once: bool,
    handler: Box<dyn FnMut(&CarouselEvent)>,
}

/// Ordered list of event handlers.
#[derive(Default)]
pub struct Emitter {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Emitter {
    /// Create an emitter with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every future event of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.push(kind, false, Box::new(handler))
    }

    /// Call `handler` for the next event of `kind` only.
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CarouselEvent) + 'static,
    ) -> Subscription {
        self.push(kind, true, Box::new(handler))
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription);
        self.listeners.len() != before
    }

    /// Number of handlers currently subscribed to `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    /// Deliver `event` to its subscribers in subscription order.
    pub fn notify(&mut self, event: CarouselEvent) {
        let kind = event.kind();
        for l in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (l.handler)(&event);
        }
        self.listeners.retain(|l| !(l.once && l.kind == kind));
    }

    fn push(
        &mut self,
        kind: EventKind,
        once: bool,
        handler: Box<dyn FnMut(&CarouselEvent)>,
    ) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            once,
            handler,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn recorder(
        emitter: &mut Emitter,
        kind: EventKind,
        tag: &'static str,
        log: &Rc<RefCell<Vec<(&'static str, CarouselEvent)>>>,
    ) -> Subscription {
        let log = log.clone();
        emitter.subscribe(kind, move |e| log.borrow_mut().push((tag, *e)))
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut e = Emitter::new();
        recorder(&mut e, EventKind::Change, "a", &log);
        recorder(&mut e, EventKind::Change, "b", &log);
        e.notify(CarouselEvent::Change(1));
        assert_eq!(
            *log.borrow(),
            vec![
                ("a", CarouselEvent::Change(1)),
                ("b", CarouselEvent::Change(1))
            ]
        );
    }

    #[test]
    fn events_route_by_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut e = Emitter::new();
        recorder(&mut e, EventKind::SwipeStart, "swipe", &log);
        e.notify(CarouselEvent::Change(0));
        assert!(log.borrow().is_empty());
        e.notify(CarouselEvent::SwipeStart);
        assert_eq!(*log.borrow(), vec![("swipe", CarouselEvent::SwipeStart)]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut e = Emitter::new();
        let sub = recorder(&mut e, EventKind::Change, "a", &log);
        assert_eq!(e.listener_count(EventKind::Change), 1);
        assert!(e.unsubscribe(sub));
        assert!(!e.unsubscribe(sub));
        e.notify(CarouselEvent::Change(4));
        assert!(log.borrow().is_empty());
        assert_eq!(e.listener_count(EventKind::Change), 0);
    }

    #[test]
    fn once_handlers_fire_a_single_time() {
        let count = Rc::new(RefCell::new(0));
        let mut e = Emitter::new();
        let c = count.clone();
        e.subscribe_once(EventKind::Change, move |_| *c.borrow_mut() += 1);
        // A different kind does not consume the once handler.
        e.notify(CarouselEvent::SwipeStart);
        e.notify(CarouselEvent::Change(0));
        e.notify(CarouselEvent::Change(1));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(e.listener_count(EventKind::Change), 0);
    }
}
