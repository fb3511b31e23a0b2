// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-surface merge point for gesture streams.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Gesture;

/// Handle returned by [`GestureBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Gesture)>;

/// Ordered, synchronous gesture fan-out.
///
/// All adapters of a surface publish into one bus, preserving the order the
/// input events arrived in. Subscribers are invoked synchronously, in
/// subscription order, within the publishing call stack.
///
/// Malformed gestures (non-finite coordinates, non-positive zoom factors)
/// are swallowed here: the gesture is dropped and the stream continues. One
/// bad input sample must not kill navigation for the rest of the session.
#[derive(Default)]
pub struct GestureBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl GestureBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber; it will observe every well-formed gesture
    /// published after this call, in subscription order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Gesture) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Publishes one gesture to every subscriber.
    ///
    /// Returns `false` when the gesture was dropped as malformed.
    pub fn publish(&mut self, gesture: Gesture) -> bool {
        if !gesture.is_well_formed() {
            return false;
        }
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&gesture);
        }
        true
    }
}

impl fmt::Debug for GestureBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
