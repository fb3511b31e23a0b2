// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed observer lists with documented ordering.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// An explicit per-node observer list.
///
/// Notifications are synchronous and run in subscription order within the
/// emitting call stack; there is no queueing or coalescing. Unsubscribing is
/// explicit and idempotent.
#[derive(Default)]
pub struct Observers<T> {
    entries: Vec<(ObserverId, Callback<T>)>,
    next_id: u64,
}

impl<T> Observers<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds an observer.
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(oid, _)| *oid != id);
        self.entries.len() != before
    }

    /// Notifies every observer, in subscription order.
    pub fn emit(&mut self, value: &T) {
        for (_, observer) in &mut self.entries {
            observer(value);
        }
    }

    /// Number of live observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::Observers;

    #[test]
    fn emits_in_subscription_order() {
        let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<i32> = Observers::new();

        let a = seen.clone();
        observers.subscribe(move |v| a.borrow_mut().push(*v * 10));
        let b = seen.clone();
        observers.subscribe(move |v| b.borrow_mut().push(*v * 100));

        observers.emit(&7);
        assert_eq!(*seen.borrow(), [70, 700]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut observers: Observers<()> = Observers::new();
        let id = observers.subscribe(|_| {});
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert!(observers.is_empty());
    }
}
