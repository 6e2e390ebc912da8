//! Single-threaded change notification keyed by record key.
//!
//! The original editor polled the previous day's record every second to keep
//! linked messages in sync. This bus replaces the poll with an explicit
//! publish/subscribe handshake: writers publish the key they touched, and
//! subscribers get a dirty flag they drain on their next refresh pass. The
//! observable contract is unchanged (a linked day converges to the live value
//! of the previous day), only the staleness window disappears.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Dirty-flag registry. Flags are held weakly so a subscriber that goes away
/// (for example when the schedule drops a day from view) unsubscribes itself
/// by dropping its `Rc`.
#[derive(Debug, Default)]
pub struct KeyBus {
    subscribers: RefCell<HashMap<String, Vec<Weak<Cell<bool>>>>>,
}

impl KeyBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `key`. The returned flag flips to `true` whenever
    /// the key is published; the subscriber resets it after reacting.
    pub fn subscribe(&self, key: &str) -> Rc<Cell<bool>> {
        let flag = Rc::new(Cell::new(false));
        self.subscribers
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(Rc::downgrade(&flag));
        flag
    }

    /// Announce that `key` changed, raising every live subscriber flag.
    /// Dead subscriptions are pruned on the way through.
    pub fn publish(&self, key: &str) {
        let mut subscribers = self.subscribers.borrow_mut();
        if let Some(flags) = subscribers.get_mut(key) {
            flags.retain(|weak| match weak.upgrade() {
                Some(flag) => {
                    flag.set(true);
                    true
                }
                None => false,
            });
            if flags.is_empty() {
                subscribers.remove(key);
            }
        }
    }
}
