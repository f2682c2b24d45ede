//! Change feed - fan-out of storage events to the other browsing contexts.
//!
//! Each subscription owns its own queue, so a slow consumer never blocks the
//! writer and a write never re-enters the consumer. Events are delivered when
//! the subscriber drains its queue, the way a browser queues `storage` events
//! on the receiving tab's event loop.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Identifies one browsing context within a storage area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// A change to one storage key, made by the `source` context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// Value before the write (None if the key was absent).
    pub old_value: Option<String>,
    /// Value after the write (None if the key was removed).
    pub new_value: Option<String>,
    pub source: ContextId,
}

#[derive(Default)]
struct EventQueue {
    events: Mutex<VecDeque<StorageEvent>>,
}

impl EventQueue {
    fn lock(&self) -> MutexGuard<'_, VecDeque<StorageEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Slot {
    id: u64,
    context: ContextId,
    key: Option<String>,
    queue: Arc<EventQueue>,
}

#[derive(Default)]
struct FeedInner {
    next_id: u64,
    slots: Vec<Slot>,
}

/// Shared registry of subscriptions for one storage area.
#[derive(Clone, Default)]
pub(crate) struct ChangeFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl ChangeFeed {
    fn lock(&self) -> MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe `context` to changes of `key` (or of every key when None).
    pub(crate) fn subscribe(&self, context: ContextId, key: Option<String>) -> Subscription {
        let queue = Arc::new(EventQueue::default());
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.slots.push(Slot {
            id,
            context,
            key,
            queue: Arc::clone(&queue),
        });

        Subscription {
            id,
            feed: Arc::downgrade(&self.inner),
            queue,
        }
    }

    /// Deliver `event` to every subscription outside the source context.
    pub(crate) fn publish(&self, event: StorageEvent) {
        let inner = self.lock();
        for slot in &inner.slots {
            if slot.context == event.source {
                continue;
            }
            if let Some(key) = &slot.key {
                if *key != event.key {
                    continue;
                }
            }
            slot.queue.lock().push_back(event.clone());
        }
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.lock().slots.len()
    }
}

/// A live subscription to storage events from other contexts.
///
/// Dropping the subscription unsubscribes it.
pub struct Subscription {
    id: u64,
    feed: Weak<Mutex<FeedInner>>,
    queue: Arc<EventQueue>,
}

impl Subscription {
    /// Take the next event without waiting.
    pub fn try_next(&self) -> Option<StorageEvent> {
        self.queue.lock().pop_front()
    }

    /// Take every waiting event.
    pub fn drain(&self) -> Vec<StorageEvent> {
        self.queue.lock().drain(..).collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.upgrade() {
            let mut inner = feed.lock().unwrap_or_else(PoisonError::into_inner);
            inner.slots.retain(|slot| slot.id != self.id);
        }
    }
}
