//! Document change notification.

use crate::region::Region;

/// Something that happened to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    /// `removed_len` bytes at `offset` were replaced by `inserted`.
    Edited {
        offset: u32,
        removed_len: u32,
        inserted: String,
    },
    RegionAdded(Region),
    /// Every region equal to this one was removed.
    RegionRemoved(Region),
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Box<dyn Fn(&DocumentEvent) + Send + Sync>;

/// Registered event callbacks, called in subscription order.
///
/// Ids are handed out in increasing order and callbacks are only ever
/// appended, so the list stays sorted by id.
#[derive(Default)]
pub struct Listeners {
    callbacks: Vec<(ListenerId, Callback)>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&DocumentEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.callbacks.binary_search_by_key(&id, |&(k, _)| k) {
            Ok(index) => {
                self.callbacks.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn dispatch(&self, event: &DocumentEvent) {
        tracing::trace!(
            listeners = self.callbacks.len(),
            ?event,
            "dispatching document event"
        );
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.callbacks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dispatch_keeps_subscription_order_after_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        let ids: Vec<ListenerId> = (0..4)
            .map(|n| {
                let sink = Arc::clone(&seen);
                listeners.subscribe(move |_| sink.lock().push(n))
            })
            .collect();
        assert!(listeners.unsubscribe(ids[1]));
        assert!(!listeners.unsubscribe(ids[1]));
        listeners.subscribe({
            let sink = Arc::clone(&seen);
            move |_| sink.lock().push(4)
        });
        listeners.dispatch(&DocumentEvent::RegionAdded(Region::new(0, 1)));
        assert_eq!(*seen.lock(), vec![0, 2, 3, 4]);
        assert_eq!(listeners.len(), 4);
    }
}
