//! Store change notifications
//!
//! Observers register a [`StoreListener`] with the store and are called
//! synchronously, in registration order, after every mutation. A single
//! mutation may publish several events; their order is always
//! added → count changed → statistics updated.

use crate::stats::StoreStatistics;

/// Events published by the measurement store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A new, empty satellite series was created
    SatelliteAdded {
        /// Satellite name
        satellite: String,
    },
    /// A measurement was appended to a satellite series
    DataAdded {
        /// Satellite name
        satellite: String,
        /// Number of measurements the satellite holds after the append
        count: usize,
    },
    /// A single satellite and its series were removed
    SatelliteRemoved {
        /// Satellite name
        satellite: String,
        /// Number of measurements dropped with it
        removed: usize,
    },
    /// The whole store was cleared
    DataCleared {
        /// Number of measurements dropped
        removed: usize,
    },
    /// Global statistics were recomputed after a mutation
    StatisticsUpdated(StoreStatistics),
}

/// Receiver of [`StoreEvent`]s
pub trait StoreListener {
    /// Handle one event
    fn on_event(&mut self, event: &StoreEvent);
}

impl<F> StoreListener for F
where
    F: FnMut(&StoreEvent),
{
    fn on_event(&mut self, event: &StoreEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of registered listeners
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Vec<(ListenerId, Box<dyn StoreListener>)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn StoreListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn publish(&mut self, event: &StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_event(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl core::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::default();

        let first = Rc::clone(&log);
        registry.subscribe(Box::new(move |_: &StoreEvent| first.borrow_mut().push("first")));
        let second = Rc::clone(&log);
        registry.subscribe(Box::new(move |_: &StoreEvent| second.borrow_mut().push("second")));

        registry.publish(&StoreEvent::DataCleared { removed: 0 });

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut registry = ListenerRegistry::default();

        let counter = Rc::clone(&hits);
        let id = registry.subscribe(Box::new(move |_: &StoreEvent| *counter.borrow_mut() += 1));

        registry.publish(&StoreEvent::DataCleared { removed: 0 });
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.publish(&StoreEvent::DataCleared { removed: 0 });

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(registry.len(), 0);
    }
}
