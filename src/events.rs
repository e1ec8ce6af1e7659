//! Change notifications published by the command layer.
//!
//! Listeners are plain closures registered on an [`EventBus`]. Emission is
//! synchronous and in registration order; a listener sees every event
//! raised after it subscribed.

use std::fmt;

use crate::error::{Result, TriageError};
use crate::model::MessageId;
use crate::selection::CommandAvailability;

/// Upper bound on registered listeners.
pub const MAX_LISTENERS: usize = 16;

/// Something observable changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Messages were added, removed, re-foldered or edited.
    StoreChanged,
    /// The visible subset must be re-read (membership or row content).
    VisibleSubsetChanged,
    /// The selected message changed.
    SelectionChanged(Option<MessageId>),
    /// `CanDelete` / `CanEditDraft` changed value.
    CommandAvailabilityChanged(CommandAvailability),
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Bounded set of change listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Fails once [`MAX_LISTENERS`] are registered.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) -> Result<ListenerId> {
        if self.listeners.len() >= MAX_LISTENERS {
            return Err(TriageError::TooManyListeners(self.listeners.len()));
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Ok(id)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: ChangeEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "Emitting change event");
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
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
    fn test_emit_reaches_listeners_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |e| log.borrow_mut().push((tag, *e))).unwrap();
        }
        bus.emit(ChangeEvent::StoreChanged);
        assert_eq!(
            *log.borrow(),
            vec![
                ("first", ChangeEvent::StoreChanged),
                ("second", ChangeEvent::StoreChanged)
            ]
        );
    }

    #[test]
    fn test_listener_limit() {
        let mut bus = EventBus::new();
        for _ in 0..MAX_LISTENERS {
            bus.subscribe(|_| {}).unwrap();
        }
        assert!(matches!(
            bus.subscribe(|_| {}),
            Err(TriageError::TooManyListeners(n)) if n == MAX_LISTENERS
        ));
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c.borrow_mut() += 1).unwrap();
        bus.emit(ChangeEvent::VisibleSubsetChanged);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(ChangeEvent::VisibleSubsetChanged);
        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }
}
