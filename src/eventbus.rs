//! Listener registry.
//!
//! Listeners are called synchronously, in registration order, for every event that
//! passes their [`EventFilter`]. The `on_*` helpers register a closure for a single
//! [`EventKind`].

use crate::event::{EventKind, InputEvent};
use std::collections::BTreeMap;

/// Trait for reacting to events from any softmouse 3D.
pub trait InputListener: Send {
    fn on_input(&mut self, event: &InputEvent);
}

impl<F> InputListener for F
where
    F: FnMut(&InputEvent) + Send,
{
    fn on_input(&mut self, event: &InputEvent) {
        self(event)
    }
}

/// Determines which events a listener wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    All,
    /// Motion and wheel.
    MotionOnly,
    /// Down, up, click and double-click.
    ButtonsOnly,
    Kind(EventKind),
    Custom(fn(&InputEvent) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, event: &InputEvent) -> bool {
        match *self {
            EventFilter::All => true,
            EventFilter::MotionOnly => {
                matches!(event.kind.kind(), EventKind::Motion | EventKind::Wheel)
            }
            EventFilter::ButtonsOnly => event.kind.button().is_some(),
            EventFilter::Kind(kind) => event.kind.kind() == kind,
            EventFilter::Custom(f) => f(event),
        }
    }
}

/// Identifier returned by [`InputEventBus::add_listener`].
pub type ListenerId = u64;

struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
}

#[derive(Default)]
pub struct InputEventBus {
    next_id: ListenerId,
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl InputEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for the events matching `filter`.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
    ) -> ListenerId {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
            },
        );
        self.next_id += 1;
        id
    }

    pub fn on_motion(&mut self, f: impl FnMut(&InputEvent) + Send + 'static) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::Motion))
    }

    pub fn on_wheel(&mut self, f: impl FnMut(&InputEvent) + Send + 'static) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::Wheel))
    }

    pub fn on_button_down(&mut self, f: impl FnMut(&InputEvent) + Send + 'static) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::ButtonDown))
    }

    pub fn on_button_up(&mut self, f: impl FnMut(&InputEvent) + Send + 'static) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::ButtonUp))
    }

    pub fn on_button_click(&mut self, f: impl FnMut(&InputEvent) + Send + 'static) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::ButtonClick))
    }

    pub fn on_button_double_click(
        &mut self,
        f: impl FnMut(&InputEvent) + Send + 'static,
    ) -> ListenerId {
        self.add_listener(f, EventFilter::Kind(EventKind::ButtonDoubleClick))
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Whether at least one enabled listener is registered.
    pub fn has_listeners(&self) -> bool {
        self.listeners.values().any(|e| e.enabled)
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, event: &InputEvent) {
        for entry in self.listeners.values_mut() {
            if entry.enabled && entry.filter.accepts(event) {
                entry.listener.on_input(event);
            }
        }
    }

    /// Emits a batch of events, preserving order.
    pub fn emit_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}
