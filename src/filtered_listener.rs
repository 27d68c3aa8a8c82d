use crate::event::InputEvent;
use crate::eventbus::InputListener;

/// Wraps a listener and filters events based on a user-supplied predicate.
///
/// Useful when [`EventFilter`](crate::eventbus::EventFilter) is too coarse, e.g. to
/// follow a single device or button.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&InputEvent) -> bool + Send + Sync>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&InputEvent) -> bool + Send + Sync + 'static,
        inner: impl InputListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Only forward events from `device`.
    pub fn for_device(device: crate::device::DeviceId, inner: impl InputListener + 'static) -> Self {
        Self::new(move |e| e.device == device, inner)
    }
}

impl InputListener for FilteredListener {
    fn on_input(&mut self, event: &InputEvent) {
        if (self.predicate)(event) {
            self.inner.on_input(event);
        }
    }
}
