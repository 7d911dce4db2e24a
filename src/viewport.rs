// Container-size input signal.
//
// The host pushes the container's rendered box (never the surface's own size)
// whenever it lays out; observers hear about it only when it actually changed.

use crate::signal::{ListenerId, Listeners};
use crate::types::ViewportSize;

#[derive(Default)]
pub struct ViewportSignal {
    current: ViewportSize,
    observers: Listeners<ViewportSize>,
}

impl ViewportSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewportSize {
        self.current
    }

    /// Record a layout result. Returns true (and notifies) only on change.
    pub fn push(&mut self, size: ViewportSize) -> bool {
        if size == self.current {
            return false;
        }
        log::debug!("viewport {}x{} -> {}x{}", self.current.width, self.current.height, size.width, size.height);
        self.current = size;
        self.observers.notify(&size);
        true
    }

    pub fn observe(&mut self, observer: impl FnMut(&ViewportSize) + 'static) -> ListenerId {
        self.observers.add(observer)
    }

    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
