// Per-frame callback source.
//
// The controller asks for "one more frame" and the host delivers it on its
// next display frame. Nothing ticks unless it was requested, and a cancelled
// request is never delivered.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    /// Current host time in milliseconds.
    fn now_ms(&self) -> f64;
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a pending request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Default)]
struct FrameQueue {
    next_id: u64,
    now_ms: f64,
    pending: Vec<FrameHandle>,
}

/// Single-threaded frame loop driven by the host window.
///
/// Clones share one queue: the controller holds one to request frames, the
/// host holds another to advance time and drain what is due.
#[derive(Clone, Default)]
pub struct FrameLoop {
    queue: Rc<RefCell<FrameQueue>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move host time forward (called once per display frame).
    pub fn advance_to(&self, now_ms: f64) {
        self.queue.borrow_mut().now_ms = now_ms;
    }

    /// Everything requested so far. Requests made while handling these land in the next batch.
    pub fn take_due(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queue.borrow_mut().pending)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

impl FrameScheduler for FrameLoop {
    fn now_ms(&self) -> f64 {
        self.queue.borrow().now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        let mut q = self.queue.borrow_mut();
        let handle = FrameHandle(q.next_id);
        q.next_id += 1;
        q.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.borrow_mut().pending.retain(|h| *h != handle);
    }
}
