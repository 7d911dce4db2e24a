// Scroll offset controller: auto-scroll loop vs. pointer drag/wheel.
//
// Exactly one source moves the offset at a time. While dragging, no frame is
// requested at all, so the two sources can never compound.

use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::store::BackgroundParams;

/// Reference frame interval; `scroll_speed` is pixels per this many ms.
pub const REFERENCE_FRAME_MS: f64 = 16.0;
/// Wheel deltas are damped by this factor before reaching the offset.
pub const WHEEL_DAMPING: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollState {
    Idle,
    AutoScrolling,
    Dragging { press_y: f64, offset_at_press: f64 },
}

impl ScrollState {
    pub fn label(&self) -> &'static str {
        match self {
            ScrollState::Idle => "IDLE",
            ScrollState::AutoScrolling => "AUTO",
            ScrollState::Dragging { .. } => "DRAG",
        }
    }
}

/// Pointer input, already relative to the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { y: f64 },
    Move { y: f64 },
    Up,
    Leave,
    /// Browser convention: positive = scroll down.
    Wheel { delta_y: f64 },
}

pub struct ScrollController<S: FrameScheduler> {
    scheduler: S,
    offset: f64,
    state: ScrollState,
    auto_scroll: bool,
    speed: f64,
    pending: Option<FrameHandle>,
    last_tick_ms: f64,
}

impl<S: FrameScheduler> ScrollController<S> {
    /// Fresh controller, offset 0, nothing scheduled until `sync`.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            offset: 0.0,
            state: ScrollState::Idle,
            auto_scroll: false,
            speed: 0.0,
            pending: None,
            last_tick_ms: 0.0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn wants_auto(&self) -> bool {
        self.auto_scroll && self.speed > 0.0
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, ScrollState::Dragging { .. })
    }

    fn set_state(&mut self, next: ScrollState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            log::debug!("scroll {} -> {}", self.state.label(), next.label());
        }
        self.state = next;
    }

    /// Pick up new background parameters. The loop restarts (fresh reference
    /// time) whenever the auto-scroll flag or the speed changed.
    pub fn sync(&mut self, bg: &BackgroundParams) {
        if bg.is_auto_scroll == self.auto_scroll && bg.scroll_speed == self.speed {
            return;
        }
        self.auto_scroll = bg.is_auto_scroll;
        self.speed = bg.scroll_speed;
        self.stop_loop();
        // A drag in progress keeps the offset; the loop waits for release.
        if self.wants_auto() && !self.is_dragging() {
            self.start_loop();
        }
    }

    fn start_loop(&mut self) {
        self.last_tick_ms = self.scheduler.now_ms();
        self.pending = Some(self.scheduler.request_frame());
        self.set_state(ScrollState::AutoScrolling);
    }

    fn stop_loop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == ScrollState::AutoScrolling {
            self.set_state(ScrollState::Idle);
        }
    }

    /// One animation tick. Stale handles (cancelled before delivery) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if self.pending != Some(handle) {
            return;
        }
        let elapsed = now_ms - self.last_tick_ms;
        self.last_tick_ms = now_ms;
        self.offset += self.speed * (elapsed / REFERENCE_FRAME_MS);
        self.pending = Some(self.scheduler.request_frame());
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { y } => self.pointer_down(y),
            PointerEvent::Move { y } => self.pointer_move(y),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_release(),
            PointerEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    fn pointer_down(&mut self, y: f64) {
        // Gated at interaction start: no drags while auto-scroll is on.
        if self.auto_scroll || self.is_dragging() {
            return;
        }
        self.stop_loop();
        self.set_state(ScrollState::Dragging { press_y: y, offset_at_press: self.offset });
    }

    fn pointer_move(&mut self, y: f64) {
        if let ScrollState::Dragging { press_y, offset_at_press } = self.state {
            // Content follows the finger.
            self.offset = offset_at_press - (y - press_y);
        }
    }

    fn pointer_release(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.set_state(ScrollState::Idle);
        if self.wants_auto() {
            self.start_loop();
        }
    }

    fn wheel(&mut self, delta_y: f64) {
        if self.auto_scroll || self.is_dragging() {
            return;
        }
        self.offset += delta_y * WHEEL_DAMPING;
    }

    /// Release the frame subscription (preview surface going away).
    pub fn unmount(&mut self) {
        self.stop_loop();
        if self.is_dragging() {
            self.set_state(ScrollState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameLoop;
    use crate::store::DEFAULT_BACKGROUND;

    fn manual() -> BackgroundParams {
        BackgroundParams { is_auto_scroll: false, ..DEFAULT_BACKGROUND }
    }

    #[test]
    fn zero_speed_never_schedules() {
        let frames = FrameLoop::new();
        let mut c = ScrollController::new(frames.clone());
        c.sync(&BackgroundParams { scroll_speed: 0.0, ..DEFAULT_BACKGROUND });
        assert_eq!(c.state(), ScrollState::Idle);
        assert_eq!(frames.pending_count(), 0);
    }

    #[test]
    fn turning_auto_off_cancels_the_pending_frame() {
        let frames = FrameLoop::new();
        let mut c = ScrollController::new(frames.clone());
        c.sync(&DEFAULT_BACKGROUND);
        assert_eq!(frames.pending_count(), 1);

        c.sync(&manual());
        assert_eq!(frames.pending_count(), 0);
        assert_eq!(c.state(), ScrollState::Idle);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let frames = FrameLoop::new();
        let mut c = ScrollController::new(frames.clone());
        c.sync(&DEFAULT_BACKGROUND);
        let stale = frames.take_due()[0];
        c.sync(&manual());

        frames.advance_to(1000.0);
        c.on_frame(stale, 1000.0);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn drag_moves_content_with_the_finger() {
        let mut c = ScrollController::new(FrameLoop::new());
        c.sync(&manual());
        c.handle_pointer(PointerEvent::Wheel { delta_y: 40.0 });
        assert_eq!(c.offset(), 20.0);

        c.handle_pointer(PointerEvent::Down { y: 100.0 });
        c.handle_pointer(PointerEvent::Move { y: 130.0 });
        assert_eq!(c.offset(), -10.0);
        c.handle_pointer(PointerEvent::Move { y: 60.0 });
        assert_eq!(c.offset(), 60.0);

        c.handle_pointer(PointerEvent::Leave);
        assert_eq!(c.state(), ScrollState::Idle);
        c.handle_pointer(PointerEvent::Move { y: 0.0 });
        assert_eq!(c.offset(), 60.0);
    }

    #[test]
    fn wheel_is_ignored_while_dragging() {
        let mut c = ScrollController::new(FrameLoop::new());
        c.sync(&manual());
        c.handle_pointer(PointerEvent::Down { y: 0.0 });
        c.handle_pointer(PointerEvent::Wheel { delta_y: 100.0 });
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn auto_enabled_mid_drag_waits_for_release() {
        let frames = FrameLoop::new();
        let mut c = ScrollController::new(frames.clone());
        c.sync(&manual());
        c.handle_pointer(PointerEvent::Down { y: 10.0 });

        c.sync(&DEFAULT_BACKGROUND);
        assert!(matches!(c.state(), ScrollState::Dragging { .. }));
        assert_eq!(frames.pending_count(), 0);

        c.handle_pointer(PointerEvent::Up);
        assert_eq!(c.state(), ScrollState::AutoScrolling);
        assert_eq!(frames.pending_count(), 1);
    }

    #[test]
    fn unmount_releases_frame() {
        let frames = FrameLoop::new();
        let mut c = ScrollController::new(frames.clone());
        c.sync(&DEFAULT_BACKGROUND);
        c.unmount();
        assert_eq!(frames.pending_count(), 0);
        assert!(!c.is_frame_pending());
    }
}
