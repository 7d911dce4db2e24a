// The phone-screen preview: pattern renderer + scroll controller + glass panel.
//
// Mounting acquires three things (store subscription, viewport observation,
// animation frames) and unmounting releases all of them. Dropping a mount
// without `unmount` still cancels the animation frame; the listeners it left
// behind only hold weak references and go quiet.
// Visual: the phone screen's contents, pattern first, glass card on top.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::draw::fill_rect;
use crate::error::Error;
use crate::glass::GlassCompositor;
use crate::pattern::PatternRenderer;
use crate::scheduler::{FrameLoop, FrameScheduler};
use crate::scroll::{PointerEvent, ScrollController, ScrollState};
use crate::signal::ListenerId;
use crate::store::{GlassState, GlassStore, OverlayParams};
use crate::types::{FrameBuffer, Rect};
use crate::viewport::ViewportSignal;

/// Container background behind the pattern (visible only before the first redraw).
pub const CONTAINER_BG: u32 = 0x00FF_FFFF;

struct Preview {
    renderer: PatternRenderer,
    scroll: ScrollController<FrameLoop>,
    overlay: OverlayParams,
    compositor: GlassCompositor,
}

impl Preview {
    fn apply_state(&mut self, state: &GlassState) {
        let bg = &state.background;
        self.renderer.set_pattern(bg.pattern, bg.spatial_frequency);
        self.scroll.sync(bg);
        self.overlay = state.overlay;
    }
}

pub struct PreviewMount {
    inner: Rc<RefCell<Preview>>,
    frames: FrameLoop,
    store_listener: ListenerId,
    viewport_listener: ListenerId,
}

impl PreviewMount {
    /// Fresh renderer and controller (offset 0), wired to the store and the viewport.
    pub fn mount(store: &mut GlassStore, viewport: &mut ViewportSignal, frames: FrameLoop) -> Self {
        let state = store.state();
        let mut preview = Preview {
            renderer: PatternRenderer::new(),
            scroll: ScrollController::new(frames.clone()),
            overlay: state.overlay,
            compositor: GlassCompositor::new(),
        };
        preview.renderer.set_viewport(viewport.current());
        preview.apply_state(&state);
        let inner = Rc::new(RefCell::new(preview));

        let weak: Weak<RefCell<Preview>> = Rc::downgrade(&inner);
        let store_listener = store.subscribe(move |s| {
            if let Some(p) = weak.upgrade() {
                p.borrow_mut().apply_state(s);
            }
        });
        let weak = Rc::downgrade(&inner);
        let viewport_listener = viewport.observe(move |size| {
            if let Some(p) = weak.upgrade() {
                p.borrow_mut().renderer.set_viewport(*size);
            }
        });

        log::info!("preview mounted");
        Self { inner, frames, store_listener, viewport_listener }
    }

    /// Release the subscription, the resize observation and the animation frame.
    pub fn unmount(self, store: &mut GlassStore, viewport: &mut ViewportSignal) {
        store.unsubscribe(self.store_listener);
        viewport.disconnect(self.viewport_listener);
        log::info!("preview unmounted at offset {:.1}", self.scroll_offset());
        // Drop cancels the pending frame.
    }

    /// Deliver every animation frame that is due at the loop's current time.
    pub fn run_frames(&self) {
        let now = self.frames.now_ms();
        for handle in self.frames.take_due() {
            self.inner.borrow_mut().scroll.on_frame(handle, now);
        }
    }

    pub fn handle_pointer(&self, event: PointerEvent) {
        self.inner.borrow_mut().scroll.handle_pointer(event);
    }

    pub fn scroll_offset(&self) -> f64 {
        self.inner.borrow().scroll.offset()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.inner.borrow().scroll.state()
    }

    /// Visual shift currently applied to the pattern, in `(-2f, 0]`.
    pub fn pattern_shift(&self) -> f64 {
        let p = self.inner.borrow();
        p.renderer.shift_for(p.scroll.offset())
    }

    pub fn redraw_count(&self) -> u64 {
        self.inner.borrow().renderer.redraw_count()
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.inner.borrow().renderer.surface().map(|s| (s.width(), s.height()))
    }

    /// Paint the screen: white container, scrolled pattern, glass panel.
    pub fn compose(&self, fb: &mut FrameBuffer, container: Rect) -> Result<(), Error> {
        let mut guard = self.inner.borrow_mut();
        let p = &mut *guard;
        fill_rect(fb, container, CONTAINER_BG);
        p.renderer.blit(fb, container, p.scroll.offset());
        p.compositor.composite(fb, container, &p.overlay)
    }
}

impl Drop for PreviewMount {
    fn drop(&mut self) {
        self.inner.borrow_mut().scroll.unmount();
    }
}
