// Shared parameter store: background + overlay parameter groups.
//
// Every mutator replaces only the field(s) it names and then synchronously
// notifies all subscribers with the new snapshot. Nothing here validates
// ranges; the control surface clamps before calling in (see `controls`).

use crate::signal::{ListenerId, Listeners};

/// Which tiling algorithm the background uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Stripe,
    Checkerboard,
    Sine,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Stripe, PatternKind::Checkerboard, PatternKind::Sine];

    /// Next kind in the cycle (used by the P key).
    pub fn next(self) -> Self {
        match self {
            PatternKind::Stripe => PatternKind::Checkerboard,
            PatternKind::Checkerboard => PatternKind::Sine,
            PatternKind::Sine => PatternKind::Stripe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternKind::Stripe => "STRIPE",
            PatternKind::Checkerboard => "CHECKERBOARD",
            PatternKind::Sine => "SINE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundParams {
    pub pattern: PatternKind,
    /// Pattern period in pixels.
    pub spatial_frequency: f64,
    /// Pixels advanced per 16 ms reference frame while auto-scrolling.
    pub scroll_speed: f64,
    pub is_auto_scroll: bool,
}

pub const DEFAULT_BACKGROUND: BackgroundParams = BackgroundParams {
    pattern: PatternKind::Stripe,
    spatial_frequency: 50.0,
    scroll_speed: 1.0,
    is_auto_scroll: true,
};

impl Default for BackgroundParams {
    fn default() -> Self {
        DEFAULT_BACKGROUND
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    pub blur_strength: f64,
    pub opacity: f64,
    pub border_opacity: f64,
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
    /// Panel center, percent of the container width.
    pub position_x: f64,
    /// Panel center, percent of the container height.
    pub position_y: f64,
    pub is_shadow_enabled: bool,
}

pub const DEFAULT_OVERLAY: OverlayParams = OverlayParams {
    blur_strength: 10.0,
    opacity: 0.3,
    border_opacity: 0.0,
    width: 300.0,
    height: 200.0,
    border_radius: 20.0,
    position_x: 50.0,
    position_y: 50.0,
    is_shadow_enabled: false,
};

impl Default for OverlayParams {
    fn default() -> Self {
        DEFAULT_OVERLAY
    }
}

/// Full snapshot handed to subscribers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlassState {
    pub background: BackgroundParams,
    pub overlay: OverlayParams,
}

/// Observable container for both parameter groups.
///
/// Owned by the host and passed by `&mut` to whoever mutates it.
#[derive(Default)]
pub struct GlassStore {
    state: GlassState,
    listeners: Listeners<GlassState>,
}

impl GlassStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GlassState {
        self.state
    }

    pub fn background(&self) -> &BackgroundParams {
        &self.state.background
    }

    pub fn overlay(&self) -> &OverlayParams {
        &self.state.overlay
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GlassState) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn update_background(&mut self, change: impl FnOnce(&mut BackgroundParams)) {
        change(&mut self.state.background);
        log::trace!("background -> {:?}", self.state.background);
        self.listeners.notify(&self.state);
    }

    fn update_overlay(&mut self, change: impl FnOnce(&mut OverlayParams)) {
        change(&mut self.state.overlay);
        log::trace!("overlay -> {:?}", self.state.overlay);
        self.listeners.notify(&self.state);
    }

    // --- background ---

    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.update_background(|bg| bg.pattern = pattern);
    }

    pub fn set_spatial_frequency(&mut self, frequency: f64) {
        self.update_background(|bg| bg.spatial_frequency = frequency);
    }

    pub fn set_scroll_speed(&mut self, speed: f64) {
        self.update_background(|bg| bg.scroll_speed = speed);
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.update_background(|bg| bg.is_auto_scroll = enabled);
    }

    // --- overlay ---

    pub fn set_blur_strength(&mut self, blur: f64) {
        self.update_overlay(|o| o.blur_strength = blur);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.update_overlay(|o| o.opacity = opacity);
    }

    pub fn set_border_opacity(&mut self, opacity: f64) {
        self.update_overlay(|o| o.border_opacity = opacity);
    }

    /// Width and height change together so listeners never see half an update.
    pub fn set_overlay_size(&mut self, width: f64, height: f64) {
        self.update_overlay(|o| {
            o.width = width;
            o.height = height;
        });
    }

    pub fn set_border_radius(&mut self, radius: f64) {
        self.update_overlay(|o| o.border_radius = radius);
    }

    /// Both axes in one notification, percent of the container.
    pub fn set_overlay_position(&mut self, x: f64, y: f64) {
        self.update_overlay(|o| {
            o.position_x = x;
            o.position_y = y;
        });
    }

    pub fn set_shadow_enabled(&mut self, enabled: bool) {
        self.update_overlay(|o| o.is_shadow_enabled = enabled);
    }

    // --- resets ---

    pub fn reset_all(&mut self) {
        self.state = GlassState { background: DEFAULT_BACKGROUND, overlay: DEFAULT_OVERLAY };
        log::trace!("reset all");
        self.listeners.notify(&self.state);
    }

    pub fn reset_background(&mut self) {
        self.update_background(|bg| *bg = DEFAULT_BACKGROUND);
    }

    pub fn reset_overlay(&mut self) {
        self.update_overlay(|o| *o = DEFAULT_OVERLAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_from_defaults() {
        let store = GlassStore::new();
        assert_eq!(*store.background(), DEFAULT_BACKGROUND);
        assert_eq!(*store.overlay(), DEFAULT_OVERLAY);
    }

    #[test]
    fn every_mutation_notifies_synchronously() {
        let mut store = GlassStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s: &GlassState| sink.borrow_mut().push(*s));

        store.set_spatial_frequency(80.0);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].background.spatial_frequency, 80.0);

        // Same value again still notifies.
        store.set_spatial_frequency(80.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn coupled_mutators_land_in_one_notification() {
        let mut store = GlassStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s: &GlassState| sink.borrow_mut().push(s.overlay));

        store.set_overlay_size(120.0, 90.0);
        store.set_overlay_position(10.0, 75.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!((seen[0].width, seen[0].height), (120.0, 90.0));
        assert_eq!((seen[1].position_x, seen[1].position_y), (10.0, 75.0));
    }

    #[test]
    fn store_accepts_out_of_range_values() {
        let mut store = GlassStore::new();
        store.set_opacity(4.0);
        store.set_spatial_frequency(-3.0);
        assert_eq!(store.overlay().opacity, 4.0);
        assert_eq!(store.background().spatial_frequency, -3.0);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let mut store = GlassStore::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = store.subscribe(move |_| *c.borrow_mut() += 1);

        store.set_auto_scroll(false);
        assert!(store.unsubscribe(id));
        store.set_auto_scroll(true);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn pattern_cycle_visits_every_kind() {
        let mut kind = PatternKind::Stripe;
        let mut visited = Vec::new();
        for _ in 0..3 {
            visited.push(kind);
            kind = kind.next();
        }
        assert_eq!(visited, PatternKind::ALL.to_vec());
        assert_eq!(kind, PatternKind::Stripe);
    }
}
