// Keyboard control surface: one key, one store mutator.
// Every stepped value is clamped here, before it reaches the store.

use minifb::Key;

use crate::config::{ControlLimits, Range};
use crate::store::GlassStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    CyclePattern,
    Frequency(f64),
    ScrollSpeed(f64),
    ToggleAutoScroll,
    Blur(f64),
    Opacity(f64),
    BorderOpacity(f64),
    Width(f64),
    Height(f64),
    BorderRadius(f64),
    /// Position step in (x, y) directions.
    Move(f64, f64),
    ToggleShadow,
    ResetBackground,
    ResetOverlay,
    ResetAll,
}

/// Map a key press to an action. Shift flips the direction of stepped keys.
pub fn action_for_key(key: Key, shift: bool) -> Option<ControlAction> {
    use ControlAction::*;
    let dir = if shift { -1.0 } else { 1.0 };
    let action = match key {
        Key::P => CyclePattern,
        Key::RightBracket => Frequency(1.0),
        Key::LeftBracket => Frequency(-1.0),
        Key::Equal => ScrollSpeed(1.0),
        Key::Minus => ScrollSpeed(-1.0),
        Key::Space => ToggleAutoScroll,
        Key::B => Blur(dir),
        Key::O => Opacity(dir),
        Key::K => BorderOpacity(dir),
        Key::W => Width(dir),
        Key::H => Height(dir),
        Key::R => BorderRadius(dir),
        Key::Left => Move(-1.0, 0.0),
        Key::Right => Move(1.0, 0.0),
        Key::Up => Move(0.0, -1.0),
        Key::Down => Move(0.0, 1.0),
        Key::S => ToggleShadow,
        Key::Z => ResetBackground,
        Key::X => ResetOverlay,
        Key::Backspace => ResetAll,
        _ => return None,
    };
    Some(action)
}

fn step_axis(range: &Range, v: f64, dir: f64) -> f64 {
    if dir == 0.0 { v } else { range.stepped(v, dir) }
}

/// Read the current value, step/clamp it, call the one matching mutator.
pub fn apply(store: &mut GlassStore, limits: &ControlLimits, action: ControlAction) {
    let bg = *store.background();
    let ov = *store.overlay();
    match action {
        ControlAction::CyclePattern => store.set_pattern(bg.pattern.next()),
        ControlAction::Frequency(d) => {
            store.set_spatial_frequency(limits.spatial_frequency.stepped(bg.spatial_frequency, d))
        }
        ControlAction::ScrollSpeed(d) => store.set_scroll_speed(limits.scroll_speed.stepped(bg.scroll_speed, d)),
        ControlAction::ToggleAutoScroll => store.set_auto_scroll(!bg.is_auto_scroll),
        ControlAction::Blur(d) => store.set_blur_strength(limits.blur_strength.stepped(ov.blur_strength, d)),
        ControlAction::Opacity(d) => store.set_opacity(limits.opacity.stepped(ov.opacity, d)),
        ControlAction::BorderOpacity(d) => {
            store.set_border_opacity(limits.border_opacity.stepped(ov.border_opacity, d))
        }
        ControlAction::Width(d) => store.set_overlay_size(limits.width.stepped(ov.width, d), ov.height),
        ControlAction::Height(d) => store.set_overlay_size(ov.width, limits.height.stepped(ov.height, d)),
        ControlAction::BorderRadius(d) => {
            store.set_border_radius(limits.border_radius.stepped(ov.border_radius, d))
        }
        ControlAction::Move(dx, dy) => store.set_overlay_position(
            step_axis(&limits.position, ov.position_x, dx),
            step_axis(&limits.position, ov.position_y, dy),
        ),
        ControlAction::ToggleShadow => store.set_shadow_enabled(!ov.is_shadow_enabled),
        ControlAction::ResetBackground => store.reset_background(),
        ControlAction::ResetOverlay => store.reset_overlay(),
        ControlAction::ResetAll => store.reset_all(),
    }
}

/// Lines for the HUD's key reference.
pub const KEY_HELP: &[&str] = &[
    "P        PATTERN",
    "[ ]      FREQUENCY -/+",
    "- =      SPEED -/+",
    "SPACE    AUTO SCROLL",
    "B O K    BLUR OPACITY BORDER",
    "W H R    WIDTH HEIGHT RADIUS",
    "ARROWS   POSITION",
    "SHIFT    REVERSE B O K W H R",
    "S        SHADOW",
    "Z X      RESET BG / GLASS",
    "BKSP     RESET ALL",
    "DRAG/WHEEL WHEN AUTO IS OFF",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DEFAULT_BACKGROUND, DEFAULT_OVERLAY, PatternKind};

    #[test]
    fn keys_map_with_shift_reversal() {
        assert_eq!(action_for_key(Key::B, false), Some(ControlAction::Blur(1.0)));
        assert_eq!(action_for_key(Key::B, true), Some(ControlAction::Blur(-1.0)));
        assert_eq!(action_for_key(Key::F12, false), None);
    }

    #[test]
    fn frequency_is_clamped_before_the_store() {
        let mut store = GlassStore::new();
        let limits = ControlLimits::default();
        store.set_spatial_frequency(198.0);
        apply(&mut store, &limits, ControlAction::Frequency(1.0));
        assert_eq!(store.background().spatial_frequency, 200.0);
        apply(&mut store, &limits, ControlAction::Frequency(1.0));
        assert_eq!(store.background().spatial_frequency, 200.0);
    }

    #[test]
    fn width_keeps_height_and_move_keeps_other_axis() {
        let mut store = GlassStore::new();
        let limits = ControlLimits::default();
        apply(&mut store, &limits, ControlAction::Width(1.0));
        assert_eq!(store.overlay().width, 306.0);
        assert_eq!(store.overlay().height, DEFAULT_OVERLAY.height);

        apply(&mut store, &limits, ControlAction::Move(0.0, -1.0));
        assert_eq!(store.overlay().position_x, DEFAULT_OVERLAY.position_x);
        assert_eq!(store.overlay().position_y, 48.0);
    }

    #[test]
    fn toggles_and_resets() {
        let mut store = GlassStore::new();
        let limits = ControlLimits::default();
        apply(&mut store, &limits, ControlAction::CyclePattern);
        apply(&mut store, &limits, ControlAction::ToggleAutoScroll);
        apply(&mut store, &limits, ControlAction::ToggleShadow);
        assert_eq!(store.background().pattern, PatternKind::Checkerboard);
        assert!(!store.background().is_auto_scroll);
        assert!(store.overlay().is_shadow_enabled);

        apply(&mut store, &limits, ControlAction::ResetBackground);
        assert_eq!(*store.background(), DEFAULT_BACKGROUND);
        assert!(store.overlay().is_shadow_enabled);

        apply(&mut store, &limits, ControlAction::ResetAll);
        assert_eq!(*store.overlay(), DEFAULT_OVERLAY);
    }
}
