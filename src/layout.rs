// Window layout: preview pane (phone centered) on the left, HUD on the right.
// Recomputed every frame from the window size; the screen rect is the
// pattern's container and feeds the viewport signal.

use crate::config::PreviewConfig;
use crate::types::Rect;

/// Breathing room around the phone inside the preview pane.
const PANE_PADDING: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub preview_pane: Rect,
    pub hud_pane: Rect,
    /// Outer phone body (screen + bezel).
    pub phone: Rect,
    /// Visible display area: the container the pattern is rendered for.
    pub screen: Rect,
}

pub fn compute(window_width: usize, window_height: usize, cfg: &PreviewConfig) -> Layout {
    let (ww, wh) = (window_width as u32, window_height as u32);
    let preview_w = ((ww as f32) * cfg.preview_share.clamp(0.0, 1.0)).round() as u32;
    let preview_pane = Rect::new(0, 0, preview_w, wh);
    let hud_pane = Rect::new(preview_w as i32, 0, ww - preview_w, wh);

    // The phone keeps its nominal size and only shrinks when the pane is too small.
    let bezel = cfg.phone.bezel;
    let avail_w = preview_w.saturating_sub(2 * (PANE_PADDING + bezel));
    let avail_h = wh.saturating_sub(2 * (PANE_PADDING + bezel));
    let screen_w = cfg.phone.screen_width.min(avail_w);
    let screen_h = cfg.phone.screen_height.min(avail_h);

    let sx = (preview_w as i32 - screen_w as i32) / 2;
    let sy = (wh as i32 - screen_h as i32) / 2;
    let screen = Rect::new(sx, sy, screen_w, screen_h);
    let phone = Rect::new(sx - bezel as i32, sy - bezel as i32, screen_w + 2 * bezel, screen_h + 2 * bezel);

    Layout { preview_pane, hud_pane, phone, screen }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_keeps_nominal_size_when_it_fits() {
        let l = compute(960, 800, &PreviewConfig::default());
        assert_eq!(l.preview_pane.width, 672);
        assert_eq!(l.hud_pane, Rect::new(672, 0, 288, 800));
        assert_eq!((l.screen.width, l.screen.height), (306, 696));
        assert_eq!(l.screen.x, (672 - 306) / 2);
        assert_eq!(l.phone.x, l.screen.x - 14);
    }

    #[test]
    fn phone_shrinks_in_a_short_window() {
        let l = compute(960, 500, &PreviewConfig::default());
        assert_eq!(l.screen.height, 500 - 2 * (32 + 14));
        assert_eq!(l.screen.width, 306);
    }

    #[test]
    fn tiny_window_gives_empty_screen() {
        let l = compute(40, 40, &PreviewConfig::default());
        assert!(l.screen.size().is_empty());
    }
}
