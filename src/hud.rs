// Right-hand HUD column: every parameter, the scroll state, FPS and the key reference.
// Visual: a dark column of small white text, one value per line.

use crate::controls::KEY_HELP;
use crate::draw::{TEXT_HEIGHT, draw_text_5x7, fill_rect};
use crate::scroll::ScrollState;
use crate::store::GlassState;
use crate::types::{FrameBuffer, Rect};

pub const HUD_BG: u32 = 0x001F_2937;
const HUD_TEXT: u32 = 0x00FF_FFFF;
const HUD_HEADING: u32 = 0x003B_82F6;
const LINE_GAP: i32 = 5;
const MARGIN: i32 = 16;

pub struct HudInfo<'a> {
    pub state: &'a GlassState,
    pub scroll: ScrollState,
    pub offset: f64,
    pub fps: f32,
}

fn on_off(v: bool) -> &'static str {
    if v { "ON" } else { "OFF" }
}

/// Text lines, headings prefixed with '#'.
pub fn hud_lines(info: &HudInfo) -> Vec<String> {
    let bg = &info.state.background;
    let ov = &info.state.overlay;
    let mut lines = vec![
        "#BACKGROUND".to_string(),
        format!("PATTERN   {}", bg.pattern.label()),
        format!("FREQUENCY {:.0} PX", bg.spatial_frequency),
        format!("SPEED     {:.1}", bg.scroll_speed),
        format!("AUTO      {}", on_off(bg.is_auto_scroll)),
        String::new(),
        "#GLASS".to_string(),
        format!("BLUR      {:.0} PX", ov.blur_strength),
        format!("OPACITY   {:.2}", ov.opacity),
        format!("BORDER    {:.2}", ov.border_opacity),
        format!("SIZE      {:.0} X {:.0}", ov.width, ov.height),
        format!("RADIUS    {:.0} PX", ov.border_radius),
        format!("POSITION  {:.0}% {:.0}%", ov.position_x, ov.position_y),
        format!("SHADOW    {}", on_off(ov.is_shadow_enabled)),
        String::new(),
        "#SCROLL".to_string(),
        format!("STATE     {}", info.scroll.label()),
        format!("OFFSET    {:.1}", info.offset),
        format!("FPS       {:.1}", info.fps),
        String::new(),
        "#KEYS".to_string(),
    ];
    lines.extend(KEY_HELP.iter().map(|s| s.to_string()));
    lines
}

pub fn draw_hud(fb: &mut FrameBuffer, pane: Rect, lines: &[String]) {
    fill_rect(fb, pane, HUD_BG);
    let x = pane.x + MARGIN;
    let mut y = pane.y + MARGIN;
    for line in lines {
        match line.strip_prefix('#') {
            Some(heading) => draw_text_5x7(fb, x, y, heading, HUD_HEADING),
            None => draw_text_5x7(fb, x, y, line, HUD_TEXT),
        }
        y += TEXT_HEIGHT + LINE_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_reflect_state() {
        let mut state = GlassState::default();
        state.overlay.is_shadow_enabled = true;
        let info = HudInfo { state: &state, scroll: ScrollState::AutoScrolling, offset: 12.25, fps: 59.9 };
        let lines = hud_lines(&info);
        assert!(lines.contains(&"PATTERN   STRIPE".to_string()));
        assert!(lines.contains(&"SIZE      300 X 200".to_string()));
        assert!(lines.contains(&"SHADOW    ON".to_string()));
        assert!(lines.contains(&"STATE     AUTO".to_string()));
        assert!(lines.contains(&"OFFSET    12.2".to_string()) || lines.contains(&"OFFSET    12.3".to_string()));
    }
}
