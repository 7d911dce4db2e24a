// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the phone preview and the parameter HUD.
// 2) Filled (rounded) rectangles for the phone bezel and the HUD column.
// 3) A tiny 5x7 bitmap font to render HUD text and the glass card label.

use crate::error::Error;
use crate::input::PointerSample;
use crate::types::{FrameBuffer, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Horizontal distance between two glyph origins (5 px glyph + 1 px gap).
pub const TEXT_ADVANCE: i32 = 6;
pub const TEXT_HEIGHT: i32 = 7;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process window events without drawing (used while minimized).
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; tracks user resizes.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position (even outside the window), left button, wheel notches.
    pub fn pointer_sample(&self) -> PointerSample {
        PointerSample {
            pos: self.window.get_mouse_pos(MouseMode::Pass),
            left_down: self.window.get_mouse_down(MouseButton::Left),
            wheel_y: self.window.get_scroll_wheel().map(|(_, y)| y).unwrap_or(0.0),
        }
    }

    /// Keys that went down this frame (with OS key repeat, so holding steps a slider).
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::Yes)
    }

    pub fn shift_down(&self) -> bool {
        self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift)
    }
}

/* ---------- Software drawing: pixels, rectangles, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

fn screen_rect(fb: &FrameBuffer) -> Rect {
    Rect::new(0, 0, fb.width as u32, fb.height as u32)
}

/// Solid rectangle, clipped to the framebuffer.
pub fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    let Some(r) = rect.intersect(&screen_rect(fb)) else {
        return;
    };
    for y in r.y..r.bottom() {
        let row = y as usize * fb.width;
        fb.pixels[row + r.x as usize..row + r.right() as usize].fill(color);
    }
}

/// Coverage in [0,1] of the pixel at local (x, y) by a `w x h` rounded rect.
/// Visual: 1 inside, 0 outside, a one-pixel ramp on the curved edge.
pub fn rounded_rect_coverage(x: i32, y: i32, w: f32, h: f32, radius: f32) -> f32 {
    if w <= 0.0 || h <= 0.0 {
        return 0.0;
    }
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    // Signed distance from the pixel center to the rounded rect.
    let px = (x as f32 + 0.5 - w / 2.0).abs() - (w / 2.0 - r);
    let py = (y as f32 + 0.5 - h / 2.0).abs() - (h / 2.0 - r);
    let outside = (px.max(0.0).powi(2) + py.max(0.0).powi(2)).sqrt();
    let inside = px.max(py).min(0.0);
    let d = outside + inside - r;
    (0.5 - d).clamp(0.0, 1.0)
}

/// Rounded rectangle with hard edges (anything at least half covered is painted).
/// Visual: the phone body.
pub fn fill_rounded_rect(fb: &mut FrameBuffer, rect: Rect, radius: f32, color: u32) {
    let Some(r) = rect.intersect(&screen_rect(fb)) else {
        return;
    };
    let (w, h) = (rect.width as f32, rect.height as f32);
    for y in r.y..r.bottom() {
        for x in r.x..r.right() {
            if rounded_rect_coverage(x - rect.x, y - rect.y, w, h, radius) >= 0.5 {
                fb.pixels[y as usize * fb.width + x as usize] = color;
            }
        }
    }
}

/// Paint `color` over every pixel of `rect` that falls outside its rounded corners.
/// Visual: the screen's content is clipped to the phone's rounded display.
pub fn clip_rounded_corners(fb: &mut FrameBuffer, rect: Rect, radius: f32, color: u32) {
    let r = radius.max(0.0).ceil() as i32;
    if r == 0 {
        return;
    }
    let (w, h) = (rect.width as f32, rect.height as f32);
    // Only the four r x r corner squares can be outside the curve.
    let corners = [
        (rect.x, rect.y),
        (rect.right() - r, rect.y),
        (rect.x, rect.bottom() - r),
        (rect.right() - r, rect.bottom() - r),
    ];
    for (cx, cy) in corners {
        for y in cy..cy + r {
            for x in cx..cx + r {
                if rounded_rect_coverage(x - rect.x, y - rect.y, w, h, radius) < 0.5 {
                    put_pixel(fb, x, y, color);
                }
            }
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII + the punctuation the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '%' => g!(0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '<' => g!(0b00010,0b00100,0b01000,0b10000,0b01000,0b00100,0b00010),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), only where it falls inside `clip`.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, clip: Rect) {
    let Some(rows) = glyph5x7(ch) else {
        return;
    };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let (px, py) = (x + rx, y + ry as i32);
            if clip.contains(px as f32, py as f32) {
                put_pixel(fb, px, py, color);
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, clipped to `clip`.
/// Visual: used for the glass card label, which must not spill out of the panel.
pub fn draw_text_5x7_clipped(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, clip: Rect) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, clip);
        x += TEXT_ADVANCE;
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD line; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    let clip = screen_rect(fb);
    draw_text_5x7_clipped(fb, x, y, text, color, clip);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hud_character_has_a_glyph() {
        let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 |:.,-+=/%[]()<>";
        for ch in alphabet.chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert_eq!(glyph5x7('a'), glyph5x7('A'));
    }

    #[test]
    fn clipped_text_stays_inside_clip() {
        let mut fb = FrameBuffer::new(40, 10);
        draw_text_5x7_clipped(&mut fb, 0, 0, "HHHHHH", 0xFFFFFF, Rect::new(0, 0, 8, 10));
        for y in 0..10 {
            for x in 8..40 {
                assert_eq!(fb.get(x, y), 0, "pixel ({x},{y}) outside clip was painted");
            }
        }
        // The first H's left stem is visible.
        assert_eq!(fb.get(0, 0), 0xFFFFFF);
    }

    #[test]
    fn fill_rect_clips_negative_origin() {
        let mut fb = FrameBuffer::new(4, 4);
        fill_rect(&mut fb, Rect::new(-2, -2, 4, 4), 7);
        assert_eq!(fb.get(0, 0), 7);
        assert_eq!(fb.get(1, 1), 7);
        assert_eq!(fb.get(2, 2), 0);
    }

    #[test]
    fn rounded_corners_are_repainted() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.fill(1);
        clip_rounded_corners(&mut fb, Rect::new(0, 0, 20, 20), 8.0, 9);
        assert_eq!(fb.get(0, 0), 9);
        assert_eq!(fb.get(19, 19), 9);
        assert_eq!(fb.get(10, 10), 1);
        assert_eq!(fb.get(10, 0), 1);
    }
}
