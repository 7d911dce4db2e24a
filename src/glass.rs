// Glassmorphism panel compositing, all in software.
// Visual outcomes, in drawing order:
// - (optional) a soft bluish drop shadow below the panel, never under it;
// - the pattern under the panel, blurred (three box passes ≈ Gaussian);
// - a white frosted tint on top at `opacity`;
// - a 1px white inner border at `border_opacity`;
// - rounded corners with a one-pixel soft edge;
// - the "GLASS UI" card label in the middle.

use crate::draw::{TEXT_ADVANCE, TEXT_HEIGHT, draw_text_5x7_clipped, rounded_rect_coverage};
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::store::OverlayParams;
use crate::types::{FrameBuffer, Mask, Rect, pack_rgb, unpack_rgb};

pub const SHADOW_COLOR: u32 = 0x001F_2687; // rgb(31, 38, 135)
pub const SHADOW_ALPHA: f32 = 0.37;
pub const SHADOW_OFFSET_Y: i32 = 8;
/// CSS blur radius of the shadow; the Gaussian sigma is half of it.
pub const SHADOW_BLUR: f64 = 32.0;

const TINT: u32 = 0x00FF_FFFF;
const LABEL: &str = "GLASS UI";
const LABEL_COLOR: u32 = 0x001F_2937;
const LABEL_PADDING: i32 = 6;

/// Where the panel lands: centered on (`position_x`%, `position_y`%) of the container.
/// No clamping: the panel may hang over the container edges.
pub fn panel_rect(container: Rect, p: &OverlayParams) -> Rect {
    let w = p.width.max(0.0).round();
    let h = p.height.max(0.0).round();
    let cx = container.x as f64 + container.width as f64 * p.position_x / 100.0;
    let cy = container.y as f64 + container.height as f64 * p.position_y / 100.0;
    Rect::new((cx - w / 2.0).round() as i32, (cy - h / 2.0).round() as i32, w as u32, h as u32)
}

/// Box radius whose three-pass repetition has the variance of a Gaussian with `sigma`.
pub fn box_blur_radius(sigma: f64) -> usize {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (((4.0 * sigma * sigma + 1.0).sqrt() - 1.0) / 2.0).round() as usize
}

/* ---------------------- separable box blur (sliding window) ---------------------- */

/// One horizontal or vertical pass over `lines` lines of `len` pixels.
/// `step` walks along a line, `line_step` jumps to the next one.
/// Edges are extended (clamped) so borders don't darken.
fn box_pass_rgb(src: &[u32], dst: &mut [u32], len: usize, lines: usize, step: usize, line_step: usize, r: usize) {
    let win = (2 * r + 1) as u32;
    let last = len - 1;
    for line in 0..lines {
        let base = line * line_step;
        let at = |i: usize| src[base + i.min(last) * step];

        // Window starts as [-r..r] with the left half clamped to pixel 0.
        let (r0, g0, b0) = unpack_rgb(at(0));
        let (mut sr, mut sg, mut sb) = (r0 as u32 * (r as u32 + 1), g0 as u32 * (r as u32 + 1), b0 as u32 * (r as u32 + 1));
        for i in 1..=r {
            let (pr, pg, pb) = unpack_rgb(at(i));
            sr += pr as u32;
            sg += pg as u32;
            sb += pb as u32;
        }

        for i in 0..len {
            dst[base + i * step] = pack_rgb((sr / win) as u8, (sg / win) as u8, (sb / win) as u8);

            let (ar, ag, ab) = unpack_rgb(at(i + r + 1));
            let (qr, qg, qb) = unpack_rgb(at(i.saturating_sub(r)));
            sr = sr + ar as u32 - qr as u32;
            sg = sg + ag as u32 - qg as u32;
            sb = sb + ab as u32 - qb as u32;
        }
    }
}

pub fn box_blur_rgb(
    src: &FrameBuffer,      // input region
    tmp: &mut FrameBuffer,  // horizontal pass result (scratch)
    dst: &mut FrameBuffer,  // final blurred output
    radius: usize,
) -> Result<(), Error> {
    if src.width != dst.width || src.height != dst.height {
        return Err(Error::Surface("box_blur: size mismatch src↔dst".into()));
    }
    if tmp.width != src.width || tmp.height != src.height {
        return Err(Error::Surface("box_blur: size mismatch tmp".into()));
    }
    let (w, h) = (src.width, src.height);
    if w == 0 || h == 0 {
        return Ok(());
    }
    box_pass_rgb(&src.pixels, &mut tmp.pixels, w, h, 1, w, radius); // rows
    box_pass_rgb(&tmp.pixels, &mut dst.pixels, h, w, w, 1, radius); // columns
    Ok(())
}

fn box_pass_alpha(src: &[f32], dst: &mut [f32], len: usize, lines: usize, step: usize, line_step: usize, r: usize) {
    let win = (2 * r + 1) as f32;
    let last = len - 1;
    for line in 0..lines {
        let base = line * line_step;
        let at = |i: usize| src[base + i.min(last) * step];
        let mut sum = at(0) * (r as f32 + 1.0);
        for i in 1..=r {
            sum += at(i);
        }
        for i in 0..len {
            dst[base + i * step] = (sum / win).clamp(0.0, 1.0);
            sum += at(i + r + 1) - at(i.saturating_sub(r));
        }
    }
}

pub fn box_blur_alpha(src: &Mask, tmp: &mut Mask, dst: &mut Mask, radius: usize) -> Result<(), Error> {
    if src.width != dst.width || src.height != dst.height || tmp.width != src.width || tmp.height != src.height {
        return Err(Error::Surface("box_blur_alpha: mask size mismatch".into()));
    }
    let (w, h) = (src.width, src.height);
    if w == 0 || h == 0 {
        return Ok(());
    }
    box_pass_alpha(&src.alpha, &mut tmp.alpha, w, h, 1, w, radius);
    box_pass_alpha(&tmp.alpha, &mut dst.alpha, h, w, w, 1, radius);
    Ok(())
}

/* ------------------------------------ compositor ------------------------------------ */

/// Reusable scratch buffers so a steady frame does no allocation.
pub struct GlassCompositor {
    lut: GammaLut,
    backdrop: FrameBuffer,
    tmp: FrameBuffer,
    blurred: FrameBuffer,
    shadow: Mask,
    shadow_tmp: Mask,
    shadow_out: Mask,
}

impl Default for GlassCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl GlassCompositor {
    pub fn new() -> Self {
        Self {
            lut: GammaLut::new(),
            backdrop: FrameBuffer::new(0, 0),
            tmp: FrameBuffer::new(0, 0),
            blurred: FrameBuffer::new(0, 0),
            shadow: Mask::new(0, 0),
            shadow_tmp: Mask::new(0, 0),
            shadow_out: Mask::new(0, 0),
        }
    }

    /// Draw the panel over whatever `fb` already shows inside `container`.
    /// Nothing outside `container` is touched.
    pub fn composite(&mut self, fb: &mut FrameBuffer, container: Rect, p: &OverlayParams) -> Result<(), Error> {
        let Some(clip) = container.intersect(&Rect::new(0, 0, fb.width as u32, fb.height as u32)) else {
            return Ok(());
        };
        let panel = panel_rect(container, p);
        let radius = p.border_radius.max(0.0) as f32;
        let visible = panel.intersect(&clip);

        // 1) Backdrop: the pixels behind the panel plus a margin the blur can reach.
        //    Taken before the shadow so the panel never frosts its own shadow.
        let r = box_blur_radius(p.blur_strength);
        let region = visible.map(|v| {
            let margin = (3 * r) as i32;
            let grown = Rect::new(v.x - margin, v.y - margin, v.width + 2 * margin as u32, v.height + 2 * margin as u32);
            grown.intersect(&clip).unwrap_or(v)
        });
        if let Some(region) = region {
            self.copy_region(fb, region);
        }

        if p.is_shadow_enabled {
            self.draw_shadow(fb, panel, clip, radius)?;
        }

        let (Some(visible), Some(region)) = (visible, region) else {
            return Ok(());
        };

        // 2) Blur (three passes); result ends up in `blurred`.
        if r > 0 {
            box_blur_rgb(&self.backdrop, &mut self.tmp, &mut self.blurred, r)?;
            box_blur_rgb(&self.blurred, &mut self.tmp, &mut self.backdrop, r)?;
            box_blur_rgb(&self.backdrop, &mut self.tmp, &mut self.blurred, r)?;
        } else {
            self.blurred.pixels.copy_from_slice(&self.backdrop.pixels);
        }

        // 3) Tint + border + rounded coverage, written back into the frame.
        let (pw, ph) = (panel.width as f32, panel.height as f32);
        let opacity = p.opacity.clamp(0.0, 1.0) as f32;
        let border_opacity = p.border_opacity.clamp(0.0, 1.0) as f32;
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                let (lx, ly) = (x - panel.x, y - panel.y);
                let cov = rounded_rect_coverage(lx, ly, pw, ph, radius);
                if cov <= 0.0 {
                    continue;
                }
                let inner = rounded_rect_coverage(lx - 1, ly - 1, pw - 2.0, ph - 2.0, radius - 1.0);
                let ring = ((cov - inner) / cov).clamp(0.0, 1.0);

                let src = self.blurred.get((x - region.x) as usize, (y - region.y) as usize);
                let tinted = self.lut.mix(src, TINT, opacity);
                let bordered = self.lut.mix(tinted, TINT, border_opacity * ring);

                let idx = y as usize * fb.width + x as usize;
                fb.pixels[idx] = self.lut.mix(fb.pixels[idx], bordered, cov);
            }
        }

        // 4) Card label, only when the panel has room for it.
        let text_w = LABEL.len() as i32 * TEXT_ADVANCE;
        if (panel.width as i32) < text_w + 2 * LABEL_PADDING || (panel.height as i32) < TEXT_HEIGHT + 2 * LABEL_PADDING {
            return Ok(());
        }
        let tx = panel.x + (panel.width as i32 - text_w) / 2;
        let ty = panel.y + (panel.height as i32 - TEXT_HEIGHT) / 2;
        draw_text_5x7_clipped(fb, tx, ty, LABEL, LABEL_COLOR, visible);
        Ok(())
    }

    fn copy_region(&mut self, fb: &FrameBuffer, region: Rect) {
        let (w, h) = (region.width as usize, region.height as usize);
        self.backdrop.resize(w, h);
        self.tmp.resize(w, h);
        self.blurred.resize(w, h);
        for row in 0..h {
            let src_ofs = (region.y as usize + row) * fb.width + region.x as usize;
            self.backdrop.pixels[row * w..(row + 1) * w].copy_from_slice(&fb.pixels[src_ofs..src_ofs + w]);
        }
    }

    /// Soft shadow under `panel`, offset down, only where the panel isn't.
    fn draw_shadow(&mut self, fb: &mut FrameBuffer, panel: Rect, clip: Rect, radius: f32) -> Result<(), Error> {
        let r = box_blur_radius(SHADOW_BLUR / 2.0);
        let margin = (3 * r) as i32;
        let shadow_rect = Rect::new(panel.x, panel.y + SHADOW_OFFSET_Y, panel.width, panel.height);
        let region = Rect::new(
            shadow_rect.x - margin,
            shadow_rect.y - margin,
            shadow_rect.width + 2 * margin as u32,
            shadow_rect.height + 2 * margin as u32,
        );
        let Some(visible) = region.intersect(&clip) else {
            return Ok(());
        };

        // Hard-edged shape first, blurred afterwards.
        let (w, h) = (region.width as usize, region.height as usize);
        self.shadow.resize(w, h);
        self.shadow_tmp.resize(w, h);
        self.shadow_out.resize(w, h);
        let (sw, sh) = (shadow_rect.width as f32, shadow_rect.height as f32);
        for y in 0..h {
            for x in 0..w {
                self.shadow.alpha[y * w + x] = rounded_rect_coverage(x as i32 - margin, y as i32 - margin, sw, sh, radius);
            }
        }
        box_blur_alpha(&self.shadow, &mut self.shadow_tmp, &mut self.shadow_out, r)?;
        box_blur_alpha(&self.shadow_out, &mut self.shadow_tmp, &mut self.shadow, r)?;
        box_blur_alpha(&self.shadow, &mut self.shadow_tmp, &mut self.shadow_out, r)?;

        let (pw, ph) = (panel.width as f32, panel.height as f32);
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                let a = self.shadow_out.alpha[(y - region.y) as usize * w + (x - region.x) as usize];
                // Box shadows are clipped out of the panel's own box.
                let under_panel = rounded_rect_coverage(x - panel.x, y - panel.y, pw, ph, radius);
                let alpha = a * SHADOW_ALPHA * (1.0 - under_panel);
                if alpha <= 0.0 {
                    continue;
                }
                let idx = y as usize * fb.width + x as usize;
                fb.pixels[idx] = self.lut.mix(fb.pixels[idx], SHADOW_COLOR, alpha);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_OVERLAY;

    #[test]
    fn panel_is_centered_on_position() {
        let container = Rect::new(100, 50, 300, 600);
        let p = OverlayParams { width: 100.0, height: 40.0, position_x: 50.0, position_y: 25.0, ..DEFAULT_OVERLAY };
        assert_eq!(panel_rect(container, &p), Rect::new(200, 180, 100, 40));
    }

    #[test]
    fn panel_may_overflow_the_container() {
        let container = Rect::new(0, 0, 300, 600);
        let p = OverlayParams { width: 200.0, height: 100.0, position_x: 0.0, position_y: 100.0, ..DEFAULT_OVERLAY };
        assert_eq!(panel_rect(container, &p), Rect::new(-100, 550, 200, 100));
    }

    #[test]
    fn blur_radius_matches_sigma() {
        assert_eq!(box_blur_radius(0.0), 0);
        assert_eq!(box_blur_radius(10.0), 10);
        assert_eq!(box_blur_radius(-4.0), 0);
    }

    #[test]
    fn coverage_is_zero_in_rounded_corner() {
        // Corner pixel of a 40x40 rect with radius 20 lies outside the arc.
        assert_eq!(rounded_rect_coverage(0, 0, 40.0, 40.0, 20.0), 0.0);
        assert_eq!(rounded_rect_coverage(20, 20, 40.0, 40.0, 20.0), 1.0);
        // Square corners cover the corner pixel fully.
        assert_eq!(rounded_rect_coverage(0, 0, 40.0, 40.0, 0.0), 1.0);
    }

    #[test]
    fn box_blur_of_flat_image_is_flat() {
        let mut src = FrameBuffer::new(9, 5);
        src.fill(0x00336699);
        let mut tmp = FrameBuffer::new(9, 5);
        let mut dst = FrameBuffer::new(9, 5);
        box_blur_rgb(&src, &mut tmp, &mut dst, 3).unwrap();
        assert!(dst.pixels.iter().all(|&p| p == 0x00336699));
    }

    #[test]
    fn box_blur_rejects_mismatched_buffers() {
        let src = FrameBuffer::new(4, 4);
        let mut tmp = FrameBuffer::new(4, 4);
        let mut dst = FrameBuffer::new(3, 4);
        assert!(box_blur_rgb(&src, &mut tmp, &mut dst, 1).is_err());
    }

    #[test]
    fn fully_transparent_panel_without_blur_leaves_pixels() {
        let mut fb = FrameBuffer::new(40, 40);
        fb.fill(0x00808080);
        let p = OverlayParams {
            blur_strength: 0.0,
            opacity: 0.0,
            border_opacity: 0.0,
            width: 10.0,
            height: 10.0,
            border_radius: 0.0,
            position_x: 10.0,
            position_y: 10.0,
            is_shadow_enabled: false,
        };
        GlassCompositor::new().composite(&mut fb, Rect::new(0, 0, 40, 40), &p).unwrap();
        assert!(fb.pixels.iter().all(|&px| px == 0x00808080));
    }

    #[test]
    fn opaque_tint_paints_panel_white_and_nothing_else() {
        let mut fb = FrameBuffer::new(60, 60);
        let p = OverlayParams { width: 20.0, height: 20.0, border_radius: 0.0, opacity: 1.0, ..DEFAULT_OVERLAY };
        GlassCompositor::new().composite(&mut fb, Rect::new(0, 0, 60, 60), &p).unwrap();
        // Panel spans 20..40 and is too small for the label.
        assert_eq!(fb.get(21, 21), 0x00FF_FFFF);
        assert_eq!(fb.get(10, 10), 0x0000_0000);
    }

    #[test]
    fn shadow_darkens_below_but_not_above() {
        let mut fb = FrameBuffer::new(120, 160);
        fb.fill(0x00FF_FFFF);
        let p = OverlayParams {
            width: 40.0,
            height: 40.0,
            opacity: 1.0,
            is_shadow_enabled: true,
            ..DEFAULT_OVERLAY
        };
        GlassCompositor::new().composite(&mut fb, Rect::new(0, 0, 120, 160), &p).unwrap();
        // Panel spans y 60..100; just below it the offset shadow is strongest.
        let below = fb.get(60, 104);
        let above = fb.get(60, 56);
        assert_ne!(below, 0x00FF_FFFF);
        assert!((below & 0xFF) > ((below >> 16) & 0xFF), "shadow should be bluish");
        assert!(unpack_rgb(above).0 >= unpack_rgb(below).0);
    }
}
