// Background pattern renderer.
//
// The offscreen surface is `W x (H + 2f)` so a shift of up to one full
// repeating band never exposes an uncovered edge. Scrolling never redraws:
// the offset is applied at blit time, wrapped modulo `2f`.
// Visual: black/white bands or squares filling the phone screen, sliding up.

use image::{Rgb, RgbImage};

use crate::store::PatternKind;
use crate::types::{FrameBuffer, Rect, ViewportSize, pack_rgb};

/// First pattern color (row 0 of every algorithm).
pub const COLOR_A: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
/// Second pattern color.
pub const COLOR_B: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Largest period that is still rasterized; anything above is skipped like a zero size.
pub const MAX_FREQUENCY: f64 = 4096.0;

/// Index of the `f`-sized band that pixel coordinate `v` falls in.
#[inline]
fn band(v: u32, f: f64) -> u64 {
    (v as f64 / f).floor() as u64
}

#[inline]
fn lerp_rgb(a: Rgb<u8>, b: Rgb<u8>, w: f64) -> Rgb<u8> {
    let mix = |ca: u8, cb: u8| {
        let v = ca as f64 + (cb as f64 - ca as f64) * w;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

/// Horizontal bands of height `f`, A first.
fn stripe_row(y: u32, f: f64) -> Rgb<u8> {
    if band(y, f) % 2 == 0 { COLOR_A } else { COLOR_B }
}

/// A at the band top, B at mid-height, back to A at the band's bottom edge.
fn sine_row(y: u32, f: f64) -> Rgb<u8> {
    let top = band(y, f) as f64 * f;
    let t = (y as f64 - top) / f;
    let weight = 1.0 - (2.0 * t - 1.0).abs();
    lerp_rgb(COLOR_A, COLOR_B, weight.clamp(0.0, 1.0))
}

fn checker_cell(x: u32, y: u32, f: f64) -> Rgb<u8> {
    if (band(x, f) + band(y, f)) % 2 == 0 { COLOR_A } else { COLOR_B }
}

/// Height of the surface for a container of height `h`.
pub fn surface_height(h: u32, f: f64) -> u32 {
    // `as` saturates for huge f; the add must too.
    h.saturating_add((2.0 * f).ceil() as u32)
}

/// Rasterize one pattern for a container of `viewport` size.
///
/// `None` when there is nothing to draw into (zero-size container or a
/// period that is non-positive or above `MAX_FREQUENCY`). Identical inputs always give identical pixels.
pub fn render_pattern(kind: PatternKind, f: f64, viewport: ViewportSize) -> Option<RgbImage> {
    if viewport.is_empty() || !f.is_finite() || f <= 0.0 || f > MAX_FREQUENCY {
        return None;
    }
    let width = viewport.width;
    let height = surface_height(viewport.height, f);
    let mut surface = RgbImage::new(width, height);

    match kind {
        PatternKind::Stripe | PatternKind::Sine => {
            // Row color is independent of x: compute once per row.
            for y in 0..height {
                let color = if kind == PatternKind::Stripe { stripe_row(y, f) } else { sine_row(y, f) };
                for x in 0..width {
                    surface.put_pixel(x, y, color);
                }
            }
        }
        PatternKind::Checkerboard => {
            for (x, y, px) in surface.enumerate_pixels_mut() {
                *px = checker_cell(x, y, f);
            }
        }
    }
    Some(surface)
}

/// Visual translation (pixels, negative = up) for a raw scroll offset.
///
/// Always in `(-2f, 0]`, whatever the sign or size of `offset`.
pub fn scroll_shift(offset: f64, f: f64) -> f64 {
    let period = 2.0 * f;
    if !period.is_finite() || period <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let mut wrapped = offset.rem_euclid(period);
    // rem_euclid may round up to exactly `period` for tiny negatives.
    if wrapped >= period {
        wrapped = 0.0;
    }
    -wrapped
}

struct Surface {
    image: RgbImage,
    frequency: f64,
}

/// Owns the offscreen pattern surface and decides when to redraw it.
#[derive(Default)]
pub struct PatternRenderer {
    inputs: Option<(PatternKind, f64)>,
    viewport: ViewportSize,
    surface: Option<Surface>,
    redraws: u64,
}

impl PatternRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// New pattern kind or frequency. Returns true when the surface was redrawn.
    pub fn set_pattern(&mut self, kind: PatternKind, frequency: f64) -> bool {
        if self.inputs == Some((kind, frequency)) {
            return false;
        }
        self.inputs = Some((kind, frequency));
        self.redraw()
    }

    /// New container size. Returns true when the surface was redrawn.
    pub fn set_viewport(&mut self, size: ViewportSize) -> bool {
        if size == self.viewport {
            return false;
        }
        self.viewport = size;
        self.redraw()
    }

    fn redraw(&mut self) -> bool {
        let Some((kind, frequency)) = self.inputs else {
            return false;
        };
        // Zero-size container: keep whatever we had until a real size shows up.
        let Some(image) = render_pattern(kind, frequency, self.viewport) else {
            return false;
        };
        self.redraws += 1;
        log::debug!(
            "pattern redraw #{}: {} f={} surface {}x{}",
            self.redraws,
            kind.label(),
            frequency,
            image.width(),
            image.height()
        );
        self.surface = Some(Surface { image, frequency });
        true
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn surface(&self) -> Option<&RgbImage> {
        self.surface.as_ref().map(|s| &s.image)
    }

    /// Shift that `blit` applies for `offset` with the current surface.
    pub fn shift_for(&self, offset: f64) -> f64 {
        match &self.surface {
            Some(s) => scroll_shift(offset, s.frequency),
            None => 0.0,
        }
    }

    /// Copy the surface into `fb` at `container`, translated by the wrapped offset.
    /// Visual: the pattern appears in the phone screen, moved up by the shift.
    pub fn blit(&self, fb: &mut FrameBuffer, container: Rect, offset: f64) {
        let Some(surface) = &self.surface else {
            return;
        };
        let image = &surface.image;
        let rows_skipped = (-scroll_shift(offset, surface.frequency)).floor() as u32;

        let Some(visible) = container.intersect(&Rect::new(0, 0, fb.width as u32, fb.height as u32)) else {
            return;
        };
        let cols = (visible.width).min(image.width().saturating_sub((visible.x - container.x) as u32));

        for dy in visible.y..visible.bottom() {
            let src_y = (dy - container.y) as u32 + rows_skipped;
            if src_y >= image.height() {
                continue;
            }
            let row_ofs = dy as usize * fb.width;
            for i in 0..cols {
                let dx = visible.x + i as i32;
                let src_x = (dx - container.x) as u32;
                let p = image.get_pixel(src_x, src_y);
                fb.pixels[row_ofs + dx as usize] = pack_rgb(p[0], p[1], p[2]);
            }
        }
    }
}
