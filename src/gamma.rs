// Gamma-correct blending via lookup tables instead of powf per pixel.
// Visual: tint, border and shadow mix in linear light, so a 30% white glass
// over black stripes doesn't look muddy at the stripe edges.

use crate::types::{pack_rgb, unpack_rgb};

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    linear_to_srgb: [u8; 4096],
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaLut {
    /// Build both tables once per compositor.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Source-over of `src` onto `dst` with coverage `alpha`, in linear light.
    /// Both pixels are 0x00RRGGBB.
    #[inline]
    pub fn mix(&self, dst: u32, src: u32, alpha: f32) -> u32 {
        if alpha <= 0.0 {
            return dst;
        }
        if alpha >= 1.0 {
            return src;
        }
        let (dr, dg, db) = unpack_rgb(dst);
        let (sr, sg, sb) = unpack_rgb(src);
        let inv = 1.0 - alpha;
        let ch = |d: u8, s: u8| {
            let l = alpha * self.srgb_u8_to_linear(s) + inv * self.srgb_u8_to_linear(d);
            self.linear_to_srgb_u8(l)
        };
        pack_rgb(ch(dr, sr), ch(dg, sg), ch(db, sb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_round_trip_every_byte() {
        let lut = GammaLut::new();
        for v in 0..=255u8 {
            assert_eq!(lut.linear_to_srgb_u8(lut.srgb_u8_to_linear(v)), v);
        }
    }

    #[test]
    fn mix_endpoints_are_exact() {
        let lut = GammaLut::new();
        assert_eq!(lut.mix(0x000000, 0xFFFFFF, 0.0), 0x000000);
        assert_eq!(lut.mix(0x000000, 0xFFFFFF, 1.0), 0xFFFFFF);
    }

    #[test]
    fn half_mix_is_brighter_than_srgb_average() {
        let lut = GammaLut::new();
        let (r, _, _) = unpack_rgb(lut.mix(0x000000, 0xFFFFFF, 0.5));
        // Linear-light 50% lands near sRGB 188, not 128.
        assert!(r > 180 && r < 195, "got {r}");
    }
}
