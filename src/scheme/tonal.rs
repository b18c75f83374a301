use std::f64::consts::PI;
use rgb::RGB8;
use crate::color::{linear_of_xyz, rgb_of_linear, xyz_of_rgb, Lab, Lch, Xyz};
use crate::conditions::ViewingConditions;
use crate::error::{Error, Result};
use super::{ChannelPalette, ColorScheme, PaletteGenerator, SHADES};

/// Target CIELAB L* for each entry of [`SHADES`].
const LIGHTNESS: [f64; 13] =
    [100., 99., 95., 90., 80., 70., 60., 50., 40., 30., 20., 10., 0.];

/// A generator working in CIELCh under the reference white of the
/// viewing conditions.
///
/// Every channel is a lightness ramp at constant hue and chroma.
/// Colors outside the sRGB gamut lose chroma, never lightness or hue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TonalGenerator {
    pub accent1_chroma: f64,
    pub accent2_chroma: f64,
    pub accent3_chroma: f64,
    /// Hue rotation of the third accent, in radians.
    pub accent3_hue_shift: f64,
    pub neutral1_chroma: f64,
    pub neutral2_chroma: f64,
}

impl Default for TonalGenerator {
    fn default() -> Self {
        TonalGenerator {
            accent1_chroma: 48.,
            accent2_chroma: 16.,
            accent3_chroma: 32.,
            accent3_hue_shift: PI / 3.,
            neutral1_chroma: 4.,
            neutral2_chroma: 8.,
        }
    }
}

fn in_gamut(rgb: &[f64; 3]) -> bool {
    const TOL: f64 = 1e-7;
    rgb.iter().all(|&c| (-TOL ..= 1. + TOL).contains(&c))
}

/// The sRGB color of `lch`, reducing chroma until it fits the gamut.
fn fit(lch: Lch, white: Xyz) -> RGB8 {
    if lch.l >= 100. { return RGB8::new(255, 255, 255) }
    if lch.l <= 0. { return RGB8::new(0, 0, 0) }
    let linear = |c: f64| linear_of_xyz(Lch { c, ..lch }.to_lab().to_xyz(white));
    let rgb = linear(lch.c);
    if in_gamut(&rgb) { return rgb_of_linear(rgb) }
    let (mut lo, mut hi) = (0., lch.c);
    for _ in 0 .. 32 {
        let mid = 0.5 * (lo + hi);
        if in_gamut(&linear(mid)) { lo = mid } else { hi = mid }
    }
    rgb_of_linear(linear(lo))
}

fn ramp(h: f64, c: f64, white: Xyz) -> ChannelPalette {
    SHADES.iter().zip(LIGHTNESS)
        .map(|(&shade, l)| (shade, fit(Lch { l, c, h }, white)))
        .collect()
}

impl PaletteGenerator for TonalGenerator {
    fn generate(&self, seed: RGB8, chroma_factor: f64,
                conditions: &ViewingConditions,
                seed_is_source_of_truth: bool) -> Result<ColorScheme> {
        if !chroma_factor.is_finite() || chroma_factor < 0. {
            return Err(Error::Generation(
                format!("chroma factor {chroma_factor} is not a finite \
                         non-negative number")))
        }
        let white = conditions.reference_white().normalized();
        if ![white.x, white.y, white.z].iter().all(|v| v.is_finite() && *v > 0.) {
            return Err(Error::Generation(
                format!("degenerate reference white {white:?}")))
        }
        let seed = Lab::from_xyz(xyz_of_rgb(seed), white).to_lch();
        let h = seed.h;
        let accent1 = if seed_is_source_of_truth { seed.c }
                      else { self.accent1_chroma };
        let k = chroma_factor;
        Ok(ColorScheme {
            accent1: ramp(h, k * accent1, white),
            accent2: ramp(h, k * self.accent2_chroma, white),
            accent3: ramp(seed.rotate(self.accent3_hue_shift).h,
                          k * self.accent3_chroma, white),
            neutral1: ramp(h, k * self.neutral1_chroma, white),
            neutral2: ramp(h, k * self.neutral2_chroma, white),
        })
    }
}
