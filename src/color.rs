//! sRGB encoding and the small amount of CIE colorimetry the pipeline
//! needs: XYZ, CIELAB and its polar form L*C*h.

use std::f64::consts::PI;
use rgb::RGB8;

const TWO_PI: f64 = 2. * PI;
const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;

/// Encode `c` as a 32-bit ARGB integer with a fully opaque alpha.
#[inline]
pub fn to_argb(c: RGB8) -> u32 {
    0xff00_0000 | (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
}

/// Decode the RGB part of an ARGB integer.  Alpha is ignored.
#[inline]
pub fn from_argb(argb: u32) -> RGB8 {
    RGB8 { r: (argb >> 16) as u8, g: (argb >> 8) as u8, b: argb as u8 }
}

/// Decode a signed color integer as stored by the platform settings.
#[inline]
pub fn from_color_int(color: i32) -> RGB8 { from_argb(color as u32) }

/// CIE 1931 tristimulus values.  Relative values have `y == 1` for
/// the reference white; absolute values are in cd/m².
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Scale relative tristimulus values to absolute ones.
    #[inline]
    pub fn scale(self, k: f64) -> Xyz {
        Xyz { x: k * self.x, y: k * self.y, z: k * self.z }
    }

    /// The same chromaticity with `y == 1`.
    #[inline]
    pub fn normalized(self) -> Xyz { self.scale(1. / self.y) }
}

/// CIE standard illuminant D65, relative (`y == 1`).
pub const D65: Xyz = Xyz { x: 0.95047, y: 1., z: 1.08883 };

/// CIELAB coordinates relative to some white point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Lab {
    pub(crate) l: f64,
    pub(crate) a: f64,
    pub(crate) b: f64,
}

/// Polar CIELAB.  `h` is in radians, in \[0, 2π).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Lch {
    pub(crate) l: f64,
    pub(crate) c: f64,
    pub(crate) h: f64,
}

#[inline]
fn decode(u: u8) -> f64 {
    let c = u as f64 / 255.;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[inline]
fn encode(c: f64) -> f64 {
    if c <= 0.0031308 { 12.92 * c } else { 1.055 * c.powf(1. / 2.4) - 0.055 }
}

#[inline]
fn quantize(c: f64) -> u8 { (255. * encode(c.clamp(0., 1.))).round() as u8 }

/// Linear sRGB components of `c`, in \[0, 1\].
pub(crate) fn linear(c: RGB8) -> [f64; 3] {
    [decode(c.r), decode(c.g), decode(c.b)]
}

/// Relative XYZ (D65) of an sRGB color.
pub(crate) fn xyz_of_rgb(c: RGB8) -> Xyz {
    let [r, g, b] = linear(c);
    Xyz {
        x: 0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
        y: 0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
        z: 0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
    }
}

/// Linear sRGB of relative XYZ (D65), possibly out of \[0, 1\].
pub(crate) fn linear_of_xyz(c: Xyz) -> [f64; 3] {
    [3.2404542 * c.x - 1.5371385 * c.y - 0.4985314 * c.z,
     -0.9692660 * c.x + 1.8760108 * c.y + 0.0415560 * c.z,
     0.0556434 * c.x - 0.2040259 * c.y + 1.0572252 * c.z]
}

pub(crate) fn rgb_of_linear([r, g, b]: [f64; 3]) -> RGB8 {
    RGB8 { r: quantize(r), g: quantize(g), b: quantize(b) }
}

impl Lab {
    pub(crate) fn from_xyz(c: Xyz, white: Xyz) -> Lab {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let f = |t: f64| if t > EPS { t.powf(C0) } else { C1 * t + C2 };
        let fx = f(c.x / white.x);
        let fy = f(c.y / white.y);
        let fz = f(c.z / white.z);
        Lab { l: 116. * fy - 16., a: 500. * (fx - fy), b: 200. * (fy - fz) }
    }

    pub(crate) fn to_xyz(self, white: Xyz) -> Xyz {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let finv = |f: f64| if f > EPS0 { f * f * f } else { C0 * (f - C1) };
        let fy = (self.l + 16.) / 116.;
        let fx = self.a / 500. + fy;
        let fz = fy - self.b / 200.;
        Xyz { x: white.x * finv(fx), y: white.y * finv(fy),
              z: white.z * finv(fz) }
    }

    pub(crate) fn to_lch(self) -> Lch {
        let h = { let h = self.b.atan2(self.a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l: self.l, c: self.a.hypot(self.b), h }
    }
}

impl Lch {
    pub(crate) fn to_lab(self) -> Lab {
        Lab { l: self.l, a: self.c * self.h.cos(), b: self.c * self.h.sin() }
    }

    /// Rotate the hue by `dh` radians.
    pub(crate) fn rotate(self, dh: f64) -> Lch {
        Lch { h: (self.h + dh).rem_euclid(TWO_PI), ..self }
    }
}

/// CIELAB L* of an sRGB color under D65, in \[0, 100\].
pub fn lab_lightness(c: RGB8) -> f64 {
    Lab::from_xyz(xyz_of_rgb(c), D65).l
}
