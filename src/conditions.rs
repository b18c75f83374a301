//! Viewing conditions for the color appearance model.

use crate::color::{Lab, Xyz, D65};

/// Standard SDR reference white, in cd/m².
pub const DEFAULT_SDR_WHITE_LUMINANCE: f64 = 200.;

/// Smallest white luminance accepted; lower values are clamped up.
pub const MIN_WHITE_LUMINANCE: f64 = 1.;

/// Surround classification of the viewing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surround {
    Dark,
    Dim,
    Average,
}

/// Parameters of a color appearance model, derived from a single
/// white luminance.  Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewingConditions {
    surround: Surround,
    adapting_luminance: f64,
    background_luminance: f64,
    reference_white: Xyz,
}

impl ViewingConditions {
    /// Conditions for a display whose white is `luminance` cd/m².
    ///
    /// The background is the model's canonical mid-gray (L* = 50)
    /// whatever the seed, and the surround is always average.
    /// Non-finite luminances use [`DEFAULT_SDR_WHITE_LUMINANCE`] and
    /// values below [`MIN_WHITE_LUMINANCE`] are clamped up to it.
    pub fn new(luminance: f64) -> Self {
        let luminance = sanitize_luminance(luminance);
        let mid_gray = Lab { l: 50., a: 0., b: 0. }.to_xyz(D65).y;
        ViewingConditions {
            surround: Surround::Average,
            adapting_luminance: 0.4 * luminance,
            background_luminance: mid_gray * luminance,
            reference_white: D65.scale(luminance),
        }
    }

    pub fn surround(&self) -> Surround { self.surround }

    /// L_a, in cd/m².
    pub fn adapting_luminance(&self) -> f64 { self.adapting_luminance }

    /// Y_b, in cd/m².
    pub fn background_luminance(&self) -> f64 { self.background_luminance }

    /// Absolute tristimulus values of the reference white.
    pub fn reference_white(&self) -> Xyz { self.reference_white }
}

impl Default for ViewingConditions {
    fn default() -> Self { Self::new(DEFAULT_SDR_WHITE_LUMINANCE) }
}

fn sanitize_luminance(luminance: f64) -> f64 {
    if !luminance.is_finite() {
        tracing::warn!(luminance, "non-finite white luminance, using default");
        DEFAULT_SDR_WHITE_LUMINANCE
    } else if luminance < MIN_WHITE_LUMINANCE {
        tracing::warn!(luminance, min = MIN_WHITE_LUMINANCE,
                       "white luminance too low, clamping");
        MIN_WHITE_LUMINANCE
    } else {
        luminance
    }
}
