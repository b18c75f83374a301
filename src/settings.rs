//! User-adjustable theming settings.
//!
//! Settings are read fresh for every derivation; nothing is cached, so
//! a change takes effect on the next color event.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use serde::Deserialize;
use crate::conditions::DEFAULT_SDR_WHITE_LUMINANCE;
use crate::seed::OVERRIDE_UNSET;

/// White luminance of the display, in cd/m².
pub const KEY_WHITE_LUMINANCE: &str = "monet_engine_white_luminance_user";
/// Saturation multiplier of the generated palette.
pub const KEY_CHROMA_FACTOR: &str = "monet_engine_chroma_factor";
/// Non-zero when the user override color is enabled.
pub const KEY_CUSTOM_COLOR: &str = "monet_engine_custom_color";
/// The user override color, as a signed ARGB integer.
pub const KEY_COLOR_OVERRIDE: &str = "monet_engine_color_override";

/// Typed, point-in-time reads from a key/value settings store.
/// `None` means the key is absent or its value is unusable.
pub trait SecureSettings {
    fn get_long(&self, key: &str) -> Option<i64>;
    fn get_int(&self, key: &str) -> Option<i32>;
    fn get_float(&self, key: &str) -> Option<f32>;
}

fn parse<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str)
                               -> Option<T> {
    let raw = map.get(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "malformed setting, using default");
            None
        }
    }
}

impl SecureSettings for HashMap<String, String> {
    fn get_long(&self, key: &str) -> Option<i64> { parse(self, key) }
    fn get_int(&self, key: &str) -> Option<i32> { parse(self, key) }
    fn get_float(&self, key: &str) -> Option<f32> { parse(self, key) }
}

/// A snapshot of every setting a derivation reads.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Display white luminance, in cd/m².
    pub white_luminance: i64,
    /// Multiplier on the chroma of every channel.  1.0 leaves the
    /// palette as designed; 0.0 makes it gray.
    pub chroma_factor: f32,
    /// Non-zero enables `color_override`.
    pub custom_color: i32,
    /// ARGB override color, [`OVERRIDE_UNSET`] when never chosen.
    pub color_override: i32,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        ThemeSettings {
            white_luminance: DEFAULT_SDR_WHITE_LUMINANCE as i64,
            chroma_factor: 1.,
            custom_color: 0,
            color_override: OVERRIDE_UNSET,
        }
    }
}

impl ThemeSettings {
    /// Read all keys from `store`, substituting defaults for missing
    /// ones.
    pub fn read<S: SecureSettings + ?Sized>(store: &S) -> Self {
        let d = ThemeSettings::default();
        ThemeSettings {
            white_luminance: store.get_long(KEY_WHITE_LUMINANCE)
                .unwrap_or(d.white_luminance),
            chroma_factor: store.get_float(KEY_CHROMA_FACTOR)
                .unwrap_or(d.chroma_factor),
            custom_color: store.get_int(KEY_CUSTOM_COLOR)
                .unwrap_or(d.custom_color),
            color_override: store.get_int(KEY_COLOR_OVERRIDE)
                .unwrap_or(d.color_override),
        }
    }

    pub fn luminance(&self) -> f64 { self.white_luminance as f64 }

    /// The chroma factor to hand to the generator.  NaN and infinities
    /// mean 1.0; negative values clamp to 0.0.
    pub fn chroma(&self) -> f64 {
        let f = self.chroma_factor as f64;
        if !f.is_finite() {
            tracing::warn!(chroma_factor = f, "non-finite chroma factor, using 1.0");
            1.
        } else if f < 0. {
            tracing::warn!(chroma_factor = f, "negative chroma factor, clamping to 0");
            0.
        } else {
            f
        }
    }

    #[inline]
    pub fn override_enabled(&self) -> bool { self.custom_color != 0 }
}

/// Something that can report the current settings.
pub trait SettingsSource {
    fn theme_settings(&self) -> ThemeSettings;
}

impl SettingsSource for ThemeSettings {
    fn theme_settings(&self) -> ThemeSettings { *self }
}

impl SettingsSource for RefCell<ThemeSettings> {
    fn theme_settings(&self) -> ThemeSettings { *self.borrow() }
}

impl SettingsSource for HashMap<String, String> {
    fn theme_settings(&self) -> ThemeSettings { ThemeSettings::read(self) }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Rc<T> {
    fn theme_settings(&self) -> ThemeSettings { (**self).theme_settings() }
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn theme_settings(&self) -> ThemeSettings { (**self).theme_settings() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(kv: &[(&str, &str)]) -> HashMap<String, String> {
        kv.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_store_gives_defaults() {
        let s = ThemeSettings::read(&store(&[]));
        assert_eq!(s, ThemeSettings::default());
        assert_eq!(s.white_luminance, 200);
        assert!(!s.override_enabled());
    }

    #[test]
    fn reads_every_key() {
        let s = store(&[(KEY_WHITE_LUMINANCE, "300"),
                        (KEY_CHROMA_FACTOR, "0.5"),
                        (KEY_CUSTOM_COLOR, "1"),
                        (KEY_COLOR_OVERRIDE, "-15654349")]).theme_settings();
        assert_eq!(s.white_luminance, 300);
        assert_eq!(s.chroma(), 0.5);
        assert!(s.override_enabled());
        assert_eq!(s.color_override as u32, 0xff11_2233);
    }

    #[test]
    fn malformed_values_are_absent() {
        let s = ThemeSettings::read(&store(&[(KEY_WHITE_LUMINANCE, "bright"),
                                             (KEY_CHROMA_FACTOR, "")]));
        assert_eq!(s, ThemeSettings::default());
    }

    #[test]
    fn chroma_policy() {
        let mut s = ThemeSettings::default();
        s.chroma_factor = -2.;
        assert_eq!(s.chroma(), 0.);
        s.chroma_factor = f32::NAN;
        assert_eq!(s.chroma(), 1.);
        s.chroma_factor = f32::INFINITY;
        assert_eq!(s.chroma(), 1.);
        s.chroma_factor = f32::NEG_INFINITY;
        assert_eq!(s.chroma(), 1.);
    }

    #[test]
    fn infinite_chroma_setting_reads_as_default() {
        let s = ThemeSettings::read(&store(&[(KEY_CHROMA_FACTOR, "inf")]));
        assert_eq!(s.chroma(), 1.);
    }

    #[test]
    fn deserializes_partial_config() {
        let s: ThemeSettings =
            serde_json::from_str(r#"{ "chroma_factor": 2.0 }"#).unwrap();
        assert_eq!(s.chroma_factor, 2.);
        assert_eq!(s.white_luminance, 200);
        assert_eq!(s.color_override, OVERRIDE_UNSET);
    }
}
