//! Choosing the seed color: sampled from the wallpaper, or a user
//! override.

use rgb::RGB8;
use crate::color::from_color_int;

/// Value of the override color setting when it was never set.
pub const OVERRIDE_UNSET: i32 = -1;

/// The "no color" value.
pub const NO_COLOR: i32 = 0;

/// Colors extracted from the wallpaper by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallpaperColors {
    pub primary: RGB8,
}

impl WallpaperColors {
    pub fn new(primary: RGB8) -> Self {
        WallpaperColors { primary }
    }

    /// The most representative color of the wallpaper.
    #[inline]
    pub fn primary_color(&self) -> RGB8 { self.primary }
}

/// Where a seed color came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    Sampled,
    UserOverride,
}

/// The color a palette is generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedColor {
    pub color: RGB8,
    pub provenance: Provenance,
}

/// Pick the effective seed.
///
/// The override wins only if `enabled` and `override_color` is
/// neither [`OVERRIDE_UNSET`] nor [`NO_COLOR`].  There is no blending.
pub fn resolve_seed(sampled: RGB8, override_color: i32, enabled: bool)
                    -> SeedColor {
    if enabled && override_color != OVERRIDE_UNSET && override_color != NO_COLOR {
        SeedColor { color: from_color_int(override_color),
                    provenance: Provenance::UserOverride }
    } else {
        SeedColor { color: sampled, provenance: Provenance::Sampled }
    }
}
