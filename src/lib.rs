//! Theme palettes derived from wallpaper colors.
//!
//! A seed color (sampled from the wallpaper, or chosen by the user)
//! is turned into five channels of 13 shades each by a
//! [`PaletteGenerator`], then installed into fixed slots
//! ([`SlotTables`]) as a [`PaletteOverride`].  [`ThemedColorExtractor`]
//! runs this pipeline on demand and whenever the wallpaper region
//! behind the home screen ([`RegionSubscriber`]) changes color.
//!
//! # Example
//!
//! ```
//! use rgb::RGB8;
//! use wallpaper_tones::{ColorEventSource, RectF, ThemeSettings,
//!                       ThemedColorExtractor, TonalGenerator,
//!                       WallpaperColors};
//!
//! struct NoEvents;
//! impl ColorEventSource for NoEvents {
//!     fn add_colors_listener(&mut self, _: &[RectF]) {}
//!     fn remove_colors_listener(&mut self) {}
//! }
//!
//! let ex = ThemedColorExtractor::new(ThemeSettings::default(),
//!                                    TonalGenerator::default(), NoEvents);
//! let wallpaper = WallpaperColors::new(RGB8::new(0x3f, 0x51, 0xb5));
//! let palette = ex.generate_colors_override(&wallpaper)?;
//! assert_eq!(palette.len(), 65);
//! # Ok::<(), wallpaper_tones::Error>(())
//! ```

mod color;
mod conditions;
mod error;
mod extractor;
mod region;
mod scheme;
mod seed;
mod settings;
mod slots;

pub use color::{from_argb, from_color_int, lab_lightness, to_argb, Xyz, D65};
pub use conditions::{Surround, ViewingConditions, DEFAULT_SDR_WHITE_LUMINANCE,
                     MIN_WHITE_LUMINANCE};
pub use error::{Error, Result};
pub use extractor::{ColorsChangedListener, ResourceOverrides,
                    ThemedColorExtractor};
pub use region::{normalized_region, ColorEventSource, Rect, RectF,
                 RegionSubscriber, WorkspaceGeometry};
pub use scheme::{Channel, ChannelPalette, ColorScheme, PaletteGenerator,
                 TonalGenerator, SHADES};
pub use seed::{resolve_seed, Provenance, SeedColor, WallpaperColors, NO_COLOR,
               OVERRIDE_UNSET};
pub use settings::{SecureSettings, SettingsSource, ThemeSettings,
                   KEY_CHROMA_FACTOR, KEY_COLOR_OVERRIDE, KEY_CUSTOM_COLOR,
                   KEY_WHITE_LUMINANCE};
pub use slots::{map_to_slots, PaletteOverride, SlotId, SlotTable, SlotTables};
