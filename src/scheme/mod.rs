//! Color schemes: five channels of shades generated from one seed.

use std::collections::BTreeMap;
use rgb::RGB8;
use crate::conditions::ViewingConditions;
use crate::error::{Error, Result};

mod tonal;
pub use tonal::TonalGenerator;

/// The shades every channel provides, from the lightest (0, white) to
/// the darkest (1000, black).
pub const SHADES: [u16; 13] =
    [0, 10, 50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];

/// One of the five color roles of a scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Accent1,
    Accent2,
    Accent3,
    Neutral1,
    Neutral2,
}

impl Channel {
    pub const ALL: [Channel; 5] = [Channel::Accent1, Channel::Accent2,
                                   Channel::Accent3, Channel::Neutral1,
                                   Channel::Neutral2];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Accent1 => "accent1",
            Channel::Accent2 => "accent2",
            Channel::Accent3 => "accent3",
            Channel::Neutral1 => "neutral1",
            Channel::Neutral2 => "neutral2",
        }
    }
}

/// Shade → color for one channel.
pub type ChannelPalette = BTreeMap<u16, RGB8>;

/// The five channels produced by one generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorScheme {
    pub accent1: ChannelPalette,
    pub accent2: ChannelPalette,
    pub accent3: ChannelPalette,
    pub neutral1: ChannelPalette,
    pub neutral2: ChannelPalette,
}

impl ColorScheme {
    pub fn channel(&self, ch: Channel) -> &ChannelPalette {
        match ch {
            Channel::Accent1 => &self.accent1,
            Channel::Accent2 => &self.accent2,
            Channel::Accent3 => &self.accent3,
            Channel::Neutral1 => &self.neutral1,
            Channel::Neutral2 => &self.neutral2,
        }
    }

    /// Iterate over the channels in [`Channel::ALL`] order.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, &ChannelPalette)> {
        Channel::ALL.into_iter().map(move |ch| (ch, self.channel(ch)))
    }

    /// Check that every channel covers all of [`SHADES`].
    pub fn validate(&self) -> Result<()> {
        for (ch, palette) in self.channels() {
            if let Some(&shade) = SHADES.iter().find(|s| !palette.contains_key(s)) {
                return Err(Error::MissingShade { channel: ch.name(), shade })
            }
        }
        Ok(())
    }
}

/// Produces a [`ColorScheme`] from a seed.
///
/// Conforming generators map shade 0 to white and 1000 to black with
/// lightness decreasing in between, keep the accents on the seed's
/// hue family, and give the neutral channels a small fraction of the
/// accent chroma.  `chroma_factor` scales saturation only.
pub trait PaletteGenerator {
    fn generate(&self, seed: RGB8, chroma_factor: f64,
                conditions: &ViewingConditions,
                seed_is_source_of_truth: bool) -> Result<ColorScheme>;
}

impl<F> PaletteGenerator for F
where F: Fn(RGB8, f64, &ViewingConditions, bool) -> Result<ColorScheme> {
    fn generate(&self, seed: RGB8, chroma_factor: f64,
                conditions: &ViewingConditions,
                seed_is_source_of_truth: bool) -> Result<ColorScheme> {
        self(seed, chroma_factor, conditions, seed_is_source_of_truth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(c: RGB8) -> ChannelPalette {
        SHADES.iter().map(|&s| (s, c)).collect()
    }

    #[test]
    fn validate_reports_first_gap() {
        let gray = flat(RGB8::new(128, 128, 128));
        let mut scheme = ColorScheme {
            accent1: gray.clone(), accent2: gray.clone(),
            accent3: gray.clone(), neutral1: gray.clone(), neutral2: gray,
        };
        assert!(scheme.validate().is_ok());
        scheme.neutral1.remove(&400);
        match scheme.validate() {
            Err(Error::MissingShade { channel, shade }) => {
                assert_eq!(channel, "neutral1");
                assert_eq!(shade, 400);
            }
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn closures_are_generators() {
        let g = |seed: RGB8, _: f64, _: &ViewingConditions, _: bool| {
            let p = flat(seed);
            Ok::<_, Error>(ColorScheme { accent1: p.clone(),
                                         accent2: p.clone(),
                                         accent3: p.clone(),
                                         neutral1: p.clone(), neutral2: p })
        };
        let s = g.generate(RGB8::new(1, 2, 3), 1.,
                           &ViewingConditions::default(), false).unwrap();
        assert_eq!(s.accent3[&500], RGB8::new(1, 2, 3));
    }
}
