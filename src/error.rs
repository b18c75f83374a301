//! Error types for palette derivation.

use thiserror::Error;

/// Errors surfaced by a derivation.
///
/// Invalid workspace geometry is never an error: it degrades to "no
/// region" inside [`crate::RegionSubscriber`].
#[derive(Debug, Error)]
pub enum Error {
    /// The palette generator could not produce a scheme.
    #[error("palette generation failed: {0}")]
    Generation(String),

    /// A generated channel is missing a shade the scheme requires.
    #[error("channel {channel} has no color for shade {shade}")]
    MissingShade {
        channel: &'static str,
        shade: u16,
    },

    /// Two slot tables install into the same slot.
    #[error("slot {0:#010x} is used by more than one shade")]
    DuplicateSlot(u32),
}

/// Result type for palette operations.
pub type Result<T> = std::result::Result<T, Error>;
