//! Where generated colors are installed: static (channel, shade) →
//! slot tables and the resulting slot → color override.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use lazy_static::lazy_static;
use crate::color::to_argb;
use crate::error::{Error, Result};
use crate::scheme::{Channel, ColorScheme, SHADES};

/// Opaque identifier of an installable color (a platform color
/// resource id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Shade → slot for one channel.  Shades without a slot are not
/// installed.
pub type SlotTable = BTreeMap<u16, SlotId>;

/// Id of `system_neutral1_0`; the 65 system colors follow it
/// contiguously.
const SYSTEM_COLOR_BASE: u32 = 0x0106_001d;

/// Channel order of the system color ids.
const SYSTEM_ORDER: [Channel; 5] = [Channel::Neutral1, Channel::Neutral2,
                                    Channel::Accent1, Channel::Accent2,
                                    Channel::Accent3];

/// One slot table per channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotTables {
    tables: BTreeMap<Channel, SlotTable>,
}

lazy_static! {
    static ref SYSTEM_SLOTS: SlotTables = {
        let mut tables = BTreeMap::new();
        for (i, ch) in SYSTEM_ORDER.iter().enumerate() {
            let first = SYSTEM_COLOR_BASE + (i * SHADES.len()) as u32;
            let table: SlotTable = SHADES.iter().enumerate()
                .map(|(j, &s)| (s, SlotId(first + j as u32)))
                .collect();
            tables.insert(*ch, table);
        }
        SlotTables { tables }
    };
}

impl SlotTables {
    /// The platform's `system_{accent,neutral}N_SHADE` colors.
    pub fn system() -> &'static SlotTables { &SYSTEM_SLOTS }

    /// Build tables from `(channel, table)` pairs.  Channels not
    /// listed get an empty table.  Fails if a slot appears twice.
    pub fn new(tables: impl IntoIterator<Item = (Channel, SlotTable)>)
               -> Result<Self> {
        let tables: BTreeMap<_, _> = tables.into_iter().collect();
        let mut seen = HashSet::new();
        for slot in tables.values().flat_map(|t| t.values()) {
            if !seen.insert(*slot) {
                return Err(Error::DuplicateSlot(slot.0))
            }
        }
        Ok(SlotTables { tables })
    }

    pub fn table(&self, ch: Channel) -> Option<&SlotTable> {
        self.tables.get(&ch)
    }

    pub fn slot(&self, ch: Channel, shade: u16) -> Option<SlotId> {
        self.table(ch)?.get(&shade).copied()
    }
}

/// Final output of a derivation: opaque ARGB colors keyed by slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaletteOverride(BTreeMap<SlotId, u32>);

impl PaletteOverride {
    pub fn get(&self, slot: SlotId) -> Option<u32> { self.0.get(&slot).copied() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Entries in increasing slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, u32)> + '_ {
        self.0.iter().map(|(&s, &c)| (s, c))
    }

    pub fn into_inner(self) -> BTreeMap<SlotId, u32> { self.0 }
}

impl<'a> IntoIterator for &'a PaletteOverride {
    type Item = (&'a SlotId, &'a u32);
    type IntoIter = std::collections::btree_map::Iter<'a, SlotId, u32>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Install every generated color that has a slot.  Shades missing
/// from a table are skipped.
pub fn map_to_slots(scheme: &ColorScheme, tables: &SlotTables)
                    -> PaletteOverride {
    let mut out = BTreeMap::new();
    for (ch, palette) in scheme.channels() {
        let Some(table) = tables.table(ch) else { continue };
        for (shade, &color) in palette {
            if let Some(&slot) = table.get(shade) {
                out.insert(slot, to_argb(color));
            }
        }
    }
    PaletteOverride(out)
}
