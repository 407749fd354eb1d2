//! Fixed storage slots for header data.
//!
//! The schema is deliberately height-independent: there are exactly two
//! storage keys, and per-height identity is reconstructed by asking the
//! versioned store for its state as of the requested height, then reading
//! [`Slot::Current`] from that historical view. Neither the key scheme nor
//! the versioned store alone provides the per-height index; they do so
//! jointly.

/// The largest height addressable on the backing store's version axis.
///
/// Snapshot versions are signed 64-bit integers, so headers numbered above
/// this bound can never be retrieved and are rejected at encode time.
pub const MAX_HEIGHT: u64 = i64::MAX as u64;

/// A fixed storage key identifying a logical header slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Holds the genesis header. Written once at height 0 and never
    /// superseded, so it is always read from the live store directly.
    Genesis,
    /// Holds the header of the most recently committed height. Earlier
    /// values remain reachable through historical snapshot views.
    Current,
}

impl Slot {
    /// Returns the slot that stores the header for `height`:
    /// [`Self::Genesis`] iff `height == 0`, [`Self::Current`] otherwise.
    pub const fn for_height(height: u64) -> Self {
        if height == 0 { Self::Genesis } else { Self::Current }
    }

    /// Returns the fixed single-byte storage key for this slot.
    pub const fn key(self) -> &'static [u8] {
        match self {
            Self::Current => &[0x01],
            Self::Genesis => &[0x02],
        }
    }
}
