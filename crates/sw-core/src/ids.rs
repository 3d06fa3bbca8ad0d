//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// NORAD catalog number of a tracked satellite.
    pub struct SatelliteId(u32);
}

typed_id! {
    /// Row identifier handed out by a record store, in insertion order.
    pub struct RecordId(u64);
}

impl SatelliteId {
    /// The International Space Station.
    pub const ISS: SatelliteId = SatelliteId(25_544);
}

impl RecordId {
    /// The id following `self`.
    #[inline]
    pub fn next(self) -> RecordId {
        RecordId(self.0 + 1)
    }
}
