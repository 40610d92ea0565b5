//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Node ids are unique only within
//! their own kind: a ramp and a worker may both be `ElementId(1)`.

use std::fmt;
use std::str::FromStr;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            /// Bare integer, matching the network definition format.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<$name, Self::Err> {
                s.parse::<$inner>().map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a ramp, worker or storehouse within its own kind.
    pub struct ElementId(u32);
}

typed_id! {
    /// Identity of an in-flight package.  Always positive for a live package;
    /// `PackageId::NONE` (0) marks "no identity".
    pub struct PackageId(u32);
}

impl PackageId {
    /// Reserved sentinel.  Never handed out by the allocator.
    pub const NONE: PackageId = PackageId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}
