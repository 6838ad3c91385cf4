//! Strongly typed, zero-cost identifier wrappers.
//!
//! Road-network nodes and edges are keyed by `String` — their identity comes
//! from the map document and must round-trip through it.  Simulation-internal
//! entities (vehicles, guide nodes) use integer wrappers generated by
//! `typed_id!`: `Copy + Ord + Hash`, usable as `Vec` indices via `.index()`.

/// Generate a typed ID wrapper around a primitive integer.
#[macro_export]
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Slot index of a live vehicle in the registry.  Slots are reused after
    /// despawn, so a `VehicleId` is only meaningful while the vehicle lives.
    pub struct VehicleId(u32);
}
