//! Transport classification shared across all traffic-related crates.
//!
//! Two related enums:
//!
//! - [`TransportClass`] — what a *vehicle* is (private car vs. public
//!   transit).  Carried by every vehicle and used to filter exit edges and
//!   lane admissions.
//! - [`TransportFilter`] — what an *entry node* or guide lane accepts.
//!   `PublicAndPrivate` qualifies for both classes.

/// The traffic class a vehicle belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportClass {
    /// Private vehicle (car, van…).
    Private,
    /// Public-transit vehicle (bus…).
    Public,
}

impl TransportClass {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportClass::Private => "private",
            TransportClass::Public  => "public",
        }
    }
}

impl std::fmt::Display for TransportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which traffic classes an entry node or guide lane accepts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportFilter {
    Private,
    Public,
    PublicAndPrivate,
}

impl TransportFilter {
    /// `true` if a vehicle of `class` qualifies under this filter.
    #[inline]
    pub fn admits(self, class: TransportClass) -> bool {
        match self {
            TransportFilter::Private          => class == TransportClass::Private,
            TransportFilter::Public           => class == TransportClass::Public,
            TransportFilter::PublicAndPrivate => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportFilter::Private          => "private",
            TransportFilter::Public           => "public",
            TransportFilter::PublicAndPrivate => "public+private",
        }
    }
}

impl std::fmt::Display for TransportFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
