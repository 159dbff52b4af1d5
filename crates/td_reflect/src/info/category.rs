use core::fmt;

// -----------------------------------------------------------------------------
// Category

/// An enumeration of the categories a runtime type can fall into.
///
/// The serializer dispatches on the value's shape, but the category is what
/// log viewers and the serializability gate reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Primitive,
    Enum,
    Array,
    Collection,
    Dictionary,
    Exception,
    DatabaseError,
    Opaque,
}

impl Category {
    /// Returns `true` for categories whose values can be enumerated.
    #[inline]
    pub const fn is_enumerable(self) -> bool {
        matches!(self, Self::Array | Self::Collection | Self::Dictionary)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.pad("Primitive"),
            Self::Enum => f.pad("Enum"),
            Self::Array => f.pad("Array"),
            Self::Collection => f.pad("Collection"),
            Self::Dictionary => f.pad("Dictionary"),
            Self::Exception => f.pad("Exception"),
            Self::DatabaseError => f.pad("DatabaseError"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}
