use alloc::boxed::Box;

use crate::Trace;
use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// Sequence

/// Arrays and collections.
pub trait Sequence {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Trace> + '_>;

    /// The declared element type.
    fn element_desc(&self) -> &'static TypeDesc;
}

// -----------------------------------------------------------------------------
// Dictionary

/// Key/value collections.
pub trait Dictionary {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Trace, &dyn Trace)> + '_>;

    /// The declared key type.
    fn key_desc(&self) -> &'static TypeDesc;

    /// The declared value type.
    fn value_desc(&self) -> &'static TypeDesc;
}
