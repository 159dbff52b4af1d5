use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// EnumValue

/// A member of a C-like enum, or a set of flags.
pub trait EnumValue {
    /// The declared name of the value, if it is exactly one member.
    fn variant_name(&self) -> Option<&'static str>;

    /// The underlying integral value.
    fn underlying(&self) -> i128;

    /// For flag sets, the names of the members contained in the value.
    ///
    /// `None` for plain enums.
    #[inline]
    fn flag_names(&self) -> Option<Vec<&'static str>> {
        None
    }
}
