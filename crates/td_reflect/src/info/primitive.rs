use core::fmt;

// -----------------------------------------------------------------------------
// PrimitiveKind

/// Type codes of the primitive types.
///
/// [`keyword`](PrimitiveKind::keyword) gives the short name used in
/// display names:
///
/// | kind | keyword |
/// |------|---------|
/// | `Boolean` | `bool` |
/// | `Int16`, `Int32`, `Int64` | `short`, `int`, `long` |
/// | `UInt16`, `UInt32`, `UInt64` | `ushort`, `uint`, `ulong` |
/// | `Single` | `float` |
/// | `DateTime`, `DBNull`, `Empty` | their own names |
/// | others | the lowercase kind name, e.g. `double`, `sbyte` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Empty,
    DBNull,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Int128,
    UInt128,
    IntPtr,
    UIntPtr,
    Single,
    Double,
    DateTime,
}

impl PrimitiveKind {
    /// The kind name, as written in the variant.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::DBNull => "DBNull",
            Self::Boolean => "Boolean",
            Self::Char => "Char",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Int128 => "Int128",
            Self::UInt128 => "UInt128",
            Self::IntPtr => "IntPtr",
            Self::UIntPtr => "UIntPtr",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::DateTime => "DateTime",
        }
    }

    /// The short keyword used in display names.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::Int16 => "short",
            Self::Int32 => "int",
            Self::Int64 => "long",
            Self::Single => "float",
            Self::UInt16 => "ushort",
            Self::UInt32 => "uint",
            Self::UInt64 => "ulong",
            Self::DateTime | Self::DBNull | Self::Empty => self.name(),
            Self::Char => "char",
            Self::SByte => "sbyte",
            Self::Byte => "byte",
            Self::Int128 => "int128",
            Self::UInt128 => "uint128",
            Self::IntPtr => "intptr",
            Self::UIntPtr => "uintptr",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::PrimitiveKind;

    #[test]
    fn fixed_keywords() {
        assert_eq!(PrimitiveKind::Boolean.keyword(), "bool");
        assert_eq!(PrimitiveKind::Int16.keyword(), "short");
        assert_eq!(PrimitiveKind::UInt64.keyword(), "ulong");
        assert_eq!(PrimitiveKind::Single.keyword(), "float");
    }

    #[test]
    fn special_and_lowercase_keywords() {
        assert_eq!(PrimitiveKind::DateTime.keyword(), "DateTime");
        assert_eq!(PrimitiveKind::DBNull.keyword(), "DBNull");
        assert_eq!(PrimitiveKind::Empty.keyword(), "Empty");
        assert_eq!(PrimitiveKind::Double.keyword(), "double");
        assert_eq!(PrimitiveKind::Byte.keyword(), "byte");
        for kind in [PrimitiveKind::Char, PrimitiveKind::SByte, PrimitiveKind::Int128] {
            assert_eq!(kind.keyword(), kind.name().to_lowercase());
        }
    }
}
