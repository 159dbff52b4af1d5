use core::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use super::{DatabaseError, Dictionary, EnumValue, Exception, Sequence};
use crate::info::PrimitiveKind;

// -----------------------------------------------------------------------------
// TraceRef

/// An immutable view of a value's shape.
///
/// Returned by [`Trace::trace_ref`](crate::Trace::trace_ref). The serializer
/// dispatches on this, so new shapes degrade to [`TraceRef::Opaque`].
#[derive(Clone, Copy)]
pub enum TraceRef<'a> {
    /// No value, e.g. `None`.
    Null,
    Primitive(PrimitiveValue),
    Text(&'a str),
    Enum(&'a dyn EnumValue),
    Sequence(&'a dyn Sequence),
    Dictionary(&'a dyn Dictionary),
    Exception(&'a dyn Exception),
    DatabaseError(&'a dyn DatabaseError),
    /// Anything else. Rendered through its serde contract or its text.
    Opaque,
}

impl TraceRef<'_> {
    /// Returns `true` for [`Sequence`](TraceRef::Sequence) and
    /// [`Dictionary`](TraceRef::Dictionary).
    #[inline]
    pub const fn is_enumerable(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Dictionary(_))
    }

    /// A short name of the shape, for logs.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Primitive(_) => "Primitive",
            Self::Text(_) => "Text",
            Self::Enum(_) => "Enum",
            Self::Sequence(_) => "Sequence",
            Self::Dictionary(_) => "Dictionary",
            Self::Exception(_) => "Exception",
            Self::DatabaseError(_) => "DatabaseError",
            Self::Opaque => "Opaque",
        }
    }
}

impl fmt::Debug for TraceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(value) => f.debug_tuple("Primitive").field(value).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            _ => f.write_str(self.kind_name()),
        }
    }
}

// -----------------------------------------------------------------------------
// PrimitiveValue

/// A copied primitive value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue {
    Empty,
    DbNull,
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    Isize(isize),
    Usize(usize),
    F32(f32),
    F64(f64),
    DateTime(DateTime<Utc>),
}

impl PrimitiveValue {
    /// Returns the kind of the value.
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Empty => PrimitiveKind::Empty,
            Self::DbNull => PrimitiveKind::DBNull,
            Self::Bool(_) => PrimitiveKind::Boolean,
            Self::Char(_) => PrimitiveKind::Char,
            Self::I8(_) => PrimitiveKind::SByte,
            Self::U8(_) => PrimitiveKind::Byte,
            Self::I16(_) => PrimitiveKind::Int16,
            Self::U16(_) => PrimitiveKind::UInt16,
            Self::I32(_) => PrimitiveKind::Int32,
            Self::U32(_) => PrimitiveKind::UInt32,
            Self::I64(_) => PrimitiveKind::Int64,
            Self::U64(_) => PrimitiveKind::UInt64,
            Self::I128(_) => PrimitiveKind::Int128,
            Self::U128(_) => PrimitiveKind::UInt128,
            Self::Isize(_) => PrimitiveKind::IntPtr,
            Self::Usize(_) => PrimitiveKind::UIntPtr,
            Self::F32(_) => PrimitiveKind::Single,
            Self::F64(_) => PrimitiveKind::Double,
            Self::DateTime(_) => PrimitiveKind::DateTime,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty | Self::DbNull => Ok(()),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::I128(v) => fmt::Display::fmt(v, f),
            Self::U128(v) => fmt::Display::fmt(v, f),
            Self::Isize(v) => fmt::Display::fmt(v, f),
            Self::Usize(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::DateTime(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}
