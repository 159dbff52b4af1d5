use alloc::string::{String, ToString};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde_core::{Serialize, Serializer};

use crate::info::{Described, NonGenericDescCell, PrimitiveKind, TypeDesc};
use crate::ops::{PrimitiveValue, TraceRef};
use crate::Trace;

macro_rules! impl_trace_primitive {
    ($ty:ty, $ident:literal, $kind:ident, $variant:ident) => {
        impl Described for $ty {
            fn type_desc() -> &'static TypeDesc {
                static CELL: NonGenericDescCell = NonGenericDescCell::new();
                CELL.get_or_init(|| TypeDesc::primitive::<$ty>($ident, $ident, PrimitiveKind::$kind))
            }
        }

        impl Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                <Self as Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                TraceRef::Primitive(PrimitiveValue::$variant(*self))
            }

            #[inline]
            fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                Some(self)
            }

            fn render_text(&self) -> String {
                self.to_string()
            }
        }
    };
}

impl_trace_primitive!(bool, "bool", Boolean, Bool);
impl_trace_primitive!(char, "char", Char, Char);
impl_trace_primitive!(i8, "i8", SByte, I8);
impl_trace_primitive!(u8, "u8", Byte, U8);
impl_trace_primitive!(i16, "i16", Int16, I16);
impl_trace_primitive!(u16, "u16", UInt16, U16);
impl_trace_primitive!(i32, "i32", Int32, I32);
impl_trace_primitive!(u32, "u32", UInt32, U32);
impl_trace_primitive!(i64, "i64", Int64, I64);
impl_trace_primitive!(u64, "u64", UInt64, U64);
impl_trace_primitive!(i128, "i128", Int128, I128);
impl_trace_primitive!(u128, "u128", UInt128, U128);
impl_trace_primitive!(isize, "isize", IntPtr, Isize);
impl_trace_primitive!(usize, "usize", UIntPtr, Usize);
impl_trace_primitive!(f32, "f32", Single, F32);
impl_trace_primitive!(f64, "f64", Double, F64);
impl_trace_primitive!(DateTime<Utc>, "DateTime", DateTime, DateTime);

// -----------------------------------------------------------------------------
// Empty

impl Described for () {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| TypeDesc::primitive::<()>("()", "Empty", PrimitiveKind::Empty))
    }
}

impl Trace for () {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        <Self as Described>::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Primitive(PrimitiveValue::Empty)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }

    fn render_text(&self) -> String {
        String::new()
    }
}

// -----------------------------------------------------------------------------
// DbNull

/// The database null marker.
///
/// Distinct from `None`: a column that was read and found to be null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DbNull;

impl Serialize for DbNull {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit_struct("DBNull")
    }
}

impl Described for DbNull {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::primitive::<DbNull>("td_reflect::DbNull", "DBNull", PrimitiveKind::DBNull)
        })
    }
}

impl Trace for DbNull {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        <Self as Described>::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Primitive(PrimitiveValue::DbNull)
    }

    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(self)
    }

    fn render_text(&self) -> String {
        String::new()
    }
}

// -----------------------------------------------------------------------------
// SystemTime

impl Described for SystemTime {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::primitive::<SystemTime>("std::time::SystemTime", "SystemTime", PrimitiveKind::DateTime)
        })
    }
}

impl Trace for SystemTime {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        <Self as Described>::type_desc()
    }

    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Primitive(PrimitiveValue::DateTime(DateTime::<Utc>::from(*self)))
    }

    fn render_text(&self) -> String {
        DateTime::<Utc>::from(*self).to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{ArrayTagStyle, Category, PrimitiveKind};
    use crate::ops::{PrimitiveValue, TraceRef};
    use crate::{DbNull, Described, Trace};

    #[test]
    fn integer_keywords() {
        assert_eq!(i16::type_desc().display_name(), "short");
        assert_eq!(i32::type_desc().display_name(), "int");
        assert_eq!(u32::type_desc().display_name(), "uint");
        assert_eq!(f64::type_desc().display_name(), "double");
        assert_eq!(usize::type_desc().display_name(), "uintptr");
        assert_eq!(i32::type_desc().tag_name(ArrayTagStyle::Legacy), "i32");
    }

    #[test]
    fn special_primitives() {
        assert_eq!(<()>::type_desc().display_name(), "Empty");
        assert_eq!(DbNull::type_desc().display_name(), "DBNull");
        assert_eq!(DbNull::type_desc().tag_name(ArrayTagStyle::Legacy), "DBNull");
        assert_eq!(
            std::time::SystemTime::type_desc().primitive_kind(),
            Some(PrimitiveKind::DateTime)
        );
        assert_eq!(<chrono::DateTime<chrono::Utc>>::type_desc().display_name(), "DateTime");
    }

    #[test]
    fn primitive_shape() {
        let value: &dyn Trace = &7_u8;
        assert_eq!(value.trace_desc().category(), Category::Primitive);
        assert!(matches!(value.trace_ref(), TraceRef::Primitive(PrimitiveValue::U8(7))));
        assert_eq!(value.render_text(), "7");
        assert!(value.as_serialize().is_some());
    }
}
