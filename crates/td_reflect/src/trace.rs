use alloc::string::String;
use core::any::Any;

use crate::info::{Described, NonGenericDescCell, TypeDesc};
use crate::ops::TraceRef;

// -----------------------------------------------------------------------------
// Trace

/// A value that can be rendered into a trace document.
///
/// The trait is object safe; payloads travel as `&dyn Trace`,
/// `Box<dyn Trace>` or `Arc<dyn Trace>` and their shape is discovered at
/// the call site through [`trace_ref`](Trace::trace_ref).
///
/// # Implementing
///
/// Most types should use one of the registration macros:
///
/// - [`impl_trace_opaque!`](crate::impl_trace_opaque): plain types, optionally
///   with a serde contract and a `Display` based text rendering.
/// - [`impl_trace_enum!`](crate::impl_trace_enum): C-like enums.
/// - [`impl_trace_flags!`](crate::impl_trace_flags): `bitflags` types.
///
/// Exceptions and database errors implement the trait by hand, returning
/// [`TraceRef::Exception`] or [`TraceRef::DatabaseError`].
///
/// # Examples
///
/// ```
/// use td_reflect::{Trace, ops::TraceRef};
///
/// let values: Vec<Box<dyn Trace>> = vec![Box::new(5_i32), Box::new(String::from("five"))];
///
/// assert!(matches!(values[0].trace_ref(), TraceRef::Primitive(_)));
/// assert!(matches!(values[1].trace_ref(), TraceRef::Text("five")));
/// assert_eq!(values[0].trace_desc().display_name(), "int");
/// assert_eq!(values[0].downcast_ref::<i32>(), Some(&5));
/// ```
pub trait Trace: Any + Send + Sync {
    /// Returns the descriptor of the value's runtime type.
    ///
    /// Wrappers such as `Option<T>` and `Box<dyn Trace>` report the wrapped
    /// value's type.
    fn trace_desc(&self) -> &'static TypeDesc;

    /// Returns the shape of the value.
    fn trace_ref(&self) -> TraceRef<'_>;

    /// Returns the serde contract of the value, if it has one.
    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    /// The value's own text rendering, used when nothing better is possible.
    ///
    /// Defaults to the display name of the runtime type.
    fn render_text(&self) -> String {
        String::from(self.trace_desc().display_name())
    }

    /// For wrappers, the wrapped value.
    #[inline]
    fn inner_trace(&self) -> Option<&dyn Trace> {
        None
    }

    /// Casts this type to a `&dyn Trace`.
    #[inline(always)]
    fn as_trace(&self) -> &dyn Trace
    where
        Self: Sized,
    {
        self
    }
}

impl dyn Trace {
    /// Returns `true` if the value, or the value it wraps, is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Downcasts the value, looking through wrappers.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let mut current = self;
        loop {
            if let Some(value) = <dyn Any>::downcast_ref::<T>(current) {
                return Some(value);
            }
            current = current.inner_trace()?;
        }
    }

    /// Returns `true` if the value is a null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.trace_ref(), TraceRef::Null)
    }
}

impl Described for dyn Trace {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(TypeDesc::object::<dyn Trace>)
    }
}
