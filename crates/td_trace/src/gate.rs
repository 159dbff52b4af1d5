//! The serializability gate.
//!
//! A payload handed to a log sink is either cheap to render as it is or is
//! serialized exactly once, up front, into a [`TraceDataObject`]. Every sink
//! consuming the payload afterwards reuses that rendering.

use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use td_reflect::Trace;

use crate::{TraceDataObject, TraceError, TraceSerializer};

// -----------------------------------------------------------------------------
// TracePayload

/// A payload that is safe to hand to any number of sinks.
#[derive(Clone)]
pub enum TracePayload {
    /// A value passed through unchanged.
    Value(Arc<dyn Trace>),
    /// A serialized rendering.
    Data(Arc<TraceDataObject>),
}

impl TracePayload {
    #[inline]
    pub fn as_trace(&self) -> &dyn Trace {
        match self {
            Self::Value(value) => &**value,
            Self::Data(data) => &**data,
        }
    }

    /// Returns `true` if the payload was serialized by the gate.
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Renders the payload as text: the document of a serialized payload,
    /// the text rendering of any other value.
    pub fn render(&self) -> Result<String, TraceError> {
        match self {
            Self::Value(value) => Ok(value.render_text()),
            Self::Data(data) => data.render(),
        }
    }
}

impl fmt::Debug for TracePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f
                .debug_tuple("Value")
                .field(&value.trace_desc().display_name())
                .finish(),
            Self::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}

impl fmt::Display for TracePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// -----------------------------------------------------------------------------
// ensure_serializable

/// Returns `true` for values rendered as they are: nulls and primitives,
/// including arrays of primitives at any nesting and optional primitives.
#[inline]
pub fn is_primitive_like(value: &dyn Trace) -> bool {
    value.is_null() || value.trace_desc().is_primitive_like()
}

/// Makes `value` safe to hand to sinks, using the
/// [shared](TraceSerializer::shared) serializer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use td_reflect::Trace;
/// use td_trace::{TracePayload, ensure_serializable};
///
/// let number: Arc<dyn Trace> = Arc::new(5_i32);
/// let Some(TracePayload::Value(same)) = ensure_serializable(Some(number.clone())) else {
///     unreachable!()
/// };
/// assert!(Arc::ptr_eq(&same, &number));
///
/// let list: Arc<dyn Trace> = Arc::new(vec![String::from("a")]);
/// assert!(ensure_serializable(Some(list)).unwrap().is_wrapped());
///
/// assert!(ensure_serializable(None).is_none());
/// ```
#[inline]
pub fn ensure_serializable(value: Option<Arc<dyn Trace>>) -> Option<TracePayload> {
    ensure_serializable_with(TraceSerializer::shared(), value)
}

/// Makes `value` safe to hand to sinks, serializing with `serializer`.
///
/// - `None`, nulls and primitive-like values pass through unchanged.
/// - A [`TraceDataObject`] is returned as the same instance.
/// - Anything else is serialized into a new [`TraceDataObject`].
pub fn ensure_serializable_with(
    serializer: &TraceSerializer,
    value: Option<Arc<dyn Trace>>,
) -> Option<TracePayload> {
    let value = value?;

    if is_primitive_like(&*value) {
        return Some(TracePayload::Value(value));
    }

    let any: Arc<dyn Any + Send + Sync> = value.clone();
    if let Ok(data) = any.downcast::<TraceDataObject>() {
        return Some(TracePayload::Data(data));
    }

    log::trace!("wrapping `{}`", value.trace_desc().display_name());
    Some(TracePayload::Data(Arc::new(serializer.wrap(Some(&*value)))))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use td_reflect::{DbNull, Trace};

    use super::{TracePayload, ensure_serializable, ensure_serializable_with, is_primitive_like};
    use crate::{TraceDataObject, TraceSerializer};

    fn passes_through(value: Arc<dyn Trace>) {
        match ensure_serializable(Some(value.clone())) {
            Some(TracePayload::Value(same)) => assert!(Arc::ptr_eq(&same, &value)),
            other => panic!("`{}` was wrapped: {other:?}", value.trace_desc().display_name()),
        }
    }

    #[test]
    fn primitives_pass_through() {
        passes_through(Arc::new(5_i32));
        passes_through(Arc::new(true));
        passes_through(Arc::new('x'));
        passes_through(Arc::new(2.5_f64));
        passes_through(Arc::new(DbNull));
        passes_through(Arc::new(()));
    }

    #[test]
    fn nested_arrays_and_optionals_pass_through() {
        passes_through(Arc::new([1_u8, 2, 3]));
        passes_through(Arc::new([[1_i64; 2]; 3]));
        passes_through(Arc::new(vec![1_i16, 2].into_boxed_slice()));
        passes_through(Arc::new(Some(4_u32)));
        passes_through(Arc::new(None::<u32>));
        passes_through(Arc::new([Some(1_i32), None]));
    }

    #[test]
    fn none_passes_through() {
        assert!(ensure_serializable(None).is_none());
    }

    #[test]
    fn data_objects_are_not_wrapped_twice() {
        let data = Arc::new(TraceDataObject::new(Some(&vec![1_i32])));
        let value: Arc<dyn Trace> = data.clone();

        match ensure_serializable(Some(value)) {
            Some(TracePayload::Data(same)) => assert!(Arc::ptr_eq(&same, &data)),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn other_values_are_wrapped() {
        let serializer = TraceSerializer::default();
        let values: Vec<Arc<dyn Trace>> = vec![
            Arc::new(String::from("text")),
            Arc::new(vec![1_i32, 2]),
            Arc::new(Some(String::from("optional text"))),
        ];
        for value in values {
            assert!(!is_primitive_like(&*value));
            let payload = ensure_serializable_with(&serializer, Some(value)).unwrap();
            assert!(payload.is_wrapped());
            assert!(payload.render().unwrap().contains("<TraceData"));
        }
    }

    #[test]
    fn payload_text() {
        let payload = ensure_serializable(Some(Arc::new(42_i32))).unwrap();
        assert!(!payload.is_wrapped());
        assert_eq!(payload.to_string(), "42");
        assert_eq!(payload.as_trace().downcast_ref::<i32>(), Some(&42));
    }
}
