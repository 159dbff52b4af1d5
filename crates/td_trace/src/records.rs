//! Ready-made payload records.
//!
//! Both records carry a serde contract, so the serializer renders them
//! structurally: one child element per field.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;
use td_reflect::info::NonGenericDescCell;
use td_reflect::ops::{TraceRef, best_effort};
use td_reflect::{Described, Trace, TypeDesc};

use crate::engine::inner_exceptions;

/// Default nesting limit of [`ExceptionDetail::create`].
pub const DETAIL_MAX_DEPTH: i32 = 8;

/// Inner exceptions kept per level by [`ExceptionDetail::create`].
pub const DETAIL_MAX_INNER: usize = 64;

macro_rules! impl_trace_record {
    ($ty:ident, $ident:literal) => {
        impl Described for $ty {
            fn type_desc() -> &'static TypeDesc {
                static CELL: NonGenericDescCell = NonGenericDescCell::new();
                CELL.get_or_init(|| {
                    TypeDesc::opaque::<Self>(concat!("td_trace::", stringify!($ty)), $ident)
                })
            }
        }

        impl Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                Self::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                TraceRef::Opaque
            }

            #[inline]
            fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                Some(self)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// MessageAndDetail

/// A message with optional detail, rendered as a `Message` element.
///
/// # Examples
///
/// ```
/// use td_trace::{MessageAndDetail, TraceSerializer};
///
/// let message = MessageAndDetail::new("cache miss", Some("key 42"));
/// let document = TraceSerializer::shared().to_document(Some(&message));
///
/// let element = document.root().child("Message").unwrap();
/// assert_eq!(element.child("Text").unwrap().text(), "cache miss");
/// assert_eq!(element.child("Detail").unwrap().text(), "key 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "Message")]
pub struct MessageAndDetail {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Detail")]
    pub detail: Option<String>,
}

impl MessageAndDetail {
    pub fn new(text: impl Into<String>, detail: Option<impl Into<String>>) -> Self {
        Self {
            text: text.into(),
            detail: detail.map(Into::into),
        }
    }
}

impl_trace_record!(MessageAndDetail, "Message");

// -----------------------------------------------------------------------------
// ExceptionDetail

/// A serializable snapshot of an exception and its inner exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "Exception")]
pub struct ExceptionDetail {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    #[serde(rename = "Source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "StackTrace", skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(rename = "TargetSite", skip_serializing_if = "Option::is_none")]
    pub target_site: Option<String>,
    #[serde(rename = "AsString", skip_serializing_if = "Option::is_none")]
    pub as_string: Option<String>,
    #[serde(rename = "InnerException", skip_serializing_if = "Vec::is_empty")]
    pub inner_exceptions: Vec<ExceptionDetail>,
}

impl ExceptionDetail {
    /// Snapshots `value` with up to `max_depth` levels of inner exceptions.
    ///
    /// Fields whose accessor fails are left empty. A value that is not an
    /// exception only records its type and text rendering.
    pub fn create(value: Option<&dyn Trace>, max_depth: i32) -> Self {
        let Some(value) = value.filter(|value| !value.is_null()) else {
            return Self::default();
        };
        let type_name = String::from(value.trace_desc().display_name());

        let TraceRef::Exception(exception) = value.trace_ref() else {
            return Self {
                exception_type: Some(type_name),
                as_string: best_effort(|| Ok(value.render_text())),
                ..Self::default()
            };
        };

        let mut detail = Self {
            exception_type: Some(exception.exception_type().unwrap_or(type_name)),
            source: best_effort(|| exception.source_name()).flatten(),
            message: best_effort(|| exception.message()),
            stack_trace: best_effort(|| exception.stack_trace()).flatten(),
            target_site: best_effort(|| exception.target_site()).flatten(),
            as_string: best_effort(|| Ok(value.render_text())),
            inner_exceptions: Vec::new(),
        };
        if max_depth < 1 {
            return detail;
        }

        detail.inner_exceptions = inner_exceptions(exception)
            .into_iter()
            .take(DETAIL_MAX_INNER)
            .map(|inner| Self::create(Some(inner), max_depth - 1))
            .collect();
        detail
    }
}

impl_trace_record!(ExceptionDetail, "Exception");

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::fmt;

    use td_reflect::Trace;

    use super::{DETAIL_MAX_DEPTH, DETAIL_MAX_INNER, ExceptionDetail};
    use crate::{AggregateError, ErrorReport, TraceSerializer};

    #[derive(Debug)]
    struct Failure;

    impl fmt::Display for Failure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failure")
        }
    }

    impl core::error::Error for Failure {}

    fn chain(length: usize) -> ErrorReport {
        let mut report = ErrorReport::new(&Failure);
        for _ in 1..length {
            report = ErrorReport::new(&Failure).with_inner(Arc::new(report));
        }
        report
    }

    fn depth(detail: &ExceptionDetail) -> usize {
        1 + detail.inner_exceptions.iter().map(depth).max().unwrap_or(0)
    }

    #[test]
    fn snapshot_fields() {
        let report = ErrorReport::new(&Failure).with_source_name("worker");
        let detail = ExceptionDetail::create(Some(&report), DETAIL_MAX_DEPTH);

        assert!(detail.exception_type.as_deref().unwrap().ends_with("::Failure"));
        assert_eq!(detail.message.as_deref(), Some("failure"));
        assert_eq!(detail.source.as_deref(), Some("worker"));
        assert!(detail.as_string.as_deref().unwrap().ends_with(": failure"));
        assert!(detail.inner_exceptions.is_empty());
    }

    #[test]
    fn depth_is_limited() {
        let report = chain(20);
        let detail = ExceptionDetail::create(Some(&report), DETAIL_MAX_DEPTH);
        assert_eq!(depth(&detail), DETAIL_MAX_DEPTH as usize + 1);
    }

    #[test]
    fn inner_exceptions_are_limited_and_distinct() {
        let errors: Vec<Arc<dyn Trace>> = (0..100)
            .map(|_| Arc::new(ErrorReport::new(&Failure)) as Arc<dyn Trace>)
            .collect();
        let aggregate = AggregateError::new("many", errors);

        let detail = ExceptionDetail::create(Some(&aggregate), 1);
        assert_eq!(detail.inner_exceptions.len(), DETAIL_MAX_INNER);

        let shared: Arc<dyn Trace> = Arc::new(ErrorReport::new(&Failure));
        let aggregate = AggregateError::new("twice", vec![shared.clone(), shared]);
        let detail = ExceptionDetail::create(Some(&aggregate), 1);
        assert_eq!(detail.inner_exceptions.len(), 1);
    }

    #[test]
    fn null_and_plain_values() {
        assert_eq!(ExceptionDetail::create(None, 8), ExceptionDetail::default());

        let detail = ExceptionDetail::create(Some(&5_i32), 8);
        assert_eq!(detail.exception_type.as_deref(), Some("int"));
        assert_eq!(detail.as_string.as_deref(), Some("5"));
        assert_eq!(detail.message, None);
    }

    #[test]
    fn rendered_structurally() {
        let report = ErrorReport::new(&Failure).with_inner(Arc::new(ErrorReport::new(&Failure)));
        let detail = ExceptionDetail::create(Some(&report), DETAIL_MAX_DEPTH);
        let document = TraceSerializer::default().to_document(Some(&detail));

        let element = document.root().child("Exception").unwrap();
        assert_eq!(element.attribute("type"), Some("td_trace::ExceptionDetail"));
        assert_eq!(element.child("Message").unwrap().text(), "failure");
        let inner = element.child("InnerException").unwrap();
        assert_eq!(inner.children_named("Item").count(), 1);
        assert!(element.child("Source").is_none());
    }
}
