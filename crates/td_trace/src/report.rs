//! Exception carriers for Rust errors.
//!
//! Rust errors are not [`Trace`] values by themselves. [`ErrorReport`]
//! snapshots any [`core::error::Error`] together with its `source()` chain;
//! [`AggregateError`] collects several traced errors under one message.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt;

use td_reflect::info::{Category, NonGenericDescCell};
use td_reflect::ops::{Exception, FieldResult, TraceRef};
use td_reflect::{Described, Trace, TypeDesc};

// -----------------------------------------------------------------------------
// ErrorReport

/// A snapshot of an error and the chain of errors that caused it.
///
/// # Examples
///
/// ```
/// use td_trace::{ErrorReport, TraceSerializer};
///
/// let error = "x".parse::<i32>().unwrap_err();
/// let report = ErrorReport::new(&error).with_source_name("settings");
///
/// let document = TraceSerializer::shared().to_document(Some(&report));
/// let element = document.root().child("ParseIntError").unwrap();
/// assert!(element.attribute("Type").unwrap().ends_with("ParseIntError"));
/// assert_eq!(element.child("Message").unwrap().text(), "invalid digit found in string");
/// assert_eq!(element.child("Source").unwrap().text(), "settings");
/// ```
#[derive(Clone)]
pub struct ErrorReport {
    type_name: Option<String>,
    message: String,
    source_name: Option<String>,
    target_site: Option<String>,
    stack_trace: Option<String>,
    inner: Option<Arc<dyn Trace>>,
}

impl ErrorReport {
    /// Snapshots `error` and its source chain.
    pub fn new<E: Error + 'static>(error: &E) -> Self {
        let mut report = Self::from_dyn(error);
        report.type_name = Some(String::from(core::any::type_name::<E>()));
        report
    }

    /// Snapshots `error` and its source chain, capturing a backtrace of
    /// the current thread when backtraces are enabled.
    #[cfg(feature = "backtrace")]
    #[cfg_attr(docsrs, doc(cfg(feature = "backtrace")))]
    pub fn capture<E: Error + 'static>(error: &E) -> Self {
        use std::backtrace::{Backtrace, BacktraceStatus};

        let mut report = Self::new(error);
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            report.stack_trace = Some(backtrace.to_string());
        }
        report
    }

    /// Snapshots a type-erased error and its source chain.
    ///
    /// The concrete type is unknown, so the report carries no type name.
    pub fn from_dyn(error: &(dyn Error + 'static)) -> Self {
        let inner = error
            .source()
            .map(|source| Arc::new(Self::from_dyn(source)) as Arc<dyn Trace>);
        Self {
            type_name: None,
            message: error.to_string(),
            source_name: None,
            target_site: None,
            stack_trace: None,
            inner,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Names the component that raised the error.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Names the operation that raised the error.
    pub fn with_target_site(mut self, target_site: impl Into<String>) -> Self {
        self.target_site = Some(target_site.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Replaces the cause of the error.
    pub fn with_inner(mut self, inner: Arc<dyn Trace>) -> Self {
        self.inner = Some(inner);
        self
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn inner(&self) -> Option<&Arc<dyn Trace>> {
        self.inner.as_ref()
    }
}

impl fmt::Debug for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReport")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .field("source_name", &self.source_name)
            .field("target_site", &self.target_site)
            .field("inner", &self.inner.as_ref().map(|inner| inner.render_text()))
            .finish_non_exhaustive()
    }
}

impl Exception for ErrorReport {
    #[inline]
    fn exception_type(&self) -> Option<String> {
        self.type_name.clone()
    }

    #[inline]
    fn message(&self) -> FieldResult<String> {
        Ok(self.message.clone())
    }

    #[inline]
    fn source_name(&self) -> FieldResult<Option<String>> {
        Ok(self.source_name.clone())
    }

    #[inline]
    fn target_site(&self) -> FieldResult<Option<String>> {
        Ok(self.target_site.clone())
    }

    #[inline]
    fn stack_trace(&self) -> FieldResult<Option<String>> {
        Ok(self.stack_trace.clone())
    }

    #[inline]
    fn inner_exception(&self) -> FieldResult<Option<&dyn Trace>> {
        Ok(self.inner.as_deref())
    }
}

impl Described for ErrorReport {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| TypeDesc::plain::<Self>("td_trace::ErrorReport", "ErrorReport", Category::Exception))
    }
}

impl Trace for ErrorReport {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Exception(self)
    }

    fn render_text(&self) -> String {
        match &self.type_name {
            Some(type_name) => alloc::format!("{type_name}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// AggregateError

/// Several errors reported together.
///
/// The first collected error doubles as the single inner exception, so the
/// two views share an instance; the serializer writes it once.
#[derive(Clone)]
pub struct AggregateError {
    message: String,
    inner: Option<Arc<dyn Trace>>,
    errors: Vec<Arc<dyn Trace>>,
}

impl AggregateError {
    pub fn new(message: impl Into<String>, errors: Vec<Arc<dyn Trace>>) -> Self {
        Self {
            message: message.into(),
            inner: errors.first().cloned(),
            errors,
        }
    }

    /// Replaces the single inner exception, which need not be collected.
    pub fn with_inner(mut self, inner: Option<Arc<dyn Trace>>) -> Self {
        self.inner = inner;
        self
    }

    #[inline]
    pub fn errors(&self) -> &[Arc<dyn Trace>] {
        &self.errors
    }
}

impl fmt::Debug for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateError")
            .field("message", &self.message)
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}

impl Exception for AggregateError {
    #[inline]
    fn message(&self) -> FieldResult<String> {
        Ok(self.message.clone())
    }

    #[inline]
    fn inner_exception(&self) -> FieldResult<Option<&dyn Trace>> {
        Ok(self.inner.as_deref())
    }

    #[inline]
    fn is_aggregate(&self) -> bool {
        true
    }

    fn inner_exceptions(&self) -> FieldResult<Vec<&dyn Trace>> {
        Ok(self.errors.iter().map(|error| &**error).collect())
    }
}

impl Described for AggregateError {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::plain::<Self>("td_trace::AggregateError", "AggregateError", Category::Exception)
        })
    }
}

impl Trace for AggregateError {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Exception(self)
    }

    fn render_text(&self) -> String {
        alloc::format!("{} ({} errors)", self.message, self.errors.len())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use core::fmt;

    use td_reflect::Trace;
    use td_reflect::ops::{Exception, TraceRef};

    use super::{AggregateError, ErrorReport};

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inner failed")
        }
    }

    impl core::error::Error for Outer {
        fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl core::error::Error for Inner {}

    #[test]
    fn source_chain() {
        let report = ErrorReport::new(&Outer(Inner));
        assert_eq!(report.message(), "outer failed");
        assert!(report.exception_type().unwrap().ends_with("::Outer"));

        let inner = report.inner().unwrap();
        let TraceRef::Exception(inner) = inner.trace_ref() else {
            panic!("the cause is not an exception");
        };
        assert_eq!(inner.message().unwrap(), "inner failed");
        assert_eq!(inner.exception_type(), None);
        assert!(inner.inner_exception().unwrap().is_none());
    }

    #[test]
    fn builders() {
        let report = ErrorReport::new(&Inner)
            .with_type_name("app::Failure")
            .with_target_site("load")
            .with_stack_trace("frame 0");
        assert_eq!(report.exception_type().as_deref(), Some("app::Failure"));
        assert_eq!(report.target_site().unwrap().as_deref(), Some("load"));
        assert_eq!(report.stack_trace().unwrap().as_deref(), Some("frame 0"));
        assert_eq!(report.render_text(), "app::Failure: inner failed");
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn capture_keeps_the_message() {
        let report = ErrorReport::capture(&Inner);
        assert_eq!(report.message(), "inner failed");
    }

    #[test]
    fn aggregate_shares_the_first_error() {
        let first: Arc<dyn Trace> = Arc::new(ErrorReport::new(&Inner));
        let second: Arc<dyn Trace> = Arc::new(ErrorReport::new(&Inner));
        let aggregate = AggregateError::new("two failures", vec![first.clone(), second]);

        assert!(aggregate.is_aggregate());
        let inner = aggregate.inner_exception().unwrap().unwrap();
        let all = aggregate.inner_exceptions().unwrap();
        assert_eq!(all.len(), 2);
        assert!(core::ptr::addr_eq(inner, all[0]));
        assert!(core::ptr::addr_eq(inner, &*first));
        assert_eq!(aggregate.render_text(), String::from("two failures (2 errors)"));
    }
}
