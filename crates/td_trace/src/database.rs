//! Carriers for errors raised by relational database clients.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use td_reflect::info::{Category, NonGenericDescCell};
use td_reflect::ops::{DatabaseError, DatabaseException, Exception, FieldError, FieldResult, TraceRef};
use td_reflect::{Described, Trace, TypeDesc};

// -----------------------------------------------------------------------------
// DbErrorRecord

/// One error detail record reported by a database server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbErrorRecord {
    pub message: String,
    pub source_name: Option<String>,
    /// Severity of the error.
    pub class: u8,
    pub state: u8,
    pub line_number: i32,
    pub number: i32,
    pub procedure: Option<String>,
    pub server: Option<String>,
}

impl DbErrorRecord {
    pub fn new(number: i32, message: impl Into<String>) -> Self {
        Self {
            number,
            message: message.into(),
            ..Self::default()
        }
    }
}

impl DatabaseError for DbErrorRecord {
    fn message(&self) -> FieldResult<String> {
        Ok(self.message.clone())
    }

    fn source_name(&self) -> FieldResult<Option<String>> {
        Ok(self.source_name.clone())
    }

    fn class(&self) -> FieldResult<u8> {
        Ok(self.class)
    }

    fn state(&self) -> FieldResult<u8> {
        Ok(self.state)
    }

    fn line_number(&self) -> FieldResult<i32> {
        Ok(self.line_number)
    }

    fn number(&self) -> FieldResult<i32> {
        Ok(self.number)
    }

    fn procedure(&self) -> FieldResult<Option<String>> {
        Ok(self.procedure.clone())
    }

    fn server(&self) -> FieldResult<Option<String>> {
        Ok(self.server.clone())
    }
}

impl Described for DbErrorRecord {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::plain::<Self>("td_trace::DbErrorRecord", "DbErrorRecord", Category::DatabaseError)
        })
    }
}

impl Trace for DbErrorRecord {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::DatabaseError(self)
    }

    fn render_text(&self) -> String {
        alloc::format!("{}: {}", self.number, self.message)
    }
}

// -----------------------------------------------------------------------------
// DbException

/// An error raised by a database client.
///
/// Severity, state, line, number, procedure and server are those of the
/// first error record; without records they are unavailable.
///
/// # Examples
///
/// ```
/// use td_trace::{DbErrorRecord, DbException, TraceSerializer};
///
/// let mut record = DbErrorRecord::new(2627, "Violation of PRIMARY KEY constraint");
/// record.class = 14;
/// let error = DbException::new("insert failed", vec![record]).with_error_code(-2146232060);
///
/// let document = TraceSerializer::shared().to_document(Some(&error));
/// let element = document.root().child("DbException").unwrap();
/// assert_eq!(element.child("Class").unwrap().text(), "14");
/// assert_eq!(element.child("Number").unwrap().text(), "2627");
/// assert_eq!(element.children_named("Error").count(), 1);
/// ```
#[derive(Clone)]
pub struct DbException {
    message: String,
    source_name: Option<String>,
    error_code: i32,
    errors: Vec<DbErrorRecord>,
    stack_trace: Option<String>,
    inner: Option<Arc<dyn Trace>>,
}

impl DbException {
    pub fn new(message: impl Into<String>, errors: Vec<DbErrorRecord>) -> Self {
        Self {
            message: message.into(),
            source_name: None,
            error_code: 0,
            errors,
            stack_trace: None,
            inner: None,
        }
    }

    pub fn with_error_code(mut self, error_code: i32) -> Self {
        self.error_code = error_code;
        self
    }

    /// Names the client library that raised the error.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_inner(mut self, inner: Arc<dyn Trace>) -> Self {
        self.inner = Some(inner);
        self
    }

    #[inline]
    pub fn records(&self) -> &[DbErrorRecord] {
        &self.errors
    }

    fn first(&self, field: &'static str) -> FieldResult<&DbErrorRecord> {
        self.errors.first().ok_or(FieldError::Unavailable { field })
    }
}

impl fmt::Debug for DbException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbException")
            .field("message", &self.message)
            .field("error_code", &self.error_code)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Exception for DbException {
    fn message(&self) -> FieldResult<String> {
        Ok(self.message.clone())
    }

    fn source_name(&self) -> FieldResult<Option<String>> {
        Ok(self.source_name.clone())
    }

    fn stack_trace(&self) -> FieldResult<Option<String>> {
        Ok(self.stack_trace.clone())
    }

    fn inner_exception(&self) -> FieldResult<Option<&dyn Trace>> {
        Ok(self.inner.as_deref())
    }

    #[inline]
    fn as_database(&self) -> Option<&dyn DatabaseException> {
        Some(self)
    }
}

impl DatabaseException for DbException {
    fn class(&self) -> FieldResult<u8> {
        self.first("Class").map(|record| record.class)
    }

    fn error_code(&self) -> FieldResult<i32> {
        Ok(self.error_code)
    }

    fn state(&self) -> FieldResult<u8> {
        self.first("State").map(|record| record.state)
    }

    fn line_number(&self) -> FieldResult<i32> {
        self.first("LineNumber").map(|record| record.line_number)
    }

    fn number(&self) -> FieldResult<i32> {
        self.first("Number").map(|record| record.number)
    }

    fn procedure(&self) -> FieldResult<Option<String>> {
        self.first("Procedure").map(|record| record.procedure.clone())
    }

    fn server(&self) -> FieldResult<Option<String>> {
        self.first("Server").map(|record| record.server.clone())
    }

    fn errors(&self) -> FieldResult<Vec<&dyn DatabaseError>> {
        Ok(self.errors.iter().map(|record| record as &dyn DatabaseError).collect())
    }
}

impl Described for DbException {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| TypeDesc::plain::<Self>("td_trace::DbException", "DbException", Category::Exception))
    }
}

impl Trace for DbException {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Exception(self)
    }

    fn render_text(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use td_reflect::ops::{DatabaseException, FieldError};

    use super::{DbErrorRecord, DbException};

    #[test]
    fn fields_come_from_the_first_record() {
        let mut first = DbErrorRecord::new(547, "constraint");
        first.state = 1;
        first.line_number = 12;
        first.server = Some("db01".into());
        let error = DbException::new("failed", vec![first, DbErrorRecord::new(3621, "terminated")]);

        assert_eq!(error.number(), Ok(547));
        assert_eq!(error.state(), Ok(1));
        assert_eq!(error.line_number(), Ok(12));
        assert_eq!(error.server().unwrap().as_deref(), Some("db01"));
        assert_eq!(error.errors().unwrap().len(), 2);
    }

    #[test]
    fn no_records() {
        let error = DbException::new("failed", Vec::new());
        assert_eq!(error.class(), Err(FieldError::Unavailable { field: "Class" }));
        assert_eq!(error.error_code(), Ok(0));
        assert!(error.errors().unwrap().is_empty());
    }
}
