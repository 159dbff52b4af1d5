use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::Trace;

// -----------------------------------------------------------------------------
// FieldError

/// The failure of a single field accessor.
///
/// Never fatal: the serializer omits the field and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value cannot provide the field.
    Unavailable { field: &'static str },
    /// Reading the field failed.
    Failed {
        field: &'static str,
        reason: Cow<'static, str>,
    },
}

impl FieldError {
    /// Shorthand for [`FieldError::Failed`].
    #[inline]
    pub fn failed(field: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Failed {
            field,
            reason: reason.into(),
        }
    }

    /// The name of the field.
    #[inline]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Unavailable { field } | Self::Failed { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { field } => write!(f, "field `{field}` is unavailable"),
            Self::Failed { field, reason } => write!(f, "reading field `{field}` failed: {reason}"),
        }
    }
}

impl core::error::Error for FieldError {}

/// The result of a field accessor.
pub type FieldResult<T> = Result<T, FieldError>;

/// Runs a field accessor, turning an error or a panic into `None`.
///
/// ```
/// use td_reflect::ops::{FieldError, best_effort};
///
/// assert_eq!(best_effort(|| Ok(3)), Some(3));
/// assert_eq!(best_effort::<i32>(|| Err(FieldError::Unavailable { field: "Line" })), None);
/// assert_eq!(best_effort::<i32>(|| panic!("accessor exploded")), None);
/// ```
pub fn best_effort<T>(accessor: impl FnOnce() -> FieldResult<T>) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(accessor)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(error)) => {
            log::trace!("field omitted: {error}");
            None
        }
        Err(_) => {
            log::trace!("field omitted: accessor panicked");
            None
        }
    }
}

// -----------------------------------------------------------------------------
// Exception

/// An error value.
///
/// Every accessor is best-effort: a failing accessor only loses its own
/// field. Accessors returning `Ok(None)` have nothing to report.
pub trait Exception {
    /// Overrides the `Type` attribute, which is otherwise the display
    /// name of the runtime type.
    #[inline]
    fn exception_type(&self) -> Option<String> {
        None
    }

    /// The message.
    fn message(&self) -> FieldResult<String>;

    /// The name of the component that raised the error.
    #[inline]
    fn source_name(&self) -> FieldResult<Option<String>> {
        Ok(None)
    }

    /// The operation that raised the error.
    #[inline]
    fn target_site(&self) -> FieldResult<Option<String>> {
        Ok(None)
    }

    #[inline]
    fn stack_trace(&self) -> FieldResult<Option<String>> {
        Ok(None)
    }

    /// The error that caused this one.
    #[inline]
    fn inner_exception(&self) -> FieldResult<Option<&dyn Trace>> {
        Ok(None)
    }

    /// Returns `true` for errors that collect several others.
    #[inline]
    fn is_aggregate(&self) -> bool {
        false
    }

    /// The collected errors of an aggregate.
    ///
    /// Only consulted when [`is_aggregate`](Exception::is_aggregate) is `true`.
    /// The collection may repeat [`inner_exception`](Exception::inner_exception).
    #[inline]
    fn inner_exceptions(&self) -> FieldResult<Vec<&dyn Trace>> {
        Ok(Vec::new())
    }

    /// The database specific view, for database client errors.
    #[inline]
    fn as_database(&self) -> Option<&dyn DatabaseException> {
        None
    }
}

// -----------------------------------------------------------------------------
// DatabaseException

/// An error raised by a relational database client.
pub trait DatabaseException: Exception {
    /// Severity of the error.
    fn class(&self) -> FieldResult<u8>;

    fn error_code(&self) -> FieldResult<i32>;

    fn state(&self) -> FieldResult<u8>;

    fn line_number(&self) -> FieldResult<i32>;

    fn number(&self) -> FieldResult<i32>;

    /// The stored procedure that raised the error.
    fn procedure(&self) -> FieldResult<Option<String>>;

    fn server(&self) -> FieldResult<Option<String>>;

    /// The error detail records reported by the server.
    fn errors(&self) -> FieldResult<Vec<&dyn DatabaseError>>;
}

// -----------------------------------------------------------------------------
// DatabaseError

/// One error detail record of a [`DatabaseException`].
pub trait DatabaseError {
    fn message(&self) -> FieldResult<String>;

    fn source_name(&self) -> FieldResult<Option<String>>;

    /// Severity of the error.
    fn class(&self) -> FieldResult<u8>;

    fn state(&self) -> FieldResult<u8>;

    fn line_number(&self) -> FieldResult<i32>;

    fn number(&self) -> FieldResult<i32>;

    fn procedure(&self) -> FieldResult<Option<String>>;

    fn server(&self) -> FieldResult<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::{FieldError, best_effort};

    #[test]
    fn field_error_display() {
        let error = FieldError::failed("Server", "connection reset");
        assert_eq!(error.field(), "Server");
        assert_eq!(
            alloc::format!("{error}"),
            "reading field `Server` failed: connection reset"
        );
    }

    #[test]
    fn best_effort_catches_panics() {
        let value: Option<i32> = best_effort(|| {
            let items: alloc::vec::Vec<i32> = alloc::vec::Vec::new();
            Ok(items[0])
        });
        assert_eq!(value, None);
    }
}
