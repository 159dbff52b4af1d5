use alloc::string::{FromUtf8Error, String, ToString};
use core::fmt::Display;

use thiserror::Error;

// -----------------------------------------------------------------------------
// TraceError

/// Failures that surface to callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraceError {
    #[error("`{type_name}` is write-only and cannot be read back from a document")]
    NotSupported { type_name: &'static str },

    #[error("failed to render trace document: {0}")]
    Render(String),

    #[error("rendered trace document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

// -----------------------------------------------------------------------------
// StructuralError

/// A failed structural serialization attempt.
///
/// Never surfaces past the engine: the attempt is discarded, the cached
/// contract is evicted and the value is rendered another way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("`{0}` has no structural contract")]
    NoContract(String),

    #[error("dictionary keys must be scalar, found {0}")]
    CompositeKey(&'static str),

    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for StructuralError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
