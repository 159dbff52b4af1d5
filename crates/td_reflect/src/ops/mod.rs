//! Value shapes, discovered at the call site.
//!
//! ## Menu
//!
//! - [`TraceRef`]: the shape visitor returned by [`Trace::trace_ref`].
//! - [`PrimitiveValue`]: a copied primitive.
//! - [`Sequence`]: arrays and collections, e.g. `Vec<T>`, `[T; N]`.
//! - [`Dictionary`]: key/value collections, e.g. `BTreeMap<K, V>`.
//! - [`EnumValue`]: members of C-like enums and flag sets.
//! - [`Exception`], [`DatabaseException`]: error values with best-effort accessors.
//! - [`DatabaseError`]: the error detail records of a database exception.
//! - [`best_effort`]: turns an accessor that may fail or panic into an `Option`.
//!
//! [`Trace::trace_ref`]: crate::Trace::trace_ref

// -----------------------------------------------------------------------------
// Modules

mod enum_value;
mod exception;
mod sequence;
mod trace_ref;

// -----------------------------------------------------------------------------
// Exports

pub use enum_value::EnumValue;
pub use exception::{DatabaseError, DatabaseException, Exception};
pub use exception::{FieldError, FieldResult, best_effort};
pub use sequence::{Dictionary, Sequence};
pub use trace_ref::{PrimitiveValue, TraceRef};
