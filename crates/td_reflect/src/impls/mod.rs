//! [`Trace`] and [`Described`] implementations for std types, and the
//! registration macros.
//!
//! ## Implemented Menu
//!
//! - primitives:
//!     - `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `()` (`Empty`), [`DbNull`] (`DBNull`)
//!     - `chrono::DateTime<Utc>`, `std::time::SystemTime` (`DateTime`)
//! - text: `String`, `&'static str`, `Box<str>`, `Cow<'static, str>`
//! - arrays: `[T; N]`, `Box<[T]>`
//! - collections: `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`, `HashSet<T, S>`
//! - dictionaries: `BTreeMap<K, V>`, `HashMap<K, V, S>`
//! - wrappers: `Option<T>`, `Box<dyn Trace>`, `Arc<dyn Trace>`
//!
//! ## Macros
//!
//! - [`impl_trace_opaque!`](crate::impl_trace_opaque)
//! - [`impl_trace_enum!`](crate::impl_trace_enum)
//! - [`impl_trace_flags!`](crate::impl_trace_flags)
//!
//! [`Trace`]: crate::Trace
//! [`Described`]: crate::Described

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod macros;
mod maps;
mod primitive;
mod text;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

pub use primitive::DbNull;
