//! Type descriptors: classification and naming of runtime types.
//!
//! ## Menu
//!
//! - [`Category`]: closed set of type categories, used for dispatch.
//! - [`PrimitiveKind`]: the primitive type codes and their display keywords.
//! - [`TypeForm`]: the structure a display name is rendered from.
//! - [`TypeDesc`]: the descriptor itself, a pure function of the type.
//!     - [`TypeDesc::classify`]: the [`Category`].
//!     - [`TypeDesc::display_name`]: canonical display name, e.g. `alloc::vec::Vec<int>`.
//!     - [`TypeDesc::tag_name`]: element tag name, e.g. `Vec`.
//! - [`Described`]: static access to the descriptor of a declared type.
//! - [`NonGenericDescCell`], [`GenericDescCell`]: static storage for descriptors.
//! - [`strip_arity_marker`]: removes trailing generic arity markers (`` `2 ``).

// -----------------------------------------------------------------------------
// Modules

mod category;
mod described;
mod names;
mod primitive;
mod type_desc;

// -----------------------------------------------------------------------------
// Exports

pub use category::Category;
pub use described::{Described, GenericDescCell, NonGenericDescCell};
pub use names::{ANY_TAG, ARITY_MARKER, ArrayTagStyle, OBJECT_NAME, strip_arity_marker};
pub use primitive::PrimitiveKind;
pub use type_desc::{TypeDesc, TypeForm};
