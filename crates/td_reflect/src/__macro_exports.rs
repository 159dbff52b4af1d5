//! Paths used by the exported registration macros.

pub use alloc::string::{String, ToString};
pub use alloc::vec::Vec;
pub use core::option::Option;

pub use bitflags;
pub use erased_serde;
