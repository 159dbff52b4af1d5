#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Macros expand to `$crate::...`; doc tests name the crate `td_reflect`.
extern crate self as td_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod trace;

pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use info::{Described, TypeDesc};
pub use impls::DbNull;
pub use trace::Trace;
