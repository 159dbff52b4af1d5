#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Doc tests name the crate `td_trace`.
extern crate self as td_trace;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod contract;
mod data_object;
mod database;
mod engine;
mod error;
mod gate;
mod records;
mod report;

pub mod document;
pub mod ser;
pub mod sink;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::{DEFAULT_INDENT, DEFAULT_MAX_DEPTH, TraceConfig};
pub use contract::{Contract, ContractCache, StructuralPlan};
pub use data_object::TraceDataObject;
pub use database::{DbErrorRecord, DbException};
pub use engine::{ANY_NAME, COUNT_ATTRIBUTE, DATABASE_ERROR_NAME, INNER_EXCEPTION_NAME, TYPE_ATTRIBUTE};
pub use engine::TraceSerializer;
pub use error::{StructuralError, TraceError};
pub use gate::{TracePayload, ensure_serializable, ensure_serializable_with, is_primitive_like};
pub use records::{DETAIL_MAX_DEPTH, DETAIL_MAX_INNER, ExceptionDetail, MessageAndDetail};
pub use report::{AggregateError, ErrorReport};
pub use sink::{TraceLevel, log_payload};
