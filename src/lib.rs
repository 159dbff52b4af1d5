#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use td_reflect as reflect;
pub use td_trace as trace;
pub use td_utils as utils;

pub use td_reflect::{Described, Trace};
pub use td_trace::{TraceConfig, TraceDataObject, TracePayload, TraceSerializer};
pub use td_trace::ensure_serializable;
