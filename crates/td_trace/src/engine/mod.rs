//! The serializer engine.
//!
//! Given any value and a [`DocWriter`], the engine picks a strategy, first
//! match wins:
//!
//! 1. null: an empty `Any` element;
//! 2. a [`TraceDataObject`]: its content, embedded;
//! 3. exceptions, database exceptions included;
//! 4. database error records;
//! 5. enums;
//! 6. a structural serialization attempt through the contract cache;
//! 7. enumerables: element by element within the depth budget;
//! 8. anything else: the value's text rendering in a CDATA section.
//!
//! Failures of field accessors and structural attempts are contained;
//! only a panicking text rendering escapes.

// -----------------------------------------------------------------------------
// Modules

mod exception;
mod structural;

pub(crate) use exception::inner_exceptions;
pub use exception::{DATABASE_ERROR_NAME, INNER_EXCEPTION_NAME};

use alloc::string::{String, ToString};

use td_reflect::ops::{Dictionary, EnumValue, Sequence, TraceRef};
use td_reflect::{Trace, TypeDesc};

use crate::config::TraceConfig;
use crate::contract::ContractCache;
use crate::data_object::TraceDataObject;
use crate::document::{DocWriter, Document, ROOT_NAME};

/// Attribute holding the display name of an element's type.
pub const TYPE_ATTRIBUTE: &str = "type";
/// Attribute holding the number of collapsed elements.
pub const COUNT_ATTRIBUTE: &str = "Count";
/// Tag of `null` and of the universal type.
pub const ANY_NAME: &str = td_reflect::info::ANY_TAG;

// -----------------------------------------------------------------------------
// TraceSerializer

/// Renders arbitrary [`Trace`] values into documents.
///
/// A serializer owns its [`ContractCache`]; share one instance to share
/// what it learns. [`TraceSerializer::shared`] is the process-wide default.
///
/// # Examples
///
/// ```
/// use td_trace::{TraceConfig, TraceSerializer};
///
/// let serializer = TraceSerializer::new(TraceConfig::new());
/// let document = serializer.to_document(Some(&vec![1_i32, 2]));
///
/// let list = document.root().child("Vec").unwrap();
/// assert_eq!(list.attribute("type"), Some("alloc::vec::Vec<int>"));
/// assert_eq!(list.children_named("i32").count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TraceSerializer {
    config: TraceConfig,
    contracts: ContractCache,
}

static SHARED: TraceSerializer = TraceSerializer::new(TraceConfig::new());

impl TraceSerializer {
    /// Creates a serializer with an empty contract cache.
    #[inline]
    pub const fn new(config: TraceConfig) -> Self {
        Self {
            config,
            contracts: ContractCache::new(),
        }
    }

    /// The process-wide serializer with the default configuration.
    #[inline]
    pub fn shared() -> &'static TraceSerializer {
        &SHARED
    }

    #[inline]
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    #[inline]
    pub fn contracts(&self) -> &ContractCache {
        &self.contracts
    }

    /// Serializes `value` with the configured depth budget.
    #[inline]
    pub fn serialize(&self, out: &mut DocWriter, value: Option<&dyn Trace>) {
        self.serialize_with_depth(out, value, self.config.max_depth);
    }

    /// Serializes `value` with the given depth budget.
    pub fn serialize_with_depth(&self, out: &mut DocWriter, value: Option<&dyn Trace>, max_depth: i32) {
        let Some(value) = value else {
            self.write_null(out);
            return;
        };

        let shape = value.trace_ref();
        log::trace!(
            "serializing `{}` as {}",
            value.trace_desc().display_name(),
            shape.kind_name()
        );

        if let TraceRef::Null = shape {
            self.write_null(out);
            return;
        }
        if let Some(data) = value.downcast_ref::<TraceDataObject>() {
            out.start_element(ROOT_NAME);
            data.write_into(out);
            out.end_element();
            return;
        }

        match shape {
            TraceRef::Exception(exception) => {
                let name = self.exception_tag(value, exception);
                self.write_exception(out, &name, value, exception, max_depth);
            }
            TraceRef::DatabaseError(record) => self.write_database_error(out, record),
            TraceRef::Enum(member) => self.write_enum(out, value.trace_desc(), member),
            _ => {
                if self.try_structural(out, value) {
                    return;
                }
                match shape {
                    TraceRef::Sequence(sequence) => self.walk_sequence(out, value, sequence, max_depth),
                    TraceRef::Dictionary(dictionary) => {
                        self.walk_dictionary(out, value, dictionary, max_depth);
                    }
                    _ => self.write_fallback(out, value),
                }
            }
        }
    }

    /// Builds a complete document for `value`.
    pub fn to_document(&self, value: Option<&dyn Trace>) -> Document {
        let mut out = DocWriter::new();
        self.serialize(&mut out, value);
        Document::with_children(out.into_nodes())
    }

    /// Builds a [`TraceDataObject`] for `value`.
    #[inline]
    pub fn wrap(&self, value: Option<&dyn Trace>) -> TraceDataObject {
        TraceDataObject::from_parts(self.to_document(value), self.config.indent)
    }

    // -------------------------------------------------------------------------
    // Elements

    #[inline]
    fn tag_name(&self, desc: &TypeDesc) -> String {
        desc.tag_name(self.config.array_tags)
    }

    /// Opens the element of a value of type `desc`, with its `type` attribute.
    fn start_typed(&self, out: &mut DocWriter, desc: &TypeDesc) {
        out.start_element(self.tag_name(desc));
        out.attribute(TYPE_ATTRIBUTE, desc.display_name());
    }

    fn write_null(&self, out: &mut DocWriter) {
        out.start_element(ANY_NAME);
        out.attribute(TYPE_ATTRIBUTE, td_reflect::info::OBJECT_NAME);
        out.end_element();
    }

    /// Single members are named for the member. Flag combinations and
    /// undeclared values use the enum's tag, combinations also list their
    /// members in a `Flags` attribute.
    fn write_enum(&self, out: &mut DocWriter, desc: &TypeDesc, member: &dyn EnumValue) {
        let name = member.variant_name();
        match name {
            Some(name) => out.start_element(name),
            None => out.start_element(self.tag_name(desc)),
        }
        out.attribute("Value", member.underlying().to_string());
        out.attribute("Type", desc.display_name());
        if name.is_none()
            && let Some(flags) = member.flag_names()
            && !flags.is_empty()
        {
            out.attribute("Flags", flags.join(", "));
        }
        out.end_element();
    }

    fn write_fallback(&self, out: &mut DocWriter, value: &dyn Trace) {
        self.start_typed(out, value.trace_desc());
        out.cdata(value.render_text());
        out.end_element();
    }

    // -------------------------------------------------------------------------
    // Enumerables

    fn walk_sequence(&self, out: &mut DocWriter, value: &dyn Trace, sequence: &dyn Sequence, max_depth: i32) {
        self.start_typed(out, value.trace_desc());
        if max_depth < 1 {
            out.attribute(COUNT_ATTRIBUTE, sequence.len().to_string());
        } else {
            for item in sequence.iter() {
                self.serialize_with_depth(out, Some(item), max_depth - 1);
            }
        }
        out.end_element();
    }

    fn walk_dictionary(
        &self,
        out: &mut DocWriter,
        value: &dyn Trace,
        dictionary: &dyn Dictionary,
        max_depth: i32,
    ) {
        self.start_typed(out, value.trace_desc());
        if max_depth < 1 {
            out.attribute(COUNT_ATTRIBUTE, dictionary.len().to_string());
        } else {
            for (key, item) in dictionary.iter() {
                out.start_element(crate::ser::ENTRY_NAME);
                self.serialize_with_depth(out, Some(key), max_depth - 1);
                self.serialize_with_depth(out, Some(item), max_depth - 1);
                out.end_element();
            }
        }
        out.end_element();
    }
}
