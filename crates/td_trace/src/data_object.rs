use alloc::string::String;
use core::fmt;

use serde::de::{Deserialize, Deserializer, Error as _};
use td_reflect::info::NonGenericDescCell;
use td_reflect::ops::TraceRef;
use td_reflect::{Described, Trace, TypeDesc};

use crate::TraceError;
use crate::TraceSerializer;
use crate::document::{DocWriter, Document};

// -----------------------------------------------------------------------------
// TraceDataObject

/// The write-only rendering of one serialization pass.
///
/// The document is built once, when the object is created, and owned from
/// then on. Tracing the object again embeds that document instead of
/// serializing the value a second time.
///
/// # Examples
///
/// ```
/// use td_trace::TraceDataObject;
///
/// let data = TraceDataObject::new(Some(&vec![1_i32, 2, 3]));
/// let first = data.render().unwrap();
///
/// assert!(first.starts_with(r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#));
/// assert!(first.contains("<TraceData "));
/// assert_eq!(data.render().unwrap(), first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceDataObject {
    document: Document,
    indent: usize,
}

const TYPE_PATH: &str = "td_trace::TraceDataObject";

impl TraceDataObject {
    /// Serializes `value` with the [shared](TraceSerializer::shared) serializer.
    #[inline]
    pub fn new(value: Option<&dyn Trace>) -> Self {
        TraceSerializer::shared().wrap(value)
    }

    #[inline]
    pub(crate) const fn from_parts(document: Document, indent: usize) -> Self {
        Self { document, indent }
    }

    /// The materialized document.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Renders the document as text.
    ///
    /// Rendering the same object twice yields identical text.
    #[inline]
    pub fn render(&self) -> Result<String, TraceError> {
        self.document.render(self.indent)
    }

    /// Copies the root attributes and children into the element currently
    /// open in `out`.
    pub fn write_into(&self, out: &mut DocWriter) {
        let root = self.document.root();
        for attribute in root.attributes() {
            out.attribute(attribute.name.as_str(), attribute.value.as_str());
        }
        out.append(root.children().to_vec());
    }

    /// Always fails: a trace document cannot be turned back into an object.
    pub fn read_from(_document: &Document) -> Result<Self, TraceError> {
        Err(TraceError::NotSupported {
            type_name: TYPE_PATH,
        })
    }
}

impl Default for TraceDataObject {
    /// The rendering of `null`.
    #[inline]
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Display for TraceDataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl<'de> Deserialize<'de> for TraceDataObject {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(D::Error::custom(TraceError::NotSupported {
            type_name: TYPE_PATH,
        }))
    }
}

// -----------------------------------------------------------------------------
// Trace

impl Described for TraceDataObject {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericDescCell = NonGenericDescCell::new();
        CELL.get_or_init(|| TypeDesc::opaque::<Self>(TYPE_PATH, "TraceData"))
    }
}

impl Trace for TraceDataObject {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Opaque
    }

    fn render_text(&self) -> String {
        self.render().unwrap_or_else(|error| {
            log::warn!("{error}");
            String::from(TYPE_PATH)
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use td_reflect::Trace;

    use super::TraceDataObject;
    use crate::document::{DocWriter, Document, ROOT_NAME};
    use crate::{TraceError, TraceSerializer};

    #[test]
    fn null_document() {
        let data = TraceDataObject::default();
        let any = data.document().root().child("Any").unwrap();
        assert_eq!(any.attribute("type"), Some("object"));
        assert!(any.is_empty());
    }

    #[test]
    fn render_is_idempotent() {
        let data = TraceDataObject::new(Some(&vec![vec![1_u8, 2], vec![3]]));
        let first = data.render().unwrap();
        let second = data.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(data.to_string(), first);
    }

    #[test]
    fn embedding_copies_the_document() {
        let inner = TraceDataObject::new(Some(&7_i32));

        let mut out = DocWriter::new();
        out.start_element(ROOT_NAME);
        inner.write_into(&mut out);
        out.end_element();
        let nodes = out.into_nodes();
        let embedded = Document::with_children(nodes);

        let copy = embedded.root().child(ROOT_NAME).unwrap();
        assert_eq!(copy.attributes(), inner.document().root().attributes());
        assert_eq!(copy.children(), inner.document().root().children());
    }

    #[test]
    fn tracing_a_data_object_embeds_it() {
        let serializer = TraceSerializer::default();
        let inner = TraceDataObject::new(Some(&"text"));
        let outer = serializer.to_document(Some(&inner as &dyn Trace));

        let copy = outer.root().child(ROOT_NAME).unwrap();
        assert_eq!(copy.children(), inner.document().root().children());
    }

    #[test]
    fn read_back_is_not_supported() {
        let data = TraceDataObject::new(Some(&1_i32));
        let error = TraceDataObject::read_from(data.document()).unwrap_err();
        assert!(matches!(error, TraceError::NotSupported { .. }));
    }

    #[test]
    fn deserialize_is_not_supported() {
        use serde::de::IntoDeserializer;
        use serde::de::value::Error;

        let deserializer: serde::de::value::StrDeserializer<'_, Error> = "<TraceData/>".into_deserializer();
        let error = <TraceDataObject as serde::Deserialize>::deserialize(deserializer).unwrap_err();
        assert!(error.to_string().contains("write-only"));
    }
}
