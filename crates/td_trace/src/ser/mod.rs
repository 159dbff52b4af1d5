//! A serde [`Serializer`] that writes into a [`DocWriter`].
//!
//! ## Mapping
//!
//! | serde | document |
//! |-------|----------|
//! | scalars, strings, unit variants | text of the current element |
//! | byte buffers | lowercase hex text |
//! | `None` | `xsi:nil="true"` on the current element |
//! | struct fields | one child element per field |
//! | sequences and tuples | `Item` children |
//! | maps | `Entry` children with a `Key` attribute |
//! | newtype, tuple and struct variants | a child element named for the variant |
//!
//! Map keys must be scalar; anything else fails with
//! [`StructuralError::CompositeKey`].

// -----------------------------------------------------------------------------
// Modules

mod key;

// -----------------------------------------------------------------------------
// Exports

pub use key::KeySerializer;

use alloc::string::{String, ToString};
use core::fmt::Write as _;

use serde::ser::{self, Serialize, Serializer};

use crate::StructuralError;
use crate::document::DocWriter;

/// Element name of sequence items.
pub const ITEM_NAME: &str = "Item";
/// Element name of map entries.
pub const ENTRY_NAME: &str = "Entry";
/// Attribute carrying a map entry's key.
pub const KEY_ATTRIBUTE: &str = "Key";
/// Attribute marking a null value.
pub const NIL_ATTRIBUTE: &str = "xsi:nil";

/// Serializes `value` into the innermost open element of `out`.
///
/// # Examples
///
/// ```
/// use td_trace::document::{DocWriter, Node};
/// use td_trace::ser::to_writer;
///
/// #[derive(serde::Serialize)]
/// struct Login { user: &'static str, attempts: u8, origin: Option<String> }
///
/// let mut out = DocWriter::new();
/// out.start_element("Login");
/// to_writer(&mut out, &Login { user: "ann", attempts: 3, origin: None }).unwrap();
/// out.end_element();
///
/// let nodes = out.into_nodes();
/// let Node::Element(login) = &nodes[0] else { unreachable!() };
/// assert_eq!(login.child("user").map(|e| e.text()).as_deref(), Some("ann"));
/// assert_eq!(login.child("attempts").map(|e| e.text()).as_deref(), Some("3"));
/// assert_eq!(login.child("origin").and_then(|e| e.attribute("xsi:nil")), Some("true"));
/// ```
pub fn to_writer<T: ?Sized + Serialize>(out: &mut DocWriter, value: &T) -> Result<(), StructuralError> {
    value.serialize(&mut StructureSerializer::new(out))
}

// -----------------------------------------------------------------------------
// StructureSerializer

/// The structural serializer capability.
pub struct StructureSerializer<'w> {
    out: &'w mut DocWriter,
}

impl<'w> StructureSerializer<'w> {
    #[inline]
    pub fn new(out: &'w mut DocWriter) -> Self {
        Self { out }
    }

    fn scalar(&mut self, text: impl ToString) -> Result<(), StructuralError> {
        self.out.text(text.to_string());
        Ok(())
    }

    fn child<T: ?Sized + Serialize>(&mut self, name: &str, value: &T) -> Result<(), StructuralError> {
        self.out.start_element(name);
        let result = value.serialize(&mut *self);
        self.out.end_element();
        result
    }
}

/// State of a compound value; `close` tells whether `end` closes a variant element.
pub struct Compound<'a, 'w> {
    ser: &'a mut StructureSerializer<'w>,
    close: bool,
    key: Option<String>,
}

impl<'a, 'w> Compound<'a, 'w> {
    fn new(ser: &'a mut StructureSerializer<'w>, close: bool) -> Self {
        Self {
            ser,
            close,
            key: None,
        }
    }

    fn finish(self) -> Result<(), StructuralError> {
        if self.close {
            self.ser.out.end_element();
        }
        Ok(())
    }
}

impl<'a, 'w> Serializer for &'a mut StructureSerializer<'w> {
    type Ok = ();
    type Error = StructuralError;

    type SerializeSeq = Compound<'a, 'w>;
    type SerializeTuple = Compound<'a, 'w>;
    type SerializeTupleStruct = Compound<'a, 'w>;
    type SerializeTupleVariant = Compound<'a, 'w>;
    type SerializeMap = Compound<'a, 'w>;
    type SerializeStruct = Compound<'a, 'w>;
    type SerializeStructVariant = Compound<'a, 'w>;

    fn serialize_bool(self, v: bool) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_i128(self, v: i128) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_u128(self, v: u128) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_f32(self, v: f32) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_f64(self, v: f64) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<(), StructuralError> {
        self.scalar(v)
    }

    fn serialize_str(self, v: &str) -> Result<(), StructuralError> {
        self.out.text(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), StructuralError> {
        let mut hex = String::with_capacity(v.len() * 2);
        for byte in v {
            let _ = write!(hex, "{byte:02x}");
        }
        self.out.text(hex);
        Ok(())
    }

    fn serialize_none(self) -> Result<(), StructuralError> {
        self.out.attribute(NIL_ATTRIBUTE, "true");
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), StructuralError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), StructuralError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), StructuralError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), StructuralError> {
        self.out.text(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), StructuralError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), StructuralError> {
        self.child(variant, value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a, 'w>, StructuralError> {
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound<'a, 'w>, StructuralError> {
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a, 'w>, StructuralError> {
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a, 'w>, StructuralError> {
        self.out.start_element(variant);
        Ok(Compound::new(self, true))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a, 'w>, StructuralError> {
        Ok(Compound::new(self, false))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a, 'w>, StructuralError> {
        Ok(Compound::new(self, false))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a, 'w>, StructuralError> {
        self.out.start_element(variant);
        Ok(Compound::new(self, true))
    }
}

// -----------------------------------------------------------------------------
// Compound

impl ser::SerializeSeq for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), StructuralError> {
        self.ser.child(ITEM_NAME, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), StructuralError> {
        self.ser.child(ITEM_NAME, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), StructuralError> {
        self.ser.child(ITEM_NAME, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), StructuralError> {
        self.ser.child(ITEM_NAME, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), StructuralError> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), StructuralError> {
        let key = self.key.take().unwrap_or_default();
        self.ser.out.start_element(ENTRY_NAME);
        self.ser.out.attribute(KEY_ATTRIBUTE, key);
        let result = value.serialize(&mut *self.ser);
        self.ser.out.end_element();
        result
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StructuralError> {
        self.ser.child(key, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = StructuralError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StructuralError> {
        self.ser.child(key, value)
    }

    fn end(self) -> Result<(), StructuralError> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde::Serialize;

    use super::to_writer;
    use crate::StructuralError;
    use crate::document::{DocWriter, Element, Node};

    fn render<T: Serialize>(value: &T) -> Result<Element, StructuralError> {
        let mut out = DocWriter::new();
        out.start_element("Root");
        to_writer(&mut out, value)?;
        let mut nodes = out.into_nodes();
        match nodes.pop() {
            Some(Node::Element(root)) => Ok(root),
            _ => panic!("expected a root element"),
        }
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(u32),
        Rect { w: u32, h: u32 },
        Line(i8, i8),
    }

    #[test]
    fn sequences_become_items() {
        let root = render(&vec![1_u8, 2, 3]).unwrap();
        let items: Vec<String> = root.children_named("Item").map(Element::text).collect();
        assert_eq!(items, ["1", "2", "3"]);
    }

    #[test]
    fn maps_become_entries() {
        let mut map = BTreeMap::new();
        map.insert("a", 1_i32);
        map.insert("b", 2_i32);
        let root = render(&map).unwrap();
        let entries: Vec<(&str, String)> = root
            .children_named("Entry")
            .map(|e| (e.attribute("Key").unwrap_or_default(), e.text()))
            .collect();
        assert_eq!(entries, [("a", String::from("1")), ("b", String::from("2"))]);
    }

    #[test]
    fn composite_keys_fail() {
        let mut map = BTreeMap::new();
        map.insert(vec![1_u8], 1_i32);
        assert!(matches!(render(&map), Err(StructuralError::CompositeKey(_))));
    }

    #[test]
    fn variants() {
        let root = render(&vec![
            Shape::Empty,
            Shape::Circle(4),
            Shape::Rect { w: 2, h: 3 },
            Shape::Line(-1, 1),
        ])
        .unwrap();
        let items: Vec<&Element> = root.children_named("Item").collect();
        assert_eq!(items[0].text(), "Empty");
        assert_eq!(items[1].child("Circle").map(Element::text).as_deref(), Some("4"));
        let rect = items[2].child("Rect").unwrap();
        assert_eq!(rect.child("h").map(Element::text).as_deref(), Some("3"));
        let line = items[3].child("Line").unwrap();
        assert_eq!(line.children_named("Item").count(), 2);
    }

    #[test]
    fn bytes_are_hex() {
        struct Raw;
        impl Serialize for Raw {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_bytes(&[0x00, 0xab, 0x10])
            }
        }
        assert_eq!(render(&Raw).unwrap().text(), "00ab10");
    }

    #[test]
    fn custom_errors_propagate() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cannot serialize"))
            }
        }
        let error = render(&vec![Broken]).unwrap_err();
        assert_eq!(error, StructuralError::Custom(String::from("cannot serialize")));
    }
}
