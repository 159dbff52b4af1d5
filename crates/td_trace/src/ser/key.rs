use alloc::string::{String, ToString};

use serde::ser::{Impossible, Serialize, Serializer};

use crate::StructuralError;

// -----------------------------------------------------------------------------
// KeySerializer

/// Renders a map key as attribute text. Only scalar keys are accepted.
pub struct KeySerializer;

type Never = Impossible<String, StructuralError>;

macro_rules! scalar_key {
    ($($method:ident: $ty:ty),+ $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<String, StructuralError> {
                Ok(v.to_string())
            }
        )+
    };
}

impl Serializer for KeySerializer {
    type Ok = String;
    type Error = StructuralError;

    type SerializeSeq = Never;
    type SerializeTuple = Never;
    type SerializeTupleStruct = Never;
    type SerializeTupleVariant = Never;
    type SerializeMap = Never;
    type SerializeStruct = Never;
    type SerializeStructVariant = Never;

    scalar_key! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, StructuralError> {
        Err(StructuralError::CompositeKey("bytes"))
    }

    fn serialize_none(self) -> Result<String, StructuralError> {
        Err(StructuralError::CompositeKey("none"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, StructuralError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, StructuralError> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String, StructuralError> {
        Ok(name.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, StructuralError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, StructuralError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, StructuralError> {
        Err(StructuralError::CompositeKey("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("tuple"))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Never, StructuralError> {
        Err(StructuralError::CompositeKey("struct variant"))
    }
}
