use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::OnceLock;

use super::{ANY_TAG, ArrayTagStyle, Category, OBJECT_NAME, PrimitiveKind, strip_arity_marker};

// -----------------------------------------------------------------------------
// TypeForm

/// The structure of a type, as far as naming is concerned.
#[derive(Debug, Clone)]
pub enum TypeForm {
    /// A named type without type arguments.
    Plain,
    /// The universal type: `dyn Trace` and its owning pointers.
    Object,
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// An array of `element`, nested `rank` times.
    Array {
        element: &'static TypeDesc,
        rank: usize,
    },
    /// A generic type instantiated with `args`.
    Generic { args: Vec<&'static TypeDesc> },
    /// `Option<T>`, a single level of optionality around `T`.
    Optional(&'static TypeDesc),
}

// -----------------------------------------------------------------------------
// TypeDesc

/// Descriptor of a runtime type.
///
/// Descriptors are derived from the type alone, never from a value, and are
/// stored in static cells (see [`NonGenericDescCell`] and [`GenericDescCell`]),
/// so a `&'static TypeDesc` can be shared freely between threads.
///
/// The display name is computed on first use and then reused.
///
/// # Examples
///
/// ```
/// use td_reflect::{Described, info::{ArrayTagStyle, Category}};
///
/// let desc = <Vec<i32>>::type_desc();
/// assert_eq!(desc.category(), Category::Collection);
/// assert_eq!(desc.display_name(), "alloc::vec::Vec<int>");
/// assert_eq!(desc.tag_name(ArrayTagStyle::Legacy), "Vec");
///
/// let desc = <[i32; 3]>::type_desc();
/// assert_eq!(desc.display_name(), "int[]");
/// assert_eq!(desc.tag_name(ArrayTagStyle::Legacy), "ArrayOf32");
/// ```
///
/// [`NonGenericDescCell`]: crate::info::NonGenericDescCell
/// [`GenericDescCell`]: crate::info::GenericDescCell
pub struct TypeDesc {
    type_id: TypeId,
    type_path: &'static str,
    type_ident: &'static str,
    category: Category,
    form: TypeForm,
    display: OnceLock<String>,
}

impl TypeDesc {
    /// Creates a descriptor from its parts.
    ///
    /// `type_path` and `type_ident` may carry an arity marker (``Pair`2``);
    /// it is stripped whenever a name is rendered.
    pub fn new<T: ?Sized + 'static>(
        type_path: &'static str,
        type_ident: &'static str,
        category: Category,
        form: TypeForm,
    ) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_ident,
            category,
            form,
            display: OnceLock::new(),
        }
    }

    /// Descriptor of a primitive type.
    #[inline]
    pub fn primitive<T: ?Sized + 'static>(
        type_path: &'static str,
        type_ident: &'static str,
        kind: PrimitiveKind,
    ) -> Self {
        Self::new::<T>(type_path, type_ident, Category::Primitive, TypeForm::Primitive(kind))
    }

    /// Descriptor of a non-generic type with the given category.
    #[inline]
    pub fn plain<T: ?Sized + 'static>(
        type_path: &'static str,
        type_ident: &'static str,
        category: Category,
    ) -> Self {
        Self::new::<T>(type_path, type_ident, category, TypeForm::Plain)
    }

    /// Descriptor of an opaque, non-generic type.
    #[inline]
    pub fn opaque<T: ?Sized + 'static>(type_path: &'static str, type_ident: &'static str) -> Self {
        Self::plain::<T>(type_path, type_ident, Category::Opaque)
    }

    /// Descriptor of a generic type.
    #[inline]
    pub fn generic<T: ?Sized + 'static>(
        type_path: &'static str,
        type_ident: &'static str,
        category: Category,
        args: Vec<&'static TypeDesc>,
    ) -> Self {
        Self::new::<T>(type_path, type_ident, category, TypeForm::Generic { args })
    }

    /// Descriptor of an array type with the given element.
    ///
    /// Arrays of arrays increase the rank instead of nesting.
    pub fn array<T: ?Sized + 'static>(element: &'static TypeDesc) -> Self {
        let form = match element.form {
            TypeForm::Array { element, rank } => TypeForm::Array { element, rank: rank + 1 },
            _ => TypeForm::Array { element, rank: 1 },
        };
        Self::new::<T>("[]", "Array", Category::Array, form)
    }

    /// Descriptor of `Option<T>`, classified like `T`.
    pub fn optional<T: ?Sized + 'static>(inner: &'static TypeDesc) -> Self {
        Self::new::<T>(
            "core::option::Option`1",
            "Option`1",
            inner.category,
            TypeForm::Optional(inner),
        )
    }

    /// Descriptor of the universal type.
    #[inline]
    pub fn object<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(OBJECT_NAME, OBJECT_NAME, Category::Opaque, TypeForm::Object)
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if `T` is the described type.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The registered path, possibly carrying an arity marker.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The registered simple name, possibly carrying an arity marker.
    #[inline]
    pub const fn type_ident(&self) -> &'static str {
        self.type_ident
    }

    /// Returns the [`Category`] of the type.
    #[inline]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Same as [`category`](Self::category).
    #[inline]
    pub const fn classify(&self) -> Category {
        self.category
    }

    /// Returns the [`TypeForm`] of the type.
    #[inline]
    pub const fn form(&self) -> &TypeForm {
        &self.form
    }

    /// Returns `true` for the universal type.
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self.form, TypeForm::Object)
    }

    /// Returns the primitive kind, if the type is primitive.
    #[inline]
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.form {
            TypeForm::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns `true` if the type is primitive after removing every array
    /// level and then at most one level of `Option`.
    ///
    /// ```
    /// use td_reflect::Described;
    ///
    /// assert!(<[[Option<u8>; 2]; 2]>::type_desc().is_primitive_like());
    /// assert!(<Option<f64>>::type_desc().is_primitive_like());
    /// assert!(!<Option<Option<f64>>>::type_desc().is_primitive_like());
    /// assert!(!<String>::type_desc().is_primitive_like());
    /// ```
    pub fn is_primitive_like(&self) -> bool {
        let base = match self.form {
            TypeForm::Array { element, .. } => element,
            _ => self,
        };
        let base = match base.form {
            TypeForm::Optional(inner) => inner,
            _ => base,
        };
        base.primitive_kind().is_some()
    }

    /// The canonical display name, used for `type` attributes.
    ///
    /// - primitives use their keyword, e.g. `int`, `ulong`, `DateTime`;
    /// - arrays use the element name followed by one `[]` per rank;
    /// - generic types use `Path<Arg1, Arg2>`, arguments rendered recursively;
    /// - the universal type is `object`;
    /// - all other types use their path.
    ///
    /// Arity markers are removed in every case.
    pub fn display_name(&self) -> &str {
        self.display.get_or_init(|| self.render_display_name())
    }

    fn render_display_name(&self) -> String {
        match &self.form {
            TypeForm::Object => String::from(OBJECT_NAME),
            TypeForm::Primitive(kind) => String::from(kind.keyword()),
            TypeForm::Array { element, rank } => {
                let mut name = String::from(element.display_name());
                for _ in 0..*rank {
                    name.push_str("[]");
                }
                name
            }
            TypeForm::Optional(inner) => {
                alloc::format!("{}<{}>", strip_arity_marker(self.type_path), inner.display_name())
            }
            TypeForm::Generic { args } => {
                let mut name = String::from(strip_arity_marker(self.type_path));
                name.push('<');
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        name.push_str(", ");
                    }
                    name.push_str(arg.display_name());
                }
                name.push('>');
                name
            }
            TypeForm::Plain => String::from(strip_arity_marker(self.type_path)),
        }
    }

    /// The element tag name used for values of this type.
    ///
    /// The universal type renders as `Any`; arrays derive their tag from the
    /// element tag according to `style`; other types use their simple name.
    pub fn tag_name(&self, style: ArrayTagStyle) -> String {
        match &self.form {
            TypeForm::Object => String::from(ANY_TAG),
            TypeForm::Array { element, .. } => style.array_tag(&element.tag_name(style)),
            _ => String::from(strip_arity_marker(self.type_ident)),
        }
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc")
            .field("type_path", &self.type_path)
            .field("category", &self.category)
            .field("form", &self.form)
            .finish()
    }
}

impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{TypeDesc, TypeForm};
    use crate::info::{ArrayTagStyle, Category, PrimitiveKind};

    struct Pair;
    struct Outer;

    fn leak(desc: TypeDesc) -> &'static TypeDesc {
        alloc::boxed::Box::leak(alloc::boxed::Box::new(desc))
    }

    #[test]
    fn generic_names_strip_markers() {
        let int = leak(TypeDesc::primitive::<i32>("i32", "i32", PrimitiveKind::Int32));
        let text = leak(TypeDesc::opaque::<str>("alloc::string::String", "String"));
        let pair = TypeDesc::generic::<Pair>("demo::Pair`2", "Pair`2", Category::Opaque, vec![int, text]);

        assert_eq!(pair.display_name(), "demo::Pair<int, alloc::string::String>");
        assert_eq!(pair.tag_name(ArrayTagStyle::Legacy), "Pair");
    }

    #[test]
    fn nested_generic_arguments() {
        let long = leak(TypeDesc::primitive::<i64>("i64", "i64", PrimitiveKind::Int64));
        let inner = leak(TypeDesc::generic::<Pair>("demo::Inner`1", "Inner`1", Category::Opaque, vec![long]));
        let outer = TypeDesc::generic::<Outer>("demo::Outer`1`1", "Outer`1`1", Category::Opaque, vec![inner]);

        assert_eq!(outer.display_name(), "demo::Outer<demo::Inner<long>>");
        assert_eq!(outer.tag_name(ArrayTagStyle::FullName), "Outer");
    }

    #[test]
    fn array_rank_accumulates() {
        let byte = leak(TypeDesc::primitive::<u8>("u8", "u8", PrimitiveKind::Byte));
        let one = leak(TypeDesc::array::<[u8; 1]>(byte));
        let two = TypeDesc::array::<[[u8; 1]; 1]>(one);

        assert!(matches!(two.form(), TypeForm::Array { rank: 2, .. }));
        assert_eq!(two.display_name(), "byte[][]");
        assert_eq!(two.tag_name(ArrayTagStyle::Legacy), "ArrayOfu8");
        assert_eq!(two.category(), Category::Array);
    }

    #[test]
    fn object_names() {
        let object = TypeDesc::object::<dyn core::any::Any>();
        assert!(object.is_object());
        assert_eq!(object.display_name(), "object");
        assert_eq!(object.tag_name(ArrayTagStyle::Legacy), "Any");
    }

    #[test]
    fn optional_follows_inner() {
        let float = leak(TypeDesc::primitive::<f32>("f32", "f32", PrimitiveKind::Single));
        let optional = TypeDesc::optional::<Option<f32>>(float);

        assert_eq!(optional.category(), Category::Primitive);
        assert_eq!(optional.display_name(), "core::option::Option<float>");
        assert_eq!(optional.tag_name(ArrayTagStyle::Legacy), "Option");
        assert!(optional.is_primitive_like());
        assert!(optional.primitive_kind().is_none());
    }
}
