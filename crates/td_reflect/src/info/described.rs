//! Static access to type descriptors.
//!
//! ## NonGenericDescCell
//!
//! For non generic types. Internally an [`OnceLock`], almost no additional expenses.
//!
//! ## GenericDescCell
//!
//! If the type is generic, the `static CELL` inside the function is shared by
//! every instantiation, so the cell stores one descriptor per [`TypeId`] in a
//! [`TypeIdMap`] behind a [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use td_utils::TypeIdMap;

use super::TypeDesc;

// -----------------------------------------------------------------------------
// Described

/// A type with a statically known [`TypeDesc`].
///
/// This is the declared-type counterpart of
/// [`Trace::trace_desc`](crate::Trace::trace_desc), which reports the
/// runtime type of a value.
///
/// # Examples
///
/// ```
/// use td_reflect::{Described, info::{Category, NonGenericDescCell, TypeDesc}};
///
/// struct Probe;
///
/// impl Described for Probe {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: NonGenericDescCell = NonGenericDescCell::new();
///         CELL.get_or_init(|| TypeDesc::plain::<Self>("app::Probe", "Probe", Category::Opaque))
///     }
/// }
///
/// assert_eq!(Probe::type_desc().display_name(), "app::Probe");
/// ```
pub trait Described: 'static {
    /// Returns the descriptor of this type.
    fn type_desc() -> &'static TypeDesc;
}

// -----------------------------------------------------------------------------
// NonGenericDescCell

/// Container for static storage of a non-generic [`TypeDesc`].
pub struct NonGenericDescCell(OnceLock<TypeDesc>);

impl NonGenericDescCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, creating it with `f` on first use.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeDesc
    where
        F: FnOnce() -> TypeDesc,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescCell

/// Container for static storage of generic [`TypeDesc`]s.
///
/// # Examples
///
/// ```
/// use td_reflect::{Described, info::{Category, GenericDescCell, TypeDesc}};
///
/// struct Wrapper<T>(T);
///
/// impl<T: Described> Described for Wrapper<T> {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: GenericDescCell = GenericDescCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeDesc::generic::<Self>("app::Wrapper`1", "Wrapper`1", Category::Opaque, vec![T::type_desc()])
///         })
///     }
/// }
///
/// assert_eq!(<Wrapper<u16>>::type_desc().display_name(), "app::Wrapper<ushort>");
/// assert_eq!(<Wrapper<bool>>::type_desc().display_name(), "app::Wrapper<bool>");
/// ```
pub struct GenericDescCell(RwLock<TypeIdMap<&'static TypeDesc>>);

impl GenericDescCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, creating it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeDesc) -> &'static TypeDesc {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeDesc,
    ) -> &'static TypeDesc {
        match self.get_by_type_id(type_id) {
            Some(desc) => desc,
            // `f` may recurse into other cells, it must run outside the lock.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeDesc> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeDesc) -> &'static TypeDesc {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
