//! Registration macros for user types.

/// Implements [`Trace`] and [`Described`] for a plain, non-generic type.
///
/// The path is `module_path!()` followed by the type name. Options:
///
/// - `serialize`: the type implements `serde::Serialize`; its serde contract
///   is used for structural rendering.
/// - `display`: the text rendering uses `Display` instead of the type's
///   display name.
///
/// # Examples
///
/// ```
/// use td_reflect::{Described, Trace, impl_trace_opaque};
///
/// #[derive(serde::Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// impl core::fmt::Display for Point {
///     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         write!(f, "({}, {})", self.x, self.y)
///     }
/// }
///
/// impl_trace_opaque!(Point, serialize, display);
///
/// let point = Point { x: 1, y: 2 };
/// assert!(point.as_serialize().is_some());
/// assert_eq!(point.render_text(), "(1, 2)");
/// assert!(Point::type_desc().display_name().ends_with("::Point"));
/// ```
///
/// [`Trace`]: crate::Trace
/// [`Described`]: crate::Described
#[macro_export]
macro_rules! impl_trace_opaque {
    (@option serialize) => {
        #[inline]
        fn as_serialize(&self) -> $crate::__macro_exports::Option<&dyn $crate::__macro_exports::erased_serde::Serialize> {
            $crate::__macro_exports::Option::Some(self)
        }
    };
    (@option display) => {
        fn render_text(&self) -> $crate::__macro_exports::String {
            $crate::__macro_exports::ToString::to_string(self)
        }
    };
    ($ty:ident $(, $option:ident)* $(,)?) => {
        impl $crate::Described for $ty {
            fn type_desc() -> &'static $crate::TypeDesc {
                static CELL: $crate::info::NonGenericDescCell = $crate::info::NonGenericDescCell::new();
                CELL.get_or_init(|| {
                    $crate::TypeDesc::opaque::<$ty>(
                        ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty)),
                        ::core::stringify!($ty),
                    )
                })
            }
        }

        impl $crate::Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static $crate::TypeDesc {
                <Self as $crate::Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> $crate::ops::TraceRef<'_> {
                $crate::ops::TraceRef::Opaque
            }

            $( $crate::impl_trace_opaque!(@option $option); )*
        }
    };
}

/// Implements [`Trace`], [`Described`] and [`EnumValue`] for a C-like enum.
///
/// The enum is rendered as an element named for the member, carrying the
/// integral value. List every member with the representation type.
///
/// # Examples
///
/// ```
/// use td_reflect::{Described, Trace, impl_trace_enum, info::Category, ops::TraceRef};
///
/// #[repr(u8)]
/// enum Level { Low = 1, High = 9 }
///
/// impl_trace_enum!(Level: u8 { Low, High });
///
/// assert_eq!(Level::type_desc().category(), Category::Enum);
/// let TraceRef::Enum(value) = Level::High.trace_ref() else { unreachable!() };
/// assert_eq!(value.variant_name(), Some("High"));
/// assert_eq!(value.underlying(), 9);
/// assert_eq!(Level::Low.render_text(), "Low");
/// ```
///
/// [`Trace`]: crate::Trace
/// [`Described`]: crate::Described
/// [`EnumValue`]: crate::ops::EnumValue
#[macro_export]
macro_rules! impl_trace_enum {
    ($ty:ident : $repr:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::Described for $ty {
            fn type_desc() -> &'static $crate::TypeDesc {
                static CELL: $crate::info::NonGenericDescCell = $crate::info::NonGenericDescCell::new();
                CELL.get_or_init(|| {
                    $crate::TypeDesc::plain::<$ty>(
                        ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty)),
                        ::core::stringify!($ty),
                        $crate::info::Category::Enum,
                    )
                })
            }
        }

        impl $crate::ops::EnumValue for $ty {
            fn variant_name(&self) -> $crate::__macro_exports::Option<&'static str> {
                match self {
                    $( Self::$variant => $crate::__macro_exports::Option::Some(::core::stringify!($variant)), )+
                }
            }

            fn underlying(&self) -> i128 {
                match self {
                    $( Self::$variant => Self::$variant as $repr as i128, )+
                }
            }
        }

        impl $crate::Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static $crate::TypeDesc {
                <Self as $crate::Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> $crate::ops::TraceRef<'_> {
                $crate::ops::TraceRef::Enum(self)
            }

            fn render_text(&self) -> $crate::__macro_exports::String {
                let name = <Self as $crate::ops::EnumValue>::variant_name(self).unwrap_or_default();
                $crate::__macro_exports::String::from(name)
            }
        }
    };
}

/// Implements [`Trace`], [`Described`] and [`EnumValue`] for a `bitflags` type.
///
/// A value equal to a single declared flag renders like an enum member; a
/// combination also reports the names of every contained flag.
///
/// # Examples
///
/// ```
/// use td_reflect::{Trace, impl_trace_flags, ops::TraceRef};
///
/// bitflags::bitflags! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub struct Access: u32 {
///         const READ = 1;
///         const WRITE = 2;
///     }
/// }
///
/// impl_trace_flags!(Access: u32);
///
/// let both = Access::READ | Access::WRITE;
/// let TraceRef::Enum(value) = both.trace_ref() else { unreachable!() };
/// assert_eq!(value.variant_name(), None);
/// assert_eq!(value.flag_names(), Some(vec!["READ", "WRITE"]));
/// assert_eq!(value.underlying(), 3);
/// assert_eq!(both.render_text(), "READ, WRITE");
/// assert_eq!(Access::WRITE.render_text(), "WRITE");
/// ```
///
/// [`Trace`]: crate::Trace
/// [`Described`]: crate::Described
/// [`EnumValue`]: crate::ops::EnumValue
#[macro_export]
macro_rules! impl_trace_flags {
    ($ty:ident : $repr:ty) => {
        impl $crate::Described for $ty {
            fn type_desc() -> &'static $crate::TypeDesc {
                static CELL: $crate::info::NonGenericDescCell = $crate::info::NonGenericDescCell::new();
                CELL.get_or_init(|| {
                    $crate::TypeDesc::plain::<$ty>(
                        ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty)),
                        ::core::stringify!($ty),
                        $crate::info::Category::Enum,
                    )
                })
            }
        }

        impl $crate::ops::EnumValue for $ty {
            fn variant_name(&self) -> $crate::__macro_exports::Option<&'static str> {
                use $crate::__macro_exports::bitflags::Flags;
                <Self as Flags>::FLAGS
                    .iter()
                    .find(|flag| !flag.name().is_empty() && flag.value().bits() == self.bits())
                    .map(|flag| flag.name())
            }

            fn underlying(&self) -> i128 {
                <Self as $crate::__macro_exports::bitflags::Flags>::bits(self) as $repr as i128
            }

            fn flag_names(&self) -> $crate::__macro_exports::Option<$crate::__macro_exports::Vec<&'static str>> {
                let names = <Self as $crate::__macro_exports::bitflags::Flags>::iter_names(self)
                    .map(|(name, _)| name)
                    .collect();
                $crate::__macro_exports::Option::Some(names)
            }
        }

        impl $crate::Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static $crate::TypeDesc {
                <Self as $crate::Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> $crate::ops::TraceRef<'_> {
                $crate::ops::TraceRef::Enum(self)
            }

            fn render_text(&self) -> $crate::__macro_exports::String {
                let names = <Self as $crate::ops::EnumValue>::flag_names(self).unwrap_or_default();
                names.join(", ")
            }
        }
    };
}
