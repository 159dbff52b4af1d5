use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use crate::info::{Described, NonGenericDescCell, TypeDesc};
use crate::ops::TraceRef;
use crate::Trace;

macro_rules! impl_trace_text {
    ($ty:ty, $path:literal, $ident:literal) => {
        impl Described for $ty {
            fn type_desc() -> &'static TypeDesc {
                static CELL: NonGenericDescCell = NonGenericDescCell::new();
                CELL.get_or_init(|| TypeDesc::opaque::<$ty>($path, $ident))
            }
        }

        impl Trace for $ty {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                <Self as Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                TraceRef::Text(self)
            }

            #[inline]
            fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                Some(self)
            }

            fn render_text(&self) -> String {
                String::from(&**self)
            }
        }
    };
}

impl_trace_text!(String, "alloc::string::String", "String");
impl_trace_text!(&'static str, "str", "str");
impl_trace_text!(Box<str>, "alloc::boxed::Box<str>", "Box");
impl_trace_text!(Cow<'static, str>, "alloc::borrow::Cow<str>", "Cow");

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::String;

    use crate::info::Category;
    use crate::ops::TraceRef;
    use crate::{Described, Trace};

    #[test]
    fn text_is_not_primitive() {
        let desc = String::type_desc();
        assert_eq!(desc.category(), Category::Opaque);
        assert_eq!(desc.display_name(), "alloc::string::String");
        assert!(!desc.is_primitive_like());
    }

    #[test]
    fn text_shape() {
        let owned = String::from("hello");
        let borrowed: &'static str = "hello";
        let cow: Cow<'static, str> = Cow::Borrowed("hello");
        for value in [&owned as &dyn Trace, &borrowed, &cow] {
            assert!(matches!(value.trace_ref(), TraceRef::Text("hello")));
            assert_eq!(value.render_text(), "hello");
        }
    }
}
