use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use crate::info::{Described, GenericDescCell, TypeDesc};
use crate::ops::TraceRef;
use crate::Trace;

// -----------------------------------------------------------------------------
// Option

impl<T: Trace + Described> Described for Option<T> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericDescCell = GenericDescCell::new();
        CELL.get_or_insert::<Self>(|| TypeDesc::optional::<Self>(T::type_desc()))
    }
}

impl<T: Trace + Described> Trace for Option<T> {
    fn trace_desc(&self) -> &'static TypeDesc {
        match self {
            Some(value) => value.trace_desc(),
            None => <Self as Described>::type_desc(),
        }
    }

    fn trace_ref(&self) -> TraceRef<'_> {
        match self {
            Some(value) => value.trace_ref(),
            None => TraceRef::Null,
        }
    }

    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        self.as_ref().and_then(Trace::as_serialize)
    }

    fn render_text(&self) -> String {
        match self {
            Some(value) => value.render_text(),
            None => String::new(),
        }
    }

    #[inline]
    fn inner_trace(&self) -> Option<&dyn Trace> {
        self.as_ref().map(|value| value as &dyn Trace)
    }
}

// -----------------------------------------------------------------------------
// Trait objects

macro_rules! impl_trace_pointer {
    ($ptr:ident) => {
        impl Described for $ptr<dyn Trace> {
            #[inline]
            fn type_desc() -> &'static TypeDesc {
                <dyn Trace as Described>::type_desc()
            }
        }

        impl Trace for $ptr<dyn Trace> {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                (**self).trace_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                (**self).trace_ref()
            }

            #[inline]
            fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                (**self).as_serialize()
            }

            #[inline]
            fn render_text(&self) -> String {
                (**self).render_text()
            }

            #[inline]
            fn inner_trace(&self) -> Option<&dyn Trace> {
                Some(&**self)
            }
        }
    };
}

impl_trace_pointer!(Box);
impl_trace_pointer!(Arc);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;

    use crate::info::ArrayTagStyle;
    use crate::{Described, Trace};

    #[test]
    fn option_forwards_runtime_type() {
        let some: Option<u32> = Some(4);
        let none: Option<u32> = None;
        assert!(some.trace_desc().is::<u32>());
        assert!(none.trace_desc().is::<Option<u32>>());
        assert!((&none as &dyn Trace).is_null());
        assert_eq!(some.render_text(), "4");
        assert_eq!(<Option<u32>>::type_desc().display_name(), "core::option::Option<uint>");
    }

    #[test]
    fn pointers_describe_as_object() {
        assert_eq!(<Box<dyn Trace>>::type_desc().display_name(), "object");
        assert_eq!(<Arc<dyn Trace>>::type_desc().tag_name(ArrayTagStyle::Legacy), "Any");
        assert_eq!(<alloc::vec::Vec<Box<dyn Trace>>>::type_desc().display_name(), "alloc::vec::Vec<object>");
    }

    #[test]
    fn downcast_through_wrappers() {
        let shared: Arc<dyn Trace> = Arc::new(String::from("x"));
        let boxed: Box<dyn Trace> = Box::new(Some(shared));
        let value: &dyn Trace = &boxed;
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("x"));
        assert!(value.is::<Arc<dyn Trace>>());
        assert!(!value.is::<u8>());
    }
}
