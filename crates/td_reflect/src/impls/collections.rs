use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::BuildHasher;
use std::collections::HashSet;

use crate::info::{Category, Described, GenericDescCell, TypeDesc};
use crate::ops::{Sequence, TraceRef};
use crate::Trace;

// -----------------------------------------------------------------------------
// Collections

macro_rules! impl_trace_collection {
    ($ty:ident < T $(, $param:ident : $bound:path)* >, $path:literal, $ident:literal) => {
        impl<T: Trace + Described $(, $param: $bound + Send + Sync + 'static)*> Described for $ty<T $(, $param)*> {
            fn type_desc() -> &'static TypeDesc {
                static CELL: GenericDescCell = GenericDescCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDesc::generic::<Self>($path, $ident, Category::Collection, alloc::vec![T::type_desc()])
                })
            }
        }

        impl<T: Trace + Described $(, $param: $bound + Send + Sync + 'static)*> Sequence for $ty<T $(, $param)*> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T $(, $param)*>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Trace> + '_> {
                Box::new(IntoIterator::into_iter(self).map(|item| item as &dyn Trace))
            }

            #[inline]
            fn element_desc(&self) -> &'static TypeDesc {
                T::type_desc()
            }
        }

        impl<T: Trace + Described $(, $param: $bound + Send + Sync + 'static)*> Trace for $ty<T $(, $param)*> {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                <Self as Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                TraceRef::Sequence(self)
            }
        }
    };
}

impl_trace_collection!(Vec<T>, "alloc::vec::Vec`1", "Vec`1");
impl_trace_collection!(VecDeque<T>, "alloc::collections::VecDeque`1", "VecDeque`1");
impl_trace_collection!(BTreeSet<T>, "alloc::collections::BTreeSet`1", "BTreeSet`1");
impl_trace_collection!(HashSet<T, S: BuildHasher>, "std::collections::HashSet`1", "HashSet`1");

// -----------------------------------------------------------------------------
// Arrays

impl<T: Trace + Described, const N: usize> Described for [T; N] {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericDescCell = GenericDescCell::new();
        CELL.get_or_insert::<Self>(|| TypeDesc::array::<Self>(T::type_desc()))
    }
}

impl<T: Trace + Described, const N: usize> Sequence for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Trace> + '_> {
        Box::new(self.as_slice().iter().map(|item| item as &dyn Trace))
    }

    #[inline]
    fn element_desc(&self) -> &'static TypeDesc {
        T::type_desc()
    }
}

impl<T: Trace + Described, const N: usize> Trace for [T; N] {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        <Self as Described>::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Sequence(self)
    }
}

impl<T: Trace + Described> Described for Box<[T]> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericDescCell = GenericDescCell::new();
        CELL.get_or_insert::<Self>(|| TypeDesc::array::<Self>(T::type_desc()))
    }
}

impl<T: Trace + Described> Sequence for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Trace> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn Trace))
    }

    #[inline]
    fn element_desc(&self) -> &'static TypeDesc {
        T::type_desc()
    }
}

impl<T: Trace + Described> Trace for Box<[T]> {
    #[inline]
    fn trace_desc(&self) -> &'static TypeDesc {
        <Self as Described>::type_desc()
    }

    #[inline]
    fn trace_ref(&self) -> TraceRef<'_> {
        TraceRef::Sequence(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeSet, VecDeque};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashSet;

    use crate::info::{ArrayTagStyle, Category};
    use crate::ops::TraceRef;
    use crate::{Described, Trace};

    #[test]
    fn collection_names() {
        let desc = <Vec<Vec<u64>>>::type_desc();
        assert_eq!(desc.category(), Category::Collection);
        assert_eq!(desc.display_name(), "alloc::vec::Vec<alloc::vec::Vec<ulong>>");
        assert_eq!(desc.tag_name(ArrayTagStyle::Legacy), "Vec");

        assert_eq!(
            <HashSet<String>>::type_desc().display_name(),
            "std::collections::HashSet<alloc::string::String>"
        );
        assert_eq!(<VecDeque<bool>>::type_desc().tag_name(ArrayTagStyle::Legacy), "VecDeque");
    }

    #[test]
    fn array_names() {
        assert_eq!(<[i32; 4]>::type_desc().display_name(), "int[]");
        assert_eq!(<[[i32; 2]; 4]>::type_desc().display_name(), "int[][]");
        assert_eq!(<Box<[String]>>::type_desc().display_name(), "alloc::string::String[]");
        assert_eq!(<[String; 1]>::type_desc().tag_name(ArrayTagStyle::Legacy), "ArrayOfng");
        assert_eq!(<[String; 1]>::type_desc().tag_name(ArrayTagStyle::FullName), "ArrayOfString");
    }

    #[test]
    fn generic_cells_are_per_type() {
        let a = <Vec<i8>>::type_desc();
        let b = <Vec<u8>>::type_desc();
        assert!(a.is::<Vec<i8>>());
        assert!(b.is::<Vec<u8>>());
        assert!(core::ptr::eq(a, <Vec<i8>>::type_desc()));
    }

    #[test]
    fn sequence_walk() {
        let values = vec![1_i32, 2, 3];
        let value: &dyn Trace = &values;
        let TraceRef::Sequence(seq) = value.trace_ref() else {
            panic!("expected a sequence");
        };
        assert_eq!(seq.len(), 3);
        let texts: Vec<String> = seq.iter().map(|item| item.render_text()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
        assert!(seq.element_desc().is::<i32>());
    }

    #[test]
    fn every_collection_iterates_in_place() {
        let vec = vec![4_u8, 5];
        let deque: VecDeque<u8> = vec.iter().copied().collect();
        let tree: BTreeSet<u8> = vec.iter().copied().collect();
        let boxed: Box<dyn Trace> = Box::new(vec.clone());
        let values: [&dyn Trace; 4] = [&vec, &deque, &tree, boxed.as_ref()];
        for value in values {
            let TraceRef::Sequence(seq) = value.trace_ref() else {
                panic!("expected a sequence");
            };
            let texts: Vec<String> = seq.iter().map(|item| item.render_text()).collect();
            assert_eq!(texts, ["4", "5"]);
        }
    }

    #[test]
    fn heterogeneous_elements_keep_their_runtime_types() {
        let values: Vec<Box<dyn Trace>> = vec![Box::new(1_i32), Box::new(String::from("a"))];
        let TraceRef::Sequence(seq) = (&values as &dyn Trace).trace_ref() else {
            panic!("expected a sequence");
        };
        let items: Vec<&dyn Trace> = seq.iter().collect();
        assert!(items[0].trace_desc().is::<i32>());
        assert!(items[1].trace_desc().is::<String>());
    }
}
