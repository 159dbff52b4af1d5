use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::BuildHasher;
use std::collections::HashMap;

use crate::info::{Category, Described, GenericDescCell, TypeDesc};
use crate::ops::{Dictionary, TraceRef};
use crate::Trace;

macro_rules! impl_trace_dictionary {
    ($ty:ident < K, V $(, $param:ident : $bound:path)* >, $path:literal, $ident:literal) => {
        impl<K, V $(, $param)*> Described for $ty<K, V $(, $param)*>
        where
            K: Trace + Described,
            V: Trace + Described,
            $($param: $bound + Send + Sync + 'static,)*
        {
            fn type_desc() -> &'static TypeDesc {
                static CELL: GenericDescCell = GenericDescCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDesc::generic::<Self>(
                        $path,
                        $ident,
                        Category::Dictionary,
                        alloc::vec![K::type_desc(), V::type_desc()],
                    )
                })
            }
        }

        impl<K, V $(, $param)*> Dictionary for $ty<K, V $(, $param)*>
        where
            K: Trace + Described,
            V: Trace + Described,
            $($param: $bound + Send + Sync + 'static,)*
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty<K, V $(, $param)*>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Trace, &dyn Trace)> + '_> {
                Box::new(
                    <$ty<K, V $(, $param)*>>::iter(self)
                        .map(|(key, value)| (key as &dyn Trace, value as &dyn Trace)),
                )
            }

            #[inline]
            fn key_desc(&self) -> &'static TypeDesc {
                K::type_desc()
            }

            #[inline]
            fn value_desc(&self) -> &'static TypeDesc {
                V::type_desc()
            }
        }

        impl<K, V $(, $param)*> Trace for $ty<K, V $(, $param)*>
        where
            K: Trace + Described,
            V: Trace + Described,
            $($param: $bound + Send + Sync + 'static,)*
        {
            #[inline]
            fn trace_desc(&self) -> &'static TypeDesc {
                <Self as Described>::type_desc()
            }

            #[inline]
            fn trace_ref(&self) -> TraceRef<'_> {
                TraceRef::Dictionary(self)
            }
        }
    };
}

impl_trace_dictionary!(BTreeMap<K, V>, "alloc::collections::BTreeMap`2", "BTreeMap`2");
impl_trace_dictionary!(HashMap<K, V, S: BuildHasher>, "std::collections::HashMap`2", "HashMap`2");

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    use crate::info::{ArrayTagStyle, Category};
    use crate::ops::TraceRef;
    use crate::{Described, Trace};

    #[test]
    fn dictionary_names() {
        let desc = <BTreeMap<String, i64>>::type_desc();
        assert_eq!(desc.category(), Category::Dictionary);
        assert_eq!(
            desc.display_name(),
            "alloc::collections::BTreeMap<alloc::string::String, long>"
        );
        assert_eq!(desc.tag_name(ArrayTagStyle::Legacy), "BTreeMap");
        assert_eq!(
            <HashMap<u16, bool>>::type_desc().display_name(),
            "std::collections::HashMap<ushort, bool>"
        );
    }

    #[test]
    fn dictionary_walk() {
        let mut map = BTreeMap::new();
        map.insert(2_u8, String::from("two"));
        map.insert(1_u8, String::from("one"));
        let value: &dyn Trace = &map;
        let TraceRef::Dictionary(dict) = value.trace_ref() else {
            panic!("expected a dictionary");
        };
        assert_eq!(dict.len(), 2);
        let (key, text) = dict.iter().next().unwrap();
        assert_eq!(key.render_text(), "1");
        assert_eq!(text.render_text(), "one");
        assert!(dict.key_desc().is::<u8>());
    }
}
