use crate::hash::HashSet;

// -----------------------------------------------------------------------------
// IdentitySet

/// A set of object addresses.
///
/// Two references are the same member when they point at the same object,
/// regardless of their contents. Fat pointer metadata is discarded, so a
/// `&dyn Trait` and a `&Concrete` to one object compare equal.
///
/// Zero-sized values have no storage of their own, so distinct instances
/// may share an address and are then treated as one member.
///
/// # Examples
///
/// ```
/// use td_utils::IdentitySet;
///
/// let a = String::from("same");
/// let b = String::from("same");
///
/// let mut set = IdentitySet::new();
/// assert!(set.insert(&a));
/// assert!(!set.insert(&a));
/// assert!(set.insert(&b));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Default, Debug, Clone)]
pub struct IdentitySet(HashSet<usize>);

impl IdentitySet {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self(HashSet::default())
    }

    #[inline(always)]
    fn address<T: ?Sized>(value: &T) -> usize {
        (value as *const T).cast::<()>() as usize
    }

    /// Adds the referenced object, returns `false` if it was already present.
    #[inline]
    pub fn insert<T: ?Sized>(&mut self, value: &T) -> bool {
        self.0.insert(Self::address(value))
    }

    /// Returns `true` if the referenced object is present.
    #[inline]
    pub fn contains<T: ?Sized>(&self, value: &T) -> bool {
        self.0.contains(&Self::address(value))
    }

    /// Returns the number of distinct objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::IdentitySet;
    use alloc::boxed::Box;
    use core::fmt::Display;

    #[test]
    fn thin_and_fat_references_match() {
        let value = 7_u32;
        let as_dyn: &dyn Display = &value;

        let mut set = IdentitySet::new();
        assert!(set.insert(&value));
        assert!(set.contains(as_dyn));
        assert!(!set.insert(as_dyn));
    }

    #[test]
    fn zero_sized_values_may_share_an_address() {
        let first = Box::new(());
        let second = Box::new(());

        let mut set = IdentitySet::new();
        assert!(set.insert(first.as_ref()));
        assert_eq!(set.insert(second.as_ref()), !core::ptr::eq(first.as_ref(), second.as_ref()));
        assert!(set.contains(second.as_ref()));
    }
}
