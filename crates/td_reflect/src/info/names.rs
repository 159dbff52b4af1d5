//! Naming conventions shared by display names and tag names.

/// Tag name of the universal type and of `null`.
pub const ANY_TAG: &str = "Any";

/// Display name of the universal type.
pub const OBJECT_NAME: &str = "object";

/// Prefix of a generic arity marker, as in ``Pair`2``.
pub const ARITY_MARKER: char = '`';

/// Removes any number of trailing arity markers (`` `<digits> ``) from a name.
///
/// Names registered for generic types may carry a marker telling how many
/// type parameters the definition has, so that `Pair` and ``Pair`2`` can be
/// told apart in a registry. The marker never reaches the document.
///
/// # Examples
///
/// ```
/// use td_reflect::info::strip_arity_marker;
///
/// assert_eq!(strip_arity_marker("Pair`2"), "Pair");
/// assert_eq!(strip_arity_marker("Outer`1`2"), "Outer");
/// assert_eq!(strip_arity_marker("Plain"), "Plain");
/// assert_eq!(strip_arity_marker("Trailing`"), "Trailing`");
/// ```
pub fn strip_arity_marker(name: &str) -> &str {
    let mut rest = name;
    loop {
        let digits = rest.len() - rest.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return rest;
        }
        let head = &rest[..rest.len() - digits];
        match head.strip_suffix(ARITY_MARKER) {
            Some(stripped) => rest = stripped,
            None => return rest,
        }
    }
}

// -----------------------------------------------------------------------------
// ArrayTagStyle

/// How the tag name of an array type is derived from its element's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrayTagStyle {
    /// `ArrayOf` followed by the last two characters of the element tag.
    ///
    /// `[i32; 4]` becomes `ArrayOf32`, `[String; 2]` becomes `ArrayOfng`.
    /// Existing log consumers parse this form.
    #[default]
    Legacy,
    /// `ArrayOf` followed by the complete element tag, e.g. `ArrayOfString`.
    FullName,
}

impl ArrayTagStyle {
    pub(crate) fn array_tag(self, element_tag: &str) -> alloc::string::String {
        match self {
            Self::Legacy => {
                let count = element_tag.chars().count();
                let tail: alloc::string::String = element_tag.chars().skip(count.saturating_sub(2)).collect();
                alloc::format!("ArrayOf{tail}")
            }
            Self::FullName => alloc::format!("ArrayOf{element_tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrayTagStyle, strip_arity_marker};

    #[test]
    fn strip_only_marker_suffixes() {
        assert_eq!(strip_arity_marker("Vec`1"), "Vec");
        assert_eq!(strip_arity_marker("Int32"), "Int32");
        assert_eq!(strip_arity_marker("u8"), "u8");
        assert_eq!(strip_arity_marker("`3"), "");
    }

    #[test]
    fn array_tags() {
        assert_eq!(ArrayTagStyle::Legacy.array_tag("i32"), "ArrayOf32");
        assert_eq!(ArrayTagStyle::Legacy.array_tag("u8"), "ArrayOfu8");
        assert_eq!(ArrayTagStyle::Legacy.array_tag("x"), "ArrayOfx");
        assert_eq!(ArrayTagStyle::FullName.array_tag("String"), "ArrayOfString");
    }
}
