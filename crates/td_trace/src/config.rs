use td_reflect::info::ArrayTagStyle;

/// Default recursion budget for nested exceptions and enumerables.
pub const DEFAULT_MAX_DEPTH: i32 = 24;

/// Default number of spaces per indentation level of rendered documents.
pub const DEFAULT_INDENT: usize = 2;

// -----------------------------------------------------------------------------
// TraceConfig

/// Settings of a [`TraceSerializer`](crate::TraceSerializer).
///
/// # Examples
///
/// ```
/// use td_trace::TraceConfig;
/// use td_reflect::info::ArrayTagStyle;
///
/// const CONFIG: TraceConfig = TraceConfig::new()
///     .with_max_depth(4)
///     .with_array_tags(ArrayTagStyle::FullName);
///
/// assert_eq!(CONFIG.max_depth, 4);
/// assert_eq!(CONFIG.indent, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceConfig {
    /// Remaining recursion budget at the top level.
    ///
    /// At zero, nested exceptions and enumerables collapse into a
    /// placeholder carrying a `Count` attribute.
    pub max_depth: i32,
    /// How array tag names are derived.
    pub array_tags: ArrayTagStyle,
    /// Spaces per indentation level when rendering text.
    pub indent: usize,
}

impl TraceConfig {
    /// The default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            array_tags: ArrayTagStyle::Legacy,
            indent: DEFAULT_INDENT,
        }
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn with_array_tags(mut self, array_tags: ArrayTagStyle) -> Self {
        self.array_tags = array_tags;
        self
    }

    #[inline]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for TraceConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
