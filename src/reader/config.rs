//! Contains parser configuration structure.

/// Inspector configuration structure.
///
/// This structure contains various configuration options which affect the
/// behavior of the inspector. The defaults report every node exactly as it
/// appears in the document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParserConfig {
    /// Whether or not comments should be omitted. Comments are still checked
    /// for well-formedness.
    ///
    /// Default is false.
    pub ignore_comments: bool,

    /// Whether or not whitespace-only text nodes should be omitted. This takes
    /// priority over `whitespace_to_characters`.
    ///
    /// Default is false.
    pub ignore_whitespace: bool,

    /// Whether or not whitespace-only text should be reported as `Text` rather
    /// than `Whitespace`.
    ///
    /// Default is false.
    pub whitespace_to_characters: bool,

    /// Whether or not CDATA sections should be reported as `Text`.
    ///
    /// Default is false.
    pub cdata_to_characters: bool,

    /// Capacity of the buffer a byte source is read through. Zero is raised to one.
    ///
    /// Default is 8192.
    pub buffer_size: usize,
}

impl ParserConfig {
    /// Returns a new config with default values.
    ///
    /// You can tweak default values using builder-like pattern:
    ///
    /// ```rust
    /// use xml_inspector::ParserConfig;
    ///
    /// let config = ParserConfig::new()
    ///     .ignore_comments(true)
    ///     .cdata_to_characters(true);
    /// assert!(config.ignore_comments);
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> ParserConfig {
        ParserConfig {
            ignore_comments: false,
            ignore_whitespace: false,
            whitespace_to_characters: false,
            cdata_to_characters: false,
            buffer_size: 8192,
        }
    }
}

impl Default for ParserConfig {
    #[inline]
    fn default() -> ParserConfig {
        ParserConfig::new()
    }
}

gen_setters! { ParserConfig,
    ignore_comments: val bool,
    ignore_whitespace: val bool,
    whitespace_to_characters: val bool,
    cdata_to_characters: val bool,
    buffer_size: val usize
}
