use serde::{Deserialize, Serialize};

/// Options for [`parse`][super::parse].
///
/// Like [`StringifyOptions`], this can be loaded from any serde format using
/// camelCase field names, for example `{"skipComma": true}` in JSON. Missing
/// fields take their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Allow siblings in compounds, lists and arrays to be separated by a
    /// newline instead of a comma.
    pub skip_comma: bool,

    /// Parse the unquoted tokens `true` and `false` as [`Value::Bool`]
    /// rather than strings. Quoted `"true"` is always a string.
    ///
    /// [`Value::Bool`]: crate::Value::Bool
    pub use_boolean: bool,
}

/// Quote character used for strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub(crate) fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Options for [`stringify`][super::stringify].
///
/// ```
/// use nbtcodec::snbt::StringifyOptions;
///
/// let opts: StringifyOptions =
///     serde_json::from_str(r#"{"pretty": true, "breakLength": 0, "tab": "\t"}"#).unwrap();
/// assert!(opts.pretty);
/// assert_eq!(opts.newline, "\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringifyOptions {
    /// Allow compounds and lists to spread over several lines.
    pub pretty: bool,

    /// When pretty printing, a compound or list whose children add up to more
    /// than this many characters is put one child per line. Zero puts every
    /// non-empty compound and list over several lines.
    pub break_length: usize,

    /// Force a quote character. By default the quote is picked per string to
    /// avoid escaping.
    pub quote: Option<Quote>,

    /// Separate lines with just a newline rather than a comma and newline.
    pub skip_comma: bool,

    /// Write [`Value::Bool`][crate::Value::Bool] as bare `true`/`false`
    /// rather than as quoted strings.
    pub use_boolean: bool,

    /// One level of indentation.
    pub tab: String,

    /// Line terminator.
    pub newline: String,

    /// Always suffix doubles with `d`.
    pub strict_double: bool,

    /// Hug lists of compounds, writing `[{` and `}, {` rather than indenting
    /// every compound one more level.
    pub no_tag_list_tab: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            break_length: 70,
            quote: None,
            skip_comma: false,
            use_boolean: false,
            tab: "    ".to_owned(),
            newline: "\n".to_owned(),
            strict_double: false,
            no_tag_list_tab: false,
        }
    }
}

impl StringifyOptions {
    /// Default options with pretty printing turned on.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Default::default()
        }
    }
}
