//! Rendering options and configuration.

use super::JsonFormat;

/// What happens to the line markers inside an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Drop them, gluing lines together
    #[default]
    Remove,
    /// Replace each with a single space
    Space,
}

impl LineJoin {
    /// Apply to one element's text.
    pub fn apply(self, text: &str) -> String {
        match self {
            LineJoin::Remove => text.replace('\n', ""),
            LineJoin::Space => text.replace('\n', " "),
        }
    }
}

/// Options for rendering tagged elements.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How line markers are joined
    pub line_join: LineJoin,

    /// Drop non-ASCII characters from plain text
    pub ascii_only: bool,

    /// Decompose (NFKD) and drop combining marks before the ASCII filter,
    /// so `é` becomes `e` instead of disappearing
    pub fold_diacritics: bool,

    /// Maximum Markdown heading level (1-6)
    pub max_heading_level: u8,

    /// JSON layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-join mode.
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    /// Keep or drop non-ASCII characters in plain text.
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Fold accented characters to their base letter.
    pub fn with_fold_diacritics(mut self, fold: bool) -> Self {
        self.fold_diacritics = fold;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_join: LineJoin::Remove,
            ascii_only: true,
            fold_diacritics: false,
            max_heading_level: 6,
            json_format: JsonFormat::Pretty,
        }
    }
}
