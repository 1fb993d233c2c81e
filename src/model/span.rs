//! Span-level types: the styled text fragments everything else is built from.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Span flag bits, following the PyMuPDF convention.
pub mod flags {
    /// Superscripted text
    pub const SUPERSCRIPT: u32 = 1;
    /// Italic text
    pub const ITALIC: u32 = 2;
    /// Serifed font
    pub const SERIFED: u32 = 4;
    /// Monospaced font
    pub const MONOSPACED: u32 = 8;
    /// Bold text
    pub const BOLD: u32 = 16;
}

/// A font size with exact equality semantics.
///
/// Two sizes are equal only if their `f32` values are bit-identical
/// (with `-0.0` folded into `0.0`). No tolerance is applied, so `11.999999`
/// and `12.0` are distinct sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSize(f32);

impl FontSize {
    /// Wrap a raw size.
    pub fn new(size: f32) -> Self {
        // Fold -0.0 so it hashes like 0.0
        Self(if size == 0.0 { 0.0 } else { size })
    }

    /// The raw size in points.
    pub fn value(self) -> f32 {
        self.0
    }

    fn bits(self) -> u32 {
        if self.0 == 0.0 {
            0
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for FontSize {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for FontSize {}

impl Hash for FontSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for FontSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FontSize {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.0.total_cmp(&other.0)
    }
}

impl From<f32> for FontSize {
    fn from(size: f32) -> Self {
        Self::new(size)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An atomic styled text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content, possibly whitespace-only
    pub text: String,

    /// Font size in points
    pub size: f32,

    /// Font identifier (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,

    /// Style bitmask (see [`flags`])
    #[serde(default)]
    pub flags: Option<u32>,

    /// Fill color as an sRGB integer (0xRRGGBB)
    #[serde(default)]
    pub color: Option<u32>,
}

impl Span {
    /// Create a new span without flags or color.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
            flags: None,
            color: None,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// The span size as a comparable key.
    pub fn font_size(&self) -> FontSize {
        FontSize::new(self.size)
    }

    /// Whether the text is empty after stripping whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the size is usable for statistics (finite and non-negative).
    pub fn is_valid(&self) -> bool {
        self.size.is_finite() && self.size >= 0.0
    }

    /// Check if the bold flag is set.
    pub fn is_bold(&self) -> bool {
        self.flags.unwrap_or(0) & flags::BOLD != 0
    }

    /// Check if the italic flag is set.
    pub fn is_italic(&self) -> bool {
        self.flags.unwrap_or(0) & flags::ITALIC != 0
    }
}

/// Derive span flags from a font name the way PDF producers name variants.
pub fn flags_from_font_name(font_name: &str) -> u32 {
    let lower = font_name.to_lowercase();
    let mut bits = 0;

    if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
        bits |= flags::BOLD;
    }
    if lower.contains("italic") || lower.contains("oblique") {
        bits |= flags::ITALIC;
    }
    if lower.contains("courier") || lower.contains("mono") {
        bits |= flags::MONOSPACED;
    }
    if lower.contains("times") || (lower.contains("serif") && !lower.contains("sans")) {
        bits |= flags::SERIFED;
    }

    bits
}
