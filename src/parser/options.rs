//! Parsing options and configuration.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default block-gap factor: a vertical gap wider than 1.5× the median line
/// spacing starts a new block.
pub const DEFAULT_BLOCK_GAP_FACTOR: f32 = 1.5;

/// Options for parsing PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to extract pages in parallel
    pub parallel: bool,

    /// Page selection (which pages to parse)
    pub pages: PageSelection,

    /// Gap between lines, relative to the median line spacing, that
    /// separates two blocks
    pub block_gap_factor: f32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (undecodable pages come out empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set the block-gap factor. Non-positive or non-finite values are ignored.
    pub fn with_block_gap_factor(mut self, factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.block_gap_factor = factor;
        }
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            pages: PageSelection::All,
            block_gap_factor: DEFAULT_BLOCK_GAP_FACTOR,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}

/// Which pages to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Whether a page number (1-indexed) is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check the selection against a page count.
    ///
    /// Fails with [`Error::PageOutOfRange`] if an explicitly named page does
    /// not exist.
    pub fn validate(&self, page_count: u32) -> Result<()> {
        let highest = match self {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.start()),
            PageSelection::Pages(pages) => pages.iter().copied().max(),
        };
        match highest {
            Some(page) if page > page_count => Err(Error::PageOutOfRange(page, page_count)),
            _ => Ok(()),
        }
    }
}

impl FromStr for PageSelection {
    type Err = Error;

    /// Parse `"all"`, `"3"`, `"2-5"` or a list such as `"1,3,5-7"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let invalid = || Error::InvalidPageRange(s.to_string());
        let range = |part: &str| -> Result<RangeInclusive<u32>> {
            let (start, end) = part.split_once('-').unwrap_or((part, part));
            let start: u32 = start.trim().parse().map_err(|_| invalid())?;
            let end: u32 = end.trim().parse().map_err(|_| invalid())?;
            if start == 0 || end < start {
                return Err(invalid());
            }
            Ok(start..=end)
        };

        if !s.contains(',') && s.contains('-') {
            return range(s).map(PageSelection::Range);
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            pages.extend(range(part.trim())?);
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
