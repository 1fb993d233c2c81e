//! Error types for sizetag library.

use std::io;
use thiserror::Error;

/// Result type alias for sizetag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading and classifying documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor a JSON span dump.
    #[error("Unknown file format: expected a PDF or a JSON span dump")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error decoding a JSON span dump.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document contains no text spans, so no paragraph size exists.
    #[error("No fonts found in {document}")]
    NoStylesFound {
        /// Document identifier
        document: String,
    },

    /// A span size has no entry in the size-to-tag map.
    #[error("No tag for font size {size} in {document}")]
    TagLookupMiss {
        /// Document identifier
        document: String,
        /// The size that was looked up
        size: f32,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (text, Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error comes from the classifier rather than from loading.
    pub fn is_classification_error(&self) -> bool {
        matches!(
            self,
            Error::NoStylesFound { .. } | Error::TagLookupMiss { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoStylesFound {
            document: "report.pdf".to_string(),
        };
        assert_eq!(err.to_string(), "No fonts found in report.pdf");

        let err = Error::TagLookupMiss {
            document: "report.pdf".to_string(),
            size: 13.5,
        };
        assert_eq!(err.to_string(), "No tag for font size 13.5 in report.pdf");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_classification_error());
    }

    #[test]
    fn test_classification_errors() {
        let err = Error::NoStylesFound {
            document: "x".to_string(),
        };
        assert!(err.is_classification_error());
    }
}
