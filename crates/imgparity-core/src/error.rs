//! Error types for imgparity-rs.
//!
//! Provides [`CompareError`] for fatal errors that abort a comparison.
//! Per-image decode failures inside a document are deliberately absent from
//! this taxonomy: the extraction layer skips the affected image and emits a
//! diagnostic, so they never surface to the caller.

use std::fmt;

/// Fatal error types for a comparison run.
///
/// Either a complete [`CompareResult`](crate::CompareResult) is produced or
/// the operation fails with one of these; there is no partial-success mode.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    /// A configuration value is invalid (e.g. a threshold outside [0, 1]).
    /// Raised before any parsing begins.
    Configuration(String),
    /// The HTML input cannot be parsed as a document.
    HtmlParse(String),
    /// The PDF input cannot be parsed as a document.
    PdfParse(String),
    /// A caller-supplied filter image cannot be decoded.
    ImageDecode(String),
    /// Stream or resource handling failed while reading the PDF.
    Resource(String),
    /// I/O error reading input data.
    Io(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            CompareError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            CompareError::PdfParse(msg) => write!(f, "PDF parse error: {msg}"),
            CompareError::ImageDecode(msg) => write!(f, "image decode error: {msg}"),
            CompareError::Resource(msg) => write!(f, "resource error: {msg}"),
            CompareError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {}

impl From<std::io::Error> for CompareError {
    fn from(err: std::io::Error) -> Self {
        CompareError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_configuration() {
        let err = CompareError::Configuration("similarity_threshold must be in [0, 1]".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: similarity_threshold must be in [0, 1]"
        );
    }

    #[test]
    fn display_identifies_document() {
        let html = CompareError::HtmlParse("bad markup".to_string());
        let pdf = CompareError::PdfParse("bad xref".to_string());
        assert!(html.to_string().starts_with("HTML parse error"));
        assert!(pdf.to_string().starts_with("PDF parse error"));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CompareError = io_err.into();
        assert!(matches!(err, CompareError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(CompareError::Resource("stream truncated".to_string()));
        assert!(err.to_string().contains("stream truncated"));
    }
}
