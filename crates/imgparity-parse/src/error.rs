//! Error types for the extraction layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides
//! [`ExtractError`] that wraps format-specific failures and converts them to
//! [`CompareError`] for unified error handling across the library.

use imgparity_core::CompareError;
use thiserror::Error;

/// Error type for document parsing and image decoding operations.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The HTML input cannot be parsed as a document.
    #[error("HTML parse error: {0}")]
    Html(String),

    /// The PDF input cannot be parsed as a document.
    #[error("PDF parse error: {0}")]
    Pdf(String),

    /// An image payload cannot be decoded to a raster.
    #[error("image decode error: {0}")]
    Decode(String),

    /// Stream or resource handling failed while reading the PDF.
    #[error("resource error: {0}")]
    Resource(String),

    /// Error reading input data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] CompareError),
}

impl From<ExtractError> for CompareError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Html(msg) => CompareError::HtmlParse(msg),
            ExtractError::Pdf(msg) => CompareError::PdfParse(msg),
            ExtractError::Decode(msg) => CompareError::ImageDecode(msg),
            ExtractError::Resource(msg) => CompareError::Resource(msg),
            ExtractError::Io(e) => CompareError::Io(e.to_string()),
            ExtractError::Core(e) => e,
        }
    }
}
