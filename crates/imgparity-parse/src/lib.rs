//! imgparity-parse: HTML and PDF parsing and image extraction.
//!
//! This crate implements the extraction layer of imgparity-rs: pulling every
//! embedded raster image out of an HTML byte buffer (html5ever tokenizer)
//! and out of a PDF byte buffer (lopdf page/XObject walk), decoded to the
//! canonical greyscale raster form from imgparity-core.
//!
//! A malformed container is a typed error; an individual broken image is
//! skipped with a `tracing` diagnostic and never surfaces to the caller.

pub mod decode;
pub mod error;
pub mod html;
pub mod pdf;

pub use decode::decode_raster;
pub use error::ExtractError;
pub use html::extract_html_images;
pub use imgparity_core;
pub use pdf::extract_pdf_images;
