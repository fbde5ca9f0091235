//! imgparity: Compare the embedded images of an HTML document against its
//! PDF rendering.
//!
//! This is the public API facade crate for imgparity-rs. Given raw HTML
//! bytes and raw PDF bytes, [`Comparator::compare`] extracts the embedded
//! raster images from each document, filters out known decorative assets,
//! scores every cross-document pair with a perceptual signature, solves the
//! optimal one-to-one assignment, and reports match counts and rates.
//!
//! # Architecture
//!
//! - **imgparity-core**: Format-independent data types and algorithms
//! - **imgparity-parse**: HTML (html5ever) and PDF (lopdf) image extraction
//! - **imgparity** (this crate): The comparator orchestrator tying
//!   everything together
//!
//! # Example
//!
//! ```ignore
//! let comparator = Comparator::default();
//! let result = comparator.compare(&html_bytes, &pdf_bytes)?;
//! println!("matched {} of {} HTML images", result.matched_count, result.html_image_count);
//! ```

mod comparator;

pub use comparator::Comparator;
pub use imgparity_core;
pub use imgparity_core::{
    Assignment, CompareConfig, CompareError, CompareResult, DocumentImage, DocumentSource,
    ImageSignature, MatchAlgorithm, MatchPair, RasterImage, SimilarityMatrix, SimilarityMethod,
};
pub use imgparity_parse;
