//! imgparity-core: Format-independent data types and algorithms.
//!
//! This crate provides the foundational types (RasterImage, DocumentImage,
//! ImageSignature, SimilarityMatrix, Assignment) and the algorithms
//! (perceptual hashing, noise filtering, optimal bipartite matching) used by
//! imgparity-rs. It knows nothing about HTML or PDF: extraction lives in
//! imgparity-parse, orchestration in imgparity.

pub mod config;
pub mod error;
pub mod filter;
pub mod image;
pub mod matching;
pub mod matrix;
pub mod raster;
pub mod result;
pub mod signature;

pub use config::CompareConfig;
pub use error::CompareError;
pub use filter::filter_images;
pub use image::{DocumentImage, DocumentSource};
pub use matching::{Assignment, MatchAlgorithm, MatchAlgorithmParseError, MatchPair, match_images};
pub use matrix::SimilarityMatrix;
pub use raster::RasterImage;
pub use result::CompareResult;
pub use signature::{ImageSignature, SimilarityMethod, SimilarityMethodParseError};
