//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "imgparity",
    about = "Compare the embedded images of an HTML document against its PDF rendering",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, match, and report the embedded images of the two documents
    Compare {
        /// Path to the HTML document
        html: PathBuf,
        /// Path to the PDF document
        pdf: PathBuf,
        /// Image file whose near-duplicates are dropped before matching
        /// (repeatable)
        #[arg(long = "filter-image", value_name = "FILE")]
        filter_images: Vec<PathBuf>,
        /// Minimum similarity for a pair to count as a match
        #[arg(long, default_value_t = 0.95)]
        similarity_threshold: f64,
        /// Minimum similarity to a filter image for an image to be dropped
        #[arg(long, default_value_t = 0.95)]
        hash_threshold: f64,
        /// Matching algorithm: hungarian or greedy
        #[arg(long, default_value = "hungarian")]
        algorithm: String,
        /// Similarity method: phash or histogram
        #[arg(long, default_value = "phash")]
        method: String,
        /// Image identifier excluded before matching, case-insensitive exact
        /// or suffix match (repeatable)
        #[arg(long = "exclude-name", value_name = "NAME")]
        exclude_names: Vec<String>,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
        /// Also list the matched pairs in text output
        #[arg(long)]
        pairs: bool,
    },
}
