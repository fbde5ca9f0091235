//! Pairwise similarity matrix.
//!
//! The handoff artifact between signature computation and the matcher:
//! an `|html| x |pdf|` grid of scores, never mutated after construction.
//! Signatures are computed once per image by the caller, so building the
//! matrix is pure lookup arithmetic.

use crate::signature::ImageSignature;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    html_count: usize,
    pdf_count: usize,
    /// Row-major: `scores[h * pdf_count + p]`.
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Fill every cell from precomputed signatures.
    pub fn build(html: &[ImageSignature], pdf: &[ImageSignature]) -> Self {
        let mut scores = Vec::with_capacity(html.len() * pdf.len());
        for h in html {
            for p in pdf {
                scores.push(h.similarity(p));
            }
        }
        Self {
            html_count: html.len(),
            pdf_count: pdf.len(),
            scores,
        }
    }

    /// Assemble from already-computed scores. The buffer must be row-major
    /// with `html_count * pdf_count` entries.
    pub fn from_scores(html_count: usize, pdf_count: usize, scores: Vec<f64>) -> Self {
        assert_eq!(scores.len(), html_count * pdf_count);
        Self {
            html_count,
            pdf_count,
            scores,
        }
    }

    pub fn html_count(&self) -> usize {
        self.html_count
    }

    pub fn pdf_count(&self) -> usize {
        self.pdf_count
    }

    /// True when either dimension is zero (no pairs to consider).
    pub fn is_degenerate(&self) -> bool {
        self.html_count == 0 || self.pdf_count == 0
    }

    pub fn get(&self, html_index: usize, pdf_index: usize) -> f64 {
        assert!(html_index < self.html_count && pdf_index < self.pdf_count);
        self.scores[html_index * self.pdf_count + pdf_index]
    }
}
