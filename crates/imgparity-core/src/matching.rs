//! Optimal bipartite matching over a similarity matrix.
//!
//! The default solver is the Hungarian method (Kuhn-Munkres) in its O(n^3)
//! potential/augmenting-path form, run as maximum-weight matching over the
//! similarity scores. A cheaper greedy variant is available as an
//! approximation. Both discard pairs below the acceptance threshold after
//! solving, so unmatched indices are reported rather than forced pairs.

use std::fmt;
use std::str::FromStr;

use crate::matrix::SimilarityMatrix;

/// Matching algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchAlgorithm {
    /// Exact maximum-weight assignment, O(n^3).
    Hungarian,
    /// Highest-remaining-score-first approximation, not guaranteed optimal.
    Greedy,
}

impl MatchAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchAlgorithm::Hungarian => "hungarian",
            MatchAlgorithm::Greedy => "greedy",
        }
    }
}

impl Default for MatchAlgorithm {
    fn default() -> Self {
        MatchAlgorithm::Hungarian
    }
}

impl fmt::Display for MatchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct MatchAlgorithmParseError(pub String);

impl fmt::Display for MatchAlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown matching algorithm '{}'", self.0)
    }
}

impl std::error::Error for MatchAlgorithmParseError {}

impl FromStr for MatchAlgorithm {
    type Err = MatchAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "hungarian" => Ok(MatchAlgorithm::Hungarian),
            "greedy" => Ok(MatchAlgorithm::Greedy),
            _ => Err(MatchAlgorithmParseError(lower)),
        }
    }
}

/// One accepted pair of the assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchPair {
    pub html_index: usize,
    pub pdf_index: usize,
    pub score: f64,
}

/// Result of the matcher: disjoint pairs plus the leftover indices on each
/// side. Every pair scores at or above the threshold it was produced with,
/// and no index appears in more than one pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub pairs: Vec<MatchPair>,
    pub unmatched_html: Vec<usize>,
    pub unmatched_pdf: Vec<usize>,
    /// Which algorithm produced this assignment.
    pub algorithm: MatchAlgorithm,
}

impl Assignment {
    /// Sum of pair scores, for optimality comparisons.
    pub fn total_score(&self) -> f64 {
        self.pairs.iter().map(|p| p.score).sum()
    }
}

/// Solve the assignment over `matrix`, keeping only pairs scoring at least
/// `threshold`. An empty matrix on either side yields zero pairs with all
/// indices on the non-empty side unmatched.
pub fn match_images(
    matrix: &SimilarityMatrix,
    threshold: f64,
    algorithm: MatchAlgorithm,
) -> Assignment {
    let mut pairs = if matrix.is_degenerate() {
        Vec::new()
    } else {
        match algorithm {
            MatchAlgorithm::Hungarian => hungarian_pairs(matrix),
            MatchAlgorithm::Greedy => greedy_pairs(matrix, threshold),
        }
    };
    pairs.retain(|&(_, _, score)| score >= threshold);
    pairs.sort_by_key(|&(html, _, _)| html);

    let mut html_used = vec![false; matrix.html_count()];
    let mut pdf_used = vec![false; matrix.pdf_count()];
    for &(h, p, _) in &pairs {
        html_used[h] = true;
        pdf_used[p] = true;
    }
    Assignment {
        pairs: pairs
            .into_iter()
            .map(|(html_index, pdf_index, score)| MatchPair {
                html_index,
                pdf_index,
                score,
            })
            .collect(),
        unmatched_html: unused_indices(&html_used),
        unmatched_pdf: unused_indices(&pdf_used),
        algorithm,
    }
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter(|&(_, &u)| !u)
        .map(|(i, _)| i)
        .collect()
}

/// Exact solver. The rectangular similarity matrix is padded to square with
/// zero-weight dummies and minimized over cost `1 - similarity`; dummy pairs
/// are dropped from the output. Rows are processed in order, so ties between
/// equal-weight optima resolve deterministically.
///
/// Internally 1-based: `assigned[j]` is the row matched to column `j`, with
/// index 0 as the staging slot for the row currently being placed.
fn hungarian_pairs(matrix: &SimilarityMatrix) -> Vec<(usize, usize, f64)> {
    let rows = matrix.html_count();
    let cols = matrix.pdf_count();
    let n = rows.max(cols);
    let cost = |i: usize, j: usize| -> f64 {
        if i < rows && j < cols {
            1.0 - matrix.get(i, j)
        } else {
            1.0
        }
    };

    // Row and column potentials.
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut assigned = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        assigned[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = assigned[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[assigned[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if assigned[j0] == 0 {
                break;
            }
        }
        // Walk the augmenting path back, flipping assignments.
        loop {
            let j1 = way[j0];
            assigned[j0] = assigned[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pairs = Vec::new();
    for j in 1..=n {
        let i = assigned[j];
        if i == 0 {
            continue;
        }
        let (row, col) = (i - 1, j - 1);
        if row < rows && col < cols {
            pairs.push((row, col, matrix.get(row, col)));
        }
    }
    pairs
}

/// Approximation: repeatedly take the highest cell at or above `threshold`
/// and retire its row and column. Ties resolve to the first cell in
/// row-major order.
fn greedy_pairs(matrix: &SimilarityMatrix, threshold: f64) -> Vec<(usize, usize, f64)> {
    let rows = matrix.html_count();
    let cols = matrix.pdf_count();
    let mut row_used = vec![false; rows];
    let mut col_used = vec![false; cols];
    let mut pairs = Vec::new();
    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..rows {
            if row_used[i] {
                continue;
            }
            for j in 0..cols {
                if col_used[j] {
                    continue;
                }
                let score = matrix.get(i, j);
                if score < threshold {
                    continue;
                }
                if best.is_none_or(|(_, _, b)| score > b) {
                    best = Some((i, j, score));
                }
            }
        }
        let Some((i, j, score)) = best else {
            break;
        };
        row_used[i] = true;
        col_used[j] = true;
        pairs.push((i, j, score));
    }
    pairs
}
