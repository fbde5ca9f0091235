//! Final comparison result record.

use crate::matching::Assignment;

/// Counts and rates of one comparison, plus the full assignment for
/// inspection. Image counts are post-filter: filtered-out images appear in
/// neither the numerators nor the denominators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareResult {
    pub html_image_count: usize,
    pub pdf_image_count: usize,
    pub matched_count: usize,
    pub unmatched_html_count: usize,
    pub unmatched_pdf_count: usize,
    /// `matched_count / html_image_count`, 0.0 when there are no HTML images.
    pub match_rate_by_html: f64,
    /// `matched_count / pdf_image_count`, 0.0 when there are no PDF images.
    pub match_rate_by_pdf: f64,
    pub assignment: Assignment,
}

impl CompareResult {
    /// Assemble the record from post-filter counts and the solved
    /// assignment.
    pub fn from_assignment(
        html_image_count: usize,
        pdf_image_count: usize,
        assignment: Assignment,
    ) -> Self {
        let matched_count = assignment.pairs.len();
        debug_assert!(matched_count <= html_image_count.min(pdf_image_count));
        debug_assert_eq!(
            assignment.unmatched_html.len(),
            html_image_count - matched_count
        );
        debug_assert_eq!(
            assignment.unmatched_pdf.len(),
            pdf_image_count - matched_count
        );
        Self {
            html_image_count,
            pdf_image_count,
            matched_count,
            unmatched_html_count: assignment.unmatched_html.len(),
            unmatched_pdf_count: assignment.unmatched_pdf.len(),
            match_rate_by_html: rate(matched_count, html_image_count),
            match_rate_by_pdf: rate(matched_count, pdf_image_count),
            assignment,
        }
    }
}

fn rate(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchAlgorithm, MatchPair};

    fn assignment(pairs: Vec<MatchPair>, unmatched_html: Vec<usize>, unmatched_pdf: Vec<usize>) -> Assignment {
        Assignment {
            pairs,
            unmatched_html,
            unmatched_pdf,
            algorithm: MatchAlgorithm::Hungarian,
        }
    }

    #[test]
    fn rates_divide_by_each_side() {
        let pair = MatchPair {
            html_index: 0,
            pdf_index: 1,
            score: 0.99,
        };
        let result = CompareResult::from_assignment(2, 4, assignment(vec![pair], vec![1], vec![0, 2, 3]));
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.unmatched_html_count, 1);
        assert_eq!(result.unmatched_pdf_count, 3);
        assert!((result.match_rate_by_html - 0.5).abs() < 1e-9);
        assert!((result.match_rate_by_pdf - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_denominators_yield_zero_rates() {
        let result = CompareResult::from_assignment(0, 0, assignment(Vec::new(), Vec::new(), Vec::new()));
        assert_eq!(result.match_rate_by_html, 0.0);
        assert_eq!(result.match_rate_by_pdf, 0.0);
        assert_eq!(result.matched_count, 0);
    }

    #[test]
    fn empty_html_side_with_pdf_images() {
        let result =
            CompareResult::from_assignment(0, 2, assignment(Vec::new(), Vec::new(), vec![0, 1]));
        assert_eq!(result.match_rate_by_html, 0.0);
        assert_eq!(result.match_rate_by_pdf, 0.0);
        assert_eq!(result.unmatched_pdf_count, 2);
    }

    #[test]
    fn perfect_match_has_unit_rates() {
        let pairs = vec![
            MatchPair {
                html_index: 0,
                pdf_index: 0,
                score: 1.0,
            },
            MatchPair {
                html_index: 1,
                pdf_index: 1,
                score: 1.0,
            },
        ];
        let result = CompareResult::from_assignment(2, 2, assignment(pairs, Vec::new(), Vec::new()));
        assert_eq!(result.match_rate_by_html, 1.0);
        assert_eq!(result.match_rate_by_pdf, 1.0);
        assert_eq!(result.unmatched_html_count, 0);
        assert_eq!(result.unmatched_pdf_count, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn result_serializes_to_json() {
        let result = CompareResult::from_assignment(0, 0, assignment(Vec::new(), Vec::new(), Vec::new()));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"matched_count\":0"));
        assert!(json.contains("\"match_rate_by_html\":0.0"));
    }
}
