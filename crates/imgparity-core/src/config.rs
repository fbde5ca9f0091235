//! Comparison configuration.

use crate::error::CompareError;
use crate::matching::MatchAlgorithm;
use crate::signature::SimilarityMethod;

/// Configuration for one comparator instance. Immutable once validated;
/// every comparison run on the instance sees the same values.
///
/// The two thresholds are deliberately independent: `hash_threshold` is
/// consulted only while dropping near-duplicates of caller-supplied filter
/// images, `similarity_threshold` only while accepting assignment pairs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareConfig {
    /// Minimum similarity for an assignment pair to count as a match.
    pub similarity_threshold: f64,
    /// Minimum similarity to a filter image for an extracted image to be
    /// dropped before matching.
    pub hash_threshold: f64,
    pub match_algorithm: MatchAlgorithm,
    pub similarity_method: SimilarityMethod,
    /// Identifiers dropped before matching (case-insensitive, exact or
    /// suffix match).
    pub exclude_image_names: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.95,
            hash_threshold: 0.95,
            match_algorithm: MatchAlgorithm::default(),
            similarity_method: SimilarityMethod::default(),
            exclude_image_names: Vec::new(),
        }
    }
}

impl CompareConfig {
    /// Fail fast on out-of-range values, before any parsing begins.
    pub fn validate(&self) -> Result<(), CompareError> {
        check_threshold("similarity_threshold", self.similarity_threshold)?;
        check_threshold("hash_threshold", self.hash_threshold)
    }
}

fn check_threshold(name: &str, value: f64) -> Result<(), CompareError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CompareError::Configuration(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CompareConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.similarity_threshold, 0.95);
        assert_eq!(config.hash_threshold, 0.95);
        assert_eq!(config.match_algorithm, MatchAlgorithm::Hungarian);
        assert_eq!(config.similarity_method, SimilarityMethod::PerceptualHash);
        assert!(config.exclude_image_names.is_empty());
    }

    #[test]
    fn out_of_range_similarity_threshold_is_rejected() {
        let config = CompareConfig {
            similarity_threshold: 1.5,
            ..CompareConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CompareError::Configuration(_)));
        assert!(err.to_string().contains("similarity_threshold"));
    }

    #[test]
    fn out_of_range_hash_threshold_is_rejected() {
        let config = CompareConfig {
            hash_threshold: -0.01,
            ..CompareConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = CompareConfig {
            similarity_threshold: f64::NAN,
            ..CompareConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn boundary_thresholds_are_accepted() {
        let config = CompareConfig {
            similarity_threshold: 0.0,
            hash_threshold: 1.0,
            ..CompareConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
