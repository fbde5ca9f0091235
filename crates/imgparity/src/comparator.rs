//! Comparator orchestrator: extract, filter, sign, match, report.

use imgparity_core::{
    Assignment, CompareConfig, CompareError, CompareResult, DocumentImage, ImageSignature,
    MatchPair, SimilarityMatrix, filter_images, match_images,
};
use imgparity_parse::{decode_raster, extract_html_images, extract_pdf_images};

/// Compares the embedded images of an HTML document against those of a PDF
/// document.
///
/// A comparator is an immutable value: it holds nothing but validated
/// configuration, so one instance is freely shareable and safe to use for
/// repeated and concurrent comparisons. All per-call state (parsed
/// documents, signatures, the similarity matrix) is scoped to a single
/// [`compare`](Comparator::compare) invocation and dropped on every exit
/// path.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    /// Create a comparator, failing fast on invalid configuration before
    /// any document is parsed.
    pub fn new(config: CompareConfig) -> Result<Self, CompareError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare without caller-supplied filter images.
    pub fn compare(&self, html: &[u8], pdf: &[u8]) -> Result<CompareResult, CompareError> {
        self.compare_with_filters(html, pdf, &[])
    }

    /// Run the full pipeline: extract both documents, drop excluded and
    /// filter-matching images, score every cross-document pair, solve the
    /// assignment, and assemble the result.
    ///
    /// `filter_images_bytes` holds encoded images (logos, headers) whose
    /// near-duplicates are removed from both sides before matching. Unlike
    /// document-embedded images, these are caller input: one that cannot be
    /// decoded is a [`CompareError::ImageDecode`] error rather than a skip.
    pub fn compare_with_filters(
        &self,
        html: &[u8],
        pdf: &[u8],
        filter_images_bytes: &[Vec<u8>],
    ) -> Result<CompareResult, CompareError> {
        let config = &self.config;
        let (html_images, pdf_images) = self.extract(html, pdf)?;

        let mut filter_signatures = Vec::with_capacity(filter_images_bytes.len());
        for bytes in filter_images_bytes {
            let raster = decode_raster(bytes).map_err(CompareError::from)?;
            filter_signatures.push(ImageSignature::compute(&raster, config.similarity_method));
        }

        let html_signatures = self.signatures(&html_images);
        let pdf_signatures = self.signatures(&pdf_images);

        let (html_images, html_signatures) = filter_images(
            html_images,
            html_signatures,
            &config.exclude_image_names,
            &filter_signatures,
            config.hash_threshold,
        );
        let (pdf_images, pdf_signatures) = filter_images(
            pdf_images,
            pdf_signatures,
            &config.exclude_image_names,
            &filter_signatures,
            config.hash_threshold,
        );

        let matrix = SimilarityMatrix::build(&html_signatures, &pdf_signatures);
        let assignment = match_images(&matrix, config.similarity_threshold, config.match_algorithm);
        let assignment = to_original_ordinals(assignment, &html_images, &pdf_images);
        Ok(CompareResult::from_assignment(
            html_images.len(),
            pdf_images.len(),
            assignment,
        ))
    }

    #[cfg(feature = "parallel")]
    fn extract(
        &self,
        html: &[u8],
        pdf: &[u8],
    ) -> Result<(Vec<DocumentImage>, Vec<DocumentImage>), CompareError> {
        let (html_images, pdf_images) =
            rayon::join(|| extract_html_images(html), || extract_pdf_images(pdf));
        Ok((
            html_images.map_err(CompareError::from)?,
            pdf_images.map_err(CompareError::from)?,
        ))
    }

    #[cfg(not(feature = "parallel"))]
    fn extract(
        &self,
        html: &[u8],
        pdf: &[u8],
    ) -> Result<(Vec<DocumentImage>, Vec<DocumentImage>), CompareError> {
        let html_images = extract_html_images(html).map_err(CompareError::from)?;
        let pdf_images = extract_pdf_images(pdf).map_err(CompareError::from)?;
        Ok((html_images, pdf_images))
    }

    #[cfg(feature = "parallel")]
    fn signatures(&self, images: &[DocumentImage]) -> Vec<ImageSignature> {
        use rayon::prelude::*;

        images
            .par_iter()
            .map(|image| ImageSignature::compute(image.raster(), self.config.similarity_method))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn signatures(&self, images: &[DocumentImage]) -> Vec<ImageSignature> {
        images
            .iter()
            .map(|image| ImageSignature::compute(image.raster(), self.config.similarity_method))
            .collect()
    }
}

/// The matcher works in filtered-sequence positions; translate back to the
/// ordinals each image held in its source document so the report stays
/// meaningful after filtering.
fn to_original_ordinals(
    assignment: Assignment,
    html_images: &[DocumentImage],
    pdf_images: &[DocumentImage],
) -> Assignment {
    Assignment {
        pairs: assignment
            .pairs
            .into_iter()
            .map(|pair| MatchPair {
                html_index: html_images[pair.html_index].index(),
                pdf_index: pdf_images[pair.pdf_index].index(),
                score: pair.score,
            })
            .collect(),
        unmatched_html: assignment
            .unmatched_html
            .into_iter()
            .map(|i| html_images[i].index())
            .collect(),
        unmatched_pdf: assignment
            .unmatched_pdf
            .into_iter()
            .map(|i| pdf_images[i].index())
            .collect(),
        algorithm: assignment.algorithm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = CompareConfig {
            similarity_threshold: 2.0,
            ..CompareConfig::default()
        };
        let err = Comparator::new(config).unwrap_err();
        assert!(matches!(err, CompareError::Configuration(_)));
    }

    #[test]
    fn default_comparator_has_default_config() {
        let comparator = Comparator::default();
        assert_eq!(comparator.config(), &CompareConfig::default());
    }

    #[test]
    fn malformed_pdf_fails_before_any_result() {
        let comparator = Comparator::default();
        let err = comparator
            .compare(b"<html></html>", b"garbage, not a pdf")
            .unwrap_err();
        assert!(matches!(err, CompareError::PdfParse(_)));
    }

    #[test]
    fn binary_html_fails_with_html_error() {
        let comparator = Comparator::default();
        let mut binary = vec![0u8; 32];
        binary[0] = b'<';
        // Minimal valid empty PDF is overkill here; the HTML side fails first.
        let err = comparator.compare(&binary, b"%PDF-1.5").unwrap_err();
        assert!(matches!(err, CompareError::HtmlParse(_)));
    }

    #[test]
    fn undecodable_filter_image_is_an_error() {
        let comparator = Comparator::default();
        let err = comparator
            .compare_with_filters(
                b"<html></html>",
                b"%PDF-garbage",
                &[b"not an image".to_vec()],
            )
            .unwrap_err();
        // Extraction order: documents first, so the PDF error wins here; a
        // filter decode failure needs parseable documents to surface.
        assert!(matches!(
            err,
            CompareError::PdfParse(_) | CompareError::ImageDecode(_)
        ));
    }
}
