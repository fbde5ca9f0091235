//! Noise filtering of extracted images.
//!
//! Removes known decorative assets (logos, headers) before matching, either
//! by identifier or by similarity to caller-supplied filter images. Images
//! and their signatures travel together so nothing is hashed twice, and
//! survivors keep their original ordinal indices and relative order.

use crate::image::DocumentImage;
use crate::signature::ImageSignature;

/// Drop images whose identifier matches `exclude_names` (case-insensitive,
/// exact or suffix) or whose similarity to any of `filter_signatures` is at
/// least `hash_threshold`. `images` and `signatures` are parallel slices;
/// the surviving pairs come back in their original order.
///
/// With an empty exclude set and no filter signatures this is a no-op.
pub fn filter_images(
    images: Vec<DocumentImage>,
    signatures: Vec<ImageSignature>,
    exclude_names: &[String],
    filter_signatures: &[ImageSignature],
    hash_threshold: f64,
) -> (Vec<DocumentImage>, Vec<ImageSignature>) {
    assert_eq!(images.len(), signatures.len());
    if exclude_names.is_empty() && filter_signatures.is_empty() {
        return (images, signatures);
    }
    images
        .into_iter()
        .zip(signatures)
        .filter(|(image, signature)| {
            if name_excluded(image, exclude_names) {
                return false;
            }
            !filter_signatures
                .iter()
                .any(|f| signature.similarity(f) >= hash_threshold)
        })
        .unzip()
}

fn name_excluded(image: &DocumentImage, exclude_names: &[String]) -> bool {
    let identifier = image.identifier().to_ascii_lowercase();
    exclude_names.iter().any(|name| {
        let name = name.to_ascii_lowercase();
        identifier == name || identifier.ends_with(&name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::DocumentSource;
    use crate::raster::RasterImage;
    use crate::signature::SimilarityMethod;

    fn image(index: usize, name: Option<&str>, fill: u8) -> (DocumentImage, ImageSignature) {
        let raster = RasterImage::from_luma8(4, 4, vec![fill; 16]).unwrap();
        let signature = ImageSignature::compute(&raster, SimilarityMethod::Histogram);
        let image = DocumentImage::new(
            DocumentSource::Html,
            index,
            name.map(str::to_string),
            vec![fill],
            raster,
        );
        (image, signature)
    }

    #[test]
    fn empty_filters_are_a_no_op() {
        let (a, sa) = image(0, Some("a.png"), 10);
        let (b, sb) = image(1, None, 20);
        let (images, signatures) =
            filter_images(vec![a.clone(), b.clone()], vec![sa, sb], &[], &[], 0.95);
        assert_eq!(images, vec![a, b]);
        assert_eq!(signatures.len(), 2);
    }

    #[test]
    fn name_filter_is_case_insensitive_suffix_match() {
        let (a, sa) = image(0, Some("assets/Logo.PNG"), 10);
        let (b, sb) = image(1, Some("figure1.png"), 20);
        let exclude = vec!["logo.png".to_string()];
        let (images, _) = filter_images(vec![a, b], vec![sa, sb], &exclude, &[], 0.95);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].identifier(), "figure1.png");
    }

    #[test]
    fn content_filter_drops_near_duplicates_of_filter_images() {
        let (a, sa) = image(0, None, 10);
        let (b, sb) = image(1, None, 200);
        let (_, filter_sig) = image(0, None, 10);
        let (images, signatures) =
            filter_images(vec![a, b], vec![sa, sb], &[], &[filter_sig], 0.95);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].index(), 1);
        assert_eq!(signatures.len(), 1);
    }

    #[test]
    fn survivors_keep_order_and_original_indices() {
        let (a, sa) = image(0, Some("drop.png"), 10);
        let (b, sb) = image(1, None, 20);
        let (c, sc) = image(2, None, 30);
        let exclude = vec!["drop.png".to_string()];
        let (images, _) = filter_images(vec![a, b, c], vec![sa, sb, sc], &exclude, &[], 0.95);
        assert_eq!(
            images.iter().map(DocumentImage::index).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn synthetic_identifiers_participate_in_name_filtering() {
        let (a, sa) = image(0, None, 10);
        let exclude = vec!["html-0".to_string()];
        let (images, _) = filter_images(vec![a], vec![sa], &exclude, &[], 0.95);
        assert!(images.is_empty());
    }
}
