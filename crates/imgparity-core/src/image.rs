//! Document image model.

use std::fmt;

use crate::raster::RasterImage;

/// Which document an image was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentSource {
    Html,
    Pdf,
}

impl DocumentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSource::Html => "html",
            DocumentSource::Pdf => "pdf",
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raster image extracted from a source document.
///
/// Carries the raw encoded payload bytes, the decoded greyscale raster, the
/// ordinal position within the source document, and an optional original
/// identifier. HTML images may carry an identifier from their markup; PDF
/// images are anonymous and fall back to a synthetic index-based one.
/// Immutable once extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentImage {
    source: DocumentSource,
    index: usize,
    name: Option<String>,
    data: Vec<u8>,
    raster: RasterImage,
}

impl DocumentImage {
    pub fn new(
        source: DocumentSource,
        index: usize,
        name: Option<String>,
        data: Vec<u8>,
        raster: RasterImage,
    ) -> Self {
        Self {
            source,
            index,
            name,
            data,
            raster,
        }
    }

    pub fn source(&self) -> DocumentSource {
        self.source
    }

    /// Ordinal position within the source document (pre-filtering).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Original identifier from the source markup, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw encoded payload bytes as extracted from the document.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decoded greyscale raster.
    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    /// Identifier used in reports and name-based filtering: the original
    /// name when present, otherwise `source-index` (e.g. `pdf-3`).
    pub fn identifier(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}-{}", self.source.as_str(), self.index),
        }
    }
}
