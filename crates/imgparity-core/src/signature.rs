//! Image signatures and pluggable similarity methods.
//!
//! A signature is a fixed-size fingerprint of a raster image. Two methods
//! sit behind one contract: a 64-bit DCT perceptual hash (the default,
//! robust to recompression and minor rescaling) and a 64-bin luma histogram.
//! Signatures are pure functions of the pixel payload and the method, so
//! identical inputs always produce identical signatures.

use std::fmt;
use std::str::FromStr;

use crate::raster::RasterImage;

/// Edge length of the intermediate downsample grid for the perceptual hash.
const SAMPLE_SIZE: usize = 32;
/// Edge length of the low-frequency DCT block kept for the hash.
const BLOCK_SIZE: usize = 8;
/// Bit length of the perceptual hash.
const HASH_BITS: u32 = 64;
/// Bin count of the histogram signature (256 luma levels / 4).
const HISTOGRAM_BINS: usize = 64;

/// Similarity method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimilarityMethod {
    /// 64-bit DCT perceptual hash compared by Hamming distance.
    PerceptualHash,
    /// Normalized luma histogram compared by intersection.
    Histogram,
}

impl SimilarityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMethod::PerceptualHash => "phash",
            SimilarityMethod::Histogram => "histogram",
        }
    }
}

impl Default for SimilarityMethod {
    fn default() -> Self {
        SimilarityMethod::PerceptualHash
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct SimilarityMethodParseError(pub String);

impl fmt::Display for SimilarityMethodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown similarity method '{}'", self.0)
    }
}

impl std::error::Error for SimilarityMethodParseError {}

impl FromStr for SimilarityMethod {
    type Err = SimilarityMethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "phash" | "perceptual-hash" => Ok(SimilarityMethod::PerceptualHash),
            "histogram" => Ok(SimilarityMethod::Histogram),
            _ => Err(SimilarityMethodParseError(lower)),
        }
    }
}

/// Fixed-size fingerprint of a raster image under one similarity method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageSignature {
    PerceptualHash(u64),
    Histogram(Vec<f32>),
}

impl ImageSignature {
    /// Compute the signature of `raster` under `method`.
    pub fn compute(raster: &RasterImage, method: SimilarityMethod) -> Self {
        match method {
            SimilarityMethod::PerceptualHash => {
                ImageSignature::PerceptualHash(perceptual_hash(raster))
            }
            SimilarityMethod::Histogram => ImageSignature::Histogram(luma_histogram(raster)),
        }
    }

    pub fn method(&self) -> SimilarityMethod {
        match self {
            ImageSignature::PerceptualHash(_) => SimilarityMethod::PerceptualHash,
            ImageSignature::Histogram(_) => SimilarityMethod::Histogram,
        }
    }

    /// Similarity score in [0, 1]; 1.0 = identical signatures. Signatures
    /// produced by different methods are incomparable and score 0.0.
    pub fn similarity(&self, other: &ImageSignature) -> f64 {
        match (self, other) {
            (ImageSignature::PerceptualHash(a), ImageSignature::PerceptualHash(b)) => {
                1.0 - f64::from((a ^ b).count_ones()) / f64::from(HASH_BITS)
            }
            (ImageSignature::Histogram(a), ImageSignature::Histogram(b)) => {
                histogram_intersection(a, b)
            }
            _ => 0.0,
        }
    }
}

/// 64-bit DCT hash: area-average to 32x32, 2-D DCT, keep the 8x8
/// low-frequency block, threshold each AC coefficient against the mean of
/// the 63 AC coefficients. The DC coefficient carries overall brightness
/// only and is excluded.
fn perceptual_hash(raster: &RasterImage) -> u64 {
    let pixels: Vec<f64> = raster.pixels().iter().map(|&p| f64::from(p)).collect();
    let resized = resize_average(
        &pixels,
        raster.width() as usize,
        raster.height() as usize,
        SAMPLE_SIZE,
        SAMPLE_SIZE,
    );
    let spectrum = dct2(&resized, SAMPLE_SIZE, SAMPLE_SIZE);

    let mut block = [0.0f64; BLOCK_SIZE * BLOCK_SIZE];
    for by in 0..BLOCK_SIZE {
        for bx in 0..BLOCK_SIZE {
            block[by * BLOCK_SIZE + bx] = spectrum[by * SAMPLE_SIZE + bx];
        }
    }
    let mean: f64 = block.iter().skip(1).sum::<f64>() / (block.len() as f64 - 1.0);
    let mut hash = 0u64;
    for (idx, value) in block.iter().enumerate().skip(1) {
        if *value > mean {
            hash |= 1u64 << idx;
        }
    }
    hash
}

/// Normalized 64-bin luma histogram. All-zero for an empty raster.
fn luma_histogram(raster: &RasterImage) -> Vec<f32> {
    let mut bins = vec![0.0f32; HISTOGRAM_BINS];
    let pixels = raster.pixels();
    if pixels.is_empty() {
        return bins;
    }
    for &p in pixels {
        bins[p as usize / (256 / HISTOGRAM_BINS)] += 1.0;
    }
    let total = pixels.len() as f32;
    for bin in &mut bins {
        *bin /= total;
    }
    bins
}

fn histogram_intersection(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x.min(y)))
        .sum()
}

/// Box-average resample. Each output cell averages the source pixels its
/// footprint covers, so the result is stable under minor input rescaling.
fn resize_average(
    pixels: &[f64],
    width: usize,
    height: usize,
    new_width: usize,
    new_height: usize,
) -> Vec<f64> {
    assert_eq!(pixels.len(), width * height);
    if width == 0 || height == 0 || new_width == 0 || new_height == 0 {
        return vec![0.0; new_width * new_height];
    }
    let scale_x = width as f64 / new_width as f64;
    let scale_y = height as f64 / new_height as f64;
    let mut output = vec![0.0f64; new_width * new_height];
    for ny in 0..new_height {
        let src_y0 = (ny as f64 * scale_y).floor() as isize;
        let src_y1 = (((ny + 1) as f64 * scale_y).ceil() as isize).min(height as isize);
        for nx in 0..new_width {
            let src_x0 = (nx as f64 * scale_x).floor() as isize;
            let src_x1 = (((nx + 1) as f64 * scale_x).ceil() as isize).min(width as isize);
            let mut sum = 0.0f64;
            let mut count = 0usize;
            for sy in src_y0.max(0)..src_y1.max(src_y0 + 1) {
                for sx in src_x0.max(0)..src_x1.max(src_x0 + 1) {
                    sum += pixels[sy as usize * width + sx as usize];
                    count += 1;
                }
            }
            output[ny * new_width + nx] = if count == 0 { 0.0 } else { sum / count as f64 };
        }
    }
    output
}

/// Separable 2-D DCT-II, rows then columns, unnormalized.
fn dct2(input: &[f64], width: usize, height: usize) -> Vec<f64> {
    assert_eq!(input.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut rows = vec![0.0f64; width * height];
    for y in 0..height {
        for u in 0..width {
            let mut sum = 0.0f64;
            for x in 0..width {
                let angle = std::f64::consts::PI / width as f64 * (x as f64 + 0.5) * u as f64;
                sum += input[y * width + x] * angle.cos();
            }
            rows[y * width + u] = sum;
        }
    }
    let mut output = vec![0.0f64; width * height];
    for x in 0..width {
        for v in 0..height {
            let mut sum = 0.0f64;
            for y in 0..height {
                let angle = std::f64::consts::PI / height as f64 * (y as f64 + 0.5) * v as f64;
                sum += rows[y * width + x] * angle.cos();
            }
            output[v * width + x] = sum;
        }
    }
    output
}
