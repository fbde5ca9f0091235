//! Raster decoding to the canonical greyscale form.

use imgparity_core::RasterImage;

use crate::error::ExtractError;

/// Rec. 709 luma weights, matching what the `image` crate uses for its own
/// greyscale conversion so both decode paths produce comparable pixels.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Decode an encoded image payload (PNG, JPEG, GIF, BMP, WebP) to greyscale.
pub fn decode_raster(data: &[u8]) -> Result<RasterImage, ExtractError> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| ExtractError::Decode(format!("unsupported or corrupt image payload: {e}")))?;
    let luma = decoded.to_luma8();
    let (width, height) = luma.dimensions();
    RasterImage::from_luma8(width, height, luma.into_raw()).map_err(ExtractError::from)
}

/// Convert raw (decompressed) PDF image samples to greyscale using the
/// stream metadata. Supports the sample layouts this engine encounters in
/// practice: 8-bit DeviceRGB, 8-bit DeviceGray, and 1-bit DeviceGray
/// (byte-aligned rows). Anything else is a decode error the caller may
/// choose to skip.
pub fn decode_pdf_samples(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: Option<&str>,
    bits_per_component: u32,
) -> Result<RasterImage, ExtractError> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| ExtractError::Decode("image dimensions overflow".to_string()))?;

    let pixels = match (color_space, bits_per_component) {
        (Some("DeviceGray") | Some("CalGray"), 8) => gray8(data, pixel_count)?,
        (Some("DeviceRGB") | Some("CalRGB"), 8) => rgb8(data, pixel_count)?,
        (Some("DeviceGray") | Some("CalGray"), 1) => gray1(data, width, height)?,
        // Color space missing or unrecognized: infer the layout from the
        // sample count.
        (_, 8) if data.len() == pixel_count => gray8(data, pixel_count)?,
        (_, 8) if data.len() == pixel_count * 3 => rgb8(data, pixel_count)?,
        (space, bits) => {
            return Err(ExtractError::Decode(format!(
                "unsupported sample layout: color space {}, {bits} bits/component",
                space.unwrap_or("unknown")
            )));
        }
    };
    RasterImage::from_luma8(width, height, pixels).map_err(ExtractError::from)
}

fn gray8(data: &[u8], pixel_count: usize) -> Result<Vec<u8>, ExtractError> {
    if data.len() < pixel_count {
        return Err(ExtractError::Decode(format!(
            "truncated greyscale data: {} of {pixel_count} samples",
            data.len()
        )));
    }
    Ok(data[..pixel_count].to_vec())
}

fn rgb8(data: &[u8], pixel_count: usize) -> Result<Vec<u8>, ExtractError> {
    let required = pixel_count * 3;
    if data.len() < required {
        return Err(ExtractError::Decode(format!(
            "truncated RGB data: {} of {required} samples",
            data.len()
        )));
    }
    Ok(data[..required]
        .chunks_exact(3)
        .map(|px| {
            let luma =
                LUMA_R * f32::from(px[0]) + LUMA_G * f32::from(px[1]) + LUMA_B * f32::from(px[2]);
            luma.round().min(255.0) as u8
        })
        .collect())
}

/// 1-bit greyscale, rows padded to byte boundaries, 0 = black.
fn gray1(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExtractError> {
    let row_bytes = (width as usize).div_ceil(8);
    let required = row_bytes * height as usize;
    if data.len() < required {
        return Err(ExtractError::Decode(format!(
            "truncated 1-bit data: {} of {required} bytes",
            data.len()
        )));
    }
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for row in 0..height as usize {
        let row_data = &data[row * row_bytes..(row + 1) * row_bytes];
        for col in 0..width as usize {
            let bit = (row_data[col / 8] >> (7 - col % 8)) & 1;
            pixels.push(if bit == 1 { 255 } else { 0 });
        }
    }
    Ok(pixels)
}
