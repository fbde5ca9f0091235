//! PDF image extraction.
//!
//! Walks the page tree and each page's `/Resources/XObject` dictionary in
//! entry order, recursing through Form XObjects (cycle-safe), and collects
//! every Image-subtype stream as a decoded raster. Placement on the page is
//! irrelevant to parity checking, so content streams are never interpreted.

use std::collections::HashSet;

use imgparity_core::{DocumentImage, DocumentSource, RasterImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::decode::{decode_pdf_samples, decode_raster};
use crate::error::ExtractError;

/// Extract every decodable embedded raster image from a PDF byte buffer, in
/// page-then-in-page order. PDF images are anonymous: they get synthetic
/// index-based identifiers.
pub fn extract_pdf_images(bytes: &[u8]) -> Result<Vec<DocumentImage>, ExtractError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractError::Pdf(format!("failed to load PDF document: {e}")))?;
    let mut images = Vec::new();
    for (_page_number, page_id) in doc.get_pages() {
        let Some(resources) = page_resources(&doc, page_id) else {
            continue;
        };
        let mut visited = HashSet::new();
        collect_from_resources(&doc, resources, &mut visited, &mut images);
    }
    Ok(images)
}

/// Resolve a page's resource dictionary, following the `/Parent` chain for
/// inherited resources. The chain is bounded to reject malformed loops.
fn page_resources<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a Dictionary> {
    let mut current = page_id;
    for _ in 0..32 {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(entry) = dict.get(b"Resources") {
            if let Ok(resources) = resolve(doc, entry).as_dict() {
                return Some(resources);
            }
        }
        match dict.get(b"Parent").ok().and_then(|o| o.as_reference().ok()) {
            Some(parent) => current = parent,
            None => return None,
        }
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn collect_from_resources(
    doc: &Document,
    resources: &Dictionary,
    visited: &mut HashSet<ObjectId>,
    images: &mut Vec<DocumentImage>,
) {
    let Ok(entry) = resources.get(b"XObject") else {
        return;
    };
    let Ok(xobjects) = resolve(doc, entry).as_dict() else {
        return;
    };
    for (name, entry) in xobjects.iter() {
        let object = match entry.as_reference() {
            Ok(id) => {
                if !visited.insert(id) {
                    continue;
                }
                match doc.get_object(id) {
                    Ok(object) => object,
                    Err(e) => {
                        tracing::debug!(
                            name = %String::from_utf8_lossy(name),
                            "unresolvable XObject reference skipped: {e}"
                        );
                        continue;
                    }
                }
            }
            Err(_) => entry,
        };
        let Ok(stream) = object.as_stream() else {
            continue;
        };
        match xobject_subtype(stream).as_deref() {
            Some("Image") => match image_from_stream(stream) {
                Ok((data, raster)) => {
                    let index = images.len();
                    images.push(DocumentImage::new(
                        DocumentSource::Pdf,
                        index,
                        None,
                        data,
                        raster,
                    ));
                }
                Err(e) => {
                    tracing::debug!(
                        name = %String::from_utf8_lossy(name),
                        "embedded image skipped: {e}"
                    );
                }
            },
            Some("Form") => {
                if let Ok(inner) = stream.dict.get(b"Resources") {
                    if let Ok(inner) = resolve(doc, inner).as_dict() {
                        collect_from_resources(doc, inner, visited, images);
                    }
                }
            }
            _ => {}
        }
    }
}

fn xobject_subtype(stream: &Stream) -> Option<String> {
    match stream.dict.get(b"Subtype") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Pull the raw payload and decoded raster out of an Image XObject stream.
/// Any failure here means this one image is skipped by the caller.
fn image_from_stream(stream: &Stream) -> Result<(Vec<u8>, RasterImage), ExtractError> {
    let dict = &stream.dict;
    if dict
        .get(b"ImageMask")
        .ok()
        .and_then(|o| o.as_bool().ok())
        .unwrap_or(false)
    {
        return Err(ExtractError::Decode(
            "stencil mask, not a raster image".to_string(),
        ));
    }

    let width = dict_dimension(dict, b"Width")?;
    let height = dict_dimension(dict, b"Height")?;
    let bits_per_component = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8) as u32;
    let color_space = color_space_name(dict);
    let filters = filter_chain(dict);

    match filters.last().map(String::as_str) {
        Some("DCTDecode") => {
            // The raw stream content is the JPEG itself unless earlier
            // filters wrap it.
            let data = if filters.len() == 1 {
                stream.content.clone()
            } else {
                decompressed(stream)?
            };
            let raster = decode_raster(&data)?;
            Ok((data, raster))
        }
        Some(unsupported @ ("JPXDecode" | "JBIG2Decode" | "CCITTFaxDecode")) => Err(
            ExtractError::Decode(format!("unsupported image filter {unsupported}")),
        ),
        _ => {
            let data = if filters.is_empty() {
                stream.content.clone()
            } else {
                decompressed(stream)?
            };
            let raster = decode_pdf_samples(
                &data,
                width,
                height,
                color_space.as_deref(),
                bits_per_component,
            )?;
            Ok((data, raster))
        }
    }
}

fn decompressed(stream: &Stream) -> Result<Vec<u8>, ExtractError> {
    stream
        .decompressed_content()
        .map_err(|e| ExtractError::Resource(format!("failed to decompress image stream: {e}")))
}

fn dict_dimension(dict: &Dictionary, key: &[u8]) -> Result<u32, ExtractError> {
    let value = dict
        .get(key)
        .ok()
        .and_then(|o| o.as_i64().ok())
        .ok_or_else(|| {
            ExtractError::Decode(format!("missing /{}", String::from_utf8_lossy(key)))
        })?;
    u32::try_from(value).map_err(|_| {
        ExtractError::Decode(format!(
            "/{} out of range: {value}",
            String::from_utf8_lossy(key)
        ))
    })
}

/// ColorSpace may be a name or an array (e.g. `[/ICCBased 5 0 R]`); only the
/// leading name matters for sample-layout selection.
fn color_space_name(dict: &Dictionary) -> Option<String> {
    let object = dict.get(b"ColorSpace").ok()?;
    match object {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Array(items) => items.first().and_then(|o| {
            if let Object::Name(name) = o {
                Some(String::from_utf8_lossy(name).into_owned())
            } else {
                None
            }
        }),
        _ => None,
    }
}

/// Filter can be absent, a single name, or a chain.
fn filter_chain(dict: &Dictionary) -> Vec<String> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![String::from_utf8_lossy(name).into_owned()],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|o| {
                if let Object::Name(name) = o {
                    Some(String::from_utf8_lossy(name).into_owned())
                } else {
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}
