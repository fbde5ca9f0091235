//! HTML image extraction.
//!
//! Tokenizes the markup with html5ever and collects every `<img>` element in
//! document order. Only inline `data:` URIs are decodable from a raw byte
//! buffer, so external and broken references are treated as absent rather
//! than errors. The `alt` (or `title`) attribute becomes the image
//! identifier when present, keeping name-based exclusion usable for HTML
//! assets.

use std::cell::RefCell;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use html5ever::tokenizer::{
    BufferQueue, StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use imgparity_core::{DocumentImage, DocumentSource};

use crate::decode::decode_raster;
use crate::error::ExtractError;

/// How much of the buffer is inspected for a binary sniff and a
/// `<meta charset>` declaration.
const HEAD_SCAN_LIMIT: usize = 1024;

/// Extract every decodable embedded raster image from an HTML byte buffer,
/// in document order.
pub fn extract_html_images(bytes: &[u8]) -> Result<Vec<DocumentImage>, ExtractError> {
    let markup = decode_markup(bytes)?;
    let sink = ImgCollector {
        images: RefCell::new(Vec::new()),
    };
    let input = BufferQueue::default();
    input.push_back(markup.into());
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    Ok(tokenizer.sink.images.into_inner())
}

struct ImgCollector {
    images: RefCell<Vec<DocumentImage>>,
}

impl TokenSink for ImgCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let TagToken(tag) = token {
            if matches!(tag.kind, StartTag) && tag.name.as_ref() == "img" {
                self.collect_img(&tag);
            }
        }
        TokenSinkResult::Continue
    }
}

impl ImgCollector {
    fn collect_img(&self, tag: &Tag) {
        let mut src = None;
        let mut alt = None;
        let mut title = None;
        for attr in &tag.attrs {
            match attr.name.local.as_ref() {
                "src" => src = Some(attr.value.to_string()),
                "alt" => alt = Some(attr.value.to_string()),
                "title" => title = Some(attr.value.to_string()),
                _ => {}
            }
        }
        let Some(src) = src else {
            tracing::debug!("img element without src attribute skipped");
            return;
        };
        let Some(payload) = decode_data_uri(&src) else {
            tracing::debug!("external or non-raster image reference skipped");
            return;
        };
        match decode_raster(&payload) {
            Ok(raster) => {
                let mut images = self.images.borrow_mut();
                let index = images.len();
                let name = alt
                    .filter(|s| !s.is_empty())
                    .or(title.filter(|s| !s.is_empty()));
                images.push(DocumentImage::new(
                    DocumentSource::Html,
                    index,
                    name,
                    payload,
                    raster,
                ));
            }
            Err(err) => tracing::debug!(error = %err, "inline image payload skipped"),
        }
    }
}

/// Decode a `data:image/...;base64,` URI to its payload bytes. Long inline
/// payloads may be wrapped with whitespace, which base64 decoders reject, so
/// it is stripped first.
fn decode_data_uri(src: &str) -> Option<Vec<u8>> {
    let rest = src.trim().strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.starts_with("image/") || !meta.ends_with(";base64") {
        return None;
    }
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64.decode(compact.as_bytes()).ok()
}

/// Decode the input bytes to markup text: BOM first, then a bounded
/// `<meta charset>` scan, then UTF-8. Buffers that look like binary data
/// (NUL bytes in the head without a BOM) are rejected; they cannot be an
/// HTML document.
fn decode_markup(bytes: &[u8]) -> Result<String, ExtractError> {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes) {
        let (text, _, _) = encoding.decode(bytes);
        return Ok(text.into_owned());
    }
    let head = &bytes[..bytes.len().min(HEAD_SCAN_LIMIT)];
    if head.contains(&0) {
        return Err(ExtractError::Html(
            "input looks like binary data, not markup".to_string(),
        ));
    }
    let encoding = meta_charset(head).unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

fn meta_charset(head: &[u8]) -> Option<&'static encoding_rs::Encoding> {
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let pos = head.find("charset=")?;
    let rest = head[pos + "charset=".len()..].trim_start_matches(['"', '\'']);
    let label: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
        .collect();
    encoding_rs::Encoding::for_label(label.as_bytes())
}
