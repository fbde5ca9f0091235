//! Performance benchmarks for imgparity-rs.
//!
//! Benchmarks cover the full comparison pipeline (extract + hash + match)
//! and the signature stage in isolation, across small and medium image
//! populations.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use imgparity::{Comparator, ImageSignature, RasterImage, SimilarityMethod};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Cursor;

const SIZE: u32 = 64;

// ---------------------------------------------------------------------------
// Fixture generators
// ---------------------------------------------------------------------------

fn pattern(seed: u32) -> image::GrayImage {
    image::GrayImage::from_fn(SIZE, SIZE, move |x, y| {
        let value = (x * (seed + 3) + y * (seed * 7 + 1)) % 256;
        image::Luma([value as u8])
    })
}

fn html_with_patterns(count: u32) -> Vec<u8> {
    let mut body = String::from("<html><body>");
    for seed in 0..count {
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(pattern(seed))
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        body.push_str(&format!(
            "<img src=\"data:image/png;base64,{}\">",
            BASE64.encode(buf.into_inner())
        ));
    }
    body.push_str("</body></html>");
    body.into_bytes()
}

fn pdf_with_patterns(count: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mut xobjects = Dictionary::new();
    for seed in 0..count {
        let img = pattern(seed);
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(i64::from(img.width())),
                "Height" => Object::Integer(i64::from(img.height())),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => Object::Integer(8),
            },
            img.into_raw(),
        );
        let id = doc.add_object(Object::Stream(stream));
        xobjects.set(format!("Im{seed}").into_bytes(), Object::Reference(id));
    }
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! { "XObject" => Object::Dictionary(xobjects) },
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });
    if let Ok(dict) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
        dict.set("Parent", Object::Reference(pages_id));
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_compare(c: &mut Criterion) {
    let comparator = Comparator::default();
    for count in [3u32, 10] {
        let html = html_with_patterns(count);
        let pdf = pdf_with_patterns(count);
        c.bench_function(&format!("compare/{count}x{count}"), |b| {
            b.iter(|| {
                comparator
                    .compare(black_box(&html), black_box(&pdf))
                    .unwrap()
            })
        });
    }
}

fn bench_signature(c: &mut Criterion) {
    let img = pattern(1);
    let raster =
        RasterImage::from_luma8(img.width(), img.height(), img.into_raw()).unwrap();
    c.bench_function("signature/phash-64x64", |b| {
        b.iter(|| ImageSignature::compute(black_box(&raster), SimilarityMethod::PerceptualHash))
    });
}

criterion_group!(benches, bench_compare, bench_signature);
criterion_main!(benches);
