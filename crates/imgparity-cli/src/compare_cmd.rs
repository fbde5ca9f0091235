//! The `compare` subcommand: load the documents, run the comparison, print
//! a report.

use std::fs;
use std::path::{Path, PathBuf};

use imgparity::{CompareConfig, CompareResult, Comparator};

#[allow(clippy::too_many_arguments)]
pub fn run(
    html: &Path,
    pdf: &Path,
    filter_images: &[PathBuf],
    similarity_threshold: f64,
    hash_threshold: f64,
    algorithm: &str,
    method: &str,
    exclude_names: &[String],
    format: &str,
    pairs: bool,
) -> Result<(), i32> {
    let match_algorithm = algorithm.parse().map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;
    let similarity_method = method.parse().map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;
    let config = CompareConfig {
        similarity_threshold,
        hash_threshold,
        match_algorithm,
        similarity_method,
        exclude_image_names: exclude_names.to_vec(),
    };

    let comparator = Comparator::new(config).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;

    let html_bytes = read_file(html)?;
    let pdf_bytes = read_file(pdf)?;
    let mut filter_bytes = Vec::with_capacity(filter_images.len());
    for path in filter_images {
        filter_bytes.push(read_file(path)?);
    }

    let result = comparator
        .compare_with_filters(&html_bytes, &pdf_bytes, &filter_bytes)
        .map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;

    match format {
        "json" => print_json(&result),
        "text" => {
            print_text(&result, pairs);
            Ok(())
        }
        other => {
            eprintln!("error: unknown output format '{other}' (expected text or json)");
            Err(2)
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, i32> {
    fs::read(path).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        1
    })
}

fn print_json(result: &CompareResult) -> Result<(), i32> {
    let json = serde_json::to_string_pretty(result).map_err(|e| {
        eprintln!("error: failed to serialize result: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}

fn print_text(result: &CompareResult, pairs: bool) {
    println!("HTML images:     {}", result.html_image_count);
    println!("PDF images:      {}", result.pdf_image_count);
    println!("matched:         {}", result.matched_count);
    println!("unmatched HTML:  {}", result.unmatched_html_count);
    println!("unmatched PDF:   {}", result.unmatched_pdf_count);
    println!("rate by HTML:    {:.4}", result.match_rate_by_html);
    println!("rate by PDF:     {:.4}", result.match_rate_by_pdf);
    println!("algorithm:       {}", result.assignment.algorithm);
    if pairs {
        for pair in &result.assignment.pairs {
            println!(
                "  html[{}] <-> pdf[{}]  score {:.4}",
                pair.html_index, pair.pdf_index, pair.score
            );
        }
    }
}
