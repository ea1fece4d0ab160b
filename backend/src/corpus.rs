//! Input expansion and the sequential processing loop.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::aggregator::{Aggregation, Aggregator};
use crate::error::HumgError;
use crate::logger;
use crate::parsers::LayoutParser;
use crate::types::RunConfig;

/// Expand command line inputs into the list of files to process.
///
/// Files are kept as given and in the given order. Directories are walked
/// recursively for `*.xml` files, sorted by path.
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Failed to walk directory {:?}", input))?
                .into_iter()
                .filter(|entry| entry.file_type().is_file() && is_xml_file(entry.path()))
                .map(|entry| entry.into_path())
                .collect();

            logger::debug(&format!("{:?}: {} XML files", input, found.len()));
            files.append(&mut found);
        } else {
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        return Err(HumgError::NoInputFiles.into());
    }

    Ok(files)
}

fn is_xml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}

/// Process `files` in order and return the frozen totals.
///
/// A file that cannot be read or parsed aborts the run, unless
/// `config.skip_malformed` is set, in which case it is logged and left out of
/// every total, including the file count.
pub fn run(config: &RunConfig, files: &[PathBuf]) -> Result<Aggregation> {
    if files.is_empty() {
        return Err(HumgError::NoInputFiles.into());
    }

    let parser = LayoutParser::new(config);
    let mut aggregator = Aggregator::new(config.group_by_directory);
    let mut skipped = 0;

    logger::info(&format!(
        "Processing {} files as {} (normalization: {})",
        files.len(),
        parser.dialect(),
        config.normalization
    ));

    for path in files {
        logger::debug(&format!("Processing {:?}", path));

        let counts = match parser.extract(path) {
            Ok(counts) => counts,
            Err(e) if config.skip_malformed => {
                logger::warn(&format!("Skipping file: {}", e));
                skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to process {:?}", path));
            }
        };

        aggregator.add_file(path, &counts);
    }

    let aggregation = aggregator.finish();

    logger::info(&format!(
        "Processed {} files ({} skipped): {} lines, {} regions, {} characters",
        aggregation.file_count(),
        skipped,
        aggregation.lines().total(),
        aggregation.regions().total(),
        aggregation.chars().total()
    ));

    Ok(aggregation)
}
