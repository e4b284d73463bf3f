//! End-to-end run: load a document, split and merge it, persist fragments.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::{self, Manifest, ManifestStats};
use crate::splitter::{byte_size, merge_small, split_recursive, SplitOptions};

/// What one splitting run produced
#[derive(Debug)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    /// Written fragment files, in document order
    pub files: Vec<PathBuf>,
    /// Byte size of each fragment, parallel to `files`
    pub fragment_sizes: Vec<usize>,
    pub total_bytes: usize,
    /// Fragments that still exceed the ceiling (best-effort acceptance)
    pub oversized: Vec<PathBuf>,
}

/// Split a Markdown file into size-bounded fragments next to it.
///
/// Output goes to a sibling `<stem>_split` directory. A document that
/// already fits the ceiling is persisted as a single fragment without any
/// splitting. Configuration is validated before the file is even read.
pub fn run_split(input: &Path, options: &SplitOptions) -> Result<SplitReport> {
    options.validate()?;

    let content = fs::read_to_string(input)
        .context(format!("Failed to read file: {}", input.display()))?;

    let base_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .context(format!("Input has no usable file name: {}", input.display()))?
        .to_string();
    let output_dir = input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_split", base_name));

    let source_sha256 = output::hash_bytes(content.as_bytes());

    let fragments = if byte_size(&content) <= options.max_bytes {
        vec![content]
    } else {
        let pieces = split_recursive(&content, 1, options.max_heading_level, options.max_bytes);
        merge_small(pieces, options.min_bytes, options.max_bytes)
    };

    let files = output::write_fragments(&fragments, &output_dir, &base_name)?;

    let manifest = Manifest {
        version: env!("CARGO_PKG_VERSION").to_string(),
        created_at: Utc::now().to_rfc3339(),
        source_path: input.display().to_string(),
        source_sha256,
        stats: ManifestStats::from_fragments(&fragments, options.max_bytes),
    };
    output::write_manifest(&output_dir, &manifest)?;

    let fragment_sizes: Vec<usize> = fragments.iter().map(|f| byte_size(f)).collect();
    let oversized = files
        .iter()
        .zip(&fragment_sizes)
        .filter(|(_, &size)| size > options.max_bytes)
        .map(|(path, _)| path.clone())
        .collect();

    Ok(SplitReport {
        output_dir,
        files,
        total_bytes: fragment_sizes.iter().sum(),
        fragment_sizes,
        oversized,
    })
}
