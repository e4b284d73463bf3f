//! Persistence of final fragments and the run manifest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::splitter::byte_size;

/// Name of the manifest written next to the fragments
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Summary of one splitting run, stored alongside the fragments
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub created_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub stats: ManifestStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestStats {
    pub fragment_count: usize,
    pub total_bytes: usize,
    pub largest_fragment_bytes: usize,
    /// Fragments that still exceed the ceiling (no finer heading structure)
    pub oversized_fragments: usize,
}

impl ManifestStats {
    pub fn from_fragments(fragments: &[String], max_bytes: usize) -> Self {
        let sizes: Vec<usize> = fragments.iter().map(|f| byte_size(f)).collect();
        Self {
            fragment_count: fragments.len(),
            total_bytes: sizes.iter().sum(),
            largest_fragment_bytes: sizes.iter().copied().max().unwrap_or(0),
            oversized_fragments: sizes.iter().filter(|&&size| size > max_bytes).count(),
        }
    }
}

/// Compute the hex SHA256 digest of the source document
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Whether a file name belongs to a previous run for the same source:
/// one-or-more digits, an underscore, the base name, and a `.md` suffix.
fn is_fragment_file_name(name: &str, base_name: &str) -> bool {
    let Some(rest) = name.strip_suffix(".md") else {
        return false;
    };
    let Some(digits) = rest
        .strip_suffix(base_name)
        .and_then(|s| s.strip_suffix('_'))
    else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Remove fragments left behind by an earlier run of the same source.
///
/// Only files directly inside `output_dir` whose names match the fragment
/// naming pattern are touched. Returns the number of files removed.
pub fn clear_stale_fragments(output_dir: &Path, base_name: &str) -> Result<usize> {
    if !output_dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in WalkDir::new(output_dir).min_depth(1).max_depth(1) {
        let entry = entry.context("Failed to read output directory entry")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_fragment_file_name(&name, base_name) {
            fs::remove_file(entry.path()).context(format!(
                "Failed to remove stale fragment: {}",
                entry.path().display()
            ))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write fragments as `01_<base>.md`, `02_<base>.md`, … inside `output_dir`,
/// clearing stale fragments from earlier runs first.
///
/// The zero-padded 1-based index keeps the names lexicographically sorted
/// in fragment order. Returns the written paths, in order.
pub fn write_fragments(
    fragments: &[String],
    output_dir: &Path,
    base_name: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).context(format!(
        "Failed to create output directory: {}",
        output_dir.display()
    ))?;
    clear_stale_fragments(output_dir, base_name)?;

    let mut written = Vec::with_capacity(fragments.len());
    for (i, fragment) in fragments.iter().enumerate() {
        let file_name = format!("{:02}_{}.md", i + 1, base_name);
        let path = output_dir.join(file_name);
        fs::write(&path, fragment)
            .context(format!("Failed to write fragment: {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Serialize the manifest into `output_dir`
pub fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE_NAME);
    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    fs::write(&path, json).context(format!("Failed to write manifest: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_file_name_matching() {
        assert!(is_fragment_file_name("01_guide.md", "guide"));
        assert!(is_fragment_file_name("123_guide.md", "guide"));

        assert!(!is_fragment_file_name("guide.md", "guide"));
        assert!(!is_fragment_file_name("01_other.md", "guide"));
        assert!(!is_fragment_file_name("01_guide.txt", "guide"));
        assert!(!is_fragment_file_name("_guide.md", "guide"));
        assert!(!is_fragment_file_name("x1_guide.md", "guide"));
    }

    #[test]
    fn test_write_fragments_names_sort_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let fragments: Vec<String> = (0..3).map(|i| format!("fragment {}\n", i)).collect();

        let written = write_fragments(&fragments, dir.path(), "doc").unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01_doc.md", "02_doc.md", "03_doc.md"]);
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), "fragment 1\n");
    }

    #[test]
    fn test_rerun_clears_stale_fragments() {
        let dir = tempfile::tempdir().unwrap();

        // First run produces three fragments plus an unrelated file.
        let first: Vec<String> = (0..3).map(|i| format!("old {}\n", i)).collect();
        write_fragments(&first, dir.path(), "doc").unwrap();
        fs::write(dir.path().join("notes.md"), "keep me").unwrap();

        // Second run shrinks to one fragment; the old tail must be gone.
        let second = vec!["new\n".to_string()];
        write_fragments(&second, dir.path(), "doc").unwrap();

        assert!(dir.path().join("01_doc.md").exists());
        assert!(!dir.path().join("02_doc.md").exists());
        assert!(!dir.path().join("03_doc.md").exists());
        assert!(dir.path().join("notes.md").exists());
    }

    #[test]
    fn test_clear_stale_on_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert_eq!(clear_stale_fragments(&missing, "doc").unwrap(), 0);
    }

    #[test]
    fn test_manifest_stats() {
        let fragments = vec!["a".repeat(10), "b".repeat(40), "c".repeat(20)];
        let stats = ManifestStats::from_fragments(&fragments, 30);

        assert_eq!(stats.fragment_count, 3);
        assert_eq!(stats.total_bytes, 70);
        assert_eq!(stats.largest_fragment_bytes, 40);
        assert_eq!(stats.oversized_fragments, 1);
    }

    #[test]
    fn test_manifest_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest {
            version: "0.1.0".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            source_path: "doc.md".to_string(),
            source_sha256: hash_bytes(b"content"),
            stats: ManifestStats::from_fragments(&[], 1024),
        };

        let path = write_manifest(dir.path(), &manifest).unwrap();
        let parsed: Manifest =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.source_sha256, manifest.source_sha256);
        assert_eq!(parsed.stats.fragment_count, 0);
    }
}
