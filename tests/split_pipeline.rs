use std::fs;
use std::path::Path;

use mdsplit::splitter::{ConfigError, SplitOptions};
use mdsplit::{run_split, Manifest};

const KB: usize = 1024;

/// Build a section of exactly `total` bytes: heading line plus one filler
/// line of `x` characters.
fn section(heading: &str, total: usize) -> String {
    let mut text = format!("{}\n", heading);
    text.push_str(&"x".repeat(total - text.len() - 1));
    text.push('\n');
    text
}

fn write_doc(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_manifest(output_dir: &Path) -> Manifest {
    let json = fs::read_to_string(output_dir.join("manifest.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn small_document_is_persisted_whole() {
    let dir = tempfile::tempdir().unwrap();
    let content = "# Title\n\nshort body\n";
    let input = write_doc(dir.path(), "guide.md", content);

    let report = run_split(&input, &SplitOptions::default()).unwrap();

    assert_eq!(report.output_dir, dir.path().join("guide_split"));
    assert_eq!(report.files.len(), 1);
    assert_eq!(
        fs::read_to_string(&report.files[0]).unwrap(),
        content,
        "a document under the ceiling must pass through unsplit"
    );

    let manifest = read_manifest(&report.output_dir);
    assert_eq!(manifest.stats.fragment_count, 1);
    assert_eq!(manifest.stats.oversized_fragments, 0);
}

#[test]
fn oversized_document_splits_and_merges() {
    let dir = tempfile::tempdir().unwrap();

    // 5/40/8 KB level-1 sections; the 40 KB one holds 18 + 22 KB
    // subsections. With a 30 KB ceiling and 10 KB floor the run ends with
    // two fragments of 23 KB and 30 KB.
    let doc = format!(
        "{}# B\n{}{}{}",
        section("# A", 5 * KB),
        section("## B1", 18 * KB),
        section("## B2", 22 * KB),
        section("# C", 8 * KB)
    );
    let input = write_doc(dir.path(), "book.md", &doc);

    let options = SplitOptions {
        max_bytes: 30 * KB,
        min_bytes: 10 * KB,
        max_heading_level: 2,
    };
    let report = run_split(&input, &options).unwrap();

    assert_eq!(report.files.len(), 2);
    assert!(report.oversized.is_empty());
    assert!(report.fragment_sizes.iter().all(|&s| s <= 30 * KB));

    let first = fs::read_to_string(&report.files[0]).unwrap();
    let second = fs::read_to_string(&report.files[1]).unwrap();
    assert!(first.starts_with("# A"));
    assert!(first.contains("## B1"));
    assert!(second.starts_with("## B2"));
    assert!(second.contains("\n# C\n"));

    // Nothing was lost or reordered on the way through.
    assert_eq!(format!("{}{}", first, second), doc);

    let manifest = read_manifest(&report.output_dir);
    assert_eq!(manifest.stats.fragment_count, 2);
    assert_eq!(manifest.stats.largest_fragment_bytes, 30 * KB);
    assert_eq!(manifest.stats.total_bytes, doc.len());
}

#[test]
fn rerun_with_fewer_fragments_removes_stale_files() {
    let dir = tempfile::tempdir().unwrap();
    let doc = format!(
        "{}{}{}",
        section("# A", 20 * KB),
        section("# B", 20 * KB),
        section("# C", 20 * KB)
    );
    let input = write_doc(dir.path(), "notes.md", &doc);

    let tight = SplitOptions {
        max_bytes: 25 * KB,
        min_bytes: 5 * KB,
        max_heading_level: 6,
    };
    let report = run_split(&input, &tight).unwrap();
    assert!(report.files.len() >= 2);

    let loose = SplitOptions {
        max_bytes: 100 * KB,
        ..SplitOptions::default()
    };
    let report = run_split(&input, &loose).unwrap();
    assert_eq!(report.files.len(), 1);

    assert!(report.output_dir.join("01_notes.md").exists());
    assert!(!report.output_dir.join("02_notes.md").exists());
    assert!(!report.output_dir.join("03_notes.md").exists());
}

#[test]
fn invalid_options_fail_before_touching_the_source() {
    let options = SplitOptions {
        max_bytes: KB,
        min_bytes: 2 * KB,
        max_heading_level: 6,
    };

    // The path does not exist; validation must fire first.
    let err = run_split(Path::new("no/such/file.md"), &options).unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some());
}

#[test]
fn missing_source_surfaces_read_error() {
    let err = run_split(Path::new("no/such/file.md"), &SplitOptions::default()).unwrap_err();
    assert!(err.to_string().contains("no/such/file.md"));
}
