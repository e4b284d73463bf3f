//! Heading depth adjustment for exported documents whose section numbers
//! all ended up as level-1 headings.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Depth encoded by a leading section number, if the text starts with one.
///
/// Accepts `1`, `1.1`, `1.1.2.` (dot-separated digit runs, optional
/// trailing dot) followed by whitespace and a title.
fn numbering_depth(text: &str) -> Option<usize> {
    let (number, _title) = text.split_once(char::is_whitespace)?;
    let number = number.strip_suffix('.').unwrap_or(number);
    if number.is_empty() {
        return None;
    }

    let mut depth = 0;
    for segment in number.split('.') {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        depth += 1;
    }
    Some(depth)
}

/// Rewrite a single line.
///
/// Only `# ` lines are touched: numbered ones are re-emitted at the depth
/// their number encodes (capped at 6), unnumbered ones become bold text.
pub fn adjust_heading_line(line: &str) -> Cow<'_, str> {
    if !line.starts_with("# ") {
        return Cow::Borrowed(line);
    }

    let text = line[2..].trim();
    match numbering_depth(text) {
        Some(depth) => Cow::Owned(format!("{} {}\n", "#".repeat(depth.min(6)), text)),
        None => Cow::Owned(format!("**{}**\n", text)),
    }
}

/// Apply [`adjust_heading_line`] to every line of a document.
pub fn adjust_heading_depths(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        out.push_str(&adjust_heading_line(line));
    }
    out
}

/// Default output path: `<stem>_head<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}_head.{}", stem, ext.to_string_lossy()),
        None => format!("{}_head", stem),
    };
    input.with_file_name(file_name)
}

/// Read a file, adjust its headings, and write the result.
///
/// Returns the path actually written to.
pub fn adjust_headers_file(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let content = fs::read_to_string(input)
        .context(format!("Failed to read file: {}", input.display()))?;

    let adjusted = adjust_heading_depths(&content);

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };
    fs::write(&output_path, adjusted)
        .context(format!("Failed to write file: {}", output_path.display()))?;

    Ok(output_path)
}
