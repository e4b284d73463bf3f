use super::byte_size;
use crate::scanner::{find_heading_lines, lines_with_endings};

/// Split a document at one heading level.
///
/// Returns the whole document as a single fragment when the level is out of
/// range or no heading of that level exists outside code fences; the caller
/// reads a single-element result as "no finer split at this depth".
/// Otherwise the result is an optional intro fragment (content before the
/// first heading) followed by one fragment per heading, in source order.
/// Fragments that are blank after trimming are dropped.
pub fn split_by_heading_level(content: &str, level: u8) -> Vec<String> {
    if !(1..=6).contains(&level) {
        return vec![content.to_string()];
    }

    let lines = lines_with_endings(content);
    let headings = find_heading_lines(&lines, level);
    if headings.is_empty() {
        return vec![content.to_string()];
    }

    let mut fragments = Vec::new();

    if headings[0] > 0 {
        let intro = lines[..headings[0]].concat();
        if !intro.trim().is_empty() {
            fragments.push(intro);
        }
    }

    for (i, &start) in headings.iter().enumerate() {
        let end = headings.get(i + 1).copied().unwrap_or(lines.len());
        let fragment = lines[start..end].concat();
        if !fragment.trim().is_empty() {
            fragments.push(fragment);
        }
    }

    fragments
}

/// Recursively split an oversized fragment at increasing heading levels.
///
/// A fragment that already fits under `max_bytes` is returned as-is, even
/// if it still contains headings. When no heading level up to `max_level`
/// subdivides an oversized fragment, it is also returned as-is: callers
/// that care about the ceiling must inspect the output sizes themselves.
pub fn split_recursive(content: &str, level: u8, max_level: u8, max_bytes: usize) -> Vec<String> {
    if byte_size(content) <= max_bytes {
        return vec![content.to_string()];
    }
    if level > max_level {
        return vec![content.to_string()];
    }

    let parts = split_by_heading_level(content, level);
    if parts.len() <= 1 {
        // No structure at this depth; retry the same span one level deeper.
        return split_recursive(content, level + 1, max_level, max_bytes);
    }

    let mut fragments = Vec::new();
    for part in &parts {
        fragments.extend(split_recursive(part, level + 1, max_level, max_bytes));
    }
    fragments
}
