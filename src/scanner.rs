//! Fence-aware scanning of Markdown lines for ATX headings.

/// An open fenced code block: marker character and opening run length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    run: usize,
}

/// Split a document into lines that keep their line endings.
///
/// Concatenating the returned slices reproduces the input exactly, which is
/// what lets the splitter reassemble fragments byte-for-byte.
pub fn lines_with_endings(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Parse a fence marker line.
///
/// A marker is up to three leading spaces, then a run of 3+ identical
/// backtick or tilde characters, optionally followed by an info string.
fn parse_fence_marker(line: &str) -> Option<Fence> {
    let line = line.trim_end_matches(['\n', '\r']);

    // Up to three spaces of indentation; four or more makes it indented code.
    let mut rest = line;
    let mut indent = 0;
    while indent < 3 && rest.starts_with(' ') {
        rest = &rest[1..];
        indent += 1;
    }

    let marker = rest.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }

    let run = rest.chars().take_while(|&c| c == marker).count();
    if run < 3 {
        return None;
    }

    Some(Fence { marker, run })
}

/// Return the ATX depth of a heading line, or `None` if the line is not a
/// strict heading.
///
/// Strict means: 1-6 leading `#`, at least one space or tab, and text that
/// is still non-empty after stripping an optional closing `#` run.
pub fn heading_level(line: &str) -> Option<u8> {
    let line = line.trim_end_matches(['\n', '\r']);

    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let text = rest
        .trim_end_matches([' ', '\t'])
        .trim_end_matches('#')
        .trim_matches([' ', '\t']);
    if text.is_empty() {
        return None;
    }

    Some(hashes as u8)
}

/// Find the line indices of all headings of exactly `level`, skipping any
/// heading-looking lines inside fenced code blocks.
///
/// A fence closes only on a marker with the same character and a run at
/// least as long as the opening run. An unterminated fence stays open to
/// the end of the document.
pub fn find_heading_lines(lines: &[&str], level: u8) -> Vec<usize> {
    let mut headings = Vec::new();
    let mut fence: Option<Fence> = None;

    for (idx, line) in lines.iter().enumerate() {
        if let Some(mark) = parse_fence_marker(line) {
            match fence {
                None => {
                    fence = Some(mark);
                    continue;
                }
                Some(open) if mark.marker == open.marker && mark.run >= open.run => {
                    fence = None;
                    continue;
                }
                // A shorter or differently-charactered run is fence content.
                Some(_) => {}
            }
        }

        if fence.is_some() {
            continue;
        }

        if heading_level(line) == Some(level) {
            headings.push(idx);
        }
    }

    headings
}
