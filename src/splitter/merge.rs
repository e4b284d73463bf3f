use super::byte_size;

/// Coalesce adjacent undersized fragments in one left-to-right pass.
///
/// A merge is attempted when either side is below `min_bytes`, and accepted
/// only when the combined fragment stays within `max_bytes`. The asymmetry
/// means a small fragment whose neighbors all sit near the ceiling simply
/// stays small. Fragments are joined with a newline unless the left side
/// already ends in one, and never reordered.
pub fn merge_small(fragments: Vec<String>, min_bytes: usize, max_bytes: usize) -> Vec<String> {
    let mut iter = fragments.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();

    for next in iter {
        let either_small = byte_size(&current) < min_bytes || byte_size(&next) < min_bytes;
        let separator = if current.ends_with('\n') { "" } else { "\n" };
        let combined_size = byte_size(&current) + separator.len() + byte_size(&next);

        if either_small && combined_size <= max_bytes {
            current.push_str(separator);
            current.push_str(&next);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }

    merged.push(current);
    merged
}
