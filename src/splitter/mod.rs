mod error;
mod merge;
mod split;


pub use error::ConfigError;
pub use merge::merge_small;
pub use split::{split_by_heading_level, split_recursive};

/// Default fragment size ceiling (30 KiB)
pub const DEFAULT_MAX_BYTES: usize = 30 * 1024;

/// Default fragment size floor, merged towards on a best-effort basis (10 KiB)
pub const DEFAULT_MIN_BYTES: usize = 10 * 1024;

/// Default deepest heading level considered when splitting
pub const DEFAULT_MAX_HEADING_LEVEL: u8 = 6;

/// UTF-8 encoded byte length of a fragment.
///
/// Both the recursive splitter and the merge pass size fragments through
/// this one definition, so ceiling and floor decisions compose.
pub fn byte_size(text: &str) -> usize {
    text.len()
}

/// Size bounds and recursion depth for one splitting run
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Hard upper bound on fragment size in bytes
    pub max_bytes: usize,
    /// Best-effort lower bound on fragment size in bytes
    pub min_bytes: usize,
    /// Deepest heading level the recursive splitter may use (1-6)
    pub max_heading_level: u8,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            min_bytes: DEFAULT_MIN_BYTES,
            max_heading_level: DEFAULT_MAX_HEADING_LEVEL,
        }
    }
}

impl SplitOptions {
    /// Check the invariants between the bounds.
    ///
    /// Callers run this before any splitting; none of the algorithm
    /// functions re-validate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::ZeroCeiling);
        }
        if self.min_bytes > self.max_bytes {
            return Err(ConfigError::FloorAboveCeiling {
                min: self.min_bytes,
                max: self.max_bytes,
            });
        }
        if !(1..=6).contains(&self.max_heading_level) {
            return Err(ConfigError::HeadingLevelOutOfRange(self.max_heading_level));
        }
        Ok(())
    }
}
