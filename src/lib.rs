// Public API exports
pub mod headers;
pub mod output;
pub mod pipeline;
pub mod scanner;
pub mod splitter;

// Re-export main types for convenience
pub use scanner::{find_heading_lines, heading_level, lines_with_endings};

pub use splitter::{
    byte_size, merge_small, split_by_heading_level, split_recursive, ConfigError, SplitOptions,
    DEFAULT_MAX_BYTES, DEFAULT_MAX_HEADING_LEVEL, DEFAULT_MIN_BYTES,
};

pub use headers::{adjust_heading_depths, adjust_headers_file};

pub use output::{Manifest, ManifestStats};

pub use pipeline::{run_split, SplitReport};
