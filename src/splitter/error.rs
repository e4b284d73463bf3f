use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max fragment size must be greater than zero")]
    ZeroCeiling,

    #[error("min fragment size ({min} bytes) exceeds max fragment size ({max} bytes)")]
    FloorAboveCeiling { min: usize, max: usize },

    #[error("max heading level must be between 1 and 6 (got {0})")]
    HeadingLevelOutOfRange(u8),
}
