use thiserror::Error;

/// Failures surfaced by guidance synthesis.
///
/// Empty histories are not errors; they resolve to defaults inside the
/// pattern extractor. Everything here means the caller handed the engine
/// something it must not silently paper over.
#[derive(Debug, Error)]
pub enum GuidanceError {
    /// Archetype tag outside the closed set, or missing from the active table.
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),

    /// A bounded field fell outside [1, 10].
    #[error("{field} out of range [1, 10]: {value}")]
    OutOfRange { field: String, value: i64 },

    /// The archetype table failed its exhaustiveness check.
    #[error("archetype table incomplete for {archetype}: {reason}")]
    IncompleteTable { archetype: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The evaluation instant leaves no room for an expiry.
    #[error("timestamp out of range: {0}")]
    Timestamp(String),

    #[error("failed to parse archetype table: {0}")]
    TableParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
