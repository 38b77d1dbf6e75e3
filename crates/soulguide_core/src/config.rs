use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::GuidanceError;

/// Upper bound for `lookback_days` (one hundred years).
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;
/// Upper bound for `expiry.max_days`.
pub const MAX_EXPIRY_DAYS: u32 = 365;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Sacred moments older than this are ignored by pattern extraction.
    pub lookback_days: u32,
    /// Reject out-of-range profile fields before scoring.
    pub strict_validation: bool,
    /// Optional TOML override for the built-in archetype table.
    pub archetype_table: Option<PathBuf>,
    pub expiry: ExpiryConfig,
    pub rhythm: RhythmConfig,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            strict_validation: true,
            archetype_table: None,
            expiry: ExpiryConfig::default(),
            rhythm: RhythmConfig::default(),
        }
    }
}

impl GuidanceConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    /// Load from path; if the file doesn't exist, return defaults with env overrides.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            let mut cfg = Self::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }
        Self::load(path)
    }

    /// Apply environment variable overrides on top of file-based config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SOULGUIDE_LOOKBACK_DAYS") {
            if let Ok(n) = v.parse() {
                self.lookback_days = n;
            }
        }
        if let Ok(v) = std::env::var("SOULGUIDE_RHYTHM_MODE") {
            match v.parse() {
                Ok(mode) => self.rhythm.mode = mode,
                Err(e) => tracing::warn!("Ignoring SOULGUIDE_RHYTHM_MODE: {}", e),
            }
        }
        if let Ok(v) = std::env::var("SOULGUIDE_STRICT_VALIDATION") {
            if let Ok(b) = v.parse() {
                self.strict_validation = b;
            }
        }
    }

    /// Reject configurations the engine cannot honour.
    pub fn validate(&self) -> std::result::Result<(), GuidanceError> {
        if self.lookback_days == 0 {
            return Err(GuidanceError::Config("lookback_days must be at least 1".into()));
        }
        if self.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(GuidanceError::Config(format!(
                "lookback_days ({}) exceeds {}",
                self.lookback_days, MAX_LOOKBACK_DAYS
            )));
        }
        self.expiry.validate()?;
        self.rhythm.validate()
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpiryConfig {
    pub min_days: u32,
    pub max_days: u32,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            min_days: 3,
            max_days: 7,
        }
    }
}

impl ExpiryConfig {
    fn validate(&self) -> std::result::Result<(), GuidanceError> {
        if self.min_days == 0 {
            return Err(GuidanceError::Config("expiry.min_days must be at least 1".into()));
        }
        if self.min_days > self.max_days {
            return Err(GuidanceError::Config(format!(
                "expiry.min_days ({}) exceeds expiry.max_days ({})",
                self.min_days, self.max_days
            )));
        }
        if self.max_days > MAX_EXPIRY_DAYS {
            return Err(GuidanceError::Config(format!(
                "expiry.max_days ({}) exceeds {}",
                self.max_days, MAX_EXPIRY_DAYS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RhythmConfig {
    pub mode: RhythmMode,
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            mode: RhythmMode::Placeholder,
            min_score: 7.0,
            max_score: 10.0,
        }
    }
}

impl RhythmConfig {
    fn validate(&self) -> std::result::Result<(), GuidanceError> {
        if !self.min_score.is_finite() || !self.max_score.is_finite() {
            return Err(GuidanceError::Config("rhythm score bounds must be finite".into()));
        }
        if self.min_score > self.max_score {
            return Err(GuidanceError::Config(format!(
                "rhythm.min_score ({}) exceeds rhythm.max_score ({})",
                self.min_score, self.max_score
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmMode {
    /// Uniform random draw within the score bounds
    #[default]
    Placeholder,
    /// Deterministic comparison against the declared rhythm pattern
    Seasonal,
}

impl std::str::FromStr for RhythmMode {
    type Err = GuidanceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(RhythmMode::Placeholder),
            "seasonal" => Ok(RhythmMode::Seasonal),
            other => Err(GuidanceError::Config(format!("unknown rhythm mode: {}", other))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
