//! Spiritual state snapshot
//!
//! Five bounded dimensions, each an integer in [1, 10]:
//! - clarity, peace, vitality: inner condition
//! - connection, purpose: relational and directional condition
//!
//! One "current" state per profile. Historical states are append-only and
//! live in the persistence layer, never here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};

/// Inclusive lower bound for every bounded field.
pub const BOUND_MIN: u8 = 1;
/// Inclusive upper bound for every bounded field.
pub const BOUND_MAX: u8 = 10;

/// Check a bounded field against [1, 10].
pub(crate) fn check_bounded(field: &str, value: u8) -> Result<()> {
    if (BOUND_MIN..=BOUND_MAX).contains(&value) {
        Ok(())
    } else {
        Err(GuidanceError::OutOfRange {
            field: field.to_string(),
            value: i64::from(value),
        })
    }
}

/// The five state dimensions, in canonical order.
///
/// Weight tuples in the archetype table follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Clarity,
    Peace,
    Vitality,
    Connection,
    Purpose,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Clarity,
        Dimension::Peace,
        Dimension::Vitality,
        Dimension::Connection,
        Dimension::Purpose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Clarity => "clarity",
            Dimension::Peace => "peace",
            Dimension::Vitality => "vitality",
            Dimension::Connection => "connection",
            Dimension::Purpose => "purpose",
        }
    }
}

/// Current spiritual state: s = (clarity, peace, vitality, connection, purpose)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritualState {
    pub clarity: u8,
    pub peace: u8,
    pub vitality: u8,
    pub connection: u8,
    pub purpose: u8,

    /// When this snapshot was recorded
    pub timestamp: DateTime<Utc>,
}

impl SpiritualState {
    pub fn new(
        clarity: u8,
        peace: u8,
        vitality: u8,
        connection: u8,
        purpose: u8,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            clarity,
            peace,
            vitality,
            connection,
            purpose,
            timestamp,
        }
    }

    /// Every dimension set to the same value.
    pub fn uniform(value: u8, timestamp: DateTime<Utc>) -> Self {
        Self::new(value, value, value, value, value, timestamp)
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Clarity => self.clarity,
            Dimension::Peace => self.peace,
            Dimension::Vitality => self.vitality,
            Dimension::Connection => self.connection,
            Dimension::Purpose => self.purpose,
        }
    }

    /// Dimensions in canonical order.
    pub fn as_array(&self) -> [u8; 5] {
        Dimension::ALL.map(|d| self.get(d))
    }

    /// Arithmetic mean of the five dimensions.
    pub fn overall(&self) -> f64 {
        let sum: u32 = self.as_array().iter().map(|&v| u32::from(v)).sum();
        f64::from(sum) / 5.0
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            check_bounded(&format!("state.{}", dimension.name()), self.get(dimension))?;
        }
        Ok(())
    }
}
