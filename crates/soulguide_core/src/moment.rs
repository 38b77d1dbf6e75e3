//! Sacred moments and wisdom threads: the event history of a profile.
//!
//! Both are immutable from the engine's point of view. Moments never change
//! once recorded; threads are advanced by external processes as the user
//! re-engages with an insight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::state::check_bounded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentType {
    Insight,
    Breakthrough,
    Challenge,
    Blessing,
    Connection,
}

/// Emotional landscape of a moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalLandscape {
    pub primary_emotion: String,
    #[serde(default)]
    pub secondary_emotion: Option<String>,
    /// Depth (1-10)
    pub depth: u8,
}

/// A timestamped personal event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SacredMoment {
    pub id: Uuid,
    pub moment_type: MomentType,
    pub essence: String,
    #[serde(default)]
    pub context: String,
    pub emotional_landscape: EmotionalLandscape,
    #[serde(default)]
    pub transformation_seeds: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub moon_phase: Option<String>,
    #[serde(default)]
    pub energy_signature: Option<String>,
}

impl SacredMoment {
    pub fn primary_emotion(&self) -> &str {
        &self.emotional_landscape.primary_emotion
    }

    pub fn validate(&self) -> Result<()> {
        check_bounded("moment.depth", self.emotional_landscape.depth)
    }
}

/// Growth stage of a wisdom thread: seed -> sprouting -> blooming -> fruiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seed,
    Sprouting,
    Blooming,
    Fruiting,
}

/// A longitudinal insight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WisdomThread {
    pub id: Uuid,
    #[serde(default)]
    pub theme: String,
    pub growth_stage: GrowthStage,
    /// Integration level (1-10)
    pub integration_level: u8,
    pub last_contemplated: DateTime<Utc>,
    #[serde(default)]
    pub related_threads: Vec<Uuid>,
}

impl WisdomThread {
    /// Integration level at or above which a thread counts as settled.
    pub const SETTLED_INTEGRATION: u8 = 8;

    /// Still being worked: not fruiting and integration below 8.
    pub fn is_active(&self) -> bool {
        self.growth_stage != GrowthStage::Fruiting
            && self.integration_level < Self::SETTLED_INTEGRATION
    }

    pub fn validate(&self) -> Result<()> {
        check_bounded("thread.integration_level", self.integration_level)
    }
}
