pub mod archetype;
pub mod config;
pub mod error;
pub mod guidance;
pub mod moment;
pub mod profile;
pub mod rhythm;
pub mod state;

pub use archetype::{Archetype, ArchetypeEntry, ArchetypeTable, TemplateKey, TABLE_VERSION};
pub use config::{
    ExpiryConfig, GuidanceConfig, RhythmConfig, RhythmMode, MAX_EXPIRY_DAYS, MAX_LOOKBACK_DAYS,
};
pub use error::GuidanceError;
pub use guidance::{AlignmentScores, GrowthPattern, GuidanceType, SoulGuidance, Urgency};
pub use moment::{EmotionalLandscape, GrowthStage, MomentType, SacredMoment, WisdomThread};
pub use profile::{ArchetypeAssignment, SoulAge, SoulProfile};
pub use rhythm::{GrowthSeason, PracticeTime, RhythmPattern};
pub use state::{Dimension, SpiritualState};

use async_trait::async_trait;
use uuid::Uuid;

/// Supplies profile snapshots to hosts of the guidance engine.
///
/// The engine itself never calls this; it only ever sees the snapshot.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn load_profile(&self, id: Uuid) -> anyhow::Result<SoulProfile>;
}
