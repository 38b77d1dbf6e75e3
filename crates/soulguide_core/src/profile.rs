use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archetype::Archetype;
use crate::error::Result;
use crate::moment::{SacredMoment, WisdomThread};
use crate::rhythm::RhythmPattern;
use crate::state::SpiritualState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoulAge {
    Young,
    Mature,
    Old,
    Ancient,
}

/// Primary archetype plus an optional secondary influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeAssignment {
    pub primary: Archetype,
    #[serde(default)]
    pub secondary: Option<Archetype>,
}

impl From<Archetype> for ArchetypeAssignment {
    fn from(primary: Archetype) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}

/// Aggregate root handed to the engine as a read-only snapshot.
///
/// Owned and mutated by the persistence layer. Moments and threads are the
/// bounded windows that layer chose to load; the engine applies its own
/// lookback on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoulProfile {
    pub id: Uuid,
    pub archetype: ArchetypeAssignment,
    pub soul_age: SoulAge,
    pub current_state: SpiritualState,
    #[serde(default)]
    pub rhythm: RhythmPattern,
    #[serde(default)]
    pub sacred_moments: Vec<SacredMoment>,
    #[serde(default)]
    pub wisdom_threads: Vec<WisdomThread>,
}

impl SoulProfile {
    /// A profile with empty history.
    pub fn new(
        id: Uuid,
        archetype: impl Into<ArchetypeAssignment>,
        soul_age: SoulAge,
        current_state: SpiritualState,
    ) -> Self {
        Self {
            id,
            archetype: archetype.into(),
            soul_age,
            current_state,
            rhythm: RhythmPattern::default(),
            sacred_moments: Vec::new(),
            wisdom_threads: Vec::new(),
        }
    }

    pub fn primary_archetype(&self) -> Archetype {
        self.archetype.primary
    }

    /// Check every bounded field (state dimensions, moment depth, thread
    /// integration level) against [1, 10].
    pub fn validate(&self) -> Result<()> {
        self.current_state.validate()?;
        for moment in &self.sacred_moments {
            moment.validate()?;
        }
        for thread in &self.wisdom_threads {
            thread.validate()?;
        }
        Ok(())
    }
}
