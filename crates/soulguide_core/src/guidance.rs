use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archetype::TemplateKey;

/// Maturity of a profile's active wisdom threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPattern {
    Planting,
    Growing,
    Integrating,
}

impl GrowthPattern {
    pub fn name(&self) -> &'static str {
        match self {
            GrowthPattern::Planting => "planting",
            GrowthPattern::Growing => "growing",
            GrowthPattern::Integrating => "integrating",
        }
    }

    pub fn template_key(&self) -> TemplateKey {
        match self {
            GrowthPattern::Planting => TemplateKey::Planting,
            GrowthPattern::Growing => TemplateKey::Growing,
            GrowthPattern::Integrating => TemplateKey::Integrating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceType {
    Practice,
    Reflection,
    Contemplation,
    Action,
}

/// How pressing the guidance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Gentle,
    Timely,
    Vital,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentScores {
    /// Archetype alignment (1.0 - 10.0, one decimal)
    pub archetype: f64,
    /// Rhythm fit (7.0 - 10.0 with the default bounds)
    pub rhythm: f64,
}

/// The engine's single output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoulGuidance {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub guidance_type: GuidanceType,
    pub message: String,
    pub reasoning: String,
    pub urgency: Urgency,
    pub created_at: DateTime<Utc>,
    /// Always strictly after `created_at`
    pub expires_at: DateTime<Utc>,
    pub alignment: AlignmentScores,
    pub growth_pattern: GrowthPattern,
    pub dominant_emotions: Vec<String>,
}

impl SoulGuidance {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_pattern_template_keys() {
        assert_eq!(GrowthPattern::Planting.template_key(), TemplateKey::Planting);
        assert_eq!(GrowthPattern::Growing.template_key(), TemplateKey::Growing);
        assert_eq!(GrowthPattern::Integrating.template_key(), TemplateKey::Integrating);
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Vital > Urgency::Timely);
        assert!(Urgency::Timely > Urgency::Gentle);
    }

    #[test]
    fn test_wire_tags_are_snake_case() {
        assert_eq!(serde_json::to_string(&GuidanceType::Contemplation).unwrap(), "\"contemplation\"");
        assert_eq!(serde_json::to_string(&Urgency::Vital).unwrap(), "\"vital\"");
        assert_eq!(serde_json::to_string(&GrowthPattern::Integrating).unwrap(), "\"integrating\"");
    }
}
