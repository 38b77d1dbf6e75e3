//! Guidance synthesis: pick a template and explain the pick.
//!
//! Priority order, first match wins:
//! 1. overall < 5 -> `low_energy`
//! 2. overall > 7 -> `high_energy`
//! 3. the growth pattern's template, falling back to `growing`
//!
//! Templates are static per archetype; no user data is interpolated into the
//! message. The reasoning string may name the archetype and the trend.

use soulguide_core::{Archetype, ArchetypeTable, GrowthPattern, GuidanceError, TemplateKey};

use crate::patterns::PatternSummary;

pub const LOW_ENERGY_BELOW: f64 = 5.0;
pub const HIGH_ENERGY_ABOVE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyBand {
    Low,
    Balanced,
    High,
}

impl EnergyBand {
    pub fn from_overall(overall: f64) -> Self {
        if overall < LOW_ENERGY_BELOW {
            EnergyBand::Low
        } else if overall > HIGH_ENERGY_ABOVE {
            EnergyBand::High
        } else {
            EnergyBand::Balanced
        }
    }
}

/// Selected guidance text plus the reasoning behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub key: TemplateKey,
    pub message: String,
    pub reasoning: String,
}

/// Template key for a band and growth pattern, before any fallback.
pub fn template_key(band: EnergyBand, pattern: GrowthPattern) -> TemplateKey {
    match band {
        EnergyBand::Low => TemplateKey::LowEnergy,
        EnergyBand::High => TemplateKey::HighEnergy,
        EnergyBand::Balanced => pattern.template_key(),
    }
}

pub fn synthesize(
    table: &ArchetypeTable,
    archetype: Archetype,
    summary: &PatternSummary,
    archetype_score: f64,
) -> Result<Synthesis, GuidanceError> {
    let entry = table.entry(archetype)?;
    let overall = summary.trend.overall;
    let band = EnergyBand::from_overall(overall);

    let mut key = template_key(band, summary.growth_pattern);
    let message = match entry.template(key) {
        Some(t) => t,
        None if band == EnergyBand::Balanced => {
            tracing::warn!(
                "{} has no {} template, falling back to growing",
                archetype,
                key.name()
            );
            key = TemplateKey::Growing;
            entry.template(key).ok_or_else(|| missing(archetype, key))?
        }
        None => return Err(missing(archetype, key)),
    };

    let mut reasoning = match band {
        EnergyBand::Low => format!(
            "Overall energy of {:.1} is calling for restoration; the {} path turns inward to replenish.",
            overall, archetype
        ),
        EnergyBand::High => format!(
            "Overall energy of {:.1} is abundant; the {} path is ready to move outward and express.",
            overall, archetype
        ),
        EnergyBand::Balanced => format!(
            "Energy is steady at {:.1}, and the growth pattern indicates a {} phase for the {} path.",
            overall,
            summary.growth_pattern.name(),
            archetype
        ),
    };
    reasoning.push_str(&format!(" Archetype alignment is {:.1}/10.", archetype_score));
    if !summary.dominant_emotions.is_empty() {
        reasoning.push_str(&format!(
            " Recent moments have carried {}.",
            summary.dominant_emotions.join(", ")
        ));
    }

    Ok(Synthesis {
        key,
        message: message.to_string(),
        reasoning,
    })
}

fn missing(archetype: Archetype, key: TemplateKey) -> GuidanceError {
    GuidanceError::IncompleteTable {
        archetype: archetype.name().to_string(),
        reason: format!("template {} is missing", key.name()),
    }
}
