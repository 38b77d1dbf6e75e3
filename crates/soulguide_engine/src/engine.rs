//! Guidance engine: one profile snapshot in, one guidance record out.
//!
//! Provider -> Extractor -> Scorers -> Synthesizer -> Classifiers -> Scheduler.
//! The engine holds only immutable configuration, so a single instance can
//! serve any number of concurrent callers; each call brings its own
//! [`RandomSource`].

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use soulguide_core::{
    AlignmentScores, ArchetypeTable, GuidanceConfig, GuidanceError, SoulGuidance, SoulProfile,
};
use uuid::Uuid;

use crate::classify;
use crate::expiry::ExpiryScheduler;
use crate::patterns;
use crate::random::RandomSource;
use crate::rhythm::{self, PlaceholderRhythm, RhythmEvaluator};
use crate::scoring;
use crate::synthesis;

pub struct GuidanceEngine {
    config: GuidanceConfig,
    table: ArchetypeTable,
    rhythm: Box<dyn RhythmEvaluator>,
    expiry: ExpiryScheduler,
}

impl Default for GuidanceEngine {
    fn default() -> Self {
        Self {
            config: GuidanceConfig::default(),
            table: ArchetypeTable::builtin(),
            rhythm: Box::new(PlaceholderRhythm::default()),
            expiry: ExpiryScheduler::default(),
        }
    }
}

impl GuidanceEngine {
    /// Engine over the built-in archetype table. `config.archetype_table` is
    /// not read here; see [`GuidanceEngine::from_config`].
    pub fn new(config: GuidanceConfig) -> Result<Self, GuidanceError> {
        Self::with_table(config, ArchetypeTable::builtin())
    }

    /// Engine over an explicit table. Config and table are both validated.
    pub fn with_table(config: GuidanceConfig, table: ArchetypeTable) -> Result<Self, GuidanceError> {
        config.validate()?;
        table.validate()?;
        let rhythm = rhythm::from_config(&config.rhythm);
        let expiry = ExpiryScheduler::from(&config.expiry);
        tracing::info!(
            "GuidanceEngine ready: table v{}, rhythm={}, lookback={}d",
            table.version,
            rhythm.name(),
            config.lookback_days
        );
        Ok(Self {
            config,
            table,
            rhythm,
            expiry,
        })
    }

    /// Engine honouring every config field, including loading an override
    /// archetype table from disk.
    pub fn from_config(config: GuidanceConfig) -> anyhow::Result<Self> {
        let table = match &config.archetype_table {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read archetype table: {}", path.display()))?;
                ArchetypeTable::from_toml(&source)
                    .with_context(|| format!("Invalid archetype table: {}", path.display()))?
            }
            None => ArchetypeTable::builtin(),
        };
        Ok(Self::with_table(config, table)?)
    }

    /// Swap the rhythm evaluator.
    pub fn with_rhythm(mut self, rhythm: Box<dyn RhythmEvaluator>) -> Self {
        self.rhythm = rhythm;
        self
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    pub fn table(&self) -> &ArchetypeTable {
        &self.table
    }

    /// Produce one guidance record for `profile` as of `now`.
    ///
    /// Draws from `rng` exactly twice: once for the rhythm score (placeholder
    /// evaluator only) and once for the expiry length.
    pub fn synthesize(
        &self,
        profile: &SoulProfile,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<SoulGuidance, GuidanceError> {
        if self.config.strict_validation {
            profile.validate()?;
        }

        let archetype = profile.primary_archetype();
        let summary = patterns::extract(profile, now, self.config.lookback_days);
        let overall = summary.trend.overall;
        tracing::debug!(
            "Patterns for {}: overall={:.2}, growth={}, emotions={:?}",
            profile.id,
            overall,
            summary.growth_pattern.name(),
            summary.dominant_emotions
        );

        let archetype_score = scoring::archetype_score(&self.table, archetype, &profile.current_state)?;
        let rhythm_score = self.rhythm.evaluate(profile, &summary, now, rng);
        tracing::debug!(
            "Scores for {}: {}={:.1}, rhythm({})={:.1}",
            profile.id,
            archetype,
            archetype_score,
            self.rhythm.name(),
            rhythm_score
        );

        let synthesis = synthesis::synthesize(&self.table, archetype, &summary, archetype_score)?;
        let urgency = classify::urgency(overall, archetype_score);
        let guidance_type = classify::guidance_type(overall, summary.growth_pattern);
        let expires_at = self
            .expiry
            .expires_at(now, rng)
            .ok_or_else(|| GuidanceError::Timestamp(format!("no expiry representable after {}", now)))?;
        tracing::debug!(
            "Guidance for {}: template={}, type={:?}, urgency={:?}, expires={}",
            profile.id,
            synthesis.key.name(),
            guidance_type,
            urgency,
            expires_at
        );

        Ok(SoulGuidance {
            id: guidance_id(profile.id, now),
            profile_id: profile.id,
            guidance_type,
            message: synthesis.message,
            reasoning: synthesis.reasoning,
            urgency,
            created_at: now,
            expires_at,
            alignment: AlignmentScores {
                archetype: archetype_score,
                rhythm: rhythm_score,
            },
            growth_pattern: summary.growth_pattern,
            dominant_emotions: summary.dominant_emotions,
        })
    }
}

/// Deterministic id: UUIDv5 of the profile id and creation instant.
pub fn guidance_id(profile_id: Uuid, created_at: DateTime<Utc>) -> Uuid {
    let name = created_at.to_rfc3339_opts(SecondsFormat::Nanos, true);
    Uuid::new_v5(&profile_id, name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedSource, RngSource};
    use crate::rhythm::SeasonalRhythm;
    use chrono::{Duration, TimeZone};
    use soulguide_core::{Archetype, RhythmMode, SoulAge, SpiritualState, TemplateKey};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn profile(archetype: Archetype, value: u8) -> SoulProfile {
        SoulProfile::new(
            Uuid::new_v4(),
            archetype,
            SoulAge::Mature,
            SpiritualState::uniform(value, now()),
        )
    }

    #[test]
    fn test_synthesize_fills_every_field() {
        let engine = GuidanceEngine::new(GuidanceConfig::default()).unwrap();
        let p = profile(Archetype::Healer, 6);
        let g = engine.synthesize(&p, now(), &mut FixedSource::new(8.0, 4)).unwrap();

        assert_eq!(g.profile_id, p.id);
        assert_eq!(g.created_at, now());
        assert_eq!(g.expires_at - g.created_at, Duration::days(4));
        assert_eq!(g.alignment.archetype, 6.0);
        assert_eq!(g.alignment.rhythm, 8.0);
        assert!(!g.message.is_empty());
        assert!(!g.reasoning.is_empty());
        assert!(g.dominant_emotions.is_empty());
        assert!(!g.is_expired(now()));
        assert!(!g.is_expired(now() + Duration::days(3)));
        assert!(g.is_expired(g.expires_at));
    }

    #[test]
    fn test_id_is_deterministic() {
        let engine = GuidanceEngine::default();
        let p = profile(Archetype::Seeker, 5);
        let a = engine.synthesize(&p, now(), &mut RngSource::seeded(1)).unwrap();
        let b = engine.synthesize(&p, now(), &mut RngSource::seeded(2)).unwrap();
        assert_eq!(a.id, b.id);

        let later = engine
            .synthesize(&p, now() + Duration::seconds(1), &mut RngSource::seeded(1))
            .unwrap();
        assert_ne!(a.id, later.id);
    }

    #[test]
    fn test_same_seed_same_record() {
        let engine = GuidanceEngine::default();
        let p = profile(Archetype::Warrior, 7);
        let a = engine.synthesize(&p, now(), &mut RngSource::seeded(11)).unwrap();
        let b = engine.synthesize(&p, now(), &mut RngSource::seeded(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_validation_rejects_out_of_range() {
        let engine = GuidanceEngine::default();
        let mut p = profile(Archetype::Sage, 5);
        p.current_state.vitality = 0;
        let err = engine.synthesize(&p, now(), &mut FixedSource::new(8.0, 3)).unwrap_err();
        assert!(matches!(err, GuidanceError::OutOfRange { .. }));
    }

    #[test]
    fn test_lenient_mode_skips_validation() {
        let config = GuidanceConfig {
            strict_validation: false,
            ..Default::default()
        };
        let engine = GuidanceEngine::new(config).unwrap();
        let mut p = profile(Archetype::Sage, 5);
        p.current_state.vitality = 0;
        assert!(engine.synthesize(&p, now(), &mut FixedSource::new(8.0, 3)).is_ok());
    }

    #[test]
    fn test_incomplete_table_rejected_at_construction() {
        let mut table = ArchetypeTable::builtin();
        table.archetypes.remove(&Archetype::Mystic);
        let err = GuidanceEngine::with_table(GuidanceConfig::default(), table).err();
        assert!(matches!(err, Some(GuidanceError::IncompleteTable { .. })));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = GuidanceConfig::default();
        config.expiry.min_days = 9;
        assert!(matches!(GuidanceEngine::new(config), Err(GuidanceError::Config(_))));
    }

    #[test]
    fn test_unbounded_windows_rejected_at_construction() {
        let config = GuidanceConfig {
            lookback_days: 200_000_000,
            ..Default::default()
        };
        assert!(matches!(GuidanceEngine::new(config), Err(GuidanceError::Config(_))));

        let mut config = GuidanceConfig::default();
        config.expiry.max_days = 200_000_000;
        assert!(matches!(GuidanceEngine::new(config), Err(GuidanceError::Config(_))));
    }

    #[test]
    fn test_end_of_time_is_an_error_not_a_panic() {
        let engine = GuidanceEngine::default();
        let p = profile(Archetype::Sage, 5);
        let err = engine
            .synthesize(&p, DateTime::<Utc>::MAX_UTC, &mut FixedSource::new(8.0, 3))
            .unwrap_err();
        assert!(matches!(err, GuidanceError::Timestamp(_)));
    }

    #[test]
    fn test_with_rhythm_overrides_config() {
        let engine = GuidanceEngine::default().with_rhythm(Box::new(SeasonalRhythm::default()));
        let p = profile(Archetype::Nurturer, 6);
        // 09:00 is inside the default morning window; no threads -> growing
        // matches the default tending season.
        let g = engine.synthesize(&p, now(), &mut FixedSource::new(7.0, 3)).unwrap();
        assert_eq!(g.alignment.rhythm, 10.0);
    }

    #[test]
    fn test_seasonal_mode_from_config() {
        let mut config = GuidanceConfig::default();
        config.rhythm.mode = RhythmMode::Seasonal;
        let engine = GuidanceEngine::new(config).unwrap();
        let p = profile(Archetype::Nurturer, 6);
        let g = engine.synthesize(&p, now(), &mut FixedSource::new(7.0, 3)).unwrap();
        assert_eq!(g.alignment.rhythm, 10.0);
    }

    #[test]
    fn test_from_config_missing_table_file_fails() {
        let config = GuidanceConfig {
            archetype_table: Some("/nonexistent/archetypes.toml".into()),
            ..Default::default()
        };
        assert!(GuidanceEngine::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_loads_table_file() {
        let mut source = "version = 9\n".to_string();
        for a in Archetype::ALL {
            source.push_str(&format!(
                "\n[archetypes.{0}]\nweights = [0.2, 0.2, 0.2, 0.2, 0.2]\n\n\
                 [archetypes.{0}.templates]\n\
                 low_energy = \"I rest, {0}.\"\n\
                 high_energy = \"I rise, {0}.\"\n\
                 growing = \"I grow, {0}.\"\n",
                a.name()
            ));
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archetypes.toml");
        std::fs::write(&path, source).unwrap();

        let config = GuidanceConfig {
            archetype_table: Some(path),
            ..Default::default()
        };
        let engine = GuidanceEngine::from_config(config).unwrap();
        assert_eq!(engine.table().version, 9);

        // Planting has no template in this table, so it falls back to growing.
        let mut p = profile(Archetype::Mystic, 6);
        p.wisdom_threads.push(soulguide_core::WisdomThread {
            id: Uuid::new_v4(),
            theme: "stillness".to_string(),
            growth_stage: soulguide_core::GrowthStage::Seed,
            integration_level: 2,
            last_contemplated: now(),
            related_threads: vec![],
        });
        let g = engine.synthesize(&p, now(), &mut FixedSource::new(8.0, 3)).unwrap();
        assert_eq!(g.message, "I grow, mystic.");
        // Equal weights over uniform 6s.
        assert_eq!(g.alignment.archetype, 6.0);

        let p = profile(Archetype::Sage, 2);
        let g = engine.synthesize(&p, now(), &mut FixedSource::new(8.0, 3)).unwrap();
        assert_eq!(g.message, "I rest, sage.");
    }

    #[test]
    fn test_from_config_without_table_uses_builtin() {
        let engine = GuidanceEngine::from_config(GuidanceConfig::default()).unwrap();
        assert_eq!(engine.table(), &ArchetypeTable::builtin());
        let entry = engine.table().entry(Archetype::Creator).unwrap();
        assert!(entry.template(TemplateKey::HighEnergy).is_some());
    }
}
