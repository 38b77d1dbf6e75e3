//! Rhythm evaluation: secondary alignment score against the declared rhythm.
//!
//! Two implementations sit behind [`RhythmEvaluator`]:
//! - [`PlaceholderRhythm`]: uniform draw in the configured range (parity
//!   with the long-standing behaviour, no real comparison)
//! - [`SeasonalRhythm`]: deterministic comparison of the current hour and
//!   the derived growth pattern against [`RhythmPattern`]

use chrono::{DateTime, Timelike, Utc};
use soulguide_core::{GrowthPattern, GrowthSeason, PracticeTime, RhythmConfig, RhythmMode, RhythmPattern, SoulProfile};

use crate::patterns::PatternSummary;
use crate::random::RandomSource;
use crate::scoring::round1;

pub trait RhythmEvaluator: Send + Sync {
    fn evaluate(
        &self,
        profile: &SoulProfile,
        summary: &PatternSummary,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> f64;

    /// Name for logging.
    fn name(&self) -> &'static str;
}

/// Build the evaluator selected by config.
pub fn from_config(config: &RhythmConfig) -> Box<dyn RhythmEvaluator> {
    match config.mode {
        RhythmMode::Placeholder => Box::new(PlaceholderRhythm::new(config.min_score, config.max_score)),
        RhythmMode::Seasonal => Box::new(SeasonalRhythm::new(config.min_score, config.max_score)),
    }
}

// ============================================================================
// Placeholder
// ============================================================================

/// Uniform random score in [min, max]; ignores the profile entirely.
#[derive(Debug, Clone)]
pub struct PlaceholderRhythm {
    min: f64,
    max: f64,
}

impl Default for PlaceholderRhythm {
    fn default() -> Self {
        Self::new(7.0, 10.0)
    }
}

impl PlaceholderRhythm {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl RhythmEvaluator for PlaceholderRhythm {
    fn evaluate(
        &self,
        _profile: &SoulProfile,
        _summary: &PatternSummary,
        _now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> f64 {
        rng.uniform(self.min, self.max)
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

// ============================================================================
// Seasonal
// ============================================================================

/// min + (max - min) × (time_fit + season_fit) / 2, rounded to one decimal.
///
/// time_fit: 1.0 inside the declared practice window, 0.5 in an adjacent
/// window, else 0.0.
/// season_fit: 1.0 when the declared season matches the growth pattern,
/// 0.5 for a resting season while energy is low (overall < 5), else 0.0.
#[derive(Debug, Clone)]
pub struct SeasonalRhythm {
    min: f64,
    max: f64,
}

impl Default for SeasonalRhythm {
    fn default() -> Self {
        Self::new(7.0, 10.0)
    }
}

impl SeasonalRhythm {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn time_fit(rhythm: &RhythmPattern, now: DateTime<Utc>) -> f64 {
        let current = PracticeTime::from_hour(now.hour());
        if current == rhythm.optimal_practice_time {
            1.0
        } else if current.is_adjacent(rhythm.optimal_practice_time) {
            0.5
        } else {
            0.0
        }
    }

    pub fn season_fit(rhythm: &RhythmPattern, summary: &PatternSummary) -> f64 {
        match (rhythm.growth_season, summary.growth_pattern) {
            (GrowthSeason::Planting, GrowthPattern::Planting)
            | (GrowthSeason::Tending, GrowthPattern::Growing)
            | (GrowthSeason::Harvesting, GrowthPattern::Integrating) => 1.0,
            (GrowthSeason::Resting, _) if summary.trend.overall < 5.0 => 0.5,
            _ => 0.0,
        }
    }
}

impl RhythmEvaluator for SeasonalRhythm {
    fn evaluate(
        &self,
        profile: &SoulProfile,
        summary: &PatternSummary,
        now: DateTime<Utc>,
        _rng: &mut dyn RandomSource,
    ) -> f64 {
        let fit = (Self::time_fit(&profile.rhythm, now) + Self::season_fit(&profile.rhythm, summary)) / 2.0;
        round1(self.min + (self.max - self.min) * fit).max(self.min).min(self.max)
    }

    fn name(&self) -> &'static str {
        "seasonal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::extract;
    use crate::random::{FixedSource, RngSource};
    use chrono::TimeZone;
    use soulguide_core::{Archetype, SoulAge, SpiritualState};
    use uuid::Uuid;

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 30, 0).unwrap()
    }

    fn profile(practice: PracticeTime, season: GrowthSeason, energy: u8) -> SoulProfile {
        let mut p = SoulProfile::new(
            Uuid::nil(),
            Archetype::Mystic,
            SoulAge::Old,
            SpiritualState::uniform(energy, at_hour(0)),
        );
        p.rhythm.optimal_practice_time = practice;
        p.rhythm.growth_season = season;
        p
    }

    #[test]
    fn test_placeholder_uses_injected_source() {
        let p = profile(PracticeTime::Morning, GrowthSeason::Tending, 6);
        let summary = extract(&p, at_hour(9), 30);
        let rhythm = PlaceholderRhythm::default();
        let score = rhythm.evaluate(&p, &summary, at_hour(9), &mut FixedSource::new(8.4, 0));
        assert_eq!(score, 8.4);
    }

    #[test]
    fn test_placeholder_range() {
        let p = profile(PracticeTime::Morning, GrowthSeason::Tending, 6);
        let summary = extract(&p, at_hour(9), 30);
        let rhythm = PlaceholderRhythm::default();
        let mut rng = RngSource::seeded(99);
        for _ in 0..200 {
            let score = rhythm.evaluate(&p, &summary, at_hour(9), &mut rng);
            assert!((7.0..=10.0).contains(&score), "score out of range: {}", score);
        }
    }

    #[test]
    fn test_seasonal_full_fit() {
        // No threads -> growing, which matches tending.
        let p = profile(PracticeTime::Morning, GrowthSeason::Tending, 6);
        let summary = extract(&p, at_hour(9), 30);
        let score = SeasonalRhythm::default().evaluate(&p, &summary, at_hour(9), &mut FixedSource::new(0.0, 0));
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_seasonal_no_fit() {
        let p = profile(PracticeTime::Morning, GrowthSeason::Harvesting, 6);
        let summary = extract(&p, at_hour(22), 30);
        let score = SeasonalRhythm::default().evaluate(&p, &summary, at_hour(22), &mut FixedSource::new(0.0, 0));
        assert_eq!(score, 7.0);
    }

    #[test]
    fn test_seasonal_partial_fit() {
        // Adjacent window (dawn next to morning) and a mismatched season.
        let p = profile(PracticeTime::Morning, GrowthSeason::Planting, 6);
        let summary = extract(&p, at_hour(6), 30);
        let score = SeasonalRhythm::default().evaluate(&p, &summary, at_hour(6), &mut FixedSource::new(0.0, 0));
        assert_eq!(score, 7.8);
    }

    #[test]
    fn test_resting_season_counts_when_energy_low() {
        let low = profile(PracticeTime::Night, GrowthSeason::Resting, 3);
        let summary = extract(&low, at_hour(12), 30);
        assert_eq!(SeasonalRhythm::season_fit(&low.rhythm, &summary), 0.5);

        let high = profile(PracticeTime::Night, GrowthSeason::Resting, 8);
        let summary = extract(&high, at_hour(12), 30);
        assert_eq!(SeasonalRhythm::season_fit(&high.rhythm, &summary), 0.0);
    }

    #[test]
    fn test_from_config_selects_mode() {
        let mut cfg = RhythmConfig::default();
        assert_eq!(from_config(&cfg).name(), "placeholder");
        cfg.mode = RhythmMode::Seasonal;
        assert_eq!(from_config(&cfg).name(), "seasonal");
    }
}
