//! Pattern extraction: dominant emotions, growth pattern and energy trend.
//!
//! Pure over the profile snapshot. Empty history is not an error: no recent
//! moments gives an empty emotion list, no active threads gives `Growing`.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use soulguide_core::{GrowthPattern, GrowthStage, SacredMoment, SoulProfile, SpiritualState, WisdomThread};

/// How many emotions the summary keeps.
pub const DOMINANT_EMOTION_COUNT: usize = 3;

/// Current state dimensions plus their mean, used as the energy signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub clarity: u8,
    pub peace: u8,
    pub vitality: u8,
    pub connection: u8,
    pub purpose: u8,
    pub overall: f64,
}

impl From<&SpiritualState> for Trend {
    fn from(state: &SpiritualState) -> Self {
        Self {
            clarity: state.clarity,
            peace: state.peace,
            vitality: state.vitality,
            connection: state.connection,
            purpose: state.purpose,
            overall: state.overall(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    pub dominant_emotions: Vec<String>,
    pub growth_pattern: GrowthPattern,
    pub trend: Trend,
}

/// Summarize a profile as seen from `now`, looking back `lookback_days`.
pub fn extract(profile: &SoulProfile, now: DateTime<Utc>, lookback_days: u32) -> PatternSummary {
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(lookback_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent = profile
        .sacred_moments
        .iter()
        .filter(|m| m.timestamp >= cutoff);

    PatternSummary {
        dominant_emotions: dominant_emotions(recent, DOMINANT_EMOTION_COUNT),
        growth_pattern: growth_pattern(&profile.wisdom_threads),
        trend: Trend::from(&profile.current_state),
    }
}

/// Top `n` primary emotions by frequency; ties keep first-seen order.
pub fn dominant_emotions<'a, I>(moments: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a SacredMoment>,
{
    // (emotion, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for moment in moments {
        let emotion = moment.primary_emotion();
        match counts.iter_mut().find(|(e, _)| *e == emotion) {
            Some((_, c)) => *c += 1,
            None => counts.push((emotion, 1)),
        }
    }
    // Stable sort preserves first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(e, _)| e.to_string())
        .collect()
}

/// Classify active-thread maturity.
///
/// - no active threads -> `Growing`
/// - seed > sprouting + blooming -> `Planting`
/// - sprouting > blooming -> `Growing`
/// - otherwise -> `Integrating`
pub fn growth_pattern(threads: &[WisdomThread]) -> GrowthPattern {
    let (mut seed, mut sprouting, mut blooming, mut active) = (0usize, 0usize, 0usize, 0usize);
    for thread in threads.iter().filter(|t| t.is_active()) {
        active += 1;
        match thread.growth_stage {
            GrowthStage::Seed => seed += 1,
            GrowthStage::Sprouting => sprouting += 1,
            GrowthStage::Blooming => blooming += 1,
            GrowthStage::Fruiting => {}
        }
    }

    if active == 0 {
        GrowthPattern::Growing
    } else if seed > sprouting + blooming {
        GrowthPattern::Planting
    } else if sprouting > blooming {
        GrowthPattern::Growing
    } else {
        GrowthPattern::Integrating
    }
}
