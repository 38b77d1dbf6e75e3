use serde::{Deserialize, Serialize};

/// Declared time-of-day window for practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeTime {
    /// 05:00 - 08:00
    Dawn,
    /// 08:00 - 12:00
    Morning,
    /// 12:00 - 15:00
    Midday,
    /// 15:00 - 21:00
    Evening,
    /// 21:00 - 05:00
    Night,
}

impl PracticeTime {
    /// Windows in daily order; `Night` wraps around to `Dawn`.
    pub const CYCLE: [PracticeTime; 5] = [
        PracticeTime::Dawn,
        PracticeTime::Morning,
        PracticeTime::Midday,
        PracticeTime::Evening,
        PracticeTime::Night,
    ];

    /// Window containing the given hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=7 => PracticeTime::Dawn,
            8..=11 => PracticeTime::Morning,
            12..=14 => PracticeTime::Midday,
            15..=20 => PracticeTime::Evening,
            _ => PracticeTime::Night,
        }
    }

    fn position(&self) -> usize {
        Self::CYCLE.iter().position(|t| t == self).unwrap_or(0)
    }

    /// True when `other` is the window immediately before or after this one.
    pub fn is_adjacent(&self, other: PracticeTime) -> bool {
        let n = Self::CYCLE.len();
        let (a, b) = (self.position(), other.position());
        (a + 1) % n == b || (b + 1) % n == a
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthSeason {
    Planting,
    Tending,
    Harvesting,
    Resting,
}

/// A user's declared temporal and modality preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmPattern {
    pub optimal_practice_time: PracticeTime,
    /// Weekly thematic cycle, Monday first
    #[serde(default)]
    pub weekly_cycle: Vec<String>,
    /// Monthly thematic cycle, one entry per lunar/calendar phase
    #[serde(default)]
    pub monthly_cycle: Vec<String>,
    #[serde(default)]
    pub preferred_modalities: Vec<String>,
    pub growth_season: GrowthSeason,
}

impl Default for RhythmPattern {
    fn default() -> Self {
        Self {
            optimal_practice_time: PracticeTime::Morning,
            weekly_cycle: Vec::new(),
            monthly_cycle: Vec::new(),
            preferred_modalities: Vec::new(),
            growth_season: GrowthSeason::Tending,
        }
    }
}
