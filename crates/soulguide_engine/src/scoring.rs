//! Archetype alignment score.
//!
//! score = round1( Σ w_i · (d_i / 10) × 10 )
//!
//! With every dimension in [1, 10] and weights summing to 1.0 the score
//! lands in [1.0, 10.0].

use soulguide_core::{Archetype, ArchetypeTable, GuidanceError, SpiritualState};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted alignment of `state` against a weight tuple.
pub fn weighted_score(state: &SpiritualState, weights: &[f64; 5]) -> f64 {
    let dot: f64 = state
        .as_array()
        .iter()
        .zip(weights)
        .map(|(&d, w)| w * f64::from(d) / 10.0)
        .sum();
    round1(dot * 10.0)
}

/// Alignment of `state` with `archetype` under `table`.
pub fn archetype_score(
    table: &ArchetypeTable,
    archetype: Archetype,
    state: &SpiritualState,
) -> Result<f64, GuidanceError> {
    let entry = table.entry(archetype)?;
    Ok(weighted_score(state, &entry.weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn state(c: u8, p: u8, v: u8, n: u8, u: u8) -> SpiritualState {
        SpiritualState::new(c, p, v, n, u, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_uniform_state_scores_its_value() {
        let table = ArchetypeTable::builtin();
        for archetype in Archetype::ALL {
            for v in 1..=10u8 {
                let score = archetype_score(&table, archetype, &state(v, v, v, v, v)).unwrap();
                assert_eq!(score, f64::from(v), "{} at uniform {}", archetype, v);
            }
        }
    }

    #[test]
    fn test_creator_weights_vitality_and_purpose() {
        let table = ArchetypeTable::builtin();
        // 0.2*9 + 0.1*8 + 0.3*9 + 0.15*8 + 0.25*9 = 8.75
        let score = archetype_score(&table, Archetype::Creator, &state(9, 8, 9, 8, 9)).unwrap();
        assert!((score - 8.8).abs() < 0.11, "got {}", score);
    }

    #[test]
    fn test_weighting_distinguishes_archetypes() {
        let table = ArchetypeTable::builtin();
        let vital_but_lonely = state(5, 5, 10, 1, 10);
        let warrior = archetype_score(&table, Archetype::Warrior, &vital_but_lonely).unwrap();
        let nurturer = archetype_score(&table, Archetype::Nurturer, &vital_but_lonely).unwrap();
        assert!(warrior > nurturer, "warrior {} should exceed nurturer {}", warrior, nurturer);
    }

    #[test]
    fn test_score_has_one_decimal() {
        let table = ArchetypeTable::builtin();
        let score = archetype_score(&table, Archetype::Mystic, &state(3, 7, 2, 9, 4)).unwrap();
        assert_eq!(score, round1(score));
    }

    #[test]
    fn test_missing_archetype_fails_loudly() {
        let mut table = ArchetypeTable::builtin();
        table.archetypes.remove(&Archetype::Seeker);
        let err = archetype_score(&table, Archetype::Seeker, &state(5, 5, 5, 5, 5)).unwrap_err();
        assert!(matches!(err, GuidanceError::UnknownArchetype(_)));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(8.75), 8.8);
        assert_eq!(round1(0.99999999), 1.0);
        assert_eq!(round1(4.04), 4.0);
    }
}
