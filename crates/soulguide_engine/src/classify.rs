//! Urgency and guidance-type classification. Both are total: every input maps
//! to exactly one tier/type, checked in priority order.

use soulguide_core::{GrowthPattern, GuidanceType, Urgency};

/// - `Vital` if overall < 3 or archetype score < 3
/// - `Timely` if overall < 5 or archetype score < 5
/// - `Gentle` otherwise
pub fn urgency(overall: f64, archetype_score: f64) -> Urgency {
    if overall < 3.0 || archetype_score < 3.0 {
        Urgency::Vital
    } else if overall < 5.0 || archetype_score < 5.0 {
        Urgency::Timely
    } else {
        Urgency::Gentle
    }
}

/// - overall < 4 -> `Practice`
/// - planting -> `Contemplation`
/// - growing -> `Reflection`
/// - overall > 8 -> `Action`
/// - otherwise `Practice`
pub fn guidance_type(overall: f64, pattern: GrowthPattern) -> GuidanceType {
    if overall < 4.0 {
        GuidanceType::Practice
    } else if pattern == GrowthPattern::Planting {
        GuidanceType::Contemplation
    } else if pattern == GrowthPattern::Growing {
        GuidanceType::Reflection
    } else if overall > 8.0 {
        GuidanceType::Action
    } else {
        GuidanceType::Practice
    }
}
