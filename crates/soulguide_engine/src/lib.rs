//! Guidance synthesis engine.
//!
//! Given a read-only [`SoulProfile`](soulguide_core::SoulProfile) snapshot,
//! extracts behavioural patterns, scores archetype and rhythm alignment and
//! emits a single ranked, time-bounded [`SoulGuidance`](soulguide_core::SoulGuidance).

pub mod classify;
mod engine;
pub mod expiry;
pub mod patterns;
pub mod random;
pub mod rhythm;
pub mod scoring;
pub mod synthesis;

pub use engine::{guidance_id, GuidanceEngine};
pub use expiry::ExpiryScheduler;
pub use patterns::{PatternSummary, Trend};
pub use random::{FixedSource, RandomSource, RngSource};
pub use rhythm::{PlaceholderRhythm, RhythmEvaluator, SeasonalRhythm};
pub use synthesis::{EnergyBand, Synthesis};
