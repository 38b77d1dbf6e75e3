//! Archetype table: the static configuration behind scoring and synthesis.
//!
//! Each archetype owns a weight 5-tuple over the state dimensions (clarity,
//! peace, vitality, connection, purpose; summing to 1.0) and five guidance
//! templates. The built-in table is versioned; an override table with the same
//! shape can be loaded from TOML and is checked by [`ArchetypeTable::validate`]
//! before the engine accepts it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{GuidanceError, Result};

/// Version of the built-in table. Bump on any weight or template change.
pub const TABLE_VERSION: u32 = 1;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// The closed set of seven personality archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Sage,
    Mystic,
    Healer,
    Creator,
    Warrior,
    Seeker,
    Nurturer,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Sage,
        Archetype::Mystic,
        Archetype::Healer,
        Archetype::Creator,
        Archetype::Warrior,
        Archetype::Seeker,
        Archetype::Nurturer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Sage => "sage",
            Archetype::Mystic => "mystic",
            Archetype::Healer => "healer",
            Archetype::Creator => "creator",
            Archetype::Warrior => "warrior",
            Archetype::Seeker => "seeker",
            Archetype::Nurturer => "nurturer",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = GuidanceError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|a| a.name() == tag)
            .ok_or_else(|| GuidanceError::UnknownArchetype(s.to_string()))
    }
}

/// Template slots each archetype defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    LowEnergy,
    HighEnergy,
    Planting,
    Growing,
    Integrating,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 5] = [
        TemplateKey::LowEnergy,
        TemplateKey::HighEnergy,
        TemplateKey::Planting,
        TemplateKey::Growing,
        TemplateKey::Integrating,
    ];

    /// Keys every table entry must define. The growth keys other than
    /// `growing` fall back to `growing` when absent.
    pub const REQUIRED: [TemplateKey; 3] = [
        TemplateKey::LowEnergy,
        TemplateKey::HighEnergy,
        TemplateKey::Growing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKey::LowEnergy => "low_energy",
            TemplateKey::HighEnergy => "high_energy",
            TemplateKey::Planting => "planting",
            TemplateKey::Growing => "growing",
            TemplateKey::Integrating => "integrating",
        }
    }
}

/// Weights and templates for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeEntry {
    /// Weights over (clarity, peace, vitality, connection, purpose)
    pub weights: [f64; 5],
    pub templates: BTreeMap<TemplateKey, String>,
}

impl ArchetypeEntry {
    pub fn template(&self, key: TemplateKey) -> Option<&str> {
        self.templates.get(&key).map(String::as_str)
    }
}

/// Complete archetype table, keyed by archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeTable {
    pub version: u32,
    pub archetypes: BTreeMap<Archetype, ArchetypeEntry>,
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArchetypeTable {
    /// The built-in table at [`TABLE_VERSION`].
    pub fn builtin() -> Self {
        let archetypes = BUILTIN_ARCHETYPES
            .iter()
            .map(|b| {
                let templates = TemplateKey::ALL
                    .into_iter()
                    .zip(b.templates)
                    .map(|(k, t)| (k, t.to_string()))
                    .collect();
                (
                    b.archetype,
                    ArchetypeEntry {
                        weights: b.weights,
                        templates,
                    },
                )
            })
            .collect();
        Self {
            version: TABLE_VERSION,
            archetypes,
        }
    }

    /// Parse an override table from TOML. The result is validated.
    ///
    /// ```toml
    /// version = 2
    ///
    /// [archetypes.sage]
    /// weights = [0.35, 0.25, 0.10, 0.10, 0.20]
    ///
    /// [archetypes.sage.templates]
    /// low_energy = "..."
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let raw: RawTable = toml::from_str(source)?;
        let mut archetypes = BTreeMap::new();
        for (tag, entry) in raw.archetypes {
            let archetype: Archetype = tag.parse()?;
            archetypes.insert(archetype, entry.into_entry());
        }
        let table = Self {
            version: raw.version,
            archetypes,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn entry(&self, archetype: Archetype) -> Result<&ArchetypeEntry> {
        self.archetypes
            .get(&archetype)
            .ok_or_else(|| GuidanceError::UnknownArchetype(archetype.name().to_string()))
    }

    /// Exhaustiveness check: every archetype present, weights sum to 1.0,
    /// required templates present and non-empty.
    pub fn validate(&self) -> Result<()> {
        for archetype in Archetype::ALL {
            let incomplete = |reason: String| GuidanceError::IncompleteTable {
                archetype: archetype.name().to_string(),
                reason,
            };

            let entry = self
                .archetypes
                .get(&archetype)
                .ok_or_else(|| incomplete("missing entry".to_string()))?;

            if entry.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(incomplete(format!(
                    "weights must be finite and non-negative: {:?}",
                    entry.weights
                )));
            }
            let sum: f64 = entry.weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(incomplete(format!("weights sum to {}, expected 1.0", sum)));
            }

            for key in TemplateKey::ALL {
                match entry.template(key) {
                    Some(t) if t.trim().is_empty() => {
                        return Err(incomplete(format!("template {} is empty", key.name())));
                    }
                    Some(_) => {}
                    None if TemplateKey::REQUIRED.contains(&key) => {
                        return Err(incomplete(format!("template {} is missing", key.name())));
                    }
                    None => {
                        tracing::warn!(
                            "Archetype table v{}: {} has no {} template, will fall back to growing",
                            self.version,
                            archetype,
                            key.name()
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// TOML override shape
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default = "default_version")]
    version: u32,
    archetypes: BTreeMap<String, RawEntry>,
}

fn default_version() -> u32 {
    TABLE_VERSION
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    weights: [f64; 5],
    templates: RawTemplates,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemplates {
    low_energy: Option<String>,
    high_energy: Option<String>,
    planting: Option<String>,
    growing: Option<String>,
    integrating: Option<String>,
}

impl RawEntry {
    fn into_entry(self) -> ArchetypeEntry {
        let t = self.templates;
        let templates = [
            (TemplateKey::LowEnergy, t.low_energy),
            (TemplateKey::HighEnergy, t.high_energy),
            (TemplateKey::Planting, t.planting),
            (TemplateKey::Growing, t.growing),
            (TemplateKey::Integrating, t.integrating),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();
        ArchetypeEntry {
            weights: self.weights,
            templates,
        }
    }
}

// =============================================================================
// Built-in table (v1)
// =============================================================================

struct BuiltinArchetype {
    archetype: Archetype,
    weights: [f64; 5],
    /// low_energy, high_energy, planting, growing, integrating
    templates: [&'static str; 5],
}

const BUILTIN_ARCHETYPES: [BuiltinArchetype; 7] = [
    BuiltinArchetype {
        archetype: Archetype::Sage,
        weights: [0.35, 0.25, 0.10, 0.10, 0.20],
        templates: [
            "I honor the wisdom of stillness. I rest my mind so that clarity may return on its own.",
            "I share what I have learned. My understanding grows brighter when I offer it to others.",
            "I welcome new questions. Every seed of curiosity I plant today becomes tomorrow's understanding.",
            "I study patiently. Each insight I tend deepens the roots of my knowing.",
            "I weave what I know into how I live. My wisdom becomes real through practice.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Mystic,
        weights: [0.20, 0.30, 0.05, 0.30, 0.15],
        templates: [
            "I let the silence hold me. I do not need to reach for the sacred; it is already here.",
            "I open fully to the mystery. I trust the visions moving through me.",
            "I plant my intentions in the unseen. I trust what grows in darkness before it reaches the light.",
            "I follow the subtle signs. My inner knowing unfolds one revelation at a time.",
            "I bring the mystery into the ordinary. Every moment of my day is a doorway.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Healer,
        weights: [0.10, 0.25, 0.15, 0.35, 0.15],
        templates: [
            "I tend to myself first. My own healing is the wellspring of the care I give.",
            "I offer my presence freely. My energy flows to where it is most needed.",
            "I open to new ways of healing. I welcome what wants to be mended in me.",
            "I nurture my wounds with patience. I am becoming whole, gently and steadily.",
            "I embody what I have healed. My scars have become sources of compassion.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Creator,
        weights: [0.20, 0.10, 0.30, 0.15, 0.25],
        templates: [
            "I let my creative well refill. Rest is part of my making.",
            "I create boldly. The ideas moving through me are ready to take form.",
            "I gather inspiration without judgment. Every spark I notice is a seed of future work.",
            "I shape my work with devotion. Each day I give form to what wants to exist.",
            "I let my creations teach me. What I have made shows me who I am becoming.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Warrior,
        weights: [0.15, 0.10, 0.35, 0.10, 0.30],
        templates: [
            "I lay down my sword for now. Strength also lives in knowing when to rest.",
            "I act with courage. I move toward what matters with my whole heart.",
            "I choose the battles worth fighting. I commit to the causes that call me.",
            "I train with discipline. Every challenge I meet makes me steadier.",
            "I fight with wisdom, not force. My strength serves something greater than me.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Seeker,
        weights: [0.30, 0.10, 0.20, 0.15, 0.25],
        templates: [
            "I pause on the path. I do not have to find everything today.",
            "I explore with an open heart. New horizons are calling and I answer.",
            "I follow my questions. Each one is a trailhead into the unknown.",
            "I walk my path with attention. What I discover along the way is shaping me.",
            "I gather the lessons of my journey. The seeking has become part of who I am.",
        ],
    },
    BuiltinArchetype {
        archetype: Archetype::Nurturer,
        weights: [0.10, 0.20, 0.15, 0.40, 0.15],
        templates: [
            "I receive the care I so often give. I let myself be held.",
            "I pour my love into my circle. My warmth makes room for others to flourish.",
            "I open my heart to new connections. I welcome the people life brings to me.",
            "I tend my relationships with patience. Love grows through small, steady acts.",
            "I let love be my practice. How I care for others is how I care for my soul.",
        ],
    },
];
