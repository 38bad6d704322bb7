//! Soil classification stage
//!
//! Maps a soil-photo filename or manually entered descriptors to a
//! [`SoilProfile`]. There is no pixel analysis: the filename is inspected for
//! keyword cues as a stand-in for a future model-backed classifier, which is
//! why classification sits behind the [`SoilClassifier`] trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// The four soil classes the planner understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Loam,
    Sandy,
    Clay,
    Silty,
}

impl SoilType {
    /// All supported soil types, in display order
    pub const ALL: [SoilType; 4] = [
        SoilType::Loam,
        SoilType::Sandy,
        SoilType::Clay,
        SoilType::Silty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loam => "loam",
            SoilType::Sandy => "sandy",
            SoilType::Clay => "clay",
            SoilType::Silty => "silty",
        }
    }

    /// Parse a user-supplied soil type string, falling back to loam.
    ///
    /// The planner never rejects a soil type: unrecognized values degrade to
    /// the loam default so the pipeline stays total.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "loam" => SoilType::Loam,
            "sandy" => SoilType::Sandy,
            "clay" => SoilType::Clay,
            "silty" => SoilType::Silty,
            other => {
                warn!("unrecognized soil type {other:?}, defaulting to loam");
                SoilType::Loam
            }
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filename substrings that identify a soil type, checked in order.
/// First match wins.
const FILENAME_CUES: [(&str, SoilType); 4] = [
    ("clay", SoilType::Clay),
    ("sand", SoilType::Sandy),
    ("loam", SoilType::Loam),
    ("silt", SoilType::Silty),
];

/// Fixed per-soil-type defaults used to fill missing profile fields.
///
/// The values are fixed rather than sampled so identical inputs always
/// produce identical profiles.
struct SoilDefaults {
    texture: &'static str,
    moisture_pct: f64,
    ph: f64,
}

const fn defaults_for(soil_type: SoilType) -> SoilDefaults {
    match soil_type {
        SoilType::Loam => SoilDefaults {
            texture: "balanced",
            moisture_pct: 22.0,
            ph: 6.5,
        },
        SoilType::Sandy => SoilDefaults {
            texture: "coarse",
            moisture_pct: 10.0,
            ph: 6.0,
        },
        SoilType::Clay => SoilDefaults {
            texture: "fine",
            moisture_pct: 30.0,
            ph: 7.0,
        },
        SoilType::Silty => SoilDefaults {
            texture: "fine",
            moisture_pct: 25.0,
            ph: 6.8,
        },
    }
}

/// Raw soil input as supplied by the CLI or API wrapper.
///
/// Everything is optional; the classifier fills gaps from the defaults table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilObservation {
    /// Path to a soil photo. Only the filename is inspected, never the file.
    pub image_path: Option<String>,
    /// Manually entered soil type, parsed leniently
    pub soil_type: Option<String>,
    pub texture: Option<String>,
    pub moisture_pct: Option<f64>,
    #[serde(rename = "pH", alias = "ph")]
    pub ph: Option<f64>,
}

/// Classified soil attributes consumed by the crop selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilProfile {
    pub soil_type: SoilType,
    pub texture: String,
    pub moisture_pct: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
}

/// Capability interface for soil classification.
///
/// The shipped implementation is a filename/keyword heuristic; a model-backed
/// classifier can replace it without changing the pipeline contract.
pub trait SoilClassifier: Send + Sync {
    fn classify(&self, observation: &SoilObservation) -> SoilProfile;
}

/// Keyword- and table-driven classifier. Never fails; unknown inputs
/// degrade to the loam defaults.
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    fn soil_type_from_filename(path: &str) -> SoilType {
        let basename = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        for (cue, soil_type) in FILENAME_CUES {
            if basename.contains(cue) {
                debug!("filename {basename:?} matched cue {cue:?} -> {soil_type}");
                return soil_type;
            }
        }
        debug!("filename {basename:?} matched no cue, defaulting to loam");
        SoilType::Loam
    }
}

impl SoilClassifier for HeuristicClassifier {
    fn classify(&self, observation: &SoilObservation) -> SoilProfile {
        let soil_type = match (&observation.image_path, &observation.soil_type) {
            (Some(path), _) => Self::soil_type_from_filename(path),
            (None, Some(raw)) => SoilType::parse_lenient(raw),
            (None, None) => SoilType::Loam,
        };

        let defaults = defaults_for(soil_type);
        SoilProfile {
            soil_type,
            texture: observation
                .texture
                .clone()
                .unwrap_or_else(|| defaults.texture.to_string()),
            moisture_pct: observation.moisture_pct.unwrap_or(defaults.moisture_pct),
            ph: observation.ph.unwrap_or(defaults.ph),
        }
    }
}

/// Classify soil with the default heuristic classifier
pub fn analyze_soil(observation: &SoilObservation) -> SoilProfile {
    HeuristicClassifier.classify(observation)
}
