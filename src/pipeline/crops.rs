//! Crop selection stage
//!
//! Ranks candidate crops for a soil type by daily water usage, cheapest to
//! irrigate first. The candidate list is static reference data loaded once
//! into an immutable process-wide table.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use super::soil::SoilType;

/// Default number of ranked candidates returned by the selector
pub const DEFAULT_TOP_N: usize = 5;

/// A crop from the static reference table
#[derive(Debug, Clone, Serialize)]
pub struct CropCandidate {
    pub name: &'static str,
    pub water_l_per_day_per_acre: f64,
    pub suitable_soil_types: &'static [SoilType],
}

/// Static crop reference data. Table insertion order is the tie-breaker for
/// the stable water-usage sort, so keep new entries at the end of their
/// suitability group.
static CROP_TABLE: Lazy<Vec<CropCandidate>> = Lazy::new(|| {
    use SoilType::*;
    vec![
        CropCandidate {
            name: "Millet",
            water_l_per_day_per_acre: 150.0,
            suitable_soil_types: &[Loam],
        },
        CropCandidate {
            name: "Sorghum",
            water_l_per_day_per_acre: 200.0,
            suitable_soil_types: &[Loam, Sandy],
        },
        CropCandidate {
            name: "Maize",
            water_l_per_day_per_acre: 400.0,
            suitable_soil_types: &[Loam],
        },
        CropCandidate {
            name: "Groundnut",
            water_l_per_day_per_acre: 120.0,
            suitable_soil_types: &[Sandy],
        },
        CropCandidate {
            name: "Rice",
            water_l_per_day_per_acre: 1200.0,
            suitable_soil_types: &[Clay],
        },
        CropCandidate {
            name: "Sugarcane",
            water_l_per_day_per_acre: 900.0,
            suitable_soil_types: &[Clay],
        },
        CropCandidate {
            name: "Wheat",
            water_l_per_day_per_acre: 220.0,
            suitable_soil_types: &[Silty],
        },
        CropCandidate {
            name: "Barley",
            water_l_per_day_per_acre: 180.0,
            suitable_soil_types: &[Silty],
        },
    ]
});

/// The full static crop table, unfiltered
pub fn crop_table() -> &'static [CropCandidate] {
    &CROP_TABLE
}

/// Capability interface for crop ranking.
///
/// The shipped implementation filters and sorts the static table; a
/// model-backed ranker can replace it without changing the pipeline contract.
pub trait CropRanker: Send + Sync {
    fn rank(&self, soil_type: SoilType, top_n: usize) -> Vec<CropCandidate>;
}

/// Table-backed ranker: filter by suitability, stable-sort ascending by
/// water usage, truncate to `top_n`.
pub struct TableRanker;

impl CropRanker for TableRanker {
    fn rank(&self, soil_type: SoilType, top_n: usize) -> Vec<CropCandidate> {
        let mut candidates: Vec<CropCandidate> = crop_table()
            .iter()
            .filter(|candidate| candidate.suitable_soil_types.contains(&soil_type))
            .cloned()
            .collect();

        // Stable sort keeps table insertion order on ties
        candidates.sort_by(|a, b| {
            a.water_l_per_day_per_acre
                .total_cmp(&b.water_l_per_day_per_acre)
        });
        candidates.truncate(top_n);

        debug!(
            "ranked {} crop(s) for {soil_type} (top_n={top_n})",
            candidates.len()
        );
        candidates
    }
}

/// Rank crops with the default table-backed ranker
pub fn select_crops(soil_type: SoilType, top_n: usize) -> Vec<CropCandidate> {
    TableRanker.rank(soil_type, top_n)
}
