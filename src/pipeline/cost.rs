//! Cost estimation stage
//!
//! Scales fixed per-acre unit costs (seeds, fertilizer, irrigation
//! infrastructure) linearly by area. No currency conversion, taxes, or
//! discounts.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

/// Per-acre unit costs for one crop, in USD
struct UnitCosts {
    crop: &'static str,
    seeds: f64,
    fertilizer: f64,
    irrigation: f64,
}

static COST_TABLE: Lazy<Vec<UnitCosts>> = Lazy::new(|| {
    vec![
        UnitCosts {
            crop: "Millet",
            seeds: 20.0,
            fertilizer: 35.0,
            irrigation: 25.0,
        },
        UnitCosts {
            crop: "Sorghum",
            seeds: 25.0,
            fertilizer: 40.0,
            irrigation: 35.0,
        },
        UnitCosts {
            crop: "Maize",
            seeds: 40.0,
            fertilizer: 60.0,
            irrigation: 50.0,
        },
        UnitCosts {
            crop: "Groundnut",
            seeds: 30.0,
            fertilizer: 30.0,
            irrigation: 30.0,
        },
        UnitCosts {
            crop: "Rice",
            seeds: 60.0,
            fertilizer: 90.0,
            irrigation: 150.0,
        },
        UnitCosts {
            crop: "Sugarcane",
            seeds: 70.0,
            fertilizer: 80.0,
            irrigation: 100.0,
        },
        UnitCosts {
            crop: "Wheat",
            seeds: 30.0,
            fertilizer: 45.0,
            irrigation: 35.0,
        },
        UnitCosts {
            crop: "Barley",
            seeds: 25.0,
            fertilizer: 40.0,
            irrigation: 30.0,
        },
    ]
});

/// Cost breakdown for growing one crop on a plot
#[derive(Debug, Clone, Serialize)]
pub struct CostEstimate {
    pub crop: String,
    pub area_acres: f64,
    pub seeds_cost: f64,
    pub fertilizer_cost: f64,
    pub irrigation_cost: f64,
    pub total_cost: f64,
}

/// Estimate the cost of growing `crop` on `area_acres`.
///
/// Fractional acreage is supported. A crop missing from the cost table
/// yields all-zero components rather than an error.
pub fn estimate_cost(crop: &str, area_acres: f64) -> CostEstimate {
    let rates = COST_TABLE
        .iter()
        .find(|entry| entry.crop.eq_ignore_ascii_case(crop));

    let (seeds, fertilizer, irrigation) = match rates {
        Some(r) => (r.seeds, r.fertilizer, r.irrigation),
        None => {
            debug!("crop {crop:?} not in cost table, returning zero estimate");
            (0.0, 0.0, 0.0)
        }
    };

    let seeds_cost = seeds * area_acres;
    let fertilizer_cost = fertilizer * area_acres;
    let irrigation_cost = irrigation * area_acres;
    CostEstimate {
        crop: crop.to_string(),
        area_acres,
        seeds_cost,
        fertilizer_cost,
        irrigation_cost,
        total_cost: seeds_cost + fertilizer_cost + irrigation_cost,
    }
}
