//! The four-stage planning pipeline
//!
//! Soil classification, crop selection, irrigation planning, and cost
//! estimation compose linearly into [`Planner::analyze_and_suggest`]. Every
//! stage is pure and total: malformed domain input is defaulted, never
//! rejected, so the pipeline always produces a well-formed
//! [`AnalysisResult`]. The only shared data is static reference tables, so
//! concurrent invocations need no synchronization.

pub mod cost;
pub mod crops;
pub mod irrigation;
pub mod soil;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub use cost::{estimate_cost, CostEstimate};
pub use crops::{select_crops, CropCandidate, CropRanker, TableRanker, DEFAULT_TOP_N};
pub use irrigation::{plan_irrigation, IrrigationMethod, IrrigationPlan};
pub use soil::{
    analyze_soil, HeuristicClassifier, SoilClassifier, SoilObservation, SoilProfile, SoilType,
};

/// Default plot area when the caller does not supply one
pub const DEFAULT_AREA_ACRES: f64 = 1.0;

/// One planning request. All fields are optional; defaults are applied by
/// the pipeline. Type validation (non-numeric area, budget) is the calling
/// wrapper's responsibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub soil: SoilObservation,
    pub area_acres: Option<f64>,
    pub water_budget: Option<f64>,
    pub top_n: Option<usize>,
}

/// Aggregate result of one pipeline run. Irrigation and cost are computed
/// for the best (lowest-water) recommended crop.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub soil: SoilProfile,
    pub crops: Vec<CropCandidate>,
    pub irrigation: IrrigationPlan,
    pub cost: CostEstimate,
}

/// The pipeline orchestrator.
///
/// Holds the classifier and ranker behind capability traits so the heuristic
/// stages can be swapped for model-backed implementations.
pub struct Planner {
    classifier: Arc<dyn SoilClassifier>,
    ranker: Arc<dyn CropRanker>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicClassifier), Arc::new(TableRanker))
    }
}

impl Planner {
    pub fn new(classifier: Arc<dyn SoilClassifier>, ranker: Arc<dyn CropRanker>) -> Self {
        Self { classifier, ranker }
    }

    /// Run the full pipeline: soil -> crops -> irrigation -> cost.
    ///
    /// Total for any request: each stage guarantees a well-formed default
    /// instead of failing, so there is no error-recovery logic here.
    pub fn analyze_and_suggest(&self, request: &AnalysisRequest) -> AnalysisResult {
        let area_acres = request.area_acres.unwrap_or(DEFAULT_AREA_ACRES);
        let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);

        let soil = self.classifier.classify(&request.soil);
        debug!("classified soil as {}", soil.soil_type);

        let crops = self.ranker.rank(soil.soil_type, top_n);

        let (best_usage, best_name) = crops
            .first()
            .map(|best| (best.water_l_per_day_per_acre, best.name))
            .unwrap_or((0.0, ""));
        let irrigation = plan_irrigation(best_usage, request.water_budget);
        let cost = estimate_cost(best_name, area_acres);

        AnalysisResult {
            soil,
            crops,
            irrigation,
            cost,
        }
    }
}

/// Run the pipeline with the default heuristic stages
pub fn analyze_and_suggest(request: &AnalysisRequest) -> AnalysisResult {
    Planner::default().analyze_and_suggest(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_request_is_empty() {
        let result = analyze_and_suggest(&AnalysisRequest::default());
        assert_eq!(result.soil.soil_type, SoilType::Loam);
        assert_eq!(result.crops.len(), 3);
        assert_eq!(result.cost.area_acres, DEFAULT_AREA_ACRES);
        assert!(result.irrigation.within_budget);
    }

    #[test]
    fn irrigation_and_cost_use_the_best_crop() {
        let result = analyze_and_suggest(&AnalysisRequest {
            soil: SoilObservation {
                soil_type: Some("clay".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        // Sugarcane ranks first for clay
        assert_eq!(result.cost.crop, "Sugarcane");
        assert_eq!(result.irrigation.estimated_water_usage, 900.0);
        assert_eq!(result.irrigation.method, IrrigationMethod::Flood);
    }

    #[test]
    fn top_n_of_zero_still_produces_a_result() {
        let result = analyze_and_suggest(&AnalysisRequest {
            top_n: Some(0),
            ..Default::default()
        });
        assert!(result.crops.is_empty());
        assert_eq!(result.irrigation.estimated_water_usage, 0.0);
        assert_eq!(result.cost.total_cost, 0.0);
    }

    #[test]
    fn custom_ranker_substitutes_through_the_trait() {
        struct FixedRanker;
        impl CropRanker for FixedRanker {
            fn rank(&self, _soil_type: SoilType, _top_n: usize) -> Vec<CropCandidate> {
                crops::crop_table()
                    .iter()
                    .filter(|c| c.name == "Wheat")
                    .cloned()
                    .collect()
            }
        }

        let planner = Planner::new(Arc::new(HeuristicClassifier), Arc::new(FixedRanker));
        let result = planner.analyze_and_suggest(&AnalysisRequest::default());
        assert_eq!(result.cost.crop, "Wheat");
    }
}
