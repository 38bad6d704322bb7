//! Irrigation planning stage
//!
//! Chooses an irrigation method from fixed water-usage thresholds and checks
//! the usage against an optional daily water budget.

use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Daily usage at or below this gets drip irrigation (L/day/acre)
pub const DRIP_MAX_L_PER_DAY: f64 = 250.0;
/// Daily usage at or below this gets sprinklers; above it, flood
pub const SPRINKLER_MAX_L_PER_DAY: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
}

impl IrrigationMethod {
    fn for_usage(water_usage: f64) -> Self {
        if water_usage <= DRIP_MAX_L_PER_DAY {
            IrrigationMethod::Drip
        } else if water_usage <= SPRINKLER_MAX_L_PER_DAY {
            IrrigationMethod::Sprinkler
        } else {
            IrrigationMethod::Flood
        }
    }

    fn notes(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => {
                "Drip irrigation recommended for low water usage crops. Adjust frequency by season."
            }
            IrrigationMethod::Sprinkler => {
                "Sprinkler irrigation suits moderate water usage. Water early morning to limit evaporation."
            }
            IrrigationMethod::Flood => {
                "Flood irrigation for high water usage crops. Requires bunded fields and a reliable source."
            }
        }
    }
}

impl fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IrrigationMethod::Drip => "drip",
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Flood => "flood",
        };
        write!(f, "{name}")
    }
}

/// Irrigation method and budget check for one crop
#[derive(Debug, Clone, Serialize)]
pub struct IrrigationPlan {
    pub method: IrrigationMethod,
    /// Daily water usage the plan is sized for (L/day/acre)
    pub estimated_water_usage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub within_budget: bool,
    pub notes: &'static str,
}

/// Plan irrigation for a crop's daily water usage.
///
/// With no budget the plan is unconstrained and `within_budget` is true.
/// Zero or negative budgets are accepted as given: any positive usage then
/// reports `within_budget == false`. This mirrors the tolerated input
/// behavior rather than rejecting the value.
pub fn plan_irrigation(water_usage: f64, water_budget: Option<f64>) -> IrrigationPlan {
    let method = IrrigationMethod::for_usage(water_usage);
    let within_budget = match water_budget {
        Some(budget) => water_usage <= budget,
        None => true,
    };

    debug!("irrigation plan: usage={water_usage} L/day -> {method}, within_budget={within_budget}");
    IrrigationPlan {
        method,
        estimated_water_usage: water_usage,
        budget: water_budget,
        within_budget,
        notes: method.notes(),
    }
}
