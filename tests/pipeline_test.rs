//! End-to-end scenarios for the planning pipeline

use agroplan::pipeline::{
    analyze_and_suggest, AnalysisRequest, IrrigationMethod, SoilObservation, SoilType,
};

fn request_with_soil(soil_type: &str) -> AnalysisRequest {
    AnalysisRequest {
        soil: SoilObservation {
            soil_type: Some(soil_type.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn identical_requests_yield_identical_results() {
    let request = AnalysisRequest {
        soil: SoilObservation {
            image_path: Some("sandy_plot.jpg".to_string()),
            ..Default::default()
        },
        area_acres: Some(2.5),
        water_budget: Some(300.0),
        top_n: Some(3),
    };

    let first = serde_json::to_value(analyze_and_suggest(&request)).unwrap();
    let second = serde_json::to_value(analyze_and_suggest(&request)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn low_water_budget_scenario_recommends_affordable_crop() {
    // No image, one acre, 250 L/day budget: the default loam profile should
    // surface a low-water crop that fits the budget under drip irrigation.
    let request = AnalysisRequest {
        area_acres: Some(1.0),
        water_budget: Some(250.0),
        ..Default::default()
    };
    let result = analyze_and_suggest(&request);

    assert_eq!(result.soil.soil_type, SoilType::Loam);
    assert_eq!(result.crops[0].name, "Millet");
    assert!(result.irrigation.within_budget);
    assert_eq!(result.irrigation.method, IrrigationMethod::Drip);
}

#[test]
fn clay_without_budget_still_surfaces_high_water_crops() {
    let result = analyze_and_suggest(&request_with_soil("clay"));

    let names: Vec<&str> = result.crops.iter().map(|c| c.name).collect();
    assert!(names.contains(&"Rice"));
    assert!(result.irrigation.within_budget);
    assert!(result.cost.total_cost > 200.0);
}

#[test]
fn unknown_soil_type_degrades_to_loam_end_to_end() {
    let result = analyze_and_suggest(&request_with_soil("chalky nonsense"));
    assert_eq!(result.soil.soil_type, SoilType::Loam);
    assert!(!result.crops.is_empty());
}

#[test]
fn total_cost_doubles_with_area() {
    let mut request = request_with_soil("silty");
    request.area_acres = Some(1.3);
    let base = analyze_and_suggest(&request);

    request.area_acres = Some(2.6);
    let doubled = analyze_and_suggest(&request);

    assert!((doubled.cost.total_cost - 2.0 * base.cost.total_cost).abs() < 1e-9);
}

#[test]
fn result_serializes_with_the_contract_field_names() {
    let json = serde_json::to_value(analyze_and_suggest(&AnalysisRequest::default())).unwrap();

    assert!(json.get("soil").is_some());
    assert!(json["crops"].is_array());
    assert!(json.get("irrigation").is_some());
    assert!(json.get("cost").is_some());
    assert!(json["soil"].get("pH").is_some());
    assert_eq!(json["irrigation"]["method"], "drip");
}

#[test]
fn request_deserializes_from_wrapper_json() {
    let request: AnalysisRequest = serde_json::from_str(
        r#"{"soil_type": "sandy", "pH": 6.2, "area_acres": 0.5, "water_budget": 180}"#,
    )
    .unwrap();
    let result = analyze_and_suggest(&request);

    assert_eq!(result.soil.soil_type, SoilType::Sandy);
    assert_eq!(result.soil.ph, 6.2);
    assert_eq!(result.crops[0].name, "Groundnut");
    // Groundnut needs 120 L/day, within the 180 budget
    assert!(result.irrigation.within_budget);
}
