//! WebAssembly module for the Smart Crop Advisor
//!
//! Runs the recommendation engine in the browser so the form works offline:
//! - Crop ranking against the built-in or a supplied catalog
//! - Deterministic single-crop scoring
//! - Category classification

use serde::Serialize;
use shared::{
    recommend, score, score_breakdown, validate_condition, Catalog, Jitter, NoJitter,
    ScoreAdjustment, UnitSampleJitter,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Rank the built-in catalog for a condition (JSON in, JSON out)
#[wasm_bindgen]
pub fn recommend_crops(condition_json: &str) -> Result<String, JsValue> {
    let catalog = Catalog::builtin().map_err(|e| to_js_error(e.to_string()))?;
    rank(condition_json, &catalog, &mut browser_jitter()).map_err(to_js_error)
}

/// Rank a caller-supplied catalog for a condition
#[wasm_bindgen]
pub fn recommend_crops_with_catalog(
    condition_json: &str,
    catalog_json: &str,
) -> Result<String, JsValue> {
    let catalog = Catalog::from_json(catalog_json).map_err(|e| to_js_error(e.to_string()))?;
    rank(condition_json, &catalog, &mut browser_jitter()).map_err(to_js_error)
}

/// Score one crop without jitter; returns `{score, category, adjustments}`
#[wasm_bindgen]
pub fn score_crop_deterministic(crop_json: &str, condition_json: &str) -> Result<String, JsValue> {
    score_single(crop_json, condition_json).map_err(to_js_error)
}

/// Category name for a score: "recommended", "good" or "moderate"
#[wasm_bindgen]
pub fn classify_recommendation(score: f64) -> String {
    classify_by_score(score).to_string()
}

#[derive(Serialize)]
struct CropScore {
    score: f64,
    category: String,
    adjustments: Vec<ScoreAdjustment>,
}

fn browser_jitter() -> UnitSampleJitter<fn() -> f64> {
    UnitSampleJitter(js_sys::Math::random)
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_condition(condition_json: &str) -> Result<FarmCondition, String> {
    let condition: FarmCondition = serde_json::from_str(condition_json)
        .map_err(|e| format!("Invalid condition JSON: {}", e))?;
    validate_condition(&condition).map_err(|e| format!("Invalid condition: {}", e))?;
    Ok(condition)
}

fn rank<J: Jitter + ?Sized>(
    condition_json: &str,
    catalog: &[Crop],
    jitter: &mut J,
) -> Result<String, String> {
    let condition = parse_condition(condition_json)?;
    let recommendations: Vec<Recommendation> = recommend(&condition, catalog, jitter);
    serde_json::to_string(&recommendations).map_err(|e| e.to_string())
}

fn score_single(crop_json: &str, condition_json: &str) -> Result<String, String> {
    let crop: Crop =
        serde_json::from_str(crop_json).map_err(|e| format!("Invalid crop JSON: {}", e))?;
    let condition = parse_condition(condition_json)?;

    let value = score(&crop, &condition, &mut NoJitter);
    let result = CropScore {
        score: value,
        category: classify_by_score(value).to_string(),
        adjustments: score_breakdown(&crop, &condition),
    };
    serde_json::to_string(&result).map_err(|e| e.to_string())
}
