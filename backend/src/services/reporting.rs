//! Reporting service for recommendation exports
//! Builds the tabular recommendation report and serialises it to CSV

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{FarmCondition, Language, Recommendation};

use crate::error::{AppError, AppResult};

/// Number of crops whose benefits are listed in the report
const TOP_BENEFIT_CROPS: usize = 3;

/// Reporting service
#[derive(Clone, Default)]
pub struct ReportingService;

/// One row of the conditions table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConditionRow {
    pub parameter: String,
    pub value: String,
}

/// One row of the ranked crop table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropReportRow {
    pub rank: usize,
    pub crop_name: String,
    pub score_percent: u32,
    pub category: String,
    pub season: String,
    pub water_need: String,
    pub yield_kg_per_acre: f64,
    pub npk: String,
}

/// Benefits of one of the top crops, in the report language
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropBenefits {
    pub crop_name: String,
    pub score_percent: u32,
    pub benefits: Vec<String>,
}

/// Complete recommendation report
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub language: Language,
    pub conditions: Vec<ConditionRow>,
    pub crops: Vec<CropReportRow>,
    pub top_benefits: Vec<CropBenefits>,
}

impl ReportingService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the report for a condition and its recommendations
    pub fn build_report(
        &self,
        condition: &FarmCondition,
        recommendations: &[Recommendation],
        language: Language,
    ) -> RecommendationReport {
        let mut location = condition.location.clone();
        if let Some(coords) = &condition.coordinates {
            location = format!("{} ({})", location, coords.display_short());
        }

        let conditions = [
            ("Location", location),
            ("Soil Type", condition.soil_type.clone()),
            ("pH Level", condition.ph_level.to_string()),
            ("Rainfall", format!("{} mm", condition.rainfall_mm)),
            ("Temperature", format!("{}°C", condition.temperature_celsius)),
            ("Season", condition.season.to_string()),
            ("Farm Size", format!("{} acres", condition.farm_size_acres)),
            ("Irrigation", condition.irrigation.to_string()),
            ("Budget", condition.budget.to_string()),
        ]
        .into_iter()
        .map(|(parameter, value)| ConditionRow {
            parameter: parameter.to_string(),
            value,
        })
        .collect();

        let crops = recommendations
            .iter()
            .enumerate()
            .map(|(idx, rec)| CropReportRow {
                rank: idx + 1,
                crop_name: rec.crop.name.clone(),
                score_percent: rec.score_percent(),
                category: rec.category.to_string(),
                season: rec.crop.season.to_string(),
                water_need: rec.crop.water_requirement.to_string(),
                yield_kg_per_acre: rec.crop.yield_per_acre,
                npk: rec.crop.npk_ratio.clone(),
            })
            .collect();

        let top_benefits = recommendations
            .iter()
            .take(TOP_BENEFIT_CROPS)
            .map(|rec| CropBenefits {
                crop_name: rec.crop.name.clone(),
                score_percent: rec.score_percent(),
                benefits: rec.crop.benefits.for_language(language).to_vec(),
            })
            .collect();

        RecommendationReport {
            title: "Smart Crop Recommendation Report".to_string(),
            generated_on: Utc::now().date_naive(),
            language,
            conditions,
            crops,
            top_benefits,
        }
    }

    /// Suggested download name, e.g. crop-recommendations-2024-07-01.csv
    pub fn report_filename(report: &RecommendationReport, extension: &str) -> String {
        format!(
            "crop-recommendations-{}.{}",
            report.generated_on.format("%Y-%m-%d"),
            extension
        )
    }

    /// Export the report as a sectioned CSV document
    pub fn export_report_csv(report: &RecommendationReport) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);

        let write_err = |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        wtr.write_record([report.title.as_str()]).map_err(write_err)?;
        wtr.write_record(["Generated on", &report.generated_on.to_string()])
            .map_err(write_err)?;

        wtr.write_record(["Location & Conditions"]).map_err(write_err)?;
        wtr.write_record(["Parameter", "Value"]).map_err(write_err)?;
        for row in &report.conditions {
            wtr.write_record([&row.parameter, &row.value]).map_err(write_err)?;
        }

        wtr.write_record(["Recommended Crops"]).map_err(write_err)?;
        wtr.write_record([
            "Rank", "Crop Name", "Score", "Category", "Season", "Water Need", "Yield", "NPK",
        ])
        .map_err(write_err)?;
        for row in &report.crops {
            wtr.write_record([
                row.rank.to_string(),
                row.crop_name.clone(),
                format!("{}%", row.score_percent),
                row.category.clone(),
                row.season.clone(),
                row.water_need.clone(),
                format!("{} kg/acre", row.yield_kg_per_acre),
                row.npk.clone(),
            ])
            .map_err(write_err)?;
        }

        wtr.write_record(["Top Crop Benefits"]).map_err(write_err)?;
        for (idx, crop) in report.top_benefits.iter().enumerate() {
            let heading = format!("{}. {} ({}%)", idx + 1, crop.crop_name, crop.score_percent);
            let mut record = vec![heading];
            record.extend(crop.benefits.iter().cloned());
            wtr.write_record(&record).map_err(write_err)?;
        }

        Self::finish(wtr)
    }

    fn finish(wtr: csv::Writer<Vec<u8>>) -> AppResult<String> {
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
