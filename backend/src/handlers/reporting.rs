//! Reporting handlers for recommendation export

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{FarmCondition, Language};

use crate::error::{AppError, AppResult};
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
    pub language: Option<String>,
}

/// Build the recommendation report for submitted conditions
pub async fn export_recommendation_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Json(condition): Json<FarmCondition>,
) -> AppResult<Response> {
    let language = match query.language.as_deref() {
        Some(code) => Language::parse(code).ok_or_else(|| {
            AppError::ValidationError(format!("Unsupported language: {}", code))
        })?,
        None => Language::default(),
    };

    let response = state.recommendations.recommend(condition)?;
    let report =
        state
            .reporting
            .build_report(&response.condition, &response.recommendations, language);

    match query.format.as_deref() {
        Some("csv") => {
            let csv = ReportingService::export_report_csv(&report)?;
            let disposition = format!(
                "attachment; filename=\"{}\"",
                ReportingService::report_filename(&report, "csv")
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => Ok(Json(report).into_response()),
        Some(other) => Err(AppError::ValidationError(format!(
            "Unsupported report format: {}",
            other
        ))),
    }
}
