//! Market price handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::services::market::MarketPrices;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub search: Option<String>,
}

/// Indicative prices for catalog crops
pub async fn get_market_prices(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Json<MarketPrices> {
    let mut rng = rand::thread_rng();
    Json(state.market.prices(query.search.as_deref(), &mut rng))
}
