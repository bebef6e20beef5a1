//! Indicative market prices for catalog crops

use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{Catalog, Season};

/// Lower bound of the indicative price band, ₹/kg
const MIN_PRICE: f64 = 20.0;
/// Upper bound (exclusive) of the indicative price band, ₹/kg
const MAX_PRICE: f64 = 80.0;

pub const PRICE_NOTE: &str =
    "Prices are indicative and based on recent data. Actual market prices may vary.";

/// Market price service
#[derive(Clone)]
pub struct MarketService {
    catalog: Catalog,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketPrice {
    pub crop_id: u32,
    pub crop_name: String,
    pub season: Season,
    pub icon: String,
    /// Price per kg in rupees
    pub price_per_kg: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MarketPrices {
    pub indicative: bool,
    pub note: &'static str,
    pub prices: Vec<MarketPrice>,
}

impl MarketService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// One indicative price per crop whose name matches `search`
    pub fn prices<R: Rng + ?Sized>(&self, search: Option<&str>, rng: &mut R) -> MarketPrices {
        let crops = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(query) => self.catalog.search(query).collect::<Vec<_>>(),
            None => self.catalog.iter().collect(),
        };

        let prices = crops
            .into_iter()
            .map(|crop| MarketPrice {
                crop_id: crop.id,
                crop_name: crop.name.clone(),
                season: crop.season,
                icon: crop.icon.clone(),
                price_per_kg: indicative_price(rng),
            })
            .collect();

        MarketPrices {
            indicative: true,
            note: PRICE_NOTE,
            prices,
        }
    }
}

/// Uniform price in [20, 80) rounded to paise
fn indicative_price<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let raw = rng.gen_range(MIN_PRICE..MAX_PRICE);
    Decimal::from_f64_retain(raw)
        .unwrap_or(Decimal::from(MIN_PRICE as i64))
        .round_dp(2)
}
