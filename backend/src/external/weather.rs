//! Weather API client for fetching forecasts
//!
//! Integrates with the OpenWeatherMap 5 day / 3 hour forecast API and
//! condenses it into a short daily outlook for farmers.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// One day of the outlook shown to the farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyOutlook {
    /// "Today", "Tomorrow", "Day 3", ...
    pub label: String,
    pub date: NaiveDate,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_kmh: Decimal,
    pub description: String,
    pub icon: String,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
pub struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    #[serde(default)]
    name: String,
    /// Offset from UTC in seconds
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: OWMWind,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch the forecast by GPS coordinates and condense it to `days` days
    pub async fn get_outlook(
        &self,
        latitude: f64,
        longitude: f64,
        days: usize,
    ) -> AppResult<Vec<DailyOutlook>> {
        let url = format!("{}/forecast", self.base_url);
        let (lat, lon) = (latitude.to_string(), longitude.to_string());

        // The key travels in the query string, so errors are logged without the URL
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e.without_url());
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMForecastResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!(
                "Failed to parse forecast response: {}",
                e.without_url()
            ))
        })?;

        tracing::debug!(
            "Received {} forecast points for {}",
            data.list.len(),
            data.city.name
        );

        Ok(summarize_forecast(&data, days))
    }
}

/// Group 3-hourly points by local date and summarise the first `days` days.
/// Temperature, humidity and wind are daily means; the description and icon
/// come from the point closest to local noon.
pub fn summarize_forecast(data: &OWMForecastResponse, days: usize) -> Vec<DailyOutlook> {
    let offset = Duration::seconds(data.city.timezone);
    let mut by_date: BTreeMap<NaiveDate, Vec<(DateTime<Utc>, &OWMForecastItem)>> = BTreeMap::new();

    for item in &data.list {
        let Some(utc) = DateTime::from_timestamp(item.dt, 0) else {
            continue;
        };
        let local = utc + offset;
        by_date.entry(local.date_naive()).or_default().push((local, item));
    }

    by_date
        .into_iter()
        .take(days)
        .enumerate()
        .map(|(idx, (date, points))| {
            let count = points.len() as f64;
            let temp = points.iter().map(|(_, p)| p.main.temp).sum::<f64>() / count;
            let humidity = points.iter().map(|(_, p)| p.main.humidity as f64).sum::<f64>() / count;
            let wind_ms = points.iter().map(|(_, p)| p.wind.speed).sum::<f64>() / count;

            let midday = points
                .iter()
                .min_by_key(|(local, _)| (local.hour() as i32 - 12).abs())
                .and_then(|(_, p)| p.weather.first());

            DailyOutlook {
                label: day_label(idx),
                date,
                temperature_celsius: Decimal::from_f64_retain(temp)
                    .unwrap_or_default()
                    .round_dp(1),
                humidity_percent: humidity.round() as i32,
                wind_speed_kmh: Decimal::from_f64_retain(wind_ms * 3.6)
                    .unwrap_or_default()
                    .round_dp(1),
                description: midday.map(|w| capitalize(&w.description)).unwrap_or_default(),
                icon: midday.map(|w| icon_for(&w.icon)).unwrap_or("🌤️").to_string(),
            }
        })
        .collect()
}

/// Display label for the n-th day of an outlook
pub fn day_label(idx: usize) -> String {
    match idx {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("Day {}", n + 1),
    }
}

/// Map an OpenWeatherMap icon code ("10d") to an emoji
pub fn icon_for(code: &str) -> &'static str {
    match code.get(..2) {
        Some("01") => "☀️",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁️",
        Some("09") | Some("10") => "🌧️",
        Some("11") => "⛈️",
        Some("13") => "❄️",
        Some("50") => "🌫️",
        _ => "🌤️",
    }
}

fn capitalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
