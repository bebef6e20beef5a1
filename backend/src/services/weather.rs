//! Weather outlook service
//! Serves the 4-day outlook from OpenWeatherMap, or a generated one when the
//! API is unconfigured or unreachable

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::GpsCoordinates;

use crate::error::{AppError, AppResult};
use crate::external::weather::{day_label, DailyOutlook};
use crate::external::WeatherClient;
use crate::services::DataSource;

/// Number of days in the outlook
pub const OUTLOOK_DAYS: usize = 4;

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    client: Option<WeatherClient>,
}

#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub location: GpsCoordinates,
    pub source: DataSource,
    pub days: Vec<DailyOutlook>,
}

/// Base values and random spans for one fallback day
struct FallbackDay {
    temperature: (i64, i64),
    humidity: (i32, i32),
    wind: (i64, i64),
    description: &'static str,
    icon: &'static str,
}

const FALLBACK_DAYS: [FallbackDay; OUTLOOK_DAYS] = [
    FallbackDay {
        temperature: (28, 5),
        humidity: (65, 20),
        wind: (10, 10),
        description: "Partly Cloudy",
        icon: "⛅",
    },
    FallbackDay {
        temperature: (29, 5),
        humidity: (70, 15),
        wind: (12, 8),
        description: "Sunny",
        icon: "☀️",
    },
    FallbackDay {
        temperature: (27, 5),
        humidity: (75, 10),
        wind: (15, 10),
        description: "Light Rain",
        icon: "🌧️",
    },
    FallbackDay {
        temperature: (26, 5),
        humidity: (80, 10),
        wind: (18, 7),
        description: "Cloudy",
        icon: "☁️",
    },
];

impl WeatherService {
    pub fn new(client: Option<WeatherClient>) -> Self {
        Self { client }
    }

    /// Outlook for the given coordinates
    pub async fn outlook(&self, latitude: f64, longitude: f64) -> AppResult<WeatherReport> {
        validate_coordinates(latitude, longitude)?;
        let location = GpsCoordinates::new(latitude, longitude);

        if let Some(client) = &self.client {
            match client.get_outlook(latitude, longitude, OUTLOOK_DAYS).await {
                Ok(days) if !days.is_empty() => {
                    return Ok(WeatherReport {
                        location,
                        source: DataSource::Live,
                        days,
                    })
                }
                Ok(_) => tracing::warn!("Weather API returned no forecast points, using fallback"),
                Err(e) => tracing::warn!("Weather API failed, using fallback: {}", e),
            }
        } else {
            tracing::debug!("No weather API key configured, using fallback outlook");
        }

        Ok(WeatherReport {
            location,
            source: DataSource::Fallback,
            days: fallback_outlook(&mut rand::thread_rng()),
        })
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> AppResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation {
            field: "latitude".to_string(),
            message: "Latitude must be between -90 and 90".to_string(),
            message_hi: "अक्षांश -90 और 90 के बीच होना चाहिए".to_string(),
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation {
            field: "longitude".to_string(),
            message: "Longitude must be between -180 and 180".to_string(),
            message_hi: "देशांतर -180 और 180 के बीच होना चाहिए".to_string(),
        });
    }
    Ok(())
}

/// Locally generated outlook used when the API cannot be reached
pub fn fallback_outlook<R: Rng + ?Sized>(rng: &mut R) -> Vec<DailyOutlook> {
    let today = Utc::now().date_naive();

    FALLBACK_DAYS
        .iter()
        .enumerate()
        .map(|(idx, day)| DailyOutlook {
            label: day_label(idx),
            date: today + Duration::days(idx as i64),
            temperature_celsius: Decimal::from(day.temperature.0 + rng.gen_range(0..day.temperature.1)),
            humidity_percent: day.humidity.0 + rng.gen_range(0..day.humidity.1),
            wind_speed_kmh: Decimal::from(day.wind.0 + rng.gen_range(0..day.wind.1)),
            description: day.description.to_string(),
            icon: day.icon.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_fallback_outlook_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let days = fallback_outlook(&mut rng);
            assert_eq!(days.len(), OUTLOOK_DAYS);

            assert_eq!(days[0].label, "Today");
            assert_eq!(days[0].description, "Partly Cloudy");
            assert!(days[0].temperature_celsius >= Decimal::from(28));
            assert!(days[0].temperature_celsius < Decimal::from(33));
            assert!((65..85).contains(&days[0].humidity_percent));

            assert_eq!(days[2].description, "Light Rain");
            assert!(days[2].wind_speed_kmh >= Decimal::from(15));
            assert!(days[2].wind_speed_kmh < Decimal::from(25));

            assert_eq!(days[3].label, "Day 4");
            assert!((80..90).contains(&days[3].humidity_percent));
        }
    }

    #[test]
    fn test_fallback_dates_are_consecutive() {
        let days = fallback_outlook(&mut StdRng::seed_from_u64(5));
        for pair in days.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[tokio::test]
    async fn test_unconfigured_service_uses_fallback() {
        let report = WeatherService::new(None).outlook(17.385, 78.4867).await.unwrap();
        assert_eq!(report.source, DataSource::Fallback);
        assert_eq!(report.days.len(), OUTLOOK_DAYS);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_coordinates() {
        let service = WeatherService::new(None);
        assert!(service.outlook(95.0, 78.0).await.is_err());
        assert!(service.outlook(17.0, -181.0).await.is_err());
        assert!(service.outlook(f64::NAN, 78.0).await.is_err());
    }
}
