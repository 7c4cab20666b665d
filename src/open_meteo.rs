//! Open-Meteo hourly forecast adapter.
//!
//! Asks for a single day. Open-Meteo rejects date ranges outside its window
//! with a 400; the request is then retried with the full 16-day horizon and
//! the answer filtered down to the requested day.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::time::TimeOfDay;
use crate::traits::ForecastProvider;
use crate::weather::HourlyForecast;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,precipitation,windspeed_10m";
const FALLBACK_FORECAST_DAYS: &str = "16";

#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    pub base_url: String,
    /// IANA zone the hourly timestamps are reported in.
    pub timezone: String,
    pub timeout_secs: u64,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_URL.to_string(),
            timezone: "Europe/Paris".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    config: OpenMeteoConfig,
    client: reqwest::blocking::Client,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn fetch(&self, lat: f64, lon: f64, range: &[(&str, String)]) -> Result<reqwest::blocking::Response, reqwest::Error> {
        self.client
            .get(&self.config.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", self.config.timezone.clone()),
            ])
            .query(range)
            .send()
    }
}

impl ForecastProvider for OpenMeteoClient {
    fn name(&self) -> &str {
        "open-meteo"
    }

    fn hourly(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<Vec<HourlyForecast>, ProviderError> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut response = self.fetch(lat, lon, &[("start_date", day.clone()), ("end_date", day)])?;

        if response.status() == StatusCode::BAD_REQUEST {
            debug!(%date, "date outside forecast range, retrying with full horizon");
            response = self.fetch(lat, lon, &[("forecast_days", FALLBACK_FORECAST_DAYS.to_string())])?;
        }

        let body = response.error_for_status()?.text()?;
        let hourly = parse_hourly_response(&body, date)?;
        if hourly.is_empty() {
            return Err(ProviderError::ProviderUnavailable(format!("open-meteo has no forecast for {date}")));
        }
        Ok(hourly)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m: Vec<Option<f64>>,
}

/// Hourly records of `date` from a forecast response. Missing values read as zero.
pub fn parse_hourly_response(body: &str, date: NaiveDate) -> Result<Vec<HourlyForecast>, ProviderError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let block = response.hourly.unwrap_or_default();
    fn value(series: &[Option<f64>], i: usize) -> f64 {
        series.get(i).copied().flatten().unwrap_or(0.0)
    }

    let mut hourly = Vec::with_capacity(24);
    for (i, stamp) in block.time.iter().enumerate() {
        let at = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M")
            .map_err(|_| ProviderError::InvalidResponse(format!("bad hourly timestamp '{stamp}'")))?;
        if at.date() != date {
            continue;
        }
        hourly.push(HourlyForecast {
            hour: Some(TimeOfDay::from(at.time())),
            temp_c: value(&block.temperature_2m, i),
            precip_probability: value(&block.precipitation_probability, i),
            precip_mm: value(&block.precipitation, i),
            wind_kmh: value(&block.windspeed_10m, i),
        });
    }
    Ok(hourly)
}
