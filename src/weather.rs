//! Weather classification: hourly forecast to a decision label and flags.
//!
//! Rules are evaluated in a fixed priority order, first match wins:
//! heavy rain, mixed (rain risk plus heat), rain risk, heat, wind, pleasant.
//! The flags are a pure function of the label.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ProviderError;
use crate::facts::Language;
use crate::messages;
use crate::time::{MINUTES_PER_DAY, TimeOfDay};

/// One forecast hour. Missing provider values are read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Hour the record starts at, when the provider reports it.
    pub hour: Option<TimeOfDay>,
    pub temp_c: f64,
    /// Percent, 0..=100.
    pub precip_probability: f64,
    pub precip_mm: f64,
    pub wind_kmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherLabel {
    Pleasant,
    RainRisk,
    HeavyRain,
    Heat,
    Windy,
    Mixed,
    /// Forecast unavailable; disables every weather-driven adjustment.
    Unknown,
}

impl WeatherLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherLabel::Pleasant => "pleasant",
            WeatherLabel::RainRisk => "rain_risk",
            WeatherLabel::HeavyRain => "heavy_rain",
            WeatherLabel::Heat => "heat",
            WeatherLabel::Windy => "windy",
            WeatherLabel::Mixed => "mixed",
            WeatherLabel::Unknown => "unknown",
        }
    }

    pub fn is_rainy(self) -> bool {
        matches!(self, WeatherLabel::RainRisk | WeatherLabel::HeavyRain | WeatherLabel::Mixed)
    }
}

/// Thresholds for the classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherThresholds {
    pub heavy_rain_mm: f64,
    pub rain_probability_pct: f64,
    pub rain_mm: f64,
    pub heat_celsius: f64,
    pub windy_kmh: f64,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            heavy_rain_mm: 2.0,
            rain_probability_pct: 30.0,
            rain_mm: 0.3,
            heat_celsius: 30.0,
            windy_kmh: 35.0,
        }
    }
}

/// Compact weather decision layer fed to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSignal {
    pub label: WeatherLabel,
    pub prefer_indoor: bool,
    pub heat_precaution: bool,
    pub remind_water: bool,
    pub advice_text: String,
}

impl WeatherSignal {
    /// Signal for a known label; flags come from a fixed lookup.
    pub fn from_label(label: WeatherLabel, language: Language) -> Self {
        let prefer_indoor = label.is_rainy();
        let heat_precaution = matches!(label, WeatherLabel::Heat | WeatherLabel::Mixed);
        Self {
            label,
            prefer_indoor,
            heat_precaution,
            remind_water: heat_precaution,
            advice_text: messages::weather_advice(label, language).to_string(),
        }
    }

    /// Weather could not be fetched: plan without weather constraints.
    pub fn unknown(language: Language) -> Self {
        Self::from_label(WeatherLabel::Unknown, language)
    }

    pub fn is_unknown(&self) -> bool {
        self.label == WeatherLabel::Unknown
    }
}

/// Classifies with the default thresholds and French advice text.
pub fn classify(hourly: &[HourlyForecast]) -> WeatherSignal {
    classify_with(hourly, &WeatherThresholds::default(), Language::default())
}

pub fn classify_with(
    hourly: &[HourlyForecast],
    thresholds: &WeatherThresholds,
    language: Language,
) -> WeatherSignal {
    let heavy = hourly.iter().any(|h| h.precip_mm >= thresholds.heavy_rain_mm);
    let rain = hourly.iter().any(|h| {
        h.precip_probability >= thresholds.rain_probability_pct || h.precip_mm >= thresholds.rain_mm
    });
    let heat = hourly.iter().any(|h| h.temp_c >= thresholds.heat_celsius);
    let windy = hourly.iter().any(|h| h.wind_kmh >= thresholds.windy_kmh);

    let label = if heavy {
        WeatherLabel::HeavyRain
    } else if rain && heat {
        WeatherLabel::Mixed
    } else if rain {
        WeatherLabel::RainRisk
    } else if heat {
        WeatherLabel::Heat
    } else if windy {
        WeatherLabel::Windy
    } else {
        WeatherLabel::Pleasant
    };

    WeatherSignal::from_label(label, language)
}

/// Classifies a fetched forecast, degrading to `Unknown` when the fetch failed.
pub fn classify_or_unknown(
    forecast: Result<Vec<HourlyForecast>, ProviderError>,
    thresholds: &WeatherThresholds,
    language: Language,
) -> WeatherSignal {
    match forecast {
        Ok(hourly) => classify_with(&hourly, thresholds, language),
        Err(err) => {
            warn!(error = %err, "forecast unavailable, planning without weather constraints");
            WeatherSignal::unknown(language)
        }
    }
}

/// Keeps the hours that start inside `[start, start + duration]`.
///
/// Records without an hour are kept; the provider already scoped them.
/// Only the visit day is covered: a window running past midnight needs the
/// next day's records through [`hours_after_midnight`].
pub fn hours_in_window(
    hourly: &[HourlyForecast],
    start: TimeOfDay,
    duration_minutes: u32,
) -> Vec<HourlyForecast> {
    let from = start.minutes();
    let to = from + duration_minutes;
    hourly
        .iter()
        .filter(|h| match h.hour {
            Some(hour) => (from..=to).contains(&hour.minutes()),
            None => true,
        })
        .copied()
        .collect()
}

/// Next-day hours still covered by a visit that runs past midnight.
///
/// Empty when the window ends before midnight. Records without an hour are
/// dropped since they cannot be placed on the next day.
pub fn hours_after_midnight(
    next_day: &[HourlyForecast],
    start: TimeOfDay,
    duration_minutes: u32,
) -> Vec<HourlyForecast> {
    let end = start.minutes() + duration_minutes;
    if end < MINUTES_PER_DAY {
        return Vec::new();
    }
    let to = end - MINUTES_PER_DAY;
    next_day
        .iter()
        .filter(|h| h.hour.is_some_and(|hour| hour.minutes() <= to))
        .copied()
        .collect()
}
