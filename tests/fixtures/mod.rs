//! Test fixtures for estate-planner.
//!
//! Provides:
//! - Real estate locations (from OpenStreetMap)
//! - A fixture segment router that resolves them without network access
//! - A canned forecast provider

#![allow(dead_code)]

pub mod versailles_places;

use std::cell::RefCell;

use chrono::NaiveDate;

use estate_planner::error::ProviderError;
use estate_planner::haversine::StraightLineDirections;
use estate_planner::route::{Place, ResolvedPlace, RouteSegment, TravelProfile};
use estate_planner::traits::{DirectionsProvider, ForecastProvider, SegmentRouter};
use estate_planner::weather::HourlyForecast;

pub use versailles_places::*;

// ============================================================================
// Segment Router
// ============================================================================

/// Resolves fixture places by name and routes them in a straight line.
///
/// Names listed in `unreachable` fail with `NoRouteFound`; every request is
/// recorded in call order.
#[derive(Default)]
pub struct FixtureRouter {
    unreachable: Vec<String>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FixtureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable(mut self, name: &str) -> Self {
        self.unreachable.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    fn resolve(&self, place: &Place) -> Result<ResolvedPlace, ProviderError> {
        match place {
            Place::Coordinates { lat, lon } => Ok(ResolvedPlace::new(place.label(), *lat, *lon)),
            Place::Named(name) => {
                if self.unreachable.iter().any(|n| n == name) {
                    return Err(ProviderError::NoRouteFound);
                }
                find_place(name)
                    .map(|loc| ResolvedPlace::new(loc.name, loc.lat, loc.lon))
                    .ok_or_else(|| ProviderError::NotFound(name.clone()))
            }
        }
    }
}

impl SegmentRouter for FixtureRouter {
    fn route_segment(
        &self,
        origin: &Place,
        destination: &Place,
        profile: TravelProfile,
    ) -> Result<RouteSegment, ProviderError> {
        self.calls
            .borrow_mut()
            .push((origin.label(), destination.label()));

        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        let directions = StraightLineDirections::default().directions(origin.coords(), destination.coords(), profile)?;

        Ok(RouteSegment {
            origin,
            destination,
            distance_meters: directions.distance_meters,
            duration_seconds: directions.duration_seconds,
            path_geometry: directions.geometry,
            turn_steps: directions.steps,
            provider: "fixture".to_string(),
        })
    }
}

// ============================================================================
// Forecast Provider
// ============================================================================

/// Returns the same hourly records for any day, or fails when empty.
pub struct CannedForecast {
    pub hourly: Vec<HourlyForecast>,
    /// Per-date overrides of `hourly`.
    pub dated: Vec<(NaiveDate, Vec<HourlyForecast>)>,
}

impl CannedForecast {
    pub fn unavailable() -> Self {
        Self {
            hourly: Vec::new(),
            dated: Vec::new(),
        }
    }

    /// One record per hour from 08:00 to 20:00 with the given values.
    pub fn all_day(temp_c: f64, precip_mm: f64, precip_probability: f64, wind_kmh: f64) -> Self {
        let hourly = (8..=20)
            .map(|h| HourlyForecast {
                hour: Some(estate_planner::time::TimeOfDay::hm(h, 0)),
                temp_c,
                precip_probability,
                precip_mm,
                wind_kmh,
            })
            .collect();
        Self {
            hourly,
            dated: Vec::new(),
        }
    }

    /// Every hour of the day with the given values.
    pub fn around_the_clock(temp_c: f64, precip_mm: f64, precip_probability: f64, wind_kmh: f64) -> Vec<HourlyForecast> {
        (0..24)
            .map(|h| HourlyForecast {
                hour: Some(estate_planner::time::TimeOfDay::hm(h, 0)),
                temp_c,
                precip_probability,
                precip_mm,
                wind_kmh,
            })
            .collect()
    }

    pub fn on(mut self, date: NaiveDate, hourly: Vec<HourlyForecast>) -> Self {
        self.dated.push((date, hourly));
        self
    }
}

impl ForecastProvider for CannedForecast {
    fn name(&self) -> &str {
        "canned"
    }

    fn hourly(&self, _lat: f64, _lon: f64, date: NaiveDate) -> Result<Vec<HourlyForecast>, ProviderError> {
        if let Some((_, hourly)) = self.dated.iter().find(|(day, _)| *day == date) {
            return Ok(hourly.clone());
        }
        if self.hourly.is_empty() {
            return Err(ProviderError::ProviderUnavailable("canned forecast is empty".to_string()));
        }
        Ok(self.hourly.clone())
    }
}

// ============================================================================
// Dates
// ============================================================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2025-06-16, a Monday.
pub fn monday() -> NaiveDate {
    date(2025, 6, 16)
}

/// 2025-06-17, a Tuesday.
pub fn tuesday() -> NaiveDate {
    date(2025, 6, 17)
}
