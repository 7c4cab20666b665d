//! Collaborator seams for the planner.
//!
//! Every external data source sits behind one of these traits so the
//! scheduler and composer can be exercised against in-memory fakes. Concrete
//! HTTP adapters live in their own modules.

use chrono::NaiveDate;

use crate::error::ProviderError;
use crate::route::{Directions, Place, ResolvedPlace, RouteSegment, TravelProfile};
use crate::weather::HourlyForecast;

/// Resolves a free-form place name to coordinates.
pub trait Geocoder {
    /// Short backend name used in logs and segment attribution.
    fn name(&self) -> &str;

    /// Fails with `ProviderError::NotFound` when nothing matches.
    fn geocode(&self, query: &str) -> Result<ResolvedPlace, ProviderError>;
}

/// Computes a path between two `(lat, lon)` positions.
pub trait DirectionsProvider {
    fn name(&self) -> &str;

    /// Fails with `ProviderError::NoRouteFound` when the backend has no path.
    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError>;
}

/// Hourly forecast for a position on a given day.
pub trait ForecastProvider {
    fn name(&self) -> &str;

    fn hourly(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<Vec<HourlyForecast>, ProviderError>;
}

/// Single-segment routing: geocode both endpoints, then request a path.
pub trait SegmentRouter {
    fn route_segment(
        &self,
        origin: &Place,
        destination: &Place,
        profile: TravelProfile,
    ) -> Result<RouteSegment, ProviderError>;
}

impl<T: SegmentRouter + ?Sized> SegmentRouter for &T {
    fn route_segment(
        &self,
        origin: &Place,
        destination: &Place,
        profile: TravelProfile,
    ) -> Result<RouteSegment, ProviderError> {
        (**self).route_segment(origin, destination, profile)
    }
}

impl<T: SegmentRouter + ?Sized> SegmentRouter for Box<T> {
    fn route_segment(
        &self,
        origin: &Place,
        destination: &Place,
        profile: TravelProfile,
    ) -> Result<RouteSegment, ProviderError> {
        (**self).route_segment(origin, destination, profile)
    }
}
