//! Multi-stop route composition.
//!
//! A composite route is built from independent point-to-point segments, one
//! per consecutive pair of places, requested strictly in input order. The
//! composer is all-or-nothing: one failing pair fails the whole route.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ParseError, ProviderError, RouteError};
use crate::polyline::{MultiPolyline, Polyline};
use crate::traits::SegmentRouter;

/// Name given to the synthetic waypoint of a live position fix.
pub const CURRENT_LOCATION: &str = "Current location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    #[default]
    Walking,
    Driving,
    Cycling,
}

impl TravelProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelProfile::Walking => "walking",
            TravelProfile::Driving => "driving",
            TravelProfile::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelProfile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "walk" | "foot" | "pied" | "à pied" => Ok(TravelProfile::Walking),
            "driving" | "drive" | "car" | "voiture" => Ok(TravelProfile::Driving),
            "cycling" | "bike" | "bicycle" | "vélo" | "velo" => Ok(TravelProfile::Cycling),
            _ => Err(ParseError::UnknownProfile(s.to_string())),
        }
    }
}

/// A place to route through: a name to geocode or a known position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Place {
    Named(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Place {
    pub fn named(name: impl Into<String>) -> Self {
        Place::Named(name.into())
    }

    /// Label used in errors and logs.
    pub fn label(&self) -> String {
        match self {
            Place::Named(name) => name.clone(),
            Place::Coordinates { lat, lon } => format!("{lat:.6},{lon:.6}"),
        }
    }
}

impl From<&str> for Place {
    fn from(name: &str) -> Self {
        Place::Named(name.to_string())
    }
}

impl From<ResolvedPlace> for Place {
    fn from(place: ResolvedPlace) -> Self {
        Place::Coordinates {
            lat: place.lat,
            lon: place.lon,
        }
    }
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl ResolvedPlace {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// One maneuver in a segment's turn-by-turn list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnStep {
    /// Maneuver kind as the provider names it ("turn", "depart", "arrive", ...).
    pub kind: String,
    pub modifier: Option<String>,
    pub road: Option<String>,
    pub distance_meters: f64,
}

/// What a directions provider returns for one pair of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Polyline,
    pub steps: Vec<TurnStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub origin: ResolvedPlace,
    pub destination: ResolvedPlace,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub path_geometry: Polyline,
    pub turn_steps: Vec<TurnStep>,
    /// Which backend answered.
    pub provider: String,
}

/// Segments, waypoints and one path per segment.
///
/// `waypoints.len() == segments.len() + 1` for any non-empty route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeRoute {
    pub segments: Vec<RouteSegment>,
    pub waypoints: Vec<ResolvedPlace>,
    pub geometry: MultiPolyline,
}

impl CompositeRoute {
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_meters).sum()
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_seconds).sum()
    }

    /// Provider names in segment order, for reporting which backend answered.
    pub fn providers(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.provider.as_str()).collect()
    }
}

/// Stitches per-pair segments from a `SegmentRouter` into composite routes.
#[derive(Debug, Clone)]
pub struct RouteComposer<R> {
    router: R,
    default_places: Vec<Place>,
}

impl<R: SegmentRouter> RouteComposer<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            default_places: Vec::new(),
        }
    }

    /// Places composed when a live recompute finds no existing route.
    pub fn with_default_places(mut self, places: Vec<Place>) -> Self {
        self.default_places = places;
        self
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn compose(&self, places: &[Place], profile: TravelProfile) -> Result<CompositeRoute, RouteError> {
        if places.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(places.len()));
        }

        let mut route = CompositeRoute::default();
        for pair in places.windows(2) {
            let segment = self.segment(&pair[0], &pair[1], profile)?;
            if route.waypoints.is_empty() {
                route.waypoints.push(segment.origin.clone());
            }
            route.waypoints.push(segment.destination.clone());
            route.geometry.push(segment.path_geometry.clone());
            route.segments.push(segment);
        }

        info!(
            segments = route.segments.len(),
            distance_m = route.total_distance_meters().round(),
            %profile,
            "composite route built"
        );
        Ok(route)
    }

    /// Prepends a segment from a live position to the first waypoint of `existing`.
    ///
    /// An empty `existing` route falls back to the default places, routed from
    /// the live position through all of them.
    pub fn recompute_from_location(
        &self,
        lat: f64,
        lon: f64,
        existing: &CompositeRoute,
        profile: TravelProfile,
    ) -> Result<CompositeRoute, RouteError> {
        let here = Place::Coordinates { lat, lon };

        let Some(target) = existing.waypoints.first() else {
            if self.default_places.is_empty() {
                return Err(RouteError::NoTargetWaypoint);
            }
            debug!(places = self.default_places.len(), "no route to recompute, using default places");
            let mut places = Vec::with_capacity(self.default_places.len() + 1);
            places.push(here);
            places.extend(self.default_places.iter().cloned());
            let mut route = self.compose(&places, profile)?;
            if let Some(first) = route.waypoints.first_mut() {
                first.name = CURRENT_LOCATION.to_string();
            }
            return Ok(route);
        };

        let mut lead = self.segment(&here, &Place::from(target.clone()), profile)?;
        lead.origin.name = CURRENT_LOCATION.to_string();
        lead.destination = target.clone();

        let mut route = existing.clone();
        route.waypoints.insert(0, lead.origin.clone());
        route.geometry.prepend(lead.path_geometry.clone());
        route.segments.insert(0, lead);

        info!(segments = route.segments.len(), "route recomputed from live location");
        Ok(route)
    }

    fn segment(&self, origin: &Place, destination: &Place, profile: TravelProfile) -> Result<RouteSegment, RouteError> {
        debug!(origin = %origin.label(), destination = %destination.label(), "routing segment");
        self.router
            .route_segment(origin, destination, profile)
            .map_err(|source: ProviderError| RouteError::SegmentRoutingFailed {
                origin: origin.label(),
                destination: destination.label(),
                source,
            })
    }
}
