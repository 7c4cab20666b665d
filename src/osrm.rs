//! OSRM HTTP adapter for point-to-point directions.
//!
//! Mapbox Directions answers in the same shape, so the response parsing here
//! is shared with the `mapbox` adapter.

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::polyline::Polyline;
use crate::route::{Directions, TravelProfile, TurnStep};
use crate::traits::DirectionsProvider;

/// Turn steps kept per segment.
pub const MAX_TURN_STEPS: usize = 200;

pub const OSRM_ROUTE_URL: &str = "https://router.project-osrm.org/route/v1";

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base of the `route` service, without profile.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: OSRM_ROUTE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

/// `lon,lat;lon,lat` path component.
pub(crate) fn coordinate_pair(from: (f64, f64), to: (f64, f64)) -> String {
    format!("{:.6},{:.6};{:.6},{:.6}", from.1, from.0, to.1, to.0)
}

impl DirectionsProvider for OsrmClient {
    fn name(&self) -> &str {
        "osrm"
    }

    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError> {
        let url = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            profile.as_str(),
            coordinate_pair(from, to)
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "simplified"),
                ("steps", "true"),
                ("alternatives", "false"),
                ("annotations", "false"),
                ("geometries", "geojson"),
            ])
            .send()?;

        read_route_response(response)
    }
}

/// Reads a `route` reply, keeping the service's own rejection codes.
///
/// OSRM and Mapbox answer `NoRoute`, `NoSegment` or `InvalidQuery` with a 4xx
/// status; those become `NoRouteFound`. Any other error status stays `Http`.
pub(crate) fn read_route_response(
    response: reqwest::blocking::Response,
) -> Result<Directions, ProviderError> {
    let status_error = response.error_for_status_ref().err();
    let body = response.text()?;
    match status_error {
        None => parse_route_response(&body),
        Some(err) if err.status().is_some_and(|status| status.is_client_error()) => {
            match rejection_code(&body) {
                Some(code) => {
                    debug!(code = %code, "Directions request rejected");
                    Err(ProviderError::NoRouteFound)
                }
                None => Err(err.into()),
            }
        }
        Some(err) => Err(err.into()),
    }
}

/// The `code` of an error body, when it parses and is not `Ok`.
pub fn rejection_code(body: &str) -> Option<String> {
    let response: RouteResponse = serde_json::from_str(body).ok()?;
    response.code.filter(|code| code != "Ok")
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    geometry: Option<serde_json::Value>,
    #[serde(default)]
    legs: Vec<LegBody>,
}

#[derive(Debug, Deserialize)]
struct LegBody {
    #[serde(default)]
    steps: Vec<StepBody>,
}

#[derive(Debug, Deserialize)]
struct StepBody {
    #[serde(default)]
    distance: f64,
    name: Option<String>,
    #[serde(default)]
    maneuver: Maneuver,
}

#[derive(Debug, Default, Deserialize)]
struct Maneuver {
    #[serde(rename = "type")]
    kind: Option<String>,
    modifier: Option<String>,
}

/// Parses an OSRM/Mapbox `route` response: first route, GeoJSON geometry, capped steps.
pub fn parse_route_response(body: &str) -> Result<Directions, ProviderError> {
    let response: RouteResponse = serde_json::from_str(body)?;
    if response.code.as_deref().is_some_and(|code| code != "Ok") {
        return Err(ProviderError::NoRouteFound);
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(ProviderError::NoRouteFound)?;

    let geometry = match &route.geometry {
        Some(value) => Polyline::from_geojson(value)?,
        None => Polyline::default(),
    };

    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .take(MAX_TURN_STEPS)
        .map(|step| TurnStep {
            kind: step.maneuver.kind.unwrap_or_else(|| "step".to_string()),
            modifier: step.maneuver.modifier,
            road: step.name.filter(|name| !name.is_empty()),
            distance_meters: step.distance,
        })
        .collect();

    Ok(Directions {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry,
        steps,
    })
}
