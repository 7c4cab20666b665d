//! OpenRouteService directions adapter (GeoJSON endpoint).

use serde::Deserialize;
use serde_json::json;

use crate::error::ProviderError;
use crate::osrm::MAX_TURN_STEPS;
use crate::polyline::Polyline;
use crate::route::{Directions, TravelProfile, TurnStep};
use crate::traits::DirectionsProvider;

pub const ORS_DIRECTIONS_URL: &str = "https://api.openrouteservice.org/v2/directions";

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: ORS_DIRECTIONS_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

pub fn ors_profile(profile: TravelProfile) -> &'static str {
    match profile {
        TravelProfile::Walking => "foot-walking",
        TravelProfile::Driving => "driving-car",
        TravelProfile::Cycling => "cycling-regular",
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DirectionsProvider for OrsClient {
    fn name(&self) -> &str {
        "openrouteservice"
    }

    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials("ORS_API_KEY"));
        }

        let url = format!(
            "{}/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            ors_profile(profile)
        );
        let payload = json!({ "coordinates": [[from.1, from.0], [to.1, to.0]] });

        let body = self
            .client
            .post(url)
            .header("Authorization", self.config.api_key.as_str())
            .json(&payload)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        parse_geojson_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<serde_json::Value>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    summary: Summary,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Default, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    distance: f64,
    instruction: Option<String>,
}

pub fn parse_geojson_response(body: &str) -> Result<Directions, ProviderError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or(ProviderError::NoRouteFound)?;

    let geometry = match &feature.geometry {
        Some(value) => Polyline::from_geojson(value)?,
        None => Polyline::default(),
    };

    // ORS gives prose instructions only; they go in `road`.
    let steps = feature
        .properties
        .segments
        .into_iter()
        .flat_map(|segment| segment.steps)
        .take(MAX_TURN_STEPS)
        .map(|step| TurnStep {
            kind: "instruction".to_string(),
            modifier: None,
            road: step.instruction,
            distance_meters: step.distance,
        })
        .collect();

    Ok(Directions {
        distance_meters: feature.properties.summary.distance,
        duration_seconds: feature.properties.summary.duration,
        geometry,
        steps,
    })
}
