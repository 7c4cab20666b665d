//! Mapbox Directions adapter.

use crate::error::ProviderError;
use crate::osrm::{coordinate_pair, read_route_response};
use crate::route::{Directions, TravelProfile};
use crate::traits::DirectionsProvider;

pub const MAPBOX_DIRECTIONS_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

#[derive(Debug, Clone)]
pub struct MapboxConfig {
    pub base_url: String,
    pub access_token: String,
    /// Language of the turn instructions.
    pub language: String,
    pub timeout_secs: u64,
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: MAPBOX_DIRECTIONS_URL.to_string(),
            access_token: access_token.into(),
            language: "fr".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapboxClient {
    config: MapboxConfig,
    client: reqwest::blocking::Client,
}

impl MapboxClient {
    pub fn new(config: MapboxConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DirectionsProvider for MapboxClient {
    fn name(&self) -> &str {
        "mapbox"
    }

    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError> {
        if self.config.access_token.is_empty() {
            return Err(ProviderError::MissingCredentials("MAPBOX_TOKEN"));
        }

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
                ("alternatives", "false"),
                ("overview", "simplified"),
                ("steps", "true"),
                ("geometries", "geojson"),
                ("language", self.config.language.as_str()),
                ("access_token", self.config.access_token.as_str()),
            ])
            .send()?;

        read_route_response(response)
    }
}
