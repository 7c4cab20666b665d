//! Nominatim-compatible geocoding (OpenStreetMap Nominatim and LocationIQ).
//!
//! Both services answer `search` with the same JSON array; LocationIQ only
//! adds a `key` parameter.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::route::ResolvedPlace;
use crate::traits::Geocoder;

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const LOCATIONIQ_SEARCH_URL: &str = "https://us1.locationiq.com/v1/search";

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub name: String,
    pub search_url: String,
    pub user_agent: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            name: "nominatim".to_string(),
            search_url: NOMINATIM_SEARCH_URL.to_string(),
            user_agent: concat!("estate-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            api_key: None,
            timeout_secs: 20,
        }
    }
}

impl NominatimConfig {
    pub fn locationiq(api_key: impl Into<String>) -> Self {
        Self {
            name: "locationiq".to_string(),
            search_url: LOCATIONIQ_SEARCH_URL.to_string(),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn geocode(&self, query: &str) -> Result<ResolvedPlace, ProviderError> {
        let mut params = vec![("q", query), ("format", "json"), ("limit", "1")];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("key", key));
        }

        let body = self
            .client
            .get(&self.config.search_url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        parse_search_response(query, &body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// First hit of a `search` response.
pub fn parse_search_response(query: &str, body: &str) -> Result<ResolvedPlace, ProviderError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NotFound(query.to_string()))?;

    let coordinate = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| ProviderError::InvalidResponse(format!("bad coordinate '{value}'")))
    };

    Ok(ResolvedPlace {
        lat: coordinate(&hit.lat)?,
        lon: coordinate(&hit.lon)?,
        name: hit.display_name.unwrap_or_else(|| query.to_string()),
    })
}
