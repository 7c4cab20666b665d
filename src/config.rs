//! Provider endpoints, credentials and site location.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::haversine::StraightLineDirections;
use crate::mapbox::{MapboxClient, MapboxConfig};
use crate::nominatim::{NOMINATIM_SEARCH_URL, NominatimClient, NominatimConfig};
use crate::open_meteo::{OPEN_METEO_URL, OpenMeteoClient, OpenMeteoConfig};
use crate::openrouteservice::{OrsClient, OrsConfig};
use crate::osrm::{OSRM_ROUTE_URL, OsrmClient, OsrmConfig};
use crate::providers::{BoxedDirections, BoxedGeocoder, DirectionsChain, GeocoderChain, ProviderChainRouter};

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub nominatim_url: String,
    pub user_agent: String,
    pub locationiq_key: Option<String>,
    pub osrm_base_url: String,
    pub mapbox_token: Option<String>,
    pub ors_api_key: Option<String>,
    pub open_meteo_url: String,
    pub geocode_timeout_secs: u64,
    pub directions_timeout_secs: u64,
    pub forecast_timeout_secs: u64,
    /// Append the straight-line estimate as the last directions provider.
    pub straight_line_fallback: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            nominatim_url: NOMINATIM_SEARCH_URL.to_string(),
            user_agent: NominatimConfig::default().user_agent,
            locationiq_key: None,
            osrm_base_url: OSRM_ROUTE_URL.to_string(),
            mapbox_token: None,
            ors_api_key: None,
            open_meteo_url: OPEN_METEO_URL.to_string(),
            geocode_timeout_secs: 20,
            directions_timeout_secs: 30,
            forecast_timeout_secs: 30,
            straight_line_fallback: false,
        }
    }
}

impl ProviderConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            nominatim_url: get("OSM_NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
            user_agent: get("OSM_USER_AGENT").unwrap_or(defaults.user_agent),
            locationiq_key: get("LOCATIONIQ_KEY"),
            osrm_base_url: get("OSRM_BASE_URL").unwrap_or(defaults.osrm_base_url),
            mapbox_token: get("MAPBOX_TOKEN"),
            ors_api_key: get("ORS_API_KEY"),
            open_meteo_url: get("OPEN_METEO_BASE").unwrap_or(defaults.open_meteo_url),
            ..defaults
        }
    }

    /// Geocoders in fallback order: LocationIQ when keyed, then Nominatim.
    pub fn geocoder_chain(&self) -> Result<GeocoderChain, ProviderError> {
        let mut geocoders: Vec<BoxedGeocoder> = Vec::new();
        if let Some(key) = &self.locationiq_key {
            let config = NominatimConfig {
                user_agent: self.user_agent.clone(),
                timeout_secs: self.geocode_timeout_secs,
                ..NominatimConfig::locationiq(key.clone())
            };
            geocoders.push(Box::new(NominatimClient::new(config)?));
        }
        geocoders.push(Box::new(NominatimClient::new(NominatimConfig {
            search_url: self.nominatim_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.geocode_timeout_secs,
            ..NominatimConfig::default()
        })?));
        Ok(GeocoderChain::new(geocoders))
    }

    /// Directions in fallback order: Mapbox, OpenRouteService (each when keyed), OSRM, straight line.
    pub fn directions_chain(&self) -> Result<DirectionsChain, ProviderError> {
        let timeout_secs = self.directions_timeout_secs;
        let mut providers: Vec<BoxedDirections> = Vec::new();
        if let Some(token) = &self.mapbox_token {
            let config = MapboxConfig {
                timeout_secs,
                ..MapboxConfig::new(token.clone())
            };
            providers.push(Box::new(MapboxClient::new(config)?));
        }
        if let Some(key) = &self.ors_api_key {
            let config = OrsConfig {
                timeout_secs,
                ..OrsConfig::new(key.clone())
            };
            providers.push(Box::new(OrsClient::new(config)?));
        }
        providers.push(Box::new(OsrmClient::new(OsrmConfig {
            base_url: self.osrm_base_url.clone(),
            timeout_secs,
        })?));
        if self.straight_line_fallback {
            providers.push(Box::new(StraightLineDirections::default()));
        }
        Ok(DirectionsChain::new(providers))
    }

    pub fn build_router(&self) -> Result<ProviderChainRouter, ProviderError> {
        Ok(ProviderChainRouter::new(self.geocoder_chain()?, self.directions_chain()?))
    }

    pub fn build_forecast(&self) -> Result<OpenMeteoClient, ProviderError> {
        let client = OpenMeteoClient::new(OpenMeteoConfig {
            base_url: self.open_meteo_url.clone(),
            timeout_secs: self.forecast_timeout_secs,
            ..OpenMeteoConfig::default()
        })?;
        Ok(client)
    }
}

/// Where the estate is; forecasts are requested for this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
}

impl Default for SiteLocation {
    fn default() -> Self {
        Self {
            name: "Château de Versailles".to_string(),
            lat: 48.8049,
            lon: 2.1204,
            timezone: "Europe/Paris".to_string(),
        }
    }
}
