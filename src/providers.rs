//! Ordered provider fallback chains.
//!
//! Each chain tries its providers in order and returns the first success.
//! Every failure is logged and kept; when the list runs dry the chain fails
//! with `ProviderError::Exhausted` carrying one entry per attempt.

use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::route::{Directions, Place, ResolvedPlace, RouteSegment, TravelProfile};
use crate::traits::{DirectionsProvider, Geocoder, SegmentRouter};

pub type BoxedGeocoder = Box<dyn Geocoder + Send + Sync>;
pub type BoxedDirections = Box<dyn DirectionsProvider + Send + Sync>;

/// Runs `attempt` against each provider until one succeeds.
fn first_success<P, T>(
    providers: &[P],
    name: impl Fn(&P) -> &str,
    mut attempt: impl FnMut(&P) -> Result<T, ProviderError>,
) -> Result<(T, usize), ProviderError> {
    let mut failures = Vec::with_capacity(providers.len());
    for (index, provider) in providers.iter().enumerate() {
        match attempt(provider) {
            Ok(value) => return Ok((value, index)),
            Err(err) => {
                warn!(provider = name(provider), error = %err, timeout = err.is_timeout(), "provider failed, trying next");
                failures.push(format!("{}: {}", name(provider), err));
            }
        }
    }
    if failures.is_empty() {
        failures.push("no provider configured".to_string());
    }
    Err(ProviderError::Exhausted(failures))
}

#[derive(Default)]
pub struct GeocoderChain {
    geocoders: Vec<BoxedGeocoder>,
}

impl GeocoderChain {
    pub fn new(geocoders: Vec<BoxedGeocoder>) -> Self {
        Self { geocoders }
    }

    pub fn push(&mut self, geocoder: BoxedGeocoder) {
        self.geocoders.push(geocoder);
    }

    pub fn names(&self) -> Vec<&str> {
        self.geocoders.iter().map(|g| g.name()).collect()
    }

    /// Resolves a place; coordinates are taken as they are.
    pub fn resolve(&self, place: &Place) -> Result<ResolvedPlace, ProviderError> {
        match place {
            Place::Coordinates { lat, lon } => Ok(ResolvedPlace::new(place.label(), *lat, *lon)),
            Place::Named(name) => self.geocode(name),
        }
    }
}

impl Geocoder for GeocoderChain {
    fn name(&self) -> &str {
        "geocoder-chain"
    }

    fn geocode(&self, query: &str) -> Result<ResolvedPlace, ProviderError> {
        let (place, index) = first_success(&self.geocoders, |g| g.name(), |g| g.geocode(query))?;
        debug!(query, provider = self.geocoders[index].name(), lat = place.lat, lon = place.lon, "geocoded");
        Ok(place)
    }
}

#[derive(Default)]
pub struct DirectionsChain {
    providers: Vec<BoxedDirections>,
}

impl DirectionsChain {
    pub fn new(providers: Vec<BoxedDirections>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: BoxedDirections) {
        self.providers.push(provider);
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Directions from the first provider that answers, with its name.
    pub fn directions_with_provider(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<(Directions, &str), ProviderError> {
        let (directions, index) =
            first_success(&self.providers, |p| p.name(), |p| p.directions(from, to, profile))?;
        Ok((directions, self.providers[index].name()))
    }
}

impl DirectionsProvider for DirectionsChain {
    fn name(&self) -> &str {
        "directions-chain"
    }

    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError> {
        self.directions_with_provider(from, to, profile)
            .map(|(directions, _)| directions)
    }
}

/// The production `SegmentRouter`: geocoder chain, then directions chain.
#[derive(Default)]
pub struct ProviderChainRouter {
    geocoders: GeocoderChain,
    directions: DirectionsChain,
}

impl ProviderChainRouter {
    pub fn new(geocoders: GeocoderChain, directions: DirectionsChain) -> Self {
        Self { geocoders, directions }
    }

    pub fn geocoders(&self) -> &GeocoderChain {
        &self.geocoders
    }

    pub fn directions(&self) -> &DirectionsChain {
        &self.directions
    }
}

impl SegmentRouter for ProviderChainRouter {
    fn route_segment(
        &self,
        origin: &Place,
        destination: &Place,
        profile: TravelProfile,
    ) -> Result<RouteSegment, ProviderError> {
        let origin = self.geocoders.resolve(origin)?;
        let destination = self.geocoders.resolve(destination)?;
        let (directions, provider) =
            self.directions
                .directions_with_provider(origin.coords(), destination.coords(), profile)?;

        debug!(
            provider,
            distance_m = directions.distance_meters,
            duration_s = directions.duration_seconds,
            steps = directions.steps.len(),
            "segment routed"
        );

        Ok(RouteSegment {
            provider: provider.to_string(),
            distance_meters: directions.distance_meters,
            duration_seconds: directions.duration_seconds,
            path_geometry: directions.geometry,
            turn_steps: directions.steps,
            origin,
            destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polyline;

    struct FixedGeocoder {
        name: &'static str,
        result: Option<(f64, f64)>,
    }

    impl Geocoder for FixedGeocoder {
        fn name(&self) -> &str {
            self.name
        }

        fn geocode(&self, query: &str) -> Result<ResolvedPlace, ProviderError> {
            self.result
                .map(|(lat, lon)| ResolvedPlace::new(query, lat, lon))
                .ok_or_else(|| ProviderError::NotFound(query.to_string()))
        }
    }

    struct FixedDirections {
        name: &'static str,
        ok: bool,
    }

    impl DirectionsProvider for FixedDirections {
        fn name(&self) -> &str {
            self.name
        }

        fn directions(
            &self,
            from: (f64, f64),
            to: (f64, f64),
            _profile: TravelProfile,
        ) -> Result<Directions, ProviderError> {
            if !self.ok {
                return Err(ProviderError::NoRouteFound);
            }
            Ok(Directions {
                distance_meters: 100.0,
                duration_seconds: 80.0,
                geometry: Polyline::straight(from, to),
                steps: Vec::new(),
            })
        }
    }

    fn geocoder(name: &'static str, result: Option<(f64, f64)>) -> BoxedGeocoder {
        Box::new(FixedGeocoder { name, result })
    }

    fn directions(name: &'static str, ok: bool) -> BoxedDirections {
        Box::new(FixedDirections { name, ok })
    }

    #[test]
    fn test_geocoder_falls_through_to_second() {
        let chain = GeocoderChain::new(vec![
            geocoder("locationiq", None),
            geocoder("nominatim", Some((48.8, 2.1))),
        ]);
        let place = chain.geocode("Grand Trianon").unwrap();
        assert_eq!(place.coords(), (48.8, 2.1));
    }

    #[test]
    fn test_exhausted_chain_reports_every_attempt() {
        let chain = GeocoderChain::new(vec![geocoder("locationiq", None), geocoder("nominatim", None)]);
        match chain.geocode("Atlantis") {
            Err(ProviderError::Exhausted(failures)) => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].starts_with("locationiq:"));
                assert!(failures[1].starts_with("nominatim:"));
            }
            other => panic!("expected exhausted chain, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_is_exhausted() {
        let chain = DirectionsChain::default();
        assert!(matches!(
            chain.directions((0.0, 0.0), (1.0, 1.0), TravelProfile::Walking),
            Err(ProviderError::Exhausted(_))
        ));
    }

    #[test]
    fn test_router_records_answering_provider() {
        let router = ProviderChainRouter::new(
            GeocoderChain::new(vec![geocoder("nominatim", Some((48.8, 2.1)))]),
            DirectionsChain::new(vec![directions("mapbox", false), directions("osrm", true)]),
        );
        let segment = router
            .route_segment(
                &Place::named("Château de Versailles"),
                &Place::named("Grand Trianon"),
                TravelProfile::Walking,
            )
            .unwrap();
        assert_eq!(segment.provider, "osrm");
        assert_eq!(segment.origin.name, "Château de Versailles");
    }

    #[test]
    fn test_coordinates_skip_geocoding() {
        let router = ProviderChainRouter::new(
            GeocoderChain::default(),
            DirectionsChain::new(vec![directions("osrm", true)]),
        );
        let segment = router
            .route_segment(
                &Place::Coordinates { lat: 48.80, lon: 2.12 },
                &Place::Coordinates { lat: 48.81, lon: 2.11 },
                TravelProfile::Walking,
            )
            .unwrap();
        assert_eq!(segment.path_geometry.points()[0], [2.12, 48.80]);
    }
}
