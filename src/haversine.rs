//! Straight-line directions estimate (last resort when every router failed).
//!
//! Uses great-circle distance and an assumed speed per travel profile.
//! Ignores paths entirely, so it is only added to the directions chain when
//! explicitly enabled.

use crate::error::ProviderError;
use crate::polyline::Polyline;
use crate::route::{Directions, TravelProfile};
use crate::traits::DirectionsProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone)]
pub struct StraightLineDirections {
    pub walking_kmh: f64,
    pub cycling_kmh: f64,
    pub driving_kmh: f64,
}

impl Default for StraightLineDirections {
    fn default() -> Self {
        Self {
            walking_kmh: 4.5,
            cycling_kmh: 15.0,
            driving_kmh: 40.0,
        }
    }
}

impl StraightLineDirections {
    pub fn speed_kmh(&self, profile: TravelProfile) -> f64 {
        match profile {
            TravelProfile::Walking => self.walking_kmh,
            TravelProfile::Cycling => self.cycling_kmh,
            TravelProfile::Driving => self.driving_kmh,
        }
    }

    /// Great-circle distance between two `(lat, lon)` points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_seconds(&self, km: f64, profile: TravelProfile) -> f64 {
        (km / self.speed_kmh(profile) * 3600.0).round()
    }
}

impl DirectionsProvider for StraightLineDirections {
    fn name(&self) -> &str {
        "straight-line"
    }

    fn directions(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<Directions, ProviderError> {
        let km = Self::haversine_km(from, to);
        Ok(Directions {
            distance_meters: (km * 1000.0).round(),
            duration_seconds: self.km_to_seconds(km, profile),
            geometry: Polyline::straight(from, to),
            steps: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALACE: (f64, f64) = (48.8049, 2.1204);
    const GRAND_TRIANON: (f64, f64) = (48.8141, 2.1046);

    #[test]
    fn test_haversine_same_point() {
        let dist = StraightLineDirections::haversine_km(PALACE, PALACE);
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Versailles palace to Paris Notre-Dame is roughly 17 km as the crow flies
        let dist = StraightLineDirections::haversine_km(PALACE, (48.8530, 2.3499));
        assert!(dist > 16.0 && dist < 18.5, "expected ~17km, got {}", dist);
    }

    #[test]
    fn test_symmetric() {
        let provider = StraightLineDirections::default();
        let there = provider.directions(PALACE, GRAND_TRIANON, TravelProfile::Walking).unwrap();
        let back = provider.directions(GRAND_TRIANON, PALACE, TravelProfile::Walking).unwrap();
        assert_eq!(there.distance_meters, back.distance_meters);
        assert_eq!(there.duration_seconds, back.duration_seconds);
    }

    #[test]
    fn test_reasonable_travel_time() {
        let provider = StraightLineDirections::default();
        // 4.5 km at 4.5 km/h is one hour
        assert_eq!(provider.km_to_seconds(4.5, TravelProfile::Walking), 3600.0);
        // 10 km at 40 km/h = 900 seconds
        assert_eq!(provider.km_to_seconds(10.0, TravelProfile::Driving), 900.0);
    }

    #[test]
    fn test_geometry_is_two_points() {
        let directions = StraightLineDirections::default()
            .directions(PALACE, GRAND_TRIANON, TravelProfile::Cycling)
            .unwrap();
        assert_eq!(directions.geometry.len(), 2);
        assert!(directions.steps.is_empty());
    }
}
