//! Real Versailles estate locations for test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Names match the geocoding
//! strings the scheduler hands to the router.

use estate_planner::rules::AreaId;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

// ============================================================================
// Estate Areas
// ============================================================================

pub const ESTATE_AREAS: &[Location] = &[
    Location::new("Jardins du Château de Versailles, Versailles, France", 48.8063, 2.1159),
    Location::new("Château de Versailles, Versailles, France", 48.8049, 2.1204),
    Location::new("Grand Trianon, Versailles, France", 48.8145, 2.1048),
    Location::new("Hameau de la Reine, Versailles, France", 48.8178, 2.1094),
    Location::new("Petit Trianon, Versailles, France", 48.8155, 2.1098),
    Location::new("Galerie des Carrosses, Versailles, France", 48.8059, 2.1270),
    Location::new("Petite Écurie du Roi, Versailles, France", 48.8034, 2.1276),
];

// ============================================================================
// Town Landmarks (good for live-location starts)
// ============================================================================

pub const TOWN_LANDMARKS: &[Location] = &[
    Location::new("Gare de Versailles Château Rive Gauche", 48.8005, 2.1290),
    Location::new("Gare de Versailles Rive Droite", 48.8096, 2.1345),
    Location::new("Marché Notre-Dame", 48.8066, 2.1325),
    Location::new("Orangerie", 48.8022, 2.1218),
    Location::new("Grand Canal", 48.8079, 2.1010),
];

pub fn find_place(name: &str) -> Option<&'static Location> {
    ESTATE_AREAS
        .iter()
        .chain(TOWN_LANDMARKS)
        .find(|loc| loc.name == name)
}

pub fn area_location(area: AreaId) -> &'static Location {
    find_place(area.place_name()).unwrap()
}
