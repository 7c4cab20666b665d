//! Polyline representation for route geometries.
//!
//! Points are `[lon, lat]` pairs, the GeoJSON order every directions provider
//! answers in. A composite route keeps one polyline per segment in a
//! `MultiPolyline`; segments are never joined, so small gaps between the end of
//! one segment and the start of the next are expected.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ProviderError;

/// A single path as decoded `[lon, lat]` coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<[f64; 2]>,
}

impl Polyline {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    /// Two-point path between `(lat, lon)` endpoints.
    pub fn straight(from: (f64, f64), to: (f64, f64)) -> Self {
        Self::new(vec![[from.1, from.0], [to.1, to.0]])
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn into_points(self) -> Vec<[f64; 2]> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reads a GeoJSON `LineString` geometry object.
    pub fn from_geojson(geometry: &Value) -> Result<Self, ProviderError> {
        if geometry.get("type").and_then(Value::as_str) != Some("LineString") {
            return Err(ProviderError::InvalidResponse(
                "geometry is not a GeoJSON LineString".to_string(),
            ));
        }
        let coordinates = geometry
            .get("coordinates")
            .cloned()
            .ok_or_else(|| ProviderError::InvalidResponse("LineString without coordinates".to_string()))?;
        let points: Vec<[f64; 2]> = serde_json::from_value(coordinates)?;
        Ok(Self::new(points))
    }

    pub fn to_geojson(&self) -> Value {
        json!({ "type": "LineString", "coordinates": self.points })
    }
}

/// One path per route segment, in segment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolyline {
    parts: Vec<Polyline>,
}

impl MultiPolyline {
    pub fn new(parts: Vec<Polyline>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[Polyline] {
        &self.parts
    }

    pub fn push(&mut self, part: Polyline) {
        self.parts.push(part);
    }

    pub fn prepend(&mut self, part: Polyline) {
        self.parts.insert(0, part);
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// GeoJSON `MultiLineString` for map rendering.
    pub fn to_geojson(&self) -> Value {
        let coordinates: Vec<&[[f64; 2]]> = self.parts.iter().map(Polyline::points).collect();
        json!({ "type": "MultiLineString", "coordinates": coordinates })
    }
}
