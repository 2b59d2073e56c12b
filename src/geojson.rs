//! GeoJSON result model
//!
//! Plain coordinate arrays only: no `crs`, no `bbox`, no properties.

use serde::{Deserialize, Serialize};

use crate::error::{GmlError, Result};

/// One coordinate tuple (`stride` components)
pub type Position = Vec<f64>;

/// Closed sequence of positions bounding a polygon or a hole
pub type Ring = Vec<Position>;

/// `[exterior, ...interiors]`
pub type PolygonRings = Vec<Ring>;

/// Converted geometry, serialized as `{"type": ..., "coordinates": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
}

impl Geometry {
    /// One polygon collapses to `Polygon`, several promote to `MultiPolygon`.
    /// `tag` names the surface element reported when there are none.
    pub fn from_polygons(mut polygons: Vec<PolygonRings>, tag: &str) -> Result<Self> {
        match polygons.len() {
            0 => Err(GmlError::EmptySurfaceCollection { tag: tag.to_string() }),
            1 => Ok(Geometry::Polygon(polygons.remove(0))),
            _ => Ok(Geometry::MultiPolygon(polygons)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn polygon_count(&self) -> usize {
        match self {
            Geometry::Polygon(_) => 1,
            Geometry::MultiPolygon(polygons) => polygons.len(),
        }
    }

    /// Compact GeoJSON text
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
