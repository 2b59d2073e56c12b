//! GML geometry to GeoJSON conversion
//!
//! Walks an [`XmlNode`] tree holding one GML geometry and normalizes the
//! many equivalent GML encodings of rings and surfaces into one GeoJSON
//! `Polygon` or `MultiPolygon`.
//!
//! # Submodules
//! - `elements` - Closed set of recognized element kinds
//! - `context` - Per-call options (stride, depth limit, transform)
//! - `coords` - posList / pos / Point>pos extraction
//! - `rings` - LinearRing and Ring/curveMember assembly
//! - `polygons` - Exterior + interior ring composition
//! - `surfaces` - Surface, MultiSurface and CompositeSurface flattening
//! - `dispatch` - Routing by element kind
//! - `batch` - Locating and converting many fragments in parallel
//!
//! Rings are returned in source order. Winding is not normalized and rings
//! are not validated beyond having three distinct vertices.

mod elements;
mod context;
mod coords;
mod rings;
mod polygons;
mod surfaces;
mod dispatch;
mod batch;

use crate::error::Result;
use crate::geojson::Geometry;
use crate::parse_xml::XmlNode;

pub use elements::GmlElement;
pub use context::{ParseContext, ParseOptions, TransformFn, DEFAULT_MAX_DEPTH, DEFAULT_STRIDE};
pub use batch::{find_geometries, parse_many};

/// Convert one GML geometry element
///
/// # Arguments
/// * `node` - A `Polygon`, `Rectangle`, `Surface`, `MultiSurface` or `CompositeSurface`
/// * `transform` - Optional per-coordinate function, applied right after parsing
/// * `stride` - Components per tuple where no `srsDimension` is given (default 2)
///
/// # Example
/// ```
/// use gml_geojson::{parse, parse_xml_str, Geometry};
///
/// let node = parse_xml_str(r#"
///     <gml:Polygon xmlns:gml="http://www.opengis.net/gml">
///       <gml:exterior><gml:LinearRing>
///         <gml:posList>0 0 0 10 10 10 10 0 0 0</gml:posList>
///       </gml:LinearRing></gml:exterior>
///     </gml:Polygon>"#).unwrap();
///
/// let geometry = parse(&node, None, None).unwrap();
/// assert_eq!(geometry.type_name(), "Polygon");
/// ```
pub fn parse(node: &XmlNode, transform: Option<&TransformFn>, stride: Option<usize>) -> Result<Geometry> {
    let options = match stride {
        Some(stride) => ParseOptions::default().with_stride(stride),
        None => ParseOptions::default(),
    };
    parse_with(node, transform, &options)
}

/// Convert one GML geometry element with explicit options
pub fn parse_with(node: &XmlNode, transform: Option<&TransformFn>, options: &ParseOptions) -> Result<Geometry> {
    let ctx = ParseContext::new(transform, options, node.local_name())?;
    dispatch::resolve(node, &ctx)
}
