//! Element routing
//!
//! The root of a conversion must be a geometry element; anything else is
//! rejected. Below a surface member, foreign elements are skipped so a
//! document may carry metadata siblings next to its geometry.

use crate::error::{GmlError, Result};
use crate::geojson::{Geometry, PolygonRings};
use crate::parse_xml::XmlNode;
use super::context::ParseContext;
use super::elements::GmlElement;
use super::polygons::resolve_polygon;
use super::surfaces::{collect_surface, resolve_surface};

/// Convert a geometry root element
pub fn resolve(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Geometry> {
    let geometry = match GmlElement::of(node) {
        GmlElement::Polygon | GmlElement::Rectangle => Geometry::Polygon(resolve_polygon(node, ctx)?),
        GmlElement::Surface | GmlElement::MultiSurface | GmlElement::CompositeSurface => {
            resolve_surface(node, ctx)?
        }
        GmlElement::Patches
        | GmlElement::PolygonPatch
        | GmlElement::SurfaceMember
        | GmlElement::SurfaceMembers
        | GmlElement::Exterior
        | GmlElement::Interior
        | GmlElement::LinearRing
        | GmlElement::Ring
        | GmlElement::CurveMember
        | GmlElement::LineString
        | GmlElement::Curve
        | GmlElement::Segments
        | GmlElement::LineStringSegment
        | GmlElement::PosList
        | GmlElement::Pos
        | GmlElement::Point
        | GmlElement::Foreign => {
            return Err(GmlError::UnsupportedGeometryKind { tag: node.local_name().to_string() });
        }
    };

    log::debug!(
        "resolved <{}> into {} with {} polygon(s)",
        node.name,
        geometry.type_name(),
        geometry.polygon_count()
    );
    Ok(geometry)
}

/// Route one child of a `surfaceMember`, appending its polygons to `out`
pub fn collect_member(node: &XmlNode, ctx: &ParseContext<'_>, out: &mut Vec<PolygonRings>) -> Result<()> {
    match GmlElement::of(node) {
        GmlElement::Polygon | GmlElement::Rectangle => {
            out.push(resolve_polygon(node, ctx)?);
        }
        GmlElement::Surface | GmlElement::MultiSurface | GmlElement::CompositeSurface => {
            let nested = ctx.descend(node.local_name())?;
            collect_surface(node, &nested, out)?;
        }
        _ => log::trace!("skipping foreign surface member <{}>", node.name),
    }
    Ok(())
}
