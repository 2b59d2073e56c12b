//! Polygon composition
//!
//! `Polygon`, `Rectangle` and `PolygonPatch` all resolve the same way:
//! children are picked by role, the `exterior` ring first, then every
//! `interior` ring in document order.

use crate::error::{GmlError, Result};
use crate::geojson::{PolygonRings, Ring};
use crate::parse_xml::XmlNode;
use super::context::ParseContext;
use super::elements::GmlElement;
use super::rings::resolve_ring;

pub fn resolve_polygon(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<PolygonRings> {
    let mut exterior: Option<Ring> = None;
    let mut interiors: Vec<Ring> = Vec::new();

    for child in &node.children {
        match GmlElement::of(child) {
            GmlElement::Exterior if exterior.is_none() => {
                let ring = boundary_ring(child).ok_or_else(|| GmlError::MissingExteriorRing {
                    tag: node.local_name().to_string(),
                })?;
                exterior = Some(resolve_ring(ring, ctx)?);
            }
            GmlElement::Exterior => {
                log::debug!("ignoring additional exterior in <{}>", node.name);
            }
            GmlElement::Interior => {
                let ring = boundary_ring(child).ok_or_else(|| GmlError::MissingCoordinates {
                    tag: child.local_name().to_string(),
                })?;
                interiors.push(resolve_ring(ring, ctx)?);
            }
            _ => log::trace!("skipping <{}> inside <{}>", child.name, node.name),
        }
    }

    let exterior = exterior.ok_or_else(|| GmlError::MissingExteriorRing {
        tag: node.local_name().to_string(),
    })?;

    let mut rings = Vec::with_capacity(1 + interiors.len());
    rings.push(exterior);
    rings.extend(interiors);
    Ok(rings)
}

/// The ring element wrapped by an `exterior` or `interior`
fn boundary_ring(boundary: &XmlNode) -> Option<&XmlNode> {
    boundary
        .children
        .iter()
        .find(|child| GmlElement::of(child).is_ring())
}
