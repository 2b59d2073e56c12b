//! Surface flattening
//!
//! `Surface` holds its polygons as `patches`. `MultiSurface` and
//! `CompositeSurface` hold `surfaceMember`s (or one `surfaceMembers`) whose
//! children go back through the dispatcher, so wrappers may nest. All
//! polygons end up in one flat list in document order.

use crate::error::{GmlError, Result};
use crate::geojson::{Geometry, PolygonRings};
use crate::parse_xml::XmlNode;
use super::context::ParseContext;
use super::dispatch::collect_member;
use super::elements::{children_of_kind, GmlElement};
use super::polygons::resolve_polygon;

/// Resolve a surface element, collapsing a single polygon to `Polygon`
pub fn resolve_surface(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Geometry> {
    let mut polygons = Vec::new();
    collect_surface(node, ctx, &mut polygons)?;
    Geometry::from_polygons(polygons, node.local_name())
}

/// Append every polygon below `node`. A surface that adds nothing is an
/// error at its own level, so empty nested members are never dropped.
pub fn collect_surface(node: &XmlNode, ctx: &ParseContext<'_>, out: &mut Vec<PolygonRings>) -> Result<()> {
    let before = out.len();

    match GmlElement::of(node) {
        GmlElement::Surface => {
            for patches in children_of_kind(node, GmlElement::Patches) {
                for patch in &patches.children {
                    match GmlElement::of(patch) {
                        GmlElement::PolygonPatch | GmlElement::Rectangle => {
                            out.push(resolve_polygon(patch, ctx)?);
                        }
                        _ => log::trace!("skipping <{}> inside patches", patch.name),
                    }
                }
            }
        }
        GmlElement::MultiSurface | GmlElement::CompositeSurface => {
            for child in &node.children {
                match GmlElement::of(child) {
                    GmlElement::SurfaceMember | GmlElement::SurfaceMembers => {
                        for member in &child.children {
                            collect_member(member, ctx, out)?;
                        }
                    }
                    _ => log::trace!("skipping <{}> inside <{}>", child.name, node.name),
                }
            }
        }
        _ => {
            return Err(GmlError::UnsupportedGeometryKind { tag: node.local_name().to_string() });
        }
    }

    if out.len() == before {
        return Err(GmlError::EmptySurfaceCollection { tag: node.local_name().to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gml::context::ParseOptions;

    fn ctx() -> ParseContext<'static> {
        ParseContext::new(None, &ParseOptions::default(), "Surface").unwrap()
    }

    fn patch(tag: &str, text: &str) -> XmlNode {
        XmlNode::new(format!("gml:{}", tag)).with_child(
            XmlNode::new("gml:exterior").with_child(
                XmlNode::new("gml:LinearRing").with_child(XmlNode::new("gml:posList").with_text(text)),
            ),
        )
    }

    #[test]
    fn test_single_patch_is_polygon() {
        let surface = XmlNode::new("gml:Surface").with_child(
            XmlNode::new("gml:patches").with_child(patch("PolygonPatch", "0 0 0 1 1 1 0 0")),
        );
        let geometry = resolve_surface(&surface, &ctx()).unwrap();
        assert_eq!(geometry.type_name(), "Polygon");
    }

    #[test]
    fn test_mixed_patches_in_order() {
        let surface = XmlNode::new("gml:Surface").with_child(
            XmlNode::new("gml:patches")
                .with_child(patch("PolygonPatch", "0 0 0 1 1 1 0 0"))
                .with_child(patch("Rectangle", "2 2 2 5 5 5 5 2 2 2")),
        );
        match resolve_surface(&surface, &ctx()).unwrap() {
            Geometry::MultiPolygon(polygons) => {
                assert_eq!(polygons.len(), 2);
                assert_eq!(polygons[1][0][0], vec![2.0, 2.0]);
            }
            other => panic!("expected MultiPolygon, got {:?}", other),
        }
    }

    #[test]
    fn test_surface_members_array_property() {
        let multi = XmlNode::new("gml:MultiSurface").with_child(
            XmlNode::new("gml:surfaceMembers")
                .with_child(patch("Polygon", "0 0 0 1 1 1 0 0"))
                .with_child(patch("Polygon", "2 2 2 5 5 5 2 2")),
        );
        let geometry = resolve_surface(&multi, &ctx()).unwrap();
        assert_eq!(geometry.polygon_count(), 2);
    }

    #[test]
    fn test_empty_surface() {
        let surface = XmlNode::new("gml:Surface").with_child(XmlNode::new("gml:patches"));
        let err = resolve_surface(&surface, &ctx()).unwrap_err();
        assert_eq!(err, GmlError::EmptySurfaceCollection { tag: "Surface".to_string() });
    }

    #[test]
    fn test_empty_nested_member_is_not_dropped() {
        let multi = XmlNode::new("gml:MultiSurface")
            .with_child(XmlNode::new("gml:surfaceMember").with_child(patch("Polygon", "0 0 0 1 1 1 0 0")))
            .with_child(XmlNode::new("gml:surfaceMember").with_child(XmlNode::new("gml:CompositeSurface")));
        let err = resolve_surface(&multi, &ctx()).unwrap_err();
        assert_eq!(err, GmlError::EmptySurfaceCollection { tag: "CompositeSurface".to_string() });
    }
}
