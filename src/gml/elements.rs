//! Recognized GML element kinds
//!
//! Tag names are matched on their local part only (prefix stripped),
//! case-sensitively. Anything else is `Foreign`.

use crate::parse_xml::XmlNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GmlElement {
    // Geometry roots
    Polygon,
    Rectangle,
    Surface,
    MultiSurface,
    CompositeSurface,
    // Surface structure
    Patches,
    PolygonPatch,
    SurfaceMember,
    SurfaceMembers,
    // Polygon structure
    Exterior,
    Interior,
    // Rings and curves
    LinearRing,
    Ring,
    CurveMember,
    LineString,
    Curve,
    Segments,
    LineStringSegment,
    // Coordinate forms
    PosList,
    Pos,
    Point,
    Foreign,
}

impl GmlElement {
    pub fn from_tag(tag: &str) -> Self {
        match crate::parse_xml::local_name(tag) {
            "Polygon" => GmlElement::Polygon,
            "Rectangle" => GmlElement::Rectangle,
            "Surface" => GmlElement::Surface,
            "MultiSurface" => GmlElement::MultiSurface,
            "CompositeSurface" => GmlElement::CompositeSurface,
            "patches" => GmlElement::Patches,
            "PolygonPatch" => GmlElement::PolygonPatch,
            "surfaceMember" => GmlElement::SurfaceMember,
            "surfaceMembers" => GmlElement::SurfaceMembers,
            "exterior" => GmlElement::Exterior,
            "interior" => GmlElement::Interior,
            "LinearRing" => GmlElement::LinearRing,
            "Ring" => GmlElement::Ring,
            "curveMember" => GmlElement::CurveMember,
            "LineString" => GmlElement::LineString,
            "Curve" => GmlElement::Curve,
            "segments" => GmlElement::Segments,
            "LineStringSegment" => GmlElement::LineStringSegment,
            "posList" => GmlElement::PosList,
            "pos" => GmlElement::Pos,
            "Point" => GmlElement::Point,
            _ => GmlElement::Foreign,
        }
    }

    pub fn of(node: &XmlNode) -> Self {
        Self::from_tag(&node.name)
    }

    /// Elements accepted as the root of a conversion
    pub fn is_geometry_root(self) -> bool {
        matches!(
            self,
            GmlElement::Polygon
                | GmlElement::Rectangle
                | GmlElement::Surface
                | GmlElement::MultiSurface
                | GmlElement::CompositeSurface
        )
    }

    pub fn is_ring(self) -> bool {
        matches!(self, GmlElement::LinearRing | GmlElement::Ring)
    }
}

/// Child elements of `node` with the given kind, in document order
pub fn children_of_kind(node: &XmlNode, kind: GmlElement) -> impl Iterator<Item = &XmlNode> {
    node.children.iter().filter(move |child| GmlElement::of(child) == kind)
}
