//! Ring assembly
//!
//! `LinearRing` carries its coordinates directly. `Ring` is built from
//! `curveMember`s, each a `LineString` or a `Curve` split into
//! `LineStringSegment`s. Consecutive pieces are assumed to share their
//! junction vertex, so every piece after the first drops its leading tuple.
//! The rule is structural and unconditional: non-contiguous pieces yield a
//! wrong ring rather than an error.

use std::collections::HashSet;

use crate::error::{GmlError, Result};
use crate::geojson::{Position, Ring};
use crate::parse_xml::XmlNode;
use super::context::ParseContext;
use super::coords::extract_coords;
use super::elements::{children_of_kind, GmlElement};

/// Resolve a `LinearRing` or `Ring` element into a closed position sequence
pub fn resolve_ring(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Ring> {
    let ring = match GmlElement::of(node) {
        GmlElement::LinearRing => extract_coords(node, ctx)?,
        GmlElement::Ring => resolve_curve_members(node, ctx)?,
        _ => {
            return Err(GmlError::UnsupportedGeometryKind { tag: node.local_name().to_string() });
        }
    };

    let distinct = distinct_vertices(&ring);
    if distinct < 3 {
        return Err(GmlError::DegenerateRing {
            tag: node.local_name().to_string(),
            distinct,
        });
    }
    Ok(ring)
}

fn resolve_curve_members(ring: &XmlNode, ctx: &ParseContext<'_>) -> Result<Vec<Position>> {
    let mut positions = Vec::new();
    let mut count = 0;

    for member in children_of_kind(ring, GmlElement::CurveMember) {
        append_piece(&mut positions, resolve_curve_member(member, ctx)?, count == 0);
        count += 1;
    }

    if count == 0 {
        return Err(GmlError::MissingCoordinates { tag: ring.local_name().to_string() });
    }
    Ok(positions)
}

fn resolve_curve_member(member: &XmlNode, ctx: &ParseContext<'_>) -> Result<Vec<Position>> {
    for child in &member.children {
        match GmlElement::of(child) {
            GmlElement::LineString => return extract_coords(child, ctx),
            GmlElement::Curve => return resolve_curve(child, ctx),
            _ => log::trace!("skipping <{}> inside curveMember", child.name),
        }
    }
    Err(GmlError::MissingCoordinates { tag: member.local_name().to_string() })
}

fn resolve_curve(curve: &XmlNode, ctx: &ParseContext<'_>) -> Result<Vec<Position>> {
    let segments = children_of_kind(curve, GmlElement::Segments)
        .next()
        .ok_or_else(|| GmlError::MissingCoordinates { tag: curve.local_name().to_string() })?;

    let mut positions = Vec::new();
    let mut count = 0;
    for segment in children_of_kind(segments, GmlElement::LineStringSegment) {
        append_piece(&mut positions, extract_coords(segment, ctx)?, count == 0);
        count += 1;
    }

    if count == 0 {
        return Err(GmlError::MissingCoordinates { tag: segments.local_name().to_string() });
    }
    Ok(positions)
}

/// First piece is taken whole, later pieces from their second tuple on,
/// even when the first piece was empty
fn append_piece(positions: &mut Vec<Position>, piece: Vec<Position>, first: bool) {
    if first {
        positions.extend(piece);
    } else {
        positions.extend(piece.into_iter().skip(1));
    }
}

/// Distinct vertices, not counting a closing duplicate of the first.
/// Counting stops at 3 since that is all callers need to know.
fn distinct_vertices(ring: &[Position]) -> usize {
    let body = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    };

    let mut seen: HashSet<Vec<u64>> = HashSet::new();
    for position in body {
        // 0.0 and -0.0 are the same vertex
        let key = position
            .iter()
            .map(|&v| if v == 0.0 { 0 } else { v.to_bits() })
            .collect();
        seen.insert(key);
        if seen.len() >= 3 {
            break;
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gml::context::ParseOptions;

    fn ctx() -> ParseContext<'static> {
        ParseContext::new(None, &ParseOptions::default(), "Polygon").unwrap()
    }

    fn pos_list(coords: &[[f64; 2]]) -> XmlNode {
        let text: Vec<String> = coords.iter().map(|c| format!("{} {}", c[0], c[1])).collect();
        XmlNode::new("gml:posList").with_text(text.join(" "))
    }

    fn line_string_member(coords: &[[f64; 2]]) -> XmlNode {
        XmlNode::new("gml:curveMember")
            .with_child(XmlNode::new("gml:LineString").with_child(pos_list(coords)))
    }

    #[test]
    fn test_append_piece_drops_junction() {
        let mut positions = Vec::new();
        append_piece(&mut positions, vec![vec![0.0, 0.0], vec![0.0, 1.0]], true);
        append_piece(&mut positions, vec![vec![0.0, 1.0], vec![1.0, 1.0]], false);
        assert_eq!(positions, vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_append_piece_is_unconditional() {
        let mut positions = vec![vec![0.0, 0.0], vec![0.0, 1.0]];
        append_piece(&mut positions, vec![vec![5.0, 5.0], vec![6.0, 6.0]], false);
        assert_eq!(positions, vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![6.0, 6.0]]);
    }

    #[test]
    fn test_two_curve_members() {
        let ring = XmlNode::new("gml:Ring")
            .with_child(line_string_member(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]))
            .with_child(line_string_member(&[[1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]));
        let resolved = resolve_ring(&ring, &ctx()).unwrap();
        assert_eq!(
            resolved,
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0], vec![0.0, 0.0]]
        );
    }

    #[test]
    fn test_curve_segments_merge() {
        let segments = XmlNode::new("gml:segments")
            .with_child(XmlNode::new("gml:LineStringSegment").with_child(pos_list(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])))
            .with_child(XmlNode::new("gml:LineStringSegment").with_child(pos_list(&[[1.0, 1.0], [1.0, 0.0], [0.0, 0.0]])));
        let ring = XmlNode::new("gml:Ring").with_child(
            XmlNode::new("gml:curveMember").with_child(XmlNode::new("gml:Curve").with_child(segments)),
        );
        let resolved = resolve_ring(&ring, &ctx()).unwrap();
        assert_eq!(resolved.len(), 5);
        assert_eq!(resolved[2], vec![1.0, 1.0]);
        assert_eq!(resolved[3], vec![1.0, 0.0]);
    }

    #[test]
    fn test_empty_first_member_still_drops_junction() {
        let ring = XmlNode::new("gml:Ring")
            .with_child(XmlNode::new("gml:curveMember")
                .with_child(XmlNode::new("gml:LineString").with_child(XmlNode::new("gml:posList"))))
            .with_child(line_string_member(&[[9.0, 9.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]));
        let resolved = resolve_ring(&ring, &ctx()).unwrap();
        assert_eq!(
            resolved,
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![0.0, 0.0]]
        );
    }

    #[test]
    fn test_empty_first_segment_still_drops_junction() {
        let segments = XmlNode::new("gml:segments")
            .with_child(XmlNode::new("gml:LineStringSegment").with_child(XmlNode::new("gml:posList")))
            .with_child(XmlNode::new("gml:LineStringSegment").with_child(pos_list(&[[9.0, 9.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]])));
        let ring = XmlNode::new("gml:Ring").with_child(
            XmlNode::new("gml:curveMember").with_child(XmlNode::new("gml:Curve").with_child(segments)),
        );
        let resolved = resolve_ring(&ring, &ctx()).unwrap();
        assert_eq!(resolved[0], vec![0.0, 0.0]);
        assert_eq!(resolved.len(), 4);
    }

    #[test]
    fn test_ring_without_members() {
        let ring = XmlNode::new("gml:Ring");
        let err = resolve_ring(&ring, &ctx()).unwrap_err();
        assert_eq!(err, GmlError::MissingCoordinates { tag: "Ring".to_string() });
    }

    #[test]
    fn test_curve_without_segments() {
        let ring = XmlNode::new("gml:Ring").with_child(
            XmlNode::new("gml:curveMember").with_child(XmlNode::new("gml:Curve")),
        );
        let err = resolve_ring(&ring, &ctx()).unwrap_err();
        assert_eq!(err, GmlError::MissingCoordinates { tag: "Curve".to_string() });
    }

    #[test]
    fn test_degenerate_ring() {
        let ring = XmlNode::new("gml:LinearRing").with_child(pos_list(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]));
        let err = resolve_ring(&ring, &ctx()).unwrap_err();
        assert_eq!(err, GmlError::DegenerateRing { tag: "LinearRing".to_string(), distinct: 2 });
    }

    #[test]
    fn test_distinct_vertices() {
        let open = vec![vec![1.0, 1.0], vec![1.0, 2.0], vec![2.0, 2.0]];
        assert_eq!(distinct_vertices(&open), 3);

        let repeated = vec![vec![0.0, 0.0], vec![-0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(distinct_vertices(&repeated), 2);

        assert_eq!(distinct_vertices(&[]), 0);
    }
}
