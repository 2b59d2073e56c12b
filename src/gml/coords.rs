//! Coordinate extraction
//!
//! A ring or curve element holds its coordinates in exactly one of three
//! forms: a single `posList`, a run of `pos` elements (one tuple each), or a
//! run of `Point` elements each wrapping one `pos`.

use crate::error::{GmlError, Result};
use crate::geojson::Position;
use crate::parse_xml::XmlNode;
use super::context::ParseContext;
use super::elements::{children_of_kind, GmlElement};

/// Read all coordinate tuples carried by `node`, transformed
pub fn extract_coords(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Vec<Position>> {
    if let Some(pos_list) = children_of_kind(node, GmlElement::PosList).next() {
        return read_pos_list(pos_list, ctx);
    }

    let positions: Vec<&XmlNode> = children_of_kind(node, GmlElement::Pos).collect();
    if !positions.is_empty() {
        return positions.into_iter().map(|pos| read_pos(pos, ctx)).collect();
    }

    let points: Vec<&XmlNode> = children_of_kind(node, GmlElement::Point).collect();
    if !points.is_empty() {
        return points
            .into_iter()
            .map(|point| {
                let pos = children_of_kind(point, GmlElement::Pos).next().ok_or_else(|| {
                    GmlError::MissingCoordinates { tag: point.local_name().to_string() }
                })?;
                read_pos(pos, ctx)
            })
            .collect();
    }

    Err(GmlError::MissingCoordinates { tag: node.local_name().to_string() })
}

/// `srsDimension` overrides the stride only when it is a positive integer
fn stride_for(node: &XmlNode, ctx: &ParseContext<'_>) -> usize {
    node.attribute("srsDimension")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&dim| dim > 0)
        .unwrap_or(ctx.stride)
}

fn parse_numbers(node: &XmlNode) -> Result<Vec<f64>> {
    node.text_content
        .split_whitespace()
        .map(|token| {
            let value = token
                .parse::<f64>()
                .map_err(|_| GmlError::malformed(node.local_name(), format!("'{}' is not a number", token)))?;
            // f64 parsing accepts NaN and inf, which GeoJSON cannot carry
            if !value.is_finite() {
                return Err(GmlError::malformed(node.local_name(), format!("'{}' is not a finite number", token)));
            }
            Ok(value)
        })
        .collect()
}

fn read_pos_list(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Vec<Position>> {
    let stride = stride_for(node, ctx);
    let values = parse_numbers(node)?;
    if values.len() % stride != 0 {
        return Err(GmlError::malformed(
            node.local_name(),
            format!("{} values do not divide into tuples of {}", values.len(), stride),
        ));
    }

    values
        .chunks_exact(stride)
        .map(|chunk| ctx.apply(chunk.to_vec(), node.local_name()))
        .collect()
}

fn read_pos(node: &XmlNode, ctx: &ParseContext<'_>) -> Result<Position> {
    let stride = stride_for(node, ctx);
    let values = parse_numbers(node)?;
    if values.len() != stride {
        return Err(GmlError::malformed(
            node.local_name(),
            format!("expected {} values, found {}", stride, values.len()),
        ));
    }
    ctx.apply(values, node.local_name())
}
