//! Converting many geometries out of one larger document

use rayon::prelude::*;

use crate::error::Result;
use crate::geojson::Geometry;
use crate::parse_xml::XmlNode;
use super::context::{ParseOptions, TransformFn};
use super::elements::GmlElement;

/// Every outermost geometry element below (and including) `root`, in
/// document order. A found geometry is not searched further, so members of
/// a `MultiSurface` are not reported on their own.
pub fn find_geometries(root: &XmlNode) -> Vec<&XmlNode> {
    let mut found = Vec::new();
    // explicit stack: documents built in code have no nesting limit
    let mut pending = vec![root];

    while let Some(node) = pending.pop() {
        if GmlElement::of(node).is_geometry_root() {
            found.push(node);
            continue;
        }
        pending.extend(node.children.iter().rev());
    }
    found
}

/// Convert independent geometry fragments in parallel.
/// Results line up with `nodes`; one failure does not affect the rest.
pub fn parse_many(nodes: &[&XmlNode], transform: Option<&TransformFn>, options: &ParseOptions) -> Vec<Result<Geometry>> {
    let start = std::time::Instant::now();

    let results: Vec<Result<Geometry>> = nodes
        .par_iter()
        .map(|node| super::parse_with(node, transform, options))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    log::debug!(
        "converted {} geometries ({} failed) in {:.2}ms",
        results.len(),
        failed,
        start.elapsed().as_secs_f64() * 1000.0
    );
    results
}
