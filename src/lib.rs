//! Convert GML polygon and surface geometries into GeoJSON.
//!
//! The input is an already parsed XML tree ([`XmlNode`]); [`parse_xml_str`]
//! and [`parse_xml_file`] build one from text. [`parse`] turns a single GML
//! geometry element into a [`Geometry`], and [`find_geometries`] plus
//! [`parse_many`] handle documents carrying many of them.

pub mod parse_xml;
pub mod error;
pub mod geojson;
pub mod gml;

pub use parse_xml::{parse_xml_file, parse_xml_str, print_xml_tree, write_xml_tree, XmlNode, MAX_XML_DEPTH};
pub use error::{GmlError, Result};
pub use geojson::{Geometry, PolygonRings, Position, Ring};
pub use gml::{
    find_geometries, parse, parse_many, parse_with, GmlElement, ParseOptions, TransformFn,
    DEFAULT_MAX_DEPTH, DEFAULT_STRIDE,
};
