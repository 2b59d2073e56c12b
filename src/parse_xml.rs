use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use indexmap::IndexMap;

/// A parsed XML element: tag, attributes, text and child elements.
///
/// This is the tree the GML converter walks. It is built once (by
/// [`parse_xml_str`], [`parse_xml_file`] or the builder methods below) and
/// never mutated by the converter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    /// The name/tag of this element, including any namespace prefix
    pub name: String,
    /// Attribute names to values, in document order
    pub attributes: IndexMap<String, String>,
    /// Non-blank character data directly inside this element
    pub text_content: String,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

/// Strip a namespace prefix (`gml:posList` -> `posList`)
pub fn local_name(tag: &str) -> &str {
    match tag.split_once(':') {
        Some((_, local)) => local,
        None => tag,
    }
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        XmlNode {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Look up an attribute by local name, so `gml:srsDimension` and
    /// `srsDimension` both answer to `"srsDimension"`.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        if let Some(value) = self.attributes.get(local) {
            return Some(value.as_str());
        }
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }
}

/// Parses an XML document from a string and returns the root node
///
/// # Example
/// ```
/// let root = gml_geojson::parse_xml_str(
///     "<gml:pos srsDimension=\"3\">1 2 3</gml:pos>",
/// ).unwrap();
/// assert_eq!(root.local_name(), "pos");
/// assert_eq!(root.text_content, "1 2 3");
/// ```
pub fn parse_xml_str(xml: &str) -> anyhow::Result<XmlNode> {
    parse_document(Reader::from_reader(xml.as_bytes()))
}

/// Parses an XML file and returns the root node
///
/// # Arguments
/// * `path` - The file path to the XML file to parse
///
/// # Returns
/// * `Result<XmlNode>` - The parsed XML tree or an error
pub fn parse_xml_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<XmlNode> {
    let file = File::open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.as_ref().display(), e))?;

    // GML exports from WFS services are routinely tens of megabytes
    parse_document(Reader::from_reader(BufReader::new(file)))
}

/// Elements nested deeper than this are rejected rather than recursed into
pub const MAX_XML_DEPTH: usize = 512;

fn parse_document<R: BufRead>(mut reader: Reader<R>) -> anyhow::Result<XmlNode> {
    reader.trim_text(true);

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf)?;
        let maybe_root = match event {
            Event::Start(start) => Some((start.into_owned(), false)),
            Event::Empty(start) => Some((start.into_owned(), true)),
            Event::Eof => {
                anyhow::bail!("XML document is empty");
            }
            _ => None,
        };

        if let Some((start, self_closing)) = maybe_root {
            let mut node_buf = Vec::new();
            return parse_node(&mut reader, &mut node_buf, start, self_closing, 1);
        }
    }
}

fn parse_node<R: BufRead>(reader: &mut Reader<R>, buf: &mut Vec<u8>, start: BytesStart<'static>, self_closing: bool, depth: usize) -> anyhow::Result<XmlNode> {
    let element_name_bytes = start.name().as_ref().to_vec();
    let element_name = String::from_utf8_lossy(&element_name_bytes).to_string();
    anyhow::ensure!(
        depth <= MAX_XML_DEPTH,
        "element '{}' is nested deeper than {} levels",
        element_name,
        MAX_XML_DEPTH
    );
    let attributes = collect_attributes(&start)?;

    let mut node = XmlNode {
        name: element_name,
        attributes,
        text_content: String::new(),
        children: Vec::new(),
    };

    if self_closing {
        return Ok(node);
    }

    loop {
        buf.clear();
        let event = reader.read_event_into(buf)?;
        match event {
            Event::Start(child_start) => {
                let mut child_buf = Vec::new();
                let child = parse_node(reader, &mut child_buf, child_start.into_owned(), false, depth + 1)?;
                node.children.push(child);
            }
            Event::Empty(child_start) => {
                let mut child_buf = Vec::new();
                let child = parse_node(reader, &mut child_buf, child_start.into_owned(), true, depth + 1)?;
                node.children.push(child);
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                if !value.trim().is_empty() {
                    push_text(&mut node.text_content, &value);
                }
            }
            Event::CData(text) => {
                let value = String::from_utf8_lossy(text.as_ref()).to_string();
                if !value.trim().is_empty() {
                    push_text(&mut node.text_content, &value);
                }
            }
            Event::End(end) => {
                anyhow::ensure!(
                    end.name().as_ref() == element_name_bytes.as_slice(),
                    "unexpected closing tag '</{}>' while parsing '<{}>'",
                    String::from_utf8_lossy(end.name().as_ref()),
                    node.name
                );
                return Ok(node);
            }
            Event::Eof => {
                anyhow::bail!("unexpected end of file while parsing element '{}'", node.name);
            }
            _ => {}
        }
    }
}

// Text split by comments or CDATA must not glue two numbers together
fn push_text(content: &mut String, value: &str) {
    if !content.is_empty() {
        content.push(' ');
    }
    content.push_str(value.trim());
}

fn collect_attributes(start: &BytesStart<'_>) -> anyhow::Result<IndexMap<String, String>> {
    let mut map = IndexMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

/// Pretty-prints the XML tree structure to stdout
/// Useful for checking what the converter will see
pub fn print_xml_tree(node: &XmlNode, indent: usize) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // stdout write errors (closed pipe) are ignored
    let _ = write_xml_tree(node, indent, &mut out);
}

/// Writes an indented outline of the tree, one element per line
pub fn write_xml_tree<W: Write>(node: &XmlNode, indent: usize, out: &mut W) -> io::Result<()> {
    let prefix = " ".repeat(indent);

    write!(out, "{}<{}", prefix, node.name)?;
    for (key, value) in &node.attributes {
        write!(out, " {}=\"{}\"", key, value)?;
    }
    if node.children.is_empty() && node.text_content.is_empty() {
        return writeln!(out, "/>");
    }
    writeln!(out, ">")?;

    if !node.text_content.is_empty() {
        writeln!(out, "{}  {}", prefix, node.text_content)?;
    }
    for child in &node.children {
        write_xml_tree(child, indent + 2, out)?;
    }
    writeln!(out, "{}</{}>", prefix, node.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("gml:Polygon"), "Polygon");
        assert_eq!(local_name("Polygon"), "Polygon");
        assert_eq!(local_name("a:b:c"), "b:c");
    }

    #[test]
    fn test_parse_nested_elements() {
        let xml = r#"<?xml version="1.0"?>
            <gml:LinearRing xmlns:gml="http://www.opengis.net/gml/3.2">
                <gml:posList srsDimension="2">0 0 0 1 1 1 0 0</gml:posList>
            </gml:LinearRing>"#;
        let root = parse_xml_str(xml).unwrap();
        assert_eq!(root.name, "gml:LinearRing");
        assert_eq!(root.children.len(), 1);

        let pos_list = &root.children[0];
        assert_eq!(pos_list.local_name(), "posList");
        assert_eq!(pos_list.attribute("srsDimension"), Some("2"));
        assert_eq!(pos_list.text_content, "0 0 0 1 1 1 0 0");
    }

    #[test]
    fn test_prefixed_attribute_lookup() {
        let node = XmlNode::new("gml:pos").with_attribute("gml:srsDimension", "3");
        assert_eq!(node.attribute("srsDimension"), Some("3"));
        assert_eq!(node.attribute("id"), None);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let root = parse_xml_str(r#"<a z="1" y="2" x="3"/>"#).unwrap();
        let keys: Vec<&str> = root.attributes.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_text_split_by_comment() {
        let root = parse_xml_str("<posList>0 0 1<!-- split -->2 3 4</posList>").unwrap();
        assert_eq!(root.text_content, "0 0 1 2 3 4");
    }

    #[test]
    fn test_mismatched_closing_tag() {
        assert!(parse_xml_str("<a><b></a></b>").is_err());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_xml_str("").is_err());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let depth = 200_000;
        let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let err = parse_xml_str(&xml).unwrap_err();
        assert!(err.to_string().contains("nested deeper than"), "{}", err);
    }

    #[test]
    fn test_nesting_at_limit_accepted() {
        let xml = format!("{}{}", "<a>".repeat(MAX_XML_DEPTH), "</a>".repeat(MAX_XML_DEPTH));
        assert!(parse_xml_str(&xml).is_ok());

        let xml = format!("{}{}", "<a>".repeat(MAX_XML_DEPTH + 1), "</a>".repeat(MAX_XML_DEPTH + 1));
        assert!(parse_xml_str(&xml).is_err());
    }

    #[test]
    fn test_write_xml_tree() {
        let node = XmlNode::new("gml:LinearRing")
            .with_attribute("gml:id", "r1")
            .with_child(XmlNode::new("gml:posList").with_text("0 0 0 1 1 1 0 0"))
            .with_child(XmlNode::new("gml:metaDataProperty"));

        let mut out = Vec::new();
        write_xml_tree(&node, 0, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "<gml:LinearRing gml:id=\"r1\">\n  <gml:posList>\n    0 0 0 1 1 1 0 0\n  </gml:posList>\n  <gml:metaDataProperty/>\n</gml:LinearRing>\n"
        );
    }
}
