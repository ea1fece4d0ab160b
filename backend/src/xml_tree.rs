//! Owned, namespace-resolved element tree.
//!
//! Layout files are small enough (one page each) to load completely. The
//! tree is built from quick-xml events in one pass; elements are stored in
//! document order so that descendant queries are a filtered scan.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

/// Index of an element inside its [`XmlDocument`].
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Resolved namespace URI, `None` for elements outside any namespace.
    pub namespace: Option<String>,
    pub local_name: String,
    /// Attributes by qualified name, namespace declarations excluded.
    attributes: Vec<(String, String)>,
    /// Direct text and CDATA content, concatenated.
    text: String,
    children: Vec<NodeId>,
}

impl Element {
    fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
pub struct XmlDocument {
    elements: Vec<Element>,
}

impl XmlDocument {
    /// Parses a complete document. The error string describes why the input
    /// is not well-formed; callers attach the file path.
    pub fn parse_str(content: &str) -> Result<Self, String> {
        let mut reader = NsReader::from_str(content);

        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut seen_root = false;

        loop {
            let (namespace, event) = match reader.read_resolved_event() {
                Ok((resolved, event)) => (resolve_namespace(resolved), event),
                Err(e) => return Err(format!("{} at byte {}", e, reader.buffer_position())),
            };

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if stack.is_empty() {
                        if seen_root {
                            return Err(format!(
                                "extra content after the root element at byte {}",
                                reader.buffer_position()
                            ));
                        }
                        seen_root = true;
                    }

                    let element = Element {
                        namespace: namespace?,
                        local_name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                        attributes: read_attributes(e)?,
                        text: String::new(),
                        children: Vec::new(),
                    };

                    let id = elements.len();
                    elements.push(element);
                    if let Some(&parent) = stack.last() {
                        elements[parent].children.push(id);
                    }

                    if matches!(event, Event::Start(_)) {
                        stack.push(id);
                    }
                }
                Event::End(_) => {
                    if stack.pop().is_none() {
                        return Err(format!(
                            "closing tag without opening tag at byte {}",
                            reader.buffer_position()
                        ));
                    }
                }
                Event::Text(ref t) => {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    match stack.last() {
                        Some(&current) => elements[current].text.push_str(&text),
                        None => {
                            if !text.trim().is_empty() {
                                return Err(format!(
                                    "text outside the root element at byte {}",
                                    reader.buffer_position()
                                ));
                            }
                        }
                    }
                }
                Event::CData(c) => {
                    let bytes = c.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| e.to_string())?;
                    match stack.last() {
                        Some(&current) => elements[current].text.push_str(text),
                        None => return Err("CDATA outside the root element".to_string()),
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                // carry nothing we count.
                _ => (),
            }
        }

        if let Some(&open) = stack.last() {
            return Err(format!(
                "unexpected end of input, <{}> is not closed",
                elements[open].local_name
            ));
        }
        if !seen_root {
            return Err("no root element".to_string());
        }

        Ok(XmlDocument { elements })
    }

    pub fn root(&self) -> &Element {
        &self.elements[0]
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.elements[id]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements with the given expanded name, in document order.
    pub fn descendants<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |el| el.is(namespace, local_name))
    }

    /// Direct children of `parent` with the given expanded name.
    pub fn children<'a>(
        &'a self,
        parent: &'a Element,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        parent
            .children
            .iter()
            .map(move |&id| &self.elements[id])
            .filter(move |el| el.is(namespace, local_name))
    }
}

fn resolve_namespace(resolved: ResolveResult) -> Result<Option<String>, String> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

fn read_attributes(e: &BytesStart) -> Result<Vec<(String, String)>, String> {
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        if attributes.iter().any(|(k, _)| *k == key) {
            return Err(format!("duplicate attribute '{}'", key));
        }
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        attributes.push((key, value.into_owned()));
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    #[test]
    fn test_descendants_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <root xmlns="urn:test">
                <block id="b1"><line id="l1"/><line id="l2"/></block>
                <block id="b2"><line id="l3"/></block>
            </root>"#;

        let doc = XmlDocument::parse_str(xml).unwrap();
        let ids: Vec<&str> = doc.descendants(NS, "line").filter_map(|l| l.attr("id")).collect();
        assert_eq!(ids, vec!["l1", "l2", "l3"]);
        assert_eq!(doc.root().local_name, "root");
    }

    #[test]
    fn test_namespace_must_match() {
        let xml = r#"<root xmlns="urn:other"><line/></root>"#;
        let doc = XmlDocument::parse_str(xml).unwrap();
        assert_eq!(doc.descendants(NS, "line").count(), 0);
    }

    #[test]
    fn test_prefixed_elements_resolve() {
        let xml = r#"<t:root xmlns:t="urn:test"><t:line/><line/></t:root>"#;
        let doc = XmlDocument::parse_str(xml).unwrap();
        assert_eq!(doc.descendants(NS, "line").count(), 1);
    }

    #[test]
    fn test_children_only_direct() {
        let xml = r#"<root xmlns="urn:test">
                <line><eq><u>direct</u></eq><word><eq><u>nested</u></eq></word></line>
            </root>"#;

        let doc = XmlDocument::parse_str(xml).unwrap();
        let line = doc.descendants(NS, "line").next().unwrap();
        let texts: Vec<&str> = doc
            .children(line, NS, "eq")
            .flat_map(|eq| doc.children(eq, NS, "u"))
            .map(|u| u.text())
            .collect();
        assert_eq!(texts, vec!["direct"]);
    }

    #[test]
    fn test_text_is_unescaped() {
        let xml = r#"<root xmlns="urn:test"><u>a &amp; b<![CDATA[<c>]]></u></root>"#;
        let doc = XmlDocument::parse_str(xml).unwrap();
        let u = doc.descendants(NS, "u").next().unwrap();
        assert_eq!(u.text(), "a & b<c>");
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let xml = r#"<root xmlns="urn:test"><line CONTENT="&quot;x&quot;"/></root>"#;
        let doc = XmlDocument::parse_str(xml).unwrap();
        let line = doc.descendants(NS, "line").next().unwrap();
        assert_eq!(line.attr("CONTENT"), Some("\"x\""));
        assert_eq!(line.attr("missing"), None);
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "",
            "<root>",
            "<root></other>",
            "<root/></root>",
            "<root/><root/>",
            "<root/>trailing",
            "<x:root/>",
            "<root a=\"1\" a=\"2\"/>",
            "<root>&undefined;</root>",
        ];

        for xml in cases {
            assert!(XmlDocument::parse_str(xml).is_err(), "accepted: {:?}", xml);
        }
    }
}
