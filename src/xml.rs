//! Generic XML tree for structured sub-documents
//!
//! Bodies of `<XML>` blocks (ownership reports, XBRL instances, ...) are not
//! prose, so they are only checked for well-formedness and turned into a
//! `serde_json::Value` tree:
//!
//! - `{ "<root>": node }` at the top
//! - a node with only text becomes a string, an empty element becomes `""`
//! - child elements become keys, repeated names collapse into an array
//! - attributes become `@_name` keys, text mixed with children sits under `#text`

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const ATTRIBUTE_PREFIX: &str = "@_";
const TEXT_KEY: &str = "#text";

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<\?xml\b[^>]*\?>\r?\n?").expect("valid declaration regex"))
}

/// Remove the first `<?xml ...?>` declaration
pub fn strip_declaration(text: &str) -> String {
    declaration_regex().replace(text, "").into_owned()
}

pub fn validate(text: &str) -> bool {
    parse(text).is_ok()
}

/// Parse well-formed XML into a generic tree
pub fn parse(text: &str) -> Result<Value> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root.is_some() {
                    return Err(invalid("element after the root element"));
                }
                stack.push(Node::open(&e)?);
            }
            Ok(Event::Empty(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(invalid("element after the root element"));
                }
                let node = Node::open(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(e)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| invalid("end tag without a start tag"))?;
                if node.name.as_bytes() != e.name().as_ref() {
                    return Err(invalid(format!(
                        "expected </{}>, found </{}>",
                        node.name,
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| invalid(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(invalid(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(invalid(format!("unclosed element <{}>", open.name)));
    }

    let (name, value) = root.ok_or_else(|| invalid("no root element"))?;
    let mut tree = Map::new();
    tree.insert(name, value);
    Ok(Value::Object(tree))
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidXml(message.into())
}

fn push_text(stack: &mut [Node], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(invalid("text outside the root element")),
    }
}

fn attach(stack: &mut [Node], root: &mut Option<(String, Value)>, node: Node) -> Result<()> {
    let (name, value) = node.into_value();
    match stack.last_mut() {
        Some(parent) => parent.children.push((name, value)),
        None if root.is_some() => return Err(invalid("more than one root element")),
        None => *root = Some((name, value)),
    }
    Ok(())
}

struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Node {
    fn open(start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| invalid(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| invalid(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, Value) {
        if self.children.is_empty() && self.attributes.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = Map::new();
        for (key, value) in self.attributes {
            object.insert(format!("{}{}", ATTRIBUTE_PREFIX, key), Value::String(value));
        }
        for (key, value) in self.children {
            match object.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    object.insert(key, value);
                }
            }
        }
        if !self.text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }

        (self.name, Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_declaration() {
        let text = "<?xml version=\"1.0\"?>\n<doc/>\n";
        assert_eq!(strip_declaration(text), "<doc/>\n");
        assert_eq!(strip_declaration("<doc/>"), "<doc/>");
    }

    #[test]
    fn test_parse_tree_shape() {
        let text = r#"<ownershipDocument>
  <schemaVersion>X0306</schemaVersion>
  <issuer>
    <issuerCik>0000012345</issuerCik>
    <issuerName>ACME CORP</issuerName>
  </issuer>
  <footnote id="F1">Held &amp; owned</footnote>
  <footnote id="F2">Indirect</footnote>
  <remarks/>
</ownershipDocument>"#;

        let tree = parse(text).unwrap();
        assert_eq!(
            tree,
            json!({
                "ownershipDocument": {
                    "schemaVersion": "X0306",
                    "issuer": {
                        "issuerCik": "0000012345",
                        "issuerName": "ACME CORP"
                    },
                    "footnote": [
                        { "@_id": "F1", "#text": "Held & owned" },
                        { "@_id": "F2", "#text": "Indirect" }
                    ],
                    "remarks": ""
                }
            })
        );
    }

    #[test]
    fn test_rejects_malformed_xml() {
        assert!(!validate("<a><b></a>"));
        assert!(!validate("<a>"));
        assert!(!validate("<a/><b/>"));
        assert!(!validate("just text"));
        assert!(!validate(""));
        assert!(validate("<a><b>1</b></a>"));
    }
}
