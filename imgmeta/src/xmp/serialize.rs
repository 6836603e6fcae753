//! Rebuilds an RDF/XML packet from flattened datums.

use std::collections::BTreeSet;

use imgmeta_types::xmp::{RDF_NS, X_NS, XML_NS, XmpKind};
use xmltree::{AttributeName, Element, EmitterConfig, Namespace, XMLNode};

use crate::xmp::{XmpValue, Xmpdatum, error::XmpError, namespaces};

/// The standard packet header.
const HEADER: &str = "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n";

/// The standard (writable) packet trailer.
const TRAILER: &str = "<?xpacket end=\"w\"?>";

/// Whitespace after the packet, so it can grow in place later.
const PADDING_LINES: usize = 20;

/// A property in the rebuilt tree.
#[derive(Debug)]
enum Node {
    Text(String),
    Array { kind: XmpKind, items: Vec<Node> },
    LangAlt(Vec<(String, String)>),
    Struct(Vec<Field>),
}

#[derive(Debug)]
struct Field {
    prefix: String,
    name: String,
    node: Node,
}

/// One step of a path like `History[2]/stEvt:when`.
#[derive(Debug, PartialEq)]
struct Step<'p> {
    /// `None` for the first step, which uses the key's prefix.
    prefix: Option<&'p str>,
    name: &'p str,
    index: Option<usize>,
}

fn steps(path: &str) -> Result<Vec<Step<'_>>, XmpError> {
    let bad = || XmpError::BadPath { path: path.into() };

    path.split('/')
        .enumerate()
        .map(|(i, part)| {
            let (qualified, index) = match part.split_once('[') {
                Some((q, rest)) => {
                    let n: usize = rest
                        .strip_suffix(']')
                        .and_then(|n| n.parse().ok())
                        .filter(|n| *n > 0)
                        .ok_or_else(bad)?;
                    (q, Some(n))
                }
                None => (part, None),
            };

            let (prefix, name) = match (i, qualified.split_once(':')) {
                (0, None) => (None, qualified),
                (_, Some((p, n))) if i > 0 => (Some(p), n),
                _ => return Err(bad()),
            };
            if name.is_empty() {
                return Err(bad());
            }

            Ok(Step {
                prefix,
                name,
                index,
            })
        })
        .collect()
}

impl Node {
    fn from_value(value: &XmpValue) -> Self {
        match value {
            XmpValue::Text(t) => Node::Text(t.clone()),
            XmpValue::Array { kind, items } => Node::Array {
                kind: *kind,
                items: items.iter().map(|i| Node::Text(i.clone())).collect(),
            },
            XmpValue::LangAlt(langs) => Node::LangAlt(langs.clone()),
            XmpValue::Struct => Node::Struct(Vec::new()),
        }
    }
}

/// Places one datum into the tree.
fn insert(fields: &mut Vec<Field>, prefix: &str, steps: &[Step<'_>], value: &XmpValue) {
    let Some((step, rest)) = steps.split_first() else {
        return;
    };
    let prefix = step.prefix.unwrap_or(prefix);

    let position = fields
        .iter()
        .position(|f| f.prefix == prefix && f.name == step.name);
    let field = match position {
        Some(i) => &mut fields[i],
        None => {
            fields.push(Field {
                prefix: prefix.into(),
                name: step.name.into(),
                node: Node::Struct(Vec::new()),
            });
            let last = fields.len() - 1;
            &mut fields[last]
        }
    };

    match step.index {
        None if rest.is_empty() => {
            // a marker shouldn't wipe out children that came first
            let keep = matches!(
                (&field.node, value),
                (Node::Struct(_), XmpValue::Struct)
            ) || matches!(
                (&field.node, value),
                (Node::Array { kind, items }, XmpValue::Array { kind: k, items: i })
                    if kind == k && i.is_empty() && !items.is_empty()
            );
            if !keep {
                field.node = Node::from_value(value);
            }
        }
        None => {
            if !matches!(field.node, Node::Struct(_)) {
                field.node = Node::Struct(Vec::new());
            }
            if let Node::Struct(children) = &mut field.node {
                insert(children, prefix, rest, value);
            }
        }
        Some(n) => {
            if !matches!(field.node, Node::Array { .. }) {
                field.node = Node::Array {
                    kind: XmpKind::Seq,
                    items: Vec::new(),
                };
            }
            let Node::Array { items, .. } = &mut field.node else {
                return;
            };
            while items.len() < n {
                items.push(Node::Text(String::new()));
            }

            let item = &mut items[n - 1];
            if rest.is_empty() {
                *item = Node::from_value(value);
            } else {
                if !matches!(item, Node::Struct(_)) {
                    *item = Node::Struct(Vec::new());
                }
                if let Node::Struct(children) = item {
                    insert(children, prefix, rest, value);
                }
            }
        }
    }
}

/// Builds the property tree from the datums.
fn tree(datums: &[Xmpdatum]) -> Result<Vec<Field>, XmpError> {
    let mut fields = Vec::new();
    for d in datums {
        let steps = steps(d.path())?;
        insert(&mut fields, d.prefix(), &steps, d.value());
    }
    Ok(fields)
}

/// Collects every prefix the tree uses.
fn collect_prefixes(fields: &[Field], out: &mut BTreeSet<String>) {
    for f in fields {
        out.insert(f.prefix.clone());
        match &f.node {
            Node::Struct(children) => collect_prefixes(children, out),
            Node::Array { items, .. } => {
                for item in items {
                    if let Node::Struct(children) = item {
                        collect_prefixes(children, out);
                    }
                }
            }
            Node::Text(_) | Node::LangAlt(_) => (),
        }
    }
}

fn element(prefix: &str, name: &str) -> Element {
    let mut e = Element::new(name);
    e.prefix = Some(prefix.into());
    e.namespace = namespaces::namespace_uri(prefix).or_else(|| match prefix {
        "rdf" => Some(RDF_NS.into()),
        "x" => Some(X_NS.into()),
        _ => None,
    });
    e
}

fn attribute(prefix: &str, name: &str, uri: &str) -> AttributeName {
    AttributeName {
        local_name: name.into(),
        namespace: Some(uri.into()),
        prefix: Some(prefix.into()),
    }
}

fn text_element(mut e: Element, text: &str) -> Element {
    if !text.is_empty() {
        e.children.push(XMLNode::Text(text.into()));
    }
    e
}

/// Makes the XML for one node, wrapped in `wrapper`.
fn node_element(mut wrapper: Element, node: &Node) -> Element {
    match node {
        Node::Text(t) => text_element(wrapper, t),

        Node::Struct(fields) => {
            wrapper
                .attributes
                .insert(attribute("rdf", "parseType", RDF_NS), "Resource".into());
            for f in fields {
                let child = node_element(element(&f.prefix, &f.name), &f.node);
                wrapper.children.push(XMLNode::Element(child));
            }
            wrapper
        }

        Node::Array { kind, items } => {
            let container = kind.rdf_container().unwrap_or("Seq");
            let mut array = element("rdf", container);
            for item in items {
                let li = node_element(element("rdf", "li"), item);
                array.children.push(XMLNode::Element(li));
            }
            wrapper.children.push(XMLNode::Element(array));
            wrapper
        }

        Node::LangAlt(langs) => {
            let mut alt = element("rdf", "Alt");
            for (lang, text) in langs {
                let mut li = element("rdf", "li");
                li.attributes
                    .insert(attribute("xml", "lang", XML_NS), lang.clone());
                alt.children.push(XMLNode::Element(text_element(li, text)));
            }
            wrapper.children.push(XMLNode::Element(alt));
            wrapper
        }
    }
}

/// Writes a whole packet.
pub(crate) fn packet(datums: &[Xmpdatum]) -> Result<String, XmpError> {
    let fields = tree(datums)?;

    let mut prefixes = BTreeSet::new();
    collect_prefixes(&fields, &mut prefixes);

    let mut ns = Namespace::empty();
    ns.put("x", X_NS);
    ns.put("rdf", RDF_NS);
    for prefix in &prefixes {
        let uri = namespaces::namespace_uri(prefix).ok_or_else(|| XmpError::UnknownPrefix {
            prefix: prefix.clone(),
        })?;
        ns.put(prefix.as_str(), uri);
    }

    let mut description = element("rdf", "Description");
    description
        .attributes
        .insert(attribute("rdf", "about", RDF_NS), String::new());
    for f in &fields {
        let child = node_element(element(&f.prefix, &f.name), &f.node);
        description.children.push(XMLNode::Element(child));
    }

    let mut rdf = element("rdf", "RDF");
    rdf.children.push(XMLNode::Element(description));

    let mut root = element("x", "xmpmeta");
    root.namespaces = Some(ns);
    root.attributes.insert(
        attribute("x", "xmptk", X_NS),
        concat!("imgmeta ", env!("CARGO_PKG_VERSION")).into(),
    );
    root.children.push(XMLNode::Element(rdf));

    let mut xml = Vec::new();
    root.write_with_config(
        &mut xml,
        EmitterConfig::new()
            .write_document_declaration(false)
            .perform_indent(true),
    )?;
    let xml = String::from_utf8(xml).map_err(|_| XmpError::NotUtf8)?;

    let mut out = String::with_capacity(HEADER.len() + xml.len() + PADDING_LINES * 101 + 32);
    out.push_str(HEADER);
    out.push_str(&xml);
    out.push('\n');
    for _ in 0..PADDING_LINES {
        out.push_str(&" ".repeat(100));
        out.push('\n');
    }
    out.push_str(TRAILER);

    log::debug!("wrote an XMP packet of `{}` bytes", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        util::logger,
        xmp::{XmpData, XmpKey},
    };

    #[test]
    fn paths() {
        assert_eq!(
            steps("History[2]/stEvt:when").unwrap(),
            [
                Step {
                    prefix: None,
                    name: "History",
                    index: Some(2)
                },
                Step {
                    prefix: Some("stEvt"),
                    name: "when",
                    index: None
                },
            ]
        );
        assert!(steps("History[0]").is_err());
        assert!(steps("History/when").is_err());
        assert!(steps("a:b").is_err());
    }

    #[test]
    fn round_trips_nested_values() {
        logger();
        let key = |s: &str| s.parse::<XmpKey>().unwrap();

        let mut xmp = XmpData::new();
        xmp.set_str("Xmp.dc.title", None, "lang=x-default Ünïcödé title")
            .unwrap();
        xmp.set_str("Xmp.dc.subject", None, "cat").unwrap();
        xmp.add_str("Xmp.dc.subject", None, "dog").unwrap();
        xmp.set_str("Xmp.xmp.Rating", None, "5").unwrap();
        xmp.add(Xmpdatum::new(
            key("Xmp.xmpMM.History"),
            XmpValue::Array {
                kind: XmpKind::Seq,
                items: vec![],
            },
        ));
        xmp.add(Xmpdatum::new(key("Xmp.xmpMM.History[1]"), XmpValue::Struct));
        xmp.add(Xmpdatum::new(
            key("Xmp.xmpMM.History[1]/stEvt:action"),
            XmpValue::Text("saved".into()),
        ));

        let packet = xmp.to_packet().unwrap();
        assert!(packet.starts_with("<?xpacket begin="));
        assert!(packet.ends_with("<?xpacket end=\"w\"?>"));

        let (back, warnings) = XmpData::parse(&packet).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");

        let listed: Vec<(String, String)> = back
            .iter()
            .map(|d| (d.key().to_string(), d.value().to_string()))
            .collect();
        let expected: Vec<(String, String)> = xmp
            .iter()
            .map(|d| (d.key().to_string(), d.value().to_string()))
            .collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn unknown_prefixes_fail() {
        let datums = [Xmpdatum::new(
            XmpKey::new("definitelyNotRegistered", "x"),
            XmpValue::Text("y".into()),
        )];
        assert!(matches!(
            packet(&datums),
            Err(XmpError::UnknownPrefix { .. })
        ));
    }
}
