//! Reads an RDF/XML packet into flattened [`Xmpdatum`]s.

use imgmeta_types::xmp::{RDF_NS, X_NS, XML_NS, XmpKind};
use xmltree::Element;

use crate::{
    error::{Warning, warn},
    xmp::{
        XmpKey, XmpValue, Xmpdatum,
        error::XmpError,
        heuristics::XmpElementHeuristicsExt as _,
        namespaces,
    },
};

/// Parses a whole packet.
pub(crate) fn parse_packet(
    packet: &str,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<Xmpdatum>, XmpError> {
    // containers often pad packets with NULs
    let trimmed = packet.trim_end_matches(['\0', ' ', '\n', '\r', '\t']);
    let trimmed = trimmed.trim_start_matches('\u{feff}');

    let document = Element::parse(trimmed.as_bytes()).map_err(|e| {
        log::error!("Failed to parse XMP as XML. err: {e}");
        XmpError::from(e)
    })?;

    // `x:xmpmeta` is optional, and may be the root itself
    let parent = if document.name == "xmpmeta" && document.namespace.as_deref() == Some(X_NS) {
        &document
    } else {
        document
            .get_child("xmpmeta")
            .filter(|c| c.namespace.as_deref() == Some(X_NS))
            .inspect(|_| log::trace!("found an `x:xmpmeta` element."))
            .unwrap_or(&document)
    };

    let rdf = if parent.is_rdf("RDF") {
        parent
    } else {
        parent
            .child_elements()
            .find(|c| c.is_rdf("RDF"))
            .ok_or_else(|| {
                log::error!("Couldn't find an `rdf:RDF` element in the document.");
                XmpError::NoRdfElement
            })?
    };

    let mut out = Vec::new();
    for description in rdf.child_elements() {
        if !description.is_rdf("Description") {
            warn(
                warnings,
                format!(
                    "skipping unexpected `{}` element in `rdf:RDF`",
                    description.name
                ),
            );
            continue;
        }

        // attributes are simple properties. sorted, since the map isn't
        // ordered
        let mut attributes: Vec<(String, String, String, String)> = description
            .attributes
            .iter()
            .filter_map(|(key, value)| {
                let ns = key.namespace_ref()?;
                if ns == RDF_NS || ns == XML_NS {
                    return None;
                }
                Some((
                    ns.to_string(),
                    key.prefix.clone().unwrap_or_default(),
                    key.local_name.clone(),
                    value.clone(),
                ))
            })
            .collect();
        attributes.sort();

        for (ns, prefix, name, value) in attributes {
            let prefix = namespaces::learn(&ns, Some(prefix.as_str()));
            out.push(Xmpdatum::new(XmpKey::new(prefix, name), XmpValue::Text(value)));
        }

        for property in description.child_elements() {
            let Some(ns) = property.namespace.as_deref() else {
                warn(
                    warnings,
                    format!("XMP property `{}` has no namespace; skipping it", property.name),
                );
                continue;
            };
            let prefix = namespaces::learn(ns, property.prefix.as_deref());
            flatten(property, &prefix, property.name.clone(), &mut out, warnings);
        }
    }

    Ok(out)
}

/// Turns one property element (and everything inside it) into datums.
fn flatten(
    element: &Element,
    prefix: &str,
    path: String,
    out: &mut Vec<Xmpdatum>,
    warnings: &mut Vec<Warning>,
) {
    log::trace!("flattening XMP property `{prefix}.{path}`");
    let key = XmpKey::new(prefix, path.clone());

    if let Some((container, kind)) = element.collection() {
        let items: Vec<&Element> = container
            .child_elements()
            .filter(|li| li.is_rdf("li"))
            .collect();

        if kind == XmpKind::LangAlt {
            let mut value = XmpValue::LangAlt(Vec::new());
            for li in &items {
                if let Some(lang) = li.lang() {
                    let text = li.get_text().unwrap_or_default();
                    if let XmpValue::LangAlt(langs) = &mut value {
                        langs.push((lang.to_string(), text.into_owned()));
                    }
                }
            }
            if let XmpValue::LangAlt(langs) = &mut value {
                langs.sort_by_key(|(l, _)| l != "x-default");
            }
            out.push(Xmpdatum::new(key, value));
            return;
        }

        if items.iter().all(|li| li.is_simple_item()) {
            let items = items
                .iter()
                .map(|li| li.get_text().unwrap_or_default().into_owned())
                .collect();
            out.push(Xmpdatum::new(key, XmpValue::Array { kind, items }));
            return;
        }

        // items with structure get their own paths
        out.push(Xmpdatum::new(
            key,
            XmpValue::Array {
                kind,
                items: Vec::new(),
            },
        ));
        for (i, li) in items.iter().enumerate() {
            let item_path = format!("{path}[{}]", i + 1);
            if li.is_simple_item() {
                let text = li.get_text().unwrap_or_default().into_owned();
                out.push(Xmpdatum::new(XmpKey::new(prefix, item_path), XmpValue::Text(text)));
            } else {
                flatten(li, prefix, item_path, out, warnings);
            }
        }
        return;
    }

    if element.is_struct() {
        out.push(Xmpdatum::new(key, XmpValue::Struct));
        flatten_fields(element, prefix, &path, out, warnings);
        return;
    }

    // `rdf:resource` is a URI value with no text
    let resource = element
        .attributes
        .iter()
        .find(|(k, _)| k.local_name == "resource" && k.namespace_ref().is_some_and(|ns| ns == RDF_NS))
        .map(|(_, v)| v.clone());

    let text = resource.unwrap_or_else(|| element.get_text().unwrap_or_default().into_owned());
    out.push(Xmpdatum::new(key, XmpValue::Text(text)));
}

/// Flattens a struct's fields under `path`.
fn flatten_fields(
    element: &Element,
    prefix: &str,
    path: &str,
    out: &mut Vec<Xmpdatum>,
    warnings: &mut Vec<Warning>,
) {
    // fields may sit on the element, or on a nested `rdf:Description`
    let holders: Vec<&Element> = match element.child_elements().find(|c| c.is_rdf("Description")) {
        Some(description) => vec![element, description],
        None => vec![element],
    };

    for holder in holders {
        let mut attributes: Vec<(String, String, String, String)> = holder
            .attributes
            .iter()
            .filter_map(|(key, value)| {
                let ns = key.namespace_ref()?;
                (ns != RDF_NS && ns != XML_NS).then(|| {
                    (
                        ns.to_string(),
                        key.prefix.clone().unwrap_or_default(),
                        key.local_name.clone(),
                        value.clone(),
                    )
                })
            })
            .collect();
        attributes.sort();

        for (ns, field_prefix, name, value) in attributes {
            let field_prefix = namespaces::learn(&ns, Some(field_prefix.as_str()));
            out.push(Xmpdatum::new(
                XmpKey::new(prefix, format!("{path}/{field_prefix}:{name}")),
                XmpValue::Text(value),
            ));
        }

        for field in holder.child_elements() {
            if field.is_rdf("Description") {
                continue;
            }
            let Some(ns) = field.namespace.as_deref() else {
                warn(
                    warnings,
                    format!("XMP field `{}` has no namespace; skipping it", field.name),
                );
                continue;
            };

            let field_prefix = namespaces::learn(ns, field.prefix.as_deref());
            flatten(
                field,
                prefix,
                format!("{path}/{field_prefix}:{}", field.name),
                out,
                warnings,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    const PACKET: &str = r#"<?xpacket begin="﻿" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about=""
        xmlns:dc="http://purl.org/dc/elements/1.1/"
        xmlns:xmp="http://ns.adobe.com/xap/1.0/"
        xmlns:xmpMM="http://ns.adobe.com/xap/1.0/mm/"
        xmlns:stEvt="http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"
        xmp:Rating="5">
      <dc:title>
        <rdf:Alt>
          <rdf:li xml:lang="en-US">A cat</rdf:li>
          <rdf:li xml:lang="x-default">A cat</rdf:li>
        </rdf:Alt>
      </dc:title>
      <dc:subject>
        <rdf:Bag>
          <rdf:li>cat</rdf:li>
          <rdf:li>sleepy</rdf:li>
        </rdf:Bag>
      </dc:subject>
      <xmpMM:History>
        <rdf:Seq>
          <rdf:li rdf:parseType="Resource">
            <stEvt:action>created</stEvt:action>
            <stEvt:when>2024-01-02T03:04:05Z</stEvt:when>
          </rdf:li>
          <rdf:li stEvt:action="saved"/>
        </rdf:Seq>
      </xmpMM:History>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

    #[test]
    fn flattens_a_packet() {
        logger();
        let mut warnings = Vec::new();
        let datums = parse_packet(PACKET, &mut warnings).unwrap();
        assert!(warnings.is_empty());

        let listing: Vec<(String, &str, String)> = datums
            .iter()
            .map(|d| (d.key().to_string(), d.type_name(), d.value().to_string()))
            .collect();

        assert_eq!(
            listing,
            [
                ("Xmp.xmp.Rating".into(), "XmpText", "5".into()),
                (
                    "Xmp.dc.title".into(),
                    "LangAlt",
                    "lang=\"x-default\" A cat, lang=\"en-US\" A cat".into()
                ),
                ("Xmp.dc.subject".into(), "XmpBag", "cat, sleepy".into()),
                ("Xmp.xmpMM.History".into(), "XmpSeq", "".into()),
                ("Xmp.xmpMM.History[1]".into(), "Struct", "".into()),
                ("Xmp.xmpMM.History[1]/stEvt:action".into(), "XmpText", "created".into()),
                (
                    "Xmp.xmpMM.History[1]/stEvt:when".into(),
                    "XmpText",
                    "2024-01-02T03:04:05Z".into()
                ),
                ("Xmp.xmpMM.History[2]".into(), "Struct", "".into()),
                ("Xmp.xmpMM.History[2]/stEvt:action".into(), "XmpText", "saved".into()),
            ]
        );
    }

    #[test]
    fn bare_rdf_roots_are_fine() {
        logger();
        let datums = parse_packet(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description rdf:about="" xmlns:ns="ns:myName/" /></rdf:RDF>"#,
            &mut Vec::new(),
        )
        .unwrap();
        assert!(datums.is_empty());
    }

    #[test]
    fn unknown_namespaces_are_learned() {
        logger();
        let datums = parse_packet(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
                <rdf:Description xmlns:my_ns="https://example.com/ns/parse-test/">
                    <my_ns:Thing>hi</my_ns:Thing>
                </rdf:Description>
            </rdf:RDF>"#,
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(datums[0].key().to_string(), "Xmp.my_ns.Thing");
        assert_eq!(
            namespaces::namespace_uri("my_ns").as_deref(),
            Some("https://example.com/ns/parse-test/")
        );
    }

    #[test]
    fn broken_packets() {
        logger();
        assert!(matches!(
            parse_packet("<not xml", &mut Vec::new()),
            Err(XmpError::XmlParseError(_))
        ));
        assert!(matches!(
            parse_packet("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"/>", &mut Vec::new()),
            Err(XmpError::NoRdfElement)
        ));
    }
}
