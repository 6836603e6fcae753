//! Guesses the shape of an RDF/XML element.
//!
//! RDF/XML allows several spellings for the same thing (a struct can be
//! `rdf:parseType="Resource"`, a nested `rdf:Description`, or just a pile of
//! attributes), so the parser asks these questions instead of matching on
//! one form.

use imgmeta_types::xmp::{RDF_NS, XML_NS, XmpKind};
use xmltree::Element;

pub(crate) trait XmpElementHeuristicsExt {
    fn is_rdf(&self, name: &str) -> bool;
    fn is_struct(&self) -> bool;
    fn collection(&self) -> Option<(&Element, XmpKind)>;
    fn lang(&self) -> Option<&str>;
    fn is_simple_item(&self) -> bool;
    fn child_elements(&self) -> impl Iterator<Item = &Element>;
}

impl XmpElementHeuristicsExt for Element {
    /// Whether this is `rdf:<name>`.
    fn is_rdf(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(RDF_NS)
    }

    /// Determines whether or not `self` is a struct.
    fn is_struct(&self) -> bool {
        // `rdf:parseType="Resource"` always means a struct
        if self.attributes.iter().any(|(key, value)| {
            key.local_name == "parseType"
                && key.namespace_ref().is_some_and(|ns| ns == RDF_NS)
                && value == "Resource"
        }) {
            return true;
        }

        // a nested `rdf:Description` carries the fields
        if self.child_elements().any(|c| c.is_rdf("Description")) {
            return true;
        }

        // fields as attributes, and nothing inside
        if self.children.is_empty()
            && self.attributes.iter().any(|(key, _)| {
                key.namespace_ref()
                    .is_some_and(|ns| ns != RDF_NS && ns != XML_NS)
            })
        {
            return true;
        }

        // plain child elements (that aren't rdf containers) are fields, too
        self.child_elements().next().is_some() && self.collection().is_none()
    }

    /// Finds an `rdf:Bag`, `rdf:Seq`, or `rdf:Alt` inside.
    ///
    /// An `rdf:Alt` whose items all have `xml:lang` is a [`XmpKind::LangAlt`].
    fn collection(&self) -> Option<(&Element, XmpKind)> {
        self.child_elements().find_map(|c| {
            if c.namespace.as_deref() != Some(RDF_NS) {
                return None;
            }

            let kind = match c.name.as_str() {
                "Bag" => XmpKind::Bag,
                "Seq" => XmpKind::Seq,
                "Alt" => {
                    let mut items = c.child_elements().filter(|li| li.is_rdf("li")).peekable();
                    let all_lang = items.peek().is_some() && items.all(|li| li.lang().is_some());
                    if all_lang { XmpKind::LangAlt } else { XmpKind::Alt }
                }
                _ => return None,
            };
            Some((c, kind))
        })
    }

    /// The `xml:lang` attribute.
    fn lang(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| {
                key.local_name == "lang"
                    && (key.namespace_ref().is_some_and(|ns| ns == XML_NS)
                        || key.prefix.as_deref() == Some("xml"))
            })
            .map(|(_, value)| value.as_str())
    }

    /// Whether an `rdf:li` holds plain text.
    fn is_simple_item(&self) -> bool {
        !self.is_struct() && self.collection().is_none()
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| c.as_element())
    }
}
