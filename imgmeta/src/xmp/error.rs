use std::sync::Arc;

/// This is an error that happened while we were parsing or building XMP.
#[derive(Clone, Debug)]
pub enum XmpError {
    /// `xmltree` failed to parse the XML.
    XmlParseError(
        // note: `Arc` allows us to impl `Clone`
        Arc<xmltree::ParseError>,
    ),

    /// `xmltree` failed to write the XML.
    XmlWriteError(Arc<xmltree::Error>),

    /// The packet wasn't UTF-8.
    NotUtf8,

    /// Initial XML scanning failed - no `rdf:RDF` element was found.
    NoRdfElement,

    /// A `lang=` prefix didn't hold a usable language tag.
    InvalidLangAlt { input: String },

    /// A property path couldn't be understood.
    BadPath { path: String },

    /// A prefix isn't in the namespace registry.
    UnknownPrefix { prefix: String },
}

impl core::fmt::Display for XmpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            XmpError::XmlParseError(e) => {
                write!(f, "Encountered error while parsing XML. err: {e}")
            }
            XmpError::XmlWriteError(e) => {
                write!(f, "Encountered error while writing XML. err: {e}")
            }
            XmpError::NotUtf8 => f.write_str("The XMP packet was not UTF-8."),
            XmpError::NoRdfElement => {
                f.write_str("The XML is missing the `rdf:RDF` element, which is required.")
            }
            XmpError::InvalidLangAlt { input } => {
                write!(f, "invalid LangAlt value: `{input}`")
            }
            XmpError::BadPath { path } => write!(f, "Bad XMP property path: `{path}`"),
            XmpError::UnknownPrefix { prefix } => {
                write!(f, "No namespace is registered for prefix `{prefix}`")
            }
        }
    }
}

impl core::error::Error for XmpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XmpError::XmlParseError(e) => Some(e.as_ref()),
            XmpError::XmlWriteError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<xmltree::ParseError> for XmpError {
    fn from(value: xmltree::ParseError) -> Self {
        XmpError::XmlParseError(value.into())
    }
}

impl From<xmltree::Error> for XmpError {
    fn from(value: xmltree::Error) -> Self {
        XmpError::XmlWriteError(value.into())
    }
}
