//! Well-known XMP namespaces and the shape of well-known properties.
//!
//! XMP itself doesn't say whether `dc:subject` is a bag or a sequence. The
//! packet does, but a caller adding a new property through a key like
//! `Xmp.dc.subject` has no packet to look at. So, we keep a small table of
//! properties whose kind is fixed by their schema.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// A namespace that's known before any packet is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceInfo {
    pub prefix: &'static str,
    pub uri: &'static str,
    pub desc: &'static str,
}

/// The XML namespace used by `xml:lang`.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// The RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// The `x:xmpmeta` wrapper namespace.
pub const X_NS: &str = "adobe:ns:meta/";

macro_rules! namespaces {
    ($( $prefix:literal => $uri:literal, $desc:literal; )+) => {
        /// Every namespace we know out of the box.
        pub static BUILTIN_NAMESPACES: &[NamespaceInfo] = &[
            $( NamespaceInfo { prefix: $prefix, uri: $uri, desc: $desc }, )+
        ];
    };
}

namespaces! {
    "dc" => "http://purl.org/dc/elements/1.1/", "Dublin Core schema";
    "xmp" => "http://ns.adobe.com/xap/1.0/", "XMP Basic schema";
    "xmpRights" => "http://ns.adobe.com/xap/1.0/rights/", "XMP Rights Management schema";
    "xmpMM" => "http://ns.adobe.com/xap/1.0/mm/", "XMP Media Management schema";
    "xmpBJ" => "http://ns.adobe.com/xap/1.0/bj/", "XMP Basic Job Ticket schema";
    "xmpTPg" => "http://ns.adobe.com/xap/1.0/t/pg/", "XMP Paged-Text schema";
    "xmpDM" => "http://ns.adobe.com/xmp/1.0/DynamicMedia/", "XMP Dynamic Media schema";
    "xmpNote" => "http://ns.adobe.com/xmp/note/", "XMP Note schema";
    "xmpG" => "http://ns.adobe.com/xap/1.0/g/", "Colorant structure";
    "xmpGImg" => "http://ns.adobe.com/xap/1.0/g/img/", "Thumbnail structure";
    "stEvt" => "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#", "Resource Event structure";
    "stRef" => "http://ns.adobe.com/xap/1.0/sType/ResourceRef#", "Resource Reference structure";
    "stVer" => "http://ns.adobe.com/xap/1.0/sType/Version#", "Version structure";
    "stJob" => "http://ns.adobe.com/xap/1.0/sType/Job#", "Job structure";
    "stDim" => "http://ns.adobe.com/xap/1.0/sType/Dimensions#", "Dimensions structure";
    "exif" => "http://ns.adobe.com/exif/1.0/", "Exif schema for Exif-specific properties";
    "exifEX" => "http://cipa.jp/exif/1.0/", "Exif schema for additional Exif properties";
    "tiff" => "http://ns.adobe.com/tiff/1.0/", "Exif schema for TIFF properties";
    "aux" => "http://ns.adobe.com/exif/1.0/aux/", "Exif schema for additional Exif properties";
    "photoshop" => "http://ns.adobe.com/photoshop/1.0/", "Adobe Photoshop schema";
    "crs" => "http://ns.adobe.com/camera-raw-settings/1.0/", "Camera Raw schema";
    "crss" => "http://ns.adobe.com/camera-raw-saved-settings/1.0/", "Camera Raw Saved Settings";
    "pdf" => "http://ns.adobe.com/pdf/1.3/", "Adobe PDF schema";
    "lr" => "http://ns.adobe.com/lightroom/1.0/", "Adobe Lightroom schema";
    "Iptc4xmpCore" => "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/", "IPTC Core schema";
    "Iptc4xmpExt" => "http://iptc.org/std/Iptc4xmpExt/2008-02-29/", "IPTC Extension schema";
    "plus" => "http://ns.useplus.org/ldf/xmp/1.0/", "PLUS License Data Format schema";
    "dwc" => "http://rs.tdwg.org/dwc/index.htm", "Darwin Core schema";
    "GPano" => "http://ns.google.com/photos/1.0/panorama/", "Google Photo Sphere schema";
    "GCamera" => "http://ns.google.com/photos/1.0/camera/", "Google Camera schema";
    "GDepth" => "http://ns.google.com/photos/1.0/depthmap/", "Google Depth Map schema";
    "MicrosoftPhoto" => "http://ns.microsoft.com/photo/1.0/", "Microsoft Photo schema";
    "mwg-rs" => "http://www.metadataworkinggroup.com/schemas/regions/", "Metadata Working Group Regions schema";
    "mwg-kw" => "http://www.metadataworkinggroup.com/schemas/keywords/", "Metadata Working Group Keywords schema";
    "digiKam" => "http://www.digikam.org/ns/1.0/", "digiKam Photo Management schema";
    "acdsee" => "http://ns.acdsee.com/iptc/1.0/", "ACDSee XMP schema";
    "rdf" => "http://www.w3.org/1999/02/22-rdf-syntax-ns#", "RDF syntax";
    "x" => "adobe:ns:meta/", "XMP wrapper";
}

static BY_PREFIX: LazyLock<FxHashMap<&'static str, &'static NamespaceInfo>> =
    LazyLock::new(|| BUILTIN_NAMESPACES.iter().map(|n| (n.prefix, n)).collect());

static BY_URI: LazyLock<FxHashMap<&'static str, &'static NamespaceInfo>> =
    LazyLock::new(|| BUILTIN_NAMESPACES.iter().map(|n| (n.uri, n)).collect());

/// Finds a built-in namespace by its prefix.
///
/// ```
/// use imgmeta_types::xmp;
///
/// assert_eq!(
///     xmp::builtin_by_prefix("dc").map(|n| n.uri),
///     Some("http://purl.org/dc/elements/1.1/"),
/// );
/// ```
pub fn builtin_by_prefix(prefix: &str) -> Option<&'static NamespaceInfo> {
    BY_PREFIX.get(prefix).copied()
}

/// Finds a built-in namespace by its URI.
pub fn builtin_by_uri(uri: &str) -> Option<&'static NamespaceInfo> {
    BY_URI.get(uri).copied()
}

/// The kinds of value an XMP property can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XmpKind {
    /// A simple text value.
    Text,

    /// An `rdf:Alt` of plain items.
    Alt,

    /// An unordered `rdf:Bag`.
    Bag,

    /// An ordered `rdf:Seq`.
    Seq,

    /// An `rdf:Alt` whose items are tagged with `xml:lang`.
    LangAlt,

    /// A structure with named fields.
    Struct,
}

impl XmpKind {
    /// The name printed for values of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            XmpKind::Text => "XmpText",
            XmpKind::Alt => "XmpAlt",
            XmpKind::Bag => "XmpBag",
            XmpKind::Seq => "XmpSeq",
            XmpKind::LangAlt => "LangAlt",
            XmpKind::Struct => "Struct",
        }
    }

    /// Finds a kind by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            XmpKind::Text,
            XmpKind::Alt,
            XmpKind::Bag,
            XmpKind::Seq,
            XmpKind::LangAlt,
            XmpKind::Struct,
        ]
        .into_iter()
        .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Whether values of this kind are arrays.
    pub const fn is_array(&self) -> bool {
        matches!(
            self,
            XmpKind::Alt | XmpKind::Bag | XmpKind::Seq | XmpKind::LangAlt
        )
    }

    /// The RDF container element for array kinds.
    pub const fn rdf_container(&self) -> Option<&'static str> {
        match self {
            XmpKind::Alt | XmpKind::LangAlt => Some("Alt"),
            XmpKind::Bag => Some("Bag"),
            XmpKind::Seq => Some("Seq"),
            XmpKind::Text | XmpKind::Struct => None,
        }
    }
}

impl core::fmt::Display for XmpKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Properties whose kind is fixed by their schema: `(prefix, name, kind)`.
pub static PROPERTY_KINDS: &[(&str, &str, XmpKind)] = &[
    // dublin core
    ("dc", "contributor", XmpKind::Bag),
    ("dc", "creator", XmpKind::Seq),
    ("dc", "date", XmpKind::Seq),
    ("dc", "description", XmpKind::LangAlt),
    ("dc", "language", XmpKind::Bag),
    ("dc", "publisher", XmpKind::Bag),
    ("dc", "relation", XmpKind::Bag),
    ("dc", "rights", XmpKind::LangAlt),
    ("dc", "subject", XmpKind::Bag),
    ("dc", "title", XmpKind::LangAlt),
    ("dc", "type", XmpKind::Bag),
    // xmp basic
    ("xmp", "Identifier", XmpKind::Bag),
    ("xmp", "Advisory", XmpKind::Bag),
    ("xmp", "Thumbnails", XmpKind::Alt),
    // rights
    ("xmpRights", "Owner", XmpKind::Bag),
    ("xmpRights", "UsageTerms", XmpKind::LangAlt),
    // media management
    ("xmpMM", "History", XmpKind::Seq),
    ("xmpMM", "Ingredients", XmpKind::Bag),
    ("xmpMM", "Pantry", XmpKind::Bag),
    ("xmpMM", "Versions", XmpKind::Seq),
    ("xmpMM", "DerivedFrom", XmpKind::Struct),
    ("xmpMM", "ManagedFrom", XmpKind::Struct),
    // exif and tiff
    ("exif", "ISOSpeedRatings", XmpKind::Seq),
    ("exif", "ComponentsConfiguration", XmpKind::Seq),
    ("exif", "SubjectArea", XmpKind::Seq),
    ("exif", "SubjectLocation", XmpKind::Seq),
    ("exif", "UserComment", XmpKind::LangAlt),
    ("exif", "Flash", XmpKind::Struct),
    ("exif", "OECF", XmpKind::Struct),
    ("exifEX", "LensSpecification", XmpKind::Seq),
    ("tiff", "BitsPerSample", XmpKind::Seq),
    ("tiff", "YCbCrSubSampling", XmpKind::Seq),
    ("tiff", "WhitePoint", XmpKind::Seq),
    ("tiff", "PrimaryChromaticities", XmpKind::Seq),
    ("tiff", "ImageDescription", XmpKind::LangAlt),
    ("tiff", "Copyright", XmpKind::LangAlt),
    ("tiff", "Artist", XmpKind::Seq),
    // photoshop
    ("photoshop", "SupplementalCategories", XmpKind::Bag),
    ("photoshop", "TextLayers", XmpKind::Seq),
    ("photoshop", "DocumentAncestors", XmpKind::Bag),
    // iptc
    ("Iptc4xmpCore", "CreatorContactInfo", XmpKind::Struct),
    ("Iptc4xmpCore", "Scene", XmpKind::Bag),
    ("Iptc4xmpCore", "SubjectCode", XmpKind::Bag),
    ("Iptc4xmpExt", "LocationCreated", XmpKind::Bag),
    ("Iptc4xmpExt", "LocationShown", XmpKind::Bag),
    ("Iptc4xmpExt", "PersonInImage", XmpKind::Bag),
    ("Iptc4xmpExt", "ArtworkOrObject", XmpKind::Bag),
    // lightroom
    ("lr", "hierarchicalSubject", XmpKind::Bag),
    ("digiKam", "TagsList", XmpKind::Seq),
    ("MicrosoftPhoto", "LastKeywordXMP", XmpKind::Bag),
    ("mwg-rs", "Regions", XmpKind::Struct),
];

static KINDS: LazyLock<FxHashMap<&'static str, FxHashMap<&'static str, XmpKind>>> =
    LazyLock::new(|| {
        let mut map: FxHashMap<&'static str, FxHashMap<&'static str, XmpKind>> =
            FxHashMap::default();
        for (prefix, name, kind) in PROPERTY_KINDS {
            map.entry(*prefix).or_default().insert(*name, *kind);
        }
        map
    });

/// The fixed kind of a property, if its schema declares one.
///
/// ```
/// use imgmeta_types::xmp::{self, XmpKind};
///
/// assert_eq!(xmp::property_kind("dc", "title"), Some(XmpKind::LangAlt));
/// assert_eq!(xmp::property_kind("xmp", "Rating"), None);
/// ```
pub fn property_kind(prefix: &str, name: &str) -> Option<XmpKind> {
    KINDS.get(prefix)?.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_and_uris_are_unique() {
        assert_eq!(BY_PREFIX.len(), BUILTIN_NAMESPACES.len());
        assert_eq!(BY_URI.len(), BUILTIN_NAMESPACES.len());
    }

    #[test]
    fn every_kind_uses_a_known_prefix() {
        for (prefix, name, _) in PROPERTY_KINDS {
            assert!(
                builtin_by_prefix(prefix).is_some(),
                "`{prefix}:{name}` uses an unknown prefix"
            );
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(XmpKind::from_name("xmpbag"), Some(XmpKind::Bag));
        assert_eq!(XmpKind::LangAlt.rdf_container(), Some("Alt"));
        assert!(!XmpKind::Struct.is_array());
    }
}
