//! XMP metadata.
//!
//! XMP is an RDF/XML document, so its values nest: arrays of structs of
//! arrays, and so on. [`XmpData`] flattens all of that into a list of
//! [`Xmpdatum`], in document order, keyed by a path:
//!
//! ```text
//! Xmp.xmpMM.History                  XmpSeq  (marker)
//! Xmp.xmpMM.History[1]               Struct  (marker)
//! Xmp.xmpMM.History[1]/stEvt:action  XmpText "saved"
//! ```
//!
//! Containers come first, with empty marker values, then their children.
//! Writing rebuilds the tree from those paths.

use std::str::FromStr;

pub use imgmeta_types::xmp::XmpKind;
use imgmeta_types::xmp::property_kind;

use crate::error::{Error, Warning};

pub mod error;
mod heuristics;
pub mod namespaces;
mod parse;
mod serialize;

use self::error::XmpError;

/// Identifies one XMP property: `Xmp.<prefix>.<path>`.
///
/// ```
/// use imgmeta::xmp::XmpKey;
///
/// let key: XmpKey = "Xmp.xmpMM.History[2]/stEvt:when".parse().unwrap();
/// assert_eq!(key.prefix(), "xmpMM");
/// assert_eq!(key.path(), "History[2]/stEvt:when");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XmpKey {
    prefix: String,
    path: String,
}

impl XmpKey {
    /// Makes a key without checking the prefix.
    pub fn new(prefix: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The first path component, without any index.
    pub fn property(&self) -> &str {
        let end = self.path.find(['[', '/']).unwrap_or(self.path.len());
        &self.path[..end]
    }

    /// The namespace URI for the prefix.
    pub fn namespace_uri(&self) -> Option<String> {
        namespaces::namespace_uri(&self.prefix)
    }

    /// The kind a new value for this key should get.
    pub fn default_kind(&self) -> XmpKind {
        if self.property() == self.path {
            property_kind(&self.prefix, &self.path).unwrap_or(XmpKind::Text)
        } else {
            XmpKind::Text
        }
    }
}

impl core::fmt::Display for XmpKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Xmp.{}.{}", self.prefix, self.path)
    }
}

impl FromStr for XmpKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey { key: s.into() };

        let mut parts = s.splitn(3, '.');
        let (Some("Xmp"), Some(prefix), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let prefix_ok = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let path_ok = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_-[]/:".contains(c));
        if !prefix_ok || !path_ok {
            return Err(invalid());
        }

        if namespaces::namespace_uri(prefix).is_none() {
            return Err(Error::UnknownKey { key: s.into() });
        }

        Ok(Self::new(prefix, path))
    }
}

/// An XMP value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmpValue {
    Text(String),

    /// A `Bag`, `Seq`, or `Alt` of plain items.
    ///
    /// When the items are structs, this is just a marker with no items, and
    /// the structs follow as their own datums.
    Array { kind: XmpKind, items: Vec<String> },

    /// One text per language, with `x-default` first.
    LangAlt(Vec<(String, String)>),

    /// A struct marker. The fields follow as their own datums.
    Struct,
}

impl XmpValue {
    pub fn kind(&self) -> XmpKind {
        match self {
            XmpValue::Text(_) => XmpKind::Text,
            XmpValue::Array { kind, .. } => *kind,
            XmpValue::LangAlt(_) => XmpKind::LangAlt,
            XmpValue::Struct => XmpKind::Struct,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            XmpValue::Text(_) => 1,
            XmpValue::Array { items, .. } => items.len(),
            XmpValue::LangAlt(langs) => langs.len(),
            XmpValue::Struct => 0,
        }
    }

    /// The text for a language, falling back to `x-default`.
    pub fn lang(&self, lang: &str) -> Option<&str> {
        let XmpValue::LangAlt(langs) = self else {
            return None;
        };
        langs
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(lang))
            .or_else(|| langs.iter().find(|(l, _)| l == "x-default"))
            .map(|(_, t)| t.as_str())
    }

    /// Sets one language, keeping `x-default` around and first.
    pub fn set_lang(&mut self, lang: &str, text: &str) {
        if !matches!(self, XmpValue::LangAlt(_)) {
            *self = XmpValue::LangAlt(Vec::new());
        }
        let XmpValue::LangAlt(langs) = self else {
            return;
        };

        match langs.iter_mut().find(|(l, _)| l.eq_ignore_ascii_case(lang)) {
            Some((_, t)) => *t = text.into(),
            None => langs.push((lang.into(), text.into())),
        }
        if !langs.iter().any(|(l, _)| l == "x-default") {
            langs.push(("x-default".into(), text.into()));
        }

        // stable, so the rest keep their order
        langs.sort_by_key(|(l, _)| l != "x-default");
    }
}

impl core::fmt::Display for XmpValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            XmpValue::Text(t) => f.write_str(t),
            XmpValue::Array { items, .. } => f.write_str(&items.join(", ")),
            XmpValue::LangAlt(langs) => {
                let parts: Vec<String> = langs
                    .iter()
                    .map(|(l, t)| format!("lang=\"{l}\" {t}"))
                    .collect();
                f.write_str(&parts.join(", "))
            }
            XmpValue::Struct => Ok(()),
        }
    }
}

/// Splits `lang=<tag> <text>` input.
///
/// Without a `lang=` prefix, the language is `x-default`.
///
/// ```
/// use imgmeta::xmp::parse_lang_alt;
///
/// assert_eq!(parse_lang_alt("lang=de-DE Hallo").unwrap(), ("de-DE".into(), "Hallo".into()));
/// assert_eq!(parse_lang_alt("Hi").unwrap(), ("x-default".into(), "Hi".into()));
/// assert!(parse_lang_alt("lang=?? nope").is_err());
/// ```
pub fn parse_lang_alt(input: &str) -> Result<(String, String), XmpError> {
    let Some(rest) = input.strip_prefix("lang=") else {
        return Ok(("x-default".into(), input.into()));
    };

    let (tag, text) = match rest.split_once(char::is_whitespace) {
        Some((tag, text)) => (tag, text),
        None => (rest, ""),
    };
    let tag = tag.trim_matches('"');

    if !is_lang_tag(tag) {
        log::warn!("`{tag}` isn't a language tag");
        return Err(XmpError::InvalidLangAlt {
            input: input.into(),
        });
    }

    Ok((tag.into(), text.into()))
}

/// `x-default`, or something shaped like `[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*`.
fn is_lang_tag(tag: &str) -> bool {
    if tag == "x-default" {
        return true;
    }

    let mut parts = tag.split('-');
    let first_ok = parts
        .next()
        .is_some_and(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));

    first_ok && parts.all(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// One XMP property (or container marker).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xmpdatum {
    key: XmpKey,
    value: XmpValue,
}

impl Xmpdatum {
    pub fn new(key: XmpKey, value: XmpValue) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &XmpKey {
        &self.key
    }

    pub fn prefix(&self) -> &str {
        &self.key.prefix
    }

    pub fn path(&self) -> &str {
        &self.key.path
    }

    pub fn type_name(&self) -> &'static str {
        self.value.kind().name()
    }

    pub fn count(&self) -> usize {
        self.value.count()
    }

    /// The length of the printed value, in bytes.
    pub fn size(&self) -> usize {
        self.value.to_string().len()
    }

    pub fn value(&self) -> &XmpValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut XmpValue {
        &mut self.value
    }

    pub fn set_value(&mut self, value: XmpValue) {
        self.value = value;
    }
}

/// All the XMP properties in a packet, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmpData {
    datums: Vec<Xmpdatum>,

    /// The packet we were read from, and what it held.
    source: Option<(String, Vec<Xmpdatum>)>,
}

impl XmpData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a datum, even if its key is already present.
    pub fn add(&mut self, datum: Xmpdatum) {
        self.datums.push(datum);
    }

    /// Changes the first datum with this key, or appends one.
    pub fn set(&mut self, key: XmpKey, value: XmpValue) {
        match self.datums.iter_mut().find(|d| d.key == key) {
            Some(d) => d.value = value,
            None => self.datums.push(Xmpdatum::new(key, value)),
        }
    }

    /// Sets a value from text.
    ///
    /// The kind comes from `kind`, then the existing datum, then the schema
    /// table, and finally defaults to text.
    ///
    /// - arrays are replaced with a single item
    /// - `LangAlt` input may start with `lang=<tag> `. Other languages are
    ///   kept.
    /// - structs ignore the text
    pub fn set_str(&mut self, key: &str, kind: Option<XmpKind>, text: &str) -> Result<(), Error> {
        let key: XmpKey = key.parse()?;
        let kind = self.kind_for(&key, kind);

        let value = match kind {
            XmpKind::LangAlt => {
                let (lang, text) = parse_lang_alt(text)?;
                let mut value = self
                    .find_key(&key)
                    .map(|d| d.value.clone())
                    .filter(|v| matches!(v, XmpValue::LangAlt(_)))
                    .unwrap_or(XmpValue::LangAlt(Vec::new()));
                value.set_lang(&lang, &text);
                value
            }
            XmpKind::Text => XmpValue::Text(text.into()),
            XmpKind::Struct => XmpValue::Struct,
            array => XmpValue::Array {
                kind: array,
                items: vec![text.into()],
            },
        };

        self.set(key, value);
        Ok(())
    }

    /// Like [`set_str`](Self::set_str), but arrays gain an item instead of
    /// being replaced. Text datums are appended as duplicates.
    pub fn add_str(&mut self, key: &str, kind: Option<XmpKind>, text: &str) -> Result<(), Error> {
        let parsed: XmpKey = key.parse()?;
        let kind = self.kind_for(&parsed, kind);

        if kind.is_array() && kind != XmpKind::LangAlt {
            if let Some(XmpValue::Array { items, .. }) = self
                .datums
                .iter_mut()
                .find(|d| d.key == parsed)
                .map(|d| &mut d.value)
            {
                items.push(text.into());
                return Ok(());
            }
        }

        if kind == XmpKind::Text {
            self.add(Xmpdatum::new(parsed, XmpValue::Text(text.into())));
            return Ok(());
        }
        self.set_str(key, Some(kind), text)
    }

    fn kind_for(&self, key: &XmpKey, kind: Option<XmpKind>) -> XmpKind {
        kind.or_else(|| self.find_key(key).map(|d| d.value.kind()))
            .unwrap_or_else(|| key.default_kind())
    }

    /// Removes every datum with this key (and anything nested under it),
    /// returning how many went.
    pub fn erase(&mut self, key: &XmpKey) -> usize {
        let before = self.datums.len();
        let nested = |d: &Xmpdatum| {
            d.key.prefix == key.prefix
                && d.key
                    .path
                    .strip_prefix(&key.path)
                    .is_some_and(|rest| rest.starts_with(['[', '/']))
        };
        self.datums.retain(|d| d.key != *key && !nested(d));
        before - self.datums.len()
    }

    pub fn find_key(&self, key: &XmpKey) -> Option<&Xmpdatum> {
        self.datums.iter().find(|d| d.key == *key)
    }

    pub fn get(&self, key: &str) -> Option<&Xmpdatum> {
        let key: XmpKey = key.parse().ok()?;
        self.find_key(&key)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Xmpdatum> {
        self.datums.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Xmpdatum> {
        self.datums.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.datums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datums.is_empty()
    }

    pub fn clear(&mut self) {
        self.datums.clear();
    }

    /// Sorts by key. Containers still come before their children.
    pub fn sort_by_key(&mut self) {
        self.datums.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// The packet this was read from, if any.
    pub fn raw(&self) -> Option<&str> {
        self.source.as_ref().map(|(raw, _)| raw.as_str())
    }

    pub(crate) fn is_pristine(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|(_, snapshot)| *snapshot == self.datums)
    }

    /// Folds in the rest of a split packet (JPEG's ExtendedXMP).
    ///
    /// The pointer to it goes away, and the result still counts as unchanged.
    pub(crate) fn merge_extended(&mut self, extended: XmpData) {
        self.datums
            .retain(|d| !(d.prefix() == "xmpNote" && d.path() == "HasExtendedXMP"));
        self.datums.extend(extended.datums);

        if let Some((_, snapshot)) = &mut self.source {
            *snapshot = self.datums.clone();
        }
    }

    /// Parses a packet.
    ///
    /// Namespaces we haven't seen before are registered as a side effect.
    pub fn parse(packet: &str) -> Result<(Self, Vec<Warning>), XmpError> {
        let mut warnings = Vec::new();
        let datums = parse::parse_packet(packet, &mut warnings)?;

        log::debug!("parsed `{}` XMP datums", datums.len());
        Ok((
            Self {
                source: Some((packet.into(), datums.clone())),
                datums,
            },
            warnings,
        ))
    }

    /// Parses a packet from bytes, which must be UTF-8.
    pub fn parse_bytes(packet: &[u8]) -> Result<(Self, Vec<Warning>), XmpError> {
        let s = core::str::from_utf8(packet).map_err(|e| {
            log::error!("XMP was not in UTF-8 format! err: {e}");
            XmpError::NotUtf8
        })?;
        Self::parse(s)
    }

    /// Writes a complete packet, with `<?xpacket?>` wrappers and padding.
    ///
    /// Unchanged data is written back as it was read.
    pub fn to_packet(&self) -> Result<String, XmpError> {
        if let Some((raw, _)) = &self.source
            && self.is_pristine()
        {
            return Ok(raw.clone());
        }
        serialize::packet(&self.datums)
    }
}

impl<'a> IntoIterator for &'a XmpData {
    type Item = &'a Xmpdatum;
    type IntoIter = core::slice::Iter<'a, Xmpdatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.datums.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    #[test]
    fn keys() {
        let key: XmpKey = "Xmp.dc.title".parse().unwrap();
        assert_eq!(key.default_kind(), XmpKind::LangAlt);
        assert_eq!(key.to_string(), "Xmp.dc.title");

        let nested: XmpKey = "Xmp.xmpMM.History[1]/stEvt:action".parse().unwrap();
        assert_eq!(nested.property(), "History");
        assert_eq!(nested.default_kind(), XmpKind::Text);

        assert!(matches!(
            "Xmp.nope.title".parse::<XmpKey>(),
            Err(Error::UnknownKey { .. })
        ));
        assert!(matches!(
            "Xmp.dc".parse::<XmpKey>(),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            "Xmp.dc.ti tle".parse::<XmpKey>(),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn lang_alt_input() {
        assert_eq!(
            parse_lang_alt("lang=\"fr-FR\" Bonjour").unwrap(),
            ("fr-FR".into(), "Bonjour".into())
        );
        assert!(matches!(
            parse_lang_alt("lang= oops"),
            Err(XmpError::InvalidLangAlt { .. })
        ));
        assert!(matches!(
            parse_lang_alt("lang=toolonglanguage x"),
            Err(XmpError::InvalidLangAlt { .. })
        ));
    }

    #[test]
    fn setting_a_language_creates_x_default() {
        logger();
        let mut xmp = XmpData::new();
        xmp.set_str("Xmp.dc.title", None, "lang=de-DE Hallo").unwrap();

        let title = xmp.get("Xmp.dc.title").unwrap().value();
        assert_eq!(
            title,
            &XmpValue::LangAlt(vec![
                ("x-default".into(), "Hallo".into()),
                ("de-DE".into(), "Hallo".into()),
            ])
        );

        // setting x-default later only changes x-default
        xmp.set_str("Xmp.dc.title", None, "Hello").unwrap();
        let title = xmp.get("Xmp.dc.title").unwrap().value();
        assert_eq!(title.lang("x-default"), Some("Hello"));
        assert_eq!(title.lang("de-de"), Some("Hallo"));
        assert_eq!(title.lang("fr"), Some("Hello"));
        assert_eq!(title.to_string(), "lang=\"x-default\" Hello, lang=\"de-DE\" Hallo");

        let err: Error = xmp.set_str("Xmp.dc.title", None, "lang=!! x").unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidLangAlt);
    }

    #[test]
    fn arrays_set_and_add() {
        logger();
        let mut xmp = XmpData::new();
        xmp.set_str("Xmp.dc.subject", None, "cat").unwrap();
        xmp.add_str("Xmp.dc.subject", None, "dog").unwrap();
        assert_eq!(xmp.get("Xmp.dc.subject").unwrap().to_string_value(), "cat, dog");

        // `set` is idempotent
        xmp.set_str("Xmp.dc.subject", None, "bird").unwrap();
        xmp.set_str("Xmp.dc.subject", None, "bird").unwrap();
        assert_eq!(xmp.get("Xmp.dc.subject").unwrap().count(), 1);

        // explicit kinds win
        xmp.set_str("Xmp.xmp.Rating", Some(XmpKind::Seq), "5").unwrap();
        assert_eq!(xmp.get("Xmp.xmp.Rating").unwrap().type_name(), "XmpSeq");
    }

    #[test]
    fn erasing_takes_children_along() {
        let mut xmp = XmpData::new();
        let key = |s: &str| s.parse::<XmpKey>().unwrap();
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
        xmp.add(Xmpdatum::new(key("Xmp.xmpMM.HistoryNote"), XmpValue::Text("x".into())));

        assert_eq!(xmp.erase(&key("Xmp.xmpMM.History")), 3);
        assert_eq!(xmp.len(), 1);
    }

    impl Xmpdatum {
        fn to_string_value(&self) -> String {
            self.value.to_string()
        }
    }
}
