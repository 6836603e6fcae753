//! The typed Exif value model.
//!
//! Every entry in an IFD carries one [`Value`]. Each variant holds a list of
//! elements of a single kind; reading and writing them against the wire is
//! done in `imgmeta`, since the byte order belongs to the enclosing IFD.

use super::{Endianness, PrimitiveTy, Rational, SRational};

/// A typed Exif value.
///
/// `Ascii` stores its text without the trailing NUL(s). `Unknown` keeps the
/// raw bytes of an entry whose wire type we don't recognize, along with that
/// type's ID, so it can be written back unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<SRational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Comment(Comment),
    Unknown { type_id: u16, bytes: Vec<u8> },
}

impl Value {
    /// The kind of this value. `Unknown` values have none.
    pub fn ty(&self) -> Option<PrimitiveTy> {
        Some(match self {
            Value::Byte(_) => PrimitiveTy::Byte,
            Value::Ascii(_) => PrimitiveTy::Ascii,
            Value::Short(_) => PrimitiveTy::Short,
            Value::Long(_) => PrimitiveTy::Long,
            Value::Rational(_) => PrimitiveTy::Rational,
            Value::SByte(_) => PrimitiveTy::SByte,
            Value::Undefined(_) => PrimitiveTy::Undefined,
            Value::SShort(_) => PrimitiveTy::SShort,
            Value::SLong(_) => PrimitiveTy::SLong,
            Value::SRational(_) => PrimitiveTy::SRational,
            Value::Float(_) => PrimitiveTy::Float,
            Value::Double(_) => PrimitiveTy::Double,
            Value::Comment(_) => PrimitiveTy::Comment,
            Value::Unknown { .. } => return None,
        })
    }

    /// The type ID this value is written with.
    pub fn wire_id(&self) -> u16 {
        match self {
            Value::Unknown { type_id, .. } => *type_id,
            other => other.ty().map(|t| t.wire_id()).unwrap_or_default(),
        }
    }

    /// A printable type name.
    pub fn type_name(&self) -> String {
        match self.ty() {
            Some(ty) => ty.name().to_string(),
            None => format!("0x{:04x}", self.wire_id()),
        }
    }

    /// The element size on the wire.
    pub fn element_size(&self) -> usize {
        self.ty().map(|t| t.size_bytes() as usize).unwrap_or(1)
    }

    /// The `count` field of the entry this value is written into.
    ///
    /// Ascii counts its terminating NUL. Comments count their eight-byte
    /// charset prefix.
    pub fn count(&self) -> usize {
        match self {
            Value::Byte(v) | Value::Undefined(v) => v.len(),
            Value::Ascii(s) => s.len() + 1,
            Value::Short(v) => v.len(),
            Value::Long(v) => v.len(),
            Value::Rational(v) => v.len(),
            Value::SByte(v) => v.len(),
            Value::SShort(v) => v.len(),
            Value::SLong(v) => v.len(),
            Value::SRational(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Double(v) => v.len(),
            Value::Comment(c) => c.encoded_len(),
            Value::Unknown { bytes, .. } => bytes.len(),
        }
    }

    /// The number of bytes this value takes on the wire.
    pub fn size(&self) -> usize {
        self.count() * self.element_size()
    }

    /// How many individually addressable components this value has.
    ///
    /// Text kinds (Ascii, Comment) are a single component.
    pub fn components(&self) -> usize {
        match self {
            Value::Ascii(_) | Value::Comment(_) => 1,
            other => other.count(),
        }
    }

    /// Converts component `i` to an integer.
    ///
    /// Rationals divide and truncate, floats truncate, and Ascii parses the
    /// whole text as a decimal number. Ascii that doesn't parse yields `0`.
    /// Use [`Value::try_to_long`] to find out when that happened.
    pub fn to_long(&self, i: usize) -> Option<i64> {
        self.try_to_long(i).unwrap_or_else(|e| {
            log::warn!("{e}; using zero");
            Some(0)
        })
    }

    /// Like [`Value::to_long`], but Ascii that isn't a number is an error.
    pub fn try_to_long(&self, i: usize) -> Result<Option<i64>, ValueError> {
        match self {
            Value::Ascii(_) | Value::Comment(_) if i != 0 => Ok(None),
            Value::Ascii(s) => {
                let text = s.trim_end_matches('\0').trim();
                text.parse().map(Some).map_err(|_| ValueError::NotANumber {
                    text: text.to_string(),
                })
            }
            Value::Comment(_) => Ok(None),
            other => Ok(other.numeric_long(i)),
        }
    }

    /// Integer conversion for the kinds that can't fail.
    fn numeric_long(&self, i: usize) -> Option<i64> {
        Some(match self {
            Value::Byte(v) | Value::Undefined(v) => *v.get(i)? as i64,
            Value::Short(v) => *v.get(i)? as i64,
            Value::Long(v) => *v.get(i)? as i64,
            Value::SByte(v) => *v.get(i)? as i64,
            Value::SShort(v) => *v.get(i)? as i64,
            Value::SLong(v) => *v.get(i)? as i64,
            Value::Rational(v) => {
                let r = v.get(i)?;
                match r.denominator {
                    0 => 0,
                    d => (r.numerator / d) as i64,
                }
            }
            // in i64, since `i32::MIN / -1` doesn't fit an i32
            Value::SRational(v) => {
                let r = v.get(i)?;
                match r.denominator {
                    0 => 0,
                    d => r.numerator as i64 / d as i64,
                }
            }
            Value::Float(v) => v.get(i)?.trunc() as i64,
            Value::Double(v) => v.get(i)?.trunc() as i64,
            Value::Unknown { bytes, .. } => *bytes.get(i)? as i64,
            Value::Ascii(_) | Value::Comment(_) => return None,
        })
    }

    /// Converts component `i` to a float.
    pub fn to_f64(&self, i: usize) -> Option<f64> {
        match self {
            Value::Rational(v) => v.get(i).map(|r| r.to_f64().unwrap_or(0.0)),
            Value::SRational(v) => v.get(i).map(|r| r.to_f64().unwrap_or(0.0)),
            Value::Float(v) => v.get(i).map(|f| *f as f64),
            Value::Double(v) => v.get(i).copied(),
            Value::Ascii(s) if i == 0 => s.trim_end_matches('\0').trim().parse().ok(),
            other => other.to_long(i).map(|l| l as f64),
        }
    }

    /// Converts component `i` to a fraction `(numerator, denominator)`.
    pub fn to_rational(&self, i: usize) -> Option<(i64, i64)> {
        match self {
            Value::Rational(v) => v
                .get(i)
                .map(|r| (r.numerator as i64, r.denominator as i64)),
            Value::SRational(v) => v
                .get(i)
                .map(|r| (r.numerator as i64, r.denominator as i64)),
            Value::Float(_) | Value::Double(_) => self.to_f64(i).map(float_to_rational),
            other => other.to_long(i).map(|l| (l, 1)),
        }
    }

    /// Renders component `i` on its own.
    pub fn component_string(&self, i: usize) -> Option<String> {
        Some(match self {
            Value::Byte(v) | Value::Undefined(v) => v.get(i)?.to_string(),
            Value::Short(v) => v.get(i)?.to_string(),
            Value::Long(v) => v.get(i)?.to_string(),
            Value::Rational(v) => v.get(i)?.to_string(),
            Value::SByte(v) => v.get(i)?.to_string(),
            Value::SShort(v) => v.get(i)?.to_string(),
            Value::SLong(v) => v.get(i)?.to_string(),
            Value::SRational(v) => v.get(i)?.to_string(),
            Value::Float(v) => v.get(i)?.to_string(),
            Value::Double(v) => v.get(i)?.to_string(),
            Value::Ascii(s) if i == 0 => ascii_display(s).to_string(),
            Value::Comment(c) if i == 0 => c.text.clone(),
            Value::Ascii(_) | Value::Comment(_) => return None,
            Value::Unknown { bytes, .. } => bytes.get(i)?.to_string(),
        })
    }

    /// Builds a value of the given kind from text, like a modify command
    /// would provide.
    ///
    /// ```
    /// use imgmeta_types::exif::{PrimitiveTy, Rational, Value};
    ///
    /// let v = Value::from_str_typed(PrimitiveTy::Rational, "51/1 106969/10000 0/1").unwrap();
    /// assert_eq!(
    ///     v,
    ///     Value::Rational(vec![
    ///         Rational::new(51, 1),
    ///         Rational::new(106969, 10000),
    ///         Rational::new(0, 1),
    ///     ])
    /// );
    /// ```
    pub fn from_str_typed(ty: PrimitiveTy, text: &str) -> Result<Value, ValueError> {
        fn list<T: core::str::FromStr>(ty: PrimitiveTy, text: &str) -> Result<Vec<T>, ValueError> {
            text.split_whitespace()
                .map(|part| {
                    part.parse::<T>().map_err(|_| ValueError::InvalidNumber {
                        ty,
                        text: part.to_string(),
                    })
                })
                .collect()
        }

        Ok(match ty {
            PrimitiveTy::Byte => Value::Byte(list(ty, text)?),
            PrimitiveTy::Ascii => Value::Ascii(text.to_string()),
            PrimitiveTy::Short => Value::Short(list(ty, text)?),
            PrimitiveTy::Long => Value::Long(list(ty, text)?),
            PrimitiveTy::SByte => Value::SByte(list(ty, text)?),
            PrimitiveTy::Undefined => Value::Undefined(list(ty, text)?),
            PrimitiveTy::SShort => Value::SShort(list(ty, text)?),
            PrimitiveTy::SLong => Value::SLong(list(ty, text)?),
            PrimitiveTy::Float => Value::Float(list(ty, text)?),
            PrimitiveTy::Double => Value::Double(list(ty, text)?),
            PrimitiveTy::Rational => Value::Rational(
                text.split_whitespace()
                    .map(|part| {
                        let (n, d) = parse_fraction::<u32>(part).ok_or_else(|| {
                            ValueError::InvalidNumber {
                                ty,
                                text: part.to_string(),
                            }
                        })?;
                        Ok(Rational::new(n, d))
                    })
                    .collect::<Result<_, ValueError>>()?,
            ),
            PrimitiveTy::SRational => Value::SRational(
                text.split_whitespace()
                    .map(|part| {
                        let (n, d) = parse_fraction::<i32>(part).ok_or_else(|| {
                            ValueError::InvalidNumber {
                                ty,
                                text: part.to_string(),
                            }
                        })?;
                        Ok(SRational::new(n, d))
                    })
                    .collect::<Result<_, ValueError>>()?,
            ),
            PrimitiveTy::Comment => Value::Comment(Comment::from_input(text)?),
        })
    }
}

/// Ascii prints up to its first NUL.
fn ascii_display(s: &str) -> &str {
    s.split('\0').next().unwrap_or_default()
}

/// Parses `n/d`, or a bare `n` as `n/1`.
fn parse_fraction<T: core::str::FromStr + From<u8>>(s: &str) -> Option<(T, T)> {
    match s.split_once('/') {
        Some((n, d)) => Some((n.trim().parse().ok()?, d.trim().parse().ok()?)),
        None => Some((s.trim().parse().ok()?, T::from(1_u8))),
    }
}

/// Approximates a float as a fraction with a power-of-ten denominator.
fn float_to_rational(f: f64) -> (i64, i64) {
    if f.fract() == 0.0 {
        return (f as i64, 1);
    }

    let mut den: i64 = 1;
    let mut scaled = f;
    while scaled.fract().abs() > 1e-9 && den < 1_000_000 {
        den *= 10;
        scaled = f * den as f64;
    }
    (scaled.round() as i64, den)
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Ascii(s) => f.write_str(ascii_display(s)),
            Value::Comment(c) => core::fmt::Display::fmt(c, f),
            other => {
                for i in 0..other.count() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    if let Some(s) = other.component_string(i) {
                        f.write_str(&s)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// The character sets a comment may declare in its eight-byte prefix.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Charset {
    Ascii,
    Jis,
    #[default]
    Unicode,
    Undefined,
}

impl Charset {
    /// The eight bytes that start an encoded comment.
    pub const fn prefix(&self) -> &'static [u8; 8] {
        match self {
            Charset::Ascii => b"ASCII\0\0\0",
            Charset::Jis => b"JIS\0\0\0\0\0",
            Charset::Unicode => b"UNICODE\0",
            Charset::Undefined => b"\0\0\0\0\0\0\0\0",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Charset::Ascii => "Ascii",
            Charset::Jis => "Jis",
            Charset::Unicode => "Unicode",
            Charset::Undefined => "Undefined",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Charset::Ascii, Charset::Jis, Charset::Unicode, Charset::Undefined]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Identifies the charset from the first eight bytes of a comment.
    ///
    /// Anything unrecognized is treated as undefined.
    pub fn from_prefix(prefix: &[u8]) -> Self {
        [Charset::Ascii, Charset::Jis, Charset::Unicode]
            .into_iter()
            .find(|c| prefix.starts_with(c.prefix()))
            .unwrap_or(Charset::Undefined)
    }
}

const BOM: char = '\u{FEFF}';

/// A comment value, like `Exif.Photo.UserComment`.
#[derive(Clone, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Comment {
    pub charset: Charset,
    pub text: String,
}

impl Comment {
    pub fn new(charset: Charset, text: impl Into<String>) -> Self {
        Self {
            charset,
            text: text.into(),
        }
    }

    /// Parses `charset=<name> <text>`. Without that prefix, the charset is
    /// `Unicode`.
    pub fn from_input(input: &str) -> Result<Self, ValueError> {
        let Some(rest) = input.strip_prefix("charset=") else {
            return Ok(Self::new(Charset::Unicode, input));
        };

        let (name, text) = match rest.split_once(' ') {
            Some((name, text)) => (name, text),
            None => (rest, ""),
        };
        let name = name.trim_matches('"');

        let charset = Charset::from_name(name).ok_or_else(|| ValueError::InvalidCharset {
            name: name.to_string(),
        })?;
        Ok(Self::new(charset, text))
    }

    /// Unicode text that itself starts with U+FEFF gets a byte order mark
    /// in front, so decoding strips that and keeps the text's own.
    fn needs_bom(&self) -> bool {
        self.charset == Charset::Unicode && self.text.starts_with(BOM)
    }

    /// The length of [`Comment::encode`]'s output.
    pub fn encoded_len(&self) -> usize {
        8 + match self.charset {
            Charset::Unicode => (self.text.encode_utf16().count() + self.needs_bom() as usize) * 2,
            _ => self.text.len(),
        }
    }

    /// Encodes the comment with its charset prefix.
    ///
    /// Unicode text is written as UTF-16 in the given byte order.
    pub fn encode(&self, endianness: Endianness) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.charset.prefix());

        match self.charset {
            Charset::Unicode => {
                if self.needs_bom() {
                    out.extend_from_slice(&endianness.u16_bytes(BOM as u16));
                }
                for unit in self.text.encode_utf16() {
                    out.extend_from_slice(&endianness.u16_bytes(unit));
                }
            }
            _ => out.extend_from_slice(self.text.as_bytes()),
        }

        out
    }

    /// Decodes a comment, prefix included.
    ///
    /// Unicode text honors a leading byte order mark, which is dropped. Only
    /// the first one counts, so a second U+FEFF stays in the text. Without a
    /// mark, the IFD's byte order is used.
    pub fn decode(bytes: &[u8], endianness: Endianness) -> Self {
        let (prefix, body) = bytes.split_at(bytes.len().min(8));
        let charset = Charset::from_prefix(prefix);

        let text = match charset {
            Charset::Unicode => {
                let (order, body) = match body {
                    [0xFF, 0xFE, rest @ ..] => (Endianness::Little, rest),
                    [0xFE, 0xFF, rest @ ..] => (Endianness::Big, rest),
                    _ => (endianness, body),
                };

                let units = body
                    .chunks_exact(2)
                    .filter_map(|pair| order.read_u16(pair))
                    .collect::<Vec<u16>>();

                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect::<String>()
                    .trim_end_matches('\0')
                    .to_string()
            }
            _ => {
                let trimmed = match body.iter().rposition(|b| *b != 0) {
                    Some(last) => &body[..=last],
                    None => &[],
                };
                match core::str::from_utf8(trimmed) {
                    Ok(s) => s.to_string(),
                    Err(_) => trimmed.iter().map(|b| *b as char).collect(),
                }
            }
        };

        Self { charset, text }
    }
}

impl core::fmt::Display for Comment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.charset != Charset::Undefined {
            write!(f, "charset={} ", self.charset.name())?;
        }
        f.write_str(&self.text)
    }
}

/// An error from building a [`Value`] out of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// A component couldn't be parsed as the requested kind.
    InvalidNumber { ty: PrimitiveTy, text: String },

    /// The `charset=` name of a comment wasn't one we know.
    InvalidCharset { name: String },

    /// Ascii text was read as a number, but it isn't one.
    NotANumber { text: String },
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueError::InvalidNumber { ty, text } => {
                write!(f, "Failed to convert `{text}` to type `{ty}`")
            }
            ValueError::InvalidCharset { name } => {
                write!(f, "Invalid charset: `{name}`")
            }
            ValueError::NotANumber { text } => {
                write!(f, "Ascii value isn't a number. value: `{text}`")
            }
        }
    }
}

impl core::error::Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_sizes() {
        let ascii = Value::Ascii("GI".into());
        assert_eq!(ascii.count(), 3, "ascii counts its NUL");
        assert_eq!(ascii.size(), 3);

        let rationals = Value::Rational(vec![Rational::new(1, 2); 3]);
        assert_eq!(rationals.count(), 3);
        assert_eq!(rationals.size(), 24);

        let comment = Value::Comment(Comment::new(Charset::Unicode, "hi"));
        assert_eq!(comment.count(), 12);
        assert_eq!(comment.wire_id(), 7);
    }

    #[test]
    fn conversions() {
        let r = Value::Rational(vec![Rational::new(7, 2)]);
        assert_eq!(r.to_long(0), Some(3));
        assert_eq!(r.to_f64(0), Some(3.5));
        assert_eq!(r.to_long(1), None);

        let s = Value::Ascii("not a number".into());
        assert_eq!(s.to_long(0), Some(0));
        assert_eq!(
            s.try_to_long(0),
            Err(ValueError::NotANumber {
                text: "not a number".into()
            })
        );
        assert_eq!(Value::Ascii(" 42\0".into()).try_to_long(0), Ok(Some(42)));

        let f = Value::Double(vec![2.25]);
        assert_eq!(f.to_rational(0), Some((225, 100)));
    }

    #[test]
    fn signed_division_doesnt_overflow() {
        let v = Value::SRational(vec![SRational::new(i32::MIN, -1), SRational::new(-7, 2)]);
        assert_eq!(v.to_long(0), Some(2_147_483_648));
        assert_eq!(v.to_long(1), Some(-3));
        assert_eq!(v.to_long(2), None);
    }

    #[test]
    fn display_joins_with_spaces() {
        let v = Value::Short(vec![1, 2, 3]);
        assert_eq!(v.to_string(), "1 2 3");

        let undef = Value::Undefined(b"0230".to_vec());
        assert_eq!(undef.to_string(), "48 50 51 48");

        let ascii = Value::Ascii("Canon\0junk".into());
        assert_eq!(ascii.to_string(), "Canon");
    }

    #[test]
    fn comment_input() {
        assert_eq!(
            Comment::from_input("charset=Ascii hello there").unwrap(),
            Comment::new(Charset::Ascii, "hello there")
        );
        assert_eq!(
            Comment::from_input("charset=\"Jis\" x").unwrap(),
            Comment::new(Charset::Jis, "x")
        );
        assert_eq!(
            Comment::from_input("plain").unwrap(),
            Comment::new(Charset::Unicode, "plain")
        );
        assert!(matches!(
            Comment::from_input("charset=Klingon qapla'"),
            Err(ValueError::InvalidCharset { .. })
        ));
    }

    #[test]
    fn unicode_comments_keep_astral_chars() {
        let original = Comment::new(Charset::Unicode, "snow \u{2603} and a crab \u{1F980}");

        for order in [Endianness::Little, Endianness::Big] {
            let bytes = original.encode(order);
            assert_eq!(&bytes[..8], b"UNICODE\0");
            assert_eq!(bytes.len(), original.encoded_len());
            assert_eq!(Comment::decode(&bytes, order), original);
        }
    }

    #[test]
    fn unicode_comment_honors_bom() {
        let mut bytes = b"UNICODE\0".to_vec();
        bytes.extend_from_slice(&[0xFE, 0xFF, 0x00, b'A']);

        // the IFD says little-endian, but the BOM wins
        let c = Comment::decode(&bytes, Endianness::Little);
        assert_eq!(c.text, "A");
    }

    #[test]
    fn unicode_comments_keep_a_leading_feff() {
        let original = Comment::new(Charset::Unicode, "\u{FEFF}zero width");

        for order in [Endianness::Little, Endianness::Big] {
            let bytes = original.encode(order);
            assert_eq!(bytes.len(), original.encoded_len());
            assert_eq!(Comment::decode(&bytes, order), original, "{order:?}");
        }

        // text without one doesn't get a mark
        let plain = Comment::new(Charset::Unicode, "A");
        assert_eq!(plain.encode(Endianness::Big), b"UNICODE\0\0A");
    }

    #[test]
    fn undefined_comment_trims_nuls() {
        let mut bytes = vec![0_u8; 8];
        bytes.extend_from_slice(b"abc\0\0\0");
        let c = Comment::decode(&bytes, Endianness::Big);
        assert_eq!(c, Comment::new(Charset::Undefined, "abc"));
        assert_eq!(c.to_string(), "abc");
    }

    #[test]
    fn typed_input_errors() {
        assert!(matches!(
            Value::from_str_typed(PrimitiveTy::Short, "1 two 3"),
            Err(ValueError::InvalidNumber { .. })
        ));
        assert_eq!(
            Value::from_str_typed(PrimitiveTy::SRational, "-1/3 2").unwrap(),
            Value::SRational(vec![SRational::new(-1, 3), SRational::new(2, 1)])
        );
    }
}
