//! IPTC-IIM metadata.
//!
//! IIM is a flat list of datasets, each numbered by a record and a dataset
//! number. Some datasets (like `Keywords`) repeat, so [`IptcData`] is an
//! ordered multimap: repeats keep their order through a round trip.
//!
//! Text is only UTF-8 when the envelope's `CharacterSet` says so. Otherwise,
//! we print it as Latin-1 and leave the bytes alone when writing.

use std::str::FromStr;

use imgmeta_types::iptc::{self as registry, CHARACTER_SET, DatasetInfo, IptcType, UTF8_DECLARATION};

use crate::error::{Error, Warning, warn};

pub mod error;
pub(crate) mod iim;
pub mod irb;

/// Identifies one dataset: `Iptc.<record>.<dataset>`.
///
/// ```
/// use imgmeta::iptc::IptcKey;
///
/// let key: IptcKey = "Iptc.Application2.Keywords".parse().unwrap();
/// assert_eq!((key.record(), key.dataset()), (2, 25));
/// assert_eq!(key.to_string(), "Iptc.Application2.Keywords");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IptcKey {
    record: u8,
    dataset: u8,
}

impl IptcKey {
    pub const fn new(record: u8, dataset: u8) -> Self {
        Self { record, dataset }
    }

    pub const fn record(&self) -> u8 {
        self.record
    }

    pub const fn dataset(&self) -> u8 {
        self.dataset
    }

    pub fn record_name(&self) -> String {
        registry::record_name(self.record).into_owned()
    }

    pub fn dataset_name(&self) -> String {
        registry::dataset_name(self.record, self.dataset).into_owned()
    }

    /// The registry entry, if the dataset is known.
    pub fn info(&self) -> Option<&'static DatasetInfo> {
        registry::find(self.record, self.dataset)
    }
}

impl core::fmt::Display for IptcKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Iptc.{}.{}", self.record_name(), self.dataset_name())
    }
}

impl FromStr for IptcKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey { key: s.into() };

        let mut parts = s.split('.');
        let (Some("Iptc"), Some(record), Some(dataset), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let ok_chars = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !ok_chars(record) || !ok_chars(dataset) {
            return Err(invalid());
        }

        let record = registry::record_number(record).ok_or_else(invalid)?;
        let dataset = registry::dataset_number(record, dataset)
            .ok_or_else(|| Error::UnknownKey { key: s.into() })?;

        Ok(Self::new(record, dataset))
    }
}

/// A dataset's value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IptcValue {
    /// Text, as raw bytes in the block's character set.
    String(Vec<u8>),

    Date { year: u16, month: u8, day: u8 },

    /// A time of day and its offset from UTC, in minutes.
    Time {
        hour: u8,
        minute: u8,
        second: u8,
        offset: i16,
    },

    Short(u16),

    Undefined(Vec<u8>),
}

impl IptcValue {
    pub fn ty(&self) -> IptcType {
        match self {
            IptcValue::String(_) => IptcType::String,
            IptcValue::Date { .. } => IptcType::Date,
            IptcValue::Time { .. } => IptcType::Time,
            IptcValue::Short(_) => IptcType::Short,
            IptcValue::Undefined(_) => IptcType::Undefined,
        }
    }

    /// Reads wire bytes as the given type.
    ///
    /// Malformed dates, times, and shorts fall back to `String`, so the bytes
    /// still round-trip.
    pub fn from_wire(ty: IptcType, bytes: &[u8]) -> Option<Self> {
        let digits = |range: core::ops::Range<usize>| -> Option<u32> {
            let s = core::str::from_utf8(bytes.get(range)?).ok()?;
            s.bytes().all(|b| b.is_ascii_digit()).then(|| s.parse().ok())?
        };

        match ty {
            IptcType::String => Some(IptcValue::String(bytes.to_vec())),
            IptcType::Undefined => Some(IptcValue::Undefined(bytes.to_vec())),
            IptcType::Short => {
                let b: [u8; 2] = bytes.try_into().ok()?;
                Some(IptcValue::Short(u16::from_be_bytes(b)))
            }
            IptcType::Date => {
                if bytes.len() != 8 {
                    return None;
                }
                let date = IptcValue::Date {
                    year: digits(0..4)? as u16,
                    month: digits(4..6)? as u8,
                    day: digits(6..8)? as u8,
                };
                date.validate().ok().map(|_| date)
            }
            IptcType::Time => {
                if bytes.len() != 11 {
                    return None;
                }
                let sign = match bytes[6] {
                    b'+' => 1,
                    b'-' => -1,
                    _ => return None,
                };
                let time = IptcValue::Time {
                    hour: digits(0..2)? as u8,
                    minute: digits(2..4)? as u8,
                    second: digits(4..6)? as u8,
                    offset: sign * (digits(7..9)? * 60 + digits(9..11)?) as i16,
                };
                time.validate().ok().map(|_| time)
            }
        }
    }

    /// The bytes as they'll be written.
    pub fn to_wire(&self) -> Vec<u8> {
        match self {
            IptcValue::String(b) | IptcValue::Undefined(b) => b.clone(),
            IptcValue::Short(s) => s.to_be_bytes().to_vec(),
            IptcValue::Date { year, month, day } => {
                format!("{year:04}{month:02}{day:02}").into_bytes()
            }
            IptcValue::Time {
                hour,
                minute,
                second,
                offset,
            } => {
                let sign = if *offset < 0 { '-' } else { '+' };
                let off = offset.unsigned_abs();
                format!(
                    "{hour:02}{minute:02}{second:02}{sign}{:02}{:02}",
                    off / 60,
                    off % 60
                )
                .into_bytes()
            }
        }
    }

    /// Builds a value from text.
    ///
    /// Dates are `YYYY-MM-DD` (or `YYYYMMDD`). Times are `HH:MM:SS±HH:MM`,
    /// and the offset may be left off.
    pub fn from_str_typed(ty: IptcType, text: &str) -> Result<Self, Error> {
        let convert = |reason: &str| Error::ValueConversion {
            what: format!("`{text}` to {}", ty.name()),
            reason: reason.into(),
        };
        let num = |s: &str, what: &str| -> Result<u32, Error> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(convert(&format!("{what} isn't a number")));
            }
            s.parse().map_err(|_| convert(&format!("{what} isn't a number")))
        };

        let value = match ty {
            IptcType::String => IptcValue::String(text.as_bytes().to_vec()),
            IptcType::Undefined => IptcValue::Undefined(text.as_bytes().to_vec()),
            IptcType::Short => IptcValue::Short(
                text.trim()
                    .parse()
                    .map_err(|_| convert("not a 16-bit unsigned number"))?,
            ),
            IptcType::Date => {
                let compact: String = text.trim().chars().filter(|c| *c != '-').collect();
                if compact.len() != 8 {
                    return Err(convert("expected `YYYY-MM-DD`"));
                }
                IptcValue::Date {
                    year: num(&compact[0..4], "Year")? as u16,
                    month: num(&compact[4..6], "Month")? as u8,
                    day: num(&compact[6..8], "Day")? as u8,
                }
            }
            IptcType::Time => {
                let text = text.trim();
                let (clock, offset) = match text.find(['+', '-']) {
                    Some(i) => (&text[..i], Some(&text[i..])),
                    None => (text, None),
                };

                let clock: String = clock.chars().filter(|c| *c != ':').collect();
                if clock.len() != 6 {
                    return Err(convert("expected `HH:MM:SS±HH:MM`"));
                }

                let offset = match offset {
                    None => 0,
                    Some(o) => {
                        let sign = if o.starts_with('-') { -1 } else { 1 };
                        let digits: String = o[1..].chars().filter(|c| *c != ':').collect();
                        if digits.len() != 4 {
                            return Err(convert("expected a `±HH:MM` offset"));
                        }
                        let h = num(&digits[0..2], "Offset")?;
                        let m = num(&digits[2..4], "Offset")?;
                        if h > 23 || m > 59 {
                            return Err(convert("Offset is out of range"));
                        }
                        sign * (h * 60 + m) as i16
                    }
                };

                IptcValue::Time {
                    hour: num(&clock[0..2], "Hour")? as u8,
                    minute: num(&clock[2..4], "Minute")? as u8,
                    second: num(&clock[4..6], "Second")? as u8,
                    offset,
                }
            }
        };

        value.validate().map_err(convert)?;
        Ok(value)
    }

    /// Checks date and time fields.
    fn validate(&self) -> Result<(), &'static str> {
        match *self {
            IptcValue::Date { year, month, day } => {
                if !(1..=12).contains(&month) {
                    return Err("Month is out of range");
                }
                let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
                let days = match month {
                    2 if leap => 29,
                    2 => 28,
                    4 | 6 | 9 | 11 => 30,
                    _ => 31,
                };
                if day == 0 || day > days {
                    return Err("Day is out of range");
                }
                Ok(())
            }
            IptcValue::Time {
                hour,
                minute,
                second,
                ..
            } => {
                if hour > 23 {
                    return Err("Hour is out of range");
                }
                if minute > 59 {
                    return Err("Minute is out of range");
                }
                if second > 60 {
                    return Err("Second is out of range");
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// The value as text, decoding strings as UTF-8 or Latin-1.
    pub fn to_text(&self, utf8: bool) -> String {
        match self {
            IptcValue::String(b) if utf8 => String::from_utf8_lossy(b).into_owned(),
            IptcValue::String(b) => b.iter().map(|c| *c as char).collect(),
            IptcValue::Undefined(b) => b
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            IptcValue::Short(s) => s.to_string(),
            IptcValue::Date { year, month, day } => format!("{year:04}-{month:02}-{day:02}"),
            IptcValue::Time {
                hour,
                minute,
                second,
                offset,
            } => {
                let sign = if *offset < 0 { '-' } else { '+' };
                let off = offset.unsigned_abs();
                format!(
                    "{hour:02}:{minute:02}:{second:02}{sign}{:02}:{:02}",
                    off / 60,
                    off % 60
                )
            }
        }
    }
}

impl core::fmt::Display for IptcValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_text(true))
    }
}

/// One IPTC dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Iptcdatum {
    key: IptcKey,
    value: IptcValue,
}

impl Iptcdatum {
    pub fn new(key: IptcKey, value: IptcValue) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> IptcKey {
        self.key
    }

    pub fn record(&self) -> u8 {
        self.key.record
    }

    pub fn dataset(&self) -> u8 {
        self.key.dataset
    }

    pub fn record_name(&self) -> String {
        self.key.record_name()
    }

    pub fn dataset_name(&self) -> String {
        self.key.dataset_name()
    }

    pub fn title(&self) -> Option<&'static str> {
        self.key.info().map(|i| i.title)
    }

    pub fn description(&self) -> Option<&'static str> {
        self.key.info().map(|i| i.desc)
    }

    pub fn type_name(&self) -> &'static str {
        self.value.ty().name()
    }

    /// The size on the wire, in bytes.
    pub fn size(&self) -> usize {
        self.value.to_wire().len()
    }

    pub fn value(&self) -> &IptcValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut IptcValue {
        &mut self.value
    }

    pub fn set_value(&mut self, value: IptcValue) {
        self.value = value;
    }

    /// The value as text, using `data`'s character set.
    pub fn print(&self, data: &IptcData) -> String {
        self.value.to_text(data.is_utf8())
    }
}

/// All the IPTC datasets in an image, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IptcData {
    datums: Vec<Iptcdatum>,

    /// The block we were read from, and what it held.
    source: Option<(Vec<u8>, Vec<Iptcdatum>)>,
}

impl IptcData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a datum, even if its key is already present.
    pub fn add(&mut self, datum: Iptcdatum) {
        self.datums.push(datum);
    }

    /// Changes the first datum with this key, or appends one.
    pub fn set(&mut self, key: IptcKey, value: IptcValue) {
        match self.datums.iter_mut().find(|d| d.key == key) {
            Some(d) => d.value = value,
            None => self.datums.push(Iptcdatum::new(key, value)),
        }
    }

    /// Builds a value from text using the dataset's registered type, checks
    /// its length, then [`set`](Self::set)s it.
    pub fn set_str(&mut self, key: &str, text: &str) -> Result<(), Error> {
        let key: IptcKey = key.parse()?;
        let value = Self::value_for(key, text)?;
        self.set(key, value);
        Ok(())
    }

    /// Like [`set_str`](Self::set_str), but always appends.
    pub fn add_str(&mut self, key: &str, text: &str) -> Result<(), Error> {
        let key: IptcKey = key.parse()?;
        let value = Self::value_for(key, text)?;
        self.add(Iptcdatum::new(key, value));
        Ok(())
    }

    pub(crate) fn value_for(key: IptcKey, text: &str) -> Result<IptcValue, Error> {
        let info = key.info();
        let ty = info.map(|i| i.ty).unwrap_or(IptcType::String);
        let value = IptcValue::from_str_typed(ty, text)?;

        if let Some(info) = info {
            let len = value.to_wire().len();
            if len > info.max_len as usize {
                return Err(error::IptcError::ValueTooLong {
                    key: key.to_string(),
                    len,
                    max: info.max_len,
                }
                .into());
            }
        }
        Ok(value)
    }

    /// Removes every datum with this key, returning how many went.
    pub fn erase(&mut self, key: &IptcKey) -> usize {
        let before = self.datums.len();
        self.datums.retain(|d| d.key != *key);
        before - self.datums.len()
    }

    pub fn find_key(&self, key: &IptcKey) -> Option<&Iptcdatum> {
        self.datums.iter().find(|d| d.key == *key)
    }

    pub fn get(&self, key: &str) -> Option<&Iptcdatum> {
        let key: IptcKey = key.parse().ok()?;
        self.find_key(&key)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Iptcdatum> {
        self.datums.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Iptcdatum> {
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

    /// Sorts by record and dataset. Repeats keep their order.
    pub fn sort_by_key(&mut self) {
        self.datums.sort_by_key(|d| d.key);
    }

    /// Whether `CharacterSet` declares UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.find_key(&IptcKey::new(CHARACTER_SET.0, CHARACTER_SET.1))
            .is_some_and(|d| d.value.to_wire() == UTF8_DECLARATION)
    }

    /// The block this was read from, if any.
    pub fn raw(&self) -> Option<&[u8]> {
        self.source.as_ref().map(|(raw, _)| raw.as_slice())
    }

    pub(crate) fn is_pristine(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|(_, snapshot)| *snapshot == self.datums)
    }

    /// Parses an IIM block.
    pub fn parse(block: &[u8]) -> Result<(Self, Vec<Warning>), error::IptcError> {
        let mut warnings = Vec::new();
        let raw = iim::parse(block, &mut warnings)?;

        let datums: Vec<Iptcdatum> = raw
            .into_iter()
            .map(|ds| {
                let key = IptcKey::new(ds.record, ds.number);
                let ty = key.info().map(|i| i.ty).unwrap_or(IptcType::Undefined);

                let value = IptcValue::from_wire(ty, &ds.data).unwrap_or_else(|| {
                    warn(
                        &mut warnings,
                        format!("`{key}` isn't a valid {}; keeping it as text", ty.name()),
                    );
                    IptcValue::String(ds.data)
                });
                Iptcdatum::new(key, value)
            })
            .collect();

        log::debug!("parsed `{}` IPTC datasets", datums.len());
        Ok((
            Self {
                source: Some((block.to_vec(), datums.clone())),
                datums,
            },
            warnings,
        ))
    }

    /// Writes an IIM block, sorted by record and dataset.
    ///
    /// Unchanged data is written back as it was read.
    pub fn to_bytes(&self) -> Vec<u8> {
        if let Some((raw, _)) = &self.source
            && self.is_pristine()
        {
            return raw.clone();
        }

        let mut sorted: Vec<&Iptcdatum> = self.datums.iter().collect();
        sorted.sort_by_key(|d| d.key);

        let mut out = Vec::new();
        for d in sorted {
            iim::write_dataset(&mut out, d.record(), d.dataset(), &d.value.to_wire());
        }
        out
    }
}

impl<'a> IntoIterator for &'a IptcData {
    type Item = &'a Iptcdatum;
    type IntoIter = core::slice::Iter<'a, Iptcdatum>;

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
        let key: IptcKey = "Iptc.Envelope.CharacterSet".parse().unwrap();
        assert_eq!((key.record(), key.dataset()), CHARACTER_SET);

        let unknown: IptcKey = "Iptc.Application2.0x00c7".parse().unwrap();
        assert_eq!(unknown.to_string(), "Iptc.Application2.0x00c7");

        assert!(matches!(
            "Iptc.Application2.Nope".parse::<IptcKey>(),
            Err(Error::UnknownKey { .. })
        ));
        assert!(matches!(
            "Exif.Application2.Keywords".parse::<IptcKey>(),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            "Iptc.Application2.Key-words".parse::<IptcKey>(),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn dates_and_times() {
        let date = IptcValue::from_str_typed(IptcType::Date, "2024-02-29").unwrap();
        assert_eq!(date.to_wire(), b"20240229");
        assert_eq!(date.to_string(), "2024-02-29");

        let time = IptcValue::from_str_typed(IptcType::Time, "13:05:09-04:30").unwrap();
        assert_eq!(time.to_wire(), b"130509-0430");
        assert_eq!(time.to_string(), "13:05:09-04:30");
        assert_eq!(IptcValue::from_wire(IptcType::Time, b"130509-0430"), Some(time));

        let err = IptcValue::from_str_typed(IptcType::Date, "2023-02-29").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to convert `2023-02-29` to Date (Day is out of range)"
        );
    }

    #[test]
    fn repeatables_keep_their_order() {
        logger();
        let mut iptc = IptcData::new();
        iptc.add_str("Iptc.Application2.Keywords", "cat").unwrap();
        iptc.set_str("Iptc.Application2.Caption", "a cat").unwrap();
        iptc.add_str("Iptc.Application2.Keywords", "dog").unwrap();
        iptc.add_str("Iptc.Envelope.ModelVersion", "4").unwrap();
        iptc.add_str("Iptc.Application2.Keywords", "bird").unwrap();

        let (back, warnings) = IptcData::parse(&iptc.to_bytes()).unwrap();
        assert!(warnings.is_empty());

        // envelope first, then application2 in number order
        assert_eq!(back.iter().next().map(|d| d.record()), Some(1));
        let keywords: Vec<String> = back
            .iter()
            .filter(|d| d.dataset_name() == "Keywords")
            .map(|d| d.print(&back))
            .collect();
        assert_eq!(keywords, ["cat", "dog", "bird"]);
    }

    #[test]
    fn character_sets() {
        logger();
        let mut iptc = IptcData::new();
        iptc.set(
            IptcKey::new(2, 120),
            IptcValue::String("caf\u{e9}".as_bytes().to_vec()),
        );
        // no declaration: bytes print as latin-1
        assert_eq!(iptc.iter().next().unwrap().print(&iptc), "cafÃ©");

        iptc.set(
            IptcKey::new(CHARACTER_SET.0, CHARACTER_SET.1),
            IptcValue::Undefined(UTF8_DECLARATION.to_vec()),
        );
        assert!(iptc.is_utf8());
        assert_eq!(iptc.get("Iptc.Application2.Caption").unwrap().print(&iptc), "café");
    }

    #[test]
    fn length_limits() {
        let mut iptc = IptcData::new();
        let long = "x".repeat(100);
        assert!(matches!(
            iptc.set_str("Iptc.Application2.ObjectName", &long),
            Err(Error::Iptc(error::IptcError::ValueTooLong { max: 64, .. }))
        ));
    }

    #[test]
    fn unchanged_blocks_are_reused() {
        logger();
        // unsorted on purpose
        let mut block = Vec::new();
        iim::write_dataset(&mut block, 2, 25, b"b");
        iim::write_dataset(&mut block, 2, 5, b"a");

        let (mut iptc, _) = IptcData::parse(&block).unwrap();
        assert_eq!(iptc.to_bytes(), block);

        iptc.set_str("Iptc.Application2.ObjectName", "c").unwrap();
        let out = iptc.to_bytes();
        assert_eq!(&out[..3], &[0x1C, 2, 5]);
    }
}
