//! Exif types: primitives, values, IFD groups, and the tag registry.

pub mod ifd;
pub mod lens;
pub mod makernote_tags;
pub mod tags;
pub mod value;

pub use self::value::{Charset, Comment, Value, ValueError};

/// Each blob of Exif will start with a byte order marker - its endianness.
///
/// It's either `II` (Intel, for little-endian) or `MM` (Motorola, for
/// big-endian).
///
/// Keeping this info around is vital for correct parsing and maintaining the
/// many proprietary blocks.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Endianness {
    /// `II` for Intel, little-endian.
    #[default]
    Little,

    /// `MM` for Motorola. Big-endian.
    Big,
}

impl Endianness {
    /// The two marker bytes that start a TIFF header in this byte order.
    pub const fn marker(&self) -> [u8; 2] {
        match self {
            Endianness::Little => *b"II",
            Endianness::Big => *b"MM",
        }
    }

    pub fn u16_bytes(&self, v: u16) -> [u8; 2] {
        match self {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        }
    }

    pub fn u32_bytes(&self, v: u32) -> [u8; 4] {
        match self {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        }
    }

    /// Reads a `u16` from the start of `b`, if there's room.
    pub fn read_u16(&self, b: &[u8]) -> Option<u16> {
        let arr: [u8; 2] = b.get(..2)?.try_into().ok()?;
        Some(match self {
            Endianness::Little => u16::from_le_bytes(arr),
            Endianness::Big => u16::from_be_bytes(arr),
        })
    }

    /// Reads a `u32` from the start of `b`, if there's room.
    pub fn read_u32(&self, b: &[u8]) -> Option<u32> {
        let arr: [u8; 4] = b.get(..4)?.try_into().ok()?;
        Some(match self {
            Endianness::Little => u32::from_le_bytes(arr),
            Endianness::Big => u32::from_be_bytes(arr),
        })
    }
}

impl core::fmt::Display for Endianness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Endianness::Little => "little endian",
            Endianness::Big => "big endian",
        })
    }
}

/// An enumeration of the kinds of value an Exif entry may hold.
///
/// All but `Comment` map one-to-one onto a TIFF wire type. `Comment` is
/// stored as `Undefined` with an eight-byte charset prefix.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PrimitiveTy {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Comment,
}

impl PrimitiveTy {
    /// Every kind, in wire-id order.
    pub const ALL: [PrimitiveTy; 13] = [
        PrimitiveTy::Byte,
        PrimitiveTy::Ascii,
        PrimitiveTy::Short,
        PrimitiveTy::Long,
        PrimitiveTy::Rational,
        PrimitiveTy::SByte,
        PrimitiveTy::Undefined,
        PrimitiveTy::SShort,
        PrimitiveTy::SLong,
        PrimitiveTy::SRational,
        PrimitiveTy::Float,
        PrimitiveTy::Double,
        PrimitiveTy::Comment,
    ];

    /// Grabs the primitive type's size in bytes.
    ///
    /// ```
    /// use imgmeta_types::exif::PrimitiveTy;
    ///
    /// let slong: PrimitiveTy = PrimitiveTy::SLong;
    /// assert_eq!(slong.size_bytes(), 4_u8);
    /// ```
    pub const fn size_bytes(&self) -> u8 {
        match self {
            PrimitiveTy::Byte
            | PrimitiveTy::Ascii
            | PrimitiveTy::SByte
            | PrimitiveTy::Undefined
            | PrimitiveTy::Comment => 1_u8,
            PrimitiveTy::Short | PrimitiveTy::SShort => 2_u8,
            PrimitiveTy::Long | PrimitiveTy::SLong | PrimitiveTy::Float => 4_u8,
            PrimitiveTy::Rational | PrimitiveTy::SRational | PrimitiveTy::Double => 8_u8,
        }
    }

    /// The type ID written into an IFD entry.
    pub const fn wire_id(&self) -> u16 {
        match self {
            PrimitiveTy::Byte => 1,
            PrimitiveTy::Ascii => 2,
            PrimitiveTy::Short => 3,
            PrimitiveTy::Long => 4,
            PrimitiveTy::Rational => 5,
            PrimitiveTy::SByte => 6,
            PrimitiveTy::Undefined | PrimitiveTy::Comment => 7,
            PrimitiveTy::SShort => 8,
            PrimitiveTy::SLong => 9,
            PrimitiveTy::SRational => 10,
            PrimitiveTy::Float => 11,
            PrimitiveTy::Double => 12,
        }
    }

    /// The name used when printing types (`-Py`) or reading them from
    /// modify commands.
    pub const fn name(&self) -> &'static str {
        match self {
            PrimitiveTy::Byte => "Byte",
            PrimitiveTy::Ascii => "Ascii",
            PrimitiveTy::Short => "Short",
            PrimitiveTy::Long => "Long",
            PrimitiveTy::Rational => "Rational",
            PrimitiveTy::SByte => "SByte",
            PrimitiveTy::Undefined => "Undefined",
            PrimitiveTy::SShort => "SShort",
            PrimitiveTy::SLong => "SLong",
            PrimitiveTy::SRational => "SRational",
            PrimitiveTy::Float => "Float",
            PrimitiveTy::Double => "Double",
            PrimitiveTy::Comment => "Comment",
        }
    }

    /// Finds a type by its printed name. Case doesn't matter.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }
}

impl TryFrom<u16> for PrimitiveTy {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ascii),
            3 => Ok(Self::Short),
            4 => Ok(Self::Long),
            5 => Ok(Self::Rational),
            6 => Ok(Self::SByte),
            7 => Ok(Self::Undefined),
            8 => Ok(Self::SShort),
            9 => Ok(Self::SLong),
            10 => Ok(Self::SRational),
            11 => Ok(Self::Float),
            12 => Ok(Self::Double),

            _ => Err(()),
        }
    }
}

impl core::fmt::Display for PrimitiveTy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// How many primitives a registered tag stores.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PrimitiveCount {
    /// There are exactly `n` primitives.
    Known(u32),

    /// Any number is allowed.
    Any,
}

impl PrimitiveCount {
    /// Checks a count read from a file against this expectation.
    pub const fn accepts(&self, count: u32) -> bool {
        match self {
            PrimitiveCount::Known(n) => *n == count,
            PrimitiveCount::Any => true,
        }
    }
}

/// A fraction that can't be negative.
///
/// Both the numerator (top number) and denominator (bottom number) are always
/// positive numbers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The fraction as a float. A zero denominator gives `None`.
    pub fn to_f64(&self) -> Option<f64> {
        (self.denominator != 0).then(|| self.numerator as f64 / self.denominator as f64)
    }
}

impl core::fmt::Display for Rational {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A signed fraction.
///
/// Both the numerator (top number) and denominator (bottom number) can be
/// negative.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The fraction as a float. A zero denominator gives `None`.
    pub fn to_f64(&self) -> Option<f64> {
        (self.denominator != 0).then(|| self.numerator as f64 / self.denominator as f64)
    }
}

impl core::fmt::Display for SRational {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::{Endianness, PrimitiveTy};

    #[test]
    fn wire_ids_round_trip() {
        for ty in PrimitiveTy::ALL {
            let back = PrimitiveTy::try_from(ty.wire_id()).unwrap();

            // comments are undefined on the wire
            if ty == PrimitiveTy::Comment {
                assert_eq!(back, PrimitiveTy::Undefined);
            } else {
                assert_eq!(back, ty);
            }
        }

        assert!(PrimitiveTy::try_from(0).is_err());
        assert!(PrimitiveTy::try_from(13).is_err());
    }

    #[test]
    fn type_names() {
        assert_eq!(PrimitiveTy::from_name("srational"), Some(PrimitiveTy::SRational));
        assert_eq!(PrimitiveTy::from_name("Ascii"), Some(PrimitiveTy::Ascii));
        assert_eq!(PrimitiveTy::from_name("Text"), None);
    }

    #[test]
    fn endian_reads() {
        assert_eq!(Endianness::Big.read_u16(&[0x01, 0x02]), Some(0x0102));
        assert_eq!(Endianness::Little.read_u16(&[0x01, 0x02]), Some(0x0201));
        assert_eq!(Endianness::Little.read_u32(&[0x01, 0x02]), None);
        assert_eq!(Endianness::Big.u32_bytes(8), [0, 0, 0, 8]);
    }
}
