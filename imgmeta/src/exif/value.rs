//! Reads and writes [`Value`]s against the wire.
//!
//! The byte order belongs to the enclosing IFD, so both directions take it
//! as an argument.

use winnow::{
    Parser,
    binary::{Endianness as WinnowEndianness, f32, f64, i8, i16, i32, u8, u16, u32},
    error::EmptyError,
};

use imgmeta_types::exif::{Endianness, PrimitiveTy, Rational, SRational, Value};

/// Maps our byte order onto `winnow`'s.
pub(crate) const fn winnow_order(endianness: Endianness) -> WinnowEndianness {
    match endianness {
        Endianness::Little => WinnowEndianness::Little,
        Endianness::Big => WinnowEndianness::Big,
    }
}

/// Converts values to and from the bytes of an IFD entry.
pub trait WireValue: Sized {
    /// Parses `count` elements of wire type `type_id` out of `bytes`.
    ///
    /// If `bytes` holds fewer whole elements than `count`, only those are
    /// kept. Unknown type IDs keep the bytes as they are.
    fn parse(bytes: &[u8], type_id: u16, count: u32, order: Endianness) -> Self;

    /// The bytes this value is written as.
    fn serialize(&self, order: Endianness) -> Vec<u8>;
}

/// Parses up to `count` elements, stopping early when the input runs dry.
fn elements<'i, O, P>(input: &mut &'i [u8], count: u32, mut parser: P) -> Vec<O>
where
    P: Parser<&'i [u8], O, EmptyError>,
{
    let mut out = Vec::with_capacity((count as usize).min(input.len()));
    for _ in 0..count {
        match parser.parse_next(input) {
            Ok(v) => out.push(v),
            Err(_) => break,
        }
    }
    out
}

impl WireValue for Value {
    fn parse(bytes: &[u8], type_id: u16, count: u32, order: Endianness) -> Self {
        let e = winnow_order(order);
        let input = &mut &bytes[..];

        let Ok(ty) = PrimitiveTy::try_from(type_id) else {
            return Value::Unknown {
                type_id,
                bytes: bytes.to_vec(),
            };
        };

        match ty {
            PrimitiveTy::Byte => Value::Byte(elements(input, count, u8)),
            PrimitiveTy::Undefined | PrimitiveTy::Comment => {
                Value::Undefined(elements(input, count, u8))
            }
            PrimitiveTy::SByte => Value::SByte(elements(input, count, i8)),
            PrimitiveTy::Ascii => {
                let raw = &bytes[..bytes.len().min(count as usize)];

                // tolerate a missing NUL. the text ends at the end of the
                // buffer in that case
                let trimmed = match raw.iter().rposition(|b| *b != 0) {
                    Some(last) => &raw[..=last],
                    None => &[],
                };

                Value::Ascii(match core::str::from_utf8(trimmed) {
                    Ok(s) => s.to_string(),
                    Err(_) => trimmed.iter().map(|b| *b as char).collect(),
                })
            }
            PrimitiveTy::Short => Value::Short(elements(input, count, u16(e))),
            PrimitiveTy::SShort => Value::SShort(elements(input, count, i16(e))),
            PrimitiveTy::Long => Value::Long(elements(input, count, u32(e))),
            PrimitiveTy::SLong => Value::SLong(elements(input, count, i32(e))),
            PrimitiveTy::Float => Value::Float(elements(input, count, f32(e))),
            PrimitiveTy::Double => Value::Double(elements(input, count, f64(e))),
            PrimitiveTy::Rational => Value::Rational(elements(
                input,
                count,
                (u32(e), u32(e)).map(|(n, d)| Rational::new(n, d)),
            )),
            PrimitiveTy::SRational => Value::SRational(elements(
                input,
                count,
                (i32(e), i32(e)).map(|(n, d)| SRational::new(n, d)),
            )),
        }
    }

    fn serialize(&self, order: Endianness) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());

        match self {
            Value::Byte(v) | Value::Undefined(v) => out.extend_from_slice(v),
            Value::Unknown { bytes, .. } => out.extend_from_slice(bytes),
            Value::SByte(v) => out.extend(v.iter().map(|b| *b as u8)),
            Value::Ascii(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Value::Short(v) => v.iter().for_each(|n| out.extend(order.u16_bytes(*n))),
            Value::SShort(v) => v
                .iter()
                .for_each(|n| out.extend(order.u16_bytes(*n as u16))),
            Value::Long(v) => v.iter().for_each(|n| out.extend(order.u32_bytes(*n))),
            Value::SLong(v) => v
                .iter()
                .for_each(|n| out.extend(order.u32_bytes(*n as u32))),
            Value::Float(v) => v
                .iter()
                .for_each(|n| out.extend(order.u32_bytes(n.to_bits()))),
            Value::Double(v) => v.iter().for_each(|n| {
                let bits = n.to_bits();
                match order {
                    Endianness::Little => out.extend(bits.to_le_bytes()),
                    Endianness::Big => out.extend(bits.to_be_bytes()),
                }
            }),
            Value::Rational(v) => v.iter().for_each(|r| {
                out.extend(order.u32_bytes(r.numerator));
                out.extend(order.u32_bytes(r.denominator));
            }),
            Value::SRational(v) => v.iter().for_each(|r| {
                out.extend(order.u32_bytes(r.numerator as u32));
                out.extend(order.u32_bytes(r.denominator as u32));
            }),
            Value::Comment(c) => out.extend(c.encode(order)),
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use imgmeta_types::exif::{Charset, Comment, Endianness, Rational, SRational, Value};

    use super::WireValue;
    use crate::util::logger;

    /// Every kind should come back the same, in both byte orders.
    #[test]
    fn kinds_survive_the_wire() {
        logger();

        let values = [
            Value::Byte(vec![0, 1, 255]),
            Value::Ascii("digiKam 0.9.0-svn".into()),
            Value::Short(vec![1, 0xBEEF]),
            Value::Long(vec![u32::MAX, 8]),
            Value::Rational(vec![Rational::new(51, 1), Rational::new(106969, 10000)]),
            Value::SByte(vec![-128, 127]),
            Value::Undefined(b"0230".to_vec()),
            Value::SShort(vec![-2, 300]),
            Value::SLong(vec![-70000]),
            Value::SRational(vec![SRational::new(-1, 3)]),
            Value::Float(vec![1.5, -0.25]),
            Value::Double(vec![core::f64::consts::PI]),
            Value::Unknown {
                type_id: 13,
                bytes: vec![1, 2, 3, 4],
            },
        ];

        for order in [Endianness::Little, Endianness::Big] {
            for v in &values {
                let bytes = v.serialize(order);
                assert_eq!(bytes.len(), v.size(), "size of {v:?}");

                let back = Value::parse(&bytes, v.wire_id(), v.count() as u32, order);
                assert_eq!(&back, v, "{order}");
            }
        }
    }

    #[test]
    fn astral_comments_survive_both_orders() {
        logger();
        let comment = Value::Comment(Comment::new(Charset::Unicode, "clef 𝄞 ok"));

        for order in [Endianness::Little, Endianness::Big] {
            let bytes = comment.serialize(order);
            assert_eq!(&bytes[..8], b"UNICODE\0");

            let Value::Undefined(raw) = Value::parse(&bytes, 7, bytes.len() as u32, order) else {
                panic!("comments are undefined on the wire");
            };
            assert_eq!(Value::Comment(Comment::decode(&raw, order)), comment);
        }
    }

    #[test]
    fn ascii_without_nul_is_tolerated() {
        logger();
        let v = Value::parse(b"Canon", 2, 5, Endianness::Little);
        assert_eq!(v, Value::Ascii("Canon".into()));

        // written back with its terminator
        assert_eq!(v.serialize(Endianness::Little), b"Canon\0");
    }

    #[test]
    fn short_buffers_keep_whole_elements() {
        logger();
        let v = Value::parse(&[1, 0, 2, 0, 3], 3, 4, Endianness::Little);
        assert_eq!(v, Value::Short(vec![1, 2]));
    }
}
