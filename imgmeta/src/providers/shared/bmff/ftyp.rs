use winnow::{Parser, binary::be_u32, combinator::repeat, error::EmptyError, token::take};

use crate::providers::shared::bmff::{BmffBox, fourcc};

/// The file type box. It comes first, and says what the file is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FtypBox {
    pub major_brand: [u8; 4],
    pub minor_version: u32,
    pub compatible_brands: Vec<[u8; 4]>,
}

impl FtypBox {
    /// Reads an `ftyp` from its box.
    pub fn new(b: &BmffBox<'_>) -> Option<Self> {
        if !b.header.box_type.is(b"ftyp") {
            return None;
        }

        let input: &mut &[u8] = &mut &*b.payload;
        let major_brand: [u8; 4] = parse_fourcc(input).ok()?;
        let minor_version: u32 = be_u32::<_, EmptyError>.parse_next(input).ok()?;
        let compatible_brands: Vec<[u8; 4]> =
            repeat(0.., parse_fourcc).parse_next(input).ok()?;

        Some(Self {
            major_brand,
            minor_version,
            compatible_brands,
        })
    }

    /// Reads the `ftyp` at the very start of a file.
    pub fn at_start(file: &[u8]) -> Option<Self> {
        let mut input = file;
        let header = super::parse_header(&mut input).ok()?;
        let len = header.payload_len().unwrap_or(input.len() as u64);
        let payload = input.get(..usize::try_from(len).ok()?)?;
        Self::new(&BmffBox {
            header,
            offset: 0,
            payload,
        })
    }

    /// Whether the major brand or any compatible brand is one of `brands`.
    pub fn has_any(&self, brands: &[&[u8; 4]]) -> bool {
        brands.contains(&&self.major_brand)
            || self.compatible_brands.iter().any(|b| brands.contains(&b))
    }

    /// Brands as text, like `heic (mif1, heic)`.
    pub fn describe(&self) -> String {
        let compatible: Vec<String> = self.compatible_brands.iter().map(fourcc).collect();
        format!("{} ({})", fourcc(&self.major_brand), compatible.join(", "))
    }
}

fn parse_fourcc(input: &mut &[u8]) -> Result<[u8; 4], EmptyError> {
    take::<_, _, EmptyError>(4_usize)
        .parse_next(input)?
        .try_into()
        .map_err(|_| EmptyError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brands() {
        let file = [
            24_u32.to_be_bytes().as_slice(), // size
            b"ftyp",                         // type
            b"heic",                         // major brand
            &0_u32.to_be_bytes(),            // minor version
            b"mif1heic",                     // compatible brands
        ]
        .concat();

        let ftyp = FtypBox::at_start(&file).unwrap();
        assert_eq!(&ftyp.major_brand, b"heic");
        assert_eq!(ftyp.compatible_brands, [*b"mif1", *b"heic"]);
        assert!(ftyp.has_any(&[b"avif", b"mif1"]));
        assert!(!ftyp.has_any(&[b"avif"]));
        assert_eq!(ftyp.describe(), "heic (mif1, heic)");
    }
}
