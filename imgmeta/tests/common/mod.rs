//! Small files for the integration tests, built in code.

#![allow(dead_code)]

use imgmeta::ExifData;

pub fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// The bytes of an Exif block holding the given `(key, value)` pairs.
pub fn tiff(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut exif = ExifData::new();
    for (key, value) in pairs {
        exif.set_str(key, value).unwrap();
    }
    exif.to_bytes().unwrap()
}

/// A little-endian TIFF with an empty IFD0.
pub fn empty_tiff() -> Vec<u8> {
    [
        b"II*\0".as_slice(),
        &8_u32.to_le_bytes(), // ifd0 offset
        &0_u16.to_le_bytes(), // no entries
        &0_u32.to_le_bytes(), // no next ifd
    ]
    .concat()
}

// jpeg

/// Start of scan, some entropy-coded data, then end of image.
pub fn scan() -> Vec<u8> {
    [
        [0xFF, 0xDA, 0x00, 0x08, 1, 1, 0, 0, 0x3F, 0].as_slice(),
        &[0x12, 0x34, 0x56, 0x78, 0xFF, 0xD9],
    ]
    .concat()
}

pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    [
        [0xFF, marker].as_slice(),
        &((payload.len() + 2) as u16).to_be_bytes(),
        payload,
    ]
    .concat()
}

/// A JPEG with a JFIF header, maybe an Exif block, then image data.
pub fn jpeg(exif: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend(segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"));
    if let Some(tiff) = exif {
        out.extend(segment(0xE1, &[b"Exif\0\0".as_slice(), tiff].concat()));
    }
    out.extend(scan());
    out
}

// png

fn png_chunk(out: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(ty);
    out.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(ty);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// A 1x1 grayscale PNG.
pub fn png() -> Vec<u8> {
    use std::io::Write as _;

    let mut idat = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    idat.write_all(&[0, 0]).unwrap();
    let idat = idat.finish().unwrap();

    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    let ihdr = [
        1_u32.to_be_bytes().as_slice(), // width
        &1_u32.to_be_bytes(),           // height
        &[8, 0, 0, 0, 0],               // depth, color type, compression, filter, interlace
    ]
    .concat();
    png_chunk(&mut out, b"IHDR", &ihdr);
    png_chunk(&mut out, b"IDAT", &idat);
    png_chunk(&mut out, b"IEND", &[]);
    out
}

// webp

/// A lossless 1x1 WebP.
pub fn webp() -> Vec<u8> {
    let vp8l = [[0x2F].as_slice(), &0_u32.to_le_bytes(), &[0; 5]].concat();
    let chunks = [b"VP8L".as_slice(), &(vp8l.len() as u32).to_le_bytes(), &vp8l].concat();

    [
        b"RIFF".as_slice(),
        &((chunks.len() + 4) as u32).to_le_bytes(),
        b"WEBP",
        &chunks,
    ]
    .concat()
}

// psd

/// A 1x1 RGB PSD with no image resources.
pub fn psd() -> Vec<u8> {
    [
        b"8BPS".as_slice(),
        &1_u16.to_be_bytes(), // version
        &[0; 6],              // reserved
        &3_u16.to_be_bytes(), // channels
        &1_u32.to_be_bytes(), // height
        &1_u32.to_be_bytes(), // width
        &8_u16.to_be_bytes(), // depth
        &3_u16.to_be_bytes(), // mode (rgb)
        &0_u32.to_be_bytes(), // color mode data
        &0_u32.to_be_bytes(), // image resources
        &0_u32.to_be_bytes(), // layers
        &[0, 0, 1, 2, 3],     // image data
    ]
    .concat()
}

// iso-bmff

pub fn boxed(ty: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    [
        ((payload.len() + 8) as u32).to_be_bytes().as_slice(),
        ty,
        payload,
    ]
    .concat()
}

/// A JPEG 2000 file with a header and an empty codestream.
pub fn jp2() -> Vec<u8> {
    [
        boxed(b"jP  ", b"\r\n\x87\n").as_slice(),
        &boxed(b"ftyp", b"jp2 \0\0\0\0jp2 "),
        &boxed(b"jp2h", &boxed(b"ihdr", &[0; 14])),
        &boxed(b"jp2c", &[0xFF, 0x4F, 0xFF, 0xD9]),
    ]
    .concat()
}

/// The `meta` box of a HEIC with one `Exif` item at `exif_at`.
fn heic_meta(exif_at: u32, exif_len: u32) -> Vec<u8> {
    let hdlr = boxed(
        b"hdlr",
        &[
            [0, 0, 0, 0].as_slice(), // version, flags
            &[0; 4],                 // pre_defined
            b"pict",                 // handler
            &[0; 12],                // reserved
            b"\0",                   // name
        ]
        .concat(),
    );
    let infe = boxed(
        b"infe",
        &[
            [2, 0, 0, 0].as_slice(), // version 2
            &1_u16.to_be_bytes(),    // item id
            &0_u16.to_be_bytes(),    // protection index
            b"Exif",                 // item type
            b"\0",                   // name
        ]
        .concat(),
    );
    let iinf = boxed(
        b"iinf",
        &[[0, 0, 0, 0].as_slice(), &1_u16.to_be_bytes(), &infe].concat(),
    );
    let iloc = boxed(
        b"iloc",
        &[
            [1, 0, 0, 0].as_slice(), // version 1
            &[0x44, 0x00],           // offset/length 4 bytes, no base, no index
            &1_u16.to_be_bytes(),    // item count
            &1_u16.to_be_bytes(),    // item id
            &0_u16.to_be_bytes(),    // construction method 0
            &0_u16.to_be_bytes(),    // data reference index
            &1_u16.to_be_bytes(),    // extent count
            &exif_at.to_be_bytes(),
            &exif_len.to_be_bytes(),
        ]
        .concat(),
    );
    let ispe = boxed(
        b"ispe",
        &[
            [0, 0, 0, 0].as_slice(),
            &4032_u32.to_be_bytes(),
            &3024_u32.to_be_bytes(),
        ]
        .concat(),
    );
    let iprp = boxed(b"iprp", &boxed(b"ipco", &ispe));

    boxed(
        b"meta",
        &[[0, 0, 0, 0].as_slice(), &hdlr, &iinf, &iloc, &iprp].concat(),
    )
}

/// A HEIC whose `Exif` item holds `tiff`, right after the `meta` box.
pub fn heic(tiff: &[u8]) -> Vec<u8> {
    let ftyp = boxed(b"ftyp", b"heic\0\0\0\0mif1heic");
    let item = [0_u32.to_be_bytes().as_slice(), tiff].concat();

    let exif_at = (ftyp.len() + heic_meta(0, 0).len()) as u32;
    [
        ftyp.as_slice(),
        &heic_meta(exif_at, item.len() as u32),
        &item,
    ]
    .concat()
}

// everything else

pub fn eps() -> Vec<u8> {
    b"%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 10 10\nshowpage\n%%EOF\n".to_vec()
}

pub fn xmp_sidecar() -> Vec<u8> {
    concat!(
        "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n",
        "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">",
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">",
        "<rdf:Description rdf:about=\"\" xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\" xmp:Rating=\"3\"/>",
        "</rdf:RDF></x:xmpmeta>\n",
        "<?xpacket end=\"w\"?>"
    )
    .as_bytes()
    .to_vec()
}

/// A RAF whose preview is `jpeg`.
pub fn raf(jpeg: &[u8]) -> Vec<u8> {
    let mut name = [0_u8; 32];
    name[..4].copy_from_slice(b"X-T4");
    let start = 92_u32;

    [
        b"FUJIFILMCCD-RAW ".as_slice(),
        b"0201",              // format version
        b"FF129502",          // camera id
        &name,                // camera name
        b"0100",              // directory version
        &[0; 20],             // unknown
        &start.to_be_bytes(), // jpeg offset
        &(jpeg.len() as u32).to_be_bytes(),
        jpeg,
    ]
    .concat()
}

/// A CRW with one `MakeModel` record.
pub fn crw() -> Vec<u8> {
    let make_model = b"Canon\0Canon EOS D30\0";
    let dir = [
        1_u16.to_le_bytes().as_slice(),
        &0x080A_u16.to_le_bytes(), // make & model
        &(make_model.len() as u32).to_le_bytes(),
        &0_u32.to_le_bytes(), // at the start of the heap
    ]
    .concat();
    let root = [
        make_model.as_slice(),
        &dir,
        &(make_model.len() as u32).to_le_bytes(),
    ]
    .concat();

    [
        b"II".as_slice(),
        &26_u32.to_le_bytes(),
        b"HEAPCCDR",
        &0x0001_0002_u32.to_le_bytes(), // version
        &[0; 8],                        // reserved
        &root,
    ]
    .concat()
}
