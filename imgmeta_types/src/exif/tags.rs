//! Definitions for tags in each IFD group.
//!
//! # `tags`
//!
//! This module effectively contains a parse table for an Exif-supporting
//! metadata library. Each group has a static slice of [`TagInfo`], and
//! lookups go through lazily built indices keyed by group.
//!
//! ## For contributors
//!
//! ### Adding new groups
//!
//! 1. add the group's name to [`IfdId`]
//! 2. create a new call to the `tag_table!` macro, pointed at that group
//! 3. add the table to [`TABLES`]
//!
//! ### Adding new tags
//!
//! Let's say we want to add a new tag to `IfdId::Photo`. Let's call it
//! `YourNewKey`; please assume it has a tag ID of `0x1000`, uses type
//! `Ascii`, and may have any length.
//!
//! ```no_compile
//! tag_table!(static PHOTO_TAGS => IfdId::Photo,
//!     // ...snip!
//!
//!     YourNewKey = 0x1000 => {
//!         title: "Your New Key",
//!         desc: "Explains what the key is for.",
//!         ty: Pt::Ascii,
//!         count: Pc::Any,
//!         print: Print::Value,
//!     },
//! );
//! ```

use std::{borrow::Cow, sync::LazyLock};

use rustc_hash::FxHashMap;

use crate::exif::{PrimitiveCount, PrimitiveTy, ifd::IfdId, makernote_tags};

/// Everything we know about one tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagInfo {
    /// The tag ID, as found in an IFD entry.
    pub id: u16,

    /// The name used in keys.
    pub name: &'static str,

    /// A short label.
    pub title: &'static str,

    /// A longer description.
    pub desc: &'static str,

    /// The group that owns the table this tag was registered in.
    pub group: IfdId,

    /// The default kind for new values.
    pub ty: PrimitiveTy,

    /// How many components a value should have.
    pub count: PrimitiveCount,

    /// How to render values for humans.
    pub print: Print,
}

/// Describes how a tag's value is interpreted for printing.
///
/// The actual rendering lives in `imgmeta`, since some interpreters look at
/// other tags in the same Exif block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Print {
    /// Print the raw value.
    Value,

    /// Map a single integer (or Ascii letter) to a name.
    Table(&'static [(i64, &'static str)]),

    /// `1/60 s`
    ExposureTime,

    /// `F2.8`
    FNumber,

    /// `50.0 mm`
    FocalLength,

    /// An APEX aperture value, printed as an F-number.
    ApexAperture,

    /// An APEX shutter speed value, printed as an exposure time.
    ApexShutterSpeed,

    /// `+1/3 EV`
    ExposureBias,

    /// `1.23 m`
    Distance,

    /// Undefined bytes holding a version like `0230`.
    Version,

    /// A comment with a charset prefix. Prints the text only.
    Comment,

    /// `51 deg 10' 41.81"`
    Degrees,

    /// `12:30:05`
    GpsTimeStamp,

    /// `123.4 m`
    GpsAltitude,

    /// `2.3.0.0`
    GpsVersion,

    /// Windows XP-style UCS-2 little-endian text stored in bytes.
    XpString,

    /// `24-70mm F2.8`, built from the four rationals of `LensSpecification`.
    LensSpecification,

    /// A lens ID looked up in a table. Ambiguous IDs print every match.
    Lens(&'static [(i64, &'static str)]),

    /// Canon lens ID, narrowed down by focal length and max aperture.
    CanonLensType,

    /// A Canon EV-encoded aperture.
    CanonAperture,

    /// A Canon focal length in the camera's focal units.
    CanonFocalLength,
}

/// Creates the tag table for one group.
///
/// These may include duplicate tag IDs from other groups.
macro_rules! tag_table {
    (static $table:ident => $group:expr,
        $( $name:ident = $id:expr => {
            title: $title:expr,
            desc: $desc:expr,
            ty: $ty:expr,
            count: $count:expr,
            print: $print:expr,
        },
    )+) => {
        #[doc = "All tags registered for the matching `IfdId`."]
        pub static $table: &[TagInfo] = &[
            $(
                TagInfo {
                    id: $id,
                    name: stringify!($name),
                    title: $title,
                    desc: $desc,
                    group: $group,
                    ty: $ty,
                    count: $count,
                    print: $print,
                },
            )+
        ];
    }
}
pub(crate) use tag_table;

use {PrimitiveCount as Pc, PrimitiveTy as Pt};

/// Each group that has its own table.
pub static TABLES: &[(IfdId, &[TagInfo])] = &[
    (IfdId::Image, IMAGE_TAGS),
    (IfdId::Photo, PHOTO_TAGS),
    (IfdId::GpsInfo, GPS_TAGS),
    (IfdId::Iop, IOP_TAGS),
    (IfdId::MakerNote, MAKERNOTE_TAGS),
    (IfdId::Canon, makernote_tags::CANON_TAGS),
    (IfdId::CanonCs, makernote_tags::CANON_CS_TAGS),
    (IfdId::CanonSi, makernote_tags::CANON_SI_TAGS),
    (IfdId::CanonCf, makernote_tags::CANON_CF_TAGS),
    (IfdId::Nikon2, makernote_tags::NIKON2_TAGS),
    (IfdId::Nikon3, makernote_tags::NIKON3_TAGS),
    (IfdId::NikonLd1, makernote_tags::NIKON_LD1_TAGS),
    (IfdId::NikonLd2, makernote_tags::NIKON_LD2_TAGS),
    (IfdId::NikonLd3, makernote_tags::NIKON_LD3_TAGS),
    (IfdId::NikonLd4, makernote_tags::NIKON_LD4_TAGS),
    (IfdId::Olympus, makernote_tags::OLYMPUS_TAGS),
    (IfdId::Pentax, makernote_tags::PENTAX_TAGS),
    (IfdId::Sony1, makernote_tags::SONY_TAGS),
    (IfdId::Sony2Fp, makernote_tags::SONY2_FP_TAGS),
    (IfdId::Sony2010e, makernote_tags::SONY2010E_TAGS),
    (IfdId::SonyMisc3c, makernote_tags::SONY_MISC3C_TAGS),
    (IfdId::Fujifilm, makernote_tags::FUJIFILM_TAGS),
    (IfdId::Panasonic, makernote_tags::PANASONIC_TAGS),
    (IfdId::Samsung2, makernote_tags::SAMSUNG2_TAGS),
];

/// `(table, tag)` to tag info.
static BY_ID: LazyLock<FxHashMap<IfdId, FxHashMap<u16, &'static TagInfo>>> =
    LazyLock::new(|| {
        TABLES
            .iter()
            .map(|(group, table)| (*group, table.iter().map(|t| (t.id, t)).collect()))
            .collect()
    });

/// `(table, name)` to tag info.
static BY_NAME: LazyLock<FxHashMap<IfdId, FxHashMap<&'static str, &'static TagInfo>>> =
    LazyLock::new(|| {
        TABLES
            .iter()
            .map(|(group, table)| (*group, table.iter().map(|t| (t.name, t)).collect()))
            .collect()
    });

/// Finds a tag registered in the given group's table.
///
/// ```
/// use imgmeta_types::exif::{ifd::IfdId, tags};
///
/// let info = tags::find(IfdId::Thumbnail, 0x0103).unwrap();
/// assert_eq!(info.name, "Compression");
/// ```
pub fn find(group: IfdId, id: u16) -> Option<&'static TagInfo> {
    BY_ID.get(&group.table())?.get(&id).copied()
}

/// Finds a tag by its key name in the given group's table.
pub fn find_by_name(group: IfdId, name: &str) -> Option<&'static TagInfo> {
    BY_NAME.get(&group.table())?.get(name).copied()
}

/// The key name for a tag. Unknown tags are named `0xNNNN`.
pub fn tag_name(group: IfdId, id: u16) -> Cow<'static, str> {
    match find(group, id) {
        Some(info) => Cow::Borrowed(info.name),
        None => Cow::Owned(format!("0x{id:04x}")),
    }
}

/// The tag ID for a key name, accepting the `0xNNNN` form for unknown tags.
pub fn tag_id(group: IfdId, name: &str) -> Option<u16> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u16::from_str_radix(hex, 16).ok();
    }

    find_by_name(group, name).map(|info| info.id)
}

/// Tags that point to another IFD: `(table the pointer is in, tag, target)`.
///
/// `SubIFDs` may point at several directories; they're numbered
/// `SubImage1`, `SubImage2`, and so on.
pub const SUB_IFD_POINTERS: &[(IfdId, u16, IfdId)] = &[
    (IfdId::Image, 0x8769, IfdId::Photo),
    (IfdId::Image, 0x8825, IfdId::GpsInfo),
    (IfdId::Photo, 0xA005, IfdId::Iop),
    (IfdId::Image, 0x014A, IfdId::SubImage(1)),
];

/// The MakerNote tag, found in the Exif IFD.
pub const MAKERNOTE_TAG: u16 = 0x927C;

/// Pairs of `(offset tag, byte count tag)` describing data outside the IFD
/// tree that must be carried along when rewriting.
pub const DATA_AREAS: &[(u16, u16)] = &[
    (0x0111, 0x0117), // strips
    (0x0144, 0x0145), // tiles
    (0x0201, 0x0202), // JPEG thumbnail
];

/// Finds the sub-IFD a pointer tag leads to, if it is one.
pub fn sub_ifd_target(group: IfdId, id: u16) -> Option<IfdId> {
    SUB_IFD_POINTERS
        .iter()
        .find(|(g, t, _)| *g == group.table() && *t == id)
        .map(|(_, _, target)| *target)
}

/*
 *
 *
 *  shared value tables
 *
 *
 */

const ORIENTATION: &[(i64, &str)] = &[
    (1, "top, left"),
    (2, "top, right"),
    (3, "bottom, right"),
    (4, "bottom, left"),
    (5, "left, top"),
    (6, "right, top"),
    (7, "right, bottom"),
    (8, "left, bottom"),
];

const RESOLUTION_UNIT: &[(i64, &str)] = &[(1, "none"), (2, "inch"), (3, "cm")];

const COMPRESSION: &[(i64, &str)] = &[
    (1, "Uncompressed"),
    (2, "CCITT RLE"),
    (5, "LZW"),
    (6, "JPEG (old-style)"),
    (7, "JPEG"),
    (8, "Adobe Deflate"),
    (32773, "PackBits (Macintosh RLE)"),
    (34892, "Lossy JPEG"),
];

const PHOTOMETRIC: &[(i64, &str)] = &[
    (0, "White Is Zero"),
    (1, "Black Is Zero"),
    (2, "RGB"),
    (3, "RGB Palette"),
    (5, "CMYK"),
    (6, "YCbCr"),
    (32803, "Color Filter Array"),
    (34892, "Linear Raw"),
];

const YCBCR_POSITIONING: &[(i64, &str)] = &[(1, "Centered"), (2, "Co-sited")];

const EXPOSURE_PROGRAM: &[(i64, &str)] = &[
    (0, "Not defined"),
    (1, "Manual"),
    (2, "Auto"),
    (3, "Aperture priority"),
    (4, "Shutter priority"),
    (5, "Creative program"),
    (6, "Action program"),
    (7, "Portrait mode"),
    (8, "Landscape mode"),
];

const METERING_MODE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Average"),
    (2, "Center weighted average"),
    (3, "Spot"),
    (4, "Multi-spot"),
    (5, "Multi-segment"),
    (6, "Partial"),
    (255, "Other"),
];

const LIGHT_SOURCE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Daylight"),
    (2, "Fluorescent"),
    (3, "Tungsten (incandescent light)"),
    (4, "Flash"),
    (9, "Fine weather"),
    (10, "Cloudy weather"),
    (11, "Shade"),
    (17, "Standard light A"),
    (18, "Standard light B"),
    (19, "Standard light C"),
    (20, "D55"),
    (21, "D65"),
    (22, "D75"),
    (24, "ISO studio tungsten"),
    (255, "Other light source"),
];

const FLASH: &[(i64, &str)] = &[
    (0x00, "No flash"),
    (0x01, "Fired"),
    (0x05, "Fired, return light not detected"),
    (0x07, "Fired, return light detected"),
    (0x08, "Yes, did not fire"),
    (0x09, "Yes, compulsory"),
    (0x0d, "Yes, compulsory, return light not detected"),
    (0x0f, "Yes, compulsory, return light detected"),
    (0x10, "No, compulsory"),
    (0x14, "No, did not fire, return light not detected"),
    (0x18, "No, auto"),
    (0x19, "Yes, auto"),
    (0x1d, "Yes, auto, return light not detected"),
    (0x1f, "Yes, auto, return light detected"),
    (0x20, "No flash function"),
    (0x41, "Yes, red-eye reduction"),
    (0x45, "Yes, red-eye reduction, return light not detected"),
    (0x47, "Yes, red-eye reduction, return light detected"),
    (0x49, "Yes, compulsory, red-eye reduction"),
    (0x59, "Yes, auto, red-eye reduction"),
];

const COLOR_SPACE: &[(i64, &str)] = &[(1, "sRGB"), (2, "Adobe RGB"), (0xffff, "Uncalibrated")];

const SENSING_METHOD: &[(i64, &str)] = &[
    (1, "Not defined"),
    (2, "One-chip color area"),
    (3, "Two-chip color area"),
    (4, "Three-chip color area"),
    (5, "Color sequential area"),
    (7, "Trilinear sensor"),
    (8, "Color sequential linear"),
];

const FILE_SOURCE: &[(i64, &str)] = &[
    (1, "Film scanner"),
    (2, "Reflexion print scanner"),
    (3, "Digital still camera"),
];

const SCENE_TYPE: &[(i64, &str)] = &[(1, "Directly photographed")];

const CUSTOM_RENDERED: &[(i64, &str)] = &[(0, "Normal process"), (1, "Custom process")];

const EXPOSURE_MODE: &[(i64, &str)] = &[(0, "Auto"), (1, "Manual"), (2, "Auto bracket")];

const WHITE_BALANCE: &[(i64, &str)] = &[(0, "Auto"), (1, "Manual")];

const SCENE_CAPTURE_TYPE: &[(i64, &str)] = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night scene"),
];

const GAIN_CONTROL: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Low gain up"),
    (2, "High gain up"),
    (3, "Low gain down"),
    (4, "High gain down"),
];

const NORMAL_SOFT_HARD: &[(i64, &str)] = &[(0, "Normal"), (1, "Soft"), (2, "Hard")];

const NORMAL_LOW_HIGH: &[(i64, &str)] = &[(0, "Normal"), (1, "Low"), (2, "High")];

const SUBJECT_DISTANCE_RANGE: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Macro"),
    (2, "Close view"),
    (3, "Distant view"),
];

const GPS_LATITUDE_REF: &[(i64, &str)] = &[(b'N' as i64, "North"), (b'S' as i64, "South")];

const GPS_LONGITUDE_REF: &[(i64, &str)] = &[(b'E' as i64, "East"), (b'W' as i64, "West")];

const GPS_ALTITUDE_REF: &[(i64, &str)] = &[(0, "Above sea level"), (1, "Below sea level")];

const GPS_STATUS: &[(i64, &str)] = &[
    (b'A' as i64, "Measurement in progress"),
    (b'V' as i64, "Measurement interrupted"),
];

const GPS_MEASURE_MODE: &[(i64, &str)] = &[
    (b'2' as i64, "Two-dimensional measurement"),
    (b'3' as i64, "Three-dimensional measurement"),
];

const GPS_SPEED_REF: &[(i64, &str)] = &[
    (b'K' as i64, "km/h"),
    (b'M' as i64, "mph"),
    (b'N' as i64, "knots"),
];

const GPS_DIRECTION_REF: &[(i64, &str)] = &[
    (b'T' as i64, "True direction"),
    (b'M' as i64, "Magnetic direction"),
];

const GPS_DIFFERENTIAL: &[(i64, &str)] = &[
    (0, "Without correction"),
    (1, "Correction applied"),
];

/*
 *
 *
 *  TIFF Rev. 6.0 attributes (IFD 0, IFD 1, and friends)
 *
 *
 */
tag_table!(static IMAGE_TAGS => IfdId::Image,
    NewSubfileType = 0x00FE => {
        title: "New Subfile Type",
        desc: "A general indication of the kind of data contained in this subfile.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ImageWidth = 0x0100 => {
        title: "Image Width",
        desc: "The number of columns of image data.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ImageLength = 0x0101 => {
        title: "Image Length",
        desc: "The number of rows of image data.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    BitsPerSample = 0x0102 => {
        title: "Bits per Sample",
        desc: "The number of bits per image component.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    Compression = 0x0103 => {
        title: "Compression",
        desc: "The compression scheme used for the image data.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(COMPRESSION),
    },
    PhotometricInterpretation = 0x0106 => {
        title: "Photometric Interpretation",
        desc: "The pixel composition.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(PHOTOMETRIC),
    },
    DocumentName = 0x010D => {
        title: "Document Name",
        desc: "The name of the document from which this image was scanned.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    ImageDescription = 0x010E => {
        title: "Image Description",
        desc: "A character string giving the title of the image.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Make = 0x010F => {
        title: "Manufacturer",
        desc: "The manufacturer of the recording equipment.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Model = 0x0110 => {
        title: "Model",
        desc: "The model name or model number of the equipment.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    StripOffsets = 0x0111 => {
        title: "Strip Offsets",
        desc: "For each strip, the byte offset of that strip.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    Orientation = 0x0112 => {
        title: "Orientation",
        desc: "The image orientation viewed in terms of rows and columns.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(ORIENTATION),
    },
    SamplesPerPixel = 0x0115 => {
        title: "Samples per Pixel",
        desc: "The number of components per pixel.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    RowsPerStrip = 0x0116 => {
        title: "Rows per Strip",
        desc: "The number of rows per strip.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    StripByteCounts = 0x0117 => {
        title: "Strip Byte Count",
        desc: "The total number of bytes in each strip.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    XResolution = 0x011A => {
        title: "X-Resolution",
        desc: "The number of pixels per ResolutionUnit in the ImageWidth direction.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    YResolution = 0x011B => {
        title: "Y-Resolution",
        desc: "The number of pixels per ResolutionUnit in the ImageLength direction.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    PlanarConfiguration = 0x011C => {
        title: "Planar Configuration",
        desc: "Indicates whether pixel components are recorded in chunky or planar format.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "Chunky"), (2, "Planar")]),
    },
    ResolutionUnit = 0x0128 => {
        title: "Resolution Unit",
        desc: "The unit for measuring XResolution and YResolution.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(RESOLUTION_UNIT),
    },
    TransferFunction = 0x012D => {
        title: "Transfer Function",
        desc: "A transfer function for the image, described in tabular style.",
        ty: Pt::Short,
        count: Pc::Known(768),
        print: Print::Value,
    },
    Software = 0x0131 => {
        title: "Software",
        desc: "The name and version of the software or firmware used to generate the image.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    DateTime = 0x0132 => {
        title: "Date and Time",
        desc: "The date and time of image creation.",
        ty: Pt::Ascii,
        count: Pc::Known(20),
        print: Print::Value,
    },
    Artist = 0x013B => {
        title: "Artist",
        desc: "The name of the camera owner, photographer or image creator.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    HostComputer = 0x013C => {
        title: "Host Computer",
        desc: "The computer and/or operating system in use at the time of image creation.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    WhitePoint = 0x013E => {
        title: "White Point",
        desc: "The chromaticity of the white point of the image.",
        ty: Pt::Rational,
        count: Pc::Known(2),
        print: Print::Value,
    },
    PrimaryChromaticities = 0x013F => {
        title: "Primary Chromaticities",
        desc: "The chromaticity of the three primary colors of the image.",
        ty: Pt::Rational,
        count: Pc::Known(6),
        print: Print::Value,
    },
    TileWidth = 0x0142 => {
        title: "Tile Width",
        desc: "The tile width in pixels.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    TileLength = 0x0143 => {
        title: "Tile Length",
        desc: "The tile length (height) in pixels.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    TileOffsets = 0x0144 => {
        title: "Tile Offsets",
        desc: "For each tile, the byte offset of that tile.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    TileByteCounts = 0x0145 => {
        title: "Tile Byte Counts",
        desc: "For each tile, the number of (compressed) bytes in that tile.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    SubIFDs = 0x014A => {
        title: "SubIFD Offsets",
        desc: "Offsets to child IFDs.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    JPEGInterchangeFormat = 0x0201 => {
        title: "JPEG Interchange Format",
        desc: "The offset to the start byte of a JPEG stream.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    JPEGInterchangeFormatLength = 0x0202 => {
        title: "JPEG Interchange Format Length",
        desc: "The number of bytes of JPEG compressed thumbnail data.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    YCbCrCoefficients = 0x0211 => {
        title: "YCbCr Coefficients",
        desc: "The matrix coefficients for transformation from RGB to YCbCr image data.",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::Value,
    },
    YCbCrSubSampling = 0x0212 => {
        title: "YCbCr Sub-Sampling",
        desc: "The sampling ratio of chrominance components in relation to the luminance component.",
        ty: Pt::Short,
        count: Pc::Known(2),
        print: Print::Value,
    },
    YCbCrPositioning = 0x0213 => {
        title: "YCbCr Positioning",
        desc: "The position of chrominance components in relation to the luminance component.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(YCBCR_POSITIONING),
    },
    ReferenceBlackWhite = 0x0214 => {
        title: "Reference Black/White",
        desc: "The reference black point value and reference white point value.",
        ty: Pt::Rational,
        count: Pc::Known(6),
        print: Print::Value,
    },
    XMLPacket = 0x02BC => {
        title: "XML Packet",
        desc: "XMP metadata.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::Value,
    },
    Rating = 0x4746 => {
        title: "Windows Rating",
        desc: "Rating tag used by Windows.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Copyright = 0x8298 => {
        title: "Copyright",
        desc: "Copyright information.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    IPTCNAA = 0x83BB => {
        title: "IPTC/NAA",
        desc: "Contains an IPTC/NAA record.",
        ty: Pt::Long,
        count: Pc::Any,
        print: Print::Value,
    },
    ImageResources = 0x8649 => {
        title: "Image Resources Block",
        desc: "Contains information embedded by Adobe Photoshop.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    ExifTag = 0x8769 => {
        title: "Exif IFD Pointer",
        desc: "A pointer to the Exif IFD.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    InterColorProfile = 0x8773 => {
        title: "Inter Color Profile",
        desc: "An ICC profile.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    GPSTag = 0x8825 => {
        title: "GPS Info IFD Pointer",
        desc: "A pointer to the GPS Info IFD.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    XPTitle = 0x9C9B => {
        title: "Windows Title",
        desc: "Title tag used by Windows, encoded in UCS2.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::XpString,
    },
    XPComment = 0x9C9C => {
        title: "Windows Comment",
        desc: "Comment tag used by Windows, encoded in UCS2.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::XpString,
    },
    XPAuthor = 0x9C9D => {
        title: "Windows Author",
        desc: "Author tag used by Windows, encoded in UCS2.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::XpString,
    },
    XPKeywords = 0x9C9E => {
        title: "Windows Keywords",
        desc: "Keywords tag used by Windows, encoded in UCS2.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::XpString,
    },
    XPSubject = 0x9C9F => {
        title: "Windows Subject",
        desc: "Subject tag used by Windows, encoded in UCS2.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::XpString,
    },
    PrintImageMatching = 0xC4A5 => {
        title: "Print Image Matching",
        desc: "Print Image Matching information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    DNGVersion = 0xC612 => {
        title: "DNG version",
        desc: "The four-tier version number of the DNG specification this file complies with.",
        ty: Pt::Byte,
        count: Pc::Known(4),
        print: Print::Value,
    },
    DNGBackwardVersion = 0xC613 => {
        title: "DNG backward version",
        desc: "The oldest version of the DNG specification a reader must support.",
        ty: Pt::Byte,
        count: Pc::Known(4),
        print: Print::Value,
    },
    UniqueCameraModel = 0xC614 => {
        title: "Unique Camera Model",
        desc: "A unique, non-localized name for the camera model.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    DNGPrivateData = 0xC634 => {
        title: "DNG Private Data",
        desc: "Private data for the creator of this DNG file.",
        ty: Pt::Byte,
        count: Pc::Any,
        print: Print::Value,
    },
);

/*
 *
 *
 *  Exif IFD
 *
 *
 */
tag_table!(static PHOTO_TAGS => IfdId::Photo,
    ExposureTime = 0x829A => {
        title: "Exposure Time",
        desc: "Exposure time, given in seconds.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::ExposureTime,
    },
    FNumber = 0x829D => {
        title: "FNumber",
        desc: "The F number.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::FNumber,
    },
    ExposureProgram = 0x8822 => {
        title: "Exposure Program",
        desc: "The class of the program used by the camera to set exposure.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(EXPOSURE_PROGRAM),
    },
    SpectralSensitivity = 0x8824 => {
        title: "Spectral Sensitivity",
        desc: "The spectral sensitivity of each channel of the camera used.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    ISOSpeedRatings = 0x8827 => {
        title: "ISO Speed Ratings",
        desc: "The ISO Speed and ISO Latitude of the camera or input device.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    SensitivityType = 0x8830 => {
        title: "Sensitivity Type",
        desc: "Which of the sensitivity parameters is recorded.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ExifVersion = 0x9000 => {
        title: "Exif Version",
        desc: "The version of this standard supported.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    DateTimeOriginal = 0x9003 => {
        title: "Date and Time (original)",
        desc: "The date and time when the original image data was generated.",
        ty: Pt::Ascii,
        count: Pc::Known(20),
        print: Print::Value,
    },
    DateTimeDigitized = 0x9004 => {
        title: "Date and Time (digitized)",
        desc: "The date and time when the image was stored as digital data.",
        ty: Pt::Ascii,
        count: Pc::Known(20),
        print: Print::Value,
    },
    OffsetTime = 0x9010 => {
        title: "Offset Time",
        desc: "The offset from UTC of the time of DateTime.",
        ty: Pt::Ascii,
        count: Pc::Known(7),
        print: Print::Value,
    },
    OffsetTimeOriginal = 0x9011 => {
        title: "Offset Time Original",
        desc: "The offset from UTC of the time of DateTimeOriginal.",
        ty: Pt::Ascii,
        count: Pc::Known(7),
        print: Print::Value,
    },
    ComponentsConfiguration = 0x9101 => {
        title: "Components Configuration",
        desc: "Information specific to compressed data.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    CompressedBitsPerPixel = 0x9102 => {
        title: "Compressed Bits per Pixel",
        desc: "The compression mode used for a compressed image.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ShutterSpeedValue = 0x9201 => {
        title: "Shutter speed",
        desc: "Shutter speed, in APEX units.",
        ty: Pt::SRational,
        count: Pc::Known(1),
        print: Print::ApexShutterSpeed,
    },
    ApertureValue = 0x9202 => {
        title: "Aperture",
        desc: "The lens aperture, in APEX units.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::ApexAperture,
    },
    BrightnessValue = 0x9203 => {
        title: "Brightness",
        desc: "The value of brightness, in APEX units.",
        ty: Pt::SRational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ExposureBiasValue = 0x9204 => {
        title: "Exposure Bias",
        desc: "The exposure bias, in APEX units.",
        ty: Pt::SRational,
        count: Pc::Known(1),
        print: Print::ExposureBias,
    },
    MaxApertureValue = 0x9205 => {
        title: "Max Aperture Value",
        desc: "The smallest F number of the lens, in APEX units.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::ApexAperture,
    },
    SubjectDistance = 0x9206 => {
        title: "Subject Distance",
        desc: "The distance to the subject, given in meters.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Distance,
    },
    MeteringMode = 0x9207 => {
        title: "Metering Mode",
        desc: "The metering mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(METERING_MODE),
    },
    LightSource = 0x9208 => {
        title: "Light Source",
        desc: "The kind of light source.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(LIGHT_SOURCE),
    },
    Flash = 0x9209 => {
        title: "Flash",
        desc: "The status of flash when the image was shot.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(FLASH),
    },
    FocalLength = 0x920A => {
        title: "Focal Length",
        desc: "The actual focal length of the lens, in mm.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::FocalLength,
    },
    SubjectArea = 0x9214 => {
        title: "Subject Area",
        desc: "The location and area of the main subject in the overall scene.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    MakerNote = 0x927C => {
        title: "Maker Note",
        desc: "A tag for manufacturers of Exif writers to record any desired information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    UserComment = 0x9286 => {
        title: "User Comment",
        desc: "A tag for Exif users to write keywords or comments on the image.",
        ty: Pt::Comment,
        count: Pc::Any,
        print: Print::Comment,
    },
    SubSecTime = 0x9290 => {
        title: "Sub-seconds Time",
        desc: "Fractions of seconds for DateTime.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    SubSecTimeOriginal = 0x9291 => {
        title: "Sub-seconds Time Original",
        desc: "Fractions of seconds for DateTimeOriginal.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    SubSecTimeDigitized = 0x9292 => {
        title: "Sub-seconds Time Digitized",
        desc: "Fractions of seconds for DateTimeDigitized.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    FlashpixVersion = 0xA000 => {
        title: "FlashPix Version",
        desc: "The FlashPix format version supported by a FPXR file.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    ColorSpace = 0xA001 => {
        title: "Color Space",
        desc: "The color space information tag.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(COLOR_SPACE),
    },
    PixelXDimension = 0xA002 => {
        title: "Pixel X Dimension",
        desc: "The valid width of the meaningful image.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    PixelYDimension = 0xA003 => {
        title: "Pixel Y Dimension",
        desc: "The valid height of the meaningful image.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    RelatedSoundFile = 0xA004 => {
        title: "Related Sound File",
        desc: "The name of an audio file related to the image data.",
        ty: Pt::Ascii,
        count: Pc::Known(13),
        print: Print::Value,
    },
    InteroperabilityTag = 0xA005 => {
        title: "Interoperability IFD Pointer",
        desc: "A pointer to the Interoperability IFD.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalPlaneXResolution = 0xA20E => {
        title: "Focal Plane X-Resolution",
        desc: "The number of pixels in the image width direction per FocalPlaneResolutionUnit.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalPlaneYResolution = 0xA20F => {
        title: "Focal Plane Y-Resolution",
        desc: "The number of pixels in the image height direction per FocalPlaneResolutionUnit.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalPlaneResolutionUnit = 0xA210 => {
        title: "Focal Plane Resolution Unit",
        desc: "The unit for measuring FocalPlaneXResolution and FocalPlaneYResolution.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(RESOLUTION_UNIT),
    },
    SensingMethod = 0xA217 => {
        title: "Sensing Method",
        desc: "The image sensor type on the camera or input device.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(SENSING_METHOD),
    },
    FileSource = 0xA300 => {
        title: "File Source",
        desc: "The image source.",
        ty: Pt::Undefined,
        count: Pc::Known(1),
        print: Print::Table(FILE_SOURCE),
    },
    SceneType = 0xA301 => {
        title: "Scene Type",
        desc: "The type of scene.",
        ty: Pt::Undefined,
        count: Pc::Known(1),
        print: Print::Table(SCENE_TYPE),
    },
    CFAPattern = 0xA302 => {
        title: "Color Filter Array Pattern",
        desc: "The color filter array geometric pattern of the image sensor.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    CustomRendered = 0xA401 => {
        title: "Custom Rendered",
        desc: "The use of special processing on image data.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(CUSTOM_RENDERED),
    },
    ExposureMode = 0xA402 => {
        title: "Exposure Mode",
        desc: "The exposure mode set when the image was shot.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(EXPOSURE_MODE),
    },
    WhiteBalance = 0xA403 => {
        title: "White Balance",
        desc: "The white balance mode set when the image was shot.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(WHITE_BALANCE),
    },
    DigitalZoomRatio = 0xA404 => {
        title: "Digital Zoom Ratio",
        desc: "The digital zoom ratio when the image was shot.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalLengthIn35mmFilm = 0xA405 => {
        title: "Focal Length In 35mm Film",
        desc: "The equivalent focal length assuming a 35mm film camera, in mm.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SceneCaptureType = 0xA406 => {
        title: "Scene Capture Type",
        desc: "The type of scene that was shot.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(SCENE_CAPTURE_TYPE),
    },
    GainControl = 0xA407 => {
        title: "Gain Control",
        desc: "The degree of overall image gain adjustment.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(GAIN_CONTROL),
    },
    Contrast = 0xA408 => {
        title: "Contrast",
        desc: "The direction of contrast processing applied by the camera.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(NORMAL_SOFT_HARD),
    },
    Saturation = 0xA409 => {
        title: "Saturation",
        desc: "The direction of saturation processing applied by the camera.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(NORMAL_LOW_HIGH),
    },
    Sharpness = 0xA40A => {
        title: "Sharpness",
        desc: "The direction of sharpness processing applied by the camera.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(NORMAL_SOFT_HARD),
    },
    SubjectDistanceRange = 0xA40C => {
        title: "Subject Distance Range",
        desc: "The distance to the subject.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(SUBJECT_DISTANCE_RANGE),
    },
    ImageUniqueID = 0xA420 => {
        title: "Image Unique ID",
        desc: "An identifier assigned uniquely to each image.",
        ty: Pt::Ascii,
        count: Pc::Known(33),
        print: Print::Value,
    },
    CameraOwnerName = 0xA430 => {
        title: "Camera Owner Name",
        desc: "The owner of the camera used to photograph the image.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    BodySerialNumber = 0xA431 => {
        title: "Body Serial Number",
        desc: "The serial number of the body of the camera.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensSpecification = 0xA432 => {
        title: "Lens Specification",
        desc: "Minimum and maximum focal length and F number of the lens.",
        ty: Pt::Rational,
        count: Pc::Known(4),
        print: Print::LensSpecification,
    },
    LensMake = 0xA433 => {
        title: "Lens Make",
        desc: "The lens manufacturer.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensModel = 0xA434 => {
        title: "Lens Model",
        desc: "The lens's model name and model number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensSerialNumber = 0xA435 => {
        title: "Lens Serial Number",
        desc: "The serial number of the interchangeable lens.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

/*
 *
 *
 *  GPS IFD
 *
 *
 */
tag_table!(static GPS_TAGS => IfdId::GpsInfo,
    GPSVersionID = 0x0000 => {
        title: "GPS Version ID",
        desc: "The version of the GPS Info IFD.",
        ty: Pt::Byte,
        count: Pc::Known(4),
        print: Print::GpsVersion,
    },
    GPSLatitudeRef = 0x0001 => {
        title: "GPS Latitude Reference",
        desc: "Whether the latitude is north or south latitude.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_LATITUDE_REF),
    },
    GPSLatitude = 0x0002 => {
        title: "GPS Latitude",
        desc: "The latitude, as degrees, minutes and seconds.",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::Degrees,
    },
    GPSLongitudeRef = 0x0003 => {
        title: "GPS Longitude Reference",
        desc: "Whether the longitude is east or west longitude.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_LONGITUDE_REF),
    },
    GPSLongitude = 0x0004 => {
        title: "GPS Longitude",
        desc: "The longitude, as degrees, minutes and seconds.",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::Degrees,
    },
    GPSAltitudeRef = 0x0005 => {
        title: "GPS Altitude Reference",
        desc: "The altitude used as the reference altitude.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Table(GPS_ALTITUDE_REF),
    },
    GPSAltitude = 0x0006 => {
        title: "GPS Altitude",
        desc: "The altitude based on the reference in GPSAltitudeRef, in meters.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::GpsAltitude,
    },
    GPSTimeStamp = 0x0007 => {
        title: "GPS Time Stamp",
        desc: "The time as UTC (Coordinated Universal Time).",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::GpsTimeStamp,
    },
    GPSSatellites = 0x0008 => {
        title: "GPS Satellites",
        desc: "The GPS satellites used for measurements.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    GPSStatus = 0x0009 => {
        title: "GPS Status",
        desc: "The status of the GPS receiver when the image was recorded.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_STATUS),
    },
    GPSMeasureMode = 0x000A => {
        title: "GPS Measure Mode",
        desc: "The GPS measurement mode.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_MEASURE_MODE),
    },
    GPSDOP = 0x000B => {
        title: "GPS Data Degree of Precision",
        desc: "The GPS DOP (data degree of precision).",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    GPSSpeedRef = 0x000C => {
        title: "GPS Speed Reference",
        desc: "The unit used to express the GPS receiver speed of movement.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_SPEED_REF),
    },
    GPSSpeed = 0x000D => {
        title: "GPS Speed",
        desc: "The speed of GPS receiver movement.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    GPSTrackRef = 0x000E => {
        title: "GPS Track Ref",
        desc: "The reference for giving the direction of GPS receiver movement.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_DIRECTION_REF),
    },
    GPSTrack = 0x000F => {
        title: "GPS Track",
        desc: "The direction of GPS receiver movement.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    GPSImgDirectionRef = 0x0010 => {
        title: "GPS Image Direction Reference",
        desc: "The reference for giving the direction of the image when it is captured.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_DIRECTION_REF),
    },
    GPSImgDirection = 0x0011 => {
        title: "GPS Image Direction",
        desc: "The direction of the image when it was captured.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    GPSMapDatum = 0x0012 => {
        title: "GPS Map Datum",
        desc: "The geodetic survey data used by the GPS receiver.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    GPSDestLatitudeRef = 0x0013 => {
        title: "GPS Destination Latitude Reference",
        desc: "Whether the latitude of the destination point is north or south latitude.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_LATITUDE_REF),
    },
    GPSDestLatitude = 0x0014 => {
        title: "GPS Destination Latitude",
        desc: "The latitude of the destination point.",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::Degrees,
    },
    GPSDestLongitudeRef = 0x0015 => {
        title: "GPS Destination Longitude Reference",
        desc: "Whether the longitude of the destination point is east or west longitude.",
        ty: Pt::Ascii,
        count: Pc::Known(2),
        print: Print::Table(GPS_LONGITUDE_REF),
    },
    GPSDestLongitude = 0x0016 => {
        title: "GPS Destination Longitude",
        desc: "The longitude of the destination point.",
        ty: Pt::Rational,
        count: Pc::Known(3),
        print: Print::Degrees,
    },
    GPSProcessingMethod = 0x001B => {
        title: "GPS Processing Method",
        desc: "The name of the method used for location finding.",
        ty: Pt::Comment,
        count: Pc::Any,
        print: Print::Comment,
    },
    GPSAreaInformation = 0x001C => {
        title: "GPS Area Information",
        desc: "The name of the GPS area.",
        ty: Pt::Comment,
        count: Pc::Any,
        print: Print::Comment,
    },
    GPSDateStamp = 0x001D => {
        title: "GPS Date Stamp",
        desc: "Date and time information relative to UTC.",
        ty: Pt::Ascii,
        count: Pc::Known(11),
        print: Print::Value,
    },
    GPSDifferential = 0x001E => {
        title: "GPS Differential",
        desc: "Whether differential correction is applied to the GPS receiver.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(GPS_DIFFERENTIAL),
    },
);

/*
 *
 *
 *  Interoperability IFD
 *
 *
 */
tag_table!(static IOP_TAGS => IfdId::Iop,
    InteroperabilityIndex = 0x0001 => {
        title: "Interoperability Index",
        desc: "The identification of the Interoperability rule.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    InteroperabilityVersion = 0x0002 => {
        title: "Interoperability Version",
        desc: "The version of the Interoperability rule.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    RelatedImageFileFormat = 0x1000 => {
        title: "Related Image File Format",
        desc: "The file format of the image file.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    RelatedImageWidth = 0x1001 => {
        title: "Related Image Width",
        desc: "The image width.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    RelatedImageLength = 0x1002 => {
        title: "Related Image Length",
        desc: "The image height.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

/*
 *
 *
 *  MakerNote pseudo-tags
 *
 *
 */
tag_table!(static MAKERNOTE_TAGS => IfdId::MakerNote,
    Offset = 0x0001 => {
        title: "Offset",
        desc: "Offset of the makernote from the start of the TIFF header.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ByteOrder = 0x0002 => {
        title: "Byte Order",
        desc: "Byte order used to encode MakerNote tags, 'MM' or 'II'.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

#[cfg(test)]
mod tests {
    use super::*;

    /// Every registered tag must be findable both ways.
    #[test]
    fn lookups_agree() {
        for (group, table) in TABLES {
            for info in *table {
                assert_eq!(info.group, *group, "{} is in the wrong table", info.name);
                assert_eq!(find(*group, info.id), Some(info), "{group}.{}", info.name);
                assert_eq!(tag_id(*group, info.name), Some(info.id), "{group}.{}", info.name);
                assert_eq!(tag_name(*group, info.id), info.name);
            }
        }
    }

    /// A table can't have the same ID or name twice.
    #[test]
    fn no_duplicates() {
        for (group, table) in TABLES {
            let mut ids: Vec<u16> = table.iter().map(|t| t.id).collect();
            ids.sort();
            let before = ids.len();
            ids.dedup();
            assert_eq!(before, ids.len(), "duplicate id in {group}");

            let mut names: Vec<&str> = table.iter().map(|t| t.name).collect();
            names.sort();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate name in {group}");
        }
    }

    #[test]
    fn unknown_tags_are_hex() {
        assert_eq!(tag_name(IfdId::Photo, 0x1234), "0x1234");
        assert_eq!(tag_id(IfdId::Photo, "0x1234"), Some(0x1234));
        assert_eq!(tag_id(IfdId::Photo, "NotATag"), None);
    }

    #[test]
    fn shared_tables() {
        assert_eq!(find(IfdId::SubImage(2), 0x0111).map(|t| t.name), Some("StripOffsets"));
        assert_eq!(sub_ifd_target(IfdId::Image, 0x8769), Some(IfdId::Photo));
        assert_eq!(sub_ifd_target(IfdId::Thumbnail, 0x8825), Some(IfdId::GpsInfo));
        assert_eq!(sub_ifd_target(IfdId::Photo, 0x8825), None);
    }
}
