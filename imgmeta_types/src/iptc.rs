//! IPTC-IIM records and datasets.
//!
//! IIM groups its datasets into numbered records. We only describe the two
//! that show up in images: the envelope record (`1`) and the application
//! record (`2`). Datasets in other records still round-trip, but they're named
//! `0xNNNN`.

use std::{borrow::Cow, sync::LazyLock};

use rustc_hash::FxHashMap;

/// The envelope record number.
pub const ENVELOPE: u8 = 1;

/// The application record number.
pub const APPLICATION2: u8 = 2;

/// `1:90`, which declares the character set of the whole IIM block.
pub const CHARACTER_SET: (u8, u8) = (ENVELOPE, 90);

/// The `CharacterSet` value that declares UTF-8.
pub const UTF8_DECLARATION: &[u8] = b"\x1b%G";

/// How a dataset's bytes should be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IptcType {
    /// Text, in the block's character set.
    String,

    /// `YYYYMMDD` on the wire, printed as `YYYY-MM-DD`.
    Date,

    /// `HHMMSS±HHMM` on the wire, printed as `HH:MM:SS±HH:MM`.
    Time,

    /// Binary data.
    Undefined,

    /// A big-endian `u16`.
    Short,
}

impl IptcType {
    /// The name used when printing a datum's type.
    pub const fn name(&self) -> &'static str {
        match self {
            IptcType::String => "String",
            IptcType::Date => "Date",
            IptcType::Time => "Time",
            IptcType::Undefined => "Undefined",
            IptcType::Short => "Short",
        }
    }

    /// Finds a type by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            IptcType::String,
            IptcType::Date,
            IptcType::Time,
            IptcType::Undefined,
            IptcType::Short,
        ]
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// Everything we know about one dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetInfo {
    pub record: u8,
    pub number: u8,
    pub name: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub ty: IptcType,
    pub mandatory: bool,
    pub repeatable: bool,
    pub min_len: u32,
    pub max_len: u32,
}

macro_rules! dataset_table {
    (static $table:ident => $record:expr,
        $( $name:ident = $number:expr => {
            title: $title:expr,
            desc: $desc:expr,
            ty: $ty:expr,
            mandatory: $mandatory:expr,
            repeatable: $repeatable:expr,
            len: $min:literal ..= $max:literal,
        },
    )+) => {
        #[doc = "All datasets registered for one record."]
        pub static $table: &[DatasetInfo] = &[
            $(
                DatasetInfo {
                    record: $record,
                    number: $number,
                    name: stringify!($name),
                    title: $title,
                    desc: $desc,
                    ty: $ty,
                    mandatory: $mandatory,
                    repeatable: $repeatable,
                    min_len: $min,
                    max_len: $max,
                },
            )+
        ];
    }
}

/// Every record we have a table for.
pub static RECORDS: &[(u8, &str, &[DatasetInfo])] = &[
    (ENVELOPE, "Envelope", ENVELOPE_DATASETS),
    (APPLICATION2, "Application2", APPLICATION2_DATASETS),
];

static BY_NUMBER: LazyLock<FxHashMap<(u8, u8), &'static DatasetInfo>> = LazyLock::new(|| {
    RECORDS
        .iter()
        .flat_map(|(_, _, table)| table.iter())
        .map(|d| ((d.record, d.number), d))
        .collect()
});

static BY_NAME: LazyLock<FxHashMap<u8, FxHashMap<&'static str, &'static DatasetInfo>>> =
    LazyLock::new(|| {
        RECORDS
            .iter()
            .map(|(record, _, table)| (*record, table.iter().map(|d| (d.name, d)).collect()))
            .collect()
    });

/// Finds a dataset by its record and number.
///
/// ```
/// use imgmeta_types::iptc;
///
/// assert_eq!(iptc::find(2, 25).unwrap().name, "Keywords");
/// assert!(iptc::find(2, 25).unwrap().repeatable);
/// ```
pub fn find(record: u8, number: u8) -> Option<&'static DatasetInfo> {
    BY_NUMBER.get(&(record, number)).copied()
}

/// Finds a dataset by its record and name.
pub fn find_by_name(record: u8, name: &str) -> Option<&'static DatasetInfo> {
    BY_NAME.get(&record)?.get(name).copied()
}

/// The dataset's name, or `0xNNNN` when it isn't registered.
pub fn dataset_name(record: u8, number: u8) -> Cow<'static, str> {
    match find(record, number) {
        Some(d) => Cow::Borrowed(d.name),
        None => Cow::Owned(format!("0x{number:04x}")),
    }
}

/// The dataset number for a name, accepting `0xNNNN`.
pub fn dataset_number(record: u8, name: &str) -> Option<u8> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u8::from_str_radix(hex, 16).ok();
    }
    find_by_name(record, name).map(|d| d.number)
}

/// The record's name, or `0xNNNN` when we don't know it.
pub fn record_name(record: u8) -> Cow<'static, str> {
    match RECORDS.iter().find(|(r, _, _)| *r == record) {
        Some((_, name, _)) => Cow::Borrowed(name),
        None => Cow::Owned(format!("0x{record:04x}")),
    }
}

/// The record number for a name, accepting `0xNNNN`.
pub fn record_number(name: &str) -> Option<u8> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u8::from_str_radix(hex, 16).ok();
    }
    RECORDS
        .iter()
        .find(|(_, n, _)| *n == name)
        .map(|(r, _, _)| *r)
}

use IptcType as Ty;

dataset_table!(static ENVELOPE_DATASETS => ENVELOPE,
    ModelVersion = 0 => {
        title: "Model Version",
        desc: "A binary number identifying the version of the Information Interchange Model.",
        ty: Ty::Short,
        mandatory: true,
        repeatable: false,
        len: 2..=2,
    },
    Destination = 5 => {
        title: "Destination",
        desc: "Routing information.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=1024,
    },
    FileFormat = 20 => {
        title: "File Format",
        desc: "File format of the data described by this metadata.",
        ty: Ty::Short,
        mandatory: true,
        repeatable: false,
        len: 2..=2,
    },
    FileVersion = 22 => {
        title: "File Version",
        desc: "A binary number representing the particular version of the File Format.",
        ty: Ty::Short,
        mandatory: true,
        repeatable: false,
        len: 2..=2,
    },
    ServiceId = 30 => {
        title: "Service ID",
        desc: "Identifies the provider and product.",
        ty: Ty::String,
        mandatory: true,
        repeatable: false,
        len: 0..=10,
    },
    EnvelopeNumber = 40 => {
        title: "Envelope Number",
        desc: "The characters form a number that will be unique for the date.",
        ty: Ty::String,
        mandatory: true,
        repeatable: false,
        len: 8..=8,
    },
    ProductId = 50 => {
        title: "Product ID",
        desc: "Allows a provider to identify subsets of its overall service.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=32,
    },
    EnvelopePriority = 60 => {
        title: "Envelope Priority",
        desc: "Specifies the envelope handling priority.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 1..=1,
    },
    DateSent = 70 => {
        title: "Date Sent",
        desc: "The year, month and day the service sent the material.",
        ty: Ty::Date,
        mandatory: true,
        repeatable: false,
        len: 8..=8,
    },
    TimeSent = 80 => {
        title: "Time Sent",
        desc: "The time the service sent the material.",
        ty: Ty::Time,
        mandatory: false,
        repeatable: false,
        len: 11..=11,
    },
    CharacterSet = 90 => {
        title: "Character Set",
        desc: "Control functions used to announce the coded character set.",
        ty: Ty::Undefined,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    UNO = 100 => {
        title: "Unique Name Object",
        desc: "An eternal, globally unique identification for the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 14..=80,
    },
    ARMId = 120 => {
        title: "ARM Identifier",
        desc: "The DataSet identifies the Abstract Relationship Method.",
        ty: Ty::Short,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    ARMVersion = 122 => {
        title: "ARM Version",
        desc: "A binary number representing the particular version of the ARM.",
        ty: Ty::Short,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
);

dataset_table!(static APPLICATION2_DATASETS => APPLICATION2,
    RecordVersion = 0 => {
        title: "Record Version",
        desc: "A binary number identifying the version of the application record.",
        ty: Ty::Short,
        mandatory: true,
        repeatable: false,
        len: 2..=2,
    },
    ObjectType = 3 => {
        title: "Object Type",
        desc: "The object type reference number and name.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 3..=67,
    },
    ObjectAttribute = 4 => {
        title: "Object Attribute",
        desc: "The object attribute reference number and name.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 4..=68,
    },
    ObjectName = 5 => {
        title: "Object Name",
        desc: "Used as a shorthand reference for the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=64,
    },
    EditStatus = 7 => {
        title: "Edit Status",
        desc: "Status of the object data, according to the practice of the provider.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=64,
    },
    EditorialUpdate = 8 => {
        title: "Editorial Update",
        desc: "Indicates the type of update that this object provides.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    Urgency = 10 => {
        title: "Urgency",
        desc: "Specifies the editorial urgency of content.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 1..=1,
    },
    Subject = 12 => {
        title: "Subject",
        desc: "The subject reference.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 13..=236,
    },
    Category = 15 => {
        title: "Category",
        desc: "Identifies the subject of the object data in the opinion of the provider.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=3,
    },
    SuppCategory = 20 => {
        title: "Supplemental Category",
        desc: "Supplemental categories further refine the subject.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=32,
    },
    FixtureId = 22 => {
        title: "Fixture Id",
        desc: "Identifies object data that recurs often and predictably.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    Keywords = 25 => {
        title: "Keywords",
        desc: "Used to indicate specific information retrieval words.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=64,
    },
    LocationCode = 26 => {
        title: "Location Code",
        desc: "Indicates the code of a country/geographical location referenced by the content.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 3..=3,
    },
    LocationName = 27 => {
        title: "Location Name",
        desc: "Provides a full, publishable name of a country/geographical location.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=64,
    },
    ReleaseDate = 30 => {
        title: "Release Date",
        desc: "The earliest date the provider intends the object to be used.",
        ty: Ty::Date,
        mandatory: false,
        repeatable: false,
        len: 8..=8,
    },
    ReleaseTime = 35 => {
        title: "Release Time",
        desc: "The earliest time the provider intends the object to be used.",
        ty: Ty::Time,
        mandatory: false,
        repeatable: false,
        len: 11..=11,
    },
    ExpirationDate = 37 => {
        title: "Expiration Date",
        desc: "The latest date the provider or owner intends the object to be used.",
        ty: Ty::Date,
        mandatory: false,
        repeatable: false,
        len: 8..=8,
    },
    ExpirationTime = 38 => {
        title: "Expiration Time",
        desc: "The latest time the provider or owner intends the object to be used.",
        ty: Ty::Time,
        mandatory: false,
        repeatable: false,
        len: 11..=11,
    },
    SpecialInstructions = 40 => {
        title: "Special Instructions",
        desc: "Other editorial instructions concerning the use of the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=256,
    },
    ActionAdvised = 42 => {
        title: "Action Advised",
        desc: "Indicates the type of action that this object provides to a previous object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    ReferenceService = 45 => {
        title: "Reference Service",
        desc: "Identifies the Service Identifier of a prior envelope.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=10,
    },
    ReferenceDate = 47 => {
        title: "Reference Date",
        desc: "Identifies the date of a prior envelope.",
        ty: Ty::Date,
        mandatory: false,
        repeatable: true,
        len: 8..=8,
    },
    ReferenceNumber = 50 => {
        title: "Reference Number",
        desc: "Identifies the Envelope Number of a prior envelope.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 8..=8,
    },
    DateCreated = 55 => {
        title: "Date Created",
        desc: "The date the intellectual content of the object was created.",
        ty: Ty::Date,
        mandatory: false,
        repeatable: false,
        len: 8..=8,
    },
    TimeCreated = 60 => {
        title: "Time Created",
        desc: "The time the intellectual content of the object was created.",
        ty: Ty::Time,
        mandatory: false,
        repeatable: false,
        len: 11..=11,
    },
    DigitizationDate = 62 => {
        title: "Digitization Date",
        desc: "The date the digital representation of the object was created.",
        ty: Ty::Date,
        mandatory: false,
        repeatable: false,
        len: 8..=8,
    },
    DigitizationTime = 63 => {
        title: "Digitization Time",
        desc: "The time the digital representation of the object was created.",
        ty: Ty::Time,
        mandatory: false,
        repeatable: false,
        len: 11..=11,
    },
    Program = 65 => {
        title: "Program",
        desc: "Identifies the type of program used to originate the object data.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    ProgramVersion = 70 => {
        title: "Program Version",
        desc: "Used to identify the version of the program mentioned in 2:65.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=10,
    },
    ObjectCycle = 75 => {
        title: "Object Cycle",
        desc: "Used to identify the editorial cycle of object data.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 1..=1,
    },
    Byline = 80 => {
        title: "By-line",
        desc: "Contains name of the creator of the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=32,
    },
    BylineTitle = 85 => {
        title: "By-line Title",
        desc: "A by-line title is the title of the creator or creators of an object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=32,
    },
    City = 90 => {
        title: "City",
        desc: "Identifies city of object data origin.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    SubLocation = 92 => {
        title: "Sub Location",
        desc: "Identifies the location within a city from which the object data originates.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    ProvinceState = 95 => {
        title: "Province State",
        desc: "Identifies Province/State of origin.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    CountryCode = 100 => {
        title: "Country Code",
        desc: "The code of the country/primary location where the object was created.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 3..=3,
    },
    CountryName = 101 => {
        title: "Country Name",
        desc: "Provides full, publishable, name of the country/primary location.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=64,
    },
    TransmissionReference = 103 => {
        title: "Transmission Reference",
        desc: "A code representing the location of original transmission.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    Headline = 105 => {
        title: "Headline",
        desc: "A publishable entry providing a synopsis of the contents of the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=256,
    },
    Credit = 110 => {
        title: "Credit",
        desc: "Identifies the provider of the object, not necessarily the owner/creator.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    Source = 115 => {
        title: "Source",
        desc: "The original owner of the intellectual content of the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=32,
    },
    Copyright = 116 => {
        title: "Copyright",
        desc: "Contains any necessary copyright notice.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=128,
    },
    Contact = 118 => {
        title: "Contact",
        desc: "Identifies the person or organisation which can provide further background.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=128,
    },
    Caption = 120 => {
        title: "Caption",
        desc: "A textual description of the object data.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 0..=2000,
    },
    Writer = 122 => {
        title: "Writer",
        desc: "Identification of the name of the person involved in the writing.",
        ty: Ty::String,
        mandatory: false,
        repeatable: true,
        len: 0..=32,
    },
    RasterizedCaption = 125 => {
        title: "Rasterized Caption",
        desc: "Contains the rasterized object data description.",
        ty: Ty::Undefined,
        mandatory: false,
        repeatable: false,
        len: 7360..=7360,
    },
    ImageType = 130 => {
        title: "Image Type",
        desc: "Indicates the color components of an image.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    ImageOrientation = 131 => {
        title: "Image Orientation",
        desc: "Indicates the layout of an image.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 1..=1,
    },
    Language = 135 => {
        title: "Language",
        desc: "Describes the major national language of the object.",
        ty: Ty::String,
        mandatory: false,
        repeatable: false,
        len: 2..=3,
    },
    PreviewFormat = 200 => {
        title: "Preview Format",
        desc: "A binary number representing the file format of the object data preview.",
        ty: Ty::Short,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    PreviewVersion = 201 => {
        title: "Preview Version",
        desc: "A binary number representing the particular version of the preview file format.",
        ty: Ty::Short,
        mandatory: false,
        repeatable: false,
        len: 2..=2,
    },
    Preview = 202 => {
        title: "Preview Data",
        desc: "Binary image preview data.",
        ty: Ty::Undefined,
        mandatory: false,
        repeatable: false,
        len: 0..=256000,
    },
);
