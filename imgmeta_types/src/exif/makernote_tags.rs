//! Tag tables for vendor MakerNotes.
//!
//! Coverage here is intentionally partial: each table lists the tags that
//! people commonly look for. Anything else still round-trips, it just gets
//! a `0xNNNN` name.
//!
//! Binary-array groups (like `CanonCs`) use the element index (or byte
//! offset, for Nikon and Sony) as their tag ID.

use crate::exif::{
    PrimitiveCount as Pc, PrimitiveTy as Pt,
    ifd::IfdId,
    lens,
    tags::{Print, TagInfo, tag_table},
};

const OFF_ON: &[(i64, &str)] = &[(0, "Off"), (1, "On")];

const CANON_MACRO: &[(i64, &str)] = &[(1, "On"), (2, "Off")];

const CANON_QUALITY: &[(i64, &str)] = &[
    (-1, "n/a"),
    (1, "Economy"),
    (2, "Normal"),
    (3, "Fine"),
    (4, "RAW"),
    (5, "Superfine"),
    (130, "Normal Movie"),
];

const CANON_FLASH_MODE: &[(i64, &str)] = &[
    (-1, "n/a"),
    (0, "Off"),
    (1, "Auto"),
    (2, "On"),
    (3, "Red-eye"),
    (4, "Slow sync"),
    (5, "Auto + red-eye"),
    (6, "On + red-eye"),
    (16, "External"),
];

const CANON_DRIVE_MODE: &[(i64, &str)] = &[
    (0, "Single / timer"),
    (1, "Continuous"),
    (2, "Movie"),
    (3, "Continuous, speed priority"),
    (4, "Continuous, low"),
    (5, "Continuous, high"),
];

const CANON_FOCUS_MODE: &[(i64, &str)] = &[
    (0, "One shot AF"),
    (1, "AI servo AF"),
    (2, "AI focus AF"),
    (3, "Manual focus (3)"),
    (4, "Single"),
    (5, "Continuous"),
    (6, "Manual focus (6)"),
    (16, "Pan focus"),
];

const CANON_EXPOSURE_PROGRAM: &[(i64, &str)] = &[
    (0, "Easy shooting (Auto)"),
    (1, "Program (P)"),
    (2, "Shutter priority (Tv)"),
    (3, "Aperture priority (Av)"),
    (4, "Manual (M)"),
    (5, "A-DEP"),
    (6, "M-DEP"),
    (7, "Bulb"),
];

const CANON_FOCAL_TYPE: &[(i64, &str)] = &[(1, "Fixed"), (2, "Zoom")];

const NIKON_COLOR_SPACE: &[(i64, &str)] = &[(1, "sRGB"), (2, "Adobe RGB")];

const NIKON_ACTIVE_D_LIGHTING: &[(i64, &str)] = &[
    (0, "Off"),
    (1, "Low"),
    (3, "Normal"),
    (5, "High"),
    (7, "Extra High"),
    (0xffff, "Auto"),
];

const SONY_QUALITY: &[(i64, &str)] = &[
    (0, "RAW"),
    (1, "Super Fine"),
    (2, "Fine"),
    (3, "Standard"),
    (4, "Economy"),
    (5, "Extra Fine"),
    (6, "RAW + JPEG"),
    (7, "Compressed RAW"),
    (8, "Compressed RAW + JPEG"),
];

const SONY_FOCUS_MODE: &[(i64, &str)] = &[
    (0, "Manual"),
    (2, "AF-S"),
    (3, "AF-C"),
    (4, "AF-A"),
    (6, "DMF"),
];

const FUJI_SHARPNESS: &[(i64, &str)] = &[
    (1, "Softest"),
    (2, "Soft"),
    (3, "Normal"),
    (4, "Hard"),
    (5, "Hardest"),
    (0x82, "Medium soft"),
    (0x84, "Medium hard"),
    (0x8000, "Film simulation mode"),
    (0xffff, "n/a"),
];

const FUJI_WHITE_BALANCE: &[(i64, &str)] = &[
    (0, "Auto"),
    (256, "Daylight"),
    (512, "Cloudy"),
    (768, "Fluorescent (daylight)"),
    (769, "Fluorescent (warm white)"),
    (770, "Fluorescent (cool white)"),
    (1024, "Incandescent"),
    (3480, "Custom"),
    (3840, "Custom"),
];

const FUJI_FILM_MODE: &[(i64, &str)] = &[
    (0, "PROVIA (F0/Standard)"),
    (0x100, "F1/Studio Portrait"),
    (0x200, "Velvia (F2/Fujichrome)"),
    (0x300, "F3/Studio Portrait Ex"),
    (0x400, "F4/Velvia"),
    (0x500, "Pro Neg. Std"),
    (0x501, "Pro Neg. Hi"),
    (0x600, "Classic Chrome"),
    (0x700, "Eterna"),
    (0x800, "Classic Negative"),
];

const PANASONIC_QUALITY: &[(i64, &str)] = &[
    (1, "TIFF"),
    (2, "High"),
    (3, "Normal"),
    (6, "Very High"),
    (7, "RAW"),
    (9, "Motion Picture"),
];

const PANASONIC_STABILIZATION: &[(i64, &str)] = &[
    (2, "On, Mode 1"),
    (3, "Off"),
    (4, "On, Mode 2"),
    (5, "Panning"),
    (6, "On, Mode 3"),
];

const PENTAX_QUALITY: &[(i64, &str)] = &[
    (0, "Good"),
    (1, "Better"),
    (2, "Best"),
    (3, "TIFF"),
    (4, "RAW"),
    (5, "Premium"),
    (65535, "n/a"),
];

const OLYMPUS_QUALITY: &[(i64, &str)] = &[
    (1, "Standard Quality (SQ)"),
    (2, "High Quality (HQ)"),
    (3, "Super High Quality (SHQ)"),
    (6, "Raw"),
];

/*
 *
 *
 *  Canon
 *
 *
 */
tag_table!(static CANON_TAGS => IfdId::Canon,
    CameraSettings = 0x0001 => {
        title: "Camera Settings",
        desc: "Various camera settings.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    FocalLength = 0x0002 => {
        title: "Focal Length",
        desc: "Focal length.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    ShotInfo = 0x0004 => {
        title: "Shot Info",
        desc: "Shot information.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    Panorama = 0x0005 => {
        title: "Panorama",
        desc: "Panorama.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    ImageType = 0x0006 => {
        title: "Image Type",
        desc: "Image type.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    FirmwareVersion = 0x0007 => {
        title: "Firmware Version",
        desc: "Firmware version.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    FileNumber = 0x0008 => {
        title: "File Number",
        desc: "File number.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    OwnerName = 0x0009 => {
        title: "Owner Name",
        desc: "Owner name.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    SerialNumber = 0x000C => {
        title: "Serial Number",
        desc: "Camera serial number.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    CustomFunctions = 0x000F => {
        title: "Custom Functions",
        desc: "Custom functions.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    ModelID = 0x0010 => {
        title: "Model ID",
        desc: "Model ID.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensModel = 0x0095 => {
        title: "Lens Model",
        desc: "Lens model.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    InternalSerialNumber = 0x0096 => {
        title: "Internal Serial Number",
        desc: "Internal serial number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

tag_table!(static CANON_CS_TAGS => IfdId::CanonCs,
    Macro = 0x0001 => {
        title: "Macro",
        desc: "Macro mode.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_MACRO),
    },
    Selftimer = 0x0002 => {
        title: "Selftimer",
        desc: "Self timer.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Quality = 0x0003 => {
        title: "Quality",
        desc: "Quality.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_QUALITY),
    },
    FlashMode = 0x0004 => {
        title: "Flash Mode",
        desc: "Flash mode setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_FLASH_MODE),
    },
    DriveMode = 0x0005 => {
        title: "Drive Mode",
        desc: "Drive mode setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_DRIVE_MODE),
    },
    FocusMode = 0x0007 => {
        title: "Focus Mode",
        desc: "Focus mode setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_FOCUS_MODE),
    },
    ImageSize = 0x000A => {
        title: "Image Size",
        desc: "Image size.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    EasyMode = 0x000B => {
        title: "Easy Mode",
        desc: "Easy shooting mode.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    DigitalZoom = 0x000C => {
        title: "Digital Zoom",
        desc: "Digital zoom.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Contrast = 0x000D => {
        title: "Contrast",
        desc: "Contrast setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Saturation = 0x000E => {
        title: "Saturation",
        desc: "Saturation setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Sharpness = 0x000F => {
        title: "Sharpness",
        desc: "Sharpness setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ISOSpeed = 0x0010 => {
        title: "ISO Speed Mode",
        desc: "ISO speed setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MeteringMode = 0x0011 => {
        title: "Metering Mode",
        desc: "Metering mode setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusType = 0x0012 => {
        title: "Focus Type",
        desc: "Focus type setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AFPoint = 0x0013 => {
        title: "AF Point",
        desc: "AF point selected.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ExposureProgram = 0x0014 => {
        title: "Exposure Program",
        desc: "Exposure mode setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(CANON_EXPOSURE_PROGRAM),
    },
    LensType = 0x0016 => {
        title: "Lens Type",
        desc: "Lens type.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonLensType,
    },
    LongFocal = 0x0017 => {
        title: "Long Focal",
        desc: "Long focal length of the lens.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonFocalLength,
    },
    ShortFocal = 0x0018 => {
        title: "Short Focal",
        desc: "Short focal length of the lens.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonFocalLength,
    },
    FocalUnits = 0x0019 => {
        title: "Focal Units",
        desc: "Focal units per mm.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxAperture = 0x001A => {
        title: "Max Aperture",
        desc: "Maximum aperture of the lens.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonAperture,
    },
    MinAperture = 0x001B => {
        title: "Min Aperture",
        desc: "Minimum aperture of the lens.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonAperture,
    },
    FlashActivity = 0x001C => {
        title: "Flash Activity",
        desc: "Flash activity.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Did not fire"), (1, "Fired")]),
    },
    FlashDetails = 0x001D => {
        title: "Flash Details",
        desc: "Flash details.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusContinuous = 0x0020 => {
        title: "Focus Continuous",
        desc: "Focus continuous setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Single"), (1, "Continuous"), (8, "Manual")]),
    },
    AESetting = 0x0021 => {
        title: "AESetting",
        desc: "AE setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ImageStabilization = 0x0022 => {
        title: "Image Stabilization",
        desc: "Image stabilization.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    DisplayAperture = 0x0023 => {
        title: "Display Aperture",
        desc: "Display aperture.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ZoomSourceWidth = 0x0024 => {
        title: "Zoom Source Width",
        desc: "Zoom source width.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ZoomTargetWidth = 0x0025 => {
        title: "Zoom Target Width",
        desc: "Zoom target width.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SpotMeteringMode = 0x0027 => {
        title: "Spot Metering Mode",
        desc: "Spot metering mode.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Center"), (1, "AF Point")]),
    },
    PhotoEffect = 0x0028 => {
        title: "Photo Effect",
        desc: "Photo effect.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ManualFlashOutput = 0x0029 => {
        title: "Manual Flash Output",
        desc: "Manual flash output.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ColorTone = 0x002A => {
        title: "Color Tone",
        desc: "Color tone.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SRAWQuality = 0x002E => {
        title: "SRAW Quality Tone",
        desc: "SRAW quality.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static CANON_SI_TAGS => IfdId::CanonSi,
    AutoISO = 0x0001 => {
        title: "AutoISO",
        desc: "AutoISO.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ISOSpeed = 0x0002 => {
        title: "ISO Speed Used",
        desc: "ISO speed used.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MeasuredEV = 0x0003 => {
        title: "Measured EV",
        desc: "Measured EV.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    TargetAperture = 0x0004 => {
        title: "Target Aperture",
        desc: "Target Aperture.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonAperture,
    },
    TargetShutterSpeed = 0x0005 => {
        title: "Target Shutter Speed",
        desc: "Target shutter speed.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ExposureCompensation = 0x0006 => {
        title: "Exposure Compensation",
        desc: "Exposure compensation.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    WhiteBalance = 0x0007 => {
        title: "White Balance",
        desc: "White balance setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SlowShutter = 0x0008 => {
        title: "Slow Shutter",
        desc: "Slow shutter setting.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Sequence = 0x0009 => {
        title: "Sequence",
        desc: "Sequence number (if in a continuous burst).",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    OpticalZoomCode = 0x000A => {
        title: "Optical Zoom Code",
        desc: "Optical zoom code.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    CameraTemperature = 0x000C => {
        title: "Camera Temperature",
        desc: "Camera temperature.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FlashGuideNumber = 0x000D => {
        title: "Flash Guide Number",
        desc: "Flash guide number.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AFPointUsed = 0x000E => {
        title: "AF Point Used",
        desc: "AF point used.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FlashBias = 0x000F => {
        title: "Flash Bias",
        desc: "Flash bias.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AutoExposureBracketing = 0x0010 => {
        title: "Auto Exposure Bracketing",
        desc: "Auto exposure bracketing.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SubjectDistance = 0x0013 => {
        title: "Subject Distance",
        desc: "Subject distance (units are not clear).",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ApertureValue = 0x0015 => {
        title: "Aperture Value",
        desc: "Aperture.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::CanonAperture,
    },
    ShutterSpeedValue = 0x0016 => {
        title: "Shutter Speed Value",
        desc: "Shutter speed.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MeasuredEV2 = 0x0017 => {
        title: "Measured EV 2",
        desc: "Measured EV 2.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    CameraType = 0x001A => {
        title: "Camera Type",
        desc: "Camera type.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Table(&[(248, "EOS High-end"), (250, "Compact"), (252, "EOS Mid-range"), (255, "DV Camera")]),
    },
);

tag_table!(static CANON_CF_TAGS => IfdId::CanonCf,
    NoiseReduction = 0x0001 => {
        title: "Noise Reduction",
        desc: "Long exposure noise reduction.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    ShutterAeLock = 0x0002 => {
        title: "Shutter Ae Lock",
        desc: "Shutter/AE lock buttons.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MirrorLockup = 0x0003 => {
        title: "Mirror Lockup",
        desc: "Mirror lockup.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Disable"), (1, "Enable")]),
    },
    ExposureLevelIncrements = 0x0004 => {
        title: "Exposure Level Increments",
        desc: "Tv/Av and exposure level.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "1/2 stop"), (1, "1/3 stop")]),
    },
    AFAssist = 0x0005 => {
        title: "AF Assist",
        desc: "AF assist light.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    FlashSyncSpeedAv = 0x0006 => {
        title: "Flash Sync Speed Av",
        desc: "Shutter speed in Av mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Auto"), (1, "1/200 (fixed)")]),
    },
    AEBSequence = 0x0007 => {
        title: "AEB Sequence",
        desc: "AEB sequence/auto cancellation.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ShutterCurtainSync = 0x0008 => {
        title: "Shutter Curtain Sync",
        desc: "Shutter curtain sync.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "1st-curtain sync"), (1, "2nd-curtain sync")]),
    },
    LensAFStopButton = 0x0009 => {
        title: "Lens AF Stop Button",
        desc: "Lens AF stop button Fn. Switch.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FillFlashAutoReduction = 0x000A => {
        title: "Fill Flash Auto Reduction",
        desc: "Auto reduction of fill flash.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Enable"), (1, "Disable")]),
    },
    MenuButtonReturn = 0x000B => {
        title: "Menu Button Return",
        desc: "Menu button return position.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SetButtonFunction = 0x000C => {
        title: "Set Button Function",
        desc: "SET button func. when shooting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SensorCleaning = 0x000D => {
        title: "Sensor Cleaning",
        desc: "Sensor cleaning.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Disable"), (1, "Enable")]),
    },
    SuperimposedDisplay = 0x000E => {
        title: "Superimposed Display",
        desc: "Superimposed display.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    ShutterReleaseNoCFCard = 0x000F => {
        title: "Shutter Release No CF Card",
        desc: "Shutter Release W/O CF Card.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Yes"), (1, "No")]),
    },
);

/*
 *
 *
 *  Nikon
 *
 *
 */
tag_table!(static NIKON2_TAGS => IfdId::Nikon2,
    Quality = 0x0003 => {
        title: "Quality",
        desc: "Image quality setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ColorMode = 0x0004 => {
        title: "Color Mode",
        desc: "Color mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "Color"), (2, "Monochrome")]),
    },
    ImageAdjustment = 0x0005 => {
        title: "Image Adjustment",
        desc: "Image adjustment setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ISOSpeed = 0x0006 => {
        title: "ISO Speed",
        desc: "ISO speed setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    WhiteBalance = 0x0007 => {
        title: "White Balance",
        desc: "White balance.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Focus = 0x0008 => {
        title: "Focus",
        desc: "Focus mode.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    DigitalZoom = 0x000A => {
        title: "Digital Zoom",
        desc: "Digital zoom.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Converter = 0x000B => {
        title: "Converter",
        desc: "Converter in use.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static NIKON3_TAGS => IfdId::Nikon3,
    Version = 0x0001 => {
        title: "Version",
        desc: "Nikon Makernote version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    ISOSpeed = 0x0002 => {
        title: "ISO Speed",
        desc: "ISO speed setting.",
        ty: Pt::Short,
        count: Pc::Known(2),
        print: Print::Value,
    },
    ColorMode = 0x0003 => {
        title: "Color Mode",
        desc: "Color mode.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Quality = 0x0004 => {
        title: "Quality",
        desc: "Image quality setting.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    WhiteBalance = 0x0005 => {
        title: "White Balance",
        desc: "White balance.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Sharpening = 0x0006 => {
        title: "Sharpening",
        desc: "Image sharpening setting.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Focus = 0x0007 => {
        title: "Focus",
        desc: "Focus mode.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    FlashSetting = 0x0008 => {
        title: "Flash Setting",
        desc: "Flash setting.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    FlashDevice = 0x0009 => {
        title: "Flash Device",
        desc: "Flash device.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    WhiteBalanceBias = 0x000B => {
        title: "White Balance Bias",
        desc: "White balance bias.",
        ty: Pt::SShort,
        count: Pc::Any,
        print: Print::Value,
    },
    WB_RBLevels = 0x000C => {
        title: "WB RB Levels",
        desc: "WB RB levels.",
        ty: Pt::Rational,
        count: Pc::Any,
        print: Print::Value,
    },
    ProgramShift = 0x000D => {
        title: "Program Shift",
        desc: "Program shift.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    ExposureDiff = 0x000E => {
        title: "Exposure Difference",
        desc: "Exposure difference.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    FlashComp = 0x0012 => {
        title: "Flash Comp",
        desc: "Flash compensation setting.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    ISOSettings = 0x0013 => {
        title: "ISO Settings",
        desc: "ISO setting.",
        ty: Pt::Short,
        count: Pc::Known(2),
        print: Print::Value,
    },
    ImageBoundary = 0x0016 => {
        title: "Image Boundary",
        desc: "Image boundary.",
        ty: Pt::Short,
        count: Pc::Known(4),
        print: Print::Value,
    },
    SerialNumber = 0x001D => {
        title: "Serial Number",
        desc: "Serial number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    ColorSpace = 0x001E => {
        title: "Color Space",
        desc: "Color space.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(NIKON_COLOR_SPACE),
    },
    ActiveDLighting = 0x0022 => {
        title: "Active D-Lighting",
        desc: "Active D-lighting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(NIKON_ACTIVE_D_LIGHTING),
    },
    ImageAdjustment = 0x0080 => {
        title: "Image Adjustment",
        desc: "Image adjustment setting.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    ToneComp = 0x0081 => {
        title: "Tone Compensation",
        desc: "Tone compensation.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    AuxiliaryLens = 0x0082 => {
        title: "Auxiliary Lens",
        desc: "Auxiliary lens (adapter).",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensType = 0x0083 => {
        title: "Lens Type",
        desc: "Lens type.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Lens = 0x0084 => {
        title: "Lens",
        desc: "Lens focal lengths and apertures.",
        ty: Pt::Rational,
        count: Pc::Known(4),
        print: Print::LensSpecification,
    },
    FocusDistance = 0x0085 => {
        title: "Focus Distance",
        desc: "Manual focus distance.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    DigitalZoom = 0x0086 => {
        title: "Digital Zoom",
        desc: "Digital zoom setting.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FlashMode = 0x0087 => {
        title: "Flash Mode",
        desc: "Mode of flash used.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ShootingMode = 0x0089 => {
        title: "Shooting Mode",
        desc: "Shooting mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensFStops = 0x008B => {
        title: "Lens FStops",
        desc: "Lens F stops.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    HueAdjustment = 0x0092 => {
        title: "Hue Adjustment",
        desc: "Hue adjustment.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    NoiseReduction = 0x0095 => {
        title: "Noise Reduction",
        desc: "Noise reduction.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensData = 0x0098 => {
        title: "Lens Data",
        desc: "Lens data settings.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    ShutterCount = 0x00A7 => {
        title: "Shutter Count",
        desc: "Number of shots taken by camera.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ImageOptimization = 0x00A9 => {
        title: "Image Optimization",
        desc: "Image optimization.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Saturation = 0x00AA => {
        title: "Saturation",
        desc: "Saturation.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    VariProgram = 0x00AB => {
        title: "Program Variation",
        desc: "Program variation.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

tag_table!(static NIKON_LD1_TAGS => IfdId::NikonLd1,
    Version = 0 => {
        title: "Version",
        desc: "Lens data version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    LensIDNumber = 4 => {
        title: "Lens ID Number",
        desc: "Lens ID number.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensFStops = 5 => {
        title: "Lens F-Stops",
        desc: "Lens F-stops.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MinFocalLength = 6 => {
        title: "Min Focal Length",
        desc: "Minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxFocalLength = 7 => {
        title: "Max Focal Length",
        desc: "Maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMinFocal = 8 => {
        title: "Max Aperture At Min Focal",
        desc: "Maximum aperture at minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMaxFocal = 9 => {
        title: "Max Aperture At Max Focal",
        desc: "Maximum aperture at maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MCUVersion = 10 => {
        title: "MCU Version",
        desc: "MCU version.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static NIKON_LD2_TAGS => IfdId::NikonLd2,
    Version = 0 => {
        title: "Version",
        desc: "Lens data version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    ExitPupilPosition = 4 => {
        title: "Exit Pupil Position",
        desc: "Exit pupil position.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AFAperture = 5 => {
        title: "AF Aperture",
        desc: "AF aperture.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusPosition = 8 => {
        title: "Focus Position",
        desc: "Focus position.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusDistance = 9 => {
        title: "Focus Distance",
        desc: "Focus distance.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalLength = 10 => {
        title: "Focal Length",
        desc: "Focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensIDNumber = 11 => {
        title: "Lens ID Number",
        desc: "Lens ID number.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensFStops = 12 => {
        title: "Lens F-Stops",
        desc: "Lens F-stops.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MinFocalLength = 13 => {
        title: "Min Focal Length",
        desc: "Minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxFocalLength = 14 => {
        title: "Max Focal Length",
        desc: "Maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMinFocal = 15 => {
        title: "Max Aperture At Min Focal",
        desc: "Maximum aperture at minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMaxFocal = 16 => {
        title: "Max Aperture At Max Focal",
        desc: "Maximum aperture at maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MCUVersion = 17 => {
        title: "MCU Version",
        desc: "MCU version.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    EffectiveMaxAperture = 18 => {
        title: "Effective Max Aperture",
        desc: "Effective max aperture.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static NIKON_LD3_TAGS => IfdId::NikonLd3,
    Version = 0 => {
        title: "Version",
        desc: "Lens data version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    ExitPupilPosition = 4 => {
        title: "Exit Pupil Position",
        desc: "Exit pupil position.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AFAperture = 5 => {
        title: "AF Aperture",
        desc: "AF aperture.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusPosition = 8 => {
        title: "Focus Position",
        desc: "Focus position.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusDistance = 10 => {
        title: "Focus Distance",
        desc: "Focus distance.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalLength = 11 => {
        title: "Focal Length",
        desc: "Focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensIDNumber = 12 => {
        title: "Lens ID Number",
        desc: "Lens ID number.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensFStops = 13 => {
        title: "Lens F-Stops",
        desc: "Lens F-stops.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MinFocalLength = 14 => {
        title: "Min Focal Length",
        desc: "Minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxFocalLength = 15 => {
        title: "Max Focal Length",
        desc: "Maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMinFocal = 16 => {
        title: "Max Aperture At Min Focal",
        desc: "Maximum aperture at minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxApertureAtMaxFocal = 17 => {
        title: "Max Aperture At Max Focal",
        desc: "Maximum aperture at maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MCUVersion = 18 => {
        title: "MCU Version",
        desc: "MCU version.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    EffectiveMaxAperture = 19 => {
        title: "Effective Max Aperture",
        desc: "Effective max aperture.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static NIKON_LD4_TAGS => IfdId::NikonLd4,
    Version = 0 => {
        title: "Version",
        desc: "Lens data version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    ExitPupilPosition = 4 => {
        title: "Exit Pupil Position",
        desc: "Exit pupil position.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    AFAperture = 5 => {
        title: "AF Aperture",
        desc: "AF aperture.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusDistance = 9 => {
        title: "Focus Distance",
        desc: "Focus distance.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalLength = 10 => {
        title: "Focal Length",
        desc: "Focal length.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensIDNumber = 12 => {
        title: "Lens ID Number",
        desc: "Lens ID number.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensFStops = 13 => {
        title: "Lens F-Stops",
        desc: "Lens F-stops.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MinFocalLength = 14 => {
        title: "Min Focal Length",
        desc: "Minimum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MaxFocalLength = 15 => {
        title: "Max Focal Length",
        desc: "Maximum focal length.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MCUVersion = 18 => {
        title: "MCU Version",
        desc: "MCU version.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensID = 48 => {
        title: "Lens ID",
        desc: "Lens ID (Z-mount).",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

/*
 *
 *
 *  Olympus / OM System
 *
 *
 */
tag_table!(static OLYMPUS_TAGS => IfdId::Olympus,
    SpecialMode = 0x0200 => {
        title: "Special Mode",
        desc: "Picture taking mode.",
        ty: Pt::Long,
        count: Pc::Known(3),
        print: Print::Value,
    },
    Quality = 0x0201 => {
        title: "Quality",
        desc: "Image quality setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OLYMPUS_QUALITY),
    },
    Macro = 0x0202 => {
        title: "Macro",
        desc: "Macro mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Off"), (1, "On"), (2, "Super macro")]),
    },
    DigitalZoom = 0x0204 => {
        title: "Digital Zoom",
        desc: "Digital zoom ratio.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FirmwareVersion = 0x0207 => {
        title: "Firmware Version",
        desc: "Software firmware version.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    PictureInfo = 0x0208 => {
        title: "Picture Info",
        desc: "ASCII format data such as [PictureInfo].",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    CameraID = 0x0209 => {
        title: "Camera ID",
        desc: "Camera ID data.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    PrintIM = 0x0E00 => {
        title: "Print IM",
        desc: "PrintIM information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    FlashMode = 0x1004 => {
        title: "Flash Mode",
        desc: "Flash mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Equipment = 0x2010 => {
        title: "Equipment Info",
        desc: "Camera equipment sub-IFD.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    CameraSettings = 0x2020 => {
        title: "Camera Settings",
        desc: "Camera settings sub-IFD.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
);

/*
 *
 *
 *  Pentax
 *
 *
 */
tag_table!(static PENTAX_TAGS => IfdId::Pentax,
    Version = 0x0000 => {
        title: "Version",
        desc: "Pentax Makernote version.",
        ty: Pt::Byte,
        count: Pc::Known(4),
        print: Print::Value,
    },
    Mode = 0x0001 => {
        title: "Shooting mode",
        desc: "Camera shooting mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Auto"), (1, "Night-scene"), (2, "Manual")]),
    },
    PreviewResolution = 0x0002 => {
        title: "Resolution of a preview image",
        desc: "Resolution of a preview image.",
        ty: Pt::Short,
        count: Pc::Known(2),
        print: Print::Value,
    },
    PreviewLength = 0x0003 => {
        title: "Length of a preview image",
        desc: "Size of an IFD containing a preview image.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    PreviewOffset = 0x0004 => {
        title: "Pointer to a preview image",
        desc: "Offset to an IFD containing a preview image.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ModelID = 0x0005 => {
        title: "Model identification",
        desc: "Pentax model identification.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Date = 0x0006 => {
        title: "Date",
        desc: "Date.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    Time = 0x0007 => {
        title: "Time",
        desc: "Time.",
        ty: Pt::Undefined,
        count: Pc::Known(3),
        print: Print::Value,
    },
    Quality = 0x0008 => {
        title: "Image quality",
        desc: "Image quality settings.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(PENTAX_QUALITY),
    },
    Flash = 0x000C => {
        title: "Flash mode",
        desc: "Flash mode settings.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    Focus = 0x000D => {
        title: "Focus mode",
        desc: "Focus mode settings.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ExposureTime = 0x0012 => {
        title: "Exposure time",
        desc: "Exposure time.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FNumber = 0x0013 => {
        title: "F-Number",
        desc: "F-Number.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ISO = 0x0014 => {
        title: "ISO sensitivity",
        desc: "ISO sensitivity settings.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    MeteringMode = 0x0017 => {
        title: "Metering mode",
        desc: "Metering mode settings.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Multi Segment"), (1, "Center Weighted"), (2, "Spot")]),
    },
    WhiteBalance = 0x0019 => {
        title: "White balance",
        desc: "White balance type.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocalLength = 0x001D => {
        title: "Focal length",
        desc: "Focal length.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensType = 0x003F => {
        title: "Lens type",
        desc: "Lens type.",
        ty: Pt::Byte,
        count: Pc::Known(2),
        print: Print::Value,
    },
    SerialNumber = 0x0229 => {
        title: "Serial Number",
        desc: "Serial number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

/*
 *
 *
 *  Sony
 *
 *
 */
tag_table!(static SONY_TAGS => IfdId::Sony1,
    Quality = 0x0102 => {
        title: "Image Quality",
        desc: "Image quality.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Table(SONY_QUALITY),
    },
    FlashExposureComp = 0x0104 => {
        title: "Flash Exposure Compensation",
        desc: "Flash exposure compensation in EV.",
        ty: Pt::SRational,
        count: Pc::Known(1),
        print: Print::ExposureBias,
    },
    Teleconverter = 0x0105 => {
        title: "Teleconverter Model",
        desc: "Teleconverter Model.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    WhiteBalanceFineTune = 0x0112 => {
        title: "White Balance Fine Tune",
        desc: "White Balance Fine Tune Value.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    CameraSettings = 0x0114 => {
        title: "Camera Settings",
        desc: "Camera Settings.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    WhiteBalance = 0x0115 => {
        title: "White Balance",
        desc: "White balance.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    PrintIM = 0x0E00 => {
        title: "Print IM",
        desc: "PrintIM information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    MultiBurstMode = 0x1000 => {
        title: "Multi Burst Mode",
        desc: "Multi Burst Mode.",
        ty: Pt::Undefined,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    PreviewImage = 0x2001 => {
        title: "Preview Image",
        desc: "JPEG preview image.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    Rating = 0x2002 => {
        title: "Rating",
        desc: "Rating.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Tag2010e = 0x2010 => {
        title: "Tag 2010e",
        desc: "Enciphered shot information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    PictureEffect = 0x200E => {
        title: "Picture Effect",
        desc: "Picture Effect.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Tag9400 = 0x9400 => {
        title: "Tag 9400",
        desc: "Enciphered shot information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    Tag9402 = 0x9402 => {
        title: "Tag 9402",
        desc: "Enciphered focus information.",
        ty: Pt::Undefined,
        count: Pc::Any,
        print: Print::Value,
    },
    FileFormat = 0xB000 => {
        title: "File Format",
        desc: "File Format.",
        ty: Pt::Byte,
        count: Pc::Known(4),
        print: Print::Value,
    },
    SonyModelID = 0xB001 => {
        title: "Sony Model ID",
        desc: "Sony Model ID.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ColorTemperature = 0xB021 => {
        title: "Color Temperature",
        desc: "Color Temperature.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    LensID = 0xB027 => {
        title: "Lens ID",
        desc: "Lens identifier.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Lens(lens::SONY_LENS),
    },
    ExposureMode = 0xB041 => {
        title: "Exposure Mode",
        desc: "Exposure Mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static SONY2_FP_TAGS => IfdId::Sony2Fp,
    AmbientTemperature = 0x04 => {
        title: "Ambient Temperature",
        desc: "Ambient temperature.",
        ty: Pt::SByte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusMode = 0x16 => {
        title: "Focus Mode",
        desc: "Focus mode.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Table(SONY_FOCUS_MODE),
    },
    AFAreaMode = 0x17 => {
        title: "AF Area Mode",
        desc: "AF area mode.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusPosition2 = 0x2D => {
        title: "Focus Position 2",
        desc: "Focus position 2.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static SONY2010E_TAGS => IfdId::Sony2010e,
    SequenceImageNumber = 0x0000 => {
        title: "Sequence Image Number",
        desc: "Sequence image number.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SequenceFileNumber = 0x0004 => {
        title: "Sequence File Number",
        desc: "Sequence file number.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ReleaseMode2 = 0x0008 => {
        title: "Release Mode 2",
        desc: "Release mode 2.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    DigitalZoomRatio = 0x021A => {
        title: "Digital Zoom Ratio",
        desc: "Digital zoom ratio.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

tag_table!(static SONY_MISC3C_TAGS => IfdId::SonyMisc3c,
    ReleaseMode3 = 0x0009 => {
        title: "Release Mode 3",
        desc: "Release mode 3.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    ShotNumberSincePowerUp = 0x000A => {
        title: "Shot Number Since Power Up",
        desc: "Number of photos taken since the camera was powered up.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SequenceImageNumber = 0x0012 => {
        title: "Sequence Image Number",
        desc: "Number of images captured in burst sequence.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SequenceLength1 = 0x0016 => {
        title: "Sequence Length 1",
        desc: "Length of the sequence of photos taken.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SequenceFileNumber = 0x001A => {
        title: "Sequence File Number",
        desc: "File number in burst sequence.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    SequenceLength2 = 0x001E => {
        title: "Sequence Length 2",
        desc: "Length of the sequence of photos taken.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    CameraOrientation = 0x0029 => {
        title: "Camera Orientation",
        desc: "Orientation of the camera when the photo was taken.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Quality2 = 0x002A => {
        title: "Quality 2",
        desc: "Quality 2.",
        ty: Pt::Byte,
        count: Pc::Known(1),
        print: Print::Value,
    },
);

/*
 *
 *
 *  Fujifilm
 *
 *
 */
tag_table!(static FUJIFILM_TAGS => IfdId::Fujifilm,
    Version = 0x0000 => {
        title: "Version",
        desc: "Fujifilm Makernote version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    SerialNumber = 0x0010 => {
        title: "Serial Number",
        desc: "Serial number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Quality = 0x1000 => {
        title: "Quality",
        desc: "Image quality setting.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    Sharpness = 0x1001 => {
        title: "Sharpness",
        desc: "Sharpness setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(FUJI_SHARPNESS),
    },
    WhiteBalance = 0x1002 => {
        title: "White Balance",
        desc: "White balance setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(FUJI_WHITE_BALANCE),
    },
    Color = 0x1003 => {
        title: "Color",
        desc: "Chroma saturation setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Tone = 0x1004 => {
        title: "Tone",
        desc: "Contrast setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FlashMode = 0x1010 => {
        title: "Flash Mode",
        desc: "Flash firing mode setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Auto"), (1, "On"), (2, "Off"), (3, "Red-eye reduction")]),
    },
    FlashStrength = 0x1011 => {
        title: "Flash Strength",
        desc: "Flash firing strength compensation setting.",
        ty: Pt::SRational,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Macro = 0x1020 => {
        title: "Macro",
        desc: "Macro mode setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    FocusMode = 0x1021 => {
        title: "Focus Mode",
        desc: "Focusing mode setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(0, "Auto"), (1, "Manual")]),
    },
    SlowSync = 0x1030 => {
        title: "Slow Sync",
        desc: "Slow synchro mode setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    PictureMode = 0x1031 => {
        title: "Picture Mode",
        desc: "Picture mode setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Continuous = 0x1100 => {
        title: "Continuous",
        desc: "Continuous shooting or auto bracketing setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    BlurWarning = 0x1300 => {
        title: "Blur Warning",
        desc: "Blur warning status.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    FocusWarning = 0x1301 => {
        title: "Focus Warning",
        desc: "Auto Focus warning status.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    ExposureWarning = 0x1302 => {
        title: "Exposure Warning",
        desc: "Auto exposure warning status.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(OFF_ON),
    },
    DynamicRange = 0x1400 => {
        title: "Dynamic Range",
        desc: "Dynamic range.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "Standard"), (3, "Wide")]),
    },
    FilmMode = 0x1401 => {
        title: "Film Mode",
        desc: "Film mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(FUJI_FILM_MODE),
    },
);

/*
 *
 *
 *  Panasonic
 *
 *
 */
tag_table!(static PANASONIC_TAGS => IfdId::Panasonic,
    Quality = 0x0001 => {
        title: "Quality",
        desc: "Image Quality.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(PANASONIC_QUALITY),
    },
    FirmwareVersion = 0x0002 => {
        title: "Firmware Version",
        desc: "Firmware version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Value,
    },
    WhiteBalance = 0x0003 => {
        title: "White Balance",
        desc: "White balance setting.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    FocusMode = 0x0007 => {
        title: "Focus Mode",
        desc: "Focus mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "Auto"), (2, "Manual"), (4, "Auto, Focus button"), (5, "Auto, Continuous")]),
    },
    ImageStabilization = 0x001A => {
        title: "Image Stabilization",
        desc: "Image stabilization.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(PANASONIC_STABILIZATION),
    },
    Macro = 0x001C => {
        title: "Macro",
        desc: "Macro mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "On"), (2, "Off"), (257, "Tele-macro"), (513, "Macro-zoom")]),
    },
    ShootingMode = 0x001F => {
        title: "Shooting Mode",
        desc: "Shooting mode.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Value,
    },
    Audio = 0x0020 => {
        title: "Audio",
        desc: "Audio.",
        ty: Pt::Short,
        count: Pc::Known(1),
        print: Print::Table(&[(1, "Yes"), (2, "No")]),
    },
    FlashBias = 0x0024 => {
        title: "Flash Bias",
        desc: "Flash bias.",
        ty: Pt::SShort,
        count: Pc::Known(1),
        print: Print::Value,
    },
    InternalSerialNumber = 0x0025 => {
        title: "Internal Serial Number",
        desc: "This number is unique, and contains the date of manufacture.",
        ty: Pt::Undefined,
        count: Pc::Known(16),
        print: Print::Value,
    },
    LensType = 0x0051 => {
        title: "Lens Type",
        desc: "Lens type.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensSerialNumber = 0x0052 => {
        title: "Lens Serial Number",
        desc: "Lens serial number.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
);

/*
 *
 *
 *  Samsung
 *
 *
 */
tag_table!(static SAMSUNG2_TAGS => IfdId::Samsung2,
    MakerNoteVersion = 0x0001 => {
        title: "MakerNote Version",
        desc: "Makernote version.",
        ty: Pt::Undefined,
        count: Pc::Known(4),
        print: Print::Version,
    },
    DeviceType = 0x0002 => {
        title: "Device Type",
        desc: "Device type.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Table(&[(0x1000, "Compact Digital Camera"), (0x2000, "High-end NX Camera"), (0x3000, "HXM Video Camera"), (0x12000, "Cell Phone"), (0x300000, "SMX Video Camera")]),
    },
    SamsungModelID = 0x0003 => {
        title: "Model ID",
        desc: "Model ID.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
    PictureWizard = 0x0021 => {
        title: "Picture Wizard",
        desc: "Picture wizard.",
        ty: Pt::Short,
        count: Pc::Known(5),
        print: Print::Value,
    },
    FirmwareName = 0xA001 => {
        title: "Firmware Name",
        desc: "Firmware name.",
        ty: Pt::Ascii,
        count: Pc::Any,
        print: Print::Value,
    },
    LensType = 0xA003 => {
        title: "Lens Type",
        desc: "Lens type.",
        ty: Pt::Short,
        count: Pc::Any,
        print: Print::Value,
    },
    ExposureTime = 0xA018 => {
        title: "Exposure Time",
        desc: "Exposure time.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::ExposureTime,
    },
    FNumber = 0xA019 => {
        title: "FNumber",
        desc: "The F number.",
        ty: Pt::Rational,
        count: Pc::Known(1),
        print: Print::FNumber,
    },
    FocalLengthIn35mmFormat = 0xA01A => {
        title: "Focal Length In 35mm Format",
        desc: "Focal length in 35mm format.",
        ty: Pt::Long,
        count: Pc::Known(1),
        print: Print::Value,
    },
);
