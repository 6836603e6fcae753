//! Contains stuff related to IFDs.
//!
//! For more info, see the [`IfdId`] enumeration.

/// Identifies which directory (or MakerNote sub-array) a tag was found in.
///
/// The name of each variant, as returned by [`IfdId::group_name`], is the
/// middle part of an Exif key like `Exif.Photo.FNumber`.
///
/// IFD 0 will (optionally) contain keys indicating the locations of sub-IFDs
/// within the metadata slice. These are like pointers, not direct embeds.
/// MakerNote groups are reached through `Exif.Photo.MakerNote`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum IfdId {
    /// "IFD 0", the primary image.
    #[doc(alias = "IFD0")]
    Image,

    /// "IFD 1", usually the thumbnail.
    #[doc(alias = "IFD1")]
    Thumbnail,

    /// Any IFD after the thumbnail in the main chain.
    Image2,
    Image3,

    /// The "Exif" IFD provides camera-based metadata.
    #[doc(alias = "ExifIFD")]
    Photo,

    /// The GPS IFD contains location metadata.
    #[doc(alias = "GPSIFD")]
    GpsInfo,

    /// The interoperability IFD.
    #[doc(alias = "InteropIFD")]
    Iop,

    /// Directories pointed to by `Exif.Image.SubIFDs`, numbered from `1`.
    SubImage(u8),

    /// Pseudo-group for information about the MakerNote itself.
    MakerNote,

    Canon,
    CanonCs,
    CanonSi,
    CanonCf,
    Nikon1,
    Nikon2,
    Nikon3,
    NikonLd1,
    NikonLd2,
    NikonLd3,
    NikonLd4,
    Olympus,
    Olympus2,
    Pentax,
    PentaxDng,
    Sony1,
    Sony2,
    Sony2Fp,
    Sony2010e,
    SonyMisc3c,
    Fujifilm,
    Panasonic,
    Samsung2,
}

/// Every group with a fixed name.
const NAMED: &[IfdId] = &[
    IfdId::Image,
    IfdId::Thumbnail,
    IfdId::Image2,
    IfdId::Image3,
    IfdId::Photo,
    IfdId::GpsInfo,
    IfdId::Iop,
    IfdId::MakerNote,
    IfdId::Canon,
    IfdId::CanonCs,
    IfdId::CanonSi,
    IfdId::CanonCf,
    IfdId::Nikon1,
    IfdId::Nikon2,
    IfdId::Nikon3,
    IfdId::NikonLd1,
    IfdId::NikonLd2,
    IfdId::NikonLd3,
    IfdId::NikonLd4,
    IfdId::Olympus,
    IfdId::Olympus2,
    IfdId::Pentax,
    IfdId::PentaxDng,
    IfdId::Sony1,
    IfdId::Sony2,
    IfdId::Sony2Fp,
    IfdId::Sony2010e,
    IfdId::SonyMisc3c,
    IfdId::Fujifilm,
    IfdId::Panasonic,
    IfdId::Samsung2,
];

impl IfdId {
    /// The group name used in keys.
    pub fn group_name(&self) -> std::borrow::Cow<'static, str> {
        use std::borrow::Cow;

        Cow::Borrowed(match self {
            IfdId::Image => "Image",
            IfdId::Thumbnail => "Thumbnail",
            IfdId::Image2 => "Image2",
            IfdId::Image3 => "Image3",
            IfdId::Photo => "Photo",
            IfdId::GpsInfo => "GPSInfo",
            IfdId::Iop => "Iop",
            IfdId::SubImage(n) => return Cow::Owned(format!("SubImage{n}")),
            IfdId::MakerNote => "MakerNote",
            IfdId::Canon => "Canon",
            IfdId::CanonCs => "CanonCs",
            IfdId::CanonSi => "CanonSi",
            IfdId::CanonCf => "CanonCf",
            IfdId::Nikon1 => "Nikon1",
            IfdId::Nikon2 => "Nikon2",
            IfdId::Nikon3 => "Nikon3",
            IfdId::NikonLd1 => "NikonLd1",
            IfdId::NikonLd2 => "NikonLd2",
            IfdId::NikonLd3 => "NikonLd3",
            IfdId::NikonLd4 => "NikonLd4",
            IfdId::Olympus => "Olympus",
            IfdId::Olympus2 => "Olympus2",
            IfdId::Pentax => "Pentax",
            IfdId::PentaxDng => "PentaxDng",
            IfdId::Sony1 => "Sony1",
            IfdId::Sony2 => "Sony2",
            IfdId::Sony2Fp => "Sony2Fp",
            IfdId::Sony2010e => "Sony2010e",
            IfdId::SonyMisc3c => "SonyMisc3c",
            IfdId::Fujifilm => "Fujifilm",
            IfdId::Panasonic => "Panasonic",
            IfdId::Samsung2 => "Samsung2",
        })
    }

    /// Finds a group by the name used in keys.
    ///
    /// ```
    /// use imgmeta_types::exif::ifd::IfdId;
    ///
    /// assert_eq!(IfdId::from_group_name("GPSInfo"), Some(IfdId::GpsInfo));
    /// assert_eq!(IfdId::from_group_name("SubImage2"), Some(IfdId::SubImage(2)));
    /// assert_eq!(IfdId::from_group_name("Nope"), None);
    /// ```
    pub fn from_group_name(name: &str) -> Option<Self> {
        if let Some(n) = name.strip_prefix("SubImage") {
            return n.parse().ok().filter(|n| *n > 0).map(IfdId::SubImage);
        }

        NAMED.iter().copied().find(|g| g.group_name() == name)
    }

    /// The group whose tag table this group shares.
    ///
    /// For example, the thumbnail IFD uses the same tags as IFD 0.
    pub const fn table(&self) -> IfdId {
        match self {
            IfdId::Image | IfdId::Thumbnail | IfdId::Image2 | IfdId::Image3 | IfdId::SubImage(_) => {
                IfdId::Image
            }
            IfdId::Nikon1 | IfdId::Nikon3 => IfdId::Nikon3,
            IfdId::Olympus | IfdId::Olympus2 => IfdId::Olympus,
            IfdId::Pentax | IfdId::PentaxDng => IfdId::Pentax,
            IfdId::Sony1 | IfdId::Sony2 => IfdId::Sony1,
            other => *other,
        }
    }

    /// Whether this group lives inside a MakerNote.
    pub const fn is_makernote(&self) -> bool {
        !matches!(
            self,
            IfdId::Image
                | IfdId::Thumbnail
                | IfdId::Image2
                | IfdId::Image3
                | IfdId::Photo
                | IfdId::GpsInfo
                | IfdId::Iop
                | IfdId::SubImage(_)
        )
    }

    /// Whether this group is a binary array decoded out of a single
    /// MakerNote entry rather than a real IFD.
    pub const fn is_binary_array(&self) -> bool {
        matches!(
            self,
            IfdId::CanonCs
                | IfdId::CanonSi
                | IfdId::CanonCf
                | IfdId::NikonLd1
                | IfdId::NikonLd2
                | IfdId::NikonLd3
                | IfdId::NikonLd4
                | IfdId::Sony2Fp
                | IfdId::Sony2010e
                | IfdId::SonyMisc3c
        )
    }

    /// The IFD in the main chain at position `index` (zero-based).
    pub const fn main_chain(index: usize) -> Option<IfdId> {
        match index {
            0 => Some(IfdId::Image),
            1 => Some(IfdId::Thumbnail),
            2 => Some(IfdId::Image2),
            3 => Some(IfdId::Image3),
            _ => None,
        }
    }
}

impl core::fmt::Display for IfdId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.group_name())
    }
}

#[cfg(test)]
mod tests {
    use super::{IfdId, NAMED};

    #[test]
    fn names_round_trip() {
        for g in NAMED {
            assert_eq!(IfdId::from_group_name(&g.group_name()), Some(*g));
        }
        assert_eq!(IfdId::from_group_name("SubImage0"), None);
        assert_eq!(IfdId::SubImage(3).to_string(), "SubImage3");
    }

    #[test]
    fn shared_tables() {
        assert_eq!(IfdId::Thumbnail.table(), IfdId::Image);
        assert_eq!(IfdId::SubImage(1).table(), IfdId::Image);
        assert_eq!(IfdId::PentaxDng.table(), IfdId::Pentax);
        assert_eq!(IfdId::Photo.table(), IfdId::Photo);
        assert!(IfdId::CanonCs.is_makernote());
        assert!(IfdId::CanonCs.is_binary_array());
        assert!(!IfdId::GpsInfo.is_makernote());
    }
}
