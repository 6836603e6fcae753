use imgmeta::{Error, magic_number::{AnyProvider, MagicNumber}};

mod common;

/// Checks that `imgmeta::get` and `imgmeta::parse` agree on every format.
#[test]
fn _get_and_parse() {
    common::logger();

    let exif = common::tiff(&[("Exif.Image.Make", "FUJIFILM")]);
    let files = [
        (common::jpeg(Some(&exif)), MagicNumber::Jpeg, "JPEG"),
        (exif.clone(), MagicNumber::Tiff, "TIFF"),
        (common::png(), MagicNumber::Png, "PNG"),
        (common::webp(), MagicNumber::Webp, "WebP"),
        (common::psd(), MagicNumber::Psd, "PSD"),
        (common::raf(&common::jpeg(Some(&exif))), MagicNumber::Raf, "RAF"),
        (common::crw(), MagicNumber::Crw, "CRW"),
        (common::jp2(), MagicNumber::Jp2, "JPEG 2000"),
        (common::heic(&exif), MagicNumber::Bmff, "BMFF"),
        (common::eps(), MagicNumber::Eps, "EPS"),
        (common::xmp_sidecar(), MagicNumber::XmpSidecar, "XMP"),
    ];

    for (file, ty, format) in files {
        log::debug!("TEST: {ty:?}");

        // try `imgmeta::get`
        let got: Option<MagicNumber> = imgmeta::get(&file);
        assert_eq!(got, Some(ty), "`get` should find matching type");
        assert_eq!(ty.format(), format);

        // and `imgmeta::parse`
        let parsed: AnyProvider = imgmeta::parse(&file)
            .unwrap_or_else(|e| panic!("magic number passed, so {ty:?} should parse. err: {e}"));
        assert_eq!(
            Into::<MagicNumber>::into(parsed),
            ty,
            "`parse` should successfully parse to matching type"
        );

        log::debug!("END TEST {ty:?} (success!)\n\n");
    }
}

#[test]
fn raw_blobs_come_through() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Model", "X-T4")]);

    for file in [
        common::jpeg(Some(&exif)),
        common::raf(&common::jpeg(Some(&exif))),
        common::heic(&exif),
    ] {
        let parsed = imgmeta::parse(&file).unwrap();
        assert_eq!(
            parsed.blobs().exif.as_deref(),
            Some(exif.as_slice()),
            "{:?} should find its Exif",
            parsed.magic_number()
        );
    }
}

#[test]
fn unknown_files_are_rejected() {
    common::logger();
    let file = b"GIF89a\x01\x00\x01\x00".to_vec();
    assert_eq!(imgmeta::get(&file), None);
    assert!(matches!(imgmeta::parse(&file), Err(Error::UnsupportedImageType)));
    assert!(matches!(imgmeta::parse(&Vec::<u8>::new()), Err(Error::UnsupportedImageType)));
}

#[test]
fn broken_files_report_the_format() {
    common::logger();

    // a png signature, but no chunks at all
    let file = b"\x89PNG\r\n\x1a\n".to_vec();
    assert_eq!(imgmeta::get(&file), Some(MagicNumber::Png));
    assert!(matches!(
        imgmeta::parse(&file),
        Err(Error::Provider { format: "PNG", .. })
    ));
}
