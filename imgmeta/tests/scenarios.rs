//! Whole-file workflows, start to finish.

use imgmeta::{Image, Severity, WriteState, WriteStrategy, command::Command};

mod common;

fn read(bytes: Vec<u8>) -> Image {
    let mut image = Image::from_bytes(bytes).unwrap();
    image.read_metadata().unwrap();
    image
}

#[test]
fn short_values_are_patched_in_place() {
    common::logger();
    let exif = common::tiff(&[
        ("Exif.Image.Make", "Canon"),
        ("Exif.Image.Software", "digiKam 0.9.0-svn"),
    ]);
    let file = common::jpeg(Some(&exif));

    let mut image = read(file.clone());
    image.exif_mut().set_str("Exif.Image.Software", "GI").unwrap();
    image.write_metadata().unwrap();

    assert_eq!(image.write_strategy(), Some(WriteStrategy::NonIntrusive));
    assert_eq!(image.bytes().len(), file.len());

    let back = read(image.bytes().to_vec());
    assert_eq!(back.exif().get("Exif.Image.Software").unwrap().value().to_string(), "GI");
    assert_eq!(back.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Canon");
}

#[test]
fn long_values_rebuild_the_block() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Software", "GI")]);
    let mut image = read(common::jpeg(Some(&exif)));

    let software = "a much longer software name than before, v1.2.3";
    image.exif_mut().set_str("Exif.Image.Software", software).unwrap();
    image.write_metadata().unwrap();

    assert_eq!(image.write_state(), WriteState::Written);
    assert_eq!(image.write_strategy(), Some(WriteStrategy::Intrusive));
    assert!(image.bytes().ends_with(&common::scan()));

    let back = read(image.bytes().to_vec());
    assert_eq!(back.exif().get("Exif.Image.Software").unwrap().value().to_string(), software);
}

#[test]
fn gps_positions_print_as_degrees() {
    common::logger();
    let exif = common::tiff(&[
        ("Exif.GPSInfo.GPSLatitudeRef", "N"),
        ("Exif.GPSInfo.GPSLatitude", "51/1 106969/10000 0/1"),
    ]);
    let image = read(common::jpeg(Some(&exif)));

    let data = image.exif();
    let latitude = data.get("Exif.GPSInfo.GPSLatitude").unwrap();
    assert_eq!(latitude.print(data), "51 deg 10' 41.81\"");
    assert_eq!(data.get("Exif.GPSInfo.GPSLatitudeRef").unwrap().print(data), "North");
}

#[test]
fn broken_next_pointers_only_warn() {
    common::logger();
    let tiff = [
        b"II*\0".as_slice(),
        &8_u32.to_le_bytes(),
        &1_u16.to_le_bytes(),
        &0x010F_u16.to_le_bytes(), // make
        &2_u16.to_le_bytes(),      // ascii
        &4_u32.to_le_bytes(),
        b"Cnn\0",
        &0xFFFF_u32.to_le_bytes(), // way past the end
    ]
    .concat();

    let image = read(tiff);
    assert_eq!(image.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Cnn");

    let warning = image
        .warnings()
        .iter()
        .find(|w| w.message.starts_with("Next pointer is out of bounds; ignored"))
        .expect("the bad pointer is reported");
    assert_eq!(warning.severity, Severity::Warning);
}

#[test]
fn broken_iptc_leaves_exif_alone() {
    common::logger();

    // an object name that claims nine bytes, but only has one
    let iim = [0x1C, 0x02, 0x05, 0x00, 0x09, b'h'];
    let app13 = [
        b"Photoshop 3.0\0".as_slice(),
        b"8BIM",
        &0x0404_u16.to_be_bytes(),
        &[0, 0], // empty name, padded
        &(iim.len() as u32).to_be_bytes(),
        &iim,
    ]
    .concat();

    let exif = common::tiff(&[("Exif.Image.Make", "Canon")]);
    let mut file = common::jpeg(Some(&exif));
    let scan_at = file.len() - common::scan().len();
    file.splice(scan_at..scan_at, common::segment(0xED, &app13));

    let image = read(file);
    assert_eq!(image.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Canon");
    assert!(image.iptc().is_empty());

    let [warning] = image.warnings() else {
        panic!("expected one warning, got {:?}", image.warnings());
    };
    assert!(warning.message.starts_with("Failed to read IPTC"), "{warning}");
    assert_eq!(warning.severity, Severity::Error);
}

#[test]
fn ascii_read_as_a_number_warns() {
    common::logger();
    let exif = common::tiff(&[
        ("Exif.Image.Make", "Canon"),
        ("Exif.Image.ImageDescription", "1234"),
    ]);
    let mut image = read(common::jpeg(Some(&exif)));
    assert!(image.warnings().is_empty());

    assert_eq!(image.exif_long("Exif.Image.ImageDescription", 0), Some(1234));
    assert!(image.warnings().is_empty());

    assert_eq!(image.exif_long("Exif.Image.Make", 0), Some(0));
    let [warning] = image.warnings() else {
        panic!("expected one warning, got {:?}", image.warnings());
    };
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.message.contains("`Canon`"), "{warning}");

    assert_eq!(image.exif_long("Exif.Image.Artist", 0), None);
}

#[test]
fn heif_structure_and_exif() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Model", "iPhone 15")]);
    let image = read(common::heic(&exif));
    assert_eq!(image.format(), "BMFF");

    let lines = image.structure(false).unwrap();
    assert_eq!(lines[0], "ftyp: heic (mif1, heic)");
    assert!(lines.iter().any(|l| l.contains("iloc")));
    assert!(lines.iter().any(|l| l.contains("ispe 4032 x 3024")));
    assert!(lines.iter().any(|l| l.starts_with("item    1 | Exif")));

    assert_eq!(
        image.exif().get("Exif.Image.Model").unwrap().value().to_string(),
        "iPhone 15"
    );
}

#[test]
fn heif_files_are_read_only() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Model", "iPhone 15")]);
    let mut image = read(common::heic(&exif));
    let before = image.bytes().to_vec();

    image.exif_mut().set_str("Exif.Image.Artist", "me").unwrap();
    let err = image.write_metadata().unwrap_err();
    assert_eq!(err.code(), imgmeta::ErrorCode::WriteUnsupported);
    assert_eq!(image.write_state(), WriteState::Aborted);
    assert_eq!(image.bytes(), before);
}

#[test]
fn command_files_drive_edits() {
    common::logger();
    let commands = Command::parse_all(
        "# tidy up a scan\n\
         set Exif.Image.Artist Ada Lovelace\n\
         add Iptc.Application2.Keywords archive\n\
         add Iptc.Application2.Keywords \"old photos\"\n\
         set Xmp.dc.title lang=x-default Analytical Engine\n\
         \n\
         del Exif.Image.Software\n",
    )
    .unwrap();
    assert_eq!(commands.len(), 5);

    let exif = common::tiff(&[("Exif.Image.Software", "scanner 1.0")]);
    let mut image = read(common::jpeg(Some(&exif)));
    for command in &commands {
        command.apply(&mut image).unwrap();
    }
    image.write_metadata().unwrap();

    let back = read(image.bytes().to_vec());
    assert_eq!(back.exif().get("Exif.Image.Artist").unwrap().value().to_string(), "Ada Lovelace");
    assert!(back.exif().get("Exif.Image.Software").is_none());

    let keywords: Vec<String> = back.iptc().iter().map(|d| d.value().to_string()).collect();
    assert_eq!(keywords, ["archive", "old photos"]);
    assert_eq!(
        back.xmp().get("Xmp.dc.title").unwrap().value().lang("x-default"),
        Some("Analytical Engine")
    );
}

#[test]
fn sidecars_and_eps_carry_xmp() {
    common::logger();

    let mut sidecar = read(common::xmp_sidecar());
    assert_eq!(sidecar.xmp().get("Xmp.xmp.Rating").unwrap().value().to_string(), "3");
    sidecar.xmp_mut().set_str("Xmp.xmp.Rating", None, "5").unwrap();
    sidecar.write_metadata().unwrap();
    let back = read(sidecar.bytes().to_vec());
    assert_eq!(back.xmp().get("Xmp.xmp.Rating").unwrap().value().to_string(), "5");

    let eps = read(common::eps());
    assert!(eps.xmp().is_empty());
    assert!(eps.exif().is_empty());
}

#[test]
fn raf_and_crw_are_readable() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Make", "FUJIFILM")]);
    let raf = read(common::raf(&common::jpeg(Some(&exif))));
    assert_eq!(raf.exif().get("Exif.Image.Make").unwrap().value().to_string(), "FUJIFILM");

    let crw = read(common::crw());
    assert_eq!(crw.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Canon");
    assert_eq!(
        crw.exif().get("Exif.Image.Model").unwrap().value().to_string(),
        "Canon EOS D30"
    );
}
