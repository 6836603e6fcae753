use imgmeta::{
    Image, MagicNumber, WriteState,
    exif::{Charset, Comment, Endianness, Value},
};

mod common;

fn read(bytes: Vec<u8>) -> Image {
    let mut image = Image::from_bytes(bytes).unwrap();
    image.read_metadata().unwrap();
    image
}

/// Writes, then opens the result again from scratch.
fn written(mut image: Image) -> Image {
    image.write_metadata().unwrap();
    assert_eq!(image.write_state(), WriteState::Written);
    read(image.bytes().to_vec())
}

#[test]
fn every_writable_format_keeps_what_it_was_given() {
    common::logger();

    let files = [
        (common::jpeg(None), true),
        (common::empty_tiff(), true),
        (common::png(), true),
        (common::webp(), false),
        (common::psd(), true),
        (common::jp2(), true),
    ];

    for (file, holds_iptc) in files {
        let mut image = read(file);
        let ty = image.magic_number();
        log::debug!("TEST: {ty:?}");

        image.exif_mut().set_str("Exif.Image.Artist", "Ada").unwrap();
        image.exif_mut().set_str("Exif.Photo.FNumber", "28/10").unwrap();
        if holds_iptc {
            image.iptc_mut().set_str("Iptc.Application2.City", "Lviv").unwrap();
        }
        image.xmp_mut().set_str("Xmp.xmp.Rating", None, "4").unwrap();

        let back = written(image);
        assert_eq!(back.magic_number(), ty);

        let exif = back.exif();
        assert_eq!(exif.get("Exif.Image.Artist").unwrap().value().to_string(), "Ada", "{ty:?}");
        assert_eq!(exif.get("Exif.Photo.FNumber").unwrap().print(exif), "F2.8", "{ty:?}");
        if holds_iptc {
            assert_eq!(
                back.iptc().get("Iptc.Application2.City").unwrap().value().to_string(),
                "Lviv",
                "{ty:?}"
            );
        }
        assert_eq!(back.xmp().get("Xmp.xmp.Rating").unwrap().value().to_string(), "4", "{ty:?}");
    }
}

#[test]
fn unicode_comments_survive_both_byte_orders() {
    common::logger();
    let text = "Schöne Grüße 😀";

    for order in [Endianness::Little, Endianness::Big] {
        let mut image = read(common::empty_tiff());
        image.exif_mut().set_byte_order(order);
        image
            .exif_mut()
            .set_str("Exif.Photo.UserComment", &format!("charset=Unicode {text}"))
            .unwrap();

        let back = written(image);
        assert_eq!(back.exif().byte_order(), order);
        assert_eq!(
            back.exif().get("Exif.Photo.UserComment").unwrap().value(),
            &Value::Comment(Comment::new(Charset::Unicode, text)),
            "{order:?}"
        );
    }
}

#[test]
fn repeated_keywords_keep_their_order() {
    common::logger();
    let mut image = read(common::jpeg(None));
    for keyword in ["sea", "boat", "harbor", "sea"] {
        image.iptc_mut().add_str("Iptc.Application2.Keywords", keyword).unwrap();
    }

    let back = written(image);
    let keywords: Vec<String> = back
        .iptc()
        .iter()
        .filter(|d| d.key().to_string() == "Iptc.Application2.Keywords")
        .map(|d| d.value().to_string())
        .collect();
    assert_eq!(keywords, ["sea", "boat", "harbor", "sea"]);
}

#[test]
fn default_language_text_is_exact() {
    common::logger();
    let title = "  spaces, \"quotes\" & <tags>  ";

    let mut image = read(common::png());
    image
        .xmp_mut()
        .set_str("Xmp.dc.title", None, &format!("lang=x-default {title}"))
        .unwrap();

    let back = written(image);
    let datum = back.xmp().get("Xmp.dc.title").unwrap();
    assert_eq!(datum.value().lang("x-default"), Some(title));
}

#[test]
fn unknown_tags_are_carried_along() {
    common::logger();

    // a tag the registry has never heard of, in IFD0
    let tiff = [
        b"II*\0".as_slice(),
        &8_u32.to_le_bytes(),
        &1_u16.to_le_bytes(),
        &0xC7F0_u16.to_le_bytes(), // tag
        &3_u16.to_le_bytes(),      // short
        &2_u32.to_le_bytes(),      // count
        &[0x34, 0x12, 0x78, 0x56], // inline value
        &0_u32.to_le_bytes(),
    ]
    .concat();

    let mut image = read(common::jpeg(Some(&tiff)));
    assert_eq!(image.magic_number(), MagicNumber::Jpeg);
    let unknown = image.exif().iter().next().unwrap().key();
    assert_eq!(unknown.to_string(), "Exif.Image.0xc7f0");

    // something else changes, so the block is rebuilt
    image.exif_mut().set_str("Exif.Image.Make", "Leica").unwrap();

    let back = written(image);
    let datum = back.exif().find_key(&unknown).unwrap();
    assert_eq!(datum.value(), &Value::Short(vec![0x1234, 0x5678]));
    assert_eq!(back.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Leica");
}

#[test]
fn clearing_takes_everything_out() {
    common::logger();
    let exif = common::tiff(&[("Exif.Image.Make", "Canon")]);
    let mut image = read(common::jpeg(Some(&exif)));
    assert!(!image.exif().is_empty());

    image.clear_metadata();
    let back = written(image);
    assert!(back.exif().is_empty());
    assert!(back.bytes().ends_with(&common::scan()));
}
