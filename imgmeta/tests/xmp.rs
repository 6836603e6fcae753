use imgmeta::{
    Error, ErrorCode, XmpData,
    xmp::{XmpKind, XmpValue, namespaces},
};

mod common;

/// Checks that a known struct type parses correctly.
#[test]
fn known_struct_type() {
    common::logger();

    // edited sample from the adobe spec (p. 19)
    let (xmp, warnings) = XmpData::parse(
        r#"
    <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
        <rdf:Description rdf:about="" xmlns:xmpTPg="http://ns.adobe.com/xap/1.0/t/pg/">
            <xmpTPg:MaxPageSize>
                <rdf:Description xmlns:stDim="http://ns.adobe.com/xap/1.0/sType/Dimensions#">
                    <stDim:w>4</stDim:w>
                    <stDim:h>3</stDim:h>
                    <stDim:unit>inch</stDim:unit>
                </rdf:Description>
            </xmpTPg:MaxPageSize>
        </rdf:Description>
    </rdf:RDF>"#,
    )
    .expect("`imgmeta` can parse a known struct");
    assert!(warnings.is_empty(), "{warnings:?}");

    let listing: Vec<(String, String)> = xmp
        .iter()
        .map(|d| (d.key().to_string(), d.value().to_string()))
        .collect();
    assert_eq!(
        listing,
        [
            ("Xmp.xmpTPg.MaxPageSize".into(), "".into()),
            ("Xmp.xmpTPg.MaxPageSize/stDim:w".into(), "4".into()),
            ("Xmp.xmpTPg.MaxPageSize/stDim:h".into(), "3".into()),
            ("Xmp.xmpTPg.MaxPageSize/stDim:unit".into(), "inch".into()),
        ]
    );
    assert_eq!(
        xmp.get("Xmp.xmpTPg.MaxPageSize").unwrap().value(),
        &XmpValue::Struct
    );
}

#[test]
fn new_lang_alts_read_back_exactly() {
    common::logger();
    let text = "Ein Bild, mit \"Zeichen\" & <Klammern>";

    let mut xmp = XmpData::new();
    xmp.set_str("Xmp.dc.description", None, &format!("lang=x-default {text}"))
        .unwrap();
    let packet = xmp.to_packet().unwrap();

    let (back, _) = XmpData::parse(&packet).unwrap();
    let description = back.get("Xmp.dc.description").unwrap();
    assert_eq!(description.value().lang("x-default"), Some(text));
    assert_eq!(description.type_name(), "LangAlt");
}

#[test]
fn bad_lang_tags_are_rejected() {
    common::logger();
    let mut xmp = XmpData::new();

    for bad in ["lang= text", "lang=\"\" text", "lang=en_US text"] {
        let err: Error = xmp.set_str("Xmp.dc.title", None, bad).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidLangAlt, "`{bad}`");
    }
    assert!(xmp.is_empty());
}

#[test]
fn packets_are_padded() {
    common::logger();
    let mut xmp = XmpData::new();
    xmp.set_str("Xmp.dc.subject", None, "cats").unwrap();
    xmp.add_str("Xmp.dc.subject", None, "dogs").unwrap();

    let packet = xmp.to_packet().unwrap();
    assert!(packet.starts_with("<?xpacket begin="));
    assert!(packet.ends_with("<?xpacket end=\"w\"?>"));
    assert!(packet.contains(&" ".repeat(100)));

    let (back, _) = XmpData::parse(&packet).unwrap();
    let subject = back.get("Xmp.dc.subject").unwrap();
    assert_eq!(subject.value().kind(), XmpKind::Bag);
    assert_eq!(subject.value().to_string(), "cats, dogs");
}

#[test]
fn unchanged_packets_come_back_as_they_were() {
    common::logger();
    let raw = String::from_utf8(common::xmp_sidecar()).unwrap();
    let (xmp, _) = XmpData::parse(&raw).unwrap();
    assert_eq!(xmp.get("Xmp.xmp.Rating").unwrap().value().to_string(), "3");
    assert_eq!(xmp.to_packet().unwrap(), raw);
}

#[test]
fn custom_namespaces() {
    common::logger();
    assert!(namespaces::namespace_uri("imgmetaint").is_none());

    namespaces::register_namespace("http://example.com/imgmetaint/", "imgmetaint");
    let mut xmp = XmpData::new();
    xmp.set_str("Xmp.imgmetaint.Mood", None, "sleepy").unwrap();

    let packet = xmp.to_packet().unwrap();
    assert!(packet.contains("http://example.com/imgmetaint/"));

    assert!(namespaces::unregister_namespace("imgmetaint"));
    assert!(matches!(
        xmp.set_str("Xmp.imgmetaint.Mood", None, "awake"),
        Err(Error::UnknownKey { .. })
    ));
}

#[test]
fn broken_xml_is_fatal() {
    common::logger();
    let err: Error = XmpData::parse("<x:xmpmeta><rdf:RDF>").unwrap_err().into();
    assert_eq!(err.code(), ErrorCode::XmpParse);
}
