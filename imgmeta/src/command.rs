//! Modify commands, one per line.
//!
//! ```text
//! # comments start with a hash
//! set Exif.Image.Software "imgmeta 0.1"
//! set Exif.Image.Copyright Ascii (c) Me
//! add Iptc.Application2.Keywords cats
//! del Exif.Image.Artist
//! reg ns http://example.com/ns/
//! ```
//!
//! `set` and `add` may name a value type after the key. Otherwise, the type
//! comes from any existing datum, then from the tag registry.

use imgmeta_types::{exif::PrimitiveTy, iptc::IptcType, xmp::XmpKind};
use winnow::{
    ModalResult, Parser as _,
    ascii::space0,
    combinator::{delimited, preceded},
    error::ContextError,
    token::{rest, take_till},
};

use crate::{
    error::Error,
    exif::{ExifKey, Exifdatum, Value},
    image::Image,
    iptc::{IptcData, IptcKey, IptcValue, Iptcdatum},
    xmp::namespaces,
};

/// A single modify command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Changes the first datum with `key`, or adds one.
    Set {
        key: String,
        ty: Option<String>,
        value: String,
    },

    /// Adds a datum, even if one with `key` exists.
    Add {
        key: String,
        ty: Option<String>,
        value: String,
    },

    /// Removes every datum with `key`.
    Del { key: String },

    /// Registers an XMP namespace.
    Reg { prefix: String, uri: String },
}

/// One whitespace-separated word.
fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str, ContextError> {
    preceded(space0, take_till(1.., (' ', '\t'))).parse_next(input)
}

/// The rest of the line, without any surrounding quotes.
fn value<'i>(input: &mut &'i str) -> ModalResult<&'i str, ContextError> {
    space0.parse_next(input)?;
    if input.starts_with('"') {
        delimited('"', take_till(0.., '"'), '"').parse_next(input)
    } else {
        rest.map(str::trim_end).parse_next(input)
    }
}

/// Whether `name` is a value type for the family `key` belongs to.
fn is_type_name(key: &str, name: &str) -> bool {
    match key.split('.').next() {
        Some("Exif") => PrimitiveTy::from_name(name).is_some(),
        Some("Iptc") => IptcType::from_name(name).is_some(),
        Some("Xmp") => XmpKind::from_name(name).is_some(),
        _ => false,
    }
}

impl Command {
    /// Parses one line.
    ///
    /// Blank lines and comments give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, Error> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let invalid = || {
            log::error!("couldn't understand command: `{trimmed}`");
            Error::InvalidCommand {
                line: trimmed.into(),
            }
        };

        let input = &mut &*trimmed;
        let verb = word.parse_next(input).map_err(|_| invalid())?;
        let key = word.parse_next(input).map_err(|_| invalid())?.to_string();

        let command = match verb {
            "del" => {
                if !input.trim().is_empty() {
                    return Err(invalid());
                }
                Command::Del { key }
            }

            "reg" => {
                let uri = word.parse_next(input).map_err(|_| invalid())?.to_string();
                if !input.trim().is_empty() {
                    return Err(invalid());
                }
                Command::Reg { prefix: key, uri }
            }

            "set" | "add" => {
                // a type name only counts if there's still a value after it
                let before_ty = *input;
                let ty = match word.parse_next(input) {
                    Ok(name) if is_type_name(&key, name) && !input.trim().is_empty() => {
                        Some(name.to_string())
                    }
                    _ => {
                        *input = before_ty;
                        None
                    }
                };

                if input.trim().is_empty() {
                    return Err(invalid());
                }
                let text = value.parse_next(input).map_err(|_| invalid())?;
                if !input.trim().is_empty() {
                    return Err(invalid());
                }

                let value = text.to_string();
                if verb == "set" {
                    Command::Set { key, ty, value }
                } else {
                    Command::Add { key, ty, value }
                }
            }

            _ => return Err(invalid()),
        };

        Ok(Some(command))
    }

    /// Parses a command file. The first bad line fails the whole thing.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, Error> {
        text.lines()
            .filter_map(|line| Self::parse(line).transpose())
            .collect()
    }

    /// Runs the command against an image's metadata.
    ///
    /// Nothing is written to the file until [`Image::write_metadata`].
    pub fn apply(&self, image: &mut Image) -> Result<(), Error> {
        log::debug!("applying `{self:?}`");
        match self {
            Command::Set { key, ty, value } => set(image, key, ty.as_deref(), value, false),
            Command::Add { key, ty, value } => set(image, key, ty.as_deref(), value, true),

            Command::Del { key } => {
                let removed = match family(key)? {
                    Family::Exif => image.exif_mut().erase(&key.parse::<ExifKey>()?),
                    Family::Iptc => image.iptc_mut().erase(&key.parse::<IptcKey>()?),
                    Family::Xmp => image.xmp_mut().erase(&key.parse()?),
                };
                if removed == 0 {
                    log::warn!("`{key}` wasn't there to delete");
                }
                Ok(())
            }

            Command::Reg { prefix, uri } => {
                namespaces::register_namespace(uri, prefix);
                Ok(())
            }
        }
    }
}

enum Family {
    Exif,
    Iptc,
    Xmp,
}

fn family(key: &str) -> Result<Family, Error> {
    match key.split('.').next() {
        Some("Exif") => Ok(Family::Exif),
        Some("Iptc") => Ok(Family::Iptc),
        Some("Xmp") => Ok(Family::Xmp),
        _ => Err(Error::InvalidKey { key: key.into() }),
    }
}

fn set(image: &mut Image, key: &str, ty: Option<&str>, text: &str, add: bool) -> Result<(), Error> {
    match family(key)? {
        Family::Exif => {
            let exif = image.exif_mut();
            let key: ExifKey = key.parse()?;
            let ty = ty
                .and_then(PrimitiveTy::from_name)
                .unwrap_or_else(|| exif.ty_for(key));
            let value = Value::from_str_typed(ty, text)?;
            if add {
                exif.add(Exifdatum::new(key, value));
            } else {
                exif.set(key, value);
            }
        }

        Family::Iptc => {
            let iptc = image.iptc_mut();
            let key: IptcKey = key.parse()?;
            let value = match ty.and_then(IptcType::from_name) {
                Some(ty) => IptcValue::from_str_typed(ty, text)?,
                None => IptcData::value_for(key, text)?,
            };
            if add {
                iptc.add(Iptcdatum::new(key, value));
            } else {
                iptc.set(key, value);
            }
        }

        Family::Xmp => {
            let kind = ty.and_then(XmpKind::from_name);
            if add {
                image.xmp_mut().add_str(key, kind, text)?;
            } else {
                image.xmp_mut().set_str(key, kind, text)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    #[test]
    fn parses_commands() {
        logger();
        assert_eq!(
            Command::parse("set Exif.Image.Software \"imgmeta 0.1\"").unwrap(),
            Some(Command::Set {
                key: "Exif.Image.Software".into(),
                ty: None,
                value: "imgmeta 0.1".into(),
            })
        );
        assert_eq!(
            Command::parse("  add Iptc.Application2.Keywords   String cats and dogs  ").unwrap(),
            Some(Command::Add {
                key: "Iptc.Application2.Keywords".into(),
                ty: Some("String".into()),
                value: "cats and dogs".into(),
            })
        );
        assert_eq!(
            Command::parse("del Exif.Image.Artist").unwrap(),
            Some(Command::Del {
                key: "Exif.Image.Artist".into()
            })
        );
        assert_eq!(
            Command::parse("reg ns http://example.com/ns/").unwrap(),
            Some(Command::Reg {
                prefix: "ns".into(),
                uri: "http://example.com/ns/".into(),
            })
        );
    }

    #[test]
    fn a_lone_type_name_is_the_value() {
        logger();
        assert_eq!(
            Command::parse("set Exif.Image.Software Ascii").unwrap(),
            Some(Command::Set {
                key: "Exif.Image.Software".into(),
                ty: None,
                value: "Ascii".into(),
            })
        );
    }

    #[test]
    fn skips_comments_and_rejects_junk() {
        logger();
        assert_eq!(Command::parse("   # set Exif.Image.Make x").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);

        for bad in [
            "frobnicate Exif.Image.Make x",
            "set Exif.Image.Make",
            "del Exif.Image.Make extra",
            "set Exif.Image.Make \"unclosed",
            "set Exif.Image.Make \"a\" b",
        ] {
            assert!(
                matches!(Command::parse(bad), Err(Error::InvalidCommand { .. })),
                "`{bad}` should be rejected"
            );
        }

        let script = "# header\nset Exif.Image.Make Canon\n\ndel Exif.Image.Model\n";
        assert_eq!(Command::parse_all(script).unwrap().len(), 2);
        assert!(Command::parse_all("set Exif.Image.Make Canon\nnope\n").is_err());
    }

    #[test]
    fn applies_to_an_image() {
        logger();
        let tiff = [b"II*\0".as_slice(), &8_u32.to_le_bytes(), &[0; 6]].concat();
        let mut image = Image::from_bytes(tiff).unwrap();
        image.read_metadata().unwrap();

        let script = "\
set Exif.Image.Software Ascii imgmeta
set Exif.Photo.FNumber 28/10
add Iptc.Application2.Keywords one
add Iptc.Application2.Keywords two
set Xmp.dc.title lang=x-default A title
reg imgmetatest http://example.com/imgmetatest/
set Xmp.imgmetatest.note hi
";
        for command in Command::parse_all(script).unwrap() {
            command.apply(&mut image).unwrap();
        }

        let exif = image.exif();
        assert_eq!(exif.get("Exif.Image.Software").unwrap().value().to_string(), "imgmeta");
        assert_eq!(exif.get("Exif.Photo.FNumber").unwrap().value().to_string(), "28/10");
        assert_eq!(image.iptc().len(), 2);
        assert_eq!(
            image.xmp().get("Xmp.dc.title").unwrap().value().to_string(),
            "lang=\"x-default\" A title"
        );
        assert_eq!(image.xmp().get("Xmp.imgmetatest.note").unwrap().value().to_string(), "hi");

        Command::parse("del Exif.Image.Software")
            .unwrap()
            .unwrap()
            .apply(&mut image)
            .unwrap();
        assert!(image.exif().get("Exif.Image.Software").is_none());

        let unknown = Command::parse("set Nope.Image.Make x").unwrap().unwrap();
        assert!(matches!(unknown.apply(&mut image), Err(Error::InvalidKey { .. })));
    }
}
