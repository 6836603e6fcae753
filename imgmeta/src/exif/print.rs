//! Turns Exif values into text for humans.
//!
//! Each registered tag names an interpreter with a [`Print`] descriptor.
//! Here, every descriptor maps to a plain function of the value and the
//! rest of the [`ExifData`] (some interpreters need neighbors, like the
//! focal length, to narrow down a lens).

use imgmeta_types::exif::{
    Value,
    ifd::IfdId,
    lens,
    tags::Print,
};

use crate::{
    config::Config,
    exif::{ExifData, ExifKey, Exifdatum},
};

/// An interpreter: the value, then the data it came from.
type Interpreter = fn(&Value, &ExifData) -> Option<String>;

/// Prints a datum's value using its tag's interpreter.
///
/// Config overrides win over interpreters. When an interpreter can't make
/// sense of a value, the raw value is printed instead, in parentheses if
/// its type isn't the one the tag is registered with.
pub fn print(datum: &Exifdatum, data: &ExifData) -> String {
    let value = datum.value();
    let raw = value.to_string();

    if let Some(name) = Config::global().display_name(&datum.key().to_string(), &raw) {
        return name.to_string();
    }

    let Some(info) = datum.key().info() else {
        return raw;
    };

    let interpreted = match info.print {
        Print::Value => None,
        Print::Table(table) => table_lookup(value, table),
        Print::Lens(table) => lens_id(value, data, table),
        other => interpreter(other).and_then(|f| f(value, data)),
    };

    match interpreted {
        Some(text) => text,
        // a value of the wrong type is shown as-is, but marked
        None if !matches!(info.print, Print::Value) && value.ty() != Some(info.ty) => {
            format!("({raw})")
        }
        None => raw,
    }
}

/// The function behind each descriptor that doesn't carry data.
fn interpreter(print: Print) -> Option<Interpreter> {
    Some(match print {
        Print::ExposureTime => exposure_time,
        Print::FNumber => f_number,
        Print::FocalLength => focal_length,
        Print::ApexAperture => apex_aperture,
        Print::ApexShutterSpeed => apex_shutter_speed,
        Print::ExposureBias => exposure_bias,
        Print::Distance => distance,
        Print::Version => version,
        Print::Comment => comment,
        Print::Degrees => degrees,
        Print::GpsTimeStamp => gps_time_stamp,
        Print::GpsAltitude => gps_altitude,
        Print::GpsVersion => gps_version,
        Print::XpString => xp_string,
        Print::LensSpecification => lens_specification,
        Print::CanonLensType => canon_lens_type,
        Print::CanonAperture => canon_aperture,
        Print::CanonFocalLength => canon_focal_length,
        Print::Value | Print::Table(_) | Print::Lens(_) => return None,
    })
}

/// Finds a neighboring value in the same data.
fn neighbor(data: &ExifData, group: IfdId, tag: u16) -> Option<&Value> {
    data.find_key(&ExifKey::new(group, tag)).map(|d| d.value())
}

/// Formats a number with at most `places` decimals, dropping trailing zeros.
fn trim_float(f: f64, places: usize) -> String {
    let s = format!("{f:.places$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// `F2.8`, `F4`, `F11`
fn fmt_f_number(f: f64) -> String {
    if f >= 10.0 {
        format!("F{}", trim_float(f, 0))
    } else {
        format!("F{}", trim_float(f, 1))
    }
}

fn table_lookup(value: &Value, table: &[(i64, &str)]) -> Option<String> {
    let key = match value {
        // single letters, like `N` for north
        Value::Ascii(s) => s.bytes().next()? as i64,
        other => other.to_long(0)?,
    };

    Some(match table.iter().find(|(k, _)| *k == key) {
        Some((_, name)) => name.to_string(),
        None => format!("({value})"),
    })
}

fn exposure_time(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    if d == 0 {
        return None;
    }
    if n == 0 {
        return Some("0 s".into());
    }

    Some(if d % n == 0 {
        format!("1/{} s", d / n)
    } else if n >= d {
        format!("{} s", trim_float(n as f64 / d as f64, 1))
    } else {
        format!("1/{} s", (d as f64 / n as f64).round())
    })
}

fn f_number(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    (d != 0 && n != 0).then(|| fmt_f_number(n as f64 / d as f64))
}

fn focal_length(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    (d != 0).then(|| format!("{:.1} mm", n as f64 / d as f64))
}

fn apex_aperture(value: &Value, _: &ExifData) -> Option<String> {
    let apex = value.to_f64(0)?;
    Some(fmt_f_number(2_f64.powf(apex / 2.0)))
}

fn apex_shutter_speed(value: &Value, _: &ExifData) -> Option<String> {
    let apex = value.to_f64(0)?;
    let seconds = 2_f64.powf(-apex);

    Some(if seconds < 1.0 {
        format!("1/{} s", (1.0 / seconds).round())
    } else {
        format!("{} s", trim_float(seconds, 1))
    })
}

fn exposure_bias(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    if d == 0 {
        return None;
    }
    if n == 0 {
        return Some("0 EV".into());
    }

    let g = gcd(n.unsigned_abs(), d.unsigned_abs()) as i64;
    let (n, d) = (n / g, d / g);
    let sign = if (n < 0) != (d < 0) { "-" } else { "+" };

    Some(if d.abs() == 1 {
        format!("{sign}{} EV", n.abs())
    } else {
        format!("{sign}{}/{} EV", n.abs(), d.abs())
    })
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a.max(1) } else { gcd(b, a % b) }
}

fn distance(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    Some(match (n, d) {
        (0, _) => "Unknown".into(),
        (0xFFFF_FFFF, _) => "Infinity".into(),
        (_, 0) => return None,
        (n, d) => format!("{:.2} m", n as f64 / d as f64),
    })
}

/// `0230` -> `2.30`
fn version(value: &Value, _: &ExifData) -> Option<String> {
    let bytes: Vec<u8> = match value {
        Value::Undefined(b) | Value::Byte(b) => b.clone(),
        Value::Ascii(s) => s.as_bytes().to_vec(),
        _ => return None,
    };
    let [a, b, c, d] = <[u8; 4]>::try_from(bytes).ok()?;
    if ![a, b, c, d].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let major = (a - b'0') * 10 + (b - b'0');
    Some(format!("{major}.{}{}", c as char, d as char))
}

fn comment(value: &Value, _: &ExifData) -> Option<String> {
    match value {
        Value::Comment(c) => Some(c.text.clone()),
        _ => None,
    }
}

/// `51 deg 10' 41.81"`
fn degrees(value: &Value, _: &ExifData) -> Option<String> {
    if value.components() != 3 {
        return None;
    }

    let mut total_seconds = 0.0;
    for (i, scale) in [3600.0, 60.0, 1.0].into_iter().enumerate() {
        let (n, d) = value.to_rational(i)?;
        if d == 0 {
            // "unknown" seconds are common. degrees and minutes aren't
            if i == 2 && n == 0 {
                continue;
            }
            return None;
        }
        total_seconds += n as f64 / d as f64 * scale;
    }

    let deg = (total_seconds / 3600.0).floor();
    let rest = total_seconds - deg * 3600.0;
    let min = (rest / 60.0).floor();
    let sec = rest - min * 60.0;

    Some(format!("{deg} deg {min}' {sec:.2}\""))
}

/// `12:30:05`, or `12:30:05.50` with fractional seconds
fn gps_time_stamp(value: &Value, _: &ExifData) -> Option<String> {
    if value.components() != 3 {
        return None;
    }

    let mut parts = [0.0; 3];
    for (i, part) in parts.iter_mut().enumerate() {
        let (n, d) = value.to_rational(i)?;
        if d == 0 {
            return None;
        }
        *part = n as f64 / d as f64;
    }

    let [h, m, s] = parts;
    Some(if s.fract() == 0.0 {
        format!("{:02}:{:02}:{:02}", h as u32, m as u32, s as u32)
    } else {
        format!("{:02}:{:02}:{:05.2}", h as u32, m as u32, s)
    })
}

fn gps_altitude(value: &Value, _: &ExifData) -> Option<String> {
    let (n, d) = value.to_rational(0)?;
    (d != 0).then(|| format!("{:.1} m", n as f64 / d as f64))
}

fn gps_version(value: &Value, _: &ExifData) -> Option<String> {
    let parts: Vec<String> = (0..value.components())
        .map(|i| value.to_long(i).map(|n| n.to_string()))
        .collect::<Option<_>>()?;
    Some(parts.join("."))
}

/// Windows XP tags hold UCS-2 little-endian text in bytes.
fn xp_string(value: &Value, _: &ExifData) -> Option<String> {
    let bytes = match value {
        Value::Byte(b) | Value::Undefined(b) => b,
        _ => return None,
    };

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    Some(
        String::from_utf16_lossy(&units)
            .trim_end_matches('\0')
            .to_string(),
    )
}

/// `24-70mm F2.8`, `18-55mm F3.5-5.6`, or `50mm F1.8`
fn lens_specification(value: &Value, _: &ExifData) -> Option<String> {
    if value.components() != 4 {
        return None;
    }

    let get = |i: usize| -> Option<f64> {
        let (n, d) = value.to_rational(i)?;
        (d != 0 && n != 0).then(|| n as f64 / d as f64)
    };

    let focal = match (get(0), get(1)) {
        (Some(a), Some(b)) if (a - b).abs() < f64::EPSILON => format!("{}mm", trim_float(a, 1)),
        (Some(a), Some(b)) => format!("{}-{}mm", trim_float(a, 1), trim_float(b, 1)),
        (Some(a), None) | (None, Some(a)) => format!("{}mm", trim_float(a, 1)),
        (None, None) => "n/a".to_string(),
    };

    let aperture = match (get(2), get(3)) {
        (Some(a), Some(b)) if (a - b).abs() < f64::EPSILON => fmt_f_number(a),
        (Some(a), Some(b)) => format!("F{}-{}", trim_float(a, 1), trim_float(b, 1)),
        (Some(a), None) | (None, Some(a)) => fmt_f_number(a),
        (None, None) => "n/a".to_string(),
    };

    Some(format!("{focal} {aperture}"))
}

/// The focal range and widest aperture written in a lens's name.
///
/// `Canon EF 100-400mm f/4.5-5.6L IS II USM` gives `(100, 400, Some(4.5))`.
fn lens_name_ranges(name: &str) -> Option<(f64, f64, Option<f64>)> {
    let leading_number = |s: &str| -> Option<f64> {
        let end = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        s[..end].parse().ok()
    };

    let mut focal = None;
    let mut aperture = None;

    for word in name.split_whitespace() {
        if focal.is_none()
            && let Some(range) = word.strip_suffix("mm")
        {
            focal = match range.split_once('-') {
                Some((lo, hi)) => Some((leading_number(lo)?, leading_number(hi)?)),
                None => leading_number(range).map(|f| (f, f)),
            };
        } else if aperture.is_none() {
            let lower = word.to_ascii_lowercase();
            if let Some(rest) = lower.strip_prefix("f/").or_else(|| lower.strip_prefix('f')) {
                aperture = leading_number(rest);
            }
        }
    }

    let (lo, hi) = focal?;
    Some((lo, hi, aperture))
}

/// Narrows down lens candidates by focal range and max aperture.
///
/// Several survivors (or none) print every candidate joined by `*OR*`.
fn pick_lens(
    candidates: &[&'static str],
    focal: Option<(f64, f64)>,
    aperture: Option<f64>,
) -> String {
    if let [only] = candidates {
        return only.to_string();
    }

    let matching: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|name| {
            let Some((lo, hi, ap)) = lens_name_ranges(name) else {
                return false;
            };
            let focal_ok = focal
                .is_none_or(|(want_lo, want_hi)| (lo - want_lo).abs() < 0.5 && (hi - want_hi).abs() < 0.5);
            let aperture_ok = match (aperture, ap) {
                (Some(want), Some(got)) => (want - got).abs() < 0.15,
                _ => true,
            };
            focal_ok && aperture_ok
        })
        .collect();

    match matching.as_slice() {
        [only] => only.to_string(),
        [] => candidates.join(" *OR* "),
        several => several.join(" *OR* "),
    }
}

fn lens_id(value: &Value, data: &ExifData, table: &'static [(i64, &'static str)]) -> Option<String> {
    let id = value.to_long(0)?;
    let candidates = lens::candidates(table, id);
    if candidates.is_empty() {
        return Some(format!("({id})"));
    }

    // a single focal length is all the standard tags give us
    let focal = neighbor(data, IfdId::Photo, 0x920A)
        .and_then(|v| v.to_f64(0))
        .filter(|f| *f > 0.0);

    let narrowed: Vec<&'static str> = match focal {
        Some(f) => candidates
            .iter()
            .copied()
            .filter(|name| lens_name_ranges(name).is_some_and(|(lo, hi, _)| lo - 0.5 <= f && f <= hi + 0.5))
            .collect(),
        None => candidates.clone(),
    };

    Some(match narrowed.as_slice() {
        [] => pick_lens(&candidates, None, None),
        some => pick_lens(some, None, None),
    })
}

/// Canon's EV encoding: thirds are stored as `0x0c` and `0x14`.
pub(crate) fn canon_ev(raw: i64) -> f64 {
    let (sign, mut val) = if raw < 0 { (-1.0, -raw) } else { (1.0, raw) };

    let frac = val & 0x1f;
    val -= frac;
    let frac = match frac {
        0x0c => 32.0 / 3.0,
        0x14 => 64.0 / 3.0,
        other => other as f64,
    };

    sign * (val as f64 + frac) / 32.0
}

fn canon_f_number(raw: i64) -> f64 {
    2_f64.powf(canon_ev(raw) / 2.0)
}

fn canon_aperture(value: &Value, _: &ExifData) -> Option<String> {
    let raw = value.to_long(0)?;
    Some(fmt_f_number(canon_f_number(raw)))
}

/// Canon focal lengths are stored in "focal units" per millimeter.
fn canon_focal_units(data: &ExifData) -> f64 {
    neighbor(data, IfdId::CanonCs, 0x0019)
        .and_then(|v| v.to_long(0))
        .filter(|u| *u > 0)
        .unwrap_or(1) as f64
}

fn canon_focal_length(value: &Value, data: &ExifData) -> Option<String> {
    let raw = value.to_long(0)?;
    Some(format!("{} mm", trim_float(raw as f64 / canon_focal_units(data), 1)))
}

fn canon_lens_type(value: &Value, data: &ExifData) -> Option<String> {
    let id = value.to_long(0)?;
    let candidates = lens::candidates(lens::CANON_LENS, id);
    if candidates.is_empty() {
        return Some(format!("({id})"));
    }

    let units = canon_focal_units(data);
    let focal_of = |tag| {
        neighbor(data, IfdId::CanonCs, tag)
            .and_then(|v| v.to_long(0))
            .map(|f| f as f64 / units)
    };
    let focal = match (focal_of(0x0018), focal_of(0x0017)) {
        (Some(short), Some(long)) if short > 0.0 => Some((short, long)),
        _ => None,
    };

    let aperture = neighbor(data, IfdId::CanonCs, 0x001A)
        .and_then(|v| v.to_long(0))
        .map(|raw| (canon_f_number(raw) * 10.0).round() / 10.0);

    Some(pick_lens(&candidates, focal, aperture))
}

#[cfg(test)]
mod tests {
    use imgmeta_types::exif::{Charset, Comment, Rational, SRational, Value, ifd::IfdId};

    use super::*;
    use crate::{exif::ExifKey, util::logger};

    fn printed(data: &ExifData, key: &str) -> String {
        data.get(key).unwrap().print(data)
    }

    #[test]
    fn gps_degrees() {
        logger();
        let mut data = ExifData::new();
        data.set_str("Exif.GPSInfo.GPSLatitude", "51/1 106969/10000 0/1")
            .unwrap();
        assert_eq!(printed(&data, "Exif.GPSInfo.GPSLatitude"), "51 deg 10' 41.81\"");

        data.set_str("Exif.GPSInfo.GPSLatitudeRef", "N").unwrap();
        assert_eq!(printed(&data, "Exif.GPSInfo.GPSLatitudeRef"), "North");

        data.set_str("Exif.GPSInfo.GPSTimeStamp", "12/1 30/1 5/1").unwrap();
        assert_eq!(printed(&data, "Exif.GPSInfo.GPSTimeStamp"), "12:30:05");
    }

    #[test]
    fn exposure_family() {
        logger();
        let mut data = ExifData::new();
        data.set(
            ExifKey::new(IfdId::Photo, 0x829A),
            Value::Rational(vec![Rational::new(10, 600)]),
        );
        data.set(
            ExifKey::new(IfdId::Photo, 0x829D),
            Value::Rational(vec![Rational::new(28, 10)]),
        );
        data.set(
            ExifKey::new(IfdId::Photo, 0x9204),
            Value::SRational(vec![SRational::new(-2, 6)]),
        );
        data.set(
            ExifKey::new(IfdId::Photo, 0x920A),
            Value::Rational(vec![Rational::new(50, 1)]),
        );

        assert_eq!(printed(&data, "Exif.Photo.ExposureTime"), "1/60 s");
        assert_eq!(printed(&data, "Exif.Photo.FNumber"), "F2.8");
        assert_eq!(printed(&data, "Exif.Photo.ExposureBiasValue"), "-1/3 EV");
        assert_eq!(printed(&data, "Exif.Photo.FocalLength"), "50.0 mm");
    }

    #[test]
    fn versions_comments_and_tables() {
        logger();
        let mut data = ExifData::new();
        data.set(
            ExifKey::new(IfdId::Photo, 0x9000),
            Value::Undefined(b"0230".to_vec()),
        );
        data.set(
            ExifKey::new(IfdId::Photo, 0x9286),
            Value::Comment(Comment::new(Charset::Unicode, "hi there")),
        );
        data.set(ExifKey::new(IfdId::Image, 0x0112), Value::Short(vec![6]));
        data.set(ExifKey::new(IfdId::Image, 0x0103), Value::Short(vec![999]));

        assert_eq!(printed(&data, "Exif.Photo.ExifVersion"), "2.30");
        assert_eq!(printed(&data, "Exif.Photo.UserComment"), "hi there");
        assert_eq!(printed(&data, "Exif.Image.Orientation"), "right, top");
        assert_eq!(printed(&data, "Exif.Image.Compression"), "(999)");
    }

    #[test]
    fn canon_lens_is_narrowed_by_focal_and_aperture() {
        logger();
        let mut data = ExifData::new();
        for (tag, v) in [(0x0016, 747), (0x0017, 400), (0x0018, 100), (0x0019, 1), (0x001A, 140)] {
            data.set(ExifKey::new(IfdId::CanonCs, tag), Value::SShort(vec![v]));
        }

        assert_eq!(
            printed(&data, "Exif.CanonCs.LensType"),
            "Canon EF 100-400mm f/4.5-5.6L IS II USM"
        );
        assert_eq!(printed(&data, "Exif.CanonCs.MaxAperture"), "F4.5");
        assert_eq!(printed(&data, "Exif.CanonCs.LongFocal"), "400 mm");

        // without the neighbors, every candidate is listed
        let mut bare = ExifData::new();
        bare.set(ExifKey::new(IfdId::CanonCs, 0x0016), Value::SShort(vec![747]));
        assert_eq!(
            printed(&bare, "Exif.CanonCs.LensType"),
            "Canon EF 100-400mm f/4.5-5.6L IS II USM *OR* Tamron SP 150-600mm f/5-6.3 Di VC USD G2"
        );
    }

    #[test]
    fn canon_ev_thirds() {
        assert_eq!(canon_ev(0x20), 1.0);
        assert!((canon_ev(0x0c) - 1.0 / 3.0).abs() < 1e-9);
        assert!((canon_ev(0x14) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(canon_ev(-0x20), -1.0);
    }

    #[test]
    fn lens_names_parse() {
        assert_eq!(
            lens_name_ranges("Canon EF 100-400mm f/4.5-5.6L IS II USM"),
            Some((100.0, 400.0, Some(4.5)))
        );
        assert_eq!(
            lens_name_ranges("Minolta AF 50mm F1.4 [New]"),
            Some((50.0, 50.0, Some(1.4)))
        );
        assert_eq!(lens_name_ranges("E-Mount, T-Mount, Other Lens or no lens"), None);
    }

    #[test]
    fn lens_specification_prints_ranges() {
        let spec = Value::Rational(vec![
            Rational::new(24, 1),
            Rational::new(70, 1),
            Rational::new(28, 10),
            Rational::new(28, 10),
        ]);
        assert_eq!(
            lens_specification(&spec, &ExifData::new()).unwrap(),
            "24-70mm F2.8"
        );
    }

    #[test]
    fn wrong_types_print_in_parentheses() {
        logger();
        let mut data = ExifData::new();
        data.set(
            ExifKey::new(IfdId::Photo, 0xA432),
            Value::Ascii("24-70".into()),
        );
        assert_eq!(printed(&data, "Exif.Photo.LensSpecification"), "(24-70)");
    }
}
