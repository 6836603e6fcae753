//! `imgmeta`: print, change, extract, and insert image metadata.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use imgmeta::{Error, Image, command::Command, exif::value::WireValue as _};
use regex::Regex;

/// Exit code for "No Exif data found in the file".
const NO_EXIF: u8 = 253;

/// Read and write Exif, IPTC and XMP metadata in image files.
///
/// Without `-M`, `-m`, `-e` or `-i`, metadata is printed (`-ps` by default).
#[derive(Parser, Debug)]
#[command(name = "imgmeta", version, about, long_about = None)]
struct Args {
    /// Image files to work on
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// What to print: s (summary), a (all), e (Exif), i (IPTC), x (XMP),
    /// c (comment), h (Exif hex dump), C (ICC profile), S (structure),
    /// R (recursive structure), X (raw XMP packet), v (plain values)
    #[arg(short = 'p', value_name = "MODE", value_parser = ["s", "a", "e", "i", "x", "c", "h", "C", "S", "R", "X", "v"])]
    print: Option<String>,

    /// Print chosen columns: k (key), g (group), n (tag name), y (type),
    /// c (count), s (size), v (raw value), t (interpreted value), l (label),
    /// h (hex), x (tag id). E, I and X pick the families
    #[arg(short = 'P', value_name = "FLAGS")]
    columns: Option<String>,

    /// Only show this exact key (repeatable)
    #[arg(short = 'K', value_name = "KEY")]
    keys: Vec<String>,

    /// Only show keys matching this regex (repeatable)
    #[arg(short = 'g', value_name = "REGEX")]
    grep: Vec<String>,

    /// Run a modify command, like `set Exif.Image.Artist Me` (repeatable)
    #[arg(short = 'M', value_name = "CMD")]
    modify: Vec<String>,

    /// Run the modify commands in a file (repeatable)
    #[arg(short = 'm', value_name = "CMD_FILE")]
    command_files: Vec<PathBuf>,

    /// Extract metadata next to the image: X (.xmp), I (.iptc), E (.exv),
    /// C (.icc)
    #[arg(short = 'e', value_name = "TARGETS")]
    extract: Option<String>,

    /// Insert metadata from the files next to the image: X (.xmp),
    /// I (.iptc), E (.exv), C (.icc)
    #[arg(short = 'i', value_name = "TARGETS")]
    insert: Option<String>,

    /// Overwrite existing files when extracting
    #[arg(short = 'f', long)]
    force: bool,

    /// Keep the file's modification time
    #[arg(short = 'k', long)]
    keep: bool,

    /// Show what's happening
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only show errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// A failure for one file, and the code it exits with.
struct Failure {
    code: u8,
    message: String,
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure {
            code: 1,
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for Failure {
    fn from(e: std::io::Error) -> Self {
        Error::from(e).into()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "info" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "Error",
                log::Level::Warn => "Warning",
                log::Level::Info => "Info",
                log::Level::Debug => "Debug",
                log::Level::Trace => "Trace",
            };
            writeln!(buf, "{level}: {}", record.args())
        })
        .init();

    let filters = match Filters::new(&args) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("imgmeta: {e}");
            return ExitCode::from(2);
        }
    };

    let commands = match load_commands(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("imgmeta: {e}");
            return ExitCode::from(1);
        }
    };

    let mut code = 0;
    for file in &args.files {
        if let Err(failure) = run(&args, &filters, &commands, file) {
            eprintln!("{}: {}", file.display(), failure.message);
            code = worse(code, failure.code);
        }
    }
    ExitCode::from(code)
}

/// The exit code to keep when two files failed differently.
///
/// Fatal errors (1) beat usage errors (2), which beat a missing Exif block.
fn worse(a: u8, b: u8) -> u8 {
    let rank = |code: u8| match code {
        0 => 0,
        NO_EXIF => 1,
        2 => 2,
        _ => 3,
    };
    if rank(b) > rank(a) { b } else { a }
}

/// Reads every `-m` file, then every `-M` command.
fn load_commands(args: &Args) -> Result<Vec<Command>, Error> {
    let mut commands = Vec::new();
    for path in &args.command_files {
        let text = std::fs::read_to_string(path)?;
        commands.extend(Command::parse_all(&text)?);
    }
    for line in &args.modify {
        commands.extend(Command::parse(line)?);
    }
    Ok(commands)
}

fn run(args: &Args, filters: &Filters, commands: &[Command], file: &Path) -> Result<(), Failure> {
    let mut image = Image::open(file)?;
    image.read_metadata()?;

    if !args.quiet && !args.verbose {
        for warning in image.warnings() {
            eprintln!("{warning}");
        }
    }

    let mut changed = false;
    if let Some(targets) = &args.extract {
        extract(&image, file, targets, args.force)?;
    }
    if let Some(targets) = &args.insert {
        insert(&mut image, file, targets)?;
        changed = true;
    }
    for command in commands {
        command.apply(&mut image)?;
        changed = true;
    }

    if changed {
        let mtime = std::fs::metadata(file)?.modified()?;
        image.write_metadata()?;
        if args.keep {
            std::fs::File::options()
                .write(true)
                .open(file)?
                .set_modified(mtime)?;
        }
        return Ok(());
    }

    if args.extract.is_some() {
        return Ok(());
    }

    match &args.columns {
        Some(flags) => print_columns(&image, filters, flags),
        None => print(&image, filters, args.print.as_deref().unwrap_or("s")),
    }
}

/// The `-K` and `-g` filters.
struct Filters {
    keys: Vec<String>,
    patterns: Vec<Regex>,
}

impl Filters {
    fn new(args: &Args) -> Result<Self, regex::Error> {
        Ok(Self {
            keys: args.keys.clone(),
            patterns: args
                .grep
                .iter()
                .map(|p| Regex::new(p))
                .collect::<Result<_, _>>()?,
        })
    }

    /// With no filters, everything matches.
    fn matches(&self, key: &str) -> bool {
        if self.keys.is_empty() && self.patterns.is_empty() {
            return true;
        }
        self.keys.iter().any(|k| k == key) || self.patterns.iter().any(|p| p.is_match(key))
    }
}

/// One printable datum from any family.
struct Row {
    family: char,
    key: String,
    group: String,
    name: String,
    tag: Option<u16>,
    label: String,
    ty: String,
    count: usize,
    size: usize,
    raw: String,
    printed: String,
    hex: String,
}

fn rows(image: &Image) -> Vec<Row> {
    let exif = image.exif().iter().map(|d| Row {
        family: 'E',
        key: d.key().to_string(),
        group: d.group().group_name().into_owned(),
        name: d.tag_name(),
        tag: Some(d.tag()),
        label: d.title().unwrap_or_default().to_string(),
        ty: d.type_name(),
        count: d.count(),
        size: d.size(),
        raw: d.value().to_string(),
        printed: d.print(image.exif()),
        hex: hex_bytes(&d.value().serialize(image.exif().byte_order())),
    });

    let iptc = image.iptc().iter().map(|d| Row {
        family: 'I',
        key: d.key().to_string(),
        group: d.record_name(),
        name: d.dataset_name(),
        tag: Some(u16::from(d.dataset())),
        label: d.title().unwrap_or_default().to_string(),
        ty: d.type_name().to_string(),
        count: d.size(),
        size: d.size(),
        raw: d.value().to_string(),
        printed: d.print(image.iptc()),
        hex: hex_bytes(&d.value().to_wire()),
    });

    let xmp = image.xmp().iter().map(|d| Row {
        family: 'X',
        key: d.key().to_string(),
        group: d.prefix().to_string(),
        name: d.path().to_string(),
        tag: None,
        label: String::new(),
        ty: d.type_name().to_string(),
        count: d.count(),
        size: d.size(),
        raw: d.value().to_string(),
        printed: d.value().to_string(),
        hex: hex_bytes(d.value().to_string().as_bytes()),
    });

    exif.chain(iptc).chain(xmp).collect()
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// An offset, then up to 16 bytes as hex and as ASCII.
fn hex_dump(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!("{:04x}  {:<47}  {ascii}", i * 16, hex_bytes(chunk))
        })
        .collect()
}

fn print(image: &Image, filters: &Filters, mode: &str) -> Result<(), Failure> {
    let no_exif = || Failure {
        code: NO_EXIF,
        message: "No Exif data found in the file".into(),
    };

    let mut out = std::io::stdout().lock();
    match mode {
        "s" => {
            if image.exif().is_empty() {
                return Err(no_exif());
            }
            for (label, value) in image.metadata_summary() {
                writeln!(out, "{label:<16}: {value}")?;
            }
        }

        "a" | "e" | "i" | "x" => {
            let family = match mode {
                "e" => Some('E'),
                "i" => Some('I'),
                "x" => Some('X'),
                _ => None,
            };
            if family == Some('E') && image.exif().is_empty() {
                return Err(no_exif());
            }

            for row in rows(image)
                .into_iter()
                .filter(|r| family.is_none_or(|f| f == r.family) && filters.matches(&r.key))
            {
                writeln!(out, "{:<44} {:<9} {:>4}  {}", row.key, row.ty, row.count, row.printed)?;
            }
        }

        "v" => {
            for row in rows(image).into_iter().filter(|r| filters.matches(&r.key)) {
                let tag = row.tag.map(|t| format!("0x{t:04x}")).unwrap_or_default();
                writeln!(
                    out,
                    "{tag:<6} {:<16} {:<28} {:<9} {:>4}  {}",
                    row.group, row.name, row.ty, row.count, row.raw
                )?;
            }
        }

        "c" => writeln!(out, "{}", image.comment().unwrap_or_default())?,

        "h" => {
            let Some(raw) = image.exif().raw() else {
                return Err(no_exif());
            };
            for line in hex_dump(raw) {
                writeln!(out, "{line}")?;
            }
        }

        "C" => match image.icc() {
            Some(icc) => out.write_all(icc)?,
            None => eprintln!("No ICC profile found in the file"),
        },

        "S" | "R" => {
            for line in image.structure(mode == "R")? {
                writeln!(out, "{line}")?;
            }
        }

        "X" => {
            let packet = match image.xmp().raw() {
                Some(raw) => raw.to_string(),
                None => image.xmp().to_packet().map_err(Error::from)?,
            };
            writeln!(out, "{packet}")?;
        }

        // clap only lets the modes above through
        other => {
            return Err(Failure {
                code: 2,
                message: format!("unknown print mode `{other}`"),
            });
        }
    }
    Ok(())
}

/// Prints the columns named by `-P`, always in the same order.
fn print_columns(image: &Image, filters: &Filters, flags: &str) -> Result<(), Failure> {
    let families: Vec<char> = flags.chars().filter(|c| "EIX".contains(*c)).collect();
    let has = |c: char| flags.contains(c);

    let mut out = std::io::stdout().lock();
    for row in rows(image)
        .into_iter()
        .filter(|r| families.is_empty() || families.contains(&r.family))
        .filter(|r| filters.matches(&r.key))
    {
        let mut line = Vec::new();
        if has('x') {
            line.push(row.tag.map(|t| format!("0x{t:04x}")).unwrap_or_else(|| " ".repeat(6)));
        }
        if has('g') {
            line.push(format!("{:<16}", row.group));
        }
        if has('k') {
            line.push(format!("{:<44}", row.key));
        }
        if has('l') {
            line.push(format!("{:<32}", row.label));
        }
        if has('n') {
            line.push(format!("{:<28}", row.name));
        }
        if has('y') {
            line.push(format!("{:<9}", row.ty));
        }
        if has('c') {
            line.push(format!("{:>4}", row.count));
        }
        if has('s') {
            line.push(format!("{:>4}", row.size));
        }
        if has('v') {
            line.push(row.raw.clone());
        }
        if has('t') {
            line.push(row.printed.clone());
        }
        if has('h') {
            line.push(row.hex.clone());
        }
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Where each `-e`/`-i` target lives, next to the image.
fn target_path(file: &Path, target: char) -> Result<PathBuf, Failure> {
    let extension = match target {
        'X' => "xmp",
        'I' => "iptc",
        'E' => "exv",
        'C' => "icc",
        other => {
            return Err(Failure {
                code: 2,
                message: format!("unknown target `{other}`; expected X, I, E or C"),
            });
        }
    };
    Ok(file.with_extension(extension))
}

fn extract(image: &Image, file: &Path, targets: &str, force: bool) -> Result<(), Failure> {
    for target in targets.chars() {
        let path = target_path(file, target)?;
        let bytes = match target {
            'X' if !image.xmp().is_empty() => {
                Some(image.xmp().to_packet().map_err(Error::from)?.into_bytes())
            }
            'I' if !image.iptc().is_empty() => Some(image.iptc().to_bytes()),
            'E' if !image.exif().is_empty() => Some(image.exif().to_bytes()?),
            'C' => image.icc().map(<[u8]>::to_vec),
            _ => None,
        };

        let Some(bytes) = bytes else {
            log::warn!("nothing to extract for `{target}`");
            continue;
        };

        if path.exists() && !force {
            return Err(Failure {
                code: 1,
                message: format!("`{}` exists; use --force to overwrite it", path.display()),
            });
        }
        log::info!("writing `{}`", path.display());
        std::fs::write(&path, bytes)?;
    }
    Ok(())
}

fn insert(image: &mut Image, file: &Path, targets: &str) -> Result<(), Failure> {
    for target in targets.chars() {
        let path = target_path(file, target)?;
        let bytes = std::fs::read(&path)?;
        log::info!("reading `{}`", path.display());

        match target {
            'X' => *image.xmp_mut() = imgmeta::XmpData::parse_bytes(&bytes).map_err(Error::from)?.0,
            'I' => *image.iptc_mut() = imgmeta::IptcData::parse(&bytes).map_err(Error::from)?.0,
            'E' => *image.exif_mut() = imgmeta::ExifData::parse(&bytes).map_err(Error::from)?.0,
            _ => image.set_icc(Some(bytes)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_dumps_show_ascii() {
        let lines = hex_dump(b"MM\0*\0\0\0\x08hello, world!!!!!");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000  4d 4d 00 2a 00 00 00 08 68 65"));
        assert!(lines[0].ends_with("MM.*....hello, w"));
        assert!(lines[1].starts_with("0010  6f 72 6c 64 21"));
    }

    #[test]
    fn filters_match_keys() {
        let args = Args::parse_from([
            "imgmeta",
            "-K",
            "Exif.Image.Make",
            "-g",
            "^Exif\\.Photo\\.",
            "photo.jpg",
        ]);
        let filters = Filters::new(&args).unwrap();
        assert!(filters.matches("Exif.Image.Make"));
        assert!(filters.matches("Exif.Photo.FNumber"));
        assert!(!filters.matches("Exif.Image.Model"));

        let args = Args::parse_from(["imgmeta", "photo.jpg"]);
        assert!(Filters::new(&args).unwrap().matches("Xmp.dc.title"));
    }

    #[test]
    fn targets_sit_next_to_the_image() {
        let file = Path::new("/photos/cat.jpg");
        assert_eq!(target_path(file, 'X').ok().unwrap(), Path::new("/photos/cat.xmp"));
        assert_eq!(target_path(file, 'E').ok().unwrap(), Path::new("/photos/cat.exv"));
        assert!(target_path(file, 'Q').is_err());
    }

    #[test]
    fn fatal_failures_decide_the_exit_code() {
        assert_eq!([NO_EXIF, 1, 2].into_iter().fold(0, worse), 1);
        assert_eq!([2, NO_EXIF].into_iter().fold(0, worse), 2);
        assert_eq!([NO_EXIF].into_iter().fold(0, worse), NO_EXIF);
        assert_eq!([0, 0].into_iter().fold(0, worse), 0);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        assert!(Args::try_parse_from(["imgmeta", "-p", "z", "photo.jpg"]).is_err());
        assert!(Args::try_parse_from(["imgmeta", "-v", "-q", "photo.jpg"]).is_err());
        assert!(Args::try_parse_from(["imgmeta"]).is_err());
    }
}
