//! User overrides for printed values.
//!
//! The file is INI-like. Each section names a key, and each line maps a raw
//! value to the text that should be shown for it:
//!
//! ```ini
//! ; my lenses
//! [Exif.CanonCs.LensType]
//! 747 = My favorite zoom
//! ```
//!
//! It lives at `~/.imgmeta.ini` (`imgmeta.ini` on Windows), unless the
//! `IMGMETA_CONFIG` environment variable points somewhere else.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use rustc_hash::FxHashMap;
use winnow::{
    ModalResult, Parser as _,
    ascii::{space0, till_line_ending},
    combinator::{delimited, preceded, separated_pair},
    error::ContextError,
    token::take_till,
};

use crate::error::Error;

/// The environment variable that overrides [`config_path`].
pub const CONFIG_ENV: &str = "IMGMETA_CONFIG";

#[cfg(windows)]
const CONFIG_FILE_NAME: &str = "imgmeta.ini";
#[cfg(not(windows))]
const CONFIG_FILE_NAME: &str = ".imgmeta.ini";

/// Where the config file is looked for.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Loaded display-name overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// section (a key) => raw value => display name
    sections: FxHashMap<String, FxHashMap<String, String>>,
}

static GLOBAL: LazyLock<Config> = LazyLock::new(|| {
    let Some(path) = config_path() else {
        log::debug!("no home directory; running without a config file");
        return Config::default();
    };

    if !path.exists() {
        log::debug!("no config file at `{}`", path.display());
        return Config::default();
    }

    Config::load(&path).unwrap_or_else(|e| {
        log::warn!("ignoring config file `{}`. err: {e}", path.display());
        Config::default()
    })
});

impl Config {
    /// The process-wide config, loaded from [`config_path`] on first use.
    pub fn global() -> &'static Config {
        &GLOBAL
    }

    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading config from `{}`", path.display());
        Ok(Self::parse(&text))
    }

    /// Parses config text. Lines that don't make sense are skipped.
    pub fn parse(text: &str) -> Self {
        let mut config = Config::default();
        let mut current: Option<String> = None;

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Ok(name) = section.parse(line) {
                current = Some(name.to_string());
                continue;
            }

            match (entry.parse(line), &current) {
                (Ok((raw, display)), Some(name)) => {
                    config
                        .sections
                        .entry(name.clone())
                        .or_default()
                        .insert(raw.trim().to_string(), strip_comment(display).to_string());
                }
                (Ok(_), None) => {
                    log::warn!("config line `{}` isn't in a section; skipping it", number + 1);
                }
                (Err(_), _) => {
                    log::warn!("couldn't understand config line `{}`: `{line}`", number + 1);
                }
            }
        }

        log::trace!("config has `{}` sections", config.sections.len());
        config
    }

    /// The display name for `raw` under `key`, if one is configured.
    pub fn display_name(&self, key: &str, raw: &str) -> Option<&str> {
        self.sections
            .get(key)
            .and_then(|s| s.get(raw.trim()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// `[Family.Group.Tag]`
fn section<'i>(input: &mut &'i str) -> ModalResult<&'i str, ContextError> {
    delimited('[', take_till(1.., ']'), ']')
        .map(str::trim)
        .parse_next(input)
}

/// `raw value = display name`
fn entry<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str), ContextError> {
    separated_pair(take_till(1.., '='), '=', preceded(space0, till_line_ending)).parse_next(input)
}

/// Drops a trailing `; comment` from a display name.
fn strip_comment(display: &str) -> &str {
    display
        .split_once(" ;")
        .map_or(display, |(before, _)| before)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    const INI: &str = "\
; lenses I own
[Exif.CanonCs.LensType]
747 = My big zoom
  61 =   Wide one ; the old one

# broken lines are skipped
not an entry
[Exif.Photo.FNumber]
F2.8 = fast
";

    #[test]
    fn parses_sections_and_entries() {
        logger();
        let config = Config::parse(INI);

        assert_eq!(
            config.display_name("Exif.CanonCs.LensType", "747"),
            Some("My big zoom")
        );
        assert_eq!(
            config.display_name("Exif.CanonCs.LensType", "61"),
            Some("Wide one")
        );
        assert_eq!(config.display_name("Exif.Photo.FNumber", "F2.8"), Some("fast"));
        assert_eq!(config.display_name("Exif.CanonCs.LensType", "1"), None);
        assert_eq!(config.display_name("Exif.Image.Make", "747"), None);
    }

    #[test]
    fn entries_before_sections_are_ignored() {
        logger();
        let config = Config::parse("1 = one\n");
        assert!(config.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imgmeta.ini");
        std::fs::write(&path, INI).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.display_name("Exif.CanonCs.LensType", "747"),
            Some("My big zoom")
        );

        assert!(Config::load(dir.path().join("missing.ini")).is_err());
    }
}
