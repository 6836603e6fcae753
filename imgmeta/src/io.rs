//! Random-access byte I/O.
//!
//! Providers never touch files directly. Instead, they read and write
//! through a [`BasicIo`], which may be backed by memory, a file on disk, or
//! (with the `http` feature) a URL.
//!
//! Reads never come up short: asking for bytes past the end gives an
//! [`Error::FileTruncated`].

use std::path::{Path, PathBuf};

use crate::error::Error;

/// A random-access byte store.
pub trait BasicIo: core::fmt::Debug {
    /// The current size, in bytes.
    fn size(&self) -> u64;

    /// Borrows `n` bytes starting at `offset`.
    fn read(&self, offset: u64, n: u64) -> Result<&[u8], Error>;

    /// Overwrites bytes starting at `offset`, growing the store if needed.
    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<(), Error>;

    /// Makes sure the store is at least `n` bytes long. New bytes are zero.
    fn reserve(&mut self, n: u64) -> Result<(), Error>;

    /// Cuts the store down to `n` bytes.
    fn truncate(&mut self, n: u64) -> Result<(), Error>;

    /// Borrows everything.
    fn as_bytes(&self) -> &[u8];

    /// The file this store came from, if any.
    fn path(&self) -> Option<&Path> {
        None
    }

    /// Flushes any changes to the backing storage.
    fn commit(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Swaps the whole content for `bytes`.
    fn replace(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.truncate(0)?;
        self.write(0, bytes)
    }

    /// A read-only window of `len` bytes starting at `base`.
    fn sub_view(&self, base: u64, len: u64) -> Result<SubView<'_>, Error> {
        Ok(SubView {
            data: self.read(base, len)?,
            base,
        })
    }
}

/// Checks a read against the data's size.
fn checked_range(size: usize, offset: u64, n: u64) -> Result<core::ops::Range<usize>, Error> {
    let truncated = || Error::FileTruncated {
        offset,
        wanted: n,
        size: size as u64,
    };

    let end = offset.checked_add(n).ok_or_else(truncated)?;
    if end > size as u64 {
        log::debug!("read of `{n}` bytes at `{offset}` runs past the end (`{size}` bytes)");
        return Err(truncated());
    }
    Ok(offset as usize..end as usize)
}

fn write_into(data: &mut Vec<u8>, offset: u64, bytes: &[u8]) {
    let start = offset as usize;
    let end = start + bytes.len();
    if data.len() < end {
        data.resize(end, 0);
    }
    data[start..end].copy_from_slice(bytes);
}

/// An in-memory store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemIo {
    data: Vec<u8>,
}

impl MemIo {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Takes the bytes back out.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl BasicIo for MemIo {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&self, offset: u64, n: u64) -> Result<&[u8], Error> {
        Ok(&self.data[checked_range(self.data.len(), offset, n)?])
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<(), Error> {
        write_into(&mut self.data, offset, bytes);
        Ok(())
    }

    fn reserve(&mut self, n: u64) -> Result<(), Error> {
        if (self.data.len() as u64) < n {
            self.data.resize(n as usize, 0);
        }
        Ok(())
    }

    fn truncate(&mut self, n: u64) -> Result<(), Error> {
        self.data.truncate(n as usize);
        Ok(())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A file, read into memory once.
///
/// Changes are kept in memory until [`BasicIo::commit`], which writes a
/// temporary file next to the original and renames it into place. If that
/// fails, the original file is left alone.
#[derive(Debug)]
pub struct FileIo {
    path: PathBuf,
    data: Vec<u8>,
    dirty: bool,
}

impl FileIo {
    /// Reads the whole file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path).map_err(|e| {
            log::error!("Failed to read `{}`. err: {e}", path.display());
            Error::FailedToReadImageData {
                path: path.display().to_string(),
            }
        })?;

        log::debug!("read `{}` bytes from `{}`", data.len(), path.display());
        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }
}

impl BasicIo for FileIo {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&self, offset: u64, n: u64) -> Result<&[u8], Error> {
        Ok(&self.data[checked_range(self.data.len(), offset, n)?])
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<(), Error> {
        write_into(&mut self.data, offset, bytes);
        self.dirty = true;
        Ok(())
    }

    fn reserve(&mut self, n: u64) -> Result<(), Error> {
        if (self.data.len() as u64) < n {
            self.data.resize(n as usize, 0);
            self.dirty = true;
        }
        Ok(())
    }

    fn truncate(&mut self, n: u64) -> Result<(), Error> {
        if (self.data.len() as u64) > n {
            self.data.truncate(n as usize);
            self.dirty = true;
        }
        Ok(())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn commit(&mut self) -> Result<(), Error> {
        use std::io::Write as _;

        if !self.dirty {
            log::trace!("nothing changed; not touching `{}`", self.path.display());
            return Ok(());
        }

        // the temp file must live on the same filesystem for the rename to
        // be atomic
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&self.data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            log::error!("Failed to move new file into place. err: {e}");
            Error::from(e.error)
        })?;

        log::debug!(
            "wrote `{}` bytes to `{}`",
            self.data.len(),
            self.path.display()
        );
        self.dirty = false;
        Ok(())
    }
}

/// An image fetched over HTTP(S).
///
/// The response body is downloaded once. Afterward, it's just memory, and
/// it can't be written.
#[cfg(feature = "http")]
#[derive(Debug)]
pub struct RemoteIo {
    url: String,
    data: Vec<u8>,
}

#[cfg(feature = "http")]
impl RemoteIo {
    /// Downloads the whole resource.
    pub fn fetch(url: &str) -> Result<Self, Error> {
        let failed = |e: reqwest::Error| {
            log::error!("Failed to fetch `{url}`. err: {e}");
            Error::FailedToReadImageData {
                path: url.to_string(),
            }
        };

        let data = reqwest::blocking::get(url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(failed)?
            .to_vec();

        log::debug!("fetched `{}` bytes from `{url}`", data.len());
        Ok(Self {
            url: url.to_string(),
            data,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
impl BasicIo for RemoteIo {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&self, offset: u64, n: u64) -> Result<&[u8], Error> {
        Ok(&self.data[checked_range(self.data.len(), offset, n)?])
    }

    fn write(&mut self, _offset: u64, _bytes: &[u8]) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn reserve(&mut self, _n: u64) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn truncate(&mut self, _n: u64) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A bounded, read-only window into another store.
///
/// Offsets are relative to the window's start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubView<'a> {
    data: &'a [u8],
    base: u64,
}

impl<'a> SubView<'a> {
    /// Where this window starts in its parent.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// The window's bytes, with the parent's lifetime.
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl BasicIo for SubView<'_> {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&self, offset: u64, n: u64) -> Result<&[u8], Error> {
        Ok(&self.data[checked_range(self.data.len(), offset, n)?])
    }

    fn write(&mut self, _offset: u64, _bytes: &[u8]) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn reserve(&mut self, _n: u64) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn truncate(&mut self, _n: u64) -> Result<(), Error> {
        Err(Error::ReadOnlyIo)
    }

    fn as_bytes(&self) -> &[u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, util::logger};

    #[test]
    fn mem_reads_are_exact() {
        logger();
        let io = MemIo::new(b"abcdef".to_vec());

        assert_eq!(io.read(2, 3).unwrap(), b"cde");
        assert_eq!(io.read(6, 0).unwrap(), b"");

        let err = io.read(4, 3).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileTruncated);
        assert!(io.read(u64::MAX, 2).is_err());
    }

    #[test]
    fn mem_writes_grow() {
        logger();
        let mut io = MemIo::new(Vec::new());
        io.write(2, b"xy").unwrap();
        assert_eq!(io.as_bytes(), b"\0\0xy");

        io.reserve(6).unwrap();
        assert_eq!(io.size(), 6);
        io.truncate(1).unwrap();
        assert_eq!(io.as_bytes(), b"\0");

        io.replace(b"new").unwrap();
        assert_eq!(io.into_inner(), b"new");
    }

    #[test]
    fn sub_views_are_bounded_and_read_only() {
        logger();
        let io = MemIo::new(b"0123456789".to_vec());
        let mut view = io.sub_view(3, 4).unwrap();

        assert_eq!(view.base(), 3);
        assert_eq!(view.read(0, 4).unwrap(), b"3456");
        assert!(view.read(2, 3).is_err());
        assert_eq!(view.write(0, b"z").unwrap_err().code(), ErrorCode::ReadOnlyIo);
        assert!(io.sub_view(8, 4).is_err());
    }

    #[test]
    fn file_commit_is_atomic_replace() {
        logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.bin");
        std::fs::write(&path, b"before").unwrap();

        let mut io = FileIo::open(&path).unwrap();
        io.replace(b"after!!").unwrap();

        // nothing hits the disk until commit
        assert_eq!(std::fs::read(&path).unwrap(), b"before");
        io.commit().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"after!!");
    }

    #[test]
    fn missing_files_fail_to_open() {
        logger();
        let err = FileIo::open("/definitely/not/here.jpg").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FailedToReadImageData);
    }
}
