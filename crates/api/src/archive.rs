//! Archive contract shared by the exploded and packaged implementations.
//!
//! An [`Archive`] is a scoped handle over a directory tree or a zip container.
//! Handles are owned: whoever receives one is responsible for closing it (or
//! dropping it, which closes it as well). Nested archives obtained through
//! [`Archive::nested_archive`] are independent handles.

use crate::error::Result;
use url::Url;

/// Lazy sequence of entries produced by an archive.
pub type EntryIter<'a> = Box<dyn Iterator<Item = Result<Entry>> + 'a>;

/// A single entry of an archive.
///
/// `name` is `/`-separated and relative to the archive root. Directory names
/// always end with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub name: String,
    pub is_directory: bool,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if !name.ends_with('/') {
            name.push('/');
        }
        Self {
            name,
            is_directory: true,
        }
    }

    /// Last path segment, without the trailing slash of directories.
    pub fn file_name(&self) -> &str {
        let trimmed = self.name.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
    }
}

pub trait Archive: Send {
    /// Identity of the archive, rendered as a locatable URL.
    fn url(&self) -> &Url;

    fn is_exploded(&self) -> bool;

    /// Enumerate every entry. Calling again restarts the enumeration.
    fn entries(&self) -> Result<EntryIter<'_>>;

    /// Enumerate the entries whose name starts with `prefix`.
    fn entries_under<'a>(&'a self, prefix: &'a str) -> Result<EntryIter<'a>> {
        let entries = self.entries()?;
        Ok(Box::new(entries.filter(move |entry| match entry {
            Ok(entry) => entry.name.starts_with(prefix),
            Err(_) => true,
        })))
    }

    /// Read the content of a file entry. `Ok(None)` when absent.
    fn read_entry(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// URL of a resource inside this archive, if it exists.
    fn resource_url(&self, name: &str) -> Result<Option<Url>>;

    /// Open `entry` as an archive of its own.
    fn nested_archive(&self, entry: &Entry) -> Result<Box<dyn Archive>>;

    /// Release underlying handles. Idempotent.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;
}

impl std::fmt::Debug for dyn Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("url", &self.url().as_str())
            .field("exploded", &self.is_exploded())
            .field("closed", &self.is_closed())
            .finish()
    }
}
