use super::{JarArchive, directory_url, file_url};
use nestjar_api::{Archive, Entry, EntryIter, LoaderError, Result, Url};
use std::path::{Component, Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Archive backed by a directory tree.
///
/// Entries are listed depth-first with siblings sorted by file name, so a
/// given tree always enumerates in the same order.
pub struct ExplodedArchive {
    root: PathBuf,
    recursive: bool,
    url: Url,
    closed: bool,
}

impl ExplodedArchive {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_recursion(root, true)
    }

    /// With `recursive == false` only the direct children of the root are listed.
    pub fn with_recursion(root: impl AsRef<Path>, recursive: bool) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        if !root.is_dir() {
            return Err(LoaderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Invalid source directory {}", root.display()),
            )));
        }
        let url = directory_url(&root)?;
        Ok(Self {
            root,
            recursive,
            url,
            closed: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(LoaderError::Closed(self.url.to_string()));
        }
        Ok(())
    }

    /// Map an entry name onto the tree. Names escaping the root resolve to nothing.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name.trim_end_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.root.join(relative))
    }

    fn walk(&self, start: &Path) -> EntryIter<'_> {
        if !start.is_dir() {
            return Box::new(std::iter::empty());
        }
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let root = self.root.clone();

        Box::new(
            WalkDir::new(start)
                .min_depth(1)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .map(move |res| {
                    let dir_entry = res.map_err(std::io::Error::from)?;
                    let is_directory = dir_entry.file_type().is_dir();
                    let name = relative_name(&root, dir_entry.path(), is_directory);
                    Ok(Entry { name, is_directory })
                }),
        )
    }
}

fn relative_name(root: &Path, path: &Path, is_directory: bool) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if is_directory {
        name.push('/');
    }
    name
}

impl Archive for ExplodedArchive {
    fn url(&self) -> &Url {
        &self.url
    }

    fn is_exploded(&self) -> bool {
        true
    }

    fn entries(&self) -> Result<EntryIter<'_>> {
        self.ensure_open()?;
        Ok(self.walk(&self.root))
    }

    fn entries_under<'a>(&'a self, prefix: &'a str) -> Result<EntryIter<'a>> {
        self.ensure_open()?;
        // Walk from the deepest directory that can hold matching names; a
        // partial last segment such as "WEB-INF/li" still needs its parent.
        let parent = match prefix.trim_end_matches('/').rsplit_once('/') {
            Some((parent, _)) if self.recursive => parent,
            _ => "",
        };
        let Some(start) = self.resolve(parent) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let entries = self.walk(&start);
        Ok(Box::new(entries.filter(move |entry| match entry {
            Ok(entry) => entry.name.starts_with(prefix),
            Err(_) => true,
        })))
    }

    fn read_entry(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        match self.resolve(name) {
            Some(path) if path.is_file() => Ok(Some(std::fs::read(path)?)),
            _ => Ok(None),
        }
    }

    fn resource_url(&self, name: &str) -> Result<Option<Url>> {
        self.ensure_open()?;
        match self.resolve(name) {
            Some(path) if path.is_dir() => Ok(Some(directory_url(&path)?)),
            Some(path) if path.exists() => Ok(Some(file_url(&path)?)),
            _ => Ok(None),
        }
    }

    fn nested_archive(&self, entry: &Entry) -> Result<Box<dyn Archive>> {
        self.ensure_open()?;
        let path = self
            .resolve(&entry.name)
            .ok_or_else(|| LoaderError::NotFound(entry.name.clone()))?;

        if path.is_dir() {
            trace!("Opening nested directory {}", path.display());
            return Ok(Box::new(ExplodedArchive::new(&path)?));
        }
        if !path.is_file() {
            return Err(LoaderError::NotFound(format!(
                "{} in {}",
                entry.name, self.url
            )));
        }

        // Nested jars keep their plain file URL as identity.
        trace!("Opening nested jar {}", path.display());
        let url = file_url(&path)?;
        Ok(Box::new(JarArchive::open_with_url(&path, url)?))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
