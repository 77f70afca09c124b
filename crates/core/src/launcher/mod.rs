//! Classpath resolution for executable archives.
//!
//! The launcher selects the classes directory and the library entries of a
//! [`Layout`] and orders them:
//!
//! - without an index: classes, then libraries in enumeration order
//! - with an index: classes, then libraries missing from the index (in
//!   enumeration order), then indexed libraries (in index order)
//!
//! Each selected entry is opened as a nested archive that the caller owns.

pub mod index;
pub mod layout;
pub mod manifest;

pub use index::ClasspathIndex;
pub use layout::Layout;
pub use manifest::Manifest;

use crate::classpath::ClassPath;
use crate::config::LauncherConfig;
use indexmap::IndexSet;
use nestjar_api::{Archive, Entry, LoaderError, Result};
use tracing::{debug, info, warn};

pub struct Launcher {
    archive: Box<dyn Archive>,
    layout: Layout,
    manifest: Option<Manifest>,
    index: Option<ClasspathIndex>,
    config: LauncherConfig,
}

impl Launcher {
    pub fn new(archive: Box<dyn Archive>, layout: Layout) -> Result<Self> {
        Self::with_config(archive, layout, LauncherConfig::default())
    }

    pub fn jar(archive: Box<dyn Archive>) -> Result<Self> {
        Self::new(archive, Layout::Jar)
    }

    pub fn war(archive: Box<dyn Archive>) -> Result<Self> {
        Self::new(archive, Layout::War)
    }

    /// Build a launcher for whichever layout the archive content suggests.
    pub fn detect(archive: Box<dyn Archive>, config: LauncherConfig) -> Result<Self> {
        let layout = Layout::detect(archive.as_ref())?;
        Self::with_config(archive, layout, config)
    }

    pub fn with_config(
        archive: Box<dyn Archive>,
        layout: Layout,
        config: LauncherConfig,
    ) -> Result<Self> {
        let manifest = Manifest::read(archive.as_ref())?;
        let location = config
            .classpath_index
            .clone()
            .or_else(|| {
                manifest
                    .as_ref()
                    .and_then(|m| m.get(manifest::CLASSPATH_INDEX))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| layout.default_classpath_index().to_string());
        let index = ClasspathIndex::load(archive.as_ref(), &location)?;

        info!(
            "Launcher for {} ({} layout, {})",
            archive.url(),
            layout,
            if index.is_some() { "indexed" } else { "no index" }
        );

        Ok(Self {
            archive,
            layout,
            manifest,
            index,
            config,
        })
    }

    pub fn archive(&self) -> &dyn Archive {
        self.archive.as_ref()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn classpath_index(&self) -> Option<&ClasspathIndex> {
        self.index.as_ref()
    }

    /// The `Start-Class` of the application.
    pub fn main_class(&self) -> Result<String> {
        self.manifest
            .as_ref()
            .and_then(|m| m.get(manifest::START_CLASS))
            .map(str::to_string)
            .ok_or_else(|| {
                LoaderError::NotFound(format!(
                    "No '{}' manifest entry specified in {}",
                    manifest::START_CLASS,
                    self.archive.url()
                ))
            })
    }

    /// Ordered classpath entries, without opening them.
    pub fn classpath_entries(&self) -> Result<Vec<Entry>> {
        let mut classes: Option<Entry> = None;
        let mut libraries: IndexSet<Entry> = IndexSet::new();

        let classes_dir = self.layout.classes_dir();
        for entry in self.archive.entries_under(self.layout.search_root())? {
            let entry = entry?;
            if self.layout.is_library(&entry) {
                libraries.insert(entry);
            } else if classes.is_none()
                && (self.layout.is_classes_dir(&entry) || entry.starts_with(classes_dir))
            {
                // Containers may only store the files below the directory.
                classes = Some(Entry::directory(classes_dir));
            }
        }

        let classes = classes.ok_or_else(|| {
            LoaderError::NotFound(format!("{} in {}", classes_dir, self.archive.url()))
        })?;

        let mut ordered = Vec::with_capacity(libraries.len() + 1);
        ordered.push(classes);

        match &self.index {
            None => ordered.extend(libraries),
            Some(index) => {
                let (indexed, extra): (Vec<Entry>, Vec<Entry>) = libraries
                    .iter()
                    .cloned()
                    .partition(|entry| index.contains(&entry.name));
                if !extra.is_empty() {
                    debug!(
                        "{} libraries not in {}, placing them after {}",
                        extra.len(),
                        index.location(),
                        classes_dir
                    );
                }
                ordered.extend(extra);

                for name in index.iter() {
                    match indexed.iter().find(|entry| entry.name == name) {
                        Some(entry) => ordered.push(entry.clone()),
                        None => self.report_stale(index, name),
                    }
                }
            }
        }

        Ok(ordered)
    }

    fn report_stale(&self, index: &ClasspathIndex, name: &str) {
        if self.config.warn_on_stale_index {
            warn!("{} lists {} which is not in the archive", index.location(), name);
        } else {
            debug!("{} lists {} which is not in the archive", index.location(), name);
        }
    }

    /// Ordered classpath archives. Every yielded archive is owned by the
    /// caller; the iterator stops after the first error.
    pub fn classpath_archives(&self) -> Result<ClasspathArchives<'_>> {
        let entries = self.classpath_entries()?;
        debug!("Resolved {} classpath entries", entries.len());
        Ok(ClasspathArchives {
            root: self.archive.as_ref(),
            pending: entries.into_iter(),
            failed: false,
        })
    }

    /// Open every classpath archive, or none: on failure the archives opened
    /// so far are closed before the error is returned.
    pub fn resolve_classpath(&self) -> Result<Vec<Box<dyn Archive>>> {
        let mut archives = Vec::new();
        for archive in self.classpath_archives()? {
            match archive {
                Ok(archive) => archives.push(archive),
                Err(e) => {
                    close_all(archives);
                    return Err(e);
                }
            }
        }
        Ok(archives)
    }

    /// Materialize a class-loading context whose search order is exactly the
    /// order of `archives`.
    pub fn create_class_loader<I>(&self, archives: I) -> Result<ClassPath>
    where
        I: IntoIterator<Item = Result<Box<dyn Archive>>>,
    {
        let mut collected = Vec::new();
        for archive in archives {
            match archive {
                Ok(archive) => collected.push(archive),
                Err(e) => {
                    close_all(collected);
                    return Err(e);
                }
            }
        }
        Ok(ClassPath::new(collected))
    }

    pub fn close(&mut self) -> Result<()> {
        self.archive.close()
    }
}

/// Release archives opened before a resolution failure.
fn close_all(archives: Vec<Box<dyn Archive>>) {
    for mut archive in archives {
        if let Err(e) = archive.close() {
            warn!("Failed to close {}: {}", archive.url(), e);
        }
    }
}

/// Iterator over the classpath archives of a [`Launcher`].
pub struct ClasspathArchives<'a> {
    root: &'a dyn Archive,
    pending: std::vec::IntoIter<Entry>,
    failed: bool,
}

impl ClasspathArchives<'_> {
    /// Entries not yet opened.
    pub fn remaining(&self) -> &[Entry] {
        self.pending.as_slice()
    }
}

impl Iterator for ClasspathArchives<'_> {
    type Item = Result<Box<dyn Archive>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let entry = self.pending.next()?;
        let archive = self.root.nested_archive(&entry);
        if let Err(e) = &archive {
            warn!("Failed to open {}: {}", entry.name, e);
            self.failed = true;
        }
        Some(archive)
    }
}
