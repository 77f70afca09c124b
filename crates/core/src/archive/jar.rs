use super::file_url;
use super::source::{ContainerSource, Origin};
use nestjar_api::{Archive, Entry, EntryIter, LoaderError, Result, Url};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};
use zip::result::ZipError;
use zip::{CompressionMethod, ZipArchive};

/// An opened zip container shared by every view onto it.
struct Container {
    zip: Mutex<ZipArchive<ContainerSource>>,
    origin: Origin,
    /// `jar:<outer>!/` form that nested entry URLs are appended to
    base: String,
    location: String,
}

impl Container {
    fn open(origin: Origin, base: String, location: String) -> Result<Self> {
        let source = origin.open()?;
        let zip = ZipArchive::new(source).map_err(|e| zip_error(&location, e))?;
        Ok(Self {
            zip: Mutex::new(zip),
            origin,
            base,
            location,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ZipArchive<ContainerSource>> {
        self.zip.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    /// Entry at central-directory position `index`, relative to `prefix`.
    fn entry_at(&self, index: usize, prefix: &str) -> Result<Option<Entry>> {
        let mut zip = self.lock();
        let file = zip
            .by_index_raw(index)
            .map_err(|e| zip_error(&self.location, e))?;
        let name = file.name();
        if name.len() <= prefix.len() || !name.starts_with(prefix) {
            return Ok(None);
        }
        Ok(Some(Entry {
            name: name[prefix.len()..].to_string(),
            is_directory: file.is_dir(),
        }))
    }

    fn contains(&self, name: &str) -> Result<bool> {
        let mut zip = self.lock();
        let found = match zip.index_for_name(name).ok_or(ZipError::FileNotFound).and_then(|i| zip.by_index_raw(i)) {
            Ok(_) => true,
            Err(ZipError::FileNotFound) => false,
            Err(e) => return Err(zip_error(&self.location, e)),
        };
        Ok(found)
    }
}

fn zip_error(location: &str, err: ZipError) -> LoaderError {
    match err {
        ZipError::Io(io) => LoaderError::Io(io),
        other => LoaderError::corrupt(location, other),
    }
}

/// Archive backed by a zip container.
///
/// A handle is either a whole container (root or nested jar) or a directory
/// view (`prefix`) onto one. Views share the container; closing a handle only
/// drops its own reference.
pub struct JarArchive {
    container: Option<Arc<Container>>,
    prefix: String,
    url: Url,
    /// Resources of this handle resolve as `<resource_root><name>`.
    resource_root: String,
}

impl JarArchive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let base = format!("jar:{}!/", file_url(&path)?);
        let url = Url::parse(&base)?;
        Self::open_with_base(&path, base, url)
    }

    /// Open a container whose identity differs from its `jar:` form, such as
    /// a library file of an exploded archive.
    pub fn open_with_url(path: impl AsRef<Path>, url: Url) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let base = format!("jar:{}!/", file_url(&path)?);
        Self::open_with_base(&path, base, url)
    }

    fn open_with_base(path: &Path, base: String, url: Url) -> Result<Self> {
        let location = path.display().to_string();
        let container = Container::open(Origin::File(path.to_path_buf()), base, location)?;
        Ok(Self::whole(Arc::new(container), url))
    }

    fn whole(container: Arc<Container>, url: Url) -> Self {
        let resource_root = container.base.clone();
        Self {
            container: Some(container),
            prefix: String::new(),
            url,
            resource_root,
        }
    }

    fn container(&self) -> Result<&Arc<Container>> {
        self.container
            .as_ref()
            .ok_or_else(|| LoaderError::Closed(self.url.to_string()))
    }

    fn directory_view(&self, container: &Arc<Container>, name: &str) -> Result<Box<dyn Archive>> {
        let prefix = if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{}/", name)
        };
        let url = Url::parse(&format!(
            "{}{}!/",
            container.base,
            prefix.trim_end_matches('/')
        ))?;
        trace!("Opening directory view {}", url);
        Ok(Box::new(JarArchive {
            container: Some(container.clone()),
            prefix,
            resource_root: url.to_string(),
            url,
        }))
    }

    fn nested_container(&self, container: &Arc<Container>, name: &str) -> Result<Box<dyn Archive>> {
        let origin = {
            let mut zip = container.lock();
            let file = match zip.index_for_name(name).ok_or(ZipError::FileNotFound).and_then(|i| zip.by_index_raw(i)) {
                Ok(file) => file,
                Err(ZipError::FileNotFound) => {
                    return Err(LoaderError::NotFound(format!(
                        "{} in {}",
                        name, container.location
                    )));
                }
                Err(e) => return Err(zip_error(&container.location, e)),
            };

            if file.compression() == CompressionMethod::Stored {
                let (start, len) = (file.data_start(), file.size());
                drop(file);
                container.origin.slice(start.ok_or_else(|| std::io::Error::other("zip entry data offset unavailable"))?, len)?
            } else {
                drop(file);
                debug!(
                    "Nested entry {} in {} is compressed, inflating into memory",
                    name, container.location
                );
                let mut file = zip
                    .by_name(name)
                    .map_err(|e| zip_error(&container.location, e))?;
                let mut bytes = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut bytes)?;
                Origin::Bytes(Arc::from(bytes))
            }
        };

        let base = format!("{}{}!/", container.base, name);
        let url = Url::parse(&base)?;
        let location = format!("{}!/{}", container.location, name);
        trace!("Opening nested container {}", url);
        let nested = Container::open(origin, base, location)?;
        Ok(Box::new(JarArchive::whole(Arc::new(nested), url)))
    }
}

impl Archive for JarArchive {
    fn url(&self) -> &Url {
        &self.url
    }

    fn is_exploded(&self) -> bool {
        false
    }

    fn entries(&self) -> Result<EntryIter<'_>> {
        let container = self.container()?.clone();
        let len = container.len();
        let prefix = self.prefix.clone();
        Ok(Box::new((0..len).filter_map(move |index| {
            container.entry_at(index, &prefix).transpose()
        })))
    }

    fn read_entry(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let container = self.container()?;
        let full = format!("{}{}", self.prefix, name);
        let mut zip = container.lock();
        let mut file = match zip.by_name(&full) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(zip_error(&container.location, e)),
        };
        if file.is_dir() {
            return Ok(None);
        }
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn resource_url(&self, name: &str) -> Result<Option<Url>> {
        let container = self.container()?;
        let full = format!("{}{}", self.prefix, name);
        if !container.contains(&full)? {
            return Ok(None);
        }
        Ok(Some(Url::parse(&format!("{}{}", self.resource_root, name))?))
    }

    fn nested_archive(&self, entry: &Entry) -> Result<Box<dyn Archive>> {
        let container = self.container()?;
        let name = format!("{}{}", self.prefix, entry.name);
        if entry.is_directory {
            self.directory_view(container, &name)
        } else {
            self.nested_container(container, &name)
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.container.take().is_some() {
            trace!("Closed {}", self.url);
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.container.is_none()
    }
}
