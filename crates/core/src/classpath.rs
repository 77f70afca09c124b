use nestjar_api::{Archive, Result, Url};
use tracing::{debug, trace};

/// Class-loading context built from resolved classpath archives.
///
/// Resources are searched in archive order, so the first archive that
/// contains a name shadows every later one.
pub struct ClassPath {
    archives: Vec<Box<dyn Archive>>,
    urls: Vec<Url>,
}

impl ClassPath {
    pub fn new(archives: Vec<Box<dyn Archive>>) -> Self {
        let urls: Vec<Url> = archives.iter().map(|a| a.url().clone()).collect();
        for (position, url) in urls.iter().enumerate() {
            trace!("classpath[{}] = {}", position, url);
        }
        debug!("Created class path with {} entries", urls.len());
        Self { archives, urls }
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn archives(&self) -> &[Box<dyn Archive>] {
        &self.archives
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// First match for `name` in search order.
    pub fn find_resource(&self, name: &str) -> Result<Option<Url>> {
        for archive in &self.archives {
            if let Some(url) = archive.resource_url(name)? {
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    /// Every match for `name`, in search order.
    pub fn resources(&self, name: &str) -> Result<Vec<Url>> {
        let mut found = Vec::new();
        for archive in &self.archives {
            if let Some(url) = archive.resource_url(name)? {
                found.push(url);
            }
        }
        Ok(found)
    }

    /// Close every archive. All archives are closed even if one fails; the
    /// first error is returned.
    pub fn close(&mut self) -> Result<()> {
        let mut first_error = None;
        for archive in &mut self.archives {
            if let Err(e) = archive.close() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ClassPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.urls.iter().map(Url::as_str))
            .finish()
    }
}
