//! Archive implementations.
//!
//! - [`ExplodedArchive`]: an application unpacked onto a directory tree
//! - [`JarArchive`]: a zip container, possibly nested inside another one
//!
//! ```text
//! archive.war ──▶ JarArchive (jar:file:/…/archive.war!/)
//!   ├─ WEB-INF/classes/  ──▶ JarArchive view   (…!/WEB-INF/classes!/)
//!   └─ WEB-INF/lib/a.jar ──▶ JarArchive range  (…!/WEB-INF/lib/a.jar!/)
//! ```

pub mod exploded;
pub mod jar;
pub mod source;

pub use exploded::ExplodedArchive;
pub use jar::JarArchive;

use nestjar_api::{Archive, LoaderError, Result, Url};
use std::path::Path;

/// Open `path` as an exploded archive if it is a directory, otherwise as a
/// packaged one.
pub fn open_archive(path: impl AsRef<Path>) -> Result<Box<dyn Archive>> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(ExplodedArchive::new(path)?))
    } else {
        Ok(Box::new(JarArchive::open(path)?))
    }
}

pub(crate) fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path)
        .map_err(|_| LoaderError::corrupt(path.display().to_string(), "not an absolute path"))
}

pub(crate) fn directory_url(path: &Path) -> Result<Url> {
    Url::from_directory_path(path)
        .map_err(|_| LoaderError::corrupt(path.display().to_string(), "not an absolute path"))
}
