pub mod archive;
pub mod classpath;
pub mod config;
pub mod launcher;
pub mod logging;

pub use archive::{ExplodedArchive, JarArchive, open_archive};
pub use classpath::ClassPath;
pub use config::LauncherConfig;
pub use launcher::{ClasspathArchives, ClasspathIndex, Launcher, Layout, Manifest};
pub use nestjar_api::{Archive, Entry, ErrorKind, LoaderError, Result, Url};

use std::path::Path;

/// Open the archive at `path` and build a launcher for `layout`, or for the
/// detected layout when none is given.
pub fn launcher_for_path(
    path: impl AsRef<Path>,
    layout: Option<Layout>,
    config: LauncherConfig,
) -> Result<Launcher> {
    let archive = open_archive(path)?;
    match layout {
        Some(layout) => Launcher::with_config(archive, layout, config),
        None => Launcher::detect(archive, config),
    }
}
