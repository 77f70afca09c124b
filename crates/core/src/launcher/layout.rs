use nestjar_api::{Archive, Entry, Result};
use serde::{Deserialize, Serialize};

/// Packaging layout of an executable archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `BOOT-INF/classes/` + `BOOT-INF/lib/`
    Jar,
    /// `WEB-INF/classes/` + `WEB-INF/lib/` and `WEB-INF/lib-provided/`
    War,
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Jar => "jar",
            Layout::War => "war",
        }
    }

    /// Only entries below this prefix can end up on the classpath.
    pub fn search_root(&self) -> &'static str {
        match self {
            Layout::Jar => "BOOT-INF/",
            Layout::War => "WEB-INF/",
        }
    }

    pub fn classes_dir(&self) -> &'static str {
        match self {
            Layout::Jar => "BOOT-INF/classes/",
            Layout::War => "WEB-INF/classes/",
        }
    }

    pub fn lib_dirs(&self) -> &'static [&'static str] {
        match self {
            Layout::Jar => &["BOOT-INF/lib/"],
            Layout::War => &["WEB-INF/lib/", "WEB-INF/lib-provided/"],
        }
    }

    pub fn default_classpath_index(&self) -> &'static str {
        match self {
            Layout::Jar => "BOOT-INF/classpath.idx",
            Layout::War => "WEB-INF/classpath.idx",
        }
    }

    pub fn is_classes_dir(&self, entry: &Entry) -> bool {
        entry.is_directory && entry.name == self.classes_dir()
    }

    pub fn is_library(&self, entry: &Entry) -> bool {
        !entry.is_directory
            && self
                .lib_dirs()
                .iter()
                .any(|dir| entry.name.len() > dir.len() && entry.starts_with(dir))
    }

    /// Pick the layout from the archive content: anything under `WEB-INF/`
    /// makes it a war.
    pub fn detect(archive: &dyn Archive) -> Result<Layout> {
        let mut entries = archive.entries_under(Layout::War.search_root())?;
        match entries.next() {
            Some(Err(e)) => Err(e),
            Some(Ok(_)) => Ok(Layout::War),
            None => Ok(Layout::Jar),
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jar" => Ok(Layout::Jar),
            "war" => Ok(Layout::War),
            other => Err(format!("unknown layout '{}', expected jar or war", other)),
        }
    }
}
