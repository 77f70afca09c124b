//! Precomputed classpath index.
//!
//! The index is a line-oriented file stored inside the archive, one
//! archive-relative library path per line:
//!
//! ```text
//! - "WEB-INF/lib/foo.jar"
//! - "WEB-INF/lib/bar.jar"
//! ```
//!
//! Bare paths without the list-item decoration are accepted as well.

use indexmap::IndexSet;
use nestjar_api::{Archive, Result};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClasspathIndex {
    location: String,
    lines: IndexSet<String>,
}

impl ClasspathIndex {
    pub fn parse(location: impl Into<String>, content: &str) -> Self {
        let lines = content
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                let line = line.strip_prefix("- ").unwrap_or(line).trim();
                let line = line
                    .strip_prefix('"')
                    .and_then(|l| l.strip_suffix('"'))
                    .unwrap_or(line);
                (!line.is_empty()).then(|| line.to_string())
            })
            .collect();
        Self {
            location: location.into(),
            lines,
        }
    }

    /// Load the index stored at `location` in `archive`. `Ok(None)` when the
    /// archive carries no index.
    pub fn load(archive: &dyn Archive, location: &str) -> Result<Option<Self>> {
        let Some(bytes) = archive.read_entry(location)? else {
            debug!("No classpath index at {} in {}", location, archive.url());
            return Ok(None);
        };
        let content = String::from_utf8_lossy(&bytes);
        let index = Self::parse(location, &content);
        debug!(
            "Loaded classpath index {} with {} entries",
            location,
            index.len()
        );
        Ok(Some(index))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.contains(name)
    }

    /// Declared paths, in index order. Duplicate lines appear once.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
