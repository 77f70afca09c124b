use nestjar_core::{Archive, Entry, Layout};
use serde::Serialize;
use tabled::Tabled;

/// One classpath position, as printed by `nestjar classpath`.
#[derive(Tabled, Serialize)]
pub struct ClasspathRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Entry")]
    pub entry: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl ClasspathRow {
    pub fn new(position: usize, layout: Layout, entry: &Entry, archive: &dyn Archive) -> Self {
        let kind = if layout.is_classes_dir(entry) {
            "classes"
        } else {
            "library"
        };
        Self {
            position,
            kind,
            name: entry.file_name().to_string(),
            entry: entry.name.clone(),
            url: archive.url().to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "Type")]
    pub kind: &'static str,
    #[tabled(rename = "Name")]
    pub name: String,
}

impl From<Entry> for EntryRow {
    fn from(entry: Entry) -> Self {
        Self {
            kind: if entry.is_directory { "dir" } else { "file" },
            name: entry.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestjar_core::ExplodedArchive;

    #[test]
    fn test_classpath_row_names() {
        let archive = ExplodedArchive::new(std::env::temp_dir()).unwrap();

        let row = ClasspathRow::new(0, Layout::War, &Entry::directory("WEB-INF/classes"), &archive);
        assert_eq!(row.kind, "classes");
        assert_eq!(row.name, "classes");
        assert_eq!(row.entry, "WEB-INF/classes/");

        let row = ClasspathRow::new(1, Layout::War, &Entry::file("WEB-INF/lib/foo.jar"), &archive);
        assert_eq!(row.kind, "library");
        assert_eq!(row.name, "foo.jar");
        assert_eq!(row.url, archive.url().to_string());
    }
}
