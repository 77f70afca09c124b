//! Main section of `META-INF/MANIFEST.MF`.

use nestjar_api::{Archive, LoaderError, Result};
use std::collections::HashMap;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const START_CLASS: &str = "Start-Class";
pub const MAIN_CLASS: &str = "Main-Class";
pub const CLASSPATH_INDEX: &str = "Spring-Boot-Classpath-Index";

#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Keyed by lower-cased attribute name
    attributes: HashMap<String, String>,
}

impl Manifest {
    /// Parse the main section. Lines starting with a single space continue
    /// the previous value.
    pub fn parse(content: &str) -> Result<Self> {
        let mut attributes = HashMap::new();
        let mut current: Option<(String, String)> = None;

        for (number, line) in content.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                // End of the main section
                break;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                match current.as_mut() {
                    Some((_, value)) => value.push_str(rest),
                    None => {
                        return Err(LoaderError::Manifest(format!(
                            "continuation without attribute on line {}",
                            number + 1
                        )));
                    }
                }
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(LoaderError::Manifest(format!(
                    "invalid header on line {}: {}",
                    number + 1,
                    line
                )));
            };
            if let Some((key, value)) = current.take() {
                attributes.insert(key, value);
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            current = Some((key.trim().to_ascii_lowercase(), value.to_string()));
        }
        if let Some((key, value)) = current {
            attributes.insert(key, value);
        }

        Ok(Self { attributes })
    }

    pub fn read(archive: &dyn Archive) -> Result<Option<Self>> {
        match archive.read_entry(MANIFEST_PATH)? {
            Some(bytes) => Ok(Some(Self::parse(&String::from_utf8_lossy(&bytes))?)),
            None => Ok(None),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
