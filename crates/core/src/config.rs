use nestjar_api::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CLASSPATH_INDEX: &str = "NESTJAR_CLASSPATH_INDEX";
pub const ENV_WARN_STALE_INDEX: &str = "NESTJAR_WARN_STALE_INDEX";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Archive-relative location of the classpath index. Overrides the
    /// manifest attribute and the layout default.
    pub classpath_index: Option<String>,
    /// Log index entries that are missing from the archive at `warn` instead
    /// of `debug`.
    pub warn_on_stale_index: bool,
}

impl LauncherConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| LoaderError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Defaults overlaid with the `NESTJAR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(location) = lookup(ENV_CLASSPATH_INDEX) {
            let location = location.trim();
            if !location.is_empty() {
                self.classpath_index = Some(location.to_string());
            }
        }
        if let Some(value) = lookup(ENV_WARN_STALE_INDEX) {
            self.warn_on_stale_index = parse_flag(ENV_WARN_STALE_INDEX, &value)?;
        }
        Ok(self)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LoaderError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            (ENV_CLASSPATH_INDEX, "META-INF/custom.idx"),
            (ENV_WARN_STALE_INDEX, "yes"),
        ]
        .into_iter()
        .collect();

        let config = LauncherConfig::default()
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.classpath_index.as_deref(), Some("META-INF/custom.idx"));
        assert!(config.warn_on_stale_index);
    }

    #[test]
    fn test_invalid_flag() {
        let err = LauncherConfig::default()
            .apply_env(|key| (key == ENV_WARN_STALE_INDEX).then(|| "maybe".to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), nestjar_api::ErrorKind::Config);
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nestjar.json");
        std::fs::write(&path, r#"{ "warn_on_stale_index": true }"#).unwrap();

        let config = LauncherConfig::from_json_file(&path).unwrap();
        assert!(config.warn_on_stale_index);
        assert_eq!(config.classpath_index, None);

        std::fs::write(&path, r#"{ "unknown": 1 }"#).unwrap();
        assert!(LauncherConfig::from_json_file(&path).is_err());
    }
}
