// User settings
// Loaded from <config dir>/simple-plot/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decimal places for slope / intercept display.
    pub decimals: usize,

    /// Directory the file dialogs start in.
    pub last_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decimals: 3,
            last_dir: None,
        }
    }
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("simple-plot").join("settings.json"))
    }

    /// Load from the default location; any problem yields the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings file: {e:#}");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Write to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("no config directory on this platform")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Remember the directory of a file the user just opened or saved.
    pub fn remember_file(&mut self, file: &Path) {
        self.last_dir = file.parent().map(Path::to_path_buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        let s: Settings = serde_json::from_str(r#"{"decimals": 5}"#).unwrap();
        assert_eq!(s.decimals, 5);
        assert_eq!(s.last_dir, None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("simple-plot-settings-{}", std::process::id()));
        let path = dir.join("settings.json");

        let mut s = Settings::default();
        s.decimals = 4;
        s.remember_file(Path::new("/data/run1/points.csv"));
        s.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded, s);
        assert_eq!(loaded.last_dir, Some(PathBuf::from("/data/run1")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("simple-plot-bad-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let result = Settings::load_from(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
