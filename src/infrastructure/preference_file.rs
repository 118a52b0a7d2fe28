// TOML file holding the persisted unit preference
use crate::application::preferences::PreferenceStore;
use crate::domain::units::UnitSystem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceDocument {
    #[serde(rename = "weatherUnits")]
    weather_units: UnitSystem,
}

#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<UnitSystem>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let document: PreferenceDocument = toml::from_str(&contents)
            .with_context(|| format!("Invalid preference file {}", self.path.display()))?;
        Ok(Some(document.weather_units))
    }

    fn save(&self, system: UnitSystem) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = toml::to_string(&PreferenceDocument {
            weather_units: system,
        })?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!("Saved unit preference {} to {}", system.as_str(), self.path.display());
        Ok(())
    }
}
