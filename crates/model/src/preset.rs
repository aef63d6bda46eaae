//! Participant presets.
//!
//! A preset names the people expected on a call so tiles can be bound to
//! them quickly. Presets live in a JSON file:
//!
//! ```json
//! {"Presets": [{"preset_name": "Standup", "people": ["Luna", "James"]}]}
//! ```

use std::path::{Path, PathBuf};

use callmap_common::error::{CallmapError, CallmapResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub preset_name: String,
    pub people: Vec<String>,
}

impl Preset {
    pub fn new(name: impl Into<String>, people: Vec<String>) -> Self {
        Self {
            preset_name: name.into(),
            people,
        }
    }

    fn validate(&self) -> CallmapResult<()> {
        if self.preset_name.trim().is_empty() {
            return Err(CallmapError::preset("Preset name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(rename = "Presets")]
    presets: Vec<Preset>,
}

/// A preset file loaded into memory. Edits stay in memory until [`save`].
///
/// [`save`]: PresetStore::save
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Load and validate a preset file.
    pub fn load(path: &Path) -> CallmapResult<Self> {
        if !path.exists() {
            return Err(CallmapError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let file: PresetFile = serde_json::from_str(&content)?;
        for preset in &file.presets {
            preset.validate()?;
        }
        tracing::debug!(path = %path.display(), count = file.presets.len(), "Loaded presets");
        Ok(Self {
            path: path.to_path_buf(),
            presets: file.presets,
        })
    }

    /// Create an empty preset file. Refuses to overwrite an existing one.
    pub fn create(path: &Path) -> CallmapResult<Self> {
        if path.exists() {
            return Err(CallmapError::preset(format!(
                "Preset file already exists: {}",
                path.display()
            )));
        }
        let store = Self {
            path: path.to_path_buf(),
            presets: Vec::new(),
        };
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets
            .iter()
            .map(|p| p.preset_name.as_str())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.preset_name == name)
    }

    /// People in the named preset.
    pub fn people(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|p| p.people.as_slice())
    }

    pub fn add(&mut self, preset: Preset) -> CallmapResult<()> {
        preset.validate()?;
        self.presets.push(preset);
        Ok(())
    }

    /// Replace the preset called `original_name`.
    pub fn edit(&mut self, original_name: &str, preset: Preset) -> CallmapResult<&Preset> {
        preset.validate()?;
        let slot = self
            .presets
            .iter_mut()
            .find(|p| p.preset_name == original_name)
            .ok_or_else(|| missing(original_name))?;
        *slot = preset;
        Ok(slot)
    }

    pub fn remove(&mut self, name: &str) -> CallmapResult<Preset> {
        let index = self
            .presets
            .iter()
            .position(|p| p.preset_name == name)
            .ok_or_else(|| missing(name))?;
        Ok(self.presets.remove(index))
    }

    /// Write the presets back to the file they came from.
    pub fn save(&self) -> CallmapResult<()> {
        let file = PresetFile {
            presets: self.presets.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn missing(name: &str) -> CallmapError {
    CallmapError::preset(format!("Provided preset does not exist: {name}"))
}
