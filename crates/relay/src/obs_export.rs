//! OBS scene-collection exports.
//!
//! When tiles come from a screenshot there is no live window to identify,
//! so the capture target is taken from the source the plugin created for
//! the preset earlier, named `OBSMapper-<preset>`.

use std::path::Path;

use callmap_common::error::{CallmapError, CallmapResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::CaptureTarget;

/// Prefix of the sources the plugin creates per preset.
pub const SOURCE_PREFIX: &str = "OBSMapper-";

pub fn preset_source_name(preset: &str) -> String {
    format!("{SOURCE_PREFIX}{preset}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsSource {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl ObsSource {
    /// The first settings entry as `(os, exe)` plus the source id.
    pub fn capture_target(&self) -> CallmapResult<CaptureTarget> {
        let (key, value) = self.settings.iter().next().ok_or_else(|| {
            CallmapError::relay(format!("Source '{}' has no settings", self.name))
        })?;
        let exe = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Ok(CaptureTarget {
            os: key.clone(),
            exe,
            source_id: self.id.clone(),
        })
    }
}

/// A scene collection exported from OBS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObsSceneExport {
    #[serde(default)]
    pub sources: Vec<ObsSource>,
}

impl ObsSceneExport {
    pub fn load(path: &Path) -> CallmapResult<Self> {
        if !path.exists() {
            return Err(CallmapError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let export: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), sources = export.sources.len(), "Loaded OBS scene export");
        Ok(export)
    }

    pub fn find_source(&self, name: &str) -> Option<&ObsSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Capture target of the source created for `preset`.
    pub fn target_for_preset(&self, preset: &str) -> CallmapResult<CaptureTarget> {
        let name = preset_source_name(preset);
        self.find_source(&name)
            .ok_or_else(|| CallmapError::relay(format!("No source named '{name}' in scene export")))?
            .capture_target()
    }
}
