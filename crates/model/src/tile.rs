//! Detected camera tiles.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::ScreenRect;

/// Sequence index of a tile within one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant's video tile inside the captured window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraTile {
    pub id: TileId,

    /// Bounding rectangle in window pixel coordinates, border included.
    pub rect: ScreenRect,

    /// Stored crop, or `None` when the crop was degenerate or could not
    /// be written.
    pub image_path: Option<PathBuf>,

    name: String,
}

impl CameraTile {
    /// A freshly detected tile with no participant bound to it.
    pub fn new(id: TileId, rect: ScreenRect, image_path: Option<PathBuf>) -> Self {
        Self {
            id,
            rect,
            image_path,
            name: String::new(),
        }
    }

    /// Participant name, empty until bound.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bound(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn has_artifact(&self) -> bool {
        self.image_path.is_some()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
