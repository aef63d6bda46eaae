//! On-disk layout of a CallMap data directory.
//!
//! ```text
//! <base>/
//!   cameras/
//!     0.jpg 1.jpg ...        tile crops, one per detected tile
//!     window.png mask.png    debug artifacts (debug mode only)
//!     detection.json
//! ```

use std::path::{Path, PathBuf};

use callmap_common::error::CallmapResult;

use crate::tile::TileId;

/// Debug artifact names written next to the tile crops.
pub const WINDOW_IMAGE: &str = "window.png";
pub const FULLSCREEN_IMAGE: &str = "fullscreen.png";
pub const MASK_IMAGE: &str = "mask.png";
pub const HIGHLIGHT_IMAGE: &str = "processed_image.png";
pub const EROSION_IMAGE: &str = "erosion.png";
pub const EDGES_IMAGE: &str = "edged.png";
pub const DETECTION_REPORT: &str = "detection.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraPaths {
    root: PathBuf,
    cameras: PathBuf,
}

impl CameraPaths {
    /// Resolve the layout under `base`, creating the directories.
    pub fn prepare(base: impl Into<PathBuf>) -> CallmapResult<Self> {
        let root = base.into();
        let cameras = root.join("cameras");
        std::fs::create_dir_all(&cameras)?;
        Ok(Self { root, cameras })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cameras_dir(&self) -> &Path {
        &self.cameras
    }

    /// Where the crop for `id` is stored.
    pub fn tile_path(&self, id: TileId) -> PathBuf {
        self.cameras.join(format!("{}.jpg", id.0))
    }

    /// Path of a named intermediate artifact.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.cameras.join(name)
    }

    /// Delete tile crops left over from an earlier pass.
    /// Returns how many files were removed.
    pub fn clear_tile_images(&self) -> CallmapResult<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.cameras)? {
            let path = entry?.path();
            if is_tile_image(&path) {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(removed, dir = %self.cameras.display(), "Cleared stale tile crops");
        }
        Ok(removed)
    }
}

/// `<digits>.jpg`
fn is_tile_image(path: &Path) -> bool {
    let is_jpg = path.extension().and_then(|e| e.to_str()) == Some("jpg");
    let numeric_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
    is_jpg && numeric_stem
}
