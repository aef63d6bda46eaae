//! The tile detection pass.

use std::path::Path;

use callmap_common::config::DetectionConfig;
use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::layout::{
    CameraPaths, DETECTION_REPORT, EDGES_IMAGE, EROSION_IMAGE, HIGHLIGHT_IMAGE, MASK_IMAGE,
    WINDOW_IMAGE,
};
use callmap_model::{Bitmap, CameraTile, ScreenRect, TileId};
use chrono::{DateTime, Utc};
use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::color::{highlight_mask, separator_mask};
use crate::edges::{detect_edges, erode_mask};
use crate::tiles::{candidate_rects, dominant_area, select_tiles, SelectionParams};

/// Result of one successful detection pass.
#[derive(Debug)]
pub struct Detection {
    /// Accepted tiles, ids sequential from 0 in acceptance order.
    pub tiles: Vec<CameraTile>,
    /// Non-fatal problems, such as crops that could not be written.
    pub warnings: Vec<CallmapError>,
    pub dominant_area: u64,
    pub candidate_count: usize,
}

/// Summary written to `detection.json` in debug mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub timestamp: DateTime<Utc>,
    pub image_width: u32,
    pub image_height: u32,
    pub candidate_count: usize,
    pub dominant_area: u64,
    pub tiles: Vec<CameraTile>,
}

/// Finds camera tiles in window screenshots and stores their crops.
pub struct TileDetector {
    config: DetectionConfig,
    paths: CameraPaths,
}

impl TileDetector {
    pub fn new(config: DetectionConfig, paths: CameraPaths) -> Self {
        Self { config, paths }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn paths(&self) -> &CameraPaths {
        &self.paths
    }

    /// Run the full pass over a window screenshot.
    ///
    /// Fails with [`CallmapError::NoTilesDetected`] when nothing qualifies;
    /// stale crops from an earlier pass are only removed once tiles were
    /// found.
    pub fn detect(&self, bitmap: &Bitmap) -> CallmapResult<Detection> {
        if bitmap.is_empty() {
            return Err(CallmapError::capture("Window screenshot is empty"));
        }
        let mut warnings = Vec::new();
        let debug = self.config.debug;

        if debug {
            self.write_artifact(WINDOW_IMAGE, &mut warnings, |p| bitmap.save(p));
        }

        let mask = separator_mask(bitmap);
        let eroded = erode_mask(&mask, self.config.erosion_iterations);
        let edges = detect_edges(
            &eroded,
            self.config.edge_low_threshold,
            self.config.edge_high_threshold,
        );
        if debug {
            self.write_debug_images(bitmap, &mask, &eroded, &edges, &mut warnings);
        }

        let candidates = candidate_rects(&edges);
        let params = SelectionParams::new(&self.config, bitmap.width());
        let dominant = dominant_area(&candidates, &params);
        let accepted = select_tiles(&candidates, dominant, &params);
        tracing::info!(
            width = bitmap.width(),
            height = bitmap.height(),
            candidates = candidates.len(),
            dominant_area = dominant,
            accepted = accepted.len(),
            "Tile selection complete"
        );

        if accepted.is_empty() {
            return Err(CallmapError::NoTilesDetected);
        }

        if let Err(e) = self.paths.clear_tile_images() {
            tracing::warn!(error = %e, "Could not clear previous tile crops");
            warnings.push(CallmapError::persistence(
                self.paths.cameras_dir(),
                e.to_string(),
            ));
        }

        let tiles: Vec<CameraTile> = accepted
            .into_iter()
            .enumerate()
            .map(|(index, rect)| self.store_tile(bitmap, TileId(index as u32), rect, &mut warnings))
            .collect();

        if debug {
            let report = DetectionReport {
                timestamp: Utc::now(),
                image_width: bitmap.width(),
                image_height: bitmap.height(),
                candidate_count: candidates.len(),
                dominant_area: dominant,
                tiles: tiles.clone(),
            };
            self.write_artifact(DETECTION_REPORT, &mut warnings, |p| write_report(p, &report));
        }

        Ok(Detection {
            tiles,
            warnings,
            dominant_area: dominant,
            candidate_count: candidates.len(),
        })
    }

    fn store_tile(
        &self,
        bitmap: &Bitmap,
        id: TileId,
        rect: ScreenRect,
        warnings: &mut Vec<CallmapError>,
    ) -> CameraTile {
        let Some(crop) = rect
            .inset(self.config.tile_inset)
            .and_then(|inner| bitmap.crop(&inner))
        else {
            tracing::debug!(%id, %rect, "Tile too small to crop, registering without image");
            return CameraTile::new(id, rect, None);
        };

        let path = self.paths.tile_path(id);
        match crop.save(&path) {
            Ok(()) => {
                tracing::debug!(%id, %rect, path = %path.display(), "Stored tile crop");
                CameraTile::new(id, rect, Some(path))
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Failed to store tile crop");
                warnings.push(e);
                CameraTile::new(id, rect, None)
            }
        }
    }

    fn write_debug_images(
        &self,
        bitmap: &Bitmap,
        mask: &GrayImage,
        eroded: &GrayImage,
        edges: &GrayImage,
        warnings: &mut Vec<CallmapError>,
    ) {
        self.write_artifact(MASK_IMAGE, warnings, |p| save_gray(mask, p));
        self.write_artifact(HIGHLIGHT_IMAGE, warnings, |p| {
            Bitmap::new(highlight_mask(bitmap, mask)).save(p)
        });
        self.write_artifact(EROSION_IMAGE, warnings, |p| save_gray(eroded, p));
        self.write_artifact(EDGES_IMAGE, warnings, |p| save_gray(edges, p));
    }

    fn write_artifact<F>(&self, name: &str, warnings: &mut Vec<CallmapError>, write: F)
    where
        F: FnOnce(&Path) -> CallmapResult<()>,
    {
        let path = self.paths.artifact_path(name);
        if let Err(e) = write(&path) {
            tracing::warn!(artifact = name, error = %e, "Failed to write debug artifact");
            warnings.push(e);
        }
    }
}

fn save_gray(image: &GrayImage, path: &Path) -> CallmapResult<()> {
    image
        .save(path)
        .map_err(|e| CallmapError::persistence(path, e.to_string()))
}

fn write_report(path: &Path, report: &DetectionReport) -> CallmapResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| CallmapError::persistence(path, e.to_string()))
}
