//! Crop commands.

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::CameraRegistry;
use serde::{Deserialize, Serialize};

/// Command verb understood by the plugin.
pub const CROP_CAMERA: &str = "crop camera";

/// Where the plugin should crop from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTarget {
    /// Operating system name (`Linux`, `Windows`, `Darwin`), or the settings
    /// key of an exported scene source.
    pub os: String,
    /// Window identity string, or the matching settings value.
    pub exe: String,
    /// Existing source id, empty to create a new source.
    pub source_id: String,
}

impl CaptureTarget {
    /// A live window, identified by its capture identity.
    pub fn window(os: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            exe: identity.into(),
            source_id: String::new(),
        }
    }
}

/// One participant crop, corners in window pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraCrop {
    #[serde(rename = "camName")]
    pub cam_name: String,
    pub x: i32,
    pub x1: i32,
    pub y: i32,
    pub y1: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCommand {
    pub arg: String,
    pub os: String,
    pub exe: String,
    pub cameras: Vec<CameraCrop>,
    pub id: String,
}

impl CropCommand {
    /// Build a command from the named tiles in the registry.
    ///
    /// Rectangles are shifted down by `y_offset` to compensate for window
    /// decorations the capture source includes.
    ///
    /// Unnamed tiles are left out rather than sent with an empty `camName`:
    /// the plugin names its crop sources after the participant, so an
    /// unnamed crop would create an anonymous source. Errors when no tile
    /// is named.
    pub fn from_registry(
        registry: &CameraRegistry,
        target: CaptureTarget,
        y_offset: i32,
    ) -> CallmapResult<Self> {
        let cameras: Vec<CameraCrop> = registry
            .corner_rects()
            .into_iter()
            .filter(|(_, name, _)| !name.is_empty())
            .map(|(_, name, corners)| CameraCrop {
                cam_name: name,
                x: corners.x,
                x1: corners.x1,
                y: corners.y + y_offset,
                y1: corners.y1 + y_offset,
            })
            .collect();

        if cameras.is_empty() {
            return Err(CallmapError::relay(
                "No named camera tiles to send; bind participants first",
            ));
        }

        Ok(Self {
            arg: CROP_CAMERA.to_string(),
            os: target.os,
            exe: target.exe,
            cameras,
            id: target.source_id,
        })
    }

    pub fn to_json(&self) -> CallmapResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
