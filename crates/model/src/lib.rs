//! CallMap Data Model
//!
//! Defines the values that flow through a detection pass:
//! - **Geometry:** `ScreenRect` and its corner form for crop commands
//! - **Bitmap:** immutable RGB pixel grids handed from stage to stage
//! - **Tiles:** `CameraTile` artifacts and the ordered `CameraRegistry`
//! - **Layout:** the on-disk `cameras/` directory
//! - **Presets:** named participant lists stored as JSON

pub mod bitmap;
pub mod geometry;
pub mod layout;
pub mod preset;
pub mod registry;
pub mod tile;

pub use bitmap::Bitmap;
pub use geometry::{CornerRect, ScreenRect};
pub use layout::CameraPaths;
pub use preset::{Preset, PresetStore};
pub use registry::CameraRegistry;
pub use tile::{CameraTile, TileId};
