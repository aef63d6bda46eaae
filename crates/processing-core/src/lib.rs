//! CallMap Processing Core: the Tile Detector
//!
//! Finds participant video tiles in a call-window screenshot:
//! - **Separator mask:** near-black pixels between tiles, thresholded in HSV
//! - **Edges:** Sobel gradients thinned to one-pixel outlines of the mask
//! - **Selection:** contour bounding boxes filtered to the dominant tile area
//!
//! Everything except [`TileDetector`] is pure computation over images.

pub mod color;
pub mod detector;
pub mod edges;
pub mod tiles;

pub use detector::{Detection, DetectionReport, TileDetector};
pub use tiles::SelectionParams;
