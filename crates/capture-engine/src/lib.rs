//! CallMap Capture Engine
//!
//! Runs detection passes: find the call window, capture it, hand the
//! pixels to the tile detector, and commit the result to the registry.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 DetectionSession                  │
//! │  ┌──────────────┐ ┌──────────────┐ ┌───────────┐ │
//! │  │ Window       │ │ Screen       │ │ Tile      │ │
//! │  │ Locator      │→│ Capturer     │→│ Detector  │ │
//! │  └──────────────┘ └──────────────┘ └─────┬─────┘ │
//! │                                          ▼       │
//! │  ┌────────────────────┐ ┌──────────────────────┐ │
//! │  │  CameraRegistry    │ │  cameras/ (Disk)     │ │
//! │  │  (all-or-nothing)  │ │  0.jpg 1.jpg ...     │ │
//! │  └────────────────────┘ └──────────────────────┘ │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod capturer;
pub mod session;

pub use backend::{get_capture_backend, get_window_backend, CaptureBackend, FullScreen};
pub use capturer::ScreenCapturer;
pub use session::{DetectionOutcome, DetectionSession};
