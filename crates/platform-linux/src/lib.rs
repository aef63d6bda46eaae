//! CallMap Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **Window control:** enumeration, activation, and geometry via `wmctrl`
//! - **Display Detection:** X11 / Wayland session detection
//! - **Permissions:** Capability detection and user guidance

pub mod display;
pub mod permissions;
pub mod wmctrl;

pub use display::*;
pub use wmctrl::WmctrlBackend;
