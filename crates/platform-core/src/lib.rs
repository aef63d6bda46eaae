//! CallMap platform core contracts.
//!
//! This crate contains the window-manager capability interface and the
//! display geometry shared by capture crates, without coupling to a concrete
//! OS backend. Detection code depends only on [`WindowBackend`].

pub mod locator;
pub mod window;

pub use locator::WindowLocator;
pub use window::{short_key, WindowBackend, WindowEntry, WindowHandle, SHORT_KEY_LEN};

use serde::{Deserialize, Serialize};

/// Information about a connected monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorInfo {
    /// Monitor name/identifier.
    pub name: String,
    /// Resolution in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Position in the virtual desktop (pixels).
    pub x: i32,
    pub y: i32,
    /// Scale factor (for example 1.0, 1.25, 2.0).
    pub scale_factor: f64,
    /// Whether this monitor is primary.
    pub primary: bool,
}

/// Display server / platform family the windows live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    Windows,
    MacOS,
    #[default]
    Unknown,
}

impl DisplayServer {
    /// Operating system name as reported to the compositing application.
    pub fn os_name(&self) -> &'static str {
        match self {
            DisplayServer::Wayland | DisplayServer::X11 => "Linux",
            DisplayServer::Windows => "Windows",
            DisplayServer::MacOS => "Darwin",
            DisplayServer::Unknown => std::env::consts::OS,
        }
    }
}

/// Compute virtual desktop bounds that include all connected monitors.
/// Returns `(min_x, min_y, width, height)` in physical pixels.
pub fn virtual_desktop_bounds(monitors: &[MonitorInfo]) -> (i32, i32, u32, u32) {
    if monitors.is_empty() {
        return (0, 0, 1920, 1080);
    }

    let min_x = monitors.iter().map(|m| m.x).min().unwrap_or(0);
    let min_y = monitors.iter().map(|m| m.y).min().unwrap_or(0);
    let max_x = monitors
        .iter()
        .map(|m| m.x + m.width as i32)
        .max()
        .unwrap_or(1920);
    let max_y = monitors
        .iter()
        .map(|m| m.y + m.height as i32)
        .max()
        .unwrap_or(1080);

    let width = (max_x - min_x).max(1) as u32;
    let height = (max_y - min_y).max(1) as u32;
    (min_x, min_y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: &str, x: i32, y: i32, width: u32, height: u32) -> MonitorInfo {
        MonitorInfo {
            name: name.to_string(),
            width,
            height,
            x,
            y,
            scale_factor: 1.0,
            primary: x == 0 && y == 0,
        }
    }

    #[test]
    fn virtual_bounds_cover_negative_origin_layout() {
        let monitors = vec![
            monitor("left", -1920, 0, 1920, 1080),
            monitor("main", 0, 0, 2560, 1440),
        ];

        let (x, y, w, h) = virtual_desktop_bounds(&monitors);
        assert_eq!(x, -1920);
        assert_eq!(y, 0);
        assert_eq!(w, 4480);
        assert_eq!(h, 1440);
    }

    #[test]
    fn os_names_follow_platform_family() {
        assert_eq!(DisplayServer::X11.os_name(), "Linux");
        assert_eq!(DisplayServer::Wayland.os_name(), "Linux");
        assert_eq!(DisplayServer::Windows.os_name(), "Windows");
    }
}
