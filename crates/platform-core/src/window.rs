//! Window-manager capability interface.

use callmap_common::error::CallmapResult;
use callmap_model::ScreenRect;
use serde::{Deserialize, Serialize};

use crate::DisplayServer;

/// Characters of a title kept in the selection-list key.
pub const SHORT_KEY_LEN: usize = 28;

/// An on-screen window as reported by the window manager.
///
/// `id` is the OS identifier (X11 window id, `HWND`, CGWindowID) and only
/// meaningful to the backend that produced it. Handles are resolved per
/// detection request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle {
    pub id: u64,
    pub title: String,
}

/// One row of the window selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    /// Title truncated to [`SHORT_KEY_LEN`] characters.
    pub short_key: String,
    pub title: String,
}

/// Truncate a title to its selection-list key.
pub fn short_key(title: &str) -> String {
    title.chars().take(SHORT_KEY_LEN).collect()
}

/// Platform window operations needed by the detection pipeline.
pub trait WindowBackend: Send + Sync {
    /// Visible, titled windows that are actually rendered (minimized-to-tray
    /// or cloaked windows excluded), in window-manager order.
    fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>>;

    /// Raise the window so its content is in the frame buffer.
    fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()>;

    /// Window client area in screen coordinates.
    fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect>;

    /// Identity string the compositing application uses to find the window.
    fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String>;

    fn display_server(&self) -> DisplayServer;
}

impl<B: WindowBackend + ?Sized> WindowBackend for Box<B> {
    fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
        (**self).list_windows()
    }

    fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()> {
        (**self).foreground(handle)
    }

    fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect> {
        (**self).bounding_rect(handle)
    }

    fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
        (**self).capture_identity(handle)
    }

    fn display_server(&self) -> DisplayServer {
        (**self).display_server()
    }
}
