use std::process::Command;

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::ScreenRect;
use callmap_platform_core::{DisplayServer, WindowBackend, WindowHandle};
use xcap::Window;

/// [`WindowBackend`] over the CoreGraphics window list.
#[derive(Debug, Default)]
pub struct QuartzBackend;

impl QuartzBackend {
    pub fn new() -> Self {
        Self
    }

    fn window(&self, handle: &WindowHandle) -> CallmapResult<Window> {
        let windows = all_windows()?;
        let available = windows.iter().map(|w| w.title().to_string()).collect();
        windows
            .into_iter()
            .find(|w| u64::from(w.id()) == handle.id)
            .ok_or_else(|| CallmapError::WindowNotFound {
                title: handle.title.clone(),
                available,
            })
    }
}

fn all_windows() -> CallmapResult<Vec<Window>> {
    Window::all().map_err(|e| CallmapError::platform(format!("Failed to enumerate windows: {e}")))
}

impl WindowBackend for QuartzBackend {
    fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
        Ok(all_windows()?
            .into_iter()
            .filter(|w| !w.title().is_empty() && !w.is_minimized())
            .map(|w| WindowHandle {
                id: u64::from(w.id()),
                title: w.title().to_string(),
            })
            .collect())
    }

    fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()> {
        let window = self.window(handle)?;
        let status = Command::new("osascript")
            .arg("-e")
            .arg(crate::activate_script(window.app_name()))
            .status()
            .map_err(|e| CallmapError::platform(format!("Failed to run osascript: {e}")))?;
        if !status.success() {
            return Err(CallmapError::platform(format!(
                "Could not activate '{}'",
                window.app_name()
            )));
        }
        Ok(())
    }

    fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect> {
        let window = self.window(handle)?;
        ScreenRect::new(window.x(), window.y(), window.width(), window.height()).ok_or_else(|| {
            CallmapError::platform(format!("Window '{}' has zero size", handle.title))
        })
    }

    fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
        let window = self.window(handle)?;
        Ok(crate::capture_identity(window.app_name(), window.title()))
    }

    fn display_server(&self) -> DisplayServer {
        DisplayServer::MacOS
    }
}
