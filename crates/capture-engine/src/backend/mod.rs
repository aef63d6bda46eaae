use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::Bitmap;
use callmap_platform_core::{MonitorInfo, WindowBackend};

pub mod desktop;

pub use desktop::DesktopBackend;

/// A capture of the whole virtual desktop.
#[derive(Debug, Clone)]
pub struct FullScreen {
    pub bitmap: Bitmap,
    /// Screen coordinates of the bitmap's top-left pixel. Negative when a
    /// monitor sits left of or above the primary one.
    pub origin_x: i32,
    pub origin_y: i32,
}

/// Abstract interface for platform-specific screen capture.
pub trait CaptureBackend: Send + Sync {
    /// Grab every connected monitor as one bitmap.
    fn capture_full_screen(&self) -> CallmapResult<FullScreen>;

    /// Detect available monitors.
    fn detect_monitors(&self) -> CallmapResult<Vec<MonitorInfo>>;
}

impl<B: CaptureBackend + ?Sized> CaptureBackend for Box<B> {
    fn capture_full_screen(&self) -> CallmapResult<FullScreen> {
        (**self).capture_full_screen()
    }

    fn detect_monitors(&self) -> CallmapResult<Vec<MonitorInfo>> {
        (**self).detect_monitors()
    }
}

/// Get the screen capture backend.
pub fn get_capture_backend() -> Box<dyn CaptureBackend> {
    Box::new(DesktopBackend::new())
}

/// Get the platform-specific window backend.
pub fn get_window_backend() -> CallmapResult<Box<dyn WindowBackend>> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(callmap_platform_linux::WmctrlBackend::new()))
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(callmap_platform_windows::Win32Backend::new()))
    }
    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(callmap_platform_macos::QuartzBackend::new()))
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Err(CallmapError::unsupported(format!(
            "No window backend for {}",
            std::env::consts::OS
        )))
    }
}

pub(crate) fn capture_error(what: &str, err: impl std::fmt::Display) -> CallmapError {
    CallmapError::capture(format!("{what}: {err}"))
}
