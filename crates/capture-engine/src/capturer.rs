//! Screen capture cropped to a window.

use std::path::{Path, PathBuf};
use std::time::Duration;

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::layout::{CameraPaths, FULLSCREEN_IMAGE};
use callmap_model::{Bitmap, ScreenRect};

use crate::backend::{CaptureBackend, FullScreen};

/// File that lives for one detection pass. Removed on drop, on every exit
/// path, unless it is being kept for debugging.
#[derive(Debug)]
pub struct TransientArtifact {
    path: PathBuf,
    keep: bool,
}

impl TransientArtifact {
    pub fn new(path: PathBuf, keep: bool) -> Self {
        Self { path, keep }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientArtifact {
    fn drop(&mut self) {
        if self.keep || !self.path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove transient artifact");
        }
    }
}

/// Takes full-screen captures and crops them to window rectangles.
pub struct ScreenCapturer<C> {
    backend: C,
    paths: CameraPaths,
    settle_delay: Duration,
    debug: bool,
}

impl<C: CaptureBackend> ScreenCapturer<C> {
    pub fn new(backend: C, paths: CameraPaths, settle_delay: Duration, debug: bool) -> Self {
        Self {
            backend,
            paths,
            settle_delay,
            debug,
        }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Capture the whole virtual desktop.
    pub fn capture_full(&self) -> CallmapResult<FullScreen> {
        let screen = self.backend.capture_full_screen()?;
        if screen.bitmap.is_empty() {
            return Err(CallmapError::capture("Capture backend returned an empty image"));
        }
        Ok(screen)
    }

    /// Capture the pixels under `rect` (screen coordinates).
    ///
    /// Blocks for the settle delay first so a window that was just raised
    /// has finished redrawing.
    pub fn capture(&self, rect: &ScreenRect) -> CallmapResult<Bitmap> {
        if !self.settle_delay.is_zero() {
            tracing::debug!(delay_ms = self.settle_delay.as_millis() as u64, "Waiting for window to settle");
            std::thread::sleep(self.settle_delay);
        }

        let screen = self.capture_full()?;
        let artifact = TransientArtifact::new(self.paths.artifact_path(FULLSCREEN_IMAGE), self.debug);
        if let Err(e) = screen.bitmap.save(artifact.path()) {
            tracing::warn!(error = %e, "Could not write full-screen capture");
        }

        let local = rect.translate(-screen.origin_x, -screen.origin_y);
        let window = screen.bitmap.crop(&local).ok_or_else(|| {
            CallmapError::capture(format!(
                "Window {rect} lies outside the captured screen ({}x{})",
                screen.bitmap.width(),
                screen.bitmap.height()
            ))
        })?;

        tracing::info!(
            window = %rect,
            width = window.width(),
            height = window.height(),
            "Captured window"
        );
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use callmap_platform_core::MonitorInfo;
    use image::{Rgb, RgbImage};

    struct FakeScreen {
        screen: Mutex<Option<FullScreen>>,
    }

    impl FakeScreen {
        fn new(bitmap: Bitmap, origin_x: i32, origin_y: i32) -> Self {
            Self {
                screen: Mutex::new(Some(FullScreen {
                    bitmap,
                    origin_x,
                    origin_y,
                })),
            }
        }
    }

    impl CaptureBackend for FakeScreen {
        fn capture_full_screen(&self) -> CallmapResult<FullScreen> {
            self.screen
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| CallmapError::capture("no frame"))
        }

        fn detect_monitors(&self) -> CallmapResult<Vec<MonitorInfo>> {
            Ok(Vec::new())
        }
    }

    fn paths(test: &str) -> CameraPaths {
        let dir = std::env::temp_dir().join(format!("callmap_test_capturer_{test}"));
        let _ = std::fs::remove_dir_all(&dir);
        CameraPaths::prepare(dir).unwrap()
    }

    fn gradient(width: u32, height: u32) -> Bitmap {
        Bitmap::new(RgbImage::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, 7])
        }))
    }

    #[test]
    fn crop_accounts_for_desktop_origin() {
        let paths = paths("origin");
        let capturer = ScreenCapturer::new(
            FakeScreen::new(gradient(200, 100), -100, 0),
            paths.clone(),
            Duration::ZERO,
            false,
        );

        let window = capturer
            .capture(&ScreenRect::new(-90, 20, 30, 10).unwrap())
            .unwrap();
        assert_eq!((window.width(), window.height()), (30, 10));
        assert_eq!(window.as_image().get_pixel(0, 0), &Rgb([10, 20, 7]));

        assert!(!paths.artifact_path(FULLSCREEN_IMAGE).exists());
        std::fs::remove_dir_all(paths.root()).ok();
    }

    #[test]
    fn debug_mode_keeps_full_screen_capture() {
        let paths = paths("debug");
        let capturer = ScreenCapturer::new(
            FakeScreen::new(gradient(50, 50), 0, 0),
            paths.clone(),
            Duration::ZERO,
            true,
        );
        capturer
            .capture(&ScreenRect::new(0, 0, 10, 10).unwrap())
            .unwrap();
        assert!(paths.artifact_path(FULLSCREEN_IMAGE).exists());
        std::fs::remove_dir_all(paths.root()).ok();
    }

    #[test]
    fn offscreen_window_fails_and_cleans_up() {
        let paths = paths("offscreen");
        let capturer = ScreenCapturer::new(
            FakeScreen::new(gradient(50, 50), 0, 0),
            paths.clone(),
            Duration::ZERO,
            false,
        );
        let result = capturer.capture(&ScreenRect::new(500, 500, 10, 10).unwrap());
        assert!(matches!(result, Err(CallmapError::CaptureFailed { .. })));
        assert!(!paths.artifact_path(FULLSCREEN_IMAGE).exists());
        std::fs::remove_dir_all(paths.root()).ok();
    }

    #[test]
    fn empty_frames_are_capture_failures() {
        let paths = paths("empty");
        let capturer = ScreenCapturer::new(
            FakeScreen::new(Bitmap::new(RgbImage::new(0, 0)), 0, 0),
            paths.clone(),
            Duration::ZERO,
            false,
        );
        assert!(matches!(
            capturer.capture_full(),
            Err(CallmapError::CaptureFailed { .. })
        ));

        let failing = ScreenCapturer::new(
            FakeScreen {
                screen: Mutex::new(None),
            },
            paths.clone(),
            Duration::ZERO,
            false,
        );
        assert!(failing.capture_full().is_err());
        std::fs::remove_dir_all(paths.root()).ok();
    }

    #[test]
    fn transient_artifact_removed_on_drop() {
        let paths = paths("transient");
        let path = paths.artifact_path("scratch.png");
        std::fs::write(&path, b"x").unwrap();
        drop(TransientArtifact::new(path.clone(), false));
        assert!(!path.exists());

        std::fs::write(&path, b"x").unwrap();
        drop(TransientArtifact::new(path.clone(), true));
        assert!(path.exists());
        std::fs::remove_dir_all(paths.root()).ok();
    }
}
