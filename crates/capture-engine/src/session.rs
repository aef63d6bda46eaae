//! Detection pass orchestration.

use std::path::Path;
use std::time::{Duration, Instant};

use callmap_common::config::AppConfig;
use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::{Bitmap, CameraPaths, CameraRegistry, ScreenRect};
use callmap_platform_core::{DisplayServer, WindowBackend, WindowHandle, WindowLocator};
use callmap_processing_core::{Detection, TileDetector};

use crate::backend::{get_capture_backend, get_window_backend, CaptureBackend};
use crate::capturer::ScreenCapturer;

/// What a committed detection pass produced.
#[derive(Debug)]
pub struct DetectionOutcome {
    /// The window that was captured, `None` for screenshot files.
    pub window: Option<WindowHandle>,
    pub window_rect: Option<ScreenRect>,
    pub tile_count: usize,
    pub dominant_area: u64,
    /// Non-fatal problems, such as tile crops that could not be written.
    pub warnings: Vec<CallmapError>,
    pub elapsed: Duration,
}

/// Locate, capture, detect, commit.
///
/// Passes are synchronous and include the capture settle delay; callers
/// that need to stay responsive run them on a worker thread.
pub struct DetectionSession<W, C> {
    locator: WindowLocator<W>,
    capturer: ScreenCapturer<C>,
    detector: TileDetector,
}

impl DetectionSession<Box<dyn WindowBackend>, Box<dyn CaptureBackend>> {
    /// Session over the platform backends, configured from `config`.
    pub fn from_config(config: &AppConfig) -> CallmapResult<Self> {
        let paths = CameraPaths::prepare(&config.data_dir)?;
        let locator = WindowLocator::new(get_window_backend()?, config.capture.match_policy);
        let capturer = ScreenCapturer::new(
            get_capture_backend(),
            paths.clone(),
            Duration::from_millis(config.capture.settle_delay_ms),
            config.detection.debug,
        );
        let detector = TileDetector::new(config.detection.clone(), paths);
        Ok(Self::new(locator, capturer, detector))
    }
}

impl<W: WindowBackend, C: CaptureBackend> DetectionSession<W, C> {
    pub fn new(locator: WindowLocator<W>, capturer: ScreenCapturer<C>, detector: TileDetector) -> Self {
        Self {
            locator,
            capturer,
            detector,
        }
    }

    pub fn locator(&self) -> &WindowLocator<W> {
        &self.locator
    }

    pub fn detector(&self) -> &TileDetector {
        &self.detector
    }

    pub fn display_server(&self) -> DisplayServer {
        self.locator.backend().display_server()
    }

    /// Identity string of a window for the compositing application.
    pub fn capture_identity(&self, window: &WindowHandle) -> CallmapResult<String> {
        self.locator.backend().capture_identity(window)
    }

    /// Detect tiles in the window titled `title` and replace the registry
    /// contents with them. On any error the registry is left untouched.
    pub fn run(&self, title: &str, registry: &mut CameraRegistry) -> CallmapResult<DetectionOutcome> {
        let started = Instant::now();
        let window = self.locator.locate(title)?;
        let rect = self.locator.bounding_rect(&window)?;
        tracing::debug!(title = %window.title, %rect, "Window bounds resolved");

        let bitmap = self.capturer.capture(&rect)?;
        let detection = self.detector.detect(&bitmap)?;
        commit(detection, registry, Some(window), Some(rect), started)
    }

    /// Detect tiles in a saved screenshot instead of a live window.
    pub fn run_on_screenshot(
        &self,
        path: &Path,
        registry: &mut CameraRegistry,
    ) -> CallmapResult<DetectionOutcome> {
        let started = Instant::now();
        let bitmap = Bitmap::open(path)?;
        tracing::debug!(path = %path.display(), width = bitmap.width(), height = bitmap.height(), "Loaded screenshot");
        let detection = self.detector.detect(&bitmap)?;
        commit(detection, registry, None, None, started)
    }
}

fn commit(
    detection: Detection,
    registry: &mut CameraRegistry,
    window: Option<WindowHandle>,
    window_rect: Option<ScreenRect>,
    started: Instant,
) -> CallmapResult<DetectionOutcome> {
    let tile_count = detection.tiles.len();
    registry.replace(detection.tiles)?;

    let outcome = DetectionOutcome {
        window,
        window_rect,
        tile_count,
        dominant_area: detection.dominant_area,
        warnings: detection.warnings,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        tiles = outcome.tile_count,
        warnings = outcome.warnings.len(),
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "Detection pass committed"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::backend::FullScreen;
    use callmap_common::config::{DetectionConfig, MatchPolicy};
    use callmap_model::TileId;
    use callmap_platform_core::MonitorInfo;
    use image::{Rgb, RgbImage};

    const WINDOW: (i32, i32, u32, u32) = (200, 100, 1000, 600);

    struct FakeWindows;

    impl WindowBackend for FakeWindows {
        fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
            Ok(vec![
                WindowHandle {
                    id: 1,
                    title: "Terminal".to_string(),
                },
                WindowHandle {
                    id: 2,
                    title: "Zoom Meeting".to_string(),
                },
            ])
        }

        fn foreground(&self, _handle: &WindowHandle) -> CallmapResult<()> {
            Ok(())
        }

        fn bounding_rect(&self, _handle: &WindowHandle) -> CallmapResult<ScreenRect> {
            let (x, y, w, h) = WINDOW;
            Ok(ScreenRect::new(x, y, w, h).unwrap())
        }

        fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
            Ok(format!("{}\r\n{}\r\nzoom", handle.id, handle.title))
        }

        fn display_server(&self) -> DisplayServer {
            DisplayServer::X11
        }
    }

    /// Desktop showing either a four-way call layout at [`WINDOW`] or a
    /// blank window.
    struct FakeScreen {
        call_visible: bool,
    }

    impl CaptureBackend for FakeScreen {
        fn capture_full_screen(&self) -> CallmapResult<FullScreen> {
            let (wx, wy, ww, wh) = WINDOW;
            let (wx, wy) = (wx as u32, wy as u32);
            let call_visible = self.call_visible;
            let bitmap = RgbImage::from_fn(1920, 1080, |x, y| {
                let in_window = (wx..wx + ww).contains(&x) && (wy..wy + wh).contains(&y);
                if !in_window {
                    return Rgb([60, 90, 120]);
                }
                let (lx, ly) = (x - wx, y - wy);
                let divider = (480..520).contains(&lx) || (280..320).contains(&ly);
                if call_visible && divider {
                    Rgb([0, 0, 0])
                } else {
                    Rgb([250, 250, 250])
                }
            });
            Ok(FullScreen {
                bitmap: Bitmap::new(bitmap),
                origin_x: 0,
                origin_y: 0,
            })
        }

        fn detect_monitors(&self) -> CallmapResult<Vec<MonitorInfo>> {
            Ok(Vec::new())
        }
    }

    fn session(test: &str, call_visible: bool) -> (PathBuf, DetectionSession<FakeWindows, FakeScreen>) {
        let dir = std::env::temp_dir().join(format!("callmap_test_session_{test}"));
        let _ = std::fs::remove_dir_all(&dir);
        let paths = CameraPaths::prepare(&dir).unwrap();
        let session = DetectionSession::new(
            WindowLocator::new(FakeWindows, MatchPolicy::Exact),
            ScreenCapturer::new(FakeScreen { call_visible }, paths.clone(), Duration::ZERO, false),
            TileDetector::new(DetectionConfig::default(), paths),
        );
        (dir, session)
    }

    #[test]
    fn run_detects_tiles_in_located_window() {
        let (dir, session) = session("run", true);
        let mut registry = CameraRegistry::new();

        let outcome = session.run("Zoom Meeting", &mut registry).unwrap();
        assert_eq!(outcome.tile_count, 4);
        assert_eq!(outcome.window.as_ref().map(|w| w.id), Some(2));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.ids().collect::<Vec<_>>(), (0..4).map(TileId).collect::<Vec<_>>());

        // Tile rectangles are relative to the window, not the screen.
        assert!(registry.iter().all(|t| t.rect.right() <= 1000 && t.rect.bottom() <= 600));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn failing_pass_leaves_registry_unchanged() {
        let (dir, session) = session("atomic", true);
        let mut registry = CameraRegistry::new();
        session.run("Zoom Meeting", &mut registry).unwrap();
        registry.assign_name(TileId(0), "Luna").unwrap();
        let before: Vec<_> = registry.iter().cloned().collect();

        assert!(matches!(
            session.run("NoSuchWindow", &mut registry),
            Err(CallmapError::WindowNotFound { .. })
        ));

        let (blank_dir, blank) = self::session("atomic_blank", false);
        assert!(matches!(
            blank.run("Zoom Meeting", &mut registry),
            Err(CallmapError::NoTilesDetected)
        ));

        let after: Vec<_> = registry.iter().cloned().collect();
        assert_eq!(before, after);
        std::fs::remove_dir_all(&dir).ok();
        std::fs::remove_dir_all(&blank_dir).ok();
    }

    #[test]
    fn screenshot_files_skip_window_lookup() {
        let (dir, session) = session("screenshot", true);
        let shot = dir.join("call.png");
        let screen = FakeScreen { call_visible: true }.capture_full_screen().unwrap();
        let (x, y, w, h) = WINDOW;
        screen
            .bitmap
            .crop(&ScreenRect::new(x, y, w, h).unwrap())
            .unwrap()
            .save(&shot)
            .unwrap();

        let mut registry = CameraRegistry::new();
        let outcome = session.run_on_screenshot(&shot, &mut registry).unwrap();
        assert!(outcome.window.is_none());
        assert_eq!(registry.len(), 4);

        assert!(matches!(
            session.run_on_screenshot(&dir.join("missing.png"), &mut registry),
            Err(CallmapError::FileNotFound { .. })
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn identity_comes_from_window_backend() {
        let (dir, session) = session("identity", true);
        let window = session.locator().find("Zoom Meeting").unwrap();
        assert_eq!(
            session.capture_identity(&window).unwrap(),
            "2\r\nZoom Meeting\r\nzoom"
        );
        assert_eq!(session.display_server().os_name(), "Linux");
        std::fs::remove_dir_all(&dir).ok();
    }
}
