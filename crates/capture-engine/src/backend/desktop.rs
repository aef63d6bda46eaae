//! Monitor capture through `xcap`.

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::Bitmap;
use callmap_platform_core::{virtual_desktop_bounds, MonitorInfo};
use image::{imageops, RgbaImage};
use xcap::Monitor;

use super::{capture_error, CaptureBackend, FullScreen};

/// Captures every monitor and stitches them onto one virtual-desktop canvas.
#[derive(Debug, Default)]
pub struct DesktopBackend;

impl DesktopBackend {
    pub fn new() -> Self {
        Self
    }
}

fn monitor_info(monitor: &Monitor) -> MonitorInfo {
    MonitorInfo {
        name: monitor.name().to_string(),
        width: monitor.width(),
        height: monitor.height(),
        x: monitor.x(),
        y: monitor.y(),
        scale_factor: f64::from(monitor.scale_factor()),
        primary: monitor.is_primary(),
    }
}

/// Paste per-monitor frames at their offsets from the desktop origin.
pub fn stitch(frames: &[(MonitorInfo, RgbaImage)]) -> FullScreen {
    let infos: Vec<MonitorInfo> = frames.iter().map(|(info, _)| info.clone()).collect();
    let (min_x, min_y, width, height) = virtual_desktop_bounds(&infos);

    let mut canvas = RgbaImage::new(width, height);
    for (info, frame) in frames {
        imageops::replace(
            &mut canvas,
            frame,
            i64::from(info.x - min_x),
            i64::from(info.y - min_y),
        );
    }

    FullScreen {
        bitmap: Bitmap::from_rgba(canvas),
        origin_x: min_x,
        origin_y: min_y,
    }
}

impl CaptureBackend for DesktopBackend {
    fn capture_full_screen(&self) -> CallmapResult<FullScreen> {
        let monitors = Monitor::all().map_err(|e| capture_error("Failed to list monitors", e))?;
        if monitors.is_empty() {
            return Err(CallmapError::capture("No monitor found"));
        }

        let mut frames = Vec::with_capacity(monitors.len());
        for monitor in &monitors {
            let frame = monitor
                .capture_image()
                .map_err(|e| capture_error(&format!("Failed to capture {}", monitor.name()), e))?;
            tracing::debug!(
                monitor = monitor.name(),
                width = frame.width(),
                height = frame.height(),
                "Captured monitor"
            );
            frames.push((monitor_info(monitor), frame));
        }

        Ok(stitch(&frames))
    }

    fn detect_monitors(&self) -> CallmapResult<Vec<MonitorInfo>> {
        let monitors =
            Monitor::all().map_err(|e| CallmapError::platform(format!("Monitor query failed: {e}")))?;
        Ok(monitors.iter().map(monitor_info).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn frame(info: (i32, i32, u32, u32), color: [u8; 4]) -> (MonitorInfo, RgbaImage) {
        let (x, y, width, height) = info;
        (
            MonitorInfo {
                name: format!("{x},{y}"),
                width,
                height,
                x,
                y,
                scale_factor: 1.0,
                primary: x == 0 && y == 0,
            },
            RgbaImage::from_pixel(width, height, Rgba(color)),
        )
    }

    #[test]
    fn stitches_monitors_left_of_primary() {
        let screen = stitch(&[
            frame((0, 0, 40, 30), [255, 0, 0, 255]),
            frame((-20, 10, 20, 20), [0, 0, 255, 255]),
        ]);

        assert_eq!((screen.origin_x, screen.origin_y), (-20, 0));
        assert_eq!((screen.bitmap.width(), screen.bitmap.height()), (60, 30));

        let pixels = screen.bitmap.as_image();
        assert_eq!(pixels.get_pixel(25, 5), &Rgb([255, 0, 0]));
        assert_eq!(pixels.get_pixel(5, 15), &Rgb([0, 0, 255]));
        // Uncovered desktop area stays black.
        assert_eq!(pixels.get_pixel(5, 2), &Rgb([0, 0, 0]));
    }
}
