//! Window control through the `wmctrl` command-line tool.
//!
//! `wmctrl -l -G -x` prints one window per line:
//!
//! ```text
//! 0x03a00003  0 72   101  1848 952  zoom.zoom   host Zoom Meeting
//! ^id       desk x    y    w    h    wm_class   host title...
//! ```
//!
//! Only windows known to the X server are listed; native Wayland windows
//! are invisible to it.

use std::process::Command;

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::ScreenRect;
use callmap_platform_core::{DisplayServer, WindowBackend, WindowHandle};

use crate::display::detect_display_server;

/// One parsed `wmctrl -l -G -x` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmctrlWindow {
    pub id: u64,
    /// Virtual desktop index, `-1` for sticky windows.
    pub desktop: i64,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub wm_class: String,
    pub title: String,
}

impl WmctrlWindow {
    pub fn rect(&self) -> Option<ScreenRect> {
        ScreenRect::new(self.x, self.y, self.width, self.height)
    }

    /// `<decimal id>\r\n<title>\r\n<instance>`, the X window capture source
    /// identity, where instance is the first dotted part of `WM_CLASS`.
    pub fn capture_identity(&self) -> String {
        let instance = self.wm_class.split('.').next().unwrap_or_default();
        format!("{}\r\n{}\r\n{}", self.id, self.title, instance)
    }
}

/// Parse the full output of `wmctrl -l -G -x`, skipping malformed lines.
pub fn parse_window_list(output: &str) -> Vec<WmctrlWindow> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_window_line(line);
            if parsed.is_none() {
                tracing::debug!(line, "Skipping unparseable wmctrl line");
            }
            parsed
        })
        .collect()
}

fn parse_window_line(line: &str) -> Option<WmctrlWindow> {
    let (fields, title) = split_fields(line, 8)?;
    let id = u64::from_str_radix(fields[0].trim_start_matches("0x"), 16).ok()?;
    Some(WmctrlWindow {
        id,
        desktop: fields[1].parse().ok()?,
        x: fields[2].parse().ok()?,
        y: fields[3].parse().ok()?,
        width: fields[4].parse().ok()?,
        height: fields[5].parse().ok()?,
        wm_class: fields[6].to_string(),
        title: title.to_string(),
    })
}

/// Split off `count` whitespace-separated fields; the remainder (inner
/// spacing intact) is returned as the tail.
fn split_fields(line: &str, count: usize) -> Option<(Vec<&str>, &str)> {
    let mut rest = line.trim_start();
    let mut fields = Vec::with_capacity(count);
    for _ in 0..count {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((fields, rest.trim_end()))
}

/// [`WindowBackend`] driving `wmctrl`.
#[derive(Debug, Default)]
pub struct WmctrlBackend;

impl WmctrlBackend {
    pub fn new() -> Self {
        Self
    }

    /// Every listed window, titled or not.
    pub fn raw_windows(&self) -> CallmapResult<Vec<WmctrlWindow>> {
        let output = run_wmctrl(&["-l", "-G", "-x"])?;
        Ok(parse_window_list(&output))
    }

    fn window(&self, handle: &WindowHandle) -> CallmapResult<WmctrlWindow> {
        let windows = self.raw_windows()?;
        let available = windows.iter().map(|w| w.title.clone()).collect();
        windows
            .into_iter()
            .find(|w| w.id == handle.id)
            .ok_or_else(|| CallmapError::WindowNotFound {
                title: handle.title.clone(),
                available,
            })
    }
}

impl WindowBackend for WmctrlBackend {
    fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
        Ok(self
            .raw_windows()?
            .into_iter()
            .filter(|w| !w.title.is_empty())
            .map(|w| WindowHandle {
                id: w.id,
                title: w.title,
            })
            .collect())
    }

    fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()> {
        run_wmctrl(&["-i", "-a", &format!("0x{:08x}", handle.id)])?;
        Ok(())
    }

    fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect> {
        let window = self.window(handle)?;
        window.rect().ok_or_else(|| {
            CallmapError::platform(format!(
                "Window '{}' has zero size ({}x{})",
                window.title, window.width, window.height
            ))
        })
    }

    fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
        Ok(self.window(handle)?.capture_identity())
    }

    fn display_server(&self) -> DisplayServer {
        detect_display_server()
    }
}

fn run_wmctrl(args: &[&str]) -> CallmapResult<String> {
    let output = Command::new("wmctrl").args(args).output().map_err(|e| {
        CallmapError::platform(format!(
            "Failed to run wmctrl ({e}). Install it: sudo apt install wmctrl"
        ))
    })?;
    if !output.status.success() {
        return Err(CallmapError::platform(format!(
            "wmctrl {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
