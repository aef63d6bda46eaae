//! CallMap macOS platform integration.
//!
//! Windows are listed through `xcap` (CoreGraphics window list). Raising a
//! window goes through its owning application with AppleScript, since
//! CGWindowIDs cannot be activated directly.

#[cfg(target_os = "macos")]
mod quartz;

#[cfg(target_os = "macos")]
pub use quartz::QuartzBackend;

/// AppleScript that brings an application's windows to the front.
pub fn activate_script(app_name: &str) -> String {
    let escaped = app_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("tell application \"{escaped}\" to activate")
}

/// Identity used by macOS window-capture sources: `owner name` and
/// `window title` separated by a newline.
pub fn capture_identity(app_name: &str, title: &str) -> String {
    format!("{app_name}\n{title}")
}
