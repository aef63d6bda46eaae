//! CallMap Windows platform integration.
//!
//! Window enumeration goes through Win32 directly. Windows on another
//! virtual desktop stay "visible" to `IsWindowVisible` but are cloaked by
//! DWM, so the cloaked attribute is checked as well.

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::Win32Backend;

/// Window capture identity in the `title:class:executable` form used by
/// Windows window-capture sources. Colons inside fields are escaped as `#3A`.
pub fn capture_identity(title: &str, class: &str, exe_path: &str) -> String {
    format!(
        "{}:{}:{}",
        escape_field(title),
        escape_field(class),
        escape_field(exe_name(exe_path))
    )
}

/// File name of a full executable path.
pub fn exe_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

fn escape_field(field: &str) -> String {
    field.replace('#', "#22").replace(':', "#3A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exe_name_strips_directories() {
        assert_eq!(
            exe_name(r"C:\Users\ada\AppData\Roaming\Zoom\bin\Zoom.exe"),
            "Zoom.exe"
        );
        assert_eq!(exe_name("Discord.exe"), "Discord.exe");
    }

    #[test]
    fn identity_escapes_separators() {
        assert_eq!(
            capture_identity("Zoom Meeting", "ZPContentViewWndClass", r"C:\Zoom\bin\Zoom.exe"),
            "Zoom Meeting:ZPContentViewWndClass:Zoom.exe"
        );
        assert_eq!(
            capture_identity("Call: #general", "Chrome_WidgetWin_1", "Discord.exe"),
            "Call#3A #22general:Chrome_WidgetWin_1:Discord.exe"
        );
    }
}
