//! Capability detection and guidance for Linux.
//!
//! Window lookup shells out to `wmctrl`, which only sees windows managed by
//! an X server (native X11 or XWayland).

use std::process::Command;

use callmap_platform_core::DisplayServer;

use crate::display::detect_display_server;

/// A system capability that CallMap may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capabilities and report status.
pub fn check_capabilities() -> Vec<Capability> {
    let display = detect_display_server();
    vec![
        check_display_session(display),
        check_wmctrl(),
        check_native_windows(display),
    ]
}

fn check_display_session(display: DisplayServer) -> Capability {
    let available = display != DisplayServer::Unknown;

    Capability {
        name: "Graphical Session".to_string(),
        description: "X11 or Wayland session to capture from".to_string(),
        available,
        required: true,
        fix_instructions: (!available).then(|| {
            "Run from a graphical desktop session (DISPLAY or WAYLAND_DISPLAY must be set)"
                .to_string()
        }),
    }
}

fn check_wmctrl() -> Capability {
    let available = Command::new("wmctrl")
        .arg("-m")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    Capability {
        name: "wmctrl".to_string(),
        description: "Window enumeration, activation, and geometry".to_string(),
        available,
        required: true,
        fix_instructions: (!available)
            .then(|| "Install wmctrl: sudo apt install wmctrl".to_string()),
    }
}

fn check_native_windows(display: DisplayServer) -> Capability {
    let available = display != DisplayServer::Wayland;

    Capability {
        name: "Native Wayland Windows".to_string(),
        description: "Call windows visible to the X server".to_string(),
        available,
        required: false,
        fix_instructions: (!available).then(|| {
            "Native Wayland windows are not listed. Run the call client under XWayland \
             or log into an X11 session"
                .to_string()
        }),
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("CallMap System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_display_is_a_missing_requirement() {
        let cap = check_display_session(DisplayServer::Unknown);
        assert!(!cap.available);
        assert!(cap.required);
        assert!(cap.fix_instructions.is_some());

        assert!(check_display_session(DisplayServer::X11).available);
    }

    #[test]
    fn wayland_sessions_warn_about_native_windows() {
        let cap = check_native_windows(DisplayServer::Wayland);
        assert!(!cap.available);
        assert!(!cap.required);
        assert!(check_native_windows(DisplayServer::X11).fix_instructions.is_none());
    }
}
