//! Check system capabilities.

use callmap_capture_engine::{get_capture_backend, get_window_backend, CaptureBackend};
use callmap_platform_core::WindowBackend;

pub fn run() -> anyhow::Result<()> {
    println!("CallMap System Check");
    println!("{}", "=".repeat(50));

    match get_window_backend() {
        Ok(backend) => {
            println!("[OK] Display server: {:?}", backend.display_server());
            match backend.list_windows() {
                Ok(windows) => println!("[OK] Visible windows: {}", windows.len()),
                Err(e) => println!("[FAIL] Window listing: {e}"),
            }
        }
        Err(e) => println!("[FAIL] Window backend: {e}"),
    }

    match get_capture_backend().detect_monitors() {
        Ok(monitors) => {
            println!("[OK] Monitors detected: {}", monitors.len());
            for m in &monitors {
                println!(
                    "     {} {}x{} at ({}, {}) (scale: {}x) {}",
                    m.name,
                    m.width,
                    m.height,
                    m.x,
                    m.y,
                    m.scale_factor,
                    if m.primary { "(primary)" } else { "" }
                );
            }
        }
        Err(e) => println!("[FAIL] Monitor detection: {e}"),
    }

    #[cfg(target_os = "linux")]
    {
        use callmap_platform_linux::permissions::{check_capabilities, print_capability_report};

        let capabilities = check_capabilities();
        println!();
        print_capability_report(&capabilities);

        let all_required_ok = capabilities
            .iter()
            .filter(|c| c.required)
            .all(|c| c.available);

        println!();
        if all_required_ok {
            println!("All required capabilities are available. CallMap is ready.");
        } else {
            println!("Some required capabilities are missing. See above for fixes.");
        }
    }

    Ok(())
}
