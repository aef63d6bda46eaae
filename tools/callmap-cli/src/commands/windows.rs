//! List windows that can be mapped.

use callmap_capture_engine::get_window_backend;
use callmap_common::config::AppConfig;
use callmap_platform_core::WindowLocator;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let locator = WindowLocator::new(get_window_backend()?, config.capture.match_policy);
    let entries = locator.enumerate()?;

    println!("Visible windows ({}):", entries.len());
    for entry in &entries {
        if entry.short_key == entry.title {
            println!("  {}", entry.title);
        } else {
            println!("  {:<28}  {}", entry.short_key, entry.title);
        }
    }
    Ok(())
}
