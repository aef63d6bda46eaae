pub mod check;
pub mod detect;
pub mod map;
pub mod presets;
pub mod windows;

use std::path::Path;

use callmap_capture_engine::{DetectionOutcome, DetectionSession};
use callmap_common::config::AppConfig;
use callmap_common::error::CallmapResult;
use callmap_model::{CameraRegistry, PresetStore};

/// Run a detection pass off the async runtime; passes block for the
/// capture settle delay.
pub async fn blocking<T, F>(work: F) -> anyhow::Result<T>
where
    F: FnOnce() -> CallmapResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

/// Detect tiles in the titled window with the platform backends.
pub async fn detect_window(
    config: AppConfig,
    title: String,
) -> anyhow::Result<(DetectionOutcome, CameraRegistry, String)> {
    blocking(move || {
        let session = DetectionSession::from_config(&config)?;
        let mut registry = CameraRegistry::new();
        let outcome = session.run(&title, &mut registry)?;
        let identity = match &outcome.window {
            Some(window) => session.capture_identity(window)?,
            None => String::new(),
        };
        Ok((outcome, registry, identity))
    })
    .await
}

/// Bind the named preset's people to tiles in registry order.
pub fn bind_preset(registry: &mut CameraRegistry, file: &Path, name: &str) -> anyhow::Result<()> {
    let store = PresetStore::load(file)?;
    let people = store
        .people(name)
        .ok_or_else(|| anyhow::anyhow!("Preset '{name}' not found in {}", file.display()))?;

    let bound = registry.assign_names_in_order(people.iter().cloned());
    if people.len() != registry.len() {
        tracing::warn!(
            people = people.len(),
            tiles = registry.len(),
            "Preset size does not match detected tiles"
        );
    }
    println!("Bound {bound} of {} tiles to preset '{name}'", registry.len());
    Ok(())
}

pub fn print_outcome(outcome: &DetectionOutcome, registry: &CameraRegistry) {
    if let Some(window) = &outcome.window {
        println!("Window: {}", window.title);
    }
    if let Some(rect) = &outcome.window_rect {
        println!("  Bounds: {rect}");
    }
    println!(
        "Detected {} tiles (area {} px) in {:.2}s",
        outcome.tile_count,
        outcome.dominant_area,
        outcome.elapsed.as_secs_f64()
    );
    print_registry(registry);

    for warning in &outcome.warnings {
        println!("[WARN] {warning}");
    }
}

pub fn print_registry(registry: &CameraRegistry) {
    for tile in registry.iter() {
        let name = if tile.is_bound() { tile.name() } else { "-" };
        let image = tile
            .image_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no image)".to_string());
        println!("  [{}] {:<20} {:<20} {}", tile.id, name, tile.rect.to_string(), image);
    }
}
