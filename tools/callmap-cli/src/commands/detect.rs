//! Detect camera tiles without sending anything.

use std::path::PathBuf;

use callmap_capture_engine::DetectionSession;
use callmap_common::config::AppConfig;
use callmap_model::CameraRegistry;
use callmap_relay::{CropCommand, ObsSceneExport, RelayConnection};

use super::{bind_preset, blocking, detect_window, print_outcome, print_registry};

pub async fn run(mut config: AppConfig, title: String, debug: bool) -> anyhow::Result<()> {
    config.detection.debug |= debug;
    let data_dir = config.data_dir.clone();

    let (outcome, registry, identity) = detect_window(config, title).await?;
    print_outcome(&outcome, &registry);
    if !identity.is_empty() {
        println!("Capture identity: {}", identity.escape_debug());
    }
    println!("Tile images: {}", data_dir.join("cameras").display());
    Ok(())
}

pub async fn run_file(
    mut config: AppConfig,
    image: PathBuf,
    debug: bool,
    preset: Option<PathBuf>,
    name: Option<String>,
    scenes: Option<PathBuf>,
) -> anyhow::Result<()> {
    config.detection.debug |= debug;
    let relay_config = config.relay.clone();

    let (outcome, mut registry) = blocking(move || {
        let session = DetectionSession::from_config(&config)?;
        let mut registry = CameraRegistry::new();
        let outcome = session.run_on_screenshot(&image, &mut registry)?;
        Ok((outcome, registry))
    })
    .await?;

    if let (Some(file), Some(name)) = (&preset, &name) {
        bind_preset(&mut registry, file, name)?;
    }
    print_outcome(&outcome, &registry);

    let (Some(scenes), Some(name)) = (scenes, name) else {
        return Ok(());
    };
    let target = ObsSceneExport::load(&scenes)?.target_for_preset(&name)?;
    let command = CropCommand::from_registry(&registry, target, relay_config.y_offset)?;
    let relay = RelayConnection::connect(&relay_config).await?;
    relay.send(&command).await?;
    println!("Sent {} crops to {}", command.cameras.len(), relay.target());
    print_registry(&registry);
    Ok(())
}
