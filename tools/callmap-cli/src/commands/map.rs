//! Detect, bind a preset, and send crops to OBS.

use std::path::PathBuf;

use callmap_common::config::AppConfig;
use callmap_platform_core::WindowBackend;
use callmap_relay::{CaptureTarget, CropCommand, RelayConnection};

use super::{bind_preset, detect_window, print_outcome};

pub async fn run(
    mut config: AppConfig,
    title: String,
    preset: PathBuf,
    name: String,
    debug: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    config.detection.debug |= debug;
    let relay_config = config.relay.clone();

    let (outcome, mut registry, identity) = detect_window(config, title).await?;
    bind_preset(&mut registry, &preset, &name)?;
    print_outcome(&outcome, &registry);

    let os = callmap_capture_engine::get_window_backend()?
        .display_server()
        .os_name();
    let command = CropCommand::from_registry(
        &registry,
        CaptureTarget::window(os, identity),
        relay_config.y_offset,
    )?;

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&command)?);
        return Ok(());
    }

    let relay = RelayConnection::connect(&relay_config).await?;
    relay.send(&command).await?;
    println!("Sent {} crops to {}", command.cameras.len(), relay.target());
    Ok(())
}
