//! CallMap relay to the OBS mapper plugin.
//!
//! The plugin listens for UDP datagrams holding one JSON crop command each.
//! A command names the capture target (OS and window identity, or an
//! existing scene source id) and lists one crop rectangle per participant.

pub mod command;
pub mod connection;
pub mod obs_export;

pub use command::{CameraCrop, CaptureTarget, CropCommand};
pub use connection::RelayConnection;
pub use obs_export::{preset_source_name, ObsSceneExport, ObsSource};
