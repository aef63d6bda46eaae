//! CallMap CLI: find participant tiles in a video call and crop them in OBS.
//!
//! Usage:
//!   callmap windows                    List windows that can be mapped
//!   callmap detect <TITLE>             Detect camera tiles in a call window
//!   callmap detect-file <IMAGE>        Detect camera tiles in a screenshot
//!   callmap map <TITLE> [OPTIONS]      Detect, bind a preset, and send crops
//!   callmap presets <COMMAND>          Manage participant presets
//!   callmap check                      Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "callmap",
    about = "Map video-call participant tiles to OBS crop sources",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the data directory that receives tile crops
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible windows
    Windows,

    /// Detect camera tiles in a call window
    Detect {
        /// Window title
        title: String,

        /// Keep intermediate images (mask, edges, screenshots)
        #[arg(long)]
        debug: bool,
    },

    /// Detect camera tiles in a saved screenshot
    DetectFile {
        /// Screenshot image (PNG, JPEG, ...)
        image: PathBuf,

        /// Keep intermediate images (mask, edges)
        #[arg(long)]
        debug: bool,

        /// Preset file used to name the tiles
        #[arg(long, requires = "name")]
        preset: Option<PathBuf>,

        /// Preset to bind, in tile order
        #[arg(long, requires = "preset")]
        name: Option<String>,

        /// OBS scene export holding the preset's capture source; sends crops when given
        #[arg(long, requires = "name")]
        scenes: Option<PathBuf>,
    },

    /// Detect tiles, bind a preset's participants, and send crops to OBS
    Map {
        /// Window title
        title: String,

        /// Preset file
        #[arg(short, long)]
        preset: PathBuf,

        /// Preset to bind, in tile order
        #[arg(short, long)]
        name: String,

        /// Keep intermediate images (mask, edges, screenshots)
        #[arg(long)]
        debug: bool,

        /// Print the crop command instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage participant presets
    Presets {
        #[command(subcommand)]
        command: commands::presets::PresetCommand,
    },

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = callmap_common::config::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    callmap_common::logging::init_logging(&config.logging);

    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Windows => commands::windows::run(&config),
        Commands::Detect { title, debug } => commands::detect::run(config, title, debug).await,
        Commands::DetectFile {
            image,
            debug,
            preset,
            name,
            scenes,
        } => commands::detect::run_file(config, image, debug, preset, name, scenes).await,
        Commands::Map {
            title,
            preset,
            name,
            debug,
            dry_run,
        } => commands::map::run(config, title, preset, name, debug, dry_run).await,
        Commands::Presets { command } => commands::presets::run(command),
        Commands::Check => commands::check::run(),
    }
}
