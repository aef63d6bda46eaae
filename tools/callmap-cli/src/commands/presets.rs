//! Manage participant presets.

use std::path::PathBuf;

use callmap_model::{Preset, PresetStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PresetCommand {
    /// List presets in a file
    List {
        /// Preset file
        file: PathBuf,
    },

    /// Show the people in one preset
    Show {
        /// Preset file
        file: PathBuf,
        /// Preset name
        name: String,
    },

    /// Add a preset
    Add {
        /// Preset file
        file: PathBuf,
        /// Preset name
        name: String,
        /// Participant names, in tile order
        #[arg(long, value_delimiter = ',')]
        people: Vec<String>,
    },

    /// Replace a preset's name or people
    Edit {
        /// Preset file
        file: PathBuf,
        /// Current preset name
        name: String,
        /// New preset name
        #[arg(long)]
        rename: Option<String>,
        /// Participant names, in tile order
        #[arg(long, value_delimiter = ',')]
        people: Option<Vec<String>>,
    },

    /// Remove a preset
    Remove {
        /// Preset file
        file: PathBuf,
        /// Preset name
        name: String,
    },

    /// Create an empty preset file
    Create {
        /// Preset file
        file: PathBuf,
    },
}

pub fn run(command: PresetCommand) -> anyhow::Result<()> {
    match command {
        PresetCommand::List { file } => {
            let store = PresetStore::load(&file)?;
            for name in store.names() {
                println!("{name}");
            }
        }
        PresetCommand::Show { file, name } => {
            let store = PresetStore::load(&file)?;
            let people = store
                .people(&name)
                .ok_or_else(|| anyhow::anyhow!("Preset '{name}' not found"))?;
            println!("{name}:");
            for (index, person) in people.iter().enumerate() {
                println!("  {index}: {person}");
            }
        }
        PresetCommand::Add { file, name, people } => {
            let mut store = PresetStore::load(&file)?;
            store.add(Preset::new(name.clone(), people))?;
            store.save()?;
            println!("Added preset '{name}'");
        }
        PresetCommand::Edit {
            file,
            name,
            rename,
            people,
        } => {
            let mut store = PresetStore::load(&file)?;
            let current = store
                .get(&name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Preset '{name}' not found"))?;
            let edited = Preset::new(
                rename.unwrap_or(current.preset_name),
                people.unwrap_or(current.people),
            );
            let saved = store.edit(&name, edited)?.preset_name.clone();
            store.save()?;
            println!("Updated preset '{saved}'");
        }
        PresetCommand::Remove { file, name } => {
            let mut store = PresetStore::load(&file)?;
            store.remove(&name)?;
            store.save()?;
            println!("Removed preset '{name}'");
        }
        PresetCommand::Create { file } => {
            PresetStore::create(&file)?;
            println!("Created {}", file.display());
        }
    }
    Ok(())
}
