//! Preset management commands.
//!
//! Provides commands to list, show, save, delete, and copy presets.

use super::common::{load_preset, parse_mode};
use clap::{Args, Subcommand};
use pvoc_config::{
    Preset, ensure_user_presets_dir, factory_presets, get_factory_preset, list_user_presets,
    preset_name_from_path, user_presets_dir,
};
use pvoc_spectral::Mode;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a new user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Pitch shift in semitones (-12 to 12)
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        semitones: f32,

        /// Mode: pitch-shift, robotize, or whisperize
        #[arg(short, long, value_parser = parse_mode, default_value = "pitch-shift")]
        mode: Mode,

        /// Transform size (1024, 2048, or 4096)
        #[arg(short = 'n', long, default_value = "2048")]
        transform_size: usize,

        /// Pitch smoothing time constant in milliseconds
        #[arg(long, default_value = "100.0")]
        smoothing_ms: f32,

        /// Whisper RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (uses source name if not specified)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            semitones,
            mode,
            transform_size,
            smoothing_ms,
            seed,
            description,
            force,
        } => {
            let mut preset = Preset::new(&name)
                .with_semitones(semitones)
                .with_mode(mode)
                .with_transform_size(transform_size)
                .with_smoothing_ms(smoothing_ms);
            if let Some(seed) = seed {
                preset = preset.with_seed(seed);
            }
            if let Some(desc) = description {
                preset = preset.with_description(desc);
            }
            save_preset(&name, &preset, force)
        }
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Copy { source, name } => copy_preset(&source, name.as_deref()),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: pvoc presets save <name> --semitones 5\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load preset");
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Mode:           {}", preset.mode);
    println!(
        "Pitch:          {:+.2} semitones (ratio {:.4})",
        preset.semitones,
        preset.pitch_ratio()
    );
    println!("Transform size: {}", preset.transform_size);
    println!("Smoothing:      {} ms", preset.smoothing_ms);
    println!("Seed:           {}", preset.seed);

    if let Err(e) = preset.validate() {
        println!();
        println!("Warning: {e}");
    }

    Ok(())
}

fn save_preset(name: &str, preset: &Preset, force: bool) -> anyhow::Result<()> {
    preset.validate()?;

    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{name}.toml"));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    preset.save(&preset_path)?;
    tracing::info!(path = %preset_path.display(), "saved preset");
    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
    }

    let preset_path = user_presets_dir().join(format!("{name}.toml"));
    if !preset_path.exists() {
        anyhow::bail!("User preset '{name}' not found.");
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{name}'.");
    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .ok_or_else(|| anyhow::anyhow!("Factory preset '{source}' not found."))?;

    let target_name = new_name.unwrap_or(source);
    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{target_name}.toml"));

    if preset_path.exists() {
        anyhow::bail!(
            "Preset '{target_name}' already exists in user presets. Choose a different name with --name."
        );
    }

    let mut copy = Preset {
        name: target_name.to_string(),
        ..preset
    };
    copy.description = copy.description.map(|d| format!("{d} (copy)"));
    copy.save(&preset_path)?;

    println!("Copied factory preset '{source}' to user preset '{target_name}'");
    println!("Path: {}", preset_path.display());
    Ok(())
}
