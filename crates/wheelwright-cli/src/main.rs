//! wheelwright CLI - frontend entry point for the build backend
//!
//! Commands:
//! - `wheelwright build-wheel` - Build a wheel archive
//! - `wheelwright build-sdist` - Build a source distribution archive
//! - `wheelwright prepare-metadata` - Write just the dist-info directory
//! - `wheelwright requires` - Print the static build requirements

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wheelwright")]
#[command(author, version, about = "Conan-backed Python build backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a wheel archive
    BuildWheel {
        /// Project root (default: current directory)
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Output directory for the archive
        #[arg(short, long, default_value = "dist")]
        output_dir: PathBuf,

        /// Frontend config setting, repeatable (e.g. -C host-profile=linux-armv8)
        #[arg(short = 'C', value_name = "KEY=VALUE", value_parser = parse_setting)]
        config_setting: Vec<(String, String)>,
    },

    /// Build a source distribution archive
    BuildSdist {
        /// Project root (default: current directory)
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Output directory for the archive
        #[arg(short, long, default_value = "dist")]
        output_dir: PathBuf,

        /// Frontend config setting, repeatable
        #[arg(short = 'C', value_name = "KEY=VALUE", value_parser = parse_setting)]
        config_setting: Vec<(String, String)>,
    },

    /// Write just the dist-info metadata directory
    PrepareMetadata {
        /// Project root (default: current directory)
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Output directory for the dist-info directory
        #[arg(short, long, default_value = "dist")]
        output_dir: PathBuf,
    },

    /// Print the static build requirements, one per line
    Requires,
}

fn parse_setting(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn project_dir_or_cwd(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    Ok(match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWheel {
            project_dir,
            output_dir,
            config_setting,
        } => {
            let project_dir = project_dir_or_cwd(project_dir)?;
            let settings: HashMap<String, String> = config_setting.into_iter().collect();
            let file_name = wheelwright::build_wheel(&project_dir, &output_dir, &settings)?;
            println!("{file_name}");
        }
        Commands::BuildSdist {
            project_dir,
            output_dir,
            config_setting,
        } => {
            let project_dir = project_dir_or_cwd(project_dir)?;
            let settings: HashMap<String, String> = config_setting.into_iter().collect();
            let file_name = wheelwright::build_sdist(&project_dir, &output_dir, &settings)?;
            println!("{file_name}");
        }
        Commands::PrepareMetadata {
            project_dir,
            output_dir,
        } => {
            let project_dir = project_dir_or_cwd(project_dir)?;
            let dist_info = wheelwright::prepare_metadata(&project_dir, &output_dir)?;
            println!("{dist_info}");
        }
        Commands::Requires => {
            for requirement in wheelwright::get_requires_for_build_wheel() {
                println!("{requirement}");
            }
        }
    }

    Ok(())
}
