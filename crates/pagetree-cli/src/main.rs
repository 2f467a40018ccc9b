mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pagetree")]
#[command(version, about = "pagetree - compile a pages directory into a client route tree", long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to find the project and its configuration
#[derive(Args)]
pub struct ProjectArgs {
    /// Project root containing the pages directory
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/pagetree.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the pages directory and emit the JSON route manifest
    Build {
        #[command(flatten)]
        project: ProjectArgs,

        /// Write the manifest to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the route tree
    Tree {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Print the parsed segments of page file paths
    Segments {
        /// Bundler file paths, e.g. ./pages/users/[id]/page.tsx
        #[arg(required = true)]
        files: Vec<String>,

        /// Config file (default: ./pagetree.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Build {
            project,
            out,
            compact,
        } => {
            commands::build::execute(&project, out.as_deref(), compact)?;
        }
        Commands::Tree { project } => {
            commands::tree::execute(&project)?;
        }
        Commands::Segments { files, config } => {
            commands::segments::execute(&files, config.as_deref())?;
        }
    }

    Ok(())
}
