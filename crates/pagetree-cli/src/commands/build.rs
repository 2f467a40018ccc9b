use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::ProjectArgs;

pub fn execute(project: &ProjectArgs, out: Option<&Path>, compact: bool) -> Result<()> {
    let config = super::load_config(project)?;
    let tree = super::build_tree(&project.root, &config)?;

    let pretty = config.output.pretty && !compact;
    let manifest = tree
        .to_json(pretty)
        .context("Failed to serialize route manifest")?;

    // --out wins over [output] file, which is relative to the project root
    let target = out
        .map(Path::to_path_buf)
        .or_else(|| config.output.file.as_ref().map(|file| project.root.join(file)));

    match target {
        Some(path) => {
            fs::write(&path, format!("{}\n", manifest))
                .with_context(|| format!("Failed to write manifest: {:?}", path))?;
            eprintln!(
                "  {} {} routes → {}",
                "✓".green(),
                tree.node_count(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", manifest),
    }

    Ok(())
}
