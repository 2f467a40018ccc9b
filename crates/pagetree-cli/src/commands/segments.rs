use anyhow::{bail, Result};
use colored::Colorize;
use pagetree::{parse_route_segments, Config};
use std::path::Path;

pub fn execute(files: &[String], config: Option<&Path>) -> Result<()> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    let mut failed = 0;
    for file in files {
        match parse_route_segments(file, &config.routing) {
            Ok(segments) => {
                println!("{}", file.bold());
                for segment in segments {
                    let kind = format!("{:<9}", format!("{:?}", segment.kind));
                    println!("  {} {}", kind.cyan(), segment);
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}", "✗".red(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} paths could not be parsed", failed, files.len());
    }
    Ok(())
}
