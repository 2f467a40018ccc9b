pub mod build;
pub mod segments;
pub mod tree;

use std::path::Path;

use anyhow::{Context, Result};
use pagetree::{scan_pages, Config, ModuleRef, RouteTree};
use tracing::warn;

use crate::ProjectArgs;

/// Loads `--config`, or `<root>/pagetree.toml` when not given
pub fn load_config(project: &ProjectArgs) -> Result<Config> {
    match &project.config {
        Some(path) => Config::load(path),
        None => Config::load(project.root.join("pagetree.toml")),
    }
}

/// Scans the pages directory and builds the route tree
pub fn build_tree(root: &Path, config: &Config) -> Result<RouteTree> {
    let sources = scan_pages(root, &config.routing, |key| ModuleRef::external(key))?;
    if sources.pages.is_empty() {
        warn!(dir = %config.routing.pages_dir, "no page or layout files found");
    }

    RouteTree::build(&sources, &config.routing).context("Failed to build route tree")
}
