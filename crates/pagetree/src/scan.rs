//! Pages directory scanner
//!
//! Produces the same four mappings the bundler's glob imports would, keyed
//! the way the bundler keys them (`./pages/users/[id]/page.tsx`).

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::RoutingConfig;
use crate::module::ModuleRef;
use crate::segment::FileKind;
use crate::tree::RouteSources;

/// Walks `<project_root>/<pages_dir>` and collects every route file
///
/// `resolve` turns a bundler key into a module handle. Dot-entries are
/// skipped, as are files with an extension outside `config.extensions` and
/// files whose stem is not a route file kind. Entries are visited in file
/// name order.
pub fn scan_pages<F>(project_root: impl AsRef<Path>, config: &RoutingConfig, mut resolve: F) -> Result<RouteSources>
where
    F: FnMut(&str) -> ModuleRef,
{
    let pages_root = project_root.as_ref().join(&config.pages_dir);
    if !pages_root.is_dir() {
        bail!("pages directory not found: {:?}", pages_root);
    }

    let key_prefix = config.pages_dir.trim_start_matches("./").trim_matches('/');
    let mut sources = RouteSources::new();

    for entry in WalkDir::new(&pages_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", pages_root))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| config.accepts_extension(ext))
        {
            trace!(file = ?path, "skipping non-module file");
            continue;
        }

        let relative = path
            .strip_prefix(&pages_root)
            .with_context(|| format!("{:?} is outside {:?}", path, pages_root))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let key = format!("./{}/{}", key_prefix, relative);

        if FileKind::from_path(&key).is_none() {
            trace!(file = %key, "skipping non-route module");
            continue;
        }
        sources.insert(resolve(&key));
    }

    debug!(files = sources.len(), dir = ?pages_root, "scanned pages directory");
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map_or(false, |name| name.starts_with('.'))
}
