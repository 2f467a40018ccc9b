//! Post-processing passes over the merged tree
//!
//! Error boundaries and not-found pages never create structure of their own:
//! they are grafted onto the node their folder already produced. Loading
//! files are resolved before the fold, while each page chain is built.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::config::RoutingConfig;
use crate::error::{Result, RouteTreeError};
use crate::module::{LazyElement, ModuleRef};
use crate::node::{replaces_duplicate, Fallback, RouteNode, Slot};
use crate::path::hierarchy::dir_name;
use crate::path::{route_dir, DirAncestors};
use crate::segment::pattern::is_group_component;
use crate::segment::RouteSegment;

// ============================================================================
// Tree walk
// ============================================================================

/// Walks `segments` down from `root` and applies `mutator` to the node reached
///
/// # Errors
///
/// [`RouteTreeError::MissingSegment`] when a segment has no matching child;
/// `file` names the file that required it.
pub fn locate<F>(segments: &[RouteSegment], root: &mut RouteNode, file: &str, mutator: F) -> Result<()>
where
    F: FnOnce(&mut RouteNode) -> Result<()>,
{
    let (first, rest) = segments
        .split_first()
        .ok_or_else(|| RouteTreeError::SegmentOverflow {
            file: file.to_string(),
        })?;

    if first.slot() != root.slot {
        return Err(RouteTreeError::PathMismatch {
            target: root.slot.to_string(),
            incoming: first.slot().to_string(),
        });
    }

    let mut node = root;
    for segment in rest {
        let slot = segment.slot();
        let parent = node.slot.to_string();
        node = node
            .child_mut(&slot)
            .ok_or_else(|| RouteTreeError::MissingSegment {
                segment: slot.to_string(),
                parent,
                file: file.to_string(),
            })?;
    }

    mutator(node)
}

// ============================================================================
// Error boundaries and not-found pages
// ============================================================================

/// Sets the node's error boundary
///
/// A second, different boundary for the same node is settled by
/// [`replaces_duplicate`].
pub fn attach_error_element(node: &mut RouteNode, module: ModuleRef) -> Result<()> {
    match &node.error_element {
        Some(existing) if existing.module == module => {}
        Some(existing) => {
            if replaces_duplicate(&node.slot.to_string(), &existing.module, &module) {
                node.error_element = Some(LazyElement::new(module));
            }
        }
        None => {
            trace!(slot = %node.slot, module = %module, "attached error element");
            node.error_element = Some(LazyElement::new(module));
        }
    }
    Ok(())
}

/// Appends a `*` child rendering the not-found module
///
/// A leaf is first turned into a container: its content moves into an index
/// child while the error boundary stays in place. A `*` child the fold
/// already built from a `[...slug]` page keeps its page; the not-found
/// module is logged and ignored.
pub fn attach_not_found(node: &mut RouteNode, module: ModuleRef) -> Result<()> {
    if node.children.is_none() {
        node.demote_to_index();
    }

    let label = format!("{} *", node.slot);
    match node.child_mut(&Slot::catch_all()) {
        Some(existing) => match &existing.content {
            Some(content) if *content.module() == module => {}
            Some(content) if content.page_type().is_some() => {
                warn!(
                    route = %label,
                    kept = %content.module(),
                    ignored = %module,
                    "catch-all page shadows not-found page"
                );
            }
            Some(content) => {
                if replaces_duplicate(&label, content.module(), &module) {
                    existing.content = RouteNode::not_found(module).content;
                }
            }
            None => existing.content = RouteNode::not_found(module).content,
        },
        None => {
            trace!(slot = %label, module = %module, "attached not-found route");
            node.ensure_children().push(RouteNode::not_found(module));
        }
    }
    Ok(())
}

// ============================================================================
// Loading fallbacks
// ============================================================================

/// Loading files indexed by route directory
#[derive(Debug, Clone, Default)]
pub struct LoadingIndex {
    by_dir: BTreeMap<String, ModuleRef>,
    pages_dir: String,
}

impl LoadingIndex {
    /// Indexes loading files by route directory
    ///
    /// Two files for one directory (`loading.tsx` and `loading.jsx`) are
    /// settled by [`replaces_duplicate`].
    pub fn new<'a>(loading: impl IntoIterator<Item = &'a ModuleRef>, config: &RoutingConfig) -> Self {
        let mut by_dir: BTreeMap<String, ModuleRef> = BTreeMap::new();
        for module in loading {
            let dir = route_dir(module.source(), &config.pages_dir);
            match by_dir.entry(dir) {
                Entry::Vacant(slot) => {
                    slot.insert(module.clone());
                }
                Entry::Occupied(mut slot) => {
                    if slot.get() != module
                        && replaces_duplicate(&format!("{} (loading)", slot.key()), slot.get(), module)
                    {
                        slot.insert(module.clone());
                    }
                }
            }
        }
        debug!(count = by_dir.len(), "indexed loading files");

        Self {
            by_dir,
            pages_dir: config.pages_dir.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_dir.is_empty()
    }

    /// Pending fallback for a page or layout file
    ///
    /// Sibling `loading` file first, then the one of the nearest enclosing
    /// route group, then the global `/loading`, else the default placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagetree::{Fallback, LoadingIndex, ModuleRef, RoutingConfig};
    ///
    /// let loading = [
    ///     ModuleRef::external("./pages/loading.tsx"),
    ///     ModuleRef::external("./pages/(shop)/loading.tsx"),
    /// ];
    /// let index = LoadingIndex::new(&loading, &RoutingConfig::default());
    ///
    /// match index.resolve("./pages/(shop)/cart/page.tsx") {
    ///     Fallback::Module(element) => assert_eq!(element.module.source(), "./pages/(shop)/loading.tsx"),
    ///     Fallback::Default => unreachable!(),
    /// }
    /// ```
    pub fn resolve(&self, file_path: &str) -> Fallback {
        let dir = route_dir(file_path, &self.pages_dir);

        self.by_dir
            .get(&dir)
            .or_else(|| {
                DirAncestors::new(&dir)
                    .skip(1)
                    .find(|ancestor| is_group_component(dir_name(ancestor)))
                    .and_then(|group| self.by_dir.get(group))
            })
            .or_else(|| self.by_dir.get("/"))
            .map(|module| Fallback::Module(LazyElement::new(module.clone())))
            .unwrap_or_default()
    }
}
