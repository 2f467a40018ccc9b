//! Route tree orchestration
//!
//! [`RouteTree::build`] runs the whole pipeline over a [`RouteSources`]:
//! fold every page and layout chain into the root, graft error boundaries,
//! graft not-found pages, then put every children list in canonical order.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::builder::{build_route_chain, PageBinding};
use crate::config::RoutingConfig;
use crate::error::Result;
use crate::merge::merge_routes;
use crate::module::ModuleRef;
use crate::node::RouteNode;
use crate::passes::{attach_error_element, attach_not_found, locate, LoadingIndex};
use crate::segment::{parse_route_segments, FileKind};

// ============================================================================
// Sources
// ============================================================================

/// The four module mappings the bundler's glob imports produce, keyed by
/// source path
#[derive(Debug, Clone, Default)]
pub struct RouteSources {
    /// `page` and `layout` files
    pub pages: BTreeMap<String, ModuleRef>,
    pub errors: BTreeMap<String, ModuleRef>,
    pub not_found: BTreeMap<String, ModuleRef>,
    pub loading: BTreeMap<String, ModuleRef>,
}

impl RouteSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the modules by their kind; unrecognised files are skipped
    pub fn insert(&mut self, module: ModuleRef) -> Option<FileKind> {
        let Some(kind) = module.file_kind() else {
            warn!(file = %module, "skipping unrecognised route file");
            return None;
        };

        let target = match kind {
            FileKind::Page | FileKind::Layout => &mut self.pages,
            FileKind::Error => &mut self.errors,
            FileKind::NotFound => &mut self.not_found,
            FileKind::Loading => &mut self.loading,
        };
        target.insert(module.source().to_string(), module);
        Some(kind)
    }

    pub fn from_modules(modules: impl IntoIterator<Item = ModuleRef>) -> Self {
        modules.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len() + self.errors.len() + self.not_found.len() + self.loading.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<ModuleRef> for RouteSources {
    fn extend<I: IntoIterator<Item = ModuleRef>>(&mut self, iter: I) {
        for module in iter {
            self.insert(module);
        }
    }
}

impl FromIterator<ModuleRef> for RouteSources {
    fn from_iter<I: IntoIterator<Item = ModuleRef>>(iter: I) -> Self {
        let mut sources = Self::new();
        sources.extend(iter);
        sources
    }
}

// ============================================================================
// Tree
// ============================================================================

/// The finished route tree, rooted at `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    /// Folds page and layout modules into a tree, without the passes
    pub fn from_pages<'a>(
        pages: impl IntoIterator<Item = &'a ModuleRef>,
        loading: &LoadingIndex,
        config: &RoutingConfig,
    ) -> Result<Self> {
        let mut root = pages
            .into_iter()
            .try_fold(RouteNode::root(), |acc, module| {
                let segments = parse_route_segments(module.source(), config)?;
                let binding = PageBinding::new(module.clone())
                    .with_fallback(loading.resolve(module.source()));
                let chain = build_route_chain(&segments, &binding)?;
                debug!(file = %module, segments = segments.len(), "merging route");
                merge_routes(acc, chain)
            })?;
        root.sort_children();

        Ok(Self { root })
    }

    /// Builds the complete tree from the four source mappings
    ///
    /// # Examples
    ///
    /// ```
    /// use pagetree::{ModuleRef, RouteSources, RouteTree, RoutingConfig};
    ///
    /// let sources = RouteSources::from_modules([
    ///     ModuleRef::external("./pages/page.tsx"),
    ///     ModuleRef::external("./pages/(auth)/login/page.tsx"),
    ///     ModuleRef::external("./pages/404.tsx"),
    /// ]);
    /// let tree = RouteTree::build(&sources, &RoutingConfig::default()).unwrap();
    ///
    /// assert!(tree.root().content.is_none());
    /// assert!(tree.find(&["(index)"]).is_some());
    /// assert!(tree.find(&["(auth)", "login"]).is_some());
    /// assert!(tree.find(&["*"]).is_some());
    /// ```
    pub fn build(sources: &RouteSources, config: &RoutingConfig) -> Result<Self> {
        let loading = LoadingIndex::new(sources.loading.values(), config);
        let mut tree = Self::from_pages(sources.pages.values(), &loading, config)?;

        for module in sources.errors.values() {
            let segments = parse_route_segments(module.source(), config)?;
            locate(&segments, &mut tree.root, module.source(), |node| {
                attach_error_element(node, module.clone())
            })?;
        }
        debug!(count = sources.errors.len(), "error pass done");

        for module in sources.not_found.values() {
            let segments = parse_route_segments(module.source(), config)?;
            locate(&segments, &mut tree.root, module.source(), |node| {
                attach_not_found(node, module.clone())
            })?;
        }
        debug!(count = sources.not_found.len(), "not-found pass done");

        tree.root.sort_children();

        info!(
            pages = sources.pages.len(),
            errors = sources.errors.len(),
            not_found = sources.not_found.len(),
            loading = sources.loading.len(),
            nodes = tree.node_count(),
            "route tree built"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Walks down from the root by slot labels, e.g. `["(auth)", "login"]`
    pub fn find(&self, labels: &[&str]) -> Option<&RouteNode> {
        self.root.find(labels)
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn into_root(self) -> RouteNode {
        self.root
    }

    /// The top-level route list handed to the client router
    pub fn into_routes(self) -> Vec<RouteNode> {
        vec![self.root]
    }

    /// The route list as a JSON manifest
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        let routes = std::slice::from_ref(&self.root);
        if pretty {
            serde_json::to_string_pretty(routes)
        } else {
            serde_json::to_string(routes)
        }
    }
}
