//! Route node model
//!
//! A [`RouteNode`] is one entry of the client router's route table. Nodes are
//! addressed by their [`Slot`]; the merger and the post-processing passes
//! only ever compare slots, never rendered paths.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::module::{DeferredHandler, LazyElement, ModuleRef};

/// Placeholder rendered while a route without a loading file is pending
pub const DEFAULT_PENDING_TEXT: &str = "Loading...";

// ============================================================================
// Node identity
// ============================================================================

/// Whether a node came from a `page` or a `layout` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Page,
    Layout,
}

/// Position of a node among its siblings
///
/// `Path` carries the URL path (`/`, `users/:id`, `*`, `lang?`), `Group` a
/// pathless route group, `Index` the index route of the parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Path(String),
    Group(String),
    Index,
}

impl Slot {
    pub fn root() -> Self {
        Slot::Path("/".to_string())
    }

    pub fn catch_all() -> Self {
        Slot::Path("*".to_string())
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Slot::Path(path) if path == "*")
    }

    /// URL path of the slot, if it has one
    pub fn path(&self) -> Option<&str> {
        match self {
            Slot::Path(path) => Some(path),
            Slot::Group(_) | Slot::Index => None,
        }
    }

    /// Sibling precedence: index, static, group/optional, dynamic, catch-all
    pub fn rank(&self) -> u8 {
        match self {
            Slot::Index => 0,
            Slot::Group(_) => 2,
            Slot::Path(path) if path == "*" => 4,
            Slot::Path(path) if path.contains(':') => 3,
            Slot::Path(path) if path.ends_with('?') => 2,
            Slot::Path(_) => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Path(path) => f.write_str(path),
            Slot::Group(name) => write!(f, "({})", name),
            Slot::Index => f.write_str("(index)"),
        }
    }
}

/// Derived role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Page,
    Layout,
    /// No content of its own; groups children under a path or route group
    Pathless,
    Index,
    /// `[...name]` page
    CatchAll,
    /// `*` child grafted from a `404` file
    NotFound,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Page => "page",
            NodeKind::Layout => "layout",
            NodeKind::Pathless => "pathless",
            NodeKind::Index => "index",
            NodeKind::CatchAll => "catch-all",
            NodeKind::NotFound => "not-found",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Content
// ============================================================================

/// What a route renders while it is pending
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fallback {
    /// [`DEFAULT_PENDING_TEXT`]
    #[default]
    Default,
    Module(LazyElement),
}

impl Fallback {
    pub fn is_default(&self) -> bool {
        matches!(self, Fallback::Default)
    }
}

impl Serialize for Fallback {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Fallback::Default => serializer.serialize_str(DEFAULT_PENDING_TEXT),
            Fallback::Module(element) => element.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHandle {
    pub page_type: PageType,
}

/// Everything a node renders, taken from one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteContent {
    pub element: LazyElement,
    #[serde(skip_serializing_if = "Fallback::is_default")]
    pub pending_fallback: Fallback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<DeferredHandler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DeferredHandler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<RouteHandle>,
}

impl RouteContent {
    /// Content of a page or layout module, with deferred loader and action
    pub fn for_module(module: ModuleRef, page_type: PageType, pending_fallback: Fallback) -> Self {
        Self {
            element: LazyElement::new(module.clone()),
            pending_fallback,
            loader: Some(DeferredHandler::loader(module.clone())),
            action: Some(DeferredHandler::action(module)),
            handle: Some(RouteHandle { page_type }),
        }
    }

    /// Content that only renders the module's default export
    pub fn element_only(module: ModuleRef) -> Self {
        Self {
            element: LazyElement::new(module),
            pending_fallback: Fallback::Default,
            loader: None,
            action: None,
            handle: None,
        }
    }

    pub fn module(&self) -> &ModuleRef {
        &self.element.module
    }

    pub fn page_type(&self) -> Option<PageType> {
        self.handle.as_ref().map(|handle| handle.page_type)
    }
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode {
    pub slot: Slot,
    pub content: Option<RouteContent>,
    pub error_element: Option<LazyElement>,
    /// `None` for leaves; layouts always carry a list, possibly empty
    pub children: Option<Vec<RouteNode>>,
}

impl RouteNode {
    /// Node without content or children
    pub fn container(slot: Slot) -> Self {
        Self {
            slot,
            content: None,
            error_element: None,
            children: None,
        }
    }

    /// The fold accumulator, `/`
    pub fn root() -> Self {
        Self::container(Slot::root())
    }

    pub fn index(content: RouteContent) -> Self {
        Self {
            content: Some(content),
            ..Self::container(Slot::Index)
        }
    }

    pub fn not_found(module: ModuleRef) -> Self {
        Self {
            content: Some(RouteContent::element_only(module)),
            ..Self::container(Slot::catch_all())
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.slot == Slot::Index {
            return NodeKind::Index;
        }
        match (self.page_type(), self.slot.is_catch_all()) {
            (None, true) if self.content.is_some() => NodeKind::NotFound,
            (_, true) => NodeKind::CatchAll,
            (Some(PageType::Layout), false) => NodeKind::Layout,
            (Some(PageType::Page), false) => NodeKind::Page,
            (None, false) => NodeKind::Pathless,
        }
    }

    pub fn page_type(&self) -> Option<PageType> {
        self.content.as_ref().and_then(RouteContent::page_type)
    }

    pub fn children(&self) -> &[RouteNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn child(&self, slot: &Slot) -> Option<&RouteNode> {
        self.children().iter().find(|child| &child.slot == slot)
    }

    pub fn child_mut(&mut self, slot: &Slot) -> Option<&mut RouteNode> {
        self.children
            .as_mut()
            .and_then(|children| children.iter_mut().find(|child| &child.slot == slot))
    }

    /// The children list, created empty when missing
    pub fn ensure_children(&mut self) -> &mut Vec<RouteNode> {
        self.children.get_or_insert_with(Vec::new)
    }

    /// Walks down by slot labels (`["(auth)", "login"]`)
    pub fn find(&self, labels: &[&str]) -> Option<&RouteNode> {
        labels.iter().try_fold(self, |node, label| {
            node.children()
                .iter()
                .find(|child| child.slot.to_string() == *label)
        })
    }

    /// Adds an index child holding `content`
    ///
    /// The same module again is a no-op. A different module is settled by
    /// [`replaces_duplicate`].
    pub fn insert_index(&mut self, content: RouteContent) {
        let label = format!("{} (index)", self.slot);
        let children = self.ensure_children();

        match children.iter_mut().find(|child| child.slot == Slot::Index) {
            Some(existing) => match &existing.content {
                Some(current) if current.module() == content.module() => {}
                Some(current) => {
                    if replaces_duplicate(&label, current.module(), content.module()) {
                        existing.content = Some(content);
                    }
                }
                None => existing.content = Some(content),
            },
            None => children.push(RouteNode::index(content)),
        }
    }

    /// Moves this node's content into an index child
    ///
    /// The error element stays on this node. A node without content only
    /// gains an empty children list.
    pub fn demote_to_index(&mut self) {
        match self.content.take() {
            Some(content) => self.insert_index(content),
            None => {
                self.ensure_children();
            }
        }
    }

    /// Puts every children list in canonical order, recursively
    pub fn sort_children(&mut self) {
        if let Some(children) = self.children.as_mut() {
            children.sort_by_cached_key(|child| (child.slot.rank(), child.slot.to_string()));
            children.iter_mut().for_each(RouteNode::sort_children);
        }
    }

    /// This node plus all descendants
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(RouteNode::node_count).sum::<usize>()
    }
}

/// Route object shape consumed by the client router
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRoute<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    index: bool,
    #[serde(flatten)]
    content: Option<&'a RouteContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_element: Option<&'a LazyElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [RouteNode]>,
}

impl Serialize for RouteNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let id = match &self.slot {
            Slot::Group(_) => Some(self.slot.to_string()),
            _ => None,
        };
        WireRoute {
            id,
            path: self.slot.path(),
            index: self.slot == Slot::Index,
            content: self.content.as_ref(),
            error_element: self.error_element.as_ref(),
            children: self.children.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Settles two different modules claiming the same route
///
/// The module whose source sorts first is kept no matter which one arrived
/// first, so the tree does not depend on fold order. Returns `true` when
/// `incoming` should replace `existing`.
pub fn replaces_duplicate(route: &str, existing: &ModuleRef, incoming: &ModuleRef) -> bool {
    let replace = incoming.source() < existing.source();
    let (kept, ignored) = if replace { (incoming, existing) } else { (existing, incoming) };
    warn!(route, kept = %kept, ignored = %ignored, "duplicate route, ignoring module");
    replace
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(source: &str) -> RouteContent {
        RouteContent::for_module(ModuleRef::external(source), PageType::Page, Fallback::Default)
    }

    #[test]
    fn test_slot_rank_order() {
        let mut slots = vec![
            Slot::catch_all(),
            Slot::Path(":id".to_string()),
            Slot::Group("auth".to_string()),
            Slot::Path("about".to_string()),
            Slot::Index,
            Slot::Path("lang?".to_string()),
        ];
        slots.sort_by_key(|slot| slot.rank());
        assert_eq!(slots[0], Slot::Index);
        assert_eq!(slots[1], Slot::Path("about".to_string()));
        assert_eq!(slots[4], Slot::Path(":id".to_string()));
        assert_eq!(slots[5], Slot::catch_all());
    }

    #[test]
    fn test_kind() {
        let mut node = RouteNode::container(Slot::Path("about".to_string()));
        assert_eq!(node.kind(), NodeKind::Pathless);

        node.content = Some(page("./pages/about/page.tsx"));
        assert_eq!(node.kind(), NodeKind::Page);

        let not_found = RouteNode::not_found(ModuleRef::external("./pages/404.tsx"));
        assert_eq!(not_found.kind(), NodeKind::NotFound);

        let catch_all = RouteNode {
            content: Some(page("./pages/[...slug]/page.tsx")),
            ..RouteNode::container(Slot::catch_all())
        };
        assert_eq!(catch_all.kind(), NodeKind::CatchAll);
        assert_eq!(RouteNode::index(page("./pages/page.tsx")).kind(), NodeKind::Index);
    }

    #[test]
    fn test_demote_keeps_error_element() {
        let mut node = RouteNode {
            content: Some(page("./pages/a/page.tsx")),
            error_element: Some(LazyElement::new(ModuleRef::external("./pages/a/error.tsx"))),
            ..RouteNode::container(Slot::Path("a".to_string()))
        };
        node.demote_to_index();

        assert_eq!(node.content, None);
        assert!(node.error_element.is_some());
        assert_eq!(node.children(), &[RouteNode::index(page("./pages/a/page.tsx"))]);
    }

    #[test]
    fn test_insert_index_conflict_keeps_first_source() {
        let mut node = RouteNode::root();
        node.insert_index(page("./pages/page.tsx"));
        node.insert_index(page("./pages/page.tsx"));
        assert_eq!(node.children().len(), 1);

        node.insert_index(page("./pages/(index)/page.tsx"));
        node.insert_index(page("./pages/page.tsx"));
        assert_eq!(node.children(), &[RouteNode::index(page("./pages/(index)/page.tsx"))]);
    }

    #[test]
    fn test_insert_index_fills_empty_index() {
        let mut node = RouteNode::root();
        node.ensure_children().push(RouteNode::container(Slot::Index));
        node.insert_index(page("./pages/page.tsx"));
        assert_eq!(node.children(), &[RouteNode::index(page("./pages/page.tsx"))]);
    }

    #[test]
    fn test_find_and_count() {
        let mut root = RouteNode::root();
        let mut group = RouteNode::container(Slot::Group("auth".to_string()));
        group.ensure_children().push(RouteNode {
            content: Some(page("./pages/(auth)/login/page.tsx")),
            ..RouteNode::container(Slot::Path("login".to_string()))
        });
        root.ensure_children().push(group);

        assert_eq!(root.node_count(), 3);
        assert_eq!(
            root.find(&["(auth)", "login"]).map(RouteNode::kind),
            Some(NodeKind::Page)
        );
        assert!(root.find(&["login"]).is_none());
    }

    #[test]
    fn test_wire_shape() {
        let mut root = RouteNode::root();
        root.insert_index(page("./pages/page.tsx"));
        root.ensure_children()
            .push(RouteNode::container(Slot::Group("auth".to_string())));

        assert_eq!(
            serde_json::to_value(&root).unwrap(),
            json!({
                "path": "/",
                "children": [
                    {
                        "index": true,
                        "element": "./pages/page.tsx",
                        "loader": "./pages/page.tsx#loader",
                        "action": "./pages/page.tsx#action",
                        "handle": { "pageType": "page" }
                    },
                    { "id": "(auth)" }
                ]
            })
        );
    }
}
