//! Segment list → single-branch node chain

use tracing::trace;

use crate::error::{Result, RouteTreeError};
use crate::module::ModuleRef;
use crate::node::{Fallback, PageType, RouteContent, RouteNode, Slot};
use crate::segment::RouteSegment;

/// The module a chain is built for, plus its resolved pending fallback
#[derive(Debug, Clone)]
pub struct PageBinding {
    pub module: ModuleRef,
    pub pending_fallback: Fallback,
}

impl PageBinding {
    pub fn new(module: ModuleRef) -> Self {
        Self {
            module,
            pending_fallback: Fallback::Default,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.pending_fallback = fallback;
        self
    }
}

/// Builds the chain of nodes for one page or layout file
///
/// Intermediate segments become content-less containers; only the
/// file-tagged segment receives the module's content. A layout always gets a
/// children list. A page inside a route group becomes the group's index
/// child, since a pathless node cannot match a URL on its own.
///
/// # Examples
///
/// ```
/// use pagetree::{build_route_chain, parse_route_segments, ModuleRef, PageBinding, RoutingConfig};
///
/// let file = "./pages/blog/layout.tsx";
/// let segments = parse_route_segments(file, &RoutingConfig::default()).unwrap();
/// let chain = build_route_chain(&segments, &PageBinding::new(ModuleRef::external(file))).unwrap();
///
/// assert!(chain.content.is_none());
/// assert_eq!(chain.children().len(), 1);
/// assert_eq!(chain.children()[0].children, Some(vec![]));
/// ```
pub fn build_route_chain(segments: &[RouteSegment], binding: &PageBinding) -> Result<RouteNode> {
    let (first, rest) = segments
        .split_first()
        .ok_or_else(|| RouteTreeError::SegmentOverflow {
            file: binding.module.to_string(),
        })?;

    let mut node = RouteNode::container(first.slot());

    if let Some(file) = first.file {
        let page_type = file
            .page_type()
            .ok_or_else(|| RouteTreeError::UnrecognizedFile {
                file: binding.module.to_string(),
            })?;
        let content = RouteContent::for_module(
            binding.module.clone(),
            page_type,
            binding.pending_fallback.clone(),
        );

        let in_group = matches!(node.slot, Slot::Group(_));
        match (page_type, in_group) {
            (PageType::Page, true) => node.insert_index(content),
            (PageType::Layout, _) => {
                node.content = Some(content);
                node.ensure_children();
            }
            (PageType::Page, false) => node.content = Some(content),
        }
        trace!(slot = %node.slot, kind = %node.kind(), "built terminal node");
    }

    if !rest.is_empty() {
        let child = build_route_chain(rest, binding)?;
        node.ensure_children().push(child);
    }

    Ok(node)
}
