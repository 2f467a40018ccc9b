//! Folding node chains into the route tree
//!
//! [`merge_routes`] is a pure fold step: it consumes the accumulated node and
//! an incoming chain and returns the merged node. Applied over every page and
//! layout file, in any order, it yields the same tree once children are put
//! in canonical order.

use std::mem;

use tracing::trace;

use crate::error::{Result, RouteTreeError};
use crate::module::LazyElement;
use crate::node::{replaces_duplicate, PageType, RouteContent, RouteNode};

/// Merges `source` into `target`; both must occupy the same slot
///
/// Content rules, first match wins:
///
/// 1. layout at an empty container: the layout moves in
/// 2. layout at a page: the page is demoted to an index child first
/// 3. page at a layout: the page becomes the index child
/// 4. page at a pathless container: index child if the container already has
///    children, otherwise the page moves in
/// 5. same kind at the same slot: same module is a no-op; for two different
///    modules the one whose source sorts first is kept and the other is
///    logged and ignored
///
/// Then the source's children are merged slot by slot; a page that gains
/// children is demoted to an index child.
///
/// # Errors
///
/// [`RouteTreeError::PathMismatch`] when the slots differ.
pub fn merge_routes(mut target: RouteNode, source: RouteNode) -> Result<RouteNode> {
    if target.slot != source.slot {
        return Err(RouteTreeError::PathMismatch {
            target: target.slot.to_string(),
            incoming: source.slot.to_string(),
        });
    }

    let RouteNode {
        content,
        error_element,
        children,
        ..
    } = source;

    if let Some(content) = content {
        merge_content(&mut target, content);
    }
    if let Some(error_element) = error_element {
        merge_error_element(&mut target, error_element);
    }
    if let Some(children) = children {
        merge_children(&mut target, children)?;
    }

    Ok(target)
}

fn merge_content(target: &mut RouteNode, incoming: RouteContent) {
    match (target.content.as_ref(), incoming.page_type()) {
        (None, Some(PageType::Layout)) => {
            trace!(slot = %target.slot, "layout at empty container");
            target.content = Some(incoming);
            target.ensure_children();
        }
        (Some(existing), Some(PageType::Layout)) if existing.page_type() == Some(PageType::Page) => {
            trace!(slot = %target.slot, "layout at page, demoting page to index");
            target.demote_to_index();
            target.content = Some(incoming);
        }
        (Some(existing), Some(PageType::Page)) if existing.page_type() == Some(PageType::Layout) => {
            trace!(slot = %target.slot, "page at layout, adding index");
            target.insert_index(incoming);
        }
        (None, _) if target.children.is_some() => {
            trace!(slot = %target.slot, "page at pathless container, adding index");
            target.insert_index(incoming);
        }
        (None, _) => {
            trace!(slot = %target.slot, "page at fresh container");
            target.content = Some(incoming);
        }
        (Some(existing), _) if existing.module() == incoming.module() => {
            trace!(slot = %target.slot, module = %incoming.module(), "same module, skipping");
        }
        (Some(existing), _) => {
            if replaces_duplicate(&target.slot.to_string(), existing.module(), incoming.module()) {
                target.content = Some(incoming);
            }
        }
    }
}

fn merge_error_element(target: &mut RouteNode, incoming: LazyElement) {
    match &target.error_element {
        Some(existing) if *existing == incoming => {}
        Some(existing) => {
            if replaces_duplicate(&target.slot.to_string(), &existing.module, &incoming.module) {
                target.error_element = Some(incoming);
            }
        }
        None => target.error_element = Some(incoming),
    }
}

fn merge_children(target: &mut RouteNode, incoming: Vec<RouteNode>) -> Result<()> {
    if !incoming.is_empty() && target.page_type() == Some(PageType::Page) {
        trace!(slot = %target.slot, "page gains children, demoting to index");
        target.demote_to_index();
    }

    let children = target.ensure_children();
    for child in incoming {
        match children.iter().position(|existing| existing.slot == child.slot) {
            Some(pos) => {
                let existing = mem::replace(&mut children[pos], RouteNode::container(child.slot.clone()));
                children[pos] = merge_routes(existing, child)?;
            }
            None => children.push(child),
        }
    }
    Ok(())
}
