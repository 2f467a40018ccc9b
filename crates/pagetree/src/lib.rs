//! # pagetree
//!
//! Compiles a file-based pages directory into the nested route table of a
//! client-side router:
//! - Static segments (`about/page.tsx` → `about`)
//! - Dynamic parameters (`users/[id]/page.tsx` → `users/:id`)
//! - Catch-all routes (`blog/[...slug]/page.tsx` → `blog/*`)
//! - Route groups (`(auth)/login/page.tsx` → pathless `(auth)` node)
//! - Layouts wrapping pages, with inferred index routes
//! - Error boundaries, not-found pages and loading fallbacks grafted onto
//!   the node their folder produced
//!
//! ## Pipeline
//!
//! Each page or layout file goes through three pure steps:
//! - [`parse_route_segments`]: file path → [`RouteSegment`] list
//! - [`build_route_chain`]: segments + module → single-branch node chain
//! - [`merge_routes`]: fold the chain into the accumulated root
//!
//! The fold is order-independent. After it, error and not-found files are
//! attached by walking their segments ([`passes::locate`]) and every children
//! list is put in canonical order: index, static, group, dynamic, catch-all.
//!
//! Modules are never loaded while building. The tree only stores
//! [`ModuleRef`] handles; the renderer loads them on demand.
//!
//! ## Example
//!
//! ```
//! use pagetree::{ModuleRef, NodeKind, RouteSources, RouteTree, RoutingConfig};
//!
//! let sources = RouteSources::from_modules([
//!     ModuleRef::external("./pages/layout.tsx"),
//!     ModuleRef::external("./pages/page.tsx"),
//!     ModuleRef::external("./pages/users/[id]/page.tsx"),
//!     ModuleRef::external("./pages/404.tsx"),
//! ]);
//! let tree = RouteTree::build(&sources, &RoutingConfig::default()).unwrap();
//!
//! assert_eq!(tree.root().kind(), NodeKind::Layout);
//! assert_eq!(tree.find(&["users/:id"]).map(|n| n.kind()), Some(NodeKind::Page));
//! assert_eq!(tree.find(&["*"]).map(|n| n.kind()), Some(NodeKind::NotFound));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod config;
pub mod error;
pub mod merge;
pub mod module;
pub mod node;
pub mod passes;
pub mod path;
pub mod scan;
pub mod segment;
pub mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{build_route_chain, PageBinding};
pub use config::{Config, GroupPolicy, OutputConfig, RoutingConfig};
pub use error::{Result, RouteTreeError};
pub use merge::merge_routes;
pub use module::{
    route_fn, Component, DeferredHandler, Export, LazyElement, ModuleLoader, ModuleRef, PageModule,
    RouteArgs, RouteFn,
};
pub use node::{
    Fallback, NodeKind, PageType, RouteContent, RouteHandle, RouteNode, Slot,
    DEFAULT_PENDING_TEXT,
};
pub use passes::{attach_error_element, attach_not_found, locate, LoadingIndex};
pub use scan::scan_pages;
pub use segment::{parse_route_segments, FileKind, RouteSegment, SegmentKind};
pub use tree::{RouteSources, RouteTree};
