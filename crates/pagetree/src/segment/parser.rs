//! File path → route segment list
//!
//! Pure functional parser built on a fold: each folder component is
//! classified and pushed onto a [`SegmentState`] accumulator, then the file
//! name tags the last accumulated segment.

use std::fmt;

use crate::config::{GroupPolicy, RoutingConfig};
use crate::error::{Result, RouteTreeError};
use crate::node::Slot;
use crate::path::strip_pages_root;

use super::file::FileKind;
use super::pattern::{classify_component, ComponentType};

/// Kind of URL segment a [`RouteSegment`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// `/` - the pages root
    Root,
    /// `users`
    Static,
    /// `:id`, or a static prefix with parameters joined on (`users/:id`)
    Dynamic,
    /// `*`
    CatchAll,
    /// `name?` - a route group under [`GroupPolicy::OptionalSegment`]
    Optional,
    /// `(name)` - a pathless route group
    Group,
}

impl SegmentKind {
    /// Whether a following `:param` folds into this entry
    fn accepts_param(self) -> bool {
        matches!(
            self,
            SegmentKind::Static | SegmentKind::Dynamic | SegmentKind::Optional
        )
    }
}

/// One entry of a parsed file path
///
/// The terminal entry carries the file kind that produced it; this replaces
/// encoding `path` and page type into one delimited string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSegment {
    pub kind: SegmentKind,
    /// URL path of the node, or the group name for [`SegmentKind::Group`]
    pub path: String,
    pub file: Option<FileKind>,
}

impl RouteSegment {
    pub fn new(kind: SegmentKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            file: None,
        }
    }

    /// The root segment, `/`
    pub fn root() -> Self {
        Self::new(SegmentKind::Root, "/")
    }

    pub fn with_file(mut self, file: FileKind) -> Self {
        self.file = Some(file);
        self
    }

    /// The node slot this segment addresses
    pub fn slot(&self) -> Slot {
        match self.kind {
            SegmentKind::Group => Slot::Group(self.path.clone()),
            _ => Slot::Path(self.path.clone()),
        }
    }
}

impl fmt::Display for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file {
            Some(file) => write!(f, "{} [{}]", self.slot(), file),
            None => write!(f, "{}", self.slot()),
        }
    }
}

/// Fold accumulator for segment parsing
///
/// All mutations stay local to the accumulator; each method consumes and
/// returns the state.
struct SegmentState {
    segments: Vec<RouteSegment>,
    policy: GroupPolicy,
}

impl SegmentState {
    fn new(policy: GroupPolicy) -> Self {
        Self {
            segments: vec![RouteSegment::root()],
            policy,
        }
    }

    fn with_static(mut self, name: String) -> Self {
        self.segments
            .push(RouteSegment::new(SegmentKind::Static, name));
        self
    }

    /// Joins `:name` onto the previous entry when it carries a URL path
    fn with_param(mut self, name: String) -> Self {
        let param = format!(":{}", name);
        match self.segments.last_mut() {
            Some(prev) if prev.kind.accepts_param() => {
                prev.path = format!("{}/{}", prev.path, param);
                prev.kind = SegmentKind::Dynamic;
            }
            _ => self
                .segments
                .push(RouteSegment::new(SegmentKind::Dynamic, param)),
        }
        self
    }

    fn with_catch_all(mut self) -> Self {
        self.segments
            .push(RouteSegment::new(SegmentKind::CatchAll, "*"));
        self
    }

    fn with_group(mut self, name: String) -> Self {
        let segment = match self.policy {
            GroupPolicy::Pathless => RouteSegment::new(SegmentKind::Group, name),
            GroupPolicy::OptionalSegment => {
                RouteSegment::new(SegmentKind::Optional, format!("{}?", name))
            }
        };
        self.segments.push(segment);
        self
    }

    /// Tags the last entry with the file kind
    fn finish(mut self, file: FileKind, file_path: &str) -> Result<Vec<RouteSegment>> {
        match self.segments.last_mut() {
            Some(last) => {
                last.file = Some(file);
                Ok(self.segments)
            }
            None => Err(RouteTreeError::SegmentOverflow {
                file: file_path.to_string(),
            }),
        }
    }
}

/// Processes one folder component (pure: state, component → state)
fn process_component(state: SegmentState, component: &str) -> SegmentState {
    match classify_component(component) {
        ComponentType::Ignored | ComponentType::Root => state,
        ComponentType::Group(name) => state.with_group(name),
        ComponentType::CatchAll => state.with_catch_all(),
        ComponentType::Dynamic(name) => state.with_param(name),
        ComponentType::Static(name) => state.with_static(name),
    }
}

/// Parses a bundler file path into route segments
///
/// The list always starts at the root and its last entry carries the file
/// kind.
///
/// # Examples
///
/// ```
/// use pagetree::{parse_route_segments, FileKind, RoutingConfig, SegmentKind};
///
/// let config = RoutingConfig::default();
/// let segments = parse_route_segments("./pages/users/[id]/page.tsx", &config).unwrap();
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].path, "/");
/// assert_eq!(segments[1].path, "users/:id");
/// assert_eq!(segments[1].kind, SegmentKind::Dynamic);
/// assert_eq!(segments[1].file, Some(FileKind::Page));
/// ```
///
/// # Errors
///
/// - [`RouteTreeError::SegmentOverflow`] when the path has no file name
/// - [`RouteTreeError::UnrecognizedFile`] when the file stem is unknown
pub fn parse_route_segments(file_path: &str, config: &RoutingConfig) -> Result<Vec<RouteSegment>> {
    let relative = strip_pages_root(file_path, &config.pages_dir);
    let components: Vec<&str> = relative.split('/').filter(|c| !c.is_empty()).collect();

    let (file_name, folders) =
        components
            .split_last()
            .ok_or_else(|| RouteTreeError::SegmentOverflow {
                file: file_path.to_string(),
            })?;

    let file = FileKind::from_stem(crate::path::file_stem(file_name))
        .ok_or_else(|| RouteTreeError::UnrecognizedFile {
            file: file_path.to_string(),
        })?;

    folders
        .iter()
        .fold(SegmentState::new(config.group_policy), |state, component| {
            process_component(state, component)
        })
        .finish(file, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn seg(kind: SegmentKind, path: &str) -> RouteSegment {
        RouteSegment::new(kind, path)
    }

    fn parse(path: &str) -> Vec<RouteSegment> {
        parse_route_segments(path, &RoutingConfig::default()).unwrap()
    }

    #[rstest]
    #[case::group_then_literal(
        "./pages/(auth)/login/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Group, "auth"),
            seg(SegmentKind::Static, "login").with_file(FileKind::Page),
        ]
    )]
    #[case::dynamic_joins_previous(
        "./pages/users/[id]/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Dynamic, "users/:id").with_file(FileKind::Page),
        ]
    )]
    #[case::catch_all(
        "./pages/blog/[...slug]/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Static, "blog"),
            seg(SegmentKind::CatchAll, "*").with_file(FileKind::Page),
        ]
    )]
    #[case::ignored_folder(
        "./pages/_internal/page.tsx",
        vec![RouteSegment::root().with_file(FileKind::Page)]
    )]
    #[case::index_group_folder(
        "./pages/(index)/layout.tsx",
        vec![RouteSegment::root().with_file(FileKind::Layout)]
    )]
    #[case::root_param_stands_alone(
        "./pages/[id]/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Dynamic, ":id").with_file(FileKind::Page),
        ]
    )]
    #[case::param_after_group_stands_alone(
        "./pages/(shop)/[id]/layout.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Group, "shop"),
            seg(SegmentKind::Dynamic, ":id").with_file(FileKind::Layout),
        ]
    )]
    #[case::nested_params(
        "./pages/shop/[category]/[item]/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Dynamic, "shop/:category/:item").with_file(FileKind::Page),
        ]
    )]
    #[case::param_after_catch_all(
        "./pages/docs/[...path]/[rev]/page.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Static, "docs"),
            seg(SegmentKind::CatchAll, "*"),
            seg(SegmentKind::Dynamic, ":rev").with_file(FileKind::Page),
        ]
    )]
    #[case::leading_slash_key(
        "/pages/page.tsx",
        vec![RouteSegment::root().with_file(FileKind::Page)]
    )]
    #[case::not_found_file(
        "./pages/dashboard/404.tsx",
        vec![
            RouteSegment::root(),
            seg(SegmentKind::Static, "dashboard").with_file(FileKind::NotFound),
        ]
    )]
    fn test_parse_route_segments(#[case] path: &str, #[case] expected: Vec<RouteSegment>) {
        assert_eq!(parse(path), expected);
    }

    #[test]
    fn test_optional_segment_policy() {
        let config = RoutingConfig::default().with_group_policy(GroupPolicy::OptionalSegment);
        let segments = parse_route_segments("./pages/(auth)/login/page.tsx", &config).unwrap();
        assert_eq!(
            segments,
            vec![
                RouteSegment::root(),
                seg(SegmentKind::Optional, "auth?"),
                seg(SegmentKind::Static, "login").with_file(FileKind::Page),
            ]
        );
    }

    #[test]
    fn test_optional_segment_accepts_param() {
        let config = RoutingConfig::default().with_group_policy(GroupPolicy::OptionalSegment);
        let segments = parse_route_segments("./pages/(lang)/[slug]/page.tsx", &config).unwrap();
        assert_eq!(segments[1], seg(SegmentKind::Dynamic, "lang?/:slug").with_file(FileKind::Page));
    }

    #[test]
    fn test_custom_pages_dir() {
        let config = RoutingConfig::default().with_pages_dir("src/app");
        let segments = parse_route_segments("./src/app/about/page.tsx", &config).unwrap();
        assert_eq!(segments[1].path, "about");
    }

    #[test]
    fn test_missing_file_component_overflows() {
        let err = parse_route_segments("./pages", &RoutingConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RouteTreeError::SegmentOverflow {
                file: "./pages".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognized_file_stem() {
        let err = parse_route_segments("./pages/users/profile.tsx", &RoutingConfig::default())
            .unwrap_err();
        assert!(matches!(err, RouteTreeError::UnrecognizedFile { .. }));
    }

    #[test]
    fn test_colocated_test_file_is_not_a_route() {
        let err = parse_route_segments("./pages/users/page.test.tsx", &RoutingConfig::default())
            .unwrap_err();
        assert!(matches!(err, RouteTreeError::UnrecognizedFile { .. }));
    }

    #[test]
    fn test_group_slot_is_pathless() {
        let segments = parse("./pages/(auth)/layout.tsx");
        assert_eq!(segments[1].slot(), Slot::Group("auth".to_string()));
    }
}
