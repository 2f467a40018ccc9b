//! Folder-name classification
//!
//! Pure functional parsing of one folder name into the role it plays in the
//! route tree. All functions are **pure**: same input → same output.

/// Prefix that hides an organisational folder from the URL
pub const IGNORE_PREFIX: char = '_';

/// Folder prefix for index groups, dropped like `_` folders
pub const INDEX_GROUP_MARKER: &str = "(index)";

/// Marker inside brackets that turns a parameter into a catch-all
pub const CATCH_ALL_MARKER: &str = "...";

/// Role of a single folder component
///
/// # Examples
///
/// ```
/// use pagetree::segment::pattern::{classify_component, ComponentType};
///
/// assert_eq!(classify_component("users"), ComponentType::Static("users".to_string()));
/// assert_eq!(classify_component("[id]"), ComponentType::Dynamic("id".to_string()));
/// assert_eq!(classify_component("[...slug]"), ComponentType::CatchAll);
/// assert_eq!(classify_component("(auth)"), ComponentType::Group("auth".to_string()));
/// assert_eq!(classify_component("_components"), ComponentType::Ignored);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentType {
    /// `_private`, `(index)` - dropped from the URL
    Ignored,
    /// `.` - collapses into the root
    Root,
    /// `(name)` - route group
    Group(String),
    /// `[...name]` or `[[...name]]` - matches any remaining suffix
    CatchAll,
    /// `[name]` or `[[name]]`
    Dynamic(String),
    /// Any other folder name
    Static(String),
}

/// Classifies a folder name (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. **Ignored**: starts with `_` or with `(index)`
/// 2. **Root**: exactly `.`
/// 3. **Group**: wrapped in `(` `)`
/// 4. **Catch-all**: wrapped in `[` `]` and containing `...`
/// 5. **Dynamic**: wrapped in `[` `]`
/// 6. **Static**: anything else
pub fn classify_component(component: &str) -> ComponentType {
    if component.starts_with(IGNORE_PREFIX) || component.starts_with(INDEX_GROUP_MARKER) {
        return ComponentType::Ignored;
    }

    if component == "." {
        return ComponentType::Root;
    }

    if let Some(name) = component
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        return ComponentType::Group(name.to_string());
    }

    match component.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) if inner.contains(CATCH_ALL_MARKER) => ComponentType::CatchAll,
        Some(inner) => ComponentType::Dynamic(inner.trim_matches(['[', ']']).to_string()),
        None => ComponentType::Static(component.to_string()),
    }
}

/// Whether a folder name is a route group, `(name)`
pub fn is_group_component(component: &str) -> bool {
    matches!(classify_component(component), ComponentType::Group(_))
}
