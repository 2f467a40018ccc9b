//! Path utilities for bundler file paths
//!
//! The bundler hands over keys such as `./pages/(auth)/login/page.tsx`.
//! Windows checkouts and hand-written inputs add backslashes and doubled
//! separators, so every path goes through [`normalize_file_path`] before the
//! segment parser sees it.
//!
//! All functions are **pure**: same input, same output, no side effects.

use std::borrow::Cow;

pub mod hierarchy;
pub use hierarchy::DirAncestors;

/// Checks whether a file path is already in canonical form
///
/// # Rules
///
/// - Must not be empty
/// - Must not contain `\` or `//`
/// - Must not end with `/`
///
/// A leading `./` or `/` is allowed; both are common bundler key shapes.
///
/// # Examples
///
/// ```
/// use pagetree::path::is_canonical_file_path;
///
/// assert!(is_canonical_file_path("./pages/page.tsx"));
/// assert!(is_canonical_file_path("/pages/users/[id]/page.tsx"));
///
/// assert!(!is_canonical_file_path(""));
/// assert!(!is_canonical_file_path("pages//page.tsx"));
/// assert!(!is_canonical_file_path("pages\\page.tsx"));
/// assert!(!is_canonical_file_path("pages/users/"));
/// ```
pub fn is_canonical_file_path(path: &str) -> bool {
    !path.is_empty() && !path.contains("//") && !path.contains('\\') && !path.ends_with('/')
}

/// Normalizes a file path to forward slashes without empty components
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// # Examples
///
/// ```
/// use pagetree::path::normalize_file_path;
/// use std::borrow::Cow;
///
/// let path = normalize_file_path("./pages/page.tsx");
/// assert!(matches!(path, Cow::Borrowed("./pages/page.tsx")));
///
/// assert_eq!(normalize_file_path(".\\pages\\about\\page.tsx"), "./pages/about/page.tsx");
/// assert_eq!(normalize_file_path("/pages//blog/page.tsx"), "/pages/blog/page.tsx");
/// ```
pub fn normalize_file_path(path: &str) -> Cow<'_, str> {
    if is_canonical_file_path(path) {
        return Cow::Borrowed(path);
    }

    let forward = path.replace('\\', "/");
    let joined = forward
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if forward.starts_with('/') {
        Cow::Owned(format!("/{}", joined))
    } else {
        Cow::Owned(joined)
    }
}

/// Strips everything up to and including the pages root
///
/// The pages root may span several components (`src/pages`). When it does
/// not occur in the path, the path is taken as already relative to it.
/// Leading `.` components are dropped.
///
/// # Examples
///
/// ```
/// use pagetree::path::strip_pages_root;
///
/// assert_eq!(strip_pages_root("./pages/(auth)/login/page.tsx", "pages"), "(auth)/login/page.tsx");
/// assert_eq!(strip_pages_root("/pages/page.tsx", "pages"), "page.tsx");
/// assert_eq!(strip_pages_root("./src/pages/blog/page.tsx", "src/pages"), "blog/page.tsx");
/// assert_eq!(strip_pages_root("./about/page.tsx", "pages"), "about/page.tsx");
/// ```
pub fn strip_pages_root(file_path: &str, pages_dir: &str) -> String {
    let normalized = normalize_file_path(file_path);
    let components: Vec<&str> = normalized.split('/').filter(|c| !c.is_empty()).collect();
    let root: Vec<&str> = pages_dir
        .split(['/', '\\'])
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();

    let start = if root.is_empty() {
        None
    } else {
        components
            .windows(root.len())
            .position(|window| window == root.as_slice())
    };

    let rest = match start {
        Some(pos) => &components[pos + root.len()..],
        None => &components[..],
    };

    rest.iter()
        .skip_while(|c| **c == ".")
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the directory of a file relative to the pages root
///
/// Directories are rooted at `/`, so they can be walked with [`DirAncestors`].
///
/// # Examples
///
/// ```
/// use pagetree::path::route_dir;
///
/// assert_eq!(route_dir("./pages/page.tsx", "pages"), "/");
/// assert_eq!(route_dir("./pages/(auth)/login/page.tsx", "pages"), "/(auth)/login");
/// ```
pub fn route_dir(file_path: &str, pages_dir: &str) -> String {
    let relative = strip_pages_root(file_path, pages_dir);
    match relative.rsplit_once('/') {
        Some((dir, _)) => format!("/{}", dir),
        None => "/".to_string(),
    }
}

/// Returns the last component of a file path (the file name)
pub fn file_name(file_path: &str) -> &str {
    file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
}

/// Returns the file name with only its final extension removed
///
/// Mirrors [`std::path::Path::file_stem`]: `page.test.tsx` has the stem
/// `page.test`, and a leading dot is part of the name.
///
/// ```
/// use pagetree::path::file_stem;
///
/// assert_eq!(file_stem("./pages/users/page.tsx"), "page");
/// assert_eq!(file_stem("./pages/users/page.test.tsx"), "page.test");
/// assert_eq!(file_stem("./pages/.page"), ".page");
/// ```
pub fn file_stem(file_path: &str) -> &str {
    let name = file_name(file_path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
