/// Lazy iterator over a route directory and its ancestors
///
/// For directory `/(auth)/login/settings`, yields:
/// `/(auth)/login/settings` → `/(auth)/login` → `/(auth)` → `/`
///
/// Used by loading-fallback resolution to find the nearest enclosing
/// route-group folder without allocating intermediate strings.
///
/// # Examples
///
/// ```
/// use pagetree::path::DirAncestors;
///
/// let dirs: Vec<&str> = DirAncestors::new("/(auth)/login").collect();
/// assert_eq!(dirs, vec!["/(auth)/login", "/(auth)", "/"]);
/// ```
#[derive(Debug, Clone)]
pub struct DirAncestors<'a> {
    current: Option<&'a str>,
}

impl<'a> DirAncestors<'a> {
    /// Starts the walk at `dir` (yielded first)
    pub fn new(dir: &'a str) -> Self {
        Self { current: Some(dir) }
    }
}

impl<'a> Iterator for DirAncestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current == "/" {
            None
        } else {
            match current.rfind('/') {
                Some(0) => Some("/"),
                Some(slash_pos) => Some(&current[..slash_pos]),
                None => None,
            }
        };

        Some(current)
    }
}

/// Returns the folder name at the end of a route directory
///
/// ```
/// use pagetree::path::hierarchy::dir_name;
///
/// assert_eq!(dir_name("/(auth)/login"), "login");
/// assert_eq!(dir_name("/"), "");
/// ```
pub fn dir_name(dir: &str) -> &str {
    dir.rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_ancestors() {
        let dirs: Vec<&str> = DirAncestors::new("/a/b/c").collect();
        assert_eq!(dirs, vec!["/a/b/c", "/a/b", "/a", "/"]);

        let dirs: Vec<&str> = DirAncestors::new("/").collect();
        assert_eq!(dirs, vec!["/"]);
    }

    #[test]
    fn test_dir_ancestors_short_circuit() {
        let found = DirAncestors::new("/(shop)/cart/[id]")
            .skip(1)
            .find(|dir| dir_name(dir).starts_with('('));
        assert_eq!(found, Some("/(shop)"));
    }

    #[test]
    fn test_dir_name_group() {
        assert_eq!(dir_name("/(marketing)"), "(marketing)");
    }
}
