//! Route file kinds recognised by their file stem
//!
//! The stem is the file name without its final extension, so `page.tsx`
//! and `page.jsx` are pages while `page.test.tsx` (stem `page.test`) is not.
//! Matching is exact and case-sensitive: `Page.tsx` and `my-page.tsx` are
//! not route files either.

use crate::node::PageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    /// `page.*`
    Page,
    /// `layout.*`
    Layout,
    /// `error.*` - error boundary
    Error,
    /// `404.*` - not-found page
    NotFound,
    /// `loading.*` - pending fallback
    Loading,
}

impl FileKind {
    /// Every kind, in scan order
    pub const ALL: [FileKind; 5] = [
        FileKind::Page,
        FileKind::Layout,
        FileKind::Error,
        FileKind::NotFound,
        FileKind::Loading,
    ];

    /// Classifies a file stem
    ///
    /// ```
    /// use pagetree::FileKind;
    ///
    /// assert_eq!(FileKind::from_stem("layout"), Some(FileKind::Layout));
    /// assert_eq!(FileKind::from_stem("404"), Some(FileKind::NotFound));
    /// assert_eq!(FileKind::from_stem("Page"), None);
    /// ```
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "page" => Some(FileKind::Page),
            "layout" => Some(FileKind::Layout),
            "error" => Some(FileKind::Error),
            "404" => Some(FileKind::NotFound),
            "loading" => Some(FileKind::Loading),
            _ => None,
        }
    }

    /// Classifies a file path by the stem of its last component
    ///
    /// ```
    /// use pagetree::FileKind;
    ///
    /// assert_eq!(FileKind::from_path("./pages/users/page.tsx"), Some(FileKind::Page));
    /// assert_eq!(FileKind::from_path("./pages/not-an-error.tsx"), None);
    /// assert_eq!(FileKind::from_path("./pages/users/page.test.tsx"), None);
    /// ```
    pub fn from_path(file_path: &str) -> Option<Self> {
        Self::from_stem(crate::path::file_stem(file_path))
    }

    /// The file stem for this kind
    pub fn stem(self) -> &'static str {
        match self {
            FileKind::Page => "page",
            FileKind::Layout => "layout",
            FileKind::Error => "error",
            FileKind::NotFound => "404",
            FileKind::Loading => "loading",
        }
    }

    /// Page type carried in the node handle, for files that build nodes
    pub fn page_type(self) -> Option<PageType> {
        match self {
            FileKind::Page => Some(PageType::Page),
            FileKind::Layout => Some(PageType::Layout),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}
