//! Construction errors for the route tree
//!
//! Every variant is fatal: a malformed pages directory must fail the
//! application start instead of producing a partial tree. Two modules
//! claiming one route are not an error; the tree keeps one and logs the
//! other.

use thiserror::Error;

/// Result alias used throughout the tree builder
pub type Result<T> = std::result::Result<T, RouteTreeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTreeError {
    /// Merge was asked to fold two nodes that do not occupy the same slot
    #[error("paths do not match: \"{target}\" and \"{incoming}\"")]
    PathMismatch { target: String, incoming: String },

    /// A post-processing walk could not find the next segment
    #[error(
        "segment \"{segment}\" does not exist among the children of route \"{parent}\" (required by {file})"
    )]
    MissingSegment {
        segment: String,
        parent: String,
        file: String,
    },

    /// The file path ran out of components before reaching a file name
    #[error("cannot exceed total number of segments in \"{file}\"")]
    SegmentOverflow { file: String },

    /// The file name is not one of `page`, `layout`, `error`, `404` or `loading`
    #[error("\"{file}\" is not a recognised route file")]
    UnrecognizedFile { file: String },
}
