//! Segment parsing: bundler file path → ordered route segments

pub mod file;
pub mod parser;
pub mod pattern;

pub use file::FileKind;
pub use parser::{parse_route_segments, RouteSegment, SegmentKind};
pub use pattern::{classify_component, ComponentType};
