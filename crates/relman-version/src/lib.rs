mod scheme;
mod segment;

pub use scheme::VersioningScheme;
pub use segment::{Segment, SegmentValue, Segments};
