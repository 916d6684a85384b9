mod bounding_box;
mod summary;

pub use bounding_box::BoundingBox;
pub use summary::{RegionSummary, Summarize};
