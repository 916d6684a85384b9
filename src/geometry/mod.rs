pub mod convert;
mod interior;
mod polygon;
mod rectangle;
mod region;

pub use interior::interior_point;
pub use polygon::{Aabb, Polygon, Winding};
pub use rectangle::Rectangle;
pub use region::{Region, RegionKind, Section};
