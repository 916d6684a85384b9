mod polygon_offset;

pub use polygon_offset::{offset_inward, PolygonOffset};
