pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Relative area below which a boolean fragment is treated as numerical noise.
///
/// Multiplied by the area of the reference outline before use.
pub const SLIVER_RATIO: f64 = 1e-9;
