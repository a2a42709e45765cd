pub mod angle;
pub mod compare;
pub mod intersect_2d;
pub mod intersect_3d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix, used for the canonical-frame rotation.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Default tolerance of a path and of point comparisons.
pub const DBL_TOLERANCE: f64 = 1e-11;

/// Tolerance for treating two points as the same vertex.
pub const CLOSE_POINT_TOLERANCE: f64 = 1e-12;

/// Tolerance for segment membership during subdivision.
pub const ON_LINE_TOLERANCE: f64 = 1e-8;

/// Angular tolerance for two edges to count as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Largest out-of-plane deviation, relative to the path extent, accepted
/// when rotating a 3D path into its canonical frame.
pub const PLANARITY_TOLERANCE: f64 = 1e-8;
