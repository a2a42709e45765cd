pub mod bounds;
pub mod path;
pub mod point;
pub mod rotation;

pub use bounds::Aabb;
pub use path::{LineRange, Path};
pub use point::{Dim, PathPoint};
pub use rotation::CanonicalRotation;
