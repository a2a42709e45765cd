use std::fmt;

use crate::math::compare::double_compare;
use crate::math::{Point2, Point3, CLOSE_POINT_TOLERANCE};

/// Dimensionality of a path and of the points it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    Two,
    Three,
}

impl Dim {
    /// Number of coordinates a point of this dimensionality carries.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.count())
    }
}

/// A path vertex: a position plus the dimensionality it was declared with.
///
/// 2D points are stored with `z = 0` so every point can be rotated and
/// compared with the same 3D machinery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub position: Point3,
    pub dim: Dim,
}

impl PathPoint {
    /// Creates a 2D point.
    #[must_use]
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self {
            position: Point3::new(x, y, 0.0),
            dim: Dim::Two,
        }
    }

    /// Creates a 3D point.
    #[must_use]
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            dim: Dim::Three,
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Projection onto the XY plane.
    #[must_use]
    pub fn xy(&self) -> Point2 {
        Point2::new(self.position.x, self.position.y)
    }

    /// Same dimensionality and every declared coordinate equal within
    /// `tolerance`.
    #[must_use]
    pub fn point_compare(&self, other: &Self, tolerance: f64) -> bool {
        self.dim == other.dim && self.coordinates_match(other, tolerance)
    }

    /// Coordinates equal within [`CLOSE_POINT_TOLERANCE`], ignoring the
    /// dimensionality tag of `other`.
    #[must_use]
    pub fn is_close_point(&self, other: &Self) -> bool {
        self.coordinates_match(other, CLOSE_POINT_TOLERANCE)
    }

    /// Euclidean distance over the declared coordinates.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        match self.dim {
            Dim::Two => (self.xy() - other.xy()).norm(),
            Dim::Three => (self.position - other.position).norm(),
        }
    }

    fn coordinates_match(&self, other: &Self, tolerance: f64) -> bool {
        double_compare(self.x(), other.x(), tolerance)
            && double_compare(self.y(), other.y(), tolerance)
            && (self.dim == Dim::Two || double_compare(self.z(), other.z(), tolerance))
    }
}

impl fmt::Display for PathPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dim {
            Dim::Two => write!(f, "({},{})", self.x(), self.y()),
            Dim::Three => write!(f, "({},{},{})", self.x(), self.y(), self.z()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn compare_requires_same_dim() {
        let a = PathPoint::new_2d(1.0, 2.0);
        let b = PathPoint::new_3d(1.0, 2.0, 0.0);
        assert!(!a.point_compare(&b, 1e-11));
        assert!(a.point_compare(&PathPoint::new_2d(1.0, 2.0 + 1e-13), 1e-11));
    }

    #[test]
    fn compare_ignores_z_in_2d() {
        let mut a = PathPoint::new_2d(1.0, 2.0);
        let b = PathPoint::new_2d(1.0, 2.0);
        a.position.z = 5.0;
        assert!(a.point_compare(&b, 1e-11));
    }

    #[test]
    fn close_point_is_tighter() {
        let a = PathPoint::new_3d(1.0, 1.0, 1.0);
        assert!(a.is_close_point(&PathPoint::new_3d(1.0, 1.0, 1.0 + 1e-13)));
        assert!(!a.is_close_point(&PathPoint::new_3d(1.0, 1.0, 1.0 + 1e-11)));
    }

    #[test]
    fn distance_by_dim() {
        let a = PathPoint::new_2d(0.0, 0.0);
        let b = PathPoint::new_2d(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);

        let c = PathPoint::new_3d(1.0, 2.0, 2.0);
        assert_relative_eq!(PathPoint::new_3d(0.0, 0.0, 0.0).distance(&c), 3.0);
    }

    #[test]
    fn display_matches_input_syntax() {
        assert_eq!(PathPoint::new_2d(1.5, -2.0).to_string(), "(1.5,-2)");
        assert_eq!(PathPoint::new_3d(0.0, 1.0, 2.0).to_string(), "(0,1,2)");
    }
}
