use std::f64::consts::TAU;

use super::Path;
use crate::error::Result;
use crate::geometry::point::Dim;
use crate::math::compare::{double_compare, is_bound_by};
use crate::math::intersect_2d::{do_intersect, is_point_on_line_2d};
use crate::math::{Point2, Point3};

/// Where a canonical-frame test point sits relative to the path.
enum Placement {
    Outside,
    OnEdge,
    Enclosed,
}

impl Path {
    /// Boundary-inclusive containment of a world point.
    ///
    /// The point is mapped into this canonical path's frame first. Points on
    /// an edge count as inside. The plane test accepts a z matching any
    /// vertex; 2D paths skip it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`](crate::error::GeometryError::NotCanonical)
    /// if this path has not been rotated.
    pub fn is_point_inside(&self, point: &Point3) -> Result<bool> {
        let test = self.rotate_point(point)?;
        if self.points.is_empty() {
            return Ok(false);
        }
        if self.dim == Dim::Three
            && !self
                .points
                .iter()
                .any(|p| double_compare(p.z(), test.z, self.tolerance))
        {
            return Ok(false);
        }
        Ok(!matches!(self.place(&test.xy()), Placement::Outside))
    }

    /// Boundary-exclusive containment of a world point.
    ///
    /// Same as [`is_point_inside`](Self::is_point_inside) except that points
    /// on an edge are rejected and the plane test only looks at the first
    /// vertex's z.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`](crate::error::GeometryError::NotCanonical)
    /// if this path has not been rotated.
    pub fn is_point_interior(&self, point: &Point3) -> Result<bool> {
        let test = self.rotate_point(point)?;
        let Some(first) = self.points.first() else {
            return Ok(false);
        };
        if self.dim == Dim::Three && !double_compare(first.z(), test.z, self.tolerance) {
            return Ok(false);
        }
        Ok(matches!(self.place(&test.xy()), Placement::Enclosed))
    }

    /// True if the world segment `start → end` crosses an edge of this path
    /// in the interior of both.
    ///
    /// Only segments lying in the path's plane are considered; anything else
    /// reports no crossing.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`](crate::error::GeometryError::NotCanonical)
    /// if this path has not been rotated.
    pub fn does_line_intersect(&self, start: &Point3, end: &Point3) -> Result<bool> {
        let a = self.rotate_point(start)?;
        let b = self.rotate_point(end)?;
        let Some(first) = self.points.first() else {
            return Ok(false);
        };
        let on_plane = |z: f64| double_compare(first.z(), z, self.tolerance);
        if self.dim == Dim::Three && !(on_plane(a.z) && on_plane(b.z)) {
            return Ok(false);
        }

        let (a, b) = (a.xy(), b.xy());
        Ok(self
            .edges()
            .any(|(p1, p2)| do_intersect((&p1.xy(), &p2.xy()), (&a, &b), self.tolerance)))
    }

    /// True if any edge of `other` crosses an edge of this path.
    ///
    /// `other` is in world coordinates; its closing edge takes part when it
    /// is closed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`](crate::error::GeometryError::NotCanonical)
    /// if this path has not been rotated.
    pub fn is_path_overlap(&self, other: &Path) -> Result<bool> {
        for (a, b) in other.edges() {
            if self.does_line_intersect(&a.position, &b.position)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True if every vertex of `other` is inside this path and no edge of
    /// `other` crosses this path's boundary.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`](crate::error::GeometryError::NotCanonical)
    /// if this path has not been rotated.
    pub fn is_path_inside(&self, other: &Path) -> Result<bool> {
        for point in other.points() {
            if !self.is_point_inside(&point.position)? {
                return Ok(false);
            }
        }
        Ok(!self.is_path_overlap(other)?)
    }

    /// Classifies a canonical-frame point already known to be on the plane.
    fn place(&self, test: &Point2) -> Placement {
        let Some(bbox) = &self.bbox else {
            return Placement::Outside;
        };
        let tol = self.tolerance;
        if !is_bound_by(test.x, bbox.min.x, bbox.max.x, tol)
            || !is_bound_by(test.y, bbox.min.y, bbox.max.y, tol)
        {
            return Placement::Outside;
        }

        if self
            .edges()
            .any(|(p1, p2)| is_point_on_line_2d(test, &p1.xy(), &p2.xy(), tol))
        {
            return Placement::OnEdge;
        }

        let winding = self.sum_of_angles(test);
        if double_compare(winding, TAU, tol) || double_compare(winding, -TAU, tol) {
            Placement::Enclosed
        } else {
            Placement::Outside
        }
    }
}
