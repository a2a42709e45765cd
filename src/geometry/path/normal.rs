use std::f64::consts::FRAC_PI_2;

use super::Path;
use crate::error::{GeometryError, Result};
use crate::geometry::point::Dim;
use crate::math::angle::angle_between_two_lines_3d;
use crate::math::{Point3, Vector3};

impl Path {
    /// Computes the unit plane normal of a 3D path.
    ///
    /// The normal is the cross product of the two edges meeting at the vertex
    /// whose corner angle is closest to 90°, wrapping around the ends of a
    /// closed path. For a 2D path this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] for fewer than three vertices
    /// and [`GeometryError::Collinear`] if the chosen corner is degenerate.
    pub fn calculate_normal(&mut self) -> Result<()> {
        self.normal = None;
        if self.dim == Dim::Two {
            return Ok(());
        }

        let n = self.points.len();
        if n < 3 {
            return Err(GeometryError::TooFewPoints {
                required: 3,
                actual: n,
            }
            .into());
        }

        let pos = |i: usize| self.points[i].position;

        let mut corners: Vec<(usize, usize, usize)> =
            (1..n - 1).map(|i| (i - 1, i, i + 1)).collect();
        if self.is_closed() {
            corners.push((n - 1, 0, 1));
            corners.push((n - 2, n - 1, 0));
        }

        let mut best = corners[0];
        let mut smallest = f64::INFINITY;
        for &(prev, cur, next) in &corners {
            let theta = angle_between_two_lines_3d(&pos(cur), &pos(prev), &pos(next));
            let difference = (theta.abs() - FRAC_PI_2).abs();
            if difference < smallest {
                smallest = difference;
                best = (prev, cur, next);
            }
        }

        let (prev, cur, next) = best;
        let v = pos(prev) - pos(cur);
        let u = pos(next) - pos(cur);
        let normal = u.cross(&v);
        let magnitude = normal.norm();

        if magnitude <= self.tolerance * u.norm() * v.norm() {
            return Err(GeometryError::Collinear.into());
        }

        self.normal = Some(normal / magnitude);
        Ok(())
    }

    /// Perpendicular distance from a world point to the path's plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NoNormal`] if no normal has been computed and
    /// [`GeometryError::EmptyPath`] if the path has no vertices.
    pub fn distance_from_point(&self, point: &Point3) -> Result<f64> {
        let normal: &Vector3 = self.normal.as_ref().ok_or(GeometryError::NoNormal)?;
        let origin = self.points.first().ok_or(GeometryError::EmptyPath)?.position;
        let d = -normal.dot(&origin.coords);
        Ok((normal.dot(&point.coords) + d).abs())
    }
}
