use tracing::{debug, warn};

use super::Path;
use crate::error::{GeometryError, Result};
use crate::geometry::bounds::Aabb;
use crate::geometry::point::Dim;
use crate::geometry::rotation::CanonicalRotation;
use crate::math::compare::double_compare;
use crate::math::{Point3, PLANARITY_TOLERANCE};

impl Path {
    /// Returns a canonical copy of this path, rotated so its plane is
    /// perpendicular to the z-axis.
    ///
    /// A 2D path already lies in `z = 0`, so its canonical copy uses the
    /// identity rotation. The source path is left untouched.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::AlreadyCanonical`] if this path is itself a canonical copy.
    /// - [`GeometryError::NoNormal`] if a 3D path has no computed normal.
    /// - [`GeometryError::NonPlanar`] if a vertex lies clearly off the plane.
    pub fn rotate_to_xy_plane(&self) -> Result<Path> {
        if self.is_rotated() {
            warn!(name = self.name(), "rotation requested on a canonical path");
            return Err(GeometryError::AlreadyCanonical.into());
        }

        let rotation = match self.dim {
            Dim::Two => CanonicalRotation::identity(),
            Dim::Three => {
                let normal = self.normal.as_ref().ok_or(GeometryError::NoNormal)?;
                CanonicalRotation::from_normal(normal)
            }
        };
        debug!(
            name = self.name(),
            theta = rotation.theta(),
            phi = rotation.phi(),
            "rotating to canonical frame"
        );

        let mut rotated = self.clone();
        for point in &mut rotated.points {
            point.position = rotation.apply(&point.position, false);
        }
        rotated.rotation = Some(rotation);
        rotated.update_derived();
        rotated.check_planarity()?;
        Ok(rotated)
    }

    /// Maps a world point into this canonical path's frame.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`] if this path is not rotated.
    pub fn rotate_point(&self, point: &Point3) -> Result<Point3> {
        self.rotate_point_spin(point, false)
    }

    /// Like [`rotate_point`](Self::rotate_point), optionally adding a half
    /// turn about the y-axis to match a frame facing the other way.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`] if this path is not rotated.
    pub fn rotate_point_spin(&self, point: &Point3, spin180: bool) -> Result<Point3> {
        let rotation = self.rotation.as_ref().ok_or(GeometryError::NotCanonical)?;
        Ok(rotation.apply(point, spin180))
    }

    /// Rotates this path's own vertices with the rotation of the canonical
    /// path `other`, in place.
    ///
    /// The stored rotation includes the half turn when `spin180` is set, so
    /// [`rotate_point`](Self::rotate_point) maps world points into the same
    /// frame as the vertices. Does nothing if this path is already rotated.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotCanonical`] if `other` is not rotated.
    pub fn rotate_to_path(&mut self, other: &Path, spin180: bool) -> Result<()> {
        let rotation = other
            .rotation
            .as_ref()
            .ok_or(GeometryError::NotCanonical)?
            .spun(spin180);
        if self.is_rotated() {
            return Ok(());
        }
        for point in &mut self.points {
            point.position = rotation.apply(&point.position, false);
        }
        self.rotation = Some(rotation);
        self.update_derived();
        Ok(())
    }

    /// After rotation every vertex should share the first vertex's z.
    fn check_planarity(&self) -> Result<()> {
        let Some(first) = self.points.first() else {
            return Ok(());
        };
        let z0 = first.z();
        let extent = self
            .bbox
            .as_ref()
            .map_or(0.0, Aabb::extent)
            .max(1.0);

        for point in &self.points[1..] {
            let deviation = (point.z() - z0).abs();
            if deviation > PLANARITY_TOLERANCE * extent {
                return Err(GeometryError::NonPlanar { deviation }.into());
            }
            if !double_compare(point.z(), z0, self.tolerance) {
                warn!(name = self.name(), deviation, "path is slightly non-planar");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::super::tests::{p2, p3, square_2d};
    use super::*;
    use crate::error::PolypathError;

    fn plane_y3() -> Path {
        Path::from_points(
            vec![p3(0.0, 3.0, 0.0), p3(2.0, 3.0, 0.0), p3(2.0, 3.0, 2.0), p3(0.0, 3.0, 2.0)],
            true,
        )
        .unwrap()
    }

    #[test]
    fn two_d_uses_identity() {
        let path = square_2d();
        let rotated = path.rotate_to_xy_plane().unwrap();
        assert!(rotated.is_rotated());
        assert!(!path.is_rotated());
        assert_eq!(rotated.points(), path.points());
        assert_abs_diff_eq!(rotated.rotation().unwrap().theta(), 0.0);
    }

    #[test]
    fn rotated_copy_is_flat() {
        let path = plane_y3();
        let rotated = path.rotate_to_xy_plane().unwrap();
        let z0 = rotated.points()[0].z();
        assert_abs_diff_eq!(z0.abs(), 3.0, epsilon = 1e-14);
        for p in rotated.points() {
            assert_abs_diff_eq!(p.z(), z0, epsilon = 1e-14);
        }
        let n = rotated.normal().unwrap();
        assert_abs_diff_eq!(n.z.abs(), 1.0, epsilon = 1e-14);
        // source untouched
        assert_eq!(path.points()[1], p3(2.0, 3.0, 0.0));
    }

    #[test]
    fn rotating_twice_is_an_error() {
        let rotated = square_2d().rotate_to_xy_plane().unwrap();
        assert!(matches!(
            rotated.rotate_to_xy_plane(),
            Err(PolypathError::Geometry(GeometryError::AlreadyCanonical))
        ));
    }

    #[test]
    fn missing_normal_is_an_error() {
        let collinear = Path::from_points(
            vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0), p3(2.0, 0.0, 0.0)],
            false,
        )
        .unwrap();
        assert!(matches!(
            collinear.rotate_to_xy_plane(),
            Err(PolypathError::Geometry(GeometryError::NoNormal))
        ));
    }

    #[test]
    fn warped_path_is_rejected() {
        let warped = Path::from_points(
            vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0), p3(1.0, 1.0, 0.0), p3(0.0, 1.0, 0.5)],
            true,
        )
        .unwrap();
        assert!(matches!(
            warped.rotate_to_xy_plane(),
            Err(PolypathError::Geometry(GeometryError::NonPlanar { .. }))
        ));
    }

    #[test]
    fn rotate_point_matches_vertices() {
        let path = plane_y3();
        let rotated = path.rotate_to_xy_plane().unwrap();
        for (world, canonical) in path.points().iter().zip(rotated.points()) {
            let q = rotated.rotate_point(&world.position).unwrap();
            assert_abs_diff_eq!(q, canonical.position, epsilon = 1e-14);
        }
    }

    #[test]
    fn rotate_point_needs_canonical_path() {
        assert!(matches!(
            plane_y3().rotate_point(&Point3::origin()),
            Err(PolypathError::Geometry(GeometryError::NotCanonical))
        ));
    }

    #[test]
    fn rotate_to_path_follows_other_frame() {
        let reference = plane_y3().rotate_to_xy_plane().unwrap();
        let mut other = Path::from_points(
            vec![p3(0.5, 3.0, 0.5), p3(1.5, 3.0, 0.5), p3(1.0, 3.0, 1.5)],
            true,
        )
        .unwrap();
        other.rotate_to_path(&reference, false).unwrap();
        assert!(other.is_rotated());
        let z = reference.points()[0].z();
        for p in other.points() {
            assert_abs_diff_eq!(p.z(), z, epsilon = 1e-14);
        }

        // already rotated: left alone
        let before = other.points().to_vec();
        other.rotate_to_path(&reference, true).unwrap();
        assert_eq!(other.points(), &before[..]);
    }

    #[test]
    fn spun_rotate_to_path_keeps_queries_in_frame() {
        let reference = plane_y3().rotate_to_xy_plane().unwrap();
        let mut tri = Path::from_points(
            vec![p3(0.5, 3.0, 0.5), p3(1.5, 3.0, 0.5), p3(1.0, 3.0, 1.5)],
            true,
        )
        .unwrap();
        tri.rotate_to_path(&reference, true).unwrap();
        assert!(tri.rotation().unwrap().is_spun());

        // normal follows the vertices into the canonical frame
        let n = tri.normal().unwrap();
        assert_abs_diff_eq!(n.z.abs(), 1.0, epsilon = 1e-14);

        // world points land on the stored vertices
        let world = p3(0.5, 3.0, 0.5);
        let q = tri.rotate_point(&world.position).unwrap();
        assert_abs_diff_eq!(q, tri.points()[0].position, epsilon = 1e-14);

        let centroid = Point3::new(1.0, 3.0, 2.5 / 3.0);
        assert!(tri.is_point_inside(&centroid).unwrap());
        assert!(tri.is_point_interior(&centroid).unwrap());
        assert!(tri.is_point_inside(&world.position).unwrap());
        assert!(!tri.is_point_inside(&Point3::new(1.8, 3.0, 0.6)).unwrap());
    }

    #[test]
    fn rotate_to_path_needs_canonical_reference() {
        let mut a = square_2d();
        let b = Path::from_points(vec![p2(0.0, 0.0), p2(2.0, 0.0), p2(0.0, 2.0)], true).unwrap();
        assert!(matches!(
            a.rotate_to_path(&b, false),
            Err(PolypathError::Geometry(GeometryError::NotCanonical))
        ));
    }
}
