use super::angle::angle_between_two_lines_3d;
use super::compare::compare_xyz;
use super::Point3;

/// Checks whether `test` falls on the segment `p1 → p2` in 3D.
///
/// Same acceptance rules as [`super::intersect_2d::is_point_on_line_2d`],
/// with the unsigned 3D angle.
#[must_use]
pub fn is_point_on_line_3d(test: &Point3, p1: &Point3, p2: &Point3, tolerance: f64) -> bool {
    if compare_xyz(test, p1, tolerance) || compare_xyz(test, p2, tolerance) {
        return true;
    }

    let length = (p2 - p1).norm();
    let length_t = (test - p1).norm();

    let theta = angle_between_two_lines_3d(
        &Point3::origin(),
        &Point3::from(p2 - p1),
        &Point3::from(test - p1),
    );
    if theta.abs() > tolerance {
        return false;
    }
    if (theta.sin() * length_t).abs() > tolerance * length {
        return false;
    }
    length_t <= length + tolerance * length
}

/// Like [`is_point_on_line_3d`], but false at either end of the segment.
#[must_use]
pub fn is_point_on_line_not_ends_3d(
    test: &Point3,
    p1: &Point3,
    p2: &Point3,
    tolerance: f64,
) -> bool {
    if compare_xyz(test, p1, tolerance) || compare_xyz(test, p2, tolerance) {
        return false;
    }
    is_point_on_line_3d(test, p1, p2, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-8 / 9.0;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn on_space_diagonal() {
        let (a, b) = (p(1.0, 1.0, 1.0), p(10.0, 10.0, 10.0));
        assert!(is_point_on_line_3d(&p(2.0, 2.0, 2.0), &a, &b, TOL));
        assert!(is_point_on_line_3d(&p(5.5, 5.5, 5.5), &a, &b, TOL));
        assert!(is_point_on_line_3d(&p(1.0 - 1e-10, 1.0, 1.0), &a, &b, TOL));
        assert!(is_point_on_line_3d(&p(2.0, 2.0, 2.0 + 1e-10), &a, &b, TOL));
    }

    #[test]
    fn off_space_diagonal() {
        let (a, b) = (p(1.0, 1.0, 1.0), p(10.0, 10.0, 10.0));
        assert!(!is_point_on_line_3d(&p(2.0, 2.0, 3.0), &a, &b, TOL));
        assert!(!is_point_on_line_3d(&p(2.0, 2.0, 2.0 + 1e-7), &a, &b, TOL));
        assert!(!is_point_on_line_3d(&p(-2.0, -2.0, -2.0), &a, &b, TOL));
        assert!(!is_point_on_line_3d(&p(11.0, 11.0, 11.0), &a, &b, TOL));
    }

    #[test]
    fn along_z_axis() {
        let (a, b) = (p(0.0, 0.0, -1.0), p(0.0, 0.0, -10.0));
        assert!(is_point_on_line_3d(&p(0.0, 0.0, -2.0), &a, &b, TOL));
        assert!(!is_point_on_line_3d(&p(1e-7, 0.0, -2.0), &a, &b, TOL));
        assert!(!is_point_on_line_3d(&p(0.0, 0.0, 1.0), &a, &b, TOL));
    }

    #[test]
    fn not_ends() {
        let (a, b) = (p(0.0, 0.0, 0.0), p(0.0, 3.0, 3.0));
        assert!(!is_point_on_line_not_ends_3d(&a, &a, &b, TOL));
        assert!(!is_point_on_line_not_ends_3d(&b, &a, &b, TOL));
        assert!(is_point_on_line_not_ends_3d(&p(0.0, 1.0, 1.0), &a, &b, TOL));
    }
}
