use std::f64::consts::PI;

use super::{Point2, Point3};

/// Signed angle at `origin` from the line `origin → p1` to the line
/// `origin → p2`, normalized into `(-π, π]`.
///
/// Positive when `p2` lies counter-clockwise of `p1`.
#[must_use]
pub fn angle_between_two_lines_2d(origin: &Point2, p1: &Point2, p2: &Point2) -> f64 {
    let u = p1 - origin;
    let v = p2 - origin;
    let cross = u.x * v.y - v.x * u.y;
    let dot = u.dot(&v);
    normalize_angle(cross.atan2(dot))
}

/// Angle at `origin` between the lines `origin → p1` and `origin → p2`.
///
/// The cross product enters only through its norm, so the result is an
/// unsigned magnitude in `[0, π]`; there is no orientation in 3D.
#[must_use]
pub fn angle_between_two_lines_3d(origin: &Point3, p1: &Point3, p2: &Point3) -> f64 {
    let u = p1 - origin;
    let v = p2 - origin;
    normalize_angle(u.cross(&v).norm().atan2(u.dot(&v)))
}

/// True if segments `a0 → a1` and `b0 → b1` point the same way within
/// `tolerance` radians.
#[must_use]
pub fn are_parallel_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, tolerance: f64) -> bool {
    direction_angle_2d(a0, a1, b0, b1).abs() < tolerance
}

/// 3D form of [`are_parallel_2d`].
#[must_use]
pub fn are_parallel_3d(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3, tolerance: f64) -> bool {
    direction_angle_3d(a0, a1, b0, b1).abs() < tolerance
}

/// True if the segments are parallel or anti-parallel within `tolerance`.
#[must_use]
pub fn are_parallel_or_opposed_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> bool {
    let theta = direction_angle_2d(a0, a1, b0, b1).abs();
    theta < tolerance || theta > PI - tolerance
}

/// 3D form of [`are_parallel_or_opposed_2d`].
#[must_use]
pub fn are_parallel_or_opposed_3d(
    a0: &Point3,
    a1: &Point3,
    b0: &Point3,
    b1: &Point3,
    tolerance: f64,
) -> bool {
    let theta = direction_angle_3d(a0, a1, b0, b1);
    theta < tolerance || theta > PI - tolerance
}

fn direction_angle_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    angle_between_two_lines_2d(
        &Point2::origin(),
        &Point2::from(a1 - a0),
        &Point2::from(b1 - b0),
    )
}

fn direction_angle_3d(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3) -> f64 {
    angle_between_two_lines_3d(
        &Point3::origin(),
        &Point3::from(a1 - a0),
        &Point3::from(b1 - b0),
    )
}

fn normalize_angle(mut theta: f64) -> f64 {
    while theta > PI {
        theta -= 2.0 * PI;
    }
    while theta <= -PI {
        theta += 2.0 * PI;
    }
    theta
}
