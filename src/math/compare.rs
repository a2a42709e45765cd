use super::{Point2, Point3};

/// Compares two values with a tolerance that is absolute near zero and
/// relative (to `a`) elsewhere.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn double_compare(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if diff < tolerance {
        return true;
    }
    if a == 0.0 {
        return false;
    }
    diff / a.abs() < tolerance
}

/// Coordinate-wise [`double_compare`] in the XY plane.
#[must_use]
pub fn compare_xy(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    double_compare(a.x, b.x, tolerance) && double_compare(a.y, b.y, tolerance)
}

/// Coordinate-wise [`double_compare`] in 3D.
#[must_use]
pub fn compare_xyz(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    double_compare(a.x, b.x, tolerance)
        && double_compare(a.y, b.y, tolerance)
        && double_compare(a.z, b.z, tolerance)
}

/// Inclusive range test `t1 <= t <= t2`, widened by `tolerance`, for either
/// ordering of the bounds.
#[must_use]
pub fn is_bound_by(t: f64, t1: f64, t2: f64, tolerance: f64) -> bool {
    let (lo, hi) = if t2 > t1 { (t1, t2) } else { (t2, t1) };
    t >= lo - tolerance && t <= hi + tolerance
}
