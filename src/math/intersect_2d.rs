use super::angle::angle_between_two_lines_2d;
use super::compare::{compare_xy, double_compare};
use super::Point2;

/// Checks whether `test` falls on the segment `p1 → p2`.
///
/// The ends count as on the line. Elsewhere the test point must lie at the
/// same angle from `p1` as `p2` does, with a projection error no larger than
/// `tolerance` times the segment length, and no farther from `p1` than `p2`.
#[must_use]
pub fn is_point_on_line_2d(test: &Point2, p1: &Point2, p2: &Point2, tolerance: f64) -> bool {
    if compare_xy(test, p1, tolerance) || compare_xy(test, p2, tolerance) {
        return true;
    }

    let length = (p2 - p1).norm();
    let length_t = (test - p1).norm();

    let theta = angle_between_two_lines_2d(
        &Point2::origin(),
        &Point2::from(p2 - p1),
        &Point2::from(test - p1),
    );
    if theta.abs() > tolerance {
        return false;
    }
    if (theta.sin() * length_t).abs() > tolerance * length {
        return false;
    }
    length_t <= length + tolerance * length
}

/// Like [`is_point_on_line_2d`], but false at either end of the segment.
#[must_use]
pub fn is_point_on_line_not_ends_2d(
    test: &Point2,
    p1: &Point2,
    p2: &Point2,
    tolerance: f64,
) -> bool {
    if compare_xy(test, p1, tolerance) || compare_xy(test, p2, tolerance) {
        return false;
    }
    is_point_on_line_2d(test, p1, p2, tolerance)
}

/// True only if segments `a` and `b` cross in their interiors.
///
/// Identical (or reversed identical) segments, segments touching at an end,
/// and collinear overlapping segments do not count as intersecting.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn do_intersect(a: (&Point2, &Point2), b: (&Point2, &Point2), tolerance: f64) -> bool {
    let (a1, a2) = a;
    let (b1, b2) = b;

    if compare_xy(a1, b1, tolerance) && compare_xy(a2, b2, tolerance) {
        return false;
    }
    if compare_xy(a1, b2, tolerance) && compare_xy(a2, b1, tolerance) {
        return false;
    }

    // far apart
    if a1.x.max(a2.x) < b1.x.min(b2.x) + tolerance {
        return false;
    }
    if a1.x.min(a2.x) > b1.x.max(b2.x) - tolerance {
        return false;
    }
    if a1.y.max(a2.y) < b1.y.min(b2.y) + tolerance {
        return false;
    }
    if a1.y.min(a2.y) > b1.y.max(b2.y) - tolerance {
        return false;
    }

    match (a1.x == a2.x, b1.x == b2.x) {
        // both vertical: at most a collinear overlap
        (true, true) => false,
        (true, false) => crosses_vertical(a1, a2, b1, b2, tolerance),
        (false, true) => crosses_vertical(b1, b2, a1, a2, tolerance),
        (false, false) => {
            let m = (a2.y - a1.y) / (a2.x - a1.x);
            let c = a1.y - m * a1.x;
            let mt = (b2.y - b1.y) / (b2.x - b1.x);
            let ct = b1.y - mt * b1.x;

            if double_compare(m, mt, tolerance) {
                return false;
            }

            let x = (ct - c) / (m - mt);
            if [a1.x, a2.x, b1.x, b2.x]
                .iter()
                .any(|&end| double_compare(x, end, tolerance))
            {
                return false;
            }
            strictly_between(x, a1.x, a2.x) && strictly_between(x, b1.x, b2.x)
        }
    }
}

/// Crossing test for a vertical segment `v1 → v2` against a non-vertical one.
fn crosses_vertical(v1: &Point2, v2: &Point2, s1: &Point2, s2: &Point2, tolerance: f64) -> bool {
    let x = v1.x;
    if double_compare(x, s1.x, tolerance) || double_compare(x, s2.x, tolerance) {
        return false;
    }
    if !strictly_between(x, s1.x, s2.x) {
        return false;
    }
    let m = (s2.y - s1.y) / (s2.x - s1.x);
    let y = s1.y + m * (x - s1.x);
    if double_compare(y, v1.y, tolerance) || double_compare(y, v2.y, tolerance) {
        return false;
    }
    strictly_between(y, v1.y, v2.y)
}

fn strictly_between(t: f64, t1: f64, t2: f64) -> bool {
    t > t1.min(t2) && t < t1.max(t2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-8 / 9.0;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    // ── is_point_on_line_2d ──

    /// `on` must be accepted; everything in `off_line` and `beyond` rejected.
    fn check_line(a: Point2, b: Point2, on: Point2, off_line: &[Point2], beyond: &[Point2]) {
        assert!(is_point_on_line_2d(&on, &a, &b, TOL), "{on:?} on {a:?}-{b:?}");
        for q in off_line.iter().chain(beyond) {
            assert!(!is_point_on_line_2d(q, &a, &b, TOL), "{q:?} off {a:?}-{b:?}");
        }
    }

    #[test]
    fn on_diagonal_line() {
        let (a, b) = (p(1.0, 1.0), p(10.0, 10.0));
        check_line(
            a,
            b,
            p(2.0, 2.0),
            &[p(2.0, 3.0), p(3.0, 2.0), p(2.0 + 1e-7, 2.0), p(2.0 - 1e-7, 2.0)],
            &[p(-2.0, -2.0), p(11.0, 11.0)],
        );
        assert!(is_point_on_line_2d(&p(1.0 - 1e-10, 1.0 - 1e-9), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(10.0 + 1e-10, 10.0 + 1e-9), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(2.0, 2.0 + 1e-10), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(2.0, 2.0 - 1e-10), &a, &b, TOL));
    }

    #[test]
    fn on_descending_line() {
        let (a, b) = (p(1.0, -1.0), p(10.0, -10.0));
        check_line(
            a,
            b,
            p(2.0, -2.0),
            &[p(2.0, -3.0), p(3.0, -2.0), p(2.0 + 1e-7, -2.0)],
            &[p(-2.0, 2.0), p(11.0, -11.0)],
        );
        assert!(is_point_on_line_2d(&p(2.0, -2.0 + 1e-10), &a, &b, TOL));
    }

    #[test]
    fn on_horizontal_line() {
        let (a, b) = (p(-1.0, 0.0), p(-10.0, 0.0));
        check_line(
            a,
            b,
            p(-2.0, 0.0),
            &[p(-2.0, 2.0), p(-2.0, 1e-7), p(-2.0, -1e7)],
            &[p(-11.0, -11.0), p(1.0, 0.0)],
        );
        assert!(is_point_on_line_2d(&p(-1.0 + 1e-10, 0.0), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(-10.0 - 1e-10, 0.0), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(-2.0, 1e-10), &a, &b, TOL));
    }

    #[test]
    fn on_vertical_line() {
        let (a, b) = (p(0.0, 1.0), p(0.0, 10.0));
        check_line(
            a,
            b,
            p(0.0, 2.0),
            &[p(2.0, 2.0), p(1e-7, 2.0), p(-1e7, 2.0)],
            &[p(0.0, 11.0)],
        );
        assert!(is_point_on_line_2d(&p(0.0, 1.0 - 1e-10), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(1e-10, 2.0), &a, &b, TOL));
        assert!(is_point_on_line_2d(&p(-1e-10, 2.0), &a, &b, TOL));
    }

    #[test]
    fn not_ends() {
        let (a, b) = (p(0.0, 0.0), p(4.0, 0.0));
        assert!(!is_point_on_line_not_ends_2d(&a, &a, &b, TOL));
        assert!(!is_point_on_line_not_ends_2d(&b, &a, &b, TOL));
        assert!(is_point_on_line_not_ends_2d(&p(1.0, 0.0), &a, &b, TOL));
    }

    // ── do_intersect ──

    #[test]
    fn crossing_diagonals() {
        assert!(do_intersect(
            (&p(0.0, 0.0), &p(2.0, 2.0)),
            (&p(0.0, 2.0), &p(2.0, 0.0)),
            1e-11
        ));
    }

    #[test]
    fn crossing_reversed_directions() {
        assert!(do_intersect(
            (&p(2.0, 2.0), &p(0.0, 0.0)),
            (&p(2.0, 0.0), &p(0.0, 2.0)),
            1e-11
        ));
    }

    #[test]
    fn identical_segments_do_not_intersect() {
        let (a, b) = (p(0.0, 0.0), p(1.0, 3.0));
        assert!(!do_intersect((&a, &b), (&a, &b), 1e-11));
        assert!(!do_intersect((&a, &b), (&b, &a), 1e-11));
    }

    #[test]
    fn shared_endpoint_does_not_intersect() {
        assert!(!do_intersect(
            (&p(0.0, 0.0), &p(2.0, 2.0)),
            (&p(2.0, 2.0), &p(4.0, 0.0)),
            1e-11
        ));
    }

    #[test]
    fn t_junction_does_not_intersect() {
        assert!(!do_intersect(
            (&p(0.0, 0.0), &p(4.0, 4.0)),
            (&p(2.0, 2.0), &p(4.0, 0.0)),
            1e-11
        ));
    }

    #[test]
    fn collinear_overlap_does_not_intersect() {
        assert!(!do_intersect(
            (&p(0.0, 0.0), &p(2.0, 1.0)),
            (&p(1.0, 0.5), &p(3.0, 1.5)),
            1e-11
        ));
    }

    #[test]
    fn vertical_against_sloped() {
        assert!(do_intersect(
            (&p(1.0, 0.0), &p(1.0, 4.0)),
            (&p(0.0, 1.0), &p(2.0, 3.0)),
            1e-11
        ));
        assert!(do_intersect(
            (&p(0.0, 1.0), &p(2.0, 3.0)),
            (&p(1.0, 4.0), &p(1.0, 0.0)),
            1e-11
        ));
    }

    #[test]
    fn vertical_with_overlapping_boxes_but_no_crossing() {
        // the sloped segment passes above the top of the vertical one
        assert!(!do_intersect(
            (&p(1.0, 0.0), &p(1.0, 10.0)),
            (&p(0.0, 9.0), &p(2.0, 20.0)),
            1e-11
        ));
    }

    #[test]
    fn both_vertical_never_intersect() {
        assert!(!do_intersect(
            (&p(1.0, 0.0), &p(1.0, 4.0)),
            (&p(1.0, 2.0), &p(1.0, 6.0)),
            1e-11
        ));
    }

    #[test]
    fn disjoint_boxes() {
        assert!(!do_intersect(
            (&p(0.0, 0.0), &p(1.0, 1.0)),
            (&p(2.0, 0.0), &p(3.0, 1.0)),
            1e-11
        ));
    }
}
