use super::angle::angle_between_two_lines_2d;
use super::Point2;

/// Sum of the signed angles subtended at `point` by consecutive vertices.
///
/// For a closed polygon the closing edge is included and the sum is `±2π`
/// when `point` is enclosed and near zero otherwise. Empty or single-vertex
/// input yields zero.
#[must_use]
pub fn sum_of_angles(point: &Point2, vertices: &[Point2], closed: bool) -> f64 {
    let open: f64 = vertices
        .windows(2)
        .map(|w| angle_between_two_lines_2d(point, &w[0], &w[1]))
        .sum();

    match (closed, vertices.first(), vertices.last()) {
        (true, Some(first), Some(last)) if vertices.len() > 1 => {
            open + angle_between_two_lines_2d(point, last, first)
        }
        _ => open,
    }
}
