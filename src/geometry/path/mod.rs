mod display;
mod normal;
mod query;
mod rotate;
mod subdivide;

use tracing::debug;

use super::bounds::Aabb;
use super::point::{Dim, PathPoint};
use super::rotation::CanonicalRotation;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::is_point_on_line_2d;
use crate::math::intersect_3d::is_point_on_line_3d;
use crate::math::polygon_2d::sum_of_angles;
use crate::math::{Point2, Point3, Vector3, DBL_TOLERANCE, ON_LINE_TOLERANCE};

/// Inclusive, 1-based range of input lines a path block was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

/// An ordered vertex list with an open/closed flag.
///
/// Vertex order defines adjacency and winding. The bounding box and, for 3D
/// paths, the plane normal are cached and refreshed whenever the vertex list
/// is rebuilt. A path is either in world coordinates or a canonical copy
/// rotated into a plane of constant z; only canonical copies answer
/// containment and intersection queries.
#[derive(Debug, Clone)]
pub struct Path {
    name: Option<String>,
    closed: Option<bool>,
    dim: Dim,
    points: Vec<PathPoint>,
    lines: Option<LineRange>,
    tolerance: f64,
    bbox: Option<Aabb>,
    normal: Option<Vector3>,
    rotation: Option<CanonicalRotation>,
}

impl Path {
    /// Creates an empty path of the given dimensionality.
    #[must_use]
    pub fn new(dim: Dim) -> Self {
        Self {
            name: None,
            closed: None,
            dim,
            points: Vec::new(),
            lines: None,
            tolerance: DBL_TOLERANCE,
            bbox: None,
            normal: None,
            rotation: None,
        }
    }

    /// Creates an empty path tied to an input block.
    #[must_use]
    pub fn for_block(dim: Dim, lines: LineRange) -> Self {
        Self {
            lines: Some(lines),
            ..Self::new(dim)
        }
    }

    /// Builds a path from a vertex list and computes its derived state.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] for no points and
    /// [`GeometryError::DimensionMismatch`] if the points mix 2D and 3D.
    pub fn from_points(points: Vec<PathPoint>, closed: bool) -> Result<Self> {
        let dim = points.first().ok_or(GeometryError::EmptyPath)?.dim;
        if points.iter().any(|p| p.dim != dim) {
            return Err(GeometryError::DimensionMismatch.into());
        }
        let mut path = Self::new(dim);
        path.points = points;
        path.closed = Some(closed);
        path.update_derived();
        Ok(path)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the comparison tolerance (default [`DBL_TOLERANCE`]).
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The closed flag, `false` when it was never set.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.unwrap_or(false)
    }

    /// Whether the closed flag was set at all.
    #[must_use]
    pub fn has_closed_flag(&self) -> bool {
        self.closed.is_some()
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = Some(closed);
    }

    #[must_use]
    pub fn dim(&self) -> Dim {
        self.dim
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn lines(&self) -> Option<LineRange> {
        self.lines
    }

    #[must_use]
    pub fn start_line(&self) -> Option<usize> {
        self.lines.map(|l| l.start)
    }

    #[must_use]
    pub fn end_line(&self) -> Option<usize> {
        self.lines.map(|l| l.end)
    }

    /// True if `line` lies within this path's input block.
    #[must_use]
    pub fn in_block(&self, line: usize) -> bool {
        self.lines.is_some_and(|l| l.contains(line))
    }

    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    #[must_use]
    pub fn start_point(&self) -> Option<&PathPoint> {
        self.points.first()
    }

    /// Where the path ends: the last vertex, or the first for a closed path.
    #[must_use]
    pub fn end_point(&self) -> Option<&PathPoint> {
        if self.is_closed() {
            self.points.first()
        } else {
            self.points.last()
        }
    }

    /// Appends a vertex without refreshing the derived state.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] if the point's
    /// dimensionality differs from the path's.
    pub fn push_point(&mut self, point: PathPoint) -> Result<()> {
        if point.dim != self.dim {
            return Err(GeometryError::DimensionMismatch.into());
        }
        self.points.push(point);
        Ok(())
    }

    pub fn pop_point(&mut self) -> Option<PathPoint> {
        self.points.pop()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<&Aabb> {
        self.bbox.as_ref()
    }

    /// Unit plane normal of a 3D path, once computed.
    #[must_use]
    pub fn normal(&self) -> Option<&Vector3> {
        self.normal.as_ref()
    }

    /// Rotation parameters of a canonical copy.
    #[must_use]
    pub fn rotation(&self) -> Option<&CanonicalRotation> {
        self.rotation.as_ref()
    }

    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation.is_some()
    }

    /// Relative comparison of vertex `index` against `point`.
    ///
    /// Each declared coordinate must agree to within `tolerance` relative to
    /// the vertex coordinate, or absolutely where the vertex coordinate is
    /// zero. An out-of-range index never matches.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn compare(&self, index: usize, point: &PathPoint) -> bool {
        let Some(vertex) = self.points.get(index) else {
            return false;
        };
        let close = |v: f64, t: f64| {
            if v == 0.0 {
                t.abs() <= self.tolerance
            } else {
                ((t - v) / v).abs() <= self.tolerance
            }
        };
        close(vertex.x(), point.x())
            && close(vertex.y(), point.y())
            && (self.dim == Dim::Two || close(vertex.z(), point.z()))
    }

    // --- Derived state ---

    /// Recomputes the axis-aligned bounding box from the current vertices.
    pub fn calculate_bounding_box(&mut self) {
        self.bbox = Aabb::from_points(self.points.iter().map(|p| &p.position));
    }

    /// Refreshes the bounding box and, for 3D paths, tries the normal.
    ///
    /// A path whose normal cannot be determined keeps `normal() == None`;
    /// anything depending on it then fails with [`GeometryError::NoNormal`].
    pub(crate) fn update_derived(&mut self) {
        self.calculate_bounding_box();
        if let Err(err) = self.calculate_normal() {
            debug!(name = self.name(), %err, "no plane normal");
        }
    }

    /// Index of the edge that contains both `a` and `b`, the closing edge
    /// included when the path is closed.
    ///
    /// Membership uses [`ON_LINE_TOLERANCE`]; 3D paths test in 3D.
    #[must_use]
    pub fn segment_on_line(&self, a: &PathPoint, b: &PathPoint) -> Option<usize> {
        self.edges().position(|(p1, p2)| match self.dim {
            Dim::Two => {
                let (s1, s2) = (p1.xy(), p2.xy());
                is_point_on_line_2d(&a.xy(), &s1, &s2, ON_LINE_TOLERANCE)
                    && is_point_on_line_2d(&b.xy(), &s1, &s2, ON_LINE_TOLERANCE)
            }
            Dim::Three => {
                let (s1, s2) = (&p1.position, &p2.position);
                is_point_on_line_3d(&a.position, s1, s2, ON_LINE_TOLERANCE)
                    && is_point_on_line_3d(&b.position, s1, s2, ON_LINE_TOLERANCE)
            }
        })
    }

    /// Winding sum of the XY projection around `point`.
    #[must_use]
    pub fn sum_of_angles(&self, point: &Point2) -> f64 {
        let vertices: Vec<Point2> = self.points.iter().map(PathPoint::xy).collect();
        sum_of_angles(point, &vertices, self.is_closed())
    }

    /// Number of edges: `n` when closed, `n - 1` when open.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.is_closed() {
            n
        } else {
            n - 1
        }
    }

    /// Consecutive vertex pairs, ending with the closing edge when closed.
    pub fn edges(&self) -> impl Iterator<Item = (&PathPoint, &PathPoint)> + '_ {
        let n = self.points.len();
        (0..self.edge_count()).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    // --- Validation ---

    /// Structural validation after loading.
    ///
    /// Pushes one diagnostic per problem: missing name, missing closed flag,
    /// no points, a single point, or a closed path of two points.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`](crate::error::PathError::Invalid) if any
    /// problem was found.
    pub fn check(&self, diagnostics: &mut Diagnostics) -> Result<()> {
        let mark = diagnostics.error_count();
        let line = self.start_line();
        let at = describe_block(line);

        if self.name.is_none() {
            let message = format!("{at} must specify a name");
            diagnostics.error(DiagnosticCode::MissingName, line, message);
        }
        if self.closed.is_none() {
            let message = format!("{at} must specify \"closed\"");
            diagnostics.error(DiagnosticCode::MissingClosed, line, message);
        }
        match self.points.len() {
            0 => diagnostics.error(
                DiagnosticCode::MissingPoints,
                line,
                format!("{at} must specify points"),
            ),
            1 => diagnostics.error(
                DiagnosticCode::SinglePoint,
                line,
                format!("{at} must specify more than one point"),
            ),
            2 if self.is_closed() => diagnostics.error(
                DiagnosticCode::ClosedWithTwoPoints,
                line,
                format!("{at} cannot be closed with just two points"),
            ),
            _ => {}
        }

        diagnostics.ensure_no_errors_since(mark)?;
        Ok(())
    }

    /// Checks every vertex against the mesh extent `lower_left..upper_right`
    /// widened by `tolerance`, reporting each vertex outside it.
    ///
    /// The z bounds apply to 3D paths only.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`](crate::error::PathError::Invalid) if any
    /// vertex lies outside.
    pub fn check_bounding_box(
        &self,
        lower_left: &Point3,
        upper_right: &Point3,
        tolerance: f64,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let mark = diagnostics.error_count();
        let at = describe_block(self.start_line());
        let outside = |t: f64, lo: f64, hi: f64| t < lo - tolerance || t > hi + tolerance;

        for point in &self.points {
            let mut fail = outside(point.x(), lower_left.x, upper_right.x)
                || outside(point.y(), lower_left.y, upper_right.y);
            if point.dim == Dim::Three {
                fail |= outside(point.z(), lower_left.z, upper_right.z);
            }
            if fail {
                diagnostics.error(
                    DiagnosticCode::OutsideMeshBounds,
                    self.start_line(),
                    format!("{at} has point {point} outside of the mesh bounding box"),
                );
            }
        }

        diagnostics.ensure_no_errors_since(mark)?;
        Ok(())
    }
}

fn describe_block(line: Option<usize>) -> String {
    match line {
        Some(line) => format!("path block at line {line}"),
        None => "path".to_owned(),
    }
}
