use tracing::debug;

use super::Path;
use crate::geometry::point::{Dim, PathPoint};
use crate::math::angle::{are_parallel_or_opposed_2d, are_parallel_or_opposed_3d};
use crate::math::intersect_2d::is_point_on_line_not_ends_2d;
use crate::math::intersect_3d::is_point_on_line_not_ends_3d;
use crate::math::{ON_LINE_TOLERANCE, PARALLEL_TOLERANCE};

impl Path {
    /// Splits this path's edges wherever an edge of `test` ends part-way
    /// along one of them on a collinear overlap, working in the XY plane.
    ///
    /// Crossing edges are left alone. Returns whether any vertex was
    /// inserted; the vertex list is only replaced in that case.
    pub fn subdivide_2d(&mut self, test: &Path) -> bool {
        self.subdivide(test, Dim::Two)
    }

    /// [`subdivide_2d`](Self::subdivide_2d) with full 3D collinearity tests.
    pub fn subdivide_3d(&mut self, test: &Path) -> bool {
        self.subdivide(test, Dim::Three)
    }

    fn subdivide(&mut self, test: &Path, dim: Dim) -> bool {
        let Some(&first) = self.points.first() else {
            return false;
        };
        if test.points.is_empty() {
            return false;
        }

        let mut rebuilt = Vec::with_capacity(self.points.len() + 2 * test.points.len());
        rebuilt.push(first);
        let mut inserted = 0;

        for (a, b) in self.edges() {
            let mut splits: Vec<PathPoint> = Vec::new();
            for (t1, t2) in test.edges() {
                if !collinear_pair(dim, a, b, t1, t2) {
                    continue;
                }
                splits.extend([t1, t2].into_iter().filter(|t| strictly_on(dim, t, a, b)).copied());
            }

            if !splits.is_empty() {
                splits.sort_by(|p, q| a.distance(p).total_cmp(&a.distance(q)));
                let mut last = *a;
                for split in splits {
                    if !split.is_close_point(&last) {
                        rebuilt.push(split);
                        last = split;
                        inserted += 1;
                    }
                }
            }
            rebuilt.push(*b);
        }

        if inserted == 0 {
            return false;
        }
        // the closing edge brought the first vertex back around
        if self.is_closed() {
            rebuilt.pop();
        }

        debug!(name = self.name(), other = test.name(), inserted, "subdivided path");
        self.points = rebuilt;
        self.update_derived();
        true
    }
}

fn collinear_pair(dim: Dim, a: &PathPoint, b: &PathPoint, t1: &PathPoint, t2: &PathPoint) -> bool {
    match dim {
        Dim::Two => {
            are_parallel_or_opposed_2d(&t1.xy(), &t2.xy(), &a.xy(), &b.xy(), PARALLEL_TOLERANCE)
        }
        Dim::Three => are_parallel_or_opposed_3d(
            &t1.position,
            &t2.position,
            &a.position,
            &b.position,
            PARALLEL_TOLERANCE,
        ),
    }
}

fn strictly_on(dim: Dim, test: &PathPoint, a: &PathPoint, b: &PathPoint) -> bool {
    match dim {
        Dim::Two => is_point_on_line_not_ends_2d(&test.xy(), &a.xy(), &b.xy(), ON_LINE_TOLERANCE),
        Dim::Three => is_point_on_line_not_ends_3d(
            &test.position,
            &a.position,
            &b.position,
            ON_LINE_TOLERANCE,
        ),
    }
}
