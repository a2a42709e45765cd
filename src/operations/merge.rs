use tracing::debug;

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::{GeometryError, Result};
use crate::geometry::{Path, PathPoint};
use crate::store::{PathId, PathStore};

/// One open path taking part in a merge, and the direction to walk it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePart {
    pub id: PathId,
    pub reversed: bool,
}

impl MergePart {
    #[must_use]
    pub fn new(id: PathId, reversed: bool) -> Self {
        Self { id, reversed }
    }
}

/// Joins open paths end to end into one closed boundary.
///
/// Parts are walked in the given order and direction. A vertex equal to
/// the one just appended is skipped, and a final vertex equal to the first
/// is dropped since the result is closed. Fewer than three remaining
/// vertices, or any vertex still appearing twice, is an error.
pub struct MergePaths {
    parts: Vec<MergePart>,
    boundary_type: String,
    boundary_name: String,
}

impl MergePaths {
    /// Creates a new `MergePaths` operation. The result is named
    /// `boundary_name`; both names appear in diagnostics.
    #[must_use]
    pub fn new(
        parts: Vec<MergePart>,
        boundary_type: impl Into<String>,
        boundary_name: impl Into<String>,
    ) -> Self {
        Self {
            parts,
            boundary_type: boundary_type.into(),
            boundary_name: boundary_name.into(),
        }
    }

    /// Executes the merge, returning the new path without storing it, or
    /// `None` if fewer than two parts were given.
    ///
    /// # Errors
    ///
    /// - [`PathError::NotFound`](crate::error::PathError::NotFound) for an unknown part.
    /// - [`GeometryError::DimensionMismatch`] if the parts mix 2D and 3D.
    /// - [`PathError::Invalid`](crate::error::PathError::Invalid) after
    ///   reporting closed parts, a degenerate result or duplicate vertices to
    ///   `diagnostics`.
    pub fn execute(
        &self,
        store: &PathStore,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Path>> {
        if self.parts.len() < 2 {
            return Ok(None);
        }
        let mark = diagnostics.error_count();

        let sources = self
            .parts
            .iter()
            .map(|part| Ok((part, store.path(part.id)?)))
            .collect::<Result<Vec<_>>>()?;

        for (_, path) in &sources {
            if path.is_closed() {
                diagnostics.error(
                    DiagnosticCode::ClosedMergeMember,
                    path.start_line(),
                    format!(
                        "path \"{}\" must be open with \"closed\" set to \"false\" to be merged",
                        path.name().unwrap_or_default()
                    ),
                );
            }
        }
        diagnostics.ensure_no_errors_since(mark)?;

        let dim = sources[0].1.dim();
        if sources.iter().any(|(_, path)| path.dim() != dim) {
            return Err(GeometryError::DimensionMismatch.into());
        }
        let tolerance = sources[0].1.tolerance();

        let mut points: Vec<PathPoint> = Vec::new();
        for (part, path) in &sources {
            let walk: Vec<&PathPoint> = if part.reversed {
                path.points().iter().rev().collect()
            } else {
                path.points().iter().collect()
            };
            for point in walk {
                if !points.last().is_some_and(|last| point.point_compare(last, tolerance)) {
                    points.push(*point);
                }
            }
        }

        if points.len() > 1 && points[0].point_compare(&points[points.len() - 1], tolerance) {
            points.pop();
        }
        if points.len() < 3 {
            diagnostics.error(
                DiagnosticCode::DegenerateMergedPath,
                None,
                format!(
                    "merged path for {} {} has only {} distinct point(s)",
                    self.boundary_type,
                    self.boundary_name,
                    points.len()
                ),
            );
        }

        for (i, a) in points.iter().enumerate() {
            if points[i + 1..].iter().any(|b| a.point_compare(b, tolerance)) {
                diagnostics.error(
                    DiagnosticCode::DuplicateMergedVertex,
                    None,
                    format!(
                        "merged path for {} {} has duplicate point at {a}",
                        self.boundary_type, self.boundary_name
                    ),
                );
            }
        }
        diagnostics.ensure_no_errors_since(mark)?;

        let merged = Path::from_points(points, true)?
            .with_name(self.boundary_name.clone())
            .with_tolerance(tolerance);
        debug!(
            boundary = %self.boundary_name,
            parts = self.parts.len(),
            points = merged.len(),
            "merged paths"
        );
        Ok(Some(merged))
    }
}

/// Convenience wrapper for [`MergePaths`].
///
/// # Errors
///
/// See [`MergePaths::execute`].
pub fn merge_paths(
    store: &PathStore,
    parts: &[MergePart],
    boundary_type: &str,
    boundary_name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Path>> {
    MergePaths::new(parts.to_vec(), boundary_type, boundary_name).execute(store, diagnostics)
}
