use tracing::debug;

use super::field::{FieldKind, Limits, ScalarField};
use super::{token_pair, LineSource};
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::Result;
use crate::geometry::{Dim, LineRange, Path};

/// Settings for reading path blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Dimensionality every `point=` line must have.
    pub dimension: Dim,
    /// Range each point coordinate must fall in.
    pub point_limits: Limits,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            dimension: Dim::Two,
            point_limits: Limits::new(-100.0, 100.0),
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_dimension(mut self, dimension: Dim) -> Self {
        self.dimension = dimension;
        self
    }
}

impl Path {
    /// Reads the body of the block spanning `lines`, whose first and last
    /// lines are the `Path`/`EndPath` delimiters.
    ///
    /// Every line must carry exactly one of `name=`, `point=` or `closed=`.
    /// All problems are pushed into `diagnostics` before returning. The
    /// bounding box and, for 3D, the normal are computed from whatever
    /// points loaded.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`](crate::error::PathError::Invalid) if any
    /// line was rejected, and an input error if `source` lacks a line.
    pub fn load<S: LineSource + ?Sized>(
        source: &S,
        lines: LineRange,
        options: &LoadOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<Path> {
        let mark = diagnostics.error_count();
        let mut path = Path::for_block(options.dimension, lines);
        let mut name = ScalarField::new(FieldKind::Text, "name");
        let mut closed = ScalarField::new(FieldKind::Bool, "closed");

        let mut number = source.next_line_number(lines.start);
        let stop = source.previous_line_number(lines.end).unwrap_or(lines.start);
        while let Some(n) = number.filter(|&n| n <= stop) {
            let (token, value) = token_pair(source.line(n)?);
            let mut recognized = 0;

            if name.matches(token) {
                recognized += 1;
                name.load(token, value, n, diagnostics);
            }

            if token == "point" {
                recognized += 1;
                let mut point = ScalarField::new(FieldKind::Point(options.dimension), "point")
                    .with_limits(options.point_limits);
                if point.load(token, value, n, diagnostics) {
                    if let Some(p) = point.as_point() {
                        path.push_point(p)?;
                    }
                }
            }

            if closed.matches(token) {
                recognized += 1;
                closed.load(token, value, n, diagnostics);
            }

            if recognized != 1 {
                diagnostics.error(
                    DiagnosticCode::UnrecognizedKeyword,
                    Some(n),
                    format!("unrecognized keyword \"{token}\" at line {n}"),
                );
            }
            number = source.next_line_number(n);
        }

        if let Some(text) = name.as_text() {
            path.set_name(text);
        }
        if let Some(flag) = closed.as_bool() {
            path.set_closed(flag);
        }
        path.update_derived();
        debug!(name = path.name(), points = path.len(), start = lines.start, "loaded path block");

        diagnostics.ensure_no_errors_since(mark)?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::{PathError, PolypathError};
    use crate::geometry::PathPoint;
    use crate::input::InputFile;
    use crate::math::Vector3;

    fn load_first(text: &str, options: &LoadOptions, diags: &mut Diagnostics) -> Result<Path> {
        let file = InputFile::from_text(text);
        let block = file.find_blocks("Path", "EndPath").unwrap()[0];
        Path::load(&file, block, options, diags)
    }

    #[test]
    fn loads_a_2d_block() {
        let text = concat!(
            "Path\n   name=outer\n   point=(0,0)\n   point=(1,0)\n\n",
            "   // apex\n   point=(0,1)\n   closed=true\nEndPath\n",
        );
        let mut diags = Diagnostics::new();
        let path = load_first(text, &LoadOptions::default(), &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(path.name(), Some("outer"));
        assert!(path.is_closed());
        assert_eq!(path.len(), 3);
        assert_eq!(path.points()[2], PathPoint::new_2d(0.0, 1.0));
        assert_eq!(path.lines(), Some(LineRange::new(1, 9)));
        assert!(path.bounding_box().is_some());
        assert!(path.check(&mut diags).is_ok());
    }

    #[test]
    fn loads_a_3d_block_with_normal() {
        let text = concat!(
            "Path\n name=wall\n point=(0,3,0)\n point=(2,3,0)\n point=(2,3,2)\n",
            " closed=false\nEndPath",
        );
        let options = LoadOptions::default().with_dimension(Dim::Three);
        let mut diags = Diagnostics::new();
        let path = load_first(text, &options, &mut diags).unwrap();
        assert_eq!(path.dim(), Dim::Three);
        let n = path.normal().unwrap();
        assert_abs_diff_eq!(n.y.abs(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(Vector3::new(n.x, 0.0, n.z), Vector3::zeros(), epsilon = 1e-15);
    }

    #[test]
    fn reports_every_problem() {
        let text = concat!(
            "Path\n name=a\n name=b\n point=(0,0,0)\n point=(500,0)\n",
            " colour=red\n closed=maybe\nEndPath",
        );
        let mut diags = Diagnostics::new();
        let err = load_first(text, &LoadOptions::default(), &mut diags).unwrap_err();
        assert!(matches!(err, PolypathError::Path(PathError::Invalid { errors: 5 })));
        let codes: Vec<_> = diags.iter().map(|d| (d.code, d.line)).collect();
        assert_eq!(
            codes,
            vec![
                (DiagnosticCode::DuplicateEntry, Some(3)),
                (DiagnosticCode::InvalidValue, Some(4)),
                (DiagnosticCode::AboveUpperLimit, Some(5)),
                (DiagnosticCode::UnrecognizedKeyword, Some(6)),
                (DiagnosticCode::InvalidValue, Some(7)),
            ]
        );
    }

    #[test]
    fn written_block_loads_back() {
        let text = concat!(
            "Path\n name=tilted\n point=(0.1,0.2,0.3)\n",
            " point=(1.0000000000000002,0.2,0.3)\n point=(0.1,1.5,-0.7)\n",
            " closed=true\nEndPath",
        );
        let options = LoadOptions::default().with_dimension(Dim::Three);
        let mut diags = Diagnostics::new();
        let path = load_first(text, &options, &mut diags).unwrap();

        let mut out = Vec::new();
        path.write_block(&mut out, Dim::Three).unwrap();
        let again = load_first(&String::from_utf8(out).unwrap(), &options, &mut diags).unwrap();
        assert_eq!(again.name(), Some("tilted"));
        assert!(again.is_closed());
        for (a, b) in path.points().iter().zip(again.points()) {
            assert!(a.point_compare(b, 1e-15));
        }
    }

    #[test]
    fn inexact_coordinates_load_back_exactly() {
        let path = Path::from_points(
            vec![
                PathPoint::new_2d(0.1 + 0.2, 1e-20),
                PathPoint::new_2d(1.0 / 3.0, 2.0 / 3.0),
                PathPoint::new_2d(-(2.0_f64.sqrt()), 99.1),
            ],
            true,
        )
        .unwrap()
        .with_name("exact");

        let mut out = Vec::new();
        path.write_block(&mut out, Dim::Two).unwrap();
        let mut diags = Diagnostics::new();
        let text = String::from_utf8(out).unwrap();
        let again = load_first(&text, &LoadOptions::default(), &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(again.points(), path.points());
    }
}
