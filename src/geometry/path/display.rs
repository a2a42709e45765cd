use std::fmt;
use std::io::Write;

use super::Path;
use crate::error::Result;
use crate::geometry::point::{Dim, PathPoint};

/// Decimal exponent from which coordinates switch to scientific notation.
const PLAIN_EXPONENT_LIMIT: i32 = 16;

impl Path {
    /// Writes the path in the `Path … EndPath` block grammar it is loaded
    /// from, with every point written at dimensionality `dim`.
    ///
    /// Coordinates are written in their shortest exact form, so the block
    /// loads back to the same vertices.
    ///
    /// # Errors
    ///
    /// Returns [`PolypathError::Io`](crate::error::PolypathError::Io) if the
    /// writer fails.
    pub fn write_block<W: Write>(&self, out: &mut W, dim: Dim) -> Result<()> {
        writeln!(out, "Path")?;
        writeln!(out, "   name={}", self.name().unwrap_or_default())?;
        for point in &self.points {
            writeln!(out, "   point={}", format_point(point, dim))?;
        }
        writeln!(out, "   closed={}", self.is_closed())?;
        writeln!(out, "EndPath")?;
        Ok(())
    }
}

/// Full state dump for debugging: vertices, flags, rotation, bounds, normal.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path")?;
        writeln!(f, "   name={}", self.name().unwrap_or("<unnamed>"))?;
        if let Some(lines) = self.lines {
            writeln!(f, "   lines={}..{}", lines.start, lines.end)?;
        }
        for point in &self.points {
            writeln!(f, "   point={point}")?;
        }
        match self.closed {
            Some(closed) => writeln!(f, "   closed={closed}")?,
            None => writeln!(f, "   closed=<unset>")?,
        }
        writeln!(f, "   tolerance={:e}", self.tolerance)?;
        match &self.rotation {
            Some(r) => {
                writeln!(f, "   rotated=true")?;
                let (theta, phi) = (r.theta(), r.phi());
                writeln!(f, "   theta={theta} (sin={}, cos={})", r.sin_theta(), r.cos_theta())?;
                writeln!(f, "   phi={phi} (sin={}, cos={})", r.sin_phi(), r.cos_phi())?;
                writeln!(f, "   spin180={}", r.is_spun())?;
            }
            None => writeln!(f, "   rotated=false")?,
        }
        if let Some(bb) = &self.bbox {
            write!(f, "   x=[{}, {}] y=[{}, {}]", bb.min.x, bb.max.x, bb.min.y, bb.max.y)?;
            if self.dim == Dim::Three {
                write!(f, " z=[{}, {}]", bb.min.z, bb.max.z)?;
            }
            writeln!(f)?;
        }
        match &self.normal {
            Some(n) => writeln!(f, "   normal=({},{},{})", n.x, n.y, n.z)?,
            None => writeln!(f, "   normal=none")?,
        }
        write!(f, "EndPath")
    }
}

fn format_point(point: &PathPoint, dim: Dim) -> String {
    let x = shortest(point.x());
    let y = shortest(point.y());
    match dim {
        Dim::Two => format!("({x},{y})"),
        Dim::Three => format!("({x},{y},{})", shortest(point.z())),
    }
}

/// Formats `value` with the fewest digits that parse back to the same
/// `f64`, in plain notation for moderate exponents and scientific notation
/// otherwise.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if (-5..PLAIN_EXPONENT_LIMIT).contains(&exponent) {
        value.to_string()
    } else {
        format!("{value:e}")
    }
}
