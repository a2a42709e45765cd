use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::geometry::point::{Dim, PathPoint};
use crate::math::DBL_TOLERANCE;

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    Int,
    Real,
    /// A coordinate tuple of the given dimensionality.
    Point(Dim),
}

/// A parsed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Real(f64),
    Point(PathPoint),
}

/// Inclusive numeric range for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub lower: f64,
    pub upper: f64,
}

impl Limits {
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// One `keyword=value` entry of an input block.
///
/// A field loads at most once. Each problem found while loading is pushed
/// as a diagnostic carrying the offending line.
#[derive(Debug, Clone)]
pub struct ScalarField {
    aliases: Vec<String>,
    kind: FieldKind,
    keyword: String,
    raw: String,
    line: Option<usize>,
    value: Option<FieldValue>,
    limits: Option<Limits>,
    positive_required: bool,
    non_negative_required: bool,
    tolerance: f64,
}

impl ScalarField {
    /// A field of `kind` matched by `alias`, with no limits.
    #[must_use]
    pub fn new(kind: FieldKind, alias: impl Into<String>) -> Self {
        Self {
            aliases: vec![alias.into()],
            kind,
            keyword: String::new(),
            raw: String::new(),
            line: None,
            value: None,
            limits: None,
            positive_required: false,
            non_negative_required: false,
            tolerance: DBL_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Enables the lower/upper limit check.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    #[must_use]
    pub fn positive_required(mut self) -> Self {
        self.positive_required = true;
        self
    }

    #[must_use]
    pub fn non_negative_required(mut self) -> Self {
        self.non_negative_required = true;
        self
    }

    /// Relative slack for real limits and comparisons.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// True if `token` is one of this field's aliases.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a == token)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// The keyword as written on the loaded line.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The unparsed value text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Line the value was loaded from.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Some(FieldValue::Bool(b)) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Some(FieldValue::Int(i)) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self.value {
            Some(FieldValue::Real(r)) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<PathPoint> {
        match self.value {
            Some(FieldValue::Point(p)) => Some(p),
            _ => None,
        }
    }

    // --- Loading ---

    /// Loads `value` according to the field's kind.
    ///
    /// Returns `true` if the value was accepted.
    pub fn load(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        match self.kind {
            FieldKind::Text => self.load_text(token, value, line, diagnostics),
            FieldKind::Bool => self.load_bool(token, value, line, diagnostics),
            FieldKind::Int => self.load_int(token, value, line, diagnostics),
            FieldKind::Real => self.load_real(token, value, line, diagnostics),
            FieldKind::Point(dim) => self.load_point(dim, token, value, line, diagnostics),
        }
    }

    /// Loads free text.
    pub fn load_text(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        self.accept(token, value, line, Some(FieldValue::Text(value.to_owned())), diagnostics)
    }

    /// Loads exactly `true` or `false`.
    pub fn load_bool(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let parsed = match value {
            "true" => Some(FieldValue::Bool(true)),
            "false" => Some(FieldValue::Bool(false)),
            _ => None,
        };
        self.accept(token, value, line, parsed, diagnostics)
    }

    /// Loads a signed integer.
    pub fn load_int(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let parsed = value.parse::<i64>().ok().map(FieldValue::Int);
        self.accept(token, value, line, parsed, diagnostics)
    }

    /// Loads a finite real number.
    pub fn load_real(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let parsed = parse_real(value).map(FieldValue::Real);
        self.accept(token, value, line, parsed, diagnostics)
    }

    /// Loads a `(x,y)` or `(x,y,z)` tuple whose arity must match `dim`.
    pub fn load_point(
        &mut self,
        dim: Dim,
        token: &str,
        value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let parsed = parse_point(value, dim).map(FieldValue::Point);
        self.accept(token, value, line, parsed, diagnostics)
    }

    /// Shared tail of the loaders: duplicate check, parse result, limits.
    fn accept(
        &mut self,
        token: &str,
        value: &str,
        line: usize,
        parsed: Option<FieldValue>,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if self.is_loaded() {
            let previous = self.line.map_or_else(|| "?".to_owned(), |l| l.to_string());
            diagnostics.error(
                DiagnosticCode::DuplicateEntry,
                Some(line),
                format!("duplicate entry at line {line} for previous entry at line {previous}"),
            );
            return false;
        }

        let Some(parsed) = parsed else {
            diagnostics.error(
                DiagnosticCode::InvalidValue,
                Some(line),
                format!("{token} value at line {line} is invalid"),
            );
            return false;
        };

        if let Some(code) = self.limit_check(&parsed) {
            let message = match code {
                DiagnosticCode::PositiveRequired => {
                    format!("{token} at line {line} is required to be positive")
                }
                DiagnosticCode::NonNegativeRequired => {
                    format!("{token} at line {line} is required to be non-negative")
                }
                DiagnosticCode::BelowLowerLimit => format!(
                    "{token} at line {line} is required to be >= {}",
                    self.limits.map_or(f64::NEG_INFINITY, |l| l.lower)
                ),
                _ => format!(
                    "{token} at line {line} is required to be <= {}",
                    self.limits.map_or(f64::INFINITY, |l| l.upper)
                ),
            };
            diagnostics.error(code, Some(line), message);
            return false;
        }

        token.clone_into(&mut self.keyword);
        value.clone_into(&mut self.raw);
        self.line = Some(line);
        self.value = Some(parsed);
        true
    }

    /// First bound violated by `value`, if any.
    ///
    /// Real and point limits get a relative slack of the field tolerance;
    /// integer limits are exact.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn limit_check(&self, value: &FieldValue) -> Option<DiagnosticCode> {
        match value {
            FieldValue::Text(_) | FieldValue::Bool(_) => None,
            FieldValue::Int(i) => self.check_scalars(&[*i as f64], 0.0),
            FieldValue::Real(r) => self.check_scalars(&[*r], self.tolerance),
            FieldValue::Point(p) => match p.dim {
                Dim::Two => self.check_scalars(&[p.x(), p.y()], self.tolerance),
                Dim::Three => self.check_scalars(&[p.x(), p.y(), p.z()], self.tolerance),
            },
        }
    }

    fn check_scalars(&self, values: &[f64], slack: f64) -> Option<DiagnosticCode> {
        if self.positive_required && values.iter().any(|&v| v <= 0.0) {
            return Some(DiagnosticCode::PositiveRequired);
        }
        if self.non_negative_required && values.iter().any(|&v| v < 0.0) {
            return Some(DiagnosticCode::NonNegativeRequired);
        }
        let limits = self.limits?;
        if values.iter().any(|&v| v < limits.lower - limits.lower.abs() * slack) {
            return Some(DiagnosticCode::BelowLowerLimit);
        }
        if values.iter().any(|&v| v > limits.upper + limits.upper.abs() * slack) {
            return Some(DiagnosticCode::AboveUpperLimit);
        }
        None
    }

    // --- Comparison ---

    /// Real values equal within the field tolerance: exactly, absolutely
    /// when either side is zero, or relatively otherwise.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn dbl_compare(&self, other: &ScalarField) -> bool {
        let (Some(a), Some(b)) = (self.as_real(), other.as_real()) else {
            return false;
        };
        if a == b {
            return true;
        }
        if a == 0.0 {
            return b.abs() < self.tolerance;
        }
        if b == 0.0 {
            return a.abs() < self.tolerance;
        }
        ((a - b) / a).abs() < self.tolerance
    }

    /// The raw value strings are identical.
    #[must_use]
    pub fn value_compare(&self, other: &ScalarField) -> bool {
        self.raw == other.raw
    }

    /// Both fields hold points of the same dimensionality whose coordinates
    /// agree within the field tolerance.
    #[must_use]
    pub fn point_compare(&self, other: &ScalarField) -> bool {
        match (self.as_point(), other.as_point()) {
            (Some(a), Some(b)) => a.point_compare(&b, self.tolerance),
            _ => false,
        }
    }
}

fn parse_real(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_point(text: &str, dim: Dim) -> Option<PathPoint> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let coords: Vec<f64> = inner.split(',').map(parse_real).collect::<Option<_>>()?;
    match (dim, coords.as_slice()) {
        (Dim::Two, &[x, y]) => Some(PathPoint::new_2d(x, y)),
        (Dim::Three, &[x, y, z]) => Some(PathPoint::new_3d(x, y, z)),
        _ => None,
    }
}
