//! Structured, line-numbered problem reports.
//!
//! Validation passes push [`Diagnostic`]s into a [`Diagnostics`] collector and
//! keep going, so one run surfaces every problem. Nothing here prints; drain
//! the collector into a [`Reporter`] to emit the records.

use std::fmt;

use crate::error::PathError;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Category of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A single-assignment keyword appeared twice.
    DuplicateEntry,
    /// A value could not be parsed for its declared kind.
    InvalidValue,
    PositiveRequired,
    NonNegativeRequired,
    BelowLowerLimit,
    AboveUpperLimit,
    /// A block line matched no keyword, or more than one.
    UnrecognizedKeyword,
    MissingName,
    MissingClosed,
    MissingPoints,
    SinglePoint,
    ClosedWithTwoPoints,
    /// A vertex lies outside the mesh bounding box.
    OutsideMeshBounds,
    /// Two path blocks share a name.
    DuplicatePathName,
    /// A closed path was handed to a merge.
    ClosedMergeMember,
    /// A merged boundary visits the same vertex twice.
    DuplicateMergedVertex,
    /// A merged boundary has fewer than three distinct vertices.
    DegenerateMergedPath,
}

impl DiagnosticCode {
    /// Stable kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateEntry => "duplicate-entry",
            Self::InvalidValue => "invalid-value",
            Self::PositiveRequired => "positive-required",
            Self::NonNegativeRequired => "non-negative-required",
            Self::BelowLowerLimit => "below-lower-limit",
            Self::AboveUpperLimit => "above-upper-limit",
            Self::UnrecognizedKeyword => "unrecognized-keyword",
            Self::MissingName => "missing-name",
            Self::MissingClosed => "missing-closed",
            Self::MissingPoints => "missing-points",
            Self::SinglePoint => "single-point",
            Self::ClosedWithTwoPoints => "closed-with-two-points",
            Self::OutsideMeshBounds => "outside-mesh-bounds",
            Self::DuplicatePathName => "duplicate-path-name",
            Self::ClosedMergeMember => "closed-merge-member",
            Self::DuplicateMergedVertex => "duplicate-merged-vertex",
            Self::DegenerateMergedPath => "degenerate-merged-path",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    /// 1-based source line, when the problem has one.
    pub line: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.line {
            Some(line) => write!(f, "{level}[{}] line {line}: {}", self.code, self.message),
            None => write!(f, "{level}[{}]: {}", self.code, self.message),
        }
    }
}

/// Accumulates diagnostics across a validation pass.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }

    /// Records an error.
    pub fn error(&mut self, code: DiagnosticCode, line: Option<usize>, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Error,
            code,
            message: message.into(),
            line,
        });
    }

    /// Records a warning.
    pub fn warning(
        &mut self,
        code: DiagnosticCode,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            code,
            message: message.into(),
            line,
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of records with [`Severity::Error`].
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    /// True if any record carries `code`.
    #[must_use]
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.records.iter().any(|d| d.code == code)
    }

    /// Fails with the number of errors recorded after `mark`, where `mark`
    /// is an earlier [`error_count`](Self::error_count).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`] if new errors were recorded.
    pub fn ensure_no_errors_since(&self, mark: usize) -> Result<(), PathError> {
        let errors = self.error_count().saturating_sub(mark);
        if errors == 0 {
            Ok(())
        } else {
            Err(PathError::Invalid { errors })
        }
    }

    /// Hands every record to `reporter`, leaving the collector empty.
    pub fn drain_into<R: Reporter + ?Sized>(&mut self, reporter: &mut R) {
        for diagnostic in self.records.drain(..) {
            reporter.report(&diagnostic);
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Sink for diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Forwards each diagnostic as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let code = diagnostic.code.as_str();
        match diagnostic.severity {
            Severity::Error => {
                tracing::error!(code, line = ?diagnostic.line, "{}", diagnostic.message);
            }
            Severity::Warning => {
                tracing::warn!(code, line = ?diagnostic.line, "{}", diagnostic.message);
            }
        }
    }
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}
