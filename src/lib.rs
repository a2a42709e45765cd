pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod operations;
pub mod store;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Reporter, Severity, TracingReporter};
pub use error::{PolypathError, Result};
pub use geometry::{Dim, LineRange, Path, PathPoint};
pub use store::{PathId, PathStore};
