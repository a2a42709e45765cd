use thiserror::Error;

/// Top-level error type for the polypath kernel.
#[derive(Debug, Error)]
pub enum PolypathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that make further geometric computation on a path meaningless.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("need at least {required} points, path has {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("points are collinear, cannot determine a plane normal")]
    Collinear,

    #[error("path has no plane normal")]
    NoNormal,

    #[error("path has not been rotated to the canonical XY frame")]
    NotCanonical,

    #[error("path is already in the canonical XY frame")]
    AlreadyCanonical,

    #[error("path is not planar: vertex deviates {deviation:e} from the plane")]
    NonPlanar { deviation: f64 },

    #[error("path has no points")]
    EmptyPath,

    #[error("points of mixed dimensionality")]
    DimensionMismatch,
}

/// Errors raised while validating or combining paths.
#[derive(Debug, Error)]
pub enum PathError {
    /// A validation pass reported problems; details are in the diagnostics.
    #[error("validation failed with {errors} error(s)")]
    Invalid { errors: usize },

    #[error("path not found: {0}")]
    NotFound(String),
}

/// Errors related to the line-oriented input collaborator.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("block starting at line {line} has no matching {end}")]
    UnterminatedBlock { line: usize, end: &'static str },

    #[error("no input line {0}")]
    NoSuchLine(usize),
}

/// Convenience type alias for results using [`PolypathError`].
pub type Result<T> = std::result::Result<T, PolypathError>;
