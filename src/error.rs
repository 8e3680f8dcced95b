//! Crate-wide error type for the comparison and edge-detection engines.

/// Failure modes shared by the comparison and edge-detection entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The two grids of a comparison have different dimensions. Shapes are
    /// `(rows, cols)`.
    ShapeMismatch {
        master: (usize, usize),
        slave: (usize, usize),
    },
    /// The requested edge-detection method name is not registered.
    UnsupportedMethod { name: String },
    /// A windowed operation was asked for an even or too-small window; a
    /// centered neighborhood needs an odd size of at least 3.
    InvalidWindow { size: usize },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::ShapeMismatch { master, slave } => write!(
                f,
                "grid shape mismatch (master {}x{}, slave {}x{})",
                master.0, master.1, slave.0, slave.1
            ),
            AnalysisError::UnsupportedMethod { name } => {
                write!(f, "unsupported edge detection method '{name}'")
            }
            AnalysisError::InvalidWindow { size } => {
                write!(f, "window size {size} is not an odd number >= 3")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;
