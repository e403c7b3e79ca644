/// Errors raised by geometry and distribution routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A geometric request could not be satisfied.
    Geometry(String),
    /// The caller broke a precondition, such as passing mismatched lists.
    Invariant(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(s) => write!(f, "{s}"),
            Self::Invariant(s) => write!(f, "invariant violation: {s}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;
