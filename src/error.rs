use std::fmt;

/// Route tree configuration error
///
/// Returned by [`RouteTreeBuilder::build()`](crate::router::RouteTreeBuilder::build)
/// and [`SingleRouteBuilder::build()`](crate::router::SingleRouteBuilder::build)
/// when the declared routes cannot be represented as a tree. These are always
/// reported while building, never while matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    /// A literal path segment is empty or contains characters outside
    /// `[A-Za-z0-9_\-.~]`.
    InvalidSegment {
        /// The full literal path that was being added
        path: String,
        /// The offending segment
        segment: String,
    },
    /// A parameter was declared without a name.
    EmptyParamName,
    /// A node already has a parametric child.
    ///
    /// Only one parametric child is allowed per node; two would make the
    /// precedence between them ambiguous.
    DuplicateParametricChild {
        /// Name of the parameter already installed
        existing: String,
        /// Name of the parameter that was rejected
        rejected: String,
    },
    /// A node already has a wildcard child.
    DuplicateWildcardChild,
}

impl fmt::Display for RouteConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteConfigError::InvalidSegment { path, segment } => {
                write!(
                    f,
                    "Route configuration error: path '{}' has invalid segment '{}'. \
                    Segments must be non-empty and only contain [A-Za-z0-9_-.~].",
                    path, segment
                )
            }
            RouteConfigError::EmptyParamName => {
                write!(f, "Route configuration error: parameter name cannot be empty.")
            }
            RouteConfigError::DuplicateParametricChild { existing, rejected } => {
                write!(
                    f,
                    "Route configuration error: cannot add parameter ':{}', \
                    node already has parametric child ':{}'.",
                    rejected, existing
                )
            }
            RouteConfigError::DuplicateWildcardChild => {
                write!(
                    f,
                    "Route configuration error: node already has a wildcard child."
                )
            }
        }
    }
}

impl std::error::Error for RouteConfigError {}
