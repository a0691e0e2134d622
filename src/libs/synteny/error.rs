use thiserror::Error;

/// Errors raised at the boundary of the synteny engine.
///
/// The algorithms themselves never fail; these cover rejected parameters and
/// unreadable input rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntenyError {
    /// A distance threshold of zero was supplied
    #[error("distance threshold `{name}` must be positive")]
    NonPositiveDistance { name: &'static str },

    /// `min_score` below 1
    #[error("minimum cluster score must be at least 1, got {0}")]
    InvalidMinScore(usize),

    /// `max_iterations` below 1
    #[error("maximum chain iterations must be at least 1, got {0}")]
    InvalidIterations(usize),

    /// A table row that could not be parsed
    #[error("malformed {kind} line {line}: {content:?}")]
    Malformed {
        kind: &'static str,
        line: usize,
        content: String,
    },
}
