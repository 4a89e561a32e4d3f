//! Error types for the lazyq crate.

use thiserror::Error;

/// Errors that can occur when building queries.
///
/// Running a query never fails: every terminal operation works on data that
/// was validated when the chain was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Source value is neither a sequence nor a map.
    ///
    /// Only returned under [`SourcePolicy::Reject`](crate::SourcePolicy::Reject);
    /// the permissive policy turns such sources into an empty query.
    #[error("unsupported source: expected a sequence or a map, got {kind}")]
    UnsupportedSource { kind: &'static str },

    /// Operation is declared but has no defined behavior.
    #[error("operation '{operation}' is not implemented")]
    NotImplemented { operation: &'static str },

    /// Insert position does not fit the platform's address space.
    #[error("insert position {index} does not fit in usize")]
    IndexOverflow { index: u64 },
}

/// Result type for lazyq operations.
pub type Result<T> = std::result::Result<T, QueryError>;
