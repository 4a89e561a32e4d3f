//! Source handling configuration.
//!
//! [`SourcePolicy`] decides what happens when a dynamic value that is
//! neither a sequence nor a map is used as a query source. It implements
//! serde's traits so applications can keep it in their own config files.

use serde::{Deserialize, Serialize};

/// Policy for sources that are neither sequences nor maps.
///
/// # Example
///
/// ```
/// use lazyq::SourcePolicy;
///
/// let policy: SourcePolicy = serde_json::from_str("\"reject\"").unwrap();
/// assert_eq!(policy, SourcePolicy::Reject);
/// assert_eq!(SourcePolicy::default(), SourcePolicy::Empty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePolicy {
    /// Treat the source as an empty sequence.
    #[default]
    Empty,
    /// Fail with [`QueryError::UnsupportedSource`](crate::QueryError::UnsupportedSource).
    Reject,
}

impl SourcePolicy {
    /// Returns `true` if unsupported sources become empty queries.
    pub fn is_permissive(self) -> bool {
        matches!(self, SourcePolicy::Empty)
    }

    /// Returns the configuration name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            SourcePolicy::Empty => "empty",
            SourcePolicy::Reject => "reject",
        }
    }
}

impl std::fmt::Display for SourcePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
