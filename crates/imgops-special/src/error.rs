//! Error types for operation resolution and erased invocation

use crate::descriptor::{OpDescriptor, OpKind};

/// Failure to turn a request into a resolved operation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolutionError {
    /// Nothing is registered for the kind
    #[error("no operation registered for `{0}`")]
    UnknownKind(OpKind),

    /// Candidates exist for the kind but none fits the request
    #[error("no candidate matches {requested} ({considered} `{}` candidates considered)", .requested.kind())]
    NoMatch {
        /// The request that failed
        requested: Box<OpDescriptor>,
        /// Number of candidates registered for the kind
        considered: usize,
    },

    /// A matching candidate rejected an argument value
    #[error("invalid argument {index} for `{kind}`: {reason}")]
    InvalidArgument {
        /// Kind being resolved
        kind: OpKind,
        /// Position of the rejected argument
        index: usize,
        /// Why the value was rejected
        reason: String,
    },

    /// Operation name does not correspond to any kind
    #[error("unknown operation name: {0}")]
    UnknownName(String),
}

impl ResolutionError {
    /// Create no-match error
    #[inline]
    #[must_use]
    pub fn no_match(requested: OpDescriptor, considered: usize) -> Self {
        Self::NoMatch {
            requested: Box::new(requested),
            considered,
        }
    }

    /// Create invalid-argument error
    #[inline]
    pub fn invalid_argument(kind: OpKind, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            index,
            reason: reason.into(),
        }
    }
}

/// Failure while invoking an erased operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    /// A value passed at call time is not the type the op was resolved for
    #[error("{slot} is not a {expected}")]
    ArgumentMismatch {
        /// `"input"` or `"output"`
        slot: &'static str,
        /// Type the op was resolved for
        expected: String,
    },
}
