//! Problem taxonomy shared by the traversal engine and the provisioner.

use core::fmt;

use thiserror::Error;

use crate::jwt::{MalformedJwt, SignatureError};
use crate::loader::TransportError;
use crate::model::Uri;
use crate::profile::ProfileViolation;

/// Everything that can go wrong while fetching and vetting a single list.
#[derive(Debug, Error)]
pub enum Problem {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("list not found")]
    NotFound,
    #[error("malformed list JWT")]
    MalformedJwt(#[from] MalformedJwt),
    #[error("list signature is invalid")]
    JwtSignatureInvalid(#[from] SignatureError),
    #[error("list type `{0}` does not match any registered profile")]
    UnknownListType(Uri),
    #[error(transparent)]
    ProfileViolation(#[from] ProfileViolation),
    #[error("traversal limit reached: {limit}")]
    TraversalLimitReached { limit: TraversalLimit },
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },
}

impl Problem {
    /// True when the list could not even be retrieved.
    ///
    /// The `AlwaysIfDownloaded` policy distinguishes these from problems
    /// found in a list that was at least downloadable.
    pub fn is_download_failure(&self) -> bool {
        matches!(self, Problem::Transport(_) | Problem::NotFound)
    }

    /// Informational problems do not invalidate any list content.
    pub fn is_informational(&self) -> bool {
        matches!(self, Problem::TraversalLimitReached { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalLimit {
    MaxLists(usize),
    MaxDepth(usize),
}

impl fmt::Display for TraversalLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalLimit::MaxLists(limit) => write!(f, "at most {limit} lists are loaded"),
            TraversalLimit::MaxDepth(limit) => write!(f, "lists deeper than {limit} are not followed"),
        }
    }
}
