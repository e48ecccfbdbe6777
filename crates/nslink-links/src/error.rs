//! Error types for link operations.

use nslink_namespace::NamespaceError;
use nslink_types::{GroupId, ObjectId};
use thiserror::Error;

use crate::types::SlotState;

/// Errors that can occur during link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The addressed group does not exist.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// No link with this name was ever created in the group.
    #[error("link not found: {name}")]
    NotFound { group: GroupId, name: String },

    /// The link existed and was deleted.
    #[error("link has been deleted: {name}")]
    Gone { group: GroupId, name: String },

    /// The link name is empty or contains a separator.
    #[error("invalid link name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Malformed pagination parameters or payload.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A hard link names an object that does not exist.
    #[error("link target not found: {0}")]
    InvalidTarget(ObjectId),

    /// Remove was attempted on a slot that is not active.
    #[error("cannot remove link {name}: slot is {state}")]
    PreconditionFailed { name: String, state: SlotState },

    /// The object namespace failed.
    #[error("namespace error: {0}")]
    Namespace(#[from] NamespaceError),

    /// A lock guarding a link table was poisoned.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Broad classification of a [`LinkError`], used to pick a response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Gone,
    InvalidRequest,
    InvalidTarget,
    PreconditionFailed(SlotState),
    Internal,
}

impl LinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupNotFound(_) | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Gone { .. } => ErrorKind::Gone,
            Self::InvalidName { .. } | Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::InvalidTarget(_) => ErrorKind::InvalidTarget,
            Self::PreconditionFailed { state, .. } => ErrorKind::PreconditionFailed(*state),
            Self::Namespace(_) | Self::LockPoisoned(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for link operations.
pub type Result<T> = std::result::Result<T, LinkError>;
