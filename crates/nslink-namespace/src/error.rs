use nslink_types::ObjectId;

/// Errors from namespace operations.
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// No domain is registered under this name.
    #[error("domain not found: {0}")]
    DomainNotFound(String),

    /// A domain with this name already exists.
    #[error("domain already exists: {0}")]
    DomainExists(String),

    /// The object is not present in the namespace.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Root groups live as long as their domain.
    #[error("cannot delete root group {0}")]
    RootGroup(ObjectId),

    /// A lock guarding namespace state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The backing storage engine failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for namespace operations.
pub type NamespaceResult<T> = Result<T, NamespaceError>;
