use nslink_types::{GroupId, ObjectId, ObjectKind, Timestamp};

use crate::error::NamespaceResult;

/// Boundary between the link subsystem and the object namespace.
///
/// Implementations must be thread-safe (`Send + Sync`). Lookups must be
/// bounded, in-process operations: the link store calls them while holding a
/// group's write lock.
pub trait Namespace: Send + Sync {
    /// Kind of the object with this id, or `Ok(None)` if no such object.
    fn object_kind(&self, id: &ObjectId) -> NamespaceResult<Option<ObjectKind>>;

    /// Root group of a domain.
    ///
    /// Returns `NamespaceError::DomainNotFound` for unknown domains.
    fn root_group_id(&self, domain: &str) -> NamespaceResult<GroupId>;

    /// Record that a group's link table changed at `at`.
    fn touch_group(&self, id: &GroupId, at: Timestamp) -> NamespaceResult<()>;

    /// Check whether any object with this id exists.
    fn object_exists(&self, id: &ObjectId) -> NamespaceResult<bool> {
        Ok(self.object_kind(id)?.is_some())
    }

    /// Check whether `id` names an existing group.
    fn group_exists(&self, id: &GroupId) -> NamespaceResult<bool> {
        Ok(matches!(self.object_kind(id)?, Some(ObjectKind::Group)))
    }
}
