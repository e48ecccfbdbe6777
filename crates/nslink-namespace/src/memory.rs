//! In-memory namespace for tests and the bundled server.
//!
//! [`InMemoryNamespace`] keeps domains and object records in `HashMap`s
//! behind a single `RwLock`. Data is lost when the namespace is dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use nslink_types::{now, GroupId, ObjectId, ObjectKind, Timestamp};
use serde::Serialize;

use crate::error::{NamespaceError, NamespaceResult};
use crate::traits::Namespace;

/// A group as the namespace knows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub domain: String,
    pub created: Timestamp,
    pub last_modified: Timestamp,
    pub is_root: bool,
}

/// A domain and its root group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    pub name: String,
    pub root: GroupId,
    pub created: Timestamp,
}

#[derive(Clone, Debug)]
struct ObjectRecord {
    kind: ObjectKind,
    domain: String,
    created: Timestamp,
    last_modified: Timestamp,
}

#[derive(Default)]
struct NamespaceState {
    domains: HashMap<String, DomainRecord>,
    objects: HashMap<ObjectId, ObjectRecord>,
}

/// In-memory implementation of [`Namespace`].
#[derive(Default)]
pub struct InMemoryNamespace {
    inner: RwLock<NamespaceState>,
}

impl InMemoryNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain and allocate its root group.
    pub fn create_domain(&self, domain: &str) -> NamespaceResult<DomainRecord> {
        let mut state = self.write()?;
        if state.domains.contains_key(domain) {
            return Err(NamespaceError::DomainExists(domain.to_string()));
        }
        let created = now();
        let root = ObjectId::generate();
        state.objects.insert(
            root,
            ObjectRecord {
                kind: ObjectKind::Group,
                domain: domain.to_string(),
                created,
                last_modified: created,
            },
        );
        let record = DomainRecord {
            name: domain.to_string(),
            root,
            created,
        };
        state.domains.insert(domain.to_string(), record.clone());
        tracing::debug!(domain, root = %root, "domain created");
        Ok(record)
    }

    /// Look up a domain.
    pub fn domain(&self, domain: &str) -> NamespaceResult<Option<DomainRecord>> {
        Ok(self.read()?.domains.get(domain).cloned())
    }

    /// Create an anonymous group in `domain`; it is reachable only by id
    /// until something links to it.
    pub fn create_group(&self, domain: &str) -> NamespaceResult<GroupId> {
        self.insert_object(domain, ObjectKind::Group)
    }

    /// Register an object of any kind in `domain`.
    pub fn insert_object(&self, domain: &str, kind: ObjectKind) -> NamespaceResult<ObjectId> {
        let mut state = self.write()?;
        if !state.domains.contains_key(domain) {
            return Err(NamespaceError::DomainNotFound(domain.to_string()));
        }
        let id = ObjectId::generate();
        let created = now();
        state.objects.insert(
            id,
            ObjectRecord {
                kind,
                domain: domain.to_string(),
                created,
                last_modified: created,
            },
        );
        tracing::debug!(domain, id = %id, %kind, "object created");
        Ok(id)
    }

    /// Domain that owns the object `id`, if it exists.
    pub fn object_domain(&self, id: &ObjectId) -> NamespaceResult<Option<String>> {
        Ok(self.read()?.objects.get(id).map(|r| r.domain.clone()))
    }

    /// Fetch a group's record, `Ok(None)` if `id` is not a group.
    pub fn group(&self, id: &GroupId) -> NamespaceResult<Option<GroupRecord>> {
        let state = self.read()?;
        let Some(record) = state.objects.get(id) else {
            return Ok(None);
        };
        if record.kind != ObjectKind::Group {
            return Ok(None);
        }
        let is_root = state
            .domains
            .get(&record.domain)
            .is_some_and(|d| d.root == *id);
        Ok(Some(GroupRecord {
            id: *id,
            domain: record.domain.clone(),
            created: record.created,
            last_modified: record.last_modified,
            is_root,
        }))
    }

    /// Delete a non-root group. Returns `true` if the group existed.
    ///
    /// Only the group record goes away; objects it linked to are untouched.
    pub fn delete_group(&self, id: &GroupId) -> NamespaceResult<bool> {
        let mut state = self.write()?;
        match state.objects.get(id) {
            Some(record) if record.kind == ObjectKind::Group => {
                if state.domains.values().any(|d| d.root == *id) {
                    return Err(NamespaceError::RootGroup(*id));
                }
            }
            _ => return Ok(false),
        }
        state.objects.remove(id);
        tracing::debug!(id = %id, "group deleted");
        Ok(true)
    }

    fn read(&self) -> NamespaceResult<std::sync::RwLockReadGuard<'_, NamespaceState>> {
        self.inner
            .read()
            .map_err(|e| NamespaceError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> NamespaceResult<std::sync::RwLockWriteGuard<'_, NamespaceState>> {
        self.inner
            .write()
            .map_err(|e| NamespaceError::LockPoisoned(e.to_string()))
    }
}

impl Namespace for InMemoryNamespace {
    fn object_kind(&self, id: &ObjectId) -> NamespaceResult<Option<ObjectKind>> {
        Ok(self.read()?.objects.get(id).map(|r| r.kind))
    }

    fn root_group_id(&self, domain: &str) -> NamespaceResult<GroupId> {
        self.read()?
            .domains
            .get(domain)
            .map(|d| d.root)
            .ok_or_else(|| NamespaceError::DomainNotFound(domain.to_string()))
    }

    fn touch_group(&self, id: &GroupId, at: Timestamp) -> NamespaceResult<()> {
        let mut state = self.write()?;
        match state.objects.get_mut(id) {
            Some(record) if record.kind == ObjectKind::Group => {
                if at > record.last_modified {
                    record.last_modified = at;
                }
                Ok(())
            }
            _ => Err(NamespaceError::ObjectNotFound(*id)),
        }
    }
}

impl std::fmt::Debug for InMemoryNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (domains, objects) = match self.inner.read() {
            Ok(state) => (state.domains.len(), state.objects.len()),
            Err(_) => (0, 0),
        };
        f.debug_struct("InMemoryNamespace")
            .field("domains", &domains)
            .field("objects", &objects)
            .finish()
    }
}
