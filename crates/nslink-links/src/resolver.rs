//! Read path from (group, name) to a link or a not-found/gone outcome.
//!
//! The resolver has no side effects; any number of readers may resolve
//! concurrently while writers hold other groups' locks.

use nslink_namespace::Namespace;
use nslink_types::{GroupId, ObjectId};

use crate::error::Result;
use crate::table::{read_table, GroupTables, LinkTable, Slot};
use crate::types::{Resolution, TargetValidation};

/// Resolves link names and hard-link targets.
///
/// Obtained from [`LinkStore::resolver`](crate::LinkStore::resolver); borrows
/// the store's tables and namespace.
pub struct LinkResolver<'a> {
    namespace: &'a dyn Namespace,
    tables: &'a GroupTables,
}

impl<'a> LinkResolver<'a> {
    pub(crate) fn new(namespace: &'a dyn Namespace, tables: &'a GroupTables) -> Self {
        Self { namespace, tables }
    }

    /// Resolve `name` inside `group`.
    pub fn resolve(&self, group: &GroupId, name: &str) -> Result<Resolution> {
        if !self.namespace.group_exists(group)? {
            return Ok(Resolution::GroupNotFound);
        }
        let Some(table) = self.tables.get(group)? else {
            return Ok(Resolution::NeverExisted);
        };
        let table = read_table(&table)?;
        Ok(resolve_in(&table, name))
    }

    /// Check that a hard-link target exists.
    pub fn validate_target(&self, id: &ObjectId) -> Result<TargetValidation> {
        Ok(match self.namespace.object_kind(id)? {
            Some(kind) => TargetValidation::Valid(kind),
            None => TargetValidation::NotFound,
        })
    }
}

/// Classify `name` within an already-locked table.
pub(crate) fn resolve_in(table: &LinkTable, name: &str) -> Resolution {
    match table.slot(name) {
        Some(Slot::Active(link)) => Resolution::Active(link.clone()),
        Some(Slot::Tombstoned { deleted }) => Resolution::Tombstoned { deleted: *deleted },
        None => Resolution::NeverExisted,
    }
}
