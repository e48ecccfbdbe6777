//! The link store: per-group ordered link tables with tombstones.
//!
//! All writes to a group run under that group's table write lock. Every
//! check that can fail (group existence, name, target, the namespace touch)
//! happens before the slot is replaced, and the replacement is a single map
//! insert, so a put or remove either commits entirely or not at all.

use std::sync::Arc;

use nslink_namespace::{Namespace, NamespaceError};
use nslink_types::{now, GroupId, Timestamp};

use crate::error::{LinkError, Result};
use crate::names::validate_link_name;
use crate::resolver::LinkResolver;
use crate::table::{read_table, write_table, GroupTables};
use crate::types::{
    Link, LinkSpec, LinkTarget, PutOutcome, RemoveOutcome, Resolution, SlotState,
    TargetValidation,
};

/// A committed put: what happened to the slot and the link now in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkWrite {
    pub outcome: PutOutcome,
    pub link: Link,
}

/// Link storage for every group of a namespace.
pub struct LinkStore {
    namespace: Arc<dyn Namespace>,
    tables: GroupTables,
}

impl LinkStore {
    pub fn new(namespace: Arc<dyn Namespace>) -> Self {
        Self {
            namespace,
            tables: GroupTables::default(),
        }
    }

    /// The namespace this store validates groups and targets against.
    pub fn namespace(&self) -> &Arc<dyn Namespace> {
        &self.namespace
    }

    pub fn resolver(&self) -> LinkResolver<'_> {
        LinkResolver::new(self.namespace.as_ref(), &self.tables)
    }

    /// Resolve `name` in `group`.
    pub fn get(&self, group: &GroupId, name: &str) -> Result<Resolution> {
        self.resolver().resolve(group, name)
    }

    /// Up to `limit` active links of `group` whose names sort strictly after
    /// `after`, in name order, and whether more follow.
    ///
    /// The slice is taken under the group's read lock, so it never contains
    /// a half-committed put.
    pub fn list_ordered(
        &self,
        group: &GroupId,
        after: Option<&str>,
        limit: Option<usize>,
    ) -> Result<(Vec<Link>, bool)> {
        self.require_group(group)?;
        let Some(table) = self.tables.get(group)? else {
            return Ok((Vec::new(), false));
        };
        let table = read_table(&table)?;
        Ok(table.page_after(after, limit))
    }

    /// Create or overwrite the link `name` in `group`.
    pub fn put(&self, group: &GroupId, name: &str, spec: &LinkSpec) -> Result<LinkWrite> {
        self.require_group(group)?;
        validate_link_name(name)?;

        let table = self.tables.get_or_create(group)?;
        let mut table = write_table(&table)?;
        // The group may have been deleted since the check above.
        if !self.namespace.group_exists(group)? {
            return Err(self.discard_table(group));
        }

        let target = match spec {
            LinkSpec::Hard { id } => match self.resolver().validate_target(id)? {
                TargetValidation::Valid(kind) => LinkTarget::Hard { id: *id, kind },
                TargetValidation::NotFound => return Err(LinkError::InvalidTarget(*id)),
            },
            LinkSpec::Soft { path } => LinkTarget::Soft { path: path.clone() },
        };

        if let Some(existing) = table.active(name) {
            if existing.matches_spec(spec) {
                tracing::debug!(group = %group, name, "link unchanged");
                return Ok(LinkWrite {
                    outcome: PutOutcome::Replaced,
                    link: existing.clone(),
                });
            }
        }

        let at = now();
        let created = table.active(name).map_or(at, |link| link.created);
        let link = Link {
            name: name.to_string(),
            target,
            created,
            last_modified: at,
        };

        if let Err(e) = self.touch(group, at) {
            if matches!(e, LinkError::GroupNotFound(_)) {
                return Err(self.discard_table(group));
            }
            return Err(e);
        }
        let outcome = table.install(link.clone());
        tracing::debug!(group = %group, name, class = %link.class(), ?outcome, "link written");
        Ok(LinkWrite { outcome, link })
    }

    /// Tombstone the active link `name` in `group`.
    pub fn remove(&self, group: &GroupId, name: &str) -> Result<RemoveOutcome> {
        self.require_group(group)?;
        let Some(table) = self.tables.get(group)? else {
            return Ok(RemoveOutcome::NeverExisted);
        };
        let mut table = write_table(&table)?;

        let at = now();
        if table.state(name) == SlotState::Active {
            self.touch(group, at)?;
        }
        let outcome = table.tombstone(name, at);
        tracing::debug!(group = %group, name, ?outcome, "link remove");
        Ok(outcome)
    }

    /// Number of active links in `group`.
    pub fn active_count(&self, group: &GroupId) -> Result<usize> {
        match self.tables.get(group)? {
            Some(table) => Ok(read_table(&table)?.active_count()),
            None => Ok(0),
        }
    }

    /// Discard the link table of a deleted group.
    ///
    /// Only the group's own slots go; link targets are never touched.
    pub fn drop_group(&self, group: &GroupId) -> Result<bool> {
        let dropped = self.tables.remove(group)?;
        if dropped {
            tracing::debug!(group = %group, "link table dropped");
        }
        Ok(dropped)
    }

    fn require_group(&self, group: &GroupId) -> Result<()> {
        if self.namespace.group_exists(group)? {
            Ok(())
        } else {
            Err(LinkError::GroupNotFound(*group))
        }
    }

    /// Forget the table of a group that vanished mid-put and report it gone.
    fn discard_table(&self, group: &GroupId) -> LinkError {
        match self.tables.remove(group) {
            Ok(_) => {
                tracing::debug!(group = %group, "link table of deleted group discarded");
                LinkError::GroupNotFound(*group)
            }
            Err(e) => e,
        }
    }

    fn touch(&self, group: &GroupId, at: Timestamp) -> Result<()> {
        self.namespace.touch_group(group, at).map_err(|e| match e {
            NamespaceError::ObjectNotFound(_) => LinkError::GroupNotFound(*group),
            other => LinkError::Namespace(other),
        })
    }
}

impl std::fmt::Debug for LinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkStore").finish_non_exhaustive()
    }
}
