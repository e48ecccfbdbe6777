//! Per-group link tables.
//!
//! Each group owns one [`LinkTable`] behind its own `RwLock`; the lock is the
//! mutual-exclusion scope for every mutation in that group. Slots are kept
//! in a `BTreeMap` so that iteration order is the listing order.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use nslink_types::{GroupId, Timestamp};

use crate::error::{LinkError, Result};
use crate::types::{Link, PutOutcome, RemoveOutcome, SlotState};

/// One (group, name) slot that has been written at least once.
#[derive(Clone, Debug)]
pub(crate) enum Slot {
    Active(Link),
    Tombstoned { deleted: Timestamp },
}

/// The links of one group, keyed and ordered by name.
#[derive(Debug, Default)]
pub(crate) struct LinkTable {
    slots: BTreeMap<String, Slot>,
}

impl LinkTable {
    pub(crate) fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    pub(crate) fn state(&self, name: &str) -> SlotState {
        match self.slots.get(name) {
            Some(Slot::Active(_)) => SlotState::Active,
            Some(Slot::Tombstoned { .. }) => SlotState::Tombstoned,
            None => SlotState::Absent,
        }
    }

    pub(crate) fn active(&self, name: &str) -> Option<&Link> {
        match self.slots.get(name) {
            Some(Slot::Active(link)) => Some(link),
            _ => None,
        }
    }

    /// Install `link` as the active link under its name.
    pub(crate) fn install(&mut self, link: Link) -> PutOutcome {
        let previous = self.slots.insert(link.name.clone(), Slot::Active(link));
        match previous {
            Some(Slot::Active(_)) => PutOutcome::Replaced,
            _ => PutOutcome::Created,
        }
    }

    /// Tombstone the active link under `name`.
    pub(crate) fn tombstone(&mut self, name: &str, at: Timestamp) -> RemoveOutcome {
        match self.slots.get_mut(name) {
            Some(slot @ Slot::Active(_)) => {
                *slot = Slot::Tombstoned { deleted: at };
                RemoveOutcome::Removed
            }
            Some(Slot::Tombstoned { .. }) => RemoveOutcome::AlreadyGone,
            None => RemoveOutcome::NeverExisted,
        }
    }

    /// Up to `limit` active links named strictly after `after`, plus whether
    /// more active links follow. `limit = None` means no bound.
    pub(crate) fn page_after(&self, after: Option<&str>, limit: Option<usize>) -> (Vec<Link>, bool) {
        let lower = match after {
            Some(name) => Bound::Excluded(name),
            None => Bound::Unbounded,
        };
        let mut active = self
            .slots
            .range::<str, _>((lower, Bound::Unbounded))
            .filter_map(|(_, slot)| match slot {
                Slot::Active(link) => Some(link),
                Slot::Tombstoned { .. } => None,
            });

        let mut links = Vec::new();
        if let Some(limit) = limit {
            links.extend(active.by_ref().take(limit).cloned());
            let has_more = active.next().is_some();
            (links, has_more)
        } else {
            links.extend(active.cloned());
            (links, false)
        }
    }

    pub(crate) fn active_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::Active(_)))
            .count()
    }
}

/// Registry of link tables, one per group that has ever held a link.
#[derive(Debug, Default)]
pub(crate) struct GroupTables {
    groups: RwLock<HashMap<GroupId, Arc<RwLock<LinkTable>>>>,
}

impl GroupTables {
    /// The table of `group`, if one was ever created.
    pub(crate) fn get(&self, group: &GroupId) -> Result<Option<Arc<RwLock<LinkTable>>>> {
        let groups = self.groups.read().map_err(poisoned)?;
        Ok(groups.get(group).cloned())
    }

    /// The table of `group`, creating an empty one on first use.
    pub(crate) fn get_or_create(&self, group: &GroupId) -> Result<Arc<RwLock<LinkTable>>> {
        if let Some(table) = self.get(group)? {
            return Ok(table);
        }
        let mut groups = self.groups.write().map_err(poisoned)?;
        Ok(groups.entry(*group).or_default().clone())
    }

    /// Forget the table of `group`. Returns `true` if it existed.
    pub(crate) fn remove(&self, group: &GroupId) -> Result<bool> {
        let mut groups = self.groups.write().map_err(poisoned)?;
        Ok(groups.remove(group).is_some())
    }
}

pub(crate) fn read_table(table: &RwLock<LinkTable>) -> Result<RwLockReadGuard<'_, LinkTable>> {
    table.read().map_err(poisoned)
}

pub(crate) fn write_table(table: &RwLock<LinkTable>) -> Result<RwLockWriteGuard<'_, LinkTable>> {
    table.write().map_err(poisoned)
}

fn poisoned<E: std::fmt::Display>(e: E) -> LinkError {
    LinkError::LockPoisoned(e.to_string())
}
