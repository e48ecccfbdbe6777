//! Request-level link operations.
//!
//! The controller checks the shape of a request in a fixed order (group,
//! name, payload, target), hands the write to the [`LinkStore`], and turns
//! store outcomes into the results callers see:
//!
//! - put always reports success once its checks pass, whether the slot was
//!   absent, active or tombstoned
//! - get distinguishes a deleted link (`Gone`) from one that never existed
//! - remove requires an active slot and fails otherwise

use std::sync::Arc;

use nslink_types::GroupId;

use crate::cursor::{fetch_page, LinkCursor, LinkPage, PageRequest};
use crate::error::{LinkError, Result};
use crate::names::validate_link_name;
use crate::store::{LinkStore, LinkWrite};
use crate::types::{Link, LinkPayload, RemoveOutcome, Resolution, SlotState};

/// Entry point for link requests against one [`LinkStore`].
#[derive(Clone, Debug)]
pub struct LinkController {
    store: Arc<LinkStore>,
}

impl LinkController {
    pub fn new(store: Arc<LinkStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    /// Create or replace `name` in `group`.
    pub fn put(&self, group: &GroupId, name: &str, payload: LinkPayload) -> Result<LinkWrite> {
        let result = self.checked_put(group, name, payload);
        if let Err(e) = &result {
            tracing::warn!(group = %group, name, error = %e, "link put rejected");
        }
        result
    }

    fn checked_put(&self, group: &GroupId, name: &str, payload: LinkPayload) -> Result<LinkWrite> {
        self.require_group(group)?;
        validate_link_name(name)?;
        let spec = payload.into_spec()?;
        self.store.put(group, name, &spec)
    }

    /// Fetch the active link `name` of `group`.
    pub fn get(&self, group: &GroupId, name: &str) -> Result<Link> {
        validate_link_name(name)?;
        match self.store.get(group, name)? {
            Resolution::Active(link) => Ok(link),
            Resolution::Tombstoned { .. } => Err(LinkError::Gone {
                group: *group,
                name: name.to_string(),
            }),
            Resolution::NeverExisted => Err(LinkError::NotFound {
                group: *group,
                name: name.to_string(),
            }),
            Resolution::GroupNotFound => Err(LinkError::GroupNotFound(*group)),
        }
    }

    /// Delete the active link `name` of `group`.
    pub fn remove(&self, group: &GroupId, name: &str) -> Result<()> {
        validate_link_name(name)?;
        let state = match self.store.remove(group, name)? {
            RemoveOutcome::Removed => return Ok(()),
            RemoveOutcome::AlreadyGone => SlotState::Tombstoned,
            RemoveOutcome::NeverExisted => SlotState::Absent,
        };
        tracing::warn!(group = %group, name, %state, "link remove rejected");
        Err(LinkError::PreconditionFailed {
            name: name.to_string(),
            state,
        })
    }

    /// One page of `group`'s links.
    pub fn list(&self, group: &GroupId, request: &PageRequest) -> Result<LinkPage> {
        fetch_page(&self.store, group, request)
    }

    /// Iterate every page of `group`'s links starting at `request`.
    pub fn cursor(&self, group: GroupId, request: PageRequest) -> LinkCursor<'_> {
        LinkCursor::new(&self.store, group, request)
    }

    fn require_group(&self, group: &GroupId) -> Result<()> {
        if self.store.namespace().group_exists(group)? {
            Ok(())
        } else {
            Err(LinkError::GroupNotFound(*group))
        }
    }
}
