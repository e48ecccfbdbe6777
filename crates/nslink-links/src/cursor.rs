//! Keyset pagination over a group's links.
//!
//! A page is addressed by a marker, the last name the caller has seen, and
//! holds the next `limit` active names after it. Because the cursor seeks by
//! name rather than by offset, deleting links ahead of the cursor or adding
//! links behind it never shifts the remaining pages.
//!
//! The scan is over when a page comes back with fewer than `limit` entries.

use nslink_types::GroupId;

use crate::error::{LinkError, Result};
use crate::store::LinkStore;
use crate::types::Link;

/// Parameters of one listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum page size; `None` lists everything after the marker.
    pub limit: Option<usize>,
    /// Last name seen on the previous page.
    pub marker: Option<String>,
}

impl PageRequest {
    /// First page of at most `limit` links.
    pub fn first(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            marker: None,
        }
    }

    /// Every active link in one page.
    pub fn all() -> Self {
        Self::default()
    }

    /// Same page size, resuming after `marker`.
    pub fn after(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Parse raw query values.
    ///
    /// `limit` must be a positive integer; an empty `marker` is the same as
    /// none.
    pub fn parse(limit: Option<&str>, marker: Option<&str>) -> Result<Self> {
        let limit = match limit {
            None => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(LinkError::InvalidRequest(
                        "Limit must be greater than zero".into(),
                    ))
                }
                Ok(n) => Some(n),
                Err(_) => {
                    return Err(LinkError::InvalidRequest(format!(
                        "Limit must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };
        let marker = marker.filter(|m| !m.is_empty()).map(str::to_string);
        Ok(Self { limit, marker })
    }
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPage {
    pub links: Vec<Link>,
    /// Whether active links follow the last one on this page.
    pub has_more: bool,
}

impl LinkPage {
    /// Marker for the next request.
    pub fn last_name(&self) -> Option<&str> {
        self.links.last().map(|link| link.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Fetch the single page described by `request`.
pub fn fetch_page(store: &LinkStore, group: &GroupId, request: &PageRequest) -> Result<LinkPage> {
    let (links, has_more) = store.list_ordered(group, request.marker.as_deref(), request.limit)?;
    Ok(LinkPage { links, has_more })
}

/// A restartable sequence of pages over one group.
///
/// Yields non-empty pages until a short page ends the scan. A group with no
/// links yields a single empty page. To resume later, build a new cursor from
/// [`LinkCursor::marker`].
pub struct LinkCursor<'a> {
    store: &'a LinkStore,
    group: GroupId,
    request: PageRequest,
    started: bool,
    done: bool,
}

impl<'a> LinkCursor<'a> {
    pub fn new(store: &'a LinkStore, group: GroupId, request: PageRequest) -> Self {
        Self {
            store,
            group,
            request,
            started: false,
            done: false,
        }
    }

    /// Marker the next page will resume after.
    pub fn marker(&self) -> Option<&str> {
        self.request.marker.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.done
    }
}

impl Iterator for LinkCursor<'_> {
    type Item = Result<LinkPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let page = match fetch_page(self.store, &self.group, &self.request) {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.done = match self.request.limit {
            Some(limit) => page.len() < limit || !page.has_more,
            None => true,
        };
        if let Some(last) = page.last_name() {
            self.request.marker = Some(last.to_string());
        }

        if page.is_empty() && self.started {
            return None;
        }
        self.started = true;
        Some(Ok(page))
    }
}
