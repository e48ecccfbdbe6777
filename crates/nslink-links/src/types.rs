//! Core link types.
//!
//! A link is a named edge from a group to a target. Hard links name an
//! object by id; soft links carry a path string that is never resolved at
//! creation time.

use std::fmt;

use nslink_types::{ObjectId, ObjectKind, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// Whether a link points at an object id or at a path string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkClass {
    Hard,
    Soft,
}

impl fmt::Display for LinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hard => f.write_str("hard"),
            Self::Soft => f.write_str("soft"),
        }
    }
}

/// What a stored link points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// An object validated to exist when the link was written.
    Hard { id: ObjectId, kind: ObjectKind },
    /// A literal path, stored as given.
    Soft { path: String },
}

/// A committed link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub target: LinkTarget,
    pub created: Timestamp,
    pub last_modified: Timestamp,
}

impl Link {
    pub fn class(&self) -> LinkClass {
        match self.target {
            LinkTarget::Hard { .. } => LinkClass::Hard,
            LinkTarget::Soft { .. } => LinkClass::Soft,
        }
    }

    /// Reference path of the target: `/groups/{id}` for a hard link to a
    /// group, the literal path for a soft link.
    pub fn target_path(&self) -> String {
        match &self.target {
            LinkTarget::Hard { id, kind } => kind.href(id),
            LinkTarget::Soft { path } => path.clone(),
        }
    }

    /// Object id for hard links.
    pub fn target_id(&self) -> Option<&ObjectId> {
        match &self.target {
            LinkTarget::Hard { id, .. } => Some(id),
            LinkTarget::Soft { .. } => None,
        }
    }

    /// Whether writing `spec` over this link would change nothing.
    pub(crate) fn matches_spec(&self, spec: &LinkSpec) -> bool {
        match (&self.target, spec) {
            (LinkTarget::Hard { id, .. }, LinkSpec::Hard { id: want }) => id == want,
            (LinkTarget::Soft { path }, LinkSpec::Soft { path: want }) => path == want,
            _ => false,
        }
    }
}

/// A validated request to write a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkSpec {
    Hard { id: ObjectId },
    Soft { path: String },
}

impl LinkSpec {
    pub fn class(&self) -> LinkClass {
        match self {
            Self::Hard { .. } => LinkClass::Hard,
            Self::Soft { .. } => LinkClass::Soft,
        }
    }
}

/// Request body of a put: exactly one of `id` or `h5path`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h5path: Option<String>,
}

impl LinkPayload {
    pub fn hard(id: ObjectId) -> Self {
        Self {
            id: Some(id.to_string()),
            h5path: None,
        }
    }

    pub fn soft(path: impl Into<String>) -> Self {
        Self {
            id: None,
            h5path: Some(path.into()),
        }
    }

    /// Check the payload's shape and turn it into a [`LinkSpec`].
    pub fn into_spec(self) -> Result<LinkSpec> {
        match (self.id, self.h5path) {
            (Some(id), None) => {
                let id = ObjectId::parse(&id)
                    .map_err(|e| LinkError::InvalidRequest(e.to_string()))?;
                Ok(LinkSpec::Hard { id })
            }
            (None, Some(path)) if path.is_empty() => Err(LinkError::InvalidRequest(
                "h5path must not be empty".into(),
            )),
            (None, Some(path)) => Ok(LinkSpec::Soft { path }),
            (Some(_), Some(_)) => Err(LinkError::InvalidRequest(
                "payload must contain only one of 'id' or 'h5path'".into(),
            )),
            (None, None) => Err(LinkError::InvalidRequest(
                "payload must contain 'id' or 'h5path'".into(),
            )),
        }
    }
}

/// Lifecycle state of one (group, name) slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Absent,
    Active,
    Tombstoned,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Active => f.write_str("active"),
            Self::Tombstoned => f.write_str("tombstoned"),
        }
    }
}

/// Outcome of resolving a (group, name) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Active(Link),
    Tombstoned { deleted: Timestamp },
    NeverExisted,
    GroupNotFound,
}

impl Resolution {
    pub fn state(&self) -> Option<SlotState> {
        match self {
            Self::Active(_) => Some(SlotState::Active),
            Self::Tombstoned { .. } => Some(SlotState::Tombstoned),
            Self::NeverExisted => Some(SlotState::Absent),
            Self::GroupNotFound => None,
        }
    }
}

/// Outcome of checking a hard-link target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetValidation {
    Valid(ObjectKind),
    NotFound,
}

/// What a successful store put did to the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    /// The slot was absent or tombstoned.
    Created,
    /// The slot held an active link, which was overwritten in place.
    Replaced,
}

/// What a store remove found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    AlreadyGone,
    NeverExisted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nslink_types::now;

    fn hard_link(id: ObjectId) -> Link {
        let at = now();
        Link {
            name: "g1".into(),
            target: LinkTarget::Hard {
                id,
                kind: ObjectKind::Group,
            },
            created: at,
            last_modified: at,
        }
    }

    #[test]
    fn hard_link_target_is_group_path() {
        let id = ObjectId::generate();
        let link = hard_link(id);
        assert_eq!(link.class(), LinkClass::Hard);
        assert_eq!(link.target_path(), format!("/groups/{id}"));
        assert_eq!(link.target_id(), Some(&id));
    }

    #[test]
    fn soft_link_target_is_literal() {
        let at = now();
        let link = Link {
            name: "softlink".into(),
            target: LinkTarget::Soft {
                path: "/somewhere".into(),
            },
            created: at,
            last_modified: at,
        };
        assert_eq!(link.class(), LinkClass::Soft);
        assert_eq!(link.target_path(), "/somewhere");
        assert!(link.target_id().is_none());
    }

    #[test]
    fn payload_with_id_is_hard() {
        let id = ObjectId::generate();
        let spec = LinkPayload::hard(id).into_spec().unwrap();
        assert_eq!(spec, LinkSpec::Hard { id });
        assert_eq!(spec.class(), LinkClass::Hard);
    }

    #[test]
    fn payload_with_h5path_is_soft() {
        let spec = LinkPayload::soft("/somewhere").into_spec().unwrap();
        assert_eq!(
            spec,
            LinkSpec::Soft {
                path: "/somewhere".into()
            }
        );
    }

    #[test]
    fn payload_shape_errors() {
        let both = LinkPayload {
            id: Some(ObjectId::generate().to_string()),
            h5path: Some("/x".into()),
        };
        assert!(matches!(both.into_spec(), Err(LinkError::InvalidRequest(_))));
        assert!(matches!(
            LinkPayload::default().into_spec(),
            Err(LinkError::InvalidRequest(_))
        ));
        assert!(matches!(
            LinkPayload::soft("").into_spec(),
            Err(LinkError::InvalidRequest(_))
        ));
        let bad_id = LinkPayload {
            id: Some("zzz".into()),
            h5path: None,
        };
        assert!(matches!(bad_id.into_spec(), Err(LinkError::InvalidRequest(_))));
    }

    #[test]
    fn payload_deserializes_from_json() {
        let p: LinkPayload = serde_json::from_str(r#"{"h5path": "/somewhere"}"#).unwrap();
        assert_eq!(p, LinkPayload::soft("/somewhere"));
    }

    #[test]
    fn matches_spec_compares_target_only() {
        let id = ObjectId::generate();
        let link = hard_link(id);
        assert!(link.matches_spec(&LinkSpec::Hard { id }));
        assert!(!link.matches_spec(&LinkSpec::Hard {
            id: ObjectId::generate()
        }));
        assert!(!link.matches_spec(&LinkSpec::Soft { path: "/g1".into() }));
    }
}
