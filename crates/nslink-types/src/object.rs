use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Identifier of any object in the namespace.
///
/// Groups, datasets and committed datatypes share one identifier space, so a
/// hard link can point at any of them by `ObjectId` alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

/// An [`ObjectId`] naming the group a request is addressed to.
pub type GroupId = ObjectId;

impl ObjectId {
    /// Allocate a fresh identifier (time-ordered UUID v7).
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse the hyphenated textual form used in request paths and bodies.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidObjectId(s.to_string()))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ObjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The collection an object belongs to.
///
/// Only used to render reference paths such as `/groups/{id}`; the link
/// subsystem never looks inside non-group objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Group,
    Dataset,
    Datatype,
}

impl ObjectKind {
    /// Path segment of this kind's collection.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Group => "groups",
            Self::Dataset => "datasets",
            Self::Datatype => "datatypes",
        }
    }

    /// Reference path for an object of this kind, e.g. `/groups/{id}`.
    pub fn href(&self, id: &ObjectId) -> String {
        format!("/{}/{id}", self.collection())
    }

    /// Inverse of [`ObjectKind::collection`].
    pub fn from_collection(segment: &str) -> Result<Self, TypeError> {
        match segment {
            "groups" => Ok(Self::Group),
            "datasets" => Ok(Self::Dataset),
            "datatypes" => Ok(Self::Datatype),
            other => Err(TypeError::UnknownCollection(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Group => "group",
            Self::Dataset => "dataset",
            Self::Datatype => "datatype",
        };
        f.write_str(s)
    }
}
