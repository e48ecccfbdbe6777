//! JSON bodies of successful responses.

use nslink_links::{Link, LinkClass, LinkTarget};
use nslink_namespace::GroupRecord;
use nslink_types::{GroupId, ObjectId, Timestamp};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::host::RequestHost;

/// A related resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Href {
    pub rel: &'static str,
    pub href: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// One link as it appears in a get or a listing.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRepr {
    pub name: String,
    pub class: LinkClass,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h5path: Option<String>,
    pub created: Timestamp,
    pub last_modified: Timestamp,
}

impl From<&Link> for LinkRepr {
    fn from(link: &Link) -> Self {
        let (id, collection, h5path) = match &link.target {
            LinkTarget::Hard { id, kind } => (Some(*id), Some(kind.collection()), None),
            LinkTarget::Soft { path } => (None, None, Some(path.clone())),
        };
        Self {
            name: link.name.clone(),
            class: link.class(),
            target: link.target_path(),
            id,
            collection,
            h5path,
            created: link.created,
            last_modified: link.last_modified,
        }
    }
}

/// Response to get and put of a single link.
#[derive(Clone, Debug, Serialize)]
pub struct LinkResponse {
    #[serde(flatten)]
    pub link: LinkRepr,
    pub hrefs: Vec<Href>,
}

/// Bytes escaped in a link name used as one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path of link `name` in `group`, with the name percent-encoded.
pub fn link_path(group: &GroupId, name: &str) -> String {
    format!("/groups/{group}/links/{}", utf8_percent_encode(name, SEGMENT))
}

impl LinkResponse {
    pub fn new(host: &RequestHost, root: &GroupId, group: &GroupId, link: &Link) -> Self {
        let mut hrefs = vec![
            host.href("self", &link_path(group, &link.name)),
            host.href("owner", &format!("/groups/{group}")),
            host.href("root", &format!("/groups/{root}")),
        ];
        if let LinkTarget::Hard { .. } = link.target {
            hrefs.push(host.href("target", &link.target_path()));
        }
        Self {
            link: link.into(),
            hrefs,
        }
    }
}

/// Response to a listing.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListResponse {
    pub links: Vec<LinkRepr>,
    pub has_more: bool,
    pub hrefs: Vec<Href>,
}

/// Response carrying only hrefs, used by deletes.
#[derive(Clone, Debug, Serialize)]
pub struct HrefsResponse {
    pub hrefs: Vec<Href>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: GroupId,
    pub created: Timestamp,
    pub last_modified: Timestamp,
    pub link_count: usize,
    pub hrefs: Vec<Href>,
}

impl GroupResponse {
    pub fn new(host: &RequestHost, root: &GroupId, group: &GroupRecord, link_count: usize) -> Self {
        let id = group.id;
        Self {
            id,
            created: group.created,
            last_modified: group.last_modified,
            link_count,
            hrefs: vec![
                host.href("self", &format!("/groups/{id}")),
                host.href("links", &format!("/groups/{id}/links")),
                host.href("root", &format!("/groups/{root}")),
                host.href("home", "/"),
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResponse {
    pub root: GroupId,
    pub created: Timestamp,
    pub last_modified: Timestamp,
    pub hrefs: Vec<Href>,
}
