//! Handlers under `/groups/:id/`.
//!
//! Link names may contain any character except `/`, so the router hands
//! everything after the group id to these handlers as one wildcard and the
//! split into collection and name happens here. That way an empty name or a
//! name with a separator reaches validation and is answered with 400 instead
//! of falling through to a routing 404.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use nslink_links::{validate_link_name, LinkPayload, PageRequest};
use nslink_types::GroupId;
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::host::RequestHost;
use crate::repr::{link_path, Href, HrefsResponse, LinkListResponse, LinkRepr, LinkResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LinkQuery {
    pub host: Option<String>,
    #[serde(rename = "Limit")]
    pub limit: Option<String>,
    #[serde(rename = "Marker")]
    pub marker: Option<String>,
}

/// What the path after `/groups/:id/` addresses.
#[derive(Debug, PartialEq, Eq)]
enum GroupResource<'a> {
    Links,
    Link(&'a str),
    Unknown,
}

impl<'a> GroupResource<'a> {
    fn parse(rest: &'a str) -> Self {
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        if rest == "links" {
            return Self::Links;
        }
        match rest.strip_prefix("links/") {
            Some(name) => Self::Link(name),
            None => Self::Unknown,
        }
    }
}

/// Request context shared by the three handlers.
struct Scope {
    host: RequestHost,
    root: GroupId,
    group: GroupId,
}

impl Scope {
    fn resolve(state: &AppState, headers: &HeaderMap, query: &LinkQuery, id: &str) -> ServerResult<Self> {
        let host = RequestHost::from_parts(&state.config, headers, query.host.as_deref())?;
        let root = state.root_of(host.domain())?;
        let group = state.scoped_group(host.domain(), id)?.id;
        Ok(Self { host, root, group })
    }

    fn link_href(&self, rel: &'static str, name: &str) -> Href {
        self.host.href(rel, &link_path(&self.group, name))
    }
}

fn unknown_resource(id: &str, rest: &str) -> ServerError {
    ServerError::NotFound(format!("/groups/{id}/{rest}"))
}

/// `GET /groups/:id/links` and `GET /groups/:id/links/:name`.
pub async fn get_group_resource(
    State(state): State<AppState>,
    Path((id, rest)): Path<(String, String)>,
    Query(query): Query<LinkQuery>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    let scope = Scope::resolve(&state, &headers, &query, &id)?;
    match GroupResource::parse(&rest) {
        GroupResource::Links => list_links(&state, &scope, &query).map(IntoResponse::into_response),
        GroupResource::Link(name) => {
            let link = state.links.get(&scope.group, name)?;
            let body = LinkResponse::new(&scope.host, &scope.root, &scope.group, &link);
            Ok(Json(body).into_response())
        }
        GroupResource::Unknown => Err(unknown_resource(&id, &rest)),
    }
}

fn list_links(state: &AppState, scope: &Scope, query: &LinkQuery) -> ServerResult<Json<LinkListResponse>> {
    let request = PageRequest::parse(query.limit.as_deref(), query.marker.as_deref())?;
    let page = state.links.list(&scope.group, &request)?;
    Ok(Json(LinkListResponse {
        links: page.links.iter().map(LinkRepr::from).collect(),
        has_more: page.has_more,
        hrefs: vec![
            scope
                .host
                .href("self", &format!("/groups/{}/links", scope.group)),
            scope.host.href("owner", &format!("/groups/{}", scope.group)),
            scope.host.href("root", &format!("/groups/{}", scope.root)),
        ],
    }))
}

/// `PUT /groups/:id/links/:name` with a body of `{"id": ...}` or
/// `{"h5path": ...}`.
pub async fn put_group_resource(
    State(state): State<AppState>,
    Path((id, rest)): Path<(String, String)>,
    Query(query): Query<LinkQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<LinkResponse>)> {
    let scope = Scope::resolve(&state, &headers, &query, &id)?;
    let name = match GroupResource::parse(&rest) {
        GroupResource::Link(name) => name,
        GroupResource::Links => return Err(ServerError::MethodNotAllowed),
        GroupResource::Unknown => return Err(unknown_resource(&id, &rest)),
    };
    // Group and name problems take precedence over a malformed body.
    validate_link_name(name)?;
    let payload: LinkPayload = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("invalid link payload: {e}")))?;
    state.check_link_target(scope.host.domain(), &payload)?;

    let write = state.links.put(&scope.group, name, payload)?;
    tracing::debug!(group = %scope.group, name, outcome = ?write.outcome, "link put");
    let body = LinkResponse::new(&scope.host, &scope.root, &scope.group, &write.link);
    Ok((StatusCode::CREATED, Json(body)))
}

/// `DELETE /groups/:id/links/:name`.
pub async fn delete_group_resource(
    State(state): State<AppState>,
    Path((id, rest)): Path<(String, String)>,
    Query(query): Query<LinkQuery>,
    headers: HeaderMap,
) -> ServerResult<Json<HrefsResponse>> {
    let scope = Scope::resolve(&state, &headers, &query, &id)?;
    let name = match GroupResource::parse(&rest) {
        GroupResource::Link(name) => name,
        GroupResource::Links => return Err(ServerError::MethodNotAllowed),
        GroupResource::Unknown => return Err(unknown_resource(&id, &rest)),
    };
    state.links.remove(&scope.group, name)?;
    Ok(Json(HrefsResponse {
        hrefs: vec![
            scope.link_href("self", name),
            scope.host.href("owner", &format!("/groups/{}", scope.group)),
            scope.host.href("root", &format!("/groups/{}", scope.root)),
        ],
    }))
}
