use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::host::RequestHost;
use crate::repr::{DomainResponse, GroupResponse, HealthResponse, HrefsResponse};
use crate::state::AppState;

/// Query parameters accepted by every domain-scoped endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HostQuery {
    pub host: Option<String>,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "nslink-server",
        "version": env!("CARGO_PKG_VERSION"),
        "domain_suffix": state.config.domain_suffix,
        "allow_domain_create": state.config.allow_domain_create,
    }))
}

fn request_host(state: &AppState, headers: &HeaderMap, query: &HostQuery) -> ServerResult<RequestHost> {
    RequestHost::from_parts(&state.config, headers, query.host.as_deref())
}

fn domain_response(state: &AppState, host: &RequestHost) -> ServerResult<DomainResponse> {
    let Some(domain) = state.namespace.domain(host.domain())? else {
        return Err(ServerError::NotFound(format!("domain {}", host.domain())));
    };
    let root = state
        .namespace
        .group(&domain.root)?
        .ok_or_else(|| ServerError::Internal(format!("root group of {} missing", domain.name)))?;
    Ok(DomainResponse {
        root: domain.root,
        created: domain.created,
        last_modified: root.last_modified,
        hrefs: vec![
            host.href("self", "/"),
            host.href("root", &format!("/groups/{}", domain.root)),
        ],
    })
}

/// `GET /`: the domain and its root group.
pub async fn get_domain(
    State(state): State<AppState>,
    Query(query): Query<HostQuery>,
    headers: HeaderMap,
) -> ServerResult<Json<DomainResponse>> {
    let host = request_host(&state, &headers, &query)?;
    Ok(Json(domain_response(&state, &host)?))
}

/// `PUT /`: create the domain with an empty root group.
pub async fn put_domain(
    State(state): State<AppState>,
    Query(query): Query<HostQuery>,
    headers: HeaderMap,
) -> ServerResult<(StatusCode, Json<DomainResponse>)> {
    let host = request_host(&state, &headers, &query)?;
    if !state.config.allow_domain_create {
        return Err(ServerError::Forbidden(format!(
            "domain creation is disabled: {}",
            host.domain()
        )));
    }
    let record = state.namespace.create_domain(host.domain())?;
    tracing::info!(domain = %record.name, root = %record.root, "domain created");
    Ok((StatusCode::CREATED, Json(domain_response(&state, &host)?)))
}

/// `POST /groups`: a new group, not linked from anywhere yet.
pub async fn create_group(
    State(state): State<AppState>,
    Query(query): Query<HostQuery>,
    headers: HeaderMap,
) -> ServerResult<(StatusCode, Json<GroupResponse>)> {
    let host = request_host(&state, &headers, &query)?;
    let root = state.root_of(host.domain())?;
    let id = state.namespace.create_group(host.domain())?;
    let group = state.scoped_group(host.domain(), &id.to_string())?;
    Ok((
        StatusCode::CREATED,
        Json(GroupResponse::new(&host, &root, &group, 0)),
    ))
}

/// `GET /groups/:id`.
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HostQuery>,
    headers: HeaderMap,
) -> ServerResult<Json<GroupResponse>> {
    let host = request_host(&state, &headers, &query)?;
    let root = state.root_of(host.domain())?;
    let group = state.scoped_group(host.domain(), &id)?;
    let link_count = state.links.store().active_count(&group.id)?;
    Ok(Json(GroupResponse::new(&host, &root, &group, link_count)))
}

/// `DELETE /groups/:id`: remove the group and its own links. Links in other
/// groups that point at it are left in place.
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HostQuery>,
    headers: HeaderMap,
) -> ServerResult<Json<HrefsResponse>> {
    let host = request_host(&state, &headers, &query)?;
    let root = state.root_of(host.domain())?;
    let group = state.scoped_group(host.domain(), &id)?;
    if !state.namespace.delete_group(&group.id)? {
        return Err(ServerError::NotFound(format!("group {id}")));
    }
    state.links.store().drop_group(&group.id)?;
    tracing::info!(domain = host.domain(), group = %group.id, "group deleted");
    Ok(Json(HrefsResponse {
        hrefs: vec![
            host.href("root", &format!("/groups/{root}")),
            host.href("home", "/"),
        ],
    }))
}
