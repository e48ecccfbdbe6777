//! HTTP server for nslink.
//!
//! Serves the link API of one or more domains over HTTP. The domain of a
//! request comes from its `Host` header (or a `host` query parameter); each
//! domain has a root group, and groups hold named links.

pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod links;
pub mod repr;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiErrorResponse, ServerError, ServerResult};
pub use host::RequestHost;
pub use server::NslinkServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::util::ServiceExt;

    fn app(config: ServerConfig) -> axum::Router {
        router::build_router(AppState::new(config).unwrap())
    }

    fn request(method: Method, uri: &str, host: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("host", host)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app(ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let response = app(ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(json_body(response).await["name"], "nslink-server");
    }

    #[tokio::test]
    async fn put_then_get_domain() {
        let app = app(ServerConfig::default());
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request(Method::PUT, "/", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let root = json_body(response).await["root"].clone();

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["root"], root);

        let response = app
            .oneshot(request(Method::PUT, "/", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn domain_create_can_be_disabled() {
        let config = ServerConfig {
            allow_domain_create: false,
            ..ServerConfig::default()
        };
        let response = app(config)
            .oneshot(request(Method::PUT, "/", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn group_lifecycle() {
        let config = ServerConfig {
            domains: vec!["tall".into()],
            ..ServerConfig::default()
        };
        let app = app(config);

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/groups", "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["linkCount"], 0);
        let id = body["id"].as_str().unwrap().to_string();
        let uri = format!("/groups/{id}");

        let response = app
            .clone()
            .oneshot(request(Method::GET, &uri, "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, &uri, "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request(Method::GET, &uri, "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_group_cannot_be_deleted() {
        let config = ServerConfig {
            domains: vec!["tall".into()],
            ..ServerConfig::default()
        };
        let state = AppState::new(config).unwrap();
        let root = state.root_of("tall.test").unwrap();
        let response = router::build_router(state)
            .oneshot(request(Method::DELETE, &format!("/groups/{root}"), "tall.test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn link_count_tracks_puts_and_deletes() {
        let config = ServerConfig {
            domains: vec!["tall".into()],
            ..ServerConfig::default()
        };
        let state = AppState::new(config).unwrap();
        let root = state.root_of("tall.test").unwrap();
        for name in ["a", "b", "c"] {
            state
                .links
                .put(&root, name, nslink_links::LinkPayload::soft("/x"))
                .unwrap();
        }
        state.links.remove(&root, "b").unwrap();

        let response = router::build_router(state)
            .oneshot(request(Method::GET, &format!("/groups/{root}"), "tall.test"))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["linkCount"], 2);
    }
}
