//! Domain selection from the request's host.

use axum::http::header::HOST;
use axum::http::HeaderMap;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::repr::Href;

/// The domain a request addresses, plus the authority used to build
/// absolute hrefs in responses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestHost {
    domain: String,
    authority: String,
}

impl RequestHost {
    /// Pick the domain from a `host` query parameter if present, else from
    /// the `Host` header. Any port is ignored for domain selection.
    pub fn from_parts(
        config: &ServerConfig,
        headers: &HeaderMap,
        query_host: Option<&str>,
    ) -> ServerResult<Self> {
        let header = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let query = query_host.map(str::trim).filter(|h| !h.is_empty());

        let raw = query
            .or(header)
            .ok_or_else(|| ServerError::BadRequest("request has no host".into()))?;
        let domain = config.qualify_domain(strip_port(raw));
        let authority = header.map_or_else(|| domain.clone(), str::to_string);
        Ok(Self { domain, authority })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Absolute href for `path` on this host.
    pub fn href(&self, rel: &'static str, path: &str) -> Href {
        Href {
            rel,
            href: format!("http://{}{}", self.authority, path),
        }
    }
}

fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return authority;
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(host: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(HOST, HeaderValue::from_str(host).unwrap());
        h
    }

    #[test]
    fn domain_from_host_header() {
        let config = ServerConfig::default();
        let host = RequestHost::from_parts(&config, &headers("tall.test:5000"), None).unwrap();
        assert_eq!(host.domain(), "tall.test");
        assert_eq!(
            host.href("self", "/groups").href,
            "http://tall.test:5000/groups"
        );
    }

    #[test]
    fn query_host_wins() {
        let config = ServerConfig::default();
        let host =
            RequestHost::from_parts(&config, &headers("localhost:5000"), Some("group1k")).unwrap();
        assert_eq!(host.domain(), "group1k.test");
        assert!(host.href("root", "/").href.starts_with("http://localhost:5000"));
    }

    #[test]
    fn missing_host_is_bad_request() {
        let config = ServerConfig::default();
        let err = RequestHost::from_parts(&config, &HeaderMap::new(), None).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[test]
    fn strip_port_variants() {
        assert_eq!(strip_port("tall.test:5000"), "tall.test");
        assert_eq!(strip_port("tall.test"), "tall.test");
        assert_eq!(strip_port("tall.test:"), "tall.test:");
        assert_eq!(strip_port("[::1]:5000"), "[::1]:5000");
    }
}
