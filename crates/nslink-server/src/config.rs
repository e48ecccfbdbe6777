use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Appended to bare domain names, so `tall` is served as `tall.test`.
    pub domain_suffix: String,
    /// Domains created when the server starts.
    pub domains: Vec<String>,
    pub max_connections: usize,
    /// Whether `PUT /` may create new domains.
    pub allow_domain_create: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            domain_suffix: "test".into(),
            domains: Vec::new(),
            max_connections: 256,
            allow_domain_create: true,
        }
    }
}

impl ServerConfig {
    /// Read a TOML config file. Keys missing from the file keep their
    /// default values.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Fully qualified, lowercased form of a domain name.
    pub fn qualify_domain(&self, name: &str) -> String {
        let name = name.trim().trim_end_matches('.').to_ascii_lowercase();
        let suffix = self.domain_suffix.trim_matches('.').to_ascii_lowercase();
        if suffix.is_empty() || name == suffix || name.ends_with(&format!(".{suffix}")) {
            name
        } else {
            format!("{name}.{suffix}")
        }
    }

    /// Every configured domain, qualified.
    pub fn startup_domains(&self) -> Vec<String> {
        self.domains.iter().map(|d| self.qualify_domain(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.domain_suffix, "test");
        assert_eq!(c.max_connections, 256);
        assert!(c.allow_domain_create);
        assert!(c.domains.is_empty());
    }

    #[test]
    fn qualify_appends_suffix_once() {
        let c = ServerConfig::default();
        assert_eq!(c.qualify_domain("tall"), "tall.test");
        assert_eq!(c.qualify_domain("Tall.Test"), "tall.test");
        assert_eq!(c.qualify_domain("group1k.test."), "group1k.test");

        let bare = ServerConfig {
            domain_suffix: String::new(),
            ..ServerConfig::default()
        };
        assert_eq!(bare.qualify_domain("tall"), "tall");
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:8080\"").unwrap();
        writeln!(file, "domains = [\"tall\", \"group1k\"]").unwrap();

        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.startup_domains(), vec!["tall.test", "group1k.test"]);
        assert_eq!(c.max_connections, 256);
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_connections = \"many\"").unwrap();
        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }

    #[test]
    fn config_serializes_to_toml() {
        let text = toml::to_string(&ServerConfig::default()).unwrap();
        let back: ServerConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, ServerConfig::default());
    }
}
