use std::sync::Arc;

use nslink_links::{LinkController, LinkError, LinkPayload, LinkSpec, LinkStore};
use nslink_namespace::{GroupRecord, InMemoryNamespace, Namespace, NamespaceError};
use nslink_types::GroupId;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub namespace: Arc<InMemoryNamespace>,
    pub links: LinkController,
}

impl AppState {
    /// Fresh namespace with the configured startup domains created.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = Self::with_namespace(config, Arc::new(InMemoryNamespace::new()));
        for domain in state.config.startup_domains() {
            match state.namespace.create_domain(&domain) {
                Ok(record) => tracing::info!(domain, root = %record.root, "domain created"),
                Err(NamespaceError::DomainExists(_)) => {
                    tracing::warn!(domain, "domain listed twice in config")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(state)
    }

    pub fn with_namespace(config: ServerConfig, namespace: Arc<InMemoryNamespace>) -> Self {
        let store = LinkStore::new(namespace.clone());
        Self {
            config: Arc::new(config),
            namespace,
            links: LinkController::new(Arc::new(store)),
        }
    }

    /// Root group of `domain`.
    pub fn root_of(&self, domain: &str) -> ServerResult<GroupId> {
        Ok(self.namespace.root_group_id(domain)?)
    }

    /// Reject a hard link whose target lives in another domain.
    ///
    /// Objects of other domains are reported as invalid targets, the same as
    /// ids that name nothing. Malformed payloads are left to the put itself.
    pub fn check_link_target(&self, domain: &str, payload: &LinkPayload) -> ServerResult<()> {
        let Ok(LinkSpec::Hard { id }) = payload.clone().into_spec() else {
            return Ok(());
        };
        match self.namespace.object_domain(&id)? {
            Some(owner) if owner != domain => Err(LinkError::InvalidTarget(id).into()),
            _ => Ok(()),
        }
    }

    /// Parse `raw` as a group id and check the group belongs to `domain`.
    ///
    /// Malformed ids and groups of other domains are reported as not found.
    pub fn scoped_group(&self, domain: &str, raw: &str) -> ServerResult<GroupRecord> {
        let not_found = || ServerError::NotFound(format!("group {raw}"));
        let id = GroupId::parse(raw).map_err(|_| not_found())?;
        match self.namespace.group(&id)? {
            Some(group) if group.domain == domain => Ok(group),
            _ => Err(not_found()),
        }
    }
}
