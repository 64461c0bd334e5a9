//! Root configuration assembly.
//!
//! [`Config::from_file`] decodes the root descriptor, expands its include
//! tree through the merge engine, applies defaults, resolves example fixture
//! inheritance, and attaches fixtures to the groups and routes that own
//! them. The document is only published once the whole include tree has
//! merged successfully; there is no partial-configuration fallback.

pub mod fragment;
pub mod types;

pub use fragment::{expand_includes, load_include, merge, Fragment, DESCRIPTOR_EXT};
pub use types::{Command, Flag, Group, Route};

use crate::error::ConfigError;
use crate::fixtures::{self, Request, Response};
use anyhow::Context as _;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use serde::Deserialize;

/// The resolved configuration for a service instance.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name of the service.
    pub name: String,

    /// Base working directory; defaults to `./`.
    pub dir: String,
    pub port: u16,
    #[serde(rename = "tlsPort")]
    pub tls_port: u16,
    /// Directory holding TLS certificates.
    #[serde(rename = "tlsDir")]
    pub tls_dir: String,

    /// The merged document: root fields plus every included fragment.
    #[serde(flatten)]
    pub document: Fragment,

    /// Example request fixtures keyed by name, inheritance-resolved.
    #[serde(skip)]
    pub example_requests: HashMap<String, Request>,
    /// Example response fixtures keyed by name, inheritance-resolved.
    #[serde(skip)]
    pub example_responses: HashMap<String, Response>,
}

impl Config {
    /// Load and fully resolve a configuration from the root descriptor file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Config> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to decode config {}", path.display()))?;

        cfg.document = expand_includes(std::mem::take(&mut cfg.document))?;

        if cfg.dir.is_empty() {
            cfg.dir = "./".to_string();
        }

        cfg.resolve_examples();
        debug!(
            name = %cfg.name,
            groups = cfg.document.groups.len(),
            routes = cfg.document.routes.len(),
            "configuration loaded"
        );

        Ok(cfg)
    }

    /// Return the first group with the given name, in declared order.
    ///
    /// An empty name matches nothing and is not an error; a non-empty name
    /// with no match is [`ConfigError::GroupNotFound`].
    pub fn group(&self, name: &str) -> Result<Option<&Group>, ConfigError> {
        if name.is_empty() {
            return Ok(None);
        }

        self.document
            .groups
            .iter()
            .find(|g| g.name == name)
            .map(Some)
            .ok_or_else(|| ConfigError::GroupNotFound {
                name: name.to_string(),
            })
    }

    /// Build the fixture maps, resolve inheritance, and attach fixtures to
    /// their owning groups and routes.
    ///
    /// Binding order matters: a request's own declared response names are
    /// bound before inheritance runs, so a child with no resolvable
    /// responses of its own inherits the parent's bound examples.
    fn resolve_examples(&mut self) {
        let mut responses: HashMap<String, Response> = self
            .document
            .responses
            .iter()
            .map(|r| (r.name.clone(), r.clone()))
            .collect();

        if let Err(err) = fixtures::resolve_responses(&mut responses) {
            warn!(error = %err, "example response inheritance left unresolved chains");
        }

        let mut requests: HashMap<String, Request> = self
            .document
            .requests
            .iter()
            .map(|r| (r.name.clone(), r.clone()))
            .collect();

        for request in requests.values_mut() {
            for name in &request.responses {
                if let Some(resolved) = responses.get(name) {
                    request.response_examples.push(resolved.clone());
                }
            }
        }

        if let Err(err) = fixtures::resolve_requests(&mut requests) {
            warn!(error = %err, "example request inheritance left unresolved chains");
        }

        for group in &mut self.document.groups {
            group.requests = requests
                .iter()
                .filter(|(_, r)| r.group == group.name)
                .map(|(name, r)| (name.clone(), r.clone()))
                .collect();
        }

        for route in &mut self.document.routes {
            route.request_example = requests.get(&route.name).cloned();
        }

        self.example_requests = requests;
        self.example_responses = responses;
    }
}
