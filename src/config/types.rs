//! Groups, routes, and CLI surface descriptors.

use crate::error::ConfigError;
use crate::fixtures::Request;
use crate::plugin::{resolve_handler, PluginRegistry};
use crate::transport::Handler;
use http::Method;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A route group: shared path prefix, method, and handler chain.
#[derive(Default, Clone, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    /// Parent group, by name.
    pub group: String,
    pub method: String,
    #[serde(rename = "httpPath")]
    pub http_path: String,
    /// Handler references, `pluginKey.HandlerName(args)`.
    pub handlers: Vec<String>,

    /// Handlers bound against a plugin registry by [`Group::init`].
    #[serde(skip)]
    pub bound: Vec<Handler>,
    /// Example request fixtures owned by this group, keyed by fixture name.
    #[serde(skip)]
    pub requests: HashMap<String, Request>,
}

impl Group {
    /// Resolve every declared handler reference against the registry,
    /// in declared order.
    pub fn init(&mut self, registry: &dyn PluginRegistry) -> Result<(), ConfigError> {
        for reference in &self.handlers {
            self.bound.push(resolve_handler(registry, reference)?);
        }

        debug!(group = %self.name, handlers = self.bound.len(), "group initialized");
        Ok(())
    }

    /// Declared method parsed into the HTTP vocabulary; defaults to GET.
    pub fn method(&self) -> Result<Method, http::method::InvalidMethod> {
        parse_method(&self.method)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("method", &self.method)
            .field("http_path", &self.http_path)
            .field("handlers", &self.handlers)
            .field("bound", &self.bound.len())
            .field("requests", &self.requests.keys())
            .finish()
    }
}

/// A listening route.
#[derive(Default, Clone, Deserialize)]
#[serde(default)]
pub struct Route {
    pub name: String,
    /// Owning group, by name.
    pub group: String,
    pub method: String,
    #[serde(rename = "httpPath")]
    pub http_path: String,
    /// Directory or file to serve statically.
    pub target: String,
    /// Handler references, `pluginKey.HandlerName(args)`.
    pub handlers: Vec<String>,

    /// Handlers bound against a plugin registry by [`Route::init`].
    #[serde(skip)]
    pub bound: Vec<Handler>,
    /// Example request fixture bound to this route, if one shares its name.
    #[serde(skip)]
    pub request_example: Option<Request>,
}

impl Route {
    /// Resolve every declared handler reference against the registry,
    /// in declared order.
    pub fn init(&mut self, registry: &dyn PluginRegistry) -> Result<(), ConfigError> {
        for reference in &self.handlers {
            self.bound.push(resolve_handler(registry, reference)?);
        }

        debug!(route = %self.name, handlers = self.bound.len(), "route initialized");
        Ok(())
    }

    /// Declared method parsed into the HTTP vocabulary; defaults to GET.
    pub fn method(&self) -> Result<Method, http::method::InvalidMethod> {
        parse_method(&self.method)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("method", &self.method)
            .field("http_path", &self.http_path)
            .field("target", &self.target)
            .field("handlers", &self.handlers)
            .field("bound", &self.bound.len())
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ HTTPPath: \"{}\", Target: \"{}\", Plugin Handlers: {:?} }}",
            self.http_path, self.target, self.handlers
        )
    }
}

fn parse_method(method: &str) -> Result<Method, http::method::InvalidMethod> {
    if method.is_empty() {
        return Ok(Method::GET);
    }

    method.to_ascii_uppercase().parse()
}

/// A dynamic CLI command declared in configuration. Opaque to the merge
/// engine; consumed by the host's process bootstrap.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Command {
    pub name: String,
    pub usage: String,
    /// Plugins that must be loaded before this command runs.
    pub require: String,

    pub prehook: String,
    pub handler: String,
    pub posthook: String,
}

/// A dynamic CLI flag declared in configuration. Opaque to the merge engine.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Flag {
    pub name: String,
    pub usage: String,
    #[serde(rename = "defaultValue")]
    pub default_value: String,
}
