//! Dynamic resolution of handler references against a plugin registry.
//!
//! A [`PluginRegistry`] is a capability injected by the host; it may be backed
//! by a compiled-in table ([`StaticRegistry`]), dynamic library loading, or a
//! process boundary — the resolver assumes nothing beyond the two lookups.
//!
//! Plugins are compiled independently and may export a symbol in whichever
//! supported shape is most convenient for them; [`PluginSymbol`] is the closed
//! set of those shapes and [`resolve_handler`] is the single adaptation point
//! that turns any of them into a transport-convention [`Handler`].

use crate::error::ConfigError;
use crate::handler::HandlerRef;
use crate::transport::{into_handler, CommonHandler, Handler, HandlerFactory};
use std::collections::HashMap;
use tracing::debug;

/// A loaded plugin: a named bag of exported symbols.
pub trait PluginHandle {
    /// Resolve an exported symbol by name.
    fn symbol(&self, name: &str) -> Option<PluginSymbol>;
}

/// Registry of loaded plugins keyed by the identifiers used in handler
/// references. Thread-safety is the implementor's contract; the resolver runs
/// on the initialization path only.
pub trait PluginRegistry {
    /// Look up a plugin by key.
    fn plugin(&self, key: &str) -> Option<&dyn PluginHandle>;
}

/// A symbol exported by a plugin, in one of the accepted handler shapes.
#[derive(Clone)]
pub enum PluginSymbol {
    /// Already in the transport runtime's native calling convention.
    Native(Handler),
    /// In the framework's common calling convention; adapted on resolution.
    Common(CommonHandler),
    /// A factory invoked with the reference's argument list.
    Factory(HandlerFactory),
    /// A symbol the registry backend could not classify. Carries a
    /// description of the encountered type; always fatal to resolution.
    Unsupported(String),
}

impl std::fmt::Debug for PluginSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginSymbol::Native(_) => f.write_str("Native(..)"),
            PluginSymbol::Common(_) => f.write_str("Common(..)"),
            PluginSymbol::Factory(_) => f.write_str("Factory(..)"),
            PluginSymbol::Unsupported(t) => write!(f, "Unsupported({t:?})"),
        }
    }
}

/// Resolve a `pluginKey.HandlerName(args)` reference into a bound handler.
///
/// Parses the reference, looks the plugin up by key, resolves the symbol by
/// name, then adapts across the accepted shapes. Factories are invoked with
/// the parsed argument list and their errors propagated.
pub fn resolve_handler(
    registry: &dyn PluginRegistry,
    reference: &str,
) -> Result<Handler, ConfigError> {
    let parsed = HandlerRef::parse(reference)?;

    let plugin = registry
        .plugin(&parsed.plugin_key)
        .ok_or_else(|| ConfigError::PluginNotFound {
            key: parsed.plugin_key.clone(),
        })?;

    let symbol = plugin
        .symbol(&parsed.symbol)
        .ok_or_else(|| ConfigError::SymbolNotFound {
            key: parsed.plugin_key.clone(),
            symbol: parsed.symbol.clone(),
        })?;

    debug!(
        plugin = %parsed.plugin_key,
        symbol = %parsed.symbol,
        args = ?parsed.args,
        shape = ?symbol,
        "handler reference resolved"
    );

    match symbol {
        PluginSymbol::Native(h) => Ok(h),
        PluginSymbol::Common(c) => Ok(into_handler(c)),
        PluginSymbol::Factory(f) => {
            let common = f(&parsed.args).map_err(|source| ConfigError::Factory {
                reference: reference.to_string(),
                source,
            })?;
            Ok(into_handler(common))
        }
        PluginSymbol::Unsupported(type_name) => {
            Err(ConfigError::UnsupportedHandlerSignature { type_name })
        }
    }
}

/// Compiled-in plugin: symbols registered by name at startup.
#[derive(Debug, Default)]
pub struct StaticPlugin {
    symbols: HashMap<String, PluginSymbol>,
}

impl PluginHandle for StaticPlugin {
    fn symbol(&self, name: &str) -> Option<PluginSymbol> {
        self.symbols.get(name).cloned()
    }
}

/// Compiled-in [`PluginRegistry`] for hosts that link their plugins into the
/// binary (and for tests). Keys and symbol names match the identifiers used
/// in handler references.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    plugins: HashMap<String, StaticPlugin>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol under `key.name`, replacing any previous export.
    pub fn register(&mut self, key: &str, name: &str, symbol: PluginSymbol) {
        debug!(plugin = %key, symbol = %name, shape = ?symbol, "symbol registered");
        self.plugins
            .entry(key.to_string())
            .or_default()
            .symbols
            .insert(name.to_string(), symbol);
    }

    pub fn register_native(&mut self, key: &str, name: &str, handler: Handler) {
        self.register(key, name, PluginSymbol::Native(handler));
    }

    pub fn register_common(&mut self, key: &str, name: &str, handler: CommonHandler) {
        self.register(key, name, PluginSymbol::Common(handler));
    }

    pub fn register_factory(&mut self, key: &str, name: &str, factory: HandlerFactory) {
        self.register(key, name, PluginSymbol::Factory(factory));
    }
}

impl PluginRegistry for StaticRegistry {
    fn plugin(&self, key: &str) -> Option<&dyn PluginHandle> {
        self.plugins.get(key).map(|p| p as &dyn PluginHandle)
    }
}
