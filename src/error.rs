//! Error taxonomy for configuration loading and handler resolution.
//!
//! Grammar and resolution failures are fatal to the initialization step that
//! triggered them; include-merge and decode failures abort the whole
//! configuration load. Response-adaptation type mismatches never surface
//! here — they are degraded to a logged 500 at the adapter boundary
//! (see [`crate::transport`]).

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading configuration or resolving plugin handlers.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A handler reference did not contain a `key.Handler` pair.
    #[error("expected key and handler, received {reference:?}")]
    MalformedReference { reference: String },

    /// A handler reference opened an argument list without closing it.
    #[error("expected ending parenthesis, received {reference:?}")]
    UnterminatedArgumentList { reference: String },

    /// No plugin is registered under the referenced key.
    #[error("plugin not found: {key:?}")]
    PluginNotFound { key: String },

    /// The plugin exists but exports no symbol with the referenced name.
    #[error("symbol {symbol:?} not found in plugin {key:?}")]
    SymbolNotFound { key: String, symbol: String },

    /// The resolved symbol is not one of the supported handler shapes.
    #[error("invalid handler signature encountered: {type_name} is not supported")]
    UnsupportedHandlerSignature { type_name: String },

    /// A handler factory was invoked and reported a failure of its own.
    #[error("handler factory {reference:?} failed")]
    Factory {
        reference: String,
        #[source]
        source: anyhow::Error,
    },

    /// An include path is neither a descriptor file nor a listable directory.
    #[error("{} is not a .toml file or directory", path.display())]
    NotADescriptorOrDirectory { path: PathBuf },

    /// An include path could not be read from disk.
    #[error("failed to read descriptor {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file was read but could not be decoded.
    #[error("failed to decode descriptor {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No group matched the queried name.
    #[error("group not found: {name:?}")]
    GroupNotFound { name: String },

    /// An example fixture's parent chain loops back on itself.
    #[error("cyclic example inheritance through {name:?}")]
    CyclicInheritance { name: String },
}
