//! # plugboard
//!
//! Layered TOML configuration for pluggable HTTP services: a root descriptor
//! pulls in further descriptor files or whole directories, fragments merge by
//! pure accumulation, named example fixtures inherit from parent fixtures,
//! and textual handler references (`"pluginKey.HandlerName(arg1,arg2)"`)
//! resolve against a plugin registry into callable request handlers.
//!
//! ## Architecture
//!
//! - **[`config`]** - descriptor fragments, the include merge engine, and the
//!   root [`Config`] assembler
//! - **[`fixtures`]** - example request/response fixtures with parent-chain
//!   inheritance
//! - **[`handler`]** - the handler reference grammar
//! - **[`plugin`]** - registry capability traits and dynamic handler
//!   resolution
//! - **[`transport`]** - the narrow request/response vocabulary shared with
//!   the transport runtime, including the response adapter
//! - **[`error`]** - the crate's error taxonomy
//!
//! The HTTP server, TLS termination, routing table construction, and plugin
//! binary loading all live outside this crate; they are consumed through the
//! [`plugin::PluginRegistry`] capability and the [`transport`] vocabulary
//! only.
//!
//! ## Example
//!
//! ```no_run
//! use plugboard::{Config, StaticRegistry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut cfg = Config::from_file("service.toml")?;
//!
//!     let registry = StaticRegistry::new();
//!     // ... register plugin symbols ...
//!
//!     for group in &mut cfg.document.groups {
//!         group.init(&registry)?;
//!     }
//!     for route in &mut cfg.document.routes {
//!         route.init(&registry)?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fixtures;
pub mod handler;
pub mod plugin;
pub mod transport;

pub use config::{Config, Fragment, Group, Route};
pub use error::ConfigError;
pub use handler::HandlerRef;
pub use plugin::{resolve_handler, PluginRegistry, PluginSymbol, StaticRegistry};
pub use transport::{adapt_response, CommonResponse, Context, Handler, Payload, Response};
