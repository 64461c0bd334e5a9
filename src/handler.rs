//! Parsing of textual handler references.
//!
//! A handler reference binds a route or group to a plugin export:
//!
//! ```text
//! users.Login                 -> plugin "users", symbol "Login"
//! auth.RequireRole(admin,ops) -> plugin "auth", symbol "RequireRole", args ["admin", "ops"]
//! ```
//!
//! Parsing is purely lexical: arguments are literal string tokens with no
//! escaping, no nested parentheses, and no whitespace trimming. Note that an
//! empty argument list (`p.Foo()`) yields a single empty-string argument, not
//! zero arguments — callers that accept argument lists must tolerate this.

use crate::error::ConfigError;

/// A parsed handler reference: plugin key, exported symbol name, and the
/// ordered argument list passed to factory-style symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRef {
    pub plugin_key: String,
    pub symbol: String,
    pub args: Vec<String>,
}

impl HandlerRef {
    /// Parse a `pluginKey.HandlerName(arg1,arg2)` reference.
    ///
    /// Splits on the first `.` and, when present, the first `(`. The argument
    /// list must be terminated by a trailing `)`.
    pub fn parse(reference: &str) -> Result<Self, ConfigError> {
        let (plugin_key, spec) =
            reference
                .split_once('.')
                .ok_or_else(|| ConfigError::MalformedReference {
                    reference: reference.to_string(),
                })?;

        let (symbol, args) = match spec.split_once('(') {
            None => (spec, Vec::new()),
            Some((symbol, rest)) => {
                let interior =
                    rest.strip_suffix(')')
                        .ok_or_else(|| ConfigError::UnterminatedArgumentList {
                            reference: reference.to_string(),
                        })?;
                (symbol, interior.split(',').map(str::to_string).collect())
            }
        };

        Ok(HandlerRef {
            plugin_key: plugin_key.to_string(),
            symbol: symbol.to_string(),
            args,
        })
    }
}
