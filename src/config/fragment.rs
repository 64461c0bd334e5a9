//! Descriptor fragments and the include merge engine.
//!
//! Every descriptor — the root file and each included file — decodes into the
//! same [`Fragment`] shape. Merging is pure accumulation: environment keys
//! are overwritten by later fragments, every list is concatenated in include
//! order, nothing is deduplicated or reordered.
//!
//! An include path ending in `.toml` is decoded and merged; any other path is
//! treated as a directory and recursed depth-first with entries sorted by
//! name. Decode and listing failures abort the whole resolution; a partially
//! merged accumulator is never reused after a failure.

use super::types::{Command, Flag, Group, Route};
use crate::error::ConfigError;
use crate::fixtures::{Request, Response};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File extension that marks an include path as a descriptor file.
pub const DESCRIPTOR_EXT: &str = "toml";

/// One decoded configuration unit, prior to merging.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Fragment {
    /// Application environment, name -> value.
    #[serde(rename = "env")]
    pub environment: HashMap<String, String>,

    /// Further descriptor files or directories to merge.
    pub include: Vec<String>,

    /// Plugin identifiers in scope.
    pub plugins: Vec<String>,

    /// Dynamic CLI commands.
    #[serde(rename = "command")]
    pub commands: Vec<Command>,
    /// Dynamic CLI flags.
    #[serde(rename = "flag")]
    pub flags: Vec<Flag>,

    /// Route groups.
    #[serde(rename = "group")]
    pub groups: Vec<Group>,
    /// Routes to listen for and serve.
    #[serde(rename = "route")]
    pub routes: Vec<Route>,

    /// Example requests for docs/tests.
    #[serde(rename = "request")]
    pub requests: Vec<Request>,
    /// Example responses for docs/tests.
    #[serde(rename = "response")]
    pub responses: Vec<Response>,
}

/// Merge `fragment` into `acc`: environment keys overwrite, lists append.
///
/// A pure reducer over fragments; fold it across includes in declared order.
#[must_use]
pub fn merge(mut acc: Fragment, fragment: Fragment) -> Fragment {
    acc.environment.extend(fragment.environment);

    acc.include.extend(fragment.include);
    acc.plugins.extend(fragment.plugins);

    acc.commands.extend(fragment.commands);
    acc.flags.extend(fragment.flags);

    acc.groups.extend(fragment.groups);
    acc.routes.extend(fragment.routes);

    acc.requests.extend(fragment.requests);
    acc.responses.extend(fragment.responses);

    acc
}

/// Expand the root fragment's declared include list.
///
/// Only the includes declared on the root document are loaded; include paths
/// contributed by included files accumulate in the merged document but are
/// not themselves expanded.
pub fn expand_includes(mut root: Fragment) -> Result<Fragment, ConfigError> {
    let declared = root.include.clone();
    for path in &declared {
        root = load_include(root, Path::new(path))?;
    }

    Ok(root)
}

/// Merge one include path into the accumulator: a descriptor file is decoded
/// and merged, anything else is recursed into as a directory.
pub fn load_include(acc: Fragment, path: &Path) -> Result<Fragment, ConfigError> {
    if path.extension().and_then(|e| e.to_str()) == Some(DESCRIPTOR_EXT) {
        let fragment = decode_fragment(path)?;
        debug!(path = %path.display(), "descriptor fragment merged");
        return Ok(merge(acc, fragment));
    }

    let entries = fs::read_dir(path).map_err(|_| ConfigError::NotADescriptorOrDirectory {
        path: path.to_path_buf(),
    })?;

    let mut children: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    children.sort();

    let mut acc = acc;
    for child in &children {
        acc = load_include(acc, child)?;
    }

    Ok(acc)
}

fn decode_fragment(path: &Path) -> Result<Fragment, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
