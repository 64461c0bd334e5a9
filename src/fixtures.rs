//! Example request/response fixtures and parent-chain inheritance.
//!
//! Fixtures document and exercise routes: a named example request, the named
//! example responses it may produce, and single-parent inheritance so a
//! family of examples can share query/body/data without repetition. A child
//! inherits only the fields it left unset; its `responses` list is appended
//! with the parent's rather than replaced.
//!
//! Resolution walks each declared parent chain to its root with an explicit
//! visited set, then applies inheritance top-down. The resolved parent is
//! memoized on the child, so resolving a fixture set twice is a no-op. A
//! chain that loops back on itself is reported as
//! [`ConfigError::CyclicInheritance`] and skipped; other chains still
//! resolve. A parent name that matches no fixture is silently tolerated.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// An example request for docs/tests.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Request {
    pub name: String,
    /// Owning group, by name.
    pub group: String,

    pub query: Option<HashMap<String, String>>,
    pub body: Option<HashMap<String, String>>,

    /// Names of response fixtures this request may produce.
    pub responses: Vec<String>,
    /// Resolved response fixtures, bound after decoding.
    #[serde(skip)]
    pub response_examples: Vec<Response>,

    /// Parent fixture to inherit unset fields from.
    pub parent: String,
    #[serde(skip)]
    parent_example: Option<Box<Request>>,
}

impl Request {
    /// The memoized resolved parent, if inheritance has run.
    pub fn parent_example(&self) -> Option<&Request> {
        self.parent_example.as_deref()
    }
}

/// An example response for docs/tests.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Response {
    pub name: String,

    /// Parent fixture to inherit unset fields from.
    pub parent: String,
    #[serde(skip)]
    parent_example: Option<Box<Response>>,

    /// HTTP status code; 0 means unset.
    pub code: u16,
    pub data: Option<HashMap<String, String>>,
}

impl Response {
    /// The memoized resolved parent, if inheritance has run.
    pub fn parent_example(&self) -> Option<&Response> {
        self.parent_example.as_deref()
    }
}

/// Common shape of the two fixture kinds, as seen by the chain resolver.
trait Inherit: Clone {
    fn parent_name(&self) -> &str;
    /// Memo guard: the resolved parent back-reference has been recorded.
    fn is_resolved(&self) -> bool;
    /// Copy the parent's values into this fixture's unset fields and record
    /// the back-reference.
    fn inherit_from(&mut self, parent: &Self);
}

impl Inherit for Request {
    fn parent_name(&self) -> &str {
        &self.parent
    }

    fn is_resolved(&self) -> bool {
        self.parent_example.is_some()
    }

    fn inherit_from(&mut self, parent: &Self) {
        if self.query.is_none() {
            self.query = parent.query.clone();
        }

        if self.body.is_none() {
            self.body = parent.body.clone();
        }

        if !parent.responses.is_empty() {
            // Own entries first, parent's appended after.
            self.responses.extend(parent.responses.iter().cloned());

            if self.response_examples.is_empty() {
                self.response_examples
                    .extend(parent.response_examples.iter().cloned());
            }
        }

        self.parent_example = Some(Box::new(parent.clone()));
    }
}

impl Inherit for Response {
    fn parent_name(&self) -> &str {
        &self.parent
    }

    fn is_resolved(&self) -> bool {
        self.parent_example.is_some()
    }

    fn inherit_from(&mut self, parent: &Self) {
        if self.code == 0 {
            self.code = parent.code;
        }

        if self.data.is_none() {
            self.data = parent.data.clone();
        }

        self.parent_example = Some(Box::new(parent.clone()));
    }
}

/// Resolve inheritance for every request fixture in the set.
pub fn resolve_requests(fixtures: &mut HashMap<String, Request>) -> Result<(), ConfigError> {
    resolve_all(fixtures)
}

/// Resolve inheritance for every response fixture in the set.
pub fn resolve_responses(fixtures: &mut HashMap<String, Response>) -> Result<(), ConfigError> {
    resolve_all(fixtures)
}

fn resolve_all<T: Inherit>(fixtures: &mut HashMap<String, T>) -> Result<(), ConfigError> {
    let mut names: Vec<String> = fixtures.keys().cloned().collect();
    names.sort();

    let mut first_err = None;
    for name in names {
        if let Err(err) = resolve_chain(fixtures, &name) {
            warn!(fixture = %name, error = %err, "skipping cyclic example inheritance chain");
            first_err.get_or_insert(err);
        }
    }

    match first_err {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

/// Resolve one fixture's chain: walk declared parents up to the chain root,
/// then apply inheritance downward so parents are populated before children.
fn resolve_chain<T: Inherit>(
    fixtures: &mut HashMap<String, T>,
    name: &str,
) -> Result<(), ConfigError> {
    let mut chain = vec![name.to_string()];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(name.to_string());

    loop {
        let Some(current) = chain.last().and_then(|n| fixtures.get(n)) else {
            break;
        };

        // Already memoized, or a base fixture: the chain root is found.
        if current.is_resolved() || current.parent_name().is_empty() {
            break;
        }

        let parent = current.parent_name().to_string();
        if !fixtures.contains_key(&parent) {
            // Dangling parent reference: tolerated, the chain ends here.
            break;
        }

        if !seen.insert(parent.clone()) {
            return Err(ConfigError::CyclicInheritance { name: parent });
        }

        chain.push(parent);
    }

    // chain[i]'s declared parent is chain[i + 1]; apply from the root down.
    for i in (0..chain.len().saturating_sub(1)).rev() {
        let parent = match fixtures.get(&chain[i + 1]) {
            Some(parent) => parent.clone(),
            None => continue,
        };

        if let Some(child) = fixtures.get_mut(&chain[i]) {
            if !child.is_resolved() {
                child.inherit_from(&parent);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(name: &str, parent: &str, code: u16) -> Response {
        Response {
            name: name.to_string(),
            parent: parent.to_string(),
            code,
            ..Response::default()
        }
    }

    #[test]
    fn test_code_inherited_when_unset() {
        let mut set = HashMap::new();
        let mut a = response("A", "", 200);
        a.data = Some(HashMap::from([("x".to_string(), "1".to_string())]));
        set.insert("A".to_string(), a);
        set.insert("B".to_string(), response("B", "A", 0));

        resolve_responses(&mut set).unwrap();

        let b = &set["B"];
        assert_eq!(b.code, 200);
        assert_eq!(b.data.as_ref().unwrap()["x"], "1");
        assert_eq!(b.parent_example().unwrap().name, "A");
    }

    #[test]
    fn test_set_code_not_overwritten() {
        let mut set = HashMap::new();
        set.insert("A".to_string(), response("A", "", 200));
        set.insert("B".to_string(), response("B", "A", 404));

        resolve_responses(&mut set).unwrap();
        assert_eq!(set["B"].code, 404);
    }

    #[test]
    fn test_dangling_parent_tolerated() {
        let mut set = HashMap::new();
        set.insert("B".to_string(), response("B", "missing", 0));

        resolve_responses(&mut set).unwrap();
        assert_eq!(set["B"].code, 0);
        assert!(set["B"].parent_example().is_none());
    }

    #[test]
    fn test_cycle_detected() {
        let mut set = HashMap::new();
        set.insert("A".to_string(), response("A", "B", 0));
        set.insert("B".to_string(), response("B", "A", 0));

        let err = resolve_responses(&mut set).unwrap_err();
        assert!(matches!(err, ConfigError::CyclicInheritance { .. }));
    }

    #[test]
    fn test_self_cycle_detected() {
        let mut set = HashMap::new();
        set.insert("A".to_string(), response("A", "A", 0));

        let err = resolve_responses(&mut set).unwrap_err();
        assert!(matches!(err, ConfigError::CyclicInheritance { .. }));
    }
}
