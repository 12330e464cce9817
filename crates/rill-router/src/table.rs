//! The route table: ordered (pattern, handler) pairs and path resolution.

use crate::error::Result;
use crate::pattern::{MatchOutcome, Params, RoutePattern};

/// One registered route.
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    pattern: RoutePattern,
    handler: H,
}

impl<H> RouteEntry<H> {
    /// Returns the compiled pattern.
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the registered handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// A successful resolution: the winning handler and extracted parameters.
#[derive(Debug, Clone)]
pub struct Resolved<H> {
    /// Handler registered for the winning route.
    pub handler: H,
    /// Parameters extracted from the path (empty for parameterless routes).
    pub params: Params,
}

/// Ordered collection of routes.
///
/// Registration happens once at startup; after that the table is read-only
/// and [`RouteTable::resolve`] takes `&self`, so concurrent lookups need no
/// locking.
///
/// # Example
///
/// ```
/// use rill_router::RouteTable;
///
/// let mut table = RouteTable::new();
/// table.register("/users/{id}", "user_detail").unwrap();
/// let resolved = table.resolve("/users/7").unwrap();
/// assert_eq!(resolved.handler, "user_detail");
/// assert_eq!(resolved.params.get("id"), Some("7"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a route, compiling the template first.
    ///
    /// A malformed template leaves the table untouched.
    pub fn register(&mut self, template: &str, handler: H) -> Result<()> {
        let pattern = RoutePattern::compile(template)?;
        self.entries.push(RouteEntry { pattern, handler });
        Ok(())
    }

    /// Returns the registered entries in registration order.
    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Clone> RouteTable<H> {
    /// Resolves a path to a handler and extracted parameters.
    ///
    /// This is a full-table scan in registration order, reproducing the
    /// reference resolution precedence:
    ///
    /// - a match with named parameters always overwrites any previously
    ///   recorded result, so of several parameterized matches the **last**
    ///   one registered wins;
    /// - a parameterless match is recorded only when nothing has been
    ///   recorded yet, and never displaces a parameterized match.
    ///
    /// These semantics are intentional compatibility behavior, kept even
    /// though first-match-wins is the conventional router rule; see
    /// DESIGN.md. Returns `None` when nothing matches.
    pub fn resolve(&self, path: &str) -> Option<Resolved<H>> {
        let mut found: Option<Resolved<H>> = None;
        for entry in &self.entries {
            match entry.pattern.matches(path) {
                MatchOutcome::NoMatch => {}
                MatchOutcome::Matched => {
                    if found.is_none() {
                        found = Some(Resolved {
                            handler: entry.handler.clone(),
                            params: Params::new(),
                        });
                    }
                }
                MatchOutcome::MatchedParams(params) => {
                    found = Some(Resolved {
                        handler: entry.handler.clone(),
                        params,
                    });
                }
            }
        }
        found
    }
}
