//! # rill-router
//!
//! Route template compilation, path matching, and resolution caching.
//!
//! This crate is the routing core of rill: it knows nothing about HTTP
//! requests or responses, only how to turn `/repo/{idx}/issues/{label}`
//! style templates into matchable patterns and resolve concrete paths
//! against an ordered table of them. The handler payload is a type
//! parameter, so the table can hold anything cloneable.
//!
//! ## Quick start
//!
//! ```
//! use rill_router::{ResolutionCache, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.register("/", "index").unwrap();
//! table.register("/hello/{name}", "hello").unwrap();
//!
//! let cache = ResolutionCache::new();
//! let resolved = cache.get_or_resolve("/hello/world", &table).unwrap();
//! assert_eq!(resolved.handler, "hello");
//! assert_eq!(resolved.params.get("name"), Some("world"));
//! ```
//!
//! ## Resolution precedence
//!
//! Resolution scans the whole table in registration order: the last
//! parameterized match wins, and a parameterless match is kept only when no
//! parameterized route matches. See [`RouteTable::resolve`] for the full
//! rules and DESIGN.md for why they are preserved.

mod cache;
mod error;
mod pattern;
mod table;

pub use cache::{DEFAULT_CACHE_CAPACITY, ResolutionCache};
pub use error::{PatternError, Result};
pub use pattern::{MatchOutcome, Params, RoutePattern, Segment};
pub use table::{Resolved, RouteEntry, RouteTable};
