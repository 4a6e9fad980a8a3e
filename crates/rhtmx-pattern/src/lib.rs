//! # RHTMX Pattern
//!
//! Placeholder patterns and a shared-prefix trie that matches an input
//! against many of them in one pass.
//!
//! - Patterns mix literal text and named placeholders: `/users/{id}/posts`
//! - A placeholder captures up to the first occurrence of the literal that
//!   follows it, or the rest of the input when it is last
//! - Many patterns share one [`Store`]; siblings are ordered so the most
//!   specific pattern wins
//!
//! ## Priority
//!
//! At every level of the trie:
//! 1. Literals are tried before placeholders
//! 2. Longer literals are tried before shorter ones
//! 3. Branches with more children are tried first
//! 4. Registration order breaks the remaining ties
//!
//! The walk commits to the first branch that can be taken and never
//! backtracks into a sibling.
//!
//! ## Example
//!
//! ```
//! use rhtmx_pattern::Store;
//!
//! let mut store = Store::new();
//! store.add_named("a", "/{foobar}").unwrap();
//! store.add_named("b", "/b").unwrap();
//! store.add_named("c", "/ba").unwrap();
//! store.add_named("e", "/ba{foobar}").unwrap();
//!
//! let found = store.find("/baz").unwrap();
//! assert_eq!(found.name(), Some("e"));
//!
//! let params = found.lookup("/baz").unwrap();
//! assert_eq!(params.get("foobar"), Some("z"));
//! ```
//!
//! ## Standalone patterns
//!
//! ```
//! let pattern = rhtmx_pattern::parse("foo{p1}日本語{p2}baz").unwrap();
//! let params = pattern.lookup("fooAAA日本語BBBbaz").unwrap();
//! assert_eq!(params.get("p1"), Some("AAA"));
//! assert_eq!(params.get("p2"), Some("BBB"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod pattern;
mod pool;
pub mod store;
pub mod token;

pub use config::{Config, SyntaxConfig};
pub use error::ParseError;
pub use pattern::{parse, parse_named, Delimiters, Param, Params, Parser, Pattern};
pub use pool::{PoolConfig, Pools};
pub use store::Store;
pub use token::{schema_key, Capture, Schema, Token};
