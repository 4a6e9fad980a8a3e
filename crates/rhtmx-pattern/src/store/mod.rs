/// Shared-prefix trie of compiled patterns
///
/// Every registered pattern becomes a path from the root to an `END` node.
/// Patterns with a common prefix share nodes, and siblings are kept in
/// priority order so [`Store::find`] resolves an input in one walk.
///
/// ```text
/// START
///   Const("/ba")
///     Parameter("{x}")
///       END("e")
///     END("c")
///   Const("/")
///     END("b")
/// ```

mod matcher;
mod node;

use std::fmt;

use crate::config::Config;
use crate::pattern::{Params, Parser, Pattern};
use crate::pool::Pools;
use crate::{ParseError, Token};

pub(crate) use matcher::Step;
use node::{Node, NodeId};

/// Pattern repository and resolver
///
/// Registration takes `&mut self` and lookups take `&self`, so a store is
/// filled first and then shared for reading. `Store` is `Send + Sync`;
/// registering while other threads read needs an outer
/// `std::sync::RwLock` (or similar) around it.
///
/// # Examples
///
/// ```
/// use rhtmx_pattern::Store;
///
/// let mut store = Store::new();
/// store.add_named("user", "/users/{id}").unwrap();
/// store.add_named("users", "/users").unwrap();
///
/// let found = store.find("/users/42").unwrap();
/// assert_eq!(found.name(), Some("user"));
///
/// let params = store.lookup(&found, "/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(store.find("/posts").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Store {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    parser: Parser,
    pools: Pools,
    longest: usize,
    patterns: usize,
}

impl Store {
    /// Empty store with `{` `}` delimiters and default pool ceilings
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store configured by `config`
    pub fn with_config(config: &Config) -> Result<Self, ParseError> {
        Ok(Self {
            parser: Parser::new(config.delimiters())?,
            pools: Pools::new(&config.pools),
            ..Self::default()
        })
    }

    /// Compiles and registers an unnamed pattern
    pub fn add<'a>(&mut self, text: &'a str) -> Result<Pattern<'a>, ParseError> {
        self.add_named("", text)
    }

    /// Compiles and registers a pattern named `name`
    ///
    /// A compile error leaves the trie untouched.
    pub fn add_named<'a>(&mut self, name: &'a str, text: &'a str) -> Result<Pattern<'a>, ParseError> {
        let pattern = self.parser.parse_named(name, text)?;
        self.add_pattern(&pattern);
        Ok(pattern)
    }

    /// Merges a compiled pattern into the trie
    ///
    /// Existing prefixes are reused and the remaining tokens hang off the
    /// deepest shared node. Registering the same sequence twice is a no-op.
    /// Resolved parameters are stored as the placeholder they came from.
    pub fn add_pattern(&mut self, pattern: &Pattern<'_>) {
        let tokens = pattern.tokens();
        if tokens.is_empty() {
            return;
        }

        let mut path: Vec<Option<NodeId>> = Vec::with_capacity(tokens.len());
        let mut parent: Option<NodeId> = None;
        let mut created = 0;

        for token in tokens {
            let token = token.to_schema_owned();
            path.push(parent);

            let existing = self
                .children(parent)
                .iter()
                .copied()
                .find(|id| self.nodes[id.0].token == token);

            let id = match existing {
                Some(id) => id,
                None => {
                    self.nodes.push(Node::new(token));
                    let id = NodeId(self.nodes.len() - 1);
                    self.children_mut(parent).push(id);
                    created += 1;
                    id
                }
            };
            parent = Some(id);
        }

        if created > 0 {
            // Deepest level first so child counts are final when a parent sorts
            for level in path.into_iter().rev() {
                self.sort_children(level);
            }
            self.patterns += 1;
        }

        if tokens.len() > self.longest {
            self.longest = tokens.len();
            self.pools.tokens.reserve(self.longest);
        }

        tracing::debug!(
            pattern = %pattern.schema_key(),
            created,
            nodes = self.nodes.len(),
            longest = self.longest,
            "registered pattern"
        );
    }

    /// Resolves `input` against every registered pattern
    ///
    /// Returns the matched pattern with each placeholder replaced by a
    /// [`Token::ParameterResolved`], or `None`. The result borrows the
    /// store and the input.
    pub fn find<'s>(&'s self, input: &'s str) -> Option<Pattern<'s>> {
        let mut steps = self.pools.tokens.acquire();
        let found = matcher::walk(&self.nodes, input, 0, &self.roots, &mut steps);

        let complete = found
            && matches!(steps.first(), Some(Step::Node(id)) if self.nodes[id.0].token == Token::Start)
            && matches!(steps.last(), Some(Step::Node(id)) if matches!(self.nodes[id.0].token, Token::End(_)));

        tracing::trace!(input, matched = complete, steps = steps.len(), "store lookup");

        if !complete {
            return None;
        }
        Some(matcher::materialize(&self.nodes, input, &steps))
    }

    /// Extracts parameters of `pattern` using the store's pools
    pub fn lookup<'s>(&self, pattern: &'s Pattern<'_>, input: &'s str) -> Option<Params<'s>> {
        pattern.lookup_in(&self.pools, input)
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Number of distinct patterns registered
    pub fn len(&self) -> usize {
        self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Number of trie nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Token count of the longest registered pattern
    pub fn longest_pattern(&self) -> usize {
        self.longest
    }

    fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        }
    }

    fn children_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(id) => &mut self.nodes[id.0].children,
            None => &mut self.roots,
        }
    }

    fn sort_children(&mut self, parent: Option<NodeId>) {
        let mut children = std::mem::take(self.children_mut(parent));
        children.sort_by(|a, b| node::priority(&self.nodes[a.0], &self.nodes[b.0]));
        *self.children_mut(parent) = children;
    }

    fn write_level(&self, f: &mut fmt::Formatter<'_>, depth: usize, level: &[NodeId]) -> fmt::Result {
        for id in level {
            let node = &self.nodes[id.0];
            writeln!(f, "{:indent$}{}", "", node.token, indent = depth * 2)?;
            self.write_level(f, depth + 1, &node.children)?;
        }
        Ok(())
    }
}

/// Indented tree dump, two spaces per level
impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, 0, &self.roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_store_is_send_sync() {
        assert_send_sync::<Store>();
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let mut store = Store::new();
        store.add("/users/{id}").unwrap();
        let before = store.node_count();
        store.add("/users/{id}/posts").unwrap();
        // Const("/posts") and END
        assert_eq!(store.node_count(), before + 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.roots.len(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = Store::new();
        store.add("/a/{b}").unwrap();
        let dump = store.to_string();
        let nodes = store.node_count();

        store.add("/a/{b}").unwrap();
        assert_eq!(store.to_string(), dump);
        assert_eq!(store.node_count(), nodes);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_compile_error_leaves_store_untouched() {
        let mut store = Store::new();
        assert!(store.add("{a}{b}").is_err());
        assert!(store.is_empty());
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_longest_grows_pool_capacity() {
        let mut store = Store::new();
        store.add("/a").unwrap();
        assert_eq!(store.longest_pattern(), 3);
        store.add("/a/{b}/c").unwrap();
        assert_eq!(store.longest_pattern(), 5);
        assert_eq!(store.pools().tokens_capacity(), 5);
    }

    #[test]
    fn test_find_returns_buffer_to_pool() {
        let mut store = Store::new();
        store.add("/a").unwrap();
        assert!(store.find("/a").is_some());
        assert!(store.find("/b").is_none());
        assert_eq!(store.pools().idle_tokens(), 1);
    }

    #[test]
    fn test_resolved_pattern_registers_as_placeholder() {
        let mut store = Store::new();
        store.add_named("p", "/x/{id}").unwrap();
        let nodes = store.node_count();

        let found = store.find("/x/1").unwrap().into_owned();
        store.add_pattern(&found);
        assert_eq!(store.node_count(), nodes);
    }

    #[test]
    fn test_with_config_rejects_same_delimiters() {
        let config = Config::from_toml_str("[syntax]\nopen = \"%\"\nclose = \"%\"\n").unwrap();
        assert_eq!(
            Store::with_config(&config).unwrap_err(),
            ParseError::SameDelimiters('%')
        );
    }

    #[test]
    fn test_dump() {
        let mut store = Store::new();
        store.add_named("b", "/").unwrap();
        store.add_named("c", "/ba").unwrap();
        store.add_named("e", "/ba{x}").unwrap();
        assert_eq!(
            store.to_string(),
            concat!(
                "START\n",
                "  Const(\"/ba\", len=3)\n",
                "    Parameter(\"{x}\")\n",
                "      END(\"e\")\n",
                "    END(\"c\")\n",
                "  Const(\"/\", len=1)\n",
                "    END(\"b\")\n",
            )
        );
    }
}
