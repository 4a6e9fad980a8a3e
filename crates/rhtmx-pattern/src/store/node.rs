/// Arena nodes and sibling ordering

use std::cmp::Ordering;

use crate::Token;

/// Index of a node in the store arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// One trie node: a token and its children in priority order
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) token: Token<'static>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(token: Token<'static>) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }

    /// True when the only way forward from here is `END`
    pub(crate) fn ends_here(&self, nodes: &[Node]) -> bool {
        match self.children.as_slice() {
            [only] => matches!(nodes[only.0].token, Token::End(_)),
            _ => false,
        }
    }

    /// Specificity weight: literal length for `Const`, zero otherwise
    fn weight(&self) -> usize {
        match &self.token {
            Token::Const(text) => text.len(),
            _ => 0,
        }
    }
}

/// Sibling priority: literals first, then longer `Const`, then more children
///
/// Equal nodes compare `Equal` so a stable sort keeps registration order.
pub(crate) fn priority(a: &Node, b: &Node) -> Ordering {
    b.token
        .is_literal()
        .cmp(&a.token.is_literal())
        .then_with(|| b.weight().cmp(&a.weight()))
        .then_with(|| b.children.len().cmp(&a.children.len()))
}
