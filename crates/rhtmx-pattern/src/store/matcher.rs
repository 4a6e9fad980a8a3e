/// Depth-first resolver over the trie
///
/// The walk tries siblings in priority order and commits to the first one
/// that can be taken. There is no backtracking across siblings: if the
/// committed subtree fails, the whole match fails.
///
/// Progress is recorded as [`Step`]s in a pooled buffer. The resolved
/// [`Pattern`] is only built once the walk reaches `END`.

use super::node::{Node, NodeId};
use crate::{Capture, Pattern, Token};

/// One entry of the match path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// A stored token taken as is
    Node(NodeId),
    /// A placeholder bound to `input[start..end]`
    Capture { param: NodeId, start: usize, end: usize },
}

/// Walks `siblings` from byte `offset`; true once an `END` is taken
pub(crate) fn walk(
    nodes: &[Node],
    input: &str,
    offset: usize,
    siblings: &[NodeId],
    out: &mut Vec<Step>,
) -> bool {
    for (idx, &id) in siblings.iter().enumerate() {
        let node = &nodes[id.0];
        match &node.token {
            Token::Start => {
                out.push(Step::Node(id));
                return walk(nodes, input, offset, &node.children, out);
            }
            Token::End(_) => {
                if offset == input.len() {
                    out.push(Step::Node(id));
                    return true;
                }
            }
            Token::Const(literal) | Token::Separator(literal) => {
                let literal: &str = literal;
                let end = offset + literal.len();
                if end > input.len() {
                    continue;
                }
                // A literal right before END must consume the rest
                if node.ends_here(nodes) && end != input.len() {
                    continue;
                }
                if input.get(offset..).is_some_and(|rest| rest.starts_with(literal)) {
                    out.push(Step::Node(id));
                    return walk(nodes, input, end, &node.children, out);
                }
            }
            Token::Parameter(_) => {
                let Some((next, width)) = capture_boundary(nodes, input, offset, node) else {
                    continue;
                };
                // Empty captures are left to the last sibling
                if width == 0 && idx + 1 < siblings.len() {
                    continue;
                }

                let end = offset + width;
                out.push(Step::Capture {
                    param: id,
                    start: offset,
                    end,
                });
                out.push(Step::Node(next));

                let next = &nodes[next.0];
                if matches!(next.token, Token::End(_)) {
                    return true;
                }
                return walk(nodes, input, end + next.token.len(), &next.children, out);
            }
            Token::ParameterResolved(_) => unreachable!("resolved parameters are never stored"),
        }
    }
    false
}

/// Finds where a placeholder capture stops
///
/// Children are tried in order: a literal bounds the capture at its first
/// occurrence, `END` takes the remainder.
fn capture_boundary(
    nodes: &[Node],
    input: &str,
    offset: usize,
    param: &Node,
) -> Option<(NodeId, usize)> {
    let rest = input.get(offset..)?;
    for &child in &param.children {
        match &nodes[child.0].token {
            Token::Const(literal) | Token::Separator(literal) => {
                let literal: &str = literal;
                if let Some(found) = rest.find(literal) {
                    return Some((child, found));
                }
            }
            Token::End(_) => return Some((child, rest.len())),
            other => unreachable!("{} cannot follow a parameter", other),
        }
    }
    None
}

/// Builds the resolved pattern from a successful walk
pub(crate) fn materialize<'s>(nodes: &'s [Node], input: &'s str, steps: &[Step]) -> Pattern<'s> {
    let mut num_params = 0;
    let tokens = steps
        .iter()
        .map(|step| match *step {
            Step::Node(id) => nodes[id.0].token.reborrow(),
            Step::Capture { param, start, end } => {
                num_params += 1;
                Token::ParameterResolved(Capture::new(&input[start..end], &nodes[param.0].token))
            }
        })
        .collect();
    Pattern::from_parts(tokens, num_params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(nodes: &mut Vec<Node>, tokens: Vec<Token<'static>>) -> NodeId {
        let mut next: Option<NodeId> = None;
        for token in tokens.into_iter().rev() {
            let mut node = Node::new(token);
            node.children.extend(next);
            nodes.push(node);
            next = Some(NodeId(nodes.len() - 1));
        }
        next.unwrap()
    }

    #[test]
    fn test_capture_boundary_prefers_first_child_in_order() {
        let mut nodes = Vec::new();
        let end = chain(&mut nodes, vec![Token::end("")]);
        let bar = chain(&mut nodes, vec![Token::constant("bar"), Token::end("")]);
        let param = Node {
            token: Token::parameter("x"),
            children: vec![bar, end],
        };

        assert_eq!(capture_boundary(&nodes, "12bar", 0, &param), Some((bar, 2)));
        assert_eq!(capture_boundary(&nodes, "12baz", 0, &param), Some((end, 5)));
        assert_eq!(capture_boundary(&nodes, "12baz", 9, &param), None);
    }

    #[test]
    fn test_walk_records_steps() {
        let mut nodes = Vec::new();
        let root = chain(
            &mut nodes,
            vec![
                Token::Start,
                Token::constant("/u/"),
                Token::parameter("id"),
                Token::end("user"),
            ],
        );
        let mut out = Vec::new();
        assert!(walk(&nodes, "/u/7", 0, &[root], &mut out));
        assert_eq!(out.len(), 4);
        assert!(matches!(out[2], Step::Capture { start: 3, end: 4, .. }));

        let resolved = materialize(&nodes, "/u/7", &out);
        assert_eq!(resolved.num_params(), 1);
        assert_eq!(resolved.tokens()[2].raw(), "7");
        assert_eq!(resolved.name(), Some("user"));

        out.clear();
        assert!(!walk(&nodes, "/x/7", 0, &[root], &mut out));
    }
}
