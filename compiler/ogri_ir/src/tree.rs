//! Node arena and tree construction.

use crate::{Node, NodeId, NodeKind};

/// Flat storage for every node of one syntax tree.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Allocate a node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind, line: u32) -> NodeId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(Node { kind, line });
        NodeId::new(index)
    }

    /// Get a node by ID.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node's kind by ID.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    /// Get a node's source line by ID.
    #[inline]
    pub fn line(&self, id: NodeId) -> u32 {
        self.get(id).line
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A complete program: the arena plus its top-level statement list.
///
/// `root` is `None` when the parser produced no statements.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxTree {
    pub arena: NodeArena,
    pub root: Option<NodeId>,
}

impl SyntaxTree {
    /// A tree with no statements.
    pub fn empty() -> Self {
        SyntaxTree::default()
    }
}

/// Incremental tree construction with a current source line.
///
/// Nodes are allocated at the builder's current line; call [`TreeBuilder::line`]
/// before allocating the nodes of each source line.
#[derive(Debug)]
pub struct TreeBuilder {
    arena: NodeArena,
    line: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            arena: NodeArena::new(),
            line: 1,
        }
    }

    /// Set the source line for subsequently allocated nodes.
    #[must_use]
    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Set the source line in place.
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// Allocate a node at the current line.
    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        self.arena.alloc(kind, self.line)
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.node(NodeKind::Integer(value))
    }

    pub fn float(&mut self, value: f64) -> NodeId {
        self.node(NodeKind::Float(value))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.node(NodeKind::Str(value.to_string()))
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.node(NodeKind::Identifier(name.to_string()))
    }

    pub fn binary(&mut self, op: crate::BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.node(NodeKind::Binary { op, left, right })
    }

    pub fn values(&mut self, items: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::ValueList(items))
    }

    pub fn call(&mut self, name: &str, args: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Call {
            name: name.to_string(),
            args,
        })
    }

    pub fn assign(&mut self, target: NodeId, value: NodeId) -> NodeId {
        self.node(NodeKind::Assign {
            target,
            value,
            spread: false,
        })
    }

    /// A block wrapping a statement list (empty list gives an empty block).
    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        let body = if statements.is_empty() {
            None
        } else {
            Some(self.node(NodeKind::Statements(statements)))
        };
        self.node(NodeKind::Block(body))
    }

    /// Finish with the given top-level statements.
    pub fn finish(mut self, statements: Vec<NodeId>) -> SyntaxTree {
        let root = if statements.is_empty() {
            None
        } else {
            Some(self.node(NodeKind::Statements(statements)))
        };
        SyntaxTree {
            arena: self.arena,
            root,
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
