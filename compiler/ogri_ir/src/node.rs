//! Syntax tree nodes.
//!
//! One [`NodeKind`] variant per construct the parser emits. Children are
//! referenced by [`NodeId`]; optional children use `Option<NodeId>`.

use crate::{BinaryOp, NodeId, UnaryOp};

/// A syntax tree node: its kind plus the source line it came from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    /// 1-based source line, reported verbatim in runtime errors.
    pub line: u32,
}

/// An `otherwise when` clause of a conditional.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct WhenClause {
    pub cond: NodeId,
    pub block: NodeId,
}

/// Node kinds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    // Statements
    /// Sequence of statements, evaluated in order.
    Statements(Vec<NodeId>),
    /// `when cond { .. } otherwise when cond { .. } otherwise { .. }`
    When {
        cond: NodeId,
        then_block: NodeId,
        otherwise_whens: Vec<WhenClause>,
        otherwise: Option<NodeId>,
    },
    /// `repeat variable in collection { .. }`
    Repeat {
        variable: String,
        collection: NodeId,
        block: NodeId,
    },
    /// `repeat until cond { .. }`
    RepeatUntil { cond: NodeId, block: NodeId },
    /// `define name(params) { .. }`; `params` is an `IdentifierList`.
    FuncDef {
        name: String,
        params: Option<NodeId>,
        body: NodeId,
    },
    /// `target = value`, or `target is/are value` when `spread` is set.
    Assign {
        target: NodeId,
        value: NodeId,
        spread: bool,
    },
    Return(Option<NodeId>),
    Break,
    Continue,
    /// `{ statements }`; an empty block has no statement list.
    Block(Option<NodeId>),

    // Expressions
    /// `name(args)`; `args` is a `ValueList` or a single expression.
    Call { name: String, args: Option<NodeId> },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Unary { op: UnaryOp, operand: NodeId },
    Identifier(String),
    Integer(i64),
    Float(f64),
    Str(String),
    /// Interpolated string: literal text fragments and embedded expressions.
    Interpolated(Vec<NodeId>),
    /// Literal text fragment of an interpolated string.
    InterpolationText(String),
    /// Comma-joined values (argument lists, multi-value returns).
    ValueList(Vec<NodeId>),
    /// Comma-joined identifiers (parameters, destructuring targets).
    IdentifierList(Vec<NodeId>),
    /// `name[index]`
    Index { name: String, index: NodeId },
    /// `name[index]` or `name[from..end]` used as a value.
    Slice { name: String, index: NodeId },
    /// `from..end`, either bound optional.
    Range {
        from: Option<NodeId>,
        end: Option<NodeId>,
    },
}

impl NodeKind {
    /// Short name of the node kind, for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Statements(_) => "statements",
            Self::When { .. } => "when",
            Self::Repeat { .. } => "repeat",
            Self::RepeatUntil { .. } => "repeat until",
            Self::FuncDef { .. } => "function definition",
            Self::Assign { .. } => "assignment",
            Self::Return(_) => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Block(_) => "block",
            Self::Call { .. } => "call",
            Self::Binary { .. } => "binary operation",
            Self::Unary { .. } => "unary operation",
            Self::Identifier(_) => "identifier",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Interpolated(_) => "interpolated string",
            Self::InterpolationText(_) => "interpolation text",
            Self::ValueList(_) => "value list",
            Self::IdentifierList(_) => "identifier list",
            Self::Index { .. } => "index",
            Self::Slice { .. } => "slice",
            Self::Range { .. } => "range",
        }
    }
}
