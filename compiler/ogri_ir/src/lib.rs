//! Ogri IR - syntax tree types consumed by the runtime.
//!
//! The parser (an external collaborator) produces a [`SyntaxTree`]; the
//! evaluator walks it read-only. This crate defines that contract:
//! - [`NodeId`] indices into a flat [`NodeArena`]
//! - [`NodeKind`], one variant per syntactic construct
//! - [`BinaryOp`] / [`UnaryOp`] operator enums
//! - [`TreeBuilder`] for constructing trees outside the crate
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - Every node carries the source line it was parsed from, used verbatim in
//!   runtime diagnostics

mod node;
mod node_id;
mod operators;
mod tree;

pub use node::{Node, NodeKind, WhenClause};
pub use node_id::NodeId;
pub use operators::{BinaryOp, UnaryOp};
pub use tree::{NodeArena, SyntaxTree, TreeBuilder};
