//! Test modules relocated from implementation files.
//!
//! Interpreter tests build trees with [`TreeBuilder`] and run them against a
//! buffer print handler so output can be asserted directly.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod operators_tests;

use ogri_ir::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
use ogri_runtime::HashSeed;

use crate::{buffer_handler, scripted_input, EvalOutcome, InterpreterBuilder};

/// Run `tree` with `input` as the lines `listen` reads; returns the result
/// and everything printed.
fn run_with(
    tree: &SyntaxTree,
    input: &[&str],
    configure: impl FnOnce(InterpreterBuilder<'_>) -> InterpreterBuilder<'_>,
) -> (EvalOutcome, String) {
    let print = buffer_handler();
    let builder = InterpreterBuilder::new(&tree.arena)
        .print_handler(print.clone())
        .input_handler(scripted_input(input.iter().copied()))
        .hash_seed(HashSeed::fixed(42));
    let mut interpreter = configure(builder).build().unwrap();
    let result = interpreter.run(tree.root.unwrap());
    (result, print.output())
}

fn run(tree: &SyntaxTree) -> (EvalOutcome, String) {
    run_with(tree, &[], |b| b)
}

/// `say(arg)`
fn say(b: &mut TreeBuilder, arg: NodeId) -> NodeId {
    b.call("say", Some(arg))
}

/// `say(name)`
fn say_var(b: &mut TreeBuilder, name: &str) -> NodeId {
    let arg = b.ident(name);
    say(b, arg)
}

/// `name = value`
fn set_int(b: &mut TreeBuilder, name: &str, value: i64) -> NodeId {
    let target = b.ident(name);
    let value = b.int(value);
    b.assign(target, value)
}

/// `range(args..)`
fn range(b: &mut TreeBuilder, args: &[i64]) -> NodeId {
    let args: Vec<NodeId> = args.iter().map(|&n| b.int(n)).collect();
    let args = if args.len() == 1 {
        args[0]
    } else {
        b.values(args)
    };
    b.call("range", Some(args))
}

/// `{ return expr }`
fn return_block(b: &mut TreeBuilder, expr: NodeId) -> NodeId {
    let ret = b.node(NodeKind::Return(Some(expr)));
    b.block(vec![ret])
}
