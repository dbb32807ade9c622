//! Whole-program runs through the public entry points.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use ogri_eval::{buffer_handler, scripted_input, EvalErrorKind, SharedPrintHandler, Value};
use ogri_ir::{BinaryOp, NodeId, NodeKind, SyntaxTree, TreeBuilder};
use ogri_runtime::HashSeed;
use ogric::{diagnostic, run, run_with, ExitStatus, RunError, RunOptions};
use pretty_assertions::assert_eq;

fn options(print: &SharedPrintHandler) -> RunOptions {
    RunOptions::default()
        .with_print_handler(print.clone())
        .with_input_handler(scripted_input(Vec::<String>::new()))
        .with_hash_seed(HashSeed::fixed(1))
}

fn say_var(b: &mut TreeBuilder, name: &str) -> NodeId {
    let arg = b.ident(name);
    b.call("say", Some(arg))
}

/// x = 5
/// y = x + 2
/// say(y)
fn sum_program(divisor: Option<i64>) -> SyntaxTree {
    let mut b = TreeBuilder::new();
    let x = b.ident("x");
    let five = b.int(5);
    let s1 = b.assign(x, five);
    b.set_line(2);
    let y = b.ident("y");
    let x = b.ident("x");
    let rhs = match divisor {
        Some(d) => {
            let d = b.int(d);
            b.binary(BinaryOp::Div, x, d)
        }
        None => {
            let two = b.int(2);
            b.binary(BinaryOp::Add, x, two)
        }
    };
    let s2 = b.assign(y, rhs);
    b.set_line(3);
    let s3 = say_var(&mut b, "y");
    b.finish(vec![s1, s2, s3])
}

#[test]
fn prints_the_sum() {
    let print = buffer_handler();
    let outcome = run_with(&sum_program(None), options(&print)).unwrap();
    assert_eq!(print.output(), "7\n");
    assert_eq!(outcome.value, Some(Value::Int(1)));
}

#[test]
fn successful_run_reports_success() {
    // A lone literal prints nothing, so stdout stays clean.
    let mut b = TreeBuilder::new();
    let zero = b.int(0);
    let tree = b.finish(vec![zero]);
    let status = run(&tree);
    assert_eq!(status, ExitStatus::Success);
    assert!(status.is_success());
    assert_eq!(status.code(), 0);
}

#[test]
fn division_by_zero_fails_with_its_line() {
    let print = buffer_handler();
    let err = run_with(&sum_program(Some(0)), options(&print)).unwrap_err();
    let RunError::Runtime(ref eval) = err else {
        panic!("expected a runtime error, got {err:?}");
    };
    assert_eq!(eval.kind, EvalErrorKind::DivideByZero);
    assert_eq!(eval.line, Some(2));
    assert_eq!(diagnostic(&err), "Runtime Error at line 2: division by zero\n");
    assert_eq!(print.output(), "");
}

#[test]
fn failing_run_reports_failure() {
    let status = run(&sum_program(Some(0)));
    assert_eq!(status, ExitStatus::Failure);
    assert_eq!(status.code(), 1);
}

#[test]
fn empty_program_is_a_failure() {
    let print = buffer_handler();
    let err = run_with(&SyntaxTree::empty(), options(&print)).unwrap_err();
    assert!(matches!(err, RunError::EmptyProgram));
    assert_eq!(run(&SyntaxTree::empty()), ExitStatus::Failure);
}

#[test]
fn repeat_prints_each_number() {
    // repeat i in range(0, 3) { say(i) }
    let mut b = TreeBuilder::new();
    let zero = b.int(0);
    let three = b.int(3);
    let args = b.values(vec![zero, three]);
    let collection = b.call("range", Some(args));
    let body = say_var(&mut b, "i");
    let block = b.block(vec![body]);
    let lp = b.node(NodeKind::Repeat {
        variable: "i".to_string(),
        collection,
        block,
    });
    let tree = b.finish(vec![lp]);

    let print = buffer_handler();
    run_with(&tree, options(&print)).unwrap();
    assert_eq!(print.output(), "0\n1\n2\n");
}

#[test]
fn recursion_reports_a_backtrace() {
    // define down(n) { return down(n - 1) }
    // down(3)
    let mut b = TreeBuilder::new();
    let param = b.ident("n");
    b.set_line(2);
    let n = b.ident("n");
    let one = b.int(1);
    let next = b.binary(BinaryOp::Sub, n, one);
    let call = b.call("down", Some(next));
    let ret = b.node(NodeKind::Return(Some(call)));
    let body = b.block(vec![ret]);
    b.set_line(1);
    let def = b.node(NodeKind::FuncDef {
        name: "down".to_string(),
        params: Some(param),
        body,
    });
    b.set_line(4);
    let arg = b.int(3);
    let start = b.call("down", Some(arg));
    let tree = b.finish(vec![def, start]);

    let print = buffer_handler();
    let err = run_with(&tree, options(&print).with_max_call_depth(Some(3))).unwrap_err();
    let text = diagnostic(&err);
    assert_eq!(
        text,
        "Runtime Error at line 2: maximum recursion depth exceeded (limit: 3)\n\
         stack backtrace:\n  \
         0: down at line 2\n  \
         1: down at line 2\n  \
         2: down at line 4\n"
    );
}

#[test]
fn listen_reads_scripted_lines() {
    // words = listen()
    // say(len(words))
    let mut b = TreeBuilder::new();
    let words = b.ident("words");
    let listen = b.call("listen", None);
    let s1 = b.assign(words, listen);
    let arg = b.ident("words");
    let len = b.call("len", Some(arg));
    let s2 = b.call("say", Some(len));
    let tree = b.finish(vec![s1, s2]);

    let print = buffer_handler();
    let opts = options(&print).with_input_handler(scripted_input(["a b  c"]));
    run_with(&tree, opts).unwrap();
    assert_eq!(print.output(), "3\n");
}

#[test]
fn function_call_returns_the_sum() {
    // define f(a, b) { return a + b }
    // say(f(3, 4))
    let mut b = TreeBuilder::new();
    let pa = b.ident("a");
    let pb = b.ident("b");
    let params = b.node(NodeKind::IdentifierList(vec![pa, pb]));
    let a = b.ident("a");
    let bb = b.ident("b");
    let sum = b.binary(BinaryOp::Add, a, bb);
    let ret = b.node(NodeKind::Return(Some(sum)));
    let body = b.block(vec![ret]);
    let def = b.node(NodeKind::FuncDef {
        name: "f".to_string(),
        params: Some(params),
        body,
    });
    b.set_line(2);
    let three = b.int(3);
    let four = b.int(4);
    let args = b.values(vec![three, four]);
    let call = b.call("f", Some(args));
    let out = b.call("say", Some(call));
    let tree = b.finish(vec![def, out]);

    let print = buffer_handler();
    run_with(&tree, options(&print)).unwrap();
    assert_eq!(print.output(), "7\n");
}

#[test]
fn slice_bounds_are_clamped() {
    // xs = range(5)
    // say(xs[2..10]) say(xs[2..5]) say(xs[4..1])
    let mut b = TreeBuilder::new();
    let xs = b.ident("xs");
    let five = b.int(5);
    let list = b.call("range", Some(five));
    let mut statements = vec![b.assign(xs, list)];
    for (from, end) in [(2, 10), (2, 5), (4, 1)] {
        let from = b.int(from);
        let end = b.int(end);
        let index = b.node(NodeKind::Range {
            from: Some(from),
            end: Some(end),
        });
        let slice = b.node(NodeKind::Slice {
            name: "xs".to_string(),
            index,
        });
        statements.push(b.call("say", Some(slice)));
    }
    let tree = b.finish(statements);

    let print = buffer_handler();
    run_with(&tree, options(&print)).unwrap();
    assert_eq!(print.output(), "[2, 3, 4]\n[2, 3, 4]\n[]\n");
}

#[test]
fn push_then_pop_round_trips() {
    // xs = range(3)
    // push(xs, 9)
    // say(pop(xs), len(xs))
    let mut b = TreeBuilder::new();
    let xs = b.ident("xs");
    let three = b.int(3);
    let list = b.call("range", Some(three));
    let s1 = b.assign(xs, list);
    let target = b.ident("xs");
    let nine = b.int(9);
    let args = b.values(vec![target, nine]);
    let s2 = b.call("push", Some(args));
    let source = b.ident("xs");
    let popped = b.call("pop", Some(source));
    let source = b.ident("xs");
    let len = b.call("len", Some(source));
    let args = b.values(vec![popped, len]);
    let s3 = b.call("say", Some(args));
    let tree = b.finish(vec![s1, s2, s3]);

    let print = buffer_handler();
    run_with(&tree, options(&print)).unwrap();
    assert_eq!(print.output(), "9 3\n");
}

#[test]
fn list_holding_itself_prints_and_succeeds() {
    // xs = range(2)
    // push(xs, xs)
    // say(xs)
    let mut b = TreeBuilder::new();
    let xs = b.ident("xs");
    let two = b.int(2);
    let list = b.call("range", Some(two));
    let s1 = b.assign(xs, list);
    let target = b.ident("xs");
    let item = b.ident("xs");
    let args = b.values(vec![target, item]);
    let s2 = b.call("push", Some(args));
    let s3 = say_var(&mut b, "xs");
    let tree = b.finish(vec![s1, s2, s3]);

    let print = buffer_handler();
    run_with(&tree, options(&print)).unwrap();
    assert_eq!(print.output(), "[0, 1, [...]]\n");
}
