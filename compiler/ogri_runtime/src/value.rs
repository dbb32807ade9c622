//! Runtime values.
//!
//! `Value` is a closed sum over every datum the language produces, including
//! the three control signals that carry `return`/`break`/`continue` through
//! the ordinary result channel. Values are immutable except lists: a
//! [`ListValue`] is a shared handle, so every alias observes in-place
//! mutation through `push`, `pop`, or indexed assignment.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use ogri_ir::NodeId;

use crate::scope::{LocalScope, Scope};
use crate::vector::{Vector, VectorError};

/// Host function identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Say,
    Says,
    ToInt,
    Listen,
    Range,
    Len,
    Push,
    Pop,
}

impl Builtin {
    /// Every builtin, in registration order.
    pub const ALL: [Builtin; 8] = [
        Builtin::Say,
        Builtin::Says,
        Builtin::ToInt,
        Builtin::Listen,
        Builtin::Range,
        Builtin::Len,
        Builtin::Push,
        Builtin::Pop,
    ];

    /// Name the builtin is bound to in the root scope.
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Say => "say",
            Builtin::Says => "says",
            Builtin::ToInt => "to_int",
            Builtin::Listen => "listen",
            Builtin::Range => "range",
            Builtin::Len => "len",
            Builtin::Push => "push",
            Builtin::Pop => "pop",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// Shared, mutable list of values.
#[derive(Clone, Default)]
pub struct ListValue(Rc<RefCell<Vector<Value>>>);

impl ListValue {
    pub fn new() -> Self {
        ListValue::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        ListValue(Rc::new(RefCell::new(Vector::from_vec(values))))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Clone of the element at `index` (lists inside stay shared).
    pub fn get(&self, index: usize) -> Result<Value, VectorError> {
        self.0.borrow().get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) -> Result<(), VectorError> {
        self.0.borrow_mut().set(index, value)
    }

    pub fn push(&self, value: Value) -> Result<(), VectorError> {
        self.0.borrow_mut().append(value)
    }

    /// Remove and return the last element.
    pub fn pop(&self) -> Option<Value> {
        let mut items = self.0.borrow_mut();
        let last = items.len().checked_sub(1)?;
        items.remove_at(last).ok()
    }

    /// Snapshot of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().as_slice().to_vec()
    }

    pub fn borrow(&self) -> Ref<'_, Vector<Value>> {
        self.0.borrow()
    }

    /// Whether both handles share the same backing container.
    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(self, f, &mut Vec::new())
    }
}

/// A user-defined function closed over its defining scope.
#[derive(Clone)]
pub struct FunctionValue {
    pub name: String,
    /// `IdentifierList` node, absent for a function without parameters.
    pub params: Option<NodeId>,
    pub body: NodeId,
    /// Captured by reference: later bindings in it stay visible.
    pub env: LocalScope<Scope>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.env.ptr_eq(&other.env)
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(ListValue),
    Function(FunctionValue),
    Builtin(Builtin),
    /// `return`, with the returned value if there is one.
    Return(Option<Box<Value>>),
    Break,
    Continue,
}

impl Value {
    /// A fresh list holding `values`.
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(ListValue::from_values(values))
    }

    pub fn string(text: impl Into<String>) -> Value {
        Value::Str(text.into())
    }

    /// Type name for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Return(_) => "return",
            Value::Break => "break",
            Value::Continue => "continue",
        }
    }

    /// Truthiness: zero numbers, `false` and empty lists are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::List(list) => !list.is_empty(),
            _ => true,
        }
    }

    /// Whether this is a `return`/`break`/`continue` signal.
    pub const fn is_signal(&self) -> bool {
        matches!(self, Value::Return(_) | Value::Break | Value::Continue)
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => lists_equal(a, b, &mut Vec::new()),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Return(a), Value::Return(b)) => a == b,
            (Value::Break, Value::Break) | (Value::Continue, Value::Continue) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(list) => write_list(list, f, &mut Vec::new()),
            Value::Function(_) => f.write_str("<function>"),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name()),
            Value::Return(_) => f.write_str("<return>"),
            Value::Break => f.write_str("<break>"),
            Value::Continue => f.write_str("<continue>"),
        }
    }
}

/// Element-wise comparison. A pair of lists already being compared further
/// up counts as equal, so self-containing lists terminate.
fn lists_equal(
    a: &ListValue,
    b: &ListValue,
    comparing: &mut Vec<(ListValue, ListValue)>,
) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if comparing.iter().any(|(x, y)| x.ptr_eq(a) && y.ptr_eq(b)) {
        return true;
    }
    if a.len() != b.len() {
        return false;
    }
    comparing.push((a.clone(), b.clone()));
    let equal = a
        .borrow()
        .iter()
        .zip(b.borrow().iter())
        .all(|pair| match pair {
            (Value::List(x), Value::List(y)) => lists_equal(x, y, comparing),
            (x, y) => x == y,
        });
    comparing.pop();
    equal
}

/// `[a, b, c]`, with `[...]` standing in for a list that is already being
/// written further up.
fn write_list(
    list: &ListValue,
    f: &mut fmt::Formatter<'_>,
    open: &mut Vec<ListValue>,
) -> fmt::Result {
    if open.iter().any(|outer| outer.ptr_eq(list)) {
        return f.write_str("[...]");
    }
    open.push(list.clone());
    f.write_str("[")?;
    for (i, item) in list.borrow().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match item {
            Value::List(inner) => write_list(inner, f, open)?,
            other => write!(f, "{other}")?,
        }
    }
    open.pop();
    f.write_str("]")
}

/// Format a float the way C's `%g` does: six significant digits, trailing
/// zeros removed, exponent form outside `1e-4 <= |x| < 1e6`.
pub fn format_float(x: f64) -> String {
    const PRECISION: i32 = 6;

    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first; the exponent of the rounded
    // value decides the notation.
    let scientific = format!("{x:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(PRECISION - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
