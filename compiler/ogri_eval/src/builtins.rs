//! Built-in library.
//!
//! Every builtin receives `None` when the call site passed no arguments,
//! otherwise the argument slice, and returns exactly one value. Output and
//! input go through the interpreter's handlers so embedders and tests can
//! capture them.

use ogri_runtime::{type_mismatch, Builtin, EvalResult, ListValue, Value};

use crate::input_handler::InputHandlerImpl;
use crate::print_handler::PrintHandlerImpl;

/// Handlers the I/O builtins write to and read from.
#[derive(Clone, Copy)]
pub struct BuiltinIo<'h> {
    pub print: &'h PrintHandlerImpl,
    pub input: &'h InputHandlerImpl,
}

/// Invoke `builtin` with the call's arguments.
pub fn call_builtin(builtin: Builtin, args: Option<&[Value]>, io: BuiltinIo<'_>) -> EvalResult {
    match builtin {
        Builtin::Say => Ok(print(args, io.print, true)),
        Builtin::Says => Ok(print(args, io.print, false)),
        Builtin::ToInt => Ok(to_int(args)),
        Builtin::Listen => listen(args, io),
        Builtin::Range => range(args),
        Builtin::Len => Ok(len(args)),
        Builtin::Push => push(args),
        Builtin::Pop => pop(args),
    }
}

/// `say` / `says`: space-joined arguments, with literal `\n` expanded.
///
/// Returns the number of characters converted, before expansion and
/// excluding separators.
fn print(args: Option<&[Value]>, out: &PrintHandlerImpl, newline: bool) -> Value {
    let mut text = String::new();
    let mut count = 0usize;
    for (i, arg) in args.unwrap_or_default().iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        let converted = arg.to_string();
        count += converted.chars().count();
        text.push_str(&converted.replace("\\n", "\n"));
    }
    if newline {
        text.push('\n');
    }
    out.write(&text);
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

fn to_int(args: Option<&[Value]>) -> Value {
    let n = match args.and_then(<[Value]>::first) {
        Some(Value::Str(text)) => parse_leading_int(text),
        Some(Value::Float(x)) => truncate(*x),
        _ => 0,
    };
    Value::Int(n)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "saturating float-to-int truncation is the conversion's contract"
)]
fn truncate(x: f64) -> i64 {
    x as i64
}

/// Parse the longest integer prefix of `text`, like C's `atol`.
///
/// Leading whitespace and one sign are accepted; no digits gives 0 and
/// out-of-range values saturate.
pub fn parse_leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

/// `listen`: read one line; split on spaces into a list when it has any.
///
/// The first builtin among the arguments converts each token (or the
/// whole line).
fn listen(args: Option<&[Value]>, io: BuiltinIo<'_>) -> EvalResult {
    let Some(line) = io.input.read_line() else {
        return Ok(Value::Str(String::new()));
    };
    let converter = args.unwrap_or_default().iter().find_map(|arg| match arg {
        Value::Builtin(b) => Some(*b),
        _ => None,
    });
    let convert = |token: &str| -> EvalResult {
        let item = Value::Str(token.to_string());
        match converter {
            Some(b) => call_builtin(b, Some(&[item]), io),
            None => Ok(item),
        }
    };

    if !line.contains(' ') {
        return convert(&line);
    }
    let list = ListValue::new();
    for token in line.split(' ').filter(|t| !t.is_empty()) {
        list.push(convert(token)?)?;
    }
    Ok(Value::List(list))
}

/// `range(end)`, `range(start, end)` or `range(start, end, step)`.
///
/// A zero step counts as 1; a negative step counts down. Non-integer
/// arguments produce an empty list.
fn range(args: Option<&[Value]>) -> EvalResult {
    let list = ListValue::new();
    let args = args.unwrap_or_default();
    let Some(bounds) = args.iter().map(Value::as_int).collect::<Option<Vec<i64>>>() else {
        tracing::warn!("range requires integer arguments");
        return Ok(Value::List(list));
    };
    let (start, end, step) = match bounds.as_slice() {
        [] => return Ok(Value::List(list)),
        [end] => (0, *end, 1),
        [start, end] => (*start, *end, 1),
        [start, end, step] => (*start, *end, *step),
        _ => {
            tracing::warn!(count = bounds.len(), "range takes at most three arguments");
            return Ok(Value::List(list));
        }
    };
    let step = if step == 0 { 1 } else { step };

    let mut current = start;
    while (step > 0 && current < end) || (step < 0 && current > end) {
        list.push(Value::Int(current))?;
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::List(list))
}

/// `len`: list size, string character count, otherwise the argument count.
fn len(args: Option<&[Value]>) -> Value {
    let args = args.unwrap_or_default();
    let n = match args {
        [Value::List(list)] => list.len(),
        [Value::Str(text)] => text.chars().count(),
        _ => args.len(),
    };
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `push(list, value)`: append in place and return the same list.
fn push(args: Option<&[Value]>) -> EvalResult {
    let args = args.unwrap_or_default();
    let [target, value, ..] = args else {
        return Err(type_mismatch(
            "2 arguments for push",
            &format!("{} argument(s)", args.len()),
        ));
    };
    let Value::List(list) = target else {
        return Err(type_mismatch("list as first argument of push", target.type_name()));
    };
    list.push(value.clone())?;
    Ok(Value::List(list.clone()))
}

/// `pop(list)`: remove and return the last element, or 0 when empty.
fn pop(args: Option<&[Value]>) -> EvalResult {
    let Some(target) = args.and_then(<[Value]>::first) else {
        return Err(type_mismatch("1 argument for pop", "0 arguments"));
    };
    let Value::List(list) = target else {
        return Err(type_mismatch("list as argument of pop", target.type_name()));
    };
    Ok(list.pop().unwrap_or(Value::Int(0)))
}
