//! Function call evaluation methods for the Interpreter.

use ogri_ir::{NodeArena, NodeId, NodeKind};
use ogri_runtime::{
    control_outside_loop, invalid_target, not_callable, EvalError, FunctionValue, LocalScope,
    Scope, Value,
};
use smallvec::SmallVec;

use super::{EvalOutcome, Interpreter};
use crate::builtins::{call_builtin, BuiltinIo};
use crate::diagnostics::CallFrame;

impl Interpreter<'_> {
    /// Evaluate `name(args)`.
    ///
    /// The callee is resolved before the arguments are evaluated.
    pub(super) fn eval_call(
        &mut self,
        name: &str,
        args: Option<NodeId>,
        line: u32,
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        let callee = scope.borrow().lookup(name, line)?;
        if !matches!(callee, Value::Function(_) | Value::Builtin(_)) {
            return Err(not_callable(name, callee.type_name()));
        }

        let arguments = match args {
            Some(args) => self.eval(args, scope)?,
            None => None,
        };

        match callee {
            Value::Builtin(builtin) => {
                let Some(arguments) = arguments else {
                    return call_builtin(builtin, None, self.builtin_io()).map(Some);
                };
                // Only a syntactic comma list spreads into separate arguments;
                // a single expression is one argument even if it is a list.
                let spread = args.is_some_and(|id| {
                    matches!(self.arena.kind(id), NodeKind::ValueList(items) if items.len() > 1)
                });
                let argv: SmallVec<[Value; 4]> = match arguments {
                    Value::List(list) if spread => list.to_vec().into_iter().collect(),
                    single => smallvec::smallvec![single],
                };
                call_builtin(builtin, Some(&argv), self.builtin_io()).map(Some)
            }
            Value::Function(function) => self.call_function(&function, arguments, line),
            other => Err(not_callable(name, other.type_name())),
        }
    }

    /// Call a user function in a fresh scope enclosed by its defining scope.
    ///
    /// A list argument spreads across the parameters in order (extra
    /// elements are ignored); any other value binds to the first parameter.
    #[tracing::instrument(level = "debug", skip(self, function, arguments), fields(name = %function.name))]
    fn call_function(
        &mut self,
        function: &FunctionValue,
        arguments: Option<Value>,
        line: u32,
    ) -> EvalOutcome {
        self.call_stack.push(CallFrame {
            name: function.name.clone(),
            line,
        })?;
        tracing::trace!(depth = self.call_stack.depth(), "enter function");

        let result = self.invoke(function, arguments);
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();

        match result? {
            Some(Value::Return(value)) => Ok(value.map(|v| *v)),
            Some(Value::Break) => Err(control_outside_loop("break")),
            Some(Value::Continue) => Err(control_outside_loop("continue")),
            other => Ok(other),
        }
    }

    fn invoke(&mut self, function: &FunctionValue, arguments: Option<Value>) -> EvalOutcome {
        let local = function.env.child()?;
        let params = match function.params {
            Some(params) => parameter_names(self.arena, params)?,
            None => Vec::new(),
        };
        {
            let mut frame = local.borrow_mut();
            match arguments {
                Some(Value::List(list)) => {
                    for (param, value) in params.iter().zip(list.to_vec()) {
                        frame.define(param, value)?;
                    }
                }
                Some(single) => {
                    if let Some(first) = params.first() {
                        frame.define(first, single)?;
                    }
                }
                None => {}
            }
        }
        self.eval(function.body, &local)
    }

    fn builtin_io(&self) -> BuiltinIo<'_> {
        BuiltinIo {
            print: &self.print,
            input: &self.input,
        }
    }
}

/// Flatten a parameter node into names, left to right.
fn parameter_names(arena: &NodeArena, params: NodeId) -> Result<Vec<&str>, EvalError> {
    let mut names = Vec::new();
    let mut pending = vec![params];
    while let Some(id) = pending.pop() {
        match arena.kind(id) {
            NodeKind::Identifier(name) => names.push(name.as_str()),
            NodeKind::IdentifierList(items) => pending.extend(items.iter().rev()),
            other => return Err(invalid_target(other.name())),
        }
    }
    Ok(names)
}
