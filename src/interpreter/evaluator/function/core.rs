use crate::{
    ast::{Expr, MemberProp},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Outcome},
            function::{eval_cell, print, random},
        },
        value::core::{FunctionValue, Value},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context, the evaluated argument values,
/// and the call's line number.
type BuiltinFn = fn(&mut Context<'_>, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `Any` places no constraint on the argument count.
#[derive(Clone, Copy)]
enum Arity {
    OneOf(&'static [usize]),
    Any,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"  => { arity: Arity::Any,            func: print::print },
    "random" => { arity: Arity::OneOf(&[1, 2]), func: random::random },
    "eval"   => { arity: Arity::OneOf(&[0, 1]), func: eval_cell::eval },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::OneOf(arr) => {
                let mut index = 0;
                while index < arr.len() {
                    if arr[index] == n {
                        return true;
                    }
                    index += 1;
                }
                false
            },
            Self::Any => true,
        }
    }
}

impl Context<'_> {
    /// Evaluates a call expression.
    ///
    /// Resolution happens in order:
    /// 1. A callee that is an identifier naming a builtin invokes the
    ///    builtin, after an arity check.
    /// 2. Otherwise the callee is evaluated (a member access on an object
    ///    resolves its property here); the result must be a function value.
    ///
    /// Arguments are always evaluated in the caller's scope, left to right,
    /// before any frame for the call is created.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` on a wrong arity, `UnknownFunction` when the
    /// callee is not callable.
    pub fn eval_call(&mut self,
                     callee: &Expr,
                     arguments: &[Expr],
                     line: usize)
                     -> EvalResult<Value> {
        if let Expr::Identifier { name, .. } = callee
           && let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name.as_str())
        {
            let args = self.eval_arguments(arguments)?;
            if !builtin.arity.check(args.len()) {
                return Err(RuntimeError::ArgumentCountMismatch { line });
            }
            return (builtin.func)(self, &args, line);
        }

        let callee_value = self.eval(callee)?;
        match callee_value {
            Value::Function(func) => {
                let args = self.eval_arguments(arguments)?;
                self.call_function(&func, args, line)
            },
            _ => Err(RuntimeError::UnknownFunction { name: callee_name(callee),
                                                     line }),
        }
    }

    /// Evaluates a call's argument expressions in the caller's scope.
    fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut args = Vec::with_capacity(arguments.len());
        for expr in arguments {
            args.push(self.eval(expr)?);
        }
        Ok(args)
    }

    /// Invokes a user-defined function value.
    ///
    /// A fresh frame is seeded from the function's closure snapshot, the
    /// parameters are bound over it, and the body runs in that frame. A
    /// `Return` outcome unwraps to the call's value; falling off the end of
    /// the body yields undefined. `Break`/`Continue` never cross the call
    /// boundary because the frame is popped either way.
    pub(crate) fn call_function(&mut self,
                                func: &FunctionValue,
                                args: Vec<Value>,
                                line: usize)
                                -> EvalResult<Value> {
        if args.len() != func.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { line });
        }

        let mut frame = func.closure.clone();
        for (param, arg) in func.params.iter().zip(args) {
            frame.insert(param.clone(), arg);
        }

        self.scope_stack.push(frame);
        let outcome = self.exec_block(&func.body);
        self.scope_stack.pop();

        match outcome? {
            Outcome::Return(value) => Ok(value),
            Outcome::Normal | Outcome::Break | Outcome::Continue => Ok(Value::undefined()),
        }
    }
}

/// A printable name for a call's target, used in error messages.
fn callee_name(callee: &Expr) -> String {
    match callee {
        Expr::Identifier { name, .. }
        | Expr::Member { property: MemberProp::Static(name), .. } => name.clone(),
        _ => "<expression>".to_string(),
    }
}
