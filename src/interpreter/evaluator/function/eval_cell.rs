use std::rc::Rc;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// The `eval` builtin: a one-slot value cell.
///
/// `eval(x)` stores `x` in the context and returns a fresh cell whose
/// `result` member is `x`. `eval()` returns the most recently stored value
/// directly (undefined before the first store).
pub fn eval(context: &mut Context<'_>, args: &[Value], _line: usize) -> EvalResult<Value> {
    match args {
        [] => Ok(context.last_eval.clone()),
        [value] => {
            context.last_eval = value.clone();
            Ok(Value::EvalCell(Rc::new(value.clone())))
        },
        _ => unreachable!("arity checked by the builtin table"),
    }
}
