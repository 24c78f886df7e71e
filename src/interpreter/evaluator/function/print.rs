use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Emits one line through the host's output sink.
///
/// Every argument is formatted with the canonical value formatting and the
/// results are joined with single spaces. `print()` with no arguments emits
/// an empty line.
///
/// # Parameters
/// - `context`: The evaluation context owning the output sink.
/// - `args`: The evaluated arguments.
///
/// # Returns
/// Undefined; `print` is called for its effect.
pub fn print(context: &mut Context<'_>, args: &[Value], _line: usize) -> EvalResult<Value> {
    let text = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    context.host.write_line(&text, false);

    Ok(Value::undefined())
}
