use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Picks a uniformly random result.
///
/// Two forms exist:
/// - `random(array)` returns a uniformly chosen element of the array.
/// - `random(min, max)` returns a uniform integer in `[min, max]`, both
///   bounds included.
///
/// # Parameters
/// - `args`: One array, or two integer bounds.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// - `TypeError` for an empty array, non-array single argument, non-integer
///   bounds, or a range end below its start.
pub fn random(_context: &mut Context<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let mut rng = rand::thread_rng();

    match args {
        [Value::Array(elements)] => {
            if elements.is_empty() {
                return Err(RuntimeError::TypeError { details:
                                                         "random() needs a non-empty array".to_string(),
                                                     line });
            }
            Ok(elements[rng.gen_range(0..elements.len())].clone())
        },

        [other] => Err(RuntimeError::TypeError { details: format!("random() with one argument expects an array, found {other}"),
                                                 line }),

        [min, max] => {
            let min = min.as_int(line)?;
            let max = max.as_int(line)?;
            if max < min {
                return Err(RuntimeError::TypeError { details:
                                                         "random() range end must be >= start".to_string(),
                                                     line });
            }
            Ok(Value::from(rng.gen_range(min..=max)))
        },

        _ => unreachable!("arity checked by the builtin table"),
    }
}
