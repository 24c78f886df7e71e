use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operator applied to two expressions.
    ///
    /// Both operands are evaluated left to right in the current scope, then
    /// handed to [`eval_binary`].
    pub fn eval_binary_op(&mut self,
                          op: BinaryOperator,
                          left: &Expr,
                          right: &Expr,
                          line: usize)
                          -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        eval_binary(op, &lhs, &rhs, line)
    }
}

/// Applies a binary operator to two evaluated values.
///
/// Arithmetic unwraps integer payloads and yields an integer; ordering
/// comparisons do the same but yield a boolean. Equality compares any two
/// primitive payloads, with differing kinds simply unequal. Non-primitive
/// operands are a type error.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand value.
/// - `right`: Right operand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The resulting value.
///
/// # Example
/// ```
/// use squared::{ast::BinaryOperator, interpreter::{evaluator::binary::eval_binary, value::core::Value}};
///
/// let sum = eval_binary(BinaryOperator::Add, &Value::from(2), &Value::from(3), 1).unwrap();
/// assert_eq!(sum, Value::from(5));
///
/// let cmp = eval_binary(BinaryOperator::Less, &Value::from(2), &Value::from(3), 1).unwrap();
/// assert_eq!(cmp, Value::from(true));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    match op {
        BinaryOperator::Equal => Ok(Value::from(primitive_eq(left, right, line)?)),
        BinaryOperator::NotEqual => Ok(Value::from(!primitive_eq(left, right, line)?)),

        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div => {
            let a = left.as_int(line)?;
            let b = right.as_int(line)?;

            let result = match op {
                BinaryOperator::Add => a.checked_add(b).ok_or(RuntimeError::Overflow { line })?,
                BinaryOperator::Sub => a.checked_sub(b).ok_or(RuntimeError::Overflow { line })?,
                BinaryOperator::Mul => a.checked_mul(b).ok_or(RuntimeError::Overflow { line })?,
                BinaryOperator::Div => {
                    if b == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    a.checked_div(b).ok_or(RuntimeError::Overflow { line })?
                },
                _ => unreachable!(),
            };
            Ok(Value::from(result))
        },

        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => {
            let a = left.as_int(line)?;
            let b = right.as_int(line)?;

            let result = match op {
                BinaryOperator::Less => a < b,
                BinaryOperator::Greater => a > b,
                BinaryOperator::LessEqual => a <= b,
                BinaryOperator::GreaterEqual => a >= b,
                _ => unreachable!(),
            };
            Ok(Value::from(result))
        },
    }
}

/// Compares two values for equality at the primitive level.
fn primitive_eq(left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Primitive(a), Value::Primitive(b)) => Ok(a == b),
        _ => Err(RuntimeError::TypeError { details: format!("cannot compare {left} with {right}"),
                                           line }),
    }
}
