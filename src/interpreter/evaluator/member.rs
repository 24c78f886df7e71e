use crate::{
    ast::{Expr, MemberProp},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Primitive, Value},
    },
};

impl Context<'_> {
    /// Evaluates a member access.
    ///
    /// The object expression is evaluated first. A static property uses its
    /// written name; a dynamic property (`o.{expr}`) evaluates its
    /// expression and formats the result into the key.
    ///
    /// Lookup rules per payload:
    /// - Arrays answer `val` with the array itself and `eN`-style or bare
    ///   numeric names as 0-based indices; out-of-range indices yield the
    ///   string `"undefined"` rather than failing.
    /// - Objects answer their keys.
    /// - Eval cells answer `result`.
    ///
    /// Everything else raises `InvalidMember`.
    pub fn eval_member(&mut self,
                       object: &Expr,
                       property: &MemberProp,
                       line: usize)
                       -> EvalResult<Value> {
        let object_value = self.eval(object)?;

        let key = match property {
            MemberProp::Static(name) => name.clone(),
            MemberProp::Dynamic(expr) => self.eval(expr)?.to_string(),
        };

        member_lookup(&object_value, &key, line)
    }
}

/// Resolves a property name against an evaluated value.
fn member_lookup(object: &Value, key: &str, line: usize) -> EvalResult<Value> {
    match object {
        Value::Array(elements) => {
            if key == "val" {
                return Ok(object.clone());
            }
            match element_index(key) {
                Some(index) => Ok(elements.get(index)
                                          .cloned()
                                          .unwrap_or_else(|| {
                                              Value::Primitive(Primitive::Str("undefined".to_string()))
                                          })),
                None => Err(RuntimeError::InvalidMember { property: key.to_string(),
                                                          line }),
            }
        },
        Value::Object(properties) => {
            properties.iter()
                      .find(|(name, _)| name == key)
                      .map(|(_, value)| value.clone())
                      .ok_or_else(|| RuntimeError::InvalidMember { property: key.to_string(),
                                                                   line })
        },
        Value::EvalCell(result) if key == "result" => Ok((**result).clone()),
        _ => Err(RuntimeError::InvalidMember { property: key.to_string(),
                                               line }),
    }
}

/// Recognizes array index spellings: `e0`, `e12`, or a bare number.
fn element_index(key: &str) -> Option<usize> {
    let digits = key.strip_prefix('e').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
