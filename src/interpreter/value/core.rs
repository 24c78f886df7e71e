use std::{collections::HashMap, rc::Rc};

use crate::{ast::Stmt, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// A primitive runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A 64-bit signed integer.
    Int(i64),
    /// A boolean, produced by comparison operators and `bool[...]`.
    Bool(bool),
    /// A string. The language has no string literal; strings come from the
    /// `str`/`fstr` constructors and from unbound identifiers evaluating to
    /// their own spelling.
    Str(String),
    /// The out-of-bounds / absent-value sentinel.
    Undefined,
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// A user-defined function value.
///
/// The closure is a snapshot of the scope visible at declaration time, not a
/// live reference; mutations of the declaring scope after the declaration are
/// invisible to the function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    /// Parameter names in order.
    pub params:  Vec<String>,
    /// The body statements.
    pub body:    Vec<Stmt>,
    /// The captured bindings.
    pub closure: HashMap<String, Value>,
}

/// Represents a runtime value in the interpreter.
///
/// This enum models every type that can appear in expressions, scopes,
/// function returns, and conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A primitive payload.
    Primitive(Primitive),
    /// A dense, ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// An object: unique string keys mapping to values, in insertion order.
    Object(Rc<Vec<(String, Self)>>),
    /// A function together with its closure snapshot.
    Function(Rc<FunctionValue>),
    /// The return shape of the `eval` builtin; exposes a `result` member.
    EvalCell(Rc<Self>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Primitive(Primitive::Int(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Primitive(Primitive::Bool(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Primitive(Primitive::Str(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Primitive(Primitive::Str(v.to_string()))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl Value {
    /// The undefined sentinel.
    #[must_use]
    pub const fn undefined() -> Self {
        Self::Primitive(Primitive::Undefined)
    }

    /// Whether the value counts as true in a condition.
    ///
    /// Everything is truthy except `false`, `0`, and undefined.
    ///
    /// # Example
    /// ```
    /// use squared::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(3).is_truthy());
    /// assert!(Value::from("big").is_truthy());
    /// assert!(!Value::from(0).is_truthy());
    /// assert!(!Value::undefined().is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self,
                  Self::Primitive(Primitive::Bool(false)
                                  | Primitive::Int(0)
                                  | Primitive::Undefined))
    }

    /// Converts the value to an `i64`, or returns an error if it is not an
    /// integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer payload.
    /// - `Err(RuntimeError::TypeError)`: For any other value.
    pub fn as_int(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Primitive(Primitive::Int(n)) => Ok(*n),
            other => Err(RuntimeError::TypeError { details: format!("expected an integer, found {other}"),
                                                   line }),
        }
    }

    /// Returns `true` if the value is an [`Array`](Self::Array).
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Array(elements) => {
                write!(f, "[")?;

                for (index, value) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Object(properties) => {
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }

                write!(f, "{{ ")?;
                for (index, (key, value)) in properties.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, " }}")
            },
            Self::Function(func) => write!(f, "<func({})>", func.params.join(", ")),
            Self::EvalCell(result) => write!(f, "{{ result: {result} }}"),
        }
    }
}
