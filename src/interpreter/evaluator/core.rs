use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, Program, Stmt},
    error::RuntimeError,
    interpreter::{
        host::Host,
        value::core::{FunctionValue, Primitive, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement or block finished.
///
/// Control flow travels as an ordinary return value: loops stop on `Break`,
/// re-test on `Continue`, and `Return` rides outward until a function-call
/// frame unwraps it. An outcome is never stored in a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Execution ran off the end of the statement(s).
    Normal,
    /// A `break` looking for the nearest enclosing loop.
    Break,
    /// A `continue` looking for the nearest enclosing loop.
    Continue,
    /// A `return`, carrying its value to the nearest call frame.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// The scope stack holds the global frame at the bottom and one frame per
/// active function call above it. Name lookup consults the current frame and
/// then the globals; intermediate frames are invisible, because closures
/// capture by snapshot rather than by chain.
pub struct Context<'h> {
    /// Scope frames; index 0 is the global scope.
    pub scope_stack: Vec<HashMap<String, Value>>,
    /// The embedder's output sink and module registry.
    pub host:        Host<'h>,
    /// The cell state behind the `eval` builtin.
    pub(crate) last_eval: Value,
}

impl<'h> Context<'h> {
    /// Creates a new evaluation context over a host.
    #[must_use]
    pub fn new(host: Host<'h>) -> Self {
        Self { scope_stack: vec![HashMap::new()],
               host,
               last_eval: Value::undefined(), }
    }

    /// Runs a whole program.
    ///
    /// Statements execute in order in the global scope. The value of the
    /// last top-level expression statement is returned so hosts can surface
    /// it (the CLI's pipe mode does). A stray control outcome at top level
    /// ends the run quietly.
    ///
    /// # Parameters
    /// - `program`: The parsed program.
    ///
    /// # Returns
    /// The last top-level expression value, if any statement produced one.
    pub fn run(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        let mut last = None;

        for statement in &program.body {
            if let Stmt::Expression { expr, .. } = statement {
                last = Some(self.eval(expr)?);
                continue;
            }
            match self.exec_statement(statement)? {
                Outcome::Normal => {},
                Outcome::Break | Outcome::Continue | Outcome::Return(_) => break,
            }
        }

        Ok(last)
    }

    /// Executes the statements of a block in order.
    ///
    /// The block runs in the current scope; blocks do not open scopes of
    /// their own. The first non-normal outcome stops the block and is handed
    /// to the caller to propagate.
    pub fn exec_block(&mut self, statements: &[Stmt]) -> EvalResult<Outcome> {
        for statement in statements {
            match self.exec_statement(statement)? {
                Outcome::Normal => {},
                outcome => return Ok(outcome),
            }
        }
        Ok(Outcome::Normal)
    }

    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// The statement's control-flow [`Outcome`].
    pub fn exec_statement(&mut self, statement: &Stmt) -> EvalResult<Outcome> {
        match statement {
            Stmt::VarDecl { name, value, .. } => {
                let value = self.eval(value)?;
                self.define_local(name, value);
                Ok(Outcome::Normal)
            },
            Stmt::Assign { name, value, line } => {
                let value = self.eval(value)?;
                if self.assign_existing(name, value) {
                    Ok(Outcome::Normal)
                } else {
                    Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                          line: *line, })
                }
            },
            Stmt::FuncDecl { name, params, body, .. } => {
                // The closure is a snapshot of the current frame, taken
                // before the function's own binding exists. Top-level
                // recursion still works through the live globals.
                let closure = self.scope_stack.last().cloned().expect("at least global");
                let func = FunctionValue { params: params.clone(),
                                           body: body.clone(),
                                           closure };
                self.define_local(name, Value::Function(Rc::new(func)));
                Ok(Outcome::Normal)
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::undefined(),
                };
                Ok(Outcome::Return(value))
            },
            Stmt::If { test, consequent, alternate, .. } => {
                if self.eval(test)?.is_truthy() {
                    self.exec_block(consequent)
                } else if let Some(alternate) = alternate {
                    self.exec_block(alternate)
                } else {
                    Ok(Outcome::Normal)
                }
            },
            Stmt::While { test, body, .. } => {
                while self.eval(test)?.is_truthy() {
                    match self.exec_block(body)? {
                        Outcome::Return(value) => return Ok(Outcome::Return(value)),
                        Outcome::Break => break,
                        Outcome::Continue | Outcome::Normal => {},
                    }
                }
                Ok(Outcome::Normal)
            },
            Stmt::For { init, test, update, body, .. } => {
                self.exec_statement(init)?;

                while self.eval(test)?.is_truthy() {
                    match self.exec_block(body)? {
                        Outcome::Return(value) => return Ok(Outcome::Return(value)),
                        Outcome::Break => break,
                        // `continue` skips the rest of the body but the
                        // update still runs before the next test.
                        Outcome::Continue | Outcome::Normal => {},
                    }
                    self.exec_statement(update)?;
                }
                Ok(Outcome::Normal)
            },
            Stmt::Break { .. } => Ok(Outcome::Break),
            Stmt::Continue { .. } => Ok(Outcome::Continue),
            Stmt::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Outcome::Normal)
            },
            Stmt::Import { module, line } => self.exec_import(module, *line),
        }
    }

    /// Resolves an `import` against the host's module registry.
    ///
    /// The module object becomes a global binding under the first
    /// dot-separated segment of its name (`import geometry.js` binds
    /// `geometry`), and each of its members is additionally bound at top
    /// level under its own key.
    fn exec_import(&mut self, module: &str, line: usize) -> EvalResult<Outcome> {
        let value = self.host
                        .modules
                        .get(module)
                        .cloned()
                        .ok_or_else(|| RuntimeError::UnknownModule { name: module.to_string(),
                                                                     line })?;

        if let Value::Object(properties) = &value {
            for (key, member) in properties.iter() {
                self.scope_stack[0].insert(key.clone(), member.clone());
            }
        }

        let root = module.split('.').next().unwrap_or(module);
        self.scope_stack[0].insert(root.to_string(), value);

        Ok(Outcome::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, identifiers, binary
    /// operations, member accesses, calls, and type constructors.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(*value)),
            Expr::Identifier { name, .. } => Ok(self.eval_identifier(name)),
            Expr::Binary { op, left, right, line } => {
                self.eval_binary_op(*op, left, right, *line)
            },
            Expr::Member { object, property, line } => {
                self.eval_member(object, property, *line)
            },
            Expr::Call { callee, arguments, line } => self.eval_call(callee, arguments, *line),
            Expr::TypeCtor { kind, body, line } => self.eval_ctor(*kind, body, *line),
        }
    }

    /// Evaluates a name reference.
    ///
    /// Lookup checks the current frame, then the globals. An unbound name
    /// yields its own spelling as a string: inside constructor bodies this
    /// is what carries bare words through as literal content, so a typo in
    /// ordinary code shows up as a stray string rather than an error.
    #[must_use]
    pub fn eval_identifier(&self, name: &str) -> Value {
        if let Some(value) = self.lookup_variable(name) {
            return value.clone();
        }
        Value::Primitive(Primitive::Str(name.to_string()))
    }

    /// Retrieves a variable from the reachable scopes.
    ///
    /// Only the current frame and the global frame are consulted;
    /// intermediate call frames are not part of the lookup chain.
    ///
    /// # Example
    /// ```
    /// use squared::interpreter::{evaluator::core::Context, host::Host, value::core::Value};
    ///
    /// let mut context = Context::new(Host::stdio());
    /// context.define_local("x", Value::from(5));
    ///
    /// assert_eq!(context.lookup_variable("x"), Some(&Value::from(5)));
    /// assert_eq!(context.lookup_variable("y"), None);
    /// ```
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> Option<&Value> {
        if let Some(frame) = self.scope_stack.last()
           && let Some(value) = frame.get(name)
        {
            return Some(value);
        }
        self.scope_stack[0].get(name)
    }

    /// Defines a variable in the current (innermost) frame.
    ///
    /// Used by declarations, parameter binding, and function declarations.
    ///
    /// # Panics
    /// Panics if no scope exists, which indicates an internal error.
    pub fn define_local(&mut self, name: &str, value: Value) {
        self.scope_stack
            .last_mut()
            .expect("at least global")
            .insert(name.to_string(), value);
    }

    /// Write-through assignment.
    ///
    /// Mutates the nearest reachable frame (current, then global) that
    /// already contains the name. Returns `false` when neither does, in
    /// which case the caller reports `UndefinedVariable`.
    ///
    /// # Example
    /// ```
    /// use squared::interpreter::{evaluator::core::Context, host::Host, value::core::Value};
    ///
    /// let mut context = Context::new(Host::stdio());
    /// context.define_local("y", Value::from(1));
    ///
    /// assert!(context.assign_existing("y", Value::from(5)));
    /// assert!(!context.assign_existing("missing", Value::from(0)));
    /// assert_eq!(context.lookup_variable("y"), Some(&Value::from(5)));
    /// ```
    pub fn assign_existing(&mut self, name: &str, value: Value) -> bool {
        if let Some(frame) = self.scope_stack.last_mut()
           && frame.contains_key(name)
        {
            frame.insert(name.to_string(), value);
            return true;
        }

        let globals = &mut self.scope_stack[0];
        if globals.contains_key(name) {
            globals.insert(name.to_string(), value);
            return true;
        }
        false
    }
}
