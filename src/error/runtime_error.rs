#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to assign to a variable that exists in no reachable scope.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a value that is neither a function nor a builtin.
    UnknownFunction {
        /// The name of the callee.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Accessed a property that the value does not expose.
    InvalidMember {
        /// The property that was requested.
        property: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Imported a module that the host registry does not provide.
    UnknownModule {
        /// The name of the module.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A constructor body could not be interpreted for its kind.
    InvalidConstructorBody {
        /// Details about what was wrong with the body.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::InvalidMember { property, line } => {
                write!(f, "Error on line {line}: Invalid member '{property}'.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::ArgumentCountMismatch { line } => {
                write!(f, "Error on line {line}: Argument count mismatch.")
            },
            Self::UnknownModule { name, line } => {
                write!(f, "Error on line {line}: Unknown module '{name}'.")
            },
            Self::InvalidConstructorBody { details, line } => {
                write!(f, "Error on line {line}: Invalid constructor body: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
