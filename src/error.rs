/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into an
/// AST. The first syntax error is fatal; there is no error recovery.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// assignments to unknown variables, calls of non-functions, bad member
/// accesses, and malformed constructor bodies.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
