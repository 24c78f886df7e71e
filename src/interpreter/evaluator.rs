/// Core evaluation logic and context management.
///
/// Contains the evaluation context with its scope stack, statement and block
/// execution, the control-flow outcome type, and import handling.
pub mod core;

/// Binary operator evaluation.
///
/// Implements arithmetic on integer payloads and the comparison operators,
/// including the division-by-zero and overflow checks.
pub mod binary;

/// Member access evaluation.
///
/// Resolves static and dynamic member accesses on arrays, objects, and eval
/// cells.
pub mod member;

/// Type-constructor evaluation.
///
/// Interprets the raw token bodies captured by the parser: value parsing,
/// deferred expression sub-parses, array and object building, and the
/// `fint`/`fstr` template constructors.
pub mod ctor;

/// Function evaluation.
///
/// Handles builtin dispatch (`print`, `random`, `eval`), object-method
/// calls, and user-defined function invocation.
pub mod function;
