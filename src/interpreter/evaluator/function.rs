/// Call dispatch and user-defined function invocation.
///
/// Contains the builtin lookup table and the frame management for calling
/// function values.
pub mod core;

/// The `eval` builtin and its cell state.
pub mod eval_cell;

/// The `print` builtin.
pub mod print;

/// The `random` builtin.
pub mod random;
