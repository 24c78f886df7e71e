/// Core runtime value types.
///
/// Defines the `Value` enum with all payloads the evaluator can produce:
/// primitives, arrays, insertion-ordered objects, function values with their
/// closure snapshots, and eval cells. Also implements the canonical
/// value-to-text formatting used by `print`, template interpolation, and
/// error messages.
pub mod core;
