/// Block parsing.
///
/// Parses the indented statement blocks that follow `if`, `else`, `while`,
/// `for`, and `func` headers, consuming the surrounding `Indent`/`Dedent`
/// markers.
pub mod block;
/// Core expression parsing.
///
/// Contains the program entry point, the expression precedence ladder, the
/// postfix member/call chain, and the verbatim harvesting of type-constructor
/// bracket bodies for the deferred sub-parse.
pub mod core;
/// Statement parsing.
///
/// Dispatches on the leading keyword of each line and assembles declaration,
/// control-flow, and expression statements.
pub mod statement;
/// Utility functions for the parser.
///
/// Provides shared helpers: comma-separated lists, identifier and exact-token
/// expectations, and optional newline consumption.
pub mod utils;
