/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST over a scope stack, executes statements and
/// expressions, interprets type-constructor bodies, and produces all side
/// effects through the host. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, closures, and control flow.
/// - Reports runtime errors such as undefined variables or bad members.
pub mod evaluator;
/// The host bridge connects the core to its embedder.
///
/// The core performs no I/O of its own: `print` output and error reporting
/// go through a host callback, and `import` resolves against a
/// host-provided module registry.
///
/// # Responsibilities
/// - Owns the output sink callback.
/// - Stores the module registry consulted by `import`.
/// - Provides ready-made stdio and line-collecting hosts.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens
/// paired with line numbers. Because the language is indentation-structured,
/// the raw character scan is followed by a pass that turns leading
/// whitespace into explicit `Indent`/`Dedent` markers.
///
/// # Responsibilities
/// - Converts the input character stream into tokens, raw spelling kept.
/// - Synthesizes balanced indentation markers.
/// - Tolerates unknown bytes by skipping them.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST by recursive descent. Type-constructor bracket bodies
/// are not parsed here; they are captured verbatim and handed to the
/// evaluator, which re-enters the parser when a constructor's kind demands
/// an expression.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar, reporting the first error with its position.
/// - Harvests raw constructor bodies with balanced bracket tracking.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum with primitives, arrays, insertion-ordered
/// objects, function values, and eval cells, plus the canonical
/// value-to-text formatting.
pub mod value;
