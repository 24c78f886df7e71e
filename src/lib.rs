//! # squared
//!
//! Squared (`^2`) is a small, bracket-delimited, indentation-structured
//! scripting language together with its tree-walking interpreter. Source
//! text flows through a lexer that synthesizes indent/dedent markers, a
//! recursive-descent parser whose type-constructor nodes keep their bracket
//! bodies as raw tokens, and an evaluator that walks the tree over lexical
//! scopes, re-parsing those bodies lazily when their kind demands it.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    evaluator::core::Context,
    host::Host,
    lexer::tokenize,
    parser::core::parse_program,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Stmt`, and `Expr` types that
/// represent the syntactic structure of source code as a tree, along with
/// the operator and constructor-kind enums. The AST is built by the parser
/// and traversed by the evaluator; type-constructor nodes additionally
/// carry verbatim token slices for the deferred sub-parse.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// executing code. Every variant carries the source line it refers to.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and the host bridge to provide a complete runtime for
/// Squared scripts.
pub mod interpreter;

/// Runs a script against a host.
///
/// The source is tokenized and parsed; the resulting program executes in a
/// fresh global scope over the given host. Both syntax and runtime errors
/// are reported through the host's output sink with the error flag
/// set before being returned, so an embedder's users see them even when the
/// embedder ignores the result. With `auto_print` set, the value of the
/// final top-level expression statement is emitted after a successful run.
///
/// # Errors
/// Returns the first `ParseError` or `RuntimeError` the script hits.
///
/// # Examples
/// ```
/// use squared::{interpreter::host::Host, run_script};
///
/// let (host, lines) = Host::collecting();
/// run_script("var [x] = int[10]\nprint(x)\n", host, false).unwrap();
///
/// assert_eq!(*lines.borrow(), vec!["10".to_string()]);
/// ```
pub fn run_script(source: &str,
                  host: Host<'_>,
                  auto_print: bool)
                  -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source);

    let program = match parse_program(&tokens) {
        Ok(program) => program,
        Err(error) => {
            let mut host = host;
            host.write_line(&format!("Syntax Error: {error}"), true);
            return Err(Box::new(error));
        },
    };

    let mut context = Context::new(host);
    match context.run(&program) {
        Ok(last) => {
            if auto_print && let Some(value) = last {
                context.host.write_line(&value.to_string(), false);
            }
            Ok(())
        },
        Err(error) => {
            context.host
                   .write_line(&format!("Runtime Error: {error}"), true);
            Err(Box::new(error))
        },
    }
}
