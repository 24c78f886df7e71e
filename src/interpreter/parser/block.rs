use std::iter::Peekable;

use crate::{
    ast::Stmt,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses an indented statement block.
///
/// A block follows a statement header (`if [..]`, `while [..]`, `func [..]`
/// and so on) on the next, deeper-indented line. Parsing skips the newline
/// after the header, consumes exactly one `Indent`, then collects statements
/// until the matching `Dedent`, which it also consumes. Blank lines inside
/// the block are ignored.
///
/// Grammar: `block := NEWLINE INDENT statement* DEDENT`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the statement header.
///
/// # Returns
/// The statements inside the block.
///
/// # Errors
/// Returns a `ParseError` if no indented block follows or the input ends
/// before the block closes.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while matches!(tokens.peek(), Some((Token::Newline, _))) {
        tokens.next();
    }

    let line = match tokens.next() {
        Some((Token::Indent(_), line)) => *line,
        Some((_, line)) => return Err(ParseError::ExpectedIndentedBlock { line: *line }),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let mut statements = Vec::new();
    loop {
        while matches!(tokens.peek(), Some((Token::Newline, _))) {
            tokens.next();
        }

        match tokens.peek() {
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}
