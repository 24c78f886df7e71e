use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, CtorKind, Expr, MemberProp, Program},
    error::ParseError,
    interpreter::{
        lexer::{Sym, Token},
        parser::{
            statement::parse_statement,
            utils::{expect, parse_comma_separated},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a program.
///
/// Statements are collected until the stream is exhausted. Stray newlines
/// between top-level statements are skipped, as are surplus `Dedent` markers
/// (a multi-step outdent can emit more dedents than blocks were opened).
///
/// # Parameters
/// - `tokens`: The full token stream with line numbers.
///
/// # Returns
/// The parsed [`Program`].
///
/// # Errors
/// Returns the first `ParseError` encountered; there is no recovery.
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut body = Vec::new();

    while iter.peek().is_some() {
        while matches!(iter.peek(), Some((Token::Newline | Token::Dedent, _))) {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }
        body.push(parse_statement(&mut iter)?);
    }

    Ok(Program { body })
}

/// Parses a token slice as exactly one expression.
///
/// This is the entry point for the deferred sub-parse of type-constructor
/// bodies: `f[...]`, array elements, object property values, and template
/// islands all re-enter the parser here at evaluation time.
///
/// # Errors
/// Returns a `ParseError` if the slice is not a single well-formed
/// expression or if tokens remain after it.
pub fn parse_expression_entire(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    if let Some((tok, line)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                          line:  *line, });
    }

    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparison, and descends from there.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comparison(tokens)
}

/// Parses comparison expressions.
///
/// A single left-associative level holds all comparison operators:
/// `==`, `!=`, `<`, `>`, `<=`, `>=`.
///
/// Grammar: `comparison := additive (("==" | "!=" | "<" | ">" | "<=" | ">=") additive)*`
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && is_comparison_op(op)
        {
            let line = *line;
            tokens.next();
            let right = parse_additive(tokens)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses arithmetic expressions.
///
/// One left-associative level holds all four arithmetic operators;
/// `*` and `/` bind no tighter than `+` and `-`, so `2 + 3 * 4` is
/// `(2 + 3) * 4`. This flat ladder is part of the language, not an
/// implementation shortcut.
///
/// Grammar: `additive := postfix (("+" | "-" | "*" | "/") postfix)*`
fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_postfix(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Add
                       | BinaryOperator::Sub
                       | BinaryOperator::Mul
                       | BinaryOperator::Div)
        {
            let line = *line;
            tokens.next();
            let right = parse_postfix(tokens)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses a primary expression followed by its postfix chain.
///
/// The chain attaches, repeatedly:
/// - `.` `{ expr }`: a dynamic member access,
/// - `.` followed by an identifier or number: a static member access,
/// - `( args... )`: a call,
/// - `[ ... ]`: only when the current expression is an identifier naming a
///   type constructor; the bracket body is captured verbatim (nested
///   `[ ... ]` pairs preserved) for the deferred parse. Any other `[`
///   terminates the chain.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    loop {
        let (token, line) = match tokens.peek() {
            Some((token, line)) => (token.clone(), *line),
            None => break,
        };

        match token {
            Token::Symbol(Sym::Dot) => {
                tokens.next();
                expr = parse_member(tokens, expr, line)?;
            },
            Token::Symbol(Sym::LParen) => {
                tokens.next();
                let arguments =
                    parse_comma_separated(tokens, parse_expression, &Token::Symbol(Sym::RParen))?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    line };
            },
            Token::LBracket => {
                let kind = match &expr {
                    Expr::Identifier { name, .. } => CtorKind::from_keyword(name),
                    _ => None,
                };
                let Some(kind) = kind else { break };

                tokens.next();
                let body = harvest_ctor_body(tokens, line)?;
                expr = Expr::TypeCtor { kind, body, line };
            },
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses the property part of a member access, after the `.` has been
/// consumed. `{ expr }` makes the member dynamic; an identifier or number
/// names it statically.
fn parse_member<'a, I>(tokens: &mut Peekable<I>, object: Expr, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, token_line) = match tokens.peek() {
        Some((token, token_line)) => (token.clone(), *token_line),
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let property = match token {
        Token::Symbol(Sym::LBrace) => {
            tokens.next();
            let key = parse_expression(tokens)?;
            expect(tokens, &Token::Symbol(Sym::RBrace))?;
            MemberProp::Dynamic(Box::new(key))
        },
        Token::Identifier(name) => {
            tokens.next();
            MemberProp::Static(name)
        },
        Token::Number(text) => {
            tokens.next();
            MemberProp::Static(text)
        },
        tok => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected member name, found {tok:?}"),
                                                     line:  token_line, });
        },
    };

    Ok(Expr::Member { object: Box::new(object),
                      property,
                      line })
}

/// Collects a type-constructor body verbatim.
///
/// The opening `[` has been consumed. Tokens are copied into the body,
/// tracking nested `[ ... ]` depth, until the matching `]`, which is
/// consumed but not stored. The bracket pair itself stays out of the body;
/// everything between it survives untouched so the deferred parser sees a
/// well-formed sub-stream.
fn harvest_ctor_body<'a, I>(tokens: &mut Peekable<I>,
                            line: usize)
                            -> ParseResult<Vec<(Token, usize)>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut body = Vec::new();
    let mut depth = 0usize;

    loop {
        match tokens.next() {
            Some((Token::LBracket, l)) => {
                depth += 1;
                body.push((Token::LBracket, *l));
            },
            Some((Token::RBracket, _)) if depth == 0 => return Ok(body),
            Some((Token::RBracket, l)) => {
                depth -= 1;
                body.push((Token::RBracket, *l));
            },
            Some((tok, l)) => body.push((tok.clone(), *l)),
            None => return Err(ParseError::UnterminatedConstructor { line }),
        }
    }
}

/// Parses a primary expression: a parenthesized sub-expression, an
/// identifier, or a number literal.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Symbol(Sym::LParen), _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Symbol(Sym::RParen))?;
            Ok(expr)
        },
        Some((Token::Identifier(name), line)) => Ok(Expr::Identifier { name: name.clone(),
                                                                       line: *line, }),
        Some((Token::Number(text), line)) => Ok(Expr::Literal { value: parse_number(text, *line)?,
                                                                line:  *line, }),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected expression, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a number token's spelling into the integral value model.
/// Fractional spellings are legal tokens (they matter as raw constructor
/// text) and truncate when used as bare literals.
#[allow(clippy::cast_possible_truncation)]
fn parse_number(text: &str, line: usize) -> ParseResult<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Ok(n);
    }
    text.parse::<f64>()
        .map(|f| f as i64)
        .map_err(|_| ParseError::UnexpectedToken { token: text.to_string(),
                                                   line })
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
///
/// # Example
/// ```
/// use squared::{
///     ast::BinaryOperator,
///     interpreter::{
///         lexer::{Sym, Token},
///         parser::core::token_to_binary_operator,
///     },
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Symbol(Sym::Plus)),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::LBracket), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Symbol(Sym::Plus) => Some(BinaryOperator::Add),
        Token::Symbol(Sym::Minus) => Some(BinaryOperator::Sub),
        Token::Symbol(Sym::Star) => Some(BinaryOperator::Mul),
        Token::Symbol(Sym::Slash) => Some(BinaryOperator::Div),
        Token::Symbol(Sym::EqEq) => Some(BinaryOperator::Equal),
        Token::Symbol(Sym::NotEq) => Some(BinaryOperator::NotEqual),
        Token::Symbol(Sym::Less) => Some(BinaryOperator::Less),
        Token::Symbol(Sym::Greater) => Some(BinaryOperator::Greater),
        Token::Symbol(Sym::LessEq) => Some(BinaryOperator::LessEqual),
        Token::Symbol(Sym::GreaterEq) => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the comparison class.
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual)
}
