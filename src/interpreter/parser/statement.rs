use std::iter::Peekable;

use crate::{
    ast::Stmt,
    interpreter::{
        lexer::{Sym, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{eat_newline, expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement is recognized by its leading keyword identifier (`import`,
/// `var`, `func`, `return`, `if`, `while`, `for`, `break`, `continue`) or,
/// failing that, by the two-token lookahead `identifier =` marking an
/// assignment. Anything else is an expression statement.
///
/// Trailing newlines are consumed where present; they are optional before a
/// dedent and at end of input.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let keyword = match tokens.peek() {
        Some((Token::Identifier(name), line)) => Some((name.clone(), *line)),
        _ => None,
    };

    if let Some((keyword, line)) = keyword {
        match keyword.as_str() {
            "import" => return parse_import(tokens, line),
            "var" => return parse_var_decl(tokens, line),
            "func" => return parse_func_decl(tokens, line),
            "return" => return parse_return(tokens, line),
            "if" => return parse_if(tokens, line),
            "while" => return parse_while(tokens, line),
            "for" => return parse_for(tokens, line),
            "break" => {
                tokens.next();
                eat_newline(tokens);
                return Ok(Stmt::Break { line });
            },
            "continue" => {
                tokens.next();
                eat_newline(tokens);
                return Ok(Stmt::Continue { line });
            },
            _ => {},
        }
    }

    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;
    eat_newline(tokens);

    Ok(Stmt::Expression { expr, line })
}

/// Parses a variable declaration: `var [name] = expr`.
///
/// The declared name sits in its own bracket box. The initializer is a full
/// expression.
fn parse_var_decl<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `var`
    expect(tokens, &Token::LBracket)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::RBracket)?;
    expect(tokens, &Token::Symbol(Sym::Eq))?;

    let value = parse_expression(tokens)?;
    eat_newline(tokens);

    Ok(Stmt::VarDecl { name, value, line })
}

/// Parses an assignment statement: `name = expr`.
///
/// The function performs a limited lookahead: only when the next token is an
/// identifier and the one after it is `=` does it consume anything. If no
/// assignment pattern matches, the function returns `Ok(None)` and does not
/// consume tokens.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::Symbol(Sym::Eq), line)) = lookahead.peek() {
            let line = *line;
            let name = if let Some((Token::Identifier(n), _)) = tokens.next() {
                n.clone()
            } else {
                unreachable!()
            };
            tokens.next(); // `=`

            let value = parse_expression(tokens)?;
            eat_newline(tokens);

            return Ok(Some(Stmt::Assign { name, value, line }));
        }
    }
    Ok(None)
}

/// Parses a function declaration: `func [name(param, ...)]` plus its block.
///
/// Parameters may be plain identifiers or `var[name]` boxes; both forms bind
/// the same way.
fn parse_func_decl<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `func`
    expect(tokens, &Token::LBracket)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Symbol(Sym::LParen))?;
    let params = parse_comma_separated(tokens, parse_param, &Token::Symbol(Sym::RParen))?;
    expect(tokens, &Token::RBracket)?;

    let body = parse_block(tokens)?;

    Ok(Stmt::FuncDecl { name,
                        params,
                        body,
                        line })
}

/// Parses one parameter: either a bare identifier or a `var[name]` box.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;

    if name == "var" && matches!(tokens.peek(), Some((Token::LBracket, _))) {
        tokens.next();
        let boxed = parse_identifier(tokens)?;
        expect(tokens, &Token::RBracket)?;
        return Ok(boxed);
    }

    Ok(name)
}

/// Parses a `return` with an optional value expression.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `return`

    let value = match tokens.peek() {
        Some((Token::Newline | Token::Dedent, _)) | None => None,
        _ => Some(parse_expression(tokens)?),
    };
    eat_newline(tokens);

    Ok(Stmt::Return { value, line })
}

/// Parses an `if [test]` statement with its block and an optional `else`
/// block at the same indent level.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `if`
    expect(tokens, &Token::LBracket)?;
    let test = parse_expression(tokens)?;
    expect(tokens, &Token::RBracket)?;

    let consequent = parse_block(tokens)?;

    let has_else = matches!(tokens.peek(),
                            Some((Token::Identifier(name), _)) if name == "else");
    let alternate = if has_else {
        tokens.next();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Stmt::If { test,
                  consequent,
                  alternate,
                  line })
}

/// Parses a `while [test]` statement with its block.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `while`
    expect(tokens, &Token::LBracket)?;
    let test = parse_expression(tokens)?;
    expect(tokens, &Token::RBracket)?;

    let body = parse_block(tokens)?;

    Ok(Stmt::While { test, body, line })
}

/// Parses a `for [init, test, update]` statement with its block.
///
/// `init` and `update` are header statements: a var-declaration, an
/// assignment, or an expression, none of them newline-terminated.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `for`
    expect(tokens, &Token::LBracket)?;
    let init = parse_header_statement(tokens)?;
    expect(tokens, &Token::Symbol(Sym::Comma))?;
    let test = parse_expression(tokens)?;
    expect(tokens, &Token::Symbol(Sym::Comma))?;
    let update = parse_header_statement(tokens)?;
    expect(tokens, &Token::RBracket)?;

    let body = parse_block(tokens)?;

    Ok(Stmt::For { init: Box::new(init),
                   test,
                   update: Box::new(update),
                   body,
                   line })
}

/// Parses the restricted statement forms allowed in a `for` header.
fn parse_header_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var_decl = match tokens.peek() {
        Some((Token::Identifier(name), line)) if name == "var" => Some(*line),
        _ => None,
    };
    if let Some(line) = var_decl {
        return parse_var_decl(tokens, line);
    }

    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;

    Ok(Stmt::Expression { expr, line })
}

/// Parses an `import name` statement.
///
/// Dotted module names arrive from the lexer as `ident . ident`; the parser
/// reassembles them into one module name (`geometry.js`).
fn parse_import<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next(); // `import`
    let mut module = parse_identifier(tokens)?;

    while matches!(tokens.peek(), Some((Token::Symbol(Sym::Dot), _))) {
        tokens.next();
        let segment = parse_identifier(tokens)?;
        module.push('.');
        module.push_str(&segment);
    }
    eat_newline(tokens);

    Ok(Stmt::Import { module, line })
}
