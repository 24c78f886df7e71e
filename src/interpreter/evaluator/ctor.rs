use std::rc::Rc;

use crate::{
    ast::CtorKind,
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::{Sym, Token},
        parser::core::parse_expression_entire,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a type constructor.
    ///
    /// The parser stored the bracket body as a verbatim token slice; what
    /// happens to it depends entirely on the constructor kind. Value kinds
    /// (`int`, `str`, `bool`) work on the joined token text. `var` resolves
    /// a name. `f`/`fobj` re-enter the parser on the whole body, `a` and
    /// `obj`/`o` on comma-separated segments, and the template kinds
    /// (`fint`, `fstr`) on each `{ ... }` island.
    ///
    /// # Parameters
    /// - `kind`: The constructor keyword.
    /// - `body`: The raw tokens between the brackets.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The constructed value.
    pub fn eval_ctor(&mut self,
                     kind: CtorKind,
                     body: &[(Token, usize)],
                     line: usize)
                     -> EvalResult<Value> {
        match kind {
            CtorKind::Int => parse_int_text(&concat_texts(body), line),
            CtorKind::Str => Ok(Value::from(normalize_str(&join_texts(body)))),
            CtorKind::Bool => {
                let text = concat_texts(body).to_lowercase();
                Ok(Value::from(text == "true"))
            },
            CtorKind::Var => self.eval_var_ctor(body, line),
            CtorKind::F | CtorKind::Fobj => self.eval_expr_ctor(body),
            CtorKind::A => self.eval_array_ctor(body, line),
            CtorKind::Obj | CtorKind::O => self.eval_object_ctor(body, line),
            CtorKind::Fint => {
                let pieces = self.render_template(body, line)?;
                parse_int_text(&pieces.concat(), line)
            },
            CtorKind::Fstr => {
                let pieces = self.render_template(body, line)?;
                Ok(Value::from(normalize_fstr(&pieces.join(" "))))
            },
        }
    }

    /// `var[name]`: resolves the first body token as a variable.
    ///
    /// Unlike a bare identifier, a `var` box does not fall back to the name
    /// string; a missing variable is an error.
    fn eval_var_ctor(&mut self, body: &[(Token, usize)], line: usize) -> EvalResult<Value> {
        let name = match body.first() {
            Some((Token::Identifier(name), _)) => name,
            _ => {
                return Err(RuntimeError::InvalidConstructorBody { details:
                                                                      "var[...] needs a variable name".to_string(),
                                                                  line });
            },
        };

        self.lookup_variable(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                             line })
    }

    /// `f[...]` / `fobj[...]`: the body is re-parsed as one expression and
    /// evaluated. When the body does not parse, the constructor degrades to
    /// the concatenated token text instead of failing.
    fn eval_expr_ctor(&mut self, body: &[(Token, usize)]) -> EvalResult<Value> {
        match parse_expression_entire(body) {
            Ok(expr) => self.eval(&expr),
            Err(_) => Ok(Value::from(concat_texts(body))),
        }
    }

    /// `a[...]`: splits the body on top-level commas and evaluates each
    /// segment as an expression.
    fn eval_array_ctor(&mut self, body: &[(Token, usize)], line: usize) -> EvalResult<Value> {
        if body.is_empty() {
            return Ok(Value::Array(Rc::new(Vec::new())));
        }

        let mut elements = Vec::new();
        for segment in split_top_level(body) {
            let expr = parse_expression_entire(segment).map_err(|e| deferred(&e, line))?;
            elements.push(self.eval(&expr)?);
        }

        Ok(Value::Array(Rc::new(elements)))
    }

    /// `obj[...]` / `o[...]`: builds an object from `prop[key] = expr`
    /// segments.
    ///
    /// Each top-level comma segment must start with the identifier `prop`;
    /// segments that do not are silently ignored. The key is the token at
    /// index 2 (inside the `prop` box) and everything after the `=` is the
    /// value expression. Keys stay unique: a repeated key overwrites its
    /// earlier value in place, keeping the original insertion position.
    fn eval_object_ctor(&mut self, body: &[(Token, usize)], line: usize) -> EvalResult<Value> {
        let mut properties: Vec<(String, Value)> = Vec::new();

        if body.is_empty() {
            return Ok(Value::Object(Rc::new(properties)));
        }

        for segment in split_top_level(body) {
            let is_prop = matches!(segment.first(),
                                   Some((Token::Identifier(keyword), _)) if keyword == "prop");
            if !is_prop {
                continue;
            }

            let key = match segment.get(2) {
                Some((token, _)) if !token.text().is_empty() => token.text().to_string(),
                _ => {
                    return Err(RuntimeError::InvalidConstructorBody { details:
                                                                          "prop segment is missing its key".to_string(),
                                                                      line });
                },
            };

            let eq = segment.iter()
                            .position(|(token, _)| matches!(token, Token::Symbol(Sym::Eq)));
            let Some(eq) = eq else {
                return Err(RuntimeError::InvalidConstructorBody { details: format!("prop[{key}] is missing its '=' value"),
                                                                  line });
            };

            let expr = parse_expression_entire(&segment[eq + 1..]).map_err(|e| deferred(&e, line))?;
            let value = self.eval(&expr)?;

            if let Some(entry) = properties.iter_mut().find(|(name, _)| *name == key) {
                entry.1 = value;
            } else {
                properties.push((key, value));
            }
        }

        Ok(Value::Object(Rc::new(properties)))
    }

    /// Renders a `fint`/`fstr` template body into text pieces.
    ///
    /// Plain tokens contribute their raw spelling. A balanced `{ ... }`
    /// island is parsed as an expression, evaluated in the current scope,
    /// and contributes its formatted value instead.
    fn render_template(&mut self,
                       body: &[(Token, usize)],
                       line: usize)
                       -> EvalResult<Vec<String>> {
        let mut pieces = Vec::new();
        let mut index = 0;

        while index < body.len() {
            let (token, _) = &body[index];

            if matches!(token, Token::Symbol(Sym::LBrace)) {
                let mut depth = 1usize;
                let mut end = index + 1;
                while end < body.len() && depth > 0 {
                    match &body[end].0 {
                        Token::Symbol(Sym::LBrace) => depth += 1,
                        Token::Symbol(Sym::RBrace) => depth -= 1,
                        _ => {},
                    }
                    end += 1;
                }
                if depth > 0 {
                    return Err(RuntimeError::InvalidConstructorBody { details:
                                                                          "unterminated '{' in template".to_string(),
                                                                      line });
                }

                let island = &body[index + 1..end - 1];
                let expr = parse_expression_entire(island).map_err(|e| deferred(&e, line))?;
                pieces.push(self.eval(&expr)?.to_string());
                index = end;
            } else {
                pieces.push(token.text().to_string());
                index += 1;
            }
        }

        Ok(pieces)
    }
}

/// Wraps a deferred-parse failure as a runtime error; the constructor body
/// is only parsed at evaluation time.
fn deferred(error: &ParseError, line: usize) -> RuntimeError {
    RuntimeError::InvalidConstructorBody { details: error.to_string(),
                                           line }
}

/// The body's token texts, concatenated with no separators.
fn concat_texts(body: &[(Token, usize)]) -> String {
    body.iter().map(|(token, _)| token.text()).collect()
}

/// The body's token texts, joined with single spaces.
fn join_texts(body: &[(Token, usize)]) -> String {
    body.iter()
        .map(|(token, _)| token.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses joined text as a base-10 integer value.
fn parse_int_text(text: &str, line: usize) -> EvalResult<Value> {
    text.trim()
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| RuntimeError::InvalidConstructorBody { details: format!("'{text}' is not an integer"),
                                                            line })
}

/// The `str` constructor's whitespace cleanup: token texts are joined with
/// spaces, then the padding around commas and before dots is collapsed.
fn normalize_str(text: &str) -> String {
    text.replace(" , ", ",").replace(" .", ".").trim().to_string()
}

/// The `fstr` constructor's whitespace cleanup: no space is kept before
/// punctuation.
fn normalize_fstr(text: &str) -> String {
    text.replace(" ,", ",")
        .replace(" !", "!")
        .replace(" ?", "?")
        .replace(" .", ".")
        .trim()
        .to_string()
}

/// Splits a constructor body on commas at bracket depth zero, so nested
/// constructor bodies stay intact inside their segment.
fn split_top_level(body: &[(Token, usize)]) -> Vec<&[(Token, usize)]> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, (token, _)) in body.iter().enumerate() {
        match token {
            Token::LBracket => depth += 1,
            Token::RBracket => depth = depth.saturating_sub(1),
            Token::Symbol(Sym::Comma) if depth == 0 => {
                segments.push(&body[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }
    segments.push(&body[start..]);

    segments
}
