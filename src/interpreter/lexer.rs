use logos::Logos;

/// A printable operator or punctuation symbol.
///
/// Multi-character symbols are matched before their single-character
/// prefixes, so `==` never lexes as two `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sym {
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `!`
    Bang,
}

impl Sym {
    /// The symbol's source spelling.
    ///
    /// # Example
    /// ```
    /// use squared::interpreter::lexer::Sym;
    ///
    /// assert_eq!(Sym::EqEq.text(), "==");
    /// assert_eq!(Sym::Dot.text(), ".");
    /// ```
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Bang => "!",
        }
    }
}

impl std::fmt::Display for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Represents a lexical token of the surface language.
///
/// Identifiers and numbers keep their raw spelling so that type-constructor
/// bodies can reproduce source text verbatim. `Indent`/`Dedent` never come
/// straight from the character stream; they are synthesized from leading
/// whitespace after the raw scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An identifier such as `x` or `greet`. Keywords are identifiers too;
    /// the parser gives them meaning by position.
    Identifier(String),
    /// A number literal, raw spelling preserved (`42`, `3.14`).
    Number(String),
    /// An operator or punctuation symbol.
    Symbol(Sym),
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// End of a source line.
    Newline,
    /// Indentation increased by the carried width.
    Indent(usize),
    /// Indentation decreased by one 4-wide step.
    Dedent,
}

impl Token {
    /// The raw source spelling of the token.
    ///
    /// Layout tokens (`Newline`, `Indent`, `Dedent`) have no spelling and
    /// contribute nothing when constructor bodies are joined back into text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Identifier(text) | Self::Number(text) => text,
            Self::Symbol(sym) => sym.text(),
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Newline | Self::Indent(_) | Self::Dedent => "",
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// The raw token stream as logos sees it: no indentation structure yet,
/// whitespace runs kept so the second pass can measure them.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LexerExtras)]
enum RawToken {
    /// Identifier tokens; names such as `x` or `greet`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Number literal tokens such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    /// Operator and punctuation symbols.
    #[token("==", |_| Sym::EqEq)]
    #[token("!=", |_| Sym::NotEq)]
    #[token("<=", |_| Sym::LessEq)]
    #[token(">=", |_| Sym::GreaterEq)]
    #[token("=", |_| Sym::Eq)]
    #[token(",", |_| Sym::Comma)]
    #[token(".", |_| Sym::Dot)]
    #[token("+", |_| Sym::Plus)]
    #[token("-", |_| Sym::Minus)]
    #[token("*", |_| Sym::Star)]
    #[token("/", |_| Sym::Slash)]
    #[token("(", |_| Sym::LParen)]
    #[token(")", |_| Sym::RParen)]
    #[token("{", |_| Sym::LBrace)]
    #[token("}", |_| Sym::RBrace)]
    #[token("<", |_| Sym::Less)]
    #[token(">", |_| Sym::Greater)]
    #[token("!", |_| Sym::Bang)]
    Symbol(Sym),
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// End of line.
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    Newline,
    /// A run of blanks. Only runs at the start of a line matter; the rest
    /// are dropped by the indentation pass.
    #[regex(r"[ \t\r\f]+", |lex| indent_width(lex.slice()))]
    Whitespace(usize),
}

/// Measures a whitespace run for indentation purposes. Tabs count as 4
/// spaces; other blank characters count as nothing.
fn indent_width(slice: &str) -> usize {
    slice.chars()
         .map(|c| match c {
             ' ' => 1,
             '\t' => 4,
             _ => 0,
         })
         .sum()
}

/// Converts source text into the surface token stream.
///
/// Runs the raw logos scan, then synthesizes `Indent`/`Dedent` markers from
/// each line's leading whitespace: one `Indent` carrying the width increase
/// when a line indents further, and one `Dedent` per 4-wide step (clamped at
/// zero) when it returns. Blank and comment-only lines leave the indent
/// state untouched, and enough `Dedent`s are appended at end of input to
/// close every open level.
///
/// Unknown bytes are skipped; the lexer never fails.
///
/// # Parameters
/// - `source`: UTF-8 source text.
///
/// # Returns
/// The tokens paired with their source line numbers.
///
/// # Example
/// ```
/// use squared::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("while [x]\n    print(x)\n");
///
/// let indents = tokens.iter().filter(|(t, _)| matches!(t, Token::Indent(_))).count();
/// let dedents = tokens.iter().filter(|(t, _)| matches!(t, Token::Dedent)).count();
/// assert_eq!(indents, 1);
/// assert_eq!(dedents, 1);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<(Token, usize)> {
    let mut raw = Vec::new();
    let mut lexer = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        // Unknown bytes are tolerated: anything the scanner cannot match is
        // dropped and lexing continues after it.
        if let Ok(tok) = token {
            raw.push((tok, lexer.extras.line));
        }
    }

    synthesize_indentation(raw)
}

/// Turns the raw stream into surface tokens, replacing leading whitespace
/// with balanced `Indent`/`Dedent` markers.
fn synthesize_indentation(raw: Vec<(RawToken, usize)>) -> Vec<(Token, usize)> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut current = 0usize;
    let mut last_line = 1usize;
    let mut at_line_start = true;
    let mut iter = raw.into_iter().peekable();

    while let Some((tok, line)) = iter.next() {
        last_line = line;

        if at_line_start {
            let (width, tok, line) = match tok {
                RawToken::Whitespace(width) => match iter.next() {
                    Some((next, next_line)) => (width, next, next_line),
                    None => break,
                },
                other => (0, other, line),
            };
            last_line = line;

            if matches!(tok, RawToken::Newline) {
                // Blank or comment-only line: the indent state is untouched.
                tokens.push((Token::Newline, line));
                continue;
            }

            adjust_indent(&mut tokens, &mut current, width, line);
            at_line_start = false;
            tokens.push((map_raw(tok), line));
            continue;
        }

        match tok {
            RawToken::Whitespace(_) => {},
            RawToken::Newline => {
                tokens.push((Token::Newline, line));
                at_line_start = true;
            },
            other => tokens.push((map_raw(other), line)),
        }
    }

    while current > 0 {
        tokens.push((Token::Dedent, last_line));
        current = current.saturating_sub(4);
    }

    tokens
}

/// Emits the indentation markers for a line starting at `width`.
fn adjust_indent(tokens: &mut Vec<(Token, usize)>,
                 current: &mut usize,
                 width: usize,
                 line: usize) {
    if width > *current {
        tokens.push((Token::Indent(width - *current), line));
        *current = width;
    } else if width < *current {
        while *current > width {
            tokens.push((Token::Dedent, line));
            *current = current.saturating_sub(4);
        }
        *current = width;
    }
}

/// Maps a raw token to its surface counterpart. Layout-only raw tokens are
/// consumed by `synthesize_indentation` and never reach this point.
fn map_raw(tok: RawToken) -> Token {
    match tok {
        RawToken::Identifier(text) => Token::Identifier(text),
        RawToken::Number(text) => Token::Number(text),
        RawToken::Symbol(sym) => Token::Symbol(sym),
        RawToken::LBracket => Token::LBracket,
        RawToken::RBracket => Token::RBracket,
        RawToken::Newline => Token::Newline,
        RawToken::Comment | RawToken::Whitespace(_) => {
            unreachable!("layout tokens are handled by the indentation pass")
        },
    }
}
