//! Lexer (tokenizer) for plume source
//!
//! Pull-based: the parser asks for one [`Token`] at a time with
//! [`Lexer::next_token`]. The whole source is held in memory as bytes; the
//! cursor tracks byte position, line and column.

use crate::ir::SourceLocation;
use log::trace;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Exports(SourceLocation),
    Proc(SourceLocation),
    Var(SourceLocation),

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Colon(SourceLocation),     // :
    Semicolon(SourceLocation), // ;
    Eq(SourceLocation),        // =

    // End of input
    Eof(SourceLocation),
}

/// Payload-free token tag, used when reporting what was expected or found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    Ident,
    Exports,
    Proc,
    Var,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Eq,
    Eof,
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Exports(loc)
            | Token::Proc(loc)
            | Token::Var(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Colon(loc)
            | Token::Semicolon(loc)
            | Token::Eq(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::IntLiteral(..) => TokenKind::IntLiteral,
            Token::Ident(..) => TokenKind::Ident,
            Token::Exports(_) => TokenKind::Exports,
            Token::Proc(_) => TokenKind::Proc,
            Token::Var(_) => TokenKind::Var,
            Token::LParen(_) => TokenKind::LParen,
            Token::RParen(_) => TokenKind::RParen,
            Token::LBrace(_) => TokenKind::LBrace,
            Token::RBrace(_) => TokenKind::RBrace,
            Token::Colon(_) => TokenKind::Colon,
            Token::Semicolon(_) => TokenKind::Semicolon,
            Token::Eq(_) => TokenKind::Eq,
            Token::Eof(_) => TokenKind::Eof,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "integer literal {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::Ident => "identifier",
            TokenKind::Exports => "'exports'",
            TokenKind::Proc => "'proc'",
            TokenKind::Var => "'var'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Eq => "'='",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for plume source
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    line: usize,
    column: usize,
    token_start: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer over a fully loaded source buffer.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            position: 0,
            line: 1,
            column: 1,
            token_start: 0,
            finished: false,
        }
    }

    /// Tokenize the entire input, including the trailing [`Token::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = matches!(token, Token::Eof(_));
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token and advance past it.
    ///
    /// Once the input is exhausted every call returns [`Token::Eof`].
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let loc = self.current_location();
        self.token_start = self.position;

        let Some(ch) = self.advance() else {
            return Ok(Token::Eof(loc));
        };

        let token = match ch {
            b'0'..=b'9' => self.number_literal(loc)?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier_or_keyword(loc),
            b'(' => Token::LParen(loc),
            b')' => Token::RParen(loc),
            b'{' => Token::LBrace(loc),
            b'}' => Token::RBrace(loc),
            b':' => Token::Colon(loc),
            b';' => Token::Semicolon(loc),
            b'=' => Token::Eq(loc),
            _ => {
                let shown = if ch.is_ascii_graphic() {
                    format!("'{}'", ch as char)
                } else {
                    format!("'\\x{:02x}'", ch)
                };
                return Err(LexError {
                    message: format!("unexpected character {}", shown),
                    location: loc,
                });
            }
        };

        trace!("token {} at {}", token, loc);
        Ok(token)
    }

    /// Byte range in the source of the most recently produced token
    pub fn token_span(&self) -> Range<usize> {
        self.token_start..self.position
    }

    /// Parse decimal integer literal
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        self.consume_while(|ch| ch.is_ascii_digit());

        let digits = self.lexeme();
        let value = digits.parse::<i64>().map_err(|_| LexError {
            message: format!("integer literal out of range: {}", digits),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        self.consume_while(|ch| ch.is_ascii_alphanumeric() || ch == b'_');

        let ident = self.lexeme();
        match ident.as_str() {
            "exports" => Token::Exports(loc),
            "proc" => Token::Proc(loc),
            "var" => Token::Var(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Text of the token currently being scanned. Only called once the
    /// scanned bytes are known to be ASCII.
    fn lexeme(&self) -> String {
        String::from_utf8_lossy(&self.input[self.token_start..self.position]).into_owned()
    }

    fn consume_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.consume_while(|ch| matches!(ch, b' ' | b'\t' | b'\r' | b'\n'));
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    /// Advance to next byte
    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields every token before end of input; stops after the first error.
impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Token::Eof(_)) => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
