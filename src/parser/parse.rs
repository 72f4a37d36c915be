//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, lookahead handling, and coordination
//! - `declarations`: `var`, `proc` and `exports` declarations
//! - `statements`: procedure bodies, blocks, and assignments
//! - `expressions`: variable references and integer constants
//!
//! The parser pulls one token at a time from its [`Lexer`] and keeps a single
//! token of lookahead. It owns the [`ScopeStack`] for the whole parse and
//! assigns every IR node a [`NodeId`] as it is built.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::error::ErrorKind;
use crate::ir::{Module, NodeId, SourceLocation, TypeKind};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::scope::{ScopeError, ScopeStack, Symbol};
use log::debug;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error(
        "syntax error at {location}: expected {}, found {found}",
        expected_list(.expected)
    )]
    Syntax {
        expected: Vec<TokenKind>,
        found: TokenKind,
        location: SourceLocation,
    },

    #[error("semantic error at {location}: {message}")]
    Semantic {
        name: String,
        message: String,
        location: SourceLocation,
    },

    #[error("internal error: {0}")]
    Scope(#[from] ScopeError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical(_) => ErrorKind::Lexical,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Semantic { .. } => ErrorKind::Semantic,
            ParseError::Scope(_) => ErrorKind::Internal,
        }
    }

    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Lexical(err) => Some(err.location),
            ParseError::Syntax { location, .. } | ParseError::Semantic { location, .. } => {
                Some(*location)
            }
            ParseError::Scope(_) => None,
        }
    }
}

fn expected_list(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// Syntax error for `token` when one of `expected` was required
pub(crate) fn unexpected_token(token: &Token, expected: &[TokenKind]) -> ParseError {
    ParseError::Syntax {
        expected: expected.to_vec(),
        found: token.kind(),
        location: token.location(),
    }
}

/// Recursive descent parser for plume modules
pub struct Parser {
    lexer: Lexer,
    current: Token,
    pub(crate) scopes: ScopeStack,
    pub(crate) module: Module,
    next_id: NodeId,
}

impl Parser {
    /// Create a parser for `source`; `name` becomes the module name.
    ///
    /// Fails if the first token cannot be lexed.
    pub fn new(name: &str, source: impl Into<Vec<u8>>) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            scopes: ScopeStack::new(),
            module: Module::new(name),
            next_id: 0,
        })
    }

    /// Parse the entire module. The parser is consumed; on error no module is
    /// returned.
    pub fn parse_module(mut self) -> Result<Module, ParseError> {
        while !self.is_at_end() {
            self.parse_top_level_declaration()?;
        }

        debug!(
            "parsed module {}: {} vars, {} procs, {} exports",
            self.module.name,
            self.module.vars.len(),
            self.module.procs.len(),
            self.module.exports.len()
        );
        Ok(self.module)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location()
    }

    /// Consume the lookahead token and pull the next one from the lexer
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the lookahead token if it has the given kind
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Consume an identifier and hand back its name without copying it
    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(&[TokenKind::Ident]));
        }

        match self.advance()? {
            Token::Ident(name, location) => Ok((name, location)),
            other => Err(unexpected_token(&other, &[TokenKind::Ident])),
        }
    }

    /// Syntax error for the current lookahead token
    pub(crate) fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        unexpected_token(&self.current, expected)
    }

    /// Read a type name and resolve it against the visible scopes
    pub(crate) fn parse_type_name(&mut self) -> Result<TypeKind, ParseError> {
        let (name, location) = self.expect_identifier()?;

        match self.scopes.lookup(&name) {
            Some(Symbol::Type(ty)) => Ok(ty),
            Some(_) => Err(ParseError::Semantic {
                message: format!("'{}' is not a type", name),
                name,
                location,
            }),
            None => Err(ParseError::Semantic {
                message: format!("unknown type '{}'", name),
                name,
                location,
            }),
        }
    }

    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Expression, Statement};

    fn parse(source: &str) -> Result<Module, ParseError> {
        Parser::new("test.src", source)?.parse_module()
    }

    #[test]
    fn test_parse_simple_proc() {
        let module = parse("proc main(): int { x = 0; }").unwrap();

        assert_eq!(module.procs.len(), 1);
        let main = &module.procs[0];
        assert_eq!(main.name, "main");
        assert!(main.params.is_empty());
        assert_eq!(main.return_type, TypeKind::Int);
        assert_eq!(main.body.statements.len(), 1);
    }

    #[test]
    fn test_parse_assignment_operands() {
        let module = parse("proc p(): void { a = b; c = 99; }").unwrap();
        let stmts = &module.procs[0].body.statements;

        assert_eq!(stmts.len(), 2);
        match &stmts[0] {
            Statement::Assign { lhs, rhs, .. } => {
                assert!(matches!(lhs, Expression::VarRef { name, .. } if name == "a"));
                assert!(matches!(rhs, Expression::VarRef { name, .. } if name == "b"));
            }
        }
        match &stmts[1] {
            Statement::Assign { rhs, .. } => {
                assert!(matches!(rhs, Expression::IntConst { value: 99, .. }));
            }
        }
    }

    #[test]
    fn test_empty_source() {
        let module = parse("   \n").unwrap();

        assert_eq!(module.name, "test.src");
        assert!(module.vars.is_empty());
        assert!(module.procs.is_empty());
        assert!(module.exports.is_empty());
    }

    #[test]
    fn test_node_ids_are_unique() {
        let module = parse("var a: int; b: char;\nproc p(): void var c: int; { a = 1; }").unwrap();
        let proc = &module.procs[0];
        let mut ids = vec![module.vars[0].id, module.vars[1].id, proc.id, proc.locals[0].id];
        ids.push(proc.body.id);
        let stmt = &proc.body.statements[0];
        ids.push(stmt.id());
        match stmt {
            Statement::Assign { lhs, rhs, .. } => {
                ids.push(lhs.id());
                ids.push(rhs.id());
            }
        }

        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_syntax_error_reports_kinds() {
        let err = parse("proc main(: int { }").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(
            err,
            ParseError::Syntax {
                expected: vec![TokenKind::RParen],
                found: TokenKind::Colon,
                location: SourceLocation::new(1, 11),
            }
        );
        assert_eq!(
            err.to_string(),
            "syntax error at line 1, column 11: expected ')', found ':'"
        );
    }

    #[test]
    fn test_expected_list_formatting() {
        assert_eq!(expected_list(&[TokenKind::Ident]), "identifier");
        assert_eq!(
            expected_list(&[TokenKind::Ident, TokenKind::IntLiteral]),
            "identifier or integer literal"
        );
        assert_eq!(
            expected_list(&[TokenKind::Var, TokenKind::Proc, TokenKind::Eof]),
            "'var', 'proc' or end of input"
        );
    }

    #[test]
    fn test_lexical_error_surfaces() {
        let err = parse("proc main(): int {\n  x = 1 @ 2;\n}").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location(), Some(SourceLocation::new(2, 9)));
    }

    #[test]
    fn test_expect_identifier_takes_name() {
        let mut parser = Parser::new("test.src", "counter :").unwrap();

        let (name, location) = parser.expect_identifier().unwrap();
        assert_eq!(name, "counter");
        assert_eq!(location, SourceLocation::new(1, 1));
        assert!(parser.check(TokenKind::Colon));
    }

    #[test]
    fn test_expect_identifier_keeps_lookahead_on_error() {
        let mut parser = Parser::new("test.src", "proc x").unwrap();

        let err = parser.expect_identifier().unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                expected: vec![TokenKind::Ident],
                found: TokenKind::Proc,
                location: SourceLocation::new(1, 1),
            }
        );
        assert!(parser.check(TokenKind::Proc));
        assert_eq!(parser.expect_identifier(), Err(err));
    }
}
