//! Statement parsing implementation
//!
//! This module handles procedure bodies and the statements inside them.
//! The only statement form is assignment.
//!
//! # Grammar
//!
//! ```text
//! proc_body  ::= var_decl* block
//! block      ::= "{" statement* "}"
//! statement  ::= assignment ";"
//! assignment ::= expression "=" expression
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::ir::{Block, Statement, Var};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse local variable declarations followed by the procedure's block
    pub(crate) fn parse_proc_body(&mut self) -> Result<(Vec<Var>, Block), ParseError> {
        let mut locals = Vec::new();

        while self.check(TokenKind::Var) {
            locals.extend(self.parse_var_declaration()?);
        }

        if !self.check(TokenKind::LBrace) {
            return Err(self.unexpected(&[TokenKind::Var, TokenKind::LBrace]));
        }

        let block = self.parse_block()?;
        Ok((locals, block))
    }

    /// Parse block: { statements }
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let location = self.expect(TokenKind::LBrace)?.location();
        let id = self.next_id();

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(Block {
            id,
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let stmt = self.parse_assignment()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(stmt)
    }

    /// Parse assignment: lhs = rhs
    pub(crate) fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        let id = self.next_id();

        let lhs = self.parse_expression()?;
        self.expect(TokenKind::Eq)?;
        let rhs = self.parse_expression()?;

        Ok(Statement::Assign {
            id,
            lhs,
            rhs,
            location,
        })
    }
}
