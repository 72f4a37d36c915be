//! Declaration parsing implementation
//!
//! This module handles parsing of module-level items:
//!
//! - Variable declarations: `var x: int; y: char;`
//! - Procedure declarations: `proc name(): type body`
//! - Export declarations: `exports name;`
//!
//! # Grammar
//!
//! ```text
//! module      ::= (var_decl | proc_decl | exports_decl)* EOF
//! var_decl    ::= "var" (identifier ":" identifier ";")+
//! proc_decl   ::= "proc" identifier "(" ")" ":" identifier proc_body
//! exports_decl ::= "exports" identifier ";"
//! ```
//!
//! A `var` keyword introduces as many `name : type ;` groups as follow it;
//! the list ends at the first token that is not an identifier.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::ir::{Proc, Var};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::scope::Symbol;
use log::debug;

impl Parser {
    /// Parse one module-level item
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<(), ParseError> {
        match self.peek().kind() {
            TokenKind::Var => {
                let vars = self.parse_var_declaration()?;
                self.module.vars.extend(vars);
                Ok(())
            }
            TokenKind::Proc => {
                let proc = self.parse_proc_declaration()?;
                self.module.procs.push(proc);
                Ok(())
            }
            TokenKind::Exports => self.parse_exports_declaration(),
            _ => Err(self.unexpected(&[
                TokenKind::Var,
                TokenKind::Proc,
                TokenKind::Exports,
                TokenKind::Eof,
            ])),
        }
    }

    /// Parse `var` followed by one or more `name : type ;` groups.
    ///
    /// Each name is bound in the innermost scope as soon as it is read, before
    /// its type is resolved. The caller decides which list the variables
    /// belong to.
    pub(crate) fn parse_var_declaration(&mut self) -> Result<Vec<Var>, ParseError> {
        self.expect(TokenKind::Var)?;

        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(&[TokenKind::Ident]));
        }

        let mut vars = Vec::new();
        while self.check(TokenKind::Ident) {
            let (name, location) = self.expect_identifier()?;
            let id = self.next_id();
            self.scopes.declare(name.clone(), Symbol::Var(id));

            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type_name()?;
            self.expect(TokenKind::Semicolon)?;

            debug!("declared var {}: {} at {}", name, ty, location);
            vars.push(Var {
                id,
                name,
                ty,
                location,
            });
        }

        Ok(vars)
    }

    /// Parse procedure declaration: proc name(): type body
    pub(crate) fn parse_proc_declaration(&mut self) -> Result<Proc, ParseError> {
        let location = self.expect(TokenKind::Proc)?.location();
        let (name, _) = self.expect_identifier()?;

        // Bound in the enclosing scope so the body can refer to it
        let id = self.next_id();
        self.scopes.declare(name.clone(), Symbol::Proc(id));

        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let return_type = self.parse_type_name()?;

        self.scopes.push_scope();
        let body = self.parse_proc_body();
        self.scopes.pop_scope()?;
        let (locals, body) = body?;

        debug!(
            "declared proc {}(): {} with {} locals, {} statements",
            name,
            return_type,
            locals.len(),
            body.statements.len()
        );
        Ok(Proc {
            id,
            name,
            params: Vec::new(),
            locals,
            return_type,
            body,
            location,
        })
    }

    /// Parse export declaration: exports name;
    ///
    /// The name is recorded as written; it is not checked against any scope.
    pub(crate) fn parse_exports_declaration(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Exports)?;
        let (name, _) = self.expect_identifier()?;
        self.expect(TokenKind::Semicolon)?;

        debug!("exported {}", name);
        self.module.exports.push(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::ir::{Module, SourceLocation, TypeKind};
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, Parser};

    fn parse(source: &str) -> Result<Module, ParseError> {
        Parser::new("decl.src", source)?.parse_module()
    }

    #[test]
    fn test_var_groups_share_one_keyword() {
        let module = parse("var a: int; b: float; c: char;").unwrap();

        let decls: Vec<_> = module
            .vars
            .iter()
            .map(|v| (v.name.as_str(), v.ty))
            .collect();
        assert_eq!(
            decls,
            [
                ("a", TypeKind::Int),
                ("b", TypeKind::Float),
                ("c", TypeKind::Char)
            ]
        );
    }

    #[test]
    fn test_var_list_stops_at_non_identifier() {
        let module = parse("var a: int; proc p(): void { a = 1; } var b: char;").unwrap();

        assert_eq!(module.vars.len(), 2);
        assert_eq!(module.vars[0].name, "a");
        assert_eq!(module.vars[1].name, "b");
        assert_eq!(module.procs.len(), 1);
    }

    #[test]
    fn test_locals_go_to_proc() {
        let module = parse("var g: int;\nproc p(): void var l: char; m: int; { l = g; }").unwrap();

        assert_eq!(module.vars.len(), 1);
        let proc = &module.procs[0];
        assert_eq!(proc.locals.len(), 2);
        assert_eq!(proc.locals[0].name, "l");
        assert_eq!(proc.locals[1].ty, TypeKind::Int);
    }

    #[test]
    fn test_var_without_groups_is_rejected() {
        let err = parse("var ;").unwrap_err();

        assert!(matches!(
            err,
            ParseError::Syntax {
                found: TokenKind::Semicolon,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_type() {
        let err = parse("var y: foo;").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Semantic);
        match err {
            ParseError::Semantic { name, location, .. } => {
                assert_eq!(name, "foo");
                assert_eq!(location, SourceLocation::new(1, 8));
            }
            other => panic!("Expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_variable_is_not_a_type() {
        let err = parse("var a: int; b: a;").unwrap_err();

        match err {
            ParseError::Semantic { name, message, .. } => {
                assert_eq!(name, "a");
                assert_eq!(message, "'a' is not a type");
            }
            other => panic!("Expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_var_name_bound_before_type_resolves() {
        // `int` is rebound to the variable before its type is looked up
        let err = parse("var int: int;").unwrap_err();

        assert!(matches!(err, ParseError::Semantic { ref name, .. } if name == "int"));
    }

    #[test]
    fn test_proc_return_types() {
        let module = parse(
            "proc a(): void { x = 1; }\nproc b(): float { x = 2; }\nproc c(): char { x = 3; }",
        )
        .unwrap();

        let returns: Vec<_> = module.procs.iter().map(|p| p.return_type).collect();
        assert_eq!(returns, [TypeKind::Void, TypeKind::Float, TypeKind::Char]);
    }

    #[test]
    fn test_proc_name_is_not_a_type() {
        let err = parse("proc p(): p { }").unwrap_err();

        assert!(matches!(err, ParseError::Semantic { ref message, .. } if message == "'p' is not a type"));
    }

    #[test]
    fn test_locals_do_not_leak_between_procs() {
        let err = parse("proc a(): void var t: int; { t = 1; }\nvar u: t;").unwrap_err();

        assert!(matches!(err, ParseError::Semantic { ref message, .. } if message == "unknown type 't'"));
    }

    #[test]
    fn test_local_shadows_builtin_type() {
        // inside `p` the name `char` is a variable; outside it is the type again
        let module = parse("proc p(): void var char: int; { char = 1; }\nvar y: char;").unwrap();

        assert_eq!(module.procs[0].locals[0].name, "char");
        assert_eq!(module.vars[0].ty, TypeKind::Char);
    }

    #[test]
    fn test_exports_are_unchecked() {
        let module = parse("exports main;\nexports nowhere;\nexports main;").unwrap();

        assert_eq!(module.exports, ["main", "nowhere", "main"]);
    }

    #[test]
    fn test_unexpected_top_level_token() {
        let err = parse("var a: int;\n}").unwrap_err();

        assert_eq!(
            err,
            ParseError::Syntax {
                expected: vec![
                    TokenKind::Var,
                    TokenKind::Proc,
                    TokenKind::Exports,
                    TokenKind::Eof
                ],
                found: TokenKind::RBrace,
                location: SourceLocation::new(2, 1),
            }
        );
    }

    #[test]
    fn test_proc_rejects_parameters() {
        let err = parse("proc p(a: int): void { }").unwrap_err();

        assert!(matches!(
            err,
            ParseError::Syntax {
                found: TokenKind::Ident,
                ..
            }
        ));
    }
}
