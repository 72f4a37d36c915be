//! Intermediate representation produced by the parser
//!
//! The IR is a plain ownership tree rooted at [`Module`]:
//! - [`Module`] owns module-level [`Var`]s, [`Proc`]s and the export list
//! - [`Proc`] owns its [`Param`]s, local [`Var`]s and exactly one [`Block`]
//! - [`Block`] owns its [`Statement`]s, which own their [`Expression`]s
//!
//! Statement and expression variants are closed sum types; consumers match on
//! them exhaustively. Every node carries a [`NodeId`] assigned by the parser in
//! construction order, which later passes use as a key into their own side
//! tables (see [`crate::codegen::GenContext`]).
//!
//! Nothing here has behaviour beyond accessors and the [`dump`] rendering.

pub mod dump;

use std::fmt;

/// Identifier of an IR node, unique within one parse
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Variant tag shared by every IR node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Module,
    Var,
    Param,
    Proc,
    Type,
    Block,
    Assign,
    VarRef,
    IntConst,
}

/// Built-in types. These are seeded into the global scope before parsing and
/// are the only types a declaration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    Int,
    Float,
    Char,
}

impl TypeKind {
    /// All built-in types, in seeding order
    pub const BUILTINS: [TypeKind; 4] = [
        TypeKind::Void,
        TypeKind::Int,
        TypeKind::Float,
        TypeKind::Char,
    ];

    /// The source-level name of this type
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Void => "void",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Char => "char",
        }
    }
}

impl TypeKind {
    pub fn kind(self) -> NodeKind {
        NodeKind::Type
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variable declaration, either module-level or local to a [`Proc`]
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub id: NodeId,
    pub name: String,
    pub ty: TypeKind,
    pub location: SourceLocation,
}

impl Var {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Var
    }
}

/// Procedure parameter.
///
/// The grammar does not accept a parameter list yet, so every
/// [`Proc::params`] is currently empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: NodeId,
    pub location: SourceLocation,
}

impl Param {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Param
    }
}

/// Procedure declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Proc {
    pub id: NodeId,
    pub name: String,
    pub params: Vec<Param>,
    pub locals: Vec<Var>,
    pub return_type: TypeKind,
    pub body: Block,
    pub location: SourceLocation,
}

impl Proc {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Proc
    }
}

/// Statement list forming a procedure body
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

impl Block {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Block
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign {
        id: NodeId,
        lhs: Expression,
        rhs: Expression,
        location: SourceLocation,
    },
}

impl Statement {
    pub fn id(&self) -> NodeId {
        match self {
            Statement::Assign { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Assign { .. } => NodeKind::Assign,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Assign { location, .. } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference by name. Resolution is left to a later pass.
    VarRef {
        id: NodeId,
        name: String,
        location: SourceLocation,
    },
    IntConst {
        id: NodeId,
        value: i64,
        location: SourceLocation,
    },
}

impl Expression {
    pub fn id(&self) -> NodeId {
        match self {
            Expression::VarRef { id, .. } | Expression::IntConst { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::VarRef { .. } => NodeKind::VarRef,
            Expression::IntConst { .. } => NodeKind::IntConst,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::VarRef { location, .. } | Expression::IntConst { location, .. } => {
                *location
            }
        }
    }
}

/// Root of the IR tree for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub vars: Vec<Var>,
    pub procs: Vec<Proc>,
    pub exports: Vec<String>,
    /// Always the start of the file, line 1 column 1
    pub location: SourceLocation,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            vars: Vec::new(),
            procs: Vec::new(),
            exports: Vec::new(),
            location: SourceLocation::new(1, 1),
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::Module
    }

    /// Find a procedure by name
    pub fn proc(&self, name: &str) -> Option<&Proc> {
        self.procs.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let names: Vec<_> = TypeKind::BUILTINS.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["void", "int", "float", "char"]);
        assert_eq!(TypeKind::Float.to_string(), "float");
    }

    #[test]
    fn test_expression_accessors() {
        let loc = SourceLocation::new(3, 7);
        let expr = Expression::IntConst {
            id: 4,
            value: -1,
            location: loc,
        };
        assert_eq!(expr.id(), 4);
        assert_eq!(expr.kind(), NodeKind::IntConst);
        assert_eq!(expr.location(), loc);
        assert_eq!(loc.to_string(), "line 3, column 7");
    }

    #[test]
    fn test_declaration_kinds() {
        let loc = SourceLocation::new(1, 1);
        let block = Block {
            id: 2,
            statements: Vec::new(),
            location: loc,
        };
        let proc = Proc {
            id: 0,
            name: "main".to_string(),
            params: vec![Param { id: 1, location: loc }],
            locals: Vec::new(),
            return_type: TypeKind::Int,
            body: block,
            location: loc,
        };
        let var = Var {
            id: 3,
            name: "x".to_string(),
            ty: TypeKind::Char,
            location: loc,
        };

        assert_eq!(proc.kind(), NodeKind::Proc);
        assert_eq!(proc.params[0].kind(), NodeKind::Param);
        assert_eq!(proc.body.kind(), NodeKind::Block);
        assert_eq!(proc.return_type.kind(), NodeKind::Type);
        assert_eq!(var.kind(), NodeKind::Var);
    }

    #[test]
    fn test_module_starts_at_file_start() {
        let module = Module::new("empty.src");

        assert_eq!(module.kind(), NodeKind::Module);
        assert_eq!(module.location, SourceLocation::new(1, 1));
        assert!(module.vars.is_empty() && module.procs.is_empty() && module.exports.is_empty());
        assert!(module.proc("main").is_none());
    }
}
