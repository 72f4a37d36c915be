//! Deterministic text rendering of the IR
//!
//! Every node implements [`Dump`]. Children are written on their own lines,
//! indented two spaces deeper than their parent, in a fixed field order, so
//! the output is stable enough for snapshot comparisons.
//!
//! ```text
//! (module demo.src)
//! --------------------------------------------------
//! (var def x, type = int)
//! --------------------------------------------------
//! (proc main, rettype = int)
//!   (block)
//!     (assignment)
//!       (var ref [x])
//!       (int const [1])
//! --------------------------------------------------
//! (exports)
//! main
//! ```

use super::{Block, Expression, Module, Param, Proc, Statement, TypeKind, Var};
use std::fs;
use std::io;
use std::path::Path;

const SEPARATOR: &str = "--------------------------------------------------";

/// Line-oriented writer that tracks nesting depth
#[derive(Debug, Default)]
pub struct Dumper {
    out: String,
    depth: usize,
}

impl Dumper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write the children produced by `f` one level deeper
    pub fn nested(&mut self, f: impl FnOnce(&mut Dumper)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Structural rendering of an IR node and everything beneath it
pub trait Dump {
    fn dump(&self, out: &mut Dumper);

    fn dump_to_string(&self) -> String {
        let mut out = Dumper::new();
        self.dump(&mut out);
        out.finish()
    }
}

impl Dump for Module {
    fn dump(&self, out: &mut Dumper) {
        out.line(&format!("(module {})", self.name));
        out.line(SEPARATOR);
        for var in &self.vars {
            var.dump(out);
        }
        out.line(SEPARATOR);
        for proc in &self.procs {
            proc.dump(out);
        }
        out.line(SEPARATOR);
        out.line("(exports)");
        for name in &self.exports {
            out.line(name);
        }
    }
}

impl Dump for Var {
    fn dump(&self, out: &mut Dumper) {
        out.line(&format!("(var def {}, type = {})", self.name, self.ty));
    }
}

impl Dump for Param {
    fn dump(&self, out: &mut Dumper) {
        out.line("(param)");
    }
}

impl Dump for TypeKind {
    fn dump(&self, out: &mut Dumper) {
        out.line(&format!("(type {})", self.name()));
    }
}

impl Dump for Proc {
    fn dump(&self, out: &mut Dumper) {
        out.line(&format!(
            "(proc {}, rettype = {})",
            self.name, self.return_type
        ));
        out.nested(|out| {
            for param in &self.params {
                param.dump(out);
            }
            for var in &self.locals {
                var.dump(out);
            }
            self.body.dump(out);
        });
    }
}

impl Dump for Block {
    fn dump(&self, out: &mut Dumper) {
        out.line("(block)");
        out.nested(|out| {
            for stmt in &self.statements {
                stmt.dump(out);
            }
        });
    }
}

impl Dump for Statement {
    fn dump(&self, out: &mut Dumper) {
        match self {
            Statement::Assign { lhs, rhs, .. } => {
                out.line("(assignment)");
                out.nested(|out| {
                    lhs.dump(out);
                    rhs.dump(out);
                });
            }
        }
    }
}

impl Dump for Expression {
    fn dump(&self, out: &mut Dumper) {
        match self {
            Expression::VarRef { name, .. } => out.line(&format!("(var ref [{}])", name)),
            Expression::IntConst { value, .. } => out.line(&format!("(int const [{}])", value)),
        }
    }
}

/// Write the module dump to `path`, replacing any existing file
pub fn write_dump(module: &Module, path: &Path) -> io::Result<()> {
    fs::write(path, module.dump_to_string())
}
