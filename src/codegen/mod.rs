//! Lowering structures for code generation
//!
//! [`Generator::generate`] walks a finished [`Module`] and builds one
//! [`GenNode`] per IR node it visits. The nodes live in a [`GenContext`]
//! owned by the caller and keyed by the IR [`NodeId`], so two generations
//! never share state. No target code is emitted yet.

use crate::ir::{Block, Expression, Module, NodeId, Proc, Statement, TypeKind, Var};
use log::debug;
use rustc_hash::FxHashMap;

/// Generator-side view of an IR node. Children are referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub enum GenNode {
    Var {
        name: String,
        ty: TypeKind,
    },
    Proc {
        name: String,
        locals: Vec<NodeId>,
        block: NodeId,
    },
    Block {
        statements: Vec<NodeId>,
    },
    Assign {
        lhs: NodeId,
        rhs: NodeId,
    },
    VarRef {
        name: String,
    },
    IntConst {
        value: i64,
    },
}

/// Per-invocation table of lowering nodes
#[derive(Debug, Clone, Default)]
pub struct GenContext {
    nodes: FxHashMap<NodeId, GenNode>,
    globals: Vec<NodeId>,
    procs: Vec<NodeId>,
}

impl GenContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&GenNode> {
        self.nodes.get(&id)
    }

    /// Module-level variables, in declaration order
    pub fn globals(&self) -> &[NodeId] {
        &self.globals
    }

    /// Procedures, in declaration order
    pub fn procs(&self) -> &[NodeId] {
        &self.procs
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, id: NodeId, node: GenNode) -> NodeId {
        self.nodes.insert(id, node);
        id
    }
}

#[derive(Debug, Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Generator
    }

    /// Build the lowering structures for `module`
    pub fn generate(&self, module: &Module) -> GenContext {
        let mut ctx = GenContext::new();

        for var in &module.vars {
            let id = self.gen_var(&mut ctx, var);
            ctx.globals.push(id);
        }
        for proc in &module.procs {
            let id = self.gen_proc(&mut ctx, proc);
            ctx.procs.push(id);
        }

        debug!(
            "generated {} nodes for module {}",
            ctx.len(),
            module.name
        );
        ctx
    }

    fn gen_var(&self, ctx: &mut GenContext, var: &Var) -> NodeId {
        ctx.insert(
            var.id,
            GenNode::Var {
                name: var.name.clone(),
                ty: var.ty,
            },
        )
    }

    fn gen_proc(&self, ctx: &mut GenContext, proc: &Proc) -> NodeId {
        let locals = proc
            .locals
            .iter()
            .map(|var| self.gen_var(ctx, var))
            .collect();
        let block = self.gen_block(ctx, &proc.body);

        ctx.insert(
            proc.id,
            GenNode::Proc {
                name: proc.name.clone(),
                locals,
                block,
            },
        )
    }

    fn gen_block(&self, ctx: &mut GenContext, block: &Block) -> NodeId {
        let statements = block
            .statements
            .iter()
            .map(|stmt| self.gen_statement(ctx, stmt))
            .collect();

        ctx.insert(block.id, GenNode::Block { statements })
    }

    fn gen_statement(&self, ctx: &mut GenContext, stmt: &Statement) -> NodeId {
        match stmt {
            Statement::Assign { id, lhs, rhs, .. } => {
                let lhs = self.gen_expression(ctx, lhs);
                let rhs = self.gen_expression(ctx, rhs);
                ctx.insert(*id, GenNode::Assign { lhs, rhs })
            }
        }
    }

    fn gen_expression(&self, ctx: &mut GenContext, expr: &Expression) -> NodeId {
        match expr {
            Expression::VarRef { id, name, .. } => {
                ctx.insert(*id, GenNode::VarRef { name: name.clone() })
            }
            Expression::IntConst { id, value, .. } => {
                ctx.insert(*id, GenNode::IntConst { value: *value })
            }
        }
    }
}
