//! Lexical scopes used while parsing
//!
//! [`ScopeStack`] is a chain of [`Scope`] tables. The bottom scope is the
//! global scope: it is created with the stack, pre-populated with the
//! built-in types, and can never be popped. Lookups walk from the innermost
//! scope outwards and return the first binding found.

use crate::ir::{NodeId, TypeKind};
use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// What a name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Type(TypeKind),
    Var(NodeId),
    Proc(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("cannot pop the global scope")]
    PopBaseScope,
}

/// One level of name bindings. Names are unique within a scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: FxHashMap<String, Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier binding in this scope
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        self.symbols.insert(name.into(), symbol);
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// Create a stack holding only the global scope, seeded with the
    /// built-in types.
    pub fn new() -> Self {
        let mut global = Scope::new();
        for ty in TypeKind::BUILTINS {
            global.insert(ty.name(), Symbol::Type(ty));
        }
        ScopeStack {
            scopes: vec![global],
        }
    }

    /// Enter a new innermost scope
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        debug!("pushed scope, depth {}", self.depth());
    }

    /// Leave the innermost scope, returning its bindings
    pub fn pop_scope(&mut self) -> Result<Scope, ScopeError> {
        if self.scopes.len() <= 1 {
            return Err(ScopeError::PopBaseScope);
        }
        let scope = self.scopes.pop().ok_or(ScopeError::PopBaseScope)?;
        debug!("popped scope, depth {}", self.depth());
        Ok(scope)
    }

    /// Bind `name` in the innermost scope (last write wins)
    pub fn declare(&mut self, name: impl Into<String>, symbol: Symbol) {
        if let Some(top) = self.scopes.last_mut() {
            top.insert(name, symbol);
        }
    }

    /// Find the innermost binding of `name`, checking every scope down to
    /// the global one.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Number of scopes, including the global scope
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
