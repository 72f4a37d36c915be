//! plume source parser
//!
//! This module transforms source text into the [`crate::ir`] module tree:
//! - [`lexer`]: Tokenization (source bytes → tokens, on demand)
//! - [`scope`]: Nested name tables used to resolve type names
//! - [`parse`]: Parsing (tokens → IR), split across `declarations`,
//!   `statements` and `expressions`
//!
//! # Language
//!
//! ```text
//! var total: int;
//!
//! proc main(): int
//! var n: char;
//! {
//!     total = 1;
//!     n = total;
//! }
//!
//! exports main;
//! ```
//!
//! Built-in types are `void`, `int`, `float` and `char`. The only statement is
//! assignment, and an expression is either a name or an integer literal.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies. The first error stops the parse.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod scope;
mod statements;

use crate::error::{FrontendError, FrontendResult};
use crate::ir::Module;
use log::info;
use parse::{ParseError, Parser};
use std::fs;
use std::path::Path;

/// Parse an in-memory source buffer into a [`Module`] called `name`
pub fn parse_source(name: &str, source: impl Into<Vec<u8>>) -> Result<Module, ParseError> {
    Parser::new(name, source)?.parse_module()
}

/// Read `path` into memory and parse it. The module is named after the path
/// as given.
pub fn parse_file(path: impl AsRef<Path>) -> FrontendResult<Module> {
    let path = path.as_ref();
    let source = fs::read(path).map_err(|source| FrontendError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("parsing {} ({} bytes)", path.display(), source.len());
    let module = parse_source(&path.display().to_string(), source)?;
    Ok(module)
}
