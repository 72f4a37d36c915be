//! # Introduction
//!
//! plume is the front end of a small procedural-language compiler. It reads
//! one source file and produces a validated, lexically scoped intermediate
//! representation (IR) tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ ScopeStack) → IR Module → Generator / Dump
//! ```
//!
//! 1. [`parser`]: pulls tokens from the lexer on demand, resolves type names
//!    against nested scopes and builds the IR.
//! 2. [`ir`]: the [`ir::Module`] tree and its deterministic [`ir::dump`].
//! 3. [`codegen`]: builds lowering structures in a per-invocation
//!    [`codegen::GenContext`]; no target code is emitted yet.
//! 4. [`error`]: [`error::FrontendError`] and the [`error::ErrorKind`]
//!    classification shared by all failures.
//!
//! ## Example
//!
//! ```
//! use plume::ir::dump::Dump;
//!
//! let module = plume::parser::parse_source(
//!     "demo.src",
//!     "var x: int;\nproc main(): int {\nx = 1;\n}\nexports main;\n",
//! )
//! .unwrap();
//!
//! assert_eq!(module.vars[0].name, "x");
//! assert!(module.dump_to_string().starts_with("(module demo.src)"));
//! ```

pub mod args;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod parser;
