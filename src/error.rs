//! Front-end error types
//!
//! Parsing failures are described by [`ParseError`]; [`FrontendError`] adds
//! the failure to read the source file in the first place. Every error is
//! fatal for the parse that produced it.

use crate::ir::SourceLocation;
use crate::parser::parse::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a front-end error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file could not be read, or the dump could not be written
    Io,
    /// Character outside the token alphabet, or an out-of-range literal
    Lexical,
    /// Token of the wrong kind
    Syntax,
    /// Name that does not resolve to what the grammar requires
    Semantic,
    /// Broken parser invariant
    Internal,
}

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrontendError::Io { .. } => ErrorKind::Io,
            FrontendError::Parse(err) => err.kind(),
        }
    }

    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            FrontendError::Io { .. } => None,
            FrontendError::Parse(err) => err.location(),
        }
    }
}

/// A type alias for results of the front end
pub type FrontendResult<T> = Result<T, FrontendError>;
