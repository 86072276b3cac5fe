//! Error types.
//!
//! `IoError` is fatal and halts the card stream. `LexError` is local to one
//! statement and is stored on it; reading continues at the next statement.

use thiserror::Error;

use crate::encoding::Encoding;
use crate::token::Position;

/// The underlying source could not be read.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("read failed at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {encoding} data at line {line}, byte {offset}")]
    Decode {
        line: usize,
        encoding: Encoding,
        offset: usize,
    },
}

impl IoError {
    /// Line on which the failure happened.
    pub fn line(&self) -> usize {
        match self {
            IoError::Read { line, .. } | IoError::Decode { line, .. } => *line,
        }
    }
}

/// A malformed token inside one logical statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at line {}, column {}", .position.line, .position.column)]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("unterminated literal at line {}, column {}", .position.line, .position.column)]
    UnterminatedLiteral { lexeme: String, position: Position },

    #[error("statement at line {line} has more than {limit} continuation cards")]
    TooManyContinuations { line: usize, limit: usize },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedLiteral { position, .. } => *position,
            LexError::TooManyContinuations { line, .. } => Position::new(*line, 1),
        }
    }
}

/// Either failure, for callers that treat lex errors as fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Lex(#[from] LexError),
}
