//! # cardlex-rs
//!
//! Front-end ingestion for fixed-column, punched-card style source.
//!
//! Each physical line is an 80-column card:
//! - **Label**: columns 1-5
//! - **Continuation marker**: column 6 (blank or `0` starts a new statement)
//! - **Body**: columns 7-72
//! - **Trailer**: columns 73-80 (sequence field, ignored)
//!
//! The pipeline is pull-based and lazy: raw text becomes [`Card`]s, cards are
//! scanned into [`Token`]s, and a primary card plus its continuation cards
//! become one [`Statement`]. Only one card of lookahead is ever buffered.
//!
//! ## Example
//!
//! ```
//! use cardlex_rs::{LexerConfig, statements_from_str};
//!
//! let source = "   10 X = 1\n     1 + Y\n      Z = 2\n";
//! let statements: Vec<_> = statements_from_str(source, LexerConfig::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[0].label(), "10");
//! assert_eq!(statements[0].cards().len(), 2);
//! let lexemes: Vec<&str> = statements[0].tokens().iter().map(|t| t.lexeme.as_str()).collect();
//! assert_eq!(lexemes, vec!["X", "=", "1", "+", "Y", ""]);
//! ```

pub mod card;
pub mod config;
pub mod encoding;
pub mod error;
pub mod reader;
pub mod scanner;
pub mod statement;
pub mod token;
pub mod tokenizer;

pub use card::{BODY_COLUMN, BODY_WIDTH, CARD_WIDTH, Card, TRAILER_COLUMN};
pub use config::LexerConfig;
pub use encoding::Encoding;
pub use error::{Error, IoError, LexError};
pub use reader::{CardReader, CardStream, FixedFormReader};
pub use scanner::{OpenLiteral, Resumed, Scan, Scanner};
pub use statement::{Statement, StatementBuilder};
pub use token::{Position, Token, TokenKind};
pub use tokenizer::{
    Statements, collect_statements, statements_from_bytes, statements_from_reader,
    statements_from_str,
};
