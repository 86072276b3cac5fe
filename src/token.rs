//! Lexical tokens and source positions.

use std::fmt;

/// Physical location of a token: 1-based line and 1-based card column.
///
/// Orders by line, then column, which is source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// General lexical category. Keyword classification is left to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letter followed by letters, digits, or underscores.
    Identifier,
    /// Digits only.
    Integer,
    /// Number with a decimal point and/or an exponent.
    Real,
    /// Quoted character literal, quotes included in the lexeme.
    Character,
    /// Dotted word such as `.EQ.` or `.TRUE.`.
    Dotted,
    /// Operator or punctuation.
    Operator,
    /// Appended once when a statement is closed.
    EndOfStatement,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENT",
            TokenKind::Integer => "INT",
            TokenKind::Real => "REAL",
            TokenKind::Character => "CHAR",
            TokenKind::Dotted => "DOTTED",
            TokenKind::Operator => "OP",
            TokenKind::EndOfStatement => "END",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit with its exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// End-of-statement marker at `position`; its lexeme is empty.
    pub fn end_of_statement(position: Position) -> Self {
        Self::new(TokenKind::EndOfStatement, "", position)
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfStatement
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(f, "<end> @{}", self.position)
        } else {
            write!(f, "{} {} @{}", self.kind, self.lexeme, self.position)
        }
    }
}
