//! Per-card lexer.
//!
//! A [`Scanner`] walks one card's body left to right and yields tokens with
//! maximal munch. Tokens never cross the card edge, with one exception: a
//! character literal still open at the end of the body, or closed by a
//! delimiter in column 72, is reported as [`Scan::Unclosed`] so the caller
//! can splice the next continuation card onto it with
//! [`OpenLiteral::resume`] or close it with [`OpenLiteral::finish`].

use crate::card::{BODY_COLUMN, Card};
use crate::error::LexError;
use crate::token::{Position, Token, TokenKind};

// Longest match first.
const TWO_CHAR_OPERATORS: [&str; 6] = ["**", "//", "<=", ">=", "==", "/="];
const ONE_CHAR_OPERATORS: &str = "+-*/=(),:<>";

/// One step of scanning a card body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    Token(Token),
    /// A character literal reached the end of the body without a
    /// definite close.
    Unclosed(OpenLiteral),
    Error(LexError),
}

/// A character literal whose closing delimiter is still to come.
///
/// A delimiter in column 72 is ambiguous: it closes the literal unless the
/// next continuation body starts with a second delimiter, in which case the
/// pair is an escaped delimiter split across the card edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLiteral {
    delimiter: char,
    text: String,
    position: Position,
    closed_at_edge: bool,
}

/// Result of feeding a continuation body to an open literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resumed {
    /// Closed after `consumed` body characters; scanning continues there.
    Closed { token: Token, consumed: usize },
    /// Still open at the end of this body too.
    Open(OpenLiteral),
}

impl OpenLiteral {
    /// Where the literal started.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Source text collected so far, opening delimiter included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the text so far ends with a delimiter in column 72.
    pub fn is_closed_at_edge(&self) -> bool {
        self.closed_at_edge
    }

    /// Continue the literal with the body of the next card.
    pub fn resume(mut self, body: &str) -> Resumed {
        let chars: Vec<char> = body.chars().collect();
        let from = if self.closed_at_edge {
            if chars.first() != Some(&self.delimiter) {
                return Resumed::Closed {
                    token: self.into_token(),
                    consumed: 0,
                };
            }
            // Second half of an escaped delimiter.
            1
        } else {
            0
        };

        match literal_end(&chars, from, self.delimiter) {
            Some(end) if end < chars.len() => {
                self.text.extend(&chars[..end]);
                Resumed::Closed {
                    token: self.into_token(),
                    consumed: end,
                }
            }
            end => {
                self.text.extend(&chars);
                self.closed_at_edge = end.is_some();
                Resumed::Open(self)
            }
        }
    }

    /// Close the literal when no continuation card follows.
    pub fn finish(self) -> Result<Token, LexError> {
        if self.closed_at_edge {
            Ok(self.into_token())
        } else {
            Err(LexError::UnterminatedLiteral {
                lexeme: self.text,
                position: self.position,
            })
        }
    }

    fn into_token(self) -> Token {
        Token::new(TokenKind::Character, self.text, self.position)
    }
}

/// Lexer over a single card body.
pub struct Scanner {
    line: usize,
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(card: &Card) -> Self {
        Self::starting_at(card, 0)
    }

    /// Scan `card` from body offset `offset` (0 is column 7).
    pub fn starting_at(card: &Card, offset: usize) -> Self {
        Self {
            line: card.line_number(),
            chars: card.body().chars().collect(),
            pos: offset,
        }
    }

    fn peek_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new(self.line, BODY_COLUMN + index)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Scan {
        self.pos = end;
        Scan::Token(Token::new(kind, self.text(start, end), self.position_of(start)))
    }

    fn scan_while(&self, mut index: usize, pred: impl Fn(char) -> bool) -> usize {
        while self.peek_at(index).is_some_and(&pred) {
            index += 1;
        }
        index
    }

    /// Length of a dotted word (`.EQ.`) starting at `index`, if there is one.
    fn dotted_len(&self, index: usize) -> Option<usize> {
        if self.peek_at(index) != Some('.') {
            return None;
        }
        let end = self.scan_while(index + 1, |c| c.is_ascii_alphabetic());
        (end > index + 1 && self.peek_at(end) == Some('.')).then(|| end + 1 - index)
    }

    fn scan_number(&mut self, start: usize) -> Scan {
        let mut end = self.scan_while(start, |c| c.is_ascii_digit());
        let mut real = false;

        if self.peek_at(end) == Some('.') && self.dotted_len(end).is_none() {
            real = true;
            end = self.scan_while(end + 1, |c| c.is_ascii_digit());
        }

        if matches!(self.peek_at(end), Some('E' | 'e' | 'D' | 'd')) {
            let mut exp = end + 1;
            if matches!(self.peek_at(exp), Some('+' | '-')) {
                exp += 1;
            }
            if self.peek_at(exp).is_some_and(|c| c.is_ascii_digit()) {
                real = true;
                end = self.scan_while(exp, |c| c.is_ascii_digit());
            }
        }

        let kind = if real { TokenKind::Real } else { TokenKind::Integer };
        self.emit(kind, start, end)
    }

    fn scan_literal(&mut self, start: usize, delimiter: char) -> Scan {
        let len = self.chars.len();
        match literal_end(&self.chars, start + 1, delimiter) {
            Some(end) if end < len => self.emit(TokenKind::Character, start, end),
            end => {
                let text = self.text(start, len);
                let position = self.position_of(start);
                self.pos = len;
                Scan::Unclosed(OpenLiteral {
                    delimiter,
                    text,
                    position,
                    closed_at_edge: end.is_some(),
                })
            }
        }
    }

    fn scan_operator(&mut self, start: usize, c: char) -> Option<Scan> {
        if let Some(next) = self.peek_at(start + 1) {
            let pair: String = [c, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                return Some(self.emit(TokenKind::Operator, start, start + 2));
            }
        }
        ONE_CHAR_OPERATORS
            .contains(c)
            .then(|| self.emit(TokenKind::Operator, start, start + 1))
    }
}

impl Iterator for Scanner {
    type Item = Scan;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.scan_while(self.pos, char::is_whitespace);
        self.pos = start;
        let c = self.peek_at(start)?;

        let scan = if c.is_ascii_alphabetic() {
            let end = self.scan_while(start, |c| c.is_ascii_alphanumeric() || c == '_');
            self.emit(TokenKind::Identifier, start, end)
        } else if c.is_ascii_digit() {
            self.scan_number(start)
        } else if c == '\'' || c == '"' {
            self.scan_literal(start, c)
        } else if c == '.' && self.peek_at(start + 1).is_some_and(|c| c.is_ascii_digit()) {
            self.scan_number(start)
        } else if let Some(len) = self.dotted_len(start) {
            self.emit(TokenKind::Dotted, start, start + len)
        } else if let Some(scan) = self.scan_operator(start, c) {
            scan
        } else {
            self.pos = start + 1;
            Scan::Error(LexError::UnexpectedCharacter {
                ch: c,
                position: self.position_of(start),
            })
        };
        Some(scan)
    }
}

/// Index just past the closing delimiter, scanning from `from`.
/// A doubled delimiter is an escaped delimiter, not a close.
fn literal_end(chars: &[char], from: usize, delimiter: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == delimiter {
            if chars.get(i + 1) == Some(&delimiter) {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }
    None
}
