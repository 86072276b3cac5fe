//! Options for statement assembly and byte decoding.
//!
//! The column layout is fixed and deliberately absent here.

use crate::card::Card;
use crate::encoding::Encoding;

/// Lexer configuration. `LexerConfig::default()` keeps every card and
/// applies no continuation limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerConfig {
    /// Drop entirely blank cards during statement assembly.
    pub skip_blank_cards: bool,
    /// Drop cards with `C`, `c`, or `*` in column 1.
    pub comment_cards: bool,
    /// Record an error when a statement has more continuation cards than this.
    pub max_continuations: Option<usize>,
    /// Encoding for byte-stream input.
    pub encoding: Encoding,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_blank_cards(mut self, skip: bool) -> Self {
        self.skip_blank_cards = skip;
        self
    }

    pub fn with_comment_cards(mut self, comments: bool) -> Self {
        self.comment_cards = comments;
        self
    }

    pub fn with_max_continuations(mut self, limit: Option<usize>) -> Self {
        self.max_continuations = limit;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Should this card be left out of every statement?
    pub fn ignores(&self, card: &Card) -> bool {
        (self.comment_cards && card.is_comment()) || (self.skip_blank_cards && card.is_blank())
    }
}
