//! Logical statements and the single-use builder that assembles them.

use log::debug;

use crate::card::{Card, TRAILER_COLUMN};
use crate::error::LexError;
use crate::token::{Position, Token};

/// One logical statement: a primary card, its continuation cards, and the
/// tokens scanned from them. Always ends with an end-of-statement token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    cards: Vec<Card>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Statement {
    /// Label of the first card. Continuation card labels are ignored.
    pub fn label(&self) -> &str {
        self.cards.first().map(Card::label).unwrap_or_default()
    }

    /// Cards in source order; never empty.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Tokens in source order, ending with the end-of-statement marker.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Lex errors recorded while this statement was scanned.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// False when scanning stopped early; tokens are then partial.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Physical line of the first card.
    pub fn line_number(&self) -> usize {
        self.cards.first().map_or(0, Card::line_number)
    }

    /// Turn a partial statement into its first error.
    pub fn into_result(self) -> Result<Statement, LexError> {
        match self.errors.first() {
            Some(err) => Err(err.clone()),
            None => Ok(self),
        }
    }
}

/// Accumulates the cards and tokens of one statement.
///
/// A builder always holds at least one card. [`StatementBuilder::build`]
/// consumes it, so nothing can be added after the statement is closed.
#[derive(Debug)]
pub struct StatementBuilder {
    cards: Vec<Card>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl StatementBuilder {
    /// Open a statement whose first card is `first`.
    pub fn new(first: Card) -> Self {
        Self {
            cards: vec![first],
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_card(&mut self, card: Card) -> &mut Self {
        self.cards.push(card);
        self
    }

    pub fn add_token(&mut self, token: Token) -> &mut Self {
        debug_assert!(
            self.tokens.last().is_none_or(|last| last.position < token.position),
            "tokens must be added in source order"
        );
        self.tokens.push(token);
        self
    }

    pub fn add_error(&mut self, error: LexError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Most recently added card.
    pub fn last_card(&self) -> &Card {
        &self.cards[self.cards.len() - 1]
    }

    /// Physical line of the first card.
    pub fn line_number(&self) -> usize {
        self.cards[0].line_number()
    }

    /// Number of cards after the first.
    pub fn continuation_count(&self) -> usize {
        self.cards.len() - 1
    }

    /// Close the statement, appending the end-of-statement marker just past
    /// the body of the last card.
    pub fn build(mut self) -> Statement {
        let end = Position::new(self.last_card().line_number(), TRAILER_COLUMN);
        self.tokens.push(Token::end_of_statement(end));
        debug!(
            "statement at line {}: {} card(s), {} token(s), {} error(s)",
            self.line_number(),
            self.cards.len(),
            self.tokens.len(),
            self.errors.len()
        );
        Statement {
            cards: self.cards,
            tokens: self.tokens,
            errors: self.errors,
        }
    }
}
