//! Statement assembly: cards in, logical statements out.
//!
//! [`Statements`] pulls cards lazily, scans each body, and peeks at the next
//! card's continuation marker to decide whether the open statement goes on
//! or is closed. A lex error is stored on the statement being built; the
//! rest of its continuation cards are consumed without scanning, so the
//! next statement starts clean. An I/O error, including one met while
//! looking ahead for a continuation card, discards the open statement and
//! ends the sequence.

use std::io::{BufRead, Read};
use std::iter::{FusedIterator, Peekable};

use log::warn;

use crate::card::Card;
use crate::config::LexerConfig;
use crate::error::{Error, IoError, LexError};
use crate::reader::{CardReader, CardStream, FixedFormReader};
use crate::scanner::{Resumed, Scan, Scanner};
use crate::statement::{Statement, StatementBuilder};

/// Lazy sequence of statements over a peekable card sequence.
pub struct Statements<I: Iterator<Item = Result<Card, IoError>>> {
    cards: Peekable<I>,
    config: LexerConfig,
    finished: bool,
}

impl<I: Iterator<Item = Result<Card, IoError>>> Statements<I> {
    pub fn new(cards: Peekable<I>, config: LexerConfig) -> Self {
        Self {
            cards,
            config,
            finished: false,
        }
    }

    /// Next card that takes part in assembly.
    fn next_card(&mut self) -> Option<Result<Card, IoError>> {
        let config = self.config;
        self.cards
            .find(|card| !matches!(card, Ok(card) if config.ignores(card)))
    }

    /// Consume the next card only if it continues the open statement.
    ///
    /// A read failure in the lookahead slot is returned at once, since the
    /// failing line may have been a continuation of the open statement.
    fn next_continuation(&mut self) -> Result<Option<Card>, IoError> {
        let config = self.config;
        while self
            .cards
            .next_if(|card| matches!(card, Ok(card) if config.ignores(card)))
            .is_some()
        {}

        if let Some(Err(err)) = self.cards.next_if(Result::is_err) {
            return Err(err);
        }
        Ok(self
            .cards
            .next_if(|card| matches!(card, Ok(card) if card.is_continuation()))
            .and_then(Result::ok))
    }

    fn join(&self, builder: &mut StatementBuilder, card: Card) {
        builder.add_card(card);
        if let Some(limit) = self.config.max_continuations
            && builder.continuation_count() == limit + 1
        {
            let line = builder.line_number();
            record(builder, LexError::TooManyContinuations { line, limit });
        }
    }

    /// Scan the builder's last card from body `offset`, splicing
    /// continuation cards into any literal left open at the end of a body.
    ///
    /// Returns `false` once a lex error has stopped scanning.
    fn scan_into(
        &mut self,
        builder: &mut StatementBuilder,
        mut offset: usize,
    ) -> Result<bool, IoError> {
        loop {
            let mut open = None;
            for scan in Scanner::starting_at(builder.last_card(), offset) {
                match scan {
                    Scan::Token(token) => {
                        builder.add_token(token);
                    }
                    Scan::Unclosed(literal) => open = Some(literal),
                    Scan::Error(err) => {
                        record(builder, err);
                        return Ok(false);
                    }
                }
            }

            let Some(mut literal) = open else {
                return Ok(true);
            };

            loop {
                let Some(card) = self.next_continuation()? else {
                    return Ok(match literal.finish() {
                        Ok(token) => {
                            builder.add_token(token);
                            true
                        }
                        Err(err) => {
                            record(builder, err);
                            false
                        }
                    });
                };
                let resumed = literal.resume(card.body());
                self.join(builder, card);
                match resumed {
                    Resumed::Closed { token, consumed } => {
                        builder.add_token(token);
                        offset = consumed;
                        break;
                    }
                    Resumed::Open(still_open) => literal = still_open,
                }
            }
        }
    }

    fn assemble(&mut self, first: Card) -> Result<Statement, IoError> {
        let mut builder = StatementBuilder::new(first);
        let mut scanning = self.scan_into(&mut builder, 0)?;

        while let Some(card) = self.next_continuation()? {
            self.join(&mut builder, card);
            if scanning {
                scanning = self.scan_into(&mut builder, 0)?;
            }
        }

        Ok(builder.build())
    }
}

fn record(builder: &mut StatementBuilder, err: LexError) {
    warn!("{err}");
    builder.add_error(err);
}

impl<I: Iterator<Item = Result<Card, IoError>>> Iterator for Statements<I> {
    type Item = Result<Statement, IoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let statement = self.next_card()?.and_then(|first| self.assemble(first));
        if statement.is_err() {
            self.finished = true;
        }
        Some(statement)
    }
}

impl<I: Iterator<Item = Result<Card, IoError>>> FusedIterator for Statements<I> {}

/// Statements of an in-memory source.
pub fn statements_from_str(source: &str, config: LexerConfig) -> Statements<CardStream<&[u8]>> {
    let reader = FixedFormReader::new(config.encoding);
    Statements::new(reader.read_str(source), config)
}

/// Statements of a byte stream decoded with `config.encoding`.
pub fn statements_from_bytes<R: Read>(
    input: R,
    config: LexerConfig,
) -> Statements<CardStream<std::io::BufReader<R>>> {
    let reader = FixedFormReader::new(config.encoding);
    Statements::new(reader.read_bytes(input), config)
}

/// Statements of an already-decoded text stream.
pub fn statements_from_reader<R: BufRead>(reader: R, config: LexerConfig) -> Statements<CardStream<R>> {
    let card_reader = FixedFormReader::new(config.encoding);
    Statements::new(card_reader.read_buffered(reader), config)
}

/// Collect every statement, failing on the first I/O or lex error.
pub fn collect_statements<I>(statements: Statements<I>) -> Result<Vec<Statement>, Error>
where
    I: Iterator<Item = Result<Card, IoError>>,
{
    statements
        .map(|statement| -> Result<Statement, Error> { Ok(statement?.into_result()?) })
        .collect()
}
