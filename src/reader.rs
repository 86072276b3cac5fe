//! Card reader: raw text in, lazy lookahead-capable card sequence out.
//!
//! Every entry point funnels into [`CardStream`], which reads one physical
//! line per `next()` call. The stream is wrapped in `Peekable` so callers can
//! inspect the next card's continuation marker without consuming it.

use std::io::{BufRead, BufReader, Read};
use std::iter::{FusedIterator, Peekable};

use log::{error, trace};

use crate::card::Card;
use crate::encoding::Encoding;
use crate::error::IoError;

/// Produces a lookahead sequence of cards from some origin.
///
/// String, byte-stream, and buffered-text origins yield the same cards for
/// the same content.
pub trait CardReader {
    /// Encoding applied to byte-stream input.
    fn encoding(&self) -> Encoding;

    /// Read cards from a buffered source decoded with `encoding`.
    fn read_with<R: BufRead>(&self, reader: R, encoding: Encoding) -> Peekable<CardStream<R>>;

    /// Read cards from an in-memory string.
    fn read_str<'a>(&self, source: &'a str) -> Peekable<CardStream<&'a [u8]>> {
        self.read_with(source.as_bytes(), Encoding::Utf8)
    }

    /// Read cards from a raw byte stream using [`CardReader::encoding`].
    fn read_bytes<R: Read>(&self, input: R) -> Peekable<CardStream<BufReader<R>>> {
        self.read_with(BufReader::new(input), self.encoding())
    }

    /// Read cards from an already-decoded (UTF-8) text stream.
    fn read_buffered<R: BufRead>(&self, reader: R) -> Peekable<CardStream<R>> {
        self.read_with(reader, Encoding::Utf8)
    }
}

/// The standard fixed-column reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedFormReader {
    encoding: Encoding,
}

impl FixedFormReader {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }
}

impl CardReader for FixedFormReader {
    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn read_with<R: BufRead>(&self, reader: R, encoding: Encoding) -> Peekable<CardStream<R>> {
        CardStream::new(reader, encoding).peekable()
    }
}

/// Lazy sequence of cards, one per newline-delimited physical line.
///
/// A final line terminator does not produce an extra card. After the first
/// error the stream is exhausted.
pub struct CardStream<R> {
    reader: R,
    encoding: Encoding,
    line_number: usize,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> CardStream<R> {
    pub fn new(reader: R, encoding: Encoding) -> Self {
        Self {
            reader,
            encoding,
            line_number: 0,
            buffer: Vec::new(),
            finished: false,
        }
    }

    fn fail(&mut self, err: IoError) -> Option<Result<Card, IoError>> {
        error!("{err}");
        self.finished = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for CardStream<R> {
    type Item = Result<Card, IoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.buffer.clear();
        let line = self.line_number + 1;
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                self.line_number = line;
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                }
                match self.encoding.decode(&self.buffer) {
                    Ok(text) => {
                        let card = Card::from_line(line, &text);
                        trace!("card {line}: {:?}", card.body().trim_end());
                        Some(Ok(card))
                    }
                    Err(offset) => self.fail(IoError::Decode {
                        line,
                        encoding: self.encoding,
                        offset,
                    }),
                }
            }
            Err(source) => self.fail(IoError::Read { line, source }),
        }
    }
}

impl<R: BufRead> FusedIterator for CardStream<R> {}
