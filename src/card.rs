//! Fixed-column card records.
//!
//! A card is one physical source line cut into four fields by absolute
//! column:
//!
//! ```text
//! columns  1-5   label
//! column   6     continuation marker
//! columns  7-72  body (statement text)
//! columns 73-80  trailer (identification / sequence, never significant)
//! ```
//!
//! Columns are counted in characters, not bytes. Lines shorter than the
//! body field are blank-padded, anything past column 80 is dropped.

/// Width of a full card image (punch card width).
pub const CARD_WIDTH: usize = 80;

/// First column of the body field (1-based).
pub const BODY_COLUMN: usize = 7;

/// First column of the trailer field (1-based). Also the column at which
/// end-of-statement markers are placed.
pub const TRAILER_COLUMN: usize = 73;

/// Width of the body field; every `Card::body` has exactly this many characters.
pub const BODY_WIDTH: usize = TRAILER_COLUMN - BODY_COLUMN;

// Zero-based character offsets of each field.
const LABEL_START: usize = 0;
const MARKER_OFFSET: usize = 5;
const BODY_START: usize = BODY_COLUMN - 1;
const BODY_END: usize = TRAILER_COLUMN - 1;

/// One physical input line split into its fixed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    line_number: usize,
    label: String,
    marker: char,
    body: String,
    trailer: String,
    first_column: char,
}

impl Card {
    /// Slice a physical line (without its line terminator) into a card.
    ///
    /// `line_number` is 1-based and only used for diagnostics.
    pub fn from_line(line_number: usize, line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let columns: Vec<char> = line.chars().take(CARD_WIDTH).collect();

        let label = slice(&columns, LABEL_START, MARKER_OFFSET).trim().to_string();
        let marker = columns.get(MARKER_OFFSET).copied().unwrap_or(' ');

        let mut body = slice(&columns, BODY_START, BODY_END);
        let short_by = BODY_WIDTH - body.chars().count();
        body.extend(std::iter::repeat_n(' ', short_by));

        let trailer = slice(&columns, BODY_END, CARD_WIDTH).trim_end().to_string();
        let first_column = columns.first().copied().unwrap_or(' ');

        Self {
            line_number,
            label,
            marker,
            body,
            trailer,
            first_column,
        }
    }

    /// 1-based physical line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Label field with surrounding blanks removed; empty if unlabeled.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw column-6 character (`' '` for short lines).
    pub fn continuation_marker(&self) -> char {
        self.marker
    }

    /// Body field, always exactly `BODY_WIDTH` characters.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Identification/sequence field, trailing blanks removed.
    pub fn trailer(&self) -> &str {
        &self.trailer
    }

    /// Does this card extend the previous statement?
    ///
    /// Blank, whitespace, and `0` markers start a new statement.
    pub fn is_continuation(&self) -> bool {
        !(self.marker.is_whitespace() || self.marker == '0')
    }

    /// True when label, marker, and body are all blank. The trailer is ignored.
    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && !self.is_continuation() && self.body.trim().is_empty()
    }

    /// Traditional comment card: `C`, `c`, or `*` in column 1.
    pub fn is_comment(&self) -> bool {
        matches!(self.first_column, 'C' | 'c' | '*')
    }
}

/// Collect `columns[start..end]`, clamped to the available columns.
fn slice(columns: &[char], start: usize, end: usize) -> String {
    let end = end.min(columns.len());
    if start >= end {
        return String::new();
    }
    columns[start..end].iter().collect()
}
