//! CLI tool to dump the cards or statements of a fixed-column source deck.
//!
//! Usage:
//!   card-dump <deck>
//!   card-dump <deck> --cards
//!   card-dump - --encoding latin1 --strict
//!
//! Set `RUST_LOG=debug` to see statement assembly on stderr.

use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use cardlex_rs::{
    CardReader, Encoding, FixedFormReader, LexerConfig, Statement, statements_from_bytes,
};
use clap::Parser;

/// Dump cards or tokenized statements of a fixed-column source deck.
#[derive(Parser)]
#[command(name = "card-dump")]
struct Cli {
    /// Source deck (80-column card images), or - for stdin
    deck: String,

    /// Input encoding: utf8, ascii, or latin1
    #[arg(short, long, default_value = "utf8")]
    encoding: Encoding,

    /// Print raw card fields instead of statements
    #[arg(long)]
    cards: bool,

    /// Exit with status 1 if any statement has a lex error
    #[arg(long)]
    strict: bool,

    /// Drop entirely blank cards
    #[arg(long)]
    skip_blank: bool,

    /// Treat C, c, or * in column 1 as a comment card
    #[arg(long)]
    comments: bool,

    /// Maximum continuation cards per statement
    #[arg(long)]
    max_continuations: Option<usize>,
}

fn open(deck: &str) -> io::Result<Box<dyn Read>> {
    if deck == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(deck)?))
    }
}

fn format_statement(statement: &Statement) -> String {
    let first = statement.line_number();
    let last = statement.cards().last().map_or(first, |c| c.line_number());
    let mut out = format!("STATEMENT lines {first}-{last}");
    if !statement.label().is_empty() {
        out.push_str(&format!(" label {}", statement.label()));
    }
    out.push('\n');
    for token in statement.tokens() {
        out.push_str(&format!("  {token}\n"));
    }
    for err in statement.errors() {
        out.push_str(&format!("  error: {err}\n"));
    }
    out
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let input = match open(&cli.deck) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading deck '{}': {e}", cli.deck);
            process::exit(1);
        }
    };

    let config = LexerConfig::new()
        .with_encoding(cli.encoding)
        .with_skip_blank_cards(cli.skip_blank)
        .with_comment_cards(cli.comments)
        .with_max_continuations(cli.max_continuations);

    let mut stdout = io::stdout().lock();
    let mut invalid = 0;

    let written: Result<(), Box<dyn Error>> = if cli.cards {
        FixedFormReader::new(config.encoding)
            .read_bytes(input)
            .try_for_each(|card| -> Result<(), Box<dyn Error>> {
                let card = card?;
                writeln!(
                    stdout,
                    "{:>5} |{:<5}|{}|{}|{}",
                    card.line_number(),
                    card.label(),
                    card.continuation_marker(),
                    card.body().trim_end(),
                    card.trailer()
                )?;
                Ok(())
            })
    } else {
        statements_from_bytes(input, config).try_for_each(|statement| -> Result<(), Box<dyn Error>> {
            let statement = statement?;
            if !statement.is_valid() {
                invalid += 1;
            }
            stdout.write_all(format_statement(&statement).as_bytes())?;
            Ok(())
        })
    };

    if let Err(e) = written {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    if cli.strict && invalid > 0 {
        eprintln!("{invalid} statement(s) with lex errors");
        process::exit(1);
    }
}
