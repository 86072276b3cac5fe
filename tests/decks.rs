//! End-to-end tests over the sample decks in `decks/`.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use cardlex_rs::{
    Card, CardReader, FixedFormReader, LexError, LexerConfig, Position, Statement, TokenKind,
    statements_from_bytes, statements_from_reader, statements_from_str,
};

fn deck_source(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("decks").join(name);
    fs::read_to_string(path).unwrap()
}

fn read_deck(name: &str, config: LexerConfig) -> Vec<Statement> {
    statements_from_str(&deck_source(name), config)
        .collect::<Result<_, _>>()
        .unwrap()
}

fn lexemes(statement: &Statement) -> Vec<&str> {
    statement
        .tokens()
        .iter()
        .filter(|t| !t.is_end())
        .map(|t| t.lexeme.as_str())
        .collect()
}

#[test]
fn test_average_deck() {
    let statements = read_deck("average.f", LexerConfig::default());
    assert_eq!(statements.len(), 8);
    assert!(statements.iter().all(Statement::is_valid));
    assert!(statements.iter().all(|s| s.cards().len() == 1));

    assert_eq!(statements[4].label(), "10");
    assert_eq!(lexemes(&statements[4]), vec!["SUM", "=", "SUM", "+", "A", "(", "I", ")"]);

    let condition = &statements[6];
    let kinds: Vec<TokenKind> = condition.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::Dotted,
            TokenKind::Real,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::EndOfStatement,
        ]
    );

    // The sequence field never leaks into the body.
    assert_eq!(statements[7].cards()[0].trailer(), "AVG00080");
    assert_eq!(lexemes(&statements[7]), vec!["END"]);
}

#[test]
fn test_continued_deck() {
    let statements = read_deck("continued.f", LexerConfig::default());
    assert_eq!(statements.len(), 3);

    let total = &statements[0];
    assert_eq!(total.label(), "100");
    assert_eq!(total.cards().len(), 3);
    assert_eq!(
        lexemes(total),
        vec!["TOTAL", "=", "ALPHA", "+", "BETA", "+", "GAMMA", "*", "2", "-", "DELTA"]
    );

    let message = &statements[1];
    assert_eq!(message.cards().len(), 2);
    let literal = &message.tokens()[2];
    assert_eq!(literal.kind, TokenKind::Character);
    assert_eq!(literal.position, Position::new(4, 13));
    let expected = format!("{:<60}JUMPS'", "'THE QUICK BROWN FOX");
    assert_eq!(literal.lexeme, expected);
    assert_eq!(lexemes(message)[3..], ["//", "SUFFIX"]);

    assert_eq!(statements[2].label(), "200");
}

#[test]
fn test_recovery_deck() {
    let statements = read_deck("recovery.f", LexerConfig::default());
    assert_eq!(statements.len(), 4);

    assert_eq!(
        statements[0].errors(),
        &[LexError::UnexpectedCharacter {
            ch: '@',
            position: Position::new(1, 13),
        }]
    );
    assert_eq!(statements[0].cards().len(), 2);
    assert_eq!(lexemes(&statements[0]), vec!["X", "=", "1"]);

    assert!(statements[1].is_valid());
    assert_eq!(lexemes(&statements[1]), vec!["Y", "=", "2"]);

    match statements[2].errors() {
        [LexError::UnterminatedLiteral { position, .. }] => {
            assert_eq!(*position, Position::new(4, 11));
        }
        other => panic!("Expected one unterminated literal, got {:?}", other),
    }

    assert!(statements[3].is_valid());
    assert_eq!(lexemes(&statements[3]), vec!["W", "=", "4"]);
}

#[test]
fn test_comment_deck() {
    let plain = read_deck("comments.f", LexerConfig::default());
    // Without comment handling every line is a card of its own statement,
    // except the continuation which attaches to the blank card before it.
    assert_eq!(plain.len(), 5);

    let config = LexerConfig::new()
        .with_comment_cards(true)
        .with_skip_blank_cards(true);
    let statements = read_deck("comments.f", config);
    assert_eq!(statements.len(), 2);
    assert_eq!(lexemes(&statements[0]), vec!["A", "=", "1", "+", "2"]);
    let lines: Vec<usize> = statements[0].cards().iter().map(Card::line_number).collect();
    assert_eq!(lines, vec![2, 5]);
}

#[test]
fn test_file_and_string_agree() {
    for name in ["average.f", "continued.f", "recovery.f", "comments.f"] {
        let source = deck_source(name);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        file.flush().unwrap();

        let from_str: Vec<Statement> = statements_from_str(&source, LexerConfig::default())
            .collect::<Result<_, _>>()
            .unwrap();
        let from_bytes: Vec<Statement> =
            statements_from_bytes(File::open(file.path()).unwrap(), LexerConfig::default())
                .collect::<Result<_, _>>()
                .unwrap();
        let from_reader: Vec<Statement> = statements_from_reader(
            BufReader::new(File::open(file.path()).unwrap()),
            LexerConfig::default(),
        )
        .collect::<Result<_, _>>()
        .unwrap();

        assert_eq!(from_str, from_bytes, "byte stream differs for {name}");
        assert_eq!(from_str, from_reader, "reader differs for {name}");
    }
}

#[test]
fn test_card_count_matches_lines() {
    for name in ["average.f", "continued.f", "recovery.f", "comments.f"] {
        let source = deck_source(name);
        let cards: Vec<Card> = FixedFormReader::default()
            .read_str(&source)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(cards.len(), source.lines().count(), "card count for {name}");
    }
}
