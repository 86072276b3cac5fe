//! Property tests for card reading and statement assembly.

use std::io::Cursor;

use cardlex_rs::{
    BODY_WIDTH, Card, CardReader, FixedFormReader, LexerConfig, Position, Statement, TokenKind,
    statements_from_str,
};
use proptest::prelude::*;

fn cards_from_str(source: &str) -> Vec<Card> {
    FixedFormReader::default()
        .read_str(source)
        .collect::<Result<_, _>>()
        .unwrap()
}

fn statements(source: &str) -> Vec<Statement> {
    statements_from_str(source, LexerConfig::default())
        .collect::<Result<_, _>>()
        .unwrap()
}

/// A card line with the given marker and a body of simple assignments.
fn card_line(marker: char, body: &str) -> String {
    format!("     {marker}{body}")
}

fn assignment() -> impl Strategy<Value = String> {
    ("[A-Z][A-Z0-9]{0,5}", 0u32..100_000).prop_map(|(name, value)| format!("{name} = {value}"))
}

proptest! {
    #[test]
    fn entry_points_agree(lines in prop::collection::vec("[ -~]{0,100}", 0..20)) {
        let source = lines.join("\n");
        let from_str = cards_from_str(&source);
        let from_bytes: Vec<Card> = FixedFormReader::default()
            .read_bytes(Cursor::new(source.clone().into_bytes()))
            .collect::<Result<_, _>>()
            .unwrap();
        let from_reader: Vec<Card> = FixedFormReader::default()
            .read_buffered(Cursor::new(source.as_bytes()))
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(&from_str, &from_bytes);
        prop_assert_eq!(&from_str, &from_reader);
    }

    #[test]
    fn body_has_fixed_width(line in "\\PC{0,160}") {
        let card = Card::from_line(1, &line);
        prop_assert_eq!(card.body().chars().count(), BODY_WIDTH);
    }

    #[test]
    fn tokens_in_source_order(lines in prop::collection::vec("[ -~]{0,90}", 1..15)) {
        let source = lines.join("\n");
        for statement in statements(&source) {
            let tokens = statement.tokens();
            prop_assert!(tokens.last().is_some_and(|t| t.is_end()));
            prop_assert_eq!(tokens.iter().filter(|t| t.is_end()).count(), 1);
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].position < pair[1].position);
            }
            prop_assert!(!statement.cards().is_empty());
        }
    }

    #[test]
    fn continuation_cards_join_and_split(
        bodies in prop::collection::vec(assignment(), 2..10),
        split in any::<prop::sample::Index>(),
    ) {
        let n = bodies.len();
        let mut lines: Vec<String> = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| card_line(if i == 0 { ' ' } else { '1' }, body))
            .collect();

        let joined = statements(&lines.join("\n"));
        prop_assert_eq!(joined.len(), 1);
        prop_assert_eq!(joined[0].cards().len(), n);

        let k = 1 + split.index(n - 1);
        lines[k] = card_line(' ', &bodies[k]);
        let parts = statements(&lines.join("\n"));
        prop_assert_eq!(parts.len(), 2);
        prop_assert_eq!(parts[0].cards().len(), k);
        prop_assert_eq!(parts[1].cards().len(), n - k);
    }

    #[test]
    fn literal_split_across_cards(head in "[A-Z ]{0,20}", tail in "[A-Z ]{0,20}") {
        let source = format!("      S = '{head}\n     1{tail}' + 1\n");
        let result = statements(&source);
        prop_assert_eq!(result.len(), 1);
        let literals: Vec<_> = result[0]
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::Character)
            .collect();
        prop_assert_eq!(literals.len(), 1);
        prop_assert_eq!(literals[0].position, Position::new(1, 11));
        let want = format!("{tail}'");
        prop_assert!(literals[0].lexeme.ends_with(&want));
        prop_assert!(result[0].is_valid());
    }

    #[test]
    fn reading_is_idempotent(lines in prop::collection::vec("[ -~]{0,90}", 0..15)) {
        let source = lines.join("\n");
        prop_assert_eq!(statements(&source), statements(&source));
    }
}

#[test]
fn test_empty_input_yields_nothing() {
    assert!(statements("").is_empty());
    assert!(cards_from_str("").is_empty());
}
