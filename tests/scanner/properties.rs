//! Property tests for scan invariants
//!
//! Tokens are sorted, disjoint, and their spans reproduce their raw text.

use mentions_scanner::{MentionKind, scan};
use proptest::prelude::*;

/// Text built from fragments likely to form or almost form tokens.
fn mention_soup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("user#".to_string()),
        Just("group#".to_string()),
        Just("user:\"".to_string()),
        Just("\"".to_string()),
        Just("<a>".to_string()),
        Just("</a>".to_string()),
        Just("`".to_string()),
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("@".to_string()),
        "[0-9]{1,3}",
        "[a-zé]{1,4}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_are_sorted_and_disjoint(text in mention_soup()) {
        let tokens = scan(&text);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn spans_match_raw_text(text in mention_soup()) {
        for token in scan(&text) {
            prop_assert_eq!(&text[token.span.start..token.span.end], token.raw.as_str());
            prop_assert_eq!(
                &text[token.identifier_span.start..token.identifier_span.end],
                token.identifier.as_str()
            );
            prop_assert!(token.span.encloses(&token.identifier_span));
        }
    }

    #[test]
    fn numeric_identifiers_are_digits(text in mention_soup()) {
        for token in scan(&text) {
            if !token.kind.is_quoted() {
                prop_assert!(token.identifier.bytes().all(|b| b.is_ascii_digit()));
            } else {
                prop_assert!(!token.identifier.is_empty());
                prop_assert!(!token.identifier.contains('"'));
                prop_assert_eq!(
                    token.kind == MentionKind::UserByEmail,
                    mentions_scanner::looks_like_email(&token.identifier)
                );
            }
        }
    }

    #[test]
    fn scanning_is_deterministic(text in mention_soup()) {
        prop_assert_eq!(scan(&text), scan(&text));
    }
}
