//! Property-based tests for position composition and prefix decoding

use proptest::prelude::*;
use rowan::TextSize;
use strindex_core::escape::{decode, decode_prefix};
use strindex_core::{EditorContext, JavaSourceTree, LiteralKind, StringPosition, compute_position};

/// Raw literal content built from whole characters and escapes
fn raw_content() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec![
        "a", "Z", " ", "é", "😀", "\\n", "\\t", "\\\\", "\\\"", "\\101", "\\s",
    ]);
    prop::collection::vec(fragment, 0..24).prop_map(|fragments| fragments.concat())
}

proptest! {
    #[test]
    fn composition_matches_whole_string(a in "\\PC{0,12}", b in "[a\n😀]{0,12}", c in "\\PC{0,12}") {
        let whole = StringPosition::of(&format!("{a}{b}{c}"));
        let pieces = StringPosition::of(&a)
            .plus(StringPosition::of(&b))
            .plus(StringPosition::of(&c));
        prop_assert_eq!(whole, pieces);
    }

    #[test]
    fn composition_is_associative(a in "[x\n]{0,8}", b in "[y\n]{0,8}", c in "[z\n]{0,8}") {
        let (a, b, c) = (StringPosition::of(&a), StringPosition::of(&b), StringPosition::of(&c));
        prop_assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn any_split_point_composes(s in "[ab\n😀]{0,16}", split in 0usize..16) {
        let split = s
            .char_indices()
            .map(|(index, _)| index)
            .nth(split)
            .unwrap_or(s.len());
        let (head, tail) = s.split_at(split);
        prop_assert_eq!(StringPosition::of(head).plus_str(tail), StringPosition::of(&s));
    }

    #[test]
    fn decoded_prefix_is_prefix_of_value(raw in raw_content(), cut in 0usize..64) {
        let cut = raw
            .char_indices()
            .map(|(index, _)| index)
            .nth(cut)
            .unwrap_or(raw.len());
        let value = decode(&raw, LiteralKind::SimpleString).unwrap();
        let prefix = decode_prefix(&raw, cut, LiteralKind::SimpleString).unwrap();
        prop_assert!(value.starts_with(&prefix), "{prefix:?} is not a prefix of {value:?}");
    }

    #[test]
    fn caret_before_closing_quote_reports_value_length(raw in raw_content()) {
        let source = format!("String s = \"{raw}\";");
        let caret = TextSize::from((source.len() - 2) as u32);
        let tree = JavaSourceTree::parse(source);

        let value = decode(&raw, LiteralKind::SimpleString).unwrap();
        let position = compute_position(caret, &EditorContext::new(&tree)).unwrap();
        prop_assert_eq!(position, StringPosition::of(&value));
        prop_assert_eq!(position.offset(), value.encode_utf16().count());
    }
}
