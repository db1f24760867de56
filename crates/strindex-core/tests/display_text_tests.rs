//! End-to-end tests for the status text
//!
//! Every test writes a Java snippet with a `<|>` marker where the caret is,
//! parses it and checks the text a status bar would show.

use rowan::TextSize;
use strindex_core::{
    DisplayConfiguration, EditorContext, JavaSourceTree, ResolverConfiguration, StrIndexConfig,
    compute_display_text,
};

const CARET: &str = "<|>";

fn split_caret(marked: &str) -> (String, TextSize) {
    let offset = marked.find(CARET).expect("snippet has a caret marker");
    (
        marked.replacen(CARET, "", 1),
        TextSize::from(offset as u32),
    )
}

fn display_with(marked: &str, config: StrIndexConfig) -> String {
    let (source, caret) = split_caret(marked);
    let tree = JavaSourceTree::parse(source);
    compute_display_text(caret, &EditorContext::new(&tree).with_config(config))
}

fn display(marked: &str) -> String {
    display_with(marked, StrIndexConfig::default())
}

#[test]
fn test_simple_string() {
    assert_eq!(display(r#"String s = "ab<|>c";"#), "String 1:3 (index 2)");
    assert_eq!(display(r#"String s = "<|>abc";"#), "String 1:1 (index 0)");
    assert_eq!(display(r#"String s = "abc<|>";"#), "String 1:4 (index 3)");
}

#[test]
fn test_delimiters_have_no_position() {
    assert_eq!(display(r#"String s = <|>"abc";"#), "");
    assert_eq!(display(r#"String s = "abc"<|>;"#), "");
}

#[test]
fn test_text_block_opening_line_is_index_zero() {
    let marked = "String s = \"\"\"<|>\n    text\n    \"\"\";";
    assert_eq!(display(marked), "String 1:1 (index 0)");

    let trailing_space = "String s = \"\"\"  <|> \n    text\n    \"\"\";";
    assert_eq!(display(trailing_space), "String 1:1 (index 0)");

    let concatenated = "String s = \"ab\" + \"\"\"<|>\n    text\n    \"\"\";";
    assert_eq!(display(concatenated), "String 1:3 (index 2)");
}

#[test]
fn test_outside_string_literals() {
    assert_eq!(display(r#"String s<|> = "abc";"#), "");
    assert_eq!(display(r#"// "a<|>b""#), "");
    assert_eq!(display(r#"char c = 'a<|>';"#), "");
    assert_eq!(display(r#"int n = 12<|>3;"#), "");
}

#[test]
fn test_caret_past_end_of_document() {
    let tree = JavaSourceTree::parse(r#"String s = "abc";"#);
    let text = compute_display_text(TextSize::from(400), &EditorContext::new(&tree));
    assert_eq!(text, "");
}

#[test]
fn test_escapes_count_as_one_character() {
    assert_eq!(display(r#"String s = "a\t<|>b\n";"#), "String 1:3 (index 2)");
    assert_eq!(display(r#"String s = "a\tb\n<|>x";"#), "String 2:1 (index 4)");
    assert_eq!(display(r#"String s = "\"\\<|>";"#), "String 1:3 (index 2)");
    assert_eq!(display(r#"String s = "\101<|>B";"#), "String 1:2 (index 1)");
}

#[test]
fn test_unicode_escape() {
    // Built at runtime so the escape stays a backslash sequence
    let marked = format!("String s = \"{}u0041<|>b\";", '\\');
    assert_eq!(display(&marked), "String 1:2 (index 1)");
}

#[test]
fn test_caret_inside_escape_stops_before_it() {
    assert_eq!(display(r#"String s = "a\<|>tb";"#), "String 1:2 (index 1)");
    let marked = format!("String s = \"ab{}u00<|>41\";", '\\');
    assert_eq!(display(&marked), "String 1:3 (index 2)");
}

#[test]
fn test_surrogate_pairs_take_two_units() {
    assert_eq!(display("String s = \"😀<|>a\";"), "String 1:3 (index 2)");
    assert_eq!(display("String s = \"é<|>a\";"), "String 1:2 (index 1)");
}

#[test]
fn test_unterminated_literal_still_has_positions() {
    let marked = "String s = \"a<|>b\nint x = 1;";
    assert_eq!(display(marked), "String 1:2 (index 1)");
}

#[test]
fn test_text_block_strips_indentation() {
    let marked = "String s = \"\"\"\n    hello\n      wor<|>ld\n    \"\"\";";
    assert_eq!(display(marked), "String 2:6 (index 11)");

    let at_content_start = "String s = \"\"\"\n    <|>hi\n    \"\"\";";
    assert_eq!(display(at_content_start), "String 1:1 (index 0)");
}

#[test]
fn test_text_block_caret_in_indentation() {
    let marked = "String s = \"\"\"\n  <|>  hi\n    \"\"\";";
    assert_eq!(display(marked), "");
}

#[test]
fn test_text_block_closing_line_sets_indentation() {
    let marked = "String s = \"\"\"\n    hi<|>\n  \"\"\";";
    assert_eq!(display(marked), "String 1:5 (index 4)");
}

#[test]
fn test_text_block_line_continuation() {
    let marked = "String s = \"\"\"\n    ab \\\n    cd<|>\n    \"\"\";";
    assert_eq!(display(marked), "String 1:6 (index 5)");
}

#[test]
fn test_concatenation_prefix() {
    assert_eq!(
        display(r#"String s = "abc" + "d<|>ef";"#),
        "String 1:5 (index 4)"
    );
    assert_eq!(
        display(r#"String s = "a\nbc" + "d<|>";"#),
        "String 2:4 (index 5)"
    );
    assert_eq!(
        display(r#"String s = "<|>abc" + "def";"#),
        "String 1:1 (index 0)"
    );
}

#[test]
fn test_concatenation_through_parentheses() {
    assert_eq!(
        display(r#"String s = ("ab") + ("c<|>d");"#),
        "String 1:4 (index 3)"
    );
}

#[test]
fn test_only_enclosing_chain_counts() {
    assert_eq!(
        display(r#"String s = "a" + ("b" + "c<|>");"#),
        "String 1:3 (index 2)"
    );
}

#[test]
fn test_unresolvable_operand_is_skipped() {
    assert_eq!(
        display(r#"String s = someMethod() + "<|>xyz";"#),
        "String 1:1 (index 0)"
    );
    assert_eq!(
        display(r#"String s = "ab" + input + "c<|>";"#),
        "String 1:4 (index 3)"
    );
}

#[test]
fn test_null_operand_contributes_nothing() {
    assert_eq!(
        display(r#"String s = null + "a<|>bc";"#),
        "String 1:2 (index 1)"
    );
}

#[test]
fn test_numeric_operands() {
    assert_eq!(display(r#"String s = 1 + 2 + "a<|>";"#), "String 1:4 (index 3)");
    assert_eq!(display(r#"String s = 1 + 2 + "<|>a";"#), "String 1:3 (index 2)");
    assert_eq!(
        display(r#"String s = "a" + 1 + 2 + "b<|>";"#),
        "String 1:5 (index 4)"
    );
    assert_eq!(
        display(r#"String s = 'x' + 1 + "<|>";"#),
        "String 1:3 (index 2)"
    );
    assert_eq!(
        display(r#"String s = 1.5 + "<|>";"#),
        "String 1:4 (index 3)"
    );
}

#[test]
fn test_references_to_constants_and_initializers() {
    let marked = r#"
class Greeting {
    static final String PREFIX = "ab\n";

    void run() {
        String name = PREFIX + "cd";
        String s = name + "e<|>f";
    }
}
"#;
    assert_eq!(display(marked), "String 2:4 (index 6)");
}

#[test]
fn test_parameters_shadow_fields() {
    let marked = r#"
class Greeting {
    String name = "field";

    void run(String name) {
        String s = name + "<|>x";
    }
}
"#;
    assert_eq!(display(marked), "String 1:1 (index 0)");
}

#[test]
fn test_reference_cycle_is_unresolvable() {
    let marked = r#"
class Cycle {
    String a = b + "x";
    String b = a + "<|>y";
}
"#;
    assert_eq!(display(marked), "String 1:1 (index 0)");
}

#[test]
fn test_string_method_calls() {
    let cases = [
        (r#"String s = String.valueOf(12) + "a<|>";"#, "String 1:4 (index 3)"),
        (r#"String s = "ab".concat("c\n") + "d<|>";"#, "String 2:2 (index 5)"),
        (r#"String s = "hello".substring(1, 3) + "x<|>";"#, "String 1:4 (index 3)"),
        (r#"String s = "hello".substring(3) + "<|>x";"#, "String 1:3 (index 2)"),
        (r#"String s = "ab".repeat(3) + "<|>x";"#, "String 1:7 (index 6)"),
        (r#"String s = "ab".toString().intern() + "c<|>";"#, "String 1:4 (index 3)"),
    ];
    for (marked, expected) in cases {
        assert_eq!(display(marked), expected, "for {marked}");
    }
}

#[test]
fn test_replace_keeps_receiver() {
    assert_eq!(
        display(r#"String s = "abc".replace('a', 'z') + "<|>x";"#),
        "String 1:4 (index 3)"
    );
}

#[test]
fn test_unsupported_method_calls_are_skipped() {
    let cases = [
        r#"String s = "hello".substring(2, 9) + "<|>x";"#,
        r#"String s = "ab".repeat(-1) + "<|>x";"#,
        r#"String s = "ab".repeat(n) + "<|>x";"#,
        r#"String s = "ab".toUpperCase() + "<|>x";"#,
        r#"String s = "abc".replace("a", "z") + "<|>x";"#,
    ];
    for marked in cases {
        assert_eq!(display(marked), "String 1:1 (index 0)", "for {marked}");
    }
}

#[test]
fn test_oversized_repeat_is_skipped() {
    assert_eq!(
        display(r#"String s = "ab".repeat(100000).repeat(100000) + "<|>x";"#),
        "String 1:1 (index 0)"
    );

    let bounded = StrIndexConfig {
        resolver: ResolverConfiguration {
            max_length: 4,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        display_with(r#"String s = "ab".repeat(2) + "<|>x";"#, bounded.clone()),
        "String 1:5 (index 4)"
    );
    assert_eq!(
        display_with(r#"String s = "ab".repeat(3) + "<|>x";"#, bounded),
        "String 1:1 (index 0)"
    );
}

#[test]
fn test_multiple_carets_have_no_position() {
    let (source, caret) = split_caret(r#"String s = "ab<|>c";"#);
    let tree = JavaSourceTree::parse(source);
    let context = EditorContext::new(&tree).with_caret_count(2);
    assert_eq!(compute_display_text(caret, &context), "");
}

#[test]
fn test_indexing_has_no_position() {
    let (source, caret) = split_caret(r#"String s = "ab<|>c";"#);
    let tree = JavaSourceTree::parse(source);
    let context = EditorContext::new(&tree).with_index_ready(false);
    assert_eq!(compute_display_text(caret, &context), "");
}

#[test]
fn test_compact_single_line() {
    let config = StrIndexConfig {
        display: DisplayConfiguration {
            compact_single_line: true,
        },
        ..Default::default()
    };
    assert_eq!(
        display_with(r#"String s = "ab<|>c";"#, config.clone()),
        "String index 2"
    );
    assert_eq!(
        display_with(r#"String s = "a\nb<|>";"#, config),
        "String 2:2 (index 3)"
    );
}

#[test]
fn test_resolver_depth_limit() {
    let marked = r#"
String a = "xy";
String b = a;
String s = b + "<|>z";
"#;
    assert_eq!(display(marked), "String 1:3 (index 2)");

    let shallow = StrIndexConfig {
        resolver: ResolverConfiguration {
            max_depth: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(display_with(marked, shallow), "String 1:1 (index 0)");
}
