use std::sync::Arc;

use buffer_core::{Document, HighlightKind, Highlighter, Position, ScreenPosition, TabExpansion};
use buffer_core_cfamily::{CFamilyTokenizer, LexState};
use buffer_core_lang::LanguageConfig;
use pretty_assertions::assert_eq;

fn snapshot(tokenizer: &CFamilyTokenizer, lines: usize) -> Vec<(usize, usize, usize, HighlightKind)> {
    tokenizer
        .get_highlighting_range(0, lines)
        .into_iter()
        .map(|h| (h.line, h.start_column, h.end_column, h.kind))
        .collect()
}

const SOURCE: &[&str] = &[
    "#include <stdio.h>",
    "int main() {",
    "    /* greet",
    "       the world */",
    "    for (int i = 0; i < 3; i++) {",
    "        printf(\"hi\"); // say it",
    "    }",
    "    return 0;",
    "}",
];

fn source() -> Document {
    Document::from_lines(SOURCE.iter().copied())
}

#[test]
fn test_update_twice_is_idempotent() {
    let document = source();
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();

    tokenizer.update_highlighting(&document, document.line_count());
    let first = tokenizer.highlight_index().clone();
    tokenizer.update_highlighting(&document, document.line_count());

    assert_eq!(tokenizer.highlight_index(), &first);
    assert!(!first.is_empty());
}

#[test]
fn test_unterminated_comment_on_last_line() {
    let document = Document::from_text("int a;\nint b; /* open");
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
    tokenizer.generate_highlighting(&document);

    let comments: Vec<_> = tokenizer
        .get_highlighting(1)
        .into_iter()
        .filter(|h| h.kind == HighlightKind::Comment)
        .collect();
    assert_eq!(comments.len(), 1);
    assert_eq!((comments[0].start_column, comments[0].end_column), (7, 14));
    assert_eq!(comments[0].text, "/* open");
    assert_eq!(tokenizer.last_pass_state(), LexState::InBlockComment);
}

#[test]
fn test_partial_update_leaves_later_lines_alone() {
    let document = Document::from_text("int a;\nint b;\nint c;");
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
    tokenizer.generate_highlighting(&document);

    tokenizer.update_highlighting(&document, 1);
    assert_eq!(snapshot(&tokenizer, 3).len(), 3);
    assert_eq!(tokenizer.last_pass_state(), LexState::Normal);
}

#[test]
fn test_refresh_after_opening_comment_matches_full_pass() {
    let mut document = source();
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
    tokenizer.generate_highlighting(&document);
    document.take_dirty_from();

    document.insert_text(Position::new(4, 4), "/* ").unwrap();
    assert!(tokenizer.refresh(&mut document));
    assert!(!tokenizer.refresh(&mut document));

    let mut full = CFamilyTokenizer::c_family().unwrap();
    full.generate_highlighting(&document);
    assert_eq!(snapshot(&tokenizer, 9), snapshot(&full, 9));
    assert_eq!(tokenizer.highlight_index(), full.highlight_index());
    assert_eq!(tokenizer.line_state(5), Some(LexState::InBlockComment));
}

#[test]
fn test_rescan_from_middle_keeps_brace_depth() {
    let mut document = source();
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
    tokenizer.generate_highlighting(&document);
    document.take_dirty_from();

    // Open a nested block inside the loop body.
    document
        .insert_text(Position::new(0, 5), "        if (1) {\n        }\n")
        .unwrap();
    tokenizer.refresh(&mut document);

    let index = tokenizer.highlight_index();
    assert_eq!(index.brace_depth(ScreenPosition::new(11, 1)), Some(2));
    assert_eq!(index.brace_depth(ScreenPosition::new(32, 4)), Some(4));
    assert_eq!(index.brace_depth(ScreenPosition::new(15, 5)), Some(6));
    assert_eq!(index.brace_depth(ScreenPosition::new(8, 6)), Some(4));
    assert_eq!(tokenizer.get_indent(ScreenPosition::new(0, 6)), "      ");
}

#[test]
fn test_removing_comment_closer_extends_comment() {
    let mut document = Document::from_text("/* a */\nint b;\nint c;");
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
    tokenizer.generate_highlighting(&document);
    document.take_dirty_from();
    assert_eq!(tokenizer.get_highlighting(2)[0].kind, HighlightKind::Keyword);

    document
        .delete_selection(Position::new(4, 0), Position::new(7, 0))
        .unwrap();
    tokenizer.refresh(&mut document);

    assert_eq!(tokenizer.get_highlighting(2)[0].kind, HighlightKind::Comment);
    assert_eq!(tokenizer.last_pass_state(), LexState::InBlockComment);
}

#[test]
fn test_custom_tab_width() {
    let document = Document::from_text("\t\tint");
    let mut tokenizer =
        CFamilyTokenizer::with_tab(Arc::new(LanguageConfig::c_family()), TabExpansion::with_width(2))
            .unwrap();
    tokenizer.generate_highlighting(&document);
    let spans = tokenizer.get_highlighting(0);
    assert_eq!((spans[0].start_column, spans[0].end_column), (4, 7));
}

#[test]
fn test_rescan_past_known_lines_falls_back_to_full_pass() {
    let document = Document::from_text("/* a\nb\n*/ int");
    let mut tokenizer = CFamilyTokenizer::c_family().unwrap();

    tokenizer.rehighlight_from(&document, 2);
    assert_eq!(tokenizer.get_highlighting(1)[0].kind, HighlightKind::Comment);
    assert_eq!(tokenizer.get_highlighting(2).len(), 2);
}
