use fountain_tokenizer_rust::parser::text_processor::{
    resolve_styles, resolve_token_styles, strip_styles, SpanStyle,
};
use fountain_tokenizer_rust::{ScriptToken, TokenKind};

fn styles(text: &str) -> Vec<(SpanStyle, String)> {
    resolve_styles(text)
        .into_iter()
        .map(|span| (span.style, span.text))
        .collect()
}

#[test]
fn test_plain_text() {
    assert_eq!(
        styles("Just plain text."),
        vec![(SpanStyle::Plain, "Just plain text.".to_string())]
    );
}

#[test]
fn test_single_styles() {
    assert_eq!(styles("*italic*"), vec![(SpanStyle::Italic, "italic".to_string())]);
    assert_eq!(styles("**bold**"), vec![(SpanStyle::Bold, "bold".to_string())]);
    assert_eq!(styles("_under_"), vec![(SpanStyle::Underline, "under".to_string())]);
}

#[test]
fn test_combined_styles() {
    assert_eq!(
        styles("***both***"),
        vec![(SpanStyle::BoldItalic, "both".to_string())],
        "三星号应该按粗斜体解析而不是拆成粗体/斜体"
    );
    assert_eq!(
        styles("_***all***_"),
        vec![(SpanStyle::BoldItalicUnderline, "all".to_string())]
    );
    assert_eq!(
        styles("**_bu_**"),
        vec![(SpanStyle::BoldUnderline, "bu".to_string())]
    );
    assert_eq!(
        styles("*_iu_*"),
        vec![(SpanStyle::ItalicUnderline, "iu".to_string())]
    );
    assert_eq!(
        styles("_**bu**_"),
        vec![(SpanStyle::BoldUnderline, "bu".to_string())],
        "下划线在外侧同样是粗体下划线"
    );
}

#[test]
fn test_style_in_sentence() {
    assert_eq!(
        styles("Go **now** please"),
        vec![
            (SpanStyle::Plain, "Go ".to_string()),
            (SpanStyle::Bold, "now".to_string()),
            (SpanStyle::Plain, " please".to_string()),
        ]
    );
}

#[test]
fn test_nested_styles_combine() {
    assert_eq!(
        styles("**bold *italic* tail**"),
        vec![
            (SpanStyle::Bold, "bold ".to_string()),
            (SpanStyle::BoldItalic, "italic".to_string()),
            (SpanStyle::Bold, " tail".to_string()),
        ],
        "嵌套标记应该合并样式"
    );
}

#[test]
fn test_multiple_runs() {
    assert_eq!(
        styles("*a* and **b**"),
        vec![
            (SpanStyle::Italic, "a".to_string()),
            (SpanStyle::Plain, " and ".to_string()),
            (SpanStyle::Bold, "b".to_string()),
        ]
    );
}

#[test]
fn test_inline_note() {
    assert_eq!(
        styles("She pauses [[too long]] here."),
        vec![
            (SpanStyle::Plain, "She pauses ".to_string()),
            (SpanStyle::Note, "too long".to_string()),
            (SpanStyle::Plain, " here.".to_string()),
        ]
    );
}

#[test]
fn test_note_content_kept_verbatim() {
    // 注释内部不再做强调解析
    assert_eq!(
        styles("[[keep *raw*]]"),
        vec![(SpanStyle::Note, "keep *raw*".to_string())]
    );
}

#[test]
fn test_unpaired_markers_stay_plain() {
    assert_eq!(
        styles("2 ** 3 equals 8"),
        vec![(SpanStyle::Plain, "2 ** 3 equals 8".to_string())]
    );
}

#[test]
fn test_strip_styles() {
    assert_eq!(
        strip_styles("**bold** and _under_ [[note]]"),
        "bold and under note",
        "去标记文本应该保留注释内容"
    );
    assert_eq!(strip_styles("no markup"), "no markup");
}

#[test]
fn test_resolve_token_styles() {
    let token = ScriptToken::new(TokenKind::Dialogue, "I *mean* it.");
    let spans = resolve_token_styles(&token);

    assert_eq!(spans.len(), 3);
    assert_eq!(spans[1].style, SpanStyle::Italic);
    assert_eq!(spans[1].text, "mean");
}
