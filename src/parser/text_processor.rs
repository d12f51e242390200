use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::models::ScriptToken;

/// 样式片段的样式种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
    Underline,
    BoldItalic,
    BoldUnderline,
    ItalicUnderline,
    BoldItalicUnderline,
    Note,
}

/// 行内标记解析后的样式片段，与渲染方式无关
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledSpan {
    pub style: SpanStyle,
    pub text: String,
}

impl StyledSpan {
    fn new(style: SpanStyle, text: &str) -> Self {
        StyledSpan {
            style,
            text: text.to_string(),
        }
    }
}

// 标记组合中间态，嵌套时合并
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StyleState {
    bold: bool,
    italic: bool,
    underline: bool,
}

impl StyleState {
    fn merge(self, other: StyleState) -> StyleState {
        StyleState {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }

    fn span_style(self) -> SpanStyle {
        match (self.bold, self.italic, self.underline) {
            (true, true, true) => SpanStyle::BoldItalicUnderline,
            (true, true, false) => SpanStyle::BoldItalic,
            (true, false, true) => SpanStyle::BoldUnderline,
            (false, true, true) => SpanStyle::ItalicUnderline,
            (true, false, false) => SpanStyle::Bold,
            (false, true, false) => SpanStyle::Italic,
            (false, false, true) => SpanStyle::Underline,
            (false, false, false) => SpanStyle::Plain,
        }
    }
}

lazy_static! {
    // 强调标记规则，组合标记在前保证最长组合优先。
    // 双侧交替写法代替环视，两个分支各有一个捕获组。
    static ref EMPHASIS_RULES: Vec<(StyleState, Regex)> = vec![
        (
            StyleState { bold: true, italic: true, underline: true },
            Regex::new(r"_\*{3}(.+?)\*{3}_|\*{3}_(.+?)_\*{3}").unwrap(),
        ),
        (
            StyleState { bold: true, italic: false, underline: true },
            Regex::new(r"_\*{2}(.+?)\*{2}_|\*{2}_(.+?)_\*{2}").unwrap(),
        ),
        (
            StyleState { bold: false, italic: true, underline: true },
            Regex::new(r"_\*(.+?)\*_|\*_(.+?)_\*").unwrap(),
        ),
        (
            StyleState { bold: true, italic: true, underline: false },
            Regex::new(r"\*{3}(.+?)\*{3}").unwrap(),
        ),
        (
            StyleState { bold: true, italic: false, underline: false },
            Regex::new(r"\*{2}(.+?)\*{2}").unwrap(),
        ),
        (
            StyleState { bold: false, italic: true, underline: false },
            Regex::new(r"\*(.+?)\*").unwrap(),
        ),
        (
            StyleState { bold: false, italic: false, underline: true },
            Regex::new(r"_(.+?)_").unwrap(),
        ),
    ];

    static ref NOTE_INLINE: Regex = Regex::new(r"\[\[(.+?)\]\]").unwrap();
}

// 一次标记命中
struct MarkerMatch {
    start: usize,
    end: usize,
    inner_start: usize,
    inner_end: usize,
    state: Option<StyleState>, // None 表示行内注释
}

/// 把文本解析为样式片段序列
///
/// 解析只作用于文本内部，不改变所在块的分类。未配对的标记按普通文本保留。
pub fn resolve_styles(text: &str) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    resolve_into(text, StyleState::default(), &mut spans);
    spans
}

/// 解析token文本的行内标记
pub fn resolve_token_styles(token: &ScriptToken) -> Vec<StyledSpan> {
    resolve_styles(&token.text)
}

/// 去掉行内标记后的等价文本。注释保留内容，去掉 [[ ]] 定界
pub fn strip_styles(text: &str) -> String {
    resolve_styles(text)
        .into_iter()
        .map(|span| span.text)
        .collect()
}

// 扫描剩余文本中最早出现的标记，起点相同时先注释、再按规则表顺序
fn find_marker(text: &str) -> Option<MarkerMatch> {
    let mut found: Option<MarkerMatch> = None;

    if let Some(caps) = NOTE_INLINE.captures(text) {
        let whole = caps.get(0).unwrap();
        let inner = caps.get(1).unwrap();
        found = Some(MarkerMatch {
            start: whole.start(),
            end: whole.end(),
            inner_start: inner.start(),
            inner_end: inner.end(),
            state: None,
        });
    }

    for (state, regex) in EMPHASIS_RULES.iter() {
        let caps = match regex.captures(text) {
            Some(caps) => caps,
            None => continue,
        };
        let whole = caps.get(0).unwrap();
        if let Some(prev) = &found {
            if whole.start() >= prev.start {
                continue;
            }
        }
        let inner = caps
            .get(1)
            .or_else(|| caps.get(2))
            .expect("emphasis rule always captures inner text");
        found = Some(MarkerMatch {
            start: whole.start(),
            end: whole.end(),
            inner_start: inner.start(),
            inner_end: inner.end(),
            state: Some(*state),
        });
    }

    found
}

fn resolve_into(text: &str, base: StyleState, spans: &mut Vec<StyledSpan>) {
    let mut rest = text;
    loop {
        let marker = match find_marker(rest) {
            Some(marker) => marker,
            None => {
                if !rest.is_empty() {
                    spans.push(StyledSpan::new(base.span_style(), rest));
                }
                return;
            }
        };

        if marker.start > 0 {
            spans.push(StyledSpan::new(base.span_style(), &rest[..marker.start]));
        }

        let inner = &rest[marker.inner_start..marker.inner_end];
        match marker.state {
            // 注释内容不再做强调解析
            None => spans.push(StyledSpan::new(SpanStyle::Note, inner)),
            Some(state) => resolve_into(inner, base.merge(state), spans),
        }

        rest = &rest[marker.end..];
    }
}
