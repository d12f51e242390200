use regex::Regex;
use serde::Serialize;

use crate::models::{DualPosition, Metadata, ScriptToken, TokenKind};
use crate::utils::{has_trailing_space_escape, NORMALIZER_REGEX, TOKEN_REGEX};

/// 一次解析的完整产物
///
/// token顺序与文档顺序一致。交给渲染端后不再变化。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutput {
    pub tokens: Vec<ScriptToken>,
    pub metadata: Metadata,
}

impl ParseOutput {
    pub fn new() -> Self {
        ParseOutput {
            tokens: Vec::new(),
            metadata: Metadata::new(),
        }
    }
}

/// 分类规则种类
///
/// 规则表按此处声明的优先级从上到下逐条尝试，首条命中即生效。
/// 用有序列表而不是按键查表，避免同键覆盖导致规则悄悄失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    SceneHeading,
    Centered,
    Transition,
    Dialogue,
    Section,
    Fx,
    Synopsis,
    Note,
    Boneyard,
    PageBreak,
    LineBreak,
}

struct Rule {
    kind: RuleKind,
    regex: Regex,
}

pub struct FountainParser {
    rules: Vec<Rule>,
}

impl FountainParser {
    pub fn new() -> Self {
        FountainParser {
            rules: Self::build_rules(),
        }
    }

    // 构建规则表，顺序即优先级
    fn build_rules() -> Vec<Rule> {
        vec![
            // 强制场景标题: #...# 包裹的块。常规 INT./EXT. 前缀不识别，
            // 场景标题只有强制形式。
            Rule {
                kind: RuleKind::SceneHeading,
                regex: Regex::new(r"^\s*#(.+)#\s*$").unwrap(),
            },
            Rule {
                kind: RuleKind::Centered,
                regex: Regex::new(r"^> *(.+) *<(?:\n.+)*").unwrap(),
            },
            Rule {
                kind: RuleKind::Transition,
                regex: Regex::new(r"^((?:FADE (?:TO BLACK|OUT)|CUT TO BLACK)\.|.+ TO:)|^> *(.+)").unwrap(),
            },
            // 角色名行+紧随的内容行。块内不存在连续换行，单个\n即可衔接
            Rule {
                kind: RuleKind::Dialogue,
                regex: Regex::new(r"(?s)^([A-Z*_]+[0-9A-Z (._\-')]*)(\^?)\n(.+)").unwrap(),
            },
            Rule {
                kind: RuleKind::Section,
                regex: Regex::new(r"^(#+) *(.*)").unwrap(),
            },
            Rule {
                kind: RuleKind::Fx,
                regex: Regex::new(r"^((F/X|ATMOS)\. (.+))").unwrap(),
            },
            Rule {
                kind: RuleKind::Synopsis,
                regex: Regex::new(r"^= *(.*)").unwrap(),
            },
            Rule {
                kind: RuleKind::Note,
                regex: Regex::new(r"^\[\[([^\[].*)\]\]$").unwrap(),
            },
            Rule {
                kind: RuleKind::Boneyard,
                regex: Regex::new(r"^(/\*|\*/)$").unwrap(),
            },
            Rule {
                kind: RuleKind::PageBreak,
                regex: Regex::new(r"^={3,}$").unwrap(),
            },
            Rule {
                kind: RuleKind::LineBreak,
                regex: Regex::new(r"^ {2}$").unwrap(),
            },
        ]
    }

    /// 解析Fountain格式文本
    ///
    /// 全量函数: 任何输入都能得到 `ParseOutput`，不会失败。
    /// 块序列自底向上遍历，借 `pending_dual` 判断双对话的左半侧，
    /// 结束时整体反转恢复文档顺序。
    pub fn parse(&self, script: &str) -> ParseOutput {
        let normalized = normalize_script(script);
        let blocks = split_blocks(&normalized);

        let mut metadata = Metadata::new();
        let mut tokens: Vec<ScriptToken> = Vec::new();
        let mut pending_dual = false;

        for (i, block) in blocks.iter().enumerate().rev() {
            // 标题页只认首块
            if i == 0 && TOKEN_REGEX["title_page"].is_match(block) {
                extract_title_page(block, &mut metadata);
                continue;
            }
            self.classify_block(block, &mut tokens, &mut pending_dual);
        }

        tokens.reverse();

        ParseOutput { tokens, metadata }
    }

    // 逐条尝试规则，全部不命中时落到action
    fn classify_block(
        &self,
        block: &str,
        tokens: &mut Vec<ScriptToken>,
        pending_dual: &mut bool,
    ) {
        for rule in &self.rules {
            if self.apply_rule(rule, block, tokens, pending_dual) {
                return;
            }
        }
        tokens.push(ScriptToken::new(TokenKind::Action, block));
    }

    // 返回true表示该块已被此规则消费(可能不产token，如被转义的场景标题)
    fn apply_rule(
        &self,
        rule: &Rule,
        block: &str,
        tokens: &mut Vec<ScriptToken>,
        pending_dual: &mut bool,
    ) -> bool {
        let caps = match rule.regex.captures(block) {
            Some(caps) => caps,
            None => return false,
        };

        match rule.kind {
            RuleKind::SceneHeading => {
                let inner = caps.get(1).map_or("", |m| m.as_str());
                // 两空格结尾的标题按转义处理，整块丢弃
                if !has_trailing_space_escape(inner) {
                    let mut token =
                        ScriptToken::new(TokenKind::SceneHeading, inner.trim());
                    if let Some(number) = TOKEN_REGEX["scene_number"].captures(inner) {
                        let matched = number.get(0).unwrap();
                        token.scene_number =
                            Some(number.get(1).unwrap().as_str().trim().to_string());
                        token.text = inner[..matched.start()].trim().to_string();
                    }
                    tokens.push(token);
                }
                true
            }
            RuleKind::Centered => {
                let text = caps
                    .get(0)
                    .unwrap()
                    .as_str()
                    .replace('>', "")
                    .replace('<', "");
                tokens.push(ScriptToken::new(TokenKind::Centered, text));
                true
            }
            RuleKind::Transition => {
                let text = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str());
                tokens.push(ScriptToken::new(TokenKind::Transition, text));
                true
            }
            RuleKind::Dialogue => {
                let cue = caps.get(1).map_or("", |m| m.as_str());
                // 两空格结尾的角色名退回后续规则
                if has_trailing_space_escape(cue) {
                    return false;
                }
                let is_dual_right = !caps.get(2).map_or("", |m| m.as_str()).is_empty();
                let content = caps.get(3).map_or("", |m| m.as_str());

                // 自底向上遍历，token按倒序推入
                if is_dual_right {
                    tokens.push(ScriptToken::marker(TokenKind::DualDialogueEnd));
                }
                tokens.push(ScriptToken::marker(TokenKind::DialogueEnd));

                for part in split_dialogue_parts(content).iter().rev() {
                    if part.is_empty() {
                        continue;
                    }
                    let kind = if TOKEN_REGEX["parenthetical"].is_match(part) {
                        TokenKind::Parenthetical
                    } else {
                        TokenKind::Dialogue
                    };
                    tokens.push(ScriptToken::new(kind, *part));
                }

                tokens.push(ScriptToken::new(TokenKind::Character, cue.trim()));

                let mut begin = ScriptToken::marker(TokenKind::DialogueBegin);
                begin.dual = if is_dual_right {
                    Some(DualPosition::Right)
                } else if *pending_dual {
                    Some(DualPosition::Left)
                } else {
                    None
                };
                tokens.push(begin);

                if *pending_dual {
                    tokens.push(ScriptToken::marker(TokenKind::DualDialogueBegin));
                }
                *pending_dual = is_dual_right;
                true
            }
            RuleKind::Section => {
                let hashes = caps.get(1).map_or("", |m| m.as_str());
                let mut token = ScriptToken::new(
                    TokenKind::Section,
                    caps.get(2).map_or("", |m| m.as_str()),
                );
                token.depth = Some(hashes.len());
                tokens.push(token);
                true
            }
            RuleKind::Fx => {
                let mut token =
                    ScriptToken::new(TokenKind::Fx, caps.get(3).map_or("", |m| m.as_str()));
                token.style = Some(caps.get(2).map_or("", |m| m.as_str()).to_string());
                tokens.push(token);
                true
            }
            RuleKind::Synopsis => {
                // == 开头的不是概要(页分隔等交给后面的规则)
                if block.starts_with("==") {
                    return false;
                }
                tokens.push(ScriptToken::new(
                    TokenKind::Synopsis,
                    caps.get(1).map_or("", |m| m.as_str()),
                ));
                true
            }
            RuleKind::Note => {
                tokens.push(ScriptToken::new(
                    TokenKind::Note,
                    caps.get(1).map_or("", |m| m.as_str()),
                ));
                true
            }
            RuleKind::Boneyard => {
                let kind = if caps.get(1).map_or("", |m| m.as_str()) == "/*" {
                    TokenKind::BoneyardBegin
                } else {
                    TokenKind::BoneyardEnd
                };
                tokens.push(ScriptToken::marker(kind));
                true
            }
            RuleKind::PageBreak => {
                tokens.push(ScriptToken::marker(TokenKind::PageBreak));
                true
            }
            RuleKind::LineBreak => {
                tokens.push(ScriptToken::marker(TokenKind::LineBreak));
                true
            }
        }
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 文本归一化
///
/// 依次: 统一换行符、隔离注释定界符、去掉文档首尾空行、
/// 去掉行首缩进噪声。接受任意文本，空串原样返回。
pub fn normalize_script(script: &str) -> String {
    let text = NORMALIZER_REGEX["standardizer"].replace_all(script, "\n");
    let text = NORMALIZER_REGEX["boneyard_isolate"].replace_all(&text, "\n$1\n");
    let text = NORMALIZER_REGEX["cleaner"].replace_all(&text, "");
    NORMALIZER_REGEX["whitespacer"]
        .replace_all(&text, "")
        .into_owned()
}

/// 按空行边界切块。空文档得到空序列
pub fn split_blocks(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        return Vec::new();
    }
    NORMALIZER_REGEX["splitter"].split(normalized).collect()
}

// 对话内容切分: 整行括号组保留为独立片段，其余按原样保留
fn split_dialogue_parts(content: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in TOKEN_REGEX["parenthetical_split"].captures_iter(content) {
        let whole = caps.get(0).unwrap();
        parts.push(&content[last..whole.start()]);
        parts.push(caps.get(1).unwrap().as_str());
        last = whole.end();
    }
    parts.push(&content[last..]);
    parts
}

// 标题页块解析
//
// 识别键行开启新条目，其后的非键行并入当前条目的值。
// 首个键行之前的内容忽略；键后无值时存空串；重复键覆盖原值。
fn extract_title_page(block: &str, metadata: &mut Metadata) {
    let mut key: Option<String> = None;
    let mut value = String::new();

    for line in block.split('\n') {
        if let Some(caps) = TOKEN_REGEX["title_entry"].captures(line) {
            if let Some(done) = key.take() {
                metadata.insert(done, value.trim());
            }
            value.clear();
            key = Some(
                caps.get(1)
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_lowercase()
                    .replace(' ', "_"),
            );
            value.push_str(caps.get(2).map_or("", |m| m.as_str()));
        } else if key.is_some() {
            value.push('\n');
            value.push_str(line);
        }
    }

    if let Some(done) = key {
        metadata.insert(done, value.trim());
    }
}
