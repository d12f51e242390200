use serde::{Deserialize, Serialize};

/// token类型，闭合集合
///
/// 序列化为snake_case字符串(如 "scene_heading")，与渲染端约定一致。
/// `TitlePage` 只在解析期内部使用，永远不会出现在输出的token流里。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    TitlePage,
    SceneHeading,
    Centered,
    Transition,
    Character,
    Parenthetical,
    Dialogue,
    DialogueBegin,
    DialogueEnd,
    DualDialogueBegin,
    DualDialogueEnd,
    Section,
    Fx,
    Synopsis,
    Note,
    BoneyardBegin,
    BoneyardEnd,
    PageBreak,
    LineBreak,
    Action,
}

/// 双对话位置: 左侧或右侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DualPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptToken {
    pub token_type: TokenKind,
    pub text: String,                 // 文本内容，标记型token为空串
    pub scene_number: Option<String>, // 场景编号(仅场景标题有效)
    pub dual: Option<DualPosition>,   // 双对话位置(仅dialogue_begin有效)
    pub depth: Option<usize>,         // 章节层级(仅section有效，>=1)
    pub style: Option<String>,        // 音效标签(仅fx有效)
}

impl ScriptToken {
    pub fn new(token_type: TokenKind, text: impl Into<String>) -> Self {
        ScriptToken {
            token_type,
            text: text.into(),
            scene_number: None,
            dual: None,
            depth: None,
            style: None,
        }
    }

    // 创建一个无文本的标记token
    pub fn marker(token_type: TokenKind) -> Self {
        ScriptToken::new(token_type, "")
    }

    // 检查token类型是否匹配
    pub fn is_type(&self, types: &[TokenKind]) -> bool {
        types.contains(&self.token_type)
    }
}
