pub mod fountain_constants;

pub use fountain_constants::{NORMALIZER_REGEX, TOKEN_REGEX};

/// 判断文本是否以两个空格结尾
///
/// 场景标题和角色名以两个空格结尾表示按普通文本处理(转义)。
pub fn has_trailing_space_escape(text: &str) -> bool {
    text.ends_with("  ")
}
