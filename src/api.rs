//! 序列化边界API
//!
//! 这个模块提供渲染端或宿主应用可以调用的接口

use thiserror::Error;

use crate::parser::{FountainParser, ParseOutput};

/// API错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("解析结果序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 解析Fountain文本
pub fn parse_fountain_text(text: &str) -> ParseOutput {
    let parser = FountainParser::new();
    parser.parse(text)
}

/// 解析Fountain文本并序列化为JSON
pub fn parse_fountain_to_json(text: &str) -> Result<String, ApiError> {
    let result = parse_fountain_text(text);
    Ok(serde_json::to_string(&result)?)
}
