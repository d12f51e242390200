pub mod models;
pub mod utils;
pub mod parser;
pub mod api;

pub use models::{
    ScriptToken,
    TokenKind,
    DualPosition,
    Metadata
};

pub use parser::{
    FountainParser,
    ParseOutput,
    StyledSpan,
    SpanStyle
};

pub use api::{
    ApiError,
    parse_fountain_text,
    parse_fountain_to_json
};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
///
/// # Returns
///
/// 解析结果对象
pub fn parse(script: &str) -> ParseOutput {
    let parser = FountainParser::new();
    parser.parse(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let result = parse("#INT. ROOM - DAY#\n\nHello, world!");
        assert!(!result.tokens.is_empty());
        assert_eq!(result.tokens[0].token_type, TokenKind::SceneHeading);
    }
}
