pub mod fountain_parser;
pub mod text_processor;

pub use fountain_parser::FountainParser;
pub use fountain_parser::ParseOutput;
pub use fountain_parser::{normalize_script, split_blocks};
pub use text_processor::{
    resolve_styles,
    resolve_token_styles,
    strip_styles,
    SpanStyle,
    StyledSpan
};
