pub mod script_token;
pub mod metadata;

pub use script_token::{ScriptToken, TokenKind, DualPosition};
pub use metadata::Metadata;
