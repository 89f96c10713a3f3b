use model::{LexemeValue, TokenKind};

pub(crate) fn keyword_or_identifier(text: &str) -> (TokenKind, LexemeValue) {
    match text {
        "put" => (TokenKind::Put, LexemeValue::Symbol("put")),
        "if" => (TokenKind::If, LexemeValue::Symbol("if")),
        "while" => (TokenKind::While, LexemeValue::Symbol("while")),
        _ => (TokenKind::Identifier, LexemeValue::Identifier(text.to_string())),
    }
}
