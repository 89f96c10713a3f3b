mod keywords;
mod literals;
mod state_machine;

use model::{Error, Lexeme, TokenKind};

pub use state_machine::Lexer;

/// Lex a whole source text, up to and including the `EndOfInput` lexeme.
pub fn lex(input: &str, source_name: &str) -> Result<Vec<Lexeme>, Error> {
    let mut lexer = Lexer::new(input, source_name);
    let mut lexemes = Vec::new();
    loop {
        let lexeme = lexer.next_lexeme()?;
        let done = lexeme.kind == TokenKind::EndOfInput;
        lexemes.push(lexeme);
        if done {
            return Ok(lexemes);
        }
    }
}
