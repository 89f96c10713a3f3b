use crate::keywords::keyword_or_identifier;
use crate::literals::parse_int_constant;
use model::{Error, Lexeme, LexemeValue, Position, TokenKind};
use std::sync::Arc;

/// Forward-only cursor over one source text. Each call to `next_lexeme`
/// consumes exactly one token; there is no rewinding.
pub struct Lexer<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    source: Arc<str>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, source_name: &str) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            source: Arc::from(source_name),
        }
    }

    pub fn next_lexeme(&mut self) -> Result<Lexeme, Error> {
        self.skip_trivia();

        let position = self.position();
        if self.pos >= self.input.len() {
            return Ok(Lexeme { kind: TokenKind::EndOfInput, value: LexemeValue::None, position });
        }

        let (kind, value) = match self.current_char() {
            'a'..='z' | 'A'..='Z' => self.lex_identifier(),
            '0'..='9' => self.lex_number(&position)?,
            _ => self.lex_operator_or_punctuation(&position)?,
        };

        Ok(Lexeme { kind, value, position })
    }

    fn position(&self) -> Position {
        Position { source: Arc::clone(&self.source), line: self.line, column: self.column }
    }

    fn current_char(&self) -> char {
        char::from(self.input[self.pos])
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).map(|&b| char::from(b))
    }

    fn bump(&mut self) {
        if self.input[self.pos] == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    /// Whitespace and `//` comments, in any interleaving.
    fn skip_trivia(&mut self) {
        while self.pos < self.input.len() {
            match self.current_char() {
                ' ' | '\t' | '\n' | '\r' => self.bump(),
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.input.len() && self.current_char() != '\n' {
            self.bump();
        }
    }

    fn lex_identifier(&mut self) -> (TokenKind, LexemeValue) {
        let start = self.pos;
        while self.pos < self.input.len() && self.current_char().is_ascii_alphanumeric() {
            self.bump();
        }
        keyword_or_identifier(&self.text[start..self.pos])
    }

    fn lex_number(&mut self, position: &Position) -> Result<(TokenKind, LexemeValue), Error> {
        let start = self.pos;
        while self.pos < self.input.len() && self.current_char().is_ascii_digit() {
            self.bump();
        }
        let value = parse_int_constant(&self.text[start..self.pos])
            .map_err(|message| Error::lexical(position.clone(), message))?;
        Ok((TokenKind::IntegerLiteral, LexemeValue::Integer(value)))
    }

    fn lex_operator_or_punctuation(
        &mut self,
        position: &Position,
    ) -> Result<(TokenKind, LexemeValue), Error> {
        let ch = self.current_char();

        if ch == ':' {
            if self.peek(1) != Some('=') {
                return Err(Error::lexical(position.clone(), "expected `=` after `:`"));
            }
            self.bump();
            self.bump();
            return Ok((TokenKind::Assign, LexemeValue::Symbol(":=")));
        }

        let (kind, text) = match ch {
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '*' => (TokenKind::Mult, "*"),
            '(' => (TokenKind::OpenParen, "("),
            ')' => (TokenKind::CloseParen, ")"),
            '{' => (TokenKind::OpenBrace, "{"),
            '}' => (TokenKind::CloseBrace, "}"),
            ';' => (TokenKind::Semicolon, ";"),
            '=' => (TokenKind::Equal, "="),
            '>' => (TokenKind::GreaterThan, ">"),
            _ => {
                // Decode from the text so multi-byte characters are reported whole.
                let bad = self.text[self.pos..].chars().next().unwrap_or(ch);
                return Err(Error::lexical(
                    position.clone(),
                    format!("unrecognized character `{}`", bad),
                ));
            }
        };
        self.bump();
        Ok((kind, LexemeValue::Symbol(text)))
    }
}
