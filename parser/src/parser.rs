use crate::statements::StatementParser;
use lexer::Lexer;
use model::{Error, Lexeme, Node, TokenKind};

/// Open `(`/`{` counts. A closer arriving at depth zero is unmatched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub paren_depth: usize,
    pub brace_depth: usize,
}

impl ParseContext {
    pub(crate) fn open(&mut self, lexeme: &Lexeme) {
        match lexeme.kind {
            TokenKind::OpenParen => self.paren_depth += 1,
            TokenKind::OpenBrace => self.brace_depth += 1,
            _ => {}
        }
    }

    /// Error unless a matching opener for this closer is still pending.
    pub(crate) fn ensure_open(&self, lexeme: &Lexeme) -> Result<(), Error> {
        let depth = match lexeme.kind {
            TokenKind::CloseParen => self.paren_depth,
            TokenKind::CloseBrace => self.brace_depth,
            _ => return Ok(()),
        };
        if depth == 0 {
            return Err(Error::syntax(
                lexeme.position.clone(),
                format!("unmatched {}", lexeme.kind.describe()),
            ));
        }
        Ok(())
    }

    pub(crate) fn close(&mut self, lexeme: &Lexeme) -> Result<(), Error> {
        self.ensure_open(lexeme)?;
        match lexeme.kind {
            TokenKind::CloseParen => self.paren_depth -= 1,
            TokenKind::CloseBrace => self.brace_depth -= 1,
            _ => {}
        }
        Ok(())
    }
}

/// Recursive-descent parser holding one lexeme of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) current: Lexeme,
    pub(crate) context: ParseContext,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, Error> {
        let current = lexer.next_lexeme()?;
        Ok(Parser { lexer, current, context: ParseContext::default() })
    }

    /// Parse one top-level statement, or `Node::EndOfInput` once the source is exhausted.
    pub fn parse(&mut self) -> Result<Node, Error> {
        self.skip_empty_statements()?;
        if self.current.kind == TokenKind::EndOfInput {
            return Ok(Node::EndOfInput);
        }
        self.parse_stmt()
    }

    pub fn context(&self) -> ParseContext {
        self.context
    }

    /// Consume the lookahead and return it.
    pub(crate) fn advance(&mut self) -> Result<Lexeme, Error> {
        let next = self.lexer.next_lexeme()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Lexeme, Error> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(Error::syntax(
                self.current.position.clone(),
                format!(
                    "expected {} {}, found {}",
                    kind.describe(),
                    context,
                    self.current.describe()
                ),
            ))
        }
    }

    pub(crate) fn skip_empty_statements(&mut self) -> Result<(), Error> {
        while self.current.kind == TokenKind::Semicolon {
            self.advance()?;
        }
        Ok(())
    }
}
