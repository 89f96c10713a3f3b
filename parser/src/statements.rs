use crate::expressions::ExpressionParser;
use crate::parser::Parser;
use model::{Error, Node, TokenKind};
use tracing::trace;

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_stmt(&mut self) -> Result<Node, Error>;
    fn parse_block(&mut self) -> Result<Vec<Node>, Error>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_stmt(&mut self) -> Result<Node, Error> {
        match self.current.kind {
            TokenKind::Put => {
                let put = self.advance()?;
                let value = self.parse_operand(&put)?;
                Ok(Node::Put(Box::new(value)))
            }
            TokenKind::If | TokenKind::While => self.parse_conditional(),
            TokenKind::Identifier | TokenKind::IntegerLiteral => self.parse_primary_chain(),
            TokenKind::CloseParen | TokenKind::CloseBrace => {
                self.context.ensure_open(&self.current)?;
                Err(Error::syntax(
                    self.current.position.clone(),
                    format!("expected a statement, found {}", self.current.describe()),
                ))
            }
            TokenKind::EndOfInput => Err(Error::syntax(
                self.current.position.clone(),
                "unexpected end of input, expected a statement",
            )),
            _ => Err(Error::syntax(
                self.current.position.clone(),
                format!("unexpected {}", self.current.describe()),
            )),
        }
    }

    /// `{ stmt* }`, stopping at the brace that matches the opening one.
    fn parse_block(&mut self) -> Result<Vec<Node>, Error> {
        let open = self.expect(TokenKind::OpenBrace, "to open the block")?;
        self.context.open(&open);

        let mut body = Vec::new();
        loop {
            self.skip_empty_statements()?;
            match self.current.kind {
                TokenKind::CloseBrace => {
                    let close = self.advance()?;
                    self.context.close(&close)?;
                    break;
                }
                TokenKind::EndOfInput => {
                    return Err(Error::syntax(
                        self.current.position.clone(),
                        format!(
                            "unexpected end of input, expected {} ({}) \
                             for the block opened at {}:{}",
                            TokenKind::CloseBrace.describe(),
                            TokenKind::EndOfBlock.describe(),
                            open.position.line,
                            open.position.column,
                        ),
                    ));
                }
                _ => body.push(self.parse_stmt()?),
            }
        }

        trace!(statements = body.len(), depth = self.context.brace_depth, "parsed block");
        Ok(body)
    }
}

impl<'a> Parser<'a> {
    /// `if` / `while` followed by `( cond ) { body }`.
    fn parse_conditional(&mut self) -> Result<Node, Error> {
        let keyword = self.advance()?;
        let open = self.expect(
            TokenKind::OpenParen,
            &format!("after {}", keyword.kind.describe()),
        )?;
        self.context.open(&open);

        let condition = Box::new(self.parse_operand(&open)?);

        let close = self.expect(TokenKind::CloseParen, "to close the condition")?;
        self.context.close(&close)?;

        let body = self.parse_block()?;

        match keyword.kind {
            TokenKind::If => Ok(Node::If { condition, body }),
            TokenKind::While => Ok(Node::While { condition, body }),
            other => Err(Error::Unreachable(format!(
                "conditional statement introduced by {}",
                other.describe()
            ))),
        }
    }
}
