use crate::parser::Parser;
use model::{Error, Lexeme, LexemeValue, Node, TokenKind};

/// Expression parsing. There is no precedence climbing: a primary is
/// followed by at most one operator, and the right-hand side is a full
/// recursive parse, so every chain nests to the right.
pub(crate) trait ExpressionParser {
    fn parse_primary_chain(&mut self) -> Result<Node, Error>;
    /// Parse a value-producing operand for the construct introduced by `after`.
    fn parse_operand(&mut self, after: &Lexeme) -> Result<Node, Error>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_primary_chain(&mut self) -> Result<Node, Error> {
        let Lexeme { value, position, .. } = self.advance()?;
        let primary = match value {
            LexemeValue::Integer(v) => Node::IntegerLiteral(v),
            LexemeValue::Identifier(name) => Node::Identifier(name),
            other => {
                return Err(Error::Unreachable(format!("`{}` parsed as a primary", other)));
            }
        };

        if self.current.kind == TokenKind::Assign {
            let assign = self.advance()?;
            let Node::Identifier(target) = primary else {
                return Err(Error::syntax(position, format!("cannot assign to `{}`", primary)));
            };
            let value = self.parse_operand(&assign)?;
            return Ok(Node::Assign { target, value: Box::new(value) });
        }

        if let Some(op) = self.current.kind.binary_op() {
            let operator = self.advance()?;
            let right = self.parse_operand(&operator)?;
            return Ok(Node::BinaryOp { op, left: Box::new(primary), right: Box::new(right) });
        }

        match self.current.kind {
            // A condition runs to its `)`; only statements end at `;`.
            TokenKind::Semicolon if self.context.paren_depth == 0 => {
                self.advance()?;
                Ok(primary)
            }
            TokenKind::EndOfInput => Ok(primary),
            // Left for the enclosing condition or block to consume.
            TokenKind::CloseParen | TokenKind::CloseBrace => {
                self.context.ensure_open(&self.current)?;
                Ok(primary)
            }
            _ => Err(Error::syntax(
                self.current.position.clone(),
                format!("unexpected {} after `{}`", self.current.describe(), primary),
            )),
        }
    }

    fn parse_operand(&mut self, after: &Lexeme) -> Result<Node, Error> {
        let position = self.current.position.clone();
        let starts_expression = matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::IntegerLiteral
        );
        if !starts_expression {
            self.context.ensure_open(&self.current)?;
            return Err(Error::syntax(
                position,
                format!(
                    "expected an expression after {}, found {}",
                    after.describe(),
                    self.current.describe()
                ),
            ));
        }

        let node = self.parse_primary_chain()?;
        if !node.is_expression() {
            return Err(Error::syntax(
                position,
                format!("expected an expression after {}, found `{}`", after.describe(), node),
            ));
        }
        Ok(node)
    }
}
