mod error;

use std::fmt;
use std::sync::Arc;

pub use error::Error;

/// Where a lexeme starts: source name plus 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub source: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Assign, // :=
    Plus,
    Minus,
    Mult,
    Put,
    Equal,       // =
    GreaterThan, // >
    If,
    While,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Semicolon,
    Identifier,
    IntegerLiteral,
    EndOfInput,
    // Never produced by the lexer; names the block terminator in parser diagnostics.
    EndOfBlock,
}

impl TokenKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Assign => "`:=`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Mult => "`*`",
            Self::Put => "`put`",
            Self::Equal => "`=`",
            Self::GreaterThan => "`>`",
            Self::If => "`if`",
            Self::While => "`while`",
            Self::OpenBrace => "`{`",
            Self::CloseBrace => "`}`",
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::Semicolon => "`;`",
            Self::Identifier => "identifier",
            Self::IntegerLiteral => "integer literal",
            Self::EndOfInput => "end of input",
            Self::EndOfBlock => "end of block",
        }
    }

    /// The binary operator this token introduces, if any. `:=` is not one.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Self::Plus => Some(BinaryOp::Plus),
            Self::Minus => Some(BinaryOp::Minus),
            Self::Mult => Some(BinaryOp::Mult),
            Self::Equal => Some(BinaryOp::Equal),
            Self::GreaterThan => Some(BinaryOp::GreaterThan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexemeValue {
    Integer(i64),
    Identifier(String),
    /// Source text of an operator, punctuation mark or keyword.
    Symbol(&'static str),
    None,
}

impl fmt::Display for LexemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Identifier(name) => f.write_str(name),
            Self::Symbol(text) => f.write_str(text),
            Self::None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub value: LexemeValue,
    pub position: Position,
}

impl Lexeme {
    /// Human-readable form for diagnostics, e.g. `` `x` `` or `end of input`.
    pub fn describe(&self) -> String {
        match &self.value {
            LexemeValue::None => self.kind.describe().to_string(),
            value => format!("`{}`", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Mult,
    Equal,
    GreaterThan,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Equal => "=",
            Self::GreaterThan => ">",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Assign {
        target: String,
        value: Box<Node>,
    },
    BinaryOp {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Put(Box<Node>),
    If {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    IntegerLiteral(i64),
    Identifier(String),
    EndOfInput,
}

impl Node {
    /// True for the node kinds that produce a value.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Node::IntegerLiteral(_) | Node::Identifier(_) | Node::BinaryOp { .. }
        )
    }

    /// True for identifiers and literals, which need no evaluation of their own.
    pub fn is_primary(&self) -> bool {
        matches!(self, Node::IntegerLiteral(_) | Node::Identifier(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::IntegerLiteral(value) => write!(f, "{}", value),
            Node::Identifier(name) => f.write_str(name),
            Node::BinaryOp { op, left, right } => write!(f, "{} {} {}", left, op.symbol(), right),
            Node::Assign { target, value } => write!(f, "{} := {}", target, value),
            Node::Put(value) => write!(f, "put {}", value),
            Node::If { condition, .. } => write!(f, "if ({}) {{ ... }}", condition),
            Node::While { condition, .. } => write!(f, "while ({}) {{ ... }}", condition),
            Node::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Ordered top-level nodes; the loader always terminates it with `Node::EndOfInput`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub nodes: Vec<Node>,
}
