//! Tree-walking evaluation of a parsed Program.
//!
//! Variables live in one flat table for the whole run: an assignment inside
//! an `if` or `while` body is visible everywhere afterwards.

use model::{BinaryOp, Error, Node, Program};
use std::collections::HashMap;
use std::io::Write;
use tracing::trace;

pub struct Interpreter<W: Write> {
    variables: HashMap<String, i64>,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// `out` receives everything the program `put`s, one value per line.
    pub fn new(out: W) -> Self {
        Self { variables: HashMap::new(), out }
    }

    /// Evaluate top-level nodes in order, stopping at `EndOfInput`.
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for node in &program.nodes {
            if matches!(node, Node::EndOfInput) {
                break;
            }
            self.evaluate(node)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Expressions yield `Some(value)`; statements run for effect and yield `None`.
    pub fn evaluate(&mut self, node: &Node) -> Result<Option<i64>, Error> {
        match node {
            Node::IntegerLiteral(value) => Ok(Some(*value)),
            Node::Identifier(name) => self.lookup(name).map(Some),
            Node::BinaryOp { op, left, right } => {
                let l = self.value_of(left)?;
                let r = self.value_of(right)?;
                Ok(Some(apply(*op, l, r)))
            }
            Node::Assign { target, value } => {
                let value = self.value_of(value)?;
                trace!(name = %target, value, "assign");
                self.variables.insert(target.clone(), value);
                Ok(None)
            }
            Node::Put(value) => {
                let value = self.value_of(value)?;
                writeln!(self.out, "{}", value)?;
                Ok(None)
            }
            Node::If { condition, body } => {
                if self.value_of(condition)? != 0 {
                    self.execute_block(body)?;
                }
                Ok(None)
            }
            Node::While { condition, body } => {
                while self.value_of(condition)? != 0 {
                    self.execute_block(body)?;
                }
                Ok(None)
            }
            Node::EndOfInput => Ok(None),
        }
    }

    /// Current value of a variable, if it has been assigned.
    pub fn variable(&self, name: &str) -> Option<i64> {
        self.variables.get(name).copied()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn execute_block(&mut self, body: &[Node]) -> Result<(), Error> {
        for node in body {
            self.evaluate(node)?;
        }
        Ok(())
    }

    fn value_of(&mut self, node: &Node) -> Result<i64, Error> {
        self.evaluate(node)?
            .ok_or_else(|| Error::Unreachable(format!("`{}` used as a value", node)))
    }

    fn lookup(&self, name: &str) -> Result<i64, Error> {
        self.variable(name)
            .ok_or_else(|| Error::UndefinedVariable { name: name.to_string() })
    }
}

/// Arithmetic wraps at 64 bits, the same as the generated `add`/`sub`/`imul`.
fn apply(op: BinaryOp, l: i64, r: i64) -> i64 {
    match op {
        BinaryOp::Plus => l.wrapping_add(r),
        BinaryOp::Minus => l.wrapping_sub(r),
        BinaryOp::Mult => l.wrapping_mul(r),
        BinaryOp::Equal => i64::from(l == r),
        BinaryOp::GreaterThan => i64::from(l > r),
    }
}
