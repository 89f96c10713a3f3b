// Parser module: turns the lexeme stream into top-level AST nodes
//
// Module organization:
// - parser.rs: Parser struct, nesting context, token helpers
// - statements.rs: put / if / while and block bodies
// - expressions.rs: primaries and right-recursive operator chains

mod expressions;
mod parser;
mod statements;

use lexer::Lexer;
use model::{Error, Node, Program};

pub use parser::{ParseContext, Parser};

/// Parse a whole source text into a Program terminated by `Node::EndOfInput`.
///
/// # Arguments
/// * `input` - Source text
/// * `source_name` - Name used as the prefix of every diagnostic
pub fn parse_program(input: &str, source_name: &str) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(input, source_name))?;
    let mut nodes = Vec::new();
    loop {
        let node = parser.parse()?;
        let done = node == Node::EndOfInput;
        nodes.push(node);
        if done {
            return Ok(Program { nodes });
        }
    }
}
