mod binary_ops;
mod control_flow;
mod memory_ops;
mod runtime;
mod x86;

use model::{Error, Node, Program};
use std::collections::HashMap;

pub use x86::{X86Instr, X86Operand, X86Reg, emit_asm};

/// Bytes reserved per variable below rbp.
pub const SLOT_SIZE: i32 = 8;

pub struct Codegen {
    // Per compilation unit; cleared by gen_program
    slots: HashMap<String, i32>,
    next_offset: i32,
    label_counter: usize,
    asm: Vec<X86Instr>,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_offset: 0,
            label_counter: 0,
            asm: Vec::new(),
        }
    }

    /// Translate a whole Program into one NASM source text: print routine,
    /// `main` body, exit sequence, `_start` trampoline.
    pub fn gen_program(&mut self, prog: &Program) -> Result<String, Error> {
        self.slots.clear();
        self.next_offset = 0;
        self.label_counter = 0;
        self.asm.clear();

        for node in &prog.nodes {
            if matches!(node, Node::EndOfInput) {
                return Ok(self.finish());
            }
            self.gen_stmt(node)?;
        }
        Err(Error::Unreachable("program has no end-of-input terminator".to_string()))
    }

    /// Number of distinct variables given a stack slot so far.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// rbp-relative distance of a variable's slot (8, 16, ...).
    pub fn offset_of(&self, name: &str) -> Option<i32> {
        self.slots.get(name).copied()
    }

    pub fn label_count(&self) -> usize {
        self.label_counter
    }

    pub(crate) fn gen_stmt(&mut self, node: &Node) -> Result<(), Error> {
        match node {
            Node::Assign { target, value } => self.gen_assign(target, value),
            Node::Put(value) => {
                self.asm.push(X86Instr::Comment("put".to_string()));
                let operand = self.gen_expr(value)?;
                self.load(X86Reg::Rdi, operand);
                self.asm.push(X86Instr::Call(runtime::PRINT_SYMBOL.to_string()));
                Ok(())
            }
            Node::If { condition, body } => self.gen_if(condition, body),
            Node::While { condition, body } => self.gen_while(condition, body),
            Node::IntegerLiteral(_) | Node::Identifier(_) | Node::BinaryOp { .. } => {
                // Evaluated for its undefined-variable check only
                self.gen_expr(node)?;
                Ok(())
            }
            Node::EndOfInput => Err(Error::Unreachable(
                "end of input inside a block".to_string(),
            )),
        }
    }

    pub(crate) fn gen_block(&mut self, body: &[Node]) -> Result<(), Error> {
        for node in body {
            self.gen_stmt(node)?;
        }
        Ok(())
    }

    /// Place the value of an expression; instructions needed to compute it
    /// are appended to the body first.
    pub(crate) fn gen_expr(&mut self, node: &Node) -> Result<X86Operand, Error> {
        match node {
            Node::IntegerLiteral(value) => Ok(X86Operand::Imm(*value)),
            Node::Identifier(name) => self.slot_of(name),
            Node::BinaryOp { op, left, right } => self.gen_binary(*op, left, right),
            other => Err(Error::Unreachable(format!("`{}` used as a value", other))),
        }
    }

    /// Move `operand` into `reg` unless it is already there.
    pub(crate) fn load(&mut self, reg: X86Reg, operand: X86Operand) {
        if operand != X86Operand::Reg(reg) {
            self.asm.push(X86Instr::Mov(X86Operand::Reg(reg), operand));
        }
    }

    fn frame_size(&self) -> i32 {
        (self.next_offset + 15) / 16 * 16
    }

    fn finish(&mut self) -> String {
        let mut prologue = vec![
            X86Instr::Label("main".to_string()),
            X86Instr::Push(X86Reg::Rbp),
            X86Instr::Mov(X86Operand::Reg(X86Reg::Rbp), X86Operand::Reg(X86Reg::Rsp)),
        ];
        let frame = self.frame_size();
        if frame > 0 {
            prologue.push(X86Instr::Sub(
                X86Operand::Reg(X86Reg::Rsp),
                X86Operand::Imm(i64::from(frame)),
            ));
        }

        let epilogue = [
            X86Instr::Comment("exit".to_string()),
            X86Instr::Mov(X86Operand::Reg(X86Reg::Rax), X86Operand::Label("SYS_EXIT".to_string())),
            X86Instr::Mov(X86Operand::Reg(X86Reg::Rdi), X86Operand::Imm(0)),
            X86Instr::Syscall,
            X86Instr::Label("_start".to_string()),
            X86Instr::Call("main".to_string()),
        ];

        let mut output = String::new();
        output.push_str(runtime::HEADER);
        output.push_str(runtime::PRINT_ROUTINE);
        output.push_str(&emit_asm(&prologue));
        output.push_str(&emit_asm(&self.asm));
        output.push_str(&emit_asm(&epilogue));
        output
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
