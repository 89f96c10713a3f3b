// Conditionals and loops: labels, tests and jumps

use crate::{Codegen, X86Instr, X86Operand, X86Reg};
use model::{Error, Node};
use tracing::debug;

impl Codegen {
    pub(crate) fn next_label(&mut self) -> String {
        let label = format!("addr_{}", self.label_counter);
        self.label_counter += 1;
        debug!(%label, "mint label");
        label
    }

    /// Condition value into rax, then set the flags from it.
    fn gen_condition(&mut self, condition: &Node) -> Result<(), Error> {
        let operand = self.gen_expr(condition)?;
        self.load(X86Reg::Rax, operand);
        self.asm.push(X86Instr::Test(X86Operand::Reg(X86Reg::Rax), X86Operand::Reg(X86Reg::Rax)));
        Ok(())
    }

    pub(crate) fn gen_if(&mut self, condition: &Node, body: &[Node]) -> Result<(), Error> {
        self.asm.push(X86Instr::Comment("if".to_string()));
        let end = self.next_label();
        self.gen_condition(condition)?;
        self.asm.push(X86Instr::Jcc("z".to_string(), end.clone()));
        self.gen_block(body)?;
        self.asm.push(X86Instr::Label(end));
        Ok(())
    }

    /// Test at the bottom: one conditional jump per iteration. The condition
    /// is resolved before the body, in source order, and spliced in after it.
    pub(crate) fn gen_while(&mut self, condition: &Node, body: &[Node]) -> Result<(), Error> {
        self.asm.push(X86Instr::Comment("while".to_string()));
        let test = self.next_label();
        let top = self.next_label();

        let outer = std::mem::take(&mut self.asm);
        let resolved = self.gen_condition(condition);
        let condition_code = std::mem::replace(&mut self.asm, outer);
        resolved?;

        self.asm.push(X86Instr::Jmp(test.clone()));
        self.asm.push(X86Instr::Label(top.clone()));
        self.gen_block(body)?;
        self.asm.push(X86Instr::Label(test));
        self.asm.extend(condition_code);
        self.asm.push(X86Instr::Jcc("nz".to_string(), top));
        Ok(())
    }
}
