// Binary operators: right operand in rbx, left in rax, result in rax

use crate::{Codegen, X86Instr, X86Operand, X86Reg};
use model::{BinaryOp, Error, Node};

impl Codegen {
    pub(crate) fn gen_binary(
        &mut self,
        op: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> Result<X86Operand, Error> {
        let r = self.gen_expr(right)?;
        self.load(X86Reg::Rbx, r);

        // The parser only nests to the right, so this branch is for trees
        // built by hand.
        if left.is_primary() {
            let l = self.gen_expr(left)?;
            self.load(X86Reg::Rax, l);
        } else {
            self.asm.push(X86Instr::Push(X86Reg::Rbx));
            let l = self.gen_expr(left)?;
            self.load(X86Reg::Rax, l);
            self.asm.push(X86Instr::Pop(X86Reg::Rbx));
        }

        let rax = X86Operand::Reg(X86Reg::Rax);
        let rbx = X86Operand::Reg(X86Reg::Rbx);
        match op {
            BinaryOp::Plus => self.asm.push(X86Instr::Add(rax.clone(), rbx)),
            BinaryOp::Minus => self.asm.push(X86Instr::Sub(rax.clone(), rbx)),
            BinaryOp::Mult => self.asm.push(X86Instr::Imul(rax.clone(), rbx)),
            BinaryOp::Equal | BinaryOp::GreaterThan => {
                let cc = if op == BinaryOp::Equal { "e" } else { "g" };
                self.asm.push(X86Instr::Cmp(rax.clone(), rbx));
                self.asm.push(X86Instr::Set(cc.to_string(), X86Operand::Reg(X86Reg::Al)));
                self.asm.push(X86Instr::Movzx(rax.clone(), X86Operand::Reg(X86Reg::Al)));
            }
        }
        Ok(rax)
    }
}
